//! Benchmarks for gesture classification and offset normalization
//!
//! Run with: cargo bench gesture

mod support;
use support::{drag_stream, make_controller};

use overpanels::{LayoutDirection, PanelState};

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

// ============================================================================
// Normalization
// ============================================================================

#[divan::bench]
fn normalize_sweep() {
    let controller = make_controller();
    let mut acc = 0.0f32;
    for i in -500..=500 {
        acc += controller.normalize(i as f32);
    }
    divan::black_box(acc);
}

// ============================================================================
// Full drag streams
// ============================================================================

#[divan::bench(args = [16, 64, 256])]
fn drag_stream_processing(moves: usize) {
    let events = drag_stream(moves, 320.0);
    let mut controller = make_controller();
    for event in &events {
        divan::black_box(controller.handle_pointer_event(event));
    }
}

// ============================================================================
// State derivation
// ============================================================================

#[divan::bench]
fn derive_states_across_travel() {
    let direction = LayoutDirection::LeftToRight;
    let mut last = PanelState::Closed;
    for i in 0..600 {
        let previous = i as f32 - 300.0;
        let x = previous + 1.0;
        last = overpanels::state::start_panel_state(previous, x, 300.0, direction, false);
    }
    divan::black_box(last);
}
