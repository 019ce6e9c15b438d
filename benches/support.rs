//! Shared helpers for benchmarks

#![allow(dead_code)]

use std::time::Duration;

use overpanels::{
    LayoutDirection, PanelsConfig, PanelsController, PointerEvent, PointerKind, Viewport,
};

/// Controller with established geometry (start +300, end -300)
pub fn make_controller() -> PanelsController {
    let mut controller =
        PanelsController::new(PanelsConfig::default(), LayoutDirection::LeftToRight);
    controller.set_viewport(Viewport {
        width: 800.0,
        height: 600.0,
    });
    controller.update_start_panel_width(284.0);
    controller.update_end_panel_width(284.0);
    controller
}

/// Synthetic drag stream: down, `moves` move events across `travel` px,
/// then release
pub fn drag_stream(moves: usize, travel: f32) -> Vec<PointerEvent> {
    let mut events = Vec::with_capacity(moves + 2);
    let event = |kind, x, millis| PointerEvent {
        kind,
        x,
        y: 100.0,
        raw_x: x,
        raw_y: 100.0,
        time: Duration::from_millis(millis),
    };
    events.push(event(PointerKind::Down, 0.0, 0));
    for i in 1..=moves {
        let x = travel * i as f32 / moves as f32;
        events.push(event(PointerKind::Move, x, i as u64 * 8));
    }
    events.push(event(PointerKind::Up, travel, (moves as u64 + 1) * 8));
    events
}
