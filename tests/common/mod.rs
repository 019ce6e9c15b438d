//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use overpanels::{
    LayoutDirection, PanelState, PanelsConfig, PanelsController, PointerEvent, PointerKind, Side,
    Viewport,
};

/// Geometry used across the tests: start opens at +300, end at -300
pub const START_OPEN_X: f32 = 300.0;
pub const END_OPEN_X: f32 = -300.0;
pub const PANEL_WIDTH: f32 = 284.0;
pub const VIEWPORT: Viewport = Viewport {
    width: 800.0,
    height: 600.0,
};

/// LTR controller with established geometry (±300) and default thresholds
pub fn test_controller() -> PanelsController {
    test_controller_with(PanelsConfig::default(), LayoutDirection::LeftToRight)
}

/// Controller with explicit config/direction; widths are reported directly
/// so the open offsets land exactly on ±300 regardless of viewport math
pub fn test_controller_with(config: PanelsConfig, direction: LayoutDirection) -> PanelsController {
    let mut controller = PanelsController::new(config, direction);
    controller.set_viewport(VIEWPORT);
    controller.update_start_panel_width(PANEL_WIDTH);
    controller.update_end_panel_width(PANEL_WIDTH);
    controller
}

/// Build a pointer event with view and screen coordinates identical
pub fn pointer(kind: PointerKind, x: f32, y: f32, millis: u64) -> PointerEvent {
    PointerEvent {
        kind,
        x,
        y,
        raw_x: x,
        raw_y: y,
        time: Duration::from_millis(millis),
    }
}

/// Pointer event on the usual horizontal drag line (y = 100)
pub fn ev(kind: PointerKind, x: f32, millis: u64) -> PointerEvent {
    pointer(kind, x, 100.0, millis)
}

/// Run frame ticks at 60 Hz from `start_ms` until the animation settles
pub fn drain_animation(controller: &mut PanelsController, start_ms: u64) {
    let mut now = Duration::from_millis(start_ms);
    let frame = Duration::from_millis(16);
    while controller.tick(now) {
        now += frame;
        assert!(
            now < Duration::from_millis(start_ms + 60_000),
            "animation did not settle within a minute of frames"
        );
    }
}

/// Record every notified state for one side
pub fn record_states(
    controller: &mut PanelsController,
    side: Side,
) -> Rc<RefCell<Vec<PanelState>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    controller.register_state_listener(side, move |state| sink.borrow_mut().push(state));
    log
}

/// Drag from `from_x` to `to_x` in a few steps and release
///
/// The steps are seconds apart so the velocity tracker never reads the
/// release as a fling.
pub fn slow_drag(controller: &mut PanelsController, from_x: f32, to_x: f32) {
    controller.handle_pointer_event(&ev(PointerKind::Down, from_x, 0));
    let step = (to_x - from_x) / 4.0;
    for i in 1..=4u64 {
        let x = from_x + step * i as f32;
        controller.handle_pointer_event(&ev(PointerKind::Move, x, i * 1000));
    }
    controller.handle_pointer_event(&ev(PointerKind::Up, to_x, 5000));
}
