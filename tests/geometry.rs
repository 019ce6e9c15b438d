//! Geometry behavior through the controller: layout direction, width
//! reports, the full-width start override, and degenerate measurements

mod common;

use common::{drain_animation, ev, test_controller_with, PANEL_WIDTH};
use overpanels::{
    LayoutDirection, PanelsConfig, PanelsController, PointerKind, Side, Viewport,
};

#[test]
fn rtl_mirrors_the_open_offsets() {
    let mut controller = test_controller_with(PanelsConfig::default(), LayoutDirection::RightToLeft);
    assert_eq!(controller.offset_bounds(), Some((-300.0, 300.0)));

    controller.open_start();
    drain_animation(&mut controller, 0);
    // In RTL the start panel sits on the visual right: negative offset.
    assert_eq!(controller.offset(), -300.0);
    assert!(controller.panel_state(Side::Start).is_opened());
    assert!(controller.panel_state(Side::End).is_closed());
}

#[test]
fn rtl_swipe_left_opens_the_start_panel() {
    let mut controller = test_controller_with(PanelsConfig::default(), LayoutDirection::RightToLeft);
    controller.handle_pointer_event(&ev(PointerKind::Down, 400.0, 0));
    controller.handle_pointer_event(&ev(PointerKind::Move, 300.0, 1000));
    controller.handle_pointer_event(&ev(PointerKind::Move, 200.0, 2000));
    controller.handle_pointer_event(&ev(PointerKind::Up, 200.0, 3000));
    drain_animation(&mut controller, 4000);
    assert_eq!(controller.offset(), -300.0);
    assert!(controller.panel_state(Side::Start).is_opened());
}

#[test]
fn viewport_report_establishes_geometry_from_the_portrait_width() {
    let mut controller =
        PanelsController::new(PanelsConfig::default(), LayoutDirection::LeftToRight);
    assert!(controller.offset_bounds().is_none());

    controller.set_viewport(Viewport {
        width: 1080.0,
        height: 720.0,
    });
    // Portrait width 720 - margin 16 - visible strip 48 = 656 panel width,
    // opening at 656 + 16.
    assert_eq!(controller.desired_end_panel_width(), Some(656.0));
    assert_eq!(controller.offset_bounds(), Some((-672.0, 672.0)));
}

#[test]
fn full_width_start_override_widens_only_the_start_panel() {
    let config = PanelsConfig::default();
    let mut controller = test_controller_with(config, LayoutDirection::LeftToRight);
    controller.set_full_width_start(true);

    // Desired start width becomes the viewport width (800), so the start
    // open offset is 800 + 16 while the end side is untouched.
    assert_eq!(controller.desired_start_panel_width(), Some(800.0));
    assert_eq!(controller.offset_bounds(), Some((-300.0, 816.0)));
}

#[test]
fn full_width_toggle_while_open_reopens_at_the_new_width() {
    let mut controller = test_controller_with(PanelsConfig::default(), LayoutDirection::LeftToRight);
    controller.open_start();
    drain_animation(&mut controller, 0);
    assert_eq!(controller.offset(), 300.0);

    controller.set_full_width_start(true);
    assert!(controller.is_animating());
    drain_animation(&mut controller, 10_000);
    assert_eq!(controller.offset(), 816.0);
    assert!(controller.panel_state(Side::Start).is_opened());

    controller.set_full_width_start(false);
    drain_animation(&mut controller, 20_000);
    // Back to the non-full-screen width: 600 - 16 - 48 + 16 margin.
    assert_eq!(controller.offset(), 552.0);
    assert!(controller.panel_state(Side::Start).is_opened());
}

#[test]
fn width_report_for_the_closed_side_does_not_move_the_offset() {
    let mut controller = test_controller_with(PanelsConfig::default(), LayoutDirection::LeftToRight);
    controller.open_start();
    drain_animation(&mut controller, 0);

    controller.update_end_panel_width(PANEL_WIDTH + 100.0);
    assert!(!controller.is_animating());
    assert_eq!(controller.offset(), 300.0);
    assert_eq!(controller.offset_bounds(), Some((-400.0, 300.0)));
}

#[test]
fn degenerate_width_reports_clamp_instead_of_poisoning_the_offset() {
    let mut controller = test_controller_with(PanelsConfig::default(), LayoutDirection::LeftToRight);
    controller.update_start_panel_width(f32::NAN);
    controller.update_end_panel_width(-50.0);

    // Zero-width panels: the open offsets collapse to the bare margin.
    assert_eq!(controller.offset_bounds(), Some((-16.0, 16.0)));
    controller.open_start();
    drain_animation(&mut controller, 0);
    assert!(controller.offset().is_finite());
    assert_eq!(controller.offset(), 16.0);
}

#[test]
fn max_side_panel_width_caps_the_computed_width() {
    let config = PanelsConfig {
        max_side_panel_width_px: Some(240.0),
        ..PanelsConfig::default()
    };
    let mut controller = PanelsController::new(config, LayoutDirection::LeftToRight);
    controller.set_viewport(Viewport {
        width: 800.0,
        height: 600.0,
    });
    assert_eq!(controller.desired_start_panel_width(), Some(240.0));
    assert_eq!(controller.offset_bounds(), Some((-256.0, 256.0)));
}
