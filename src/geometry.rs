//! Geometry resolution for the three canonical rest offsets
//!
//! The center panel rests at one of three offsets: 0 (both side panels
//! closed), `start_open_x` (start panel fully revealed), and `end_open_x`
//! (end panel fully revealed). These derive from the measured side panel
//! widths plus the inter-panel margin, sign-adjusted for layout direction.

use serde::{Deserialize, Serialize};

use crate::config::{LayoutDirection, PanelsConfig};

/// Host viewport size in physical pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

/// Axis-aligned rectangle in screen coordinates
///
/// Used for exclusion regions where child content owns horizontal
/// gestures. Containment is inclusive of edges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }
}

/// Clamp a measured width to something the animator can consume
///
/// Degenerate (negative) and non-finite measurements collapse to a
/// zero-width panel rather than letting NaN or infinity reach the offset
/// math.
pub fn sanitize_width(width: f32) -> f32 {
    if width.is_finite() {
        width.max(0.0)
    } else {
        0.0
    }
}

/// Center offset at which the start panel is fully revealed
pub fn start_open_x(start_panel_width: f32, margin: f32, direction: LayoutDirection) -> f32 {
    let x = sanitize_width(start_panel_width) + sanitize_width(margin);
    if direction.is_ltr() {
        x
    } else {
        -x
    }
}

/// Center offset at which the end panel is fully revealed
pub fn end_open_x(end_panel_width: f32, margin: f32, direction: LayoutDirection) -> f32 {
    let x = -(sanitize_width(end_panel_width) + sanitize_width(margin));
    if direction.is_ltr() {
        x
    } else {
        -x
    }
}

/// Side panel width when not using the full viewport width
///
/// Computed from the portrait-mode width (the smaller viewport dimension)
/// minus the inter-panel margin and the strip of center panel that stays
/// visible while a side panel is open, optionally capped by
/// `max_side_panel_width_px`.
pub fn non_full_screen_side_panel_width(viewport: Viewport, config: &PanelsConfig) -> f32 {
    let portrait_width = sanitize_width(viewport.width.min(viewport.height));
    let width = (portrait_width
        - config.margin_between_panels_px
        - config.closed_center_panel_visible_width_px)
        .max(0.0);
    match config.max_side_panel_width_px {
        Some(max) => width.min(sanitize_width(max)),
        None => width,
    }
}

/// The two open offsets, each unknown until the host reports a measured
/// width for that side
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PanelGeometry {
    pub start_open_x: Option<f32>,
    pub end_open_x: Option<f32>,
}

impl PanelGeometry {
    /// Both side panel widths have been reported
    pub fn established(&self) -> bool {
        self.start_open_x.is_some() && self.end_open_x.is_some()
    }

    /// `(min, max)` bounds of the center offset, once established
    pub fn bounds(&self) -> Option<(f32, f32)> {
        let start = self.start_open_x?;
        let end = self.end_open_x?;
        Some((start.min(end), start.max(end)))
    }
}
