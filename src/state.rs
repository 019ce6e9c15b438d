//! Panel identity, lock state, and the derived panel state machine
//!
//! The derivation functions are pure: given the previous and new center
//! offsets plus the side's fully-open offset, they compute the discrete
//! state observers are notified of. Rule order matters and is part of the
//! contract: the closed check runs first, then the exact-open check, then
//! the directional opening check. Equal offsets therefore derive `Closing`.

use serde::{Deserialize, Serialize};

use crate::config::LayoutDirection;

/// A logical panel slot, independent of visual left/right
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Panel {
    Start,
    Center,
    End,
}

/// The two side panel slots (the center panel has no lock or state of its own)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Start,
    End,
}

/// Per-side lock override
///
/// `Open` pins the panel fully open and disables drag-to-close.
/// `Close` pins it closed and prevents drag-to-open.
/// `Unlocked` leaves the panel gesture-controlled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockState {
    Open,
    Close,
    Unlocked,
}

/// Resolved horizontal swipe direction for one gesture session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Left,
    Right,
}

/// Discrete state of one side panel, derived from the center offset
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PanelState {
    Opening,
    Opened { is_locked: bool },
    Closing,
    Closed,
}

impl PanelState {
    pub fn is_opened(&self) -> bool {
        matches!(self, PanelState::Opened { .. })
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, PanelState::Closed)
    }
}

/// Derive the start panel's state from a committed offset change
///
/// `open_x` is the center offset at which the start panel is fully
/// revealed. `locked_open` reports whether the side is currently pinned
/// open, which is surfaced through `Opened::is_locked`.
pub fn start_panel_state(
    previous_x: f32,
    x: f32,
    open_x: f32,
    direction: LayoutDirection,
    locked_open: bool,
) -> PanelState {
    let ltr = direction.is_ltr();
    if (ltr && x <= 0.0) || (!ltr && x >= 0.0) {
        PanelState::Closed
    } else if x == open_x {
        PanelState::Opened {
            is_locked: locked_open,
        }
    } else if (ltr && x > previous_x) || (!ltr && x < previous_x) {
        PanelState::Opening
    } else {
        PanelState::Closing
    }
}

/// Derive the end panel's state from a committed offset change
///
/// Mirror image of [`start_panel_state`]: the end panel opens as the
/// center offset moves toward the other sign.
pub fn end_panel_state(
    previous_x: f32,
    x: f32,
    open_x: f32,
    direction: LayoutDirection,
    locked_open: bool,
) -> PanelState {
    let ltr = direction.is_ltr();
    if (ltr && x >= 0.0) || (!ltr && x <= 0.0) {
        PanelState::Closed
    } else if x == open_x {
        PanelState::Opened {
            is_locked: locked_open,
        }
    } else if (ltr && x < previous_x) || (!ltr && x > previous_x) {
        PanelState::Opening
    } else {
        PanelState::Closing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LTR: LayoutDirection = LayoutDirection::LeftToRight;
    const RTL: LayoutDirection = LayoutDirection::RightToLeft;

    #[test]
    fn start_panel_closed_at_or_below_zero() {
        assert_eq!(start_panel_state(50.0, 0.0, 300.0, LTR, false), PanelState::Closed);
        assert_eq!(start_panel_state(0.0, -10.0, 300.0, LTR, false), PanelState::Closed);
    }

    #[test]
    fn start_panel_opened_exactly_at_open_x() {
        assert_eq!(
            start_panel_state(200.0, 300.0, 300.0, LTR, false),
            PanelState::Opened { is_locked: false }
        );
        assert_eq!(
            start_panel_state(300.0, 300.0, 300.0, LTR, true),
            PanelState::Opened { is_locked: true }
        );
    }

    #[test]
    fn start_panel_directional_opening_and_closing() {
        assert_eq!(start_panel_state(100.0, 150.0, 300.0, LTR, false), PanelState::Opening);
        assert_eq!(start_panel_state(150.0, 100.0, 300.0, LTR, false), PanelState::Closing);
    }

    #[test]
    fn equal_offsets_derive_closing() {
        // Intentional: the opened/closed checks run first, and an offset
        // that did not move in the opening direction falls through to
        // Closing.
        assert_eq!(start_panel_state(150.0, 150.0, 300.0, LTR, false), PanelState::Closing);
        assert_eq!(end_panel_state(-150.0, -150.0, -300.0, LTR, false), PanelState::Closing);
    }

    #[test]
    fn end_panel_mirrors_start_panel() {
        assert_eq!(end_panel_state(-50.0, 0.0, -300.0, LTR, false), PanelState::Closed);
        assert_eq!(
            end_panel_state(-200.0, -300.0, -300.0, LTR, false),
            PanelState::Opened { is_locked: false }
        );
        assert_eq!(end_panel_state(-100.0, -150.0, -300.0, LTR, false), PanelState::Opening);
        assert_eq!(end_panel_state(-150.0, -100.0, -300.0, LTR, false), PanelState::Closing);
    }

    #[test]
    fn rtl_inverts_the_sign_mapping() {
        // In RTL the start panel opens toward negative offsets.
        assert_eq!(start_panel_state(0.0, 10.0, -300.0, RTL, false), PanelState::Closed);
        assert_eq!(start_panel_state(-100.0, -150.0, -300.0, RTL, false), PanelState::Opening);
        assert_eq!(
            start_panel_state(-200.0, -300.0, -300.0, RTL, false),
            PanelState::Opened { is_locked: false }
        );
        assert_eq!(end_panel_state(100.0, 150.0, 300.0, RTL, false), PanelState::Opening);
    }

    #[test]
    fn derivation_is_deterministic() {
        for _ in 0..3 {
            assert_eq!(
                start_panel_state(120.0, 80.0, 300.0, LTR, false),
                start_panel_state(120.0, 80.0, 300.0, LTR, false)
            );
        }
    }
}
