//! Pointer event primitives and the gesture classifier
//!
//! The classifier decides, per event, whether one touch sequence is a
//! horizontal pan the engine should own, a tap on the closed center panel,
//! or something the host's child content keeps. It tracks exactly one
//! session at a time; the session is created on pointer-down and torn down
//! on up/cancel.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::geometry::Rect;
use crate::state::SwipeDirection;
use crate::velocity::VelocityTracker;

/// Kind of pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerKind {
    Down,
    Move,
    Up,
    Cancel,
}

/// One pointer event in the host view's coordinate space
///
/// `x`/`y` are view-local, `raw_x`/`raw_y` are screen coordinates (the
/// space exclusion regions are expressed in). `time` is measured from an
/// arbitrary but monotonic stream origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub x: f32,
    pub y: f32,
    pub raw_x: f32,
    pub raw_y: f32,
    #[serde(with = "duration_millis")]
    pub time: Duration,
}

/// Serialize event times as integer milliseconds
mod duration_millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(deserializer)?))
    }
}

/// Phase of the current gesture session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GesturePhase {
    Idle,
    Deciding,
    Panning,
}

/// Per-touch-sequence gesture state
///
/// Owned by the controller for the duration of one down..up/cancel
/// sequence.
#[derive(Debug)]
pub struct GestureClassifier {
    phase: GesturePhase,
    origin_x: f32,
    origin_y: f32,
    down_on_closed_center: bool,
    is_home_gesture: bool,
    swipe_direction: Option<SwipeDirection>,
    velocity: VelocityTracker,
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self {
            phase: GesturePhase::Idle,
            origin_x: 0.0,
            origin_y: 0.0,
            down_on_closed_center: false,
            is_home_gesture: false,
            swipe_direction: None,
            velocity: VelocityTracker::new(),
        }
    }
}

impl GestureClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session from a pointer-down event
    ///
    /// `down_on_closed_center` and `is_home_gesture` are computed by the
    /// controller, which owns the geometry needed to answer them.
    pub fn begin(&mut self, event: &PointerEvent, down_on_closed_center: bool, is_home_gesture: bool) {
        self.phase = GesturePhase::Deciding;
        self.origin_x = event.x;
        self.origin_y = event.y;
        self.down_on_closed_center = down_on_closed_center;
        self.is_home_gesture = is_home_gesture;
        self.swipe_direction = None;
        self.velocity.clear();
        self.velocity.add_movement(event.time, event.raw_x);
        trace!(
            target: "gesture",
            x = event.x,
            down_on_closed_center,
            is_home_gesture,
            "session start"
        );
    }

    /// End the session and reset to idle
    pub fn finish(&mut self) {
        self.phase = GesturePhase::Idle;
        self.down_on_closed_center = false;
        self.is_home_gesture = false;
        self.swipe_direction = None;
    }

    pub fn is_panning(&self) -> bool {
        self.phase == GesturePhase::Panning
    }

    pub fn is_active(&self) -> bool {
        self.phase != GesturePhase::Idle
    }

    pub fn down_on_closed_center(&self) -> bool {
        self.down_on_closed_center
    }

    pub fn is_home_gesture(&self) -> bool {
        self.is_home_gesture
    }

    pub fn swipe_direction(&self) -> Option<SwipeDirection> {
        self.swipe_direction
    }

    fn distance_x(&self, event: &PointerEvent) -> f32 {
        event.x - self.origin_x
    }

    fn distance_y(&self, event: &PointerEvent) -> f32 {
        event.y - self.origin_y
    }

    /// Observe a move while deciding; returns true on the move that claims
    /// the gesture as a horizontal pan
    ///
    /// The pan is claimed when the horizontal travel exceeds the slop,
    /// dominates the vertical travel, and the point is outside every
    /// exclusion region. Once panning, later moves stay claimed regardless
    /// of exclusion regions: a drag in progress is not interrupted.
    pub fn observe_move(&mut self, event: &PointerEvent, slop: f32, regions: &[Rect]) -> bool {
        if self.phase != GesturePhase::Deciding {
            return false;
        }
        let dx = self.distance_x(event);
        let dy = self.distance_y(event);
        if dx.abs() > slop
            && dx.abs() > dy.abs()
            && !point_in_regions(regions, event.raw_x, event.raw_y)
        {
            self.phase = GesturePhase::Panning;
            trace!(target: "gesture", dx, dy, "pan claimed");
            true
        } else {
            false
        }
    }

    /// Resolve the swipe direction once the slop is exceeded; first
    /// resolution wins for the rest of the session
    pub fn resolve_swipe_direction(&mut self, event: &PointerEvent, slop: f32) {
        if self.swipe_direction.is_some() {
            return;
        }
        let dx = self.distance_x(event);
        if dx.abs() > slop {
            self.swipe_direction = Some(if dx > 0.0 {
                SwipeDirection::Right
            } else {
                SwipeDirection::Left
            });
        }
    }

    /// Feed a sample into the velocity tracker
    pub fn track(&mut self, event: &PointerEvent) {
        self.velocity.add_movement(event.time, event.raw_x);
    }

    /// Release speed estimate in px/s
    pub fn x_velocity(&self) -> f32 {
        self.velocity.x_velocity()
    }

    /// Whether a release classifies as a tap on the closed center panel
    ///
    /// True when the down landed on the still-covered center strip, the
    /// pointer never travelled past the slop, and no pan was claimed.
    pub fn is_tap_on_closed_center(&self, event: &PointerEvent, slop: f32) -> bool {
        self.down_on_closed_center
            && self.distance_x(event).abs() < slop
            && self.phase != GesturePhase::Panning
    }
}

/// Edge-inclusive membership test against the exclusion regions
pub fn point_in_regions(regions: &[Rect], raw_x: f32, raw_y: f32) -> bool {
    regions.iter().any(|region| region.contains(raw_x, raw_y))
}
