//! Cancellable, tick-driven offset animation
//!
//! Animations are sampled by the host's frame clock through
//! [`crate::controller::PanelsController::tick`]; there is no internal
//! timer. The animation starts on its first sample, runs for a fixed
//! duration, and is dropped by the controller when a new target or a
//! gesture claim supersedes it.

use std::time::Duration;

/// Easing curves for offset animation
///
/// `Standard` is the fast-out-slow-in curve used for regular open/close;
/// `Decelerate` is the linear-out-slow-in curve used for flings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Standard,
    Decelerate,
}

impl Easing {
    /// Map a linear progress fraction in `[0, 1]` through the curve
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Standard => cubic_bezier(0.4, 0.0, 0.2, 1.0, t),
            Easing::Decelerate => cubic_bezier(0.0, 0.0, 0.2, 1.0, t),
        }
    }
}

/// Evaluate a CSS-style cubic bezier timing curve at progress `x`
///
/// Control points are `(x1, y1)` and `(x2, y2)`; endpoints are fixed at
/// (0,0) and (1,1). The parameter for a given x is found by bisection,
/// which is plenty at one sample per frame.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, x: f32) -> f32 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    let sample = |c1: f32, c2: f32, t: f32| -> f32 {
        // Cubic bezier with P0 = 0 and P3 = 1.
        let one_minus = 1.0 - t;
        3.0 * one_minus * one_minus * t * c1 + 3.0 * one_minus * t * t * c2 + t * t * t
    };

    let mut lo = 0.0f32;
    let mut hi = 1.0f32;
    let mut t = x;
    for _ in 0..24 {
        let sampled = sample(x1, x2, t);
        if (sampled - x).abs() < 1e-5 {
            break;
        }
        if sampled < x {
            lo = t;
        } else {
            hi = t;
        }
        t = (lo + hi) * 0.5;
    }
    sample(y1, y2, t)
}

/// One in-flight center offset animation
#[derive(Debug)]
pub struct OffsetAnimation {
    from: f32,
    to: f32,
    duration: Duration,
    easing: Easing,
    started_at: Option<Duration>,
}

impl OffsetAnimation {
    pub fn new(from: f32, to: f32, duration: Duration, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration,
            easing,
            started_at: None,
        }
    }

    /// The offset this animation settles at
    pub fn end_value(&self) -> f32 {
        self.to
    }

    /// Sample the animated offset at `now`
    ///
    /// The first sample anchors the start time, so an animation created
    /// between frames begins on the next tick rather than mid-flight.
    pub fn sample(&mut self, now: Duration) -> f32 {
        let started_at = *self.started_at.get_or_insert(now);
        if self.duration.is_zero() {
            return self.to;
        }
        let elapsed = now.saturating_sub(started_at);
        if elapsed >= self.duration {
            return self.to;
        }
        let t = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        self.from + (self.to - self.from) * self.easing.apply(t)
    }

    /// Whether the animation has reached its end value at `now`
    ///
    /// Always false before the first sample.
    pub fn is_finished(&self, now: Duration) -> bool {
        match self.started_at {
            Some(started_at) => now.saturating_sub(started_at) >= self.duration,
            None => false,
        }
    }
}
