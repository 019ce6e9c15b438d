//! Horizontal velocity tracking over a sliding sample window

use std::collections::VecDeque;
use std::time::Duration;

/// Samples older than this relative to the newest one are discarded
const SAMPLE_WINDOW: Duration = Duration::from_millis(100);

/// Upper bound on retained samples, matching a ~120 Hz event stream
/// within the window
const MAX_SAMPLES: usize = 16;

/// Tracks recent horizontal pointer positions and estimates release speed
#[derive(Debug, Default)]
pub struct VelocityTracker {
    samples: VecDeque<(Duration, f32)>,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pointer sample; drops samples outside the window
    pub fn add_movement(&mut self, time: Duration, x: f32) {
        if !x.is_finite() {
            return;
        }
        self.samples.push_back((time, x));
        while self.samples.len() > MAX_SAMPLES {
            self.samples.pop_front();
        }
        let horizon = time.saturating_sub(SAMPLE_WINDOW);
        while let Some(&(t, _)) = self.samples.front() {
            if t < horizon {
                self.samples.pop_front();
            } else {
                break;
            }
        }
    }

    /// Forget all samples (called at the start of each gesture session)
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Estimated horizontal velocity in pixels per second
    ///
    /// Returns 0 when fewer than two samples fall within the window, so a
    /// long pause before release never reads as a fling.
    pub fn x_velocity(&self) -> f32 {
        let (Some(&(t0, x0)), Some(&(t1, x1))) = (self.samples.front(), self.samples.back())
        else {
            return 0.0;
        };
        if self.samples.len() < 2 {
            return 0.0;
        }
        let dt = t1.saturating_sub(t0).as_secs_f32();
        if dt <= f32::EPSILON {
            return 0.0;
        }
        (x1 - x0) / dt
    }
}
