//! Counter tweening for the detail panel.
//!
//! Each displayed count eases from zero to its value whenever the value
//! changes. The curve is an ease-out cubic over a fixed duration.

use std::time::Duration;

/// Default time for a counter to reach its value.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(600);

/// A numeric transition between two values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub from: f64,
    pub to: f64,
    pub duration: Duration,
}

impl Tween {
    /// Tween from zero to `to`.
    pub fn from_zero(to: f64) -> Self {
        Self {
            from: 0.0,
            to,
            duration: DEFAULT_DURATION,
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Value after `elapsed`. Clamped to `to` once the duration has passed.
    pub fn value_at(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() || elapsed >= self.duration {
            return self.to;
        }
        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        let eased = 1.0 - (1.0 - t).powi(3);
        self.from + (self.to - self.from) * eased
    }

    /// Value after `elapsed`, rounded for display.
    pub fn display_at(&self, elapsed: Duration) -> String {
        format!("{:.0}", self.value_at(elapsed))
    }

    /// `steps` evenly spaced samples, ending exactly on `to`.
    pub fn frames(&self, steps: u32) -> Vec<f64> {
        let steps = steps.max(1);
        (1..=steps)
            .map(|i| self.value_at(self.duration.mul_f64(i as f64 / steps as f64)))
            .collect()
    }
}
