//! Fixed-duration eased animations
//!
//! Wheel scrolling animates the offset to its clamped destination over a
//! short fixed duration rather than with physics; [`TimedScroll`] covers
//! that and any other move-to-offset-in-N-ms case.

use drift_core::Vec2;

/// Easing function applied to normalized progress
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Easing {
    Linear,
    #[default]
    EaseOut,
    EaseOutCubic,
    EaseInOut,
}

impl Easing {
    /// Apply the easing to a progress value in `0.0..=1.0`
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

/// Animates a 2D offset from start to end over a fixed duration
#[derive(Debug, Clone, Copy)]
pub struct TimedScroll {
    from: Vec2,
    to: Vec2,
    duration: f32,
    elapsed: f32,
    easing: Easing,
    running: bool,
}

impl TimedScroll {
    pub fn new(from: Vec2, to: Vec2, duration_ms: u32, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration: (duration_ms as f32 / 1000.0).max(0.001),
            elapsed: 0.0,
            easing,
            running: true,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn target(&self) -> Vec2 {
        self.to
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Advance by `dt` seconds and return the interpolated offset; the
    /// final call lands exactly on the target and stops the animation.
    pub fn tick(&mut self, dt: f32) -> Option<Vec2> {
        if !self.running {
            return None;
        }

        self.elapsed += dt;
        if self.elapsed >= self.duration {
            self.running = false;
            return Some(self.to);
        }

        let t = self.easing.apply(self.elapsed / self.duration);
        Some(self.from + (self.to - self.from) * t)
    }
}
