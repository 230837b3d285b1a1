//! Damped spring physics
//!
//! One-dimensional spring driving a value toward a target. Used per axis
//! for elastic bounce-back when the viewport is released while
//! overscrolled, and for animated scroll-to. Springs are interruptible:
//! starting one from a moving value inherits the current velocity so the
//! motion stays continuous across frame boundaries.

use serde::{Deserialize, Serialize};

/// Spring tuning: stiffness, damping and mass
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

impl SpringConfig {
    pub const fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
        }
    }

    /// Bounce-back default: very stiff, slightly overdamped so the snap is
    /// fast with no visible rebound. Critical damping for stiffness 3000
    /// is 2*sqrt(3000) ~ 109.5.
    pub const fn bounce() -> Self {
        Self::new(3000.0, 110.0, 1.0)
    }

    /// Snappy spring for programmatic scroll-to animations
    pub const fn scroll_to() -> Self {
        Self::new(400.0, 30.0, 1.0)
    }

    /// Stiff spring, settles quickly with minimal wobble
    pub const fn stiff() -> Self {
        Self::new(800.0, 50.0, 1.0)
    }

    /// Gentle spring, more visible wobble
    pub const fn gentle() -> Self {
        Self::new(120.0, 14.0, 1.0)
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::bounce()
    }
}

/// Settling tolerances: motion is over when both displacement and velocity
/// are below these
const REST_DISPLACEMENT: f32 = 0.1;
const REST_VELOCITY: f32 = 0.5;

/// A one-dimensional damped spring
#[derive(Debug, Clone, Copy)]
pub struct Spring {
    config: SpringConfig,
    value: f32,
    velocity: f32,
    target: f32,
    settled: bool,
}

impl Spring {
    pub fn new(config: SpringConfig, value: f32) -> Self {
        Self {
            config,
            value,
            velocity: 0.0,
            target: value,
            settled: true,
        }
    }

    /// Create a spring already in motion, inheriting `velocity`
    pub fn with_velocity(config: SpringConfig, value: f32, velocity: f32) -> Self {
        Self {
            config,
            value,
            velocity,
            target: value,
            settled: false,
        }
    }

    pub fn set_target(&mut self, target: f32) {
        self.target = target;
        self.settled = false;
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// Advance the simulation by `dt` seconds.
    ///
    /// Integrates with RK4 so stiff bounce springs stay stable at uneven
    /// frame times. Large `dt` (dropped frames) is subdivided.
    pub fn step(&mut self, dt: f32) {
        if self.settled || dt <= 0.0 {
            return;
        }

        // Keep each integration step at or below 4ms for stability
        let steps = ((dt / 0.004).ceil() as usize).clamp(1, 64);
        let h = dt / steps as f32;

        for _ in 0..steps {
            let (dv1, dx1) = self.derive(self.value, self.velocity);
            let (dv2, dx2) = self.derive(
                self.value + dx1 * h * 0.5,
                self.velocity + dv1 * h * 0.5,
            );
            let (dv3, dx3) = self.derive(
                self.value + dx2 * h * 0.5,
                self.velocity + dv2 * h * 0.5,
            );
            let (dv4, dx4) = self.derive(self.value + dx3 * h, self.velocity + dv3 * h);

            self.value += (dx1 + 2.0 * dx2 + 2.0 * dx3 + dx4) * (h / 6.0);
            self.velocity += (dv1 + 2.0 * dv2 + 2.0 * dv3 + dv4) * (h / 6.0);
        }

        if (self.value - self.target).abs() < REST_DISPLACEMENT
            && self.velocity.abs() < REST_VELOCITY
        {
            self.value = self.target;
            self.velocity = 0.0;
            self.settled = true;
        }
    }

    /// Acceleration and velocity derivatives at a hypothetical state
    fn derive(&self, value: f32, velocity: f32) -> (f32, f32) {
        let displacement = value - self.target;
        let accel =
            (-self.config.stiffness * displacement - self.config.damping * velocity) / self.config.mass;
        (accel, velocity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_rest(spring: &mut Spring, max_seconds: f32) -> f32 {
        let dt = 1.0 / 120.0;
        let mut elapsed = 0.0;
        while !spring.is_settled() && elapsed < max_seconds {
            spring.step(dt);
            elapsed += dt;
        }
        elapsed
    }

    #[test]
    fn test_spring_settles_at_target() {
        let mut spring = Spring::new(SpringConfig::bounce(), 80.0);
        spring.set_target(0.0);

        let elapsed = run_to_rest(&mut spring, 5.0);
        assert!(spring.is_settled(), "spring did not settle");
        assert_eq!(spring.value(), 0.0);
        assert!(elapsed < 2.0, "bounce spring too slow: {elapsed}s");
    }

    #[test]
    fn test_spring_inherits_velocity() {
        // Released while overscrolled and still moving outward: the spring
        // should overshoot further before coming back
        let mut spring = Spring::with_velocity(SpringConfig::gentle(), 50.0, 400.0);
        spring.set_target(0.0);

        let mut peak = 50.0_f32;
        for _ in 0..30 {
            spring.step(1.0 / 120.0);
            peak = peak.max(spring.value());
        }
        assert!(peak > 50.0, "initial velocity was ignored");
    }

    #[test]
    fn test_spring_survives_dropped_frames() {
        let mut spring = Spring::new(SpringConfig::bounce(), 120.0);
        spring.set_target(0.0);

        // One giant 250ms step must not blow up the stiff spring
        spring.step(0.25);
        assert!(spring.value().is_finite());
        assert!(spring.value().abs() <= 120.0 + 1.0);

        run_to_rest(&mut spring, 5.0);
        assert!(spring.is_settled());
    }

    #[test]
    fn test_settled_spring_is_inert() {
        let mut spring = Spring::new(SpringConfig::default(), 10.0);
        assert!(spring.is_settled());
        spring.step(0.016);
        assert_eq!(spring.value(), 10.0);
    }
}
