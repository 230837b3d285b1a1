//! Friction fling
//!
//! Momentum animator for one axis: after a release, the offset keeps
//! moving at the final gesture velocity and decelerates at a constant
//! rate until it drops below a rest threshold. The caller watches for
//! bound crossings each tick and hands off to a bounce spring when one
//! occurs.

/// Constant-deceleration momentum for one axis
#[derive(Debug, Clone, Copy)]
pub struct FlingAnimator {
    offset: f32,
    velocity: f32,
    /// Deceleration magnitude, points/second^2
    deceleration: f32,
    /// Velocity below which the fling is considered finished
    rest_velocity: f32,
    running: bool,
}

impl FlingAnimator {
    pub fn new(deceleration: f32, rest_velocity: f32) -> Self {
        Self {
            offset: 0.0,
            velocity: 0.0,
            deceleration: deceleration.max(0.0),
            rest_velocity: rest_velocity.max(0.0),
            running: false,
        }
    }

    /// Begin a fling from `offset` with `velocity`. Returns whether the
    /// animator accepted the start; velocities already below the rest
    /// threshold are rejected.
    pub fn start_from(&mut self, offset: f32, velocity: f32) -> bool {
        if velocity.abs() <= self.rest_velocity {
            return false;
        }
        self.offset = offset;
        self.velocity = velocity;
        self.running = true;
        true
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.velocity = 0.0;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Advance by `dt` seconds; returns the new offset, or `None` once the
    /// fling has come to rest.
    pub fn tick(&mut self, dt: f32) -> Option<f32> {
        if !self.running {
            return None;
        }

        self.offset += self.velocity * dt;

        let decel = self.deceleration * dt;
        if self.velocity > 0.0 {
            self.velocity = (self.velocity - decel).max(0.0);
        } else {
            self.velocity = (self.velocity + decel).min(0.0);
        }

        if self.velocity.abs() < self.rest_velocity {
            self.running = false;
            self.velocity = 0.0;
            return None;
        }

        Some(self.offset)
    }
}
