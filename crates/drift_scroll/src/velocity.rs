//! Swipe velocity accumulation.
//!
//! Raw per-event velocities are noisy, so the engine records the last few
//! samples during a pan and blends them at release time, weighting recent
//! samples heavier. The blended result is clamped per axis before it decides
//! between fling, bounce, and settle.

use drift_core::Vec2;
use smallvec::SmallVec;

const DEFAULT_CAPACITY: usize = 4;

#[derive(Debug, Clone)]
pub struct VelocityAccumulator {
    samples: SmallVec<[Vec2; DEFAULT_CAPACITY]>,
    capacity: usize,
}

impl Default for VelocityAccumulator {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl VelocityAccumulator {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: SmallVec::new(),
            capacity: capacity.max(1),
        }
    }

    /// Record one velocity sample, evicting the oldest once at capacity.
    pub fn capture(&mut self, velocity: Vec2) {
        if self.samples.len() == self.capacity {
            self.samples.remove(0);
        }
        self.samples.push(velocity);
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Recency-weighted blend of the captured samples, clamped to
    /// `max_velocity` per axis. Zero when nothing was captured.
    pub fn final_velocity(&self, max_velocity: f32) -> Vec2 {
        if self.samples.is_empty() {
            return Vec2::ZERO;
        }
        let mut sum = Vec2::ZERO;
        let mut weight_sum = 0.0f32;
        for (i, sample) in self.samples.iter().enumerate() {
            let weight = (i + 1) as f32;
            sum = sum + *sample * weight;
            weight_sum += weight;
        }
        let blended = sum * (1.0 / weight_sum);
        Vec2::new(
            blended.x.clamp(-max_velocity, max_velocity),
            blended.y.clamp(-max_velocity, max_velocity),
        )
    }
}
