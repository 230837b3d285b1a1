//! Animation scheduler
//!
//! Owns active springs and steps them once per frame. The scroll engine
//! holds `SpringId`s for its bounce/scroll-to springs and reads values
//! back during its own tick.

use crate::spring::Spring;
use slotmap::{new_key_type, SlotMap};
use tracing::trace;

new_key_type! {
    pub struct SpringId;
}

/// Ticks all active springs each frame
pub struct AnimationScheduler {
    springs: SlotMap<SpringId, Spring>,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            springs: SlotMap::with_key(),
        }
    }

    pub fn add_spring(&mut self, spring: Spring) -> SpringId {
        let id = self.springs.insert(spring);
        trace!(active = self.springs.len(), "spring added");
        id
    }

    pub fn get_spring(&self, id: SpringId) -> Option<&Spring> {
        self.springs.get(id)
    }

    pub fn get_spring_mut(&mut self, id: SpringId) -> Option<&mut Spring> {
        self.springs.get_mut(id)
    }

    pub fn remove_spring(&mut self, id: SpringId) -> Option<Spring> {
        let removed = self.springs.remove(id);
        if removed.is_some() {
            trace!(active = self.springs.len(), "spring removed");
        }
        removed
    }

    /// Step every spring by `dt` seconds
    pub fn tick(&mut self, dt: f32) {
        for (_, spring) in self.springs.iter_mut() {
            spring.step(dt);
        }
    }

    pub fn has_active_animations(&self) -> bool {
        self.springs.iter().any(|(_, s)| !s.is_settled())
    }

    pub fn spring_count(&self) -> usize {
        self.springs.len()
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}
