//! Deferred offset application.
//!
//! Gesture handlers never move the viewport directly. They stage the target
//! offset here and the frame loop applies it exactly once per frame, so a
//! burst of pan events between two frames collapses into a single commit.
//! Offsets overwrite (latest wins); velocities accumulate so none of the
//! burst's momentum is lost.

use drift_core::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DeferredOffset {
    pending_offset: Option<Vec2>,
    pending_velocity: Vec2,
}

impl DeferredOffset {
    /// Stage an offset for the next frame. Replaces any staged offset and
    /// adds `velocity` onto the staged velocity.
    pub fn stage(&mut self, offset: Vec2, velocity: Vec2) {
        self.pending_offset = Some(offset);
        self.pending_velocity = self.pending_velocity + velocity;
    }

    /// Drain the staged offset and velocity, leaving the buffer empty.
    pub fn take(&mut self) -> Option<(Vec2, Vec2)> {
        let offset = self.pending_offset.take()?;
        let velocity = std::mem::take(&mut self.pending_velocity);
        Some((offset, velocity))
    }

    pub fn is_pending(&self) -> bool {
        self.pending_offset.is_some()
    }

    pub fn clear(&mut self) {
        self.pending_offset = None;
        self.pending_velocity = Vec2::ZERO;
    }
}
