//! Scroll gesture phase machine.
//!
//! Every interactive state the engine can be in is one variant here, and all
//! legal moves between them go through [`ScrollPhase::on_event`]. Illegal
//! moves return `None` and leave the phase untouched, so a stray event can
//! never wedge the engine in a half-state.

use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollPhase {
    /// Nothing in flight, nothing touching.
    #[default]
    Idle,
    /// Contact landed, direction not yet known.
    Down,
    /// Finger is dragging the content.
    Panning,
    /// Content is decelerating after a swipe.
    Flinging,
    /// Spring is pulling an overscrolled edge home.
    Bouncing,
    /// Motion ended, snap points may still adjust the offset.
    Settled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseEvent {
    /// A new contact landed, interrupting anything in flight.
    ContactDown,
    /// A pan delta was accepted.
    PanMoved,
    /// Release velocity cleared the swipe threshold.
    FlingStarted,
    /// An edge was crossed or released while overscrolled.
    BounceStarted,
    /// Contact lifted without enough velocity to fling.
    Released,
    /// An animator ran to rest.
    MotionEnded,
    /// Post-settle adjustments are done.
    Rested,
}

impl ScrollPhase {
    /// Next phase for `event`, or `None` when the move is not legal from
    /// the current phase.
    #[must_use]
    pub fn on_event(&self, event: PhaseEvent) -> Option<ScrollPhase> {
        use PhaseEvent::*;
        use ScrollPhase::*;

        let next = match (self, event) {
            (_, ContactDown) => Some(Down),
            (Down | Panning, PanMoved) => Some(Panning),
            (Down | Panning | Settled, FlingStarted) => Some(Flinging),
            (Down | Panning | Flinging, BounceStarted) => Some(Bouncing),
            (Down | Panning, Released) => Some(Settled),
            (Flinging | Bouncing, MotionEnded) => Some(Settled),
            (Settled, Rested) => Some(Idle),
            _ => None,
        };
        if let Some(next) = next {
            if next != *self {
                trace!(from = ?self, to = ?next, ?event, "scroll phase transition");
            }
        }
        next
    }

    /// Apply `event` in place when legal; reports whether anything changed.
    pub fn apply(&mut self, event: PhaseEvent) -> bool {
        match self.on_event(event) {
            Some(next) => {
                *self = next;
                true
            }
            None => false,
        }
    }

    /// True while the user's finger drives the offset.
    pub fn is_user_driven(&self) -> bool {
        matches!(self, Self::Down | Self::Panning)
    }

    /// True while an animator owns the offset.
    pub fn is_animating(&self) -> bool {
        matches!(self, Self::Flinging | Self::Bouncing)
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}
