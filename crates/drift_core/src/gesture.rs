//! Gesture dispatch contract
//!
//! Every scrollable child, and every virtualization plane, implements
//! [`GestureListener`]. The scroll engine offers events to listeners in
//! z-order; the first listener that returns [`GestureOutcome::Consumed`]
//! owns the event and no later listener sees it.

use crate::geometry::{Point, Rect, Vec2};
use crate::input::InputEvent;

/// Result of offering an event to a listener
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    /// The listener consumed the event; routing stops
    Consumed,
    /// The listener declined; continue to the next candidate
    Pass,
}

impl GestureOutcome {
    pub fn is_consumed(&self) -> bool {
        matches!(self, GestureOutcome::Consumed)
    }
}

/// Routing context passed along with each dispatched event
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RoutingInfo {
    /// Offset translating event coordinates into the child's local space
    pub child_offset: Vec2,
    /// Set when an earlier sibling in this dispatch already consumed the
    /// event; listeners may still observe Ups for cleanup but must not
    /// claim them
    pub already_consumed: bool,
}

impl RoutingInfo {
    pub fn with_offset(child_offset: Vec2) -> Self {
        Self {
            child_offset,
            already_consumed: false,
        }
    }
}

/// Dispatch interface for scrollable children and virtualization planes
pub trait GestureListener {
    /// The listener's hit-test bounds in the parent's coordinate space
    fn hit_bounds(&self) -> Rect;

    /// Whether this listener wants a chance at an event landing at `point`.
    /// The default is a plain bounds test; containers override this to add
    /// policy (e.g. a header locking gestures to itself).
    fn is_gesture_for(&self, _event: &InputEvent, point: Point) -> bool {
        self.hit_bounds().contains(point)
    }

    /// Offer the event. Returns whether it was consumed.
    fn process_gestures(&mut self, event: &InputEvent, routing: &RoutingInfo) -> GestureOutcome;
}
