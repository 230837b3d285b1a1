//! Virtualization plane gesture routing.
//!
//! A virtualized container paints from up to three planes stacked in a fixed
//! z-order: Forward on top, then Current, then Backward. Gesture routing
//! walks the same order with one loop; a plane that is still being prepared
//! is skipped rather than offered stale content, and the first plane to
//! consume wins.

use drift_core::{GestureListener, GestureOutcome, InputEvent, Rect, RoutingInfo};
use tracing::trace;

/// Z-order slot of a plane. `Forward` is topmost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaneRole {
    Forward,
    Current,
    Backward,
}

impl PlaneRole {
    /// All roles, topmost first. Routing iterates this order.
    pub const Z_ORDER: [PlaneRole; 3] = [PlaneRole::Forward, PlaneRole::Current, PlaneRole::Backward];

    fn slot(self) -> usize {
        match self {
            PlaneRole::Forward => 0,
            PlaneRole::Current => 1,
            PlaneRole::Backward => 2,
        }
    }
}

/// One plane: hit bounds in container space, a readiness flag flipped by the
/// painter, and the listener backing its content.
pub struct Plane {
    pub role: PlaneRole,
    pub bounds: Rect,
    pub ready: bool,
    pub listener: Box<dyn GestureListener + Send>,
}

impl Plane {
    pub fn new(role: PlaneRole, bounds: Rect, listener: Box<dyn GestureListener + Send>) -> Self {
        Self {
            role,
            bounds,
            ready: true,
            listener,
        }
    }
}

/// Fixed-size plane set. Slot order is the routing order, so there is no
/// per-event sort or priority bookkeeping.
#[derive(Default)]
pub struct PlaneSet {
    slots: [Option<Plane>; 3],
}

impl PlaneSet {
    /// Install or replace the plane for its role.
    pub fn set_plane(&mut self, plane: Plane) {
        let slot = plane.role.slot();
        self.slots[slot] = Some(plane);
    }

    pub fn clear_plane(&mut self, role: PlaneRole) -> Option<Plane> {
        self.slots[role.slot()].take()
    }

    pub fn clear_all(&mut self) {
        self.slots = [None, None, None];
    }

    pub fn plane(&self, role: PlaneRole) -> Option<&Plane> {
        self.slots[role.slot()].as_ref()
    }

    pub fn plane_mut(&mut self, role: PlaneRole) -> Option<&mut Plane> {
        self.slots[role.slot()].as_mut()
    }

    pub fn set_ready(&mut self, role: PlaneRole, ready: bool) {
        if let Some(plane) = self.plane_mut(role) {
            plane.ready = ready;
        }
    }

    /// Any plane installed at all. The engine routes through planes instead
    /// of flat children while this holds.
    pub fn is_active(&self) -> bool {
        self.slots.iter().any(Option::is_some)
    }

    /// Offer `event` to the planes topmost-first. Planes that are not ready
    /// or miss the hit test are skipped; the first consumer ends the walk.
    pub fn route(&mut self, event: &InputEvent, routing: &RoutingInfo) -> GestureOutcome {
        for role in PlaneRole::Z_ORDER {
            let Some(plane) = self.slots[role.slot()].as_mut() else {
                continue;
            };
            if !plane.ready {
                trace!(?role, "skipping plane still being prepared");
                continue;
            }
            if !plane.bounds.contains(event.location)
                || !plane.listener.is_gesture_for(event, event.location)
            {
                continue;
            }
            if plane.listener.process_gestures(event, routing).is_consumed() {
                trace!(?role, action = ?event.action, "plane consumed gesture");
                return GestureOutcome::Consumed;
            }
        }
        GestureOutcome::Pass
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drift_core::{Point, TouchAction};

    use std::sync::{Arc, Mutex};

    type SeenLog = Arc<Mutex<Vec<&'static str>>>;

    struct CountingPlane {
        bounds: Rect,
        consume: bool,
        seen: SeenLog,
        name: &'static str,
    }

    impl GestureListener for CountingPlane {
        fn hit_bounds(&self) -> Rect {
            self.bounds
        }

        fn process_gestures(&mut self, _: &InputEvent, _: &RoutingInfo) -> GestureOutcome {
            self.seen.lock().unwrap().push(self.name);
            if self.consume {
                GestureOutcome::Consumed
            } else {
                GestureOutcome::Pass
            }
        }
    }

    fn plane(role: PlaneRole, consume: bool, seen: &SeenLog, name: &'static str) -> Plane {
        Plane::new(
            role,
            Rect::new(0.0, 0.0, 300.0, 300.0),
            Box::new(CountingPlane {
                bounds: Rect::new(0.0, 0.0, 300.0, 300.0),
                consume,
                seen: seen.clone(),
                name,
            }),
        )
    }

    #[test]
    fn forward_plane_wins_over_current() {
        let seen: SeenLog = Arc::default();
        let mut set = PlaneSet::default();
        set.set_plane(plane(PlaneRole::Current, true, &seen, "current"));
        set.set_plane(plane(PlaneRole::Forward, true, &seen, "forward"));

        let event = InputEvent::down(Point::new(10.0, 10.0));
        assert_eq!(event.action, TouchAction::Down);
        let outcome = set.route(&event, &RoutingInfo::default());
        assert!(outcome.is_consumed());
        assert_eq!(*seen.lock().unwrap(), vec!["forward"]);
    }

    #[test]
    fn unready_plane_is_skipped() {
        let seen: SeenLog = Arc::default();
        let mut set = PlaneSet::default();
        set.set_plane(plane(PlaneRole::Forward, true, &seen, "forward"));
        set.set_plane(plane(PlaneRole::Current, true, &seen, "current"));
        set.set_ready(PlaneRole::Forward, false);

        let event = InputEvent::down(Point::new(10.0, 10.0));
        assert!(set.route(&event, &RoutingInfo::default()).is_consumed());
        assert_eq!(*seen.lock().unwrap(), vec!["current"]);
    }

    #[test]
    fn all_planes_pass_falls_through() {
        let seen: SeenLog = Arc::default();
        let mut set = PlaneSet::default();
        set.set_plane(plane(PlaneRole::Forward, false, &seen, "forward"));
        set.set_plane(plane(PlaneRole::Backward, false, &seen, "backward"));

        let event = InputEvent::down(Point::new(10.0, 10.0));
        assert_eq!(set.route(&event, &RoutingInfo::default()), GestureOutcome::Pass);
        assert_eq!(*seen.lock().unwrap(), vec!["forward", "backward"]);
    }

    #[test]
    fn set_plane_lands_in_its_role_slot() {
        let mut set = PlaneSet::default();
        set.set_plane(plane(PlaneRole::Current, true, &Arc::default(), "current"));
        assert!(set.plane(PlaneRole::Current).is_some());
        assert!(set.plane(PlaneRole::Forward).is_none());
        assert!(set.plane(PlaneRole::Backward).is_none());
    }

    #[test]
    fn empty_set_is_inactive() {
        let mut set = PlaneSet::default();
        assert!(!set.is_active());
        set.set_plane(plane(PlaneRole::Backward, false, &Arc::default(), "backward"));
        assert!(set.is_active());
        set.clear_plane(PlaneRole::Backward);
        assert!(!set.is_active());
    }
}
