//! Platform input event record
//!
//! The platform dispatch layer (out of scope for this workspace) translates
//! native touch/mouse/wheel input into [`InputEvent`] values and feeds them
//! to the scroll engine in arrival order. Velocities are in logical points
//! per second; locations are in the receiving container's local space.

use crate::geometry::{Point, Vec2};

/// Classified touch action, one per event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchAction {
    /// First contact of a gesture
    Down,
    /// Finger moved while in contact
    Panning,
    /// Contact released
    Up,
    /// Short press-and-release, no significant movement
    Tapped,
    /// Mouse wheel notch
    Wheel,
    /// Hover/cursor movement without contact
    Pointer,
}

/// Pinch/zoom manipulation data attached to multi-touch panning events
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Manipulation {
    /// Scale delta relative to the gesture start
    pub scale: f32,
}

/// Wheel data attached to `TouchAction::Wheel` events
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelInfo {
    /// Signed notch count; positive for wheel-up
    pub delta: f32,
    /// Cursor position at the time of the notch
    pub center: Point,
    /// Zoom scale, when the platform maps ctrl+wheel to zoom
    pub scale: Option<f32>,
}

/// One input event as delivered by the platform layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputEvent {
    pub action: TouchAction,
    pub location: Point,
    pub touches: u8,
    /// Movement since the previous event of this gesture
    pub delta: Vec2,
    /// Instantaneous velocity reported by the platform, points/second
    pub velocity: Vec2,
    pub manipulation: Option<Manipulation>,
    pub wheel: Option<WheelInfo>,
}

impl InputEvent {
    pub fn down(location: Point) -> Self {
        Self {
            action: TouchAction::Down,
            location,
            touches: 1,
            delta: Vec2::ZERO,
            velocity: Vec2::ZERO,
            manipulation: None,
            wheel: None,
        }
    }

    pub fn panning(location: Point, delta: Vec2, velocity: Vec2) -> Self {
        Self {
            action: TouchAction::Panning,
            location,
            touches: 1,
            delta,
            velocity,
            manipulation: None,
            wheel: None,
        }
    }

    pub fn up(location: Point) -> Self {
        Self {
            action: TouchAction::Up,
            location,
            touches: 0,
            delta: Vec2::ZERO,
            velocity: Vec2::ZERO,
            manipulation: None,
            wheel: None,
        }
    }

    pub fn tapped(location: Point) -> Self {
        Self {
            action: TouchAction::Tapped,
            location,
            touches: 1,
            delta: Vec2::ZERO,
            velocity: Vec2::ZERO,
            manipulation: None,
            wheel: None,
        }
    }

    pub fn wheel(center: Point, delta: f32) -> Self {
        Self {
            action: TouchAction::Wheel,
            location: center,
            touches: 0,
            delta: Vec2::ZERO,
            velocity: Vec2::ZERO,
            manipulation: None,
            wheel: Some(WheelInfo {
                delta,
                center,
                scale: None,
            }),
        }
    }

    pub fn with_touches(mut self, touches: u8) -> Self {
        self.touches = touches;
        self
    }

    pub fn with_manipulation(mut self, scale: f32) -> Self {
        self.manipulation = Some(Manipulation { scale });
        self
    }
}
