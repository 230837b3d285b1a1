//! Per-gesture bookkeeping.
//!
//! One [`GestureSession`] lives for the duration of a contact: it anchors
//! the pan to the offset at touch-down, carries the smoothed delta between
//! events, and remembers routing facts (a child claimed the pan, the header
//! locked itself) that outlive a single event.

use drift_core::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GestureSession {
    /// Offset at the moment the gesture anchored.
    pub start_offset: Vec2,
    /// Accumulated candidate offset, before clamping.
    pub pan_offset: Vec2,
    /// Smoothed delta carried between pan events.
    pub last_delta: Vec2,
    /// A Down event has been seen for this contact.
    pub had_down: bool,
    /// Finger currently on the surface.
    pub in_contact: bool,
    /// The pan anchor is valid; cleared when the engine loses the gesture.
    pub focused: bool,
    /// Gesture rejected for traveling across the scroll orientation.
    pub wrong_direction: bool,
    /// A child consumed the pan, so Up must route to it as well.
    pub child_was_panning: bool,
    /// A child consumed the tap for this contact.
    pub child_was_tapped: bool,
    /// The header region claimed this gesture.
    pub header_locked: bool,
    /// Touch count from the previous event, for pinch hand-off.
    pub last_touches: u8,
}

impl GestureSession {
    /// Re-anchor the session at `offset` and drop all per-gesture state.
    ///
    /// Idempotent: resetting twice at the same offset is a no-op the second
    /// time.
    pub fn reset(&mut self, offset: Vec2) {
        *self = Self {
            start_offset: offset,
            pan_offset: offset,
            focused: true,
            had_down: self.had_down,
            in_contact: self.in_contact,
            ..Self::default()
        };
    }
}
