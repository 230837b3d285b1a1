//! Scrollable offset bounds and overscroll clamping.
//!
//! Offsets follow the content-translation convention: scrolling down or
//! right makes the offset more negative, so the valid range on each axis is
//! `[-(content - viewport), 0]` and degenerates to `[0, 0]` when the content
//! fits.

use drift_core::{Size, Vec2};

/// Valid offset rectangle derived from content and viewport extents.
///
/// Invariant: `right >= left` and `bottom >= top` always hold, even when
/// content is smaller than the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContentOffsetBounds {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

/// Result of a soft clamp: the offset to commit plus how far past the bounds
/// it sits on each axis (signed, zero while inside).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SoftClamp {
    pub offset: Vec2,
    pub overscroll: Vec2,
}

impl ContentOffsetBounds {
    pub fn from_sizes(content: Size, viewport: Size) -> Self {
        Self {
            left: -(content.width - viewport.width).max(0.0),
            top: -(content.height - viewport.height).max(0.0),
            right: 0.0,
            bottom: 0.0,
        }
    }

    /// Snap the proposed offset inside the bounds.
    pub fn clamp_hard(&self, proposed: Vec2) -> Vec2 {
        Vec2::new(
            proposed.x.clamp(self.left, self.right),
            proposed.y.clamp(self.top, self.bottom),
        )
    }

    /// Signed distance past the bounds per axis; zero while inside.
    pub fn overscroll(&self, offset: Vec2) -> Vec2 {
        Vec2::new(
            axis_overscroll(offset.x, self.left, self.right),
            axis_overscroll(offset.y, self.top, self.bottom),
        )
    }

    pub fn contains(&self, offset: Vec2) -> bool {
        self.overscroll(offset) == Vec2::ZERO
    }

    /// Let the offset run past the bounds up to `max_overscroll` per axis,
    /// reporting how far past it ended up.
    pub fn clamp_soft(&self, proposed: Vec2, max_overscroll: Vec2) -> SoftClamp {
        let over = self.overscroll(proposed);
        let capped = Vec2::new(
            over.x.clamp(-max_overscroll.x, max_overscroll.x),
            over.y.clamp(-max_overscroll.y, max_overscroll.y),
        );
        let hard = self.clamp_hard(proposed);
        SoftClamp {
            offset: hard + capped,
            overscroll: capped,
        }
    }

    /// Nearest in-bounds offset to spring back to from `offset`.
    pub fn nearest_edge(&self, offset: Vec2) -> Vec2 {
        self.clamp_hard(offset)
    }
}

fn axis_overscroll(value: f32, min: f32, max: f32) -> f32 {
    if value < min {
        value - min
    } else if value > max {
        value - max
    } else {
        0.0
    }
}

/// Rubber-band resistance for a pan delta applied while overscrolled.
///
/// Full deltas pass near the edge; as the stretch approaches the cap the
/// factor falls from 0.55 toward 0.10, so the surface gets progressively
/// harder to drag.
pub fn rubber_resistance(overscroll_abs: f32, max_overscroll: f32) -> f32 {
    if max_overscroll <= f32::EPSILON {
        return 0.0;
    }
    let stretch = (overscroll_abs / max_overscroll).clamp(0.0, 1.0);
    0.55 - 0.45 * stretch
}
