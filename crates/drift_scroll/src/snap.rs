//! Snap point seam.
//!
//! The engine itself knows nothing about item geometry. When motion settles
//! it asks an optional [`SnapProvider`] for the nearest legal resting offset
//! and animates there if one is returned.

use drift_core::Vec2;

pub trait SnapProvider: Send {
    /// Nearest legal resting offset for `offset`, or `None` to rest as-is.
    fn nearest_snap_offset(&self, offset: Vec2) -> Option<Vec2>;
}

/// Snaps the vertical offset to a uniform row grid (fixed-height lists).
#[derive(Debug, Clone, Copy)]
pub struct RowGridSnap {
    pub row_height: f32,
}

impl SnapProvider for RowGridSnap {
    fn nearest_snap_offset(&self, offset: Vec2) -> Option<Vec2> {
        if self.row_height <= f32::EPSILON {
            return None;
        }
        let snapped = (offset.y / self.row_height).round() * self.row_height;
        if (snapped - offset.y).abs() < 0.5 {
            None
        } else {
            Some(Vec2::new(offset.x, snapped))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snaps_to_nearest_row() {
        let snap = RowGridSnap { row_height: 80.0 };
        let target = snap.nearest_snap_offset(Vec2::new(0.0, -130.0));
        assert_eq!(target, Some(Vec2::new(0.0, -160.0)));
    }

    #[test]
    fn already_on_grid_returns_none() {
        let snap = RowGridSnap { row_height: 80.0 };
        assert_eq!(snap.nearest_snap_offset(Vec2::new(0.0, -240.0)), None);
    }
}
