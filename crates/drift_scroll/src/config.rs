//! Immutable scroll configuration.
//!
//! A [`ScrollConfig`] is a plain value: build one (or start from a preset),
//! hand it to the engine, and swap the whole thing to change behavior. The
//! engine never mutates it.

use drift_animation::SpringConfig;
use serde::{Deserialize, Serialize};

/// Which axes the scroll engine responds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScrollOrientation {
    #[default]
    Vertical,
    Horizontal,
    /// Free panning on both axes.
    Both,
}

impl ScrollOrientation {
    pub fn allows_horizontal(&self) -> bool {
        matches!(self, Self::Horizontal | Self::Both)
    }

    pub fn allows_vertical(&self) -> bool {
        matches!(self, Self::Vertical | Self::Both)
    }
}

/// Tuning knobs for the scroll engine.
///
/// All velocities and distances are in logical units unless the field name
/// says otherwise. `swipe_threshold` is multiplied by `pixel_scale` at
/// release time so flick detection feels the same across screen densities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    pub orientation: ScrollOrientation,
    /// Rubber-band past the edges and spring back. When false the offset is
    /// clamped hard and edge-bound gestures are not consumed.
    pub bounces: bool,
    /// Refuse to start panning when the gesture's dominant axis does not
    /// match `orientation`, leaving the event for nested scrollers.
    pub ignore_wrong_direction: bool,
    /// Invert gesture deltas and velocities (bottom-up chat lists).
    pub reverse_gestures: bool,
    /// Engine stops reacting to pan/fling input but still routes to children.
    pub scroll_locked: bool,
    /// Ignore pinch and wheel-zoom input.
    pub zoom_locked: bool,
    /// Consume every gesture that reaches the engine even when nothing
    /// scrolls, shielding whatever is layered underneath.
    pub block_gestures_below: bool,
    /// Allow panning to start from a gesture the header region claimed.
    pub can_scroll_using_header: bool,

    /// Device pixel ratio used to convert raw input deltas.
    pub pixel_scale: f32,
    /// Exponential smoothing factor applied to pan deltas.
    pub pan_smoothing: f32,
    /// Minimum |velocity| on the active axis before a pan engages.
    pub pan_velocity_threshold: f32,
    /// Release velocity (times `pixel_scale`) that turns a pan into a fling.
    pub swipe_threshold: f32,
    /// Ceiling for the accumulated release velocity, per axis.
    pub max_velocity: f32,
    /// Ceiling for the velocity fed into an edge bounce spring.
    pub max_bounce_velocity: f32,
    /// Multiplier on release velocity before fling/bounce hand-off.
    pub velocity_scale: f32,
    /// Multiplier on pan deltas, for scaled or nested surfaces.
    pub pan_distance_scale: f32,
    /// Flings slower than this settle immediately.
    pub min_fling_velocity: f32,
    /// Constant fling deceleration, units/s^2.
    pub deceleration: f32,
    /// Maximum overscroll as a fraction of the viewport extent.
    pub max_overscroll_ratio: f32,

    /// Logical distance one wheel notch scrolls.
    pub wheel_line_size: f32,
    /// Duration of the eased wheel scroll animation.
    pub wheel_scroll_ms: u32,

    pub min_zoom: f32,
    pub max_zoom: f32,

    pub bounce_spring: SpringConfig,
    pub scroll_to_spring: SpringConfig,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            orientation: ScrollOrientation::Vertical,
            bounces: true,
            ignore_wrong_direction: false,
            reverse_gestures: false,
            scroll_locked: false,
            zoom_locked: true,
            block_gestures_below: false,
            can_scroll_using_header: false,
            pixel_scale: 1.0,
            pan_smoothing: 0.85,
            pan_velocity_threshold: 20.0,
            swipe_threshold: 200.0,
            max_velocity: 3000.0,
            max_bounce_velocity: 800.0,
            velocity_scale: 1.0,
            pan_distance_scale: 1.0,
            min_fling_velocity: 30.0,
            deceleration: 1500.0,
            max_overscroll_ratio: 0.3,
            wheel_line_size: 150.0,
            wheel_scroll_ms: 200,
            min_zoom: 1.0,
            max_zoom: 1.0,
            bounce_spring: SpringConfig::bounce(),
            scroll_to_spring: SpringConfig::scroll_to(),
        }
    }
}

impl ScrollConfig {
    pub fn vertical() -> Self {
        Self::default()
    }

    pub fn horizontal() -> Self {
        Self {
            orientation: ScrollOrientation::Horizontal,
            ..Self::default()
        }
    }

    pub fn free_panning() -> Self {
        Self {
            orientation: ScrollOrientation::Both,
            ..Self::default()
        }
    }

    /// iOS-style hard-edged list: no rubber band, strict axis lock.
    pub fn strict_list() -> Self {
        Self {
            bounces: false,
            ignore_wrong_direction: true,
            ..Self::default()
        }
    }

    pub fn with_orientation(mut self, orientation: ScrollOrientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_bounces(mut self, bounces: bool) -> Self {
        self.bounces = bounces;
        self
    }

    pub fn with_pixel_scale(mut self, scale: f32) -> Self {
        self.pixel_scale = scale.max(0.1);
        self
    }
}
