//! Viewport state: committed offset, zoom, and the bounds derived from
//! content and viewport extents.

use drift_core::{Size, Vec2};

use crate::bounds::ContentOffsetBounds;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    offset: Vec2,
    zoom: f32,
    content: Size,
    viewport: Size,
    bounds: ContentOffsetBounds,
    overscroll: Vec2,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self::new(Size::default(), Size::default())
    }
}

impl ViewportState {
    pub fn new(content: Size, viewport: Size) -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
            content,
            viewport,
            bounds: ContentOffsetBounds::from_sizes(content, viewport),
            overscroll: Vec2::ZERO,
        }
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn content_size(&self) -> Size {
        self.content
    }

    pub fn viewport_size(&self) -> Size {
        self.viewport
    }

    pub fn bounds(&self) -> ContentOffsetBounds {
        self.bounds
    }

    pub fn overscroll(&self) -> Vec2 {
        self.overscroll
    }

    pub fn is_overscrolled(&self) -> bool {
        self.overscroll != Vec2::ZERO
    }

    /// Commit an offset as-is and refresh the overscroll readout. Callers
    /// clamp (hard or soft) before committing.
    pub fn set_offset(&mut self, offset: Vec2) {
        self.offset = offset;
        self.overscroll = self.bounds.overscroll(offset);
    }

    pub fn set_zoom(&mut self, zoom: f32, min: f32, max: f32) {
        self.zoom = zoom.clamp(min, max);
    }

    /// Content grew or shrank: recompute bounds. The offset is left where it
    /// is; the caller decides whether to re-clamp or spring back.
    pub fn set_content_size(&mut self, content: Size) {
        self.content = content;
        self.bounds = ContentOffsetBounds::from_sizes(content, self.viewport);
        self.overscroll = self.bounds.overscroll(self.offset);
    }

    pub fn set_viewport_size(&mut self, viewport: Size) {
        self.viewport = viewport;
        self.bounds = ContentOffsetBounds::from_sizes(self.content, viewport);
        self.overscroll = self.bounds.overscroll(self.offset);
    }

    /// Overscroll cap per axis as a fraction of the viewport extent.
    pub fn max_overscroll(&self, ratio: f32) -> Vec2 {
        Vec2::new(self.viewport.width * ratio, self.viewport.height * ratio)
    }
}
