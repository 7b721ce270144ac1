// SPDX-License-Identifier: MPL-2.0
//! Zoom factors and pan offset for previewed content.

use crate::config::{
    DEFAULT_DOCUMENT_ZOOM, DEFAULT_IMAGE_ZOOM, DOCUMENT_ZOOM_STEP, IMAGE_ZOOM_BUTTON_STEP,
    IMAGE_ZOOM_WHEEL_STEP, MAX_DOCUMENT_ZOOM, MAX_IMAGE_ZOOM, MIN_DOCUMENT_ZOOM, MIN_IMAGE_ZOOM,
};

/// Rounds away float drift accumulated by repeated steps.
fn round_factor(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

// =============================================================================
// ImageZoom
// =============================================================================

/// Image zoom factor, guaranteed to be within valid range (0.25–5.0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageZoom(f32);

impl ImageZoom {
    /// Creates a new zoom factor, clamping the value to the valid range.
    #[must_use]
    pub fn new(factor: f32) -> Self {
        Self(round_factor(factor).clamp(MIN_IMAGE_ZOOM, MAX_IMAGE_ZOOM))
    }

    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    #[must_use]
    pub fn is_min(self) -> bool {
        self.0 <= MIN_IMAGE_ZOOM
    }

    #[must_use]
    pub fn is_max(self) -> bool {
        self.0 >= MAX_IMAGE_ZOOM
    }

    /// Button / keyboard zoom in.
    #[must_use]
    pub fn zoom_in(self) -> Self {
        Self::new(self.0 + IMAGE_ZOOM_BUTTON_STEP)
    }

    /// Button / keyboard zoom out.
    #[must_use]
    pub fn zoom_out(self) -> Self {
        Self::new(self.0 - IMAGE_ZOOM_BUTTON_STEP)
    }

    /// Ctrl + wheel zoom; positive `delta` zooms in.
    #[must_use]
    pub fn wheel(self, delta: f32) -> Self {
        if delta > 0.0 {
            Self::new(self.0 + IMAGE_ZOOM_WHEEL_STEP)
        } else if delta < 0.0 {
            Self::new(self.0 - IMAGE_ZOOM_WHEEL_STEP)
        } else {
            self
        }
    }

    /// Panning is only meaningful once the image overflows its box.
    #[must_use]
    pub fn allows_pan(self) -> bool {
        self.0 > 1.0
    }

    /// Zoom as a whole percentage for display.
    #[must_use]
    pub fn percent(self) -> u32 {
        (self.0 * 100.0).round() as u32
    }
}

impl Default for ImageZoom {
    fn default() -> Self {
        Self(DEFAULT_IMAGE_ZOOM)
    }
}

// =============================================================================
// DocumentZoom
// =============================================================================

/// Uniform scale of the page block, guaranteed to be within 0.5–3.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DocumentZoom(f32);

impl DocumentZoom {
    #[must_use]
    pub fn new(factor: f32) -> Self {
        Self(round_factor(factor).clamp(MIN_DOCUMENT_ZOOM, MAX_DOCUMENT_ZOOM))
    }

    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    #[must_use]
    pub fn is_min(self) -> bool {
        self.0 <= MIN_DOCUMENT_ZOOM
    }

    #[must_use]
    pub fn is_max(self) -> bool {
        self.0 >= MAX_DOCUMENT_ZOOM
    }

    #[must_use]
    pub fn zoom_in(self) -> Self {
        Self::new(self.0 + DOCUMENT_ZOOM_STEP)
    }

    #[must_use]
    pub fn zoom_out(self) -> Self {
        Self::new(self.0 - DOCUMENT_ZOOM_STEP)
    }

    #[must_use]
    pub fn percent(self) -> u32 {
        (self.0 * 100.0).round() as u32
    }
}

impl Default for DocumentZoom {
    fn default() -> Self {
        Self(DEFAULT_DOCUMENT_ZOOM)
    }
}

// =============================================================================
// Pan
// =============================================================================

/// Translation applied to the zoomed image, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PanOffset {
    pub x: f32,
    pub y: f32,
}

impl PanOffset {
    pub const ORIGIN: PanOffset = PanOffset { x: 0.0, y: 0.0 };

    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Grab-and-drag state for panning a zoomed image.
///
/// While dragging, the offset is the persisted offset plus the pointer delta
/// since the drag started.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PanState {
    offset: PanOffset,
    drag_origin: Option<(PanOffset, PanOffset)>,
}

impl PanState {
    #[must_use]
    pub fn offset(&self) -> PanOffset {
        self.offset
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag_origin.is_some()
    }

    /// Starts a drag at `pointer`; ignored unless `zoom` allows panning.
    pub fn start(&mut self, pointer: PanOffset, zoom: ImageZoom) {
        if zoom.allows_pan() {
            self.drag_origin = Some((pointer, self.offset));
        }
    }

    /// Updates the offset for the current pointer position.
    pub fn drag_to(&mut self, pointer: PanOffset) {
        if let Some((start_pointer, start_offset)) = self.drag_origin {
            self.offset = PanOffset {
                x: start_offset.x + (pointer.x - start_pointer.x),
                y: start_offset.y + (pointer.y - start_pointer.y),
            };
        }
    }

    /// Ends the drag, keeping the reached offset.
    pub fn stop(&mut self) {
        self.drag_origin = None;
    }

    /// Drops the offset once the zoom no longer allows panning.
    pub fn sync_with_zoom(&mut self, zoom: ImageZoom) {
        if !zoom.allows_pan() {
            self.reset();
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
