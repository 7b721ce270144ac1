// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the application. Constants are organized by category.
//!
//! # Categories
//!
//! - **Image Zoom**: Zoom factor bounds and steps for the image view
//! - **Document Zoom**: Zoom factor bounds and step for paginated content
//! - **Volume**: Audio/video playback volume settings
//! - **Transport**: Seek steps and playback rates
//! - **Pipeline**: Page limits, render scales and settle delays
//! - **Tracking**: Scroll throttling for page-visibility tracking

use std::time::Duration;

// ==========================================================================
// Image Zoom Defaults
// ==========================================================================

/// Default image zoom factor (1.0 = natural size).
pub const DEFAULT_IMAGE_ZOOM: f32 = 1.0;

/// Minimum image zoom factor.
pub const MIN_IMAGE_ZOOM: f32 = 0.25;

/// Maximum image zoom factor.
pub const MAX_IMAGE_ZOOM: f32 = 5.0;

/// Zoom step for the zoom in/out buttons and keyboard shortcuts.
pub const IMAGE_ZOOM_BUTTON_STEP: f32 = 0.25;

/// Zoom step for ctrl + mouse wheel.
pub const IMAGE_ZOOM_WHEEL_STEP: f32 = 0.2;

// ==========================================================================
// Document Zoom Defaults
// ==========================================================================

/// Default document zoom factor.
pub const DEFAULT_DOCUMENT_ZOOM: f32 = 1.0;

/// Minimum document zoom factor.
pub const MIN_DOCUMENT_ZOOM: f32 = 0.5;

/// Maximum document zoom factor.
pub const MAX_DOCUMENT_ZOOM: f32 = 3.0;

/// Document zoom step.
pub const DOCUMENT_ZOOM_STEP: f32 = 0.2;

// ==========================================================================
// Volume Defaults
// ==========================================================================

/// Default playback volume (0.0 to 1.0).
pub const DEFAULT_VOLUME: f32 = 1.0;

/// Minimum volume level.
pub const MIN_VOLUME: f32 = 0.0;

/// Maximum volume level.
pub const MAX_VOLUME: f32 = 1.0;

/// Volume adjustment step per key press.
pub const VOLUME_STEP: f32 = 0.1;

// ==========================================================================
// Transport Defaults
// ==========================================================================

/// Short relative skip in seconds (audio and video).
pub const SHORT_SKIP_SECS: f64 = 10.0;

/// Long relative skip in seconds (audio only).
pub const LONG_SKIP_SECS: f64 = 30.0;

/// Discrete playback rates offered by the rate selector.
pub const PLAYBACK_RATES: [f64; 6] = [0.5, 0.75, 1.0, 1.25, 1.5, 2.0];

/// Default playback rate.
pub const DEFAULT_PLAYBACK_RATE: f64 = 1.0;

// ==========================================================================
// Pipeline Defaults
// ==========================================================================

/// Maximum number of PDF pages rasterized for preview.
pub const PDF_MAX_PAGES: usize = 5;

/// Render scale used when rasterizing PDF pages.
pub const PDF_RENDER_SCALE: f32 = 1.5;

/// Maximum number of page sections rasterized by the direct tier.
pub const DIRECT_TIER_MAX_PAGES: usize = 10;

/// Rasterization scale used by the direct tier.
pub const DIRECT_TIER_SCALE: f32 = 3.0;

/// Maximum number of page sections rasterized by the isolated-frame tier.
pub const FRAME_TIER_MAX_PAGES: usize = 5;

/// Rasterization scale used by the isolated-frame tier.
pub const FRAME_TIER_SCALE: f32 = 2.0;

/// Fixed page width in pixels (US Letter at 96 DPI).
pub const PAGE_WIDTH_PX: u32 = 816;

/// Fixed page height in pixels (US Letter at 96 DPI).
pub const PAGE_HEIGHT_PX: u32 = 1056;

/// Upper bound for the font/image settle wait of the direct tier.
pub const RENDER_SETTLE_DELAY: Duration = Duration::from_millis(500);

/// Upper bound for the frame-load settle wait of the isolated-frame tier.
pub const FRAME_SETTLE_DELAY: Duration = Duration::from_millis(1000);

/// Poll interval while waiting for a surface to report it has settled.
pub const SETTLE_POLL_INTERVAL: Duration = Duration::from_millis(50);

// ==========================================================================
// Tracking Defaults
// ==========================================================================

/// Minimum interval between two page-visibility evaluations.
pub const SCROLL_THROTTLE: Duration = Duration::from_millis(50);

/// Weight of the distance-to-center penalty in the visibility score.
pub const CENTER_DISTANCE_WEIGHT: f32 = 0.1;

// ==========================================================================
// Loading Defaults
// ==========================================================================

/// Elapsed time after which the loading view shows a "still working" hint.
pub const LOADING_SLOW_HINT: Duration = Duration::from_secs(10);

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    // Image zoom validation
    assert!(MIN_IMAGE_ZOOM > 0.0);
    assert!(MIN_IMAGE_ZOOM < DEFAULT_IMAGE_ZOOM);
    assert!(MAX_IMAGE_ZOOM > DEFAULT_IMAGE_ZOOM);
    assert!(IMAGE_ZOOM_BUTTON_STEP > 0.0);
    assert!(IMAGE_ZOOM_WHEEL_STEP > 0.0);

    // Document zoom validation
    assert!(MIN_DOCUMENT_ZOOM > 0.0);
    assert!(MIN_DOCUMENT_ZOOM < DEFAULT_DOCUMENT_ZOOM);
    assert!(MAX_DOCUMENT_ZOOM > DEFAULT_DOCUMENT_ZOOM);
    assert!(DOCUMENT_ZOOM_STEP > 0.0);

    // Volume validation
    assert!(DEFAULT_VOLUME >= MIN_VOLUME);
    assert!(DEFAULT_VOLUME <= MAX_VOLUME);
    assert!(VOLUME_STEP > 0.0);

    // Pipeline validation
    assert!(PDF_MAX_PAGES > 0);
    assert!(DIRECT_TIER_MAX_PAGES >= FRAME_TIER_MAX_PAGES);
    assert!(DIRECT_TIER_SCALE > FRAME_TIER_SCALE);
    assert!(PAGE_WIDTH_PX > 0 && PAGE_HEIGHT_PX > 0);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_zoom_defaults_are_valid() {
        assert_eq!(MIN_IMAGE_ZOOM, 0.25);
        assert_eq!(MAX_IMAGE_ZOOM, 5.0);
        assert!(DEFAULT_IMAGE_ZOOM > MIN_IMAGE_ZOOM && DEFAULT_IMAGE_ZOOM < MAX_IMAGE_ZOOM);
    }

    #[test]
    fn document_zoom_defaults_are_valid() {
        assert_eq!(MIN_DOCUMENT_ZOOM, 0.5);
        assert_eq!(MAX_DOCUMENT_ZOOM, 3.0);
    }

    #[test]
    fn playback_rates_are_sorted_and_contain_default() {
        assert!(PLAYBACK_RATES.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(PLAYBACK_RATES.contains(&DEFAULT_PLAYBACK_RATE));
    }

    #[test]
    fn settle_delays_are_ordered() {
        assert!(FRAME_SETTLE_DELAY > RENDER_SETTLE_DELAY);
        assert!(SETTLE_POLL_INTERVAL < RENDER_SETTLE_DELAY);
    }
}
