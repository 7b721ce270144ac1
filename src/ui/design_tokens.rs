// SPDX-License-Identifier: MPL-2.0
#![doc = r#"
# Design Tokens

Visual constants shared by the dialogs, following the W3C Design Tokens
naming.

## Organization

- **Palette**: Base colors
- **Opacity**: Standardized opacity levels
- **Spacing**: Spacing scale (8px grid)
- **Sizing**: Component sizes (modal, swatches, page blocks)
- **Typography**: Font size scale
- **Radius**: Border radii
- **Shadow**: Shadow definitions

## Example

```
use iced_preview::ui::design_tokens::{opacity, palette, spacing};
use iced::Color;

let backdrop = Color {
    a: opacity::BACKDROP,
    ..palette::BLACK
};
let padding = spacing::MD;
# let _ = (backdrop, padding);
```
"#]

use iced::Color;

// ============================================================================
// Color Palette
// ============================================================================

pub mod palette {
    use super::Color;

    pub const BLACK: Color = Color::BLACK;
    pub const WHITE: Color = Color::WHITE;
    pub const GRAY_900: Color = Color::from_rgb(0.1, 0.1, 0.1);
    pub const GRAY_700: Color = Color::from_rgb(0.3, 0.3, 0.3);
    pub const GRAY_400: Color = Color::from_rgb(0.4, 0.4, 0.4);
    pub const GRAY_200: Color = Color::from_rgb(0.75, 0.75, 0.75);
    pub const GRAY_100: Color = Color::from_rgb(0.85, 0.85, 0.85);

    pub const PRIMARY_400: Color = Color::from_rgb(0.4, 0.7, 1.0);
    pub const PRIMARY_500: Color = Color::from_rgb(0.3, 0.6, 0.9);
    pub const PRIMARY_600: Color = Color::from_rgb(0.2, 0.5, 0.8);

    pub const ERROR_500: Color = Color::from_rgb(0.898, 0.224, 0.208);
    pub const WARNING_500: Color = Color::from_rgb(0.945, 0.651, 0.125);
    pub const INFO_500: Color = Color::from_rgb(0.392, 0.588, 1.0);
}

// ============================================================================
// Opacity Scale
// ============================================================================

pub mod opacity {
    pub const TRANSPARENT: f32 = 0.0;
    pub const OVERLAY_SUBTLE: f32 = 0.2;
    pub const OVERLAY_MEDIUM: f32 = 0.5;
    /// Dimmed area behind a modal.
    pub const BACKDROP: f32 = 0.6;
    pub const OPAQUE: f32 = 1.0;
}

// ============================================================================
// Spacing Scale (8px baseline grid)
// ============================================================================

pub mod spacing {
    pub const XXS: f32 = 4.0;
    pub const XS: f32 = 8.0;
    pub const SM: f32 = 12.0;
    pub const MD: f32 = 16.0;
    pub const LG: f32 = 24.0;
    pub const XL: f32 = 32.0;
}

// ============================================================================
// Sizing Scale
// ============================================================================

pub mod sizing {
    pub const ICON_XL: f32 = 48.0;

    pub const BUTTON_HEIGHT: f32 = 36.0;

    /// Color swatch in the cursor effects dialog.
    pub const SWATCH: f32 = 24.0;
    /// Preset palette strip width.
    pub const PRESET_STRIP: f32 = 112.0;

    pub const SETTINGS_DIALOG_WIDTH: f32 = 480.0;
    pub const PREVIEW_MODAL_WIDTH: f32 = 900.0;
    pub const PREVIEW_MODAL_HEIGHT: f32 = 640.0;

    /// Width of a document page at 100% zoom.
    pub const PAGE_DISPLAY_WIDTH: f32 = 640.0;
    /// Minimum height of an HTML page block at 100% zoom.
    pub const PAGE_MIN_HEIGHT: f32 = 828.0;
    pub const PAGE_PADDING: f32 = 40.0;
    pub const PAGE_GAP: f32 = 16.0;

    pub const VOLUME_SLIDER_WIDTH: f32 = 100.0;
}

// ============================================================================
// Typography Scale
// ============================================================================

pub mod typography {
    /// Dialog titles.
    pub const TITLE_MD: f32 = 20.0;

    /// Section headers.
    pub const TITLE_SM: f32 = 16.0;

    pub const BODY: f32 = 14.0;

    /// Status notes, hints, timestamps.
    pub const CAPTION: f32 = 12.0;

    /// Text inside document pages at 100% zoom.
    pub const DOCUMENT_BODY: f32 = 14.0;
    /// Line height multiplier used when laying out document text.
    pub const DOCUMENT_LINE_HEIGHT: f32 = 1.4;
}

// ============================================================================
// Border Radius Scale
// ============================================================================

pub mod radius {
    pub const SM: f32 = 4.0;
    pub const MD: f32 = 8.0;
    pub const LG: f32 = 12.0;
    pub const FULL: f32 = 9999.0;
}

// ============================================================================
// Shadow Definitions
// ============================================================================

pub mod shadow {
    use super::palette;
    use iced::{Shadow, Vector};

    pub const NONE: Shadow = Shadow {
        color: palette::BLACK,
        offset: Vector::ZERO,
        blur_radius: 0.0,
    };

    pub const SM: Shadow = Shadow {
        color: palette::BLACK,
        offset: Vector { x: 0.0, y: 2.0 },
        blur_radius: 4.0,
    };

    pub const LG: Shadow = Shadow {
        color: palette::BLACK,
        offset: Vector { x: 0.0, y: 8.0 },
        blur_radius: 16.0,
    };
}

// ============================================================================
// Compile-time Validation
// ============================================================================

const _: () = {
    assert!(spacing::XS > 0.0);
    assert!(spacing::SM > spacing::XS);
    assert!(spacing::MD > spacing::SM);
    assert!(spacing::LG > spacing::MD);

    assert!(opacity::TRANSPARENT == 0.0);
    assert!(opacity::OPAQUE == 1.0);
    assert!(opacity::BACKDROP > 0.0 && opacity::BACKDROP < 1.0);

    assert!(sizing::PAGE_MIN_HEIGHT > sizing::PAGE_PADDING * 2.0);
    assert!(sizing::PREVIEW_MODAL_WIDTH > sizing::PAGE_DISPLAY_WIDTH);

    assert!(typography::TITLE_MD > typography::TITLE_SM);
    assert!(typography::TITLE_SM > typography::BODY);
    assert!(typography::BODY > typography::CAPTION);
    assert!(typography::DOCUMENT_LINE_HEIGHT >= 1.0);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spacing_scale_is_consistent() {
        assert_eq!(spacing::MD, spacing::XS * 2.0);
        assert_eq!(spacing::LG, spacing::MD * 1.5);
    }

    #[test]
    fn page_aspect_matches_letter_paper() {
        let ratio = sizing::PAGE_MIN_HEIGHT / sizing::PAGE_DISPLAY_WIDTH;
        assert!((ratio - 11.0 / 8.5).abs() < 0.01);
    }
}
