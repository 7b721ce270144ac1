// SPDX-License-Identifier: MPL-2.0
//! Cursor-trail effect configuration.
//!
//! All operations are pure: they return the complete new value so the owner
//! of an [`EffectConfiguration`] can replace the field wholesale.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// EffectKind
// =============================================================================

/// A decorative effect drawn along the cursor path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EffectKind {
    /// Every effect at once. Exclusive with the other tags.
    All,
    Sparkles,
    Trail,
    Bubbles,
    Snowflakes,
    Hearts,
    Stars,
    Confetti,
}

impl EffectKind {
    /// Every kind, in display order.
    pub const ALL: [EffectKind; 8] = [
        EffectKind::All,
        EffectKind::Sparkles,
        EffectKind::Trail,
        EffectKind::Bubbles,
        EffectKind::Snowflakes,
        EffectKind::Hearts,
        EffectKind::Stars,
        EffectKind::Confetti,
    ];

    /// Returns the i18n key of the effect label.
    #[must_use]
    pub fn i18n_key(self) -> &'static str {
        match self {
            EffectKind::All => "cursor-effect-all",
            EffectKind::Sparkles => "cursor-effect-sparkles",
            EffectKind::Trail => "cursor-effect-trail",
            EffectKind::Bubbles => "cursor-effect-bubbles",
            EffectKind::Snowflakes => "cursor-effect-snowflakes",
            EffectKind::Hearts => "cursor-effect-hearts",
            EffectKind::Stars => "cursor-effect-stars",
            EffectKind::Confetti => "cursor-effect-confetti",
        }
    }
}

/// Effect used whenever a change would leave the set empty.
pub const DEFAULT_EFFECT: EffectKind = EffectKind::Sparkles;

// =============================================================================
// EffectSet
// =============================================================================

/// Ordered set of active effect kinds.
///
/// Never empty, and [`EffectKind::All`] never coexists with another tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<EffectKind>", into = "Vec<EffectKind>")]
pub struct EffectSet(Vec<EffectKind>);

impl EffectSet {
    /// Builds a set from arbitrary tags, restoring the invariants.
    #[must_use]
    pub fn from_kinds(kinds: impl IntoIterator<Item = EffectKind>) -> Self {
        let mut unique: Vec<EffectKind> = Vec::new();
        for kind in kinds {
            if !unique.contains(&kind) {
                unique.push(kind);
            }
        }
        if unique.contains(&EffectKind::All) {
            return Self(vec![EffectKind::All]);
        }
        if unique.is_empty() {
            unique.push(DEFAULT_EFFECT);
        }
        Self(unique)
    }

    /// Returns the set obtained by toggling `kind`.
    ///
    /// Selecting `All` replaces everything; toggling any other tag drops
    /// `All`. An empty result falls back to [`DEFAULT_EFFECT`].
    #[must_use]
    pub fn toggled(&self, kind: EffectKind) -> Self {
        if kind == EffectKind::All {
            return Self(vec![EffectKind::All]);
        }

        let mut kinds: Vec<EffectKind> = self
            .0
            .iter()
            .copied()
            .filter(|k| *k != EffectKind::All)
            .collect();

        if let Some(position) = kinds.iter().position(|k| *k == kind) {
            kinds.remove(position);
        } else {
            kinds.push(kind);
        }

        if kinds.is_empty() {
            kinds.push(DEFAULT_EFFECT);
        }
        Self(kinds)
    }

    #[must_use]
    pub fn contains(&self, kind: EffectKind) -> bool {
        self.0.contains(&kind)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = EffectKind> + '_ {
        self.0.iter().copied()
    }
}

impl Default for EffectSet {
    fn default() -> Self {
        Self(vec![DEFAULT_EFFECT])
    }
}

impl From<Vec<EffectKind>> for EffectSet {
    fn from(kinds: Vec<EffectKind>) -> Self {
        Self::from_kinds(kinds)
    }
}

impl From<EffectSet> for Vec<EffectKind> {
    fn from(set: EffectSet) -> Self {
        set.0
    }
}

// =============================================================================
// Intensity
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    Low,
    #[default]
    Medium,
    High,
}

impl Intensity {
    pub const ALL: [Intensity; 3] = [Intensity::Low, Intensity::Medium, Intensity::High];

    #[must_use]
    pub fn i18n_key(self) -> &'static str {
        match self {
            Intensity::Low => "cursor-intensity-low",
            Intensity::Medium => "cursor-intensity-medium",
            Intensity::High => "cursor-intensity-high",
        }
    }
}

// =============================================================================
// HexColor
// =============================================================================

/// Why a color string was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorParseError {
    MissingHash,
    InvalidLength,
    InvalidDigit,
}

impl ColorParseError {
    #[must_use]
    pub fn i18n_key(self) -> &'static str {
        match self {
            ColorParseError::MissingHash => "cursor-color-error-missing-hash",
            ColorParseError::InvalidLength => "cursor-color-error-length",
            ColorParseError::InvalidDigit => "cursor-color-error-digit",
        }
    }
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorParseError::MissingHash => write!(f, "color must start with '#'"),
            ColorParseError::InvalidLength => write!(f, "color must have 3 or 6 hex digits"),
            ColorParseError::InvalidDigit => write!(f, "color contains a non-hex digit"),
        }
    }
}

/// An sRGB color in canonical lowercase `#rrggbb` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl HexColor {
    /// Parses `#rgb` or `#rrggbb` (any case), surrounding whitespace ignored.
    pub fn parse(input: &str) -> Result<Self, ColorParseError> {
        let digits = input
            .trim()
            .strip_prefix('#')
            .ok_or(ColorParseError::MissingHash)?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidDigit);
        }
        let lower = digits.to_ascii_lowercase();
        let expanded = match lower.len() {
            3 => lower.chars().flat_map(|c| [c, c]).collect::<String>(),
            6 => lower,
            _ => return Err(ColorParseError::InvalidLength),
        };
        Ok(Self(format!("#{expanded}")))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Red, green and blue channels.
    #[must_use]
    pub fn rgb(&self) -> [u8; 3] {
        let channel = |i: usize| {
            self.0
                .get(1 + i * 2..3 + i * 2)
                .and_then(|hex| u8::from_str_radix(hex, 16).ok())
                .unwrap_or(0)
        };
        [channel(0), channel(1), channel(2)]
    }
}

impl TryFrom<String> for HexColor {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.0
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// ColorPreset
// =============================================================================

/// A named palette of seven colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPreset {
    /// i18n key of the preset name.
    pub name_key: &'static str,
    colors: [&'static str; 7],
}

impl ColorPreset {
    /// The preset colors, in order.
    #[must_use]
    pub fn colors(&self) -> Vec<HexColor> {
        self.colors
            .iter()
            .filter_map(|hex| HexColor::parse(hex).ok())
            .collect()
    }

    /// True when `active` is exactly this preset, order included.
    #[must_use]
    pub fn matches(&self, active: &[HexColor]) -> bool {
        active.len() == self.colors.len()
            && active
                .iter()
                .zip(self.colors.iter())
                .all(|(color, hex)| color.as_str() == *hex)
    }
}

pub const PRESETS: [ColorPreset; 7] = [
    ColorPreset {
        name_key: "cursor-preset-rainbow",
        colors: [
            "#ff0000", "#ff7f00", "#ffff00", "#00ff00", "#0000ff", "#4b0082", "#9400d3",
        ],
    },
    ColorPreset {
        name_key: "cursor-preset-ocean",
        colors: [
            "#03045e", "#023e8a", "#0077b6", "#0096c7", "#00b4d8", "#48cae4", "#90e0ef",
        ],
    },
    ColorPreset {
        name_key: "cursor-preset-sunset",
        colors: [
            "#ff4e50", "#fc913a", "#f9d62e", "#eae374", "#e2f4c7", "#ff6f69", "#ffcc5c",
        ],
    },
    ColorPreset {
        name_key: "cursor-preset-forest",
        colors: [
            "#1b4332", "#2d6a4f", "#40916c", "#52b788", "#74c69d", "#95d5b2", "#b7e4c7",
        ],
    },
    ColorPreset {
        name_key: "cursor-preset-neon",
        colors: [
            "#ff00ff", "#00ffff", "#39ff14", "#ffff00", "#ff3131", "#bc13fe", "#1f51ff",
        ],
    },
    ColorPreset {
        name_key: "cursor-preset-pastel",
        colors: [
            "#ffadad", "#ffd6a5", "#fdffb6", "#caffbf", "#9bf6ff", "#a0c4ff", "#bdb2ff",
        ],
    },
    ColorPreset {
        name_key: "cursor-preset-monochrome",
        colors: [
            "#000000", "#2b2b2b", "#555555", "#808080", "#aaaaaa", "#d4d4d4", "#ffffff",
        ],
    },
];

// =============================================================================
// EffectConfiguration
// =============================================================================

/// The user's cursor-effect setup, persisted in `[cursor_effects]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectConfiguration {
    pub enabled: bool,
    pub effects: EffectSet,
    pub intensity: Intensity,
    pub colors: Vec<HexColor>,
    pub custom_colors: Vec<HexColor>,
}

impl Default for EffectConfiguration {
    fn default() -> Self {
        Self {
            enabled: false,
            effects: EffectSet::default(),
            intensity: Intensity::default(),
            colors: PRESETS[0].colors(),
            custom_colors: Vec::new(),
        }
    }
}

impl EffectConfiguration {
    /// Returns the preset matching the active palette, if any.
    #[must_use]
    pub fn active_preset(&self) -> Option<&'static ColorPreset> {
        PRESETS.iter().find(|preset| preset.matches(&self.colors))
    }

    /// Custom colors after adding `color`; unchanged if already present.
    #[must_use]
    pub fn custom_colors_with(&self, color: HexColor) -> Vec<HexColor> {
        let mut colors = self.custom_colors.clone();
        if !colors.contains(&color) {
            colors.push(color);
        }
        colors
    }

    /// Custom colors after removing the entry at `index`; out of range is a no-op.
    #[must_use]
    pub fn custom_colors_without(&self, index: usize) -> Vec<HexColor> {
        let mut colors = self.custom_colors.clone();
        if index < colors.len() {
            colors.remove(index);
        }
        colors
    }

    /// Active palette after appending `color`; unchanged if already present.
    #[must_use]
    pub fn colors_with(&self, color: HexColor) -> Vec<HexColor> {
        let mut colors = self.colors.clone();
        if !colors.contains(&color) {
            colors.push(color);
        }
        colors
    }

    /// Restores invariants on values read from disk.
    pub fn normalize(&mut self) {
        self.effects = EffectSet::from_kinds(self.effects.iter());
        let mut seen = Vec::with_capacity(self.custom_colors.len());
        self.custom_colors.retain(|color| {
            if seen.contains(color) {
                false
            } else {
                seen.push(color.clone());
                true
            }
        });
    }
}
