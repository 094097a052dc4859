//! Palette entries and derived palettes.

use serde::{Deserialize, Serialize};

use super::{HarmonyRule, HexColor, Hsl};

/// One palette entry: a color in both encodings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorDefinition {
    /// Hex form, used for rendering
    pub hex: HexColor,
    /// HSL form the hex was derived from
    pub hsl: Hsl,
    /// Optional display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ColorDefinition {
    /// Creates an entry from an HSL color, deriving the hex form.
    #[must_use]
    pub fn from_hsl(hsl: Hsl) -> Self {
        Self {
            hex: hsl.to_hex(),
            hsl,
            name: None,
        }
    }
}

/// A palette derived from a base color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    /// The color the palette was derived from
    pub base: Hsl,
    /// Rule used, or `None` when an unrecognized rule degraded the palette to its base
    pub harmony: Option<HarmonyRule>,
    /// Ordered palette entries (never empty)
    pub colors: Vec<ColorDefinition>,
}

impl Palette {
    /// Hex strings in palette order, as handed to renderers.
    #[must_use]
    pub fn hex_colors(&self) -> Vec<HexColor> {
        self.colors.iter().map(|c| c.hex.clone()).collect()
    }

    /// Number of colors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// True when the palette has no colors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}
