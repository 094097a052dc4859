//! Palette export as CSS custom properties or JSON.

use std::fmt::Write as _;

use anyhow::{Context, Result};

use crate::models::Palette;

/// Renders the palette as a `:root` block of `--color-N` custom properties.
///
/// # Examples
///
/// ```
/// use chromaeuclid::export::palette::palette_css;
/// use chromaeuclid::models::{HarmonyRule, Hsl};
/// use chromaeuclid::services::build_palette;
///
/// let css = palette_css(&build_palette(Hsl::default(), HarmonyRule::Complementary));
/// assert!(css.contains("--color-1: #2680d9;"));
/// ```
#[must_use]
pub fn palette_css(palette: &Palette) -> String {
    let mut output = String::from(":root {\n");
    for (index, color) in palette.colors.iter().enumerate() {
        let _ = writeln!(output, "  --color-{}: {};", index + 1, color.hex);
    }
    output.push_str("}\n");
    output
}

/// Renders the palette as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn palette_json(palette: &Palette) -> Result<String> {
    serde_json::to_string_pretty(palette).context("Failed to serialize palette")
}
