//! Palette derivation from a base color and a harmony rule.
//!
//! Every rule is a fixed list of hue rotations and lightness/saturation
//! adjustments. Lightness floors and ceilings differ per slot so variants never
//! collapse to pure black or white.

use tracing::warn;

use crate::models::{ColorDefinition, HarmonyRule, Hsl, Palette};

/// Derives the ordered HSL colors for `rule`.
///
/// Returns 5 colors, or 6 for [`HarmonyRule::Hexagonal`].
#[must_use]
pub fn derive_colors(base: Hsl, rule: HarmonyRule) -> Vec<Hsl> {
    let Hsl { s, l, .. } = base;

    match rule {
        HarmonyRule::Monochromatic => vec![
            base,
            base.with_lightness((l - 20.0).max(10.0)),
            base.with_lightness((l + 20.0).min(95.0)),
            Hsl::new(base.h, (s - 30.0).max(10.0), (l + 10.0).min(90.0)),
            Hsl::new(base.h, (s + 20.0).min(100.0), (l - 10.0).max(20.0)),
        ],
        HarmonyRule::Analogous => vec![
            base.rotate(-30.0),
            base,
            base.rotate(30.0),
            base.rotate(60.0),
            base.rotate(-60.0),
        ],
        HarmonyRule::Complementary => {
            let complement = base.rotate(180.0);
            vec![
                base,
                complement,
                base.with_lightness((l + 20.0).min(90.0)),
                complement.with_lightness((l - 20.0).max(20.0)),
                Hsl::new(complement.h, (s - 20.0).max(0.0), (l + 30.0).min(95.0)),
            ]
        }
        HarmonyRule::SplitComplementary => vec![
            base,
            base.rotate(150.0),
            base.rotate(210.0),
            base.with_lightness((l - 20.0).max(20.0)),
            base.rotate(150.0).with_lightness((l + 20.0).min(90.0)),
        ],
        HarmonyRule::Triadic => vec![
            base,
            base.rotate(120.0),
            base.rotate(240.0),
            base.with_lightness((l + 30.0).min(95.0)),
            base.rotate(120.0).with_lightness((l - 20.0).max(15.0)),
        ],
        HarmonyRule::Tetradic => vec![
            base,
            base.rotate(60.0),
            base.rotate(180.0),
            base.rotate(240.0),
            base.with_lightness((l + 20.0).min(95.0)),
        ],
        HarmonyRule::Square => vec![
            base,
            base.rotate(90.0),
            base.rotate(180.0),
            base.rotate(270.0),
            base.rotate(90.0).with_lightness((l + 20.0).min(90.0)),
        ],
        HarmonyRule::Hexagonal => (0..6).map(|i| base.rotate(f64::from(i) * 60.0)).collect(),
    }
}

/// Generates the palette entries for `base` under `rule`.
///
/// Pure and deterministic: the same inputs always give the same colors.
///
/// # Examples
///
/// ```
/// use chromaeuclid::models::{HarmonyRule, Hsl};
/// use chromaeuclid::services::harmony::generate_palette;
///
/// let colors = generate_palette(Hsl::new(210.0, 70.0, 50.0), HarmonyRule::Complementary);
/// assert_eq!(colors.len(), 5);
/// assert_eq!(colors[1].hsl.h, 30.0);
/// ```
#[must_use]
pub fn generate_palette(base: Hsl, rule: HarmonyRule) -> Vec<ColorDefinition> {
    derive_colors(base, rule)
        .into_iter()
        .map(ColorDefinition::from_hsl)
        .collect()
}

/// Builds a [`Palette`] for a known rule.
#[must_use]
pub fn build_palette(base: Hsl, rule: HarmonyRule) -> Palette {
    Palette {
        base,
        harmony: Some(rule),
        colors: generate_palette(base, rule),
    }
}

/// Builds a [`Palette`] from a rule name.
///
/// An unrecognized name degrades to a single-color palette holding only
/// `base`; no error is raised.
#[must_use]
pub fn build_palette_by_name(base: Hsl, rule_name: &str) -> Palette {
    match HarmonyRule::from_name(rule_name) {
        Some(rule) => build_palette(base, rule),
        None => {
            warn!(
                "Unknown harmony rule '{}', falling back to the base color alone",
                rule_name
            );
            Palette {
                base,
                harmony: None,
                colors: vec![ColorDefinition::from_hsl(base)],
            }
        }
    }
}
