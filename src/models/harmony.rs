//! Harmony rule identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named rule that derives a palette from one base color.
///
/// Serialized as its stable kebab-case id (e.g. `"split-complementary"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HarmonyRule {
    /// Lightness and saturation variations of a single hue
    Monochromatic,
    /// Neighboring hues, 30° apart
    Analogous,
    /// The base hue and its opposite
    #[default]
    Complementary,
    /// The base plus the two neighbors of its complement
    SplitComplementary,
    /// Three hues 120° apart
    Triadic,
    /// Two complementary pairs forming a rectangle
    Tetradic,
    /// Four hues 90° apart
    Square,
    /// Six hues 60° apart
    Hexagonal,
}

impl HarmonyRule {
    /// Returns all rules in menu order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Monochromatic,
            Self::Analogous,
            Self::Complementary,
            Self::SplitComplementary,
            Self::Triadic,
            Self::Tetradic,
            Self::Square,
            Self::Hexagonal,
        ]
    }

    /// Stable identifier used on the command line, in config files and on the wire.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Monochromatic => "monochromatic",
            Self::Analogous => "analogous",
            Self::Complementary => "complementary",
            Self::SplitComplementary => "split-complementary",
            Self::Triadic => "triadic",
            Self::Tetradic => "tetradic",
            Self::Square => "square",
            Self::Hexagonal => "hexagonal",
        }
    }

    /// Get a human-readable name for this rule
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Monochromatic => "Monochromatic",
            Self::Analogous => "Analogous",
            Self::Complementary => "Complementary",
            Self::SplitComplementary => "Split Complementary",
            Self::Triadic => "Triadic",
            Self::Tetradic => "Tetradic (Rectangle)",
            Self::Square => "Square",
            Self::Hexagonal => "Hexagonal",
        }
    }

    /// Number of colors the rule produces.
    #[must_use]
    pub const fn color_count(self) -> usize {
        match self {
            Self::Hexagonal => 6,
            _ => 5,
        }
    }

    /// Parses a rule leniently: ids, display names, snake_case and camelCase
    /// spellings all match, ignoring case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let wanted = normalize(name);
        if wanted.is_empty() {
            return None;
        }
        Self::all().iter().copied().find(|rule| {
            normalize(rule.id()) == wanted || normalize(rule.display_name()) == wanted
                || (*rule == Self::Tetradic && wanted == "rectangle")
        })
    }
}

/// Lowercases and drops everything but letters, so "Split_Complementary",
/// "split-complementary" and "splitComplementary" compare equal.
fn normalize(name: &str) -> String {
    let trimmed = name.trim();
    // "Tetradic (Rectangle)" and "tetradic" should both match
    let without_note = trimmed.split('(').next().unwrap_or(trimmed);
    without_note
        .chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

impl fmt::Display for HarmonyRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for HarmonyRule {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        Self::from_name(s).ok_or_else(|| {
            let ids: Vec<&str> = Self::all().iter().map(|r| r.id()).collect();
            anyhow::anyhow!(
                "Unknown harmony rule '{s}'. Expected one of: {}",
                ids.join(", ")
            )
        })
    }
}
