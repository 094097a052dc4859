//! RGB color handling with hex parsing and HSL conversion.

// Allow small types passed by reference for API consistency
#![allow(clippy::trivially_copy_pass_by_ref)]
// Allow intentional type casts for color math
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
// Allow float comparisons in HSL extraction (standard algorithm)
#![allow(clippy::float_cmp)]

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Hsl;

/// RGB color value with hex string representation.
///
/// Represents a color using red, green, and blue channels (0-255 each).
/// This is the intermediate encoding between [`Hsl`] and hex strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RgbColor {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl RgbColor {
    /// Creates a new `RgbColor` from individual channel values.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses an `RgbColor` from a hex string.
    ///
    /// Supports formats: "#RRGGBB", "RRGGBB", "#RGB", "RGB" in either case.
    /// Shorthand digits are expanded by duplication ("#f80" is "#ff8800").
    ///
    /// # Examples
    ///
    /// ```
    /// use chromaeuclid::models::RgbColor;
    ///
    /// let color = RgbColor::from_hex("#FF0000").unwrap();
    /// assert_eq!(color, RgbColor::new(255, 0, 0));
    ///
    /// let color = RgbColor::from_hex("0f0").unwrap();
    /// assert_eq!(color, RgbColor::new(0, 255, 0));
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid hex color format.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let hex = hex.trim();
        let digits = hex.strip_prefix('#').unwrap_or(hex);

        // from_str_radix alone would accept a leading '+'
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            anyhow::bail!("Invalid hex color '{hex}'. Only hex digits 0-9 and a-f are allowed");
        }

        let expanded = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect::<String>(),
            6 => digits.to_string(),
            _ => anyhow::bail!(
                "Invalid hex color format '{hex}'. Expected 3 or 6 hex digits (#RGB or #RRGGBB)"
            ),
        };

        let r = u8::from_str_radix(&expanded[0..2], 16)
            .context(format!("Invalid red channel in hex color '{hex}'"))?;
        let g = u8::from_str_radix(&expanded[2..4], 16)
            .context(format!("Invalid green channel in hex color '{hex}'"))?;
        let b = u8::from_str_radix(&expanded[4..6], 16)
            .context(format!("Invalid blue channel in hex color '{hex}'"))?;

        Ok(Self::new(r, g, b))
    }

    /// Converts the color to a hex string in the format "#rrggbb" (lowercase).
    ///
    /// # Examples
    ///
    /// ```
    /// use chromaeuclid::models::RgbColor;
    ///
    /// assert_eq!(RgbColor::new(255, 0, 0).to_hex(), "#ff0000");
    /// assert_eq!(RgbColor::new(0, 128, 255).to_hex(), "#0080ff");
    /// ```
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Creates an `RgbColor` from an [`Hsl`] value.
    ///
    /// Uses the piecewise form `l - a * max(min(k - 3, 9 - k, 1), -1)` per
    /// channel, with each channel rounded to the nearest integer.
    #[must_use]
    pub fn from_hsl(hsl: &Hsl) -> Self {
        let l = hsl.l / 100.0;
        let a = hsl.s * l.min(1.0 - l) / 100.0;
        let channel = |n: f64| {
            let k = (n + hsl.h / 30.0) % 12.0;
            let value = l - a * (k - 3.0).min(9.0 - k).min(1.0).max(-1.0);
            round_half_up(255.0 * value).clamp(0.0, 255.0) as u8
        };

        Self::new(channel(0.0), channel(8.0), channel(4.0))
    }

    /// Converts the color to [`Hsl`].
    ///
    /// Hue is rounded to an integer degree in [0, 360); saturation and
    /// lightness are percentages rounded to one decimal place. Grays have hue 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use chromaeuclid::models::{Hsl, RgbColor};
    ///
    /// assert_eq!(RgbColor::new(255, 0, 0).to_hsl(), Hsl::new(0.0, 100.0, 50.0));
    /// ```
    #[must_use]
    pub fn to_hsl(&self) -> Hsl {
        let r = f64::from(self.r) / 255.0;
        let g = f64::from(self.g) / 255.0;
        let b = f64::from(self.b) / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let sector = if delta == 0.0 {
            0.0
        } else if max == r {
            ((g - b) / delta) % 6.0
        } else if max == g {
            (b - r) / delta + 2.0
        } else {
            (r - g) / delta + 4.0
        };

        let mut h = round_half_up(sector * 60.0);
        if h < 0.0 {
            h += 360.0;
        }

        let l = (max + min) / 2.0;
        let s = if delta == 0.0 {
            0.0
        } else {
            delta / (1.0 - (2.0 * l - 1.0).abs())
        };

        Hsl::new(h, round_one_decimal(s * 100.0), round_one_decimal(l * 100.0))
    }

    /// Relative luminance per WCAG 2.x, in [0.0, 1.0].
    #[must_use]
    pub fn relative_luminance(&self) -> f64 {
        let linear = |c: u8| {
            let c = f64::from(c) / 255.0;
            if c <= 0.039_28 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        };
        0.0722f64.mul_add(
            linear(self.b),
            0.2126f64.mul_add(linear(self.r), 0.7152 * linear(self.g)),
        )
    }

    /// Determines if text drawn on top of this color should be light.
    #[must_use]
    pub fn is_dark(&self) -> bool {
        self.relative_luminance() < 0.179
    }

    /// Converts the color to a crossterm color for terminal swatches.
    #[must_use]
    pub const fn to_terminal_color(&self) -> crossterm::style::Color {
        crossterm::style::Color::Rgb {
            r: self.r,
            g: self.g,
            b: self.b,
        }
    }
}

/// Rounds half-way cases toward positive infinity (`-0.5` becomes `0`).
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Default for RgbColor {
    /// Default color is black (#000000).
    fn default() -> Self {
        Self::new(0, 0, 0)
    }
}
