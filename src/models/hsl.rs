//! HSL colors, hex strings, and the conversions between them.
//!
//! [`hsl_to_hex`] and [`hex_to_hsl`] are the two conversions every other part
//! of the crate goes through. `hex_to_hsl` is forgiving: anything that is not
//! `#rgb` or `#rrggbb` becomes black. Use [`Hsl::parse_hex`] where malformed
//! input should be reported instead.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use super::RgbColor;

/// A color in hue/saturation/lightness form.
///
/// Hue is in degrees `[0, 360)`, saturation and lightness are percentages
/// `[0, 100]`. Constructors normalize out-of-range input, so every `Hsl` in
/// circulation satisfies these bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    /// Hue in degrees
    pub h: f64,
    /// Saturation percentage
    pub s: f64,
    /// Lightness percentage
    pub l: f64,
}

impl Hsl {
    /// Black, the fallback for unparseable hex input.
    pub const BLACK: Self = Self {
        h: 0.0,
        s: 0.0,
        l: 0.0,
    };

    /// Creates a normalized color: hue wraps around the circle, saturation and
    /// lightness clamp to `[0, 100]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chromaeuclid::models::Hsl;
    ///
    /// let hsl = Hsl::new(370.0, 120.0, -5.0);
    /// assert_eq!(hsl, Hsl::new(10.0, 100.0, 0.0));
    /// ```
    #[must_use]
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        let h = if h.is_finite() { h.rem_euclid(360.0) } else { 0.0 };
        // rem_euclid can return 360.0 for tiny negative inputs
        let h = if h >= 360.0 { 0.0 } else { h };
        Self {
            h,
            s: clamp_percent(s),
            l: clamp_percent(l),
        }
    }

    /// Returns this color with the hue rotated by `degrees` (wrapping).
    #[must_use]
    pub fn rotate(&self, degrees: f64) -> Self {
        Self::new(self.h + degrees, self.s, self.l)
    }

    /// Returns this color with a different saturation.
    #[must_use]
    pub fn with_saturation(&self, s: f64) -> Self {
        Self::new(self.h, s, self.l)
    }

    /// Returns this color with a different lightness.
    #[must_use]
    pub fn with_lightness(&self, l: f64) -> Self {
        Self::new(self.h, self.s, l)
    }

    /// Converts to the 8-bit RGB encoding.
    #[must_use]
    pub fn to_rgb(&self) -> RgbColor {
        RgbColor::from_hsl(self)
    }

    /// Converts to a `#rrggbb` hex color.
    #[must_use]
    pub fn to_hex(&self) -> HexColor {
        hsl_to_hex(self)
    }

    /// Parses a hex color strictly.
    ///
    /// Accepts `#rgb`, `#rrggbb`, with or without `#`, in any case.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid hex color.
    pub fn parse_hex(hex: &str) -> Result<Self> {
        Ok(RgbColor::from_hex(hex)?.to_hsl())
    }
}

impl Default for Hsl {
    /// The explorer's starting color, a mid blue.
    fn default() -> Self {
        Self::new(210.0, 70.0, 50.0)
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsl({}, {}%, {}%)", self.h, self.s, self.l)
    }
}

impl FromStr for Hsl {
    type Err = anyhow::Error;

    /// Parses `"H,S,L"` (e.g. `"210,70,50"`); whitespace and `%` are ignored.
    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            anyhow::bail!("Invalid HSL '{s}'. Expected three comma-separated values: H,S,L");
        }

        let parse = |part: &str, name: &str| -> Result<f64> {
            let value: f64 = part
                .trim_end_matches('%')
                .trim_end_matches('°')
                .parse()
                .context(format!("Invalid {name} value '{part}' in HSL '{s}'"))?;
            if !value.is_finite() {
                anyhow::bail!("Invalid {name} value '{part}' in HSL '{s}'");
            }
            Ok(value)
        };

        let h = parse(parts[0], "hue")?;
        let sat = parse(parts[1], "saturation")?;
        let l = parse(parts[2], "lightness")?;

        if !(0.0..=360.0).contains(&h) {
            anyhow::bail!("Hue {h} out of range (0-360)");
        }
        if !(0.0..=100.0).contains(&sat) {
            anyhow::bail!("Saturation {sat} out of range (0-100)");
        }
        if !(0.0..=100.0).contains(&l) {
            anyhow::bail!("Lightness {l} out of range (0-100)");
        }

        Ok(Self::new(h, sat, l))
    }
}

fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

/// A `#rrggbb` color string with lowercase digits.
///
/// Only constructed from an [`RgbColor`], so the format is guaranteed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl HexColor {
    /// Returns the hex string, including the leading `#`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Converts back to RGB channels.
    #[must_use]
    pub fn to_rgb(&self) -> RgbColor {
        // The string is always well-formed, see `From<RgbColor>`.
        RgbColor::from_hex(&self.0).unwrap_or_default()
    }
}

impl From<RgbColor> for HexColor {
    fn from(rgb: RgbColor) -> Self {
        Self(rgb.to_hex())
    }
}

impl TryFrom<String> for HexColor {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        Ok(RgbColor::from_hex(&value)?.into())
    }
}

impl From<HexColor> for String {
    fn from(hex: HexColor) -> Self {
        hex.0
    }
}

impl FromStr for HexColor {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(RgbColor::from_hex(s)?.into())
    }
}

impl AsRef<str> for HexColor {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Converts an HSL color to its `#rrggbb` form.
///
/// # Examples
///
/// ```
/// use chromaeuclid::models::{hsl_to_hex, Hsl};
///
/// assert_eq!(hsl_to_hex(&Hsl::new(0.0, 0.0, 0.0)).as_str(), "#000000");
/// assert_eq!(hsl_to_hex(&Hsl::new(0.0, 100.0, 50.0)).as_str(), "#ff0000");
/// ```
#[must_use]
pub fn hsl_to_hex(hsl: &Hsl) -> HexColor {
    RgbColor::from_hsl(hsl).into()
}

/// Converts a `#rgb` or `#rrggbb` string to HSL, falling back to black.
///
/// The fallback covers wrong lengths, a missing `#`, and non-hex digits.
/// No error is raised.
///
/// # Examples
///
/// ```
/// use chromaeuclid::models::{hex_to_hsl, Hsl};
///
/// assert_eq!(hex_to_hsl("#ff0000"), Hsl::new(0.0, 100.0, 50.0));
/// assert_eq!(hex_to_hsl("#f00"), Hsl::new(0.0, 100.0, 50.0));
/// assert_eq!(hex_to_hsl("red"), Hsl::BLACK);
/// ```
#[must_use]
pub fn hex_to_hsl(hex: &str) -> Hsl {
    let well_formed = hex.starts_with('#') && matches!(hex.len(), 4 | 7);
    if !well_formed {
        debug!("Hex '{}' has unsupported form, using black", hex);
        return Hsl::BLACK;
    }

    match RgbColor::from_hex(hex) {
        Ok(rgb) => rgb.to_hsl(),
        Err(e) => {
            debug!("Hex '{}' did not parse ({}), using black", hex, e);
            Hsl::BLACK
        }
    }
}
