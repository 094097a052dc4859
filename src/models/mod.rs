//! Data models for colors, palettes, and canvas tiles.
//!
//! This module contains the value types used throughout the application.
//! Models are independent of UI and business logic.

pub mod harmony;
pub mod hsl;
pub mod palette;
pub mod rgb;
pub mod tile;

// Re-export all model types
pub use harmony::HarmonyRule;
pub use hsl::{hex_to_hsl, hsl_to_hex, HexColor, Hsl};
pub use palette::{ColorDefinition, Palette};
pub use rgb::RgbColor;
pub use tile::{Rect, Tile};
