//! Service layer for business logic.
//!
//! This module contains the palette engine, the canvas subdivision, and the
//! AI suggestion client. Everything except the suggestion client is pure and
//! synchronous.

pub mod harmony;
pub mod suggestion;
pub mod tiles;

// Re-export commonly used types and functions
pub use harmony::{build_palette, build_palette_by_name, generate_palette};
pub use suggestion::{Suggestion, SuggestionClient, SuggestionConfig, SuggestionError};
pub use tiles::{SubdivisionParams, TileGenerator};
