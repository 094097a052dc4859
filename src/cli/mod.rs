//! CLI command handlers for ChromaEuclid.
//!
//! This module provides headless, scriptable access to the palette engine,
//! the canvas generator, and AI suggestions.

pub mod canvas;
pub mod common;
pub mod config;
pub mod convert;
pub mod harmonies;
pub mod palette;
pub mod suggest;
pub mod tiles;

// Re-export types used by main.rs and tests
pub use canvas::CanvasArgs;
pub use common::{CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use convert::ConvertArgs;
pub use harmonies::HarmoniesArgs;
pub use palette::PaletteArgs;
pub use suggest::SuggestArgs;
pub use tiles::TilesArgs;
