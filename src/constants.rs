//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and the tuning defaults for canvas
//! subdivision and the AI suggestion service.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "ChromaEuclid";

/// The binary name of the application (used in command examples, lowercase with hyphens).
pub const APP_BINARY_NAME: &str = "chromaeuclid";

/// Default depth budget for canvas subdivision.
pub const DEFAULT_DEPTH: u32 = 5;

/// Largest accepted depth budget.
pub const MAX_DEPTH: u32 = 12;

/// Pieces with a side shorter than this are never split.
pub const MIN_TILE_DIMENSION: f64 = 10.0;

/// Depth below which a piece may stop splitting at random.
pub const EARLY_STOP_DEPTH: u32 = 3;

/// Probability of continuing to split inside the early-stop zone.
pub const CONTINUE_PROBABILITY: f64 = 0.7;

/// Smallest split ratio.
pub const MIN_SPLIT_RATIO: f64 = 0.30;

/// Largest split ratio.
pub const MAX_SPLIT_RATIO: f64 = 0.70;

/// Default generative-language model.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Default generative-language API endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Environment variable consulted for the API key when the config has none.
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Longest suggestion description kept from the AI response, in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 100;

/// Default web server port.
pub const DEFAULT_PORT: u16 = 3001;
