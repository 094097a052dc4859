//! Application orchestration layer
//!
//! This module holds the explorer state that both front ends drive: current
//! selections, derived palette and canvas, and the AI suggestion panel.

pub mod explorer;

// Re-export commonly used types for convenience
pub use explorer::{ExplorerSnapshot, ExplorerState, SuggestionRejected};
