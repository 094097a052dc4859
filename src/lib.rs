//! ChromaEuclid Library
//!
//! This library provides core functionality for the ChromaEuclid palette
//! explorer: HSL/hex color math, harmony-rule palette generation, randomized
//! recursive canvas subdivision, AI palette suggestions, and SVG/CSS export.

// Module declarations
pub mod app;
pub mod cli;
pub mod config;
pub mod constants;
pub mod export;
pub mod models;
pub mod services;
#[cfg(feature = "web")]
pub mod web;
