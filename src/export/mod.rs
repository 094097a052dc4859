//! Export functionality for palettes and canvases.
//!
//! This module renders the explorer's output in shareable formats: the tiled
//! canvas as SVG, and palettes as CSS custom properties or JSON.

pub mod palette;
pub mod svg;

pub use palette::{palette_css, palette_json};
pub use svg::{render_svg, SvgOptions};
