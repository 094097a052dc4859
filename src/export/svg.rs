//! SVG rendering of a tiled canvas.

use std::fmt::Write as _;

use crate::models::{HexColor, Tile};

/// Stroke color drawn between tiles.
pub const DEFAULT_STROKE: &str = "#0f172a";

/// Stroke width in canvas units.
pub const DEFAULT_STROKE_WIDTH: f64 = 0.5;

/// Output options for [`render_svg`].
#[derive(Debug, Clone, PartialEq)]
pub struct SvgOptions {
    /// Color of tile borders
    pub stroke: String,
    /// Border width in canvas units
    pub stroke_width: f64,
    /// Optional `width`/`height` attributes in pixels; the drawing always
    /// stretches to fill them
    pub size: Option<(u32, u32)>,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            stroke: DEFAULT_STROKE.to_string(),
            stroke_width: DEFAULT_STROKE_WIDTH,
            size: None,
        }
    }
}

/// Renders tiles as an SVG document over the `0 0 100 100` view box.
///
/// Each tile becomes one `<rect>` filled with `colors[tile.color_index]`. An
/// index past the end of `colors` wraps around; with no colors the document
/// has no rectangles.
///
/// # Examples
///
/// ```
/// use chromaeuclid::export::svg::{render_svg, SvgOptions};
/// use chromaeuclid::models::{HexColor, Rect, Tile};
///
/// let colors: Vec<HexColor> = vec!["#ff0000".parse().unwrap()];
/// let tiles = vec![Tile::new(Rect::CANVAS, 0)];
/// let svg = render_svg(&colors, &tiles, &SvgOptions::default());
/// assert!(svg.contains(r##"fill="#ff0000""##));
/// ```
#[must_use]
pub fn render_svg(colors: &[HexColor], tiles: &[Tile], options: &SvgOptions) -> String {
    let mut output = String::new();

    output.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100" preserveAspectRatio="none""#);
    if let Some((width, height)) = options.size {
        let _ = write!(output, r#" width="{width}" height="{height}""#);
    }
    output.push_str(">\n");

    if !colors.is_empty() {
        for tile in tiles {
            let fill = &colors[tile.color_index % colors.len()];
            let _ = writeln!(
                output,
                r#"  <rect x="{}" y="{}" width="{}" height="{}" fill="{}" stroke="{}" stroke-width="{}"/>"#,
                format_number(tile.x),
                format_number(tile.y),
                format_number(tile.width),
                format_number(tile.height),
                fill,
                options.stroke,
                format_number(options.stroke_width),
            );
        }
    }

    output.push_str("</svg>\n");
    output
}

/// Formats a coordinate with at most four decimals and no trailing zeros.
fn format_number(value: f64) -> String {
    let text = format!("{value:.4}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Rect;
    use crate::services::TileGenerator;

    fn colors(hexes: &[&str]) -> Vec<HexColor> {
        hexes.iter().map(|h| h.parse().unwrap()).collect()
    }

    #[test]
    fn test_one_rect_per_tile() {
        let palette = colors(&["#ff0000", "#00ff00", "#0000ff"]);
        let tiles = TileGenerator::default().generate_seeded(3, 11);
        let svg = render_svg(&palette, &tiles, &SvgOptions::default());
        assert_eq!(svg.matches("<rect").count(), tiles.len());
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"viewBox="0 0 100 100""#));
        assert!(svg.contains(r#"preserveAspectRatio="none""#));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_rect_attributes() {
        let palette = colors(&["#123456", "#abcdef"]);
        let tiles = vec![
            Tile::new(Rect::new(0.0, 0.0, 35.5, 100.0), 1),
            Tile::new(Rect::new(35.5, 0.0, 64.5, 100.0), 0),
        ];
        let svg = render_svg(&palette, &tiles, &SvgOptions::default());
        assert!(svg.contains(
            r##"<rect x="0" y="0" width="35.5" height="100" fill="#abcdef" stroke="#0f172a" stroke-width="0.5"/>"##
        ));
        assert!(svg.contains(r##"x="35.5" y="0" width="64.5" height="100" fill="#123456""##));
    }

    #[test]
    fn test_size_attributes() {
        let options = SvgOptions {
            size: Some((800, 600)),
            ..SvgOptions::default()
        };
        let svg = render_svg(&colors(&["#000000"]), &[], &options);
        assert!(svg.contains(r#"width="800" height="600""#));
        assert_eq!(svg.matches("<rect").count(), 0);
    }

    #[test]
    fn test_empty_palette_renders_no_rects() {
        let tiles = vec![Tile::new(Rect::CANVAS, 0)];
        let svg = render_svg(&[], &tiles, &SvgOptions::default());
        assert_eq!(svg.matches("<rect").count(), 0);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(100.0), "100");
        assert_eq!(format_number(33.333_333_333), "33.3333");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(-0.00001), "0");
    }
}
