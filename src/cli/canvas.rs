//! SVG canvas rendering command.

use std::path::PathBuf;

use crate::cli::common::{load_config, resolve_base, CliError, CliResult};
use crate::export::{render_svg, SvgOptions};
use crate::models::HarmonyRule;
use crate::services::harmony::build_palette_by_name;
use crate::services::TileGenerator;
use clap::Args;

/// Render the tiled canvas as SVG
#[derive(Debug, Clone, Args)]
pub struct CanvasArgs {
    /// Base color as H,S,L
    #[arg(long, value_name = "H,S,L", conflicts_with = "hex")]
    pub hsl: Option<String>,

    /// Base color as hex
    #[arg(long, value_name = "HEX")]
    pub hex: Option<String>,

    /// Harmony rule id
    #[arg(long, value_name = "RULE")]
    pub harmony: Option<String>,

    /// Random seed (random when omitted)
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Subdivision depth (1-12, default from config)
    #[arg(long, value_name = "N")]
    pub depth: Option<u32>,

    /// Pixel width attribute
    #[arg(long, value_name = "PX", requires = "height")]
    pub width: Option<u32>,

    /// Pixel height attribute
    #[arg(long, value_name = "PX", requires = "width")]
    pub height: Option<u32>,

    /// Write the SVG to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl CanvasArgs {
    /// Execute the canvas command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config()?;
        let base = resolve_base(
            self.hsl.as_deref(),
            self.hex.as_deref(),
            config.explorer.base(),
        )?;

        let rule_name = self
            .harmony
            .clone()
            .unwrap_or_else(|| config.explorer.harmony.id().to_string());
        if HarmonyRule::from_name(&rule_name).is_none() {
            eprintln!("Warning: Unknown harmony rule '{rule_name}', using the base color only");
        }
        let palette = build_palette_by_name(base, &rule_name);

        let generator = TileGenerator::with_depth(self.depth.unwrap_or(config.explorer.depth))
            .map_err(|e| CliError::validation(format!("{e:#}")))?;
        let seed = self.seed.unwrap_or_else(rand::random);
        let tiles = generator.generate_seeded(palette.len(), seed);

        let options = SvgOptions {
            size: self.width.zip(self.height),
            ..SvgOptions::default()
        };
        let svg = render_svg(&palette.hex_colors(), &tiles, &options);

        match &self.output {
            Some(path) => {
                std::fs::write(path, svg).map_err(|e| {
                    CliError::io(format!("Failed to write {}: {}", path.display(), e))
                })?;
                eprintln!(
                    "Wrote {} tiles (seed {}) to {}",
                    tiles.len(),
                    seed,
                    path.display()
                );
            }
            None => print!("{svg}"),
        }

        Ok(())
    }
}
