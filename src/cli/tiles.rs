//! Canvas subdivision command.

use crate::cli::common::{load_config, print_json, CliError, CliResult};
use crate::models::Tile;
use crate::services::TileGenerator;
use clap::Args;
use serde::Serialize;

/// Subdivide the canvas into tiles
#[derive(Debug, Clone, Args)]
pub struct TilesArgs {
    /// Number of palette colors to distribute
    #[arg(long, value_name = "N", default_value_t = 5)]
    pub colors: usize,

    /// Random seed (a random one is chosen and printed when omitted)
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Subdivision depth (1-12, default from config)
    #[arg(long, value_name = "N")]
    pub depth: Option<u32>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct TilesOutput {
    seed: u64,
    depth: u32,
    colors: usize,
    tiles: Vec<Tile>,
}

impl TilesArgs {
    /// Execute the tiles command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config()?;
        let depth = self.depth.unwrap_or(config.explorer.depth);
        let generator = TileGenerator::with_depth(depth)
            .map_err(|e| CliError::validation(format!("{e:#}")))?;
        let seed = self.seed.unwrap_or_else(rand::random);

        let output = TilesOutput {
            seed,
            depth,
            colors: self.colors,
            tiles: generator.generate_seeded(self.colors, seed),
        };

        if self.json {
            print_json(&output)?;
        } else {
            println!(
                "{} tiles (seed {}, depth {}, {} colors)",
                output.tiles.len(),
                output.seed,
                output.depth,
                output.colors
            );
            println!();
            println!(
                "{:>4} {:>8} {:>8} {:>8} {:>8} {:>6}",
                "#", "x", "y", "width", "height", "color"
            );
            for (index, tile) in output.tiles.iter().enumerate() {
                println!(
                    "{:>4} {:>8.2} {:>8.2} {:>8.2} {:>8.2} {:>6}",
                    index + 1,
                    tile.x,
                    tile.y,
                    tile.width,
                    tile.height,
                    tile.color_index + 1
                );
            }
        }

        Ok(())
    }
}
