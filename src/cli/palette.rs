//! Palette generation command.

use crate::cli::common::{load_config, print_swatches, resolve_base, CliError, CliResult};
use crate::export::{palette_css, palette_json};
use crate::models::HarmonyRule;
use crate::services::harmony::build_palette_by_name;
use clap::Args;

/// Generate a palette from a base color and harmony rule
#[derive(Debug, Clone, Args)]
pub struct PaletteArgs {
    /// Base color as H,S,L (e.g. "210,70,50")
    #[arg(long, value_name = "H,S,L", conflicts_with = "hex")]
    pub hsl: Option<String>,

    /// Base color as hex (e.g. "#2680d9")
    #[arg(long, value_name = "HEX")]
    pub hex: Option<String>,

    /// Harmony rule id (see `harmonies`)
    #[arg(long, value_name = "RULE")]
    pub harmony: Option<String>,

    /// Output as JSON
    #[arg(long, conflicts_with = "css")]
    pub json: bool,

    /// Output as CSS custom properties
    #[arg(long)]
    pub css: bool,
}

impl PaletteArgs {
    /// Execute the palette command
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
            eprintln!("Warning: Unknown harmony rule '{rule_name}', showing the base color only");
        }
        let palette = build_palette_by_name(base, &rule_name);

        if self.json {
            let json = palette_json(&palette)
                .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e:#}")))?;
            println!("{json}");
        } else if self.css {
            print!("{}", palette_css(&palette));
        } else {
            match palette.harmony {
                Some(rule) => println!("{} palette from {}", rule.display_name(), base),
                None => println!("Base color {base}"),
            }
            println!();
            print_swatches(&palette.colors);
        }

        Ok(())
    }
}

