//! Color conversion command.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::models::{HexColor, Hsl, RgbColor};
use clap::Args;
use serde::Serialize;

/// Convert a color between hex and HSL
#[derive(Debug, Clone, Args)]
pub struct ConvertArgs {
    /// Hex color to convert to HSL (e.g. "#2680d9" or "f00")
    #[arg(value_name = "HEX", required_unless_present = "hsl", conflicts_with = "hsl")]
    pub hex: Option<String>,

    /// HSL color to convert to hex, as H,S,L
    #[arg(long, value_name = "H,S,L")]
    pub hsl: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct Conversion {
    hex: HexColor,
    hsl: Hsl,
    rgb: RgbColor,
}

impl ConvertArgs {
    /// Execute the convert command
    pub fn execute(&self) -> CliResult<()> {
        let conversion = match (&self.hex, &self.hsl) {
            (Some(hex), None) => {
                let rgb = RgbColor::from_hex(hex)
                    .map_err(|e| CliError::validation(format!("{e:#}")))?;
                Conversion {
                    hex: rgb.into(),
                    hsl: rgb.to_hsl(),
                    rgb,
                }
            }
            (None, Some(hsl)) => {
                let hsl: Hsl = hsl
                    .parse()
                    .map_err(|e| CliError::validation(format!("{e:#}")))?;
                let rgb = hsl.to_rgb();
                Conversion {
                    hex: rgb.into(),
                    hsl,
                    rgb,
                }
            }
            _ => {
                return Err(CliError::validation(
                    "Specify exactly one of HEX or --hsl",
                ))
            }
        };

        if self.json {
            print_json(&conversion)?;
        } else {
            println!("Hex: {}", conversion.hex);
            println!("HSL: {}", conversion.hsl);
            println!(
                "RGB: rgb({}, {}, {})",
                conversion.rgb.r, conversion.rgb.g, conversion.rgb.b
            );
        }

        Ok(())
    }
}
