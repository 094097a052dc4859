//! Harmony rule listing command.

use crate::cli::common::{print_json, CliResult};
use crate::models::HarmonyRule;
use clap::Args;
use serde::Serialize;

/// List the available harmony rules
#[derive(Debug, Clone, Args)]
pub struct HarmoniesArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct HarmonyInfo {
    id: &'static str,
    name: &'static str,
    colors: usize,
}

impl HarmoniesArgs {
    /// Execute the harmonies command
    pub fn execute(&self) -> CliResult<()> {
        let rules: Vec<HarmonyInfo> = HarmonyRule::all()
            .iter()
            .map(|rule| HarmonyInfo {
                id: rule.id(),
                name: rule.display_name(),
                colors: rule.color_count(),
            })
            .collect();

        if self.json {
            print_json(&rules)?;
        } else {
            for rule in &rules {
                println!("{:<22} {:<22} {} colors", rule.id, rule.name, rule.colors);
            }
        }

        Ok(())
    }
}
