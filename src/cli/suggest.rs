//! AI palette suggestion command.

use crate::cli::common::{load_config, print_json, print_swatches, CliError, CliResult};
use crate::constants::APP_BINARY_NAME;
use crate::models::{hex_to_hsl, Palette};
use crate::services::harmony::build_palette;
use crate::services::{Suggestion, SuggestionClient, SuggestionError};
use clap::Args;
use serde::Serialize;
use tracing::debug;

/// Ask the AI for a palette matching a mood
#[derive(Debug, Clone, Args)]
pub struct SuggestArgs {
    /// Free-text mood or description (e.g. "sunset on the beach")
    #[arg(value_name = "MOOD")]
    pub mood: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Save the suggested base color and harmony as explorer defaults
    #[arg(long)]
    pub apply: bool,
}

#[derive(Debug, Serialize)]
struct SuggestOutput {
    suggestion: Suggestion,
    palette: Palette,
    applied: bool,
}

impl SuggestArgs {
    /// Execute the suggest command
    pub fn execute(&self) -> CliResult<()> {
        let mut config = load_config()?;
        let settings = config.suggestion_config();
        if !settings.is_enabled() {
            return Err(CliError::unavailable(format!(
                "AI suggestions are disabled: no API key found. Set {} or run `{} config set --api-key KEY`",
                config.ai.api_key_env, APP_BINARY_NAME
            )));
        }

        let client = SuggestionClient::new(settings).map_err(map_suggestion_error)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| CliError::io(format!("Failed to start async runtime: {e}")))?;

        let suggestion = runtime
            .block_on(client.suggest(&self.mood))
            .map_err(map_suggestion_error)?;
        debug!("Received suggestion {:?}", suggestion);

        let base = hex_to_hsl(suggestion.base_hex.as_str());
        let palette = build_palette(base, suggestion.harmony);

        if self.apply {
            config.explorer.set_base(base);
            config.explorer.harmony = suggestion.harmony;
            config
                .save()
                .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;
        }

        if self.json {
            print_json(&SuggestOutput {
                suggestion,
                palette,
                applied: self.apply,
            })?;
        } else {
            println!("{}", suggestion.description);
            println!();
            println!(
                "Base {} with {} harmony",
                suggestion.base_hex,
                suggestion.harmony.display_name()
            );
            println!();
            print_swatches(&palette.colors);
            if self.apply {
                println!();
                println!("Saved as explorer defaults.");
            }
        }

        Ok(())
    }
}

fn map_suggestion_error(error: SuggestionError) -> CliError {
    match error {
        SuggestionError::MissingCredential => CliError::unavailable(error.to_string()),
        SuggestionError::EmptyPrompt => CliError::validation(error.to_string()),
        SuggestionError::Network(_)
        | SuggestionError::Api { .. }
        | SuggestionError::MalformedResponse(_) => CliError::io(error.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_mapping() {
        assert_eq!(
            map_suggestion_error(SuggestionError::MissingCredential).exit_code(),
            3
        );
        assert_eq!(map_suggestion_error(SuggestionError::EmptyPrompt).exit_code(), 1);
        assert_eq!(
            map_suggestion_error(SuggestionError::Api {
                status: 429,
                message: "quota".to_string()
            })
            .exit_code(),
            2
        );
        assert_eq!(
            map_suggestion_error(SuggestionError::MalformedResponse("x".to_string())).exit_code(),
            2
        );
    }
}
