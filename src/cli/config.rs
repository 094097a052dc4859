//! Configuration management CLI commands.

use crate::cli::common::{load_config, parse_harmony, print_json, CliError, CliResult};
use crate::config::Config;
use crate::constants::{APP_NAME, MAX_DEPTH};
use crate::models::Hsl;
use clap::{Args, Subcommand};
use serde::Serialize;

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set configuration values
    Set(ConfigSetArgs),
    /// Print the config file path
    Path,
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set configuration values
#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    /// API key for AI suggestions (empty string clears it)
    #[arg(long, value_name = "KEY")]
    api_key: Option<String>,

    /// AI model name
    #[arg(long, value_name = "MODEL")]
    model: Option<String>,

    /// Default harmony rule id
    #[arg(long, value_name = "RULE")]
    harmony: Option<String>,

    /// Default base color as hex
    #[arg(long, value_name = "HEX")]
    base: Option<String>,

    /// Default subdivision depth (1-12)
    #[arg(long, value_name = "N")]
    depth: Option<u32>,

    /// Web server port
    #[arg(long, value_name = "PORT")]
    port: Option<u16>,
}

/// JSON-serializable configuration for output; the API key itself is never printed
#[derive(Serialize, Debug)]
struct ConfigOutput {
    ai: AiOutput,
    explorer: ExplorerOutput,
    server: ServerOutput,
}

#[derive(Serialize, Debug)]
struct AiOutput {
    enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    key_source: Option<String>,
    api_key_env: String,
    model: String,
    endpoint: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    timeout_secs: Option<u64>,
}

#[derive(Serialize, Debug)]
struct ExplorerOutput {
    base: Hsl,
    base_hex: String,
    harmony: String,
    depth: u32,
}

#[derive(Serialize, Debug)]
struct ServerOutput {
    host: String,
    port: u16,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Set(args) => args.execute(),
            ConfigCommand::Path => {
                let path = Config::config_file_path()
                    .map_err(|e| CliError::io(format!("{e:#}")))?;
                println!("{}", path.display());
                Ok(())
            }
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config()?;
        let output = build_output(&config);

        if self.json {
            print_json(&output)?;
        } else {
            output_human_readable(&output);
        }

        Ok(())
    }
}

impl ConfigSetArgs {
    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        if self.api_key.is_none()
            && self.model.is_none()
            && self.harmony.is_none()
            && self.base.is_none()
            && self.depth.is_none()
            && self.port.is_none()
        {
            return Err(CliError::validation(
                "At least one configuration option must be specified: --api-key, --model, --harmony, --base, --depth, or --port",
            ));
        }

        let mut config = load_config()?;

        if let Some(key) = &self.api_key {
            let key = key.trim();
            config.ai.api_key = (!key.is_empty()).then(|| key.to_string());
        }

        if let Some(model) = &self.model {
            if model.trim().is_empty() {
                return Err(CliError::validation("Model must not be empty"));
            }
            config.ai.model = model.trim().to_string();
        }

        if let Some(name) = &self.harmony {
            config.explorer.harmony = parse_harmony(name)?;
        }

        if let Some(hex) = &self.base {
            let base = Hsl::parse_hex(hex).map_err(|e| CliError::validation(format!("{e:#}")))?;
            config.explorer.set_base(base);
        }

        if let Some(depth) = self.depth {
            if depth == 0 || depth > MAX_DEPTH {
                return Err(CliError::validation(format!(
                    "Depth {depth} out of range (1-{MAX_DEPTH})"
                )));
            }
            config.explorer.depth = depth;
        }

        if let Some(port) = self.port {
            if port == 0 {
                return Err(CliError::validation("Port must not be 0"));
            }
            config.server.port = port;
        }

        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Configuration updated successfully.");

        Ok(())
    }
}

fn build_output(config: &Config) -> ConfigOutput {
    let key_source = if config.ai.api_key.as_deref().is_some_and(|k| !k.trim().is_empty()) {
        Some("config".to_string())
    } else if config.resolve_api_key().is_some() {
        Some(format!("env:{}", config.ai.api_key_env))
    } else {
        None
    };
    let base = config.explorer.base();

    ConfigOutput {
        ai: AiOutput {
            enabled: key_source.is_some(),
            key_source,
            api_key_env: config.ai.api_key_env.clone(),
            model: config.ai.model.clone(),
            endpoint: config.ai.endpoint.clone(),
            timeout_secs: config.ai.timeout_secs,
        },
        explorer: ExplorerOutput {
            base,
            base_hex: base.to_hex().to_string(),
            harmony: config.explorer.harmony.id().to_string(),
            depth: config.explorer.depth,
        },
        server: ServerOutput {
            host: config.server.host.clone(),
            port: config.server.port,
        },
    }
}

/// Output configuration in human-readable format
fn output_human_readable(output: &ConfigOutput) {
    println!("{APP_NAME} Configuration");
    println!("=========================");
    println!();

    println!("AI:");
    match &output.ai.key_source {
        Some(source) => println!("  API Key: set ({source})"),
        None => println!("  API Key: (not configured, set {})", output.ai.api_key_env),
    }
    println!("  Model: {}", output.ai.model);
    println!("  Endpoint: {}", output.ai.endpoint);
    if let Some(timeout) = output.ai.timeout_secs {
        println!("  Timeout: {timeout}s");
    }
    println!();

    println!("Explorer:");
    println!("  Base Color: {} ({})", output.explorer.base_hex, output.explorer.base);
    println!("  Harmony: {}", output.explorer.harmony);
    println!("  Depth: {}", output.explorer.depth);
    println!();

    println!("Server:");
    println!("  Address: {}:{}", output.server.host, output.server.port);
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_hides_api_key() {
        let mut config = Config::new();
        config.ai.api_key = Some("super-secret".to_string());
        let output = build_output(&config);
        let json = serde_json::to_string(&output).unwrap();
        assert!(!json.contains("super-secret"));
        assert!(output.ai.enabled);
        assert_eq!(output.ai.key_source.as_deref(), Some("config"));
    }

    #[test]
    fn test_output_explorer_defaults() {
        let mut config = Config::new();
        config.ai.api_key_env = "CHROMAEUCLID_TEST_UNSET_KEY_VAR".to_string();
        let output = build_output(&config);
        assert!(!output.ai.enabled);
        assert_eq!(output.explorer.base_hex, "#2680d9");
        assert_eq!(output.explorer.harmony, "complementary");
    }
}
