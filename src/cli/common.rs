//! Shared CLI plumbing: error kinds, exit codes, and argument helpers.

use std::fmt;

use crossterm::style::{Color, Stylize};
use crossterm::tty::IsTty;

use crate::config::Config;
use crate::models::{ColorDefinition, HarmonyRule, Hsl};

/// Process exit codes used by every command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command succeeded
    Success = 0,
    /// Invalid input or arguments
    ValidationError = 1,
    /// File system or network failure
    IoError = 2,
    /// Requested feature is not available (AI disabled)
    Unavailable = 3,
}

impl ExitCode {
    /// Numeric code passed to `std::process::exit`.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Error returned by command handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    /// Exit code to terminate with
    pub kind: ExitCode,
    /// Message printed to stderr
    pub message: String,
}

impl CliError {
    /// Invalid user input (exit code 1).
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: ExitCode::ValidationError,
            message: message.into(),
        }
    }

    /// I/O or network failure (exit code 2).
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            kind: ExitCode::IoError,
            message: message.into(),
        }
    }

    /// Feature unavailable (exit code 3).
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: ExitCode::Unavailable,
            message: message.into(),
        }
    }

    /// Exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        self.kind.code()
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for command handlers.
pub type CliResult<T> = Result<T, CliError>;

/// Resolves the base color from `--hsl` / `--hex`, falling back to `default`.
///
/// Both inputs are parsed strictly.
pub fn resolve_base(hsl: Option<&str>, hex: Option<&str>, default: Hsl) -> CliResult<Hsl> {
    match (hsl, hex) {
        (Some(_), Some(_)) => Err(CliError::validation(
            "Specify either --hsl or --hex, not both",
        )),
        (Some(text), None) => text
            .parse::<Hsl>()
            .map_err(|e| CliError::validation(format!("{e:#}"))),
        (None, Some(text)) => {
            Hsl::parse_hex(text).map_err(|e| CliError::validation(format!("{e:#}")))
        }
        (None, None) => Ok(default),
    }
}

/// Parses a harmony rule id strictly.
pub fn parse_harmony(name: &str) -> CliResult<HarmonyRule> {
    name.parse::<HarmonyRule>()
        .map_err(|e| CliError::validation(format!("{e:#}")))
}

/// Loads the configuration, reporting failures as validation errors.
pub fn load_config() -> CliResult<Config> {
    Config::load()
        .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))
}

/// Prints one line per color: a true-color swatch (when stdout is a
/// terminal), the hex value, and the HSL values.
pub fn print_swatches(colors: &[ColorDefinition]) {
    let colored = std::io::stdout().is_tty();
    for (index, color) in colors.iter().enumerate() {
        let rgb = color.hex.to_rgb();
        if colored {
            let label_color = if rgb.is_dark() { Color::White } else { Color::Black };
            let swatch = format!(" {} ", color.hex)
                .with(label_color)
                .on(rgb.to_terminal_color());
            println!("{:>2}. {}  {}", index + 1, swatch, color.hsl);
        } else {
            println!("{:>2}. {}  {}", index + 1, color.hex, color.hsl);
        }
    }
}

/// Prints `value` as pretty JSON.
pub fn print_json<T: serde::Serialize>(value: &T) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
    println!("{json}");
    Ok(())
}
