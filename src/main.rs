//! ChromaEuclid - Geometric color palette explorer
//!
//! Command-line front end: list harmony rules, generate palettes, convert
//! colors, subdivide and render the canvas, and ask the AI for suggestions.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chromaeuclid::cli::{
    CanvasArgs, CliResult, ConfigArgs, ConvertArgs, HarmoniesArgs, PaletteArgs, SuggestArgs,
    TilesArgs,
};

/// ChromaEuclid - Geometric color palette explorer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging (to stderr)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List harmony rules
    Harmonies(HarmoniesArgs),
    /// Generate a palette from a base color
    Palette(PaletteArgs),
    /// Convert between hex and HSL
    Convert(ConvertArgs),
    /// Subdivide the canvas into tiles
    Tiles(TilesArgs),
    /// Render the tiled canvas as SVG
    Canvas(CanvasArgs),
    /// Ask the AI for a palette matching a mood
    Suggest(SuggestArgs),
    /// Manage configuration
    Config(ConfigArgs),
}

impl Commands {
    fn execute(&self) -> CliResult<()> {
        match self {
            Self::Harmonies(args) => args.execute(),
            Self::Palette(args) => args.execute(),
            Self::Convert(args) => args.execute(),
            Self::Tiles(args) => args.execute(),
            Self::Canvas(args) => args.execute(),
            Self::Suggest(args) => args.execute(),
            Self::Config(args) => args.execute(),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays machine-readable
    let filter = if cli.verbose { "debug" } else { "error" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = cli.command.execute() {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
}
