//! mobportals: render and inspect interactive-mob message catalogs.
//!
//! # Usage
//!
//! ```text
//! mobportals render <template> [args...] [--show-codes]
//! mobportals check [--catalog <file>] [--json]
//! mobportals show <key> [args...] [--catalog <file>] [--show-codes]
//! mobportals init
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{check::CheckArgs, init::InitArgs, render::RenderArgs, show::ShowArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "mobportals",
    version,
    about = "Render and check mob portal message templates",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compile and render a single template with positional arguments.
    Render(RenderArgs),

    /// Compile every message of a catalog and list its tokens.
    Check(CheckArgs),

    /// Render one catalog message by key.
    Show(ShowArgs),

    /// Write the default catalog to ~/.mobportals/messages.yaml.
    Init(InitArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Commands::Render(args) => args.run(),
        Commands::Check(args) => args.run(),
        Commands::Show(args) => args.run(),
        Commands::Init(args) => args.run(),
    }
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
