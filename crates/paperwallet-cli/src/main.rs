//! Paper wallet CLI.
//!
//! Creates wallet files for Bitcoin, Ethereum and IOTA, and verifies
//! existing ones by restoring them and re-deriving their address.

mod commands;
mod output;
mod settings;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

/// Offline paper wallets for Bitcoin, Ethereum and IOTA.
#[derive(Parser)]
#[command(name = "paperwallet", version, about)]
struct Cli {
    /// Output in JSON format (no colors, machine-readable).
    #[arg(long, global = true)]
    json: bool,

    /// Load settings from a JSON config file.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    silent: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new wallet file.
    Create(commands::create::CreateArgs),
    /// Restore a wallet file and check its address.
    Verify(commands::verify::VerifyArgs),
}

// ---------------------------------------------------------------------------
// Global options passed to every command handler
// ---------------------------------------------------------------------------

/// Shared options threaded into command handlers.
pub struct GlobalOpts {
    pub json: bool,
    pub silent: bool,
    pub config: paperwallet_types::config::AppConfig,
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli.json, cli.silent, cli.config.as_deref(), cli.command) {
        output::print_error(&e, cli.json);
        std::process::exit(1);
    }
}

fn run(
    json: bool,
    silent: bool,
    config_path: Option<&std::path::Path>,
    cmd: Commands,
) -> std::result::Result<(), String> {
    let config = settings::load(config_path).map_err(|e| e.to_string())?;
    let opts = GlobalOpts {
        json,
        silent,
        config,
    };

    match cmd {
        Commands::Create(args) => commands::create::run(args, &opts),
        Commands::Verify(args) => commands::verify::run(args, &opts),
    }
}
