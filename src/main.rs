//! Gambit - command-line front end.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use gambit::{Console, GambitConfig, render_shop};
use std::io::BufReader;
use std::path::PathBuf;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play { config, script } => run_play(config, script),
        Command::Shop => {
            init_tracing("warn");
            println!("{}", render_shop());
            Ok(())
        }
    }
}

/// Installs the stderr subscriber. `RUST_LOG` wins over the fallback.
fn init_tracing(fallback: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Runs the text console on stdin or a script file.
#[instrument(skip_all)]
fn run_play(config_path: PathBuf, script: Option<PathBuf>) -> Result<()> {
    let config = GambitConfig::load_or_default(&config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;
    init_tracing(config.log().filter());

    info!(rules = ?config.rules(), "Starting console session");
    let mut console = Console::new(*config.rules());
    let stdout = std::io::stdout();

    match script {
        Some(path) => {
            let file = std::fs::File::open(&path)
                .with_context(|| format!("Failed to open script {}", path.display()))?;
            console.run(BufReader::new(file), stdout.lock())?;
        }
        None => {
            println!("Gambit: type `help` for commands, `start` when setup is done.");
            console.run(std::io::stdin().lock(), stdout.lock())?;
        }
    }

    info!(status = %console.game().state().status(), "Console session ended");
    Ok(())
}
