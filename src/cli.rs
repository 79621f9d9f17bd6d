//! Command-line interface for gambit.

use clap::{Parser, Subcommand};

/// Gambit - chess where captures earn points and points buy upgrades
#[derive(Parser, Debug)]
#[command(name = "gambit")]
#[command(about = "Chess with a points economy and upgradeable pieces", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a local two-player game in the text console
    Play {
        /// Path to the TOML config (defaults apply if the file is missing)
        #[arg(short, long, default_value = "gambit.toml")]
        config: std::path::PathBuf,

        /// Read commands from this file instead of stdin
        #[arg(long)]
        script: Option<std::path::PathBuf>,
    },

    /// Print the upgrade catalog
    Shop,
}
