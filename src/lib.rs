//! Gambit - chess where captures earn points and points buy upgrades.
//!
//! This crate is the front end around [`gambit_engine`]: configuration,
//! logging setup and a line-oriented text console.
//!
//! # Example
//!
//! ```
//! use gambit::{Console, ConsoleCommand, Step};
//! use gambit_engine::RuleSet;
//!
//! let mut console = Console::new(RuleSet::default());
//! let step = console.execute("start".parse::<ConsoleCommand>().unwrap());
//! assert_eq!(step, Step::Continue("Game started. White to move.".to_string()));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod console;

// Crate-level exports - Configuration
pub use config::{ConfigError, GambitConfig, LogConfig};

// Crate-level exports - Console
pub use console::{
    Console, ConsoleCommand, ParseCommandError, Step, render_board, render_pieces, render_shop,
};
