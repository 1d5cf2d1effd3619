//! Command-line interface for sales-forge.
//!
//! Provides the `generate` and `clean` commands.

mod commands;

pub use commands::{parse_cli, run, run_with_cli, Cli, Commands};
