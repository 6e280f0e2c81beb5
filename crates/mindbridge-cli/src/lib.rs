//! Command-line entry point for the mindbridge router.
//!
//! `mindbridge serve` runs the HTTP gateway; `mindbridge models` prints the
//! routable model identifiers for the configured providers. Provider
//! credentials come from the environment (optionally a `.env` file).

#![deny(unused_crate_dependencies)]

// Used by the binary target only
use dotenvy as _;

pub mod bootstrap;
pub mod commands;
pub mod handlers;
pub mod parser;

// Re-export primary types for convenient access
pub use bootstrap::{CliConfig, CliContext, bootstrap, init_tracing};
pub use commands::Commands;
pub use parser::Cli;
