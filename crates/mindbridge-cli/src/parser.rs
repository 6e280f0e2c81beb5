//! Main CLI parser and top-level argument handling.

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface for the mindbridge router.
#[derive(Parser)]
#[command(name = "mindbridge")]
#[command(about = "OpenAI-compatible router for OpenAI, Anthropic and Google Gemini models")]
#[command(version)]
pub struct Cli {
    /// Upstream call timeout in seconds
    #[arg(
        long,
        env = "MINDBRIDGE_UPSTREAM_TIMEOUT_SECS",
        default_value_t = 120,
        global = true
    )]
    pub upstream_timeout: u64,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
