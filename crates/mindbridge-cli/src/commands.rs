//! CLI command definitions.

use clap::Subcommand;
use mindbridge_proxy::{DEFAULT_HOST, DEFAULT_PORT};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the OpenAI-compatible HTTP gateway
    Serve {
        /// Host to bind to
        #[arg(long, env = "HOST", default_value = DEFAULT_HOST)]
        host: String,
        /// Port to bind to
        #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
        port: u16,
        /// Bearer secret clients must present
        #[arg(long, env = "MINDBRIDGE_API_KEY", hide_env_values = true)]
        api_key: Option<String>,
        /// Comma-separated allowed origins (`*` allows all)
        #[arg(long, env = "CORS_ORIGINS", default_value = "*")]
        cors_origins: String,
    },

    /// List every routable model identifier
    Models,
}
