//! CLI entry point - the composition root.

use std::time::Duration;

use clap::{CommandFactory, Parser};
use mindbridge_cli::{Cli, CliConfig, Commands, bootstrap, handlers, init_tracing};
use mindbridge_proxy::{CorsConfig, ProxyConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before parsing so env fallbacks see it
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = CliConfig::from_env(Duration::from_secs(cli.upstream_timeout));
    let ctx = bootstrap(&config)?;

    match command {
        Commands::Serve {
            host,
            port,
            api_key,
            cors_origins,
        } => {
            let mut proxy = ProxyConfig::default()
                .with_address(host, port)
                .with_cors(CorsConfig::from_list(&cors_origins));
            if let Some(key) = api_key {
                proxy = proxy.with_api_key(key);
            }
            handlers::serve::execute(&ctx, proxy).await?;
        }
        Commands::Models => handlers::models::execute(&ctx)?,
    }

    Ok(())
}
