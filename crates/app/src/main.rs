//! BYT - FOAAS messages from the command line
//!
//! Main entry point for the `byt` binary.

use anyhow::Context;
use byt_app::utils::logging::init_tracing;
use byt_app::{commands, AppContext, Cli};
use byt_infra::config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (cli, dotenv) = Cli::parse_with_dotenv(None, std::env::args_os());
    init_tracing(cli.log_level, cli.log_format);
    match dotenv {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env"),
        Err(err) => tracing::debug!(error = %err, "No .env loaded"),
    }

    let config = match &cli.config {
        Some(path) => config::load_from_file(Some(path.clone()))
            .and_then(config::apply_env_overrides)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => config::load().context("loading config")?,
    };

    let ctx = AppContext::new(config).context("building application context")?;
    let output = commands::dispatch(&ctx, &cli.command).await?;
    println!("{}", output.trim_end());

    Ok(())
}
