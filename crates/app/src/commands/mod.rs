//! Command handlers
//!
//! Each handler runs one service call and renders the result as text. The
//! binary prints whatever comes back.

pub mod images;
pub mod operations;
pub mod version;

use std::future::Future;
use std::time::Instant;

use byt_domain::Result;

use crate::cli::Commands;
use crate::utils::logging::log_command_execution;
use crate::AppContext;

/// Run the handler for `command`.
pub async fn dispatch(ctx: &AppContext, command: &Commands) -> Result<String> {
    match command {
        Commands::Operations { refresh } => {
            timed("operations::list", operations::list(ctx, *refresh)).await
        }
        Commands::Compose { operation, fields, dry_run } => {
            timed("operations::compose", operations::compose(ctx, operation, fields, *dry_run))
                .await
        }
        Commands::Motd => timed("operations::motd", operations::motd(ctx)).await,
        Commands::Image => timed("images::random", images::random(ctx)).await,
        Commands::Images { action } => timed("images::manage", images::manage(ctx, *action)).await,
        Commands::Version { set, message } => {
            timed("version::show_or_set", version::run(ctx, set.as_deref(), message.as_deref()))
                .await
        }
    }
}

async fn timed<F>(command: &str, fut: F) -> Result<String>
where
    F: Future<Output = Result<String>>,
{
    let start = Instant::now();
    let result = fut.await;
    log_command_execution(command, start.elapsed(), result.as_ref().err());
    result
}
