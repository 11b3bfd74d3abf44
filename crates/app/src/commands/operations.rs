//! FOAAS operation commands

use std::fmt::Write;

use byt_domain::{BytError, Result};

use crate::AppContext;

pub async fn list(ctx: &AppContext, refresh: bool) -> Result<String> {
    if refresh {
        ctx.operations.delete_stored().await?;
    }

    let ops = ctx.operations.operations().await;
    if ops.is_empty() {
        return Err(BytError::Network("no operations available; check connectivity".into()));
    }

    let mut out = String::new();
    for op in &ops {
        let fields: Vec<&str> = op.fields.iter().map(|f| f.key()).collect();
        let _ = writeln!(out, "{:<24} {:<40} [{}]", op.display_name(), op.url, fields.join(", "));
    }
    Ok(out)
}

pub async fn compose(
    ctx: &AppContext,
    operation: &str,
    fields: &[(String, String)],
    dry_run: bool,
) -> Result<String> {
    let mut builder = ctx.operations.builder_for(operation).await?;

    for (token, value) in fields {
        if builder.index_of(token).is_none() {
            return Err(BytError::InvalidInput(format!(
                "'{operation}' has no field '{token}' (expected one of: {})",
                builder.tokens().join(", ")
            )));
        }
        builder.update(token, value);
    }

    if dry_run {
        return Ok(builder.build());
    }

    let message = ctx.operations.message(&builder).await?;
    Ok(message.to_string())
}

pub async fn motd(ctx: &AppContext) -> Result<String> {
    Ok(ctx.operations.message_of_the_day().await?.to_string())
}
