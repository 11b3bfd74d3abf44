//! Version command

use byt_domain::constants::DEFAULT_VERSION_MESSAGE;
use byt_domain::{Result, Version};

use crate::AppContext;

pub async fn run(ctx: &AppContext, set: Option<&str>, message: Option<&str>) -> Result<String> {
    let Some(version) = set else {
        let current = ctx.version.current().await;
        return Ok(format!(
            "{} - {} ({})\n",
            current.version,
            current.message,
            current.date.format("%Y-%m-%d")
        ));
    };

    let changed = ctx
        .version
        .update(Version::new(version, message.unwrap_or(DEFAULT_VERSION_MESSAGE)))
        .await?;

    Ok(if changed {
        format!("updated to {version}\n")
    } else {
        format!("recorded {version}\n")
    })
}
