//! Background image commands

use std::fmt::Write;

use byt_domain::{BytError, Result, UnsplashImage};

use crate::cli::ImagesAction;
use crate::AppContext;

pub async fn random(ctx: &AppContext) -> Result<String> {
    let image = ctx
        .images
        .random_image()
        .await
        .ok_or_else(|| BytError::NotFound("no image available".into()))?;

    let mut out = describe(&image);
    if let Some(placeholder) = ctx.images.placeholder(&image.id) {
        let _ = writeln!(
            out,
            "placeholder: {} ({}x{})",
            placeholder.blur_hash, placeholder.width, placeholder.height
        );
    }
    Ok(out)
}

pub async fn manage(ctx: &AppContext, action: ImagesAction) -> Result<String> {
    match action {
        ImagesAction::Init => {
            let images = ctx.images.initialize().await?;
            Ok(format!("{} images ready\n", images.len()))
        }
        ImagesAction::List => {
            let images = ctx.images.available_images().await;
            Ok(images.iter().map(describe).collect())
        }
        ImagesAction::Clear => {
            ctx.images.clear().await?;
            Ok("image library cleared\n".to_string())
        }
    }
}

fn describe(image: &UnsplashImage) -> String {
    let mut out = String::new();
    let title = image
        .description
        .as_deref()
        .or(image.alt_description.as_deref())
        .unwrap_or(&image.slug);
    let _ = writeln!(out, "{} ({}x{})", title, image.width, image.height);
    let _ = writeln!(out, "  {}", image.urls.regular);
    if let Some(user) = &image.user {
        let _ = writeln!(out, "  by {}", user.name.as_deref().unwrap_or(&user.username));
    }
    out
}
