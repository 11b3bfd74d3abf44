//! Unsplash photo metadata
//!
//! Field names follow the Unsplash wire format (snake_case), so the same
//! structs decode API responses and round-trip through local storage.

use serde::{Deserialize, Serialize};
use url::Url;

/// A photo returned by `GET /photos/random`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnsplashImage {
    pub id: String,
    pub slug: String,
    pub blur_hash: String,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub alt_description: Option<String>,
    pub urls: UrlBundle,
    pub links: LinksBundle,
    #[serde(default)]
    pub user: Option<User>,
}

impl UnsplashImage {
    /// Key under which the downloaded `regular` rendition is cached.
    pub fn image_cache_key(&self) -> &str {
        self.urls.regular.as_str()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlBundle {
    pub full: Url,
    pub regular: Url,
    pub small: Url,
    pub thumb: Url,
}

/// Unsplash guidelines ask clients to hit `download_location` when a photo is
/// actually used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinksBundle {
    pub download_location: Url,
}

/// Photographer credited for a photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    pub links: UserLinks,
    pub profile_image: ProfileImageLinks,
    pub social: SocialLinks,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserLinks {
    #[serde(rename = "html", default)]
    pub profile: Option<Url>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileImageLinks {
    #[serde(default)]
    pub small: Option<Url>,
    #[serde(default)]
    pub medium: Option<Url>,
    #[serde(default)]
    pub large: Option<Url>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLinks {
    #[serde(default)]
    pub instagram_username: Option<String>,
    #[serde(default)]
    pub portfolio_url: Option<String>,
    #[serde(default)]
    pub twitter_username: Option<String>,
}

/// Render size requested from Unsplash's dynamic resizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
    pub scale: u8,
}

impl ImageSize {
    pub fn new(width: u32, height: u32, scale: u8) -> Self {
        Self { width, height, scale: scale.max(1) }
    }
}

impl Default for ImageSize {
    /// Portrait phone-sized canvas at 3x.
    fn default() -> Self {
        Self::new(393, 852, 3)
    }
}
