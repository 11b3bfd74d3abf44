/// Unsplash HTTP client for random photos
use async_trait::async_trait;
use byt_core::PhotoApi;
use byt_domain::constants::{MAX_RANDOM_IMAGES, UNSPLASH_API_VERSION, UNSPLASH_RANDOM_PHOTO_PATH};
use byt_domain::{BytError, ImageSize, Result, UnsplashConfig, UnsplashImage};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::Method;
use tracing::{debug, instrument, warn};

use crate::http::HttpClient;

const ACCEPT_VERSION_HEADER: &str = "Accept-Version";

pub struct UnsplashClient {
    http_client: HttpClient,
    base_url: String,
    access_key: Option<String>,
    topic: String,
    orientation: String,
}

impl UnsplashClient {
    pub fn new(http_client: HttpClient, config: &UnsplashConfig) -> Self {
        Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            access_key: config.access_key.clone(),
            topic: config.topic.clone(),
            orientation: config.orientation.clone(),
        }
    }

    /// Query parameters shared by single and batch requests.
    fn query(&self, size: ImageSize) -> Vec<(&'static str, String)> {
        vec![
            ("orientation", self.orientation.clone()),
            ("topics", self.topic.clone()),
            ("w", size.width.to_string()),
            ("h", size.height.to_string()),
            ("dpr", size.scale.to_string()),
        ]
    }

    async fn fetch<T>(&self, query: &[(&'static str, String)]) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let access_key = self.access_key.as_deref().ok_or_else(|| {
            BytError::Config(
                "Unsplash access key is not configured (set BYT_UNSPLASH_ACCESS_KEY)".into(),
            )
        })?;

        let url = format!("{}{}", self.base_url, UNSPLASH_RANDOM_PHOTO_PATH);
        let request = self
            .http_client
            .request(Method::GET, url)
            .query(query)
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, format!("Client-ID {access_key}"))
            .header(ACCEPT_VERSION_HEADER, UNSPLASH_API_VERSION);

        self.http_client.get_json(request).await
    }
}

#[async_trait]
impl PhotoApi for UnsplashClient {
    #[instrument(skip(self))]
    async fn random_image(&self, size: ImageSize) -> Result<UnsplashImage> {
        self.fetch(&self.query(size)).await
    }

    #[instrument(skip(self))]
    async fn random_images(&self, size: ImageSize, count: usize) -> Result<Vec<UnsplashImage>> {
        if count == 0 {
            return Ok(Vec::new());
        }

        let count = if count > MAX_RANDOM_IMAGES {
            warn!(requested = count, max = MAX_RANDOM_IMAGES, "Clamping random image count");
            MAX_RANDOM_IMAGES
        } else {
            count
        };

        let mut query = self.query(size);
        query.push(("count", count.to_string()));
        let images: Vec<UnsplashImage> = self.fetch(&query).await?;
        debug!(count = images.len(), "Received Unsplash images");
        Ok(images)
    }
}
