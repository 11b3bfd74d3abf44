//! Downloaded images on disk, named by the blake3 hash of their source URL.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use byt_core::{ImageStore, PrefetchReport};
use byt_domain::{BytError, Result};
use futures::future::join_all;
use tokio::fs;
use tracing::{debug, info, instrument, warn};

use crate::errors::InfraError;
use crate::http::HttpClient;

const IMAGE_EXTENSION: &str = "img";

pub struct FileImageStore {
    root: PathBuf,
    http_client: HttpClient,
}

impl FileImageStore {
    pub fn new(root: impl Into<PathBuf>, http_client: HttpClient) -> Self {
        Self { root: root.into(), http_client }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Location of the file for `key` (whether or not it exists yet).
    pub fn path_for(&self, key: &str) -> PathBuf {
        let digest = blake3::hash(key.as_bytes());
        self.root.join(format!("{}.{IMAGE_EXTENSION}", digest.to_hex()))
    }

    async fn download(&self, url: &str) -> Result<()> {
        let bytes = self.http_client.get_bytes(url).await?;
        let path = self.path_for(url);
        let tmp = path.with_extension("part");
        fs::write(&tmp, &bytes).await.map_err(io_error)?;
        fs::rename(&tmp, &path).await.map_err(io_error)?;
        debug!(%url, len = bytes.len(), "Stored image");
        Ok(())
    }
}

fn io_error(err: std::io::Error) -> BytError {
    InfraError::from(err).into()
}

#[async_trait]
impl ImageStore for FileImageStore {
    async fn contains(&self, key: &str) -> bool {
        fs::try_exists(self.path_for(key)).await.unwrap_or(false)
    }

    #[instrument(skip(self, urls), fields(count = urls.len()))]
    async fn prefetch(&self, urls: &[String]) -> PrefetchReport {
        let mut report = PrefetchReport::default();

        if let Err(err) = fs::create_dir_all(&self.root).await {
            warn!(error = %err, root = %self.root.display(), "Cannot create image directory");
            report.failed = urls.to_vec();
            return report;
        }

        let results = join_all(urls.iter().map(|url| async move {
            if self.contains(url).await {
                return (url, Ok(()));
            }
            (url, self.download(url).await)
        }))
        .await;

        for (url, result) in results {
            match result {
                Ok(()) => report.completed.push(url.clone()),
                Err(err) => {
                    warn!(%url, error = %err, "Image download failed");
                    report.failed.push(url.clone());
                }
            }
        }

        info!(completed = report.completed.len(), failed = report.failed.len(), "Prefetch done");
        report
    }

    #[instrument(skip(self))]
    async fn clear(&self) -> Result<()> {
        match fs::remove_dir_all(&self.root).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(io_error(err)),
        }
    }
}
