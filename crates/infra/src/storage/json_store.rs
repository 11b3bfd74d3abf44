//! Key-value store backed by one JSON file per key.
//!
//! Writes go to a temporary sibling first and are renamed into place, so a
//! crash mid-write never leaves a truncated blob behind.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use byt_core::KeyValueStore;
use byt_domain::{BytError, Result};
use tokio::fs;
use tracing::{debug, instrument};

use crate::errors::InfraError;

/// One `<key>.json` file per key under a root directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Store rooted at `root`; the directory is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File backing `key`.
    ///
    /// Keys made only of `[A-Za-z0-9._-]` are used as-is. Any other key keeps
    /// a sanitised prefix for readability and gains `~` plus the blake3 hash
    /// of the full key. `~` never appears in a plain key, so distinct keys
    /// always map to distinct files.
    fn path_for(&self, key: &str) -> PathBuf {
        if key.chars().all(is_plain) {
            return self.root.join(format!("{key}.json"));
        }
        let prefix: String = key.chars().map(|c| if is_plain(c) { c } else { '_' }).collect();
        let digest = blake3::hash(key.as_bytes());
        self.root.join(format!("{prefix}~{}.json", digest.to_hex()))
    }
}

fn is_plain(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')
}

fn io_error(err: std::io::Error) -> BytError {
    InfraError::from(err).into()
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    #[instrument(skip(self))]
    async fn load(&self, key: &str) -> Result<Option<Vec<u8>>> {
        match fs::read(self.path_for(key)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(io_error(err)),
        }
    }

    #[instrument(skip(self, bytes), fields(len = bytes.len()))]
    async fn save(&self, key: &str, bytes: Vec<u8>) -> Result<()> {
        fs::create_dir_all(&self.root).await.map_err(io_error)?;

        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, &bytes).await.map_err(io_error)?;
        fs::rename(&tmp, &path).await.map_err(io_error)?;
        debug!(path = %path.display(), "Saved blob");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(io_error(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use byt_core::StoreExt;
    use tempfile::TempDir;

    use super::*;

    #[tokio::test]
    async fn missing_key_loads_as_none() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());

        assert_eq!(store.load("com.byt.ops").await.unwrap(), None);
    }

    #[tokio::test]
    async fn save_creates_directory_and_overwrites() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested/store"));

        store.save("com.byt.ops", b"[1]".to_vec()).await.unwrap();
        store.save("com.byt.ops", b"[2]".to_vec()).await.unwrap();

        assert_eq!(store.load("com.byt.ops").await.unwrap(), Some(b"[2]".to_vec()));
        assert!(store.root().join("com.byt.ops.json").exists());
        assert!(!store.root().join("com.byt.ops.json.tmp").exists());
    }

    #[tokio::test]
    async fn remove_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());
        store.save("k", b"1".to_vec()).await.unwrap();

        store.remove("k").await.unwrap();
        store.remove("k").await.unwrap();

        assert_eq!(store.load("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn unsafe_key_characters_stay_inside_root() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());

        store.save("../escape/key", b"{}".to_vec()).await.unwrap();

        let names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names.len(), 1);
        assert!(names[0].starts_with(".._escape_key~"));
        assert_eq!(store.load("../escape/key").await.unwrap(), Some(b"{}".to_vec()));
    }

    #[tokio::test]
    async fn keys_differing_only_in_unsafe_characters_are_kept_apart() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());

        store.save("a/b", b"1".to_vec()).await.unwrap();
        store.save("a_b", b"2".to_vec()).await.unwrap();
        store.save("a b", b"3".to_vec()).await.unwrap();

        assert_eq!(store.load("a/b").await.unwrap(), Some(b"1".to_vec()));
        assert_eq!(store.load("a_b").await.unwrap(), Some(b"2".to_vec()));
        assert_eq!(store.load("a b").await.unwrap(), Some(b"3".to_vec()));

        store.remove("a/b").await.unwrap();
        assert_eq!(store.load("a/b").await.unwrap(), None);
        assert_eq!(store.load("a_b").await.unwrap(), Some(b"2".to_vec()));
    }

    #[tokio::test]
    async fn json_helpers_round_trip_domain_values() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());
        let version = byt_domain::Version::new("2.0.0", "new things");

        store.save_json("com.byt.version.key", &version).await.unwrap();
        let loaded: Option<byt_domain::Version> =
            store.load_json("com.byt.version.key").await.unwrap();

        assert_eq!(loaded, Some(version));
    }
}
