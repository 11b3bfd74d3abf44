//! Tracks the last announced application version and notifies subscribers
//! when it changes.

use std::sync::Arc;

use byt_domain::constants::VERSION_KEY;
use byt_domain::{Result, Version};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::ports::{KeyValueStore, StoreExt};

const EVENT_CHANNEL_CAPACITY: usize = 16;

/// Published when a stored version is replaced by a different one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionEvent {
    Updated { previous: Version, current: Version },
}

pub struct VersionTracker {
    store: Arc<dyn KeyValueStore>,
    events: broadcast::Sender<VersionEvent>,
}

impl VersionTracker {
    /// Tracker persisting the version in `store`.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self { store, events }
    }

    /// Receive a [`VersionEvent`] for each version change from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<VersionEvent> {
        self.events.subscribe()
    }

    /// Last saved version, or the built-in default when none was saved or the
    /// stored value is unreadable.
    pub async fn current(&self) -> Version {
        match self.load().await {
            Ok(Some(version)) => version,
            Ok(None) => Version::default(),
            Err(err) => {
                warn!(error = %err, "Stored version unreadable, using default");
                Version::default()
            }
        }
    }

    /// Record `version`. Returns `true` when it replaced a different version.
    ///
    /// The first version ever saved is stored silently.
    pub async fn update(&self, version: Version) -> Result<bool> {
        let Some(previous) = self.load().await? else {
            debug!(version = %version.version, "Saving first version");
            self.save(&version).await?;
            return Ok(false);
        };

        self.save(&version).await?;
        if previous.version == version.version {
            return Ok(false);
        }

        info!(from = %previous.version, to = %version.version, "Version changed");
        // No receivers is fine; the event is informational.
        let _ = self.events.send(VersionEvent::Updated { previous, current: version });
        Ok(true)
    }

    pub async fn load(&self) -> Result<Option<Version>> {
        self.store.load_json(VERSION_KEY).await
    }

    pub async fn save(&self, version: &Version) -> Result<()> {
        self.store.save_json(VERSION_KEY, version).await
    }
}
