//! Application version announcements

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_VERSION, DEFAULT_VERSION_MESSAGE};

/// A published application version and its release note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    pub version: String,
    pub message: String,
    pub date: DateTime<Utc>,
}

impl Version {
    pub fn new(version: impl Into<String>, message: impl Into<String>) -> Self {
        Self { version: version.into(), message: message.into(), date: Utc::now() }
    }
}

impl Default for Version {
    fn default() -> Self {
        Self::new(DEFAULT_VERSION, DEFAULT_VERSION_MESSAGE)
    }
}
