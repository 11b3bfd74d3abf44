//! FOAAS API port

use async_trait::async_trait;
use byt_domain::{Foaas, FoaasOperation, Result};

/// Remote FOAAS API.
#[async_trait]
pub trait FoaasApi: Send + Sync {
    /// Every operation the service advertises.
    async fn operations(&self) -> Result<Vec<FoaasOperation>>;

    /// Fetch a rendered message for `path` (e.g. `/bus/Tom/Jerry`).
    async fn message(&self, path: &str) -> Result<Foaas>;
}
