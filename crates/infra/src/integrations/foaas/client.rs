/// FOAAS HTTP client
use async_trait::async_trait;
use byt_core::FoaasApi;
use byt_domain::constants::{FOAAS_OPERATIONS_PATH, PLATFORM_TYPE};
use byt_domain::{Foaas, FoaasOperation, Result};
use reqwest::header::ACCEPT;
use reqwest::{Method, RequestBuilder};
use tracing::{debug, instrument};

use crate::http::HttpClient;

const PLATFORM_TYPE_HEADER: &str = "Platform-Type";

pub struct FoaasClient {
    http_client: HttpClient,
    base_url: String,
}

impl FoaasClient {
    pub fn new(http_client: HttpClient, base_url: impl Into<String>) -> Self {
        Self { http_client, base_url: base_url.into().trim_end_matches('/').to_string() }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get(&self, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        self.http_client
            .request(Method::GET, url)
            .header(ACCEPT, "application/json")
            .header(PLATFORM_TYPE_HEADER, PLATFORM_TYPE)
    }
}

#[async_trait]
impl FoaasApi for FoaasClient {
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn operations(&self) -> Result<Vec<FoaasOperation>> {
        let ops: Vec<FoaasOperation> =
            self.http_client.get_json(self.get(FOAAS_OPERATIONS_PATH)).await?;
        debug!(count = ops.len(), "Received FOAAS operations");
        Ok(ops)
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn message(&self, path: &str) -> Result<Foaas> {
        self.http_client.get_json(self.get(path)).await
    }
}
