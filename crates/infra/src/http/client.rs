use std::time::Duration;

use byt_domain::{BytError, HttpConfig};
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::errors::InfraError;

/// Upper bound on a single backoff sleep.
const MAX_BACKOFF: Duration = Duration::from_secs(10);

/// Shared outbound client for the FOAAS and Unsplash adapters and image
/// downloads.
///
/// Server errors, rate limiting (429) and transport failures are retried
/// with exponential backoff; everything else is returned to the caller on the
/// first attempt.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
    retry: RetryPolicy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RetryPolicy {
    attempts: usize,
    base_backoff: Duration,
}

impl RetryPolicy {
    /// Delay before retry number `retry` (1-based): base, 2x base, 4x base, ...
    fn delay(&self, retry: usize) -> Duration {
        let exponent = retry.saturating_sub(1).min(16) as u32;
        self.base_backoff.saturating_mul(1 << exponent).min(MAX_BACKOFF)
    }

    fn allows_retry_after(&self, attempt: usize) -> bool {
        attempt < self.attempts
    }
}

/// What to do with the result of one attempt.
enum Attempt {
    Done(Response),
    RetryStatus(StatusCode),
    RetryError(reqwest::Error),
    Fail(reqwest::Error),
}

impl HttpClient {
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    pub fn new() -> Result<Self, BytError> {
        Self::builder().build()
    }

    /// Client configured from the `[http]` section of the application config.
    pub fn from_config(config: &HttpConfig) -> Result<Self, BytError> {
        Self::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .max_attempts(config.max_attempts)
            .base_backoff(Duration::from_millis(config.base_backoff_ms))
            .user_agent(concat!("byt/", env!("CARGO_PKG_VERSION")))
            .build()
    }

    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Send `builder`, retrying transient failures.
    ///
    /// The last response is returned as-is once attempts run out, so callers
    /// still see the final status code.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, BytError> {
        let mut attempt = 0;

        loop {
            attempt += 1;
            let request = builder
                .try_clone()
                .ok_or_else(|| BytError::Internal("streaming request bodies cannot be retried".into()))?
                .build()
                .map_err(into_byt)?;
            let url = request.url().clone();

            let last = !self.retry.allows_retry_after(attempt);
            match self.classify(self.client.execute(request).await, last) {
                Attempt::Done(response) => {
                    debug!(attempt, %url, status = %response.status(), "HTTP response");
                    return Ok(response);
                }
                Attempt::Fail(err) => {
                    warn!(attempt, %url, error = %err, "HTTP request failed");
                    return Err(into_byt(err));
                }
                Attempt::RetryStatus(status) => {
                    debug!(attempt, %url, %status, "Transient HTTP status, retrying");
                }
                Attempt::RetryError(err) => {
                    debug!(attempt, %url, error = %err, "Transient HTTP failure, retrying");
                }
            }

            let delay = self.retry.delay(attempt);
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }
    }

    fn classify(&self, result: reqwest::Result<Response>, last: bool) -> Attempt {
        match result {
            Ok(response) if !last && is_transient_status(response.status()) => {
                Attempt::RetryStatus(response.status())
            }
            Ok(response) => Attempt::Done(response),
            Err(err) if !last && is_transient_error(&err) => Attempt::RetryError(err),
            Err(err) => Attempt::Fail(err),
        }
    }

    /// Send `builder` and decode a successful JSON body.
    ///
    /// Non-2xx responses become [`BytError::Api`] carrying the response body
    /// (or [`BytError::NotFound`] for 404).
    pub async fn get_json<T>(&self, builder: RequestBuilder) -> Result<T, BytError>
    where
        T: DeserializeOwned,
    {
        let response = self.send(builder).await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match status {
                StatusCode::NOT_FOUND => BytError::NotFound(format!("HTTP 404: {body}")),
                _ => BytError::Api { status: status.as_u16(), message: body },
            });
        }

        let bytes = response.bytes().await.map_err(into_byt)?;
        serde_json::from_slice(&bytes).map_err(|err| BytError::from(InfraError::from(err)))
    }

    /// Download the body at `url`, failing on any non-2xx status.
    pub async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, BytError> {
        let response = self.send(self.request(Method::GET, url)).await?;
        let bytes = response.error_for_status().map_err(into_byt)?.bytes().await.map_err(into_byt)?;
        Ok(bytes.to_vec())
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    retry: RetryPolicy,
    user_agent: Option<String>,
    default_headers: Option<reqwest::header::HeaderMap>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        let defaults = HttpConfig::default();
        Self {
            timeout: Duration::from_secs(defaults.timeout_seconds),
            retry: RetryPolicy {
                attempts: defaults.max_attempts,
                base_backoff: Duration::from_millis(defaults.base_backoff_ms),
            },
            user_agent: None,
            default_headers: None,
        }
    }
}

impl HttpClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Total attempts including the first; zero is treated as one.
    pub fn max_attempts(mut self, attempts: usize) -> Self {
        self.retry.attempts = attempts.max(1);
        self
    }

    pub fn base_backoff(mut self, backoff: Duration) -> Self {
        self.retry.base_backoff = backoff;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn default_headers(mut self, headers: reqwest::header::HeaderMap) -> Self {
        self.default_headers = Some(headers);
        self
    }

    pub fn build(self) -> Result<HttpClient, BytError> {
        let mut inner = ReqwestClient::builder().timeout(self.timeout).no_proxy();
        if let Some(agent) = self.user_agent {
            inner = inner.user_agent(agent);
        }
        if let Some(headers) = self.default_headers {
            inner = inner.default_headers(headers);
        }

        let retry = RetryPolicy { attempts: self.retry.attempts.max(1), ..self.retry };
        Ok(HttpClient { client: inner.build().map_err(into_byt)?, retry })
    }
}

fn is_transient_status(status: StatusCode) -> bool {
    status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS
}

fn is_transient_error(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect() || err.is_request()
}

fn into_byt(err: reqwest::Error) -> BytError {
    InfraError::from(err).into()
}
