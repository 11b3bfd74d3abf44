/// FOAAS integration
///
/// `FoaasClient` implements the core `FoaasApi` port over HTTP. Requests go
/// through [`crate::http::HttpClient`], so transient failures and 5xx
/// responses are retried with backoff.
///
/// # Usage
///
/// ```no_run
/// use byt_core::FoaasApi;
/// use byt_infra::http::HttpClient;
/// use byt_infra::integrations::foaas::FoaasClient;
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = FoaasClient::new(HttpClient::new()?, "https://foaas.onrender.com");
///
/// let ops = client.operations().await?;
/// println!("{} operations available", ops.len());
///
/// let message = client.message("/bus/Tom/Jerry").await?;
/// println!("{message}");
/// # Ok(())
/// # }
/// ```
pub mod client;

pub use client::FoaasClient;
