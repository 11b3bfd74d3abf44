/// Unsplash integration
///
/// `UnsplashClient` implements the core `PhotoApi` port against
/// `GET /photos/random`. Every request carries the `Client-ID` authorization
/// and pins API version `v1`.
pub mod client;

pub use client::UnsplashClient;
