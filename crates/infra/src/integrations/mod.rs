//! External service integrations

pub mod foaas;
pub mod unsplash;

pub use foaas::FoaasClient;
pub use unsplash::UnsplashClient;
