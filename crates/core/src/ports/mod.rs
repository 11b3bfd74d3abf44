//! Port interfaces
//!
//! These traits define the boundaries between core business logic
//! and infrastructure implementations.

pub mod foaas;
pub mod photos;
pub mod storage;

pub use foaas::FoaasApi;
pub use photos::{ImageStore, PhotoApi, PrefetchReport};
pub use storage::{KeyValueStore, StoreExt};
