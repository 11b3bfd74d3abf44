//! FOAAS operation catalog

pub mod service;

pub use service::OperationCatalog;
