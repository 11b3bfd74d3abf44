//! On-disk persistence adapters

pub mod image_store;
pub mod json_store;

pub use image_store::FileImageStore;
pub use json_store::JsonFileStore;
