//! Unsplash image library

pub mod service;

pub use service::{BlurHashPlaceholder, ImageLibrary};
