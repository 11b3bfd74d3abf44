//! Application version tracking

pub mod tracker;

pub use tracker::{VersionEvent, VersionTracker};
