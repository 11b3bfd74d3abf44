//! # BYT App
//!
//! Command-line application layer.
//!
//! This crate contains:
//! - CLI definition (clap)
//! - Application context (dependency injection)
//! - Command handlers that render service results as text
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture

pub mod cli;
pub mod commands;
pub mod context;
pub mod utils;

// Re-export for convenience
pub use cli::{Cli, Commands};
pub use context::AppContext;
