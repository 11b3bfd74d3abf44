//! Shared test helpers for `byt-core` integration tests.
//!
//! In-memory mocks for every core port plus fixture builders, so service
//! tests can focus on behaviour instead of boilerplate.

#![allow(dead_code)]

pub mod fixtures;
pub mod mocks;
