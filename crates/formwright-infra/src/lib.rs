//! Infrastructure layer for Formwright.
//!
//! Contains implementations of the repository traits defined in
//! `formwright-core` and the `formwright.toml` configuration loader.

pub mod config;
pub mod memory;
