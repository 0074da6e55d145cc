//! Shared domain types for Formwright.
//!
//! This crate contains the document model for dynamically-defined forms:
//! patterns and their per-type data, the `Blueprint` that owns them, the
//! runtime `FormSession`, the render-agnostic `Prompt`, engine configuration,
//! and the error types shared by every layer.
//!
//! Zero behaviour dependencies -- only serde, uuid, chrono, thiserror, indexmap.

pub mod blueprint;
pub mod config;
pub mod error;
pub mod pattern;
pub mod prompt;
pub mod session;
