//! Form engine logic and repository trait definitions for Formwright.
//!
//! Blueprint editing, the pattern registry, session validation, prompt
//! derivation and submission actions all live here, along with the "ports"
//! (repository traits) that the infrastructure layer implements. It depends
//! only on `formwright-types` -- never on `formwright-infra` or any IO crate.

pub mod blueprint;
pub mod output;
pub mod prompt;
pub mod registry;
pub mod repository;
pub mod session;
pub mod submission;
