//! Form repository trait definition.

use formwright_types::blueprint::{FormId, FormRecord};
use formwright_types::error::RepositoryError;

/// Repository trait for stored blueprints.
///
/// Implementations live in formwright-infra (e.g., MemoryFormRepository).
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait FormRepository: Send + Sync {
    /// Store a new form. Fails with `Conflict` if the id is taken.
    fn create(
        &self,
        record: &FormRecord,
    ) -> impl std::future::Future<Output = Result<FormRecord, RepositoryError>> + Send;

    /// Get a form by its unique ID.
    fn get(
        &self,
        id: &FormId,
    ) -> impl std::future::Future<Output = Result<Option<FormRecord>, RepositoryError>> + Send;

    /// List all stored forms, oldest first.
    fn list(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<FormRecord>, RepositoryError>> + Send;

    /// Replace an existing form. Fails with `NotFound` if it was never created.
    fn update(
        &self,
        record: &FormRecord,
    ) -> impl std::future::Future<Output = Result<FormRecord, RepositoryError>> + Send;

    /// Delete a form by ID. Returns whether anything was removed.
    fn delete(
        &self,
        id: &FormId,
    ) -> impl std::future::Future<Output = Result<bool, RepositoryError>> + Send;
}
