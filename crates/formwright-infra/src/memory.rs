//! In-memory form repository.
//!
//! Implements `FormRepository` from `formwright-core` on a `DashMap`, for
//! tests, demos and single-process hosts that keep blueprints in memory.

use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use formwright_core::repository::FormRepository;
use formwright_types::blueprint::{FormId, FormRecord};
use formwright_types::error::RepositoryError;

/// DashMap-backed implementation of `FormRepository`.
///
/// Clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryFormRepository {
    forms: Arc<DashMap<FormId, FormRecord>>,
}

impl MemoryFormRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }
}

impl FormRepository for MemoryFormRepository {
    async fn create(&self, record: &FormRecord) -> Result<FormRecord, RepositoryError> {
        match self.forms.entry(record.id) {
            Entry::Occupied(_) => Err(RepositoryError::Conflict(format!(
                "form '{}' already exists",
                record.id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
                tracing::debug!(form_id = %record.id, "stored form");
                Ok(record.clone())
            }
        }
    }

    async fn get(&self, id: &FormId) -> Result<Option<FormRecord>, RepositoryError> {
        Ok(self.forms.get(id).map(|entry| entry.value().clone()))
    }

    async fn list(&self) -> Result<Vec<FormRecord>, RepositoryError> {
        let mut records: Vec<FormRecord> =
            self.forms.iter().map(|entry| entry.value().clone()).collect();
        records.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.0.cmp(&b.id.0)));
        Ok(records)
    }

    async fn update(&self, record: &FormRecord) -> Result<FormRecord, RepositoryError> {
        let mut existing = self.forms.get_mut(&record.id).ok_or(RepositoryError::NotFound)?;
        *existing = record.clone();
        tracing::debug!(form_id = %record.id, "updated form");
        Ok(record.clone())
    }

    async fn delete(&self, id: &FormId) -> Result<bool, RepositoryError> {
        let removed = self.forms.remove(id).is_some();
        if removed {
            tracing::debug!(form_id = %id, "deleted form");
        }
        Ok(removed)
    }
}
