//! Stateful editing wrapper over the persistent tree operations.
//!
//! `BlueprintBuilder` owns the current blueprint and a `ParentIndex` kept in
//! step with it. Each edit computes the persistent result, swaps it in, and
//! returns the pattern it produced or changed.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use chrono::Local;
use formwright_types::blueprint::{Blueprint, FormOutput, FormSummary};
use formwright_types::config::EngineConfig;
use formwright_types::error::BlueprintError;
use formwright_types::pattern::{Pattern, PatternId, PatternType};
use serde_json::Value;

use super::gc::collect_garbage;
use super::parents::ParentIndex;
use super::tree::{self, MovePosition};
use crate::registry::PatternRegistry;

pub struct BlueprintBuilder<'a> {
    registry: &'a PatternRegistry,
    form: Blueprint,
    parents: ParentIndex,
    timestamp_format: String,
}

impl<'a> BlueprintBuilder<'a> {
    /// Wrap an existing blueprint.
    pub fn new(registry: &'a PatternRegistry, form: Blueprint) -> Result<Self, BlueprintError> {
        let parents = ParentIndex::build(registry, &form)?;
        Ok(Self {
            registry,
            form,
            parents,
            timestamp_format: EngineConfig::default().copy_timestamp_format,
        })
    }

    /// Start from a fresh default blueprint.
    pub fn create(
        registry: &'a PatternRegistry,
        summary: FormSummary,
    ) -> Result<Self, BlueprintError> {
        Self::new(registry, super::create_default_blueprint(registry, summary)?)
    }

    pub fn with_config(mut self, config: &EngineConfig) -> Self {
        self.timestamp_format = config.copy_timestamp_format.clone();
        self
    }

    pub fn form(&self) -> &Blueprint {
        &self.form
    }

    pub fn into_form(self) -> Blueprint {
        self.form
    }

    pub fn parents(&self) -> &ParentIndex {
        &self.parents
    }

    /// First page of the root page-set, if any.
    pub fn first_page_id(&self) -> Option<PatternId> {
        self.form.root_pattern()?.data.child_ids().first().cloned()
    }

    fn pattern(&self, id: &PatternId) -> Result<Pattern, BlueprintError> {
        self.form
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| BlueprintError::PatternNotFound(id.clone()))
    }

    fn copy_stamp(&self) -> String {
        let now = Local::now();
        let mut stamp = String::new();
        if write!(stamp, "{}", now.format(&self.timestamp_format)).is_err() {
            tracing::warn!(
                format = %self.timestamp_format,
                "invalid copy timestamp format, using RFC 3339"
            );
            stamp = now.to_rfc3339();
        }
        stamp
    }

    // -----------------------------------------------------------------------
    // Edits
    // -----------------------------------------------------------------------

    /// Create a pattern of `pattern_type` on a page, after `index` or at the end.
    pub fn add_pattern_to_page(
        &mut self,
        page_id: &PatternId,
        pattern_type: PatternType,
        index: Option<usize>,
    ) -> Result<Pattern, BlueprintError> {
        let pattern = self.registry.create_pattern(pattern_type)?;
        self.form = tree::add_pattern_to_page(&self.form, page_id, pattern.clone(), index)?;
        self.parents.set(pattern.id.clone(), page_id.clone());
        Ok(pattern)
    }

    /// Create a pattern inside a fieldset or repeater.
    pub fn add_pattern_to_compound_field(
        &mut self,
        container_id: &PatternId,
        pattern_type: PatternType,
        container: PatternType,
        index: Option<usize>,
    ) -> Result<Pattern, BlueprintError> {
        let pattern = self.registry.create_pattern(pattern_type)?;
        self.form = tree::add_pattern_to_compound_field(
            &self.form,
            container_id,
            pattern.clone(),
            container,
            index,
        )?;
        self.parents.set(pattern.id.clone(), container_id.clone());
        Ok(pattern)
    }

    /// Append a new empty page to the root page-set.
    pub fn add_page(&mut self) -> Result<Pattern, BlueprintError> {
        let page = self.registry.create_pattern(PatternType::Page)?;
        self.add_page_to_page_set(page)
    }

    /// Append a caller-built page to the root page-set.
    pub fn add_page_to_page_set(&mut self, page: Pattern) -> Result<Pattern, BlueprintError> {
        self.form = tree::add_page_to_page_set(&self.form, page.clone())?;
        let root = self.form.root.clone();
        self.parents
            .index_subtree(self.registry, &self.form, &page.id, &root)?;
        Ok(page)
    }

    /// Move a pattern between (or within) pages; returns the moved pattern.
    pub fn move_pattern(
        &mut self,
        source_page: &PatternId,
        target_page: &PatternId,
        id: &PatternId,
        position: MovePosition,
    ) -> Result<Pattern, BlueprintError> {
        self.form =
            tree::move_pattern_between_pages(&self.form, source_page, target_page, id, position)?;
        self.parents.set(id.clone(), target_page.clone());
        self.pattern(id)
    }

    /// Duplicate a page; returns the new page.
    pub fn copy_page(&mut self, page_id: &PatternId) -> Result<Pattern, BlueprintError> {
        let stamp = self.copy_stamp();
        let (form, copy_id) = tree::copy_page(self.registry, &self.form, page_id, &stamp)?;
        self.form = form;
        let root = self.form.root.clone();
        self.parents
            .index_subtree(self.registry, &self.form, &copy_id, &root)?;
        self.pattern(&copy_id)
    }

    /// Duplicate a pattern next to its original; returns the copy.
    pub fn copy_pattern(
        &mut self,
        parent_id: &PatternId,
        id: &PatternId,
    ) -> Result<Pattern, BlueprintError> {
        let stamp = self.copy_stamp();
        let (form, copy_id) = tree::copy_pattern_in(
            self.registry,
            &self.form,
            &self.parents,
            parent_id,
            id,
            &stamp,
        )?;
        let parent = self
            .parents
            .live_parent_of(&self.form, id.as_str())
            .unwrap_or(parent_id)
            .clone();
        self.form = form;
        self.parents
            .index_subtree(self.registry, &self.form, &copy_id, &parent)?;
        self.pattern(&copy_id)
    }

    /// Remove a pattern (not its descendants); returns it if it existed.
    pub fn remove_pattern(&mut self, id: &PatternId) -> Result<Option<Pattern>, BlueprintError> {
        let removed = self.form.get(id.as_str()).cloned();
        self.form = tree::remove_pattern_from_blueprint(self.registry, &self.form, id)?;
        self.parents.remove(id.as_str());
        Ok(removed)
    }

    /// Validate and store new data for a pattern; returns the updated pattern.
    pub fn update_pattern(&mut self, id: &PatternId, raw: &Value) -> Result<Pattern, BlueprintError> {
        self.form = tree::update_pattern(self.registry, &self.form, id, raw)?;
        self.pattern(id)
    }

    /// Validate and store several updates; nothing changes unless all pass.
    pub fn update_patterns(
        &mut self,
        updates: &BTreeMap<PatternId, Value>,
    ) -> Result<Vec<Pattern>, BlueprintError> {
        self.form = tree::update_patterns(self.registry, &self.form, updates)?;
        updates.keys().map(|id| self.pattern(id)).collect()
    }

    /// Swap in a whole new arena and reindex it.
    pub fn replace_patterns(
        &mut self,
        patterns: impl IntoIterator<Item = Pattern>,
    ) -> Result<(), BlueprintError> {
        let form = tree::replace_patterns(&self.form, patterns);
        self.parents = ParentIndex::build(self.registry, &form)?;
        self.form = form;
        Ok(())
    }

    pub fn update_form_summary(&mut self, summary: FormSummary) -> &FormSummary {
        self.form = tree::update_form_summary(&self.form, summary);
        &self.form.summary
    }

    /// Attach a generated document; returns its position in `outputs`.
    pub fn add_form_output(&mut self, output: FormOutput) -> usize {
        self.form = tree::add_form_output(&self.form, output);
        self.form.outputs.len() - 1
    }

    /// Drop unreachable patterns; returns their ids.
    pub fn collect_garbage(&mut self) -> Result<Vec<PatternId>, BlueprintError> {
        let (form, removed) = collect_garbage(self.registry, &self.form)?;
        self.form = form;
        self.parents = ParentIndex::build(self.registry, &self.form)?;
        Ok(removed)
    }
}
