//! Pattern registry: per-type behaviour lookup.
//!
//! Every pattern type is backed by a `PatternConfig` trait object supplying
//! its default data, config-data validation, child access, child removal, and
//! prompt rendering. Types that accept user input additionally expose an
//! `InputParser`; its absence marks a pure container whose children are
//! validated instead.
//!
//! All config methods are pure.

pub mod patterns;

use std::collections::HashMap;

use formwright_types::blueprint::Blueprint;
use formwright_types::error::RegistryError;
use formwright_types::pattern::{Pattern, PatternData, PatternId, PatternMap, PatternType};
use formwright_types::prompt::PromptComponent;
use formwright_types::session::{FormError, FormErrors, InputRejection};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::prompt::PromptContext;

/// What an input parser can see while validating a value.
#[derive(Clone, Copy)]
pub struct ParseContext<'a> {
    pub registry: &'a PatternRegistry,
    pub form: &'a Blueprint,
}

/// Runtime-value validation for a pattern type.
pub trait InputParser: Send + Sync {
    /// Shape of an untouched value (used to adapt scalar repeater inputs).
    fn initial_value(&self, pattern: &Pattern) -> Value;

    /// Validate a raw submitted value, producing the stored value.
    fn parse_user_input(
        &self,
        ctx: &ParseContext<'_>,
        pattern: &Pattern,
        raw: &Value,
    ) -> Result<Value, InputRejection>;
}

/// Behaviour of one pattern type.
pub trait PatternConfig: Send + Sync {
    fn pattern_type(&self) -> PatternType;

    /// Name shown in the editor's "add pattern" menu.
    fn display_name(&self) -> &'static str;

    /// Default data for a freshly created pattern.
    fn initial(&self) -> PatternData;

    /// Validate editor-supplied data for this type.
    fn parse_config_data(&self, raw: &Value) -> Result<PatternData, FormErrors>;

    /// User-input validation, or `None` for pure containers and content.
    fn input(&self) -> Option<&dyn InputParser> {
        None
    }

    /// Direct children of `pattern`, in order. Missing ids are skipped.
    fn children<'p>(&self, _pattern: &Pattern, _patterns: &'p PatternMap) -> Vec<&'p Pattern> {
        Vec::new()
    }

    /// A copy of `pattern` with `id` dropped from its child list.
    fn remove_child_pattern(&self, pattern: &Pattern, _id: &PatternId) -> Pattern {
        pattern.clone()
    }

    fn create_prompt(
        &self,
        ctx: &PromptContext<'_>,
        pattern: &Pattern,
    ) -> Result<PromptComponent, RegistryError>;
}

/// Registry of pattern configurations, indexed by type.
pub struct PatternRegistry {
    configs: HashMap<PatternType, Box<dyn PatternConfig>>,
}

impl PatternRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            configs: HashMap::new(),
        }
    }

    /// Create a registry holding every built-in pattern configuration.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        patterns::register_defaults(&mut registry);
        registry
    }

    /// Register a configuration under its own pattern type.
    ///
    /// If a configuration for this type already exists, it is replaced.
    pub fn register<C: PatternConfig + 'static>(&mut self, config: C) {
        let pattern_type = config.pattern_type();
        tracing::debug!(pattern_type = %pattern_type, "registered pattern config");
        self.configs.insert(pattern_type, Box::new(config));
    }

    pub fn get(&self, pattern_type: PatternType) -> Result<&dyn PatternConfig, RegistryError> {
        self.configs
            .get(&pattern_type)
            .map(|c| c.as_ref())
            .ok_or(RegistryError::UnregisteredType(pattern_type))
    }

    pub fn config_for(&self, pattern: &Pattern) -> Result<&dyn PatternConfig, RegistryError> {
        self.get(pattern.pattern_type())
    }

    /// Direct children of `pattern` through its registered accessor.
    pub fn children<'p>(
        &self,
        pattern: &Pattern,
        patterns: &'p PatternMap,
    ) -> Result<Vec<&'p Pattern>, RegistryError> {
        Ok(self.config_for(pattern)?.children(pattern, patterns))
    }

    /// Whether patterns of this type validate user input.
    pub fn accepts_input(&self, pattern: &Pattern) -> Result<bool, RegistryError> {
        Ok(self.config_for(pattern)?.input().is_some())
    }

    /// Build a new pattern of `pattern_type` with a fresh id and default data.
    pub fn create_pattern(&self, pattern_type: PatternType) -> Result<Pattern, RegistryError> {
        let config = self.get(pattern_type)?;
        Ok(Pattern::new(PatternId::new(), config.initial()))
    }

    /// Registered types, sorted.
    pub fn types(&self) -> Vec<PatternType> {
        let mut types: Vec<_> = self.configs.keys().copied().collect();
        types.sort();
        types
    }
}

impl Default for PatternRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Helpers shared by the built-in configs
// ---------------------------------------------------------------------------

/// Deserialize editor-supplied data into a per-type struct.
pub(crate) fn parse_data<T: DeserializeOwned>(raw: &Value) -> Result<T, FormErrors> {
    serde_json::from_value(raw.clone()).map_err(|e| {
        let mut errors = FormErrors::new();
        errors.insert("data".to_string(), FormError::custom(e.to_string()));
        errors
    })
}

/// Record a required-text error when `value` is blank.
pub(crate) fn require_text(errors: &mut FormErrors, field: &str, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.insert(field.to_string(), FormError::required(message));
    }
}

/// Look up child ids in the arena, skipping dangling references.
pub(crate) fn lookup_children<'p>(
    parent: &Pattern,
    ids: &[PatternId],
    patterns: &'p PatternMap,
) -> Vec<&'p Pattern> {
    ids.iter()
        .filter_map(|id| {
            let child = patterns.get(id);
            if child.is_none() {
                tracing::warn!(parent = %parent.id, child = %id, "dangling child reference");
            }
            child
        })
        .collect()
}

/// A copy of `pattern` without `id` in its child-id list.
pub(crate) fn without_child(pattern: &Pattern, id: &PatternId) -> Pattern {
    let mut updated = pattern.clone();
    if let Some(ids) = updated.data.child_ids_mut() {
        ids.retain(|child| child != id);
    }
    updated
}

pub(crate) fn mismatch(config: PatternType, pattern: &Pattern) -> RegistryError {
    RegistryError::ConfigMismatch {
        config,
        pattern: pattern.pattern_type(),
    }
}

/// Input rejection for a pattern routed to the wrong parser.
pub(crate) fn unsupported(config: PatternType, pattern: &Pattern) -> InputRejection {
    FormError::custom(mismatch(config, pattern).to_string()).into()
}

/// Treat JSON null and blank strings alike as "nothing entered".
pub(crate) fn text_of(raw: &Value) -> Option<String> {
    match raw {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
