use std::collections::BTreeMap;

use thiserror::Error;

use crate::pattern::{PatternId, PatternType};
use crate::session::FormErrors;

/// Errors resolving the configuration that handles a pattern type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistryError {
    #[error("no configuration registered for pattern type '{0}'")]
    UnregisteredType(PatternType),

    #[error("{config} configuration cannot handle a {pattern} pattern")]
    ConfigMismatch {
        config: PatternType,
        pattern: PatternType,
    },
}

/// Integrity violations raised by structural edits.
///
/// These signal caller contract breaches (wrong container type, unknown id),
/// not user-input problems.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BlueprintError {
    #[error("pattern not found: '{0}'")]
    PatternNotFound(PatternId),

    #[error("pattern '{id}' is a {actual}, expected {expected}")]
    WrongPatternType {
        id: PatternId,
        expected: PatternType,
        actual: PatternType,
    },

    #[error("invalid configuration for pattern '{id}': {} field error(s)", .errors.len())]
    InvalidConfig { id: PatternId, errors: FormErrors },

    #[error("invalid configuration for {} pattern(s)", .0.len())]
    InvalidConfigs(BTreeMap<PatternId, FormErrors>),

    #[error("blueprint root is not a page-set")]
    RootNotPageSet,

    #[error("cannot remove the root pattern '{0}'")]
    RootRemoval(PatternId),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Errors from session bookkeeping.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("session key '{0}' does not reference a pattern")]
    UnknownKey(String),

    #[error("pattern not found: '{0}'")]
    PatternNotFound(PatternId),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Errors resolving or running a submission action.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmissionError {
    #[error("malformed action: '{0}'")]
    MalformedAction(String),

    #[error("no handler registered for '{0}'")]
    UnknownHandler(String),

    #[error("pattern '{0}' no longer exists")]
    PatternNotFound(String),

    #[error("invalid handler input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Errors from repository operations (used by trait definitions in formwright-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::FormError;

    #[test]
    fn test_wrong_pattern_type_display() {
        let err = BlueprintError::WrongPatternType {
            id: PatternId::from("element-1"),
            expected: PatternType::Page,
            actual: PatternType::Input,
        };
        assert_eq!(
            err.to_string(),
            "pattern 'element-1' is a input, expected page"
        );
    }

    #[test]
    fn test_invalid_config_display_counts_fields() {
        let mut errors = FormErrors::new();
        errors.insert("label".to_string(), FormError::required("A label is required"));
        let err = BlueprintError::InvalidConfig {
            id: PatternId::from("element-1"),
            errors,
        };
        assert!(err.to_string().contains("1 field error(s)"));
    }

    #[test]
    fn test_submission_error_display() {
        let err = SubmissionError::UnknownHandler("explode".to_string());
        assert_eq!(err.to_string(), "no handler registered for 'explode'");
    }

    #[test]
    fn test_registry_error_wraps_transparently() {
        let err: BlueprintError = RegistryError::UnregisteredType(PatternType::Address).into();
        assert_eq!(
            err.to_string(),
            "no configuration registered for pattern type 'address'"
        );
    }
}
