//! Form session types.
//!
//! A `FormSession` pairs a `Blueprint` with runtime state: the values and
//! validation errors submitted so far, the last action taken, and the
//! current route (which page of a page-set is showing).
//!
//! Session keys are strings. A key is either a pattern id or a dot path
//! whose first segment is a pattern id (`<repeaterId>.<row>.<childId>`);
//! the latter carries per-row field errors of a repeater.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::blueprint::Blueprint;

/// Errors keyed by field or sub-field name.
pub type FormErrors = BTreeMap<String, FormError>;

/// Submitted form data: dot-joined path -> raw string value.
pub type FlatValues = BTreeMap<String, String>;

/// Session values in insertion order.
pub type SessionValues = IndexMap<String, Value>;

/// Session errors in insertion order.
pub type SessionErrors = IndexMap<String, FormError>;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormErrorType {
    Required,
    Custom,
}

/// A user-facing validation failure.
///
/// `fields` nests to express partial failure inside compound fields: valid
/// sub-fields are simply absent from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormError {
    #[serde(rename = "type")]
    pub kind: FormErrorType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<FormErrors>,
}

impl FormError {
    pub fn required(message: impl Into<String>) -> Self {
        Self {
            kind: FormErrorType::Required,
            message: Some(message.into()),
            fields: None,
        }
    }

    pub fn custom(message: impl Into<String>) -> Self {
        Self {
            kind: FormErrorType::Custom,
            message: Some(message.into()),
            fields: None,
        }
    }

    pub fn with_fields(mut self, fields: FormErrors) -> Self {
        self.fields = Some(fields);
        self
    }
}

/// Rejected user input.
///
/// `partial` holds whatever could be parsed, for pattern types whose
/// in-progress input must stay editable after a failed submission.
#[derive(Debug, Clone, PartialEq)]
pub struct InputRejection {
    pub error: FormError,
    pub partial: Option<Value>,
}

impl From<FormError> for InputRejection {
    fn from(error: FormError) -> Self {
        Self {
            error,
            partial: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Where the user currently is within the form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormRoute {
    #[serde(default)]
    pub params: BTreeMap<String, String>,
    #[serde(default)]
    pub url: String,
}

impl FormRoute {
    /// Zero-based page index from the `page` route parameter.
    pub fn page_index(&self) -> Option<usize> {
        self.params.get("page").and_then(|p| p.parse().ok())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSessionData {
    #[serde(default)]
    pub values: SessionValues,
    #[serde(default)]
    pub errors: SessionErrors,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_action: Option<String>,
}

/// Runtime state paired with a blueprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSession {
    pub data: FormSessionData,
    pub form: Blueprint,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<FormRoute>,
}

impl FormSession {
    /// Start an empty session over `form`.
    pub fn new(form: Blueprint) -> Self {
        Self {
            data: FormSessionData::default(),
            form,
            route: None,
        }
    }

    pub fn with_route(mut self, route: FormRoute) -> Self {
        self.route = Some(route);
        self
    }
}

/// The pattern id a session key refers to.
pub fn session_key_root(key: &str) -> &str {
    key.split('.').next().unwrap_or(key)
}
