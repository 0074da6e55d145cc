//! Blueprint (form document) types.
//!
//! A `Blueprint` is the complete persistent document: a summary, the root
//! pattern id, the flat pattern arena, and any generated document outputs.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::pattern::{Pattern, PatternId, PatternMap};

/// Title and description shown at the top of a form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormSummary {
    pub title: String,
    pub description: String,
}

/// The complete form document.
///
/// `root` always resolves within `patterns` for blueprints produced by the
/// builder operations; hand-assembled values can violate this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blueprint {
    pub summary: FormSummary,
    pub root: PatternId,
    pub patterns: PatternMap,
    #[serde(default)]
    pub outputs: Vec<FormOutput>,
}

impl Blueprint {
    /// Look up a pattern by id.
    pub fn get(&self, id: &str) -> Option<&Pattern> {
        self.patterns.get(id)
    }

    pub fn root_pattern(&self) -> Option<&Pattern> {
        self.patterns.get(&self.root)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.patterns.contains_key(id)
    }
}

// ---------------------------------------------------------------------------
// Document outputs
// ---------------------------------------------------------------------------

/// Kind of fillable field inside a generated document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentFieldType {
    TextField,
    CheckBox,
    RadioGroup,
    Dropdown,
}

/// A fillable field discovered in a document template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentField {
    #[serde(rename = "type")]
    pub field_type: DocumentFieldType,
    pub name: String,
    pub label: String,
}

/// Value handed to the external document filler for one output field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentFieldValue {
    #[serde(rename = "type")]
    pub field_type: DocumentFieldType,
    pub value: serde_json::Value,
}

/// A document generated from the form, plus its field-name mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormOutput {
    /// Template document bytes.
    pub data: Vec<u8>,
    /// Where the template came from (file name or URL).
    pub path: String,
    /// Output field id -> field description.
    pub fields: HashMap<String, DocumentField>,
    /// Pattern id -> output field id.
    #[serde(default)]
    pub form_fields: HashMap<PatternId, String>,
}

// ---------------------------------------------------------------------------
// Stored forms
// ---------------------------------------------------------------------------

/// Unique identifier for a stored form, wrapping a UUID v7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FormId(pub Uuid);

impl FormId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for FormId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FormId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for FormId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A blueprint as held by a form repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormRecord {
    pub id: FormId,
    pub blueprint: Blueprint,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::{PageSetData, PatternData};

    fn single_root() -> Blueprint {
        let root = PatternId::from("root");
        let mut patterns = PatternMap::new();
        patterns.insert(
            root.clone(),
            Pattern::new(root.clone(), PatternData::PageSet(PageSetData::default())),
        );
        Blueprint {
            summary: FormSummary {
                title: "Test form".to_string(),
                description: String::new(),
            },
            root,
            patterns,
            outputs: vec![],
        }
    }

    #[test]
    fn test_root_pattern_resolves() {
        let bp = single_root();
        assert!(bp.root_pattern().is_some());
        assert!(bp.contains("root"));
        assert!(bp.get("missing").is_none());
    }

    #[test]
    fn test_blueprint_deserialize_defaults_outputs() {
        let json = serde_json::json!({
            "summary": {"title": "T", "description": "D"},
            "root": "root",
            "patterns": {
                "root": {"id": "root", "type": "page-set", "data": {"pages": []}}
            }
        });
        let bp: Blueprint = serde_json::from_value(json).unwrap();
        assert!(bp.outputs.is_empty());
        assert_eq!(bp.summary.title, "T");
        assert_eq!(bp.patterns, single_root().patterns);
    }

    #[test]
    fn test_form_id_from_str() {
        let id = FormId::new();
        let parsed: FormId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }
}
