//! Document-output mapping.
//!
//! A `FormOutput` maps pattern ids to fillable fields of a document
//! template. The external filler expects `{outputFieldId: {type, value}}`;
//! this module builds that map from session values.

use std::collections::BTreeMap;

use formwright_types::blueprint::{DocumentFieldType, DocumentFieldValue, FormOutput};
use formwright_types::session::FormSession;
use serde_json::Value;

/// Reading order of compound-field parts; other keys follow alphabetically.
const PART_ORDER: [&str; 9] = [
    "givenName",
    "middleName",
    "familyName",
    "streetAddress",
    "streetAddress2",
    "city",
    "stateTerritoryOrMilitaryPost",
    "zipCode",
    "phoneNumber",
];

/// Flatten a stored value to the text a document text field shows.
fn as_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .map(as_text)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(parts) => {
            let mut ordered: Vec<_> = parts.iter().collect();
            ordered.sort_by_key(|(key, _)| {
                let rank = PART_ORDER
                    .iter()
                    .position(|p| p == key)
                    .unwrap_or(PART_ORDER.len());
                (rank, key.as_str())
            });
            ordered
                .into_iter()
                .map(|(_, v)| as_text(v))
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
        }
    }
}

fn as_checked(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => matches!(s.as_str(), "on" | "true" | "checked"),
        _ => false,
    }
}

/// Values for every output field mapped to a pattern of the session's form.
pub fn document_field_values(
    session: &FormSession,
    output: &FormOutput,
) -> BTreeMap<String, DocumentFieldValue> {
    let mut filled = BTreeMap::new();
    for (pattern_id, field_id) in &output.form_fields {
        if !session.form.contains(pattern_id.as_str()) {
            tracing::warn!(pattern_id = %pattern_id, path = %output.path, "output maps a missing pattern");
            continue;
        }
        let Some(field) = output.fields.get(field_id) else {
            tracing::warn!(field_id = %field_id, path = %output.path, "output field not in template");
            continue;
        };
        let stored = session
            .data
            .values
            .get(pattern_id.as_str())
            .unwrap_or(&Value::Null);
        let value = match field.field_type {
            DocumentFieldType::CheckBox => Value::Bool(as_checked(stored)),
            DocumentFieldType::TextField
            | DocumentFieldType::RadioGroup
            | DocumentFieldType::Dropdown => Value::String(as_text(stored)),
        };
        filled.insert(
            field_id.clone(),
            DocumentFieldValue {
                field_type: field.field_type,
                value,
            },
        );
    }
    filled
}
