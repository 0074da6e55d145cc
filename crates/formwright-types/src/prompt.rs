//! Render-agnostic prompt types.
//!
//! A `Prompt` is what the engine hands to an external renderer: a tree of
//! components, each keyed by `props.type`. Renderers consume nothing else.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::session::FormError;

/// Root of a derived prompt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Prompt {
    pub components: Vec<PromptComponent>,
}

/// One renderable node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptComponent {
    pub props: PromptProps,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<PromptComponent>,
}

impl PromptComponent {
    pub fn leaf(props: PromptProps) -> Self {
        Self {
            props,
            children: Vec::new(),
        }
    }

    pub fn with_children(props: PromptProps, children: Vec<PromptComponent>) -> Self {
        Self { props, children }
    }
}

/// Navigation entry for one page of a page-set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageLink {
    pub title: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadioOptionProps {
    pub id: String,
    pub name: String,
    pub label: String,
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOptionProps {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// A label/value pair of the submission confirmation table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfirmationRow {
    pub label: String,
    pub value: Value,
}

/// Component properties, tagged by renderer key.
///
/// Field-bearing props carry the wire name (`*_id`) the renderer must use
/// for its inputs so submissions decode back onto the pattern tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum PromptProps {
    PageSet {
        pages: Vec<PageLink>,
        active_page: usize,
    },
    Page {
        id: String,
        title: String,
        submit_action: String,
    },
    Fieldset {
        legend: String,
    },
    Repeater {
        id: String,
        legend: String,
        add_action: String,
        row_count: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<FormError>,
    },
    RepeaterRow {
        index: usize,
        delete_action: String,
    },
    FormSummary {
        title: String,
        description: String,
    },
    Paragraph {
        text: String,
    },
    Input {
        input_id: String,
        label: String,
        required: bool,
        value: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_length: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<FormError>,
    },
    Checkbox {
        id: String,
        label: String,
        checked: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<FormError>,
    },
    RadioGroup {
        group_id: String,
        legend: String,
        required: bool,
        options: Vec<RadioOptionProps>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<FormError>,
    },
    SelectDropdown {
        select_id: String,
        label: String,
        required: bool,
        options: Vec<SelectOptionProps>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<FormError>,
    },
    PhoneNumber {
        phone_id: String,
        label: String,
        required: bool,
        value: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<FormError>,
    },
    Name {
        name_id: String,
        label: String,
        required: bool,
        value: Value,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<FormError>,
    },
    Address {
        address_id: String,
        label: String,
        required: bool,
        value: Value,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<FormError>,
    },
    SubmissionConfirmation {
        table: Vec<ConfirmationRow>,
    },
}

impl PromptProps {
    /// The renderer key (`props.type` on the wire).
    pub fn type_key(&self) -> &'static str {
        match self {
            PromptProps::PageSet { .. } => "page-set",
            PromptProps::Page { .. } => "page",
            PromptProps::Fieldset { .. } => "fieldset",
            PromptProps::Repeater { .. } => "repeater",
            PromptProps::RepeaterRow { .. } => "repeater-row",
            PromptProps::FormSummary { .. } => "form-summary",
            PromptProps::Paragraph { .. } => "paragraph",
            PromptProps::Input { .. } => "input",
            PromptProps::Checkbox { .. } => "checkbox",
            PromptProps::RadioGroup { .. } => "radio-group",
            PromptProps::SelectDropdown { .. } => "select-dropdown",
            PromptProps::PhoneNumber { .. } => "phone-number",
            PromptProps::Name { .. } => "name",
            PromptProps::Address { .. } => "address",
            PromptProps::SubmissionConfirmation { .. } => "submission-confirmation",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_props_tagged_by_type() {
        let component = PromptComponent::leaf(PromptProps::Input {
            input_id: "input-1".to_string(),
            label: "Email".to_string(),
            required: true,
            value: String::new(),
            max_length: None,
            error: None,
        });
        let json = serde_json::to_value(&component).unwrap();
        assert_eq!(json["props"]["type"], "input");
        assert_eq!(json["props"]["inputId"], "input-1");
        assert!(json.get("children").is_none());
        assert_eq!(component.props.type_key(), "input");
    }

    #[test]
    fn test_confirmation_key() {
        let props = PromptProps::SubmissionConfirmation { table: vec![] };
        let json = serde_json::to_value(&props).unwrap();
        assert_eq!(json["type"], "submission-confirmation");
    }
}
