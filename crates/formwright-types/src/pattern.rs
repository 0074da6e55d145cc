//! Pattern domain types.
//!
//! A pattern is a single typed node of a form's document tree. Patterns live
//! in a flat arena (`PatternMap`, id -> pattern) and containers reference
//! their children by id, so the tree never owns nodes through pointers.
//!
//! The `type` tag selects the shape of `data`. On the wire a pattern looks
//! like `{"id": "...", "type": "input", "data": {"label": "..."}}`.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// Opaque, never-reused identifier of a pattern.
///
/// Freshly created patterns get a UUID v7 string; any other string is
/// accepted when loading existing documents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatternId(String);

impl PatternId {
    /// Generate a fresh id (UUID v7, time-sortable).
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for PatternId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PatternId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PatternId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for PatternId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Borrow<str> for PatternId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for PatternId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// Type tag
// ---------------------------------------------------------------------------

/// The closed set of pattern type tags.
///
/// Behaviour for each tag is supplied by a registered `PatternConfig`; the
/// tree only hard-codes structure for the four container tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PatternType {
    PageSet,
    Page,
    Fieldset,
    Repeater,
    FormSummary,
    Paragraph,
    Input,
    Checkbox,
    RadioGroup,
    SelectDropdown,
    PhoneNumber,
    Name,
    Address,
}

impl PatternType {
    /// Every known tag, in declaration order.
    pub const ALL: [PatternType; 13] = [
        PatternType::PageSet,
        PatternType::Page,
        PatternType::Fieldset,
        PatternType::Repeater,
        PatternType::FormSummary,
        PatternType::Paragraph,
        PatternType::Input,
        PatternType::Checkbox,
        PatternType::RadioGroup,
        PatternType::SelectDropdown,
        PatternType::PhoneNumber,
        PatternType::Name,
        PatternType::Address,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PatternType::PageSet => "page-set",
            PatternType::Page => "page",
            PatternType::Fieldset => "fieldset",
            PatternType::Repeater => "repeater",
            PatternType::FormSummary => "form-summary",
            PatternType::Paragraph => "paragraph",
            PatternType::Input => "input",
            PatternType::Checkbox => "checkbox",
            PatternType::RadioGroup => "radio-group",
            PatternType::SelectDropdown => "select-dropdown",
            PatternType::PhoneNumber => "phone-number",
            PatternType::Name => "name",
            PatternType::Address => "address",
        }
    }

    /// Whether patterns of this type reference child pattern ids.
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            PatternType::PageSet | PatternType::Page | PatternType::Fieldset | PatternType::Repeater
        )
    }
}

impl fmt::Display for PatternType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PatternType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PatternType::ALL
            .iter()
            .find(|t| t.as_str() == s)
            .copied()
            .ok_or_else(|| format!("unknown pattern type: '{s}'"))
    }
}

// ---------------------------------------------------------------------------
// Per-type data
// ---------------------------------------------------------------------------

/// Root container: the ordered list of pages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSetData {
    #[serde(default)]
    pub pages: Vec<PatternId>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageData {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub patterns: Vec<PatternId>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldsetData {
    #[serde(default)]
    pub legend: String,
    #[serde(default)]
    pub patterns: Vec<PatternId>,
}

/// A dynamically-resizable list of rows over a fixed child template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepeaterData {
    #[serde(default)]
    pub legend: String,
    /// Child template pattern ids, rendered once per row.
    #[serde(default)]
    pub patterns: Vec<PatternId>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSummaryData {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphData {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputData {
    #[serde(default)]
    pub label: String,
    /// Pre-filled value shown before the user types anything.
    #[serde(default)]
    pub initial: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckboxData {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub default_checked: bool,
}

/// One choice of a radio group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadioGroupData {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub options: Vec<ChoiceOption>,
    #[serde(default)]
    pub required: bool,
}

/// One entry of a select dropdown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectDropdownData {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub options: Vec<SelectOption>,
    #[serde(default)]
    pub required: bool,
}

/// Shared data shape of the compound fields (phone number, name, address).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompoundFieldData {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub required: bool,
}

/// Type-tagged pattern payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "kebab-case")]
pub enum PatternData {
    PageSet(PageSetData),
    Page(PageData),
    Fieldset(FieldsetData),
    Repeater(RepeaterData),
    FormSummary(FormSummaryData),
    Paragraph(ParagraphData),
    Input(InputData),
    Checkbox(CheckboxData),
    RadioGroup(RadioGroupData),
    SelectDropdown(SelectDropdownData),
    PhoneNumber(CompoundFieldData),
    Name(CompoundFieldData),
    Address(CompoundFieldData),
}

impl PatternData {
    pub fn pattern_type(&self) -> PatternType {
        match self {
            PatternData::PageSet(_) => PatternType::PageSet,
            PatternData::Page(_) => PatternType::Page,
            PatternData::Fieldset(_) => PatternType::Fieldset,
            PatternData::Repeater(_) => PatternType::Repeater,
            PatternData::FormSummary(_) => PatternType::FormSummary,
            PatternData::Paragraph(_) => PatternType::Paragraph,
            PatternData::Input(_) => PatternType::Input,
            PatternData::Checkbox(_) => PatternType::Checkbox,
            PatternData::RadioGroup(_) => PatternType::RadioGroup,
            PatternData::SelectDropdown(_) => PatternType::SelectDropdown,
            PatternData::PhoneNumber(_) => PatternType::PhoneNumber,
            PatternData::Name(_) => PatternType::Name,
            PatternData::Address(_) => PatternType::Address,
        }
    }

    /// Raw child-id list of a container (empty for leaves).
    ///
    /// Tree walks go through `PatternConfig::children`; this accessor backs
    /// those implementations and id remapping during copies.
    pub fn child_ids(&self) -> &[PatternId] {
        match self {
            PatternData::PageSet(d) => &d.pages,
            PatternData::Page(d) => &d.patterns,
            PatternData::Fieldset(d) => &d.patterns,
            PatternData::Repeater(d) => &d.patterns,
            _ => &[],
        }
    }

    pub fn child_ids_mut(&mut self) -> Option<&mut Vec<PatternId>> {
        match self {
            PatternData::PageSet(d) => Some(&mut d.pages),
            PatternData::Page(d) => Some(&mut d.patterns),
            PatternData::Fieldset(d) => Some(&mut d.patterns),
            PatternData::Repeater(d) => Some(&mut d.patterns),
            _ => None,
        }
    }

    /// The configured label of a user-facing field.
    pub fn label(&self) -> Option<&str> {
        match self {
            PatternData::Input(d) => Some(&d.label),
            PatternData::Checkbox(d) => Some(&d.label),
            PatternData::RadioGroup(d) => Some(&d.label),
            PatternData::SelectDropdown(d) => Some(&d.label),
            PatternData::PhoneNumber(d) | PatternData::Name(d) | PatternData::Address(d) => {
                Some(&d.label)
            }
            PatternData::Repeater(d) => Some(&d.legend),
            PatternData::Fieldset(d) => Some(&d.legend),
            _ => None,
        }
    }

    /// The text a designer sees for this pattern in the editor.
    pub fn display_text_mut(&mut self) -> Option<&mut String> {
        match self {
            PatternData::PageSet(_) => None,
            PatternData::Page(d) => Some(&mut d.title),
            PatternData::FormSummary(d) => Some(&mut d.title),
            PatternData::Fieldset(d) => Some(&mut d.legend),
            PatternData::Repeater(d) => Some(&mut d.legend),
            PatternData::Paragraph(d) => Some(&mut d.text),
            PatternData::Input(d) => Some(&mut d.label),
            PatternData::Checkbox(d) => Some(&mut d.label),
            PatternData::RadioGroup(d) => Some(&mut d.label),
            PatternData::SelectDropdown(d) => Some(&mut d.label),
            PatternData::PhoneNumber(d) | PatternData::Name(d) | PatternData::Address(d) => {
                Some(&mut d.label)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Pattern
// ---------------------------------------------------------------------------

/// A single typed node in the form's document tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    pub id: PatternId,
    #[serde(flatten)]
    pub data: PatternData,
}

impl Pattern {
    pub fn new(id: PatternId, data: PatternData) -> Self {
        Self { id, data }
    }

    pub fn pattern_type(&self) -> PatternType {
        self.data.pattern_type()
    }
}

/// Flat id -> pattern arena; the single source of truth for a document.
pub type PatternMap = HashMap<PatternId, Pattern>;
