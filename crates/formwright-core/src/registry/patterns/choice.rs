//! Single-choice fields: radio groups and select dropdowns.

use std::collections::HashSet;

use formwright_types::error::RegistryError;
use formwright_types::pattern::{
    Pattern, PatternData, PatternType, RadioGroupData, SelectDropdownData,
};
use formwright_types::prompt::{
    PromptComponent, PromptProps, RadioOptionProps, SelectOptionProps,
};
use formwright_types::session::{FormError, FormErrors, InputRejection};
use serde_json::Value;

use crate::prompt::PromptContext;
use crate::registry::{
    InputParser, ParseContext, PatternConfig, mismatch, parse_data, require_text, text_of,
    unsupported,
};

fn is_valid_option_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Check option keys are well-formed and unique, and labels present.
fn validate_options<'a>(
    errors: &mut FormErrors,
    options: impl Iterator<Item = (&'a str, &'a str)>,
) {
    let mut seen = HashSet::new();
    let mut count = 0;
    for (key, label) in options {
        count += 1;
        if !is_valid_option_key(key) {
            errors.insert(
                "options".to_string(),
                FormError::custom(format!(
                    "Option key '{key}' may only contain letters, digits, '_' and '-'"
                )),
            );
            return;
        }
        if !seen.insert(key) {
            errors.insert(
                "options".to_string(),
                FormError::custom(format!("Duplicate option key '{key}'")),
            );
            return;
        }
        if label.trim().is_empty() {
            errors.insert(
                "options".to_string(),
                FormError::required(format!("Option '{key}' needs a label")),
            );
            return;
        }
    }
    if count == 0 {
        errors.insert(
            "options".to_string(),
            FormError::required("At least one option is required"),
        );
    }
}

/// Shared choice validation: blank is `Null` unless required.
fn parse_choice<'a>(
    raw: &Value,
    required: bool,
    mut keys: impl Iterator<Item = &'a str>,
) -> Result<Value, InputRejection> {
    let selected = text_of(raw).unwrap_or_default();
    if selected.is_empty() {
        return if required {
            Err(FormError::required("Please select an option").into())
        } else {
            Ok(Value::Null)
        };
    }
    if keys.any(|k| k == selected) {
        Ok(Value::String(selected))
    } else {
        Err(FormError::custom("Please select a valid option").into())
    }
}

// ---------------------------------------------------------------------------
// Radio group
// ---------------------------------------------------------------------------

pub struct RadioGroupConfig;

impl PatternConfig for RadioGroupConfig {
    fn pattern_type(&self) -> PatternType {
        PatternType::RadioGroup
    }

    fn display_name(&self) -> &'static str {
        "Radio buttons"
    }

    fn initial(&self) -> PatternData {
        use formwright_types::pattern::ChoiceOption;
        PatternData::RadioGroup(RadioGroupData {
            label: "Radio group label".to_string(),
            options: vec![
                ChoiceOption {
                    id: "option-1".to_string(),
                    label: "Option 1".to_string(),
                },
                ChoiceOption {
                    id: "option-2".to_string(),
                    label: "Option 2".to_string(),
                },
            ],
            required: false,
        })
    }

    fn parse_config_data(&self, raw: &Value) -> Result<PatternData, FormErrors> {
        let data = parse_data::<RadioGroupData>(raw)?;
        let mut errors = FormErrors::new();
        require_text(&mut errors, "label", &data.label, "A label is required");
        validate_options(
            &mut errors,
            data.options.iter().map(|o| (o.id.as_str(), o.label.as_str())),
        );
        if errors.is_empty() {
            Ok(PatternData::RadioGroup(data))
        } else {
            Err(errors)
        }
    }

    fn input(&self) -> Option<&dyn InputParser> {
        Some(self)
    }

    fn create_prompt(
        &self,
        ctx: &PromptContext<'_>,
        pattern: &Pattern,
    ) -> Result<PromptComponent, RegistryError> {
        let PatternData::RadioGroup(data) = &pattern.data else {
            return Err(mismatch(self.pattern_type(), pattern));
        };
        let group_id = ctx.field_id(&pattern.id);
        let selected = ctx.value(&pattern.id).and_then(Value::as_str);
        let options = data
            .options
            .iter()
            .map(|option| RadioOptionProps {
                id: format!("{group_id}.{}", option.id),
                name: group_id.clone(),
                label: option.label.clone(),
                checked: selected == Some(option.id.as_str()),
            })
            .collect();
        Ok(PromptComponent::leaf(PromptProps::RadioGroup {
            group_id,
            legend: data.label.clone(),
            required: data.required,
            options,
            error: ctx.error(&pattern.id).cloned(),
        }))
    }
}

impl InputParser for RadioGroupConfig {
    fn initial_value(&self, _pattern: &Pattern) -> Value {
        Value::Null
    }

    fn parse_user_input(
        &self,
        _ctx: &ParseContext<'_>,
        pattern: &Pattern,
        raw: &Value,
    ) -> Result<Value, InputRejection> {
        let PatternData::RadioGroup(data) = &pattern.data else {
            return Err(unsupported(self.pattern_type(), pattern));
        };
        parse_choice(raw, data.required, data.options.iter().map(|o| o.id.as_str()))
    }
}

// ---------------------------------------------------------------------------
// Select dropdown
// ---------------------------------------------------------------------------

pub struct SelectDropdownConfig;

impl PatternConfig for SelectDropdownConfig {
    fn pattern_type(&self) -> PatternType {
        PatternType::SelectDropdown
    }

    fn display_name(&self) -> &'static str {
        "Dropdown"
    }

    fn initial(&self) -> PatternData {
        use formwright_types::pattern::SelectOption;
        PatternData::SelectDropdown(SelectDropdownData {
            label: "Select an option".to_string(),
            options: vec![
                SelectOption {
                    value: "value1".to_string(),
                    label: "Option 1".to_string(),
                },
                SelectOption {
                    value: "value2".to_string(),
                    label: "Option 2".to_string(),
                },
            ],
            required: true,
        })
    }

    fn parse_config_data(&self, raw: &Value) -> Result<PatternData, FormErrors> {
        let data = parse_data::<SelectDropdownData>(raw)?;
        let mut errors = FormErrors::new();
        require_text(&mut errors, "label", &data.label, "A label is required");
        validate_options(
            &mut errors,
            data.options
                .iter()
                .map(|o| (o.value.as_str(), o.label.as_str())),
        );
        if errors.is_empty() {
            Ok(PatternData::SelectDropdown(data))
        } else {
            Err(errors)
        }
    }

    fn input(&self) -> Option<&dyn InputParser> {
        Some(self)
    }

    fn create_prompt(
        &self,
        ctx: &PromptContext<'_>,
        pattern: &Pattern,
    ) -> Result<PromptComponent, RegistryError> {
        let PatternData::SelectDropdown(data) = &pattern.data else {
            return Err(mismatch(self.pattern_type(), pattern));
        };
        let selected = ctx.value(&pattern.id).and_then(Value::as_str);
        let options = data
            .options
            .iter()
            .map(|option| SelectOptionProps {
                value: option.value.clone(),
                label: option.label.clone(),
                selected: selected == Some(option.value.as_str()),
            })
            .collect();
        Ok(PromptComponent::leaf(PromptProps::SelectDropdown {
            select_id: ctx.field_id(&pattern.id),
            label: data.label.clone(),
            required: data.required,
            options,
            error: ctx.error(&pattern.id).cloned(),
        }))
    }
}

impl InputParser for SelectDropdownConfig {
    fn initial_value(&self, _pattern: &Pattern) -> Value {
        Value::Null
    }

    fn parse_user_input(
        &self,
        _ctx: &ParseContext<'_>,
        pattern: &Pattern,
        raw: &Value,
    ) -> Result<Value, InputRejection> {
        let PatternData::SelectDropdown(data) = &pattern.data else {
            return Err(unsupported(self.pattern_type(), pattern));
        };
        parse_choice(
            raw,
            data.required,
            data.options.iter().map(|o| o.value.as_str()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::PatternRegistry;
    use formwright_types::blueprint::{Blueprint, FormSummary};
    use formwright_types::pattern::{PatternId, PatternMap};
    use formwright_types::session::FormErrorType;
    use serde_json::json;

    fn empty_form() -> Blueprint {
        Blueprint {
            summary: FormSummary::default(),
            root: PatternId::from("root"),
            patterns: PatternMap::new(),
            outputs: vec![],
        }
    }

    #[test]
    fn test_radio_accepts_known_option_only() {
        let registry = PatternRegistry::with_defaults();
        let form = empty_form();
        let ctx = ParseContext {
            registry: &registry,
            form: &form,
        };
        let pattern = Pattern::new(PatternId::from("radio"), RadioGroupConfig.initial());

        assert_eq!(
            RadioGroupConfig
                .parse_user_input(&ctx, &pattern, &json!("option-2"))
                .unwrap(),
            json!("option-2")
        );
        assert!(
            RadioGroupConfig
                .parse_user_input(&ctx, &pattern, &json!("option-9"))
                .is_err()
        );
        // Optional by default.
        assert_eq!(
            RadioGroupConfig
                .parse_user_input(&ctx, &pattern, &Value::Null)
                .unwrap(),
            Value::Null
        );
    }

    #[test]
    fn test_required_select_rejects_blank() {
        let registry = PatternRegistry::with_defaults();
        let form = empty_form();
        let ctx = ParseContext {
            registry: &registry,
            form: &form,
        };
        let pattern = Pattern::new(PatternId::from("select"), SelectDropdownConfig.initial());
        let err = SelectDropdownConfig
            .parse_user_input(&ctx, &pattern, &json!(""))
            .unwrap_err();
        assert_eq!(err.error.kind, FormErrorType::Required);
    }

    #[test]
    fn test_option_keys_validated() {
        let errors = RadioGroupConfig
            .parse_config_data(&json!({
                "label": "Pick one",
                "options": [{"id": "a b", "label": "A"}]
            }))
            .unwrap_err();
        assert!(errors.contains_key("options"));

        let errors = RadioGroupConfig
            .parse_config_data(&json!({
                "label": "Pick one",
                "options": [{"id": "a", "label": "A"}, {"id": "a", "label": "B"}]
            }))
            .unwrap_err();
        assert!(errors["options"].message.as_deref().unwrap().contains("Duplicate"));

        let errors = SelectDropdownConfig
            .parse_config_data(&json!({"label": "Pick one", "options": []}))
            .unwrap_err();
        assert_eq!(errors["options"].kind, FormErrorType::Required);
    }
}
