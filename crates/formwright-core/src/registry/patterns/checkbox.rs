use formwright_types::error::RegistryError;
use formwright_types::pattern::{CheckboxData, Pattern, PatternData, PatternType};
use formwright_types::prompt::{PromptComponent, PromptProps};
use formwright_types::session::{FormError, FormErrors, InputRejection};
use serde_json::Value;

use crate::prompt::PromptContext;
use crate::registry::{
    InputParser, ParseContext, PatternConfig, mismatch, parse_data, require_text, unsupported,
};

/// A single yes/no box. Unchecked boxes are absent from submissions.
pub struct CheckboxConfig;

impl PatternConfig for CheckboxConfig {
    fn pattern_type(&self) -> PatternType {
        PatternType::Checkbox
    }

    fn display_name(&self) -> &'static str {
        "Checkbox"
    }

    fn initial(&self) -> PatternData {
        PatternData::Checkbox(CheckboxData {
            label: "Checkbox label".to_string(),
            default_checked: false,
        })
    }

    fn parse_config_data(&self, raw: &Value) -> Result<PatternData, FormErrors> {
        let data = parse_data::<CheckboxData>(raw)?;
        let mut errors = FormErrors::new();
        require_text(&mut errors, "label", &data.label, "A checkbox label is required");
        if errors.is_empty() {
            Ok(PatternData::Checkbox(data))
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
        let PatternData::Checkbox(data) = &pattern.data else {
            return Err(mismatch(self.pattern_type(), pattern));
        };
        let checked = ctx
            .value(&pattern.id)
            .and_then(Value::as_bool)
            .unwrap_or(data.default_checked);
        Ok(PromptComponent::leaf(PromptProps::Checkbox {
            id: ctx.field_id(&pattern.id),
            label: data.label.clone(),
            checked,
            error: ctx.error(&pattern.id).cloned(),
        }))
    }
}

impl InputParser for CheckboxConfig {
    fn initial_value(&self, pattern: &Pattern) -> Value {
        match &pattern.data {
            PatternData::Checkbox(data) => Value::Bool(data.default_checked),
            _ => Value::Bool(false),
        }
    }

    fn parse_user_input(
        &self,
        _ctx: &ParseContext<'_>,
        pattern: &Pattern,
        raw: &Value,
    ) -> Result<Value, InputRejection> {
        if !matches!(pattern.data, PatternData::Checkbox(_)) {
            return Err(unsupported(self.pattern_type(), pattern));
        }
        match raw {
            Value::Null => Ok(Value::Bool(false)),
            Value::Bool(b) => Ok(Value::Bool(*b)),
            Value::String(s) => match s.as_str() {
                "on" | "true" | "checked" => Ok(Value::Bool(true)),
                "" | "off" | "false" => Ok(Value::Bool(false)),
                _ => Err(FormError::custom("Invalid checkbox value").into()),
            },
            _ => Err(FormError::custom("Invalid checkbox value").into()),
        }
    }
}
