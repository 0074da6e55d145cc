use formwright_types::error::RegistryError;
use formwright_types::pattern::{InputData, Pattern, PatternData, PatternType};
use formwright_types::prompt::{PromptComponent, PromptProps};
use formwright_types::session::{FormError, FormErrors, InputRejection};
use serde_json::Value;

use crate::prompt::PromptContext;
use crate::registry::{
    InputParser, ParseContext, PatternConfig, mismatch, parse_data, require_text, text_of,
    unsupported,
};

/// Single-line text input.
pub struct InputConfig;

impl PatternConfig for InputConfig {
    fn pattern_type(&self) -> PatternType {
        PatternType::Input
    }

    fn display_name(&self) -> &'static str {
        "Short answer"
    }

    fn initial(&self) -> PatternData {
        PatternData::Input(InputData {
            label: "Field label".to_string(),
            initial: String::new(),
            required: true,
            max_length: None,
        })
    }

    fn parse_config_data(&self, raw: &Value) -> Result<PatternData, FormErrors> {
        let data = parse_data::<InputData>(raw)?;
        let mut errors = FormErrors::new();
        require_text(&mut errors, "label", &data.label, "A field label is required");
        match data.max_length {
            Some(0) => {
                errors.insert(
                    "maxLength".to_string(),
                    FormError::custom("Maximum length must be greater than zero"),
                );
            }
            Some(max) if data.initial.chars().count() > max as usize => {
                errors.insert(
                    "initial".to_string(),
                    FormError::custom(format!("Default value must be {max} characters or fewer")),
                );
            }
            _ => {}
        }
        if errors.is_empty() {
            Ok(PatternData::Input(data))
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
        let PatternData::Input(data) = &pattern.data else {
            return Err(mismatch(self.pattern_type(), pattern));
        };
        let value = ctx
            .value(&pattern.id)
            .and_then(Value::as_str)
            .unwrap_or(&data.initial)
            .to_string();
        Ok(PromptComponent::leaf(PromptProps::Input {
            input_id: ctx.field_id(&pattern.id),
            label: data.label.clone(),
            required: data.required,
            value,
            max_length: data.max_length,
            error: ctx.error(&pattern.id).cloned(),
        }))
    }
}

impl InputParser for InputConfig {
    fn initial_value(&self, pattern: &Pattern) -> Value {
        match &pattern.data {
            PatternData::Input(data) => Value::String(data.initial.clone()),
            _ => Value::String(String::new()),
        }
    }

    fn parse_user_input(
        &self,
        _ctx: &ParseContext<'_>,
        pattern: &Pattern,
        raw: &Value,
    ) -> Result<Value, InputRejection> {
        let PatternData::Input(data) = &pattern.data else {
            return Err(unsupported(self.pattern_type(), pattern));
        };
        let text = text_of(raw).unwrap_or_default();

        if data.required && text.trim().is_empty() {
            return Err(FormError::required("This field is required").into());
        }
        if let Some(max) = data.max_length {
            if text.chars().count() > max as usize {
                return Err(FormError::custom(format!("Must be {max} characters or fewer")).into());
            }
        }
        Ok(Value::String(text))
    }
}
