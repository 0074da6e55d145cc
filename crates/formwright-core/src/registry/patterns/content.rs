use formwright_types::error::RegistryError;
use formwright_types::pattern::{
    FormSummaryData, ParagraphData, Pattern, PatternData, PatternType,
};
use formwright_types::prompt::{PromptComponent, PromptProps};
use formwright_types::session::FormErrors;
use serde_json::Value;

use crate::prompt::PromptContext;
use crate::registry::{PatternConfig, mismatch, parse_data, require_text};

/// Title block shown at the top of a form.
pub struct FormSummaryConfig;

impl PatternConfig for FormSummaryConfig {
    fn pattern_type(&self) -> PatternType {
        PatternType::FormSummary
    }

    fn display_name(&self) -> &'static str {
        "Form summary"
    }

    fn initial(&self) -> PatternData {
        PatternData::FormSummary(FormSummaryData {
            title: "Form title".to_string(),
            description: "Form extended description".to_string(),
        })
    }

    fn parse_config_data(&self, raw: &Value) -> Result<PatternData, FormErrors> {
        let data = parse_data::<FormSummaryData>(raw)?;
        let mut errors = FormErrors::new();
        require_text(&mut errors, "title", &data.title, "A title is required");
        if errors.is_empty() {
            Ok(PatternData::FormSummary(data))
        } else {
            Err(errors)
        }
    }

    fn create_prompt(
        &self,
        _ctx: &PromptContext<'_>,
        pattern: &Pattern,
    ) -> Result<PromptComponent, RegistryError> {
        let PatternData::FormSummary(data) = &pattern.data else {
            return Err(mismatch(self.pattern_type(), pattern));
        };
        Ok(PromptComponent::leaf(PromptProps::FormSummary {
            title: data.title.clone(),
            description: data.description.clone(),
        }))
    }
}

/// Static explanatory text.
pub struct ParagraphConfig;

impl PatternConfig for ParagraphConfig {
    fn pattern_type(&self) -> PatternType {
        PatternType::Paragraph
    }

    fn display_name(&self) -> &'static str {
        "Paragraph"
    }

    fn initial(&self) -> PatternData {
        PatternData::Paragraph(ParagraphData {
            text: "Paragraph text...".to_string(),
        })
    }

    fn parse_config_data(&self, raw: &Value) -> Result<PatternData, FormErrors> {
        let data = parse_data::<ParagraphData>(raw)?;
        let mut errors = FormErrors::new();
        require_text(&mut errors, "text", &data.text, "Paragraph text is required");
        if errors.is_empty() {
            Ok(PatternData::Paragraph(data))
        } else {
            Err(errors)
        }
    }

    fn create_prompt(
        &self,
        _ctx: &PromptContext<'_>,
        pattern: &Pattern,
    ) -> Result<PromptComponent, RegistryError> {
        let PatternData::Paragraph(data) = &pattern.data else {
            return Err(mismatch(self.pattern_type(), pattern));
        };
        Ok(PromptComponent::leaf(PromptProps::Paragraph {
            text: data.text.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_form_summary_requires_title() {
        let errors = FormSummaryConfig
            .parse_config_data(&json!({"title": " ", "description": "x"}))
            .unwrap_err();
        assert!(errors.contains_key("title"));
    }

    #[test]
    fn test_paragraph_parse_config() {
        let data = ParagraphConfig
            .parse_config_data(&json!({"text": "Read carefully."}))
            .unwrap();
        assert_eq!(
            data,
            PatternData::Paragraph(ParagraphData {
                text: "Read carefully.".to_string()
            })
        );
    }
}
