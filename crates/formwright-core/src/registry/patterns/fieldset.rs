use formwright_types::error::RegistryError;
use formwright_types::pattern::{
    FieldsetData, Pattern, PatternData, PatternId, PatternMap, PatternType,
};
use formwright_types::prompt::{PromptComponent, PromptProps};
use formwright_types::session::FormErrors;
use serde_json::Value;

use crate::prompt::PromptContext;
use crate::registry::{PatternConfig, lookup_children, mismatch, parse_data, without_child};

/// Groups related fields under a legend. Validated through its children.
pub struct FieldsetConfig;

impl PatternConfig for FieldsetConfig {
    fn pattern_type(&self) -> PatternType {
        PatternType::Fieldset
    }

    fn display_name(&self) -> &'static str {
        "Question group"
    }

    fn initial(&self) -> PatternData {
        PatternData::Fieldset(FieldsetData {
            legend: "Default Heading".to_string(),
            patterns: Vec::new(),
        })
    }

    fn parse_config_data(&self, raw: &Value) -> Result<PatternData, FormErrors> {
        parse_data::<FieldsetData>(raw).map(PatternData::Fieldset)
    }

    fn children<'p>(&self, pattern: &Pattern, patterns: &'p PatternMap) -> Vec<&'p Pattern> {
        match &pattern.data {
            PatternData::Fieldset(data) => lookup_children(pattern, &data.patterns, patterns),
            _ => Vec::new(),
        }
    }

    fn remove_child_pattern(&self, pattern: &Pattern, id: &PatternId) -> Pattern {
        without_child(pattern, id)
    }

    fn create_prompt(
        &self,
        ctx: &PromptContext<'_>,
        pattern: &Pattern,
    ) -> Result<PromptComponent, RegistryError> {
        let PatternData::Fieldset(data) = &pattern.data else {
            return Err(mismatch(self.pattern_type(), pattern));
        };
        Ok(PromptComponent::with_children(
            PromptProps::Fieldset {
                legend: data.legend.clone(),
            },
            ctx.render_children(pattern)?,
        ))
    }
}
