use formwright_types::error::RegistryError;
use formwright_types::pattern::{PageData, Pattern, PatternData, PatternId, PatternMap, PatternType};
use formwright_types::prompt::{PromptComponent, PromptProps};
use formwright_types::session::FormErrors;
use serde_json::Value;

use crate::prompt::PromptContext;
use crate::registry::{PatternConfig, lookup_children, mismatch, parse_data, without_child};
use crate::submission::{SUBMIT, action_string};

pub struct PageConfig;

impl PatternConfig for PageConfig {
    fn pattern_type(&self) -> PatternType {
        PatternType::Page
    }

    fn display_name(&self) -> &'static str {
        "Page"
    }

    fn initial(&self) -> PatternData {
        PatternData::Page(PageData {
            title: "Untitled Page".to_string(),
            patterns: Vec::new(),
        })
    }

    fn parse_config_data(&self, raw: &Value) -> Result<PatternData, FormErrors> {
        parse_data::<PageData>(raw).map(PatternData::Page)
    }

    fn children<'p>(&self, pattern: &Pattern, patterns: &'p PatternMap) -> Vec<&'p Pattern> {
        match &pattern.data {
            PatternData::Page(data) => lookup_children(pattern, &data.patterns, patterns),
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
        let PatternData::Page(data) = &pattern.data else {
            return Err(mismatch(self.pattern_type(), pattern));
        };
        Ok(PromptComponent::with_children(
            PromptProps::Page {
                id: pattern.id.to_string(),
                title: data.title.clone(),
                submit_action: action_string(SUBMIT, &pattern.id),
            },
            ctx.render_children(pattern)?,
        ))
    }
}
