use formwright_types::error::RegistryError;
use formwright_types::pattern::{
    PageSetData, Pattern, PatternData, PatternId, PatternMap, PatternType,
};
use formwright_types::prompt::{PageLink, PromptComponent, PromptProps};
use formwright_types::session::FormErrors;
use serde_json::Value;

use crate::prompt::PromptContext;
use crate::registry::{PatternConfig, lookup_children, mismatch, parse_data, without_child};

/// Root container holding the form's pages.
///
/// Only the route-selected page (`?page=N`, default 0) is rendered.
pub struct PageSetConfig;

impl PatternConfig for PageSetConfig {
    fn pattern_type(&self) -> PatternType {
        PatternType::PageSet
    }

    fn display_name(&self) -> &'static str {
        "Page set"
    }

    fn initial(&self) -> PatternData {
        PatternData::PageSet(PageSetData::default())
    }

    fn parse_config_data(&self, raw: &Value) -> Result<PatternData, FormErrors> {
        parse_data::<PageSetData>(raw).map(PatternData::PageSet)
    }

    fn children<'p>(&self, pattern: &Pattern, patterns: &'p PatternMap) -> Vec<&'p Pattern> {
        match &pattern.data {
            PatternData::PageSet(data) => lookup_children(pattern, &data.pages, patterns),
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
        if !matches!(pattern.data, PatternData::PageSet(_)) {
            return Err(mismatch(self.pattern_type(), pattern));
        }

        let pages = self.children(pattern, &ctx.form().patterns);
        let requested = ctx
            .session
            .route
            .as_ref()
            .and_then(|r| r.page_index())
            .unwrap_or(0);
        let active_page = requested.min(pages.len().saturating_sub(1));

        let links = pages
            .iter()
            .enumerate()
            .map(|(i, page)| PageLink {
                title: match &page.data {
                    PatternData::Page(data) if !data.title.is_empty() => data.title.clone(),
                    _ => format!("Page {}", i + 1),
                },
                selected: i == active_page,
            })
            .collect();

        let children = match pages.get(active_page) {
            Some(page) => vec![ctx.render(page)?],
            None => Vec::new(),
        };

        Ok(PromptComponent::with_children(
            PromptProps::PageSet {
                pages: links,
                active_page,
            },
            children,
        ))
    }
}
