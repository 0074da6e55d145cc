//! Prompt derivation: (blueprint, session) -> render-agnostic component tree.
//!
//! Rendering recurses from the root, delegating every node to its type's
//! `PatternConfig::create_prompt`. Inside a repeater row the context is
//! scoped so children read their values from the row object and their wire
//! names and errors from `<repeaterId>.<row>.<childId>`.

use formwright_types::blueprint::Blueprint;
use formwright_types::error::{RegistryError, SessionError};
use formwright_types::pattern::{Pattern, PatternId};
use formwright_types::prompt::{ConfirmationRow, Prompt, PromptComponent, PromptProps};
use formwright_types::session::{FormError, FormSession};
use serde_json::Value;

use crate::blueprint::walk::input_patterns;
use crate::registry::PatternRegistry;
use crate::session::session_is_complete;

/// Options controlling prompt derivation.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptOptions {
    /// Show the confirmation table instead of the form once every field
    /// validates.
    pub validate: bool,
}

#[derive(Clone)]
struct RowScope<'a> {
    prefix: String,
    row: &'a Value,
}

/// Everything a pattern's `create_prompt` can read while rendering.
#[derive(Clone)]
pub struct PromptContext<'a> {
    pub registry: &'a PatternRegistry,
    pub session: &'a FormSession,
    pub options: PromptOptions,
    scope: Option<RowScope<'a>>,
}

impl<'a> PromptContext<'a> {
    pub fn new(
        registry: &'a PatternRegistry,
        session: &'a FormSession,
        options: PromptOptions,
    ) -> Self {
        Self {
            registry,
            session,
            options,
            scope: None,
        }
    }

    pub fn form(&self) -> &'a Blueprint {
        &self.session.form
    }

    /// Wire name of a pattern's field in the current scope.
    pub fn field_id(&self, id: &PatternId) -> String {
        match &self.scope {
            Some(scope) => format!("{}.{}", scope.prefix, id),
            None => id.to_string(),
        }
    }

    /// Current value of a pattern, read from the active row when scoped.
    pub fn value(&self, id: &PatternId) -> Option<&'a Value> {
        match &self.scope {
            Some(scope) => {
                let row: &'a Value = scope.row;
                row.get(id.as_str())
            }
            None => self.session.data.values.get(id.as_str()),
        }
    }

    pub fn error(&self, id: &PatternId) -> Option<&'a FormError> {
        self.session.data.errors.get(&self.field_id(id))
    }

    /// Context for rendering row `index` of the repeater `repeater_id`.
    pub fn in_row(&self, repeater_id: &PatternId, index: usize, row: &'a Value) -> Self {
        Self {
            scope: Some(RowScope {
                prefix: format!("{}.{}", self.field_id(repeater_id), index),
                row,
            }),
            ..self.clone()
        }
    }

    pub fn render(&self, pattern: &Pattern) -> Result<PromptComponent, RegistryError> {
        self.registry
            .config_for(pattern)?
            .create_prompt(self, pattern)
    }

    /// Render every direct child of a container, in order.
    pub fn render_children(
        &self,
        pattern: &Pattern,
    ) -> Result<Vec<PromptComponent>, RegistryError> {
        self.registry
            .children(pattern, &self.form().patterns)?
            .into_iter()
            .map(|child| self.render(child))
            .collect()
    }
}

/// Derive the prompt for a session.
///
/// With `options.validate` set and every reachable field valid, the result
/// is a single `submission-confirmation` component listing labelled values
/// in the order the values were first stored.
pub fn create_prompt(
    registry: &PatternRegistry,
    session: &FormSession,
    options: PromptOptions,
) -> Result<Prompt, SessionError> {
    if options.validate && session_is_complete(registry, session)? {
        tracing::debug!("session complete, rendering confirmation");
        return Ok(Prompt {
            components: vec![confirmation(registry, session)?],
        });
    }

    let form = &session.form;
    let root = form
        .root_pattern()
        .ok_or_else(|| SessionError::PatternNotFound(form.root.clone()))?;
    let ctx = PromptContext::new(registry, session, options);
    Ok(Prompt {
        components: vec![ctx.render(root)?],
    })
}

fn confirmation(
    registry: &PatternRegistry,
    session: &FormSession,
) -> Result<PromptComponent, SessionError> {
    let fields = input_patterns(registry, &session.form)?;
    let table = session
        .data
        .values
        .iter()
        .filter_map(|(key, value)| {
            let pattern = fields.iter().find(|p| p.id.as_str() == key)?;
            Some(ConfirmationRow {
                label: pattern.data.label().unwrap_or_default().to_string(),
                value: value.clone(),
            })
        })
        .collect();
    Ok(PromptComponent::leaf(PromptProps::SubmissionConfirmation {
        table,
    }))
}
