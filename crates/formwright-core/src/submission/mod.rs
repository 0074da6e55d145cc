//! Submission actions.
//!
//! Submit controls carry an action string `action/<handlerId>/<patternId>`.
//! The `SubmissionRegistry` resolves the handler and the target pattern and
//! runs the handler, which returns a new session snapshot.
//!
//! Handlers are async via RPITIT, so `BoxSubmissionHandler` erases them for
//! the registry's map:
//! 1. `SubmissionHandlerDyn` is the object-safe version with boxed futures
//! 2. it is blanket-implemented for every `T: SubmissionHandler`
//! 3. `BoxSubmissionHandler` wraps `Box<dyn SubmissionHandlerDyn>` and delegates

mod repeater;
mod submit;

pub use repeater::{RepeaterAddRowHandler, RepeaterDeleteRowHandler};
pub use submit::SubmitHandler;

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use formwright_types::config::EngineConfig;
use formwright_types::error::SubmissionError;
use formwright_types::pattern::{Pattern, PatternId};
use formwright_types::session::{FlatValues, FormSession};

use crate::registry::PatternRegistry;

pub const SUBMIT: &str = "submit";
pub const REPEATER_ADD_ROW: &str = "repeater-add-row";
pub const REPEATER_DELETE_ROW: &str = "repeater-delete-row";

/// Submitted field naming the row a delete-row action targets.
pub const DELETE_ROW_INDEX_FIELD: &str = "repeater-row-index";

const ACTION_PREFIX: &str = "action/";

/// Encode an action string for a submit control.
pub fn action_string(handler: &str, pattern_id: &PatternId) -> String {
    format!("{ACTION_PREFIX}{handler}/{pattern_id}")
}

fn is_action_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// Split `action/<handlerId>/<patternId>` into its two ids.
pub fn parse_action(action: &str) -> Result<(&str, &str), SubmissionError> {
    action
        .strip_prefix(ACTION_PREFIX)
        .and_then(|rest| rest.split_once('/'))
        .filter(|(handler, pattern)| is_action_segment(handler) && is_action_segment(pattern))
        .ok_or_else(|| SubmissionError::MalformedAction(action.to_string()))
}

// ---------------------------------------------------------------------------
// Handler trait
// ---------------------------------------------------------------------------

/// Inputs of one handler invocation.
#[derive(Clone, Copy)]
pub struct SubmissionContext<'a> {
    pub registry: &'a PatternRegistry,
    pub session: &'a FormSession,
    /// The pattern named by the action string.
    pub pattern: &'a Pattern,
    /// Flat submitted fields.
    pub data: &'a FlatValues,
}

/// Result of a handler: the next session and whether it differs.
#[derive(Debug, Clone, PartialEq)]
pub struct HandlerOutcome {
    pub session: FormSession,
    pub changed: bool,
}

impl HandlerOutcome {
    pub fn unchanged(session: &FormSession) -> Self {
        Self {
            session: session.clone(),
            changed: false,
        }
    }

    pub fn changed(session: FormSession) -> Self {
        Self {
            session,
            changed: true,
        }
    }
}

/// A session-mutating action.
///
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait SubmissionHandler: Send + Sync {
    /// Id used in action strings.
    fn id(&self) -> &str;

    fn handle(
        &self,
        ctx: SubmissionContext<'_>,
    ) -> impl Future<Output = Result<HandlerOutcome, SubmissionError>> + Send;
}

/// Object-safe version of [`SubmissionHandler`] with boxed futures.
pub trait SubmissionHandlerDyn: Send + Sync {
    fn id(&self) -> &str;

    fn handle_boxed<'a>(
        &'a self,
        ctx: SubmissionContext<'a>,
    ) -> Pin<Box<dyn Future<Output = Result<HandlerOutcome, SubmissionError>> + Send + 'a>>;
}

impl<T: SubmissionHandler> SubmissionHandlerDyn for T {
    fn id(&self) -> &str {
        SubmissionHandler::id(self)
    }

    fn handle_boxed<'a>(
        &'a self,
        ctx: SubmissionContext<'a>,
    ) -> Pin<Box<dyn Future<Output = Result<HandlerOutcome, SubmissionError>> + Send + 'a>> {
        Box::pin(self.handle(ctx))
    }
}

/// Type-erased submission handler.
pub struct BoxSubmissionHandler {
    inner: Box<dyn SubmissionHandlerDyn>,
}

impl BoxSubmissionHandler {
    pub fn new<T: SubmissionHandler + 'static>(handler: T) -> Self {
        Self {
            inner: Box::new(handler),
        }
    }

    pub fn id(&self) -> &str {
        self.inner.id()
    }

    pub async fn handle(
        &self,
        ctx: SubmissionContext<'_>,
    ) -> Result<HandlerOutcome, SubmissionError> {
        self.inner.handle_boxed(ctx).await
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// A resolved action: the handler to run and the pattern it targets.
pub struct ResolvedAction<'r, 's> {
    pub handler: &'r BoxSubmissionHandler,
    pub pattern: &'s Pattern,
}

/// Registry of submission handlers keyed by handler id.
pub struct SubmissionRegistry {
    handlers: HashMap<String, BoxSubmissionHandler>,
}

impl SubmissionRegistry {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Registry holding `submit`, `repeater-add-row` and `repeater-delete-row`.
    pub fn with_defaults(config: &EngineConfig) -> Self {
        let mut registry = Self::new();
        registry.register(SubmitHandler);
        registry.register(RepeaterAddRowHandler::new(config.repeater_initial_rows));
        registry.register(RepeaterDeleteRowHandler);
        registry
    }

    /// Register a handler under its own id, replacing any existing one.
    pub fn register<H: SubmissionHandler + 'static>(&mut self, handler: H) {
        let id = SubmissionHandler::id(&handler).to_string();
        tracing::debug!(handler = %id, "registered submission handler");
        self.handlers.insert(id, BoxSubmissionHandler::new(handler));
    }

    pub fn get(&self, id: &str) -> Option<&BoxSubmissionHandler> {
        self.handlers.get(id)
    }

    /// Registered handler ids, sorted.
    pub fn list(&self) -> Vec<&str> {
        let mut ids: Vec<_> = self.handlers.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Resolve an action string against the session's current blueprint.
    pub fn get_handler_for_action<'s>(
        &self,
        session: &'s FormSession,
        action: &str,
    ) -> Result<ResolvedAction<'_, 's>, SubmissionError> {
        let (handler_id, pattern_id) = parse_action(action)?;
        let handler = self
            .get(handler_id)
            .ok_or_else(|| SubmissionError::UnknownHandler(handler_id.to_string()))?;
        let pattern = session
            .form
            .get(pattern_id)
            .ok_or_else(|| SubmissionError::PatternNotFound(pattern_id.to_string()))?;
        Ok(ResolvedAction { handler, pattern })
    }

    /// Resolve and run an action, recording it as the session's last action.
    pub async fn handle_action(
        &self,
        registry: &PatternRegistry,
        session: &FormSession,
        action: &str,
        data: &FlatValues,
    ) -> Result<HandlerOutcome, SubmissionError> {
        let resolved = self.get_handler_for_action(session, action)?;
        let ctx = SubmissionContext {
            registry,
            session,
            pattern: resolved.pattern,
            data,
        };
        let mut outcome = resolved.handler.handle(ctx).await?;
        outcome.session.data.last_action = Some(action.to_string());
        tracing::info!(
            action = %action,
            changed = outcome.changed,
            "handled submission action"
        );
        Ok(outcome)
    }
}

impl Default for SubmissionRegistry {
    fn default() -> Self {
        Self::with_defaults(&EngineConfig::default())
    }
}
