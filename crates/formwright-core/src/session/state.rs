//! Session lookups, merging, pruning, and completion checks.

use formwright_types::error::SessionError;
use formwright_types::session::{
    FormError, FormSession, SessionErrors, SessionValues, session_key_root,
};
use serde_json::Value;

use crate::blueprint::walk::input_patterns;
use crate::registry::{ParseContext, PatternRegistry};

pub fn get_form_session_value<'s>(session: &'s FormSession, key: &str) -> Option<&'s Value> {
    session.data.values.get(key)
}

pub fn get_form_session_error<'s>(session: &'s FormSession, key: &str) -> Option<&'s FormError> {
    session.data.errors.get(key)
}

fn check_key(session: &FormSession, key: &str) -> Result<(), SessionError> {
    if session.form.contains(session_key_root(key)) {
        Ok(())
    } else {
        Err(SessionError::UnknownKey(key.to_string()))
    }
}

/// Merge values and errors into a new session.
///
/// Fails without changing anything unless every key's first segment names
/// a pattern of the session's blueprint.
pub fn update_session(
    session: &FormSession,
    values: SessionValues,
    errors: SessionErrors,
) -> Result<FormSession, SessionError> {
    for key in values.keys().chain(errors.keys()) {
        check_key(session, key)?;
    }
    let mut next = session.clone();
    next.data.values.extend(values);
    next.data.errors.extend(errors);
    Ok(next)
}

/// Drop values and errors whose pattern no longer exists.
pub fn prune_session(session: &FormSession) -> FormSession {
    let mut next = session.clone();
    let form = &session.form;
    let before = next.data.values.len() + next.data.errors.len();
    next.data
        .values
        .retain(|key, _| form.contains(session_key_root(key)));
    next.data
        .errors
        .retain(|key, _| form.contains(session_key_root(key)));
    let dropped = before - next.data.values.len() - next.data.errors.len();
    if dropped > 0 {
        tracing::debug!(dropped, "pruned orphaned session entries");
    }
    next
}

/// Whether every input-bearing pattern reachable from the root accepts its
/// current value. Orphaned patterns are ignored.
pub fn session_is_complete(
    registry: &PatternRegistry,
    session: &FormSession,
) -> Result<bool, SessionError> {
    let ctx = ParseContext {
        registry,
        form: &session.form,
    };
    for pattern in input_patterns(registry, &session.form)? {
        let Some(parser) = registry.config_for(pattern)?.input() else {
            continue;
        };
        let value = session
            .data
            .values
            .get(pattern.id.as_str())
            .unwrap_or(&Value::Null);
        if parser.parse_user_input(&ctx, pattern, value).is_err() {
            tracing::debug!(pattern_id = %pattern.id, "session incomplete");
            return Ok(false);
        }
    }
    Ok(true)
}
