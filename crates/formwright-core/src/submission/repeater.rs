//! Repeater row add/delete actions.

use formwright_types::error::SubmissionError;
use formwright_types::pattern::{Pattern, PatternMap, PatternType};
use formwright_types::session::FormSession;
use indexmap::IndexMap;
use serde_json::{Map, Value};

use super::{
    DELETE_ROW_INDEX_FIELD, HandlerOutcome, REPEATER_ADD_ROW, REPEATER_DELETE_ROW,
    SubmissionContext, SubmissionHandler,
};
use crate::registry::PatternRegistry;

fn expect_repeater(pattern: &Pattern) -> Result<(), SubmissionError> {
    if pattern.pattern_type() == PatternType::Repeater {
        Ok(())
    } else {
        Err(SubmissionError::InvalidInput(format!(
            "pattern '{}' is a {}, not a repeater",
            pattern.id,
            pattern.pattern_type()
        )))
    }
}

fn current_rows<'s>(session: &'s FormSession, pattern: &Pattern) -> &'s [Value] {
    match session.data.values.get(pattern.id.as_str()) {
        Some(Value::Array(rows)) => rows,
        _ => &[],
    }
}

/// One row holding each template child's untouched value.
fn blank_row(
    registry: &PatternRegistry,
    patterns: &PatternMap,
    repeater: &Pattern,
) -> Result<Value, SubmissionError> {
    let mut row = Map::new();
    for child in registry.children(repeater, patterns)? {
        if let Some(parser) = registry.config_for(child)?.input() {
            row.insert(child.id.to_string(), parser.initial_value(child));
        }
    }
    Ok(Value::Object(row))
}

/// Row index of a `<repeaterId>.<index>.<rest>` key, split from its rest.
fn row_key<'k>(key: &'k str, repeater_id: &str) -> Option<(usize, &'k str)> {
    let tail = key.strip_prefix(repeater_id)?.strip_prefix('.')?;
    let (index, rest) = tail.split_once('.')?;
    Some((index.parse().ok()?, rest))
}

/// Drop entries of row `deleted` and renumber later rows down by one.
fn shift_rows<V>(
    entries: IndexMap<String, V>,
    repeater_id: &str,
    deleted: usize,
) -> IndexMap<String, V> {
    entries
        .into_iter()
        .filter_map(|(key, value)| match row_key(&key, repeater_id) {
            Some((index, _)) if index == deleted => None,
            Some((index, rest)) if index > deleted => {
                Some((format!("{repeater_id}.{}.{rest}", index - 1), value))
            }
            _ => Some((key, value)),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Add row
// ---------------------------------------------------------------------------

/// Append rows to a repeater: `initial_rows` when it is empty, else one.
pub struct RepeaterAddRowHandler {
    initial_rows: usize,
}

impl RepeaterAddRowHandler {
    pub fn new(initial_rows: usize) -> Self {
        Self { initial_rows }
    }
}

impl SubmissionHandler for RepeaterAddRowHandler {
    fn id(&self) -> &str {
        REPEATER_ADD_ROW
    }

    async fn handle(&self, ctx: SubmissionContext<'_>) -> Result<HandlerOutcome, SubmissionError> {
        expect_repeater(ctx.pattern)?;
        let rows = current_rows(ctx.session, ctx.pattern);
        let added = if rows.is_empty() { self.initial_rows } else { 1 };
        if added == 0 {
            return Ok(HandlerOutcome::unchanged(ctx.session));
        }

        let blank = blank_row(ctx.registry, &ctx.session.form.patterns, ctx.pattern)?;
        let mut next_rows = rows.to_vec();
        next_rows.extend(std::iter::repeat_n(blank, added));

        let mut next = ctx.session.clone();
        next.data
            .values
            .insert(ctx.pattern.id.to_string(), Value::Array(next_rows));
        tracing::debug!(pattern_id = %ctx.pattern.id, added, "added repeater rows");
        Ok(HandlerOutcome::changed(next))
    }
}

// ---------------------------------------------------------------------------
// Delete row
// ---------------------------------------------------------------------------

/// Remove the row named by the `repeater-row-index` field, along with every
/// session entry under `<repeaterId>.<index>.`. Entries of later rows move
/// down one index, and the repeater's own error is cleared until the next
/// submit revalidates it.
pub struct RepeaterDeleteRowHandler;

impl SubmissionHandler for RepeaterDeleteRowHandler {
    fn id(&self) -> &str {
        REPEATER_DELETE_ROW
    }

    async fn handle(&self, ctx: SubmissionContext<'_>) -> Result<HandlerOutcome, SubmissionError> {
        expect_repeater(ctx.pattern)?;
        let raw_index = ctx.data.get(DELETE_ROW_INDEX_FIELD).ok_or_else(|| {
            SubmissionError::InvalidInput(format!("missing '{DELETE_ROW_INDEX_FIELD}' field"))
        })?;
        let index: usize = raw_index.trim().parse().map_err(|_| {
            SubmissionError::InvalidInput(format!("row index '{raw_index}' is not a number"))
        })?;

        let mut rows = current_rows(ctx.session, ctx.pattern).to_vec();
        if index >= rows.len() {
            return Ok(HandlerOutcome::unchanged(ctx.session));
        }
        rows.remove(index);

        let mut next = ctx.session.clone();
        let repeater_key = ctx.pattern.id.as_str();
        next.data.values = shift_rows(next.data.values, repeater_key, index);
        next.data
            .values
            .insert(repeater_key.to_string(), Value::Array(rows));
        next.data.errors = shift_rows(next.data.errors, repeater_key, index);
        next.data.errors.shift_remove(repeater_key);
        tracing::debug!(pattern_id = %ctx.pattern.id, index, "deleted repeater row");
        Ok(HandlerOutcome::changed(next))
    }
}
