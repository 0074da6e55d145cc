//! Submission wire decoding.
//!
//! Submitted forms arrive flat: dot-joined paths to string values. Paths
//! mirror the pattern tree (`<patternId>.<subfield>`), and the segment that
//! follows a repeater id is a row index. Decoding consults the blueprint to
//! make that choice instead of guessing from the segment's spelling.

use formwright_types::blueprint::Blueprint;
use formwright_types::pattern::PatternType;
use formwright_types::session::FlatValues;
use serde_json::{Map, Value};

/// Highest row count a submission may address in a single repeater.
pub const MAX_REPEATER_ROWS: usize = 1000;

enum Segment<'k> {
    Key(&'k str),
    Index(usize),
}

fn is_repeater(form: &Blueprint, id: &str) -> bool {
    form.get(id)
        .is_some_and(|p| p.pattern_type() == PatternType::Repeater)
}

fn segments<'k>(form: &Blueprint, key: &'k str) -> Option<Vec<Segment<'k>>> {
    let mut out = Vec::new();
    let mut after_repeater = false;
    for part in key.split('.') {
        if part.is_empty() {
            return None;
        }
        if after_repeater {
            let index: usize = part.parse().ok()?;
            if index >= MAX_REPEATER_ROWS {
                return None;
            }
            out.push(Segment::Index(index));
            after_repeater = false;
        } else {
            after_repeater = is_repeater(form, part);
            out.push(Segment::Key(part));
        }
    }
    Some(out)
}

/// Write `value` at `path` under `node`, creating containers as needed.
/// Fails when the path crosses an existing value of the other shape.
fn insert(node: &mut Value, path: &[Segment<'_>], value: &str) -> bool {
    let Some((head, rest)) = path.split_first() else {
        if node.is_null() {
            *node = Value::String(value.to_string());
            return true;
        }
        return false;
    };
    match head {
        Segment::Key(key) => {
            if node.is_null() {
                *node = Value::Object(Map::new());
            }
            let Value::Object(map) = node else {
                return false;
            };
            insert(map.entry(*key).or_insert(Value::Null), rest, value)
        }
        Segment::Index(index) => {
            if node.is_null() {
                *node = Value::Array(Vec::new());
            }
            let Value::Array(rows) = node else {
                return false;
            };
            let Some(len) = index.checked_add(1) else {
                return false;
            };
            if rows.len() < len {
                rows.resize(len, Value::Null);
            }
            match rows.get_mut(*index) {
                Some(row) => insert(row, rest, value),
                None => false,
            }
        }
    }
}

/// Reassemble flat submitted fields into a nested object keyed by pattern id.
///
/// Keys with empty segments, non-numeric row indexes, row indexes at or past
/// [`MAX_REPEATER_ROWS`], or shapes conflicting with an earlier key are
/// skipped.
pub fn decode_submission(form: &Blueprint, flat: &FlatValues) -> Value {
    let mut root = Value::Object(Map::new());
    for (key, value) in flat {
        let decoded = segments(form, key).is_some_and(|path| insert(&mut root, &path, value));
        if !decoded {
            tracing::warn!(key = %key, "skipping undecodable submission key");
        }
    }
    root
}
