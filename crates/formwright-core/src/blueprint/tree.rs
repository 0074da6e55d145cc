//! Persistent structural edits over a blueprint.
//!
//! Every operation takes a blueprint by reference and returns a new one;
//! the input is never modified. Integrity violations (unknown ids, wrong
//! container types) come back as `BlueprintError`.

use std::collections::{BTreeMap, HashMap};

use formwright_types::blueprint::{Blueprint, FormOutput, FormSummary};
use formwright_types::error::BlueprintError;
use formwright_types::pattern::{Pattern, PatternData, PatternId, PatternMap, PatternType};
use formwright_types::session::FormErrors;
use serde_json::Value;

use super::parents::ParentIndex;
use crate::registry::PatternRegistry;

/// Where a moved pattern lands in its target page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MovePosition {
    Top,
    #[default]
    Bottom,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn find<'a>(form: &'a Blueprint, id: &PatternId) -> Result<&'a Pattern, BlueprintError> {
    form.get(id.as_str())
        .ok_or_else(|| BlueprintError::PatternNotFound(id.clone()))
}

fn expect_type<'a>(
    form: &'a Blueprint,
    id: &PatternId,
    expected: PatternType,
) -> Result<&'a Pattern, BlueprintError> {
    let pattern = find(form, id)?;
    if pattern.pattern_type() != expected {
        return Err(BlueprintError::WrongPatternType {
            id: id.clone(),
            expected,
            actual: pattern.pattern_type(),
        });
    }
    Ok(pattern)
}

/// Mutable child list of a container already known to exist.
fn child_list<'a>(
    patterns: &'a mut PatternMap,
    id: &PatternId,
) -> Result<&'a mut Vec<PatternId>, BlueprintError> {
    let pattern = patterns
        .get_mut(id)
        .ok_or_else(|| BlueprintError::PatternNotFound(id.clone()))?;
    let actual = pattern.pattern_type();
    pattern
        .data
        .child_ids_mut()
        .ok_or_else(|| BlueprintError::WrongPatternType {
            id: id.clone(),
            expected: PatternType::Fieldset,
            actual,
        })
}

/// Insert after position `index`, or append when absent or out of range.
fn splice(ids: &mut Vec<PatternId>, id: PatternId, index: Option<usize>) {
    match index {
        Some(i) if i < ids.len() => ids.insert(i + 1, id),
        _ => ids.push(id),
    }
}

fn insert_child(
    form: &Blueprint,
    container: &PatternId,
    pattern: Pattern,
    index: Option<usize>,
) -> Result<Blueprint, BlueprintError> {
    let mut next = form.clone();
    splice(child_list(&mut next.patterns, container)?, pattern.id.clone(), index);
    tracing::debug!(container = %container, pattern_id = %pattern.id, "inserted pattern");
    next.patterns.insert(pattern.id.clone(), pattern);
    Ok(next)
}

fn root_page_set(form: &Blueprint) -> Result<&PatternId, BlueprintError> {
    match form.root_pattern() {
        Some(root) if root.pattern_type() == PatternType::PageSet => Ok(&root.id),
        _ => Err(BlueprintError::RootNotPageSet),
    }
}

// ---------------------------------------------------------------------------
// Insertion
// ---------------------------------------------------------------------------

/// Insert `pattern` into a page, after `index` or at the end.
pub fn add_pattern_to_page(
    form: &Blueprint,
    page_id: &PatternId,
    pattern: Pattern,
    index: Option<usize>,
) -> Result<Blueprint, BlueprintError> {
    expect_type(form, page_id, PatternType::Page)?;
    insert_child(form, page_id, pattern, index)
}

/// Insert `pattern` into a fieldset or repeater of the asserted `container` type.
pub fn add_pattern_to_compound_field(
    form: &Blueprint,
    id: &PatternId,
    pattern: Pattern,
    container: PatternType,
    index: Option<usize>,
) -> Result<Blueprint, BlueprintError> {
    if !matches!(container, PatternType::Fieldset | PatternType::Repeater) {
        return Err(BlueprintError::WrongPatternType {
            id: id.clone(),
            expected: PatternType::Fieldset,
            actual: container,
        });
    }
    expect_type(form, id, container)?;
    insert_child(form, id, pattern, index)
}

/// Append a page to the root page-set.
pub fn add_page_to_page_set(form: &Blueprint, page: Pattern) -> Result<Blueprint, BlueprintError> {
    if page.pattern_type() != PatternType::Page {
        return Err(BlueprintError::WrongPatternType {
            id: page.id.clone(),
            expected: PatternType::Page,
            actual: page.pattern_type(),
        });
    }
    let root = root_page_set(form)?.clone();
    insert_child(form, &root, page, None)
}

// ---------------------------------------------------------------------------
// Move
// ---------------------------------------------------------------------------

/// Move `id` from one page to another.
///
/// The pattern is removed first and then inserted into the target's
/// current list, so a same-page move positions against the shortened list.
pub fn move_pattern_between_pages(
    form: &Blueprint,
    source_page: &PatternId,
    target_page: &PatternId,
    id: &PatternId,
    position: MovePosition,
) -> Result<Blueprint, BlueprintError> {
    expect_type(form, source_page, PatternType::Page)?;
    expect_type(form, target_page, PatternType::Page)?;
    if !find(form, source_page)?.data.child_ids().contains(id) {
        return Err(BlueprintError::PatternNotFound(id.clone()));
    }

    let mut next = form.clone();
    child_list(&mut next.patterns, source_page)?.retain(|child| child != id);
    let target = child_list(&mut next.patterns, target_page)?;
    match position {
        MovePosition::Top => target.insert(0, id.clone()),
        MovePosition::Bottom => target.push(id.clone()),
    }
    tracing::debug!(pattern_id = %id, from = %source_page, to = %target_page, "moved pattern");
    Ok(next)
}

// ---------------------------------------------------------------------------
// Copy
// ---------------------------------------------------------------------------

/// Deep-clone `id` and everything beneath it into `out` under fresh ids.
///
/// `memo` maps already-cloned source ids to their copies.
fn clone_subtree(
    registry: &PatternRegistry,
    source: &PatternMap,
    out: &mut PatternMap,
    id: &PatternId,
    memo: &mut HashMap<PatternId, PatternId>,
) -> Result<PatternId, BlueprintError> {
    if let Some(copied) = memo.get(id) {
        return Ok(copied.clone());
    }
    let original = source
        .get(id)
        .ok_or_else(|| BlueprintError::PatternNotFound(id.clone()))?;
    let new_id = PatternId::new();
    memo.insert(id.clone(), new_id.clone());

    let mut copy = Pattern::new(new_id.clone(), original.data.clone());
    let children: Vec<PatternId> = registry
        .children(original, source)?
        .into_iter()
        .map(|child| child.id.clone())
        .collect();
    if let Some(ids) = copy.data.child_ids_mut() {
        let mut remapped = Vec::with_capacity(children.len());
        for child in &children {
            remapped.push(clone_subtree(registry, source, out, child, memo)?);
        }
        *ids = remapped;
    }
    out.insert(new_id.clone(), copy);
    Ok(new_id)
}

/// Duplicate a page and its contents, appending the copy to the root page-set.
///
/// The copy's title gets a ` Copy - <stamp>` suffix. Returns the new
/// blueprint and the new page id.
pub fn copy_page(
    registry: &PatternRegistry,
    form: &Blueprint,
    page_id: &PatternId,
    stamp: &str,
) -> Result<(Blueprint, PatternId), BlueprintError> {
    expect_type(form, page_id, PatternType::Page)?;
    let root = root_page_set(form)?.clone();

    let mut next = form.clone();
    let mut memo = HashMap::new();
    let new_id = clone_subtree(registry, &form.patterns, &mut next.patterns, page_id, &mut memo)?;
    if let Some(PatternData::Page(page)) = next.patterns.get_mut(&new_id).map(|p| &mut p.data) {
        page.title = format!("{} Copy - {stamp}", page.title);
    }
    child_list(&mut next.patterns, &root)?.push(new_id.clone());
    tracing::debug!(page_id = %page_id, copy_id = %new_id, cloned = memo.len(), "copied page");
    Ok((next, new_id))
}

/// Duplicate a pattern next to its original, building a fresh parent index.
///
/// See [`copy_pattern_in`].
pub fn copy_pattern(
    registry: &PatternRegistry,
    form: &Blueprint,
    parent_id: &PatternId,
    pattern_id: &PatternId,
    stamp: &str,
) -> Result<(Blueprint, PatternId), BlueprintError> {
    let parents = ParentIndex::build(registry, form)?;
    copy_pattern_in(registry, form, &parents, parent_id, pattern_id, stamp)
}

/// Duplicate a pattern and splice the copy right after the original.
///
/// The parent comes from `parents` when it is indexed and still holds the
/// pattern, else `parent_id`.
/// Containers are cloned with their whole subtree. The copy's display text
/// gets a `(Copy <stamp>) ` prefix.
pub fn copy_pattern_in(
    registry: &PatternRegistry,
    form: &Blueprint,
    parents: &ParentIndex,
    parent_id: &PatternId,
    pattern_id: &PatternId,
    stamp: &str,
) -> Result<(Blueprint, PatternId), BlueprintError> {
    find(form, pattern_id)?;
    let parent = parents
        .live_parent_of(form, pattern_id.as_str())
        .unwrap_or(parent_id);
    find(form, parent)?;

    let mut next = form.clone();
    let mut memo = HashMap::new();
    let new_id = clone_subtree(registry, &form.patterns, &mut next.patterns, pattern_id, &mut memo)?;
    if let Some(text) = next
        .patterns
        .get_mut(&new_id)
        .and_then(|p| p.data.display_text_mut())
    {
        *text = format!("(Copy {stamp}) {text}");
    }

    let siblings = child_list(&mut next.patterns, parent)?;
    let at = siblings.iter().position(|id| id == pattern_id);
    splice(siblings, new_id.clone(), at);
    tracing::debug!(pattern_id = %pattern_id, copy_id = %new_id, parent = %parent, "copied pattern");
    Ok((next, new_id))
}

// ---------------------------------------------------------------------------
// Removal
// ---------------------------------------------------------------------------

/// Drop `id` from every container and then from the arena.
///
/// Descendants are left in place; see `gc::collect_garbage`. Removing an
/// id that is not present is a no-op.
pub fn remove_pattern_from_blueprint(
    registry: &PatternRegistry,
    form: &Blueprint,
    id: &PatternId,
) -> Result<Blueprint, BlueprintError> {
    if *id == form.root {
        return Err(BlueprintError::RootRemoval(id.clone()));
    }
    let mut patterns = PatternMap::with_capacity(form.patterns.len());
    for (key, pattern) in &form.patterns {
        if key == id {
            continue;
        }
        let config = registry.config_for(pattern)?;
        patterns.insert(key.clone(), config.remove_child_pattern(pattern, id));
    }
    if patterns.len() < form.patterns.len() {
        tracing::debug!(pattern_id = %id, "removed pattern");
    }
    Ok(Blueprint {
        patterns,
        ..form.clone()
    })
}

// ---------------------------------------------------------------------------
// Setters
// ---------------------------------------------------------------------------

/// Replace the whole arena.
pub fn replace_patterns(form: &Blueprint, patterns: impl IntoIterator<Item = Pattern>) -> Blueprint {
    Blueprint {
        patterns: patterns.into_iter().map(|p| (p.id.clone(), p)).collect(),
        ..form.clone()
    }
}

/// Validate editor-supplied data for one pattern and store it.
///
/// Container child lists are structural and always kept; edit them through
/// the insertion, move and removal operations.
pub fn update_pattern(
    registry: &PatternRegistry,
    form: &Blueprint,
    id: &PatternId,
    raw: &Value,
) -> Result<Blueprint, BlueprintError> {
    let updated = validated_update(registry, form, id, raw)?.map_err(|errors| {
        BlueprintError::InvalidConfig {
            id: id.clone(),
            errors,
        }
    })?;
    let mut next = form.clone();
    next.patterns.insert(id.clone(), updated);
    Ok(next)
}

/// Validate and apply several updates at once; nothing is stored unless all
/// of them pass.
pub fn update_patterns(
    registry: &PatternRegistry,
    form: &Blueprint,
    updates: &BTreeMap<PatternId, Value>,
) -> Result<Blueprint, BlueprintError> {
    let mut next = form.clone();
    let mut invalid = BTreeMap::new();
    for (id, raw) in updates {
        match validated_update(registry, form, id, raw)? {
            Ok(pattern) => {
                next.patterns.insert(id.clone(), pattern);
            }
            Err(errors) => {
                invalid.insert(id.clone(), errors);
            }
        }
    }
    if invalid.is_empty() {
        Ok(next)
    } else {
        Err(BlueprintError::InvalidConfigs(invalid))
    }
}

fn validated_update(
    registry: &PatternRegistry,
    form: &Blueprint,
    id: &PatternId,
    raw: &Value,
) -> Result<Result<Pattern, FormErrors>, BlueprintError> {
    let current = find(form, id)?;
    let config = registry.config_for(current)?;
    let mut data = match config.parse_config_data(raw) {
        Ok(data) => data,
        Err(errors) => return Ok(Err(errors)),
    };
    if let Some(ids) = data.child_ids_mut() {
        *ids = current.data.child_ids().to_vec();
    }
    Ok(Ok(Pattern::new(id.clone(), data)))
}

pub fn add_form_output(form: &Blueprint, output: FormOutput) -> Blueprint {
    let mut next = form.clone();
    next.outputs.push(output);
    next
}

pub fn update_form_summary(form: &Blueprint, summary: FormSummary) -> Blueprint {
    Blueprint {
        summary,
        ..form.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formwright_types::pattern::{FieldsetData, InputData, PageData, PageSetData};
    use serde_json::json;

    fn input(id: &str, label: &str) -> Pattern {
        Pattern::new(
            PatternId::from(id),
            PatternData::Input(InputData {
                label: label.to_string(),
                ..Default::default()
            }),
        )
    }

    fn page(id: &str, children: &[&str]) -> Pattern {
        Pattern::new(
            PatternId::from(id),
            PatternData::Page(PageData {
                title: format!("Title {id}"),
                patterns: children.iter().map(|c| PatternId::from(*c)).collect(),
            }),
        )
    }

    /// page-1 = [element-1, element-2], page-2 = [element-3].
    fn two_pages() -> Blueprint {
        let root = Pattern::new(
            PatternId::from("root"),
            PatternData::PageSet(PageSetData {
                pages: vec![PatternId::from("page-1"), PatternId::from("page-2")],
            }),
        );
        let patterns = [
            root,
            page("page-1", &["element-1", "element-2"]),
            page("page-2", &["element-3"]),
            input("element-1", "Pattern 1"),
            input("element-2", "Pattern 2"),
            input("element-3", "Pattern 3"),
        ];
        Blueprint {
            summary: FormSummary::default(),
            root: PatternId::from("root"),
            patterns: patterns.into_iter().map(|p| (p.id.clone(), p)).collect(),
            outputs: vec![],
        }
    }

    fn children(form: &Blueprint, id: &str) -> Vec<String> {
        form.get(id)
            .unwrap()
            .data
            .child_ids()
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn test_add_pattern_to_page_index_and_append() {
        let form = two_pages();
        let next = add_pattern_to_page(&form, &"page-1".into(), input("new", "N"), Some(0)).unwrap();
        assert_eq!(children(&next, "page-1"), ["element-1", "new", "element-2"]);

        let next = add_pattern_to_page(&form, &"page-1".into(), input("new", "N"), None).unwrap();
        assert_eq!(children(&next, "page-1"), ["element-1", "element-2", "new"]);
        // Input untouched.
        assert_eq!(children(&form, "page-1"), ["element-1", "element-2"]);
    }

    #[test]
    fn test_add_pattern_to_page_rejects_non_page() {
        let form = two_pages();
        let err = add_pattern_to_page(&form, &"element-1".into(), input("new", "N"), None)
            .unwrap_err();
        assert!(matches!(
            err,
            BlueprintError::WrongPatternType {
                expected: PatternType::Page,
                actual: PatternType::Input,
                ..
            }
        ));
        let err = add_pattern_to_page(&form, &"missing".into(), input("new", "N"), None)
            .unwrap_err();
        assert_eq!(err, BlueprintError::PatternNotFound("missing".into()));
    }

    #[test]
    fn test_move_between_pages_scenario() {
        let form = two_pages();
        let next = move_pattern_between_pages(
            &form,
            &"page-1".into(),
            &"page-2".into(),
            &"element-1".into(),
            MovePosition::Bottom,
        )
        .unwrap();
        assert_eq!(children(&next, "page-1"), ["element-2"]);
        assert_eq!(children(&next, "page-2"), ["element-3", "element-1"]);
        assert_eq!(next.get("element-1"), form.get("element-1"));
    }

    #[test]
    fn test_move_conserves_count() {
        let form = two_pages();
        let count = |f: &Blueprint| children(f, "page-1").len() + children(f, "page-2").len();
        for (source, target, id) in [
            ("page-1", "page-2", "element-2"),
            ("page-2", "page-1", "element-3"),
            ("page-1", "page-1", "element-1"),
        ] {
            for position in [MovePosition::Top, MovePosition::Bottom] {
                let next = move_pattern_between_pages(
                    &form,
                    &source.into(),
                    &target.into(),
                    &id.into(),
                    position,
                )
                .unwrap();
                assert_eq!(count(&next), count(&form));
            }
        }
    }

    #[test]
    fn test_same_page_move_uses_shortened_list() {
        let form = two_pages();
        let next = move_pattern_between_pages(
            &form,
            &"page-1".into(),
            &"page-1".into(),
            &"element-1".into(),
            MovePosition::Bottom,
        )
        .unwrap();
        assert_eq!(children(&next, "page-1"), ["element-2", "element-1"]);
    }

    #[test]
    fn test_move_requires_membership_in_source() {
        let form = two_pages();
        let err = move_pattern_between_pages(
            &form,
            &"page-2".into(),
            &"page-1".into(),
            &"element-1".into(),
            MovePosition::Top,
        )
        .unwrap_err();
        assert_eq!(err, BlueprintError::PatternNotFound("element-1".into()));
    }

    #[test]
    fn test_copy_page_conserves_shape() {
        let registry = PatternRegistry::with_defaults();
        let form = two_pages();
        let (next, copy_id) = copy_page(&registry, &form, &"page-1".into(), "1/2/2025").unwrap();

        assert_eq!(children(&next, "root").last().unwrap(), copy_id.as_str());
        let original = children(&form, "page-1");
        let copied = children(&next, copy_id.as_str());
        assert_eq!(copied.len(), original.len());
        for (a, b) in original.iter().zip(&copied) {
            assert_ne!(a, b);
            assert_eq!(
                next.get(a).unwrap().pattern_type(),
                next.get(b).unwrap().pattern_type()
            );
        }
        let PatternData::Page(data) = &next.get(copy_id.as_str()).unwrap().data else {
            panic!("copy is not a page");
        };
        assert_eq!(data.title, "Title page-1 Copy - 1/2/2025");

        let mut expected_pages = children(&form, "root");
        expected_pages.push(copy_id.to_string());
        assert_eq!(children(&next, "root"), expected_pages);
        for (id, pattern) in form.patterns.iter().filter(|(id, _)| **id != form.root) {
            assert_eq!(next.patterns.get(id), Some(pattern));
        }
    }

    #[test]
    fn test_copy_fieldset_scenario() {
        let registry = PatternRegistry::with_defaults();
        let mut form = two_pages();
        let fieldset = Pattern::new(
            PatternId::from("fieldset-1"),
            PatternData::Fieldset(FieldsetData {
                legend: "Group".to_string(),
                patterns: vec![PatternId::from("element-2")],
            }),
        );
        form.patterns.insert(fieldset.id.clone(), fieldset.clone());
        if let Some(ids) = form
            .patterns
            .get_mut("page-1")
            .and_then(|p| p.data.child_ids_mut())
        {
            *ids = vec![PatternId::from("element-1"), PatternId::from("fieldset-1")];
        }

        let (next, copy_id) = copy_pattern(
            &registry,
            &form,
            &"page-1".into(),
            &"fieldset-1".into(),
            "stamp",
        )
        .unwrap();

        assert_eq!(
            children(&next, "page-1"),
            ["element-1", "fieldset-1", copy_id.as_str()]
        );
        let copy = next.get(copy_id.as_str()).unwrap();
        assert_eq!(copy.data.label(), Some("(Copy stamp) Group"));
        let nested = copy.data.child_ids();
        assert_eq!(nested.len(), 1);
        assert_ne!(nested[0].as_str(), "element-2");
        assert_eq!(
            next.get(nested[0].as_str()).unwrap().data,
            form.get("element-2").unwrap().data
        );
        assert_eq!(next.get("fieldset-1"), Some(&fieldset));
        assert_eq!(next.get("element-2"), form.get("element-2"));
    }

    #[test]
    fn test_copy_pattern_finds_actual_parent() {
        let registry = PatternRegistry::with_defaults();
        let form = two_pages();
        // Caller names the wrong page; the index knows better.
        let (next, copy_id) = copy_pattern(
            &registry,
            &form,
            &"page-2".into(),
            &"element-1".into(),
            "now",
        )
        .unwrap();
        assert_eq!(
            children(&next, "page-1"),
            ["element-1", copy_id.as_str(), "element-2"]
        );
        assert_eq!(children(&next, "page-2"), ["element-3"]);
        assert_eq!(
            next.get(copy_id.as_str()).unwrap().data.label(),
            Some("(Copy now) Pattern 1")
        );
    }

    #[test]
    fn test_remove_is_idempotent() {
        let registry = PatternRegistry::with_defaults();
        let form = two_pages();
        let once = remove_pattern_from_blueprint(&registry, &form, &"element-1".into()).unwrap();
        let twice = remove_pattern_from_blueprint(&registry, &once, &"element-1".into()).unwrap();
        assert_eq!(once, twice);
        assert!(!once.contains("element-1"));
        assert_eq!(children(&once, "page-1"), ["element-2"]);
    }

    #[test]
    fn test_remove_root_rejected() {
        let registry = PatternRegistry::with_defaults();
        let form = two_pages();
        let err = remove_pattern_from_blueprint(&registry, &form, &"root".into()).unwrap_err();
        assert_eq!(err, BlueprintError::RootRemoval("root".into()));
    }

    #[test]
    fn test_remove_container_leaves_descendants() {
        let registry = PatternRegistry::with_defaults();
        let form = two_pages();
        let next = remove_pattern_from_blueprint(&registry, &form, &"page-2".into()).unwrap();
        assert_eq!(children(&next, "root"), ["page-1"]);
        assert!(next.contains("element-3"));
    }

    #[test]
    fn test_update_pattern_validates_and_keeps_children() {
        let registry = PatternRegistry::with_defaults();
        let form = two_pages();

        let err = update_pattern(&registry, &form, &"element-1".into(), &json!({"label": ""}))
            .unwrap_err();
        assert!(matches!(err, BlueprintError::InvalidConfig { .. }));

        let next = update_pattern(
            &registry,
            &form,
            &"page-1".into(),
            &json!({"title": "Renamed", "patterns": []}),
        )
        .unwrap();
        let PatternData::Page(page) = &next.get("page-1").unwrap().data else {
            panic!("not a page");
        };
        assert_eq!(page.title, "Renamed");
        assert_eq!(page.patterns.len(), 2);
    }

    #[test]
    fn test_update_patterns_is_all_or_nothing() {
        let registry = PatternRegistry::with_defaults();
        let form = two_pages();
        let mut updates = BTreeMap::new();
        updates.insert(PatternId::from("element-1"), json!({"label": "Ok"}));
        updates.insert(PatternId::from("element-2"), json!({"label": " "}));

        let err = update_patterns(&registry, &form, &updates).unwrap_err();
        let BlueprintError::InvalidConfigs(invalid) = err else {
            panic!("expected InvalidConfigs");
        };
        assert_eq!(invalid.len(), 1);
        assert!(invalid.contains_key("element-2"));

        updates.insert(PatternId::from("element-2"), json!({"label": "Also ok"}));
        let next = update_patterns(&registry, &form, &updates).unwrap();
        assert_eq!(next.get("element-2").unwrap().data.label(), Some("Also ok"));
    }

    #[test]
    fn test_add_page_and_setters() {
        let form = two_pages();
        let next = add_page_to_page_set(&form, page("page-3", &[])).unwrap();
        assert_eq!(children(&next, "root"), ["page-1", "page-2", "page-3"]);
        assert!(add_page_to_page_set(&form, input("x", "X")).is_err());

        let summary = FormSummary {
            title: "Renamed".to_string(),
            description: "D".to_string(),
        };
        assert_eq!(update_form_summary(&form, summary.clone()).summary, summary);

        let replaced = replace_patterns(&form, [input("only", "Only")]);
        assert_eq!(replaced.patterns.len(), 1);
    }
}
