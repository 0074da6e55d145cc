//! Garbage collection for patterns orphaned by non-cascading removal.

use formwright_types::blueprint::Blueprint;
use formwright_types::error::BlueprintError;
use formwright_types::pattern::{PatternId, PatternMap};

use super::walk::reachable_ids;
use crate::registry::PatternRegistry;

/// Drop every pattern unreachable from the root and any child reference
/// left dangling. Returns the cleaned blueprint and the removed ids, sorted.
pub fn collect_garbage(
    registry: &PatternRegistry,
    form: &Blueprint,
) -> Result<(Blueprint, Vec<PatternId>), BlueprintError> {
    let reachable = reachable_ids(registry, form)?;

    let mut removed = Vec::new();
    let mut patterns = PatternMap::with_capacity(reachable.len());
    for (id, pattern) in &form.patterns {
        if !reachable.contains(id) {
            removed.push(id.clone());
            continue;
        }
        let mut kept = pattern.clone();
        if let Some(ids) = kept.data.child_ids_mut() {
            ids.retain(|child| reachable.contains(child));
        }
        patterns.insert(id.clone(), kept);
    }
    removed.sort();

    if !removed.is_empty() {
        tracing::info!(count = removed.len(), "collected unreachable patterns");
    }
    Ok((
        Blueprint {
            patterns,
            ..form.clone()
        },
        removed,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blueprint::tree::{
        add_pattern_to_compound_field, add_pattern_to_page, remove_pattern_from_blueprint,
    };
    use crate::blueprint::create_default_blueprint;
    use formwright_types::blueprint::FormSummary;
    use formwright_types::pattern::PatternType;

    #[test]
    fn test_collects_descendants_of_removed_container() {
        let registry = PatternRegistry::with_defaults();
        let form = create_default_blueprint(&registry, FormSummary::default()).unwrap();
        let page_id = form.root_pattern().unwrap().data.child_ids()[0].clone();

        let fieldset = registry.create_pattern(PatternType::Fieldset).unwrap();
        let form = add_pattern_to_page(&form, &page_id, fieldset.clone(), None).unwrap();
        let child = registry.create_pattern(PatternType::Input).unwrap();
        let form = add_pattern_to_compound_field(
            &form,
            &fieldset.id,
            child.clone(),
            PatternType::Fieldset,
            None,
        )
        .unwrap();

        let form = remove_pattern_from_blueprint(&registry, &form, &fieldset.id).unwrap();
        assert!(form.contains(child.id.as_str()));

        let (clean, removed) = collect_garbage(&registry, &form).unwrap();
        assert_eq!(removed, vec![child.id.clone()]);
        assert!(!clean.contains(child.id.as_str()));
        assert_eq!(clean.patterns.len(), 2);
    }

    #[test]
    fn test_clean_blueprint_unchanged() {
        let registry = PatternRegistry::with_defaults();
        let form = create_default_blueprint(&registry, FormSummary::default()).unwrap();
        let (clean, removed) = collect_garbage(&registry, &form).unwrap();
        assert!(removed.is_empty());
        assert_eq!(clean, form);
    }
}
