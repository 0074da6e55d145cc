//! Root-reachable traversals.

use std::collections::HashSet;

use formwright_types::blueprint::Blueprint;
use formwright_types::error::RegistryError;
use formwright_types::pattern::{Pattern, PatternId};

use crate::registry::PatternRegistry;

/// Ids of every pattern reachable from the root through child accessors.
pub fn reachable_ids(
    registry: &PatternRegistry,
    form: &Blueprint,
) -> Result<HashSet<PatternId>, RegistryError> {
    let mut seen = HashSet::new();
    let Some(root) = form.root_pattern() else {
        return Ok(seen);
    };
    let mut stack = vec![root];
    while let Some(pattern) = stack.pop() {
        if !seen.insert(pattern.id.clone()) {
            continue;
        }
        stack.extend(registry.children(pattern, &form.patterns)?);
    }
    Ok(seen)
}

/// Reachable patterns that validate user input, in pre-order.
///
/// The walk stops at the first validator on each path: a repeater's
/// template children are validated through the repeater, not on their own.
pub fn input_patterns<'f>(
    registry: &PatternRegistry,
    form: &'f Blueprint,
) -> Result<Vec<&'f Pattern>, RegistryError> {
    let mut found = Vec::new();
    let mut seen = HashSet::new();
    let Some(root) = form.root_pattern() else {
        return Ok(found);
    };
    let mut stack = vec![root];
    while let Some(pattern) = stack.pop() {
        if !seen.insert(&pattern.id) {
            continue;
        }
        let config = registry.config_for(pattern)?;
        if config.input().is_some() {
            found.push(pattern);
            continue;
        }
        let children = config.children(pattern, &form.patterns);
        stack.extend(children.into_iter().rev());
    }
    Ok(found)
}
