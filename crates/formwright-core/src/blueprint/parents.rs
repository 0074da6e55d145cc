//! Child -> parent index over a blueprint.
//!
//! Built once from the registry's child accessors and then kept current by
//! `BlueprintBuilder` as it edits, so copies can splice a clone next to its
//! original without scanning every container.

use std::collections::HashMap;

use formwright_types::blueprint::Blueprint;
use formwright_types::error::RegistryError;
use formwright_types::pattern::PatternId;

use crate::registry::PatternRegistry;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParentIndex {
    parents: HashMap<PatternId, PatternId>,
}

impl ParentIndex {
    /// Index every container's direct children.
    pub fn build(registry: &PatternRegistry, form: &Blueprint) -> Result<Self, RegistryError> {
        let mut index = Self::default();
        for pattern in form.patterns.values() {
            for child in registry.children(pattern, &form.patterns)? {
                index.set(child.id.clone(), pattern.id.clone());
            }
        }
        Ok(index)
    }

    pub fn parent_of(&self, id: &str) -> Option<&PatternId> {
        self.parents.get(id)
    }

    /// Indexed parent of `id`, if it is still in `form` and still lists `id`.
    pub fn live_parent_of<'s>(&'s self, form: &Blueprint, id: &str) -> Option<&'s PatternId> {
        self.parent_of(id).filter(|parent| {
            form.get(parent.as_str())
                .is_some_and(|p| p.data.child_ids().iter().any(|child| child.as_str() == id))
        })
    }

    pub fn set(&mut self, child: PatternId, parent: PatternId) {
        self.parents.insert(child, parent);
    }

    /// Forget `id` as a child. Its own children keep pointing at it.
    pub fn remove(&mut self, id: &str) {
        self.parents.remove(id);
    }

    /// Index `id` under `parent`, then everything beneath `id`.
    pub fn index_subtree(
        &mut self,
        registry: &PatternRegistry,
        form: &Blueprint,
        id: &PatternId,
        parent: &PatternId,
    ) -> Result<(), RegistryError> {
        self.set(id.clone(), parent.clone());
        let mut stack = vec![id.clone()];
        while let Some(current) = stack.pop() {
            let Some(pattern) = form.get(current.as_str()) else {
                continue;
            };
            for child in registry.children(pattern, &form.patterns)? {
                self.set(child.id.clone(), current.clone());
                stack.push(child.id.clone());
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }
}
