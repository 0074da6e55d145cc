//! Form blueprints: persistent tree edits, the stateful builder, parent
//! tracking, and garbage collection.

pub mod builder;
pub mod gc;
pub mod parents;
pub mod tree;
pub mod walk;

pub use builder::BlueprintBuilder;
pub use parents::ParentIndex;
pub use tree::MovePosition;

use formwright_types::blueprint::{Blueprint, FormSummary};
use formwright_types::error::BlueprintError;
use formwright_types::pattern::{PatternData, PatternMap, PatternType};

use crate::registry::PatternRegistry;

/// A new blueprint: a root page-set holding one empty page.
pub fn create_default_blueprint(
    registry: &PatternRegistry,
    summary: FormSummary,
) -> Result<Blueprint, BlueprintError> {
    let page = registry.create_pattern(PatternType::Page)?;
    let mut root = registry.create_pattern(PatternType::PageSet)?;
    match &mut root.data {
        PatternData::PageSet(data) => data.pages = vec![page.id.clone()],
        _ => return Err(BlueprintError::RootNotPageSet),
    }

    let mut patterns = PatternMap::new();
    let root_id = root.id.clone();
    patterns.insert(page.id.clone(), page);
    patterns.insert(root_id.clone(), root);
    Ok(Blueprint {
        summary,
        root: root_id,
        patterns,
        outputs: Vec::new(),
    })
}
