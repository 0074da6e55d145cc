//! Built-in pattern configurations.
//!
//! The four container types (`page-set`, `page`, `fieldset`, `repeater`)
//! expose children; everything else is a leaf that either renders content
//! or validates user input.

mod checkbox;
mod choice;
mod compound;
mod content;
mod fieldset;
mod input;
mod page;
mod page_set;
mod repeater;

pub use checkbox::CheckboxConfig;
pub use choice::{RadioGroupConfig, SelectDropdownConfig};
pub use compound::{AddressConfig, NameConfig, PhoneNumberConfig};
pub use content::{FormSummaryConfig, ParagraphConfig};
pub use fieldset::FieldsetConfig;
pub use input::InputConfig;
pub use page::PageConfig;
pub use page_set::PageSetConfig;
pub use repeater::RepeaterConfig;

use super::PatternRegistry;

pub(crate) fn register_defaults(registry: &mut PatternRegistry) {
    registry.register(PageSetConfig);
    registry.register(PageConfig);
    registry.register(FieldsetConfig);
    registry.register(RepeaterConfig);
    registry.register(FormSummaryConfig);
    registry.register(ParagraphConfig);
    registry.register(InputConfig);
    registry.register(CheckboxConfig);
    registry.register(RadioGroupConfig);
    registry.register(SelectDropdownConfig);
    registry.register(PhoneNumberConfig);
    registry.register(NameConfig);
    registry.register(AddressConfig);
}
