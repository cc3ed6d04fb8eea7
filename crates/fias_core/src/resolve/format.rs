//! Short-address rendering.
//!
//! # Responsibility
//! - Render a populated composed record into the canonical one-line form:
//!   level segments root to unit, block qualifiers right after the house
//!   segment, the renaming suffix last.
//!
//! # Invariants
//! - Pure function of the record; no dictionary or clock access.
//! - A slot without a name renders nothing; a block without a value
//!   renders nothing.

use crate::model::address::{BlockQualifier, ComposedAddress, LevelSlot};
use crate::model::levels::AddressLevel;

/// Renders the canonical comma-joined display form.
pub fn short_address(composed: &ComposedAddress) -> String {
    let mut segments: Vec<String> = Vec::new();
    for level in AddressLevel::ORDERED {
        if let Some(segment) = slot_segment(composed.slot(level)) {
            segments.push(segment);
        }
        if level == AddressLevel::House {
            for block in [composed.block1(), composed.block2()] {
                if let Some(segment) = block_segment(block) {
                    segments.push(segment);
                }
            }
        }
    }

    let mut line = segments.join(", ");
    if !composed.renamings().is_empty() {
        if !line.is_empty() {
            line.push_str(", ");
        }
        line.push_str(&format!("(бывш. {})", composed.renamings().join(", ")));
    }
    line
}

fn slot_segment(slot: &LevelSlot) -> Option<String> {
    let name = slot.name()?;
    match slot.type_short() {
        Some(type_short) => Some(format!("{type_short} {name}")),
        None => Some(name.to_owned()),
    }
}

fn block_segment(block: &BlockQualifier) -> Option<String> {
    let value = block.value()?;
    match block.type_short() {
        Some(type_short) => Some(format!("{type_short} {value}")),
        None => Some(value.to_owned()),
    }
}
