//! Slot population.
//!
//! # Responsibility
//! - Write one resolved node into its slot of the composed record: GUID,
//!   per-level KLADR, dictionary labels and display name.
//! - Fill the two block qualifiers from a house record's additional
//!   numbers.
//!
//! # Invariants
//! - An unknown dictionary code leaves the type fields empty and never
//!   fails the composition.
//! - A house without any number, or a unit without its number, is a
//!   payload defect and aborts.

use uuid::Uuid;

use crate::dict::type_dict::{TypeDictionary, TypeLabel};
use crate::model::address::{BlockQualifier, ComposedAddress, LevelSlot};
use crate::model::levels::AddressLevel;
use crate::model::node::{NodeDetails, RegistryNode};
use crate::resolve::attrs::SelectedAttributes;
use crate::resolve::{ComposeError, ComposeResult};

/// Writes `node` into the slot for `level`.
///
/// House records additionally write the block qualifiers of the whole
/// composed record.
pub fn populate_level<T: TypeDictionary + ?Sized>(
    composed: &mut ComposedAddress,
    level: AddressLevel,
    node: &RegistryNode,
    attrs: &SelectedAttributes,
    types: &T,
) -> ComposeResult<()> {
    let kladr = attrs.kladr.clone();
    match &node.details {
        NodeDetails::AddressObject { name, type_code } => {
            let label = type_code.as_deref().and_then(|code| types.object_type(code));
            // The free-text official name replaces the display name on the
            // region slot only.
            let display = if level == AddressLevel::Region {
                attrs.official_name.clone().unwrap_or_else(|| name.clone())
            } else {
                name.clone()
            };
            write_slot(
                composed.slot_mut(level),
                node.object_guid,
                kladr,
                label,
                Some(display),
            );
        }
        NodeDetails::House(numbering) => {
            if !numbering.has_any_number() {
                return Err(ComposeError::MalformedPayload(format!(
                    "house record {} carries no number",
                    node.version_id
                )));
            }
            let label = numbering.house_type.and_then(|code| types.house_type(code));
            write_slot(
                composed.slot_mut(level),
                node.object_guid,
                kladr,
                label,
                numbering.house_num.clone(),
            );
            composed.block1 =
                block_qualifier(numbering.add_num1.as_deref(), numbering.add_type1, types);
            composed.block2 =
                block_qualifier(numbering.add_num2.as_deref(), numbering.add_type2, types);
        }
        NodeDetails::Apartment { number, apart_type } => {
            let number = number.clone().ok_or_else(|| {
                ComposeError::MalformedPayload(format!(
                    "apartment record {} carries no number",
                    node.version_id
                ))
            })?;
            let label = apart_type.and_then(|code| types.apartment_type(code));
            write_slot(
                composed.slot_mut(level),
                node.object_guid,
                kladr,
                label,
                Some(number),
            );
        }
        NodeDetails::Room { number, room_type } => {
            let number = number.clone().ok_or_else(|| {
                ComposeError::MalformedPayload(format!(
                    "room record {} carries no number",
                    node.version_id
                ))
            })?;
            let label = room_type.and_then(|code| types.room_type(code));
            write_slot(
                composed.slot_mut(level),
                node.object_guid,
                kladr,
                label,
                Some(number),
            );
        }
        NodeDetails::Stead | NodeDetails::CarPlace | NodeDetails::Unrecognized => {
            return Err(ComposeError::UnsupportedLevel);
        }
    }
    Ok(())
}

fn write_slot(
    slot: &mut LevelSlot,
    object_guid: Uuid,
    kladr: Option<String>,
    label: Option<TypeLabel>,
    name: Option<String>,
) {
    slot.object_guid = Some(object_guid);
    slot.kladr = kladr;
    if let Some(label) = label {
        slot.type_short = Some(label.short);
        slot.type_full = Some(label.full);
    }
    slot.name = name;
}

/// Qualifier for one additional number. No value means no qualifier; an
/// unknown type code keeps the value and drops the labels.
fn block_qualifier<T: TypeDictionary + ?Sized>(
    value: Option<&str>,
    type_code: Option<i64>,
    types: &T,
) -> BlockQualifier {
    let Some(value) = value else {
        return BlockQualifier::default();
    };
    let label = type_code.and_then(|code| types.house_add_type(code));
    BlockQualifier {
        type_short: label.as_ref().map(|l| l.short.clone()),
        type_full: label.map(|l| l.full),
        value: Some(value.to_owned()),
    }
}
