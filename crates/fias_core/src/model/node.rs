//! Typed version records.
//!
//! # Responsibility
//! - Turn a raw [`RelationEnvelope`] into a [`RegistryNode`] with a typed
//!   level, normalized chain links and kind-specific details.
//! - Keep decoding total over every published relation kind; whether a kind
//!   may appear in an address is decided by the classifier, not here.
//!
//! # Invariants
//! - `prev_id`/`next_id` are `None` whenever the registry wrote `0`.
//! - An address-object record always carries a non-empty name; all other
//!   naming fields stay optional because historical records drop them.

use std::error::Error;
use std::fmt;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::model::levels::{FiasLevel, RelationKind};
use crate::model::payload::RelationEnvelope;

/// One version of one registry object, decoded and normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryNode {
    pub version_id: i64,
    pub object_id: i64,
    pub object_guid: Uuid,
    pub fias_level: FiasLevel,
    pub active: bool,
    pub actual: bool,
    pub prev_id: Option<i64>,
    pub next_id: Option<i64>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub details: NodeDetails,
}

/// Kind-specific naming fields of a version record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeDetails {
    AddressObject {
        name: String,
        type_code: Option<String>,
    },
    House(HouseNumbering),
    Apartment {
        number: Option<String>,
        apart_type: Option<i64>,
    },
    Room {
        number: Option<String>,
        room_type: Option<i64>,
    },
    Stead,
    CarPlace,
    Unrecognized,
}

/// Main and additional numbers of a house record. Any subset may be present;
/// a record with no number at all is caught when the house is populated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HouseNumbering {
    pub house_num: Option<String>,
    pub house_type: Option<i64>,
    pub add_num1: Option<String>,
    pub add_type1: Option<i64>,
    pub add_num2: Option<String>,
    pub add_type2: Option<i64>,
}

impl HouseNumbering {
    pub fn has_any_number(&self) -> bool {
        self.house_num.is_some() || self.add_num1.is_some() || self.add_num2.is_some()
    }
}

impl NodeDetails {
    pub fn kind(&self) -> RelationKind {
        match self {
            NodeDetails::AddressObject { .. } => RelationKind::AddressObject,
            NodeDetails::House(_) => RelationKind::House,
            NodeDetails::Apartment { .. } => RelationKind::Apartment,
            NodeDetails::Room { .. } => RelationKind::Room,
            NodeDetails::Stead => RelationKind::Stead,
            NodeDetails::CarPlace => RelationKind::CarPlace,
            NodeDetails::Unrecognized => RelationKind::Unrecognized,
        }
    }

    /// Name the record is displayed under. Rename detection compares these
    /// across chain links.
    pub fn display_name(&self) -> Option<&str> {
        match self {
            NodeDetails::AddressObject { name, .. } => Some(name.as_str()),
            NodeDetails::House(numbering) => numbering.house_num.as_deref(),
            NodeDetails::Apartment { number, .. } => number.as_deref(),
            NodeDetails::Room { number, .. } => number.as_deref(),
            NodeDetails::Stead | NodeDetails::CarPlace | NodeDetails::Unrecognized => None,
        }
    }
}

/// Decode failure for a single version record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeDecodeError {
    /// Level code outside the published table.
    UnknownLevel { version_id: i64, level: i64 },
    /// Address-object record without a name.
    MissingName { version_id: i64 },
}

impl fmt::Display for NodeDecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeDecodeError::UnknownLevel { version_id, level } => {
                write!(f, "version record {version_id} carries unknown level code {level}")
            }
            NodeDecodeError::MissingName { version_id } => {
                write!(f, "address object record {version_id} carries no name")
            }
        }
    }
}

impl Error for NodeDecodeError {}

impl RegistryNode {
    /// Decodes a raw version envelope into a typed node.
    pub fn from_relation(envelope: &RelationEnvelope) -> Result<Self, NodeDecodeError> {
        let data = &envelope.relation_data;
        let fias_level =
            FiasLevel::from_code(data.level).ok_or(NodeDecodeError::UnknownLevel {
                version_id: data.id,
                level: data.level,
            })?;

        let details = match envelope.relation_type {
            RelationKind::AddressObject => {
                let name = non_empty(data.name.as_deref()).ok_or(
                    NodeDecodeError::MissingName { version_id: data.id },
                )?;
                NodeDetails::AddressObject {
                    name,
                    type_code: non_empty(data.typename.as_deref()),
                }
            }
            RelationKind::House => NodeDetails::House(HouseNumbering {
                house_num: non_empty(data.housenum.as_deref()),
                house_type: data.housetype,
                add_num1: non_empty(data.addnum1.as_deref()),
                add_type1: data.addtype1,
                add_num2: non_empty(data.addnum2.as_deref()),
                add_type2: data.addtype2,
            }),
            RelationKind::Apartment => NodeDetails::Apartment {
                number: non_empty(data.number.as_deref()),
                apart_type: data.aparttype,
            },
            RelationKind::Room => NodeDetails::Room {
                number: non_empty(data.number.as_deref()),
                room_type: data.roomtype,
            },
            RelationKind::Stead => NodeDetails::Stead,
            RelationKind::CarPlace => NodeDetails::CarPlace,
            RelationKind::Unrecognized => NodeDetails::Unrecognized,
        };

        Ok(RegistryNode {
            version_id: data.id,
            object_id: data.objectid,
            object_guid: data.objectguid,
            fias_level,
            active: envelope.relation_is_active,
            actual: envelope.relation_is_actual,
            prev_id: chain_link(data.previd),
            next_id: chain_link(data.nextid),
            start_date: data.startdate,
            end_date: data.enddate,
            details,
        })
    }
}

fn chain_link(raw: Option<i64>) -> Option<i64> {
    raw.filter(|id| *id > 0)
}

fn non_empty(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}
