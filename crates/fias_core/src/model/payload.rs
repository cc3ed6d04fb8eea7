//! Inbound payload shapes.
//!
//! # Responsibility
//! - Mirror the row the hierarchy lookup hands over for one target object:
//!   the target ids, its materialized path and the JSON-encoded array of
//!   per-version ancestor entries.
//! - Decode that array with serde; no semantic checks happen here.
//!
//! # Invariants
//! - Field names match the lookup's JSON keys verbatim; renames live in
//!   serde attributes, never in call sites.
//! - Every entry carries exactly one version record; attribute values may be
//!   absent, version envelopes may not.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::levels::RelationKind;

/// One row of the hierarchy lookup: the resolution subject plus the raw
/// material for every node on its path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressPayload {
    /// Identifier of the hierarchy row the path was taken from.
    pub hierarchy_id: i64,
    /// Registry object id of the resolution target.
    pub object_id: i64,
    /// Dot-delimited object-id path, root first, target last.
    pub path_ltree: String,
    /// JSON-encoded array of [`ParentEntry`] values, one per node version.
    pub parents: String,
}

/// One version of one node on the path, with the attribute rows that were
/// joined onto it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParentEntry {
    #[serde(default)]
    pub params: Vec<ParamGroup>,
    pub relation: RelationEnvelope,
}

/// Attribute rows grouped by parameter type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamGroup {
    #[serde(default)]
    pub values: Vec<ParamValue>,
}

/// A single dated attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamValue {
    pub value: String,
    pub type_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Version record of a node together with its lifecycle flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationEnvelope {
    pub relation_data: RelationData,
    pub relation_type: RelationKind,
    pub relation_is_active: bool,
    pub relation_is_actual: bool,
}

/// Raw version record as stored in the registry tables. Which optional
/// fields are present depends on `relation_type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationData {
    /// Version record id, unique within one object's history.
    pub id: i64,
    pub objectid: i64,
    pub objectguid: Uuid,
    pub level: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub typename: Option<String>,
    /// The registry encodes a missing link as `0`.
    #[serde(default)]
    pub previd: Option<i64>,
    #[serde(default)]
    pub nextid: Option<i64>,
    pub startdate: NaiveDate,
    pub enddate: NaiveDate,
    #[serde(default)]
    pub housenum: Option<String>,
    #[serde(default)]
    pub housetype: Option<i64>,
    #[serde(default)]
    pub addnum1: Option<String>,
    #[serde(default)]
    pub addtype1: Option<i64>,
    #[serde(default)]
    pub addnum2: Option<String>,
    #[serde(default)]
    pub addtype2: Option<i64>,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub aparttype: Option<i64>,
    #[serde(default)]
    pub roomtype: Option<i64>,
}

/// Decodes the JSON-encoded `parents` column of a payload.
pub fn parse_parents(raw: &str) -> Result<Vec<ParentEntry>, serde_json::Error> {
    serde_json::from_str(raw)
}
