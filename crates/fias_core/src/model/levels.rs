//! Level taxonomy of the state address registry.
//!
//! # Responsibility
//! - Mirror the raw registry level codes (`FiasLevel`) exactly as the
//!   registry publishes them.
//! - Define the eight abstract levels (`AddressLevel`) a composed address
//!   is reported against.
//! - Tag the source table a hierarchy row was joined from (`RelationKind`).
//!
//! # Invariants
//! - `FiasLevel::from_code` and `FiasLevel::code` are inverse for every
//!   published code; codes outside `1..=17` are never representable.
//! - `AddressLevel::ORDERED` lists the abstract levels root first and is the
//!   only ordering formatters and populators rely on.

use serde::{Deserialize, Serialize};

/// Raw level code of a registry object, as published by the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FiasLevel {
    Region,
    AdministrativeDistrict,
    MunicipalDistrict,
    RuralUrbanSettlement,
    City,
    Locality,
    PlanningStructure,
    Street,
    Stead,
    House,
    Flat,
    Room,
    AutonomousArea,
    IntraCityTerritory,
    AdditionalTerritory,
    AdditionalTerritoryObject,
    CarPlace,
}

impl FiasLevel {
    /// Decodes a registry level code. Codes outside the published table
    /// yield `None`.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(FiasLevel::Region),
            2 => Some(FiasLevel::AdministrativeDistrict),
            3 => Some(FiasLevel::MunicipalDistrict),
            4 => Some(FiasLevel::RuralUrbanSettlement),
            5 => Some(FiasLevel::City),
            6 => Some(FiasLevel::Locality),
            7 => Some(FiasLevel::PlanningStructure),
            8 => Some(FiasLevel::Street),
            9 => Some(FiasLevel::Stead),
            10 => Some(FiasLevel::House),
            11 => Some(FiasLevel::Flat),
            12 => Some(FiasLevel::Room),
            13 => Some(FiasLevel::AutonomousArea),
            14 => Some(FiasLevel::IntraCityTerritory),
            15 => Some(FiasLevel::AdditionalTerritory),
            16 => Some(FiasLevel::AdditionalTerritoryObject),
            17 => Some(FiasLevel::CarPlace),
            _ => None,
        }
    }

    /// Numeric code of the level as the registry publishes it.
    pub fn code(&self) -> i64 {
        match self {
            FiasLevel::Region => 1,
            FiasLevel::AdministrativeDistrict => 2,
            FiasLevel::MunicipalDistrict => 3,
            FiasLevel::RuralUrbanSettlement => 4,
            FiasLevel::City => 5,
            FiasLevel::Locality => 6,
            FiasLevel::PlanningStructure => 7,
            FiasLevel::Street => 8,
            FiasLevel::Stead => 9,
            FiasLevel::House => 10,
            FiasLevel::Flat => 11,
            FiasLevel::Room => 12,
            FiasLevel::AutonomousArea => 13,
            FiasLevel::IntraCityTerritory => 14,
            FiasLevel::AdditionalTerritory => 15,
            FiasLevel::AdditionalTerritoryObject => 16,
            FiasLevel::CarPlace => 17,
        }
    }
}

/// Abstract level of a composed address. One slot per variant in the output
/// record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressLevel {
    Region,
    Area,
    City,
    Settlement,
    Street,
    House,
    Flat,
    Room,
}

impl AddressLevel {
    /// All abstract levels, root first. Formatting walks this order.
    pub const ORDERED: [AddressLevel; 8] = [
        AddressLevel::Region,
        AddressLevel::Area,
        AddressLevel::City,
        AddressLevel::Settlement,
        AddressLevel::Street,
        AddressLevel::House,
        AddressLevel::Flat,
        AddressLevel::Room,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AddressLevel::Region => "region",
            AddressLevel::Area => "area",
            AddressLevel::City => "city",
            AddressLevel::Settlement => "settlement",
            AddressLevel::Street => "street",
            AddressLevel::House => "house",
            AddressLevel::Flat => "flat",
            AddressLevel::Room => "room",
        }
    }
}

/// Source table a hierarchy row was joined from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationKind {
    #[serde(rename = "addr_obj")]
    AddressObject,
    #[serde(rename = "house")]
    House,
    #[serde(rename = "apartment")]
    Apartment,
    #[serde(rename = "room")]
    Room,
    #[serde(rename = "stead")]
    Stead,
    #[serde(rename = "carplace")]
    CarPlace,
    /// Catch-all for relation tags this crate does not map to an address
    /// level.
    #[serde(other)]
    Unrecognized,
}

impl RelationKind {
    /// Whether rows of this kind can appear in a composed address.
    pub fn is_supported(&self) -> bool {
        !matches!(
            self,
            RelationKind::Stead | RelationKind::CarPlace | RelationKind::Unrecognized
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_codes_round_trip() {
        for code in 1..=17 {
            let level = FiasLevel::from_code(code).expect("published code decodes");
            assert_eq!(level.code(), code);
        }
    }

    #[test]
    fn unknown_level_codes_are_rejected() {
        assert_eq!(FiasLevel::from_code(0), None);
        assert_eq!(FiasLevel::from_code(18), None);
        assert_eq!(FiasLevel::from_code(-3), None);
    }

    #[test]
    fn ordered_levels_start_at_region_and_end_at_room() {
        assert_eq!(AddressLevel::ORDERED.first(), Some(&AddressLevel::Region));
        assert_eq!(AddressLevel::ORDERED.last(), Some(&AddressLevel::Room));
        assert_eq!(AddressLevel::ORDERED.len(), 8);
    }

    #[test]
    fn relation_kind_decodes_registry_tags() {
        let kind: RelationKind = serde_json::from_str("\"addr_obj\"").expect("known tag");
        assert_eq!(kind, RelationKind::AddressObject);
        let kind: RelationKind = serde_json::from_str("\"carplace\"").expect("known tag");
        assert_eq!(kind, RelationKind::CarPlace);
    }

    #[test]
    fn unknown_relation_tags_fall_back_to_unrecognized() {
        let kind: RelationKind = serde_json::from_str("\"division\"").expect("catch-all");
        assert_eq!(kind, RelationKind::Unrecognized);
        assert!(!kind.is_supported());
    }

    #[test]
    fn stead_and_car_place_are_unsupported() {
        assert!(!RelationKind::Stead.is_supported());
        assert!(!RelationKind::CarPlace.is_supported());
        assert!(RelationKind::House.is_supported());
        assert!(RelationKind::AddressObject.is_supported());
    }
}
