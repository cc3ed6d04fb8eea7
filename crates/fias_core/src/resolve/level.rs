//! Level classification.
//!
//! # Responsibility
//! - Map a node's relation kind plus raw registry level onto one of the
//!   eight abstract levels, or refuse it.
//! - Decide whether an area-classified ancestor is shown or suppressed,
//!   depending on whether a city already appeared above it.
//!
//! # Invariants
//! - Stead, car-place and unrecognized kinds never classify.
//! - Intra-city territory (level 14) is always suppressed; administrative,
//!   municipal and autonomous districts are suppressed only under a city.

use crate::model::levels::{AddressLevel, FiasLevel};
use crate::model::node::NodeDetails;
use crate::resolve::{ComposeError, ComposeResult};

/// Classifies one version record into an abstract level.
///
/// House, apartment and room records classify by kind alone; address
/// objects follow the registry level table.
pub fn classify(details: &NodeDetails, level: FiasLevel) -> ComposeResult<AddressLevel> {
    match details {
        NodeDetails::Stead | NodeDetails::CarPlace | NodeDetails::Unrecognized => {
            Err(ComposeError::UnsupportedLevel)
        }
        NodeDetails::House(_) => Ok(AddressLevel::House),
        NodeDetails::Apartment { .. } => Ok(AddressLevel::Flat),
        NodeDetails::Room { .. } => Ok(AddressLevel::Room),
        NodeDetails::AddressObject { .. } => match level {
            FiasLevel::Region => Ok(AddressLevel::Region),
            FiasLevel::AdministrativeDistrict
            | FiasLevel::MunicipalDistrict
            | FiasLevel::AutonomousArea
            | FiasLevel::IntraCityTerritory => Ok(AddressLevel::Area),
            FiasLevel::City => Ok(AddressLevel::City),
            FiasLevel::RuralUrbanSettlement
            | FiasLevel::Locality
            | FiasLevel::PlanningStructure
            | FiasLevel::AdditionalTerritory => Ok(AddressLevel::Settlement),
            FiasLevel::Street | FiasLevel::AdditionalTerritoryObject => Ok(AddressLevel::Street),
            // Tolerated: some regions publish buildings and units through
            // the address-object table.
            FiasLevel::House => Ok(AddressLevel::House),
            FiasLevel::Flat => Ok(AddressLevel::Flat),
            FiasLevel::Room => Ok(AddressLevel::Room),
            FiasLevel::Stead | FiasLevel::CarPlace => Err(ComposeError::UnsupportedLevel),
        },
    }
}

/// Whether an area-classified ancestor lands in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AreaDisposition {
    Populate,
    Suppress,
}

/// Suppression rule for area-classified ancestors.
///
/// Intra-city territories are structural placeholders and never shown.
/// District-grade levels are shown standalone but suppressed once a city
/// appeared higher up the chain.
pub fn area_disposition(level: FiasLevel, city_seen_above: bool) -> AreaDisposition {
    match level {
        FiasLevel::IntraCityTerritory => AreaDisposition::Suppress,
        FiasLevel::AdministrativeDistrict
        | FiasLevel::MunicipalDistrict
        | FiasLevel::AutonomousArea
            if city_seen_above =>
        {
            AreaDisposition::Suppress
        }
        _ => AreaDisposition::Populate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::node::HouseNumbering;

    fn addr_obj(name: &str) -> NodeDetails {
        NodeDetails::AddressObject {
            name: name.to_owned(),
            type_code: None,
        }
    }

    #[test]
    fn address_object_levels_follow_the_registry_table() {
        let cases = [
            (FiasLevel::Region, AddressLevel::Region),
            (FiasLevel::AdministrativeDistrict, AddressLevel::Area),
            (FiasLevel::MunicipalDistrict, AddressLevel::Area),
            (FiasLevel::AutonomousArea, AddressLevel::Area),
            (FiasLevel::IntraCityTerritory, AddressLevel::Area),
            (FiasLevel::City, AddressLevel::City),
            (FiasLevel::RuralUrbanSettlement, AddressLevel::Settlement),
            (FiasLevel::Locality, AddressLevel::Settlement),
            (FiasLevel::PlanningStructure, AddressLevel::Settlement),
            (FiasLevel::AdditionalTerritory, AddressLevel::Settlement),
            (FiasLevel::Street, AddressLevel::Street),
            (FiasLevel::AdditionalTerritoryObject, AddressLevel::Street),
            (FiasLevel::House, AddressLevel::House),
            (FiasLevel::Flat, AddressLevel::Flat),
            (FiasLevel::Room, AddressLevel::Room),
        ];
        for (raw, expected) in cases {
            let level = classify(&addr_obj("Тестовая"), raw).expect("level classifies");
            assert_eq!(level, expected, "raw level {raw:?}");
        }
    }

    #[test]
    fn kind_beats_raw_level_for_typed_records() {
        let house = NodeDetails::House(HouseNumbering::default());
        assert_eq!(
            classify(&house, FiasLevel::House).expect("house classifies"),
            AddressLevel::House
        );

        let flat = NodeDetails::Apartment {
            number: Some("10".to_owned()),
            apart_type: Some(2),
        };
        assert_eq!(
            classify(&flat, FiasLevel::Flat).expect("apartment classifies"),
            AddressLevel::Flat
        );

        let room = NodeDetails::Room {
            number: Some("3".to_owned()),
            room_type: Some(1),
        };
        assert_eq!(
            classify(&room, FiasLevel::Room).expect("room classifies"),
            AddressLevel::Room
        );
    }

    #[test]
    fn stead_and_car_place_never_classify() {
        assert_eq!(
            classify(&NodeDetails::Stead, FiasLevel::Stead),
            Err(ComposeError::UnsupportedLevel)
        );
        assert_eq!(
            classify(&NodeDetails::CarPlace, FiasLevel::CarPlace),
            Err(ComposeError::UnsupportedLevel)
        );
        assert_eq!(
            classify(&NodeDetails::Unrecognized, FiasLevel::Street),
            Err(ComposeError::UnsupportedLevel)
        );
        assert_eq!(
            classify(&addr_obj("Участок"), FiasLevel::Stead),
            Err(ComposeError::UnsupportedLevel)
        );
    }

    #[test]
    fn intra_city_territory_is_always_suppressed() {
        assert_eq!(
            area_disposition(FiasLevel::IntraCityTerritory, false),
            AreaDisposition::Suppress
        );
        assert_eq!(
            area_disposition(FiasLevel::IntraCityTerritory, true),
            AreaDisposition::Suppress
        );
    }

    #[test]
    fn districts_are_suppressed_only_under_a_city() {
        for level in [
            FiasLevel::AdministrativeDistrict,
            FiasLevel::MunicipalDistrict,
            FiasLevel::AutonomousArea,
        ] {
            assert_eq!(area_disposition(level, false), AreaDisposition::Populate);
            assert_eq!(area_disposition(level, true), AreaDisposition::Suppress);
        }
    }
}
