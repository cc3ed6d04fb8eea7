//! Composed address record.
//!
//! # Responsibility
//! - Hold the resolved output of one composition: eight level slots, block
//!   qualifiers, target identity and codes, synonyms, renamings and the
//!   formatted one-line address.
//! - Expose everything read-only; only the resolution pipeline writes here.
//!
//! # Invariants
//! - Exactly one slot matches the target's classified level and carries the
//!   target's GUID once composition finished.
//! - Slots below the target's level stay empty; a suppressed area slot stays
//!   empty as well.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::levels::{AddressLevel, FiasLevel};

/// One abstract level of a composed address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSlot {
    pub(crate) object_guid: Option<Uuid>,
    pub(crate) kladr: Option<String>,
    pub(crate) type_short: Option<String>,
    pub(crate) type_full: Option<String>,
    pub(crate) name: Option<String>,
}

impl LevelSlot {
    pub fn object_guid(&self) -> Option<Uuid> {
        self.object_guid
    }

    pub fn kladr(&self) -> Option<&str> {
        self.kladr.as_deref()
    }

    pub fn type_short(&self) -> Option<&str> {
        self.type_short.as_deref()
    }

    pub fn type_full(&self) -> Option<&str> {
        self.type_full.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.object_guid.is_none()
            && self.kladr.is_none()
            && self.type_short.is_none()
            && self.type_full.is_none()
            && self.name.is_none()
    }
}

/// Additional house number (корпус, строение, сооружение, литера) shown
/// after the main house number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockQualifier {
    pub(crate) type_short: Option<String>,
    pub(crate) type_full: Option<String>,
    pub(crate) value: Option<String>,
}

impl BlockQualifier {
    pub fn type_short(&self) -> Option<&str> {
        self.type_short.as_deref()
    }

    pub fn type_full(&self) -> Option<&str> {
        self.type_full.as_deref()
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.type_short.is_none() && self.type_full.is_none() && self.value.is_none()
    }
}

/// Fully resolved address of one registry object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposedAddress {
    pub(crate) object_guid: Uuid,
    pub(crate) hierarchy_id: i64,
    pub(crate) fias_level: FiasLevel,
    pub(crate) address_level: AddressLevel,
    pub(crate) postal_code: Option<String>,
    pub(crate) okato: Option<String>,
    pub(crate) oktmo: Option<String>,
    pub(crate) kladr: Option<String>,
    pub(crate) address_code: Option<String>,
    pub(crate) region: LevelSlot,
    pub(crate) area: LevelSlot,
    pub(crate) city: LevelSlot,
    pub(crate) settlement: LevelSlot,
    pub(crate) street: LevelSlot,
    pub(crate) house: LevelSlot,
    pub(crate) flat: LevelSlot,
    pub(crate) room: LevelSlot,
    pub(crate) block1: BlockQualifier,
    pub(crate) block2: BlockQualifier,
    pub(crate) synonyms: Vec<String>,
    pub(crate) renamings: Vec<String>,
    pub(crate) short_address: String,
}

impl ComposedAddress {
    /// Empty record the pipeline populates level by level. Target identity
    /// fields hold placeholders until the target node is resolved; the
    /// service never returns a draft.
    pub(crate) fn draft(hierarchy_id: i64) -> Self {
        ComposedAddress {
            object_guid: Uuid::nil(),
            hierarchy_id,
            fias_level: FiasLevel::Region,
            address_level: AddressLevel::Region,
            postal_code: None,
            okato: None,
            oktmo: None,
            kladr: None,
            address_code: None,
            region: LevelSlot::default(),
            area: LevelSlot::default(),
            city: LevelSlot::default(),
            settlement: LevelSlot::default(),
            street: LevelSlot::default(),
            house: LevelSlot::default(),
            flat: LevelSlot::default(),
            room: LevelSlot::default(),
            block1: BlockQualifier::default(),
            block2: BlockQualifier::default(),
            synonyms: Vec::new(),
            renamings: Vec::new(),
            short_address: String::new(),
        }
    }

    pub fn object_guid(&self) -> Uuid {
        self.object_guid
    }

    pub fn hierarchy_id(&self) -> i64 {
        self.hierarchy_id
    }

    /// Raw registry level of the target.
    pub fn fias_level(&self) -> FiasLevel {
        self.fias_level
    }

    /// Abstract level the target was classified into.
    pub fn address_level(&self) -> AddressLevel {
        self.address_level
    }

    pub fn postal_code(&self) -> Option<&str> {
        self.postal_code.as_deref()
    }

    pub fn okato(&self) -> Option<&str> {
        self.okato.as_deref()
    }

    pub fn oktmo(&self) -> Option<&str> {
        self.oktmo.as_deref()
    }

    pub fn kladr(&self) -> Option<&str> {
        self.kladr.as_deref()
    }

    pub fn address_code(&self) -> Option<&str> {
        self.address_code.as_deref()
    }

    pub fn slot(&self, level: AddressLevel) -> &LevelSlot {
        match level {
            AddressLevel::Region => &self.region,
            AddressLevel::Area => &self.area,
            AddressLevel::City => &self.city,
            AddressLevel::Settlement => &self.settlement,
            AddressLevel::Street => &self.street,
            AddressLevel::House => &self.house,
            AddressLevel::Flat => &self.flat,
            AddressLevel::Room => &self.room,
        }
    }

    pub(crate) fn slot_mut(&mut self, level: AddressLevel) -> &mut LevelSlot {
        match level {
            AddressLevel::Region => &mut self.region,
            AddressLevel::Area => &mut self.area,
            AddressLevel::City => &mut self.city,
            AddressLevel::Settlement => &mut self.settlement,
            AddressLevel::Street => &mut self.street,
            AddressLevel::House => &mut self.house,
            AddressLevel::Flat => &mut self.flat,
            AddressLevel::Room => &mut self.room,
        }
    }

    pub fn region(&self) -> &LevelSlot {
        &self.region
    }

    pub fn area(&self) -> &LevelSlot {
        &self.area
    }

    pub fn city(&self) -> &LevelSlot {
        &self.city
    }

    pub fn settlement(&self) -> &LevelSlot {
        &self.settlement
    }

    pub fn street(&self) -> &LevelSlot {
        &self.street
    }

    pub fn house(&self) -> &LevelSlot {
        &self.house
    }

    pub fn flat(&self) -> &LevelSlot {
        &self.flat
    }

    pub fn room(&self) -> &LevelSlot {
        &self.room
    }

    pub fn block1(&self) -> &BlockQualifier {
        &self.block1
    }

    pub fn block2(&self) -> &BlockQualifier {
        &self.block2
    }

    /// Alternate names of the target supplied by the synonym dictionary.
    pub fn synonyms(&self) -> &[String] {
        &self.synonyms
    }

    /// Previous distinct names from the target's version chain, nearest
    /// first.
    pub fn renamings(&self) -> &[String] {
        &self.renamings
    }

    /// One-line display form, root to unit.
    pub fn short_address(&self) -> &str {
        &self.short_address
    }
}
