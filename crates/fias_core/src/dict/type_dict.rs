//! Abbreviation dictionary for registry type codes.
//!
//! # Responsibility
//! - Resolve the coded type of a node (address-object typename string,
//!   numeric house/apartment/room type ids) into a short and a full display
//!   label.
//! - Ship the published registry tables as an in-memory default so the
//!   engine works without external dictionary storage.
//!
//! # Invariants
//! - Lookups are read-only and never fail; an unknown code yields `None`
//!   and the caller leaves the type fields empty.
//! - Typename lookup is case-insensitive and ignores a trailing dot; the
//!   registry is inconsistent about both.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Short and full display form of one coded type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeLabel {
    pub short: String,
    pub full: String,
}

impl TypeLabel {
    pub fn new(short: &str, full: &str) -> Self {
        TypeLabel {
            short: short.to_owned(),
            full: full.to_owned(),
        }
    }
}

/// Resolves coded types into display labels.
///
/// Implementations are immutable after construction and safe to share
/// across threads by reference.
pub trait TypeDictionary {
    /// Label for an address-object typename, e.g. `"ул"` or `"Респ"`.
    fn object_type(&self, code: &str) -> Option<TypeLabel>;
    /// Label for a numeric house type id.
    fn house_type(&self, code: i64) -> Option<TypeLabel>;
    /// Label for a numeric additional-number type id (корпус, строение, ...).
    fn house_add_type(&self, code: i64) -> Option<TypeLabel>;
    /// Label for a numeric apartment type id.
    fn apartment_type(&self, code: i64) -> Option<TypeLabel>;
    /// Label for a numeric room type id.
    fn room_type(&self, code: i64) -> Option<TypeLabel>;
}

/// Map-backed dictionary seeded from the published registry tables.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTypeDictionary {
    object_types: BTreeMap<String, TypeLabel>,
    house_types: BTreeMap<i64, TypeLabel>,
    house_add_types: BTreeMap<i64, TypeLabel>,
    apartment_types: BTreeMap<i64, TypeLabel>,
    room_types: BTreeMap<i64, TypeLabel>,
}

fn normalize_typename(raw: &str) -> String {
    raw.trim().trim_end_matches('.').to_lowercase()
}

impl InMemoryTypeDictionary {
    /// Empty dictionary. Every lookup misses until codes are registered.
    pub fn new() -> Self {
        InMemoryTypeDictionary::default()
    }

    /// Dictionary pre-seeded with the published registry type tables.
    pub fn gar_defaults() -> Self {
        let mut dict = InMemoryTypeDictionary::new();

        for (code, short, full) in [
            ("респ", "респ.", "республика"),
            ("обл", "обл.", "область"),
            ("край", "край", "край"),
            ("АО", "АО", "автономный округ"),
            ("Аобл", "Аобл", "автономная область"),
            ("г.ф.з.", "г.ф.з.", "город федерального значения"),
            ("г", "г.", "город"),
            ("р-н", "р-н", "район"),
            ("м.р-н", "м.р-н", "муниципальный район"),
            ("г.о.", "г.о.", "городской округ"),
            ("пгт", "пгт", "поселок городского типа"),
            ("рп", "рп", "рабочий поселок"),
            ("кп", "кп", "курортный поселок"),
            ("с", "с.", "село"),
            ("д", "д.", "деревня"),
            ("п", "п.", "поселок"),
            ("х", "х.", "хутор"),
            ("ст-ца", "ст-ца", "станица"),
            ("сл", "сл.", "слобода"),
            ("аул", "аул", "аул"),
            ("ул", "ул.", "улица"),
            ("пер", "пер.", "переулок"),
            ("пр-кт", "пр-кт", "проспект"),
            ("ш", "ш.", "шоссе"),
            ("б-р", "б-р", "бульвар"),
            ("наб", "наб.", "набережная"),
            ("пл", "пл.", "площадь"),
            ("проезд", "проезд", "проезд"),
            ("туп", "туп.", "тупик"),
            ("линия", "линия", "линия"),
            ("тер", "тер.", "территория"),
            ("снт", "снт", "садоводческое некоммерческое товарищество"),
            ("мкр", "мкр.", "микрорайон"),
            ("кв-л", "кв-л", "квартал"),
        ] {
            dict.insert_object_type(code, short, full);
        }

        for (code, short, full) in [
            (1, "влд.", "владение"),
            (2, "д.", "дом"),
            (3, "двлд.", "домовладение"),
            (4, "г-ж", "гараж"),
            (5, "зд.", "здание"),
            (6, "шахта", "шахта"),
            (7, "стр.", "строение"),
            (8, "соор.", "сооружение"),
            (9, "литера", "литера"),
            (10, "к.", "корпус"),
        ] {
            dict.insert_house_type(code, short, full);
        }

        for (code, short, full) in [
            (1, "к.", "корпус"),
            (2, "стр.", "строение"),
            (3, "соор.", "сооружение"),
            (4, "лит.", "литера"),
        ] {
            dict.insert_house_add_type(code, short, full);
        }

        for (code, short, full) in [
            (1, "помещ.", "помещение"),
            (2, "кв.", "квартира"),
            (3, "оф.", "офис"),
            (4, "ком.", "комната"),
            (5, "раб.уч.", "рабочий участок"),
            (6, "скл.", "склад"),
            (7, "торг.зал", "торговый зал"),
            (8, "цех", "цех"),
            (9, "пав.", "павильон"),
            (10, "подв.", "подвал"),
            (11, "кот.", "котельная"),
            (12, "п-б", "погреб"),
            (13, "г-ж", "гараж"),
        ] {
            dict.insert_apartment_type(code, short, full);
        }

        for (code, short, full) in [(1, "ком.", "комната"), (2, "помещ.", "помещение")] {
            dict.insert_room_type(code, short, full);
        }

        dict
    }

    pub fn insert_object_type(&mut self, code: &str, short: &str, full: &str) {
        self.object_types
            .insert(normalize_typename(code), TypeLabel::new(short, full));
    }

    pub fn insert_house_type(&mut self, code: i64, short: &str, full: &str) {
        self.house_types.insert(code, TypeLabel::new(short, full));
    }

    pub fn insert_house_add_type(&mut self, code: i64, short: &str, full: &str) {
        self.house_add_types
            .insert(code, TypeLabel::new(short, full));
    }

    pub fn insert_apartment_type(&mut self, code: i64, short: &str, full: &str) {
        self.apartment_types
            .insert(code, TypeLabel::new(short, full));
    }

    pub fn insert_room_type(&mut self, code: i64, short: &str, full: &str) {
        self.room_types.insert(code, TypeLabel::new(short, full));
    }
}

impl TypeDictionary for InMemoryTypeDictionary {
    fn object_type(&self, code: &str) -> Option<TypeLabel> {
        self.object_types.get(&normalize_typename(code)).cloned()
    }

    fn house_type(&self, code: i64) -> Option<TypeLabel> {
        self.house_types.get(&code).cloned()
    }

    fn house_add_type(&self, code: i64) -> Option<TypeLabel> {
        self.house_add_types.get(&code).cloned()
    }

    fn apartment_type(&self, code: i64) -> Option<TypeLabel> {
        self.apartment_types.get(&code).cloned()
    }

    fn room_type(&self, code: i64) -> Option<TypeLabel> {
        self.room_types.get(&code).cloned()
    }
}
