//! Temporal attribute selection.
//!
//! # Responsibility
//! - Pick, per node, the attribute snapshot that is valid at the evaluation
//!   date and read the coded values (postal index, OKATO, OKTMO, KLADR,
//!   address code, official name) out of it.
//!
//! # Invariants
//! - A snapshot whose range contains the evaluation date always beats one
//!   that does not; among equals the latest end date wins, then the latest
//!   start date, then payload order.
//! - A node without a single non-empty snapshot aborts composition.

use chrono::NaiveDate;

use crate::model::payload::{ParamGroup, ParamValue};
use crate::resolve::{ComposeError, ComposeResult};

/// Parameter type ids of the registry parameter dictionary.
pub const PARAM_TYPE_POSTAL_INDEX: i64 = 5;
pub const PARAM_TYPE_OKATO: i64 = 6;
pub const PARAM_TYPE_OKTMO: i64 = 7;
pub const PARAM_TYPE_KLADR: i64 = 10;
pub const PARAM_TYPE_ADDRESS_CODE: i64 = 11;
pub const PARAM_TYPE_OFFICIAL_NAME: i64 = 16;

/// Coded values read from the snapshot selected for one node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectedAttributes {
    pub postal_code: Option<String>,
    pub okato: Option<String>,
    pub oktmo: Option<String>,
    pub kladr: Option<String>,
    pub address_code: Option<String>,
    /// Free-text official name; overrides the displayed name on region
    /// slots only.
    pub official_name: Option<String>,
}

/// Selects the attribute snapshot for `today` and extracts its coded
/// values.
pub fn resolve_attributes(
    object_id: i64,
    groups: &[ParamGroup],
    today: NaiveDate,
) -> ComposeResult<SelectedAttributes> {
    let mut selected: Option<(&ParamGroup, (bool, NaiveDate, NaiveDate))> = None;
    for group in groups {
        let Some((start, end)) = group_span(group) else {
            continue;
        };
        let rank = (start <= today && today <= end, end, start);
        match &selected {
            Some((_, best)) if *best >= rank => {}
            _ => selected = Some((group, rank)),
        }
    }

    let Some((group, _)) = selected else {
        return Err(ComposeError::EmptyAttributeSet { object_id });
    };

    Ok(SelectedAttributes {
        postal_code: pick_value(group, PARAM_TYPE_POSTAL_INDEX, today),
        okato: pick_value(group, PARAM_TYPE_OKATO, today),
        oktmo: pick_value(group, PARAM_TYPE_OKTMO, today),
        kladr: pick_value(group, PARAM_TYPE_KLADR, today),
        address_code: pick_value(group, PARAM_TYPE_ADDRESS_CODE, today),
        official_name: pick_value(group, PARAM_TYPE_OFFICIAL_NAME, today),
    })
}

/// Validity span of a snapshot: earliest value start to latest value end.
fn group_span(group: &ParamGroup) -> Option<(NaiveDate, NaiveDate)> {
    let start = group.values.iter().map(|v| v.start_date).min()?;
    let end = group.values.iter().map(|v| v.end_date).max()?;
    Some((start, end))
}

fn pick_value(group: &ParamGroup, type_id: i64, today: NaiveDate) -> Option<String> {
    let mut best: Option<(&ParamValue, (bool, NaiveDate, NaiveDate))> = None;
    for value in &group.values {
        if value.type_id != type_id || value.value.trim().is_empty() {
            continue;
        }
        let rank = (
            value.start_date <= today && today <= value.end_date,
            value.end_date,
            value.start_date,
        );
        match &best {
            Some((_, best_rank)) if *best_rank >= rank => {}
            _ => best = Some((value, rank)),
        }
    }
    best.map(|(value, _)| value.value.trim().to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn value(type_id: i64, value: &str, start: NaiveDate, end: NaiveDate) -> ParamValue {
        ParamValue {
            value: value.to_owned(),
            type_id,
            start_date: start,
            end_date: end,
        }
    }

    fn group(values: Vec<ParamValue>) -> ParamGroup {
        ParamGroup { values }
    }

    #[test]
    fn node_without_any_snapshot_aborts() {
        let today = date(2024, 6, 1);
        let err = resolve_attributes(5_705, &[], today).expect_err("empty set is fatal");
        assert_eq!(err, ComposeError::EmptyAttributeSet { object_id: 5_705 });

        let err = resolve_attributes(5_705, &[group(vec![])], today)
            .expect_err("valueless groups do not count");
        assert_eq!(err, ComposeError::EmptyAttributeSet { object_id: 5_705 });
    }

    #[test]
    fn snapshot_containing_today_beats_a_later_expired_one() {
        let today = date(2024, 6, 1);
        let expired = group(vec![value(
            PARAM_TYPE_POSTAL_INDEX,
            "450000",
            date(1990, 1, 1),
            date(2005, 1, 1),
        )]);
        let current = group(vec![value(
            PARAM_TYPE_POSTAL_INDEX,
            "450001",
            date(2005, 1, 2),
            date(2079, 6, 6),
        )]);

        let attrs = resolve_attributes(1, &[expired, current], today).expect("resolves");
        assert_eq!(attrs.postal_code.as_deref(), Some("450001"));
    }

    #[test]
    fn without_a_containing_snapshot_the_latest_end_wins() {
        let today = date(2024, 6, 1);
        let older = group(vec![value(
            PARAM_TYPE_OKATO,
            "80401000000",
            date(1990, 1, 1),
            date(2000, 1, 1),
        )]);
        let newer = group(vec![value(
            PARAM_TYPE_OKATO,
            "80401385000",
            date(2000, 1, 2),
            date(2010, 1, 1),
        )]);

        let attrs = resolve_attributes(1, &[older, newer], today).expect("resolves");
        assert_eq!(attrs.okato.as_deref(), Some("80401385000"));
    }

    #[test]
    fn snapshot_span_covers_all_of_its_values() {
        // The group as a whole contains today even though the postal value
        // alone expired earlier.
        let today = date(2024, 6, 1);
        let mixed = group(vec![
            value(
                PARAM_TYPE_POSTAL_INDEX,
                "450000",
                date(1990, 1, 1),
                date(2005, 1, 1),
            ),
            value(
                PARAM_TYPE_KLADR,
                "0200000100000",
                date(1990, 1, 1),
                date(2079, 6, 6),
            ),
        ]);

        let attrs = resolve_attributes(1, &[mixed], today).expect("resolves");
        assert_eq!(attrs.postal_code.as_deref(), Some("450000"));
        assert_eq!(attrs.kladr.as_deref(), Some("0200000100000"));
    }

    #[test]
    fn per_code_extraction_prefers_the_value_valid_today() {
        let today = date(2024, 6, 1);
        let snapshot = group(vec![
            value(
                PARAM_TYPE_POSTAL_INDEX,
                "450000",
                date(1990, 1, 1),
                date(2005, 1, 1),
            ),
            value(
                PARAM_TYPE_POSTAL_INDEX,
                "450008",
                date(2005, 1, 2),
                date(2079, 6, 6),
            ),
        ]);

        let attrs = resolve_attributes(1, &[snapshot], today).expect("resolves");
        assert_eq!(attrs.postal_code.as_deref(), Some("450008"));
    }

    #[test]
    fn every_known_code_is_extracted() {
        let today = date(2024, 6, 1);
        let wide = (date(1900, 1, 1), date(2079, 6, 6));
        let snapshot = group(vec![
            value(PARAM_TYPE_POSTAL_INDEX, "450000", wide.0, wide.1),
            value(PARAM_TYPE_OKATO, "80401000000", wide.0, wide.1),
            value(PARAM_TYPE_OKTMO, "80701000001", wide.0, wide.1),
            value(PARAM_TYPE_KLADR, "0200000100000", wide.0, wide.1),
            value(PARAM_TYPE_ADDRESS_CODE, "020000010000000000000", wide.0, wide.1),
            value(PARAM_TYPE_OFFICIAL_NAME, "Республика Башкортостан", wide.0, wide.1),
        ]);

        let attrs = resolve_attributes(1, &[snapshot], today).expect("resolves");
        assert_eq!(attrs.postal_code.as_deref(), Some("450000"));
        assert_eq!(attrs.okato.as_deref(), Some("80401000000"));
        assert_eq!(attrs.oktmo.as_deref(), Some("80701000001"));
        assert_eq!(attrs.kladr.as_deref(), Some("0200000100000"));
        assert_eq!(attrs.address_code.as_deref(), Some("020000010000000000000"));
        assert_eq!(
            attrs.official_name.as_deref(),
            Some("Республика Башкортостан")
        );
    }

    #[test]
    fn blank_values_and_foreign_codes_are_ignored() {
        let today = date(2024, 6, 1);
        let wide = (date(1900, 1, 1), date(2079, 6, 6));
        let snapshot = group(vec![
            value(PARAM_TYPE_POSTAL_INDEX, "   ", wide.0, wide.1),
            value(900, "irrelevant", wide.0, wide.1),
        ]);

        let attrs = resolve_attributes(1, &[snapshot], today).expect("resolves");
        assert_eq!(attrs.postal_code, None);
        assert_eq!(attrs.okato, None);
    }
}
