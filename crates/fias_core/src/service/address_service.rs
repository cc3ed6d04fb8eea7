//! Address composition service.
//!
//! # Responsibility
//! - Public entry point: take one hierarchy payload, drive attribute,
//!   version and level resolution over every node on the path and return
//!   the composed address.
//! - Own operation-boundary logging; the resolution stages stay silent.
//!
//! # Invariants
//! - The evaluation date is sampled once per composition; every node is
//!   resolved against the same date.
//! - Ancestors are processed in path order, the target last; the first
//!   error aborts and no partial record escapes.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Instant;

use chrono::{NaiveDate, Utc};
use log::{debug, error, info};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::dict::synonym_dict::SynonymDictionary;
use crate::dict::type_dict::TypeDictionary;
use crate::model::address::ComposedAddress;
use crate::model::levels::{AddressLevel, FiasLevel};
use crate::model::node::RegistryNode;
use crate::model::payload::{
    parse_parents, AddressPayload, ParamGroup, ParentEntry, RelationEnvelope,
};
use crate::resolve::attrs::{resolve_attributes, SelectedAttributes};
use crate::resolve::format::short_address;
use crate::resolve::level::{area_disposition, classify, AreaDisposition};
use crate::resolve::populate::populate_level;
use crate::resolve::version::{resolve_version, ResolvedVersion};
use crate::resolve::{ComposeError, ComposeResult};

static PATH_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+(\.\d+)*$").expect("valid path regex"));

/// Composition entry point over injected dictionaries.
///
/// The service is stateless apart from the dictionaries; a shared
/// reference can serve concurrent compositions.
pub struct AddressService<T: TypeDictionary, S: SynonymDictionary> {
    types: T,
    synonyms: S,
}

impl<T: TypeDictionary, S: SynonymDictionary> AddressService<T, S> {
    /// Creates a service over the provided dictionaries.
    pub fn new(types: T, synonyms: S) -> Self {
        Self { types, synonyms }
    }

    /// Composes the address of the payload's target as of today.
    ///
    /// # Side effects
    /// - Emits `address_compose` logging events with duration and status.
    pub fn compose(&self, payload: &AddressPayload) -> ComposeResult<ComposedAddress> {
        let started_at = Instant::now();
        info!(
            "event=address_compose module=service status=start hierarchy_id={} object_id={}",
            payload.hierarchy_id, payload.object_id
        );

        match self.compose_at(payload, Utc::now().date_naive()) {
            Ok(composed) => {
                info!(
                    "event=address_compose module=service status=ok hierarchy_id={} object_id={} level={} duration_ms={}",
                    payload.hierarchy_id,
                    payload.object_id,
                    composed.address_level().as_str(),
                    started_at.elapsed().as_millis()
                );
                Ok(composed)
            }
            Err(err) => {
                error!(
                    "event=address_compose module=service status=error hierarchy_id={} object_id={} duration_ms={} error_code={} error={}",
                    payload.hierarchy_id,
                    payload.object_id,
                    started_at.elapsed().as_millis(),
                    error_code(&err),
                    err
                );
                Err(err)
            }
        }
    }

    /// Composes the address as of an explicit date. Attribute snapshots and
    /// per-code values are selected against `at` instead of the current
    /// date.
    pub fn compose_at(
        &self,
        payload: &AddressPayload,
        at: NaiveDate,
    ) -> ComposeResult<ComposedAddress> {
        let path = parse_path(payload)?;
        let entries = parse_parents(&payload.parents).map_err(|err| {
            ComposeError::MalformedPayload(format!("parents is not valid JSON: {err}"))
        })?;
        let mut bundles = group_entries(entries, &path)?;

        let target_bundle = bundles.remove(&payload.object_id).ok_or_else(|| {
            ComposeError::MalformedPayload(format!(
                "no records for target object {}",
                payload.object_id
            ))
        })?;
        // Unsupported targets fail before any ancestor work. The check
        // covers both the relation tag and the raw level code, so a stead
        // published through the address-object table is caught here too.
        if let Some(envelope) = target_bundle.relations.first() {
            if !envelope.relation_type.is_supported() {
                return Err(ComposeError::UnsupportedLevel);
            }
            match FiasLevel::from_code(envelope.relation_data.level) {
                None | Some(FiasLevel::Stead) | Some(FiasLevel::CarPlace) => {
                    return Err(ComposeError::UnsupportedLevel);
                }
                Some(_) => {}
            }
        }

        let mut composed = ComposedAddress::draft(payload.hierarchy_id);
        let mut city_seen = false;

        for object_id in &path[..path.len() - 1] {
            let bundle = bundles.get(object_id).ok_or_else(|| {
                ComposeError::MalformedPayload(format!("no records for path object {object_id}"))
            })?;
            let outcome = resolve_node(*object_id, bundle, at)?;
            let current = &outcome.version.current;
            let level = classify(&current.details, current.fias_level)?;

            if level == AddressLevel::Area
                && area_disposition(current.fias_level, city_seen) == AreaDisposition::Suppress
            {
                debug!(
                    "event=address_compose module=service status=suppress object_id={object_id} raw_level={}",
                    current.fias_level.code()
                );
                continue;
            }
            if level == AddressLevel::City {
                city_seen = true;
            }
            populate_level(&mut composed, level, current, &outcome.attrs, &self.types)?;
        }

        let outcome = resolve_node(payload.object_id, &target_bundle, at)?;
        let current = &outcome.version.current;
        let level = classify(&current.details, current.fias_level)?;
        populate_level(&mut composed, level, current, &outcome.attrs, &self.types)?;

        composed.object_guid = current.object_guid;
        composed.fias_level = current.fias_level;
        composed.address_level = level;
        composed.postal_code = outcome.attrs.postal_code.clone();
        composed.okato = outcome.attrs.okato.clone();
        composed.oktmo = outcome.attrs.oktmo.clone();
        composed.kladr = outcome.attrs.kladr.clone();
        composed.address_code = outcome.attrs.address_code.clone();
        composed.synonyms = self.synonyms.synonyms(&current.object_guid);
        composed.renamings = outcome.version.renamings.clone();

        let line = short_address(&composed);
        composed.short_address = line;
        Ok(composed)
    }
}

/// Raw material of one node: pooled attribute groups plus all version
/// envelopes seen for its object id.
struct NodeBundle {
    params: Vec<ParamGroup>,
    relations: Vec<RelationEnvelope>,
}

struct NodeOutcome {
    attrs: SelectedAttributes,
    version: ResolvedVersion,
}

fn resolve_node(object_id: i64, bundle: &NodeBundle, at: NaiveDate) -> ComposeResult<NodeOutcome> {
    let mut records = Vec::with_capacity(bundle.relations.len());
    for envelope in &bundle.relations {
        records.push(RegistryNode::from_relation(envelope)?);
    }
    let attrs = resolve_attributes(object_id, &bundle.params, at)?;
    let version = resolve_version(object_id, &records)?;
    Ok(NodeOutcome { attrs, version })
}

fn parse_path(payload: &AddressPayload) -> ComposeResult<Vec<i64>> {
    let raw = payload.path_ltree.trim();
    if !PATH_RE.is_match(raw) {
        return Err(ComposeError::MalformedPayload(format!(
            "path `{raw}` is not a dot-delimited id path"
        )));
    }

    let mut path = Vec::new();
    let mut seen: BTreeSet<i64> = BTreeSet::new();
    for part in raw.split('.') {
        let id: i64 = part.parse().map_err(|_| {
            ComposeError::MalformedPayload(format!("path element `{part}` is out of range"))
        })?;
        if !seen.insert(id) {
            return Err(ComposeError::MalformedPayload(format!(
                "path `{raw}` repeats object {id}"
            )));
        }
        path.push(id);
    }

    match path.last() {
        Some(last) if *last == payload.object_id => Ok(path),
        _ => Err(ComposeError::MalformedPayload(format!(
            "path `{raw}` does not end at target object {}",
            payload.object_id
        ))),
    }
}

fn group_entries(
    entries: Vec<ParentEntry>,
    path: &[i64],
) -> ComposeResult<BTreeMap<i64, NodeBundle>> {
    let on_path: BTreeSet<i64> = path.iter().copied().collect();
    let mut bundles: BTreeMap<i64, NodeBundle> = BTreeMap::new();
    for entry in entries {
        let object_id = entry.relation.relation_data.objectid;
        if !on_path.contains(&object_id) {
            return Err(ComposeError::MalformedPayload(format!(
                "record for object {object_id} does not belong to the path"
            )));
        }
        let bundle = bundles.entry(object_id).or_insert_with(|| NodeBundle {
            params: Vec::new(),
            relations: Vec::new(),
        });
        bundle.params.extend(entry.params);
        bundle.relations.push(entry.relation);
    }
    Ok(bundles)
}

fn error_code(err: &ComposeError) -> &'static str {
    match err {
        ComposeError::UnsupportedLevel => "unsupported_level",
        ComposeError::MalformedPayload(_) => "malformed_payload",
        ComposeError::EmptyAttributeSet { .. } => "empty_attribute_set",
        ComposeError::NoVersionRecord { .. } => "no_version_record",
    }
}
