//! Version chain resolution.
//!
//! # Responsibility
//! - Pick, from the version records of one node, the record the address is
//!   composed from: the single active-and-actual one when the envelope
//!   flags name it, otherwise the terminal of the longest resolvable
//!   prev/next chain.
//! - Collect previous distinct display names by walking the chain
//!   backwards from the chosen record.
//!
//! # Invariants
//! - Chain walks are bounded by a visited set; a revisited record means a
//!   corrupt chain and aborts composition.
//! - A link to a record absent from the payload ends the walk; partial
//!   histories are normal.

use std::collections::{BTreeMap, BTreeSet};

use crate::model::node::RegistryNode;
use crate::resolve::{ComposeError, ComposeResult};

/// Outcome of chain resolution for one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVersion {
    pub current: RegistryNode,
    /// Previous distinct display names, nearest first.
    pub renamings: Vec<String>,
}

/// Resolves the current version of one node.
pub fn resolve_version(
    object_id: i64,
    records: &[RegistryNode],
) -> ComposeResult<ResolvedVersion> {
    if records.is_empty() {
        return Err(ComposeError::NoVersionRecord { object_id });
    }

    let mut index: BTreeMap<i64, usize> = BTreeMap::new();
    for (pos, record) in records.iter().enumerate() {
        if index.insert(record.version_id, pos).is_some() {
            return Err(ComposeError::MalformedPayload(format!(
                "duplicate version record {} for object {object_id}",
                record.version_id
            )));
        }
    }

    let flagged: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, r)| r.active && r.actual)
        .map(|(pos, _)| pos)
        .collect();

    let current_pos = match flagged.as_slice() {
        [single] => *single,
        // No usable flags, or contradictory ones: fall back to chain shape.
        _ => terminal_fallback(object_id, records, &index)?,
    };
    let current = records[current_pos].clone();
    let renamings = collect_renamings(object_id, records, &index, &current)?;

    Ok(ResolvedVersion { current, renamings })
}

/// Endpoint of the longest resolvable forward chain. Ties go to the latest
/// end date, then to payload order.
fn terminal_fallback(
    object_id: i64,
    records: &[RegistryNode],
    index: &BTreeMap<i64, usize>,
) -> ComposeResult<usize> {
    let mut best: Option<(usize, usize)> = None;
    for start in 0..records.len() {
        let (endpoint, steps) = walk_forward(object_id, records, index, start)?;
        let replace = match best {
            None => true,
            Some((best_endpoint, best_steps)) => {
                steps > best_steps
                    || (steps == best_steps
                        && records[endpoint].end_date > records[best_endpoint].end_date)
            }
        };
        if replace {
            best = Some((endpoint, steps));
        }
    }
    match best {
        Some((endpoint, _)) => Ok(endpoint),
        None => Err(ComposeError::NoVersionRecord { object_id }),
    }
}

fn walk_forward(
    object_id: i64,
    records: &[RegistryNode],
    index: &BTreeMap<i64, usize>,
    start: usize,
) -> ComposeResult<(usize, usize)> {
    let mut visited: BTreeSet<i64> = BTreeSet::new();
    let mut cursor = start;
    let mut steps = 0usize;
    loop {
        if !visited.insert(records[cursor].version_id) {
            return Err(ComposeError::MalformedPayload(format!(
                "version chain cycle for object {object_id}"
            )));
        }
        match records[cursor].next_id.and_then(|id| index.get(&id)) {
            Some(&next) => {
                cursor = next;
                steps += 1;
            }
            None => return Ok((cursor, steps)),
        }
    }
}

fn collect_renamings(
    object_id: i64,
    records: &[RegistryNode],
    index: &BTreeMap<i64, usize>,
    current: &RegistryNode,
) -> ComposeResult<Vec<String>> {
    let current_name = current.details.display_name();
    let mut renamings: Vec<String> = Vec::new();
    let mut visited: BTreeSet<i64> = BTreeSet::new();
    visited.insert(current.version_id);

    let mut cursor = current.prev_id;
    while let Some(prev_id) = cursor {
        let Some(&pos) = index.get(&prev_id) else {
            break;
        };
        let record = &records[pos];
        if !visited.insert(record.version_id) {
            return Err(ComposeError::MalformedPayload(format!(
                "version chain cycle for object {object_id}"
            )));
        }
        if let (Some(current_name), Some(previous)) =
            (current_name, record.details.display_name())
        {
            if previous != current_name && !renamings.iter().any(|n| n == previous) {
                renamings.push(previous.to_owned());
            }
        }
        cursor = record.prev_id;
    }

    Ok(renamings)
}
