//! Author-scheme to STAR-scheme atom resolution.
//!
//! Restraint files routinely number their residues in a scheme the deposited
//! coordinates do not use. `star_atom` resolves one atom against the assembly
//! model, discovering and persisting a per-chain sequence offset so that an
//! entire file maps consistently once the first residue has been located.

use std::collections::HashMap;

use tracing::debug;

use crate::core::models::RestraintAtom;
use crate::engine::assembly::{AssemblyResult, SeqKey, StarSeq};

/// Sequence-extension tolerance for atoms flagged `asis`.
pub const MAX_ALLOWED_EXT_SEQ: i64 = 10;

/// Half-width of the offset discovery scan.
pub const MAX_OFFSET_ATTEMPT: i64 = 100;

/// Per-chain sequence offsets discovered while resolving a restraint file.
///
/// Once an offset has been accepted for a chain, every later lookup on that
/// chain applies it unconditionally; a second, parallel map tracks
/// monomer-to-monomer offsets for branched carbohydrate chains.
#[derive(Debug, Clone, Default)]
pub struct OffsetHolder {
    chain_offsets: HashMap<String, i64>,
    monomer_offsets: HashMap<String, i64>,
}

impl OffsetHolder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(&self, chain_id: &str) -> Option<i64> {
        self.chain_offsets.get(chain_id).copied()
    }

    pub fn set_offset(&mut self, chain_id: &str, offset: i64) {
        debug!(chain_id, offset, "adopting sequence offset for chain");
        self.chain_offsets.insert(chain_id.to_string(), offset);
    }

    pub fn monomer_offset(&self, chain_id: &str) -> Option<i64> {
        self.monomer_offsets.get(chain_id).copied()
    }

    pub fn set_monomer_offset(&mut self, chain_id: &str, offset: i64) {
        self.monomer_offsets.insert(chain_id.to_string(), offset);
    }
}

/// One atom fully resolved to the STAR scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StarAtom {
    pub entity_assembly_id: i64,
    pub entity_id: i64,
    /// Entity-local, dense 1-based sequence index.
    pub seq_id: i64,
    /// The comp id the coordinates observe at the resolved position.
    pub comp_id: String,
    pub atom_id: String,
}

fn resolved(seq: StarSeq, comp_id: &str, atom_id: &str) -> StarAtom {
    StarAtom {
        entity_assembly_id: seq.entity_assembly_id,
        entity_id: seq.entity_id,
        seq_id: seq.seq_id,
        comp_id: comp_id.to_string(),
        atom_id: atom_id.to_string(),
    }
}

/// Any mapping at (chain, seq), preferring representative entries.
fn find_at<'a>(
    map: &'a HashMap<SeqKey, StarSeq>,
    chain_id: &str,
    seq_id: i64,
) -> Option<(&'a SeqKey, StarSeq)> {
    let mut fallback = None;
    for (key, seq) in map {
        if key.chain_id != chain_id || key.seq_id != seq_id {
            continue;
        }
        if seq.representative {
            return Some((key, *seq));
        }
        fallback = Some((key, *seq));
    }
    fallback
}

/// True when the comp id occurs anywhere on the chain, i.e. it is one the
/// coordinates actually observe.
fn comp_known_on_chain(map: &HashMap<SeqKey, StarSeq>, chain_id: &str, comp_id: &str) -> bool {
    map.keys()
        .any(|key| key.chain_id == chain_id && key.comp_id == comp_id)
}

/// Offsets in closest-first order: 0, +1, -1, +2, -2, ...
fn fanout(limit: i64) -> impl Iterator<Item = i64> {
    (0..=limit).flat_map(|delta| {
        if delta == 0 {
            vec![0]
        } else {
            vec![delta, -delta]
        }
    })
}

/// Resolves one author-scheme atom to the STAR scheme.
///
/// The auxiliary atom, when given, is the restraint's partner on the same
/// chain: a discovered offset is accepted only if it maps the partner too, so
/// a two-atom restraint never splits its chain offset. Returns `None` when no
/// mapping exists; the caller decides whether to warn or emit a placeholder.
pub fn star_atom(
    result: &AssemblyResult,
    holder: &mut OffsetHolder,
    atom: &RestraintAtom,
    aux_atom: Option<&RestraintAtom>,
    asis: bool,
) -> Option<StarAtom> {
    let map = result.auth_to_star_seq.as_ref()?;

    let mut key = SeqKey::new(&atom.chain_id, atom.seq_id, &atom.comp_id);
    if let Some(orig) = result.auth_to_orig_seq.as_ref()
        && let Some((_, orig_comp)) = orig.get(&key)
        && orig_comp != &atom.comp_id
    {
        key = key.with_comp(orig_comp);
    }

    // An accepted chain offset applies unconditionally.
    if let Some(offset) = holder.offset(&atom.chain_id) {
        let shifted = SeqKey::new(&atom.chain_id, atom.seq_id + offset, &key.comp_id);
        if let Some(seq) = map.get(&shifted) {
            return Some(resolved(*seq, &shifted.comp_id, &atom.atom_id));
        }
    } else if let Some(seq) = map.get(&key) {
        return Some(resolved(*seq, &key.comp_id, &atom.atom_id));
    }

    if asis {
        for delta in fanout(MAX_ALLOWED_EXT_SEQ) {
            if let Some((found, seq)) = find_at(map, &atom.chain_id, atom.seq_id + delta) {
                if delta != 0 {
                    holder.set_offset(&atom.chain_id, delta);
                }
                return Some(resolved(seq, &found.comp_id, &atom.atom_id));
            }
        }
    }

    // Offset discovery: the comp id must match, and the partner atom must
    // land on a mapped residue under the same shift.
    for delta in fanout(MAX_OFFSET_ATTEMPT) {
        let candidate = SeqKey::new(&atom.chain_id, atom.seq_id + delta, &key.comp_id);
        let Some(seq) = map.get(&candidate) else {
            continue;
        };
        let aux_consistent = aux_atom
            .filter(|aux| aux.chain_id == atom.chain_id)
            .is_none_or(|aux| find_at(map, &aux.chain_id, aux.seq_id + delta).is_some());
        if !aux_consistent {
            continue;
        }
        holder.set_offset(&atom.chain_id, delta);
        return Some(resolved(*seq, &candidate.comp_id, &atom.atom_id));
    }

    // Unknown or empty comp ids accept whatever the coordinates observe.
    if key.comp_id.is_empty() || !comp_known_on_chain(map, &atom.chain_id, &key.comp_id) {
        let offset = holder.offset(&atom.chain_id).unwrap_or(0);
        if let Some((found, seq)) = find_at(map, &atom.chain_id, atom.seq_id + offset) {
            return Some(resolved(seq, &found.comp_id, &atom.atom_id));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn seq(assembly_id: i64, seq_id: i64, entity_id: i64) -> StarSeq {
        StarSeq {
            entity_assembly_id: assembly_id,
            seq_id,
            entity_id,
            representative: true,
        }
    }

    fn result_with(entries: &[(&str, i64, &str, i64)]) -> AssemblyResult {
        let mut map = HashMap::new();
        for (chain, auth_seq, comp, star_seq) in entries {
            map.insert(SeqKey::new(chain, *auth_seq, comp), seq(1, *star_seq, 1));
        }
        AssemblyResult {
            auth_to_star_seq: Some(map),
            ..AssemblyResult::default()
        }
    }

    #[test]
    fn direct_hit_maps_without_an_offset() {
        let result = result_with(&[("A", 10, "MET", 1), ("A", 11, "ALA", 2)]);
        let mut holder = OffsetHolder::new();
        let atom = RestraintAtom::new("A", 11, "ALA", "CA");
        let star = star_atom(&result, &mut holder, &atom, None, false).unwrap();
        assert_eq!(star.seq_id, 2);
        assert_eq!(star.comp_id, "ALA");
        assert!(holder.offset("A").is_none());
    }

    #[test]
    fn offset_is_discovered_once_and_then_reused() {
        let result = result_with(&[
            ("A", 101, "MET", 1),
            ("A", 102, "ALA", 2),
            ("A", 103, "GLY", 3),
        ]);
        let mut holder = OffsetHolder::new();

        let atom = RestraintAtom::new("A", 2, "ALA", "CA");
        let star = star_atom(&result, &mut holder, &atom, None, false).unwrap();
        assert_eq!(star.seq_id, 2);
        assert_eq!(holder.offset("A"), Some(100));

        // The stored offset now applies without rescanning.
        let next = RestraintAtom::new("A", 3, "GLY", "CA");
        let star = star_atom(&result, &mut holder, &next, None, false).unwrap();
        assert_eq!(star.seq_id, 3);
    }

    #[test]
    fn partner_atom_vetoes_an_inconsistent_offset() {
        // ALA appears twice; only the second copy leaves the partner mapped.
        let result = result_with(&[
            ("A", 51, "ALA", 1),
            ("A", 61, "ALA", 11),
            ("A", 62, "LEU", 12),
        ]);
        let mut holder = OffsetHolder::new();
        let atom = RestraintAtom::new("A", 1, "ALA", "HA");
        let aux = RestraintAtom::new("A", 2, "LEU", "H");
        let star = star_atom(&result, &mut holder, &atom, Some(&aux), false).unwrap();
        assert_eq!(star.seq_id, 11);
        assert_eq!(holder.offset("A"), Some(60));
    }

    #[test]
    fn asis_accepts_a_nearby_residue_of_any_comp() {
        let result = result_with(&[("A", 13, "SER", 4)]);
        let mut holder = OffsetHolder::new();
        let atom = RestraintAtom::new("A", 12, "XYZ", "CA");
        let star = star_atom(&result, &mut holder, &atom, None, true).unwrap();
        assert_eq!(star.comp_id, "SER");
        assert_eq!(holder.offset("A"), Some(1));
    }

    #[test]
    fn unknown_comp_adopts_the_observed_comp_at_the_position() {
        let result = result_with(&[("A", 10, "MET", 1)]);
        let mut holder = OffsetHolder::new();
        let atom = RestraintAtom::new("A", 10, "MSE", "CA");
        let star = star_atom(&result, &mut holder, &atom, None, false).unwrap();
        assert_eq!(star.comp_id, "MET");
        assert_eq!(star.seq_id, 1);
    }

    #[test]
    fn unmappable_atom_returns_none() {
        let result = result_with(&[("A", 10, "MET", 1)]);
        let mut holder = OffsetHolder::new();
        let atom = RestraintAtom::new("B", 500, "MET", "CA");
        assert!(star_atom(&result, &mut holder, &atom, None, false).is_none());
    }
}
