//! Polymer sequence reconstruction.
//!
//! Primary source is `pdbx_poly_seq_scheme`; when that category is absent the
//! sequence is rebuilt from `atom_site` author-scheme columns. A companion
//! NMR polymer sequence, when supplied, extends each compatible chain with
//! the residues the coordinates never observed.

use super::model::{NmrExtResidue, PolymerSegment};
use crate::core::align;
use crate::core::cif::CifView;
use crate::core::error::CifError;

/// A companion polymer sequence from the NMR data, one per chain.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NmrPolymerSequence {
    pub chain_id: String,
    pub seq_ids: Vec<i64>,
    pub comp_ids: Vec<String>,
}

fn parse_ins_code(value: Option<&str>) -> Option<char> {
    value.and_then(|v| v.chars().next())
}

/// Rebuilds the per-chain polymer segments from the dictionary view.
pub fn build_polymer_sequence(cif: &dyn CifView) -> Result<Vec<PolymerSegment>, CifError> {
    if let Some(scheme) = cif.category("pdbx_poly_seq_scheme") {
        return from_poly_seq_scheme(scheme);
    }
    let atom_site = cif
        .category("atom_site")
        .ok_or_else(|| CifError::MissingCategory("atom_site".to_string()))?;
    from_atom_site(atom_site)
}

fn from_poly_seq_scheme(
    scheme: &crate::core::cif::CifCategory,
) -> Result<Vec<PolymerSegment>, CifError> {
    let mut segments: Vec<PolymerSegment> = Vec::new();
    for row in &scheme.rows {
        let label_chain = scheme
            .get_str(row, "asym_id")
            .ok_or_else(|| CifError::MissingItem {
                category: scheme.name.clone(),
                item: "asym_id".to_string(),
            })?
            .to_string();
        let auth_chain = scheme
            .get_str(row, "pdb_strand_id")
            .unwrap_or(&label_chain)
            .to_string();
        let seq_id = scheme
            .get_int(row, "seq_id")?
            .ok_or_else(|| CifError::MissingItem {
                category: scheme.name.clone(),
                item: "seq_id".to_string(),
            })?;
        let auth_seq_id = scheme.get_int(row, "auth_seq_num")?.unwrap_or(seq_id);
        let comp_id = scheme.get_str(row, "mon_id").unwrap_or(".").to_string();
        let auth_comp_id = scheme
            .get_str(row, "auth_mon_id")
            .or_else(|| scheme.get_str(row, "pdb_mon_id"))
            .unwrap_or(&comp_id)
            .to_string();
        let ins_code = parse_ins_code(scheme.get_str(row, "pdb_ins_code"));
        let entity_id = scheme.get_int(row, "entity_id")?;

        let pos = segments
            .iter()
            .position(|s| s.auth_chain_id == auth_chain && s.label_chain_id == label_chain)
            .unwrap_or_else(|| {
                segments.push(PolymerSegment {
                    auth_chain_id: auth_chain,
                    label_chain_id: label_chain,
                    entity_id,
                    ..PolymerSegment::default()
                });
                segments.len() - 1
            });
        let segment = &mut segments[pos];
        segment.seq_ids.push(seq_id);
        segment.auth_seq_ids.push(auth_seq_id);
        segment.comp_ids.push(comp_id);
        segment.auth_comp_ids.push(auth_comp_id);
        segment.ins_codes.push(ins_code);
    }
    Ok(segments)
}

fn from_atom_site(
    atom_site: &crate::core::cif::CifCategory,
) -> Result<Vec<PolymerSegment>, CifError> {
    let mut segments: Vec<PolymerSegment> = Vec::new();
    for row in &atom_site.rows {
        let auth_chain = atom_site
            .get_str(row, "auth_asym_id")
            .or_else(|| atom_site.get_str(row, "label_asym_id"))
            .ok_or_else(|| CifError::MissingItem {
                category: atom_site.name.clone(),
                item: "auth_asym_id".to_string(),
            })?
            .to_string();
        let label_chain = atom_site
            .get_str(row, "label_asym_id")
            .unwrap_or(&auth_chain)
            .to_string();
        let auth_seq_id = match atom_site.get_int(row, "auth_seq_id")? {
            Some(seq) => seq,
            None => continue,
        };
        let comp_id = atom_site
            .get_str(row, "auth_comp_id")
            .or_else(|| atom_site.get_str(row, "label_comp_id"))
            .unwrap_or(".")
            .to_string();
        let ins_code = parse_ins_code(atom_site.get_str(row, "pdbx_PDB_ins_code"));

        let pos = segments
            .iter()
            .position(|s| s.auth_chain_id == auth_chain)
            .unwrap_or_else(|| {
                segments.push(PolymerSegment {
                    auth_chain_id: auth_chain,
                    label_chain_id: label_chain,
                    ..PolymerSegment::default()
                });
                segments.len() - 1
            });
        let segment = &mut segments[pos];
        let already = segment
            .auth_seq_ids
            .last()
            .is_some_and(|last| *last == auth_seq_id)
            && segment.ins_codes.last().copied().flatten() == ins_code;
        if already {
            continue;
        }
        let next_seq = segment.seq_ids.len() as i64 + 1;
        segment.seq_ids.push(next_seq);
        segment.auth_seq_ids.push(auth_seq_id);
        segment.comp_ids.push(comp_id.clone());
        segment.auth_comp_ids.push(comp_id);
        segment.ins_codes.push(ins_code);
    }
    Ok(segments)
}

/// Extends chains with residues present only in the companion NMR sequence.
///
/// A chain is extended only when its alignment against the NMR sequence has
/// no conflicts and at least one NMR-only residue. Inserted residues are
/// recorded so the emitter can synthesize unobserved-residue rows for them.
pub fn extend_with_nmr_sequence(
    segments: &mut [PolymerSegment],
    nmr_sequences: &[NmrPolymerSequence],
) -> Vec<NmrExtResidue> {
    let mut extensions = Vec::new();
    for nmr in nmr_sequences {
        let Some(segment) = segments
            .iter_mut()
            .find(|s| s.auth_chain_id == nmr.chain_id)
        else {
            continue;
        };
        let alignment = align::align(&nmr.comp_ids, &segment.comp_ids);
        if alignment.conflict != 0 || alignment.unmapped == 0 {
            continue;
        }

        // Rebuild the segment in aligned order, inserting the NMR-only
        // residues at their aligned positions.
        let mut rebuilt = PolymerSegment {
            auth_chain_id: segment.auth_chain_id.clone(),
            label_chain_id: segment.label_chain_id.clone(),
            entity_id: segment.entity_id,
            ..PolymerSegment::default()
        };
        for pair in &alignment.pairs {
            match (pair.a, pair.b) {
                (_, Some(coord_idx)) => {
                    rebuilt.auth_seq_ids.push(segment.auth_seq_ids[coord_idx]);
                    rebuilt.comp_ids.push(segment.comp_ids[coord_idx].clone());
                    rebuilt
                        .auth_comp_ids
                        .push(segment.auth_comp_ids[coord_idx].clone());
                    rebuilt.ins_codes.push(segment.ins_codes[coord_idx]);
                }
                (Some(nmr_idx), None) => {
                    let auth_seq = nmr.seq_ids.get(nmr_idx).copied().unwrap_or_default();
                    let comp = nmr
                        .comp_ids
                        .get(nmr_idx)
                        .cloned()
                        .unwrap_or_else(|| ".".to_string());
                    rebuilt.auth_seq_ids.push(auth_seq);
                    rebuilt.comp_ids.push(comp.clone());
                    rebuilt.auth_comp_ids.push(comp.clone());
                    rebuilt.ins_codes.push(None);
                    extensions.push(NmrExtResidue {
                        auth_chain_id: rebuilt.auth_chain_id.clone(),
                        auth_seq_id: auth_seq,
                        comp_id: comp,
                    });
                }
                (None, None) => {}
            }
        }
        rebuilt.seq_ids = (1..=rebuilt.auth_seq_ids.len() as i64).collect();
        *segment = rebuilt;
    }
    extensions
}
