//! Missing polymer linkage detection and gap synthesis.
//!
//! `pdbx_validate_polymer_linkage` records are adopted verbatim when present.
//! Otherwise chain breaks are inferred per consecutive residue pair: an auth
//! sequence jump without an insertion-code run whose chain-break atom pair
//! (protein C to N, nucleic O3' to P) sits further apart than the bond limit.

use super::model::{MissingLinkage, PolymerSegment, UnobservedResidue};
use crate::core::cif::{CifCategory, CifView};
use crate::core::error::CifError;
use nalgebra::Point3;

/// Distance above which two consecutive residues cannot be covalently linked.
pub const POLY_LINKAGE_DIST_LIMIT: f64 = 5.0;

/// Looks up the representative-model position of one atom.
fn atom_position(
    atom_site: &CifCategory,
    rep_model_id: i64,
    rep_alt_id: &str,
    chain_id: &str,
    seq_id: i64,
    atom_id: &str,
) -> Result<Option<Point3<f64>>, CifError> {
    let model = rep_model_id.to_string();
    let seq = seq_id.to_string();
    for row in &atom_site.rows {
        if atom_site
            .get_str(row, "pdbx_PDB_model_num")
            .unwrap_or(model.as_str())
            != model
        {
            continue;
        }
        if let Some(alt) = atom_site.get_str(row, "label_alt_id")
            && alt != rep_alt_id
        {
            continue;
        }
        if atom_site.get_str(row, "auth_asym_id") != Some(chain_id)
            || atom_site.get_str(row, "auth_seq_id") != Some(seq.as_str())
        {
            continue;
        }
        let name = atom_site
            .get_str(row, "auth_atom_id")
            .or_else(|| atom_site.get_str(row, "label_atom_id"));
        if name != Some(atom_id) {
            continue;
        }
        let x = atom_site.get_f64(row, "Cartn_x")?;
        let y = atom_site.get_f64(row, "Cartn_y")?;
        let z = atom_site.get_f64(row, "Cartn_z")?;
        if let (Some(x), Some(y), Some(z)) = (x, y, z) {
            return Ok(Some(Point3::new(x, y, z)));
        }
    }
    Ok(None)
}

fn adopt_validate_records(category: &CifCategory) -> Result<Vec<MissingLinkage>, CifError> {
    let mut linkages = Vec::new();
    for row in &category.rows {
        let chain = match category.get_str(row, "auth_asym_id_1") {
            Some(c) => c.to_string(),
            None => continue,
        };
        let seq_1 = category.get_int(row, "auth_seq_id_1")?;
        let seq_2 = category.get_int(row, "auth_seq_id_2")?;
        if let (Some(seq_1), Some(seq_2)) = (seq_1, seq_2) {
            linkages.push(MissingLinkage {
                auth_chain_id: chain,
                auth_seq_id_1: seq_1,
                auth_seq_id_2: seq_2,
            });
        }
    }
    Ok(linkages)
}

/// The chain-break atom pair for the residue at a segment position.
fn break_atom_pair(comp_id: &str) -> (&'static str, &'static str) {
    let nucleic = matches!(
        comp_id,
        "A" | "C" | "G" | "U" | "I" | "DA" | "DC" | "DG" | "DT" | "DU" | "DI"
    );
    if nucleic { ("O3'", "P") } else { ("C", "N") }
}

/// Detects chain breaks for every polymer segment.
pub fn detect_missing_linkages(
    cif: &dyn CifView,
    segments: &[PolymerSegment],
    rep_model_id: i64,
    rep_alt_id: &str,
) -> Result<Vec<MissingLinkage>, CifError> {
    if let Some(validated) = cif.category("pdbx_validate_polymer_linkage") {
        return adopt_validate_records(validated);
    }
    let Some(atom_site) = cif.category("atom_site") else {
        return Ok(Vec::new());
    };

    let mut linkages = Vec::new();
    for segment in segments {
        for idx in 1..segment.len() {
            let prev_seq = segment.auth_seq_ids[idx - 1];
            let next_seq = segment.auth_seq_ids[idx];
            if next_seq - prev_seq <= 1 {
                continue;
            }
            // An insertion-code run keeps auth numbering sparse on purpose.
            if segment.ins_codes[idx - 1].is_some() || segment.ins_codes[idx].is_some() {
                continue;
            }
            let (tail_atom, head_atom) = break_atom_pair(&segment.comp_ids[idx - 1]);
            let tail = atom_position(
                atom_site,
                rep_model_id,
                rep_alt_id,
                &segment.auth_chain_id,
                prev_seq,
                tail_atom,
            )?;
            let head = atom_position(
                atom_site,
                rep_model_id,
                rep_alt_id,
                &segment.auth_chain_id,
                next_seq,
                head_atom,
            )?;
            let broken = match (tail, head) {
                (Some(tail), Some(head)) => {
                    nalgebra::distance(&tail, &head) > POLY_LINKAGE_DIST_LIMIT
                }
                // No coordinates to prove the bond: treat the jump as a break.
                _ => true,
            };
            if broken {
                linkages.push(MissingLinkage {
                    auth_chain_id: segment.auth_chain_id.clone(),
                    auth_seq_id_1: prev_seq,
                    auth_seq_id_2: next_seq,
                });
            }
        }
    }
    Ok(linkages)
}

/// Inserts dot-comp residues into the gaps so label seq ids stay dense.
/// Returns the synthesized residues for the unobserved index.
pub fn synthesize_gap_residues(
    segments: &mut [PolymerSegment],
    linkages: &[MissingLinkage],
) -> Vec<UnobservedResidue> {
    let mut synthesized = Vec::new();
    for linkage in linkages {
        let Some(segment) = segments
            .iter_mut()
            .find(|s| s.auth_chain_id == linkage.auth_chain_id)
        else {
            continue;
        };
        let Some(insert_at) = segment.position_of_auth_seq(linkage.auth_seq_id_2) else {
            continue;
        };
        let mut offset = 0usize;
        for auth_seq in (linkage.auth_seq_id_1 + 1)..linkage.auth_seq_id_2 {
            if segment.auth_seq_ids.contains(&auth_seq) {
                continue;
            }
            segment.auth_seq_ids.insert(insert_at + offset, auth_seq);
            segment.comp_ids.insert(insert_at + offset, ".".to_string());
            segment
                .auth_comp_ids
                .insert(insert_at + offset, ".".to_string());
            segment.ins_codes.insert(insert_at + offset, None);
            synthesized.push(UnobservedResidue {
                auth_chain_id: segment.auth_chain_id.clone(),
                auth_seq_id: auth_seq,
                comp_id: ".".to_string(),
            });
            offset += 1;
        }
        segment.seq_ids = (1..=segment.auth_seq_ids.len() as i64).collect();
    }
    synthesized
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cif::InMemoryCif;

    fn segment_with_gap() -> PolymerSegment {
        PolymerSegment {
            auth_chain_id: "A".to_string(),
            label_chain_id: "A".to_string(),
            seq_ids: vec![1, 2, 3, 4, 5],
            auth_seq_ids: vec![10, 11, 12, 20, 21],
            comp_ids: ["ALA", "GLY", "SER", "LEU", "LYS"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            auth_comp_ids: ["ALA", "GLY", "SER", "LEU", "LYS"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            ins_codes: vec![None; 5],
            entity_id: Some(1),
        }
    }

    fn atom_site_with_break() -> CifCategory {
        let mut cat = CifCategory::new(
            "atom_site",
            &[
                "auth_asym_id",
                "auth_seq_id",
                "auth_atom_id",
                "Cartn_x",
                "Cartn_y",
                "Cartn_z",
                "pdbx_PDB_model_num",
            ],
        );
        cat.push_row(&["A", "12", "C", "0.0", "0.0", "0.0", "1"]);
        cat.push_row(&["A", "20", "N", "22.0", "0.0", "0.0", "1"]);
        cat
    }

    #[test]
    fn distant_break_atoms_record_a_missing_linkage() {
        let mut cif = InMemoryCif::new();
        cif.insert(atom_site_with_break());
        let segments = vec![segment_with_gap()];
        let linkages = detect_missing_linkages(&cif, &segments, 1, "A").unwrap();
        assert_eq!(
            linkages,
            vec![MissingLinkage {
                auth_chain_id: "A".to_string(),
                auth_seq_id_1: 12,
                auth_seq_id_2: 20,
            }]
        );
    }

    #[test]
    fn close_break_atoms_do_not_break_the_chain() {
        let mut cat = CifCategory::new(
            "atom_site",
            &[
                "auth_asym_id",
                "auth_seq_id",
                "auth_atom_id",
                "Cartn_x",
                "Cartn_y",
                "Cartn_z",
                "pdbx_PDB_model_num",
            ],
        );
        cat.push_row(&["A", "12", "C", "0.0", "0.0", "0.0", "1"]);
        cat.push_row(&["A", "20", "N", "1.3", "0.0", "0.0", "1"]);
        let mut cif = InMemoryCif::new();
        cif.insert(cat);
        let segments = vec![segment_with_gap()];
        let linkages = detect_missing_linkages(&cif, &segments, 1, "A").unwrap();
        assert!(linkages.is_empty());
    }

    #[test]
    fn gap_synthesis_keeps_label_seq_dense() {
        let mut segments = vec![segment_with_gap()];
        let linkages = vec![MissingLinkage {
            auth_chain_id: "A".to_string(),
            auth_seq_id_1: 12,
            auth_seq_id_2: 20,
        }];
        let synthesized = synthesize_gap_residues(&mut segments, &linkages);
        assert_eq!(synthesized.len(), 7);
        let segment = &segments[0];
        assert_eq!(segment.auth_seq_ids.len(), 12);
        assert_eq!(
            segment.seq_ids,
            (1..=12).collect::<Vec<i64>>()
        );
        assert_eq!(segment.comp_ids[3], ".");
        assert!(segment.is_consistent());
    }

    #[test]
    fn validate_category_is_adopted_verbatim() {
        let mut cat = CifCategory::new(
            "pdbx_validate_polymer_linkage",
            &["auth_asym_id_1", "auth_seq_id_1", "auth_asym_id_2", "auth_seq_id_2"],
        );
        cat.push_row(&["A", "12", "A", "20"]);
        let mut cif = InMemoryCif::new();
        cif.insert(cat);
        let linkages = detect_missing_linkages(&cif, &[segment_with_gap()], 1, "A").unwrap();
        assert_eq!(linkages.len(), 1);
        assert_eq!(linkages[0].auth_seq_id_2, 20);
    }
}
