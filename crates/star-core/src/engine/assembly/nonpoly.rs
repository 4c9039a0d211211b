//! Non-polymer and branched sequence reconstruction.
//!
//! Both share the polymer segment shape plus an alternate auth seq list that
//! resolves collisions where several distinct ligands, or a ligand and a
//! polymer residue, share one author number. After conflict resolution the
//! author-facing id is always the one consistent with the polymer segments.

use super::model::{
    CoordAtomSite, NonPolymerSegment, PolymerSegment, SplitLigandKey, SplitLigandPart,
};
use crate::core::cif::{CifCategory, CifView};
use crate::core::error::CifError;
use std::collections::HashMap;

fn parse_ins_code(value: Option<&str>) -> Option<char> {
    value.and_then(|v| v.chars().next())
}

fn from_scheme(
    scheme: &CifCategory,
    auth_seq_tag: &str,
    label_seq_tag: &str,
) -> Result<Vec<NonPolymerSegment>, CifError> {
    let mut segments: Vec<NonPolymerSegment> = Vec::new();
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
            .or_else(|| scheme.get_str(row, "auth_asym_id"))
            .unwrap_or(&label_chain)
            .to_string();
        let label_seq = scheme.get_int(row, label_seq_tag)?;
        let auth_seq = match scheme.get_int(row, auth_seq_tag)?.or(label_seq) {
            Some(seq) => seq,
            None => continue,
        };
        let comp_id = scheme.get_str(row, "mon_id").unwrap_or(".").to_string();
        let auth_comp_id = scheme
            .get_str(row, "auth_mon_id")
            .unwrap_or(&comp_id)
            .to_string();
        let ins_code = parse_ins_code(scheme.get_str(row, "pdb_ins_code"));
        let entity_id = scheme.get_int(row, "entity_id")?;

        let pos = segments
            .iter()
            .position(|s| s.auth_chain_id == auth_chain && s.label_chain_id == label_chain)
            .unwrap_or_else(|| {
                segments.push(NonPolymerSegment {
                    auth_chain_id: auth_chain,
                    label_chain_id: label_chain,
                    entity_id,
                    ..NonPolymerSegment::default()
                });
                segments.len() - 1
            });
        let segment = &mut segments[pos];
        let next_seq = label_seq.unwrap_or(segment.seq_ids.len() as i64 + 1);
        segment.seq_ids.push(next_seq);
        segment.auth_seq_ids.push(auth_seq);
        segment.comp_ids.push(comp_id);
        segment.auth_comp_ids.push(auth_comp_id);
        segment.ins_codes.push(ins_code);
        segment.alt_auth_seq_ids.push(None);
    }
    Ok(segments)
}

/// Rebuilds non-polymer segments from `pdbx_nonpoly_scheme`.
pub fn build_nonpolymer_sequence(cif: &dyn CifView) -> Result<Vec<NonPolymerSegment>, CifError> {
    match cif.category("pdbx_nonpoly_scheme") {
        Some(scheme) => from_scheme(scheme, "auth_seq_num", "ndb_seq_num"),
        None => Ok(Vec::new()),
    }
}

/// Rebuilds branched (oligosaccharide) segments from `pdbx_branch_scheme`.
pub fn build_branched_sequence(cif: &dyn CifView) -> Result<Vec<NonPolymerSegment>, CifError> {
    match cif.category("pdbx_branch_scheme") {
        Some(scheme) => from_scheme(scheme, "auth_seq_num", "num"),
        None => Ok(Vec::new()),
    }
}

/// Resolves author-number collisions between non-polymer entries and between
/// a non-polymer entry and a polymer residue.
///
/// Colliding entries get their label-scheme id promoted to the author-facing
/// id, with the original author number kept as the alternate, so that lookups
/// through the polymer map stay unambiguous.
pub fn resolve_auth_seq_conflicts(
    segments: &mut [NonPolymerSegment],
    polymers: &[PolymerSegment],
) {
    // Count author keys across all non-polymer entries first.
    let mut seen: HashMap<(String, i64), usize> = HashMap::new();
    for segment in segments.iter() {
        for auth_seq in &segment.auth_seq_ids {
            *seen
                .entry((segment.auth_chain_id.clone(), *auth_seq))
                .or_insert(0) += 1;
        }
    }

    for segment in segments.iter_mut() {
        for idx in 0..segment.auth_seq_ids.len() {
            let auth_seq = segment.auth_seq_ids[idx];
            let key = (segment.auth_chain_id.clone(), auth_seq);
            let internal_conflict = seen.get(&key).copied().unwrap_or(0) > 1;
            let cross_conflict = polymers.iter().any(|p| {
                p.auth_chain_id == segment.auth_chain_id
                    && p.position_of_auth_seq(auth_seq)
                        .is_some_and(|i| p.comp_ids[i] != segment.comp_ids[idx])
            });
            if internal_conflict || cross_conflict {
                let label_seq = segment.seq_ids[idx];
                segment.alt_auth_seq_ids[idx] = Some(auth_seq);
                segment.auth_seq_ids[idx] = label_seq;
            }
        }
    }
}

/// Finds ligands modeled as two separate non-polymer chains.
///
/// Parts that share an (auth chain, alternate auth seq, comp) key across at
/// least two entries form one chemically distinct residue; the map carries
/// each part's own author number and observed atoms.
pub fn detect_split_ligands(
    segments: &[NonPolymerSegment],
    coord_atom_site: &HashMap<(String, i64), CoordAtomSite>,
) -> HashMap<SplitLigandKey, Vec<SplitLigandPart>> {
    let mut map: HashMap<SplitLigandKey, Vec<SplitLigandPart>> = HashMap::new();
    for segment in segments {
        for idx in 0..segment.auth_seq_ids.len() {
            let Some(alt_seq) = segment.alt_auth_seq_ids[idx] else {
                continue;
            };
            let comp_id = segment.comp_ids[idx].clone();
            let auth_seq = segment.auth_seq_ids[idx];
            let atom_ids = coord_atom_site
                .get(&(segment.auth_chain_id.clone(), auth_seq))
                .and_then(|site| site.comp_group(&comp_id))
                .map(|group| group.atom_ids.clone())
                .unwrap_or_default();
            map.entry((segment.auth_chain_id.clone(), alt_seq, comp_id.clone()))
                .or_default()
                .push(SplitLigandPart {
                    auth_seq_id: auth_seq,
                    comp_id,
                    atom_ids,
                });
        }
    }
    map.retain(|_, parts| parts.len() >= 2);
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nonpoly_scheme() -> CifCategory {
        let mut cat = CifCategory::new(
            "pdbx_nonpoly_scheme",
            &[
                "asym_id",
                "entity_id",
                "mon_id",
                "ndb_seq_num",
                "auth_seq_num",
                "auth_mon_id",
                "pdb_strand_id",
                "pdb_ins_code",
            ],
        );
        cat.push_row(&["B", "2", "HEM", "101", "200", "HEM", "A", "."]);
        cat.push_row(&["C", "3", "HOH", "102", "301", "HOH", "A", "."]);
        cat
    }

    #[test]
    fn scheme_rows_become_segments() {
        let mut cif = crate::core::cif::InMemoryCif::new();
        cif.insert(nonpoly_scheme());
        let segments = build_nonpolymer_sequence(&cif).unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].comp_ids, vec!["HEM"]);
        assert_eq!(segments[0].auth_seq_ids, vec![200]);
        assert_eq!(segments[0].seq_ids, vec![101]);
    }

    #[test]
    fn polymer_collision_promotes_label_id() {
        let mut cif = crate::core::cif::InMemoryCif::new();
        cif.insert(nonpoly_scheme());
        let mut segments = build_nonpolymer_sequence(&cif).unwrap();
        let polymer = PolymerSegment {
            auth_chain_id: "A".to_string(),
            label_chain_id: "A".to_string(),
            seq_ids: vec![1],
            auth_seq_ids: vec![200],
            comp_ids: vec!["ALA".to_string()],
            auth_comp_ids: vec!["ALA".to_string()],
            ins_codes: vec![None],
            entity_id: Some(1),
        };
        resolve_auth_seq_conflicts(&mut segments, &[polymer]);
        assert_eq!(segments[0].auth_seq_ids, vec![101]);
        assert_eq!(segments[0].alt_auth_seq_ids, vec![Some(200)]);
        // The water at 301 had no conflict.
        assert_eq!(segments[1].auth_seq_ids, vec![301]);
        assert_eq!(segments[1].alt_auth_seq_ids, vec![None]);
    }

    #[test]
    fn split_ligand_needs_at_least_two_parts() {
        let mut a = NonPolymerSegment {
            auth_chain_id: "A".to_string(),
            label_chain_id: "B".to_string(),
            ..NonPolymerSegment::default()
        };
        a.seq_ids.push(101);
        a.auth_seq_ids.push(101);
        a.comp_ids.push("NAG".to_string());
        a.auth_comp_ids.push("NAG".to_string());
        a.ins_codes.push(None);
        a.alt_auth_seq_ids.push(Some(500));
        let mut b = a.clone();
        b.label_chain_id = "C".to_string();
        b.seq_ids[0] = 102;
        b.auth_seq_ids[0] = 102;

        let coord = HashMap::new();
        let split = detect_split_ligands(&[a.clone()], &coord);
        assert!(split.is_empty());
        let split = detect_split_ligands(&[a, b], &coord);
        assert_eq!(split.len(), 1);
        let parts = &split[&("A".to_string(), 500, "NAG".to_string())];
        assert_eq!(parts.len(), 2);
    }
}
