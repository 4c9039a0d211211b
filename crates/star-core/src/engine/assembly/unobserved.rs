//! Unobserved residue and atom indexing.

use super::model::{NmrExtResidue, UnobservedAtom, UnobservedResidue};
use crate::core::cif::CifView;
use crate::core::error::CifError;

/// Reads `pdbx_unobs_or_zero_occ_residues` at the representative model.
pub fn collect_unobserved_residues(
    cif: &dyn CifView,
    rep_model_id: i64,
) -> Result<Vec<UnobservedResidue>, CifError> {
    let mut residues = Vec::new();
    let Some(category) = cif.category("pdbx_unobs_or_zero_occ_residues") else {
        return Ok(residues);
    };
    let model = rep_model_id.to_string();
    for row in &category.rows {
        if category
            .get_str(row, "PDB_model_num")
            .unwrap_or(model.as_str())
            != model
        {
            continue;
        }
        let chain = match category.get_str(row, "auth_asym_id") {
            Some(c) => c.to_string(),
            None => continue,
        };
        let Some(seq) = category.get_int(row, "auth_seq_id")? else {
            continue;
        };
        let comp = category.get_str(row, "auth_comp_id").unwrap_or(".").to_string();
        residues.push(UnobservedResidue {
            auth_chain_id: chain,
            auth_seq_id: seq,
            comp_id: comp,
        });
    }
    Ok(residues)
}

/// Reads `pdbx_unobs_or_zero_occ_atoms` at the representative model.
pub fn collect_unobserved_atoms(
    cif: &dyn CifView,
    rep_model_id: i64,
) -> Result<Vec<UnobservedAtom>, CifError> {
    let mut atoms = Vec::new();
    let Some(category) = cif.category("pdbx_unobs_or_zero_occ_atoms") else {
        return Ok(atoms);
    };
    let model = rep_model_id.to_string();
    for row in &category.rows {
        if category
            .get_str(row, "PDB_model_num")
            .unwrap_or(model.as_str())
            != model
        {
            continue;
        }
        let chain = match category.get_str(row, "auth_asym_id") {
            Some(c) => c.to_string(),
            None => continue,
        };
        let Some(seq) = category.get_int(row, "auth_seq_id")? else {
            continue;
        };
        let comp = category.get_str(row, "auth_comp_id").unwrap_or(".").to_string();
        let atom = match category.get_str(row, "auth_atom_id") {
            Some(a) => a.to_string(),
            None => continue,
        };
        atoms.push(UnobservedAtom {
            auth_chain_id: chain,
            auth_seq_id: seq,
            comp_id: comp,
            atom_id: atom,
        });
    }
    Ok(atoms)
}

/// Merges declared, synthesized, and NMR-extension residues, deduplicated by
/// (chain, seq).
pub fn merge_unobserved_residues(
    declared: Vec<UnobservedResidue>,
    synthesized: Vec<UnobservedResidue>,
    extensions: &[NmrExtResidue],
) -> Vec<UnobservedResidue> {
    let mut merged = declared;
    for residue in synthesized {
        if !merged
            .iter()
            .any(|r| r.auth_chain_id == residue.auth_chain_id && r.auth_seq_id == residue.auth_seq_id)
        {
            merged.push(residue);
        }
    }
    for ext in extensions {
        if !merged
            .iter()
            .any(|r| r.auth_chain_id == ext.auth_chain_id && r.auth_seq_id == ext.auth_seq_id)
        {
            merged.push(UnobservedResidue {
                auth_chain_id: ext.auth_chain_id.clone(),
                auth_seq_id: ext.auth_seq_id,
                comp_id: ext.comp_id.clone(),
            });
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cif::{CifCategory, InMemoryCif};

    #[test]
    fn unobserved_residues_filter_by_model() {
        let mut cat = CifCategory::new(
            "pdbx_unobs_or_zero_occ_residues",
            &["PDB_model_num", "auth_asym_id", "auth_seq_id", "auth_comp_id"],
        );
        cat.push_row(&["1", "A", "1", "MET"]);
        cat.push_row(&["2", "A", "2", "GLY"]);
        let mut cif = InMemoryCif::new();
        cif.insert(cat);
        let residues = collect_unobserved_residues(&cif, 1).unwrap();
        assert_eq!(residues.len(), 1);
        assert_eq!(residues[0].comp_id, "MET");
    }

    #[test]
    fn merge_deduplicates_by_chain_and_seq() {
        let declared = vec![UnobservedResidue {
            auth_chain_id: "A".to_string(),
            auth_seq_id: 13,
            comp_id: "GLY".to_string(),
        }];
        let synthesized = vec![
            UnobservedResidue {
                auth_chain_id: "A".to_string(),
                auth_seq_id: 13,
                comp_id: ".".to_string(),
            },
            UnobservedResidue {
                auth_chain_id: "A".to_string(),
                auth_seq_id: 14,
                comp_id: ".".to_string(),
            },
        ];
        let ext = vec![NmrExtResidue {
            auth_chain_id: "A".to_string(),
            auth_seq_id: 9,
            comp_id: "SER".to_string(),
        }];
        let merged = merge_unobserved_residues(declared, synthesized, &ext);
        assert_eq!(merged.len(), 3);
        // The declared comp id wins over the synthesized dot.
        assert_eq!(merged[0].comp_id, "GLY");
    }
}
