//! Coordinate atom-site indexing.
//!
//! One scan over `atom_site` at the representative model and alt id produces
//! the per-(auth chain, auth seq) atom index the emitter consults when
//! resolving restraint atoms. Distinct comp ids at one position are kept as
//! separate comp groups, marking a split comp id.

use super::model::{CompAtoms, CoordAtomSite};
use crate::core::cif::CifView;
use crate::core::error::CifError;
use std::collections::HashMap;

/// Builds the atom-site index for the representative model/alt.
pub fn build_coord_atom_site(
    cif: &dyn CifView,
    rep_model_id: i64,
    rep_alt_id: &str,
) -> Result<HashMap<(String, i64), CoordAtomSite>, CifError> {
    let mut index: HashMap<(String, i64), CoordAtomSite> = HashMap::new();
    let Some(atom_site) = cif.category("atom_site") else {
        return Ok(index);
    };
    let model = rep_model_id.to_string();

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
        let chain = match atom_site
            .get_str(row, "auth_asym_id")
            .or_else(|| atom_site.get_str(row, "label_asym_id"))
        {
            Some(c) => c.to_string(),
            None => continue,
        };
        let seq = match atom_site.get_int(row, "auth_seq_id")? {
            Some(s) => s,
            None => continue,
        };
        let comp = atom_site
            .get_str(row, "auth_comp_id")
            .or_else(|| atom_site.get_str(row, "label_comp_id"))
            .unwrap_or(".")
            .to_string();
        let atom = match atom_site.get_str(row, "label_atom_id") {
            Some(a) => a.to_string(),
            None => continue,
        };
        let symbol = atom_site
            .get_str(row, "type_symbol")
            .unwrap_or("")
            .to_string();
        let alt_atom = atom_site
            .get_str(row, "pdbx_auth_atom_name")
            .or_else(|| atom_site.get_str(row, "auth_atom_id"))
            .filter(|display| *display != atom)
            .map(|display| display.to_string());

        let site = index.entry((chain, seq)).or_default();
        let group = match site.comp_groups.iter().position(|g| g.comp_id == comp) {
            Some(pos) => &mut site.comp_groups[pos],
            None => {
                site.comp_groups.push(CompAtoms {
                    comp_id: comp,
                    ..CompAtoms::default()
                });
                let last = site.comp_groups.len() - 1;
                &mut site.comp_groups[last]
            }
        };
        if group.atom_ids.iter().any(|a| *a == atom) {
            continue;
        }
        group.atom_ids.push(atom);
        group.type_symbols.push(symbol);
        group.alt_atom_ids.push(alt_atom);
    }
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cif::{CifCategory, InMemoryCif};

    fn atom_site() -> CifCategory {
        let mut cat = CifCategory::new(
            "atom_site",
            &[
                "auth_asym_id",
                "auth_seq_id",
                "auth_comp_id",
                "label_atom_id",
                "type_symbol",
                "pdbx_PDB_model_num",
                "label_alt_id",
            ],
        );
        cat.push_row(&["A", "10", "ALA", "N", "N", "1", "."]);
        cat.push_row(&["A", "10", "ALA", "CA", "C", "1", "."]);
        cat.push_row(&["A", "10", "ALA", "CB", "C", "2", "."]);
        cat.push_row(&["A", "10", "ALA", "CA", "C", "1", "B"]);
        cat
    }

    #[test]
    fn only_representative_model_and_alt_are_indexed() {
        let mut cif = InMemoryCif::new();
        cif.insert(atom_site());
        let index = build_coord_atom_site(&cif, 1, "A").unwrap();
        let site = &index[&("A".to_string(), 10)];
        let group = site.sole_comp_group().unwrap();
        assert_eq!(group.atom_ids, vec!["N", "CA"]);
        assert_eq!(group.type_symbols, vec!["N", "C"]);
    }

    #[test]
    fn two_comp_ids_at_one_position_mark_a_split() {
        let mut cat = CifCategory::new(
            "atom_site",
            &["auth_asym_id", "auth_seq_id", "auth_comp_id", "label_atom_id", "type_symbol"],
        );
        cat.push_row(&["A", "5", "GLY", "CA", "C"]);
        cat.push_row(&["A", "5", "SER", "CA", "C"]);
        let mut cif = InMemoryCif::new();
        cif.insert(cat);
        let index = build_coord_atom_site(&cif, 1, "A").unwrap();
        let site = &index[&("A".to_string(), 5)];
        assert!(site.is_split());
        assert!(site.has_atom("GLY", "CA"));
        assert!(site.has_atom("SER", "CA"));
    }
}
