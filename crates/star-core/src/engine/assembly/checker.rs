//! The incremental assembly checker.

use super::atom_site::build_coord_atom_site;
use super::linkage::{detect_missing_linkages, synthesize_gap_residues};
use super::mapping::{build_entity_mapping, read_mod_residues, read_struct_conn};
use super::model::AssemblyResult;
use super::nonpoly::{
    build_branched_sequence, build_nonpolymer_sequence, detect_split_ligands,
    resolve_auth_seq_conflicts,
};
use super::polymer::{NmrPolymerSequence, build_polymer_sequence, extend_with_nmr_sequence};
use super::topology::{TopologyConfig, infer_component_topology};
use super::unobserved::{
    collect_unobserved_atoms, collect_unobserved_residues, merge_unobserved_residues,
};
use crate::core::ccd::ComponentDictionary;
use crate::core::cif::CifView;
use crate::core::error::CifError;
use tracing::warn;

/// Conventional representative model id.
pub const DEFAULT_REP_MODEL_ID: i64 = 1;
/// Conventional representative alternate-location id.
pub const DEFAULT_REP_ALT_ID: &str = "A";

/// Builds and incrementally re-evaluates the coordinate assembly model.
///
/// The checker never fails: dictionary errors are logged and the previous
/// result (or an empty one) is returned unchanged.
#[derive(Debug, Clone)]
pub struct AssemblyChecker {
    pub rep_model_id: i64,
    pub rep_alt_id: String,
    pub topology: TopologyConfig,
}

impl Default for AssemblyChecker {
    fn default() -> Self {
        Self {
            rep_model_id: DEFAULT_REP_MODEL_ID,
            rep_alt_id: DEFAULT_REP_ALT_ID.to_string(),
            topology: TopologyConfig::default(),
        }
    }
}

impl AssemblyChecker {
    pub fn new(rep_model_id: i64, rep_alt_id: &str) -> Self {
        Self {
            rep_model_id,
            rep_alt_id: rep_alt_id.to_string(),
            topology: TopologyConfig::default(),
        }
    }

    pub fn with_topology(mut self, topology: TopologyConfig) -> Self {
        self.topology = topology;
        self
    }

    /// Runs the full check, reusing whatever the previous result already has.
    pub fn check<D: ComponentDictionary>(
        &self,
        cif: &dyn CifView,
        ccd: &D,
        previous: Option<AssemblyResult>,
        nmr_sequences: &[NmrPolymerSequence],
    ) -> AssemblyResult {
        let previous = previous.unwrap_or_default();
        match self.try_check(cif, ccd, previous.clone(), nmr_sequences) {
            Ok(result) => result,
            Err(err) => {
                warn!(error = %err, "assembly check failed; returning previous result");
                previous
            }
        }
    }

    fn try_check<D: ComponentDictionary>(
        &self,
        cif: &dyn CifView,
        ccd: &D,
        mut result: AssemblyResult,
        nmr_sequences: &[NmrPolymerSequence],
    ) -> Result<AssemblyResult, CifError> {
        if !result.has_coarse_keys() {
            let mut polymers = build_polymer_sequence(cif)?;
            let extensions = extend_with_nmr_sequence(&mut polymers, nmr_sequences);
            let linkages =
                detect_missing_linkages(cif, &polymers, self.rep_model_id, &self.rep_alt_id)?;
            let synthesized = synthesize_gap_residues(&mut polymers, &linkages);

            let mut nonpoly = build_nonpolymer_sequence(cif)?;
            let mut branched = build_branched_sequence(cif)?;
            resolve_auth_seq_conflicts(&mut nonpoly, &polymers);
            resolve_auth_seq_conflicts(&mut branched, &polymers);

            let coord =
                build_coord_atom_site(cif, self.rep_model_id, &self.rep_alt_id)?;
            let split = detect_split_ligands(&nonpoly, &coord);

            let declared = collect_unobserved_residues(cif, self.rep_model_id)?;
            result.unobserved_residues =
                Some(merge_unobserved_residues(declared, synthesized, &extensions));
            result.unobserved_atoms = Some(collect_unobserved_atoms(cif, self.rep_model_id)?);

            result.polymer_sequence = Some(polymers);
            result.nonpolymer_sequence = Some(nonpoly);
            result.branched_sequence = Some(branched);
            result.missing_polymer_linkage = Some(linkages);
            result.nmr_ext_poly_seq = Some(extensions);
            result.mod_residue = Some(read_mod_residues(cif)?);
            result.split_ligand = Some(split);
            result.coord_atom_site = result.coord_atom_site.take().or(Some(coord));
            result.struct_conn = Some(read_struct_conn(cif)?);
        }

        if result.coord_atom_site.is_none() {
            result.coord_atom_site =
                Some(build_coord_atom_site(cif, self.rep_model_id, &self.rep_alt_id)?);
        }

        if result.auth_to_star_seq.is_none() {
            let empty_poly = Vec::new();
            let empty_nonpoly = Vec::new();
            let polymers = result.polymer_sequence.as_deref().unwrap_or(&empty_poly);
            let nonpoly = result
                .nonpolymer_sequence
                .as_deref()
                .unwrap_or(&empty_nonpoly);
            let branched = result.branched_sequence.as_deref().unwrap_or(&empty_nonpoly);
            let mapping = build_entity_mapping(cif, polymers, nonpoly, branched)?;
            result.entity_assemblies = Some(mapping.entity_assemblies);
            result.auth_to_star_seq = Some(mapping.auth_to_star_seq);
            result.auth_to_star_seq_ann = Some(mapping.auth_to_star_seq_ann);
            result.auth_to_entity_type = Some(mapping.auth_to_entity_type);
            result.label_to_auth_seq = Some(mapping.label_to_auth_seq);
            result.auth_to_label_seq = Some(mapping.auth_to_label_seq);
            result.auth_to_orig_seq = Some(mapping.auth_to_orig_seq);
        }

        if result.chem_comp_bond.is_none() {
            let nonstd = self.nonstandard_comp_ids(&result, ccd);
            let (bond, topo) = infer_component_topology(
                cif,
                self.rep_model_id,
                &self.rep_alt_id,
                &nonstd,
                &self.topology,
            )?;
            result.chem_comp_bond = Some(bond);
            result.chem_comp_topo = Some(topo);
        }

        Ok(result)
    }

    /// Comp ids present in the coordinates whose CCD entry lacks bonds.
    fn nonstandard_comp_ids<D: ComponentDictionary>(
        &self,
        result: &AssemblyResult,
        ccd: &D,
    ) -> Vec<String> {
        let mut comp_ids = Vec::new();
        if let Some(index) = result.coord_atom_site.as_ref() {
            for site in index.values() {
                for group in &site.comp_groups {
                    if comp_ids.contains(&group.comp_id) || group.comp_id == "." {
                        continue;
                    }
                    let known = ccd
                        .get(&group.comp_id)
                        .is_some_and(|comp| !comp.bonds.is_empty());
                    if !known {
                        comp_ids.push(group.comp_id.clone());
                    }
                }
            }
        }
        comp_ids.sort();
        comp_ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ccd::InMemoryCcd;
    use crate::core::cif::{CifCategory, InMemoryCif};
    use crate::engine::assembly::model::SeqKey;

    fn minimal_cif() -> InMemoryCif {
        let mut scheme = CifCategory::new(
            "pdbx_poly_seq_scheme",
            &[
                "asym_id",
                "entity_id",
                "seq_id",
                "mon_id",
                "auth_seq_num",
                "auth_mon_id",
                "pdb_strand_id",
                "pdb_ins_code",
            ],
        );
        scheme.push_row(&["A", "1", "1", "MET", "10", "MET", "A", "."]);
        scheme.push_row(&["A", "1", "2", "ALA", "11", "ALA", "A", "."]);
        let mut entity = CifCategory::new("entity", &["id", "type"]);
        entity.push_row(&["1", "polymer"]);
        let mut atom_site = CifCategory::new(
            "atom_site",
            &[
                "auth_asym_id",
                "auth_seq_id",
                "auth_comp_id",
                "label_atom_id",
                "type_symbol",
            ],
        );
        atom_site.push_row(&["A", "10", "MET", "CA", "C"]);
        atom_site.push_row(&["A", "11", "ALA", "CA", "C"]);
        let mut cif = InMemoryCif::new();
        cif.insert(scheme);
        cif.insert(entity);
        cif.insert(atom_site);
        cif
    }

    #[test]
    fn full_check_populates_every_map() {
        let checker = AssemblyChecker::default();
        let result = checker.check(&minimal_cif(), &InMemoryCcd::new(), None, &[]);
        assert!(result.has_coarse_keys());
        assert!(result.coord_atom_site.is_some());
        let star = result.star_seq(&SeqKey::new("A", 10, "MET")).unwrap();
        assert_eq!(star.seq_id, 1);
        assert_eq!(star.entity_id, 1);
    }

    #[test]
    fn previous_coarse_result_skips_the_structural_scan() {
        let checker = AssemblyChecker::default();
        let first = checker.check(&minimal_cif(), &InMemoryCcd::new(), None, &[]);

        // An empty view would fail a fresh scan, but the coarse keys carry.
        let empty = InMemoryCif::new();
        let second = checker.check(&empty, &InMemoryCcd::new(), Some(first.clone()), &[]);
        assert_eq!(
            second.polymer_sequence.as_ref().map(|s| s.len()),
            first.polymer_sequence.as_ref().map(|s| s.len())
        );
        assert!(second.auth_to_star_seq.is_some());
    }

    #[test]
    fn broken_view_returns_previous_result_unchanged() {
        let checker = AssemblyChecker::default();
        let previous = checker.check(&minimal_cif(), &InMemoryCcd::new(), None, &[]);

        let mut malformed = CifCategory::new(
            "pdbx_poly_seq_scheme",
            &["asym_id", "seq_id", "mon_id", "pdb_strand_id"],
        );
        malformed.push_row(&["A", "not-an-int", "ALA", "A"]);
        let mut cif = InMemoryCif::new();
        cif.insert(malformed);
        let mut stale = previous.clone();
        stale.polymer_sequence = None;
        let result = checker.check(&cif, &InMemoryCcd::new(), Some(stale.clone()), &[]);
        assert_eq!(
            result.polymer_sequence.is_some(),
            stale.polymer_sequence.is_some()
        );
    }
}
