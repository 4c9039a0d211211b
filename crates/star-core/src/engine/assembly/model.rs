//! Result model of the assembly checker.
//!
//! Every field of [`AssemblyResult`] is optional; `None` means "not yet
//! computed" and doubles as the dirty flag for incremental re-evaluation.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Author-scheme sequence key: (auth chain, auth seq, comp id).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeqKey {
    pub chain_id: String,
    pub seq_id: i64,
    pub comp_id: String,
}

impl SeqKey {
    pub fn new(chain_id: &str, seq_id: i64, comp_id: &str) -> Self {
        Self {
            chain_id: chain_id.to_string(),
            seq_id,
            comp_id: comp_id.to_string(),
        }
    }

    /// The same key with a different comp id, for fallback lookups.
    pub fn with_comp(&self, comp_id: &str) -> Self {
        Self::new(&self.chain_id, self.seq_id, comp_id)
    }
}

/// STAR-scheme target of an auth sequence key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarSeq {
    pub entity_assembly_id: i64,
    /// Entity-local, dense 1-based sequence index.
    pub seq_id: i64,
    pub entity_id: i64,
    /// False for alternate-key entries (alt auth seq, label-chain referrers).
    pub representative: bool,
}

/// One chain's polymer residues as parallel lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolymerSegment {
    pub auth_chain_id: String,
    pub label_chain_id: String,
    /// Label-scheme seq ids, dense and 1-based within the entity.
    pub seq_ids: Vec<i64>,
    pub auth_seq_ids: Vec<i64>,
    pub comp_ids: Vec<String>,
    pub auth_comp_ids: Vec<String>,
    pub ins_codes: Vec<Option<char>>,
    pub entity_id: Option<i64>,
}

impl PolymerSegment {
    pub fn len(&self) -> usize {
        self.seq_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seq_ids.is_empty()
    }

    /// The parallel-list invariant: all columns have equal length.
    pub fn is_consistent(&self) -> bool {
        let n = self.seq_ids.len();
        self.auth_seq_ids.len() == n
            && self.comp_ids.len() == n
            && self.auth_comp_ids.len() == n
            && self.ins_codes.len() == n
    }

    pub fn position_of_auth_seq(&self, auth_seq_id: i64) -> Option<usize> {
        self.auth_seq_ids.iter().position(|s| *s == auth_seq_id)
    }
}

/// A non-polymer or branched segment; `alt_auth_seq_ids` resolves collisions
/// where multiple distinct ligands share an auth seq id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NonPolymerSegment {
    pub auth_chain_id: String,
    pub label_chain_id: String,
    pub seq_ids: Vec<i64>,
    pub auth_seq_ids: Vec<i64>,
    pub comp_ids: Vec<String>,
    pub auth_comp_ids: Vec<String>,
    pub ins_codes: Vec<Option<char>>,
    pub alt_auth_seq_ids: Vec<Option<i64>>,
    pub entity_id: Option<i64>,
}

/// Chain break requiring synthesized residues to keep label seq ids dense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingLinkage {
    pub auth_chain_id: String,
    pub auth_seq_id_1: i64,
    pub auth_seq_id_2: i64,
}

/// One comp id's atoms at a coordinate position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompAtoms {
    pub comp_id: String,
    pub atom_ids: Vec<String>,
    pub type_symbols: Vec<String>,
    /// Display names from pdbx_auth_atom_id when they differ.
    pub alt_atom_ids: Vec<Option<String>>,
}

/// Atom-site index entry for one (auth chain, auth seq). More than one comp
/// group marks a split comp id (implicit insertion codes modeled as one
/// label seq with two comp ids).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoordAtomSite {
    pub comp_groups: Vec<CompAtoms>,
}

impl CoordAtomSite {
    pub fn is_split(&self) -> bool {
        self.comp_groups.len() > 1
    }

    pub fn comp_group(&self, comp_id: &str) -> Option<&CompAtoms> {
        self.comp_groups.iter().find(|g| g.comp_id == comp_id)
    }

    /// The single comp group when the site is not split.
    pub fn sole_comp_group(&self) -> Option<&CompAtoms> {
        if self.comp_groups.len() == 1 {
            self.comp_groups.first()
        } else {
            None
        }
    }

    pub fn has_atom(&self, comp_id: &str, atom_id: &str) -> bool {
        self.comp_group(comp_id)
            .is_some_and(|g| g.atom_ids.iter().any(|a| a == atom_id))
    }
}

/// One entity assembly row: one chemically distinct copy of an entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityAssembly {
    /// 1-based, monotonic within the assembly.
    pub entity_assembly_id: i64,
    pub entity_id: i64,
    pub entity_type: String,
    pub src_method: Option<String>,
    pub description: Option<String>,
    pub formula_weight: Option<f64>,
    pub ec_number: Option<String>,
    pub parent_entity_id: Option<i64>,
    pub mutation: Option<String>,
    pub fragment: Option<String>,
    pub details: Option<String>,
    pub copies: i64,
    pub polymer_type: Option<String>,
    pub one_letter_code: Option<String>,
    pub nstd_monomer: bool,
    pub auth_chain_ids: Vec<String>,
    pub label_chain_ids: Vec<String>,
    pub monomer_count: usize,
    pub comp_id_set: BTreeSet<String>,
}

/// One part of a split ligand: a chemically distinct residue modeled as two
/// separate non-polymer chains.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SplitLigandPart {
    pub auth_seq_id: i64,
    pub comp_id: String,
    pub atom_ids: Vec<String>,
}

/// A residue declared unobserved or zero-occupancy, or synthesized from a
/// chain break or NMR sequence extension.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnobservedResidue {
    pub auth_chain_id: String,
    pub auth_seq_id: i64,
    pub comp_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnobservedAtom {
    pub auth_chain_id: String,
    pub auth_seq_id: i64,
    pub comp_id: String,
    pub atom_id: String,
}

/// A residue the coordinate file lacks but the companion NMR sequence has.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NmrExtResidue {
    pub auth_chain_id: String,
    pub auth_seq_id: i64,
    pub comp_id: String,
}

/// One row of pdbx_struct_mod_residue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModResidue {
    pub auth_chain_id: String,
    pub auth_seq_id: i64,
    pub comp_id: String,
    pub parent_comp_id: Option<String>,
    pub details: Option<String>,
}

/// One struct_conn record, kept for cross-chain bonded probes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructConnBond {
    pub conn_type: String,
    pub chain_id_1: String,
    pub seq_id_1: i64,
    pub comp_id_1: String,
    pub atom_id_1: String,
    pub chain_id_2: String,
    pub seq_id_2: i64,
    pub comp_id_2: String,
    pub atom_id_2: String,
}

impl StructConnBond {
    /// True when the bond links the two given residues in either order.
    pub fn links(&self, chain_a: &str, seq_a: i64, chain_b: &str, seq_b: i64) -> bool {
        (self.chain_id_1 == chain_a
            && self.seq_id_1 == seq_a
            && self.chain_id_2 == chain_b
            && self.seq_id_2 == seq_b)
            || (self.chain_id_1 == chain_b
                && self.seq_id_1 == seq_b
                && self.chain_id_2 == chain_a
                && self.seq_id_2 == seq_a)
    }
}

/// Key of the split-ligand map: (auth chain, alt auth seq, alt comp).
pub type SplitLigandKey = (String, i64, String);

/// Per-heavy-atom proton lists and heavy-heavy adjacency, per comp id.
pub type CompBondMap = HashMap<String, HashMap<String, Vec<String>>>;

/// The composite checker result; `None` fields are not yet computed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssemblyResult {
    pub polymer_sequence: Option<Vec<PolymerSegment>>,
    pub nonpolymer_sequence: Option<Vec<NonPolymerSegment>>,
    pub branched_sequence: Option<Vec<NonPolymerSegment>>,
    pub missing_polymer_linkage: Option<Vec<MissingLinkage>>,
    pub nmr_ext_poly_seq: Option<Vec<NmrExtResidue>>,
    pub mod_residue: Option<Vec<ModResidue>>,
    pub split_ligand: Option<HashMap<SplitLigandKey, Vec<SplitLigandPart>>>,
    pub coord_atom_site: Option<HashMap<(String, i64), CoordAtomSite>>,
    pub unobserved_residues: Option<Vec<UnobservedResidue>>,
    pub unobserved_atoms: Option<Vec<UnobservedAtom>>,
    pub label_to_auth_seq: Option<HashMap<(String, i64), (String, i64)>>,
    pub auth_to_label_seq: Option<HashMap<(String, i64), (String, i64)>>,
    pub auth_to_star_seq: Option<HashMap<SeqKey, StarSeq>>,
    /// Annotation map keyed without a comp constraint, for lookup fallbacks.
    pub auth_to_star_seq_ann: Option<HashMap<(String, i64), StarSeq>>,
    /// Original (seq, comp) per key, for files keeping depositor numbering.
    pub auth_to_orig_seq: Option<HashMap<SeqKey, (i64, String)>>,
    /// Coarse entity_poly type per key ("polypeptide(L)", ...).
    pub auth_to_entity_type: Option<HashMap<SeqKey, String>>,
    pub entity_assemblies: Option<Vec<EntityAssembly>>,
    pub chem_comp_bond: Option<CompBondMap>,
    pub chem_comp_topo: Option<CompBondMap>,
    pub struct_conn: Option<Vec<StructConnBond>>,
}

impl AssemblyResult {
    /// True when the coarse structural scan is already available and the
    /// checker can skip re-reading the sequence categories.
    pub fn has_coarse_keys(&self) -> bool {
        self.polymer_sequence.is_some()
            && self.missing_polymer_linkage.is_some()
            && self.nmr_ext_poly_seq.is_some()
            && self.mod_residue.is_some()
            && self.split_ligand.is_some()
    }

    /// Direct STAR lookup on the representative key.
    pub fn star_seq(&self, key: &SeqKey) -> Option<StarSeq> {
        self.auth_to_star_seq.as_ref()?.get(key).copied()
    }

    /// The highest entity assembly id currently assigned.
    pub fn max_entity_assembly_id(&self) -> i64 {
        self.entity_assemblies
            .as_ref()
            .map(|rows| {
                rows.iter()
                    .map(|r| r.entity_assembly_id)
                    .max()
                    .unwrap_or(0)
            })
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coarse_keys_require_every_structural_field() {
        let mut result = AssemblyResult::default();
        assert!(!result.has_coarse_keys());
        result.polymer_sequence = Some(Vec::new());
        result.missing_polymer_linkage = Some(Vec::new());
        result.nmr_ext_poly_seq = Some(Vec::new());
        result.mod_residue = Some(Vec::new());
        assert!(!result.has_coarse_keys());
        result.split_ligand = Some(HashMap::new());
        assert!(result.has_coarse_keys());
    }

    #[test]
    fn struct_conn_links_in_either_order() {
        let bond = StructConnBond {
            conn_type: "disulf".into(),
            chain_id_1: "A".into(),
            seq_id_1: 23,
            comp_id_1: "CYS".into(),
            atom_id_1: "SG".into(),
            chain_id_2: "A".into(),
            seq_id_2: 47,
            comp_id_2: "CYS".into(),
            atom_id_2: "SG".into(),
        };
        assert!(bond.links("A", 23, "A", 47));
        assert!(bond.links("A", 47, "A", 23));
        assert!(!bond.links("A", 23, "B", 47));
    }
}
