use serde::{Deserialize, Serialize};

/// One atom reference inside a restraint, in author-scheme identifiers.
///
/// Parser listeners construct these from the source dialect after name
/// translation; the emitter rewrites `chain_id`/`seq_id`/`comp_id` to the
/// STAR scheme via the assembly model and fills in `entity_id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct RestraintAtom {
    /// Author chain id (auth_asym_id) as written in the restraint file.
    pub chain_id: String,
    /// Author sequence number.
    pub seq_id: i64,
    /// Residue (chemical component) id, canonicalized by the residue translator.
    pub comp_id: String,
    /// Atom id, canonicalized by the atom-name translator.
    pub atom_id: String,
    /// Entity id, populated once the atom has been resolved to the STAR scheme.
    pub entity_id: Option<i64>,
    /// PDB insertion code, when the source dialect carries one.
    pub ins_code: Option<char>,
}

impl RestraintAtom {
    pub fn new(chain_id: &str, seq_id: i64, comp_id: &str, atom_id: &str) -> Self {
        Self {
            chain_id: chain_id.to_string(),
            seq_id,
            comp_id: comp_id.to_string(),
            atom_id: atom_id.to_string(),
            entity_id: None,
            ins_code: None,
        }
    }
}

/// The target-value function of a restraint: which bounds are set determines
/// both the inferred potential type and which data cells of the emitted row
/// are populated.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TargetValues {
    pub target_value: Option<f64>,
    pub target_value_uncertainty: Option<f64>,
    pub lower_linear_limit: Option<f64>,
    pub lower_limit: Option<f64>,
    pub upper_limit: Option<f64>,
    pub upper_linear_limit: Option<f64>,
    pub weight: Option<f64>,
    pub scale: Option<f64>,
}

impl TargetValues {
    /// True when no bound and no target is set.
    pub fn is_empty(&self) -> bool {
        self.target_value.is_none()
            && self.lower_linear_limit.is_none()
            && self.lower_limit.is_none()
            && self.upper_limit.is_none()
            && self.upper_linear_limit.is_none()
    }
}

/// Coarse polymer classification of the residues a restraint touches, used to
/// select the torsion-template family and terminal-atom conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResidueClass {
    Protein,
    Dna,
    Rna,
    Carbohydrate,
    NonPolymer,
}

impl ResidueClass {
    pub fn is_nucleic(self) -> bool {
        matches!(self, ResidueClass::Dna | ResidueClass::Rna)
    }
}

/// The source dialect family a restraint file was parsed from. Only coarse
/// distinctions that change core semantics are represented (e.g. log-harmonic
/// potentials are reserved for XPLOR/CNS/NMR-STAR distance restraints).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceDialect {
    Cyana,
    XplorNih,
    Cns,
    Amber,
    Rosetta,
    Gromacs,
    Biosym,
    NmrStar,
    Other,
}

impl SourceDialect {
    /// Dialects whose distance restraints may legitimately carry a
    /// log-harmonic potential.
    pub fn supports_log_harmonic(self) -> bool {
        matches!(
            self,
            SourceDialect::XplorNih | SourceDialect::Cns | SourceDialect::NmrStar
        )
    }
}
