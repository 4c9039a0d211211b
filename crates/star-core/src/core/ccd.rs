//! Chemical Component Dictionary models and the lookup seam.
//!
//! The dictionary itself is an external collaborator; the core only consumes
//! per-component templates through [`ComponentDictionary`] and caches nothing
//! beyond what the collaborator caches. [`InMemoryCcd`] backs tests and
//! embedders that preload the handful of components a run touches.

use std::collections::HashMap;

/// Broad component classifier from the CCD `type` item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CompType {
    LPeptide,
    DPeptide,
    Rna,
    Dna,
    Oligosaccharide,
    #[default]
    NonPolymer,
    Water,
}

impl CompType {
    pub fn is_peptide(self) -> bool {
        matches!(self, CompType::LPeptide | CompType::DPeptide)
    }

    pub fn is_nucleic(self) -> bool {
        matches!(self, CompType::Rna | CompType::Dna)
    }
}

/// Release status of a CCD entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReleaseStatus {
    #[default]
    Released,
    Obsolete,
    Hold,
}

/// One atom of a component template.
#[derive(Debug, Clone, PartialEq)]
pub struct CompAtom {
    pub atom_id: String,
    pub type_symbol: String,
    pub leaving: bool,
    pub aromatic: bool,
}

impl CompAtom {
    pub fn new(atom_id: &str, type_symbol: &str) -> Self {
        Self {
            atom_id: atom_id.to_string(),
            type_symbol: type_symbol.to_string(),
            leaving: false,
            aromatic: false,
        }
    }

    pub fn leaving(mut self) -> Self {
        self.leaving = true;
        self
    }

    pub fn aromatic(mut self) -> Self {
        self.aromatic = true;
        self
    }
}

/// A residue or ligand template identified by a 1-5 character comp_id.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChemComp {
    pub comp_id: String,
    pub atoms: Vec<CompAtom>,
    /// Pairs of atom_ids.
    pub bonds: Vec<(String, String)>,
    /// Parent comp_id for modified residues.
    pub parent_comp_id: Option<String>,
    pub comp_type: CompType,
    pub release_status: ReleaseStatus,
    /// Replacement comp_id for obsolete entries.
    pub replaced_by: Option<String>,
}

impl ChemComp {
    pub fn new(comp_id: &str, comp_type: CompType) -> Self {
        Self {
            comp_id: comp_id.to_string(),
            comp_type,
            ..Self::default()
        }
    }

    pub fn atom_ids(&self) -> Vec<String> {
        self.atoms.iter().map(|a| a.atom_id.clone()).collect()
    }

    pub fn has_atom(&self, atom_id: &str) -> bool {
        self.atoms.iter().any(|a| a.atom_id == atom_id)
    }

    pub fn leaving_atom_ids(&self) -> Vec<&str> {
        self.atoms
            .iter()
            .filter(|a| a.leaving)
            .map(|a| a.atom_id.as_str())
            .collect()
    }

    /// Atoms bonded to the given atom, per the template bond list.
    pub fn bonded_atom_ids(&self, atom_id: &str) -> Vec<&str> {
        self.bonds
            .iter()
            .filter_map(|(a, b)| {
                if a == atom_id {
                    Some(b.as_str())
                } else if b == atom_id {
                    Some(a.as_str())
                } else {
                    None
                }
            })
            .collect()
    }

    /// One representative proton per methyl group: protons named `H<rest>1`
    /// whose siblings `H<rest>2` and `H<rest>3` also exist.
    pub fn representative_methyl_protons(&self) -> Vec<&str> {
        self.atoms
            .iter()
            .filter_map(|a| {
                let name = a.atom_id.as_str();
                if !name.starts_with('H') || !name.ends_with('1') || name.len() < 2 {
                    return None;
                }
                let stem = &name[..name.len() - 1];
                if self.has_atom(&format!("{stem}2")) && self.has_atom(&format!("{stem}3")) {
                    Some(name)
                } else {
                    None
                }
            })
            .collect()
    }

    /// True when all given atoms belong to one ring of the component. The
    /// template bond graph is walked to require every atom be bonded to at
    /// least two others of the set.
    pub fn atoms_share_ring(&self, atom_ids: &[&str]) -> bool {
        if atom_ids.len() < 3 {
            return false;
        }
        atom_ids.iter().all(|atom| {
            let bonded = self.bonded_atom_ids(atom);
            atom_ids
                .iter()
                .filter(|other| *other != atom && bonded.contains(other))
                .count()
                >= 2
        })
    }
}

/// Read-only access to chemical component templates.
pub trait ComponentDictionary {
    fn get(&self, comp_id: &str) -> Option<&ChemComp>;

    /// Follows one `replaced_by` hop for an obsolete entry.
    fn replacement_of(&self, comp_id: &str) -> Option<&ChemComp> {
        let comp = self.get(comp_id)?;
        if comp.release_status != ReleaseStatus::Obsolete {
            return None;
        }
        comp.replaced_by.as_deref().and_then(|id| self.get(id))
    }
}

/// A preloaded dictionary for tests and embedders.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCcd {
    comps: HashMap<String, ChemComp>,
}

impl InMemoryCcd {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, comp: ChemComp) {
        self.comps.insert(comp.comp_id.clone(), comp);
    }
}

impl ComponentDictionary for InMemoryCcd {
    fn get(&self, comp_id: &str) -> Option<&ChemComp> {
        self.comps.get(comp_id)
    }
}
