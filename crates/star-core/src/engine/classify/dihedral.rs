//! Dihedral angle classification.
//!
//! Four (five for the pseudo-rotation phase angle) atom descriptors are
//! matched against the torsion templates of the residue class. Templates are
//! tried in registration order; sequence offsets are evaluated relative to
//! the anchor residue. Backbone angles whose atom names match but whose
//! offsets drift return a pseudo marker carrying the observed offsets so the
//! remediation pipeline can retarget the restraint.

use crate::core::ccd::ComponentDictionary;
use crate::core::models::{ResidueClass, RestraintAtom};
use crate::core::tables::torsions::{
    TorsionClass, TorsionTemplate, torsion_templates,
};
use crate::engine::assembly::model::StructConnBond;
use std::collections::BTreeSet;

/// Backbone angles eligible for the pseudo-offset fallback.
const PSEUDO_ELIGIBLE: &[&str] = &["PHI", "PSI", "OMEGA"];

/// Result of classifying one dihedral restraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DihedralAngle {
    /// A recognized named angle (PHI, CHI21, ALPHA, ...).
    Named(&'static str),
    /// Atom names match a backbone angle but the sequence offsets drift.
    Pseudo {
        name: &'static str,
        offsets: [i64; 4],
    },
    /// Cross-chain tuple whose consecutive pairs are all covalently linked;
    /// emitted as '.' in the angle-name cell.
    Connection,
    /// All atoms lie in one ring of a chemical component.
    Ring,
    /// Two dihedrals across a bond pair sharing an aromatic plane.
    Plane,
    /// Two simple bonded pairs.
    Align,
}

impl DihedralAngle {
    /// The value stored in the `Torsion_angle_name` cell.
    pub fn star_name(&self) -> String {
        match self {
            DihedralAngle::Named(name) => (*name).to_string(),
            DihedralAngle::Pseudo { name, offsets } => format!(
                "pseudo {name} ({}, {}, {}, {})",
                offsets[0], offsets[1], offsets[2], offsets[3]
            ),
            DihedralAngle::Connection => ".".to_string(),
            DihedralAngle::Ring => "RING".to_string(),
            DihedralAngle::Plane => "PLANE".to_string(),
            DihedralAngle::Align => "ALIGN".to_string(),
        }
    }
}

fn torsion_class_of(class: ResidueClass) -> TorsionClass {
    match class {
        ResidueClass::Protein | ResidueClass::NonPolymer => TorsionClass::Protein,
        ResidueClass::Dna | ResidueClass::Rna => TorsionClass::Nucleic,
        ResidueClass::Carbohydrate => TorsionClass::Carbohydrate,
    }
}

/// True when two atoms are covalently linked, per the CCD template within a
/// residue or `struct_conn` across residues.
fn pair_bonded(
    a: &RestraintAtom,
    b: &RestraintAtom,
    ccd: &impl ComponentDictionary,
    struct_conn: &[StructConnBond],
) -> bool {
    if a.chain_id == b.chain_id && a.seq_id == b.seq_id {
        return ccd
            .get(&a.comp_id)
            .is_some_and(|comp| comp.bonded_atom_ids(&a.atom_id).contains(&b.atom_id.as_str()));
    }
    struct_conn
        .iter()
        .any(|bond| bond.links(&a.chain_id, a.seq_id, &b.chain_id, b.seq_id))
}

fn classify_plane_like(
    atoms: &[RestraintAtom],
    ccd: &impl ComponentDictionary,
    struct_conn: &[StructConnBond],
) -> Option<DihedralAngle> {
    let one_residue = atoms
        .windows(2)
        .all(|w| w[0].chain_id == w[1].chain_id && w[0].seq_id == w[1].seq_id);
    if one_residue
        && let Some(comp) = ccd.get(&atoms[0].comp_id)
    {
        let ids: Vec<&str> = atoms.iter().map(|a| a.atom_id.as_str()).collect();
        if comp.atoms_share_ring(&ids) {
            return Some(DihedralAngle::Ring);
        }
    }

    // Two aromatic residues joined across a bond share a plane.
    let residues: BTreeSet<(String, i64)> = atoms
        .iter()
        .map(|a| (a.chain_id.clone(), a.seq_id))
        .collect();
    if residues.len() == 2 {
        let all_aromatic = atoms.iter().all(|a| {
            ccd.get(&a.comp_id).is_some_and(|comp| {
                comp.atoms
                    .iter()
                    .any(|ca| ca.atom_id == a.atom_id && ca.aromatic)
            })
        });
        if all_aromatic {
            return Some(DihedralAngle::Plane);
        }
    }

    if atoms.len() == 4
        && pair_bonded(&atoms[0], &atoms[1], ccd, struct_conn)
        && pair_bonded(&atoms[2], &atoms[3], ccd, struct_conn)
    {
        return Some(DihedralAngle::Align);
    }
    None
}

/// Matches one template against the atom tuple; `Some(true)` is an exact
/// match, `Some(false)` a name-only match with drifting offsets.
fn match_template(template: &TorsionTemplate, atoms: &[RestraintAtom]) -> Option<bool> {
    if template.atoms.len() != atoms.len() {
        return None;
    }
    for (matcher, atom) in template.atoms.iter().zip(atoms.iter()) {
        if !matcher.matches(&atom.atom_id) {
            return None;
        }
    }
    // Anchor is the residue at the first zero offset.
    let anchor_pos = template.offsets.iter().position(|o| *o == 0)?;
    let anchor = &atoms[anchor_pos];
    if !template.comp_ids.is_empty()
        && !template.comp_ids.contains(&anchor.comp_id.as_str())
    {
        return None;
    }
    let exact = template
        .offsets
        .iter()
        .zip(atoms.iter())
        .all(|(offset, atom)| atom.seq_id - anchor.seq_id == i64::from(*offset));
    Some(exact)
}

/// Classifies a dihedral restraint's atom tuple.
///
/// Returns `None` when nothing applies; the caller decides whether to warn
/// or to emit the restraint with an unset angle name.
pub fn classify_dihedral(
    atoms: &[RestraintAtom],
    class: ResidueClass,
    plane_like: bool,
    ccd: &impl ComponentDictionary,
    struct_conn: &[StructConnBond],
) -> Option<DihedralAngle> {
    if atoms.len() < 4 || atoms.len() > 5 {
        return None;
    }

    if plane_like {
        return classify_plane_like(atoms, ccd, struct_conn);
    }

    let chains: BTreeSet<&str> = atoms.iter().map(|a| a.chain_id.as_str()).collect();
    if chains.len() > 1 {
        let all_linked = atoms
            .windows(2)
            .all(|w| pair_bonded(&w[0], &w[1], ccd, struct_conn));
        return if all_linked {
            Some(DihedralAngle::Connection)
        } else {
            None
        };
    }

    let templates = torsion_templates(torsion_class_of(class));
    let mut pseudo: Option<DihedralAngle> = None;
    for template in templates {
        match match_template(template, atoms) {
            Some(true) => return Some(DihedralAngle::Named(template.angle_name)),
            Some(false) => {
                if pseudo.is_none()
                    && atoms.len() == 4
                    && PSEUDO_ELIGIBLE.contains(&template.angle_name)
                {
                    let anchor_pos = template.offsets.iter().position(|o| *o == 0)?;
                    let anchor_seq = atoms[anchor_pos].seq_id;
                    let mut offsets = [0i64; 4];
                    for (slot, atom) in offsets.iter_mut().zip(atoms.iter()) {
                        *slot = atom.seq_id - anchor_seq;
                    }
                    pseudo = Some(DihedralAngle::Pseudo {
                        name: template.angle_name,
                        offsets,
                    });
                }
            }
            None => {}
        }
    }
    pseudo
}
