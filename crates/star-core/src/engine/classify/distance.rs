//! Distance restraint type classification.
//!
//! A first-match decision table over the two atom selections, the populated
//! limits, and a free-text hint from the source file. Band boundaries come
//! from the reference tables and are deliberately tunable constants.

use super::shifts::ChemShiftStats;
use crate::core::models::{RestraintAtom, TargetValues};
use crate::core::tables::ranges::{
    DIST_AMBIG_BND, DIST_AMBIG_LOW, DIST_AMBIG_UP, DIST_COVALENT_UP,
};
use crate::core::tables::isotopes;

/// The semantic type of a distance restraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DistanceType {
    Noe,
    HydrogenBond,
    AmbiguousHydrogenBond,
    DisulfideBond,
    AmbiguousDisulfideBond,
    DiselenideBond,
    AmbiguousDiselenideBond,
    MetalCoordination,
    CovalentBond,
    ParamagneticRelaxation,
    PhotoCidnp,
    ChemShiftPerturbation,
    Mutation,
    Protection,
    Symmetry,
}

impl DistanceType {
    pub fn as_str(self) -> &'static str {
        match self {
            DistanceType::Noe => "NOE",
            DistanceType::HydrogenBond => "hydrogen bond",
            DistanceType::AmbiguousHydrogenBond => "ambiguous hydrogen bond",
            DistanceType::DisulfideBond => "disulfide bond",
            DistanceType::AmbiguousDisulfideBond => "ambiguous disulfide bond",
            DistanceType::DiselenideBond => "diselenide bond",
            DistanceType::AmbiguousDiselenideBond => "ambiguous diselenide bond",
            DistanceType::MetalCoordination => "metal coordination",
            DistanceType::CovalentBond => "covalent bond",
            DistanceType::ParamagneticRelaxation => "paramagnetic relaxation",
            DistanceType::PhotoCidnp => "photo cidnp",
            DistanceType::ChemShiftPerturbation => "chemical shift perturbation",
            DistanceType::Mutation => "mutation",
            DistanceType::Protection => "protection",
            DistanceType::Symmetry => "symmetry",
        }
    }

    /// The base constraint type for the saveframe enum, with the ambiguity
    /// qualifier folded away.
    pub fn constraint_type(self) -> &'static str {
        match self {
            DistanceType::AmbiguousHydrogenBond => "hydrogen bond",
            DistanceType::AmbiguousDisulfideBond => "disulfide bond",
            DistanceType::AmbiguousDiselenideBond => "diselenide bond",
            DistanceType::CovalentBond => "general distance",
            other => other.as_str(),
        }
    }
}

fn is_proton(atom: &RestraintAtom) -> bool {
    // Mono-atomic ligands (HG, ...) carry their comp id as the atom id.
    atom.atom_id != atom.comp_id
        && matches!(atom.atom_id.chars().next(), Some('H' | 'D' | 'T'))
}

fn element_of(atom: &RestraintAtom) -> &str {
    if atom.atom_id.starts_with("SE") {
        "SE"
    } else if atom.atom_id.starts_with('S') {
        "S"
    } else {
        &atom.atom_id[..atom.atom_id.len().min(1)]
    }
}

fn hint_matches(hint: Option<&str>, needles: &[&str]) -> bool {
    hint.is_some_and(|text| {
        let lower = text.to_ascii_lowercase();
        needles.iter().any(|needle| lower.contains(needle))
    })
}

fn all_pairs_match(
    atoms_1: &[RestraintAtom],
    atoms_2: &[RestraintAtom],
    test: impl Fn(&RestraintAtom, &RestraintAtom) -> bool,
) -> bool {
    !atoms_1.is_empty()
        && !atoms_2.is_empty()
        && atoms_1
            .iter()
            .all(|a| atoms_2.iter().all(|b| test(a, b)))
}

/// Classifies a distance restraint; first matching rule wins.
pub fn classify_distance(
    atoms_1: &[RestraintAtom],
    atoms_2: &[RestraintAtom],
    values: &TargetValues,
    stats: Option<&dyn ChemShiftStats>,
    hint: Option<&str>,
) -> DistanceType {
    let upper = values.upper_limit.or(values.target_value);

    // Mono-atomic ligands carry their comp id as the atom id.
    let metal = |atoms: &[RestraintAtom]| {
        atoms
            .iter()
            .any(|a| a.atom_id == a.comp_id && isotopes::is_metal_element(&a.atom_id))
    };
    if metal(atoms_1) || metal(atoms_2) {
        return DistanceType::MetalCoordination;
    }

    // Covalent bond: same residue, zero upper bound, short lower, both heavy.
    if let (Some(a), Some(b)) = (atoms_1.first(), atoms_2.first())
        && atoms_1.len() == 1
        && atoms_2.len() == 1
        && a.chain_id == b.chain_id
        && a.seq_id == b.seq_id
        && values.upper_limit == Some(0.0)
        && values
            .lower_limit
            .is_some_and(|low| low > 0.0 && low <= DIST_COVALENT_UP)
        && !is_proton(a)
        && !is_proton(b)
    {
        return DistanceType::CovalentBond;
    }

    let ambiguous = upper.is_some_and(|up| up > DIST_AMBIG_BND && up <= DIST_AMBIG_UP);
    let bonded_band = upper.is_some_and(|up| up >= DIST_AMBIG_LOW && up <= DIST_AMBIG_BND);

    // Disulfide and diselenide element patterns.
    let sulfur_pair = all_pairs_match(atoms_1, atoms_2, |a, b| {
        element_of(a) == "S" && element_of(b) == "S"
    });
    let selenium_pair = all_pairs_match(atoms_1, atoms_2, |a, b| {
        element_of(a) == "SE" && element_of(b) == "SE"
    });
    if sulfur_pair || hint_matches(hint, &["disulfide", "ssbond"]) {
        if ambiguous {
            return DistanceType::AmbiguousDisulfideBond;
        }
        if bonded_band || hint_matches(hint, &["disulfide", "ssbond"]) {
            return DistanceType::DisulfideBond;
        }
    }
    if selenium_pair || hint_matches(hint, &["diselenide"]) {
        if ambiguous {
            return DistanceType::AmbiguousDiselenideBond;
        }
        if bonded_band || hint_matches(hint, &["diselenide"]) {
            return DistanceType::DiselenideBond;
        }
    }

    // Reinforcing restraints within a residue (SG-CB, SE-CB).
    if let (Some(a), Some(b)) = (atoms_1.first(), atoms_2.first())
        && a.chain_id == b.chain_id
        && a.seq_id == b.seq_id
    {
        let pair = |x: &str, y: &str| {
            (a.atom_id == x && b.atom_id == y) || (a.atom_id == y && b.atom_id == x)
        };
        if pair("SG", "CB") {
            return DistanceType::DisulfideBond;
        }
        if pair("SE", "CB") {
            return DistanceType::DiselenideBond;
        }
    }

    if hint_matches(hint, &["paramagnetic", "pre "]) {
        return DistanceType::ParamagneticRelaxation;
    }
    if hint_matches(hint, &["cidnp"]) {
        return DistanceType::PhotoCidnp;
    }
    if hint_matches(hint, &["chemical shift perturbation", "csp"]) {
        return DistanceType::ChemShiftPerturbation;
    }
    if hint_matches(hint, &["mutation"]) {
        return DistanceType::Mutation;
    }
    if hint_matches(hint, &["protection"]) {
        return DistanceType::Protection;
    }
    if hint_matches(hint, &["symmetry"]) {
        return DistanceType::Symmetry;
    }

    // Hydrogen bonds: exchangeable proton or polar donor against an acceptor.
    let donor_acceptor = all_pairs_match(atoms_1, atoms_2, |a, b| {
        let donor = matches!(element_of(a), "N" | "O" | "F")
            || stats.is_some_and(|s| s.is_exchangeable_proton(&a.comp_id, &a.atom_id));
        let acceptor = matches!(element_of(b), "N" | "O" | "S" | "F");
        donor && acceptor
    }) || all_pairs_match(atoms_1, atoms_2, |a, b| {
        let donor = matches!(element_of(b), "N" | "O" | "F")
            || stats.is_some_and(|s| s.is_exchangeable_proton(&b.comp_id, &b.atom_id));
        let acceptor = matches!(element_of(a), "N" | "O" | "S" | "F");
        donor && acceptor
    });
    if (donor_acceptor || hint_matches(hint, &["hydrogen bond", "hbond"]))
        && (bonded_band || ambiguous || hint_matches(hint, &["hydrogen bond", "hbond"]))
    {
        return if ambiguous {
            DistanceType::AmbiguousHydrogenBond
        } else {
            DistanceType::HydrogenBond
        };
    }

    DistanceType::Noe
}
