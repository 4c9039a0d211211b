//! Torsion-angle atom-quadruple templates.
//!
//! Each named angle is defined by an ordered list of atom matchers and a
//! parallel list of sequence offsets relative to the anchor residue i. Atom
//! matchers are explicit literal/alternative variants tagged by residue class
//! rather than runtime-compiled regular expressions.

/// Matches one atom position of a torsion template.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AtomMatcher {
    Lit(&'static str),
    AnyOf(&'static [&'static str]),
}

impl AtomMatcher {
    pub fn matches(&self, atom_id: &str) -> bool {
        match self {
            AtomMatcher::Lit(name) => *name == atom_id,
            AtomMatcher::AnyOf(names) => names.contains(&atom_id),
        }
    }
}

/// Residue-class family a template belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TorsionClass {
    Protein,
    Nucleic,
    Carbohydrate,
}

/// One named torsion angle: atom matchers, parallel sequence offsets, and an
/// optional comp_id restriction (for per-residue disambiguated variants).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TorsionTemplate {
    pub angle_name: &'static str,
    pub class: TorsionClass,
    pub atoms: &'static [AtomMatcher],
    pub offsets: &'static [i8],
    /// When non-empty, the anchor residue's comp_id must be one of these.
    pub comp_ids: &'static [&'static str],
}

use AtomMatcher::{AnyOf, Lit};

const PURINES: &[&str] = &["A", "G", "DA", "DG", "I", "DI"];
const PYRIMIDINES: &[&str] = &["C", "U", "DC", "DT", "DU", "T"];

static PROTEIN_TEMPLATES: &[TorsionTemplate] = &[
    TorsionTemplate {
        angle_name: "PHI",
        class: TorsionClass::Protein,
        atoms: &[Lit("C"), Lit("N"), Lit("CA"), Lit("C")],
        offsets: &[-1, 0, 0, 0],
        comp_ids: &[],
    },
    TorsionTemplate {
        angle_name: "PSI",
        class: TorsionClass::Protein,
        atoms: &[Lit("N"), Lit("CA"), Lit("C"), Lit("N")],
        offsets: &[0, 0, 0, 1],
        comp_ids: &[],
    },
    TorsionTemplate {
        angle_name: "OMEGA",
        class: TorsionClass::Protein,
        atoms: &[Lit("CA"), Lit("C"), Lit("N"), Lit("CA")],
        offsets: &[0, 0, 1, 1],
        comp_ids: &[],
    },
    // CYANA writes the peptide-plane torsion over O-C-N-H (N-CD for proline).
    TorsionTemplate {
        angle_name: "OMEGA",
        class: TorsionClass::Protein,
        atoms: &[Lit("O"), Lit("C"), Lit("N"), AnyOf(&["H", "CD"])],
        offsets: &[0, 0, 1, 1],
        comp_ids: &[],
    },
    TorsionTemplate {
        angle_name: "CHI1",
        class: TorsionClass::Protein,
        atoms: &[
            Lit("N"),
            Lit("CA"),
            Lit("CB"),
            AnyOf(&["CG", "CG1", "OG", "OG1", "SG"]),
        ],
        offsets: &[0, 0, 0, 0],
        comp_ids: &[],
    },
    TorsionTemplate {
        angle_name: "CHI2",
        class: TorsionClass::Protein,
        atoms: &[
            Lit("CA"),
            Lit("CB"),
            AnyOf(&["CG", "CG1"]),
            AnyOf(&["CD", "CD1", "OD1", "ND1", "SD"]),
        ],
        offsets: &[0, 0, 0, 0],
        comp_ids: &[],
    },
    TorsionTemplate {
        angle_name: "CHI3",
        class: TorsionClass::Protein,
        atoms: &[
            Lit("CB"),
            Lit("CG"),
            AnyOf(&["CD", "SD"]),
            AnyOf(&["CE", "OE1", "NE", "NE2"]),
        ],
        offsets: &[0, 0, 0, 0],
        comp_ids: &[],
    },
    TorsionTemplate {
        angle_name: "CHI4",
        class: TorsionClass::Protein,
        atoms: &[
            Lit("CG"),
            Lit("CD"),
            AnyOf(&["CE", "NE"]),
            AnyOf(&["CZ", "NZ"]),
        ],
        offsets: &[0, 0, 0, 0],
        comp_ids: &[],
    },
    TorsionTemplate {
        angle_name: "CHI5",
        class: TorsionClass::Protein,
        atoms: &[Lit("CD"), Lit("NE"), Lit("CZ"), Lit("NH1")],
        offsets: &[0, 0, 0, 0],
        comp_ids: &["ARG"],
    },
    // Disambiguated branch variants.
    TorsionTemplate {
        angle_name: "CHI21",
        class: TorsionClass::Protein,
        atoms: &[Lit("CA"), Lit("CB"), Lit("CG1"), Lit("CD1")],
        offsets: &[0, 0, 0, 0],
        comp_ids: &["ILE"],
    },
    TorsionTemplate {
        angle_name: "CHI21",
        class: TorsionClass::Protein,
        atoms: &[Lit("CA"), Lit("CB"), Lit("CG"), Lit("CD1")],
        offsets: &[0, 0, 0, 0],
        comp_ids: &["LEU"],
    },
    TorsionTemplate {
        angle_name: "CHI22",
        class: TorsionClass::Protein,
        atoms: &[Lit("CA"), Lit("CB"), Lit("CG"), Lit("CD2")],
        offsets: &[0, 0, 0, 0],
        comp_ids: &["LEU"],
    },
    TorsionTemplate {
        angle_name: "CHI21",
        class: TorsionClass::Protein,
        atoms: &[Lit("N"), Lit("CA"), Lit("CB"), Lit("CG1")],
        offsets: &[0, 0, 0, 0],
        comp_ids: &["VAL"],
    },
    TorsionTemplate {
        angle_name: "CHI22",
        class: TorsionClass::Protein,
        atoms: &[Lit("N"), Lit("CA"), Lit("CB"), Lit("CG2")],
        offsets: &[0, 0, 0, 0],
        comp_ids: &["VAL"],
    },
    TorsionTemplate {
        angle_name: "CHI31",
        class: TorsionClass::Protein,
        atoms: &[Lit("CA"), Lit("CB"), Lit("CG"), Lit("OD1")],
        offsets: &[0, 0, 0, 0],
        comp_ids: &["ASP"],
    },
    TorsionTemplate {
        angle_name: "CHI32",
        class: TorsionClass::Protein,
        atoms: &[Lit("CA"), Lit("CB"), Lit("CG"), Lit("OD2")],
        offsets: &[0, 0, 0, 0],
        comp_ids: &["ASP"],
    },
    TorsionTemplate {
        angle_name: "CHI31",
        class: TorsionClass::Protein,
        atoms: &[Lit("CB"), Lit("CG"), Lit("CD"), Lit("OE1")],
        offsets: &[0, 0, 0, 0],
        comp_ids: &["GLU"],
    },
    TorsionTemplate {
        angle_name: "CHI32",
        class: TorsionClass::Protein,
        atoms: &[Lit("CB"), Lit("CG"), Lit("CD"), Lit("OE2")],
        offsets: &[0, 0, 0, 0],
        comp_ids: &["GLU"],
    },
    TorsionTemplate {
        angle_name: "CHI42",
        class: TorsionClass::Protein,
        atoms: &[Lit("CD"), Lit("NE"), Lit("CZ"), Lit("NH2")],
        offsets: &[0, 0, 0, 0],
        comp_ids: &["ARG"],
    },
];

static NUCLEIC_TEMPLATES: &[TorsionTemplate] = &[
    TorsionTemplate {
        angle_name: "ALPHA",
        class: TorsionClass::Nucleic,
        atoms: &[Lit("O3'"), Lit("P"), Lit("O5'"), Lit("C5'")],
        offsets: &[-1, 0, 0, 0],
        comp_ids: &[],
    },
    TorsionTemplate {
        angle_name: "BETA",
        class: TorsionClass::Nucleic,
        atoms: &[Lit("P"), Lit("O5'"), Lit("C5'"), Lit("C4'")],
        offsets: &[0, 0, 0, 0],
        comp_ids: &[],
    },
    TorsionTemplate {
        angle_name: "GAMMA",
        class: TorsionClass::Nucleic,
        atoms: &[Lit("O5'"), Lit("C5'"), Lit("C4'"), Lit("C3'")],
        offsets: &[0, 0, 0, 0],
        comp_ids: &[],
    },
    TorsionTemplate {
        angle_name: "DELTA",
        class: TorsionClass::Nucleic,
        atoms: &[Lit("C5'"), Lit("C4'"), Lit("C3'"), Lit("O3'")],
        offsets: &[0, 0, 0, 0],
        comp_ids: &[],
    },
    TorsionTemplate {
        angle_name: "EPSILON",
        class: TorsionClass::Nucleic,
        atoms: &[Lit("C4'"), Lit("C3'"), Lit("O3'"), Lit("P")],
        offsets: &[0, 0, 0, 1],
        comp_ids: &[],
    },
    TorsionTemplate {
        angle_name: "ZETA",
        class: TorsionClass::Nucleic,
        atoms: &[Lit("C3'"), Lit("O3'"), Lit("P"), Lit("O5'")],
        offsets: &[0, 0, 1, 1],
        comp_ids: &[],
    },
    TorsionTemplate {
        angle_name: "NU0",
        class: TorsionClass::Nucleic,
        atoms: &[Lit("C4'"), Lit("O4'"), Lit("C1'"), Lit("C2'")],
        offsets: &[0, 0, 0, 0],
        comp_ids: &[],
    },
    TorsionTemplate {
        angle_name: "NU1",
        class: TorsionClass::Nucleic,
        atoms: &[Lit("O4'"), Lit("C1'"), Lit("C2'"), Lit("C3'")],
        offsets: &[0, 0, 0, 0],
        comp_ids: &[],
    },
    TorsionTemplate {
        angle_name: "NU2",
        class: TorsionClass::Nucleic,
        atoms: &[Lit("C1'"), Lit("C2'"), Lit("C3'"), Lit("C4'")],
        offsets: &[0, 0, 0, 0],
        comp_ids: &[],
    },
    TorsionTemplate {
        angle_name: "NU3",
        class: TorsionClass::Nucleic,
        atoms: &[Lit("C2'"), Lit("C3'"), Lit("C4'"), Lit("O4'")],
        offsets: &[0, 0, 0, 0],
        comp_ids: &[],
    },
    TorsionTemplate {
        angle_name: "NU4",
        class: TorsionClass::Nucleic,
        atoms: &[Lit("C3'"), Lit("C4'"), Lit("O4'"), Lit("C1'")],
        offsets: &[0, 0, 0, 0],
        comp_ids: &[],
    },
    TorsionTemplate {
        angle_name: "TAU0",
        class: TorsionClass::Nucleic,
        atoms: &[Lit("C4'"), Lit("O4'"), Lit("C1'"), Lit("C2'")],
        offsets: &[0, 0, 0, 0],
        comp_ids: &[],
    },
    TorsionTemplate {
        angle_name: "TAU1",
        class: TorsionClass::Nucleic,
        atoms: &[Lit("O4'"), Lit("C1'"), Lit("C2'"), Lit("C3'")],
        offsets: &[0, 0, 0, 0],
        comp_ids: &[],
    },
    TorsionTemplate {
        angle_name: "TAU2",
        class: TorsionClass::Nucleic,
        atoms: &[Lit("C1'"), Lit("C2'"), Lit("C3'"), Lit("C4'")],
        offsets: &[0, 0, 0, 0],
        comp_ids: &[],
    },
    TorsionTemplate {
        angle_name: "TAU3",
        class: TorsionClass::Nucleic,
        atoms: &[Lit("C2'"), Lit("C3'"), Lit("C4'"), Lit("O4'")],
        offsets: &[0, 0, 0, 0],
        comp_ids: &[],
    },
    TorsionTemplate {
        angle_name: "TAU4",
        class: TorsionClass::Nucleic,
        atoms: &[Lit("C3'"), Lit("C4'"), Lit("O4'"), Lit("C1'")],
        offsets: &[0, 0, 0, 0],
        comp_ids: &[],
    },
    // Cross-nucleotide pseudo-torsions over three consecutive residues.
    TorsionTemplate {
        angle_name: "ETA",
        class: TorsionClass::Nucleic,
        atoms: &[Lit("C4'"), Lit("P"), Lit("C4'"), Lit("P")],
        offsets: &[-1, 0, 0, 1],
        comp_ids: &[],
    },
    TorsionTemplate {
        angle_name: "THETA",
        class: TorsionClass::Nucleic,
        atoms: &[Lit("P"), Lit("C4'"), Lit("P"), Lit("C4'")],
        offsets: &[0, 0, 1, 1],
        comp_ids: &[],
    },
    TorsionTemplate {
        angle_name: "CHI",
        class: TorsionClass::Nucleic,
        atoms: &[Lit("O4'"), Lit("C1'"), Lit("N9"), Lit("C4")],
        offsets: &[0, 0, 0, 0],
        comp_ids: PURINES,
    },
    TorsionTemplate {
        angle_name: "CHI",
        class: TorsionClass::Nucleic,
        atoms: &[Lit("O4'"), Lit("C1'"), Lit("N1"), Lit("C2")],
        offsets: &[0, 0, 0, 0],
        comp_ids: PYRIMIDINES,
    },
    // Phase angle of pseudo-rotation, defined over the five ring atoms.
    TorsionTemplate {
        angle_name: "PPA",
        class: TorsionClass::Nucleic,
        atoms: &[
            Lit("C1'"),
            Lit("C2'"),
            Lit("C3'"),
            Lit("C4'"),
            Lit("O4'"),
        ],
        offsets: &[0, 0, 0, 0, 0],
        comp_ids: &[],
    },
];

static CARBOHYDRATE_TEMPLATES: &[TorsionTemplate] = &[
    TorsionTemplate {
        angle_name: "PHI",
        class: TorsionClass::Carbohydrate,
        atoms: &[
            Lit("O5"),
            Lit("C1"),
            AnyOf(&["O1", "O2", "O3", "O4", "O6"]),
            AnyOf(&["C1", "C2", "C3", "C4", "C6"]),
        ],
        offsets: &[0, 0, 1, 1],
        comp_ids: &[],
    },
    TorsionTemplate {
        angle_name: "PSI",
        class: TorsionClass::Carbohydrate,
        atoms: &[
            Lit("C1"),
            AnyOf(&["O1", "O2", "O3", "O4", "O6"]),
            AnyOf(&["C1", "C2", "C3", "C4", "C6"]),
            AnyOf(&["C1", "C2", "C3", "C4", "C5"]),
        ],
        offsets: &[0, 1, 1, 1],
        comp_ids: &[],
    },
    TorsionTemplate {
        angle_name: "OMEGA",
        class: TorsionClass::Carbohydrate,
        atoms: &[
            AnyOf(&["O1", "O6"]),
            Lit("C6"),
            Lit("C5"),
            AnyOf(&["O5", "C4"]),
        ],
        offsets: &[0, 1, 1, 1],
        comp_ids: &[],
    },
];

/// All templates of the given class, in match-priority order.
pub fn torsion_templates(class: TorsionClass) -> &'static [TorsionTemplate] {
    match class {
        TorsionClass::Protein => PROTEIN_TEMPLATES,
        TorsionClass::Nucleic => NUCLEIC_TEMPLATES,
        TorsionClass::Carbohydrate => CARBOHYDRATE_TEMPLATES,
    }
}

/// The first template registered under an angle name, optionally restricted
/// to a class.
pub fn known_torsion_template(
    angle_name: &str,
    class: Option<TorsionClass>,
) -> Option<&'static TorsionTemplate> {
    let classes: &[TorsionClass] = match class {
        Some(c) => match c {
            TorsionClass::Protein => &[TorsionClass::Protein],
            TorsionClass::Nucleic => &[TorsionClass::Nucleic],
            TorsionClass::Carbohydrate => &[TorsionClass::Carbohydrate],
        },
        None => &[
            TorsionClass::Protein,
            TorsionClass::Nucleic,
            TorsionClass::Carbohydrate,
        ],
    };
    classes
        .iter()
        .flat_map(|c| torsion_templates(*c).iter())
        .find(|t| t.angle_name.eq_ignore_ascii_case(angle_name))
}

/// The sequence offsets of a named angle relative to the anchor residue.
pub fn known_torsion_sequence_offsets(angle_name: &str) -> Option<&'static [i8]> {
    known_torsion_template(angle_name, None).map(|t| t.offsets)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phi_template_anchors_on_previous_carbonyl() {
        let template = known_torsion_template("PHI", Some(TorsionClass::Protein)).unwrap();
        assert_eq!(template.offsets, &[-1, 0, 0, 0]);
        assert!(template.atoms[0].matches("C"));
        assert!(template.atoms[1].matches("N"));
    }

    #[test]
    fn chi1_accepts_any_gamma_heavy_atom() {
        let template = known_torsion_template("CHI1", Some(TorsionClass::Protein)).unwrap();
        assert!(template.atoms[3].matches("SG"));
        assert!(template.atoms[3].matches("OG1"));
        assert!(!template.atoms[3].matches("CD"));
    }

    #[test]
    fn nucleic_chi_is_split_by_base_type() {
        let purine = NUCLEIC_TEMPLATES
            .iter()
            .find(|t| t.angle_name == "CHI" && t.comp_ids.contains(&"G"))
            .unwrap();
        assert!(purine.atoms[2].matches("N9"));
        let pyrimidine = NUCLEIC_TEMPLATES
            .iter()
            .find(|t| t.angle_name == "CHI" && t.comp_ids.contains(&"U"))
            .unwrap();
        assert!(pyrimidine.atoms[2].matches("N1"));
    }

    #[test]
    fn ppa_uses_five_ring_atoms() {
        let template = known_torsion_template("PPA", Some(TorsionClass::Nucleic)).unwrap();
        assert_eq!(template.atoms.len(), 5);
        assert_eq!(template.offsets.len(), 5);
    }

    #[test]
    fn eta_and_theta_span_three_residues() {
        assert_eq!(known_torsion_sequence_offsets("ETA"), Some(&[-1, 0, 0, 1][..]));
        assert_eq!(known_torsion_sequence_offsets("THETA"), Some(&[0, 0, 1, 1][..]));
    }
}
