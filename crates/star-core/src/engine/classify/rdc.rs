//! RDC vector classification.

use crate::core::models::RestraintAtom;

/// The dipolar coupling vector code of a two-atom RDC restraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RdcCode {
    Nh,
    Hnc,
    CnI1,
    Caha,
    Hnha,
    HnhaI1,
    Cac,
    Can,
    Hh,
    Cc,
    Other,
}

impl RdcCode {
    pub fn as_str(self) -> &'static str {
        match self {
            RdcCode::Nh => "RDC_NH",
            RdcCode::Hnc => "RDC_HNC",
            RdcCode::CnI1 => "RDC_CN_i_1",
            RdcCode::Caha => "RDC_CAHA",
            RdcCode::Hnha => "RDC_HNHA",
            RdcCode::HnhaI1 => "RDC_HNHA_i_1",
            RdcCode::Cac => "RDC_CAC",
            RdcCode::Can => "RDC_CAN",
            RdcCode::Hh => "RDC_HH",
            RdcCode::Cc => "RDC_CC",
            RdcCode::Other => "RDC_other",
        }
    }
}

/// Side-chain N-H vectors reclassified as amide-equivalent.
fn sidechain_nh(comp_id: &str, atom_a: &str, atom_b: &str) -> bool {
    let pair = |x: &str, y: &str| (atom_a == x && atom_b == y) || (atom_a == y && atom_b == x);
    match comp_id {
        "TRP" => pair("HE1", "NE1"),
        "ARG" => pair("HE", "NE"),
        _ => false,
    }
}

/// Classifies a two-atom RDC vector from the atom names and sequence offset.
pub fn classify_rdc(atom_1: &RestraintAtom, atom_2: &RestraintAtom) -> RdcCode {
    let offset = (atom_2.seq_id - atom_1.seq_id).abs();
    let (a, b) = (atom_1.atom_id.as_str(), atom_2.atom_id.as_str());
    let pair = |x: &str, y: &str| (a == x && b == y) || (a == y && b == x);

    if offset == 0
        && (sidechain_nh(&atom_1.comp_id, a, b) || sidechain_nh(&atom_2.comp_id, a, b))
    {
        return RdcCode::Nh;
    }

    if offset == 0 {
        if pair("H", "N") {
            return RdcCode::Nh;
        }
        if pair("HA", "CA") || pair("HA2", "CA") || pair("HA3", "CA") {
            return RdcCode::Caha;
        }
        if pair("H", "C") {
            return RdcCode::Hnc;
        }
        if pair("H", "HA") {
            return RdcCode::Hnha;
        }
        if pair("CA", "C") {
            return RdcCode::Cac;
        }
        if pair("CA", "N") {
            return RdcCode::Can;
        }
    } else if offset == 1 {
        if pair("C", "N") {
            return RdcCode::CnI1;
        }
        if pair("H", "HA") {
            return RdcCode::HnhaI1;
        }
    }

    if a.starts_with('H') && b.starts_with('H') {
        return RdcCode::Hh;
    }
    if a.starts_with('C') && b.starts_with('C') {
        return RdcCode::Cc;
    }
    RdcCode::Other
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atom(chain: &str, seq: i64, comp: &str, name: &str) -> RestraintAtom {
        RestraintAtom::new(chain, seq, comp, name)
    }

    #[test]
    fn amide_vector_is_rdc_nh() {
        let code = classify_rdc(
            &atom("B", 15, "LEU", "H"),
            &atom("B", 15, "LEU", "N"),
        );
        assert_eq!(code, RdcCode::Nh);
        assert_eq!(code.as_str(), "RDC_NH");
    }

    #[test]
    fn tryptophan_indole_reclassifies_as_nh() {
        let code = classify_rdc(
            &atom("A", 30, "TRP", "NE1"),
            &atom("A", 30, "TRP", "HE1"),
        );
        assert_eq!(code, RdcCode::Nh);
    }

    #[test]
    fn sequential_carbonyl_nitrogen_is_cn_i_1() {
        let code = classify_rdc(
            &atom("A", 14, "ALA", "C"),
            &atom("A", 15, "GLY", "N"),
        );
        assert_eq!(code, RdcCode::CnI1);
    }

    #[test]
    fn long_range_proton_pairs_fall_back_to_hh() {
        let code = classify_rdc(
            &atom("A", 14, "ALA", "HB1"),
            &atom("A", 40, "GLY", "HA2"),
        );
        assert_eq!(code, RdcCode::Hh);
    }
}
