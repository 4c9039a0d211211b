/// Restraint value kinds with dictionary-defined plausibility bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RestraintKind {
    /// Distance restraints (NOE, hydrogen bond, disulfide...), in Angstroms.
    Dist,
    /// Dihedral angle restraints, in degrees.
    Angle,
    /// Residual dipolar couplings, in Hz.
    Rdc,
    /// Chemical shifts, in ppm.
    Cs,
    /// Chemical shift anisotropy, in ppm.
    Csa,
    /// Pseudocontact shifts, in ppm.
    Pcs,
    /// Cross-correlated relaxation rates, in s-1.
    Ccr,
    /// Paramagnetic relaxation enhancement rates, in s-1.
    Pre,
    /// Longitudinal/transverse relaxation values, in s-1.
    T1T2,
}

/// An inclusive plausibility band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    pub min_inclusive: f64,
    pub max_inclusive: f64,
}

impl ValueRange {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min_inclusive && value <= self.max_inclusive
    }
}

/// Heuristic band boundaries separating trivial covalent distances, ambiguous
/// hydrogen-bond-like restraints, and general distance restraints. Tunable;
/// the distance classifier reads these.
pub const DIST_AMBIG_LOW: f64 = 1.0;
pub const DIST_AMBIG_BND: f64 = 4.0;
pub const DIST_AMBIG_MED: f64 = 6.0;
pub const DIST_AMBIG_UP: f64 = 12.0;

/// Upper bound below which a same-residue heavy-heavy restraint is a covalent
/// bond rather than an NOE.
pub const DIST_COVALENT_UP: f64 = 1.8;

/// Plausibility band for restraint values of the given kind.
pub fn value_range(kind: RestraintKind) -> ValueRange {
    match kind {
        RestraintKind::Dist => ValueRange {
            min_inclusive: 0.0,
            max_inclusive: 150.0,
        },
        RestraintKind::Angle => ValueRange {
            min_inclusive: -360.0,
            max_inclusive: 360.0,
        },
        RestraintKind::Rdc => ValueRange {
            min_inclusive: -100.0,
            max_inclusive: 100.0,
        },
        RestraintKind::Cs => ValueRange {
            min_inclusive: -300.0,
            max_inclusive: 300.0,
        },
        RestraintKind::Csa => ValueRange {
            min_inclusive: -300.0,
            max_inclusive: 300.0,
        },
        RestraintKind::Pcs => ValueRange {
            min_inclusive: -20.0,
            max_inclusive: 20.0,
        },
        RestraintKind::Ccr => ValueRange {
            min_inclusive: -100.0,
            max_inclusive: 100.0,
        },
        RestraintKind::Pre => ValueRange {
            min_inclusive: 0.0,
            max_inclusive: 20000.0,
        },
        RestraintKind::T1T2 => ValueRange {
            min_inclusive: 0.0,
            max_inclusive: 10000.0,
        },
    }
}

/// Plausibility band for uncertainty values of the given kind. Uncertainties
/// are non-negative and bounded by the width of the value band.
pub fn uncertainty_range(kind: RestraintKind) -> ValueRange {
    let range = value_range(kind);
    ValueRange {
        min_inclusive: 0.0,
        max_inclusive: (range.max_inclusive - range.min_inclusive) / 2.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn angle_range_covers_both_sign_conventions() {
        let range = value_range(RestraintKind::Angle);
        assert!(range.contains(-180.0));
        assert!(range.contains(360.0));
        assert!(!range.contains(361.0));
    }

    #[test]
    fn uncertainty_ranges_are_non_negative() {
        for kind in [
            RestraintKind::Dist,
            RestraintKind::Angle,
            RestraintKind::Rdc,
            RestraintKind::Pre,
        ] {
            let range = uncertainty_range(kind);
            assert_eq!(range.min_inclusive, 0.0);
            assert!(range.max_inclusive > 0.0);
        }
    }

    #[test]
    fn ambiguous_band_constants_are_ordered() {
        assert!(DIST_AMBIG_LOW < DIST_AMBIG_BND);
        assert!(DIST_AMBIG_BND < DIST_AMBIG_MED);
        assert!(DIST_AMBIG_MED < DIST_AMBIG_UP);
    }
}
