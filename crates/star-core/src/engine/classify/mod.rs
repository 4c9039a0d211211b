//! Restraint classification.
//!
//! Labels restraint atom tuples: the dihedral angle name from four (or five)
//! atoms, the RDC code from a two-atom vector, the distance restraint type
//! from atom selections plus limits and a textual hint, and the potential
//! type from which bounds the target function populates.

pub mod dihedral;
pub mod distance;
pub mod potential;
pub mod rdc;
pub mod shifts;

pub use dihedral::{DihedralAngle, classify_dihedral};
pub use distance::{DistanceType, classify_distance};
pub use potential::{PotentialType, infer_potential};
pub use rdc::{RdcCode, classify_rdc};
pub use shifts::{ChemShiftStats, CsvShiftStats};
