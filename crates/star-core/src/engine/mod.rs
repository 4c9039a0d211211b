//! Assembly checking and restraint classification.
//!
//! The [`assembly`] module materializes a sequence/entity/atom model of the
//! coordinate file and owns the auth-to-STAR mapping; [`classify`] labels
//! restraint atom tuples (dihedral angle names, RDC vector codes, distance
//! restraint types, potential types) against that model and the reference
//! tables.

pub mod assembly;
pub mod classify;
