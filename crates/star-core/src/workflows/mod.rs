//! High-level emission workflows.
//!
//! This layer is what a dialect parser listener drives once its restraints are
//! canonicalized and classified: resolve author-scheme atoms to the STAR
//! scheme, open a saveframe with its loops, and append validated rows.

pub mod emit;
