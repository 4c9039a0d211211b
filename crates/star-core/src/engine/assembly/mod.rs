//! The coordinate assembly checker.
//!
//! Given an mmCIF dictionary view, a representative model/alt id, and a CCD
//! service, the checker builds polymer/non-polymer/branched sequences, a
//! coordinate atom-site index, bidirectional label/auth sequence maps, the
//! auth-to-STAR entity mapping, inferred component topology, and the
//! unobserved residue/atom lists. Results are incremental: a previous
//! [`model::AssemblyResult`] can be passed back in and only absent parts are
//! recomputed.

pub mod atom_site;
pub mod checker;
pub mod extension;
pub mod linkage;
pub mod mapping;
pub mod model;
pub mod nonpoly;
pub mod polymer;
pub mod topology;
pub mod unobserved;

pub use checker::AssemblyChecker;
pub use model::{AssemblyResult, SeqKey, StarSeq};
pub use topology::TopologyConfig;
