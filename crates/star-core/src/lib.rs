//! # nmrstarify Core Library
//!
//! A library for normalizing heterogeneous NMR magnetic-restraint and peak-list
//! data into the canonical NMR-STAR tabular representation, cross-validated
//! against a deposited macromolecular coordinate file (mmCIF).
//!
//! ## Architectural Philosophy
//!
//! The library is designed with a strict three-layer architecture to ensure a clear
//! separation of concerns, making it modular, testable, and extensible.
//!
//! - **[`core`]: The Foundation.** Frozen reference tables (isotopes, value ranges,
//!   the NMR-STAR loop/saveframe schema, torsion-angle templates), the chemical
//!   component dictionary interface, the mmCIF dictionary-view seam, and the pure
//!   atom/residue nomenclature translators.
//!
//! - **[`engine`]: The Logic Core.** The stateful layer that materializes a
//!   sequence/entity/atom model of the biomolecular assembly from coordinates
//!   (`AssemblyChecker`, with incremental re-evaluation), and classifies restraint
//!   atom tuples into geometric types (dihedral names, RDC codes, distance
//!   restraint types, potential types).
//!
//! - **[`workflows`]: The Public API.** The emitter layer a parser listener calls:
//!   it resolves author-scheme atoms through the assembly model, builds NMR-STAR
//!   saveframes and loops, and appends fully populated restraint rows with
//!   schema-driven validation.
//!
//! The intended data flow is: an external dialect parser canonicalizes names via
//! [`core::translate`], resolves sequence keys via [`engine::assembly`], labels the
//! tuple via [`engine::classify`], and hands the result to [`workflows::emit`] to
//! produce NMR-STAR rows.

pub mod core;
pub mod engine;
pub mod workflows;
