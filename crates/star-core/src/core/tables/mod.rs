//! Frozen, process-lifetime reference data.
//!
//! Everything in this module is immutable static data compiled into the
//! library: isotope/nucleus tables, allowed ambiguity codes, per-kind value
//! ranges, the NMR-STAR saveframe/loop schema, and torsion-angle
//! atom-quadruple templates.

pub mod isotopes;
pub mod ranges;
pub mod schema;
pub mod torsions;
