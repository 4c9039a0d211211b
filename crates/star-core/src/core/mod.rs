//! # Core Module
//!
//! Stateless foundations for NMR restraint normalization: frozen reference data,
//! dictionary interfaces, and pure nomenclature translators.
//!
//! ## Key Components
//!
//! - [`tables`] - Isotope tables, restraint value ranges, the NMR-STAR loop and
//!   saveframe schema, and torsion-angle atom-quadruple templates
//! - [`ccd`] - Chemical Component Dictionary models and the lookup interface
//! - [`cif`] - The row-filtered mmCIF dictionary view consumed by the checker
//! - [`models`] - Restraint atom descriptors and target-value functions shared
//!   by the classifier and the emitter
//! - [`translate`] - Software-specific to canonical atom/residue name translation
//! - [`align`] - Minimal pairwise alignment used by sequence extension and the
//!   atom-name fallback
//! - [`error`] - The non-fatal warning taxonomy and boundary error types

pub mod align;
pub mod ccd;
pub mod cif;
pub mod error;
pub mod models;
pub mod tables;
pub mod translate;
