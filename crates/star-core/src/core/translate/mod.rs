//! Software-specific to canonical nomenclature translation.
//!
//! All translators are pure with respect to their inputs and never fail: when
//! no rule produces a name present in the reference atom list, the original
//! input is returned and classification of "unrecognized" stays with the
//! caller.

pub mod atom;
pub mod cache;
pub mod dmpc;
pub mod residue;

pub use atom::{AtomNameTranslator, translate_atom_name};
pub use dmpc::translate_dmpc_atom;
pub use residue::translate_comp_id;
