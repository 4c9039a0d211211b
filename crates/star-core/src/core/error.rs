use thiserror::Error;

/// Non-fatal diagnostics produced while resolving restraint atoms against the
/// coordinate model or validating emitted rows.
///
/// Every variant renders to a human-readable warning string. The core never
/// aborts on any of these; callers decide whether to skip a restraint, emit a
/// placeholder, or surface the message to the depositor.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Warning {
    #[error(
        "Sequence key (chain {chain_id}, seq {seq_id}, comp {comp_id}) is not present in the coordinate assembly"
    )]
    SequenceNotFound {
        chain_id: String,
        seq_id: i64,
        comp_id: String,
    },
    #[error("Atom {atom_id} is not defined in chemical component {comp_id}")]
    AtomNotFound { atom_id: String, comp_id: String },
    #[error(
        "Hydroxyl proton {atom_id} of {comp_id} {seq_id} is not instantiated in the coordinates (ignorable)"
    )]
    IgnorableHydroxyl {
        atom_id: String,
        comp_id: String,
        seq_id: i64,
    },
    #[error(
        "Proton {atom_id} of {comp_id} {seq_id} is not properly instantiated in the coordinates"
    )]
    HydrogenNotInstantiated {
        atom_id: String,
        comp_id: String,
        seq_id: i64,
    },
    #[error("Atom selection {atom_id} of {comp_id} resolves to multiple atoms ({count}) where the restraint type forbids ambiguity")]
    AmbiguousSelection {
        atom_id: String,
        comp_id: String,
        count: usize,
    },
    #[error(
        "Residue name mismatch at (chain {chain_id}, seq {seq_id}): restraint says {restraint_comp_id}, coordinates say {coord_comp_id}"
    )]
    SequenceMismatch {
        chain_id: String,
        seq_id: i64,
        restraint_comp_id: String,
        coord_comp_id: String,
    },
    #[error("Value {value} for tag {tag} is outside the allowed range [{min}, {max}]")]
    ValueOutOfRange {
        tag: String,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("Mandatory tag {tag} has no value")]
    MissingMandatoryTag { tag: String },
    #[error("Value '{value}' for tag {tag} is not one of the allowed enumeration values")]
    EnumViolation { tag: String, value: String },
    #[error("Tag {tag} requires coexisting tag {other} to be set")]
    CoexistenceViolation { tag: String, other: String },
}

/// Errors raised while consuming the mmCIF dictionary view.
///
/// These are caught at the checker boundary; the checker logs them and returns
/// the previous result unchanged rather than propagating.
#[derive(Debug, Error)]
pub enum CifError {
    #[error("Category '{0}' is missing from the dictionary view")]
    MissingCategory(String),
    #[error("Item '{item}' is missing from category '{category}'")]
    MissingItem { category: String, item: String },
    #[error("Malformed value '{value}' for item '{item}': expected {expected}")]
    MalformedValue {
        item: String,
        value: String,
        expected: &'static str,
    },
}

/// Errors raised while loading overridable configuration (bond thresholds,
/// chemical-shift statistics).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("CSV parsing error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
}
