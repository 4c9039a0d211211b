//! Potential type inference from populated bounds.

use crate::core::models::{SourceDialect, TargetValues};
use crate::core::tables::ranges::RestraintKind;

/// The restraint potential implied by which bounds the target function sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PotentialType {
    SquareWellParabolicLinear,
    SquareWellParabolic,
    LowerBoundParabolicLinear,
    LowerBoundParabolic,
    UpperBoundParabolicLinear,
    UpperBoundParabolic,
    LogHarmonic,
    Parabolic,
    Undefined,
}

impl PotentialType {
    pub fn as_str(self) -> &'static str {
        match self {
            PotentialType::SquareWellParabolicLinear => "square-well-parabolic-linear",
            PotentialType::SquareWellParabolic => "square-well-parabolic",
            PotentialType::LowerBoundParabolicLinear => "lower-bound-parabolic-linear",
            PotentialType::LowerBoundParabolic => "lower-bound-parabolic",
            PotentialType::UpperBoundParabolicLinear => "upper-bound-parabolic-linear",
            PotentialType::UpperBoundParabolic => "upper-bound-parabolic",
            PotentialType::LogHarmonic => "log-harmonic",
            PotentialType::Parabolic => "parabolic",
            PotentialType::Undefined => "undefined",
        }
    }
}

/// Infers the potential type of a restraint.
///
/// Log-harmonic is reserved for distance restraints from dialects that can
/// express it; a bare target from any other source is a plain parabolic well.
pub fn infer_potential(
    values: &TargetValues,
    kind: RestraintKind,
    dialect: SourceDialect,
) -> PotentialType {
    let lower = values.lower_limit.is_some();
    let upper = values.upper_limit.is_some();
    let lower_linear = values.lower_linear_limit.is_some();
    let upper_linear = values.upper_linear_limit.is_some();

    match (lower_linear, lower, upper, upper_linear) {
        (true, true, true, true) => PotentialType::SquareWellParabolicLinear,
        (false, true, true, false) => PotentialType::SquareWellParabolic,
        (true, true, false, false) => PotentialType::LowerBoundParabolicLinear,
        (false, true, false, false) => PotentialType::LowerBoundParabolic,
        (false, false, true, true) => PotentialType::UpperBoundParabolicLinear,
        (false, false, true, false) => PotentialType::UpperBoundParabolic,
        (false, false, false, false) if values.target_value.is_some() => {
            if kind == RestraintKind::Dist && dialect.supports_log_harmonic() {
                PotentialType::LogHarmonic
            } else {
                PotentialType::Parabolic
            }
        }
        _ => PotentialType::Undefined,
    }
}
