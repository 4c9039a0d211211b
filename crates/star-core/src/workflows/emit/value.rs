//! Cell formatting and schema-driven row validation.

use crate::core::error::Warning;
use crate::core::tables::schema::{ItemType, LoopSchema, TagItem};

/// The NMR-STAR placeholder for an absent value.
pub const MISSING: &str = ".";

/// Whether a validated row survives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowDisposition {
    Keep,
    Drop,
}

fn is_missing(cell: &str) -> bool {
    let trimmed = cell.trim();
    trimmed.is_empty() || trimmed == MISSING || trimmed == "?"
}

/// Digits after the decimal point, ignoring trailing zeros. `None` for cells
/// that are not numeric or carry no decimal point.
fn effective_precision(cell: &str) -> Option<usize> {
    let trimmed = cell.trim();
    if is_missing(trimmed) || trimmed.parse::<f64>().is_err() {
        return None;
    }
    let (_, frac) = trimmed.split_once('.')?;
    Some(frac.trim_end_matches('0').len())
}

/// Column positions whose item type is a float, in row order.
pub fn float_positions(schema: &LoopSchema, with_ins_code: bool) -> Vec<usize> {
    (0..schema.width(with_ins_code))
        .filter(|&pos| {
            schema.item_at(pos, with_ins_code).is_some_and(|item| {
                matches!(
                    item.ty,
                    ItemType::Float | ItemType::PositiveFloat | ItemType::RangeFloat { .. }
                )
            })
        })
        .collect()
}

/// Rounds every float cell of a row to the maximum effective precision found
/// across the row's float cells, so a row's numeric columns read uniformly
/// without silently widening precision.
pub fn normalize_precision(row: &mut [String], float_positions: &[usize]) {
    let Some(digits) = float_positions
        .iter()
        .filter_map(|&pos| effective_precision(&row[pos]))
        .max()
    else {
        return;
    };
    for &pos in float_positions {
        if is_missing(&row[pos]) {
            continue;
        }
        if let Ok(value) = row[pos].trim().parse::<f64>() {
            row[pos] = format!("{value:.digits$}");
        }
    }
}

fn range_of(item: &TagItem) -> Option<(f64, f64)> {
    match item.ty {
        ItemType::RangeFloat { min, max } => Some((min, max)),
        ItemType::PositiveFloat | ItemType::PositiveInt | ItemType::PositiveIntAsStr => {
            Some((0.0, f64::INFINITY))
        }
        _ => None,
    }
}

/// Brings an angular value into `[min, max]` by whole periods, when possible.
/// Turns are tried in increasing magnitude so the smallest fold wins.
fn circular_fold(value: f64, period: f64, min: f64, max: f64) -> Option<f64> {
    for turns in [-1.0, 1.0, -2.0, 2.0] {
        let shifted = value + turns * period;
        if shifted >= min && shifted <= max {
            return Some(shifted);
        }
    }
    None
}

/// Validates one row in place against its loop schema.
///
/// Defaults and `default_from` copies are applied first, then literal-zero
/// voiding, then per-cell policy. Violations on `clear_bad_pattern` items
/// blank the offending cell; violations on `remove_bad_pattern` items drop
/// the whole row. All findings come back as [`Warning`] values.
pub fn validate_row(
    schema: &LoopSchema,
    row: &mut [String],
    with_ins_code: bool,
) -> (RowDisposition, Vec<Warning>) {
    let mut warnings = Vec::new();
    let mut disposition = RowDisposition::Keep;
    let width = schema.width(with_ins_code).min(row.len());

    let cell_of = |row: &[String], name: &str| -> Option<String> {
        schema
            .position_of(name, with_ins_code)
            .and_then(|pos| row.get(pos).cloned())
            .filter(|cell| !is_missing(cell))
    };

    for pos in 0..width {
        let Some(item) = schema.item_at(pos, with_ins_code) else {
            continue;
        };

        if is_missing(&row[pos]) {
            if let Some(from) = item.default_from
                && let Some(value) = cell_of(row, from)
            {
                row[pos] = value;
            } else if let Some(default) = item.default {
                row[pos] = default.to_string();
            }
        }
        if item.void_zero && row[pos].trim() == "0" {
            row[pos] = MISSING.to_string();
        }

        if is_missing(&row[pos]) {
            if item.mandatory {
                warnings.push(Warning::MissingMandatoryTag {
                    tag: item.name.to_string(),
                });
            } else if !item.member_with.is_empty()
                && !item.member_with.iter().any(|tag| cell_of(row, tag).is_some())
            {
                // None of the mutually substitutable tags is present either.
                warnings.push(Warning::MissingMandatoryTag {
                    tag: item.name.to_string(),
                });
            }
            continue;
        }

        for other in item.coexist_with {
            if cell_of(row, other).is_none() {
                warnings.push(Warning::CoexistenceViolation {
                    tag: item.name.to_string(),
                    other: other.to_string(),
                });
            }
        }

        let mut bad = false;
        match item.ty {
            ItemType::Enum(allowed) => {
                if !allowed.contains(&row[pos].trim()) {
                    warnings.push(Warning::EnumViolation {
                        tag: item.name.to_string(),
                        value: row[pos].clone(),
                    });
                    bad = true;
                }
            }
            ItemType::EnumInt(allowed) => {
                let ok = row[pos]
                    .trim()
                    .parse::<i64>()
                    .is_ok_and(|value| allowed.contains(&value));
                if !ok {
                    warnings.push(Warning::EnumViolation {
                        tag: item.name.to_string(),
                        value: row[pos].clone(),
                    });
                    bad = true;
                }
            }
            _ => {
                if let Some((min, max)) = range_of(item)
                    && let Ok(mut value) = row[pos].trim().parse::<f64>()
                {
                    if (value < min || value > max)
                        && let Some(period) = item.circular_shift
                        && let Some(folded) = circular_fold(value, period, min, max)
                    {
                        value = folded;
                        row[pos] = format!("{folded}");
                    }
                    if value < min || value > max {
                        warnings.push(Warning::ValueOutOfRange {
                            tag: item.name.to_string(),
                            value,
                            min,
                            max,
                        });
                        bad = true;
                    }
                }
            }
        }

        if bad {
            if item.remove_bad_pattern {
                disposition = RowDisposition::Drop;
            } else if item.clear_bad_pattern {
                row[pos] = MISSING.to_string();
            }
        }

        if let Some(other) = item.smaller_than
            && let (Ok(this), Some(that)) = (
                row[pos].trim().parse::<f64>(),
                cell_of(row, other).and_then(|cell| cell.trim().parse::<f64>().ok()),
            )
            && this > that
        {
            warnings.push(Warning::ValueOutOfRange {
                tag: item.name.to_string(),
                value: this,
                min: f64::NEG_INFINITY,
                max: that,
            });
        }

        if let Some(other) = item.larger_than
            && let (Ok(this), Some(that)) = (
                row[pos].trim().parse::<f64>(),
                cell_of(row, other).and_then(|cell| cell.trim().parse::<f64>().ok()),
            )
            && this < that
        {
            warnings.push(Warning::ValueOutOfRange {
                tag: item.name.to_string(),
                value: this,
                min: that,
                max: f64::INFINITY,
            });
        }
    }

    (disposition, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tables::schema::{ContentSubtype, loop_schema};

    fn blank_row(schema: &LoopSchema, with_ins_code: bool) -> Vec<String> {
        vec![MISSING.to_string(); schema.width(with_ins_code)]
    }

    fn set(schema: &LoopSchema, row: &mut [String], tag: &str, value: &str) {
        let pos = schema.position_of(tag, false).unwrap();
        row[pos] = value.to_string();
    }

    #[test]
    fn precision_widens_to_the_most_precise_cell() {
        let mut row = vec![
            "2.5".to_string(),
            "3.25".to_string(),
            "10".to_string(),
            "A".to_string(),
        ];
        normalize_precision(&mut row, &[0, 1, 2]);
        assert_eq!(row, ["2.50", "3.25", "10.00", "A"]);
    }

    #[test]
    fn trailing_zeros_do_not_widen_precision() {
        let mut row = vec!["2.500".to_string(), "3.2".to_string()];
        normalize_precision(&mut row, &[0, 1]);
        assert_eq!(row, ["2.5", "3.2"]);
    }

    #[test]
    fn missing_cells_survive_normalization() {
        let mut row = vec![MISSING.to_string(), "1.25".to_string()];
        normalize_precision(&mut row, &[0, 1]);
        assert_eq!(row[0], MISSING);
        assert_eq!(row[1], "1.25");
    }

    #[test]
    fn out_of_range_target_value_is_cleared() {
        let schema = loop_schema(ContentSubtype::DistRestraint);
        let mut row = blank_row(schema, false);
        set(schema, &mut row, "Target_value", "500.0");
        set(schema, &mut row, "Distance_upper_bound_val", "5.5");
        let (disposition, warnings) = validate_row(schema, &mut row, false);
        assert_eq!(disposition, RowDisposition::Keep);
        assert!(warnings
            .iter()
            .any(|w| matches!(w, Warning::ValueOutOfRange { tag, .. } if tag == "Target_value")));
        let pos = schema.position_of("Target_value", false).unwrap();
        assert_eq!(row[pos], MISSING);
    }

    #[test]
    fn out_of_range_chem_shift_drops_the_row() {
        let schema = loop_schema(ContentSubtype::ChemShift);
        let mut row = blank_row(schema, false);
        set(schema, &mut row, "Val", "1200.0");
        let (disposition, _) = validate_row(schema, &mut row, false);
        assert_eq!(disposition, RowDisposition::Drop);
    }

    #[test]
    fn angles_fold_back_into_range_by_whole_turns() {
        let schema = loop_schema(ContentSubtype::DihedRestraint);
        let mut row = blank_row(schema, false);
        set(schema, &mut row, "Angle_target_val", "400.0");
        let (_, warnings) = validate_row(schema, &mut row, false);
        assert!(!warnings
            .iter()
            .any(|w| matches!(w, Warning::ValueOutOfRange { .. })));
        let pos = schema.position_of("Angle_target_val", false).unwrap();
        assert_eq!(row[pos], "40");

        let mut row = blank_row(schema, false);
        set(schema, &mut row, "Angle_target_val", "-400.0");
        validate_row(schema, &mut row, false);
        assert_eq!(row[pos], "-40");
    }

    #[test]
    fn upper_linear_limit_below_upper_bound_is_reported() {
        let schema = loop_schema(ContentSubtype::DistRestraint);
        let mut row = blank_row(schema, false);
        set(schema, &mut row, "Distance_upper_bound_val", "5.5");
        set(schema, &mut row, "Upper_linear_limit", "4.0");
        let (disposition, warnings) = validate_row(schema, &mut row, false);
        assert_eq!(disposition, RowDisposition::Keep);
        assert!(warnings.iter().any(|w| matches!(
            w,
            Warning::ValueOutOfRange { tag, min, .. }
                if tag == "Upper_linear_limit" && *min == 5.5
        )));
    }

    #[test]
    fn uncertainty_without_value_is_a_coexistence_violation() {
        let schema = loop_schema(ContentSubtype::DistRestraint);
        let mut row = blank_row(schema, false);
        set(schema, &mut row, "Target_value_uncertainty", "0.2");
        set(schema, &mut row, "Distance_upper_bound_val", "5.5");
        let (_, warnings) = validate_row(schema, &mut row, false);
        assert!(warnings.iter().any(|w| matches!(
            w,
            Warning::CoexistenceViolation { tag, other }
                if tag == "Target_value_uncertainty" && other == "Target_value"
        )));
    }

    #[test]
    fn literal_zero_member_id_is_voided() {
        let schema = loop_schema(ContentSubtype::DistRestraint);
        let mut row = blank_row(schema, false);
        set(schema, &mut row, "Member_ID", "0");
        set(schema, &mut row, "Distance_upper_bound_val", "5.5");
        validate_row(schema, &mut row, false);
        let pos = schema.position_of("Member_ID", false).unwrap();
        assert_eq!(row[pos], MISSING);
    }

    #[test]
    fn defaults_fill_missing_cells() {
        let schema = loop_schema(ContentSubtype::DistRestraint);
        let mut row = blank_row(schema, false);
        set(schema, &mut row, "Distance_upper_bound_val", "5.5");
        validate_row(schema, &mut row, false);
        let pos = schema.position_of("Weight", false).unwrap();
        assert_eq!(row[pos], "1.0");
        let code = schema.position_of("Member_logic_code", false).unwrap();
        assert_eq!(row[code], MISSING);
    }

    #[test]
    fn seq_id_defaults_from_comp_index_id() {
        let schema = loop_schema(ContentSubtype::ChemShift);
        let mut row = blank_row(schema, false);
        set(schema, &mut row, "Comp_index_ID", "17");
        set(schema, &mut row, "Val", "8.2");
        validate_row(schema, &mut row, false);
        let pos = schema.position_of("Seq_ID", false).unwrap();
        assert_eq!(row[pos], "17");
    }
}
