//! Loop row construction.
//!
//! Every cell position is resolved through the loop schema, never by literal
//! index, so the ins-code layout variants and the per-subtype atom slot
//! counts stay consistent with the tables in [`crate::core::tables::schema`].

use crate::core::models::{RestraintAtom, TargetValues};
use crate::core::tables::isotopes;
use crate::core::tables::schema::{
    ContentSubtype, LoopSchema, alt_loop_schemas, aux_loop_schemas, loop_schema,
};

use super::atom_map::StarAtom;
use super::value::{MISSING, float_positions, normalize_precision};

/// Loop-level constants shared by every row of one list.
#[derive(Debug, Clone, Copy)]
pub struct RowContext<'a> {
    pub subtype: ContentSubtype,
    pub list_id: i64,
    pub entry_id: &'a str,
    /// Select the ins-code layout variant of the loop.
    pub with_ins_code: bool,
}

/// Per-row key cells besides the atoms.
#[derive(Debug, Clone, Copy, Default)]
pub struct RowKeys<'a> {
    pub id: i64,
    pub index_id: Option<i64>,
    pub combination_id: Option<i64>,
    pub member_id: Option<i64>,
    pub member_logic_code: Option<&'a str>,
    /// Torsion angle name, coupling code, or stereo assignment code.
    pub code: Option<&'a str>,
    /// SAXS momentum-transfer key.
    pub q_value: Option<f64>,
}

/// One resolved atom slot: the STAR-scheme atom plus the author-scheme atom
/// it came from, for the auth tail columns.
#[derive(Debug, Clone, PartialEq)]
pub struct RowAtom {
    pub star: StarAtom,
    pub auth: RestraintAtom,
}

struct RowBuilder {
    schema: &'static LoopSchema,
    with_ins_code: bool,
    row: Vec<String>,
}

impl RowBuilder {
    fn new(schema: &'static LoopSchema, with_ins_code: bool) -> Self {
        Self {
            schema,
            with_ins_code,
            row: vec![MISSING.to_string(); schema.width(with_ins_code)],
        }
    }

    fn set<T: ToString>(&mut self, tag: &str, value: T) {
        if let Some(pos) = self.schema.position_of(tag, self.with_ins_code) {
            self.row[pos] = value.to_string();
        }
    }

    fn set_opt<T: ToString>(&mut self, tag: &str, value: Option<T>) {
        if let Some(value) = value {
            self.set(tag, value);
        }
    }

    fn set_atom(&mut self, slot: usize, slots: usize, atom: &RowAtom, star_atom_id: &str) {
        let suffix = if slots <= 1 {
            String::new()
        } else {
            format!("_{}", slot + 1)
        };
        self.set(&format!("Entity_assembly_ID{suffix}"), atom.star.entity_assembly_id);
        self.set(&format!("Entity_ID{suffix}"), atom.star.entity_id);
        self.set(&format!("Comp_index_ID{suffix}"), atom.star.seq_id);
        self.set(&format!("Comp_ID{suffix}"), &atom.star.comp_id);
        self.set(&format!("Atom_ID{suffix}"), star_atom_id);
        self.set(&format!("Auth_asym_ID{suffix}"), &atom.auth.chain_id);
        self.set(&format!("Auth_seq_ID{suffix}"), atom.auth.seq_id);
        self.set(&format!("Auth_comp_ID{suffix}"), &atom.auth.comp_id);
        self.set(&format!("Auth_atom_ID{suffix}"), &atom.auth.atom_id);
        if self.with_ins_code {
            let code = atom
                .auth
                .ins_code
                .map(|c| c.to_string())
                .unwrap_or_else(|| MISSING.to_string());
            self.set(&format!("PDB_ins_code{suffix}"), code);
        }
    }

    fn set_atom_type(&mut self, type_tag: &str, isotope_tag: &str, atom_id: &str) {
        let Some(first) = atom_id.chars().next() else {
            return;
        };
        self.set(type_tag, first.to_ascii_uppercase());
        self.set_opt(isotope_tag, isotopes::default_isotope_number_of(atom_id));
    }

    fn finish(mut self, list_id: i64, entry_id: &str) -> Vec<String> {
        let width = self.row.len();
        self.row[width - 2] = list_id.to_string();
        self.row[width - 1] = entry_id.to_string();
        let floats = float_positions(self.schema, self.with_ins_code);
        normalize_precision(&mut self.row, &floats);
        self.row
    }
}

/// Builds one row of a subtype's primary loop.
///
/// In a single-slot loop an absent first atom is compacted away, so a
/// proton-shift restraint carrying only its second atom still fills the sole
/// atom slot; multi-slot loops are positional and leave absent slots empty.
/// `extras` carries subtype-specific cells (hvycs shift pairs,
/// other-restraint details) as already formatted (tag, value) pairs.
pub fn build_row(
    ctx: &RowContext<'_>,
    keys: &RowKeys<'_>,
    values: &TargetValues,
    atoms: &[Option<RowAtom>],
    extras: &[(&str, String)],
) -> Vec<String> {
    let schema = loop_schema(ctx.subtype);
    let mut builder = RowBuilder::new(schema, ctx.with_ins_code);

    builder.set("ID", keys.id);
    builder.set_opt("Index_ID", keys.index_id);
    builder.set_opt("Combination_ID", keys.combination_id);
    builder.set_opt("Member_ID", keys.member_id);
    builder.set_opt("Member_logic_code", keys.member_logic_code);
    builder.set_opt("Q_value", keys.q_value);
    for tag in [
        "Torsion_angle_name",
        "Code",
        "Stereospecific_assignment_code",
        "Dipolar_coupling_code",
    ] {
        builder.set_opt(tag, keys.code);
    }

    // A single-slot loop compacts: a proton-shift restraint carrying only its
    // second atom still fills the sole slot. Multi-slot loops place each atom
    // at its own slot so a missing middle atom leaves its columns empty
    // instead of shifting later atoms into the wrong key columns.
    let slots = ctx.subtype.atom_slots();
    let placed: Vec<(usize, &RowAtom)> = if slots <= 1 {
        atoms.iter().flatten().take(slots).map(|a| (0, a)).collect()
    } else {
        atoms
            .iter()
            .take(slots)
            .enumerate()
            .filter_map(|(slot, atom)| atom.as_ref().map(|a| (slot, a)))
            .collect()
    };
    for &(slot, atom) in &placed {
        // Floating chirality keeps the author atom id: the stereo assignment
        // is exactly what is still undecided.
        let star_atom_id = if ctx.subtype == ContentSubtype::FchiralRestraint {
            &atom.auth.atom_id
        } else {
            &atom.star.atom_id
        };
        builder.set_atom(slot, slots, atom, star_atom_id);
    }

    let value_cells: [(&str, Option<f64>); 34] = [
        ("Target_value", values.target_value),
        ("Target_value_uncertainty", values.target_value_uncertainty),
        ("Lower_linear_limit", values.lower_linear_limit),
        ("Distance_lower_bound_val", values.lower_limit),
        ("Distance_upper_bound_val", values.upper_limit),
        ("Upper_linear_limit", values.upper_linear_limit),
        ("Angle_target_val", values.target_value),
        ("Angle_target_val_err", values.target_value_uncertainty),
        ("Angle_lower_linear_limit", values.lower_linear_limit),
        ("Angle_lower_bound_val", values.lower_limit),
        ("Angle_upper_bound_val", values.upper_limit),
        ("Angle_upper_linear_limit", values.upper_linear_limit),
        ("RDC_lower_linear_limit", values.lower_linear_limit),
        ("RDC_lower_bound", values.lower_limit),
        ("RDC_upper_bound", values.upper_limit),
        ("RDC_upper_linear_limit", values.upper_linear_limit),
        ("RDC_val", values.target_value),
        ("RDC_val_err", values.target_value_uncertainty),
        ("Val", values.target_value),
        ("Val_err", values.target_value_uncertainty),
        ("Val_min", values.lower_limit),
        ("Val_max", values.upper_limit),
        ("T2_val", values.target_value),
        ("T2_val_err", values.target_value_uncertainty),
        ("T1rho_val", values.target_value),
        ("T1rho_val_err", values.target_value_uncertainty),
        ("Chem_shift_val", values.target_value),
        ("Chem_shift_val_err", values.target_value_uncertainty),
        ("Auto_relaxation_val", values.target_value),
        ("Auto_relaxation_val_err", values.target_value_uncertainty),
        ("Order_param_val", values.target_value),
        ("Intensity_val", values.target_value),
        ("Intensity_val_err", values.target_value_uncertainty),
        ("Weight", values.weight),
    ];
    for (tag, value) in value_cells {
        builder.set_opt(tag, value);
    }

    let atom_at = |slot: usize| {
        placed
            .iter()
            .find(|(s, _)| *s == slot)
            .map(|(_, atom)| *atom)
    };
    if let Some((_, atom)) = placed.first() {
        builder.set_atom_type("Atom_type", "Atom_isotope_number", &atom.star.atom_id);
    }
    match ctx.subtype {
        ContentSubtype::CcrDCsaRestraint => {
            if let Some(atom) = atom_at(0) {
                builder.set_atom_type("Atom_type_1", "Atom_isotope_number_1", &atom.star.atom_id);
            }
            if let Some(atom) = atom_at(1) {
                builder.set_atom_type("Atom_type_2", "Atom_isotope_number_2", &atom.star.atom_id);
            }
        }
        ContentSubtype::CcrDdRestraint => {
            if let Some(atom) = atom_at(0) {
                builder.set_atom_type(
                    "Dipole_1_atom_type_1",
                    "Dipole_1_atom_isotope_number_1",
                    &atom.star.atom_id,
                );
            }
            if let Some(atom) = atom_at(2) {
                builder.set_atom_type(
                    "Dipole_2_atom_type_1",
                    "Dipole_2_atom_isotope_number_1",
                    &atom.star.atom_id,
                );
            }
        }
        _ => {}
    }

    for (tag, value) in extras {
        builder.set(tag, value);
    }

    builder.finish(ctx.list_id, ctx.entry_id)
}

/// Cell values of one assigned chemical shift.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsValues {
    pub value: f64,
    pub value_err: Option<f64>,
    pub figure_of_merit: Option<f64>,
    pub ambiguity_code: Option<i64>,
    pub ambiguity_set_id: Option<i64>,
}

/// Builds one `_Atom_chem_shift` row; atom type and isotope number come from
/// the atom id's first character.
pub fn build_cs_row(ctx: &RowContext<'_>, id: i64, atom: &RowAtom, cs: &CsValues) -> Vec<String> {
    let schema = loop_schema(ContentSubtype::ChemShift);
    let mut builder = RowBuilder::new(schema, ctx.with_ins_code);
    builder.set("ID", id);
    builder.set_atom(0, 1, atom, &atom.star.atom_id);
    builder.set("Seq_ID", atom.star.seq_id);
    builder.set_atom_type("Atom_type", "Atom_isotope_number", &atom.star.atom_id);
    builder.set("Val", cs.value);
    builder.set_opt("Val_err", cs.value_err);
    builder.set_opt("Assign_fig_of_merit", cs.figure_of_merit);
    builder.set_opt("Ambiguity_code", cs.ambiguity_code);
    builder.set_opt("Ambiguity_set_ID", cs.ambiguity_set_id);
    builder.finish(ctx.list_id, ctx.entry_id)
}

/// Intensity cells of one spectral peak.
#[derive(Debug, Clone, Default)]
pub struct PeakValues {
    pub volume: Option<f64>,
    pub volume_uncertainty: Option<f64>,
    pub height: Option<f64>,
    pub height_uncertainty: Option<f64>,
    pub figure_of_merit: Option<f64>,
    pub details: Option<String>,
}

fn peak_schema(index: usize) -> &'static LoopSchema {
    alt_loop_schemas(ContentSubtype::SpectralPeak)[index]
}

/// Builds one `_Peak` row.
pub fn build_pk_row(ctx: &RowContext<'_>, id: i64, peak: &PeakValues) -> Vec<String> {
    let mut builder = RowBuilder::new(peak_schema(0), false);
    builder.set("ID", id);
    builder.set_opt("Volume", peak.volume);
    builder.set_opt("Volume_uncertainty", peak.volume_uncertainty);
    builder.set_opt("Height", peak.height);
    builder.set_opt("Height_uncertainty", peak.height_uncertainty);
    builder.set_opt("Figure_of_merit", peak.figure_of_merit);
    builder.set_opt("Details", peak.details.as_deref());
    builder.finish(ctx.list_id, ctx.entry_id)
}

/// Builds one `_Peak_general_char` row.
pub fn build_pk_general_char_row(
    ctx: &RowContext<'_>,
    peak_id: i64,
    intensity: f64,
    intensity_err: Option<f64>,
    method: Option<&str>,
) -> Vec<String> {
    let mut builder = RowBuilder::new(peak_schema(1), false);
    builder.set("Peak_ID", peak_id);
    builder.set("Intensity_val", intensity);
    builder.set_opt("Intensity_val_err", intensity_err);
    builder.set_opt("Measurement_method", method);
    builder.finish(ctx.list_id, ctx.entry_id)
}

/// Builds one `_Peak_char` row: the position/line-width group of one
/// spectral dimension of one peak.
pub fn build_pk_char_row(
    ctx: &RowContext<'_>,
    peak_id: i64,
    dim_id: i64,
    chem_shift: f64,
    chem_shift_err: Option<f64>,
    line_width: Option<f64>,
    line_width_err: Option<f64>,
) -> Vec<String> {
    let mut builder = RowBuilder::new(peak_schema(2), false);
    builder.set("Peak_ID", peak_id);
    builder.set("Spectral_dim_ID", dim_id);
    builder.set("Chem_shift_val", chem_shift);
    builder.set_opt("Chem_shift_val_err", chem_shift_err);
    builder.set_opt("Line_width_val", line_width);
    builder.set_opt("Line_width_val_err", line_width_err);
    builder.finish(ctx.list_id, ctx.entry_id)
}

/// Builds one `_Assigned_peak_chem_shift` row.
pub fn build_assigned_pk_cs_row(
    ctx: &RowContext<'_>,
    peak_id: i64,
    dim_id: i64,
    set_id: Option<i64>,
    value: Option<f64>,
    atom: Option<&RowAtom>,
    ambiguity_code: Option<i64>,
) -> Vec<String> {
    let mut builder = RowBuilder::new(peak_schema(3), false);
    builder.set("Peak_ID", peak_id);
    builder.set("Spectral_dim_ID", dim_id);
    builder.set_opt("Set_ID", set_id);
    builder.set_opt("Val", value);
    if let Some(atom) = atom {
        builder.set_atom(0, 1, atom, &atom.star.atom_id);
    }
    builder.set_opt("Ambiguity_code", ambiguity_code);
    builder.finish(ctx.list_id, ctx.entry_id)
}

/// One spectral dimension's acquisition metadata.
#[derive(Debug, Clone, Default)]
pub struct SpectralDim {
    pub id: i64,
    pub axis_code: Option<String>,
    pub spectrometer_frequency: Option<f64>,
    pub atom_type: Option<String>,
    pub atom_isotope_number: Option<u16>,
    pub spectral_region: Option<String>,
    pub sweep_width: Option<f64>,
    pub sweep_width_units: Option<String>,
    pub value_first_point: Option<f64>,
    pub absolute_peak_positions: Option<bool>,
    pub acquisition: Option<bool>,
    pub center_frequency_offset: Option<i64>,
    pub under_sampling_type: Option<String>,
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

/// Builds one `_Spectral_dim` row.
pub fn build_spectral_dim_row(ctx: &RowContext<'_>, dim: &SpectralDim) -> Vec<String> {
    let schema = aux_loop_schemas(ContentSubtype::SpectralPeak)[0];
    let mut builder = RowBuilder::new(schema, false);
    builder.set("ID", dim.id);
    builder.set_opt("Axis_code", dim.axis_code.as_deref());
    builder.set_opt("Spectrometer_frequency", dim.spectrometer_frequency);
    builder.set_opt("Atom_type", dim.atom_type.as_deref());
    builder.set_opt("Atom_isotope_number", dim.atom_isotope_number);
    builder.set_opt("Spectral_region", dim.spectral_region.as_deref());
    builder.set_opt("Sweep_width", dim.sweep_width);
    builder.set_opt("Sweep_width_units", dim.sweep_width_units.as_deref());
    builder.set_opt("Value_first_point", dim.value_first_point);
    builder.set_opt(
        "Absolute_peak_positions",
        dim.absolute_peak_positions.map(yes_no),
    );
    builder.set_opt("Acquisition", dim.acquisition.map(yes_no));
    builder.set_opt("Center_frequency_offset", dim.center_frequency_offset);
    builder.set_opt("Under_sampling_type", dim.under_sampling_type.as_deref());
    builder.finish(ctx.list_id, ctx.entry_id)
}

/// Builds one `_Spectral_dim_transfer` row.
pub fn build_spectral_dim_transfer_row(
    ctx: &RowContext<'_>,
    dim_id_1: i64,
    dim_id_2: i64,
    transfer_type: &str,
    indirect: bool,
) -> Vec<String> {
    let schema = aux_loop_schemas(ContentSubtype::SpectralPeak)[1];
    let mut builder = RowBuilder::new(schema, false);
    builder.set("Spectral_dim_ID_1", dim_id_1);
    builder.set("Spectral_dim_ID_2", dim_id_2);
    builder.set("Type", transfer_type);
    builder.set("Indirect", yes_no(indirect));
    builder.finish(ctx.list_id, ctx.entry_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_atom(chain: &str, auth_seq: i64, star_seq: i64, comp: &str, atom: &str) -> RowAtom {
        RowAtom {
            star: StarAtom {
                entity_assembly_id: 1,
                entity_id: 1,
                seq_id: star_seq,
                comp_id: comp.to_string(),
                atom_id: atom.to_string(),
            },
            auth: RestraintAtom::new(chain, auth_seq, comp, atom),
        }
    }

    fn cell(subtype: ContentSubtype, row: &[String], tag: &str, with_ins_code: bool) -> String {
        let pos = loop_schema(subtype)
            .position_of(tag, with_ins_code)
            .unwrap();
        row[pos].clone()
    }

    #[test]
    fn distance_row_fills_keys_bounds_and_terminal_pair() {
        let ctx = RowContext {
            subtype: ContentSubtype::DistRestraint,
            list_id: 1,
            entry_id: "NEED_ACC_NO",
            with_ins_code: false,
        };
        let keys = RowKeys {
            id: 7,
            ..RowKeys::default()
        };
        let values = TargetValues {
            target_value: Some(3.25),
            lower_limit: Some(1.8),
            upper_limit: Some(5.5),
            ..TargetValues::default()
        };
        let atoms = [
            Some(row_atom("A", 23, 23, "ALA", "HB1")),
            Some(row_atom("A", 40, 40, "LEU", "HD11")),
        ];
        let row = build_row(&ctx, &keys, &values, &atoms, &[]);

        let schema = loop_schema(ctx.subtype);
        assert_eq!(row.len(), schema.width(false));
        assert_eq!(row[row.len() - 2], "1");
        assert_eq!(row[row.len() - 1], "NEED_ACC_NO");
        assert_eq!(cell(ctx.subtype, &row, "ID", false), "7");
        assert_eq!(cell(ctx.subtype, &row, "Atom_ID_2", false), "HD11");
        assert_eq!(cell(ctx.subtype, &row, "Auth_seq_ID_1", false), "23");
        // All float cells rounded to the row's maximum effective precision.
        assert_eq!(cell(ctx.subtype, &row, "Target_value", false), "3.25");
        assert_eq!(
            cell(ctx.subtype, &row, "Distance_lower_bound_val", false),
            "1.80"
        );
        assert_eq!(
            cell(ctx.subtype, &row, "Distance_upper_bound_val", false),
            "5.50"
        );
    }

    #[test]
    fn absent_first_atom_compacts_into_the_sole_slot() {
        let ctx = RowContext {
            subtype: ContentSubtype::ProcsRestraint,
            list_id: 3,
            entry_id: "NEED_ACC_NO",
            with_ins_code: false,
        };
        let keys = RowKeys {
            id: 1,
            ..RowKeys::default()
        };
        let values = TargetValues {
            target_value: Some(8.31),
            ..TargetValues::default()
        };
        let atoms = [None, Some(row_atom("A", 15, 15, "GLY", "H"))];
        let row = build_row(&ctx, &keys, &values, &atoms, &[]);
        assert_eq!(cell(ctx.subtype, &row, "Atom_ID", false), "H");
        assert_eq!(cell(ctx.subtype, &row, "Atom_type", false), "H");
        assert_eq!(cell(ctx.subtype, &row, "Atom_isotope_number", false), "1");
        assert_eq!(cell(ctx.subtype, &row, "Chem_shift_val", false), "8.31");
    }

    #[test]
    fn dihedral_row_places_four_atoms_and_ins_codes() {
        let ctx = RowContext {
            subtype: ContentSubtype::DihedRestraint,
            list_id: 2,
            entry_id: "NEED_ACC_NO",
            with_ins_code: true,
        };
        let keys = RowKeys {
            id: 4,
            code: Some("PHI"),
            ..RowKeys::default()
        };
        let mut third = row_atom("A", 15, 15, "LEU", "CA");
        third.auth.ins_code = Some('B');
        let atoms = [
            Some(row_atom("A", 14, 14, "ALA", "C")),
            Some(row_atom("A", 15, 15, "LEU", "N")),
            Some(third),
            Some(row_atom("A", 15, 15, "LEU", "C")),
        ];
        let row = build_row(&ctx, &keys, &TargetValues::default(), &atoms, &[]);
        assert_eq!(cell(ctx.subtype, &row, "Torsion_angle_name", true), "PHI");
        assert_eq!(cell(ctx.subtype, &row, "Comp_ID_4", true), "LEU");
        assert_eq!(cell(ctx.subtype, &row, "PDB_ins_code_3", true), "B");
        assert_eq!(cell(ctx.subtype, &row, "PDB_ins_code_1", true), MISSING);
        let schema = loop_schema(ctx.subtype);
        assert_eq!(row.len(), schema.width(true));
    }

    #[test]
    fn missing_middle_atom_leaves_its_slot_empty() {
        let ctx = RowContext {
            subtype: ContentSubtype::DihedRestraint,
            list_id: 1,
            entry_id: "NEED_ACC_NO",
            with_ins_code: false,
        };
        let keys = RowKeys {
            id: 1,
            code: Some("PSI"),
            ..RowKeys::default()
        };
        let atoms = [
            Some(row_atom("A", 20, 20, "SER", "N")),
            None,
            Some(row_atom("A", 20, 20, "SER", "C")),
            Some(row_atom("A", 21, 21, "THR", "N")),
        ];
        let row = build_row(&ctx, &keys, &TargetValues::default(), &atoms, &[]);
        assert_eq!(cell(ctx.subtype, &row, "Atom_ID_1", false), "N");
        assert_eq!(cell(ctx.subtype, &row, "Atom_ID_2", false), MISSING);
        assert_eq!(cell(ctx.subtype, &row, "Comp_ID_2", false), MISSING);
        // Later atoms stay in their own numbered columns.
        assert_eq!(cell(ctx.subtype, &row, "Atom_ID_3", false), "C");
        assert_eq!(cell(ctx.subtype, &row, "Atom_ID_4", false), "N");
        assert_eq!(cell(ctx.subtype, &row, "Comp_ID_4", false), "THR");
    }

    #[test]
    fn floating_chirality_keeps_the_author_atom_id() {
        let ctx = RowContext {
            subtype: ContentSubtype::FchiralRestraint,
            list_id: 1,
            entry_id: "NEED_ACC_NO",
            with_ins_code: false,
        };
        let keys = RowKeys {
            id: 1,
            code: Some("ambig"),
            ..RowKeys::default()
        };
        let mut atom_1 = row_atom("A", 9, 9, "VAL", "HB2");
        atom_1.auth.atom_id = "QB".to_string();
        let atoms = [Some(atom_1), Some(row_atom("A", 9, 9, "VAL", "HB3"))];
        let row = build_row(&ctx, &keys, &TargetValues::default(), &atoms, &[]);
        assert_eq!(cell(ctx.subtype, &row, "Atom_ID_1", false), "QB");
        assert_eq!(cell(ctx.subtype, &row, "Auth_atom_ID_1", false), "QB");
        assert_eq!(
            cell(ctx.subtype, &row, "Stereospecific_assignment_code", false),
            "ambig"
        );
    }

    #[test]
    fn chem_shift_row_derives_atom_type_and_seq_id() {
        let ctx = RowContext {
            subtype: ContentSubtype::ChemShift,
            list_id: 1,
            entry_id: "NEED_ACC_NO",
            with_ins_code: false,
        };
        let atom = row_atom("A", 32, 32, "LYS", "N");
        let cs = CsValues {
            value: 119.7,
            value_err: Some(0.3),
            ambiguity_code: Some(1),
            ..CsValues::default()
        };
        let row = build_cs_row(&ctx, 11, &atom, &cs);
        assert_eq!(cell(ctx.subtype, &row, "Atom_type", false), "N");
        assert_eq!(cell(ctx.subtype, &row, "Atom_isotope_number", false), "15");
        assert_eq!(
            cell(ctx.subtype, &row, "Seq_ID", false),
            cell(ctx.subtype, &row, "Comp_index_ID", false)
        );
        assert_eq!(cell(ctx.subtype, &row, "Val", false), "119.7");
    }

    #[test]
    fn hvycs_shift_pair_arrives_via_extras() {
        let ctx = RowContext {
            subtype: ContentSubtype::HvycsRestraint,
            list_id: 1,
            entry_id: "NEED_ACC_NO",
            with_ins_code: false,
        };
        let keys = RowKeys {
            id: 1,
            ..RowKeys::default()
        };
        let atoms: Vec<Option<RowAtom>> = ["C", "N", "CA", "CB", "C"]
            .iter()
            .enumerate()
            .map(|(i, name)| Some(row_atom("A", 10 + i as i64 / 4, 10, "ALA", name)))
            .collect();
        let extras = [
            ("CA_chem_shift_val", "54.3".to_string()),
            ("CB_chem_shift_val", "18.1".to_string()),
        ];
        let row = build_row(&ctx, &keys, &TargetValues::default(), &atoms, &extras);
        assert_eq!(cell(ctx.subtype, &row, "CA_chem_shift_val", false), "54.3");
        assert_eq!(cell(ctx.subtype, &row, "Atom_ID_5", false), "C");
    }

    #[test]
    fn spectral_dim_transfer_row_sets_both_dims() {
        let ctx = RowContext {
            subtype: ContentSubtype::SpectralPeak,
            list_id: 1,
            entry_id: "NEED_ACC_NO",
            with_ins_code: false,
        };
        let row = build_spectral_dim_transfer_row(&ctx, 1, 3, "through-space", false);
        let schema = aux_loop_schemas(ContentSubtype::SpectralPeak)[1];
        assert_eq!(row.len(), schema.width(false));
        let pos = schema.position_of("Type", false).unwrap();
        assert_eq!(row[pos], "through-space");
        let pos = schema.position_of("Indirect", false).unwrap();
        assert_eq!(row[pos], "no");
    }

    #[test]
    fn peak_char_row_carries_position_and_line_width() {
        let ctx = RowContext {
            subtype: ContentSubtype::SpectralPeak,
            list_id: 2,
            entry_id: "NEED_ACC_NO",
            with_ins_code: false,
        };
        let row = build_pk_char_row(&ctx, 5, 2, 118.42, None, Some(22.5), None);
        let schema = alt_loop_schemas(ContentSubtype::SpectralPeak)[2];
        let pos = schema.position_of("Chem_shift_val", false).unwrap();
        assert_eq!(row[pos], "118.42");
        let pos = schema.position_of("Line_width_val", false).unwrap();
        assert_eq!(row[pos], "22.50");
        assert_eq!(row[row.len() - 2], "2");
    }
}
