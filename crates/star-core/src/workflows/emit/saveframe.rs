//! Saveframe and loop construction.

use crate::core::tables::schema::{
    ContentSubtype, alt_loop_schemas, aux_loop_schemas, loop_schema, saveframe_schema,
};

use super::value::MISSING;

/// One NMR-STAR loop: qualified tag list plus row arrays.
#[derive(Debug, Clone, PartialEq)]
pub struct StarLoop {
    pub category: &'static str,
    pub tags: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl StarLoop {
    pub fn from_schema(
        schema: &'static crate::core::tables::schema::LoopSchema,
        with_ins_code: bool,
    ) -> Self {
        Self {
            category: schema.category,
            tags: schema.tags(with_ins_code),
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        debug_assert_eq!(row.len(), self.tags.len());
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One NMR-STAR saveframe: ordered metadata tags plus its loops.
#[derive(Debug, Clone, PartialEq)]
pub struct Saveframe {
    pub name: String,
    pub category: &'static str,
    /// Qualified (tag, value) pairs in schema order.
    pub tags: Vec<(String, String)>,
    pub loops: Vec<StarLoop>,
}

impl Saveframe {
    /// Value of a bare tag name, if set.
    pub fn tag(&self, name: &str) -> Option<&str> {
        let suffix = format!(".{name}");
        self.tags
            .iter()
            .find(|(tag, _)| tag.ends_with(&suffix))
            .map(|(_, value)| value.as_str())
    }

    pub fn add_loop(&mut self, star_loop: StarLoop) {
        self.loops.push(star_loop);
    }
}

/// Alignment tensor parameters of an RDC/pseudocontact-shift list, with the
/// author-scheme identity of the paramagnetic center.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlignCenter {
    pub magnitude: Option<f64>,
    pub rhombicity: Option<f64>,
    pub auth_asym_id: Option<String>,
    pub auth_seq_id: Option<i64>,
    pub auth_comp_id: Option<String>,
}

/// Everything a saveframe header can be populated from.
#[derive(Debug, Clone, Default)]
pub struct SaveframeInputs<'a> {
    pub framecode: &'a str,
    pub list_id: i64,
    pub entry_id: &'a str,
    pub file_name: Option<&'a str>,
    pub constraint_type: Option<&'a str>,
    pub potential_type: Option<&'a str>,
    /// RDC vector code, stored in Details for RDC lists.
    pub rdc_code: Option<&'a str>,
    pub align_center: Option<&'a AlignCenter>,
    pub details: Option<&'a str>,
    pub num_of_dim: Option<usize>,
    pub spectrum_name: Option<&'a str>,
    pub spectrometer_frequency: Option<f64>,
}

/// Strips converter bookkeeping suffixes from an uploaded file name.
pub fn strip_filename_suffixes(name: &str) -> String {
    let mut stripped = name;
    for marker in ["-ignored-as", "-selected-as"] {
        if let Some(pos) = stripped.find(marker) {
            stripped = &stripped[..pos];
        }
    }
    stripped
        .strip_suffix("-corrected")
        .unwrap_or(stripped)
        .to_string()
}

fn format_opt_f64(value: Option<f64>) -> Option<String> {
    value.map(|v| v.to_string())
}

/// Builds a saveframe header for a content subtype, populating every schema
/// tag from the inputs or its schema default.
pub fn build_saveframe(subtype: ContentSubtype, inputs: &SaveframeInputs<'_>) -> Saveframe {
    let schema = saveframe_schema(subtype);
    let center = inputs.align_center;
    let mut tags = Vec::with_capacity(schema.items.len());

    for item in schema.items {
        let value: Option<String> = match item.name {
            "Sf_category" => Some(schema.category.to_string()),
            "Sf_framecode" => Some(inputs.framecode.to_string()),
            "Entry_ID" => Some(inputs.entry_id.to_string()),
            "ID" => Some(inputs.list_id.to_string()),
            "Data_file_name" => inputs.file_name.map(strip_filename_suffixes),
            "Constraint_type" => inputs.constraint_type.map(str::to_string),
            "Potential_type" => inputs.potential_type.map(str::to_string),
            "Details" => inputs
                .details
                .or(inputs.rdc_code)
                .map(str::to_string),
            "Tensor_magnitude" => format_opt_f64(center.and_then(|c| c.magnitude)),
            "Tensor_rhombicity" => format_opt_f64(center.and_then(|c| c.rhombicity)),
            "Tensor_auth_asym_ID" => center.and_then(|c| c.auth_asym_id.clone()),
            "Tensor_auth_seq_ID" => {
                center.and_then(|c| c.auth_seq_id.map(|seq| seq.to_string()))
            }
            "Tensor_auth_comp_ID" => center.and_then(|c| c.auth_comp_id.clone()),
            "Experiment_name" => inputs.spectrum_name.map(str::to_string),
            "Number_of_spectral_dimensions" => inputs.num_of_dim.map(|n| n.to_string()),
            "Spectrometer_frequency_1H" => format_opt_f64(inputs.spectrometer_frequency),
            _ => None,
        };
        let value = value
            .or_else(|| item.default.map(str::to_string))
            .unwrap_or_else(|| MISSING.to_string());
        tags.push((format!("{}.{}", schema.tag_prefix, item.name), value));
    }

    Saveframe {
        name: inputs.framecode.to_string(),
        category: schema.category,
        tags,
        loops: Vec::new(),
    }
}

/// The primary loop of a subtype, empty.
pub fn loop_for(subtype: ContentSubtype, with_ins_code: bool) -> StarLoop {
    StarLoop::from_schema(loop_schema(subtype), with_ins_code)
}

/// The ordered multi-loop realization of a subtype (spectral peak lists
/// realize four), empty.
pub fn alt_loops_for(subtype: ContentSubtype, with_ins_code: bool) -> Vec<StarLoop> {
    alt_loop_schemas(subtype)
        .iter()
        .map(|schema| StarLoop::from_schema(schema, with_ins_code))
        .collect()
}

/// Auxiliary loops attached to a subtype's saveframe, empty.
pub fn aux_loops_for(subtype: ContentSubtype) -> Vec<StarLoop> {
    aux_loop_schemas(subtype)
        .iter()
        .map(|schema| StarLoop::from_schema(schema, false))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_saveframe_populates_schema_tags_in_order() {
        let inputs = SaveframeInputs {
            framecode: "CYANA_distance_constraints_1",
            list_id: 1,
            entry_id: "NEED_ACC_NO",
            file_name: Some("all_noe.upl"),
            constraint_type: Some("NOE"),
            potential_type: Some("upper-bound-parabolic"),
            ..SaveframeInputs::default()
        };
        let frame = build_saveframe(ContentSubtype::DistRestraint, &inputs);
        assert_eq!(frame.category, "general_distance_constraints");
        assert_eq!(frame.tag("Sf_category"), Some("general_distance_constraints"));
        assert_eq!(frame.tag("Constraint_type"), Some("NOE"));
        assert_eq!(frame.tag("Potential_type"), Some("upper-bound-parabolic"));
        assert_eq!(frame.tag("Data_file_name"), Some("all_noe.upl"));
        assert_eq!(frame.tags[0].0, "_Gen_dist_constraint_list.Sf_category");
    }

    #[test]
    fn potential_type_defaults_to_undefined() {
        let inputs = SaveframeInputs {
            framecode: "dist_1",
            list_id: 1,
            entry_id: "NEED_ACC_NO",
            constraint_type: Some("NOE"),
            ..SaveframeInputs::default()
        };
        let frame = build_saveframe(ContentSubtype::DistRestraint, &inputs);
        assert_eq!(frame.tag("Potential_type"), Some("undefined"));
    }

    #[test]
    fn rdc_code_lands_in_details_with_tensor_tags() {
        let center = AlignCenter {
            magnitude: Some(-9.9),
            rhombicity: Some(0.31),
            auth_asym_id: Some("A".to_string()),
            auth_seq_id: Some(128),
            auth_comp_id: Some("TB".to_string()),
        };
        let inputs = SaveframeInputs {
            framecode: "RDC_constraints_2",
            list_id: 2,
            entry_id: "NEED_ACC_NO",
            rdc_code: Some("RDC_NH"),
            align_center: Some(&center),
            ..SaveframeInputs::default()
        };
        let frame = build_saveframe(ContentSubtype::RdcRestraint, &inputs);
        assert_eq!(frame.tag("Constraint_type"), Some("RDC"));
        assert_eq!(frame.tag("Details"), Some("RDC_NH"));
        assert_eq!(frame.tag("Tensor_magnitude"), Some("-9.9"));
        assert_eq!(frame.tag("Tensor_auth_seq_ID"), Some("128"));
    }

    #[test]
    fn csp_type_defaults_to_paramagnetic_ligand_binding() {
        let inputs = SaveframeInputs {
            framecode: "CSP_1",
            list_id: 1,
            entry_id: "NEED_ACC_NO",
            ..SaveframeInputs::default()
        };
        let frame = build_saveframe(ContentSubtype::CspRestraint, &inputs);
        assert_eq!(frame.tag("Type"), Some("paramagnetic ligand binding"));
    }

    #[test]
    fn auto_relaxation_carries_pre_defaults() {
        let inputs = SaveframeInputs {
            framecode: "PRE_1",
            list_id: 1,
            entry_id: "NEED_ACC_NO",
            ..SaveframeInputs::default()
        };
        let frame = build_saveframe(ContentSubtype::AutoRelaxRestraint, &inputs);
        assert_eq!(
            frame.tag("Common_relaxation_type_name"),
            Some("paramagnetic relaxation enhancement")
        );
        assert_eq!(frame.tag("Relaxation_coherence_type"), Some("S+"));
        assert_eq!(frame.tag("Relaxation_val_units"), Some("s-1"));
        assert_eq!(frame.tag("Rex_units"), Some("s-1"));
    }

    #[test]
    fn bookkeeping_suffixes_are_stripped_from_file_names() {
        assert_eq!(strip_filename_suffixes("noe.upl-corrected"), "noe.upl");
        assert_eq!(
            strip_filename_suffixes("dihed.aco-ignored-as-distance"),
            "dihed.aco"
        );
        assert_eq!(
            strip_filename_suffixes("table.tbl-selected-as-rdc-corrected"),
            "table.tbl"
        );
        assert_eq!(strip_filename_suffixes("plain.mr"), "plain.mr");
    }

    #[test]
    fn spectral_peak_saveframe_and_loops_line_up() {
        let inputs = SaveframeInputs {
            framecode: "spectral_peak_list_1",
            list_id: 1,
            entry_id: "NEED_ACC_NO",
            num_of_dim: Some(3),
            spectrum_name: Some("13C-NOESY"),
            ..SaveframeInputs::default()
        };
        let frame = build_saveframe(ContentSubtype::SpectralPeak, &inputs);
        assert_eq!(frame.tag("Number_of_spectral_dimensions"), Some("3"));
        assert_eq!(frame.tag("Experiment_name"), Some("13C-NOESY"));

        let loops = alt_loops_for(ContentSubtype::SpectralPeak, false);
        assert_eq!(loops.len(), 4);
        assert_eq!(loops[0].category, "_Peak");
        let aux = aux_loops_for(ContentSubtype::SpectralPeak);
        assert_eq!(aux.len(), 2);
        assert_eq!(aux[0].category, "_Spectral_dim");
    }
}
