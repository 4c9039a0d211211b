//! The NMR-STAR saveframe/loop schema.
//!
//! One [`LoopSchema`] per content subtype is the single source of truth for
//! row layout: key items first, tag-ordered data items next, optional PDB
//! insertion-code items, and the terminal (list id, entry id) pair. The
//! emitter derives row width, tag lists, and per-cell validation policy from
//! these tables; positional indexing elsewhere in the library is always
//! resolved through them.

/// Value type and validation policy of one loop or saveframe tag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ItemType {
    Str,
    Int,
    PositiveInt,
    /// Positive integer serialized as a string cell (pointer-style ids).
    PositiveIntAsStr,
    /// Dense 1-based index column.
    IndexInt,
    Enum(&'static [&'static str]),
    EnumInt(&'static [i64]),
    Float,
    PositiveFloat,
    RangeFloat { min: f64, max: f64 },
    /// Foreign key into a parent loop's index column.
    PointerIndex,
    Bool,
}

/// One tag of a loop or saveframe, with its validation policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TagItem {
    pub name: &'static str,
    pub ty: ItemType,
    pub mandatory: bool,
    /// Mandatory only when any member of its group is present.
    pub group_mandatory: bool,
    pub default: Option<&'static str>,
    /// Tag whose value fills this cell when absent.
    pub default_from: Option<&'static str>,
    /// A literal zero is treated as a missing value.
    pub void_zero: bool,
    /// Out-of-policy cells are cleared to '.' instead of rejecting the row.
    pub clear_bad_pattern: bool,
    /// Out-of-policy cells cause the whole row to be dropped.
    pub remove_bad_pattern: bool,
    /// Angular values are compared modulo this period.
    pub circular_shift: Option<f64>,
    /// At least one member of this tag set must coexist with this tag.
    pub member_with: &'static [&'static str],
    /// Tags that must be present whenever this tag is present.
    pub coexist_with: &'static [&'static str],
    pub smaller_than: Option<&'static str>,
    pub larger_than: Option<&'static str>,
}

impl TagItem {
    pub const fn new(name: &'static str, ty: ItemType) -> Self {
        Self {
            name,
            ty,
            mandatory: false,
            group_mandatory: false,
            default: None,
            default_from: None,
            void_zero: false,
            clear_bad_pattern: false,
            remove_bad_pattern: false,
            circular_shift: None,
            member_with: &[],
            coexist_with: &[],
            smaller_than: None,
            larger_than: None,
        }
    }

    pub const fn req(mut self) -> Self {
        self.mandatory = true;
        self
    }

    pub const fn grp(mut self) -> Self {
        self.group_mandatory = true;
        self
    }

    pub const fn dflt(mut self, value: &'static str) -> Self {
        self.default = Some(value);
        self
    }

    pub const fn dflt_from(mut self, tag: &'static str) -> Self {
        self.default_from = Some(tag);
        self
    }

    pub const fn void_zero(mut self) -> Self {
        self.void_zero = true;
        self
    }

    pub const fn clear_bad(mut self) -> Self {
        self.clear_bad_pattern = true;
        self
    }

    pub const fn remove_bad(mut self) -> Self {
        self.remove_bad_pattern = true;
        self
    }

    pub const fn circular(mut self, period: f64) -> Self {
        self.circular_shift = Some(period);
        self
    }

    pub const fn member_with(mut self, tags: &'static [&'static str]) -> Self {
        self.member_with = tags;
        self
    }

    pub const fn coexist_with(mut self, tags: &'static [&'static str]) -> Self {
        self.coexist_with = tags;
        self
    }

    pub const fn smaller_than(mut self, tag: &'static str) -> Self {
        self.smaller_than = Some(tag);
        self
    }

    pub const fn larger_than(mut self, tag: &'static str) -> Self {
        self.larger_than = Some(tag);
        self
    }
}

const fn s(name: &'static str) -> TagItem {
    TagItem::new(name, ItemType::Str)
}

const fn int(name: &'static str) -> TagItem {
    TagItem::new(name, ItemType::Int)
}

const fn pint(name: &'static str) -> TagItem {
    TagItem::new(name, ItemType::PositiveInt)
}

const fn pint_str(name: &'static str) -> TagItem {
    TagItem::new(name, ItemType::PositiveIntAsStr)
}

const fn idx(name: &'static str) -> TagItem {
    TagItem::new(name, ItemType::IndexInt)
}

const fn flt(name: &'static str) -> TagItem {
    TagItem::new(name, ItemType::Float)
}

const fn pflt(name: &'static str) -> TagItem {
    TagItem::new(name, ItemType::PositiveFloat)
}

const fn rflt(name: &'static str, min: f64, max: f64) -> TagItem {
    TagItem::new(name, ItemType::RangeFloat { min, max })
}

const fn enm(name: &'static str, values: &'static [&'static str]) -> TagItem {
    TagItem::new(name, ItemType::Enum(values))
}

const fn eint(name: &'static str, values: &'static [i64]) -> TagItem {
    TagItem::new(name, ItemType::EnumInt(values))
}

const fn ptr(name: &'static str) -> TagItem {
    TagItem::new(name, ItemType::PointerIndex)
}

/// Every restraint/data content subtype with its own loop realization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContentSubtype {
    DistRestraint,
    DihedRestraint,
    RdcRestraint,
    NoepkRestraint,
    JcoupRestraint,
    RdcRawData,
    CsaRestraint,
    DdcRestraint,
    HvycsRestraint,
    ProcsRestraint,
    CspRestraint,
    AutoRelaxRestraint,
    HeteronuclNoeData,
    HeteronuclT1Data,
    HeteronuclT2Data,
    HeteronuclT1rData,
    OrderParamData,
    PhTitrData,
    PhParamData,
    CouplingConstData,
    CcrDCsaRestraint,
    CcrDdRestraint,
    FchiralRestraint,
    SaxsRestraint,
    OtherRestraint,
    SpectralPeak,
    ChemShift,
}

impl ContentSubtype {
    /// Stable key used by the list-id counter and reserved-id maps.
    pub fn key(self) -> &'static str {
        match self {
            ContentSubtype::DistRestraint => "dist_restraint",
            ContentSubtype::DihedRestraint => "dihed_restraint",
            ContentSubtype::RdcRestraint => "rdc_restraint",
            ContentSubtype::NoepkRestraint => "noepk_restraint",
            ContentSubtype::JcoupRestraint => "jcoup_restraint",
            ContentSubtype::RdcRawData => "rdc_raw_data",
            ContentSubtype::CsaRestraint => "csa_restraint",
            ContentSubtype::DdcRestraint => "ddc_restraint",
            ContentSubtype::HvycsRestraint => "hvycs_restraint",
            ContentSubtype::ProcsRestraint => "procs_restraint",
            ContentSubtype::CspRestraint => "csp_restraint",
            ContentSubtype::AutoRelaxRestraint => "auto_relax_restraint",
            ContentSubtype::HeteronuclNoeData => "heteronucl_noe_data",
            ContentSubtype::HeteronuclT1Data => "heteronucl_t1_data",
            ContentSubtype::HeteronuclT2Data => "heteronucl_t2_data",
            ContentSubtype::HeteronuclT1rData => "heteronucl_t1r_data",
            ContentSubtype::OrderParamData => "order_param_data",
            ContentSubtype::PhTitrData => "ph_titr_data",
            ContentSubtype::PhParamData => "ph_param_data",
            ContentSubtype::CouplingConstData => "coupling_const_data",
            ContentSubtype::CcrDCsaRestraint => "ccr_d_csa_restraint",
            ContentSubtype::CcrDdRestraint => "ccr_dd_restraint",
            ContentSubtype::FchiralRestraint => "fchiral_restraint",
            ContentSubtype::SaxsRestraint => "saxs_restraint",
            ContentSubtype::OtherRestraint => "other_restraint",
            ContentSubtype::SpectralPeak => "spectral_peak",
            ContentSubtype::ChemShift => "chem_shift",
        }
    }

    /// Number of atom-column groups in the primary loop of this subtype.
    pub fn atom_slots(self) -> usize {
        match self {
            ContentSubtype::DihedRestraint => 4,
            ContentSubtype::HvycsRestraint => 5,
            ContentSubtype::CcrDCsaRestraint | ContentSubtype::CcrDdRestraint => 4,
            ContentSubtype::CsaRestraint
            | ContentSubtype::ProcsRestraint
            | ContentSubtype::CspRestraint
            | ContentSubtype::AutoRelaxRestraint
            | ContentSubtype::HeteronuclT1Data
            | ContentSubtype::HeteronuclT2Data
            | ContentSubtype::HeteronuclT1rData
            | ContentSubtype::OrderParamData
            | ContentSubtype::PhTitrData
            | ContentSubtype::PhParamData
            | ContentSubtype::ChemShift => 1,
            ContentSubtype::SaxsRestraint | ContentSubtype::OtherRestraint => 0,
            ContentSubtype::SpectralPeak => 0,
            _ => 2,
        }
    }
}

/// Schema of one loop: key items, tag-ordered data items, optional insertion
/// code items appended before the terminal (list id, entry id) pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopSchema {
    /// Loop category, e.g. `_Gen_dist_constraint`.
    pub category: &'static str,
    pub key_items: &'static [TagItem],
    pub data_items: &'static [TagItem],
    /// Present only on subtypes with an insertion-code extension.
    pub ins_code_items: &'static [TagItem],
    /// Name of the parent list id tag (second to last column).
    pub list_id_tag: &'static str,
    /// Name of the entry id tag (last column).
    pub entry_id_tag: &'static str,
}

impl LoopSchema {
    /// Row width: |key items| + |data items| (+ ins-code items) + the
    /// terminal (list id, entry id) pair.
    pub fn width(&self, with_ins_code: bool) -> usize {
        let ins = if with_ins_code {
            self.ins_code_items.len()
        } else {
            0
        };
        self.key_items.len() + self.data_items.len() + ins + 2
    }

    /// Fully qualified tag list, `<category>.<name>` per cell, in row order.
    pub fn tags(&self, with_ins_code: bool) -> Vec<String> {
        let mut tags: Vec<String> = Vec::with_capacity(self.width(with_ins_code));
        for item in self.key_items.iter().chain(self.data_items.iter()) {
            tags.push(format!("{}.{}", self.category, item.name));
        }
        if with_ins_code {
            for item in self.ins_code_items {
                tags.push(format!("{}.{}", self.category, item.name));
            }
        }
        tags.push(format!("{}.{}", self.category, self.list_id_tag));
        tags.push(format!("{}.{}", self.category, self.entry_id_tag));
        tags
    }

    /// Column position of a bare tag name, honoring the ins-code layout.
    pub fn position_of(&self, name: &str, with_ins_code: bool) -> Option<usize> {
        let mut pos = 0usize;
        for item in self.key_items.iter().chain(self.data_items.iter()) {
            if item.name == name {
                return Some(pos);
            }
            pos += 1;
        }
        if with_ins_code {
            for item in self.ins_code_items {
                if item.name == name {
                    return Some(pos);
                }
                pos += 1;
            }
        }
        if name == self.list_id_tag {
            return Some(pos);
        }
        if name == self.entry_id_tag {
            return Some(pos + 1);
        }
        None
    }

    /// The validation item at a column position, if the column carries one
    /// (the terminal pair is always a positive int and an entry id string).
    pub fn item_at(&self, pos: usize, with_ins_code: bool) -> Option<&'static TagItem> {
        let keys = self.key_items.len();
        let data = self.data_items.len();
        if pos < keys {
            return Some(&self.key_items[pos]);
        }
        if pos < keys + data {
            return Some(&self.data_items[pos - keys]);
        }
        if with_ins_code && pos < keys + data + self.ins_code_items.len() {
            return Some(&self.ins_code_items[pos - keys - data]);
        }
        None
    }
}

/// Schema of one saveframe: category, tag prefix, and the ordered metadata
/// tag items the emitter populates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SaveframeSchema {
    /// Saveframe category value, e.g. `general_distance_constraints`.
    pub category: &'static str,
    /// Tag prefix, e.g. `_Gen_dist_constraint_list`.
    pub tag_prefix: &'static str,
    pub items: &'static [TagItem],
}

pub const POTENTIAL_TYPES: &[&str] = &[
    "log-harmonic",
    "parabolic",
    "square-well-parabolic",
    "square-well-parabolic-linear",
    "upper-bound-parabolic",
    "lower-bound-parabolic",
    "upper-bound-parabolic-linear",
    "lower-bound-parabolic-linear",
    "undefined",
];

pub const DIST_CONSTRAINT_TYPES: &[&str] = &[
    "NOE",
    "NOE build-up",
    "NOE not seen",
    "ROE",
    "hydrogen bond",
    "disulfide bond",
    "diselenide bond",
    "metal coordination",
    "chemical shift perturbation",
    "paramagnetic relaxation",
    "photo cidnp",
    "symmetry",
    "mutation",
    "protection",
    "general distance",
];

pub const MEMBER_LOGIC_CODES: &[&str] = &["OR", "AND", "."];

const ANGLE_MIN: f64 = -360.0;
const ANGLE_MAX: f64 = 360.0;

static DIST_SF_ITEMS: &[TagItem] = &[
    s("Sf_category").req(),
    s("Sf_framecode").req(),
    s("Entry_ID").req(),
    pint("ID").req(),
    s("Data_file_name"),
    enm("Constraint_type", DIST_CONSTRAINT_TYPES).req(),
    enm("Potential_type", POTENTIAL_TYPES).dflt("undefined"),
    s("Details"),
];

static DIHED_SF_ITEMS: &[TagItem] = &[
    s("Sf_category").req(),
    s("Sf_framecode").req(),
    s("Entry_ID").req(),
    pint("ID").req(),
    s("Data_file_name"),
    s("Constraint_type").dflt("backbone chemical shifts"),
    enm("Potential_type", POTENTIAL_TYPES).dflt("undefined"),
    s("Details"),
];

static RDC_SF_ITEMS: &[TagItem] = &[
    s("Sf_category").req(),
    s("Sf_framecode").req(),
    s("Entry_ID").req(),
    pint("ID").req(),
    s("Data_file_name"),
    s("Constraint_type").dflt("RDC"),
    enm("Potential_type", POTENTIAL_TYPES).dflt("undefined"),
    flt("Tensor_magnitude"),
    rflt("Tensor_rhombicity", 0.0, 1.0),
    s("Tensor_auth_asym_ID"),
    s("Tensor_auth_seq_ID"),
    s("Tensor_auth_comp_ID"),
    s("Details"),
];

static PEAK_SF_ITEMS: &[TagItem] = &[
    s("Sf_category").req(),
    s("Sf_framecode").req(),
    s("Entry_ID").req(),
    pint("ID").req(),
    s("Data_file_name"),
    s("Experiment_name"),
    eint("Number_of_spectral_dimensions", &[1, 2, 3, 4, 5, 6]).req(),
    s("Chemical_shift_list"),
    s("Details"),
];

static CSP_SF_ITEMS: &[TagItem] = &[
    s("Sf_category").req(),
    s("Sf_framecode").req(),
    s("Entry_ID").req(),
    pint("ID").req(),
    s("Data_file_name"),
    s("Type").dflt("paramagnetic ligand binding"),
    s("Details"),
];

static AUTO_RELAX_SF_ITEMS: &[TagItem] = &[
    s("Sf_category").req(),
    s("Sf_framecode").req(),
    s("Entry_ID").req(),
    pint("ID").req(),
    s("Data_file_name"),
    s("Common_relaxation_type_name").dflt("paramagnetic relaxation enhancement"),
    s("Relaxation_coherence_type").dflt("S+"),
    s("Relaxation_val_units").dflt("s-1"),
    s("Rex_units").dflt("s-1"),
    pflt("Spectrometer_frequency_1H"),
    s("Details"),
];

static FREQ_SF_ITEMS: &[TagItem] = &[
    s("Sf_category").req(),
    s("Sf_framecode").req(),
    s("Entry_ID").req(),
    pint("ID").req(),
    s("Data_file_name"),
    pflt("Spectrometer_frequency_1H"),
    s("Details"),
];

static PLAIN_SF_ITEMS: &[TagItem] = &[
    s("Sf_category").req(),
    s("Sf_framecode").req(),
    s("Entry_ID").req(),
    pint("ID").req(),
    s("Data_file_name"),
    s("Details"),
];

// Atom key columns. Each atom slot occupies five cells:
// entity assembly id, entity id, entity-local seq id, comp id, atom id.

static DIST_KEY_ITEMS: &[TagItem] = &[
    idx("ID").req(),
    pint("Combination_ID").void_zero(),
    pint("Member_ID").void_zero(),
    enm("Member_logic_code", MEMBER_LOGIC_CODES).dflt("."),
    pint_str("Entity_assembly_ID_1").req(),
    int("Entity_ID_1"),
    idx("Comp_index_ID_1").req(),
    s("Comp_ID_1").req(),
    s("Atom_ID_1").req(),
    pint_str("Entity_assembly_ID_2").req(),
    int("Entity_ID_2"),
    idx("Comp_index_ID_2").req(),
    s("Comp_ID_2").req(),
    s("Atom_ID_2").req(),
];

static DIST_DATA_ITEMS: &[TagItem] = &[
    rflt("Target_value", 0.0, 150.0)
        .member_with(&["Distance_lower_bound_val", "Distance_upper_bound_val"])
        .clear_bad(),
    pflt("Target_value_uncertainty").coexist_with(&["Target_value"]),
    rflt("Lower_linear_limit", 0.0, 150.0).smaller_than("Distance_lower_bound_val"),
    rflt("Distance_lower_bound_val", 0.0, 150.0).smaller_than("Distance_upper_bound_val"),
    rflt("Distance_upper_bound_val", 0.0, 150.0).larger_than("Distance_lower_bound_val"),
    rflt("Upper_linear_limit", 0.0, 150.0).larger_than("Distance_upper_bound_val"),
    pflt("Weight").dflt("1.0"),
    ptr("Distance_val"),
    s("Auth_asym_ID_1"),
    s("Auth_seq_ID_1"),
    s("Auth_comp_ID_1"),
    s("Auth_atom_ID_1"),
    s("Auth_asym_ID_2"),
    s("Auth_seq_ID_2"),
    s("Auth_comp_ID_2"),
    s("Auth_atom_ID_2"),
];

static DIST_INS_ITEMS: &[TagItem] = &[s("PDB_ins_code_1"), s("PDB_ins_code_2")];

static DIST_LOOP: LoopSchema = LoopSchema {
    category: "_Gen_dist_constraint",
    key_items: DIST_KEY_ITEMS,
    data_items: DIST_DATA_ITEMS,
    ins_code_items: DIST_INS_ITEMS,
    list_id_tag: "Gen_dist_constraint_list_ID",
    entry_id_tag: "Entry_ID",
};

static DIHED_KEY_ITEMS: &[TagItem] = &[
    idx("ID").req(),
    s("Torsion_angle_name").dflt("."),
    pint_str("Entity_assembly_ID_1").req(),
    int("Entity_ID_1"),
    idx("Comp_index_ID_1").req(),
    s("Comp_ID_1").req(),
    s("Atom_ID_1").req(),
    pint_str("Entity_assembly_ID_2").req(),
    int("Entity_ID_2"),
    idx("Comp_index_ID_2").req(),
    s("Comp_ID_2").req(),
    s("Atom_ID_2").req(),
    pint_str("Entity_assembly_ID_3").req(),
    int("Entity_ID_3"),
    idx("Comp_index_ID_3").req(),
    s("Comp_ID_3").req(),
    s("Atom_ID_3").req(),
    pint_str("Entity_assembly_ID_4").req(),
    int("Entity_ID_4"),
    idx("Comp_index_ID_4").req(),
    s("Comp_ID_4").req(),
    s("Atom_ID_4").req(),
];

static DIHED_DATA_ITEMS: &[TagItem] = &[
    rflt("Angle_target_val", ANGLE_MIN, ANGLE_MAX)
        .circular(360.0)
        .member_with(&["Angle_lower_bound_val", "Angle_upper_bound_val"]),
    pflt("Angle_target_val_err").coexist_with(&["Angle_target_val"]),
    rflt("Angle_lower_linear_limit", ANGLE_MIN, ANGLE_MAX).circular(360.0),
    rflt("Angle_lower_bound_val", ANGLE_MIN, ANGLE_MAX).circular(360.0),
    rflt("Angle_upper_bound_val", ANGLE_MIN, ANGLE_MAX).circular(360.0),
    rflt("Angle_upper_linear_limit", ANGLE_MIN, ANGLE_MAX).circular(360.0),
    pflt("Weight").dflt("1.0"),
    s("Auth_asym_ID_1"),
    s("Auth_seq_ID_1"),
    s("Auth_comp_ID_1"),
    s("Auth_atom_ID_1"),
    s("Auth_asym_ID_2"),
    s("Auth_seq_ID_2"),
    s("Auth_comp_ID_2"),
    s("Auth_atom_ID_2"),
    s("Auth_asym_ID_3"),
    s("Auth_seq_ID_3"),
    s("Auth_comp_ID_3"),
    s("Auth_atom_ID_3"),
    s("Auth_asym_ID_4"),
    s("Auth_seq_ID_4"),
    s("Auth_comp_ID_4"),
    s("Auth_atom_ID_4"),
];

static DIHED_INS_ITEMS: &[TagItem] = &[
    s("PDB_ins_code_1"),
    s("PDB_ins_code_2"),
    s("PDB_ins_code_3"),
    s("PDB_ins_code_4"),
];

static DIHED_LOOP: LoopSchema = LoopSchema {
    category: "_Torsion_angle_constraint",
    key_items: DIHED_KEY_ITEMS,
    data_items: DIHED_DATA_ITEMS,
    ins_code_items: DIHED_INS_ITEMS,
    list_id_tag: "Torsion_angle_constraint_list_ID",
    entry_id_tag: "Entry_ID",
};

static TWO_ATOM_KEY_ITEMS: &[TagItem] = &[
    idx("ID").req(),
    pint_str("Entity_assembly_ID_1").req(),
    int("Entity_ID_1"),
    idx("Comp_index_ID_1").req(),
    s("Comp_ID_1").req(),
    s("Atom_ID_1").req(),
    pint_str("Entity_assembly_ID_2").req(),
    int("Entity_ID_2"),
    idx("Comp_index_ID_2").req(),
    s("Comp_ID_2").req(),
    s("Atom_ID_2").req(),
];

static TWO_ATOM_INS_ITEMS: &[TagItem] = &[s("PDB_ins_code_1"), s("PDB_ins_code_2")];

static RDC_DATA_ITEMS: &[TagItem] = &[
    rflt("Target_value", -100.0, 100.0)
    .member_with(&["RDC_lower_bound", "RDC_upper_bound"])
    .clear_bad(),
    pflt("Target_value_uncertainty").coexist_with(&["Target_value"]),
    rflt("RDC_lower_linear_limit", -100.0, 100.0).smaller_than("RDC_lower_bound"),
    rflt("RDC_lower_bound", -100.0, 100.0).smaller_than("RDC_upper_bound"),
    rflt("RDC_upper_bound", -100.0, 100.0).larger_than("RDC_lower_bound"),
    rflt("RDC_upper_linear_limit", -100.0, 100.0).larger_than("RDC_upper_bound"),
    pflt("Weight").dflt("1.0"),
    rflt("RDC_val", -100.0, 100.0),
    pflt("RDC_val_err"),
    s("Auth_asym_ID_1"),
    s("Auth_seq_ID_1"),
    s("Auth_comp_ID_1"),
    s("Auth_atom_ID_1"),
    s("Auth_asym_ID_2"),
    s("Auth_seq_ID_2"),
    s("Auth_comp_ID_2"),
    s("Auth_atom_ID_2"),
];

static RDC_LOOP: LoopSchema = LoopSchema {
    category: "_RDC_constraint",
    key_items: TWO_ATOM_KEY_ITEMS,
    data_items: RDC_DATA_ITEMS,
    ins_code_items: TWO_ATOM_INS_ITEMS,
    list_id_tag: "RDC_constraint_list_ID",
    entry_id_tag: "Entry_ID",
};

static NOEPK_DATA_ITEMS: &[TagItem] = &[
    flt("Val").req(),
    pflt("Val_err"),
    flt("Val_min"),
    flt("Val_max"),
    s("Auth_asym_ID_1"),
    s("Auth_seq_ID_1"),
    s("Auth_comp_ID_1"),
    s("Auth_atom_ID_1"),
    s("Auth_asym_ID_2"),
    s("Auth_seq_ID_2"),
    s("Auth_comp_ID_2"),
    s("Auth_atom_ID_2"),
];

static NOEPK_LOOP: LoopSchema = LoopSchema {
    category: "_Homonucl_NOE",
    key_items: TWO_ATOM_KEY_ITEMS,
    data_items: NOEPK_DATA_ITEMS,
    ins_code_items: TWO_ATOM_INS_ITEMS,
    list_id_tag: "Homonucl_NOE_list_ID",
    entry_id_tag: "Entry_ID",
};

static JCOUP_KEY_ITEMS: &[TagItem] = &[
    idx("ID").req(),
    s("Code").dflt("."),
    pint_str("Entity_assembly_ID_1").req(),
    int("Entity_ID_1"),
    idx("Comp_index_ID_1").req(),
    s("Comp_ID_1").req(),
    s("Atom_ID_1").req(),
    pint_str("Entity_assembly_ID_2").req(),
    int("Entity_ID_2"),
    idx("Comp_index_ID_2").req(),
    s("Comp_ID_2").req(),
    s("Atom_ID_2").req(),
];

static JCOUP_DATA_ITEMS: &[TagItem] = &[
    flt("Val"),
    pflt("Val_err"),
    flt("Val_min").smaller_than("Val_max"),
    flt("Val_max").larger_than("Val_min"),
    s("Auth_asym_ID_1"),
    s("Auth_seq_ID_1"),
    s("Auth_comp_ID_1"),
    s("Auth_atom_ID_1"),
    s("Auth_asym_ID_2"),
    s("Auth_seq_ID_2"),
    s("Auth_comp_ID_2"),
    s("Auth_atom_ID_2"),
];

static JCOUP_LOOP: LoopSchema = LoopSchema {
    category: "_Coupling_constant",
    key_items: JCOUP_KEY_ITEMS,
    data_items: JCOUP_DATA_ITEMS,
    ins_code_items: TWO_ATOM_INS_ITEMS,
    list_id_tag: "Coupling_constant_list_ID",
    entry_id_tag: "Entry_ID",
};

static RDC_RAW_DATA_ITEMS: &[TagItem] = &[
    rflt("Val", -100.0, 100.0).req(),
    pflt("Val_err"),
    s("Auth_asym_ID_1"),
    s("Auth_seq_ID_1"),
    s("Auth_comp_ID_1"),
    s("Auth_atom_ID_1"),
    s("Auth_asym_ID_2"),
    s("Auth_seq_ID_2"),
    s("Auth_comp_ID_2"),
    s("Auth_atom_ID_2"),
];

static RDC_RAW_LOOP: LoopSchema = LoopSchema {
    category: "_RDC",
    key_items: TWO_ATOM_KEY_ITEMS,
    data_items: RDC_RAW_DATA_ITEMS,
    ins_code_items: TWO_ATOM_INS_ITEMS,
    list_id_tag: "RDC_list_ID",
    entry_id_tag: "Entry_ID",
};

static ONE_ATOM_KEY_ITEMS: &[TagItem] = &[
    idx("ID").req(),
    pint_str("Entity_assembly_ID").req(),
    int("Entity_ID"),
    idx("Comp_index_ID").req(),
    s("Comp_ID").req(),
    s("Atom_ID").req(),
];

static ONE_ATOM_INS_ITEMS: &[TagItem] = &[s("PDB_ins_code")];

static CSA_DATA_ITEMS: &[TagItem] = &[
    s("Atom_type"),
    pint("Atom_isotope_number"),
    rflt("Val", -300.0, 300.0).req(),
    pflt("Val_err"),
    flt("Principal_value_sigma_11_val"),
    flt("Principal_value_sigma_22_val"),
    flt("Principal_value_sigma_33_val"),
    s("Auth_asym_ID"),
    s("Auth_seq_ID"),
    s("Auth_comp_ID"),
    s("Auth_atom_ID"),
];

static CSA_LOOP: LoopSchema = LoopSchema {
    category: "_CS_anisotropy",
    key_items: ONE_ATOM_KEY_ITEMS,
    data_items: CSA_DATA_ITEMS,
    ins_code_items: ONE_ATOM_INS_ITEMS,
    list_id_tag: "Chem_shift_anisotropy_ID",
    entry_id_tag: "Entry_ID",
};

static DDC_DATA_ITEMS: &[TagItem] = &[
    s("Dipolar_coupling_code"),
    pint("Ambiguity_code_1"),
    pint("Ambiguity_code_2"),
    flt("Val").req(),
    pflt("Val_err"),
    s("Auth_asym_ID_1"),
    s("Auth_seq_ID_1"),
    s("Auth_comp_ID_1"),
    s("Auth_atom_ID_1"),
    s("Auth_asym_ID_2"),
    s("Auth_seq_ID_2"),
    s("Auth_comp_ID_2"),
    s("Auth_atom_ID_2"),
];

static DDC_LOOP: LoopSchema = LoopSchema {
    category: "_Dipolar_coupling",
    key_items: TWO_ATOM_KEY_ITEMS,
    data_items: DDC_DATA_ITEMS,
    ins_code_items: TWO_ATOM_INS_ITEMS,
    list_id_tag: "Dipolar_coupling_list_ID",
    entry_id_tag: "Entry_ID",
};

static HVYCS_KEY_ITEMS: &[TagItem] = &[
    idx("ID").req(),
    pint_str("Entity_assembly_ID_1").req(),
    int("Entity_ID_1"),
    idx("Comp_index_ID_1").req(),
    s("Comp_ID_1").req(),
    s("Atom_ID_1").req(),
    pint_str("Entity_assembly_ID_2").req(),
    int("Entity_ID_2"),
    idx("Comp_index_ID_2").req(),
    s("Comp_ID_2").req(),
    s("Atom_ID_2").req(),
    pint_str("Entity_assembly_ID_3").req(),
    int("Entity_ID_3"),
    idx("Comp_index_ID_3").req(),
    s("Comp_ID_3").req(),
    s("Atom_ID_3").req(),
    pint_str("Entity_assembly_ID_4").req(),
    int("Entity_ID_4"),
    idx("Comp_index_ID_4").req(),
    s("Comp_ID_4").req(),
    s("Atom_ID_4").req(),
    pint_str("Entity_assembly_ID_5").req(),
    int("Entity_ID_5"),
    idx("Comp_index_ID_5").req(),
    s("Comp_ID_5").req(),
    s("Atom_ID_5").req(),
];

static HVYCS_DATA_ITEMS: &[TagItem] = &[
    rflt("CA_chem_shift_val", 0.0, 100.0).req(),
    pflt("CA_chem_shift_val_err"),
    rflt("CB_chem_shift_val", 0.0, 100.0),
    pflt("CB_chem_shift_val_err"),
    s("Auth_asym_ID_1"),
    s("Auth_seq_ID_1"),
    s("Auth_comp_ID_1"),
    s("Auth_atom_ID_1"),
    s("Auth_asym_ID_2"),
    s("Auth_seq_ID_2"),
    s("Auth_comp_ID_2"),
    s("Auth_atom_ID_2"),
    s("Auth_asym_ID_3"),
    s("Auth_seq_ID_3"),
    s("Auth_comp_ID_3"),
    s("Auth_atom_ID_3"),
    s("Auth_asym_ID_4"),
    s("Auth_seq_ID_4"),
    s("Auth_comp_ID_4"),
    s("Auth_atom_ID_4"),
    s("Auth_asym_ID_5"),
    s("Auth_seq_ID_5"),
    s("Auth_comp_ID_5"),
    s("Auth_atom_ID_5"),
];

static HVYCS_LOOP: LoopSchema = LoopSchema {
    category: "_CA_CB_constraint",
    key_items: HVYCS_KEY_ITEMS,
    data_items: HVYCS_DATA_ITEMS,
    ins_code_items: &[],
    list_id_tag: "CA_CB_constraint_list_ID",
    entry_id_tag: "Entry_ID",
};

static PROCS_DATA_ITEMS: &[TagItem] = &[
    s("Atom_type"),
    pint("Atom_isotope_number"),
    rflt("Chem_shift_val", -5.0, 20.0).req(),
    pflt("Chem_shift_val_err"),
    s("Auth_asym_ID"),
    s("Auth_seq_ID"),
    s("Auth_comp_ID"),
    s("Auth_atom_ID"),
];

static PROCS_LOOP: LoopSchema = LoopSchema {
    category: "_H_chem_shift_constraint",
    key_items: ONE_ATOM_KEY_ITEMS,
    data_items: PROCS_DATA_ITEMS,
    ins_code_items: ONE_ATOM_INS_ITEMS,
    list_id_tag: "H_chem_shift_constraint_list_ID",
    entry_id_tag: "Entry_ID",
};

static CSP_DATA_ITEMS: &[TagItem] = &[
    s("Atom_type"),
    pint("Atom_isotope_number"),
    flt("Chem_shift_val"),
    pflt("Chem_shift_val_err"),
    flt("Difference_chem_shift_val"),
    pflt("Difference_chem_shift_val_err"),
    s("Auth_asym_ID"),
    s("Auth_seq_ID"),
    s("Auth_comp_ID"),
    s("Auth_atom_ID"),
];

static CSP_LOOP: LoopSchema = LoopSchema {
    category: "_Chem_shift_perturbation",
    key_items: ONE_ATOM_KEY_ITEMS,
    data_items: CSP_DATA_ITEMS,
    ins_code_items: ONE_ATOM_INS_ITEMS,
    list_id_tag: "Chem_shift_perturbation_list_ID",
    entry_id_tag: "Entry_ID",
};

static AUTO_RELAX_DATA_ITEMS: &[TagItem] = &[
    s("Atom_type"),
    pint("Atom_isotope_number"),
    flt("Auto_relaxation_val").req(),
    pflt("Auto_relaxation_val_err"),
    flt("Rex_val"),
    pflt("Rex_err"),
    s("Auth_asym_ID"),
    s("Auth_seq_ID"),
    s("Auth_comp_ID"),
    s("Auth_atom_ID"),
];

static AUTO_RELAX_LOOP: LoopSchema = LoopSchema {
    category: "_Auto_relaxation",
    key_items: ONE_ATOM_KEY_ITEMS,
    data_items: AUTO_RELAX_DATA_ITEMS,
    ins_code_items: ONE_ATOM_INS_ITEMS,
    list_id_tag: "Auto_relaxation_list_ID",
    entry_id_tag: "Entry_ID",
};

static HET_NOE_DATA_ITEMS: &[TagItem] = &[
    flt("Val").req(),
    pflt("Val_err"),
    s("Auth_asym_ID_1"),
    s("Auth_seq_ID_1"),
    s("Auth_comp_ID_1"),
    s("Auth_atom_ID_1"),
    s("Auth_asym_ID_2"),
    s("Auth_seq_ID_2"),
    s("Auth_comp_ID_2"),
    s("Auth_atom_ID_2"),
];

static HET_NOE_LOOP: LoopSchema = LoopSchema {
    category: "_Heteronucl_NOE",
    key_items: TWO_ATOM_KEY_ITEMS,
    data_items: HET_NOE_DATA_ITEMS,
    ins_code_items: TWO_ATOM_INS_ITEMS,
    list_id_tag: "Heteronucl_NOE_list_ID",
    entry_id_tag: "Entry_ID",
};

static T1_DATA_ITEMS: &[TagItem] = &[
    pflt("Val").req(),
    pflt("Val_err"),
    s("Auth_asym_ID"),
    s("Auth_seq_ID"),
    s("Auth_comp_ID"),
    s("Auth_atom_ID"),
];

static T1_LOOP: LoopSchema = LoopSchema {
    category: "_T1",
    key_items: ONE_ATOM_KEY_ITEMS,
    data_items: T1_DATA_ITEMS,
    ins_code_items: ONE_ATOM_INS_ITEMS,
    list_id_tag: "Heteronucl_T1_list_ID",
    entry_id_tag: "Entry_ID",
};

static T2_DATA_ITEMS: &[TagItem] = &[
    pflt("T2_val").req(),
    pflt("T2_val_err"),
    flt("Rex_val"),
    pflt("Rex_err"),
    s("Auth_asym_ID"),
    s("Auth_seq_ID"),
    s("Auth_comp_ID"),
    s("Auth_atom_ID"),
];

static T2_LOOP: LoopSchema = LoopSchema {
    category: "_T2",
    key_items: ONE_ATOM_KEY_ITEMS,
    data_items: T2_DATA_ITEMS,
    ins_code_items: ONE_ATOM_INS_ITEMS,
    list_id_tag: "Heteronucl_T2_list_ID",
    entry_id_tag: "Entry_ID",
};

static T1R_DATA_ITEMS: &[TagItem] = &[
    pflt("T1rho_val").req(),
    pflt("T1rho_val_err"),
    flt("Rex_val"),
    pflt("Rex_err"),
    s("Auth_asym_ID"),
    s("Auth_seq_ID"),
    s("Auth_comp_ID"),
    s("Auth_atom_ID"),
];

static T1R_LOOP: LoopSchema = LoopSchema {
    category: "_T1rho",
    key_items: ONE_ATOM_KEY_ITEMS,
    data_items: T1R_DATA_ITEMS,
    ins_code_items: ONE_ATOM_INS_ITEMS,
    list_id_tag: "Heteronucl_T1rho_list_ID",
    entry_id_tag: "Entry_ID",
};

static ORDER_PARAM_DATA_ITEMS: &[TagItem] = &[
    rflt("Order_param_val", 0.0, 1.0).req(),
    pflt("Order_param_val_fit_err"),
    pflt("Tau_e_val"),
    pflt("Tau_e_val_fit_err"),
    flt("Rex_val"),
    pflt("Rex_val_fit_err"),
    s("Model_fit"),
    s("Auth_asym_ID"),
    s("Auth_seq_ID"),
    s("Auth_comp_ID"),
    s("Auth_atom_ID"),
];

static ORDER_PARAM_LOOP: LoopSchema = LoopSchema {
    category: "_Order_param",
    key_items: ONE_ATOM_KEY_ITEMS,
    data_items: ORDER_PARAM_DATA_ITEMS,
    ins_code_items: ONE_ATOM_INS_ITEMS,
    list_id_tag: "Order_parameter_list_ID",
    entry_id_tag: "Entry_ID",
};

static PH_TITR_DATA_ITEMS: &[TagItem] = &[
    rflt("Hill_coeff_val", 0.0, 10.0),
    pflt("Hill_coeff_val_fit_err"),
    rflt("High_PH_param_fit_val", 0.0, 14.0),
    pflt("High_PH_param_fit_val_err"),
    rflt("Low_PH_param_fit_val", 0.0, 14.0),
    pflt("Low_PH_param_fit_val_err"),
    rflt("PHmid_val", 0.0, 14.0),
    pflt("PHmid_val_fit_err"),
    s("Auth_asym_ID"),
    s("Auth_seq_ID"),
    s("Auth_comp_ID"),
    s("Auth_atom_ID"),
];

static PH_TITR_LOOP: LoopSchema = LoopSchema {
    category: "_PH_titr_result",
    key_items: ONE_ATOM_KEY_ITEMS,
    data_items: PH_TITR_DATA_ITEMS,
    ins_code_items: ONE_ATOM_INS_ITEMS,
    list_id_tag: "PH_titration_list_ID",
    entry_id_tag: "Entry_ID",
};

static PH_PARAM_DATA_ITEMS: &[TagItem] = &[
    rflt("PH_val", 0.0, 14.0).req(),
    pflt("PH_val_err"),
    flt("Observed_NMR_param_val"),
    pflt("Observed_NMR_param_val_err"),
    s("Auth_asym_ID"),
    s("Auth_seq_ID"),
    s("Auth_comp_ID"),
    s("Auth_atom_ID"),
];

static PH_PARAM_LOOP: LoopSchema = LoopSchema {
    category: "_PH_param",
    key_items: ONE_ATOM_KEY_ITEMS,
    data_items: PH_PARAM_DATA_ITEMS,
    ins_code_items: ONE_ATOM_INS_ITEMS,
    list_id_tag: "PH_param_list_ID",
    entry_id_tag: "Entry_ID",
};

static COUPLING_DATA_ITEMS: &[TagItem] = &[
    s("Code").dflt("."),
    pint("Ambiguity_code_1"),
    pint("Ambiguity_code_2"),
    flt("Val").req(),
    pflt("Val_err"),
    flt("Val_min").smaller_than("Val_max"),
    flt("Val_max").larger_than("Val_min"),
    s("Auth_asym_ID_1"),
    s("Auth_seq_ID_1"),
    s("Auth_comp_ID_1"),
    s("Auth_atom_ID_1"),
    s("Auth_asym_ID_2"),
    s("Auth_seq_ID_2"),
    s("Auth_comp_ID_2"),
    s("Auth_atom_ID_2"),
];

static COUPLING_LOOP: LoopSchema = LoopSchema {
    category: "_Coupling_constant",
    key_items: TWO_ATOM_KEY_ITEMS,
    data_items: COUPLING_DATA_ITEMS,
    ins_code_items: TWO_ATOM_INS_ITEMS,
    list_id_tag: "Coupling_constant_list_ID",
    entry_id_tag: "Entry_ID",
};

static FOUR_ATOM_KEY_ITEMS: &[TagItem] = &[
    idx("ID").req(),
    pint_str("Entity_assembly_ID_1").req(),
    int("Entity_ID_1"),
    idx("Comp_index_ID_1").req(),
    s("Comp_ID_1").req(),
    s("Atom_ID_1").req(),
    pint_str("Entity_assembly_ID_2").req(),
    int("Entity_ID_2"),
    idx("Comp_index_ID_2").req(),
    s("Comp_ID_2").req(),
    s("Atom_ID_2").req(),
    pint_str("Entity_assembly_ID_3").req(),
    int("Entity_ID_3"),
    idx("Comp_index_ID_3").req(),
    s("Comp_ID_3").req(),
    s("Atom_ID_3").req(),
    pint_str("Entity_assembly_ID_4").req(),
    int("Entity_ID_4"),
    idx("Comp_index_ID_4").req(),
    s("Comp_ID_4").req(),
    s("Atom_ID_4").req(),
];

static CCR_DCSA_DATA_ITEMS: &[TagItem] = &[
    s("Atom_type_1"),
    pint("Atom_isotope_number_1"),
    s("Atom_type_2"),
    pint("Atom_isotope_number_2"),
    rflt("Val", -100.0, 100.0).req(),
    pflt("Val_err"),
    s("Auth_asym_ID_1"),
    s("Auth_seq_ID_1"),
    s("Auth_comp_ID_1"),
    s("Auth_atom_ID_1"),
    s("Auth_asym_ID_2"),
    s("Auth_seq_ID_2"),
    s("Auth_comp_ID_2"),
    s("Auth_atom_ID_2"),
    s("Auth_asym_ID_3"),
    s("Auth_seq_ID_3"),
    s("Auth_comp_ID_3"),
    s("Auth_atom_ID_3"),
    s("Auth_asym_ID_4"),
    s("Auth_seq_ID_4"),
    s("Auth_comp_ID_4"),
    s("Auth_atom_ID_4"),
];

static CCR_DCSA_LOOP: LoopSchema = LoopSchema {
    category: "_Cross_correlation_D_CSA",
    key_items: FOUR_ATOM_KEY_ITEMS,
    data_items: CCR_DCSA_DATA_ITEMS,
    ins_code_items: &[],
    list_id_tag: "Cross_correlation_D_CSA_list_ID",
    entry_id_tag: "Entry_ID",
};

static CCR_DD_DATA_ITEMS: &[TagItem] = &[
    s("Dipole_1_atom_type_1"),
    pint("Dipole_1_atom_isotope_number_1"),
    s("Dipole_2_atom_type_1"),
    pint("Dipole_2_atom_isotope_number_1"),
    rflt("Val", -100.0, 100.0).req(),
    pflt("Val_err"),
    s("Auth_asym_ID_1"),
    s("Auth_seq_ID_1"),
    s("Auth_comp_ID_1"),
    s("Auth_atom_ID_1"),
    s("Auth_asym_ID_2"),
    s("Auth_seq_ID_2"),
    s("Auth_comp_ID_2"),
    s("Auth_atom_ID_2"),
    s("Auth_asym_ID_3"),
    s("Auth_seq_ID_3"),
    s("Auth_comp_ID_3"),
    s("Auth_atom_ID_3"),
    s("Auth_asym_ID_4"),
    s("Auth_seq_ID_4"),
    s("Auth_comp_ID_4"),
    s("Auth_atom_ID_4"),
];

static CCR_DD_LOOP: LoopSchema = LoopSchema {
    category: "_Cross_correlation_DD",
    key_items: FOUR_ATOM_KEY_ITEMS,
    data_items: CCR_DD_DATA_ITEMS,
    ins_code_items: &[],
    list_id_tag: "Cross_correlation_DD_list_ID",
    entry_id_tag: "Entry_ID",
};

static FCHIRAL_KEY_ITEMS: &[TagItem] = &[
    idx("ID").req(),
    enm("Stereospecific_assignment_code", &["R", "S", "ambig", "."]).dflt("."),
    pint_str("Entity_assembly_ID_1").req(),
    int("Entity_ID_1"),
    idx("Comp_index_ID_1").req(),
    s("Comp_ID_1").req(),
    s("Atom_ID_1").req(),
    pint_str("Entity_assembly_ID_2").req(),
    int("Entity_ID_2"),
    idx("Comp_index_ID_2").req(),
    s("Comp_ID_2").req(),
    s("Atom_ID_2").req(),
];

static FCHIRAL_DATA_ITEMS: &[TagItem] = &[
    s("Auth_asym_ID_1"),
    s("Auth_seq_ID_1"),
    s("Auth_comp_ID_1"),
    s("Auth_atom_ID_1"),
    s("Auth_asym_ID_2"),
    s("Auth_seq_ID_2"),
    s("Auth_comp_ID_2"),
    s("Auth_atom_ID_2"),
];

static FCHIRAL_LOOP: LoopSchema = LoopSchema {
    category: "_Floating_chirality",
    key_items: FCHIRAL_KEY_ITEMS,
    data_items: FCHIRAL_DATA_ITEMS,
    ins_code_items: TWO_ATOM_INS_ITEMS,
    list_id_tag: "Floating_chirality_assign_list_ID",
    entry_id_tag: "Entry_ID",
};

static SAXS_KEY_ITEMS: &[TagItem] = &[idx("ID").req(), pflt("Q_value").req()];

static SAXS_DATA_ITEMS: &[TagItem] = &[
    flt("Intensity_val").req(),
    pflt("Intensity_val_err"),
    pflt("Weight").dflt("1.0"),
];

static SAXS_LOOP: LoopSchema = LoopSchema {
    category: "_SAXS_constraint",
    key_items: SAXS_KEY_ITEMS,
    data_items: SAXS_DATA_ITEMS,
    ins_code_items: &[],
    list_id_tag: "SAXS_constraint_list_ID",
    entry_id_tag: "Entry_ID",
};

static OTHER_KEY_ITEMS: &[TagItem] = &[idx("ID").req()];

static OTHER_DATA_ITEMS: &[TagItem] = &[
    s("Constraint_type"),
    s("Details"),
    flt("Val"),
    pflt("Val_err"),
];

static OTHER_LOOP: LoopSchema = LoopSchema {
    category: "_Other_constraint",
    key_items: OTHER_KEY_ITEMS,
    data_items: OTHER_DATA_ITEMS,
    ins_code_items: &[],
    list_id_tag: "Other_constraint_list_ID",
    entry_id_tag: "Entry_ID",
};

static PEAK_KEY_ITEMS: &[TagItem] = &[idx("ID").req()];

static PEAK_DATA_ITEMS: &[TagItem] = &[
    flt("Volume")
        .member_with(&["Height"])
        .grp(),
    pflt("Volume_uncertainty"),
    flt("Height").member_with(&["Volume"]).grp(),
    pflt("Height_uncertainty"),
    rflt("Figure_of_merit", 0.0, 1.0),
    s("Details"),
];

static PEAK_LOOP: LoopSchema = LoopSchema {
    category: "_Peak",
    key_items: PEAK_KEY_ITEMS,
    data_items: PEAK_DATA_ITEMS,
    ins_code_items: &[],
    list_id_tag: "Spectral_peak_list_ID",
    entry_id_tag: "Entry_ID",
};

static PEAK_GENERAL_CHAR_KEY_ITEMS: &[TagItem] = &[ptr("Peak_ID").req()];

static PEAK_GENERAL_CHAR_DATA_ITEMS: &[TagItem] = &[
    flt("Intensity_val").req(),
    pflt("Intensity_val_err"),
    enm(
        "Measurement_method",
        &["height", "volume", "number of contours", "relative height", "relative volume"],
    )
    .dflt("height"),
];

static PEAK_GENERAL_CHAR_LOOP: LoopSchema = LoopSchema {
    category: "_Peak_general_char",
    key_items: PEAK_GENERAL_CHAR_KEY_ITEMS,
    data_items: PEAK_GENERAL_CHAR_DATA_ITEMS,
    ins_code_items: &[],
    list_id_tag: "Spectral_peak_list_ID",
    entry_id_tag: "Entry_ID",
};

static PEAK_CHAR_KEY_ITEMS: &[TagItem] = &[ptr("Peak_ID").req(), pint("Spectral_dim_ID").req()];

static PEAK_CHAR_DATA_ITEMS: &[TagItem] = &[
    rflt("Chem_shift_val", -300.0, 300.0).req(),
    pflt("Chem_shift_val_err"),
    pflt("Line_width_val"),
    pflt("Line_width_val_err"),
];

static PEAK_CHAR_LOOP: LoopSchema = LoopSchema {
    category: "_Peak_char",
    key_items: PEAK_CHAR_KEY_ITEMS,
    data_items: PEAK_CHAR_DATA_ITEMS,
    ins_code_items: &[],
    list_id_tag: "Spectral_peak_list_ID",
    entry_id_tag: "Entry_ID",
};

static ASSIGNED_PEAK_CS_KEY_ITEMS: &[TagItem] =
    &[ptr("Peak_ID").req(), pint("Spectral_dim_ID").req(), pint("Set_ID")];

static ASSIGNED_PEAK_CS_DATA_ITEMS: &[TagItem] = &[
    rflt("Val", -300.0, 300.0),
    s("Figure_of_merit"),
    pint_str("Entity_assembly_ID"),
    int("Entity_ID"),
    idx("Comp_index_ID"),
    s("Comp_ID"),
    s("Atom_ID"),
    eint("Ambiguity_code", &[1, 2, 3, 4, 5, 6, 9]),
    pint("Ambiguity_set_ID"),
    s("Auth_asym_ID"),
    s("Auth_seq_ID"),
    s("Auth_comp_ID"),
    s("Auth_atom_ID"),
];

static ASSIGNED_PEAK_CS_LOOP: LoopSchema = LoopSchema {
    category: "_Assigned_peak_chem_shift",
    key_items: ASSIGNED_PEAK_CS_KEY_ITEMS,
    data_items: ASSIGNED_PEAK_CS_DATA_ITEMS,
    ins_code_items: &[],
    list_id_tag: "Spectral_peak_list_ID",
    entry_id_tag: "Entry_ID",
};

static SPECTRAL_DIM_KEY_ITEMS: &[TagItem] = &[idx("ID").req()];

static SPECTRAL_DIM_DATA_ITEMS: &[TagItem] = &[
    s("Axis_code"),
    s("Spectrometer_frequency").clear_bad(),
    s("Atom_type"),
    pint("Atom_isotope_number"),
    s("Spectral_region"),
    pflt("Sweep_width"),
    enm("Sweep_width_units", &["ppm", "Hz", "."]).dflt("ppm"),
    flt("Value_first_point"),
    enm("Absolute_peak_positions", &["yes", "no", "."]).dflt("yes"),
    enm("Acquisition", &["yes", "no", "."]),
    pint("Center_frequency_offset"),
    enm("Under_sampling_type", &["aliased", "folded", "not observed", "."]),
];

static SPECTRAL_DIM_LOOP: LoopSchema = LoopSchema {
    category: "_Spectral_dim",
    key_items: SPECTRAL_DIM_KEY_ITEMS,
    data_items: SPECTRAL_DIM_DATA_ITEMS,
    ins_code_items: &[],
    list_id_tag: "Spectral_peak_list_ID",
    entry_id_tag: "Entry_ID",
};

static SPECTRAL_DIM_TRANSFER_KEY_ITEMS: &[TagItem] =
    &[pint("Spectral_dim_ID_1").req(), pint("Spectral_dim_ID_2").req()];

static SPECTRAL_DIM_TRANSFER_DATA_ITEMS: &[TagItem] = &[
    enm(
        "Type",
        &[
            "onebond",
            "jcoupling",
            "jmultibond",
            "relayed",
            "relayed-alternate",
            "through-space",
            ".",
        ],
    )
    .req(),
    enm("Indirect", &["yes", "no", "."]).dflt("no"),
];

static SPECTRAL_DIM_TRANSFER_LOOP: LoopSchema = LoopSchema {
    category: "_Spectral_dim_transfer",
    key_items: SPECTRAL_DIM_TRANSFER_KEY_ITEMS,
    data_items: SPECTRAL_DIM_TRANSFER_DATA_ITEMS,
    ins_code_items: &[],
    list_id_tag: "Spectral_peak_list_ID",
    entry_id_tag: "Entry_ID",
};

static CS_KEY_ITEMS: &[TagItem] = &[
    idx("ID").req(),
    pint_str("Entity_assembly_ID").req(),
    int("Entity_ID"),
    idx("Comp_index_ID").req(),
    idx("Seq_ID").dflt_from("Comp_index_ID"),
    s("Comp_ID").req(),
    s("Atom_ID").req(),
];

static CS_DATA_ITEMS: &[TagItem] = &[
    s("Atom_type").req(),
    pint("Atom_isotope_number").req(),
    rflt("Val", -300.0, 300.0).req().remove_bad(),
    pflt("Val_err"),
    rflt("Assign_fig_of_merit", 0.0, 1.0),
    eint("Ambiguity_code", &[1, 2, 3, 4, 5, 6, 9]).dflt("1"),
    pint("Ambiguity_set_ID").void_zero(),
    s("Auth_asym_ID"),
    s("Auth_seq_ID"),
    s("Auth_comp_ID"),
    s("Auth_atom_ID"),
];

static CS_LOOP: LoopSchema = LoopSchema {
    category: "_Atom_chem_shift",
    key_items: CS_KEY_ITEMS,
    data_items: CS_DATA_ITEMS,
    ins_code_items: ONE_ATOM_INS_ITEMS,
    list_id_tag: "Assigned_chem_shift_list_ID",
    entry_id_tag: "Entry_ID",
};

static DIST_SF: SaveframeSchema = SaveframeSchema {
    category: "general_distance_constraints",
    tag_prefix: "_Gen_dist_constraint_list",
    items: DIST_SF_ITEMS,
};

static DIHED_SF: SaveframeSchema = SaveframeSchema {
    category: "torsion_angle_constraints",
    tag_prefix: "_Torsion_angle_constraint_list",
    items: DIHED_SF_ITEMS,
};

static RDC_SF: SaveframeSchema = SaveframeSchema {
    category: "RDC_constraints",
    tag_prefix: "_RDC_constraint_list",
    items: RDC_SF_ITEMS,
};

static NOEPK_SF: SaveframeSchema = SaveframeSchema {
    category: "homonucl_NOEs",
    tag_prefix: "_Homonucl_NOE_list",
    items: FREQ_SF_ITEMS,
};

static JCOUP_SF: SaveframeSchema = SaveframeSchema {
    category: "coupling_constants",
    tag_prefix: "_Coupling_constant_list",
    items: FREQ_SF_ITEMS,
};

static RDC_RAW_SF: SaveframeSchema = SaveframeSchema {
    category: "RDCs",
    tag_prefix: "_RDC_list",
    items: RDC_SF_ITEMS,
};

static CSA_SF: SaveframeSchema = SaveframeSchema {
    category: "chem_shift_anisotropy",
    tag_prefix: "_Chem_shift_anisotropy",
    items: FREQ_SF_ITEMS,
};

static DDC_SF: SaveframeSchema = SaveframeSchema {
    category: "dipolar_couplings",
    tag_prefix: "_Dipolar_coupling_list",
    items: RDC_SF_ITEMS,
};

static HVYCS_SF: SaveframeSchema = SaveframeSchema {
    category: "CA_CB_chem_shift_constraints",
    tag_prefix: "_CA_CB_constraint_list",
    items: DIHED_SF_ITEMS,
};

static PROCS_SF: SaveframeSchema = SaveframeSchema {
    category: "H_chem_shift_constraints",
    tag_prefix: "_H_chem_shift_constraint_list",
    items: DIHED_SF_ITEMS,
};

static CSP_SF: SaveframeSchema = SaveframeSchema {
    category: "chem_shift_perturbation",
    tag_prefix: "_Chem_shift_perturbation_list",
    items: CSP_SF_ITEMS,
};

static AUTO_RELAX_SF: SaveframeSchema = SaveframeSchema {
    category: "auto_relaxation",
    tag_prefix: "_Auto_relaxation_list",
    items: AUTO_RELAX_SF_ITEMS,
};

static HET_NOE_SF: SaveframeSchema = SaveframeSchema {
    category: "heteronucl_NOEs",
    tag_prefix: "_Heteronucl_NOE_list",
    items: FREQ_SF_ITEMS,
};

static T1_SF: SaveframeSchema = SaveframeSchema {
    category: "heteronucl_T1_relaxation",
    tag_prefix: "_Heteronucl_T1_list",
    items: FREQ_SF_ITEMS,
};

static T2_SF: SaveframeSchema = SaveframeSchema {
    category: "heteronucl_T2_relaxation",
    tag_prefix: "_Heteronucl_T2_list",
    items: FREQ_SF_ITEMS,
};

static T1R_SF: SaveframeSchema = SaveframeSchema {
    category: "heteronucl_T1rho_relaxation",
    tag_prefix: "_Heteronucl_T1rho_list",
    items: FREQ_SF_ITEMS,
};

static ORDER_PARAM_SF: SaveframeSchema = SaveframeSchema {
    category: "order_parameters",
    tag_prefix: "_Order_parameter_list",
    items: FREQ_SF_ITEMS,
};

static PH_TITR_SF: SaveframeSchema = SaveframeSchema {
    category: "pH_titration",
    tag_prefix: "_PH_titration_list",
    items: FREQ_SF_ITEMS,
};

static PH_PARAM_SF: SaveframeSchema = SaveframeSchema {
    category: "pH_param_list",
    tag_prefix: "_PH_param_list",
    items: FREQ_SF_ITEMS,
};

static COUPLING_SF: SaveframeSchema = SaveframeSchema {
    category: "coupling_constants",
    tag_prefix: "_Coupling_constant_list",
    items: FREQ_SF_ITEMS,
};

static CCR_DCSA_SF: SaveframeSchema = SaveframeSchema {
    category: "dipole_CSA_cross_correlations",
    tag_prefix: "_Cross_correlation_D_CSA_list",
    items: FREQ_SF_ITEMS,
};

static CCR_DD_SF: SaveframeSchema = SaveframeSchema {
    category: "dipole_dipole_cross_correlations",
    tag_prefix: "_Cross_correlation_DD_list",
    items: FREQ_SF_ITEMS,
};

static FCHIRAL_SF: SaveframeSchema = SaveframeSchema {
    category: "floating_chiral_stereo_assign",
    tag_prefix: "_Floating_chirality_assign_list",
    items: PLAIN_SF_ITEMS,
};

static SAXS_SF: SaveframeSchema = SaveframeSchema {
    category: "saxs_constraints",
    tag_prefix: "_SAXS_constraint_list",
    items: PLAIN_SF_ITEMS,
};

static OTHER_SF: SaveframeSchema = SaveframeSchema {
    category: "other_constraints",
    tag_prefix: "_Other_constraint_list",
    items: PLAIN_SF_ITEMS,
};

static PEAK_SF: SaveframeSchema = SaveframeSchema {
    category: "spectral_peak_list",
    tag_prefix: "_Spectral_peak_list",
    items: PEAK_SF_ITEMS,
};

static CS_SF: SaveframeSchema = SaveframeSchema {
    category: "assigned_chemical_shifts",
    tag_prefix: "_Assigned_chem_shift_list",
    items: PLAIN_SF_ITEMS,
};

/// The primary loop schema of a content subtype.
pub fn loop_schema(subtype: ContentSubtype) -> &'static LoopSchema {
    match subtype {
        ContentSubtype::DistRestraint => &DIST_LOOP,
        ContentSubtype::DihedRestraint => &DIHED_LOOP,
        ContentSubtype::RdcRestraint => &RDC_LOOP,
        ContentSubtype::NoepkRestraint => &NOEPK_LOOP,
        ContentSubtype::JcoupRestraint => &JCOUP_LOOP,
        ContentSubtype::RdcRawData => &RDC_RAW_LOOP,
        ContentSubtype::CsaRestraint => &CSA_LOOP,
        ContentSubtype::DdcRestraint => &DDC_LOOP,
        ContentSubtype::HvycsRestraint => &HVYCS_LOOP,
        ContentSubtype::ProcsRestraint => &PROCS_LOOP,
        ContentSubtype::CspRestraint => &CSP_LOOP,
        ContentSubtype::AutoRelaxRestraint => &AUTO_RELAX_LOOP,
        ContentSubtype::HeteronuclNoeData => &HET_NOE_LOOP,
        ContentSubtype::HeteronuclT1Data => &T1_LOOP,
        ContentSubtype::HeteronuclT2Data => &T2_LOOP,
        ContentSubtype::HeteronuclT1rData => &T1R_LOOP,
        ContentSubtype::OrderParamData => &ORDER_PARAM_LOOP,
        ContentSubtype::PhTitrData => &PH_TITR_LOOP,
        ContentSubtype::PhParamData => &PH_PARAM_LOOP,
        ContentSubtype::CouplingConstData => &COUPLING_LOOP,
        ContentSubtype::CcrDCsaRestraint => &CCR_DCSA_LOOP,
        ContentSubtype::CcrDdRestraint => &CCR_DD_LOOP,
        ContentSubtype::FchiralRestraint => &FCHIRAL_LOOP,
        ContentSubtype::SaxsRestraint => &SAXS_LOOP,
        ContentSubtype::OtherRestraint => &OTHER_LOOP,
        ContentSubtype::SpectralPeak => &PEAK_LOOP,
        ContentSubtype::ChemShift => &CS_LOOP,
    }
}

static PEAK_ALT_LOOPS: [&LoopSchema; 4] = [
    &PEAK_LOOP,
    &PEAK_GENERAL_CHAR_LOOP,
    &PEAK_CHAR_LOOP,
    &ASSIGNED_PEAK_CS_LOOP,
];

static PEAK_AUX_LOOPS: [&LoopSchema; 2] = [&SPECTRAL_DIM_LOOP, &SPECTRAL_DIM_TRANSFER_LOOP];

/// The ordered multi-loop realization of a subtype. Only `spectral_peak`
/// realizes more than one primary loop.
pub fn alt_loop_schemas(subtype: ContentSubtype) -> &'static [&'static LoopSchema] {
    match subtype {
        ContentSubtype::SpectralPeak => &PEAK_ALT_LOOPS,
        _ => &[],
    }
}

/// Auxiliary loops attached to a subtype's saveframe.
pub fn aux_loop_schemas(subtype: ContentSubtype) -> &'static [&'static LoopSchema] {
    match subtype {
        ContentSubtype::SpectralPeak => &PEAK_AUX_LOOPS,
        _ => &[],
    }
}

/// The saveframe schema of a content subtype.
pub fn saveframe_schema(subtype: ContentSubtype) -> &'static SaveframeSchema {
    match subtype {
        ContentSubtype::DistRestraint => &DIST_SF,
        ContentSubtype::DihedRestraint => &DIHED_SF,
        ContentSubtype::RdcRestraint => &RDC_SF,
        ContentSubtype::NoepkRestraint => &NOEPK_SF,
        ContentSubtype::JcoupRestraint => &JCOUP_SF,
        ContentSubtype::RdcRawData => &RDC_RAW_SF,
        ContentSubtype::CsaRestraint => &CSA_SF,
        ContentSubtype::DdcRestraint => &DDC_SF,
        ContentSubtype::HvycsRestraint => &HVYCS_SF,
        ContentSubtype::ProcsRestraint => &PROCS_SF,
        ContentSubtype::CspRestraint => &CSP_SF,
        ContentSubtype::AutoRelaxRestraint => &AUTO_RELAX_SF,
        ContentSubtype::HeteronuclNoeData => &HET_NOE_SF,
        ContentSubtype::HeteronuclT1Data => &T1_SF,
        ContentSubtype::HeteronuclT2Data => &T2_SF,
        ContentSubtype::HeteronuclT1rData => &T1R_SF,
        ContentSubtype::OrderParamData => &ORDER_PARAM_SF,
        ContentSubtype::PhTitrData => &PH_TITR_SF,
        ContentSubtype::PhParamData => &PH_PARAM_SF,
        ContentSubtype::CouplingConstData => &COUPLING_SF,
        ContentSubtype::CcrDCsaRestraint => &CCR_DCSA_SF,
        ContentSubtype::CcrDdRestraint => &CCR_DD_SF,
        ContentSubtype::FchiralRestraint => &FCHIRAL_SF,
        ContentSubtype::SaxsRestraint => &SAXS_SF,
        ContentSubtype::OtherRestraint => &OTHER_SF,
        ContentSubtype::SpectralPeak => &PEAK_SF,
        ContentSubtype::ChemShift => &CS_SF,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_width_is_keys_plus_data_plus_terminal_pair() {
        let schema = loop_schema(ContentSubtype::DistRestraint);
        assert_eq!(
            schema.width(false),
            schema.key_items.len() + schema.data_items.len() + 2
        );
        assert_eq!(
            schema.width(true),
            schema.key_items.len() + schema.data_items.len() + 2 + 2
        );
    }

    #[test]
    fn terminal_pair_positions_are_last_two() {
        let schema = loop_schema(ContentSubtype::DihedRestraint);
        let width = schema.width(false);
        assert_eq!(
            schema.position_of("Torsion_angle_constraint_list_ID", false),
            Some(width - 2)
        );
        assert_eq!(schema.position_of("Entry_ID", false), Some(width - 1));
    }

    #[test]
    fn ins_code_items_sit_before_terminal_pair() {
        let schema = loop_schema(ContentSubtype::DistRestraint);
        let width = schema.width(true);
        assert_eq!(schema.position_of("PDB_ins_code_2", true), Some(width - 3));
        assert_eq!(schema.position_of("Entry_ID", true), Some(width - 1));
    }

    #[test]
    fn dihedral_loop_has_four_atom_slots() {
        assert_eq!(ContentSubtype::DihedRestraint.atom_slots(), 4);
        let schema = loop_schema(ContentSubtype::DihedRestraint);
        assert!(schema.position_of("Atom_ID_4", false).is_some());
        assert!(schema.position_of("Atom_ID_5", false).is_none());
    }

    #[test]
    fn spectral_peak_realizes_four_loops() {
        let loops = alt_loop_schemas(ContentSubtype::SpectralPeak);
        let categories: Vec<_> = loops.iter().map(|l| l.category).collect();
        assert_eq!(
            categories,
            [
                "_Peak",
                "_Peak_general_char",
                "_Peak_char",
                "_Assigned_peak_chem_shift"
            ]
        );
        assert_eq!(aux_loop_schemas(ContentSubtype::SpectralPeak).len(), 2);
    }

    #[test]
    fn angular_items_declare_circular_shift() {
        let schema = loop_schema(ContentSubtype::DihedRestraint);
        let pos = schema.position_of("Angle_target_val", false).unwrap();
        let item = schema.item_at(pos, false).unwrap();
        assert_eq!(item.circular_shift, Some(360.0));
    }

    #[test]
    fn distance_bounds_declare_ordering_constraints() {
        let schema = loop_schema(ContentSubtype::DistRestraint);
        let pos = schema
            .position_of("Distance_lower_bound_val", false)
            .unwrap();
        let item = schema.item_at(pos, false).unwrap();
        assert_eq!(item.smaller_than, Some("Distance_upper_bound_val"));
    }

    #[test]
    fn qualified_tags_carry_the_loop_category() {
        let schema = loop_schema(ContentSubtype::ChemShift);
        let tags = schema.tags(false);
        assert_eq!(tags[0], "_Atom_chem_shift.ID");
        assert_eq!(tags.last().unwrap(), "_Atom_chem_shift.Entry_ID");
        assert_eq!(tags.len(), schema.width(false));
    }
}
