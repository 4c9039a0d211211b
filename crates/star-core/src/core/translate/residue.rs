use crate::core::ccd::{CompType, ComponentDictionary, ReleaseStatus};
use phf::{Map, Set, phf_map, phf_set};

/// Canonical CCD ids that pass through untouched.
static CANONICAL_COMP_IDS: Set<&'static str> = phf_set! {
    "ALA", "ARG", "ASN", "ASP", "CYS", "GLN", "GLU", "GLY", "HIS", "ILE",
    "LEU", "LYS", "MET", "PHE", "PRO", "SER", "THR", "TRP", "TYR", "VAL",
    "A", "C", "G", "U", "I", "DA", "DC", "DG", "DT", "DU", "DI", "HOH",
};

/// Protonation-state and force-field histidine spellings.
static HISTIDINE_VARIANTS: Set<&'static str> = phf_set! {
    "HID", "HIE", "HIF", "HIP", "HIZ", "HSD", "HSE",
};

/// Cysteine spellings for oxidation/bonding states.
static CYSTEINE_VARIANTS: Set<&'static str> = phf_set! {
    "CYO", "CYX", "CYZ", "CZN",
};

/// Long-form nucleobase names to the bare base letter.
static LONG_FORM_BASES: Map<&'static str, &'static str> = phf_map! {
    "ADE" => "A",
    "CYT" => "C",
    "GUA" => "G",
    "THY" => "T",
    "URA" => "U",
    "INO" => "I",
    "HCY" => "C",
};

/// Terminal nucleotide analogs that legitimately end in '5' or '3'.
static TERMINAL_ANALOGS: Set<&'static str> = phf_set! {
    "PO3", "HO3", "HO5",
};

fn is_dna_context(ref_comp_id: Option<&str>) -> bool {
    matches!(ref_comp_id, Some(id) if id.starts_with('D') && id.len() == 2)
}

/// Coerces a software residue name to its canonical CCD id.
///
/// First matching rule wins; the input is returned unchanged when nothing
/// applies. Idempotent: canonical ids hit the first rule.
pub fn translate_comp_id(
    ccd: &impl ComponentDictionary,
    comp_id: &str,
    ref_comp_id: Option<&str>,
) -> String {
    let name = comp_id.trim().to_ascii_uppercase();

    if CANONICAL_COMP_IDS.contains(name.as_str()) {
        return name;
    }

    // 5'/3' terminal DNA/RNA forms such as "RA5", "DG3", "C5".
    if name.len() >= 2
        && (name.ends_with('5') || name.ends_with('3'))
        && !TERMINAL_ANALOGS.contains(name.as_str())
    {
        let stripped = &name[..name.len() - 1];
        let inner = translate_comp_id(ccd, stripped, ref_comp_id);
        if CANONICAL_COMP_IDS.contains(inner.as_str()) {
            return inner;
        }
    }

    // "RA"/"RC"/"RG"/"RU" prefix spellings for RNA.
    if name.len() == 2
        && name.starts_with('R')
        && matches!(&name[1..], "A" | "C" | "G" | "U" | "I")
    {
        return name[1..].to_string();
    }

    // "DA".. style spellings already canonical above; "DADE" etc. fall
    // through. A leading 'D' plus a bare base letter is DNA unless the CCD
    // knows the full name as a D-peptide.
    if name.len() == 2
        && name.starts_with('D')
        && matches!(&name[1..], "A" | "C" | "G" | "T" | "U" | "I")
    {
        let is_d_peptide = ccd
            .get(&name)
            .map(|comp| comp.comp_type == CompType::DPeptide)
            .unwrap_or(false);
        if !is_d_peptide {
            return name;
        }
    }

    if let Some(base) = LONG_FORM_BASES.get(name.as_str()) {
        if is_dna_context(ref_comp_id) {
            return format!("D{base}");
        }
        return (*base).to_string();
    }

    if HISTIDINE_VARIANTS.contains(name.as_str()) {
        return "HIS".to_string();
    }

    if CYSTEINE_VARIANTS.contains(name.as_str()) {
        return "CYS".to_string();
    }

    // Any other CY* spelling whose CCD parent is cysteine.
    if name.starts_with("CY")
        && ccd
            .get(&name)
            .and_then(|comp| comp.parent_comp_id.as_deref())
            .is_some_and(|parent| parent == "CYS")
    {
        return "CYS".to_string();
    }

    // Obsolete CCD entries follow pdbx_replaced_by once.
    if let Some(comp) = ccd.get(&name)
        && comp.release_status == ReleaseStatus::Obsolete
        && let Some(replaced) = comp.replaced_by.as_deref()
    {
        return replaced.to_string();
    }

    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ccd::{ChemComp, InMemoryCcd};

    fn empty_ccd() -> InMemoryCcd {
        InMemoryCcd::new()
    }

    #[test]
    fn canonical_names_pass_through() {
        let ccd = empty_ccd();
        assert_eq!(translate_comp_id(&ccd, "ALA", None), "ALA");
        assert_eq!(translate_comp_id(&ccd, "DA", None), "DA");
    }

    #[test]
    fn histidine_protonation_variants_collapse() {
        let ccd = empty_ccd();
        for variant in ["HID", "HIE", "HIP", "HSD", "HSE"] {
            assert_eq!(translate_comp_id(&ccd, variant, None), "HIS");
        }
    }

    #[test]
    fn cysteine_variants_collapse() {
        let ccd = empty_ccd();
        assert_eq!(translate_comp_id(&ccd, "CYX", None), "CYS");
    }

    #[test]
    fn terminal_suffixes_are_stripped() {
        let ccd = empty_ccd();
        assert_eq!(translate_comp_id(&ccd, "RA5", None), "A");
        assert_eq!(translate_comp_id(&ccd, "DG3", None), "DG");
        assert_eq!(translate_comp_id(&ccd, "U5", None), "U");
    }

    #[test]
    fn long_forms_follow_reference_context() {
        let ccd = empty_ccd();
        assert_eq!(translate_comp_id(&ccd, "ADE", None), "A");
        assert_eq!(translate_comp_id(&ccd, "ADE", Some("DA")), "DA");
        assert_eq!(translate_comp_id(&ccd, "THY", Some("DT")), "DT");
    }

    #[test]
    fn obsolete_entries_follow_replaced_by() {
        let mut ccd = InMemoryCcd::new();
        let mut obsolete = ChemComp::new("OBS", CompType::NonPolymer);
        obsolete.release_status = crate::core::ccd::ReleaseStatus::Obsolete;
        obsolete.replaced_by = Some("NEW".to_string());
        ccd.insert(obsolete);
        assert_eq!(translate_comp_id(&ccd, "OBS", None), "NEW");
    }

    #[test]
    fn translation_is_idempotent() {
        let ccd = empty_ccd();
        for input in ["HID", "CYX", "RA5", "ADE", "XYZ"] {
            let once = translate_comp_id(&ccd, input, None);
            let twice = translate_comp_id(&ccd, &once, None);
            assert_eq!(once, twice, "not idempotent for {input}");
        }
    }
}
