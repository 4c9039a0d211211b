use super::cache::{CacheKey, NameCache};
use crate::core::align;
use crate::core::ccd::ComponentDictionary;
use crate::core::tables::isotopes;

/// Memoizing wrapper around [`translate_atom_name`].
///
/// Translation is pure, so one translator can be shared across all restraint
/// files of a run; the cache size is a parameter with a conservative default.
#[derive(Debug, Default)]
pub struct AtomNameTranslator {
    cache: NameCache,
}

impl AtomNameTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cache: NameCache::new(capacity),
        }
    }

    pub fn translate(
        &mut self,
        ccd: &impl ComponentDictionary,
        atom_id: &str,
        comp_id: &str,
        ref_atoms: Option<&[String]>,
        unambig: bool,
    ) -> String {
        let key = CacheKey::new(atom_id, comp_id, unambig, ref_atoms);
        if let Some(hit) = self.cache.get(&key) {
            return hit.clone();
        }
        let result = translate_atom_name(ccd, atom_id, comp_id, ref_atoms, unambig);
        self.cache.insert(key, result.clone());
        result
    }
}

/// Maps a software-specific atom name to the canonical atom name of the
/// reference chemical component.
///
/// The reference atom list is either supplied by the caller (the atoms
/// observed in the coordinate file) or taken from the CCD template. Rewrite
/// rules are tried in a fixed order and the first rule producing a name
/// present in the reference list wins; wildcard folds under `unambig=false`
/// produce pseudo-atom spellings (`%`/`*` suffixes) that stand for a proton
/// group rather than a single reference atom. Returns the original name when
/// nothing applies; it never fails.
pub fn translate_atom_name(
    ccd: &impl ComponentDictionary,
    atom_id: &str,
    comp_id: &str,
    ref_atoms: Option<&[String]>,
    unambig: bool,
) -> String {
    let name = atom_id.trim().to_ascii_uppercase();
    let comp = comp_id.trim().to_ascii_uppercase();

    let owned_refs: Vec<String> = match ref_atoms {
        Some(atoms) => atoms.to_vec(),
        None => ccd.get(&comp).map(|c| c.atom_ids()).unwrap_or_default(),
    };
    let present = |candidate: &str| owned_refs.iter().any(|a| a == candidate);

    if present(&name) {
        return name;
    }

    // Nucleic-acid primed-position variants.
    if let Some(candidate) = primed_variant(&name)
        && present(&candidate)
    {
        return candidate;
    }

    // PDB v2 style leading digit: "1HB" -> "HB1", "2HG1" -> "HG12".
    if let Some(first) = name.chars().next()
        && first.is_ascii_digit()
        && name.len() > 1
    {
        let rotated = format!("{}{}", &name[1..], first);
        if present(&rotated) {
            return rotated;
        }
    }

    // "NH..." / "HN..." spellings of plain amide protons.
    if let Some(rest) = name.strip_prefix("NH").or_else(|| name.strip_prefix("HN")) {
        let candidate = format!("H{rest}");
        if present(&candidate) {
            return candidate;
        }
    }

    // Methyl folding and Q pseudo-atoms.
    if let Some(candidate) = fold_methyl(&name, &present, ccd, &comp, unambig) {
        return candidate;
    }

    if let Some(candidate) = per_residue_special(&name, &comp, &present) {
        return candidate;
    }

    if let Some(candidate) = gromacs_variant(&name, &comp, &present) {
        return candidate;
    }

    // BIOSYM pro-chirality suffixes R/S and amide Z/E.
    if name.len() > 1
        && let Some(last) = name.chars().last()
        && matches!(last, 'R' | 'S' | 'Z' | 'E')
    {
        let stem = &name[..name.len() - 1];
        let digits: &[&str] = match last {
            'R' => &["2", "1"],
            'S' => &["3", "2"],
            'Z' => &["1", "21"],
            'E' => &["2", "22"],
            _ => &[],
        };
        for digit in digits {
            let candidate = format!("{stem}{digit}");
            if present(&candidate) {
                return candidate;
            }
        }
    }

    // DNA/RNA oxygen and phosphate reorderings.
    if let Some(candidate) = nucleic_oxygen_variant(&name)
        && present(&candidate)
    {
        return candidate;
    }

    // Trailing double-prime on carbons/oxygens carries one prime too many.
    if name.ends_with("''")
        && name.len() > 3
        && matches!(name.chars().next(), Some('C') | Some('O'))
    {
        let candidate = name[..name.len() - 1].to_string();
        if present(&candidate) {
            return candidate;
        }
    }

    // Element-with-charge suffixes such as "MG+2" or "ZN2+".
    if let Some(bare) = strip_charge_suffix(&name)
        && isotopes::is_known_element(&bare)
        && comp == bare
    {
        return bare;
    }

    // Wildcard folding for pseudo-atom spellings.
    if !unambig {
        if let Some(rest) = name.strip_prefix('Q') {
            let stem = format!("H{rest}");
            if owned_refs.iter().any(|a| a.starts_with(&stem)) {
                return format!("{stem}%");
            }
        }
        if name.ends_with("++") {
            return format!("{}*", &name[..name.len() - 2]);
        }
        if name.ends_with('+') || name.ends_with('-') || name.ends_with('#') {
            return format!("{}%", &name[..name.len() - 1]);
        }
        if name.ends_with('*') {
            return format!("{}%", &name[..name.len() - 1]);
        }
    }

    // Pseudo-residue exceptions.
    if name == "X" {
        for token in ["UNK", "UNX"] {
            if present(token) {
                return token.to_string();
            }
        }
    }
    if comp == name && isotopes::is_metal_element(&name) {
        return name;
    }

    // Capped character-level alignment against reference candidates sharing
    // the first character and apostrophe status.
    if let Some(candidate) = alignment_fallback(&name, &owned_refs) {
        return candidate;
    }

    name
}

fn has_apostrophe(name: &str) -> bool {
    name.contains('\'')
}

fn primed_variant(name: &str) -> Option<String> {
    // "H2'1"/"H2'A" style trailing selectors on primed protons.
    if let Some(stem) = name.strip_suffix('1').or_else(|| name.strip_suffix('A'))
        && stem.ends_with('\'')
        && stem.starts_with('H')
    {
        return Some(stem.to_string());
    }
    if let Some(stem) = name.strip_suffix('2').or_else(|| name.strip_suffix('B'))
        && stem.ends_with('\'')
        && stem.starts_with('H')
    {
        return Some(format!("{stem}'"));
    }
    // Leading digit on primed protons: "1H5'" -> "H5'", "2H5'" -> "H5''".
    if let Some(rest) = name.strip_prefix('1')
        && rest.starts_with('H')
        && rest.ends_with('\'')
    {
        return Some(rest.to_string());
    }
    if let Some(rest) = name.strip_prefix('2')
        && rest.starts_with('H')
        && rest.ends_with('\'')
    {
        return Some(format!("{rest}'"));
    }
    // The protonated 2'-hydroxyl.
    if matches!(name, "HO'2" | "2HO'" | "HO2" | "O2'H") {
        return Some("HO2'".to_string());
    }
    None
}

fn fold_methyl(
    name: &str,
    present: &dyn Fn(&str) -> bool,
    ccd: &impl ComponentDictionary,
    comp: &str,
    unambig: bool,
) -> Option<String> {
    let rest = name
        .strip_prefix("QM")
        .or_else(|| name.strip_prefix("HM"))
        .or_else(|| name.strip_prefix('M'))
        .or_else(|| name.strip_prefix('Q'))?;
    if rest.is_empty() {
        return None;
    }
    let stem = format!("H{rest}");

    // A single methyl group: H<rest>1..3 exist.
    if present(&format!("{stem}1")) {
        return Some(if unambig {
            format!("{stem}1")
        } else {
            format!("{stem}%")
        });
    }
    // Nested numbering (VAL/LEU/ILE): H<rest>11.. under a branch digit.
    for branch in ['1', '2'] {
        if present(&format!("{stem}{branch}2")) {
            return Some(if unambig {
                format!("{stem}{branch}1")
            } else {
                format!("{stem}{branch}%")
            });
        }
    }
    // Fall back to the CCD's representative methyl protons.
    if let Some(template) = ccd.get(comp) {
        let methyls = template.representative_methyl_protons();
        if let Some(repr) = methyls.iter().find(|m| m.starts_with(stem.as_str())) {
            let fold_stem = &repr[..repr.len() - 1];
            return Some(if unambig {
                (*repr).to_string()
            } else {
                format!("{fold_stem}%")
            });
        }
    }
    None
}

fn per_residue_special(name: &str, comp: &str, present: &dyn Fn(&str) -> bool) -> Option<String> {
    // DT methyl carbon and protons under legacy spellings.
    if comp == "DT" {
        let candidate = match name {
            "C5M" | "C7M" => "C7",
            "H51" | "HM51" => "H71",
            "H52" | "HM52" => "H72",
            "H53" | "HM53" => "H73",
            _ => "",
        };
        if !candidate.is_empty() && present(candidate) {
            return Some(candidate.to_string());
        }
    }

    // C-terminal oxygens and N-terminal protons on peptide components.
    if present("OXT") || present("CA") {
        let candidate = match name {
            "OT1" | "O'" | "O1" => "O",
            "OT2" | "O''" | "O2" => "OXT",
            "HT1" => "H1",
            "HT2" => "H2",
            "HT3" => "H3",
            _ => "",
        };
        if !candidate.is_empty() && present(candidate) {
            return Some(candidate.to_string());
        }
    }
    None
}

fn gromacs_variant(name: &str, comp: &str, present: &dyn Fn(&str) -> bool) -> Option<String> {
    let candidate: &str = match comp {
        // GROMACS numbers the ILE delta protons HD1..HD3.
        "ILE" => match name {
            "HD1" if !present("HD1") => "HD11",
            "HD2" if !present("HD2") => "HD12",
            "HD3" if !present("HD3") => "HD13",
            _ => "",
        },
        "SER" => match name {
            "HO" | "HOG" => "HG",
            _ => "",
        },
        "THR" => match name {
            "HO" | "HO1" | "HOG" => "HG1",
            _ => "",
        },
        "TYR" => match name {
            "HO" | "HOH" => "HH",
            _ => "",
        },
        "ASN" => match name {
            "HND1" => "HD21",
            "HND2" => "HD22",
            _ => "",
        },
        "GLN" => match name {
            "HNE1" => "HE21",
            "HNE2" => "HE22",
            _ => "",
        },
        "HIS" => match name {
            "HND" => "HD1",
            "HNE" => "HE2",
            _ => "",
        },
        // Capping groups.
        "NH2" => match name {
            "H1" => "HN1",
            "H2" => "HN2",
            _ => "",
        },
        "ACE" => match name {
            "HH31" => "H1",
            "HH32" => "H2",
            "HH33" => "H3",
            "CA" => "CH3",
            _ => "",
        },
        _ => "",
    };
    if !candidate.is_empty() && present(candidate) {
        return Some(candidate.to_string());
    }
    None
}

fn nucleic_oxygen_variant(name: &str) -> Option<String> {
    match name {
        "O1P" => return Some("OP1".to_string()),
        "O2P" => return Some("OP2".to_string()),
        "O3P" => return Some("OP3".to_string()),
        "H3T" => return Some("HO3'".to_string()),
        "H5T" => return Some("HOP2".to_string()),
        _ => {}
    }
    // "O'1" style: prime before the position digit.
    let mut chars = name.chars();
    if chars.next() == Some('O')
        && name.len() == 3
        && name[1..2] == *"'"
        && name
            .chars()
            .nth(2)
            .is_some_and(|c| c.is_ascii_digit())
    {
        return Some(format!("O{}'", &name[2..3]));
    }
    None
}

fn strip_charge_suffix(name: &str) -> Option<String> {
    if let Some(pos) = name.find(['+', '-']) {
        if pos == 0 {
            return None;
        }
        let bare = &name[..pos];
        // Accept "CA2+" as well as "CA+2".
        let bare = bare.trim_end_matches(|c: char| c.is_ascii_digit());
        if bare.is_empty() {
            return None;
        }
        return Some(bare.to_string());
    }
    None
}

/// Minimum alignment score to accept a fallback candidate, unless the
/// candidate list has exactly one member.
const MIN_FALLBACK_SCORE: i32 = 2;

fn alignment_fallback(name: &str, refs: &[String]) -> Option<String> {
    let first = name.chars().next()?;
    let name_chars: Vec<char> = name.chars().collect();
    let candidates: Vec<&String> = refs
        .iter()
        .filter(|r| r.starts_with(first) && has_apostrophe(r) == has_apostrophe(name))
        .collect();
    if candidates.is_empty() {
        return None;
    }

    let mut best: Option<(&String, i32)> = None;
    let mut tied = false;
    for candidate in &candidates {
        let cand_chars: Vec<char> = candidate.chars().collect();
        let score = align::align(&name_chars, &cand_chars).score;
        match best {
            None => best = Some((candidate, score)),
            Some((_, best_score)) if score > best_score => {
                best = Some((candidate, score));
                tied = false;
            }
            Some((_, best_score)) if score == best_score => tied = true,
            _ => {}
        }
    }

    let (candidate, score) = best?;
    if tied {
        return None;
    }
    if score >= MIN_FALLBACK_SCORE || candidates.len() == 1 {
        Some(candidate.clone())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ccd::{ChemComp, CompAtom, CompType, InMemoryCcd};

    fn empty_ccd() -> InMemoryCcd {
        InMemoryCcd::new()
    }

    fn val_protons() -> Vec<String> {
        [
            "N", "CA", "C", "O", "CB", "CG1", "CG2", "H", "HA", "HB", "HG11", "HG12", "HG13",
            "HG21", "HG22", "HG23",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    fn rna_atoms() -> Vec<String> {
        [
            "P", "OP1", "OP2", "O5'", "C5'", "H5'", "H5''", "C4'", "H4'", "O4'", "C3'", "H3'",
            "O3'", "C2'", "H2'", "O2'", "HO2'", "C1'", "H1'",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    #[test]
    fn literal_hits_pass_through() {
        let refs = val_protons();
        let ccd = empty_ccd();
        assert_eq!(
            translate_atom_name(&ccd, "CA", "VAL", Some(&refs), true),
            "CA"
        );
    }

    #[test]
    fn qg_folds_to_first_methyl_branch() {
        let refs = val_protons();
        let ccd = empty_ccd();
        assert_eq!(
            translate_atom_name(&ccd, "QG", "VAL", Some(&refs), false),
            "HG1%"
        );
    }

    #[test]
    fn leading_digit_rotates_to_tail() {
        let refs = val_protons();
        let ccd = empty_ccd();
        assert_eq!(
            translate_atom_name(&ccd, "1HG1", "VAL", Some(&refs), true),
            "HG11"
        );
    }

    #[test]
    fn primed_selectors_normalize() {
        let refs = rna_atoms();
        let ccd = empty_ccd();
        assert_eq!(translate_atom_name(&ccd, "H5'1", "A", Some(&refs), true), "H5'");
        assert_eq!(
            translate_atom_name(&ccd, "H5'2", "A", Some(&refs), true),
            "H5''"
        );
        assert_eq!(
            translate_atom_name(&ccd, "2H5'", "A", Some(&refs), true),
            "H5''"
        );
        assert_eq!(
            translate_atom_name(&ccd, "HO'2", "A", Some(&refs), true),
            "HO2'"
        );
    }

    #[test]
    fn phosphate_oxygens_reorder() {
        let refs = rna_atoms();
        let ccd = empty_ccd();
        assert_eq!(translate_atom_name(&ccd, "O1P", "A", Some(&refs), true), "OP1");
        assert_eq!(translate_atom_name(&ccd, "O2P", "A", Some(&refs), true), "OP2");
    }

    #[test]
    fn gromacs_hydroxyls_map_per_residue() {
        let ser: Vec<String> = ["N", "CA", "CB", "OG", "HG"].iter().map(|s| s.to_string()).collect();
        let ccd = empty_ccd();
        assert_eq!(translate_atom_name(&ccd, "HO", "SER", Some(&ser), true), "HG");
        let thr: Vec<String> = ["N", "CA", "CB", "OG1", "HG1"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(translate_atom_name(&ccd, "HO", "THR", Some(&thr), true), "HG1");
    }

    #[test]
    fn biosym_suffixes_map_to_stereo_pairs() {
        let leu: Vec<String> = ["CB", "HB2", "HB3"].iter().map(|s| s.to_string()).collect();
        let ccd = empty_ccd();
        assert_eq!(translate_atom_name(&ccd, "HBR", "LEU", Some(&leu), true), "HB2");
        assert_eq!(translate_atom_name(&ccd, "HBS", "LEU", Some(&leu), true), "HB3");
        let asn: Vec<String> = ["ND2", "HD21", "HD22"].iter().map(|s| s.to_string()).collect();
        assert_eq!(
            translate_atom_name(&ccd, "HD2Z", "ASN", Some(&asn), true),
            "HD21"
        );
    }

    #[test]
    fn charged_elements_strip_to_bare_symbol() {
        let refs: Vec<String> = vec!["MG".to_string()];
        let ccd = empty_ccd();
        assert_eq!(translate_atom_name(&ccd, "MG+2", "MG", Some(&refs), true), "MG");
        assert_eq!(translate_atom_name(&ccd, "MG2+", "MG", Some(&refs), true), "MG");
    }

    #[test]
    fn unmatched_names_return_unchanged() {
        let refs = val_protons();
        let ccd = empty_ccd();
        assert_eq!(
            translate_atom_name(&ccd, "ZQ9", "VAL", Some(&refs), true),
            "ZQ9"
        );
    }

    #[test]
    fn translation_is_idempotent_for_fixed_reference() {
        let refs = rna_atoms();
        let ccd = empty_ccd();
        for input in ["O1P", "H5'1", "HO'2", "C1'"] {
            let once = translate_atom_name(&ccd, input, "A", Some(&refs), true);
            let twice = translate_atom_name(&ccd, &once, "A", Some(&refs), true);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn ccd_reference_is_used_when_no_list_is_given() {
        let mut ccd = InMemoryCcd::new();
        let mut ala = ChemComp::new("ALA", CompType::LPeptide);
        for name in ["N", "CA", "CB", "HB1", "HB2", "HB3"] {
            ala.atoms.push(CompAtom::new(name, &name[..1]));
        }
        ccd.insert(ala);
        assert_eq!(translate_atom_name(&ccd, "MB", "ALA", None, false), "HB%");
        assert_eq!(translate_atom_name(&ccd, "MB", "ALA", None, true), "HB1");
    }

    #[test]
    fn memoized_translator_returns_cached_results() {
        let refs = val_protons();
        let ccd = empty_ccd();
        let mut translator = AtomNameTranslator::new();
        let first = translator.translate(&ccd, "QG", "VAL", Some(&refs), false);
        let second = translator.translate(&ccd, "QG", "VAL", Some(&refs), false);
        assert_eq!(first, "HG1%");
        assert_eq!(first, second);
    }
}
