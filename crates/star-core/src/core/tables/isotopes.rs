use phf::{Map, Set, phf_map, phf_set};

/// NMR-active mass numbers per element symbol, most abundant / most commonly
/// observed first. The first entry is the one synthesized into
/// `Atom_isotope_number` cells when the source file does not say.
static ISOTOPE_NUMBERS: Map<&'static str, &'static [u16]> = phf_map! {
    "H" => &[1, 2, 3],
    "D" => &[2],
    "T" => &[3],
    "C" => &[13],
    "N" => &[15, 14],
    "O" => &[17],
    "F" => &[19],
    "NA" => &[23],
    "MG" => &[25],
    "SI" => &[29],
    "P" => &[31],
    "S" => &[33],
    "CL" => &[35, 37],
    "K" => &[39],
    "CA" => &[43],
    "V" => &[51],
    "MN" => &[55],
    "FE" => &[57],
    "CO" => &[59],
    "NI" => &[61],
    "CU" => &[63, 65],
    "ZN" => &[67],
    "GA" => &[69, 71],
    "SE" => &[77],
    "BR" => &[79, 81],
    "RB" => &[87],
    "MO" => &[95],
    "RU" => &[99],
    "AG" => &[107, 109],
    "CD" => &[113, 111],
    "IN" => &[115],
    "SN" => &[119, 117],
    "TE" => &[125],
    "I" => &[127],
    "CS" => &[133],
    "BA" => &[137, 135],
    "LA" => &[139],
    "W" => &[183],
    "PT" => &[195],
    "HG" => &[199, 201],
    "TL" => &[205, 203],
    "PB" => &[207],
};

/// Element symbols that appear as mono-atomic ligands in coordinate files.
/// Used by the distance classifier to recognize metal-coordination restraints.
static PARAMAGNETIC_OR_METAL_ELEMENTS: Set<&'static str> = phf_set! {
    "LI", "NA", "MG", "AL", "K", "CA", "V", "CR", "MN", "FE", "CO", "NI",
    "CU", "ZN", "GA", "RB", "SR", "Y", "ZR", "MO", "RU", "RH", "PD", "AG",
    "CD", "IN", "SN", "CS", "BA", "LA", "CE", "PR", "ND", "SM", "EU", "GD",
    "TB", "DY", "HO", "ER", "TM", "YB", "LU", "W", "RE", "OS", "IR", "PT",
    "AU", "HG", "TL", "PB",
};

/// Ambiguity codes permitted in assigned chemical shift loops.
pub const ALLOWED_AMBIGUITY_CODES: [i32; 7] = [1, 2, 3, 4, 5, 6, 9];

/// Ordered mass numbers for an element symbol, most abundant first.
///
/// Lookup is case-insensitive on the element symbol. Returns `None` for
/// elements with no NMR-active isotope in the table.
pub fn isotope_numbers(element: &str) -> Option<&'static [u16]> {
    ISOTOPE_NUMBERS
        .get(element.trim().to_ascii_uppercase().as_str())
        .copied()
}

/// The default mass number synthesized into `Atom_isotope_number` cells,
/// derived from the first character of an atom id.
pub fn default_isotope_number_of(atom_id: &str) -> Option<u16> {
    let first = atom_id.trim().chars().next()?;
    isotope_numbers(&first.to_string()).map(|nums| nums[0])
}

/// True when the symbol names a metal (or lanthanide) element that can occur
/// as a mono-atomic ligand.
pub fn is_metal_element(symbol: &str) -> bool {
    PARAMAGNETIC_OR_METAL_ELEMENTS.contains(symbol.trim().to_ascii_uppercase().as_str())
}

/// True when the symbol is any element key known to the isotope table or the
/// metal set. Used when stripping charge suffixes like "MG+2".
pub fn is_known_element(symbol: &str) -> bool {
    let upper = symbol.trim().to_ascii_uppercase();
    ISOTOPE_NUMBERS.contains_key(upper.as_str())
        || PARAMAGNETIC_OR_METAL_ELEMENTS.contains(upper.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn isotope_numbers_returns_most_abundant_first() {
        assert_eq!(isotope_numbers("H"), Some(&[1u16, 2, 3][..]));
        assert_eq!(isotope_numbers("N"), Some(&[15u16, 14][..]));
        assert_eq!(isotope_numbers("C"), Some(&[13u16][..]));
    }

    #[test]
    fn isotope_numbers_is_case_insensitive() {
        assert_eq!(isotope_numbers("cd"), isotope_numbers("CD"));
        assert_eq!(isotope_numbers(" h "), Some(&[1u16, 2, 3][..]));
    }

    #[test]
    fn default_isotope_number_uses_first_character() {
        assert_eq!(default_isotope_number_of("HA"), Some(1));
        assert_eq!(default_isotope_number_of("CA"), Some(13));
        assert_eq!(default_isotope_number_of("N"), Some(15));
        assert_eq!(default_isotope_number_of("P"), Some(31));
    }

    #[test]
    fn metal_elements_are_recognized() {
        assert!(is_metal_element("ZN"));
        assert!(is_metal_element("fe"));
        assert!(!is_metal_element("C"));
    }

    #[test]
    fn ambiguity_codes_match_dictionary() {
        assert_eq!(ALLOWED_AMBIGUITY_CODES, [1, 2, 3, 4, 5, 6, 9]);
    }
}
