use phf::{Map, phf_map};

/// DMPC atoms appear under four independent naming systems in deposited
/// restraint files; each table maps one system onto the reference PX4
/// component's atom set. Unmatched names pass through unchanged.

static SYSTEM_1: Map<&'static str, &'static str> = phf_map! {
    // CHARMM-style head group and glycerol.
    "N" => "N1",
    "C13" => "C1",
    "C14" => "C2",
    "C15" => "C3",
    "C12" => "C4",
    "C11" => "C5",
    "P" => "P1",
    "O13" => "O1P",
    "O14" => "O2P",
    "O12" => "O3P",
    "O11" => "O4P",
    "C1" => "C6",
    "C2" => "C7",
    "C3" => "C8",
    "O21" => "O2",
    "O22" => "O2A",
    "O31" => "O3",
    "O32" => "O3A",
    "C21" => "C17",
    "C31" => "C36",
};

static SYSTEM_2: Map<&'static str, &'static str> = phf_map! {
    // GROMACS united-atom spellings.
    "NTM" => "N1",
    "CN1" => "C1",
    "CN2" => "C2",
    "CN3" => "C3",
    "CA" => "C4",
    "CB" => "C5",
    "P8" => "P1",
    "OM1" => "O1P",
    "OM2" => "O2P",
    "OS1" => "O3P",
    "OS2" => "O4P",
    "CC" => "C6",
    "CD" => "C7",
    "CE" => "C8",
    "OE1" => "O2",
    "OE2" => "O3",
    "C1A" => "C17",
    "C1B" => "C36",
};

static SYSTEM_3: Map<&'static str, &'static str> = phf_map! {
    // AMBER lipid force-field spellings.
    "N31" => "N1",
    "C33" => "C1",
    "C34" => "C2",
    "C35" => "C3",
    "C32" => "C4",
    "C31" => "C5",
    "P31" => "P1",
    "O33" => "O1P",
    "O34" => "O2P",
    "O31" => "O3P",
    "O32" => "O4P",
    "C3" => "C6",
    "C2" => "C7",
    "C1" => "C8",
    "O21" => "O2",
    "O11" => "O3",
    "C21" => "C17",
    "C11" => "C36",
};

static SYSTEM_4: Map<&'static str, &'static str> = phf_map! {
    // BIOSYM spellings.
    "NC" => "N1",
    "C1M" => "C1",
    "C2M" => "C2",
    "C3M" => "C3",
    "C2N" => "C4",
    "C1N" => "C5",
    "PA" => "P1",
    "OA" => "O1P",
    "OB" => "O2P",
    "OC" => "O3P",
    "OD" => "O4P",
    "CG1" => "C6",
    "CG2" => "C7",
    "CG3" => "C8",
    "OG1" => "O2",
    "OG2" => "O3",
    "CA1" => "C17",
    "CB1" => "C36",
};

/// Translates a DMPC atom name from one of the four naming systems to the
/// reference PX4 atom set. Returns the input unchanged when no rule matches
/// or the system id is unknown.
pub fn translate_dmpc_atom(atom_id: &str, system_id: u8) -> String {
    let name = atom_id.trim().to_ascii_uppercase();
    let table = match system_id {
        1 => &SYSTEM_1,
        2 => &SYSTEM_2,
        3 => &SYSTEM_3,
        4 => &SYSTEM_4,
        _ => return name,
    };
    table
        .get(name.as_str())
        .map(|v| (*v).to_string())
        .unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_system_maps_the_choline_nitrogen() {
        assert_eq!(translate_dmpc_atom("N", 1), "N1");
        assert_eq!(translate_dmpc_atom("NTM", 2), "N1");
        assert_eq!(translate_dmpc_atom("N31", 3), "N1");
        assert_eq!(translate_dmpc_atom("NC", 4), "N1");
    }

    #[test]
    fn systems_are_disjoint_lookups() {
        // "C1" means different PX4 atoms under systems 1 and 3.
        assert_eq!(translate_dmpc_atom("C1", 1), "C6");
        assert_eq!(translate_dmpc_atom("C1", 3), "C8");
    }

    #[test]
    fn unmatched_names_pass_through() {
        assert_eq!(translate_dmpc_atom("C9", 1), "C9");
        assert_eq!(translate_dmpc_atom("N", 9), "N");
    }
}
