//! Bond topology synthesis for components the CCD cannot describe.
//!
//! When a non-standard comp id appears in the coordinates without CCD bond
//! records, connectivity is inferred from Cartesian distances at the
//! representative model. The thresholds are deliberately overridable: the
//! defaults misjudge elongated bonds (metal coordination, halogens), so a
//! per-element-pair table can widen them.

use super::model::CompBondMap;
use crate::core::cif::CifView;
use crate::core::error::{CifError, ConfigError};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Distance below which a proton is bonded to its closest heavy atom.
pub const DEFAULT_HYDROGEN_BOND_LIMIT: f64 = 1.5;
/// Distance below which two heavy atoms are considered bonded.
pub const DEFAULT_HEAVY_BOND_LIMIT: f64 = 2.5;

fn default_hydrogen_limit() -> f64 {
    DEFAULT_HYDROGEN_BOND_LIMIT
}

fn default_heavy_limit() -> f64 {
    DEFAULT_HEAVY_BOND_LIMIT
}

/// Distance thresholds for topology inference, loadable from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopologyConfig {
    #[serde(default = "default_hydrogen_limit")]
    pub hydrogen_bond_limit: f64,
    #[serde(default = "default_heavy_limit")]
    pub heavy_bond_limit: f64,
    /// Per element-pair overrides keyed by the two symbols joined with '-',
    /// alphabetically ordered ("FE-S" = 3.0).
    #[serde(default)]
    pub pair_overrides: HashMap<String, f64>,
}

impl Default for TopologyConfig {
    fn default() -> Self {
        Self {
            hydrogen_bond_limit: DEFAULT_HYDROGEN_BOND_LIMIT,
            heavy_bond_limit: DEFAULT_HEAVY_BOND_LIMIT,
            pair_overrides: HashMap::new(),
        }
    }
}

impl TopologyConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Toml {
            path: path.display().to_string(),
            source,
        })
    }

    fn pair_key(sym_a: &str, sym_b: &str) -> String {
        let a = sym_a.to_ascii_uppercase();
        let b = sym_b.to_ascii_uppercase();
        if a <= b { format!("{a}-{b}") } else { format!("{b}-{a}") }
    }

    /// The heavy-heavy bond limit for an element pair.
    pub fn heavy_limit_for(&self, sym_a: &str, sym_b: &str) -> f64 {
        self.pair_overrides
            .get(&Self::pair_key(sym_a, sym_b))
            .copied()
            .unwrap_or(self.heavy_bond_limit)
    }
}

fn is_proton(atom_id: &str, type_symbol: &str) -> bool {
    matches!(type_symbol, "H" | "D" | "T")
        || (type_symbol.is_empty() && matches!(atom_id.chars().next(), Some('H' | 'D' | 'T')))
}

struct SiteAtom {
    atom_id: String,
    type_symbol: String,
    position: Point3<f64>,
}

/// Infers `chem_comp_bond` (heavy atom to its protons) and `chem_comp_topo`
/// (heavy-heavy adjacency) for the given comp ids from the coordinates.
///
/// One residue instance per comp id is enough; the first encountered at the
/// representative model/alt is used.
pub fn infer_component_topology(
    cif: &dyn CifView,
    rep_model_id: i64,
    rep_alt_id: &str,
    comp_ids: &[String],
    config: &TopologyConfig,
) -> Result<(CompBondMap, CompBondMap), CifError> {
    let mut bond: CompBondMap = HashMap::new();
    let mut topo: CompBondMap = HashMap::new();
    let Some(atom_site) = cif.category("atom_site") else {
        return Ok((bond, topo));
    };
    let model = rep_model_id.to_string();

    // First residue instance per comp id.
    let mut instances: HashMap<String, ((String, String), Vec<SiteAtom>)> = HashMap::new();
    for row in &atom_site.rows {
        if atom_site
            .get_str(row, "pdbx_PDB_model_num")
            .unwrap_or(model.as_str())
            != model
        {
            continue;
        }
        if let Some(alt) = atom_site.get_str(row, "label_alt_id")
            && alt != rep_alt_id
        {
            continue;
        }
        let comp = match atom_site
            .get_str(row, "auth_comp_id")
            .or_else(|| atom_site.get_str(row, "label_comp_id"))
        {
            Some(c) if comp_ids.iter().any(|id| id == c) => c.to_string(),
            _ => continue,
        };
        let chain = atom_site.get_str(row, "auth_asym_id").unwrap_or("").to_string();
        let seq = atom_site.get_str(row, "auth_seq_id").unwrap_or("").to_string();
        let atom_id = match atom_site.get_str(row, "label_atom_id") {
            Some(a) => a.to_string(),
            None => continue,
        };
        let type_symbol = atom_site
            .get_str(row, "type_symbol")
            .unwrap_or("")
            .to_string();
        let x = atom_site.get_f64(row, "Cartn_x")?;
        let y = atom_site.get_f64(row, "Cartn_y")?;
        let z = atom_site.get_f64(row, "Cartn_z")?;
        let (Some(x), Some(y), Some(z)) = (x, y, z) else {
            continue;
        };

        let residue_key = (chain, seq);
        let entry = instances
            .entry(comp)
            .or_insert_with(|| (residue_key.clone(), Vec::new()));
        if entry.0 != residue_key {
            continue;
        }
        entry.1.push(SiteAtom {
            atom_id,
            type_symbol,
            position: Point3::new(x, y, z),
        });
    }

    for (comp, (_, atoms)) in instances {
        let (protons, heavies): (Vec<&SiteAtom>, Vec<&SiteAtom>) = atoms
            .iter()
            .partition(|a| is_proton(&a.atom_id, &a.type_symbol));

        let comp_bond = bond.entry(comp.clone()).or_default();
        for proton in &protons {
            let closest = heavies
                .iter()
                .map(|h| (h, nalgebra::distance(&proton.position, &h.position)))
                .filter(|(_, d)| *d <= config.hydrogen_bond_limit)
                .min_by(|(_, a), (_, b)| a.total_cmp(b));
            if let Some((heavy, _)) = closest {
                comp_bond
                    .entry(heavy.atom_id.clone())
                    .or_default()
                    .push(proton.atom_id.clone());
            }
        }

        let comp_topo = topo.entry(comp).or_default();
        for (i, a) in heavies.iter().enumerate() {
            for b in heavies.iter().skip(i + 1) {
                let limit = config.heavy_limit_for(&a.type_symbol, &b.type_symbol);
                if nalgebra::distance(&a.position, &b.position) <= limit {
                    comp_topo
                        .entry(a.atom_id.clone())
                        .or_default()
                        .push(b.atom_id.clone());
                    comp_topo
                        .entry(b.atom_id.clone())
                        .or_default()
                        .push(a.atom_id.clone());
                }
            }
        }
    }
    Ok((bond, topo))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cif::{CifCategory, InMemoryCif};
    use std::io::Write as _;

    fn ligand_site() -> CifCategory {
        let mut cat = CifCategory::new(
            "atom_site",
            &[
                "auth_asym_id",
                "auth_seq_id",
                "auth_comp_id",
                "label_atom_id",
                "type_symbol",
                "Cartn_x",
                "Cartn_y",
                "Cartn_z",
            ],
        );
        cat.push_row(&["B", "200", "LIG", "C1", "C", "0.0", "0.0", "0.0"]);
        cat.push_row(&["B", "200", "LIG", "C2", "C", "1.5", "0.0", "0.0"]);
        cat.push_row(&["B", "200", "LIG", "O1", "O", "5.0", "0.0", "0.0"]);
        cat.push_row(&["B", "200", "LIG", "H1", "H", "0.0", "1.0", "0.0"]);
        cat
    }

    #[test]
    fn protons_bond_to_the_closest_heavy_atom() {
        let mut cif = InMemoryCif::new();
        cif.insert(ligand_site());
        let (bond, topo) = infer_component_topology(
            &cif,
            1,
            "A",
            &["LIG".to_string()],
            &TopologyConfig::default(),
        )
        .unwrap();
        assert_eq!(bond["LIG"]["C1"], vec!["H1"]);
        assert!(topo["LIG"]["C1"].contains(&"C2".to_string()));
        // O1 is beyond the heavy limit from everything.
        assert!(!topo["LIG"].contains_key("O1"));
    }

    #[test]
    fn pair_override_widens_the_heavy_limit() {
        let mut config = TopologyConfig::default();
        config.pair_overrides.insert("C-O".to_string(), 6.0);
        let mut cif = InMemoryCif::new();
        cif.insert(ligand_site());
        let (_, topo) =
            infer_component_topology(&cif, 1, "A", &["LIG".to_string()], &config).unwrap();
        assert!(topo["LIG"]["O1"].contains(&"C2".to_string()));
    }

    #[test]
    fn config_loads_from_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("topology.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "hydrogen_bond_limit = 1.2").unwrap();
        writeln!(file, "[pair_overrides]").unwrap();
        writeln!(file, "\"FE-S\" = 3.0").unwrap();
        let config = TopologyConfig::load(&path).unwrap();
        assert_eq!(config.hydrogen_bond_limit, 1.2);
        assert_eq!(config.heavy_bond_limit, DEFAULT_HEAVY_BOND_LIMIT);
        assert_eq!(config.heavy_limit_for("S", "FE"), 3.0);
        assert_eq!(config.heavy_limit_for("C", "C"), DEFAULT_HEAVY_BOND_LIMIT);
    }
}
