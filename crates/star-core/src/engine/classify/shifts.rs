//! Chemical-shift statistics service.
//!
//! The distance classifier consults per-(comp, atom) average shifts to tell
//! exchangeable protons (hydrogen-bond donors) from aliphatic ones. The
//! statistics ship as a CSV table with `comp_id,atom_id,avg,std,min,max`
//! columns.

use crate::core::error::ConfigError;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Protons at or above this average shift are treated as exchangeable.
pub const EXCHANGEABLE_SHIFT_FLOOR: f64 = 5.0;

/// Read-only access to per-atom chemical shift statistics.
pub trait ChemShiftStats {
    fn average_shift(&self, comp_id: &str, atom_id: &str) -> Option<f64>;

    /// Heuristic donor test for protons without explicit donor annotations.
    fn is_exchangeable_proton(&self, comp_id: &str, atom_id: &str) -> bool {
        atom_id.starts_with('H')
            && self
                .average_shift(comp_id, atom_id)
                .is_some_and(|avg| avg >= EXCHANGEABLE_SHIFT_FLOOR)
    }
}

#[derive(Debug, Deserialize)]
struct ShiftRecord {
    comp_id: String,
    atom_id: String,
    avg: f64,
}

/// CSV-backed shift statistics.
#[derive(Debug, Clone, Default)]
pub struct CsvShiftStats {
    averages: HashMap<(String, String), f64>,
}

impl CsvShiftStats {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut reader =
            csv::Reader::from_path(path).map_err(|source| ConfigError::Csv {
                path: path.display().to_string(),
                source,
            })?;
        let mut averages = HashMap::new();
        for record in reader.deserialize::<ShiftRecord>() {
            let record = record.map_err(|source| ConfigError::Csv {
                path: path.display().to_string(),
                source,
            })?;
            averages.insert((record.comp_id, record.atom_id), record.avg);
        }
        Ok(Self { averages })
    }

    pub fn insert(&mut self, comp_id: &str, atom_id: &str, avg: f64) {
        self.averages
            .insert((comp_id.to_string(), atom_id.to_string()), avg);
    }
}

impl ChemShiftStats for CsvShiftStats {
    fn average_shift(&self, comp_id: &str, atom_id: &str) -> Option<f64> {
        self.averages
            .get(&(comp_id.to_string(), atom_id.to_string()))
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn csv_rows_load_into_the_lookup() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shifts.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "comp_id,atom_id,avg").unwrap();
        writeln!(file, "ALA,H,8.19").unwrap();
        writeln!(file, "ALA,HB1,1.35").unwrap();
        let stats = CsvShiftStats::load(&path).unwrap();
        assert_eq!(stats.average_shift("ALA", "H"), Some(8.19));
        assert!(stats.is_exchangeable_proton("ALA", "H"));
        assert!(!stats.is_exchangeable_proton("ALA", "HB1"));
        assert!(!stats.is_exchangeable_proton("ALA", "CB"));
    }
}
