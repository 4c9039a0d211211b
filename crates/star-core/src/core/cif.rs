//! The row-filtered mmCIF dictionary view consumed by the assembly checker.
//!
//! File parsing stays with an external collaborator; the checker only ever
//! sees categories as tag lists plus string rows. [`InMemoryCif`] backs tests
//! and embedders that adapt their own readers.

use crate::core::error::CifError;
use std::collections::HashMap;

/// One data category: a tag list and row-major string values. The mmCIF
/// convention of '.'/'?' for absent values is preserved in the raw cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CifCategory {
    pub name: String,
    pub tags: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CifCategory {
    pub fn new(name: &str, tags: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: &[&str]) {
        self.rows.push(row.iter().map(|v| v.to_string()).collect());
    }

    pub fn tag_index(&self, tag: &str) -> Option<usize> {
        self.tags.iter().position(|t| t == tag)
    }

    /// The raw cell, with '.'/'?' normalized to `None`.
    pub fn get_str<'a>(&'a self, row: &'a [String], tag: &str) -> Option<&'a str> {
        let idx = self.tag_index(tag)?;
        let value = row.get(idx)?.as_str();
        if value.is_empty() || value == "." || value == "?" {
            None
        } else {
            Some(value)
        }
    }

    pub fn get_int(&self, row: &[String], tag: &str) -> Result<Option<i64>, CifError> {
        match self.get_str(row, tag) {
            None => Ok(None),
            Some(value) => value
                .parse::<i64>()
                .map(Some)
                .map_err(|_| CifError::MalformedValue {
                    item: tag.to_string(),
                    value: value.to_string(),
                    expected: "integer",
                }),
        }
    }

    pub fn get_f64(&self, row: &[String], tag: &str) -> Result<Option<f64>, CifError> {
        match self.get_str(row, tag) {
            None => Ok(None),
            Some(value) => value
                .parse::<f64>()
                .map(Some)
                .map_err(|_| CifError::MalformedValue {
                    item: tag.to_string(),
                    value: value.to_string(),
                    expected: "float",
                }),
        }
    }

    /// Rows whose cells match every (tag, value) filter pair. Filters on tags
    /// the category does not carry match rows whose value would be absent.
    pub fn filtered_rows<'a>(&'a self, filters: &[(&str, &str)]) -> Vec<&'a Vec<String>> {
        self.rows
            .iter()
            .filter(|row| {
                filters.iter().all(|(tag, expect)| match self.tag_index(tag) {
                    Some(idx) => row.get(idx).map(|v| v.as_str()) == Some(*expect),
                    None => true,
                })
            })
            .collect()
    }
}

/// Read-only access to the coordinate file's categories.
pub trait CifView {
    fn category(&self, name: &str) -> Option<&CifCategory>;

    fn has_category(&self, name: &str) -> bool {
        self.category(name).is_some()
    }
}

/// A preloaded dictionary view for tests and embedders.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCif {
    categories: HashMap<String, CifCategory>,
}

impl InMemoryCif {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, category: CifCategory) {
        self.categories.insert(category.name.clone(), category);
    }
}

impl CifView for InMemoryCif {
    fn category(&self, name: &str) -> Option<&CifCategory> {
        self.categories.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atom_site() -> CifCategory {
        let mut cat = CifCategory::new(
            "atom_site",
            &["auth_asym_id", "auth_seq_id", "auth_comp_id", "pdbx_PDB_model_num"],
        );
        cat.push_row(&["A", "1", "ALA", "1"]);
        cat.push_row(&["A", "2", "GLY", "1"]);
        cat.push_row(&["A", "1", "ALA", "2"]);
        cat
    }

    #[test]
    fn filtered_rows_applies_every_filter() {
        let cat = atom_site();
        let rows = cat.filtered_rows(&[("pdbx_PDB_model_num", "1")]);
        assert_eq!(rows.len(), 2);
        let rows = cat.filtered_rows(&[("pdbx_PDB_model_num", "1"), ("auth_seq_id", "2")]);
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn get_str_normalizes_absent_markers() {
        let mut cat = CifCategory::new("entity", &["id", "details"]);
        cat.push_row(&["1", "."]);
        let row = &cat.rows[0];
        assert_eq!(cat.get_str(row, "details"), None);
        assert_eq!(cat.get_str(row, "id"), Some("1"));
    }

    #[test]
    fn get_int_rejects_malformed_cells() {
        let mut cat = CifCategory::new("entity", &["id"]);
        cat.push_row(&["x"]);
        let row = &cat.rows[0];
        assert!(cat.get_int(row, "id").is_err());
    }
}
