//! Entity iteration and the auth-to-STAR sequence mapping.
//!
//! Each `entity` row yields one or more entity assembly records. Copies of a
//! polymer entity share one entity assembly id until the chain count exceeds
//! [`MAX_MAG_IDENT_ASYM_ID`], at which point each physical chain receives its
//! own record. Every sequence key is indexed under the representative auth
//! key and, where applicable, under alternate auth and label-chain keys for
//! legacy referrers.

use super::model::{
    EntityAssembly, ModResidue, NonPolymerSegment, PolymerSegment, SeqKey, StarSeq,
    StructConnBond,
};
use crate::core::cif::{CifCategory, CifView};
use crate::core::error::CifError;
use std::collections::HashMap;

/// Maximum number of identical chains folded into one entity assembly row.
pub const MAX_MAG_IDENT_ASYM_ID: usize = 26;

/// All maps derived from one entity iteration.
#[derive(Debug, Clone, Default)]
pub struct MappingResult {
    pub entity_assemblies: Vec<EntityAssembly>,
    pub auth_to_star_seq: HashMap<SeqKey, StarSeq>,
    pub auth_to_star_seq_ann: HashMap<(String, i64), StarSeq>,
    pub auth_to_entity_type: HashMap<SeqKey, String>,
    pub label_to_auth_seq: HashMap<(String, i64), (String, i64)>,
    pub auth_to_label_seq: HashMap<(String, i64), (String, i64)>,
    pub auth_to_orig_seq: HashMap<SeqKey, (i64, String)>,
}

struct EntityMeta {
    entity_id: i64,
    entity_type: String,
    src_method: Option<String>,
    description: Option<String>,
    formula_weight: Option<f64>,
    ec_number: Option<String>,
    parent_entity_id: Option<i64>,
    mutation: Option<String>,
    fragment: Option<String>,
    details: Option<String>,
    copies: i64,
}

fn read_entities(category: &CifCategory) -> Result<Vec<EntityMeta>, CifError> {
    let mut entities = Vec::new();
    for row in &category.rows {
        let Some(entity_id) = category.get_int(row, "id")? else {
            continue;
        };
        entities.push(EntityMeta {
            entity_id,
            entity_type: category.get_str(row, "type").unwrap_or("polymer").to_string(),
            src_method: category.get_str(row, "src_method").map(|v| v.to_string()),
            description: category
                .get_str(row, "pdbx_description")
                .map(|v| v.to_string()),
            formula_weight: category.get_f64(row, "formula_weight")?,
            ec_number: category.get_str(row, "pdbx_ec").map(|v| v.to_string()),
            parent_entity_id: category.get_int(row, "pdbx_parent_entity_id")?,
            mutation: category.get_str(row, "pdbx_mutation").map(|v| v.to_string()),
            fragment: category.get_str(row, "pdbx_fragment").map(|v| v.to_string()),
            details: category.get_str(row, "details").map(|v| v.to_string()),
            copies: category
                .get_int(row, "pdbx_number_of_molecules")?
                .unwrap_or(1),
        });
    }
    Ok(entities)
}

struct PolyMeta {
    polymer_type: Option<String>,
    one_letter_code: Option<String>,
    nstd_monomer: bool,
}

fn read_entity_poly(cif: &dyn CifView, entity_id: i64) -> PolyMeta {
    let mut meta = PolyMeta {
        polymer_type: None,
        one_letter_code: None,
        nstd_monomer: false,
    };
    let Some(category) = cif.category("entity_poly") else {
        return meta;
    };
    let id = entity_id.to_string();
    for row in category.filtered_rows(&[("entity_id", id.as_str())]) {
        meta.polymer_type = category.get_str(row, "type").map(|v| v.to_string());
        meta.one_letter_code = category
            .get_str(row, "pdbx_seq_one_letter_code")
            .map(|v| v.to_string());
        meta.nstd_monomer = category.get_str(row, "nstd_monomer") == Some("yes");
    }
    meta
}

fn index_segment_keys(
    result: &mut MappingResult,
    segment: &PolymerSegment,
    star: StarSeq,
    entity_type: &str,
) {
    for idx in 0..segment.len() {
        let auth_seq = segment.auth_seq_ids[idx];
        let comp = &segment.comp_ids[idx];
        let key = SeqKey::new(&segment.auth_chain_id, auth_seq, comp);
        let mapped = StarSeq {
            seq_id: segment.seq_ids[idx],
            ..star
        };
        result.auth_to_star_seq.insert(key.clone(), mapped);
        result
            .auth_to_star_seq_ann
            .entry((segment.auth_chain_id.clone(), auth_seq))
            .or_insert(mapped);
        result
            .auth_to_entity_type
            .insert(key.clone(), entity_type.to_string());
        result
            .auth_to_orig_seq
            .insert(key, (auth_seq, segment.auth_comp_ids[idx].clone()));
        result.label_to_auth_seq.insert(
            (segment.label_chain_id.clone(), segment.seq_ids[idx]),
            (segment.auth_chain_id.clone(), auth_seq),
        );
        result.auth_to_label_seq.insert(
            (segment.auth_chain_id.clone(), auth_seq),
            (segment.label_chain_id.clone(), segment.seq_ids[idx]),
        );
    }
}

fn index_nonpoly_keys(
    result: &mut MappingResult,
    segment: &NonPolymerSegment,
    star: StarSeq,
    entity_type: &str,
) {
    for idx in 0..segment.auth_seq_ids.len() {
        let auth_seq = segment.auth_seq_ids[idx];
        let comp = &segment.comp_ids[idx];
        let key = SeqKey::new(&segment.auth_chain_id, auth_seq, comp);
        let mapped = StarSeq {
            seq_id: segment.seq_ids[idx],
            ..star
        };
        result.auth_to_star_seq.insert(key.clone(), mapped);
        result
            .auth_to_star_seq_ann
            .entry((segment.auth_chain_id.clone(), auth_seq))
            .or_insert(mapped);
        result
            .auth_to_entity_type
            .insert(key.clone(), entity_type.to_string());
        result
            .auth_to_orig_seq
            .insert(key, (auth_seq, segment.auth_comp_ids[idx].clone()));

        // Alternate and label-chain keys for legacy referrers.
        if let Some(alt_seq) = segment.alt_auth_seq_ids[idx] {
            result.auth_to_star_seq.insert(
                SeqKey::new(&segment.auth_chain_id, alt_seq, comp),
                StarSeq {
                    representative: false,
                    ..mapped
                },
            );
        }
        if segment.label_chain_id != segment.auth_chain_id {
            result.auth_to_star_seq.insert(
                SeqKey::new(&segment.label_chain_id, auth_seq, comp),
                StarSeq {
                    representative: false,
                    ..mapped
                },
            );
        }
    }
}

/// Builds the entity assembly records and every sequence map.
pub fn build_entity_mapping(
    cif: &dyn CifView,
    polymers: &[PolymerSegment],
    nonpoly: &[NonPolymerSegment],
    branched: &[NonPolymerSegment],
) -> Result<MappingResult, CifError> {
    let mut result = MappingResult::default();
    let entities = match cif.category("entity") {
        Some(category) => read_entities(category)?,
        None => synthesize_entities(polymers, nonpoly),
    };

    let mut next_assembly_id: i64 = 1;
    for entity in &entities {
        match entity.entity_type.as_str() {
            "polymer" => {
                let poly_meta = read_entity_poly(cif, entity.entity_id);
                let chains: Vec<&PolymerSegment> = polymers
                    .iter()
                    .filter(|s| s.entity_id.is_none() || s.entity_id == Some(entity.entity_id))
                    .filter(|s| s.entity_id.is_some() || entities.len() == 1)
                    .collect();
                if chains.is_empty() {
                    continue;
                }
                let entity_type = poly_meta
                    .polymer_type
                    .clone()
                    .unwrap_or_else(|| "polymer".to_string());
                let split = chains.len() > MAX_MAG_IDENT_ASYM_ID;
                if split {
                    for segment in &chains {
                        let assembly_id = next_assembly_id;
                        next_assembly_id += 1;
                        push_polymer_assembly(
                            &mut result,
                            entity,
                            &poly_meta,
                            &[segment],
                            assembly_id,
                        );
                        index_segment_keys(
                            &mut result,
                            segment,
                            StarSeq {
                                entity_assembly_id: assembly_id,
                                seq_id: 0,
                                entity_id: entity.entity_id,
                                representative: true,
                            },
                            &entity_type,
                        );
                    }
                } else {
                    let assembly_id = next_assembly_id;
                    next_assembly_id += 1;
                    push_polymer_assembly(&mut result, entity, &poly_meta, &chains, assembly_id);
                    for segment in &chains {
                        index_segment_keys(
                            &mut result,
                            segment,
                            StarSeq {
                                entity_assembly_id: assembly_id,
                                seq_id: 0,
                                entity_id: entity.entity_id,
                                representative: true,
                            },
                            &entity_type,
                        );
                    }
                }
            }
            "branched" => {
                for segment in branched
                    .iter()
                    .filter(|s| s.entity_id.is_none() || s.entity_id == Some(entity.entity_id))
                {
                    let assembly_id = next_assembly_id;
                    next_assembly_id += 1;
                    push_nonpoly_assembly(&mut result, entity, segment, assembly_id, "branched");
                    index_nonpoly_keys(
                        &mut result,
                        segment,
                        StarSeq {
                            entity_assembly_id: assembly_id,
                            seq_id: 0,
                            entity_id: entity.entity_id,
                            representative: true,
                        },
                        "oligosaccharide",
                    );
                }
            }
            entity_type => {
                // Non-polymer and water.
                for segment in nonpoly
                    .iter()
                    .filter(|s| s.entity_id.is_none() || s.entity_id == Some(entity.entity_id))
                {
                    let assembly_id = next_assembly_id;
                    next_assembly_id += 1;
                    push_nonpoly_assembly(&mut result, entity, segment, assembly_id, entity_type);
                    index_nonpoly_keys(
                        &mut result,
                        segment,
                        StarSeq {
                            entity_assembly_id: assembly_id,
                            seq_id: 0,
                            entity_id: entity.entity_id,
                            representative: true,
                        },
                        entity_type,
                    );
                }
            }
        }
    }
    Ok(result)
}

fn synthesize_entities(
    polymers: &[PolymerSegment],
    nonpoly: &[NonPolymerSegment],
) -> Vec<EntityMeta> {
    let mut entities = Vec::new();
    if !polymers.is_empty() {
        entities.push(EntityMeta {
            entity_id: 1,
            entity_type: "polymer".to_string(),
            src_method: None,
            description: None,
            formula_weight: None,
            ec_number: None,
            parent_entity_id: None,
            mutation: None,
            fragment: None,
            details: None,
            copies: polymers.len() as i64,
        });
    }
    if !nonpoly.is_empty() {
        entities.push(EntityMeta {
            entity_id: entities.len() as i64 + 1,
            entity_type: "non-polymer".to_string(),
            src_method: None,
            description: None,
            formula_weight: None,
            ec_number: None,
            parent_entity_id: None,
            mutation: None,
            fragment: None,
            details: None,
            copies: nonpoly.len() as i64,
        });
    }
    entities
}

fn push_polymer_assembly(
    result: &mut MappingResult,
    entity: &EntityMeta,
    poly_meta: &PolyMeta,
    chains: &[&PolymerSegment],
    assembly_id: i64,
) {
    let mut assembly = EntityAssembly {
        entity_assembly_id: assembly_id,
        entity_id: entity.entity_id,
        entity_type: "polymer".to_string(),
        src_method: entity.src_method.clone(),
        description: entity.description.clone(),
        formula_weight: entity.formula_weight,
        ec_number: entity.ec_number.clone(),
        parent_entity_id: entity.parent_entity_id,
        mutation: entity.mutation.clone(),
        fragment: entity.fragment.clone(),
        details: entity.details.clone(),
        copies: chains.len() as i64,
        polymer_type: poly_meta.polymer_type.clone(),
        one_letter_code: poly_meta.one_letter_code.clone(),
        nstd_monomer: poly_meta.nstd_monomer,
        ..EntityAssembly::default()
    };
    for segment in chains {
        assembly.auth_chain_ids.push(segment.auth_chain_id.clone());
        assembly
            .label_chain_ids
            .push(segment.label_chain_id.clone());
        assembly.monomer_count = assembly.monomer_count.max(segment.len());
        for comp in &segment.comp_ids {
            assembly.comp_id_set.insert(comp.clone());
        }
    }
    result.entity_assemblies.push(assembly);
}

fn push_nonpoly_assembly(
    result: &mut MappingResult,
    entity: &EntityMeta,
    segment: &NonPolymerSegment,
    assembly_id: i64,
    entity_type: &str,
) {
    let mut assembly = EntityAssembly {
        entity_assembly_id: assembly_id,
        entity_id: entity.entity_id,
        entity_type: entity_type.to_string(),
        src_method: entity.src_method.clone(),
        description: entity.description.clone(),
        formula_weight: entity.formula_weight,
        ec_number: entity.ec_number.clone(),
        parent_entity_id: entity.parent_entity_id,
        mutation: entity.mutation.clone(),
        fragment: entity.fragment.clone(),
        details: entity.details.clone(),
        copies: entity.copies,
        auth_chain_ids: vec![segment.auth_chain_id.clone()],
        label_chain_ids: vec![segment.label_chain_id.clone()],
        monomer_count: segment.auth_seq_ids.len(),
        ..EntityAssembly::default()
    };
    for comp in &segment.comp_ids {
        assembly.comp_id_set.insert(comp.clone());
    }
    result.entity_assemblies.push(assembly);
}

/// Reads `pdbx_struct_mod_residue`.
pub fn read_mod_residues(cif: &dyn CifView) -> Result<Vec<ModResidue>, CifError> {
    let mut residues = Vec::new();
    let Some(category) = cif.category("pdbx_struct_mod_residue") else {
        return Ok(residues);
    };
    for row in &category.rows {
        let chain = match category.get_str(row, "auth_asym_id") {
            Some(c) => c.to_string(),
            None => continue,
        };
        let Some(seq) = category.get_int(row, "auth_seq_id")? else {
            continue;
        };
        let comp = category.get_str(row, "auth_comp_id").unwrap_or(".").to_string();
        residues.push(ModResidue {
            auth_chain_id: chain,
            auth_seq_id: seq,
            comp_id: comp,
            parent_comp_id: category.get_str(row, "parent_comp_id").map(|v| v.to_string()),
            details: category.get_str(row, "details").map(|v| v.to_string()),
        });
    }
    Ok(residues)
}

/// Reads `struct_conn` for cross-chain bonded probes.
pub fn read_struct_conn(cif: &dyn CifView) -> Result<Vec<StructConnBond>, CifError> {
    let mut bonds = Vec::new();
    let Some(category) = cif.category("struct_conn") else {
        return Ok(bonds);
    };
    for row in &category.rows {
        let conn_type = category.get_str(row, "conn_type_id").unwrap_or(".").to_string();
        let (Some(chain_1), Some(chain_2)) = (
            category.get_str(row, "ptnr1_auth_asym_id"),
            category.get_str(row, "ptnr2_auth_asym_id"),
        ) else {
            continue;
        };
        let (chain_1, chain_2) = (chain_1.to_string(), chain_2.to_string());
        let (Some(seq_1), Some(seq_2)) = (
            category.get_int(row, "ptnr1_auth_seq_id")?,
            category.get_int(row, "ptnr2_auth_seq_id")?,
        ) else {
            continue;
        };
        bonds.push(StructConnBond {
            conn_type,
            chain_id_1: chain_1,
            seq_id_1: seq_1,
            comp_id_1: category
                .get_str(row, "ptnr1_auth_comp_id")
                .unwrap_or(".")
                .to_string(),
            atom_id_1: category
                .get_str(row, "ptnr1_label_atom_id")
                .unwrap_or(".")
                .to_string(),
            chain_id_2: chain_2,
            seq_id_2: seq_2,
            comp_id_2: category
                .get_str(row, "ptnr2_auth_comp_id")
                .unwrap_or(".")
                .to_string(),
            atom_id_2: category
                .get_str(row, "ptnr2_label_atom_id")
                .unwrap_or(".")
                .to_string(),
        });
    }
    Ok(bonds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cif::{CifCategory, InMemoryCif};

    fn polymer_chain(auth: &str, label: &str, entity_id: i64) -> PolymerSegment {
        PolymerSegment {
            auth_chain_id: auth.to_string(),
            label_chain_id: label.to_string(),
            seq_ids: vec![1, 2],
            auth_seq_ids: vec![10, 11],
            comp_ids: vec!["MET".to_string(), "ALA".to_string()],
            auth_comp_ids: vec!["MET".to_string(), "ALA".to_string()],
            ins_codes: vec![None, None],
            entity_id: Some(entity_id),
        }
    }

    fn entity_cif() -> InMemoryCif {
        let mut entity = CifCategory::new(
            "entity",
            &[
                "id",
                "type",
                "src_method",
                "pdbx_description",
                "formula_weight",
                "pdbx_number_of_molecules",
                "pdbx_ec",
                "pdbx_fragment",
            ],
        );
        entity.push_row(&["1", "polymer", "man", "protein", "2500.0", "2", "3.4.21.1", "catalytic domain"]);
        let mut poly = CifCategory::new(
            "entity_poly",
            &["entity_id", "type", "pdbx_seq_one_letter_code", "nstd_monomer"],
        );
        poly.push_row(&["1", "polypeptide(L)", "MA", "no"]);
        let mut cif = InMemoryCif::new();
        cif.insert(entity);
        cif.insert(poly);
        cif
    }

    #[test]
    fn identical_chains_share_one_assembly_row() {
        let cif = entity_cif();
        let polymers = vec![polymer_chain("A", "A", 1), polymer_chain("B", "B", 1)];
        let result = build_entity_mapping(&cif, &polymers, &[], &[]).unwrap();
        assert_eq!(result.entity_assemblies.len(), 1);
        let assembly = &result.entity_assemblies[0];
        assert_eq!(assembly.copies, 2);
        assert_eq!(assembly.polymer_type.as_deref(), Some("polypeptide(L)"));
        assert_eq!(assembly.ec_number.as_deref(), Some("3.4.21.1"));
        assert_eq!(assembly.fragment.as_deref(), Some("catalytic domain"));

        let a = result
            .auth_to_star_seq
            .get(&SeqKey::new("A", 10, "MET"))
            .copied()
            .unwrap();
        let b = result
            .auth_to_star_seq
            .get(&SeqKey::new("B", 10, "MET"))
            .copied()
            .unwrap();
        assert_eq!(a.entity_assembly_id, b.entity_assembly_id);
        assert_eq!(a.seq_id, 1);
        assert!(a.representative);
    }

    #[test]
    fn excess_copies_split_into_per_chain_assemblies() {
        let cif = entity_cif();
        let polymers: Vec<PolymerSegment> = (0..MAX_MAG_IDENT_ASYM_ID + 1)
            .map(|i| polymer_chain(&format!("C{i}"), &format!("C{i}"), 1))
            .collect();
        let result = build_entity_mapping(&cif, &polymers, &[], &[]).unwrap();
        assert_eq!(result.entity_assemblies.len(), MAX_MAG_IDENT_ASYM_ID + 1);
        let first = result
            .auth_to_star_seq
            .get(&SeqKey::new("C0", 10, "MET"))
            .copied()
            .unwrap();
        let last = result
            .auth_to_star_seq
            .get(&SeqKey::new(&format!("C{MAX_MAG_IDENT_ASYM_ID}"), 10, "MET"))
            .copied()
            .unwrap();
        assert_ne!(first.entity_assembly_id, last.entity_assembly_id);
    }

    #[test]
    fn label_and_auth_maps_are_mutual_inverses() {
        let cif = entity_cif();
        let polymers = vec![polymer_chain("A", "X", 1)];
        let result = build_entity_mapping(&cif, &polymers, &[], &[]).unwrap();
        for (label_key, auth_key) in &result.label_to_auth_seq {
            assert_eq!(
                result.auth_to_label_seq.get(auth_key),
                Some(label_key),
                "label/auth maps disagree at {label_key:?}"
            );
        }
        assert_eq!(result.label_to_auth_seq.len(), result.auth_to_label_seq.len());
    }
}
