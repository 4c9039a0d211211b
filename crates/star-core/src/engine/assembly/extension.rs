//! Chain extension for exact-NOE conformer ensembles.
//!
//! eNOE data references per-conformer copies of a chain that the coordinate
//! file does not carry. The extension deep-copies the relevant maps, adding
//! each destination chain with a fresh entity assembly id while preserving
//! seq and comp ids.

use super::model::{AssemblyResult, SeqKey, StarSeq};
use std::collections::HashMap;

/// Applies a `{src_chain -> [dst_chain, ...]}` extension to a checker result.
///
/// The input is left untouched; the returned copy carries the extra chains.
pub fn extend_chains(
    result: &AssemblyResult,
    chain_extension: &HashMap<String, Vec<String>>,
) -> AssemblyResult {
    let mut extended = result.clone();
    let mut next_assembly_id = result.max_entity_assembly_id() + 1;

    // Fresh assembly id per destination chain, in deterministic order.
    let mut sources: Vec<&String> = chain_extension.keys().collect();
    sources.sort();
    let mut assembly_ids: HashMap<(String, String), i64> = HashMap::new();
    for src in &sources {
        for dst in &chain_extension[*src] {
            assembly_ids.insert(((*src).clone(), dst.clone()), next_assembly_id);
            next_assembly_id += 1;
        }
    }

    if let (Some(segments), Some(src_segments)) =
        (extended.polymer_sequence.as_mut(), result.polymer_sequence.as_ref())
    {
        for src in &sources {
            for dst in &chain_extension[*src] {
                for segment in src_segments.iter().filter(|s| s.auth_chain_id == **src) {
                    let mut copy = segment.clone();
                    copy.auth_chain_id = dst.clone();
                    copy.label_chain_id = dst.clone();
                    segments.push(copy);
                }
            }
        }
    }

    if let (Some(index), Some(src_index)) =
        (extended.coord_atom_site.as_mut(), result.coord_atom_site.as_ref())
    {
        for src in &sources {
            for dst in &chain_extension[*src] {
                for ((chain, seq), site) in src_index.iter() {
                    if chain == *src {
                        index.insert((dst.clone(), *seq), site.clone());
                    }
                }
            }
        }
    }

    if let (Some(map), Some(src_map)) =
        (extended.auth_to_star_seq.as_mut(), result.auth_to_star_seq.as_ref())
    {
        for src in &sources {
            for dst in &chain_extension[*src] {
                let assembly_id = assembly_ids[&((*src).clone(), dst.clone())];
                for (key, star) in src_map.iter() {
                    if key.chain_id == **src {
                        map.insert(
                            SeqKey::new(dst, key.seq_id, &key.comp_id),
                            StarSeq {
                                entity_assembly_id: assembly_id,
                                ..*star
                            },
                        );
                    }
                }
            }
        }
    }

    for (maps, src_maps) in [
        (extended.label_to_auth_seq.as_mut(), result.label_to_auth_seq.as_ref()),
        (extended.auth_to_label_seq.as_mut(), result.auth_to_label_seq.as_ref()),
    ] {
        if let (Some(map), Some(src_map)) = (maps, src_maps) {
            for src in &sources {
                for dst in &chain_extension[*src] {
                    for ((chain, seq), (other_chain, other_seq)) in src_map.iter() {
                        if chain == *src && other_chain == *src {
                            map.insert((dst.clone(), *seq), (dst.clone(), *other_seq));
                        }
                    }
                }
            }
        }
    }

    if let (Some(map), Some(src_map)) =
        (extended.auth_to_orig_seq.as_mut(), result.auth_to_orig_seq.as_ref())
    {
        for src in &sources {
            for dst in &chain_extension[*src] {
                for (key, orig) in src_map.iter() {
                    if key.chain_id == **src {
                        map.insert(SeqKey::new(dst, key.seq_id, &key.comp_id), orig.clone());
                    }
                }
            }
        }
    }

    extended
}
