use std::collections::{HashMap, VecDeque};
use std::hash::{DefaultHasher, Hash, Hasher};

/// Default capacity of the atom-name memo cache.
pub const DEFAULT_CACHE_CAPACITY: usize = 2048;

/// A bounded insertion-order memo cache for translated names.
///
/// Translation is pure, so stale entries can never be wrong; the bound only
/// caps memory on pathological inputs. Eviction is oldest-first.
#[derive(Debug, Clone)]
pub struct NameCache {
    capacity: usize,
    entries: HashMap<CacheKey, String>,
    order: VecDeque<CacheKey>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub atom_id: String,
    pub comp_id: String,
    pub unambig: bool,
    /// Hash of the reference atom list, so differing reference contexts do
    /// not collide.
    pub ref_hash: u64,
}

impl CacheKey {
    pub fn new(atom_id: &str, comp_id: &str, unambig: bool, ref_atoms: Option<&[String]>) -> Self {
        let mut hasher = DefaultHasher::new();
        if let Some(atoms) = ref_atoms {
            for atom in atoms {
                atom.hash(&mut hasher);
            }
        }
        Self {
            atom_id: atom_id.to_string(),
            comp_id: comp_id.to_string(),
            unambig,
            ref_hash: hasher.finish(),
        }
    }
}

impl NameCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    pub fn get(&self, key: &CacheKey) -> Option<&String> {
        self.entries.get(key)
    }

    pub fn insert(&mut self, key: CacheKey, value: String) {
        if self.entries.contains_key(&key) {
            return;
        }
        if self.entries.len() >= self.capacity
            && let Some(oldest) = self.order.pop_front()
        {
            self.entries.remove(&oldest);
        }
        self.order.push_back(key.clone());
        self.entries.insert(key, value);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for NameCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eviction_is_oldest_first() {
        let mut cache = NameCache::new(2);
        let k1 = CacheKey::new("A", "ALA", false, None);
        let k2 = CacheKey::new("B", "ALA", false, None);
        let k3 = CacheKey::new("C", "ALA", false, None);
        cache.insert(k1.clone(), "a".into());
        cache.insert(k2.clone(), "b".into());
        cache.insert(k3.clone(), "c".into());
        assert_eq!(cache.len(), 2);
        assert!(cache.get(&k1).is_none());
        assert_eq!(cache.get(&k3), Some(&"c".to_string()));
    }

    #[test]
    fn reference_lists_separate_cache_keys() {
        let atoms_a = vec!["HA".to_string()];
        let atoms_b = vec!["HB".to_string()];
        let k1 = CacheKey::new("QA", "ALA", false, Some(&atoms_a));
        let k2 = CacheKey::new("QA", "ALA", false, Some(&atoms_b));
        assert_ne!(k1, k2);
    }
}
