//! Per-subtype list-id allocation.

use std::collections::{BTreeSet, HashMap};

use crate::core::tables::schema::ContentSubtype;

/// Dense list-id counters, one per content subtype.
///
/// Ids start at 1 and may be handed back with [`decrement`](Self::decrement)
/// when a caller rolls back an aborted saveframe. Ids reserved up front (for
/// example, list ids already claimed by a partially converted entry) are
/// skipped in both directions.
#[derive(Debug, Clone, Default)]
pub struct ListIdCounter {
    counts: HashMap<ContentSubtype, i64>,
    reserved: HashMap<ContentSubtype, BTreeSet<i64>>,
}

impl ListIdCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a list id as taken so the counter never allocates it.
    pub fn reserve(&mut self, subtype: ContentSubtype, id: i64) {
        self.reserved.entry(subtype).or_default().insert(id);
    }

    /// The most recently allocated id for a subtype, 0 when none yet.
    pub fn current(&self, subtype: ContentSubtype) -> i64 {
        self.counts.get(&subtype).copied().unwrap_or(0)
    }

    fn is_reserved(&self, subtype: ContentSubtype, id: i64) -> bool {
        self.reserved
            .get(&subtype)
            .is_some_and(|ids| ids.contains(&id))
    }

    /// Allocates the next free id for a subtype.
    pub fn increment(&mut self, subtype: ContentSubtype) -> i64 {
        let mut next = self.current(subtype) + 1;
        while self.is_reserved(subtype, next) {
            next += 1;
        }
        self.counts.insert(subtype, next);
        next
    }

    /// Hands the most recent id back, skipping over reserved ids, never
    /// dropping below zero. Returns the new current id.
    pub fn decrement(&mut self, subtype: ContentSubtype) -> i64 {
        let mut prev = (self.current(subtype) - 1).max(0);
        while prev > 0 && self.is_reserved(subtype, prev) {
            prev -= 1;
        }
        self.counts.insert(subtype, prev);
        prev
    }

    /// Current allocation per subtype key, for diagnostics.
    pub fn snapshot(&self) -> HashMap<&'static str, i64> {
        self.counts
            .iter()
            .filter(|(_, count)| **count > 0)
            .map(|(subtype, count)| (subtype.key(), *count))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_advance_independently_per_subtype() {
        let mut counter = ListIdCounter::new();
        assert_eq!(counter.increment(ContentSubtype::DistRestraint), 1);
        assert_eq!(counter.increment(ContentSubtype::DistRestraint), 2);
        assert_eq!(counter.increment(ContentSubtype::DistRestraint), 3);
        assert_eq!(counter.increment(ContentSubtype::RdcRestraint), 1);

        let snapshot = counter.snapshot();
        assert_eq!(snapshot.get("dist_restraint"), Some(&3));
        assert_eq!(snapshot.get("rdc_restraint"), Some(&1));
        assert_eq!(snapshot.get("dihed_restraint"), None);
    }

    #[test]
    fn reserved_ids_are_skipped() {
        let mut counter = ListIdCounter::new();
        counter.reserve(ContentSubtype::DistRestraint, 1);
        counter.reserve(ContentSubtype::DistRestraint, 2);
        assert_eq!(counter.increment(ContentSubtype::DistRestraint), 3);
        assert_eq!(counter.increment(ContentSubtype::DistRestraint), 4);
    }

    #[test]
    fn decrement_undoes_increment() {
        let mut counter = ListIdCounter::new();
        counter.reserve(ContentSubtype::ChemShift, 2);
        let before = counter.current(ContentSubtype::ChemShift);
        counter.increment(ContentSubtype::ChemShift);
        assert_eq!(counter.decrement(ContentSubtype::ChemShift), before);
    }

    #[test]
    fn decrement_never_goes_negative() {
        let mut counter = ListIdCounter::new();
        assert_eq!(counter.decrement(ContentSubtype::SaxsRestraint), 0);
        assert_eq!(counter.current(ContentSubtype::SaxsRestraint), 0);
    }
}
