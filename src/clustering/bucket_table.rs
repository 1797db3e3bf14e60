use super::abstraction::{RankPattern, SuitPattern};
use crate::cards::Street;
use std::collections::HashMap;

/// a persisted map from `(round, rank_pattern, suit_pattern) -> bucket_id`
/// (spec.md §3). read-only once loaded and safely shared by reference
/// across trainer workers (spec.md §5 "bucket table: read-only after
/// load").
#[derive(Debug, Clone, Default)]
pub struct BucketTable {
    entries: HashMap<(Street, RankPattern, SuitPattern), usize>,
}

impl BucketTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, round: Street, rank_pattern: RankPattern, suit_pattern: SuitPattern, bucket_id: usize) {
        self.entries.insert((round, rank_pattern, suit_pattern), bucket_id);
    }

    /// returns `None` on a miss -- the caller (abstraction lookup) maps this
    /// to `Abstraction::Missing`, which the trainer treats as non-fatal
    /// (spec.md §7 `ErrorKind::MissingBucket`).
    pub fn lookup(&self, round: Street, rank_pattern: &RankPattern, suit_pattern: &SuitPattern) -> Option<usize> {
        self.entries
            .get(&(round, rank_pattern.clone(), suit_pattern.clone()))
            .copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&(Street, RankPattern, SuitPattern), &usize)> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_then_lookup_round_trips() {
        let mut table = BucketTable::new();
        let rp = RankPattern(vec![(2, 2), (5, 1)]);
        let sp = SuitPattern(vec![vec![0], vec![0, 1]]);
        table.insert(Street::Flop, rp.clone(), sp.clone(), 7);
        assert_eq!(table.lookup(Street::Flop, &rp, &sp), Some(7));
    }

    #[test]
    fn lookup_miss_returns_none() {
        let table = BucketTable::new();
        let rp = RankPattern(vec![(2, 2)]);
        let sp = SuitPattern(vec![vec![0]]);
        assert_eq!(table.lookup(Street::Turn, &rp, &sp), None);
    }

    #[test]
    fn different_rounds_are_distinct_keys() {
        let mut table = BucketTable::new();
        let rp = RankPattern(vec![(2, 2)]);
        let sp = SuitPattern(vec![vec![0]]);
        table.insert(Street::Flop, rp.clone(), sp.clone(), 1);
        assert_eq!(table.lookup(Street::Turn, &rp, &sp), None);
        assert_eq!(table.lookup(Street::Flop, &rp, &sp), Some(1));
    }
}
