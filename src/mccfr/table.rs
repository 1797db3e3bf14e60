use super::regret::RegretNode;
use std::collections::HashMap;
use std::sync::{Mutex, RwLock};

/// the process-wide `InfoKey -> RegretNode` map (spec.md §4.7). Reads take
/// the outer `RwLock` for shared access; a write only happens on the first
/// visit to a key. Per-node updates are serialized by that node's own
/// `Mutex`, which is the "minimum correctness requirement" the spec calls
/// for -- a per-node lock, not a single global one (spec.md §4.7
/// "Concurrency model").
#[derive(Default)]
pub struct InfoTable {
    rows: RwLock<HashMap<String, Mutex<RegretNode>>>,
}

impl InfoTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.read().expect("table lock poisoned").len()
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// atomic upsert: looks up `key` under a read lock; on a miss, takes
    /// the write lock and inserts the node built by `make`, re-checking in
    /// case another worker raced us to it. Either way, `f` runs against the
    /// node under its own per-node lock.
    pub fn with_node<R>(
        &self,
        key: &str,
        make: impl FnOnce() -> RegretNode,
        f: impl FnOnce(&mut RegretNode) -> R,
    ) -> R {
        {
            let rows = self.rows.read().expect("table lock poisoned");
            if let Some(node) = rows.get(key) {
                return f(&mut node.lock().expect("node lock poisoned"));
            }
        }
        let mut rows = self.rows.write().expect("table lock poisoned");
        let node = rows
            .entry(key.to_string())
            .or_insert_with(|| Mutex::new(make()));
        f(&mut node.lock().expect("node lock poisoned"))
    }

    /// a point-in-time clone of every row, for serialization (spec.md §6).
    pub fn snapshot(&self) -> Vec<(String, RegretNode)> {
        self.rows
            .read()
            .expect("table lock poisoned")
            .iter()
            .map(|(key, node)| (key.clone(), node.lock().expect("node lock poisoned").clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Street;
    use crate::gameplay::Action;

    fn make_node() -> RegretNode {
        RegretNode::new(
            vec![Action::Fold, Action::Check],
            Street::Pref,
            0,
            "72o".into(),
            String::new(),
            1.5,
        )
    }

    #[test]
    fn first_upsert_creates_and_later_upserts_reuse_the_same_node() {
        let table = InfoTable::new();
        table.with_node("k", make_node, |node| node.record_update());
        table.with_node("k", make_node, |node| node.record_update());
        assert_eq!(table.len(), 1);
        let snapshot = table.snapshot();
        assert_eq!(snapshot[0].1.update_count(), 2);
    }

    #[test]
    fn distinct_keys_create_distinct_rows() {
        let table = InfoTable::new();
        table.with_node("a", make_node, |_| {});
        table.with_node("b", make_node, |_| {});
        assert_eq!(table.len(), 2);
    }
}
