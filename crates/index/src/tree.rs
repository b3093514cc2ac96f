//! Ordered index implementation.
//!
//! A tree index partitions rows into groups (the probe key) and keeps
//! each group ordered by a rank extracted from the row. `get` returns
//! the row with the smallest rank in the probed group; `slice` walks the
//! whole group in ascending rank order.

use crate::traits::TableIndex;
use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::marker::PhantomData;
use tempo_core::RowId;

/// A balanced ordered index keyed by (group, rank) extractor closures.
///
/// The pending-delivery table uses one to find the oldest order of a
/// district; the order table uses one to walk a customer's orders in
/// o_id order.
pub struct TreeIndex<R, G, T, FG, FT>
where
    G: Ord + Clone,
    T: Ord + Clone,
    FG: Fn(&R) -> G,
    FT: Fn(&R) -> T,
{
    groups: BTreeMap<G, BTreeMap<T, Vec<RowId>>>,
    group_of: FG,
    rank_of: FT,
    unique: bool,
    rows: usize,
    _rows: PhantomData<fn(&R)>,
}

impl<R, G, T, FG, FT> TreeIndex<R, G, T, FG, FT>
where
    G: Ord + Clone,
    T: Ord + Clone,
    FG: Fn(&R) -> G,
    FT: Fn(&R) -> T,
{
    fn with_uniqueness(group_of: FG, rank_of: FT, unique: bool) -> Self {
        Self {
            groups: BTreeMap::new(),
            group_of,
            rank_of,
            unique,
            rows: 0,
            _rows: PhantomData,
        }
    }

    /// Creates a tree index where one row occupies each (group, rank);
    /// inserting a duplicate overwrites.
    pub fn unique(group_of: FG, rank_of: FT) -> Self {
        Self::with_uniqueness(group_of, rank_of, true)
    }

    /// Creates a tree index where rows may share a (group, rank).
    pub fn non_unique(group_of: FG, rank_of: FT) -> Self {
        Self::with_uniqueness(group_of, rank_of, false)
    }

    /// Returns whether this is a unique index.
    pub fn is_unique(&self) -> bool {
        self.unique
    }
}

impl<R, G, T, FG, FT> TableIndex<R> for TreeIndex<R, G, T, FG, FT>
where
    G: Ord + Clone,
    T: Ord + Clone,
    FG: Fn(&R) -> G,
    FT: Fn(&R) -> T,
{
    fn insert(&mut self, id: RowId, row: &R) {
        let group = self.groups.entry((self.group_of)(row)).or_default();
        if self.unique {
            if let Some(prev) = group.insert((self.rank_of)(row), alloc::vec![id]) {
                self.rows -= prev.len();
            }
            self.rows += 1;
        } else {
            group
                .entry((self.rank_of)(row))
                .or_insert_with(Vec::new)
                .push(id);
            self.rows += 1;
        }
    }

    fn remove(&mut self, id: RowId, row: &R) {
        let group_key = (self.group_of)(row);
        if let Some(group) = self.groups.get_mut(&group_key) {
            let rank = (self.rank_of)(row);
            if let Some(ids) = group.get_mut(&rank) {
                let before = ids.len();
                ids.retain(|&x| x != id);
                self.rows -= before - ids.len();
                if ids.is_empty() {
                    group.remove(&rank);
                }
            }
            if group.is_empty() {
                self.groups.remove(&group_key);
            }
        }
    }

    fn update(&mut self, id: RowId, old: &R, new: &R) {
        let key_changed = (self.group_of)(old) != (self.group_of)(new)
            || (self.rank_of)(old) != (self.rank_of)(new);
        if key_changed {
            self.remove(id, old);
            self.insert(id, new);
        }
    }

    fn get(&self, probe: &R) -> Option<RowId> {
        self.groups
            .get(&(self.group_of)(probe))
            .and_then(|group| group.values().next())
            .and_then(|ids| ids.first())
            .copied()
    }

    fn slice(&self, probe: &R, hits: &mut Vec<RowId>) {
        if let Some(group) = self.groups.get(&(self.group_of)(probe)) {
            for ids in group.values() {
                hits.extend_from_slice(ids);
            }
        }
    }

    fn len(&self) -> usize {
        self.rows
    }

    fn clear(&mut self) {
        self.groups.clear();
        self.rows = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    // Rows are (group, rank) pairs.
    fn group(row: &(i32, i32)) -> i32 {
        row.0
    }

    fn rank(row: &(i32, i32)) -> i32 {
        row.1
    }

    #[test]
    fn test_get_returns_smallest_rank() {
        let mut index = TreeIndex::non_unique(group, rank);
        index.insert(1, &(5, 3005));
        index.insert(2, &(5, 3001));
        index.insert(3, &(5, 3003));
        index.insert(4, &(6, 2000));

        assert_eq!(index.get(&(5, 0)), Some(2));
        assert_eq!(index.get(&(6, 0)), Some(4));
        assert_eq!(index.get(&(7, 0)), None);
    }

    #[test]
    fn test_slice_ascends_by_rank() {
        let mut index = TreeIndex::non_unique(group, rank);
        index.insert(1, &(5, 3005));
        index.insert(2, &(5, 3001));
        index.insert(3, &(5, 3003));
        index.insert(4, &(6, 1));

        let mut hits = Vec::new();
        index.slice(&(5, 0), &mut hits);
        assert_eq!(hits, vec![2, 3, 1]);
    }

    #[test]
    fn test_remove_empties_group() {
        let mut index = TreeIndex::non_unique(group, rank);
        index.insert(1, &(5, 3001));
        index.remove(1, &(5, 3001));

        assert_eq!(index.get(&(5, 0)), None);
        assert!(index.is_empty());

        // Reuse of the emptied group works.
        index.insert(2, &(5, 3002));
        assert_eq!(index.get(&(5, 0)), Some(2));
    }

    #[test]
    fn test_unique_overwrites_same_rank() {
        let mut index = TreeIndex::unique(group, rank);
        index.insert(1, &(5, 3001));
        index.insert(2, &(5, 3001));

        assert!(index.is_unique());
        assert_eq!(index.get(&(5, 0)), Some(2));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_update_moves_between_groups() {
        let mut index = TreeIndex::non_unique(group, rank);
        index.insert(1, &(5, 3001));

        index.update(1, &(5, 3001), &(6, 3001));
        assert_eq!(index.get(&(5, 0)), None);
        assert_eq!(index.get(&(6, 0)), Some(1));

        // Rank-only changes re-key too.
        index.update(1, &(6, 3001), &(6, 1));
        let mut hits = Vec::new();
        index.slice(&(6, 0), &mut hits);
        assert_eq!(hits, vec![1]);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_duplicate_ranks_keep_insertion_order() {
        let mut index = TreeIndex::non_unique(group, rank);
        index.insert(7, &(1, 10));
        index.insert(8, &(1, 10));

        let mut hits = Vec::new();
        index.slice(&(1, 0), &mut hits);
        assert_eq!(hits, vec![7, 8]);
    }
}
