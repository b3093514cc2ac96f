//! Index trait definition for the tempo engine.

use alloc::vec::Vec;
use tempo_core::RowId;

/// Capability set shared by every index kind.
///
/// An index stores `RowId` handles keyed by fields it extracts from the
/// row itself; callers probe it with a row value whose key fields are
/// assigned (a default record with the key filled in). The owning table
/// routes every insert/remove/update through every index it carries, so
/// all indexes observe the same row set at all times.
pub trait TableIndex<R> {
    /// Adds a row to the index.
    fn insert(&mut self, id: RowId, row: &R);

    /// Removes a row from the index. `row` must be the stored value the
    /// index was last synchronised with.
    fn remove(&mut self, id: RowId, row: &R);

    /// Re-keys a row after a mutation. No-op when the key is unchanged.
    fn update(&mut self, id: RowId, old: &R, new: &R);

    /// Returns the first row matching the probe. For ordered indexes
    /// this is the match with the smallest rank.
    fn get(&self, probe: &R) -> Option<RowId>;

    /// Appends every row matching the probe to `hits`. Ordered indexes
    /// yield matches in ascending rank order.
    fn slice(&self, probe: &R, hits: &mut Vec<RowId>);

    /// Returns the number of rows in the index.
    fn len(&self) -> usize;

    /// Returns true if the index is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every entry.
    fn clear(&mut self);
}
