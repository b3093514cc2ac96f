//! Multi-indexed table store.
//!
//! A `Table` owns the row slab for one logical table plus every index
//! over it. All mutations go through the table so the indexes observe
//! the same row set at all times: an insert registers the row with every
//! index, a delete removes it from every index before freeing the slot,
//! and an update re-keys exactly the indexes whose key fields changed.

use crate::slab::Slab;
use alloc::boxed::Box;
use alloc::vec::Vec;
use tempo_core::{Error, Result, RowId};
use tempo_index::TableIndex;

/// A row slab plus the indexes kept in lock-step over it.
///
/// Index id 0 is the primary. Probes are row values with the key fields
/// assigned (see the record types' sentinel defaults).
pub struct Table<R> {
    name: &'static str,
    rows: Slab<R>,
    indexes: Vec<Box<dyn TableIndex<R>>>,
}

impl<R: Clone> Table<R> {
    /// Creates an empty table sized for `capacity` rows.
    pub fn new(name: &'static str, capacity: usize) -> Self {
        Self {
            name,
            rows: Slab::with_capacity(capacity),
            indexes: Vec::new(),
        }
    }

    /// Attaches an index. Indexes are attached at wiring time, before
    /// any row is loaded.
    pub fn with_index(mut self, index: Box<dyn TableIndex<R>>) -> Self {
        debug_assert!(self.rows.is_empty(), "attach indexes before loading rows");
        self.indexes.push(index);
        self
    }

    /// Returns the table name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the number of live rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the number of indexes over this table.
    pub fn index_count(&self) -> usize {
        self.indexes.len()
    }

    /// Appends a row, registering it with every index.
    ///
    /// No duplicate check happens here beyond what a unique index
    /// provides (a duplicate key overwrites that index's entry).
    pub fn insert(&mut self, row: R) -> RowId {
        let id = self.rows.insert(row);
        let row = self.rows.get(id).expect("slot just filled");
        for index in &mut self.indexes {
            index.insert(id, row);
        }
        id
    }

    /// Probes an index for the first matching row.
    pub fn get(&self, index_id: usize, probe: &R) -> Option<RowId> {
        self.indexes.get(index_id)?.get(probe)
    }

    /// Probes an index for a row the caller requires to exist.
    pub fn find(&self, index_id: usize, probe: &R) -> Result<RowId> {
        if index_id >= self.indexes.len() {
            return Err(Error::unknown_index(self.name, index_id));
        }
        self.get(index_id, probe)
            .ok_or_else(|| Error::row_not_found(self.name))
    }

    /// Collects every row matching the probe, in the index's order.
    pub fn slice(&self, index_id: usize, probe: &R) -> Vec<RowId> {
        let mut hits = Vec::new();
        if let Some(index) = self.indexes.get(index_id) {
            index.slice(probe, &mut hits);
        }
        hits
    }

    /// Returns the row behind a handle.
    pub fn row(&self, id: RowId) -> Option<&R> {
        self.rows.get(id)
    }

    /// Applies a mutation to a row, then re-synchronises every index
    /// whose key depends on a changed field.
    pub fn update<F: FnOnce(&mut R)>(&mut self, id: RowId, f: F) -> Result<()> {
        let row = self
            .rows
            .get_mut(id)
            .ok_or_else(|| Error::vacant_slot(self.name, id))?;
        let old = row.clone();
        f(row);
        let row = self.rows.get(id).expect("slot still occupied");
        for index in &mut self.indexes {
            index.update(id, &old, row);
        }
        Ok(())
    }

    /// Removes a row from every index, then frees its slot.
    pub fn delete(&mut self, id: RowId) -> Result<R> {
        let row = self
            .rows
            .remove(id)
            .ok_or_else(|| Error::vacant_slot(self.name, id))?;
        for index in &mut self.indexes {
            index.remove(id, &row);
        }
        Ok(row)
    }

    /// Iterates every live row with its handle.
    pub fn scan(&self) -> impl Iterator<Item = (RowId, &R)> {
        self.rows.iter()
    }

    /// Removes every row and clears every index.
    pub fn clear(&mut self) {
        self.rows.clear();
        for index in &mut self.indexes {
            index.clear();
        }
    }
}
