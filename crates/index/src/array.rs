//! Direct-addressed index implementation.
//!
//! For tables whose primary key is dense (warehouse, district, customer,
//! item, stock), the key maps to an array slot computed from the key
//! fields and their fanouts. Lookup is a single bounds-checked load; no
//! collision handling exists or is needed.

use crate::traits::TableIndex;
use alloc::vec::Vec;
use core::marker::PhantomData;
use tempo_core::RowId;

/// A direct-addressed index over a dense integer key.
///
/// The slot extractor folds the 1-based key fields with their fanouts,
/// `Σ (field_i − 1) · Π(subsequent fanouts)`; capacity is the product of
/// all fanouts. Slot occupancy is one row; re-inserting a slot
/// overwrites.
pub struct ArrayIndex<R, F>
where
    F: Fn(&R) -> usize,
{
    slots: Vec<Option<RowId>>,
    slot_of: F,
    rows: usize,
    _rows: PhantomData<fn(&R)>,
}

impl<R, F> ArrayIndex<R, F>
where
    F: Fn(&R) -> usize,
{
    /// Creates an array index with `capacity` slots (the product of the
    /// key fanouts).
    pub fn new(capacity: usize, slot_of: F) -> Self {
        Self {
            slots: alloc::vec![None; capacity],
            slot_of,
            rows: 0,
            _rows: PhantomData,
        }
    }

    /// Returns the number of addressable slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}

impl<R, F> TableIndex<R> for ArrayIndex<R, F>
where
    F: Fn(&R) -> usize,
{
    fn insert(&mut self, id: RowId, row: &R) {
        let slot = (self.slot_of)(row);
        if self.slots[slot].replace(id).is_none() {
            self.rows += 1;
        }
    }

    fn remove(&mut self, id: RowId, row: &R) {
        let slot = (self.slot_of)(row);
        if self.slots[slot] == Some(id) {
            self.slots[slot] = None;
            self.rows -= 1;
        }
    }

    fn update(&mut self, id: RowId, old: &R, new: &R) {
        let old_slot = (self.slot_of)(old);
        let new_slot = (self.slot_of)(new);
        if old_slot != new_slot {
            self.remove(id, old);
            self.insert(id, new);
        }
    }

    fn get(&self, probe: &R) -> Option<RowId> {
        self.slots.get((self.slot_of)(probe)).copied().flatten()
    }

    fn slice(&self, probe: &R, hits: &mut Vec<RowId>) {
        if let Some(id) = self.get(probe) {
            hits.push(id);
        }
    }

    fn len(&self) -> usize {
        self.rows
    }

    fn clear(&mut self) {
        self.slots.fill(None);
        self.rows = 0;
    }
}
