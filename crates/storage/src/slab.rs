//! Pinned row arena.
//!
//! Indexes hold `RowId` handles rather than references, so row storage
//! must never relocate a live row. The slab keeps rows in stable slots:
//! a handle stays valid, and keeps naming the same row, until that row
//! is deleted. Freed slots are recycled last-in-first-out.

use alloc::vec::Vec;
use tempo_core::RowId;

/// A slab of row slots with stable `RowId` handles.
pub struct Slab<R> {
    slots: Vec<Option<R>>,
    free: Vec<RowId>,
    len: usize,
}

impl<R> Slab<R> {
    /// Creates a slab with room for `capacity` rows before reallocation.
    ///
    /// Capacities are pre-computed upper bounds; exceeding one grows the
    /// slot vector but never moves occupied slots, so handles stay valid.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            len: 0,
        }
    }

    /// Stores a row and returns its handle.
    pub fn insert(&mut self, row: R) -> RowId {
        self.len += 1;
        match self.free.pop() {
            Some(id) => {
                self.slots[id as usize] = Some(row);
                id
            }
            None => {
                let id = self.slots.len() as RowId;
                self.slots.push(Some(row));
                id
            }
        }
    }

    /// Returns the row behind a handle, if the slot is occupied.
    #[inline]
    pub fn get(&self, id: RowId) -> Option<&R> {
        self.slots.get(id as usize).and_then(|slot| slot.as_ref())
    }

    /// Returns the row behind a handle mutably.
    #[inline]
    pub fn get_mut(&mut self, id: RowId) -> Option<&mut R> {
        self.slots
            .get_mut(id as usize)
            .and_then(|slot| slot.as_mut())
    }

    /// Frees a slot and returns the row it held.
    pub fn remove(&mut self, id: RowId) -> Option<R> {
        let row = self.slots.get_mut(id as usize).and_then(|slot| slot.take());
        if row.is_some() {
            self.free.push(id);
            self.len -= 1;
        }
        row
    }

    /// Returns the number of live rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if no rows are live.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterates the live rows with their handles.
    pub fn iter(&self) -> impl Iterator<Item = (RowId, &R)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|row| (i as RowId, row)))
    }

    /// Frees every slot.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.len = 0;
    }
}
