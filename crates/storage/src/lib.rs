//! Tempo Storage - Row storage for the tempo transaction engine.
//!
//! This crate provides:
//!
//! - `Slab`: a pinned row arena handing out stable `RowId` slots
//! - `Table`: a row slab plus the indexes over it, kept in lock-step
//!
//! # Example
//!
//! ```rust
//! use tempo_index::HashIndex;
//! use tempo_storage::Table;
//!
//! let mut table: Table<(i32, i32)> = Table::new("Pairs", 16)
//!     .with_index(Box::new(HashIndex::unique(16, |row: &(i32, i32)| row.0)));
//!
//! let id = table.insert((7, 100));
//! assert_eq!(table.get(0, &(7, 0)), Some(id));
//!
//! table.update(id, |row| row.1 += 1).unwrap();
//! assert_eq!(table.row(id).unwrap().1, 101);
//! ```

#![no_std]

extern crate alloc;

mod slab;
mod table;

pub use slab::Slab;
pub use table::Table;
