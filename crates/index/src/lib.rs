//! Tempo Index - Index implementations for the tempo transaction engine.
//!
//! This crate provides the three index kinds a table can carry:
//!
//! - `HashIndex`: point lookups and slices over an arbitrary key
//! - `TreeIndex`: ordered traversal of a keyed group, ascending by rank
//! - `ArrayIndex`: O(1) direct addressing for dense integer keys
//!
//! All three implement [`TableIndex`], keyed by extractor closures so a
//! table can hold heterogeneously keyed indexes behind trait objects.
//!
//! # Example
//!
//! ```rust
//! use tempo_index::{HashIndex, TableIndex};
//!
//! let mut index = HashIndex::non_unique(16, |row: &(i32, i32)| row.0);
//! index.insert(0, &(7, 10));
//! index.insert(1, &(7, 20));
//! index.insert(2, &(8, 30));
//!
//! assert_eq!(index.get(&(7, 0)), Some(0));
//! let mut hits = Vec::new();
//! index.slice(&(7, 0), &mut hits);
//! assert_eq!(hits, vec![0, 1]);
//! ```

#![no_std]

extern crate alloc;

mod array;
mod hash;
mod traits;
mod tree;

pub use array::ArrayIndex;
pub use hash::HashIndex;
pub use traits::TableIndex;
pub use tree::TreeIndex;
