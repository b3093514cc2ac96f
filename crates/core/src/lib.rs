//! Tempo Core - Core types for the tempo transaction engine.
//!
//! This crate provides the foundational types shared by the storage and
//! index layers and by the benchmark transactions:
//!
//! - `FixedStr<N>`: stack-allocated, fixed-capacity byte string
//! - `FieldFold`: the 32-bit field-fold hasher used by every hash index
//! - the nine table row types (`Warehouse`, `District`, `Customer`, ...)
//! - `RowId` / `Date` aliases and the unset-field sentinels
//! - `Error`: error type for engine operations
//!
//! # Example
//!
//! ```rust
//! use tempo_core::{FixedStr, Warehouse};
//!
//! let mut w = Warehouse::default();
//! w.w_id = 1;
//! w.w_name = FixedStr::from("Main");
//! w.w_tax = 0.05;
//!
//! assert_eq!(w.w_name.as_str(), "Main");
//! assert!(w.approx_eq(&w.clone()));
//! ```

#![no_std]

extern crate alloc;

mod error;
mod fixstr;
pub mod hash;
mod record;
mod types;

pub use error::{Error, Result};
pub use fixstr::FixedStr;
pub use hash::{FieldFold, FieldFoldBuild};
pub use record::{
    Customer, District, History, Item, NewOrder, Order, OrderLine, Stock, Warehouse,
};
pub use types::{Date, RowId, DATE_UNSET, DECIMAL_UNSET, INT_UNSET};
