//! Tempo Engine - TPC-C transaction programs over the tempo store.
//!
//! The engine wires the nine benchmark tables with their index plans,
//! implements the five transaction procedures, and drives a
//! pre-generated program sequence against them:
//!
//! - `schema`: `Config`, `Db`, index ids and capacity formulas
//! - `txn`: NewOrder, Payment, OrderStatus, Delivery, StockLevel
//! - `workload`: program records, dispatcher, loader surface
//! - `verify`: reference-snapshot comparison
//!
//! # Example
//!
//! ```rust
//! use tempo_engine::schema::{Config, Db};
//! use tempo_engine::workload::{run_workload, Loader, SeedLoader};
//!
//! let config = Config { warehouses: 1, programs: 20 };
//! let mut db = Db::new(&config);
//! let mut loader = SeedLoader::sample(&config);
//! loader.load(&mut db).unwrap();
//!
//! let programs = loader.programs().unwrap();
//! let stats = run_workload(&mut db, &programs).unwrap();
//! assert_eq!(stats.executed, 20);
//! ```

pub mod schema;
pub mod txn;
pub mod verify;
pub mod workload;

pub use schema::{Config, Db};
pub use tempo_core::{Error, Result};
