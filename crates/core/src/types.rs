//! Shared scalar aliases and sentinels for the tempo engine.

/// Handle to a row slot inside a table's slab.
///
/// Row ids are stable for the lifetime of the row: mutating a row through
/// one index and re-looking it up through another yields the same id.
pub type RowId = u32;

/// Timestamp carried by date columns.
///
/// Dates are opaque 64-bit values produced by the workload loader; the
/// engine stores and compares them without normalising.
pub type Date = i64;

/// Sentinel for an integer column that was never assigned.
pub const INT_UNSET: i32 = i32::MIN;

/// Sentinel for a decimal column that was never assigned.
pub const DECIMAL_UNSET: f64 = f64::MIN;

/// Sentinel for a date column that was never assigned.
pub const DATE_UNSET: Date = 0;
