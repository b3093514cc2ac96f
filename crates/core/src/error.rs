//! Error types for the tempo engine.

use crate::types::RowId;
use alloc::string::String;
use core::fmt;

/// Result type alias for tempo operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types for tempo engine operations.
#[derive(Debug)]
pub enum Error {
    /// A lookup that the caller requires to succeed found no row.
    RowNotFound {
        table: String,
    },
    /// A row handle pointed at a freed or never-occupied slot.
    VacantSlot {
        table: String,
        id: RowId,
    },
    /// A table was probed through an index id it does not carry.
    UnknownIndex {
        table: String,
        index: usize,
    },
    /// A program record carried an inconsistent payload.
    InvalidProgram {
        message: String,
    },
    /// A loader failed to populate the database.
    LoadFailed {
        message: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::RowNotFound { table } => {
                write!(f, "Row not found in table {}", table)
            }
            Error::VacantSlot { table, id } => {
                write!(f, "Vacant row slot {} in table {}", id, table)
            }
            Error::UnknownIndex { table, index } => {
                write!(f, "Table {} has no index {}", table, index)
            }
            Error::InvalidProgram { message } => {
                write!(f, "Invalid program record: {}", message)
            }
            Error::LoadFailed { message } => {
                write!(f, "Load failed: {}", message)
            }
        }
    }
}

impl Error {
    /// Creates a row-not-found error.
    pub fn row_not_found(table: impl Into<String>) -> Self {
        Error::RowNotFound {
            table: table.into(),
        }
    }

    /// Creates a vacant-slot error.
    pub fn vacant_slot(table: impl Into<String>, id: RowId) -> Self {
        Error::VacantSlot {
            table: table.into(),
            id,
        }
    }

    /// Creates an unknown-index error.
    pub fn unknown_index(table: impl Into<String>, index: usize) -> Self {
        Error::UnknownIndex {
            table: table.into(),
            index,
        }
    }

    /// Creates an invalid-program error.
    pub fn invalid_program(message: impl Into<String>) -> Self {
        Error::InvalidProgram {
            message: message.into(),
        }
    }

    /// Creates a load-failed error.
    pub fn load_failed(message: impl Into<String>) -> Self {
        Error::LoadFailed {
            message: message.into(),
        }
    }
}
