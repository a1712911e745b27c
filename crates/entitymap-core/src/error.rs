use crate::{driver::DriverError, schema::SchemaError, session::TransactionError};
use thiserror::Error as ThisError;

/// Crate-wide result alias for session-level operations.
pub type Result<T> = std::result::Result<T, Error>;

///
/// Error
///
/// Top-level failure surface. Each variant wraps one module-level error so
/// callers can match on the failure family without losing detail: rejected
/// arguments, schema violations, transaction state misuse, and backend
/// failures stay distinct all the way up.
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    ArgumentError(#[from] ArgumentError),

    #[error(transparent)]
    SchemaError(#[from] SchemaError),

    #[error(transparent)]
    TransactionError(#[from] TransactionError),

    #[error(transparent)]
    DriverError(#[from] DriverError),
}

impl Error {
    #[must_use]
    pub const fn is_argument(&self) -> bool {
        matches!(self, Self::ArgumentError(_))
    }

    #[must_use]
    pub const fn is_schema_violation(&self) -> bool {
        matches!(self, Self::SchemaError(_))
    }

    #[must_use]
    pub const fn is_transaction_state(&self) -> bool {
        matches!(self, Self::TransactionError(_))
    }

    #[must_use]
    pub const fn is_driver(&self) -> bool {
        matches!(self, Self::DriverError(_))
    }
}

///
/// ArgumentError
///
/// Rejected caller input. Raised before any statement text is built, so no
/// partially-formed SQL ever reaches the driver.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ArgumentError {
    #[error("entity name must not be empty")]
    EmptyEntityName,

    #[error("page number must be greater than zero")]
    PageNumberZero,

    #[error("paged retrieval requires at least one order expression")]
    EmptyOrderList,

    #[error("page {page_number} with size {page_size} exceeds the row offset range")]
    PageWindowOverflow { page_number: u32, page_size: u32 },

    #[error("record for '{entity}' has no 'Id' value; create and update require one")]
    MissingId { entity: String },

    #[error("record for '{entity}' has no columns to update besides 'Id'")]
    NoUpdatableColumns { entity: String },
}
