mod cache;
mod column;
mod template;

pub use cache::SchemaCache;
pub use column::ColumnDescriptor;
pub use template::RecordTemplate;

use crate::value::ValueKind;
use thiserror::Error as ThisError;

///
/// SchemaError
///
/// A write or lookup that contradicts discovered column metadata. Raised
/// before any SQL is built, so a violating record is never partially applied.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum SchemaError {
    #[error("entity '{entity}' has no column '{column}'")]
    ColumnNotFound { entity: String, column: String },

    #[error("column '{column}' expects {expected}, found {found}")]
    TypeMismatch {
        column: String,
        expected: ValueKind,
        found: ValueKind,
    },

    #[error("column '{column}' does not allow null values")]
    NullNotAllowed { column: String },

    #[error("entity '{entity}' reports duplicate column '{column}'")]
    DuplicateColumn { entity: String, column: String },
}
