//! Core runtime for EntityMap: runtime-discovered record templates, typed
//! records, parameterized SQL statement builders, and unit-of-work sessions.
//!
//! No compile-time mapped structs: a [`session::Session`] probes column
//! metadata from the live backend the first time an entity name is seen,
//! caches the resulting template process-wide, and materializes rows into
//! [`record::Record`] values checked against that template. The backend
//! itself stays behind the capability-typed [`driver`] traits.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod driver;
pub mod error;
pub mod record;
pub mod schema;
pub mod session;
pub mod sql;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_support;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, drivers, builders, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        driver::IsolationLevel,
        record::Record,
        schema::{ColumnDescriptor, RecordTemplate, SchemaCache},
        session::{Session, UnitOfWork, UnitOfWorkState},
        sql::{Direction, OrderBy},
        value::{Value, ValueKind},
    };
}
