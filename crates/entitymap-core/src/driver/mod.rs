mod param;

pub use param::{CommonType, ParamType, Parameter};

use crate::{schema::ColumnDescriptor, value::Value};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error as ThisError;

///
/// DriverError
///
/// Opaque backend failure. The mapping layer never translates or retries
/// these; whatever the driver reports propagates to the caller unchanged.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("driver error: {message}")]
pub struct DriverError {
    pub message: String,
}

impl DriverError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

///
/// ConnectionState
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum ConnectionState {
    Closed,
    Open,
}

///
/// IsolationLevel
///
/// Requested transaction isolation, forwarded to the backend verbatim.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum IsolationLevel {
    ReadUncommitted,
    #[default]
    ReadCommitted,
    RepeatableRead,
    Serializable,
    Snapshot,
}

///
/// TransactionId
///
/// Opaque driver-issued transaction handle. The session threads it through
/// every command run while the transaction is active.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
#[display("tx{_0}")]
pub struct TransactionId(u64);

impl TransactionId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

///
/// Command
///
/// One statement ready for the driver: SQL text, ordered parameters, the
/// transaction to run under, and an optional timeout passed straight through.
///

#[derive(Debug)]
pub struct Command<'a> {
    pub sql: &'a str,
    pub params: &'a [Parameter],
    pub transaction: Option<TransactionId>,
    pub timeout: Option<Duration>,
}

impl<'a> Command<'a> {
    #[must_use]
    pub const fn new(sql: &'a str) -> Self {
        Self {
            sql,
            params: &[],
            transaction: None,
            timeout: None,
        }
    }
}

///
/// Connection
///
/// Capability surface a backend driver exposes to the session layer. A
/// connection owns at most one active transaction at a time; the session
/// enforces that, the driver only issues and settles handles.
///

pub trait Connection {
    /// Result-set handle produced by `query`. The rows own their metadata,
    /// so the connection borrow ends before iteration starts.
    type Rows: Rows;

    fn state(&self) -> ConnectionState;

    /// Open the underlying connection. Must be a no-op when already open.
    fn open(&mut self) -> Result<(), DriverError>;

    /// Close the underlying connection. Must be a no-op when already closed.
    fn close(&mut self) -> Result<(), DriverError>;

    /// Begin a transaction at the given isolation.
    fn begin(&mut self, isolation: IsolationLevel) -> Result<TransactionId, DriverError>;

    fn commit(&mut self, transaction: TransactionId) -> Result<(), DriverError>;

    fn rollback(&mut self, transaction: TransactionId) -> Result<(), DriverError>;

    /// Run a statement that returns no rows, reporting the affected count.
    fn execute(&mut self, command: &Command<'_>) -> Result<u64, DriverError>;

    /// Run a row-returning statement.
    fn query(&mut self, command: &Command<'_>) -> Result<Self::Rows, DriverError>;
}

///
/// Rows
///
/// Forward-only result cursor. `columns` reports descriptor metadata for the
/// result shape, which is how the schema probe reads a column layout without
/// consuming any row.
///

pub trait Rows {
    fn columns(&self) -> &[ColumnDescriptor];

    /// Next row as one value per reported column, `Value::Null` standing in
    /// for backend nulls. `Ok(None)` ends the cursor.
    fn next_row(&mut self) -> Result<Option<Vec<Value>>, DriverError>;
}
