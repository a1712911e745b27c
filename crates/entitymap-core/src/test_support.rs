//! Shared unit-test fixtures: the Customer template every module tests
//! against, plus a scripted driver double that replays canned results and
//! records every call it sees.

use crate::{
    driver::{
        Command, Connection, ConnectionState, DriverError, IsolationLevel, Parameter, Rows,
        TransactionId,
    },
    schema::{ColumnDescriptor, RecordTemplate},
    value::{Value, ValueKind},
};
use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
    rc::Rc,
    sync::Arc,
    time::Duration,
};

// ---- fixtures ----

pub(crate) fn column(
    name: &str,
    kind: ValueKind,
    provider_type: i32,
    ordinal: usize,
    allow_null: bool,
) -> ColumnDescriptor {
    ColumnDescriptor {
        name: name.to_string(),
        kind,
        provider_type_name: kind.label().to_ascii_lowercase(),
        provider_type,
        ordinal,
        size: -1,
        allow_null,
    }
}

/// Columns the backend would report for the Customer table.
pub(crate) fn customer_columns() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor {
            name: "Id".to_string(),
            kind: ValueKind::Int32,
            provider_type_name: "int".to_string(),
            provider_type: 8,
            ordinal: 0,
            size: 4,
            allow_null: false,
        },
        ColumnDescriptor {
            name: "Name".to_string(),
            kind: ValueKind::Text,
            provider_type_name: "nvarchar".to_string(),
            provider_type: 12,
            ordinal: 1,
            size: 50,
            allow_null: true,
        },
    ]
}

pub(crate) fn customer_template() -> Arc<RecordTemplate> {
    let template =
        RecordTemplate::new("Customer", customer_columns()).expect("customer fixture should build");

    Arc::new(template)
}

// ---- scripted driver ----

///
/// ScriptedResult
///
/// One canned outcome for the next execute or query the connection sees.
///

pub(crate) enum ScriptedResult {
    Rows(Vec<ColumnDescriptor>, Vec<Vec<Value>>),
    Affected(u64),
    Error(String),
}

///
/// RecordedCommand
///
/// Everything a command carried when it hit the driver.
///

#[derive(Clone, Debug)]
pub(crate) struct RecordedCommand {
    pub(crate) sql: String,
    pub(crate) params: Vec<Parameter>,
    pub(crate) transaction: Option<TransactionId>,
    pub(crate) timeout: Option<Duration>,
}

///
/// Script
///
/// Shared side of the double: results to replay and a log of every driver
/// call. Tests keep one handle while the connection moves into a session.
///

#[derive(Default)]
pub(crate) struct Script {
    results: RefCell<VecDeque<ScriptedResult>>,
    commands: RefCell<Vec<RecordedCommand>>,
    begun: RefCell<Vec<IsolationLevel>>,
    committed: RefCell<Vec<TransactionId>>,
    rolled_back: RefCell<Vec<TransactionId>>,
    opens: Cell<usize>,
    closes: Cell<usize>,
    fail_next_commit: Cell<bool>,
}

impl Script {
    pub(crate) fn push_rows(&self, columns: Vec<ColumnDescriptor>, rows: Vec<Vec<Value>>) {
        self.results
            .borrow_mut()
            .push_back(ScriptedResult::Rows(columns, rows));
    }

    /// Script the Customer metadata probe: column headers, no rows.
    pub(crate) fn push_customer_probe(&self) {
        self.push_rows(customer_columns(), Vec::new());
    }

    pub(crate) fn push_affected(&self, affected: u64) {
        self.results
            .borrow_mut()
            .push_back(ScriptedResult::Affected(affected));
    }

    pub(crate) fn push_error(&self, message: &str) {
        self.results
            .borrow_mut()
            .push_back(ScriptedResult::Error(message.to_string()));
    }

    pub(crate) fn fail_next_commit(&self) {
        self.fail_next_commit.set(true);
    }

    pub(crate) fn commands(&self) -> Vec<RecordedCommand> {
        self.commands.borrow().clone()
    }

    pub(crate) fn command_count(&self) -> usize {
        self.commands.borrow().len()
    }

    pub(crate) fn begun(&self) -> Vec<IsolationLevel> {
        self.begun.borrow().clone()
    }

    pub(crate) fn committed(&self) -> Vec<TransactionId> {
        self.committed.borrow().clone()
    }

    pub(crate) fn rolled_back(&self) -> Vec<TransactionId> {
        self.rolled_back.borrow().clone()
    }

    pub(crate) fn opens(&self) -> usize {
        self.opens.get()
    }

    pub(crate) fn closes(&self) -> usize {
        self.closes.get()
    }

    fn next_result(&self) -> Result<ScriptedResult, DriverError> {
        self.results
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| DriverError::new("script exhausted"))
    }
}

///
/// ScriptedConnection
///
/// Driver double that replays the script in order and hands out sequential
/// transaction ids.
///

pub(crate) struct ScriptedConnection {
    script: Rc<Script>,
    state: ConnectionState,
    next_transaction: u64,
}

impl ScriptedConnection {
    pub(crate) fn new() -> (Self, Rc<Script>) {
        let script = Rc::new(Script::default());
        let connection = Self {
            script: Rc::clone(&script),
            state: ConnectionState::Closed,
            next_transaction: 1,
        };

        (connection, script)
    }

    fn record(&self, command: &Command<'_>) {
        self.script.commands.borrow_mut().push(RecordedCommand {
            sql: command.sql.to_string(),
            params: command.params.to_vec(),
            transaction: command.transaction,
            timeout: command.timeout,
        });
    }
}

impl Connection for ScriptedConnection {
    type Rows = ScriptedRows;

    fn state(&self) -> ConnectionState {
        self.state
    }

    fn open(&mut self) -> Result<(), DriverError> {
        self.script.opens.set(self.script.opens.get() + 1);
        self.state = ConnectionState::Open;

        Ok(())
    }

    fn close(&mut self) -> Result<(), DriverError> {
        self.script.closes.set(self.script.closes.get() + 1);
        self.state = ConnectionState::Closed;

        Ok(())
    }

    fn begin(&mut self, isolation: IsolationLevel) -> Result<TransactionId, DriverError> {
        self.script.begun.borrow_mut().push(isolation);

        let transaction = TransactionId::new(self.next_transaction);
        self.next_transaction += 1;

        Ok(transaction)
    }

    fn commit(&mut self, transaction: TransactionId) -> Result<(), DriverError> {
        if self.script.fail_next_commit.take() {
            return Err(DriverError::new("commit refused by script"));
        }

        self.script.committed.borrow_mut().push(transaction);

        Ok(())
    }

    fn rollback(&mut self, transaction: TransactionId) -> Result<(), DriverError> {
        self.script.rolled_back.borrow_mut().push(transaction);

        Ok(())
    }

    fn execute(&mut self, command: &Command<'_>) -> Result<u64, DriverError> {
        self.record(command);

        match self.script.next_result()? {
            ScriptedResult::Affected(affected) => Ok(affected),
            ScriptedResult::Rows(..) => Err(DriverError::new("script expected a query next")),
            ScriptedResult::Error(message) => Err(DriverError::new(message)),
        }
    }

    fn query(&mut self, command: &Command<'_>) -> Result<Self::Rows, DriverError> {
        self.record(command);

        match self.script.next_result()? {
            ScriptedResult::Rows(columns, rows) => Ok(ScriptedRows {
                columns,
                rows: rows.into(),
            }),
            ScriptedResult::Affected(_) => Err(DriverError::new("script expected an execute next")),
            ScriptedResult::Error(message) => Err(DriverError::new(message)),
        }
    }
}

///
/// ScriptedRows
///

pub(crate) struct ScriptedRows {
    columns: Vec<ColumnDescriptor>,
    rows: VecDeque<Vec<Value>>,
}

impl Rows for ScriptedRows {
    fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    fn next_row(&mut self) -> Result<Option<Vec<Value>>, DriverError> {
        Ok(self.rows.pop_front())
    }
}
