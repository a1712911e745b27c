mod unit_of_work;


pub use unit_of_work::{TransactionError, UnitOfWork, UnitOfWorkState};

use crate::{
    driver::{
        Command, Connection, ConnectionState, DriverError, IsolationLevel, Rows, TransactionId,
    },
    error::{ArgumentError, Result},
    record::Record,
    schema::{RecordTemplate, SchemaCache, SchemaError},
    sql::{self, OrderBy, Statement},
    value::Value,
};
use std::{
    cell::{Cell, RefCell},
    rc::Rc,
    sync::Arc,
    time::Duration,
};
use tracing::{debug, trace};

///
/// SessionCore
///
/// Connection state shared between a session and its unit of work. The
/// connection sits behind a `RefCell` so the unit of work can settle its
/// transaction while the session still holds the core; no borrow outlives a
/// single driver call.
///

pub(crate) struct SessionCore<C: Connection> {
    connection: RefCell<C>,
    active: Cell<Option<TransactionId>>,
}

impl<C: Connection> SessionCore<C> {
    fn new(connection: C) -> Self {
        Self {
            connection: RefCell::new(connection),
            active: Cell::new(None),
        }
    }

    /// Run one driver call against the connection.
    pub(crate) fn with_connection<R>(&self, f: impl FnOnce(&mut C) -> R) -> R {
        f(&mut self.connection.borrow_mut())
    }

    pub(crate) fn active(&self) -> Option<TransactionId> {
        self.active.get()
    }

    pub(crate) fn set_active(&self, transaction: TransactionId) {
        self.active.set(Some(transaction));
    }

    pub(crate) fn clear_active(&self) {
        self.active.set(None);
    }
}

///
/// Session
///
/// One connection, at most one active transaction, and the CRUD surface over
/// discovered templates. A session is single-threaded by construction; the
/// schema cache does the cross-session sharing.
///

pub struct Session<C: Connection> {
    core: Rc<SessionCore<C>>,
    cache: Arc<SchemaCache>,
    command_timeout: Option<Duration>,
}

impl<C: Connection> Session<C> {
    /// Session over the process-wide schema cache.
    #[must_use]
    pub fn new(connection: C) -> Self {
        Self::with_cache(connection, SchemaCache::shared())
    }

    /// Session with an injected cache, which keeps tests and short-lived
    /// tools off the process-wide one.
    #[must_use]
    pub fn with_cache(connection: C, cache: Arc<SchemaCache>) -> Self {
        Self {
            core: Rc::new(SessionCore::new(connection)),
            cache,
            command_timeout: None,
        }
    }

    /// Apply a timeout to every statement this session issues. Discovery
    /// probes keep the driver default.
    #[must_use]
    pub fn command_timeout(mut self, timeout: Duration) -> Self {
        self.command_timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn connection_state(&self) -> ConnectionState {
        self.core.with_connection(|connection| connection.state())
    }

    /// Open the connection if it is closed. Safe to call repeatedly.
    pub fn open(&self) -> Result<()> {
        self.core.with_connection(|connection| {
            if connection.state() == ConnectionState::Closed {
                connection.open()?;
            }

            Ok(())
        })
    }

    /// Close the connection if it is open. Safe to call repeatedly.
    pub fn close(&self) -> Result<()> {
        self.core.with_connection(|connection| {
            if connection.state() != ConnectionState::Closed {
                connection.close()?;
            }

            Ok(())
        })
    }

    // ---- transactions ----

    #[must_use]
    pub fn unit_of_work_active(&self) -> bool {
        self.core.active().is_some()
    }

    /// Begin a unit of work at the default isolation level.
    pub fn unit_of_work(&self) -> Result<UnitOfWork<C>> {
        self.unit_of_work_with(IsolationLevel::default())
    }

    /// Begin a unit of work. Exactly one may be active per session; starting
    /// a second is a contract violation, not a silent replacement.
    pub fn unit_of_work_with(&self, isolation: IsolationLevel) -> Result<UnitOfWork<C>> {
        if self.unit_of_work_active() {
            return Err(TransactionError::AlreadyActive.into());
        }

        self.open()?;
        let transaction = self
            .core
            .with_connection(|connection| connection.begin(isolation))?;
        self.core.set_active(transaction);

        debug!(%transaction, ?isolation, "transaction started");

        Ok(UnitOfWork::new(Rc::clone(&self.core), transaction))
    }

    // ---- templates ----

    /// Discovered template for an entity name. The first use of a name
    /// probes the backend through the schema cache; later uses are lookups.
    pub fn template(&self, entity_name: &str) -> Result<Arc<RecordTemplate>> {
        if entity_name.is_empty() {
            return Err(ArgumentError::EmptyEntityName.into());
        }

        let transaction = self.core.active();

        self.core.with_connection(|connection| {
            self.cache.get_or_probe(entity_name, connection, transaction)
        })
    }

    /// Template fetch plus a blank record over it.
    pub fn create_entity(&self, entity_name: &str) -> Result<Record> {
        let template = self.template(entity_name)?;

        Ok(Record::from_template(template))
    }

    /// `create_entity` followed by a set for each given pair.
    pub fn create_entity_with<K, V>(
        &self,
        entity_name: &str,
        values: impl IntoIterator<Item = (K, V)>,
    ) -> Result<Record>
    where
        K: AsRef<str>,
        V: Into<Value>,
    {
        let mut record = self.create_entity(entity_name)?;

        for (column, value) in values {
            record.set(column.as_ref(), value)?;
        }

        Ok(record)
    }

    // ---- writes ----

    /// Insert one row built from a record's set columns.
    pub fn create(&self, record: &Record) -> Result<u64> {
        let statement = sql::insert(record)?;

        self.run(&statement)
    }

    /// Update one row by Id from a record's set columns.
    pub fn update(&self, record: &Record) -> Result<u64> {
        let statement = sql::update(record)?;

        self.run(&statement)
    }

    /// Delete one row by Id.
    pub fn delete(&self, entity_name: &str, id: impl Into<Value>) -> Result<u64> {
        let statement = sql::delete(entity_name, id);

        self.run(&statement)
    }

    /// Run a caller-assembled statement under the session's transaction and
    /// timeout, reporting the affected row count.
    pub fn execute_statement(&self, statement: &Statement) -> Result<u64> {
        self.run(statement)
    }

    // ---- reads ----

    /// Fetch one row by Id, carrying every template column.
    pub fn retrieve(&self, entity_name: &str, id: impl Into<Value>) -> Result<Option<Record>> {
        self.retrieve_with_columns(entity_name, id, &[])
    }

    /// Fetch one row by Id, restricted to `columns` when non-empty.
    pub fn retrieve_with_columns(
        &self,
        entity_name: &str,
        id: impl Into<Value>,
        columns: &[&str],
    ) -> Result<Option<Record>> {
        let template = self.template(entity_name)?;
        let statement = sql::fetch_by_id(&template, columns, id);
        let records = self.read(&template, &statement, columns)?;

        Ok(records.into_iter().next())
    }

    /// Fetch one stably-ordered page, carrying every template column.
    pub fn retrieve_multiple(
        &self,
        entity_name: &str,
        page_number: u32,
        page_size: u32,
        orders: &[OrderBy],
    ) -> Result<Vec<Record>> {
        self.retrieve_multiple_with_columns(entity_name, page_number, page_size, orders, &[])
    }

    /// Fetch one stably-ordered page, restricted to `columns` when non-empty.
    pub fn retrieve_multiple_with_columns(
        &self,
        entity_name: &str,
        page_number: u32,
        page_size: u32,
        orders: &[OrderBy],
        columns: &[&str],
    ) -> Result<Vec<Record>> {
        // checked ahead of the template lookup, which may probe on a miss
        sql::page_offset(page_number, page_size, orders)?;

        let template = self.template(entity_name)?;
        let statement = sql::fetch_page(&template, columns, page_number, page_size, orders)?;

        self.read(&template, &statement, columns)
    }

    // ---- plumbing ----

    fn command<'a>(&self, statement: &'a Statement) -> Command<'a> {
        Command {
            sql: &statement.sql,
            params: &statement.params,
            transaction: self.core.active(),
            timeout: self.command_timeout,
        }
    }

    fn run(&self, statement: &Statement) -> Result<u64> {
        self.open()?;

        debug!(sql = %statement.sql, params = statement.params.len(), "executing statement");

        let command = self.command(statement);
        let affected = self
            .core
            .with_connection(|connection| connection.execute(&command))?;

        Ok(affected)
    }

    fn read(
        &self,
        template: &Arc<RecordTemplate>,
        statement: &Statement,
        columns: &[&str],
    ) -> Result<Vec<Record>> {
        self.open()?;

        debug!(sql = %statement.sql, params = statement.params.len(), "querying statement");

        let command = self.command(statement);
        let mut rows = self
            .core
            .with_connection(|connection| connection.query(&command))?;

        let requested: Vec<&str> = if columns.is_empty() {
            template
                .columns()
                .iter()
                .map(|column| column.name.as_str())
                .collect()
        } else {
            columns.to_vec()
        };

        // requested names resolve against the result's reported metadata
        let mut ordinals = Vec::with_capacity(requested.len());
        for name in &requested {
            let ordinal = rows
                .columns()
                .iter()
                .position(|column| column.is_named(name))
                .ok_or_else(|| SchemaError::ColumnNotFound {
                    entity: template.entity_name().to_string(),
                    column: (*name).to_string(),
                })?;
            ordinals.push(ordinal);
        }

        let mut records = Vec::new();
        while let Some(row) = rows.next_row()? {
            let mut record = Record::from_template(Arc::clone(template));

            for (name, ordinal) in requested.iter().zip(&ordinals) {
                let value = row
                    .get(*ordinal)
                    .cloned()
                    .ok_or_else(|| DriverError::new("row is shorter than its reported columns"))?;
                record.set(name, value)?;
            }

            records.push(record);
        }

        trace!(rows = records.len(), "materialized result rows");

        Ok(records)
    }
}

impl<C: Connection> Drop for Session<C> {
    fn drop(&mut self) {
        let _ = self.close();
    }
}
