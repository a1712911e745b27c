use crate::{
    driver::{Command, Connection, ConnectionState, Rows, TransactionId},
    error::Error,
    schema::RecordTemplate,
};
use std::{
    collections::HashMap,
    sync::{Arc, OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};
use tracing::debug;

///
/// SchemaCache
///
/// Process-wide template cache keyed by lowercased entity name. Lookups take
/// a read lock; a miss probes the backend outside any lock and publishes the
/// result with insert-if-absent, so concurrent first-use of one entity may
/// probe more than once but always converges on a single stored template.
///

#[derive(Debug, Default)]
pub struct SchemaCache {
    templates: RwLock<HashMap<String, Arc<RecordTemplate>>>,
}

impl SchemaCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared process-wide cache, used by every session that does not inject
    /// its own.
    #[must_use]
    pub fn shared() -> Arc<Self> {
        static SHARED: OnceLock<Arc<SchemaCache>> = OnceLock::new();

        Arc::clone(SHARED.get_or_init(|| Arc::new(Self::new())))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    #[must_use]
    pub fn contains(&self, entity_name: &str) -> bool {
        self.read().contains_key(&cache_key(entity_name))
    }

    /// Cached template lookup without probing.
    #[must_use]
    pub fn get(&self, entity_name: &str) -> Option<Arc<RecordTemplate>> {
        self.read().get(&cache_key(entity_name)).cloned()
    }

    /// Drop every cached template; the next use of each entity probes again.
    pub fn clear(&self) {
        self.write().clear();
    }

    /// Fetch the template for `entity_name`, probing the backend on a miss.
    ///
    /// The probe runs under the caller's connection and joins `transaction`
    /// when one is active; it carries no per-command timeout, so the driver
    /// default applies. When two callers race on the same entity the first
    /// published template wins and the loser's probe result is discarded.
    pub fn get_or_probe<C: Connection>(
        &self,
        entity_name: &str,
        connection: &mut C,
        transaction: Option<TransactionId>,
    ) -> Result<Arc<RecordTemplate>, Error> {
        let key = cache_key(entity_name);

        if let Some(template) = self.read().get(&key) {
            return Ok(Arc::clone(template));
        }

        let template = Self::probe(entity_name, connection, transaction)?;

        let mut map = self.write();
        let entry = map.entry(key).or_insert_with(|| Arc::new(template));

        Ok(Arc::clone(entry))
    }

    /// Issue the one-row metadata probe and shape the reported columns into
    /// a template. Column order is whatever the backend reports.
    fn probe<C: Connection>(
        entity_name: &str,
        connection: &mut C,
        transaction: Option<TransactionId>,
    ) -> Result<RecordTemplate, Error> {
        if connection.state() == ConnectionState::Closed {
            connection.open()?;
        }

        let sql = format!("SELECT TOP 1 * FROM {entity_name}");
        debug!(entity = entity_name, "probing column metadata");

        let mut command = Command::new(&sql);
        command.transaction = transaction;

        let rows = connection.query(&command)?;
        let columns = rows.columns().to_vec();

        let template = RecordTemplate::new(entity_name, columns)?;

        Ok(template)
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Arc<RecordTemplate>>> {
        self.templates.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Arc<RecordTemplate>>> {
        self.templates
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Cache keys are case-insensitive entity names.
fn cache_key(entity_name: &str) -> String {
    entity_name.to_ascii_lowercase()
}
