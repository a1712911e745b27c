use crate::{
    driver::{Connection, TransactionId},
    error::{Error, Result},
    session::SessionCore,
};
use derive_more::Display;
use std::{fmt, rc::Rc};
use thiserror::Error as ThisError;
use tracing::debug;

///
/// UnitOfWorkState
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum UnitOfWorkState {
    Active,
    Committed,
    RolledBack,
}

///
/// TransactionError
///
/// Unit-of-work lifecycle misuse, raised before any driver call is made.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum TransactionError {
    #[error("unit of work is {state}; save_changes requires an active transaction")]
    NotActive { state: UnitOfWorkState },

    #[error("a unit of work is already active on this session")]
    AlreadyActive,
}

///
/// UnitOfWork
///
/// Wrapper around exactly one transaction. `save_changes` commits; dropping
/// a still-active unit rolls back. Both transitions are terminal: the
/// transaction handle is released and the owning session's active marker is
/// cleared, whichever way the unit ends.
///

pub struct UnitOfWork<C: Connection> {
    core: Rc<SessionCore<C>>,
    transaction: Option<TransactionId>,
    state: UnitOfWorkState,
}

impl<C: Connection> UnitOfWork<C> {
    pub(crate) fn new(core: Rc<SessionCore<C>>, transaction: TransactionId) -> Self {
        Self {
            core,
            transaction: Some(transaction),
            state: UnitOfWorkState::Active,
        }
    }

    #[must_use]
    pub const fn state(&self) -> UnitOfWorkState {
        self.state
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self.state, UnitOfWorkState::Active)
    }

    /// Transaction handle, present while the unit is still active.
    #[must_use]
    pub const fn transaction_id(&self) -> Option<TransactionId> {
        self.transaction
    }

    /// Commit the wrapped transaction. Fails with a state error once the
    /// unit is terminal. A driver-side commit failure leaves the unit active
    /// with its handle in place, so a later drop still rolls back.
    pub fn save_changes(&mut self) -> Result<()> {
        let Some(transaction) = self.transaction.take() else {
            return Err(TransactionError::NotActive { state: self.state }.into());
        };

        match self
            .core
            .with_connection(|connection| connection.commit(transaction))
        {
            Ok(()) => {
                self.settle(UnitOfWorkState::Committed);
                debug!(%transaction, "transaction committed");

                Ok(())
            }
            Err(err) => {
                self.transaction = Some(transaction);

                Err(err.into())
            }
        }
    }

    /// Roll back explicitly instead of via drop, surfacing any driver
    /// failure. A no-op once the unit is terminal.
    pub fn rollback(mut self) -> Result<()> {
        self.rollback_in_place()
    }

    fn rollback_in_place(&mut self) -> Result<()> {
        let Some(transaction) = self.transaction.take() else {
            return Ok(());
        };

        let result = self
            .core
            .with_connection(|connection| connection.rollback(transaction));

        // the handle is released even when the driver reports a failure
        self.settle(UnitOfWorkState::RolledBack);
        debug!(%transaction, "transaction rolled back");

        result.map_err(Error::from)
    }

    fn settle(&mut self, state: UnitOfWorkState) {
        self.state = state;
        self.core.clear_active();
    }
}

impl<C: Connection> fmt::Debug for UnitOfWork<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnitOfWork")
            .field("transaction", &self.transaction)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<C: Connection> Drop for UnitOfWork<C> {
    fn drop(&mut self) {
        let _ = self.rollback_in_place();
    }
}
