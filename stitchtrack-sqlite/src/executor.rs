//! Unit of work shared by the repositories of one request.
//!
//! All repositories built for a session hold a clone of the same
//! [`Executor`], so their statements run in one SQLite transaction and
//! commit or roll back together. Write sessions additionally hold the
//! store-wide write lock for their whole lifetime.

use sqlx::{Sqlite, Transaction};
use std::error::Error;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

pub type TransactionCell = Arc<Mutex<Option<Transaction<'static, Sqlite>>>>;

#[derive(Clone)]
pub struct Executor {
    pub tx: TransactionCell,
}

impl Executor {
    pub fn new(tx: Transaction<'static, Sqlite>) -> Self {
        Self {
            tx: Arc::new(Mutex::new(Some(tx))),
        }
    }

    async fn take(&self) -> Result<Transaction<'static, Sqlite>, Box<dyn Error + Send + Sync>> {
        self.tx
            .lock()
            .await
            .take()
            .ok_or_else(|| "Transaction has been consumed".into())
    }
}

/// An open transaction plus, for writers, the store write lock.
///
/// Dropping a session without calling [`UnitOfWork::commit`] rolls the
/// transaction back.
pub struct UnitOfWork {
    executor: Executor,
    _write_guard: Option<OwnedMutexGuard<()>>,
}

impl UnitOfWork {
    pub(crate) fn new(tx: Transaction<'static, Sqlite>, write_guard: Option<OwnedMutexGuard<()>>) -> Self {
        Self {
            executor: Executor::new(tx),
            _write_guard: write_guard,
        }
    }

    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    pub fn is_writer(&self) -> bool {
        self._write_guard.is_some()
    }

    pub async fn commit(self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let tx = self.executor.take().await?;
        tx.commit().await?;
        Ok(())
    }

    pub async fn rollback(self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let tx = self.executor.take().await?;
        tx.rollback().await?;
        Ok(())
    }
}
