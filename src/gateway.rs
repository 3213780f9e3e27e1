use std::sync::{Mutex, MutexGuard, PoisonError};

use rusqlite::{Connection, Params, Transaction};
use tracing::trace;

use crate::error::{Error, Result};
use crate::record::Record;

/// Serializes all access to one physical SQLite connection.
///
/// The mutex is the single critical section for the whole database file:
/// at most one statement or transaction runs at any instant, however many
/// threads share the owning handle. Calls block until their unit of work
/// completes.
#[derive(Debug)]
pub(crate) struct Gateway {
    conn: Mutex<Connection>,
}

impl Gateway {
    pub(crate) fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Connection> {
        // A failed statement leaves the connection reusable, so a lock
        // poisoned by a panicking caller is safe to recover.
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Execute a single DDL or DML statement. Returns the number of rows
    /// changed.
    pub(crate) fn execute<P: Params>(&self, sql: &str, params: P) -> Result<usize> {
        let conn = self.lock();
        trace!(statement = sql, "execute");
        Ok(conn.execute(sql, params)?)
    }

    /// Run a SELECT and decode every row, keys first, value last.
    pub(crate) fn query_rows<P: Params>(&self, sql: &str, params: P) -> Result<Vec<Record>> {
        let conn = self.lock();
        trace!(statement = sql, "query");
        let mut stmt = conn.prepare(sql)?;
        let column_count = stmt.column_count();
        let rows = stmt.query_map(params, |row| Record::from_row(row, column_count))?;
        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    /// Run `work` inside one transaction. The commit happens only after
    /// the whole closure succeeds; any error rolls back every statement
    /// executed so far and no partial effect remains visible.
    pub(crate) fn with_transaction<T>(
        &self,
        work: impl FnOnce(&Transaction<'_>) -> Result<T>,
    ) -> Result<T> {
        let mut conn = self.lock();
        trace!("begin transaction");
        let tx = conn.transaction().map_err(Error::from)?;
        let out = work(&tx)?;
        tx.commit()?;
        Ok(out)
    }
}
