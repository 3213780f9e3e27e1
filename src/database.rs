use std::path::{Path, PathBuf};

use rusqlite::{params, params_from_iter, Connection};
use tracing::debug;

use crate::error::{Error, Result};
use crate::gateway::Gateway;
use crate::predicate::Predicate;
use crate::record::Record;
use crate::sql;

/// A multi-key key/value store over one SQLite file, safe to share
/// across threads.
///
/// Tables are keyed by a fixed number of text columns chosen at creation
/// and hold one text value per key tuple. Every operation funnels
/// through a single serialized gateway, so concurrent callers never race
/// on the file. Share one instance per file via [`std::sync::Arc`];
/// opening the same file through two instances is unsupported.
///
/// Table names are interpolated into SQL verbatim and must stay within
/// `[A-Za-z_][A-Za-z0-9_]*`.
#[derive(Debug)]
pub struct Database {
    gateway: Gateway,
    path: Option<PathBuf>,
}

impl Database {
    /// Open the database file at `path`, creating it if missing.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let conn = Connection::open(&path).map_err(|source| Error::Open {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), "database opened");
        Ok(Self {
            gateway: Gateway::new(conn),
            path: Some(path),
        })
    }

    /// Open `name` inside the platform documents directory, falling back
    /// to the home directory on platforms without one.
    ///
    /// Fails with [`Error::DocumentsUnavailable`] when neither directory
    /// can be resolved, and with [`Error::Open`] when the file itself
    /// cannot be opened.
    pub fn open_named(name: &str) -> Result<Self> {
        let dir = dirs::document_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| Error::DocumentsUnavailable {
                name: name.to_string(),
            })?;
        Self::open(dir.join(name))
    }

    /// Open a private in-memory database. Contents are lost when the
    /// handle drops.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::Open {
            path: PathBuf::from(":memory:"),
            source,
        })?;
        Ok(Self {
            gateway: Gateway::new(conn),
            path: None,
        })
    }

    /// Path of the underlying file, `None` for in-memory databases.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Create `table` with `arity` key columns and one value column.
    ///
    /// Idempotent: creating a table that already exists is a no-op and
    /// leaves the existing arity untouched. `arity` must be at least 1.
    pub fn create(&self, table: &str, arity: usize) -> Result<()> {
        if arity == 0 {
            return Err(Error::ArityMismatch {
                expected: 1,
                actual: 0,
            });
        }
        let stmt = sql::create_table(table, arity);
        self.gateway
            .execute(&stmt, params![])
            .map_err(|e| e.into_schema(table))?;
        debug!(table, arity, "table ready");
        Ok(())
    }

    /// True when `table` holds no rows.
    ///
    /// A missing table surfaces as [`Error::Query`], never as a false
    /// "empty".
    pub fn is_empty(&self, table: &str) -> Result<bool> {
        let rows = self.gateway.query_rows(&sql::select_one(table), params![])?;
        Ok(rows.is_empty())
    }

    /// Store `record`, fully replacing any row with the same key tuple.
    pub fn put(&self, record: &Record, table: &str) -> Result<()> {
        let stmt = sql::replace_into(table, record.keys.len());
        self.gateway
            .execute(&stmt, params_from_iter(record.to_params()))?;
        Ok(())
    }

    /// Store every record as one atomic batch: either all land or none
    /// do. The table arity is taken from the first record; a later
    /// record with a different key count aborts and rolls back the whole
    /// batch. An empty slice returns without touching the database.
    pub fn put_all(&self, records: &[Record], table: &str) -> Result<()> {
        let Some(first) = records.first() else {
            return Ok(());
        };
        let arity = first.keys.len();
        let stmt = sql::replace_into(table, arity);
        self.gateway.with_transaction(|tx| {
            for record in records {
                record.check_arity(arity)?;
                tx.execute(&stmt, params_from_iter(record.to_params()))
                    .map_err(Error::from)?;
            }
            Ok(())
        })
    }

    /// The first record matching `predicate`, or `None`. Which record is
    /// first is up to the engine's scan order.
    pub fn get_one(&self, predicate: &Predicate, table: &str) -> Result<Option<Record>> {
        let fragment = predicate.to_fragment()?;
        let stmt = sql::select_one_where(table, &fragment.clause);
        let rows = self
            .gateway
            .query_rows(&stmt, params_from_iter(fragment.params))?;
        Ok(rows.into_iter().next())
    }

    /// Every record in `table`, in engine scan order.
    pub fn get_all(&self, table: &str) -> Result<Vec<Record>> {
        self.gateway.query_rows(&sql::select_all(table), params![])
    }

    /// Every record matching `predicate`, in engine scan order.
    pub fn get_all_where(&self, predicate: &Predicate, table: &str) -> Result<Vec<Record>> {
        let fragment = predicate.to_fragment()?;
        let stmt = sql::select_where(table, &fragment.clause);
        self.gateway
            .query_rows(&stmt, params_from_iter(fragment.params))
    }

    /// Delete every record matching `predicate`.
    pub fn delete(&self, predicate: &Predicate, table: &str) -> Result<()> {
        let fragment = predicate.to_fragment()?;
        let stmt = sql::delete_where(table, &fragment.clause);
        self.gateway
            .execute(&stmt, params_from_iter(fragment.params))?;
        Ok(())
    }

    /// Delete every record in `table`.
    pub fn delete_all(&self, table: &str) -> Result<()> {
        self.gateway.execute(&sql::delete_all(table), params![])?;
        Ok(())
    }

    /// Drop `table` entirely. Idempotent: dropping an absent table is a
    /// no-op. A later [`create`](Self::create) may use a different
    /// arity.
    pub fn drop(&self, table: &str) -> Result<()> {
        self.gateway
            .execute(&sql::drop_table(table), params![])
            .map_err(|e| e.into_schema(table))?;
        debug!(table, "table dropped");
        Ok(())
    }
}
