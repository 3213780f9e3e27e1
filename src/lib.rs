//! Thread-safe multi-key key/value storage atop SQLite.
//!
//! # Intention
//!
//! - Store string records keyed by one or more ordered text columns.
//! - Query them through a composable predicate algebra compiled to
//!   parameterized SQL.
//! - Serialize every statement and transaction through one gateway per
//!   database file, so concurrent callers never race on it.
//!
//! # Architectural Boundaries
//!
//! - Only SQLite-backed key/value code belongs here.
//! - No query planning, secondary indexes, schema migration, or network
//!   access.
//!
//! # Example
//!
//! ```
//! use kv_sqlite::{Database, Predicate, Record};
//!
//! # fn main() -> kv_sqlite::Result<()> {
//! let db = Database::open_in_memory()?;
//! db.create("numbers", 3)?;
//! db.put_all(
//!     &[
//!         Record::new(["1", "number", "positive"], "One"),
//!         Record::new(["3", "number", "negative"], "-Three"),
//!     ],
//!     "numbers",
//! )?;
//!
//! let negative = Predicate::equal(1, "number") & Predicate::equal(2, "negative");
//! let found = db.get_one(&negative, "numbers")?;
//! assert_eq!(found.map(|r| r.value).as_deref(), Some("-Three"));
//! # Ok(())
//! # }
//! ```

mod database;
mod error;
mod gateway;
mod kv;
mod predicate;
mod record;
mod sql;

pub use database::Database;
pub use error::{Error, Result};
pub use predicate::{Predicate, SqlFragment};
pub use record::Record;
