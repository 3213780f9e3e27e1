use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias for results produced by this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the store.
///
/// Statement failures keep the underlying [`rusqlite::Error`] as their
/// source. A query that matches zero rows is not an error; lookups report
/// that case as `Ok(None)` or an empty vector.
#[derive(Debug, Error)]
pub enum Error {
    /// The database file could not be created or opened.
    #[error("cannot open database at '{}'", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// No documents (or home) directory could be resolved for a named
    /// database.
    #[error("no documents directory available for database '{name}'")]
    DocumentsUnavailable { name: String },

    /// A DDL statement against `table` was rejected by the engine.
    #[error("schema statement failed for table '{table}'")]
    Schema {
        table: String,
        #[source]
        source: rusqlite::Error,
    },

    /// A write violated a primary-key or NOT NULL constraint.
    #[error("constraint violated")]
    Constraint(#[source] rusqlite::Error),

    /// The engine rejected a statement, or the statement referenced a
    /// missing table.
    #[error("query failed")]
    Query(#[source] rusqlite::Error),

    /// A key count did not match the arity expected by the operation.
    #[error("arity mismatch: expected {expected}, got {actual}")]
    ArityMismatch { expected: usize, actual: usize },

    /// An `And` or `Or` predicate was compiled with no children.
    #[error("AND/OR predicate needs at least one child")]
    EmptyPredicate,
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        let constraint = matches!(
            &err,
            rusqlite::Error::SqliteFailure(e, _) if e.code == rusqlite::ErrorCode::ConstraintViolation
        );
        if constraint {
            Error::Constraint(err)
        } else {
            Error::Query(err)
        }
    }
}

impl Error {
    /// Reclassify a statement failure as a schema failure for `table`.
    /// Used on the DDL paths, where the engine error concerns the table
    /// definition rather than a query.
    pub(crate) fn into_schema(self, table: &str) -> Error {
        match self {
            Error::Query(source) | Error::Constraint(source) => Error::Schema {
                table: table.to_string(),
                source,
            },
            other => other,
        }
    }
}
