use rusqlite::Row;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A stored entry: an ordered key tuple plus one value.
///
/// The number of keys must match the arity of the table the record is
/// written to. Records are plain value objects; they carry no database
/// affinity and are rebuilt on every read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Key columns, in declaration order.
    pub keys: Vec<String>,
    /// The stored value.
    pub value: String,
}

impl Record {
    /// Create a record from `keys` and `value`.
    pub fn new<I, S>(keys: I, value: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            value: value.into(),
        }
    }

    /// Create a single-key record.
    pub fn single(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new([key.into()], value)
    }

    /// The first key. Convenience accessor for single-key tables.
    ///
    /// # Panics
    ///
    /// Panics if the record has no keys.
    pub fn key(&self) -> &str {
        &self.keys[0]
    }

    /// Replace the whole key tuple with the single `key`.
    ///
    /// Destructive: any further keys are discarded, so this is only
    /// meaningful for records destined for single-key tables.
    pub fn set_key(&mut self, key: impl Into<String>) {
        self.keys = vec![key.into()];
    }

    pub(crate) fn check_arity(&self, expected: usize) -> Result<()> {
        if self.keys.len() == expected {
            Ok(())
        } else {
            Err(Error::ArityMismatch {
                expected,
                actual: self.keys.len(),
            })
        }
    }

    /// Parameter list for a replace statement: keys first, value last,
    /// matching the column order of the generated DDL.
    pub(crate) fn to_params(&self) -> impl Iterator<Item = &String> {
        self.keys.iter().chain(std::iter::once(&self.value))
    }

    /// Decode a fetched row: all leading columns are keys, the final
    /// column is the value.
    pub(crate) fn from_row(row: &Row<'_>, column_count: usize) -> rusqlite::Result<Self> {
        let mut keys = Vec::with_capacity(column_count - 1);
        for i in 0..column_count - 1 {
            keys.push(row.get(i)?);
        }
        let value = row.get(column_count - 1)?;
        Ok(Self { keys, value })
    }
}
