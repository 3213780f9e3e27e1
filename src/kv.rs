//! Single-key string convenience API.
//!
//! Wraps the record operations for tables that have exactly one key
//! column, exchanging plain strings instead of [`Record`]s. Use these
//! only on tables created with [`Database::create_kv`] (or an arity of
//! 1); on wider tables they fail with the underlying engine error.
//! Unlike the record layer there is no extra machinery here: every
//! helper is a direct composition of the core operations with an
//! `Equal` or `In` predicate on key index 0.

use std::collections::HashMap;

use crate::database::Database;
use crate::error::{Error, Result};
use crate::predicate::Predicate;
use crate::record::Record;

impl Database {
    /// Create `table` with a single key column.
    pub fn create_kv(&self, table: &str) -> Result<()> {
        self.create(table, 1)
    }

    /// Store `value` under `key`, replacing any previous value.
    pub fn put_string(&self, value: &str, key: &str, table: &str) -> Result<()> {
        self.put(&Record::single(key, value), table)
    }

    /// Store `values[i]` under `keys[i]` as one atomic batch. The two
    /// slices must have the same length.
    pub fn put_strings(&self, values: &[&str], keys: &[&str], table: &str) -> Result<()> {
        if values.len() != keys.len() {
            return Err(Error::ArityMismatch {
                expected: keys.len(),
                actual: values.len(),
            });
        }
        let records: Vec<Record> = keys
            .iter()
            .zip(values)
            .map(|(key, value)| Record::single(*key, *value))
            .collect();
        self.put_all(&records, table)
    }

    /// The value stored under `key`, or `None`.
    pub fn get_string(&self, key: &str, table: &str) -> Result<Option<String>> {
        let found = self.get_one(&Predicate::equal(0, key), table)?;
        Ok(found.map(|record| record.value))
    }

    /// The values stored under `keys`, as a key to value map. Keys with
    /// no stored value are absent from the map.
    pub fn get_strings(&self, keys: &[&str], table: &str) -> Result<HashMap<String, String>> {
        let records = self.get_all_where(&Predicate::one_of(0, keys.iter().copied()), table)?;
        let mut result = HashMap::with_capacity(records.len());
        for record in records {
            let key = record.key().to_owned();
            result.insert(key, record.value);
        }
        Ok(result)
    }

    /// Every value in `table`, in engine scan order.
    pub fn get_all_strings(&self, table: &str) -> Result<Vec<String>> {
        Ok(self
            .get_all(table)?
            .into_iter()
            .map(|record| record.value)
            .collect())
    }

    /// Delete the value stored under `key`.
    pub fn delete_string(&self, key: &str, table: &str) -> Result<()> {
        self.delete(&Predicate::equal(0, key), table)
    }

    /// Delete the values stored under every key in `keys`.
    pub fn delete_strings(&self, keys: &[&str], table: &str) -> Result<()> {
        self.delete(&Predicate::one_of(0, keys.iter().copied()), table)
    }
}
