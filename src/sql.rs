//! SQL text generation.
//!
//! Pure string formatting, no connection involved. Table names are
//! interpolated verbatim and must stay within `[A-Za-z_][A-Za-z0-9_]*`;
//! no identifier quoting is performed. All caller-supplied values travel
//! as `?` placeholders bound at execution time.

/// Name of the key column at `index`.
pub(crate) fn key_column(index: usize) -> String {
    format!("key{}", index)
}

/// `CREATE TABLE IF NOT EXISTS` with `arity` key columns, one value
/// column, and a composite primary key spanning the key columns only.
pub(crate) fn create_table(table: &str, arity: usize) -> String {
    let mut columns = String::new();
    for i in 0..arity {
        columns.push_str(&format!("{} TEXT NOT NULL, ", key_column(i)));
    }
    let key_list = (0..arity).map(key_column).collect::<Vec<_>>().join(", ");
    format!(
        "CREATE TABLE IF NOT EXISTS {} ({}value TEXT NOT NULL, PRIMARY KEY ({}))",
        table, columns, key_list
    )
}

/// `REPLACE INTO` with one placeholder per key column plus one for the
/// value, in declaration order.
pub(crate) fn replace_into(table: &str, arity: usize) -> String {
    let mut columns: Vec<String> = (0..arity).map(key_column).collect();
    columns.push("value".to_string());
    let placeholders = vec!["?"; columns.len()].join(", ");
    format!(
        "REPLACE INTO {} ({}) VALUES ({})",
        table,
        columns.join(", "),
        placeholders
    )
}

pub(crate) fn select_all(table: &str) -> String {
    format!("SELECT * FROM {}", table)
}

pub(crate) fn select_where(table: &str, clause: &str) -> String {
    format!("SELECT * FROM {} WHERE {}", table, clause)
}

pub(crate) fn select_one(table: &str) -> String {
    format!("SELECT * FROM {} LIMIT 1", table)
}

pub(crate) fn select_one_where(table: &str, clause: &str) -> String {
    format!("SELECT * FROM {} WHERE {} LIMIT 1", table, clause)
}

pub(crate) fn delete_all(table: &str) -> String {
    format!("DELETE FROM {}", table)
}

pub(crate) fn delete_where(table: &str, clause: &str) -> String {
    format!("DELETE FROM {} WHERE {}", table, clause)
}

pub(crate) fn drop_table(table: &str) -> String {
    format!("DROP TABLE IF EXISTS {}", table)
}
