//! SQL text assembly.
//!
//! These builders only concatenate fragments. Callers pass identifiers that
//! already went through the [`Sanitizer`](crate::sanitize::Sanitizer) and
//! column definitions produced by
//! [`TypeVocabulary::column_definitions`](crate::schema::TypeVocabulary::column_definitions).

/// `CREATE TABLE IF NOT EXISTS <table> (<definitions>)`
pub fn create_table(table: &str, column_definitions: &str) -> String {
    format!("CREATE TABLE IF NOT EXISTS {table} ({column_definitions})")
}

/// `PRAGMA table_info(<table>)`
pub fn table_info(table: &str) -> String {
    format!("PRAGMA table_info({table})")
}

/// `INSERT INTO <table> VALUES (?, ?, ...)` with `arity` positional placeholders.
pub fn insert(table: &str, arity: usize) -> String {
    format!("INSERT INTO {table} VALUES ({})", placeholders(arity))
}

/// `SELECT * FROM <table> ORDER BY rowid`
pub fn select_all(table: &str) -> String {
    format!("SELECT * FROM {table} ORDER BY rowid")
}

fn placeholders(arity: usize) -> String {
    vec!["?"; arity].join(", ")
}
