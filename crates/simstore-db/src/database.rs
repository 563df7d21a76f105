//! The database facade and its connection lifecycle.
//!
//! A [`Database`] owns no long-lived connection. Every public operation
//! acquires a connection, runs inside one transaction, commits on success or
//! rolls back on failure, and releases the connection before returning,
//! whatever the outcome. Identifiers and type tokens are checked before a
//! connection is touched.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rusqlite::{params_from_iter, Connection, Transaction};
use simstore_core::{
    ColumnDeclaration, Error, ReflectedColumn, Result, StoreConfig, Value,
};
use tracing::{debug, error, info, warn};

use crate::codec::CodecRegistry;
use crate::query;
use crate::sanitize::Sanitizer;
use crate::schema::TypeVocabulary;

/// One decoded result row.
pub type Row = Vec<Value>;

/// A named single-file store under the configured root directory.
#[derive(Debug)]
pub struct Database {
    name: String,
    path: PathBuf,
    conn: Option<Connection>,
    sanitizer: Sanitizer,
    vocabulary: TypeVocabulary,
    codecs: Arc<CodecRegistry>,
}

impl Database {
    /// Set up the database `name` at `<root_dir>/<name>.<extension>`.
    ///
    /// The root directory is created if missing. With `delete_existing`, a
    /// file already present at the derived path is removed. No connection is
    /// opened here.
    pub fn new(
        name: &str,
        config: &StoreConfig,
        codecs: Arc<CodecRegistry>,
        delete_existing: bool,
    ) -> Result<Self> {
        check_name(name)?;

        if !config.root_dir.as_os_str().is_empty() && !config.root_dir.exists() {
            std::fs::create_dir_all(&config.root_dir)?;
            debug!("Created database directory {}", config.root_dir.display());
        }

        let path = config.database_path(name);
        if delete_existing && path.exists() {
            std::fs::remove_file(&path)?;
            info!("Deleted existing database {}", path.display());
        }

        Ok(Self {
            name: name.to_string(),
            path,
            conn: None,
            sanitizer: Sanitizer::new(config.sanitizer)?,
            vocabulary: TypeVocabulary::from_config(config),
            codecs,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The open connection, if an operation is in progress.
    pub fn connection(&self) -> Option<&Connection> {
        self.conn.as_ref()
    }

    pub fn is_connected(&self) -> bool {
        self.conn.is_some()
    }

    pub fn sanitizer(&self) -> &Sanitizer {
        &self.sanitizer
    }

    pub fn vocabulary(&self) -> &TypeVocabulary {
        &self.vocabulary
    }

    pub fn codecs(&self) -> &CodecRegistry {
        &self.codecs
    }

    /// Open a connection, or hand back the one already open.
    ///
    /// An already open connection is not an error, only a warning.
    pub fn open(&mut self) -> Result<&mut Connection> {
        let conn = match self.conn.take() {
            Some(conn) => {
                warn!("Connection to {} already established", self.name);
                conn
            }
            None => Connection::open(&self.path)
                .map_err(|e| store_error(&format!("open {}", self.path.display()), e))?,
        };
        Ok(self.conn.insert(conn))
    }

    /// Close the open connection. Closing without one only logs a warning.
    pub fn close(&mut self) {
        if self.conn.is_none() {
            warn!("No connection to {} to close", self.name);
        }
        self.release();
    }

    fn release(&mut self) {
        if let Some(conn) = self.conn.take() {
            if let Err((_, e)) = conn.close() {
                warn!("Closing connection to {} failed: {e}", self.name);
            }
        }
    }

    /// Acquire, run `op` in a transaction, commit or roll back, release.
    fn scoped<T, F>(&mut self, op: F) -> Result<T>
    where
        F: FnOnce(&Transaction<'_>, &CodecRegistry) -> Result<T>,
    {
        let result = self.in_transaction(op);
        self.release();
        result
    }

    fn in_transaction<T, F>(&mut self, op: F) -> Result<T>
    where
        F: FnOnce(&Transaction<'_>, &CodecRegistry) -> Result<T>,
    {
        let codecs = Arc::clone(&self.codecs);
        let conn = self.open()?;
        let tx = conn
            .transaction()
            .map_err(|e| store_error("begin transaction", e))?;
        // Dropping `tx` on the error path rolls it back.
        let value = op(&tx, &codecs)?;
        tx.commit().map_err(|e| store_error("commit", e))?;
        Ok(value)
    }

    /// Create `table` with the declared columns unless it already exists.
    pub fn create_table(&mut self, table: &str, columns: &ColumnDeclaration) -> Result<()> {
        let table = self.sanitizer.identifier(table)?;
        let definitions = self.vocabulary.column_definitions(columns, &self.sanitizer)?;
        let sql = query::create_table(table, &definitions);

        info!("Creating table {table}...");
        self.scoped(|tx, _| {
            tx.execute(&sql, []).map_err(|e| store_error(&sql, e))?;
            Ok(())
        })?;
        info!("Table {table} created successfully.");
        Ok(())
    }

    /// Reflect the columns of `table`, in declaration order.
    pub fn columns(&mut self, table: &str) -> Result<Vec<ReflectedColumn>> {
        let table = self.sanitizer.identifier(table)?;
        self.scoped(|tx, _| reflect(tx, table))
    }

    /// Insert statement for `table` and the number of values it expects.
    pub fn prepare_insert_statement(&mut self, table: &str) -> Result<(String, usize)> {
        let table = self.sanitizer.identifier(table)?;
        self.scoped(|tx, _| {
            let columns = reflect(tx, table)?;
            Ok((insert_statement(table, &columns), columns.len()))
        })
    }

    /// Insert statement for `table`, after checking `row` against its columns.
    pub fn prepare_insertion(&mut self, table: &str, row: &[Value]) -> Result<String> {
        let table = self.sanitizer.identifier(table)?;
        self.scoped(|tx, _| {
            let columns = reflect(tx, table)?;
            check_row(table, &columns, row)?;
            Ok(insert_statement(table, &columns))
        })
    }

    /// Insert one row. The values are bound as parameters.
    pub fn insert(&mut self, table: &str, row: &[Value]) -> Result<()> {
        let table = self.sanitizer.identifier(table)?;
        self.scoped(|tx, codecs| {
            let columns = reflect(tx, table)?;
            check_row(table, &columns, row)?;
            let sql = insert_statement(table, &columns);

            debug!("Inserting data into table {table} with {sql}");
            let params = bind(codecs, row)?;
            tx.execute(&sql, params_from_iter(params))
                .map_err(|e| store_error(&sql, e))?;
            Ok(())
        })?;
        debug!("Data inserted successfully.");
        Ok(())
    }

    /// Insert a batch of rows in one transaction.
    ///
    /// Every row is checked against the table's columns before the first
    /// one is written; a failing row leaves the table untouched.
    pub fn insert_many<R: AsRef<[Value]>>(&mut self, table: &str, rows: &[R]) -> Result<()> {
        let table = self.sanitizer.identifier(table)?;
        self.scoped(|tx, codecs| {
            let columns = reflect(tx, table)?;
            for row in rows {
                check_row(table, &columns, row.as_ref())?;
            }
            if rows.is_empty() {
                debug!("No rows to insert into table {table}");
                return Ok(());
            }

            let sql = insert_statement(table, &columns);
            debug!("Inserting {} rows into table {table} with {sql}", rows.len());
            let mut stmt = tx.prepare(&sql).map_err(|e| store_error(&sql, e))?;
            for row in rows {
                let params = bind(codecs, row.as_ref())?;
                stmt.execute(params_from_iter(params))
                    .map_err(|e| store_error(&sql, e))?;
            }
            Ok(())
        })?;
        debug!("Data inserted successfully.");
        Ok(())
    }

    /// All rows of `table` in insertion order, decoded by declared type.
    pub fn select_all(&mut self, table: &str) -> Result<Vec<Row>> {
        let table = self.sanitizer.identifier(table)?;
        self.scoped(|tx, codecs| {
            reflect(tx, table)?;
            fetch(tx, &query::select_all(table), codecs)
        })
    }

    /// Run `sql` as-is and return its rows.
    ///
    /// Nothing in `sql` is sanitized. Meant for diagnostics and tests only;
    /// never pass untrusted input.
    pub fn execute_raw(&mut self, sql: &str) -> Result<Vec<Row>> {
        debug!("Executing raw statement on {}: {sql}", self.name);
        self.scoped(|tx, codecs| fetch(tx, sql, codecs))
    }
}

/// The engine error behind a [`Error::Store`], if any.
pub fn sqlite_error(err: &Error) -> Option<&rusqlite::Error> {
    match err {
        Error::Store { source } => source.downcast_ref::<rusqlite::Error>(),
        _ => None,
    }
}

fn check_name(name: &str) -> Result<()> {
    let bad = name.trim().is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0']);
    if bad {
        return Err(Error::validation(format!("invalid database name {name:?}")));
    }
    Ok(())
}

fn store_error(context: &str, e: rusqlite::Error) -> Error {
    error!("Store operation failed ({context}): {e}");
    Error::store(e)
}

fn reflect(conn: &Connection, table: &str) -> Result<Vec<ReflectedColumn>> {
    let sql = query::table_info(table);
    let mut stmt = conn.prepare(&sql).map_err(|e| store_error(&sql, e))?;
    let columns = stmt
        .query_map([], |row| {
            Ok(ReflectedColumn {
                cid: row.get(0)?,
                name: row.get(1)?,
                decl_type: row.get(2)?,
                not_null: row.get::<_, i64>(3)? != 0,
                default_value: row.get(4)?,
                primary_key: row.get::<_, i64>(5)? > 0,
            })
        })
        .map_err(|e| store_error(&sql, e))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| store_error(&sql, e))?;

    if columns.is_empty() {
        return Err(Error::schema_not_found(table));
    }
    Ok(columns)
}

fn insert_statement(table: &str, columns: &[ReflectedColumn]) -> String {
    let sql = query::insert(table, columns.len());
    debug!("Prepared insertion query: {sql}");
    sql
}

/// Arity first, then each value against its column's declared type.
fn check_row(table: &str, columns: &[ReflectedColumn], row: &[Value]) -> Result<()> {
    if row.len() != columns.len() {
        return Err(Error::arity_mismatch(table, columns.len(), row.len()));
    }
    for (column, value) in columns.iter().zip(row) {
        if !value.fits(column.declared_type()) {
            return Err(Error::validation(format!(
                "{} value does not fit column {}.{} declared {}",
                value.type_name(),
                table,
                column.name,
                column.decl_type
            )));
        }
    }
    Ok(())
}

fn bind(codecs: &CodecRegistry, row: &[Value]) -> Result<Vec<rusqlite::types::Value>> {
    row.iter().map(|value| codecs.to_sql(value)).collect()
}

fn fetch(conn: &Connection, sql: &str, codecs: &CodecRegistry) -> Result<Vec<Row>> {
    let mut stmt = conn.prepare(sql).map_err(|e| store_error(sql, e))?;
    let decl_types: Vec<Option<String>> = stmt
        .columns()
        .iter()
        .map(|column| column.decl_type().map(str::to_owned))
        .collect();

    let mut rows = stmt.query([]).map_err(|e| store_error(sql, e))?;
    let mut out = Vec::new();
    while let Some(row) = rows.next().map_err(|e| store_error(sql, e))? {
        let values = decl_types
            .iter()
            .enumerate()
            .map(|(idx, decl)| {
                let raw = row.get_ref(idx).map_err(|e| store_error(sql, e))?;
                codecs.from_sql(decl.as_deref(), raw)
            })
            .collect::<Result<Row>>()?;
        out.push(values);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeDelta};
    use rusqlite::ErrorCode;
    use simstore_core::SanitizerMode;
    use tempfile::TempDir;

    fn setup() -> (TempDir, StoreConfig) {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig {
            root_dir: dir.path().join("databases"),
            ..StoreConfig::default()
        };
        (dir, config)
    }

    fn open_db(config: &StoreConfig, name: &str) -> Database {
        Database::new(name, config, Arc::new(CodecRegistry::standard()), false).unwrap()
    }

    fn events_columns() -> ColumnDeclaration {
        ColumnDeclaration::new()
            .column("id", "INTEGER PRIMARY KEY")
            .column("occurred_at", "DATETIME")
    }

    fn ts(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32, us: u32) -> Value {
        Value::Timestamp(
            NaiveDate::from_ymd_opt(y, m, d)
                .unwrap()
                .and_hms_micro_opt(h, min, s, us)
                .unwrap(),
        )
    }

    #[test]
    fn new_derives_path_and_creates_root() {
        let (_dir, config) = setup();
        let db = open_db(&config, "sim_run");
        assert_eq!(db.name(), "sim_run");
        assert_eq!(db.path(), config.root_dir.join("sim_run.db"));
        assert!(config.root_dir.is_dir());
        assert!(!db.is_connected());
        assert!(!db.path().exists());
    }

    #[test]
    fn new_rejects_path_like_names() {
        let (_dir, config) = setup();
        for name in ["", "  ", "..", "a/b", "a\\b"] {
            let err = Database::new(name, &config, Arc::new(CodecRegistry::standard()), false)
                .unwrap_err();
            assert!(matches!(err, Error::Validation(_)), "{name:?}");
        }
    }

    #[test]
    fn delete_existing_removes_file() {
        let (_dir, config) = setup();
        let mut db = open_db(&config, "sim");
        db.create_table("events", &events_columns()).unwrap();
        assert!(db.path().exists());

        let mut kept = open_db(&config, "sim");
        assert_eq!(kept.columns("events").unwrap().len(), 2);

        let mut fresh =
            Database::new("sim", &config, Arc::new(CodecRegistry::standard()), true).unwrap();
        assert!(!fresh.path().exists());
        assert!(matches!(
            fresh.columns("events"),
            Err(Error::SchemaNotFound { .. })
        ));
    }

    #[test]
    fn open_and_close_are_lenient() {
        let (_dir, config) = setup();
        let mut db = open_db(&config, "sim");
        db.close();
        assert!(!db.is_connected());

        db.open().unwrap();
        db.open().unwrap();
        assert!(db.is_connected());
        assert!(db.connection().is_some());

        db.close();
        assert!(!db.is_connected());
        db.close();
    }

    #[test]
    fn operations_release_connection() {
        let (_dir, config) = setup();
        let mut db = open_db(&config, "sim");
        db.create_table("events", &events_columns()).unwrap();
        assert!(!db.is_connected());
        db.insert("events", &[Value::Integer(1), Value::Null]).unwrap();
        assert!(!db.is_connected());
    }

    #[test]
    fn operation_after_manual_open_releases_it() {
        let (_dir, config) = setup();
        let mut db = open_db(&config, "sim");
        db.open().unwrap();
        db.create_table("events", &events_columns()).unwrap();
        assert!(!db.is_connected());
    }

    #[test]
    fn create_table_is_idempotent() {
        let (_dir, config) = setup();
        let mut db = open_db(&config, "sim");
        db.create_table("events", &events_columns()).unwrap();
        let first = db.columns("events").unwrap();
        db.create_table("events", &events_columns()).unwrap();
        let second = db.columns("events").unwrap();
        assert_eq!(first, second);

        assert_eq!(first[0].name, "id");
        assert_eq!(first[0].decl_type, "INTEGER");
        assert!(first[0].primary_key);
        assert_eq!(first[1].name, "occurred_at");
        assert_eq!(first[1].decl_type, "DATETIME");
        assert!(!first[1].primary_key);
        assert!(!first[1].not_null);
        assert_eq!(first[1].default_value, None);
    }

    #[test]
    fn create_table_uppercases_types() {
        let (_dir, config) = setup();
        let mut db = open_db(&config, "sim");
        let columns = ColumnDeclaration::new()
            .column("job", "text not null")
            .column("load", "real");
        db.create_table("jobs", &columns).unwrap();
        let reflected = db.columns("jobs").unwrap();
        assert_eq!(reflected[0].decl_type, "TEXT");
        assert!(reflected[0].not_null);
        assert_eq!(reflected[1].decl_type, "REAL");
    }

    #[test]
    fn create_table_rejects_unknown_type() {
        let (_dir, config) = setup();
        let mut db = open_db(&config, "sim");
        let err = db
            .create_table("t", &ColumnDeclaration::new().column("c", "FOOBAR"))
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(err.to_string().contains("TIMEDELTA"));
        assert!(!db.is_connected());
        assert!(matches!(db.columns("t"), Err(Error::SchemaNotFound { .. })));
    }

    #[test]
    fn create_table_rejects_bad_identifiers_before_connecting() {
        let (_dir, config) = setup();
        let mut db = open_db(&config, "sim");
        let err = db
            .create_table("x; DROP TABLE y", &events_columns())
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        // Nothing touched the store, so no file exists yet.
        assert!(!db.path().exists());
    }

    #[test]
    fn columns_of_missing_table() {
        let (_dir, config) = setup();
        let mut db = open_db(&config, "sim");
        let err = db.columns("never_made").unwrap_err();
        assert!(matches!(err, Error::SchemaNotFound { ref table } if table == "never_made"));
        assert!(!db.is_connected());
    }

    #[test]
    fn prepare_insert_statement_uses_reflected_arity() {
        let (_dir, config) = setup();
        let mut db = open_db(&config, "sim");
        db.create_table("events", &events_columns()).unwrap();
        let (sql, arity) = db.prepare_insert_statement("events").unwrap();
        assert_eq!(sql, "INSERT INTO events VALUES (?, ?)");
        assert_eq!(arity, 2);

        let sql = db
            .prepare_insertion("events", &[Value::Integer(1), Value::Null])
            .unwrap();
        assert_eq!(sql, "INSERT INTO events VALUES (?, ?)");
    }

    #[test]
    fn insert_arity_mismatch_writes_nothing() {
        let (_dir, config) = setup();
        let mut db = open_db(&config, "sim");
        db.create_table("events", &events_columns()).unwrap();

        let err = db.insert("events", &[Value::Integer(1)]).unwrap_err();
        assert!(matches!(
            err,
            Error::ArityMismatch {
                expected: 2,
                actual: 1,
                ..
            }
        ));
        assert!(!db.is_connected());
        assert!(db.select_all("events").unwrap().is_empty());

        assert!(matches!(
            db.prepare_insertion("events", &[]),
            Err(Error::ArityMismatch { .. })
        ));
    }

    #[test]
    fn insert_rejects_mismatched_value_types() {
        let (_dir, config) = setup();
        let mut db = open_db(&config, "sim");
        db.create_table("events", &events_columns()).unwrap();
        let err = db
            .insert(
                "events",
                &[Value::Integer(1), Value::Text("2024-06-24T20:37:43".into())],
            )
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(err.to_string().contains("occurred_at"));
        assert!(db.select_all("events").unwrap().is_empty());
    }

    #[test]
    fn events_scenario() {
        let (_dir, config) = setup();
        let mut db = open_db(&config, "sim");
        db.create_table("events", &events_columns()).unwrap();

        let t1 = ts(2024, 6, 24, 20, 37, 43, 0);
        let t2 = ts(2024, 6, 25, 8, 0, 1, 250_000);

        db.insert("events", &[Value::Integer(1), t1.clone()]).unwrap();
        assert_eq!(db.columns("events").unwrap().len(), 2);
        db.insert("events", &[Value::Integer(2), t2.clone()]).unwrap();

        let rows = db.execute_raw("SELECT * FROM events").unwrap();
        assert_eq!(
            rows,
            vec![
                vec![Value::Integer(1), t1.clone()],
                vec![Value::Integer(2), t2.clone()],
            ]
        );
        assert_eq!(db.select_all("events").unwrap(), rows);
        assert!(!db.is_connected());
    }

    #[test]
    fn temporal_columns_round_trip_through_store() {
        let (_dir, config) = setup();
        let mut db = open_db(&config, "sim");
        let columns = ColumnDeclaration::new()
            .column("day", "DATE")
            .column("waiting", "TIMEDELTA")
            .column("payload", "BLOB")
            .column("score", "REAL");
        db.create_table("stats", &columns).unwrap();

        let rows = vec![
            vec![
                Value::Date(NaiveDate::from_ymd_opt(2024, 6, 24).unwrap()),
                Value::Duration(TimeDelta::microseconds(-1)),
                Value::Blob(vec![0xde, 0xad]),
                Value::Real(0.25),
            ],
            vec![
                Value::Date(NaiveDate::from_ymd_opt(1, 1, 1).unwrap()),
                Value::Duration(TimeDelta::zero()),
                Value::Null,
                Value::Integer(3),
            ],
        ];
        db.insert_many("stats", &rows).unwrap();

        let stored = db.select_all("stats").unwrap();
        assert_eq!(stored[0], rows[0]);
        assert_eq!(stored[1][0], rows[1][0]);
        assert_eq!(stored[1][1], rows[1][1]);
        assert_eq!(stored[1][2], Value::Null);
        // REAL affinity turns the integer into a float.
        assert_eq!(stored[1][3], Value::Real(3.0));

        let raw = db
            .execute_raw("SELECT CAST(waiting AS TEXT) AS w FROM stats ORDER BY rowid")
            .unwrap();
        assert_eq!(raw[0], vec![Value::Text("-1,86399,999999".into())]);
        assert_eq!(raw[1], vec![Value::Text("0,0,0".into())]);
    }

    #[test]
    fn insert_many_checks_every_row() {
        let (_dir, config) = setup();
        let mut db = open_db(&config, "sim");
        db.create_table("events", &events_columns()).unwrap();

        let rows = vec![
            vec![Value::Integer(1), ts(2024, 1, 1, 0, 0, 0, 0)],
            vec![Value::Integer(2)],
        ];
        let err = db.insert_many("events", &rows).unwrap_err();
        assert!(matches!(err, Error::ArityMismatch { actual: 1, .. }));
        assert!(db.select_all("events").unwrap().is_empty());
    }

    #[test]
    fn insert_many_empty_batch() {
        let (_dir, config) = setup();
        let mut db = open_db(&config, "sim");
        db.create_table("events", &events_columns()).unwrap();
        db.insert_many::<Row>("events", &[]).unwrap();
        assert!(db.select_all("events").unwrap().is_empty());
        assert!(matches!(
            db.insert_many::<Row>("missing", &[]),
            Err(Error::SchemaNotFound { .. })
        ));
    }

    #[test]
    fn engine_failure_rolls_back_batch() {
        let (_dir, config) = setup();
        let mut db = open_db(&config, "sim");
        db.create_table("events", &events_columns()).unwrap();
        db.insert("events", &[Value::Integer(1), Value::Null]).unwrap();

        let rows = vec![
            vec![Value::Integer(2), Value::Null],
            vec![Value::Integer(1), Value::Null],
        ];
        let err = db.insert_many("events", &rows).unwrap_err();
        let code = sqlite_error(&err).and_then(|e| e.sqlite_error_code());
        assert_eq!(code, Some(ErrorCode::ConstraintViolation));
        assert!(!db.is_connected());

        let stored = db.select_all("events").unwrap();
        assert_eq!(stored, vec![vec![Value::Integer(1), Value::Null]]);
    }

    #[test]
    fn locked_file_surfaces_engine_error() {
        let (_dir, config) = setup();
        let mut db = open_db(&config, "sim");
        db.create_table("events", &events_columns()).unwrap();

        let holder = Connection::open(db.path()).unwrap();
        holder.execute_batch("BEGIN EXCLUSIVE").unwrap();

        let mut other = open_db(&config, "sim");
        let err = other
            .insert("events", &[Value::Integer(1), Value::Null])
            .unwrap_err();
        let code = sqlite_error(&err).and_then(|e| e.sqlite_error_code());
        assert_eq!(code, Some(ErrorCode::DatabaseBusy));
        assert!(!other.is_connected());

        holder.execute_batch("ROLLBACK").unwrap();
    }

    #[test]
    fn execute_raw_plain_values() {
        let (_dir, config) = setup();
        let mut db = open_db(&config, "sim");
        let rows = db.execute_raw("SELECT 1, 'a', 2.5, NULL").unwrap();
        assert_eq!(
            rows,
            vec![vec![
                Value::Integer(1),
                Value::Text("a".into()),
                Value::Real(2.5),
                Value::Null,
            ]]
        );
        assert!(db.execute_raw("SELEC 1").is_err());
        assert!(!db.is_connected());
    }

    #[test]
    fn registries_are_per_database() {
        let (_dir, config) = setup();
        let mut plain = Database::new("plain", &config, Arc::new(CodecRegistry::empty()), false)
            .unwrap();
        let columns = ColumnDeclaration::new().column("day", "DATE");
        plain.create_table("days", &columns).unwrap();

        let day = Value::Date(NaiveDate::from_ymd_opt(2024, 6, 24).unwrap());
        let err = plain.insert("days", &[day.clone()]).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));

        plain
            .execute_raw("INSERT INTO days VALUES ('2024-06-24')")
            .unwrap();
        assert_eq!(
            plain.select_all("days").unwrap(),
            vec![vec![Value::Text("2024-06-24".into())]]
        );

        let mut typed = open_db(&config, "plain");
        assert_eq!(typed.select_all("days").unwrap(), vec![vec![day]]);
    }

    #[test]
    fn strict_sanitizer_accepts_keyword_fragments() {
        let (_dir, mut config) = setup();
        config.sanitizer = SanitizerMode::Strict;
        let mut db = open_db(&config, "sim");
        let columns = ColumnDeclaration::new()
            .column("id", "INTEGER PRIMARY KEY")
            .column("created_at", "DATETIME");
        db.create_table("deleted_jobs", &columns).unwrap();
        assert_eq!(db.columns("deleted_jobs").unwrap().len(), 2);

        let (_dir2, default_config) = setup();
        let mut pattern_db = open_db(&default_config, "sim");
        assert!(matches!(
            pattern_db.create_table("deleted_jobs", &columns),
            Err(Error::Validation(_))
        ));
    }
}
