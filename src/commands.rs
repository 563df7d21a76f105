//! Subcommand implementations.

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;

use simstore_core::{ColumnDeclaration, StoreConfig, Value};
use simstore_db::{CodecRegistry, Database, Row, TypeVocabulary};

fn open(name: &str, config: &StoreConfig, codecs: &Arc<CodecRegistry>) -> Result<Database> {
    Database::new(name, config, Arc::clone(codecs), false)
        .with_context(|| format!("Failed to set up database '{name}'"))
}

pub fn create_table(
    config: &StoreConfig,
    codecs: &Arc<CodecRegistry>,
    db: &str,
    table: &str,
    columns: Vec<(String, String)>,
    delete_existing: bool,
) -> Result<()> {
    let mut database = Database::new(db, config, Arc::clone(codecs), delete_existing)
        .with_context(|| format!("Failed to set up database '{db}'"))?;
    let columns: ColumnDeclaration = columns.into_iter().collect();
    database
        .create_table(table, &columns)
        .with_context(|| format!("Failed to create table '{table}'"))?;
    println!("Table {table} ready in {}", database.path().display());
    Ok(())
}

pub fn columns(
    config: &StoreConfig,
    codecs: &Arc<CodecRegistry>,
    db: &str,
    table: &str,
) -> Result<()> {
    let mut database = open(db, config, codecs)?;
    let columns = database.columns(table)?;

    println!("{:<4} {:<24} {:<12} {:<8} {:<4} DEFAULT", "CID", "NAME", "TYPE", "NOTNULL", "PK");
    for column in columns {
        println!(
            "{:<4} {:<24} {:<12} {:<8} {:<4} {}",
            column.cid,
            column.name,
            column.decl_type,
            column.not_null,
            column.primary_key,
            column.default_value.as_deref().unwrap_or("-"),
        );
    }
    Ok(())
}

pub fn insert(
    config: &StoreConfig,
    codecs: &Arc<CodecRegistry>,
    db: &str,
    table: &str,
    literals: &[String],
) -> Result<()> {
    let mut database = open(db, config, codecs)?;
    let columns = database.columns(table)?;
    if literals.len() != columns.len() {
        let err = simstore_core::Error::arity_mismatch(table, columns.len(), literals.len());
        return Err(err.into());
    }

    let row = columns
        .iter()
        .zip(literals)
        .map(|(column, literal)| {
            codecs
                .parse_literal(column.declared_type(), literal)
                .with_context(|| format!("Invalid value for column {}", column.name))
        })
        .collect::<Result<Vec<Value>>>()?;

    database.insert(table, &row)?;
    println!("Inserted 1 row into {table}");
    Ok(())
}

pub fn dump(
    config: &StoreConfig,
    codecs: &Arc<CodecRegistry>,
    db: &str,
    table: &str,
    json: bool,
) -> Result<()> {
    let mut database = open(db, config, codecs)?;
    let rows = database.select_all(table)?;
    print_rows(codecs, &rows, json)
}

pub fn raw(
    config: &StoreConfig,
    codecs: &Arc<CodecRegistry>,
    db: &str,
    sql: &str,
    json: bool,
) -> Result<()> {
    tracing::warn!("Running unchecked SQL against '{db}'");
    let mut database = open(db, config, codecs)?;
    let rows = database.execute_raw(sql)?;
    print_rows(codecs, &rows, json)
}

pub fn types(config: &StoreConfig) -> Result<()> {
    for type_token in TypeVocabulary::from_config(config).iter() {
        println!("{type_token}");
    }
    Ok(())
}

pub fn check_config(path: Option<&Path>) -> Result<()> {
    let config = match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            StoreConfig::from_toml(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?
        }
        None => StoreConfig::default(),
    };

    let warnings = config.validate();
    if warnings.is_empty() {
        println!("Configuration is valid");
    } else {
        for warning in &warnings {
            println!("warning: {warning}");
        }
    }
    println!("Databases are stored in {}", config.root_dir.display());
    Ok(())
}

fn print_rows(codecs: &CodecRegistry, rows: &[Row], json: bool) -> Result<()> {
    if json {
        let out: Vec<Vec<serde_json::Value>> = rows
            .iter()
            .map(|row| row.iter().map(|v| to_json(codecs, v)).collect::<Result<Vec<_>>>())
            .collect::<Result<_>>()?;
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    for row in rows {
        let cells = row
            .iter()
            .map(|v| render(codecs, v))
            .collect::<Result<Vec<_>>>()?;
        println!("{}", cells.join("\t"));
    }
    Ok(())
}

fn render(codecs: &CodecRegistry, value: &Value) -> Result<String> {
    Ok(match value {
        Value::Null => "NULL".to_string(),
        Value::Integer(i) => i.to_string(),
        Value::Real(f) => f.to_string(),
        Value::Text(s) => s.clone(),
        Value::Blob(b) => format!("<{} bytes>", b.len()),
        Value::Date(_) | Value::Timestamp(_) | Value::Duration(_) => codecs.encode(value)?,
    })
}

fn to_json(codecs: &CodecRegistry, value: &Value) -> Result<serde_json::Value> {
    Ok(match value {
        Value::Null => serde_json::Value::Null,
        Value::Integer(i) => serde_json::json!(i),
        Value::Real(f) => serde_json::json!(f),
        Value::Text(s) => serde_json::json!(s),
        Value::Blob(b) => serde_json::json!(b),
        Value::Date(_) | Value::Timestamp(_) | Value::Duration(_) => {
            serde_json::Value::String(codecs.encode(value)?)
        }
    })
}
