use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "simstore")]
#[command(author, version, about = "Inspect and populate simulation run databases")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a table if it does not exist yet
    CreateTable {
        /// Database name (file stem under the root directory)
        db: String,

        /// Table name
        table: String,

        /// Column as name=TYPE, e.g. id="INTEGER PRIMARY KEY"
        #[arg(short = 'C', long = "column", required = true, value_parser = parse_column)]
        columns: Vec<(String, String)>,

        /// Delete the database file before creating the table
        #[arg(long)]
        delete_existing: bool,
    },

    /// Show the columns of a table
    Columns {
        db: String,
        table: String,
    },

    /// Insert one row; values are parsed by each column's declared type
    Insert {
        db: String,
        table: String,

        /// One value per column, NULL for none
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        values: Vec<String>,
    },

    /// Print all rows of a table
    Dump {
        db: String,
        table: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run an unchecked SQL statement (diagnostics only)
    Raw {
        db: String,
        sql: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the allowed column types
    Types,

    /// Validate configuration file
    CheckConfig {
        /// Config file to validate (uses --config if not specified)
        config: Option<PathBuf>,
    },
}

fn parse_column(arg: &str) -> Result<(String, String), String> {
    let (name, type_token) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected name=TYPE, got '{arg}'"))?;
    if name.is_empty() || type_token.is_empty() {
        return Err(format!("expected name=TYPE, got '{arg}'"));
    }
    Ok((name.to_string(), type_token.to_string()))
}
