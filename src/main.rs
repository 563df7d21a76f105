mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use simstore_core::StoreConfig;
use simstore_db::CodecRegistry;
use std::sync::Arc;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "simstore=debug,simstore_db=debug,simstore_core=debug".to_string()
        } else {
            "simstore=info,simstore_db=warn,simstore_core=warn".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    let config = StoreConfig::load_or_default(cli.config.as_deref());
    for warning in config.validate() {
        tracing::warn!("Config: {warning}");
    }
    let codecs = Arc::new(CodecRegistry::standard());

    match cli.command {
        Commands::CreateTable {
            db,
            table,
            columns,
            delete_existing,
        } => commands::create_table(&config, &codecs, &db, &table, columns, delete_existing),
        Commands::Columns { db, table } => commands::columns(&config, &codecs, &db, &table),
        Commands::Insert { db, table, values } => {
            commands::insert(&config, &codecs, &db, &table, &values)
        }
        Commands::Dump { db, table, json } => commands::dump(&config, &codecs, &db, &table, json),
        Commands::Raw { db, sql, json } => commands::raw(&config, &codecs, &db, &sql, json),
        Commands::Types => commands::types(&config),
        Commands::CheckConfig {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            commands::check_config(path.as_deref())
        }
    }
}
