//! simstore-db: sanitized access to single-file SQLite stores.
//!
//! # Modules
//!
//! - `codec` - Temporal codecs (DATE, DATETIME, TIMEDELTA) and their registry
//! - `sanitize` - Identifier and type-token checks
//! - `schema` - Allowed column type vocabulary
//! - `query` - SQL text builders
//! - `database` - Connection lifecycle and the public operations
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use simstore_core::{ColumnDeclaration, StoreConfig, Value};
//! use simstore_db::{CodecRegistry, Database};
//!
//! let codecs = Arc::new(CodecRegistry::standard());
//! let mut db = Database::new("run_1", &StoreConfig::default(), codecs, false).unwrap();
//!
//! let columns = ColumnDeclaration::new()
//!     .column("id", "INTEGER PRIMARY KEY")
//!     .column("label", "TEXT");
//! db.create_table("events", &columns).unwrap();
//! db.insert("events", &[Value::Integer(1), Value::from("start")]).unwrap();
//! ```

pub mod codec;
pub mod database;
pub mod query;
pub mod sanitize;
pub mod schema;

pub use codec::{CodecRegistry, DateCodec, DateTimeCodec, TemporalCodec, TimeDeltaCodec};
pub use database::{sqlite_error, Database, Row};
pub use sanitize::Sanitizer;
pub use schema::TypeVocabulary;
