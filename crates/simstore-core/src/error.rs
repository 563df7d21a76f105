//! Unified error type for simstore.
//!
//! Every failure the access layer can report funnels into [`Error`]. None of
//! the variants are recovered from locally; the only local cleanup is the
//! connection release performed by the database facade.

/// Unified error type covering all failure modes of the store access layer.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An identifier or type token failed sanitization, or a type token is
    /// outside the allowed vocabulary.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Reflection found no columns for the table.
    #[error("Column retrieval failed, table >>{table}<< does not exist")]
    SchemaNotFound {
        /// The table that was reflected.
        table: String,
    },

    /// A row's width disagrees with the table's column count.
    #[error("Number of data elements >>{actual}<< does not match number of columns >>{expected}<< of table {table}")]
    ArityMismatch {
        /// The table the row was destined for.
        table: String,
        /// Column count of the table.
        expected: usize,
        /// Number of values supplied.
        actual: usize,
    },

    /// The embedded engine reported a failure (lock contention, constraint
    /// violation, malformed statement, ...). The engine's error is kept intact.
    #[error("Store error: {source}")]
    Store {
        /// The underlying engine error.
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A stored value could not be decoded through its declared type's codec.
    #[error("Codec error [{type_name}]: {message}")]
    Codec {
        /// Declared type whose codec rejected the value.
        type_name: String,
        /// Human-readable error description.
        message: String,
    },

    /// An I/O operation on the database file or its directory failed.
    #[error("IO error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}

impl Error {
    /// Convenience constructor for [`Error::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }

    /// Convenience constructor for [`Error::SchemaNotFound`].
    pub fn schema_not_found(table: impl Into<String>) -> Self {
        Error::SchemaNotFound {
            table: table.into(),
        }
    }

    /// Convenience constructor for [`Error::ArityMismatch`].
    pub fn arity_mismatch(table: impl Into<String>, expected: usize, actual: usize) -> Self {
        Error::ArityMismatch {
            table: table.into(),
            expected,
            actual,
        }
    }

    /// Convenience constructor for [`Error::Store`].
    pub fn store(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Error::Store {
            source: source.into(),
        }
    }

    /// Convenience constructor for [`Error::Codec`].
    pub fn codec(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Codec {
            type_name: type_name.into(),
            message: message.into(),
        }
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
