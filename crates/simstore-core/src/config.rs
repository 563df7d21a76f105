//! Store configuration.
//!
//! [`StoreConfig`] carries the values the access layer treats as injected
//! configuration: where database files live, which column types and
//! constraints are allowed, and how identifiers are sanitized. Every field
//! defaults sensibly so an empty TOML document is valid.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Base column types accepted by default.
pub const DEFAULT_BASE_TYPES: &[&str] = &[
    "INTEGER",
    "REAL",
    "TEXT",
    "BLOB",
    "DATE",
    "DATETIME",
    "TIMEDELTA",
];

/// Column constraints that may follow a base type by default.
pub const DEFAULT_CONSTRAINTS: &[&str] = &["PRIMARY KEY", "NOT NULL", "UNIQUE"];

/// How identifiers and type tokens are checked before interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SanitizerMode {
    /// Injection pattern with banned keyword substrings.
    #[default]
    Pattern,
    /// Identifier grammar per token plus a whole-token keyword denylist.
    Strict,
}

/// Configuration for databases opened through the access layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory holding all database files.
    pub root_dir: PathBuf,
    /// File extension appended to the database name (without the dot).
    pub extension: String,
    /// Allowed base column types.
    pub base_types: Vec<String>,
    /// Constraints that may be combined with any base type.
    pub constraints: Vec<String>,
    /// How identifiers and type tokens are checked before reaching SQL text.
    pub sanitizer: SanitizerMode,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from("databases"),
            extension: "db".into(),
            base_types: DEFAULT_BASE_TYPES.iter().map(|s| s.to_string()).collect(),
            constraints: DEFAULT_CONSTRAINTS.iter().map(|s| s.to_string()).collect(),
            sanitizer: SanitizerMode::default(),
        }
    }
}

impl StoreConfig {
    /// Deserialize a `StoreConfig` from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).map_err(|e| Error::validation(format!("config parse error: {e}")))
    }

    /// Load configuration from a file path, falling back to defaults if the
    /// path is `None`, the file does not exist, or it cannot be parsed.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_toml(&contents).unwrap_or_else(|e| {
                tracing::warn!("Failed to parse config file {}: {e}", path.display());
                Self::default()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No config file at {}; using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                tracing::warn!("Failed to read config file {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Derive the on-disk path of the database called `name`.
    pub fn database_path(&self, name: &str) -> PathBuf {
        self.root_dir.join(format!("{name}.{}", self.extension))
    }

    /// Return a list of validation warnings (non-fatal issues).
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.base_types.is_empty() {
            warnings.push("base_types is empty; no table can be created".into());
        }
        if self.extension.is_empty() {
            warnings.push("extension is empty; database files will end with '.'".into());
        }
        if self.root_dir.as_os_str().is_empty() {
            warnings.push("root_dir is empty; databases are created in the working directory".into());
        }

        for (field, entries) in [("base_types", &self.base_types), ("constraints", &self.constraints)] {
            let mut seen = HashSet::new();
            for entry in entries {
                if entry.trim().is_empty() {
                    warnings.push(format!("{field} contains an empty entry"));
                } else if !seen.insert(entry.to_uppercase()) {
                    warnings.push(format!("{field} lists '{entry}' more than once"));
                }
            }
        }

        warnings
    }
}
