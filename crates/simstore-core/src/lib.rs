//! simstore-core: shared types, errors, and configuration.
//!
//! This crate is the foundational dependency of the simstore crates,
//! providing the unified error type, the store configuration, the typed row
//! [`Value`], and column declaration/reflection records.

pub mod column;
pub mod config;
pub mod error;
pub mod value;

// Re-export the most commonly used items at the crate root.
pub use column::{declared_base_type, ColumnDeclaration, ReflectedColumn};
pub use config::{SanitizerMode, StoreConfig};
pub use error::{Error, Result};
pub use value::Value;
