//! Allowed column types and column-declaration validation.

use std::collections::BTreeSet;
use std::fmt;

use simstore_core::{ColumnDeclaration, Error, Result, StoreConfig};

use crate::sanitize::Sanitizer;

/// Every type token a column may be declared with: the base types plus each
/// base type followed by each supported constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeVocabulary {
    allowed: BTreeSet<String>,
}

impl TypeVocabulary {
    pub fn new<B, C>(base_types: B, constraints: C) -> Self
    where
        B: IntoIterator,
        B::Item: AsRef<str>,
        C: IntoIterator,
        C::Item: AsRef<str>,
    {
        let base: Vec<String> = base_types
            .into_iter()
            .map(|t| normalize(t.as_ref()))
            .filter(|t| !t.is_empty())
            .collect();
        let constraints: Vec<String> = constraints
            .into_iter()
            .map(|c| normalize(c.as_ref()))
            .filter(|c| !c.is_empty())
            .collect();

        let mut allowed: BTreeSet<String> = base.iter().cloned().collect();
        for ty in &base {
            for constraint in &constraints {
                allowed.insert(format!("{ty} {constraint}"));
            }
        }
        Self { allowed }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(&config.base_types, &config.constraints)
    }

    /// Case-insensitive membership.
    pub fn contains(&self, type_token: &str) -> bool {
        self.allowed.contains(&normalize(type_token))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.allowed.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.allowed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.allowed.is_empty()
    }

    /// Validate a table's columns and render them as `name TYPE, ...`.
    ///
    /// Fails on the first column whose type is outside the vocabulary, or
    /// whose name or type does not pass the sanitizer.
    pub fn column_definitions(
        &self,
        columns: &ColumnDeclaration,
        sanitizer: &Sanitizer,
    ) -> Result<String> {
        if columns.is_empty() {
            return Err(Error::validation("a table needs at least one column"));
        }

        let mut definitions = Vec::with_capacity(columns.len());
        for (name, type_token) in columns.iter() {
            let type_token = normalize(type_token);
            if !self.allowed.contains(&type_token) {
                return Err(Error::validation(format!(
                    "Column type {type_token} not allowed. Must be one of: {self}"
                )));
            }
            let name = sanitizer.identifier(name)?;
            let type_token = sanitizer.type_token(&type_token)?;
            definitions.push(format!("{name} {type_token}"));
        }

        Ok(definitions.join(", "))
    }
}

impl fmt::Display for TypeVocabulary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, ty) in self.allowed.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{ty}")?;
        }
        write!(f, "}}")
    }
}

/// Uppercase and collapse runs of whitespace to one space.
fn normalize(token: &str) -> String {
    token
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}
