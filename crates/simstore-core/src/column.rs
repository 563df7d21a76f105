//! Column declarations and reflected column metadata.

/// Ordered mapping from column name to type token, e.g.
/// `id -> "INTEGER PRIMARY KEY"`.
///
/// Declaring a name twice replaces its type token and keeps the position of
/// the first declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnDeclaration {
    columns: Vec<(String, String)>,
}

impl ColumnDeclaration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style variant of [`ColumnDeclaration::insert`].
    pub fn column(mut self, name: impl Into<String>, type_token: impl Into<String>) -> Self {
        self.insert(name, type_token);
        self
    }

    /// Declare a column, replacing the type of an existing one with the same name.
    pub fn insert(&mut self, name: impl Into<String>, type_token: impl Into<String>) {
        let name = name.into();
        let type_token = type_token.into();
        match self.columns.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = type_token,
            None => self.columns.push((name, type_token)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.columns.iter().map(|(n, t)| (n.as_str(), t.as_str()))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl<N: Into<String>, T: Into<String>> FromIterator<(N, T)> for ColumnDeclaration {
    fn from_iter<I: IntoIterator<Item = (N, T)>>(iter: I) -> Self {
        let mut decl = Self::new();
        for (name, type_token) in iter {
            decl.insert(name, type_token);
        }
        decl
    }
}

/// One row of `PRAGMA table_info`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReflectedColumn {
    /// Position of the column in the table, starting at 0.
    pub cid: i64,
    pub name: String,
    /// Declared type as written in the DDL (may be empty).
    pub decl_type: String,
    pub not_null: bool,
    /// Default value expression as text, if any.
    pub default_value: Option<String>,
    pub primary_key: bool,
}

impl ReflectedColumn {
    /// Declared type, or `None` when the column was declared without one.
    pub fn declared_type(&self) -> Option<&str> {
        if self.decl_type.is_empty() {
            None
        } else {
            Some(&self.decl_type)
        }
    }
}

/// Base type of a declared type: its first word, uppercased.
///
/// `"datetime primary key"` yields `"DATETIME"`, `"VARCHAR(20)"` yields
/// `"VARCHAR"`.
pub fn declared_base_type(decl_type: &str) -> String {
    decl_type
        .split(|c: char| c.is_whitespace() || c == '(')
        .find(|part| !part.is_empty())
        .unwrap_or("")
        .to_uppercase()
}
