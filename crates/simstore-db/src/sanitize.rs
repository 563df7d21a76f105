//! Identifier and type-token sanitizing.
//!
//! Anything interpolated into SQL text (table names, column names, type
//! tokens) passes through a [`Sanitizer`] first. Row values never do; they
//! are always bound as parameters.

use regex::{Regex, RegexBuilder};
use simstore_core::{Error, Result, SanitizerMode};

/// Numeric or underscore-leading forms, any character outside word
/// characters and space, or a banned keyword anywhere in the string.
pub const INJECTION_PATTERN: &str =
    r"(^[_0-9]+)|[^\w ]|(true|false|select|where|drop|delete|create)";

/// Grammar of a single token in strict mode.
const TOKEN_GRAMMAR: &str = r"^[A-Za-z_][A-Za-z0-9_]*$";

/// Keywords rejected as whole tokens in strict mode.
pub const DENIED_KEYWORDS: &[&str] = &[
    "SELECT", "INSERT", "UPDATE", "DELETE", "DROP", "CREATE", "ALTER", "WHERE", "TRUE", "FALSE",
    "UNION", "ATTACH", "DETACH", "PRAGMA", "REPLACE", "TABLE", "FROM", "INTO", "VALUES", "VACUUM",
    "TRIGGER",
];

#[derive(Debug, Clone)]
pub struct Sanitizer {
    mode: SanitizerMode,
    pattern: Regex,
    token: Regex,
}

impl Sanitizer {
    pub fn new(mode: SanitizerMode) -> Result<Self> {
        let pattern = RegexBuilder::new(INJECTION_PATTERN)
            .case_insensitive(true)
            .build()
            .map_err(|e| Error::validation(format!("invalid injection pattern: {e}")))?;
        let token = Regex::new(TOKEN_GRAMMAR)
            .map_err(|e| Error::validation(format!("invalid token grammar: {e}")))?;
        Ok(Self {
            mode,
            pattern,
            token,
        })
    }

    pub fn mode(&self) -> SanitizerMode {
        self.mode
    }

    /// The compiled injection pattern.
    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    /// Check a table or column name.
    pub fn identifier<'a>(&self, value: &'a str) -> Result<&'a str> {
        match self.mode {
            SanitizerMode::Pattern => self.check_pattern(value),
            SanitizerMode::Strict => {
                if value.split_whitespace().count() != 1 || value.trim() != value {
                    return Err(unallowed(value));
                }
                self.check_tokens(value)
            }
        }
    }

    /// Check a column type token such as `INTEGER PRIMARY KEY`.
    pub fn type_token<'a>(&self, value: &'a str) -> Result<&'a str> {
        match self.mode {
            SanitizerMode::Pattern => self.check_pattern(value),
            SanitizerMode::Strict => self.check_tokens(value),
        }
    }

    fn check_pattern<'a>(&self, value: &'a str) -> Result<&'a str> {
        if value.trim().is_empty() || self.pattern.is_match(value) {
            return Err(unallowed(value));
        }
        Ok(value)
    }

    fn check_tokens<'a>(&self, value: &'a str) -> Result<&'a str> {
        let mut tokens = value.split_whitespace().peekable();
        if tokens.peek().is_none() {
            return Err(unallowed(value));
        }
        for token in tokens {
            let denied = DENIED_KEYWORDS
                .iter()
                .any(|kw| kw.eq_ignore_ascii_case(token));
            if denied || !self.token.is_match(token) {
                return Err(unallowed(value));
            }
        }
        Ok(value)
    }
}

fn unallowed(value: &str) -> Error {
    Error::validation(format!("Unallowed characters in value {value:?}"))
}
