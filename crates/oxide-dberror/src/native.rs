//! Errors as reported by a driver.

use core::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A driver error code: numeric (`errno`) or textual (SQLSTATE, SQLite
/// result code names).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NativeCode {
    /// Numeric code, e.g. MySQL `1062`.
    Number(i64),
    /// Textual code, e.g. `23505` or `SQLITE_BUSY`.
    Text(String),
}

impl NativeCode {
    /// The code as a number, parsing textual codes made of digits.
    #[must_use]
    pub fn as_number(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.parse().ok(),
        }
    }

    /// The code as text.
    #[must_use]
    pub fn as_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for NativeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for NativeCode {
    fn from(code: i64) -> Self {
        Self::Number(code)
    }
}

impl From<&str> for NativeCode {
    fn from(code: &str) -> Self {
        Self::Text(code.to_string())
    }
}

impl From<String> for NativeCode {
    fn from(code: String) -> Self {
        Self::Text(code)
    }
}

/// An error raised by a database driver, with the statement that caused it.
///
/// Driver adapters build one of these and hand it to
/// [`ErrorTranslator::translate`](crate::ErrorTranslator::translate).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct NativeError {
    pub code: NativeCode,
    pub message: String,
    /// Secondary message (Postgres `detail`).
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub sql: Option<String>,
    #[serde(default)]
    pub parameters: Vec<Value>,
    /// Constraint name, when the driver reports it.
    #[serde(default)]
    pub constraint: Option<String>,
    /// Table name, when the driver reports it.
    #[serde(default)]
    pub table: Option<String>,
}

impl NativeError {
    #[must_use]
    pub fn new(code: impl Into<NativeCode>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            detail: None,
            sql: None,
            parameters: Vec::new(),
            constraint: None,
            table: None,
        }
    }

    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    #[must_use]
    pub fn with_sql(mut self, sql: impl Into<String>) -> Self {
        self.sql = Some(sql.into());
        self
    }

    #[must_use]
    pub fn with_parameters(mut self, parameters: Vec<Value>) -> Self {
        self.parameters = parameters;
        self
    }

    #[must_use]
    pub fn with_constraint(mut self, constraint: impl Into<String>) -> Self {
        self.constraint = Some(constraint.into());
        self
    }

    #[must_use]
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }
}
