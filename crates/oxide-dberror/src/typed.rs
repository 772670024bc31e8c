//! Dialect-independent error taxonomy.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::native::NativeError;

/// Default message of unique constraint violations.
pub const VALIDATION_ERROR: &str = "Validation error";

/// One field-level validation failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationErrorItem {
    pub message: String,
    /// Origin of the failure (`unique violation`).
    #[serde(rename = "type")]
    pub kind: String,
    /// The offending field.
    pub path: String,
    /// The offending value, `null` when unknown.
    pub value: Value,
    pub validator_key: String,
}

impl ValidationErrorItem {
    /// The item reported for each field of a violated unique key.
    #[must_use]
    pub fn unique_violation(field: &str, value: Value) -> Self {
        Self {
            message: format!("{field} must be unique"),
            kind: String::from("unique violation"),
            path: field.to_string(),
            value,
            validator_key: String::from("not_unique"),
        }
    }
}

/// Side of a foreign key that was violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationType {
    /// A referenced row could not be deleted or updated.
    Parent,
    /// A referencing row points at a row that does not exist.
    Child,
}

/// Index metadata of the model the failing statement targeted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelIndex {
    pub name: String,
    pub fields: Vec<String>,
    pub unique: bool,
    /// Custom message for violations of this index.
    pub msg: Option<String>,
}

impl ModelIndex {
    #[must_use]
    pub fn unique<I, S>(name: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            fields: fields.into_iter().map(Into::into).collect(),
            unique: true,
            msg: None,
        }
    }

    #[must_use]
    pub fn with_msg(mut self, msg: impl Into<String>) -> Self {
        self.msg = Some(msg.into());
        self
    }
}

/// A driver error mapped onto the shared taxonomy. Every variant keeps the
/// native error as its source.
#[derive(Debug, thiserror::Error)]
pub enum TypedError {
    /// A unique key was violated.
    #[error("{message}")]
    UniqueConstraint {
        message: String,
        errors: Vec<ValidationErrorItem>,
        /// Offending fields and values, in key order.
        fields: Vec<(String, Value)>,
        /// Table the driver reported, if any.
        table: Option<String>,
        /// Constraint name the driver reported, if any.
        constraint: Option<String>,
        #[source]
        cause: NativeError,
    },

    /// A foreign key was violated.
    #[error("{message}")]
    ForeignKeyConstraint {
        message: String,
        reltype: Option<RelationType>,
        /// Referenced table.
        table: Option<String>,
        fields: Vec<String>,
        value: Option<Value>,
        /// Constraint name.
        index: Option<String>,
        #[source]
        cause: NativeError,
    },

    /// An exclusion constraint was violated.
    #[error("{message}")]
    ExclusionConstraint {
        message: String,
        constraint: Option<String>,
        fields: Vec<(String, Value)>,
        table: Option<String>,
        #[source]
        cause: NativeError,
    },

    /// A statement named a constraint that does not exist.
    #[error("{message}")]
    UnknownConstraint {
        message: String,
        constraint: Option<String>,
        table: Option<String>,
        #[source]
        cause: NativeError,
    },

    /// The statement timed out or the database was busy.
    #[error("{cause}")]
    Timeout {
        #[source]
        cause: NativeError,
    },

    /// Anything not recognised.
    #[error("{cause}")]
    Database {
        #[source]
        cause: NativeError,
    },
}

impl TypedError {
    /// The driver error.
    #[must_use]
    pub const fn cause(&self) -> &NativeError {
        match self {
            Self::UniqueConstraint { cause, .. }
            | Self::ForeignKeyConstraint { cause, .. }
            | Self::ExclusionConstraint { cause, .. }
            | Self::UnknownConstraint { cause, .. }
            | Self::Timeout { cause }
            | Self::Database { cause } => cause,
        }
    }

    /// The statement that failed.
    #[must_use]
    pub fn sql(&self) -> Option<&str> {
        self.cause().sql.as_deref()
    }

    /// The parameters bound to the statement.
    #[must_use]
    pub fn parameters(&self) -> &[Value] {
        &self.cause().parameters
    }

    /// Whether retrying the statement may succeed.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Whether this is any kind of constraint violation.
    #[must_use]
    pub const fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            Self::UniqueConstraint { .. }
                | Self::ForeignKeyConstraint { .. }
                | Self::ExclusionConstraint { .. }
        )
    }
}
