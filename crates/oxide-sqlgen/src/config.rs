//! Dialect configuration.
//!
//! The configuration is a plain serde value; where it comes from (a file, the
//! environment, a settings service) is up to the caller.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dialect::DialectKind;
use crate::error::{QueryGenerationError, Result};

/// Settings used to build a [`Dialect`](crate::Dialect).
///
/// ```
/// use oxide_sqlgen::{Dialect, DialectConfig, DialectKind};
///
/// let config = DialectConfig::from_json(
///     r#"{
///         "dialect": "mysql",
///         "engine": "MyISAM",
///         "capabilityOverrides": { "constraints": { "check": false } }
///     }"#,
/// )
/// .unwrap();
/// let dialect = Dialect::from_config(&config).unwrap();
///
/// assert_eq!(dialect.kind(), DialectKind::Mysql);
/// assert_eq!(dialect.default_engine(), Some("MyISAM"));
/// assert!(!dialect.flags().constraints.check);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DialectConfig {
    /// Target engine.
    pub dialect: DialectKind,
    /// Schema used for unqualified names (enum types, catalog queries).
    #[serde(default)]
    pub default_schema: Option<String>,
    /// Storage engine for CREATE TABLE, where supported.
    #[serde(default)]
    pub engine: Option<String>,
    /// Deep-merged onto the built-in capability matrix.
    #[serde(default)]
    pub capability_overrides: Option<Value>,
}

impl DialectConfig {
    /// Configuration with built-in defaults for `dialect`.
    #[must_use]
    pub const fn new(dialect: DialectKind) -> Self {
        Self {
            dialect,
            default_schema: None,
            engine: None,
            capability_overrides: None,
        }
    }

    /// Parses a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`QueryGenerationError::InvalidConfig`] on malformed input.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(QueryGenerationError::InvalidConfig)
    }
}
