//! Dialect profiles.
//!
//! A [`Dialect`] is plain data: a [`CapabilityMatrix`], an
//! [`IdentifierQuoter`], a type mapper and a handful of lookup tables.
//! The generator never asks which engine it is talking to; it only reads
//! these tables. Each engine module declares its own profile.

mod mariadb;
mod mysql;
mod postgres;
mod sqlite;

use core::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::capabilities::{Capabilities, CapabilityMatrix};
use crate::config::DialectConfig;
use crate::error::Result;
use crate::quote::IdentifierQuoter;
use crate::types::DataType;

/// Supported engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialectKind {
    /// PostgreSQL.
    Postgres,
    /// MySQL.
    Mysql,
    /// MariaDB.
    Mariadb,
    /// SQLite.
    Sqlite,
}

impl DialectKind {
    /// Returns the dialect name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::Mysql => "mysql",
            Self::Mariadb => "mariadb",
            Self::Sqlite => "sqlite",
        }
    }
}

impl fmt::Display for DialectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How the auto-increment fragment is spelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoIncrementStyle {
    /// A keyword after NOT NULL (`AUTO_INCREMENT`).
    Keyword(&'static str),
    /// The integer type is replaced by its serial counterpart.
    SerialType,
    /// A keyword glued to `PRIMARY KEY` (`PRIMARY KEY AUTOINCREMENT`).
    PrimaryKeySuffix(&'static str),
}

/// Maps a semantic type to the dialect's SQL spelling. `None` means the
/// dialect has no such type.
pub type TypeMapper = fn(&DataType) -> Option<String>;

/// Builds the constraint catalog query from already-escaped literals.
pub type CatalogQuery = fn(&CatalogFilter) -> String;

/// Escaped literals used by a [`CatalogQuery`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogFilter {
    /// Table name literal.
    pub table: String,
    /// Schema literal, if any.
    pub schema: Option<String>,
    /// Constraint name literal, if any.
    pub constraint_name: Option<String>,
}

/// A dialect profile.
#[derive(Clone)]
pub struct Dialect {
    kind: DialectKind,
    capabilities: Arc<CapabilityMatrix>,
    quoter: IdentifierQuoter,
    type_mapper: TypeMapper,
    auto_increment: AutoIncrementStyle,
    constraint_catalog: Option<CatalogQuery>,
    default_schema: Option<String>,
    default_engine: Option<String>,
}

impl fmt::Debug for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dialect")
            .field("kind", &self.kind)
            .field("capabilities", &self.capabilities)
            .field("quoter", &self.quoter)
            .field("auto_increment", &self.auto_increment)
            .field("default_schema", &self.default_schema)
            .field("default_engine", &self.default_engine)
            .finish_non_exhaustive()
    }
}

/// Raw parts of a profile, filled in by the engine modules.
pub(crate) struct DialectParts {
    pub kind: DialectKind,
    pub capabilities: Capabilities,
    pub quoter: IdentifierQuoter,
    pub type_mapper: TypeMapper,
    pub auto_increment: AutoIncrementStyle,
    pub constraint_catalog: Option<CatalogQuery>,
    pub default_schema: Option<&'static str>,
    pub default_engine: Option<&'static str>,
}

impl Dialect {
    /// Returns the built-in profile for an engine.
    #[must_use]
    pub fn new(kind: DialectKind) -> Self {
        let parts = match kind {
            DialectKind::Postgres => postgres::parts(),
            DialectKind::Mysql => mysql::parts(),
            DialectKind::Mariadb => mariadb::parts(),
            DialectKind::Sqlite => sqlite::parts(),
        };
        Self::from_parts(parts)
    }

    /// PostgreSQL profile.
    #[must_use]
    pub fn postgres() -> Self {
        Self::new(DialectKind::Postgres)
    }

    /// MySQL profile.
    #[must_use]
    pub fn mysql() -> Self {
        Self::new(DialectKind::Mysql)
    }

    /// MariaDB profile.
    #[must_use]
    pub fn mariadb() -> Self {
        Self::new(DialectKind::Mariadb)
    }

    /// SQLite profile.
    #[must_use]
    pub fn sqlite() -> Self {
        Self::new(DialectKind::Sqlite)
    }

    /// Builds a profile from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the capability overrides do not fit the
    /// capability tree.
    pub fn from_config(config: &DialectConfig) -> Result<Self> {
        let mut dialect = Self::new(config.dialect);
        if let Some(ref overrides) = config.capability_overrides {
            dialect = dialect.with_capability_overrides(overrides)?;
        }
        if let Some(ref schema) = config.default_schema {
            dialect.default_schema = Some(schema.clone());
        }
        if let Some(ref engine) = config.engine {
            dialect.default_engine = Some(engine.clone());
        }
        Ok(dialect)
    }

    fn from_parts(parts: DialectParts) -> Self {
        let quoter = apply_capabilities(parts.quoter, &parts.capabilities);
        Self {
            kind: parts.kind,
            capabilities: Arc::new(CapabilityMatrix::new(parts.capabilities)),
            quoter,
            type_mapper: parts.type_mapper,
            auto_increment: parts.auto_increment,
            constraint_catalog: parts.constraint_catalog,
            default_schema: parts.default_schema.map(str::to_string),
            default_engine: parts.default_engine.map(str::to_string),
        }
    }

    /// Returns a copy with `overrides` deep-merged onto the capability
    /// matrix.
    ///
    /// # Errors
    ///
    /// Returns [`QueryGenerationError::InvalidCapabilities`](crate::QueryGenerationError::InvalidCapabilities)
    /// when the merged tree is invalid.
    pub fn with_capability_overrides(&self, overrides: &Value) -> Result<Self> {
        let capabilities = self.capabilities.with_overrides(overrides)?;
        let quoter = apply_capabilities(self.quoter.clone(), capabilities.flags());
        Ok(Self {
            capabilities: Arc::new(capabilities),
            quoter,
            ..self.clone()
        })
    }

    /// The engine this profile describes.
    #[must_use]
    pub const fn kind(&self) -> DialectKind {
        self.kind
    }

    /// The capability matrix.
    #[must_use]
    pub fn capabilities(&self) -> &CapabilityMatrix {
        &self.capabilities
    }

    /// Shorthand for the typed flags.
    #[must_use]
    pub fn flags(&self) -> &Capabilities {
        self.capabilities.flags()
    }

    /// The identifier quoter and literal escaper.
    #[must_use]
    pub const fn quoter(&self) -> &IdentifierQuoter {
        &self.quoter
    }

    /// Maps a semantic type through the dialect's type table.
    #[must_use]
    pub fn map_data_type(&self, data_type: &DataType) -> Option<String> {
        (self.type_mapper)(data_type)
    }

    /// How auto-increment is spelled.
    #[must_use]
    pub const fn auto_increment_style(&self) -> AutoIncrementStyle {
        self.auto_increment
    }

    /// Builds the constraint catalog query, if the dialect has one.
    #[must_use]
    pub fn constraint_catalog_query(&self, filter: &CatalogFilter) -> Option<String> {
        self.constraint_catalog.map(|query| query(filter))
    }

    /// Schema used when a table name carries none.
    #[must_use]
    pub fn default_schema(&self) -> Option<&str> {
        self.default_schema.as_deref()
    }

    /// Storage engine appended to CREATE TABLE.
    #[must_use]
    pub fn default_engine(&self) -> Option<&str> {
        self.default_engine.as_deref()
    }
}

fn apply_capabilities(quoter: IdentifierQuoter, capabilities: &Capabilities) -> IdentifierQuoter {
    quoter
        .boolean_literals(capabilities.data_types.boolean)
        .parenthesize_expressions(capabilities.parenthesized_default_expressions)
        .schemas(capabilities.schemas)
}
