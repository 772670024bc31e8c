//! Error types for SQL generation.
//!
//! Every variant is raised before any SQL reaches a driver. They describe
//! requests that are unsafe or unsupported for the selected dialect and are
//! meant to be fixed by the caller, never retried.

use crate::dialect::DialectKind;

/// Errors raised while generating SQL.
#[derive(Debug, thiserror::Error)]
pub enum QueryGenerationError {
    /// `change_columns_query` was called with an empty change set.
    #[error("change_columns_query requires at least one column to be provided")]
    NoColumns,

    /// Both `default_value` and `drop_default_value` were set on one column.
    #[error(
        "Cannot use both drop_default_value and default_value on the same column (column '{column}' of table '{table}')."
    )]
    ConflictingDefault {
        /// Table name.
        table: String,
        /// Column name.
        column: String,
    },

    /// A change request touched primary key membership.
    #[error(
        "change_columns_query does not support adding or removing a column from the primary key because it would need to drop and recreate the constraint but it does not know whether other columns are already part of the primary key. Use drop_constraint_query and add the constraint again instead (column '{column}' of table '{table}')."
    )]
    PrimaryKeyChange {
        /// Table name.
        table: String,
        /// Column name.
        column: String,
    },

    /// A change request touched unique index membership.
    #[error(
        "change_columns_query does not support adding or removing a column from a unique index because it would need to drop and recreate the index but it does not know whether other columns are already part of the index. Drop the index and add it again instead (column '{column}' of table '{table}')."
    )]
    UniqueChange {
        /// Table name.
        table: String,
        /// Column name.
        column: String,
    },

    /// `on_update` or `on_delete` was given without `references`.
    #[error(
        "change_columns_query does not support changing on_update or on_delete on their own. Use drop_constraint_query and add the foreign key again instead (column '{column}' of table '{table}')."
    )]
    ReferentialActionWithoutReferences {
        /// Table name.
        table: String,
        /// Column name.
        column: String,
    },

    /// A foreign key was requested on a column that already has one.
    #[error(
        "Column '{column}' of table '{table}' is already constrained by foreign key '{constraint}'. Use drop_constraint_query first."
    )]
    ForeignKeyExists {
        /// Table name.
        table: String,
        /// Column name.
        column: String,
        /// Name of the existing constraint.
        constraint: String,
    },

    /// A partial change on a dialect that needs the whole column definition.
    #[error(
        "In {dialect}, change_columns_query uses CHANGE COLUMN, which requires specifying the complete column definition.\nTo prevent unintended changes to the properties of the column, we require that if one of the following properties is specified (set to a non-None value):\n> data_type, allow_null, auto_increment, comment\nThen all of the following properties must be specified too (set to a non-None value):\n> data_type, allow_null, auto_increment, comment, default_value (or set drop_default_value to true)\n\nTable: {table}\nColumn: {column}"
    )]
    IncompleteColumnDefinition {
        /// Dialect that requires the complete definition.
        dialect: DialectKind,
        /// Quoted table name.
        table: String,
        /// Quoted column name.
        column: String,
    },

    /// The dialect lacks a feature the request depends on.
    #[error("{dialect} does not support {feature}")]
    Unsupported {
        /// Dialect.
        dialect: DialectKind,
        /// Feature name.
        feature: &'static str,
    },

    /// A method received an option the dialect cannot honour.
    #[error("{method} was passed the option {option}, which is not supported by {dialect}")]
    UnsupportedOption {
        /// Generator method name.
        method: &'static str,
        /// Dialect.
        dialect: DialectKind,
        /// Option name.
        option: &'static str,
    },

    /// The dialect has no mapping for a data type.
    #[error("{dialect} does not support the data type {data_type}")]
    UnsupportedDataType {
        /// Dialect.
        dialect: DialectKind,
        /// Debug rendering of the data type.
        data_type: String,
    },

    /// A column was rendered without a data type.
    #[error("Column '{column}' has no data type")]
    MissingDataType {
        /// Column name.
        column: String,
    },

    /// A method needs a full column definition that was not provided.
    #[error("{method} requires a column definition for '{column}' on {dialect}")]
    MissingColumnDefinition {
        /// Generator method name.
        method: &'static str,
        /// Dialect.
        dialect: DialectKind,
        /// Column name.
        column: String,
    },

    /// An ENUM type has no values.
    #[error("Values for ENUM column '{column}' haven't been defined")]
    EmptyEnum {
        /// Column name.
        column: String,
    },

    /// A float default that is NaN or infinite.
    #[error("Cannot use {0} as a column default, it has no SQL literal")]
    NonFiniteDefault(f64),

    /// A referential action string could not be parsed.
    #[error("Unknown referential action: {0}")]
    InvalidReferentialAction(String),

    /// Capability overrides did not fit the capability tree.
    #[error("Invalid capability overrides: {0}")]
    InvalidCapabilities(#[source] serde_json::Error),

    /// Dialect configuration could not be parsed.
    #[error("Invalid dialect configuration: {0}")]
    InvalidConfig(#[source] serde_json::Error),

    /// A catalog row could not be read as a constraint description.
    #[error("Invalid constraint catalog row: {0}")]
    InvalidCatalogRow(#[source] serde_json::Error),
}

/// Result type for SQL generation.
pub type Result<T> = std::result::Result<T, QueryGenerationError>;
