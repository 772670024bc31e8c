//! Column definitions.
//!
//! A [`ColumnDefinition`] is deliberately partial: every property is
//! optional so the same type serves full definitions (CREATE TABLE,
//! ADD COLUMN) and change requests (`change_columns_query`), where `None`
//! means "leave this property alone".

use core::str::FromStr;

use crate::error::QueryGenerationError;
use crate::table::TableName;
use crate::types::DataType;
use crate::value::DefaultValue;

/// Foreign key referential action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferentialAction {
    /// No action.
    NoAction,
    /// Restrict deletion/update.
    Restrict,
    /// Cascade the operation.
    Cascade,
    /// Set to NULL.
    SetNull,
    /// Set to default value.
    SetDefault,
}

impl ReferentialAction {
    /// Returns the SQL representation of the action.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::NoAction => "NO ACTION",
            Self::Restrict => "RESTRICT",
            Self::Cascade => "CASCADE",
            Self::SetNull => "SET NULL",
            Self::SetDefault => "SET DEFAULT",
        }
    }

    /// Parses an action where the empty string means "no action given".
    ///
    /// # Errors
    ///
    /// Returns [`QueryGenerationError::InvalidReferentialAction`] for
    /// unknown non-empty input.
    pub fn parse_optional(s: &str) -> Result<Option<Self>, QueryGenerationError> {
        if s.trim().is_empty() {
            return Ok(None);
        }
        s.parse().map(Some)
    }
}

impl FromStr for ReferentialAction {
    type Err = QueryGenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('_', " ").to_ascii_uppercase();
        match normalized.as_str() {
            "NO ACTION" => Ok(Self::NoAction),
            "RESTRICT" => Ok(Self::Restrict),
            "CASCADE" => Ok(Self::Cascade),
            "SET NULL" => Ok(Self::SetNull),
            "SET DEFAULT" => Ok(Self::SetDefault),
            _ => Err(QueryGenerationError::InvalidReferentialAction(s.to_string())),
        }
    }
}

/// Deferral mode of a foreign key constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Deferrable {
    /// `DEFERRABLE INITIALLY IMMEDIATE`
    InitiallyImmediate,
    /// `DEFERRABLE INITIALLY DEFERRED`
    InitiallyDeferred,
    /// `NOT DEFERRABLE`
    NotDeferrable,
}

impl Deferrable {
    /// Returns the SQL representation of the deferral mode.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::InitiallyImmediate => "DEFERRABLE INITIALLY IMMEDIATE",
            Self::InitiallyDeferred => "DEFERRABLE INITIALLY DEFERRED",
            Self::NotDeferrable => "NOT DEFERRABLE",
        }
    }
}

/// Target of a foreign key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct References {
    /// The referenced table.
    pub table: TableName,
    /// The referenced column, `id` when unset.
    pub key: Option<String>,
    /// Deferral mode.
    pub deferrable: Option<Deferrable>,
}

impl References {
    /// References the `id` column of `table`.
    #[must_use]
    pub fn to(table: impl Into<TableName>) -> Self {
        Self {
            table: table.into(),
            key: None,
            deferrable: None,
        }
    }

    /// Sets the referenced column.
    #[must_use]
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Sets the deferral mode.
    #[must_use]
    pub const fn deferrable(mut self, deferrable: Deferrable) -> Self {
        self.deferrable = Some(deferrable);
        self
    }

    /// The referenced column name.
    #[must_use]
    pub fn key_or_id(&self) -> &str {
        self.key.as_deref().unwrap_or("id")
    }
}

/// Unique flag of a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unique {
    /// Plain unique flag.
    Flag(bool),
    /// Member of a named unique index.
    Named(String),
}

/// A column definition, possibly partial.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnDefinition {
    /// Data type.
    pub data_type: Option<DataType>,
    /// Whether NULL is allowed.
    pub allow_null: Option<bool>,
    /// Default value. `Some(DefaultValue::Null)` is an explicit NULL default.
    pub default_value: Option<DefaultValue>,
    /// Drop the current default.
    pub drop_default_value: bool,
    /// Auto-increment flag.
    pub auto_increment: Option<bool>,
    /// Use an identity column for auto-increment.
    pub auto_increment_identity: Option<bool>,
    /// Unique flag.
    pub unique: Option<Unique>,
    /// Primary key flag.
    pub primary_key: Option<bool>,
    /// Column comment. `Some(None)` removes the comment.
    pub comment: Option<Option<String>>,
    /// Foreign key target.
    pub references: Option<References>,
    /// ON DELETE action.
    pub on_delete: Option<ReferentialAction>,
    /// ON UPDATE action.
    pub on_update: Option<ReferentialAction>,
    /// Place the column first.
    pub first: bool,
    /// Place the column after another one.
    pub after: Option<String>,
    /// Physical column name, when it differs from the attribute name.
    pub field: Option<String>,
}

impl ColumnDefinition {
    /// Creates a definition with a data type and nothing else.
    #[must_use]
    pub fn new(data_type: DataType) -> Self {
        Self {
            data_type: Some(data_type),
            ..Self::default()
        }
    }

    /// Creates an empty definition, for change requests.
    #[must_use]
    pub fn partial() -> Self {
        Self::default()
    }

    /// Sets the data type.
    #[must_use]
    pub fn data_type(mut self, data_type: DataType) -> Self {
        self.data_type = Some(data_type);
        self
    }

    /// Marks the column as NOT NULL.
    #[must_use]
    pub const fn not_null(mut self) -> Self {
        self.allow_null = Some(false);
        self
    }

    /// Sets whether NULL is allowed.
    #[must_use]
    pub const fn allow_null(mut self, allow: bool) -> Self {
        self.allow_null = Some(allow);
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<DefaultValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Sets an explicit NULL default.
    #[must_use]
    pub fn default_null(mut self) -> Self {
        self.default_value = Some(DefaultValue::Null);
        self
    }

    /// Sets a raw SQL expression as default.
    #[must_use]
    pub fn default_expr(mut self, expr: impl Into<String>) -> Self {
        self.default_value = Some(DefaultValue::Expression(expr.into()));
        self
    }

    /// Requests the current default to be dropped.
    #[must_use]
    pub const fn drop_default(mut self) -> Self {
        self.drop_default_value = true;
        self
    }

    /// Sets the auto-increment flag.
    #[must_use]
    pub const fn auto_increment(mut self, enabled: bool) -> Self {
        self.auto_increment = Some(enabled);
        self
    }

    /// Sets the identity flag.
    #[must_use]
    pub const fn auto_increment_identity(mut self, enabled: bool) -> Self {
        self.auto_increment_identity = Some(enabled);
        self
    }

    /// Marks the column as UNIQUE.
    #[must_use]
    pub fn unique(mut self) -> Self {
        self.unique = Some(Unique::Flag(true));
        self
    }

    /// Sets the unique flag explicitly.
    #[must_use]
    pub fn unique_flag(mut self, unique: bool) -> Self {
        self.unique = Some(Unique::Flag(unique));
        self
    }

    /// Adds the column to a named unique index.
    #[must_use]
    pub fn unique_named(mut self, name: impl Into<String>) -> Self {
        self.unique = Some(Unique::Named(name.into()));
        self
    }

    /// Marks the column as PRIMARY KEY.
    #[must_use]
    pub const fn primary_key(mut self) -> Self {
        self.primary_key = Some(true);
        self
    }

    /// Sets the primary key flag explicitly.
    #[must_use]
    pub const fn primary_key_flag(mut self, primary_key: bool) -> Self {
        self.primary_key = Some(primary_key);
        self
    }

    /// Sets the column comment.
    #[must_use]
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(Some(comment.into()));
        self
    }

    /// Removes the column comment.
    #[must_use]
    pub fn clear_comment(mut self) -> Self {
        self.comment = Some(None);
        self
    }

    /// Sets a foreign key target.
    #[must_use]
    pub fn references(mut self, references: References) -> Self {
        self.references = Some(references);
        self
    }

    /// Sets the ON DELETE action.
    #[must_use]
    pub const fn on_delete(mut self, action: ReferentialAction) -> Self {
        self.on_delete = Some(action);
        self
    }

    /// Sets the ON UPDATE action.
    #[must_use]
    pub const fn on_update(mut self, action: ReferentialAction) -> Self {
        self.on_update = Some(action);
        self
    }

    /// Places the column first.
    #[must_use]
    pub const fn first(mut self) -> Self {
        self.first = true;
        self
    }

    /// Places the column after another one.
    #[must_use]
    pub fn after(mut self, column: impl Into<String>) -> Self {
        self.after = Some(column.into());
        self
    }

    /// Sets the physical column name.
    #[must_use]
    pub fn field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Whether this definition asks for a plain UNIQUE constraint.
    #[must_use]
    pub const fn is_unique(&self) -> bool {
        matches!(self.unique, Some(Unique::Flag(true)))
    }
}

// =============================================================================
// Shorthand Functions for Common Types
// =============================================================================

/// Creates an INTEGER column.
#[must_use]
pub fn integer() -> ColumnDefinition {
    ColumnDefinition::new(DataType::Integer)
}

/// Creates a BIGINT column.
#[must_use]
pub fn bigint() -> ColumnDefinition {
    ColumnDefinition::new(DataType::Bigint)
}

/// Creates a VARCHAR column.
#[must_use]
pub fn varchar(len: u32) -> ColumnDefinition {
    ColumnDefinition::new(DataType::Varchar(Some(len)))
}

/// Creates a CHAR column.
#[must_use]
pub fn char(len: u32) -> ColumnDefinition {
    ColumnDefinition::new(DataType::Char(Some(len)))
}

/// Creates a TEXT column.
#[must_use]
pub fn text() -> ColumnDefinition {
    ColumnDefinition::new(DataType::Text)
}

/// Creates a BOOLEAN column.
#[must_use]
pub fn boolean() -> ColumnDefinition {
    ColumnDefinition::new(DataType::Boolean)
}

/// Creates a DATETIME column.
#[must_use]
pub fn datetime() -> ColumnDefinition {
    ColumnDefinition::new(DataType::Datetime)
}

/// Creates an ENUM column.
#[must_use]
pub fn enumeration<I, S>(values: I) -> ColumnDefinition
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    ColumnDefinition::new(DataType::enumeration(values))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_referential_action_parse() {
        assert_eq!(
            "cascade".parse::<ReferentialAction>().unwrap(),
            ReferentialAction::Cascade
        );
        assert_eq!(
            "SET_NULL".parse::<ReferentialAction>().unwrap(),
            ReferentialAction::SetNull
        );
        assert_eq!(
            "no action".parse::<ReferentialAction>().unwrap(),
            ReferentialAction::NoAction
        );
        assert!("explode".parse::<ReferentialAction>().is_err());
    }

    #[test]
    fn test_empty_referential_action_is_absent() {
        assert_eq!(ReferentialAction::parse_optional("").unwrap(), None);
        assert_eq!(ReferentialAction::parse_optional("  ").unwrap(), None);
        assert_eq!(
            ReferentialAction::parse_optional("RESTRICT").unwrap(),
            Some(ReferentialAction::Restrict)
        );
    }

    #[test]
    fn test_builder() {
        let def = integer()
            .not_null()
            .default_value(5)
            .unique()
            .comment("counter")
            .references(References::to("projects").key("uid"))
            .on_delete(ReferentialAction::Cascade);

        assert_eq!(def.data_type, Some(DataType::Integer));
        assert_eq!(def.allow_null, Some(false));
        assert_eq!(def.default_value, Some(DefaultValue::Integer(5)));
        assert!(def.is_unique());
        assert_eq!(def.comment, Some(Some("counter".to_string())));
        assert_eq!(def.references.as_ref().unwrap().key_or_id(), "uid");
        assert_eq!(def.on_delete, Some(ReferentialAction::Cascade));
    }

    #[test]
    fn test_partial_is_empty() {
        let def = ColumnDefinition::partial();
        assert!(def.data_type.is_none());
        assert!(def.allow_null.is_none());
        assert!(!def.drop_default_value);
        assert!(!def.is_unique());
    }

    #[test]
    fn test_references_default_key() {
        let refs = References::to("users");
        assert_eq!(refs.key_or_id(), "id");
        assert_eq!(
            refs.deferrable(Deferrable::InitiallyDeferred).deferrable,
            Some(Deferrable::InitiallyDeferred)
        );
    }
}
