//! Per-dialect feature flags.
//!
//! [`Capabilities`] is the typed view: every flag defaults to "not
//! supported", and each dialect declares what it adds on top with struct
//! update syntax. [`CapabilityMatrix`] wraps it together with a JSON tree so
//! flags can also be looked up by structural path (`"dataTypes.JSON"`,
//! `"constraints.deferrable"`), and so configuration can deep-merge
//! overrides onto a dialect's defaults.
//!
//! A matrix is never mutated once built. Applying overrides produces a new
//! one.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{QueryGenerationError, Result};

/// Auto-increment support.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct AutoIncrementCapabilities {
    /// `GENERATED BY DEFAULT AS IDENTITY` columns.
    pub identity: bool,
    /// Auto-increment is only accepted on the primary key.
    pub requires_primary_key: bool,
}

/// Constraint support.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ConstraintCapabilities {
    /// `REFERENCES` may appear inline in a column definition.
    pub inline_references: bool,
    /// `DEFERRABLE` foreign keys.
    pub deferrable: bool,
    /// Foreign key checks can be switched off for a session.
    pub foreign_key_checks_disableable: bool,
    /// CHECK constraints.
    pub check: bool,
    /// `ON UPDATE` referential actions.
    pub on_update: bool,
    /// ADD COLUMN names its foreign key with an explicit ADD CONSTRAINT.
    pub named_foreign_key_on_add_column: bool,
}

/// How existing columns are altered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct AlterColumnCapabilities {
    /// One `ALTER COLUMN` sub-clause per changed property.
    pub granular: bool,
    /// Whole column redefinition through `MODIFY`.
    pub modify: bool,
}

/// How columns are renamed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct RenameColumnCapabilities {
    /// Renaming goes through `CHANGE old new <definition>`.
    pub requires_definition: bool,
}

/// Data type support.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DataTypeCapabilities {
    /// JSON columns.
    #[serde(rename = "JSON")]
    pub json: bool,
    /// JSONB columns.
    #[serde(rename = "JSONB")]
    pub jsonb: bool,
    /// ARRAY columns.
    #[serde(rename = "ARRAY")]
    pub array: bool,
    /// ENUM columns.
    #[serde(rename = "ENUM")]
    pub enums: bool,
    /// ENUMs are standalone named types rather than inline column types.
    #[serde(rename = "namedEnums")]
    pub named_enums: bool,
    /// Spatial columns.
    #[serde(rename = "GEOMETRY")]
    pub geometry: bool,
    /// Native UUID columns.
    #[serde(rename = "UUID")]
    pub uuid: bool,
    /// Native boolean literals. Without them booleans render as 0/1.
    #[serde(rename = "BOOLEAN")]
    pub boolean: bool,
    /// Binary collation on string columns.
    #[serde(rename = "COLLATE_BINARY")]
    pub collate_binary: bool,
}

/// Index support.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct IndexCapabilities {
    /// Per-column collation.
    pub collate: bool,
    /// Prefix lengths.
    pub length: bool,
    /// `CREATE INDEX CONCURRENTLY`.
    pub concurrently: bool,
    /// `USING <method>`.
    pub using: bool,
    /// Partial indexes.
    #[serde(rename = "where")]
    pub where_clause: bool,
}

/// CREATE TABLE option support.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct TableOptionCapabilities {
    /// `ENGINE=`
    pub engine: bool,
    /// `DEFAULT CHARSET=`
    pub charset: bool,
    /// `COLLATE`
    pub collate: bool,
    /// `ROW_FORMAT=`
    pub row_format: bool,
    /// Table comments.
    pub comment: bool,
    /// `AUTO_INCREMENT=`
    pub initial_auto_increment: bool,
    /// Named unique key groups.
    pub unique_keys: bool,
}

/// ADD COLUMN option support.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct AddColumnCapabilities {
    /// `ADD COLUMN IF NOT EXISTS`
    pub if_not_exists: bool,
}

/// DROP COLUMN option support.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct RemoveColumnCapabilities {
    /// `DROP COLUMN IF EXISTS`
    pub if_exists: bool,
    /// `DROP COLUMN ... CASCADE`
    pub cascade: bool,
}

/// The full capability tree. `Default` is the "no features" base.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct Capabilities {
    /// Schema-qualified table names.
    pub schemas: bool,
    /// `RETURNING` clauses.
    pub return_values: bool,
    /// Inline `COMMENT` on column definitions.
    pub inline_comments: bool,
    /// `FIRST` / `AFTER` column placement.
    pub column_positioning: bool,
    /// DEFAULT values on large-object and binary string columns.
    pub large_object_defaults: bool,
    /// Expression defaults must be wrapped in parentheses.
    pub parenthesized_default_expressions: bool,
    /// Auto-increment support.
    pub auto_increment: AutoIncrementCapabilities,
    /// Constraint support.
    pub constraints: ConstraintCapabilities,
    /// Column alteration strategy.
    pub alter_column: AlterColumnCapabilities,
    /// Column rename strategy.
    pub rename_column: RenameColumnCapabilities,
    /// Data type support.
    pub data_types: DataTypeCapabilities,
    /// Index support.
    pub index: IndexCapabilities,
    /// CREATE TABLE options.
    pub table_options: TableOptionCapabilities,
    /// ADD COLUMN options.
    pub add_column: AddColumnCapabilities,
    /// DROP COLUMN options.
    pub remove_column: RemoveColumnCapabilities,
}

/// Immutable capability matrix of one dialect.
#[derive(Debug, Clone, PartialEq)]
pub struct CapabilityMatrix {
    flags: Capabilities,
    tree: Value,
}

impl CapabilityMatrix {
    /// Builds a matrix from typed flags.
    #[must_use]
    pub fn new(flags: Capabilities) -> Self {
        let tree = serde_json::to_value(&flags).unwrap_or_default();
        Self { flags, tree }
    }

    /// Returns a new matrix with `overrides` deep-merged onto this one.
    ///
    /// # Errors
    ///
    /// Returns [`QueryGenerationError::InvalidCapabilities`] when the
    /// merged tree does not describe a valid [`Capabilities`] value, for
    /// example on a misspelled flag or a non-boolean leaf.
    pub fn with_overrides(&self, overrides: &Value) -> Result<Self> {
        let mut tree = self.tree.clone();
        deep_merge(&mut tree, overrides);
        let flags: Capabilities =
            serde_json::from_value(tree).map_err(QueryGenerationError::InvalidCapabilities)?;
        Ok(Self::new(flags))
    }

    /// Typed access to the flags.
    #[must_use]
    pub const fn flags(&self) -> &Capabilities {
        &self.flags
    }

    /// Looks up a flag or sub-tree by dotted path.
    #[must_use]
    pub fn supports(&self, path: &str) -> Option<&Value> {
        path.split('.')
            .filter(|segment| !segment.is_empty())
            .try_fold(&self.tree, |node, segment| node.get(segment))
    }

    /// True when the path resolves to `true` or to a non-empty sub-tree.
    #[must_use]
    pub fn is_supported(&self, path: &str) -> bool {
        match self.supports(path) {
            Some(Value::Bool(flag)) => *flag,
            Some(Value::Null) | None => false,
            Some(_) => true,
        }
    }
}

impl Default for CapabilityMatrix {
    fn default() -> Self {
        Self::new(Capabilities::default())
    }
}

/// Recursively merges `overrides` into `base`. Objects merge key by key,
/// any other value replaces what it lands on.
pub fn deep_merge(base: &mut Value, overrides: &Value) {
    match (base, overrides) {
        (Value::Object(base_map), Value::Object(override_map)) => {
            for (key, value) in override_map {
                match base_map.get_mut(key) {
                    Some(existing) => deep_merge(existing, value),
                    None => {
                        base_map.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (slot, value) => *slot = value.clone(),
    }
}
