//! Column definition to SQL fragment translation.

use crate::column::{ColumnDefinition, ReferentialAction, References};
use crate::dialect::AutoIncrementStyle;
use crate::error::{QueryGenerationError, Result};
use crate::generator::QueryGenerator;
use crate::table::TableName;
use crate::types::DataType;

/// The statement a fragment is rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeAction {
    /// Column inside CREATE TABLE.
    Create,
    /// ALTER TABLE ... ADD COLUMN.
    AddColumn,
    /// Whole-column redefinition (CHANGE / MODIFY).
    ChangeColumn,
}

/// Where a column definition is being rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeContext {
    /// Statement kind.
    pub action: AttributeAction,
    /// Owning table.
    pub table: Option<TableName>,
    /// Column name.
    pub key: Option<String>,
    /// Skip the REFERENCES fragment.
    pub without_foreign_key_constraints: bool,
}

impl AttributeContext {
    fn with(action: AttributeAction, table: TableName, key: impl Into<String>) -> Self {
        Self {
            action,
            table: Some(table),
            key: Some(key.into()),
            without_foreign_key_constraints: false,
        }
    }

    /// Context for a CREATE TABLE column.
    #[must_use]
    pub fn create(table: impl Into<TableName>, key: impl Into<String>) -> Self {
        Self::with(AttributeAction::Create, table.into(), key)
    }

    /// Context for ADD COLUMN.
    #[must_use]
    pub fn add_column(table: impl Into<TableName>, key: impl Into<String>) -> Self {
        Self::with(AttributeAction::AddColumn, table.into(), key)
    }

    /// Context for a whole-column redefinition.
    #[must_use]
    pub fn change_column(table: impl Into<TableName>, key: impl Into<String>) -> Self {
        Self::with(AttributeAction::ChangeColumn, table.into(), key)
    }

    /// Context with no table, for rendering a bare fragment.
    #[must_use]
    pub const fn detached(action: AttributeAction) -> Self {
        Self {
            action,
            table: None,
            key: None,
            without_foreign_key_constraints: false,
        }
    }

    /// Suppresses the REFERENCES fragment.
    #[must_use]
    pub const fn without_foreign_keys(mut self) -> Self {
        self.without_foreign_key_constraints = true;
        self
    }
}

impl QueryGenerator {
    /// Renders one column definition as a SQL fragment.
    ///
    /// Fragments always come out in the same order: type, `NOT NULL`,
    /// auto-increment, `DEFAULT`, `UNIQUE`, `PRIMARY KEY`, `COMMENT`,
    /// position, `REFERENCES`. Which of them appear, and how they are
    /// spelled, is read from the dialect's capability matrix and lookup
    /// tables. The output depends only on the arguments.
    ///
    /// # Errors
    ///
    /// Fails when the definition has no type, or asks for something the
    /// dialect cannot express (unknown type, identity columns, column
    /// positioning, deferrable keys, ...).
    pub fn attribute_to_sql(
        &self,
        def: &ColumnDefinition,
        context: &AttributeContext,
    ) -> Result<String> {
        let flags = self.flags();
        let quoter = self.quoter();
        let column = context
            .key
            .as_deref()
            .or(def.field.as_deref())
            .unwrap_or_default();
        let data_type = def
            .data_type
            .as_ref()
            .ok_or_else(|| QueryGenerationError::MissingDataType {
                column: column.to_string(),
            })?;

        let auto_increment = def.auto_increment == Some(true);
        let identity = def.auto_increment_identity == Some(true);
        let primary_key = def.primary_key == Some(true);
        if identity && !flags.auto_increment.identity {
            return Err(self.unsupported("auto_increment_identity"));
        }
        if auto_increment && flags.auto_increment.requires_primary_key && !primary_key {
            return Err(self.unsupported("auto_increment outside of the primary key"));
        }

        let mut sql = self.column_type_sql(data_type, context, column)?;
        let mut auto_increment_keyword = None;
        let mut primary_key_suffix = None;
        if auto_increment {
            if identity {
                auto_increment_keyword = Some("GENERATED BY DEFAULT AS IDENTITY");
            } else {
                match self.dialect().auto_increment_style() {
                    AutoIncrementStyle::Keyword(keyword) => auto_increment_keyword = Some(keyword),
                    AutoIncrementStyle::SerialType => {
                        sql = serial_type(data_type)
                            .ok_or_else(|| {
                                self.unsupported("auto_increment on non-integer columns")
                            })?
                            .to_string();
                    }
                    AutoIncrementStyle::PrimaryKeySuffix(keyword) => {
                        primary_key_suffix = Some(keyword);
                    }
                }
            }
        }

        if def.allow_null == Some(false) {
            sql.push_str(" NOT NULL");
        }

        if let Some(keyword) = auto_increment_keyword {
            sql.push(' ');
            sql.push_str(keyword);
        }

        if let Some(ref default) = def.default_value {
            if self.default_is_schemable(data_type) {
                sql.push_str(" DEFAULT ");
                sql.push_str(&quoter.escape_default(default)?);
            }
        }

        if def.is_unique() {
            sql.push_str(" UNIQUE");
        }

        if primary_key {
            sql.push_str(" PRIMARY KEY");
            if let Some(suffix) = primary_key_suffix {
                sql.push(' ');
                sql.push_str(suffix);
            }
        }

        if let Some(Some(ref comment)) = def.comment {
            if flags.inline_comments {
                sql.push_str(" COMMENT ");
                sql.push_str(&quoter.escape_string(comment));
            }
        }

        if def.first || def.after.is_some() {
            if !flags.column_positioning {
                let option = if def.first { "first" } else { "after" };
                return Err(self.unsupported_option("attribute_to_sql", option));
            }
            if def.first {
                sql.push_str(" FIRST");
            } else if let Some(ref after) = def.after {
                sql.push_str(" AFTER ");
                sql.push_str(&quoter.quote_identifier(after));
            }
        }

        if let Some(ref references) = def.references {
            if !context.without_foreign_key_constraints {
                if context.action == AttributeAction::AddColumn
                    && flags.constraints.named_foreign_key_on_add_column
                {
                    if let (Some(table), Some(key)) = (&context.table, &context.key) {
                        let name = format!("{}_{key}_foreign_idx", table.table_name);
                        sql.push_str(&format!(
                            ", ADD CONSTRAINT {} FOREIGN KEY ({})",
                            quoter.quote_identifier(&name),
                            quoter.quote_identifier(key)
                        ));
                    }
                }
                sql.push(' ');
                sql.push_str(&self.references_sql(references, def.on_delete, def.on_update)?);
            }
        }

        Ok(sql)
    }

    /// Renders the base type token.
    pub(crate) fn column_type_sql(
        &self,
        data_type: &DataType,
        context: &AttributeContext,
        column: &str,
    ) -> Result<String> {
        let flags = self.flags();
        if let Some(values) = data_type.enum_values() {
            if values.is_empty() {
                return Err(QueryGenerationError::EmptyEnum {
                    column: column.to_string(),
                });
            }
            let array = matches!(data_type, DataType::Array(_));
            if flags.data_types.named_enums && (!array || flags.data_types.array) {
                let name = match (&context.table, &context.key) {
                    (Some(table), Some(key)) => self.enum_type_name(table, key, false),
                    _ => return Err(self.unsupported("ENUM columns without a table context")),
                };
                return Ok(if array { format!("{name}[]") } else { name });
            }
            if flags.data_types.enums && !array {
                return Ok(format!("ENUM({})", self.enum_values_sql(values)));
            }
        }

        let gated = match data_type {
            DataType::Json => flags.data_types.json,
            DataType::Jsonb => flags.data_types.jsonb,
            DataType::Array(_) => flags.data_types.array,
            DataType::Geometry => flags.data_types.geometry,
            _ => true,
        };
        gated
            .then(|| self.dialect().map_data_type(data_type))
            .flatten()
            .ok_or_else(|| QueryGenerationError::UnsupportedDataType {
                dialect: self.dialect().kind(),
                data_type: data_type.to_string(),
            })
    }

    /// `'a', 'b', 'c'`
    pub(crate) fn enum_values_sql(&self, values: &[String]) -> String {
        values
            .iter()
            .map(|v| self.escape_string(v))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// `REFERENCES "t" ("id") ON DELETE ... ON UPDATE ... DEFERRABLE ...`
    fn references_sql(
        &self,
        references: &References,
        on_delete: Option<ReferentialAction>,
        on_update: Option<ReferentialAction>,
    ) -> Result<String> {
        let mut sql = format!(
            "REFERENCES {} ({})",
            self.quote_table(&references.table),
            self.quote_identifier(references.key_or_id())
        );
        sql.push_str(&self.referential_actions_sql(
            "attribute_to_sql",
            references,
            on_delete,
            on_update,
            false,
        )?);
        Ok(sql)
    }

    /// The trailing ON DELETE / ON UPDATE / DEFERRABLE part of a foreign
    /// key, each item prefixed by a space. `update_first` flips the action
    /// order for the ALTER TABLE form.
    pub(crate) fn referential_actions_sql(
        &self,
        method: &'static str,
        references: &References,
        on_delete: Option<ReferentialAction>,
        on_update: Option<ReferentialAction>,
        update_first: bool,
    ) -> Result<String> {
        let flags = self.flags();
        if on_update.is_some() && !flags.constraints.on_update {
            return Err(self.unsupported_option(method, "on_update"));
        }
        if references.deferrable.is_some() && !flags.constraints.deferrable {
            return Err(self.unsupported_option(method, "deferrable"));
        }

        let delete = on_delete.map(|a| format!(" ON DELETE {}", a.as_sql()));
        let update = on_update.map(|a| format!(" ON UPDATE {}", a.as_sql()));
        let mut sql = String::new();
        let ordered = if update_first {
            [update, delete]
        } else {
            [delete, update]
        };
        for part in ordered.into_iter().flatten() {
            sql.push_str(&part);
        }
        if let Some(deferrable) = references.deferrable {
            sql.push(' ');
            sql.push_str(deferrable.as_sql());
        }
        Ok(sql)
    }

    fn default_is_schemable(&self, data_type: &DataType) -> bool {
        self.flags().large_object_defaults
            || !(data_type.is_large_object() || data_type.is_binary_string())
    }
}

const fn serial_type(data_type: &DataType) -> Option<&'static str> {
    match data_type {
        DataType::Smallint => Some("SMALLSERIAL"),
        DataType::Integer => Some("SERIAL"),
        DataType::Bigint => Some("BIGSERIAL"),
        _ => None,
    }
}
