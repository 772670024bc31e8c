//! Column change requests.
//!
//! A change request is a partial [`ColumnDefinition`]: `None` leaves a
//! property alone. Requests that cannot be applied safely with the
//! dialect's ALTER semantics are rejected before any SQL is produced.

use tracing::{debug, warn};

use crate::column::{ColumnDefinition, References, Unique};
use crate::constraint::{ConstraintDescription, ConstraintType};
use crate::error::{QueryGenerationError, Result};
use crate::generator::QueryGenerator;
use crate::table::TableName;
use crate::translator::AttributeContext;
use crate::types::DataType;

const METHOD: &str = "change_columns_query";

impl QueryGenerator {
    /// Generates the statements that apply `changes` to existing columns.
    ///
    /// Postgres-like dialects get one `ALTER COLUMN` sub-clause per changed
    /// property, all in a single `ALTER TABLE`, with comments, sequences and
    /// enum types handled by separate statements. MySQL-like dialects
    /// redefine the column with `MODIFY` and therefore need the complete
    /// definition.
    ///
    /// # Errors
    ///
    /// Fails on an empty change set, on changes to primary or unique key
    /// membership, on referential actions without a target, on incomplete
    /// definitions for `MODIFY` dialects, and on dialects that cannot alter
    /// columns at all.
    pub fn change_columns_query<K>(
        &self,
        table: impl Into<TableName>,
        changes: &[(K, ColumnDefinition)],
    ) -> Result<String>
    where
        K: AsRef<str>,
    {
        self.change_columns_query_with_constraints(table, changes, &[])
    }

    /// Like [`change_columns_query`](Self::change_columns_query), but also
    /// checks the request against the table's existing constraints (see
    /// [`ConstraintDescription::from_catalog_rows`]).
    ///
    /// # Errors
    ///
    /// As `change_columns_query`, plus adding a unique key to a column that
    /// already has one and adding a foreign key to a column that is already
    /// constrained by one.
    pub fn change_columns_query_with_constraints<K>(
        &self,
        table: impl Into<TableName>,
        changes: &[(K, ColumnDefinition)],
        existing: &[ConstraintDescription],
    ) -> Result<String>
    where
        K: AsRef<str>,
    {
        let table = table.into();
        if changes.is_empty() {
            return Err(QueryGenerationError::NoColumns);
        }

        for (column, def) in changes {
            if let Err(err) = self.validate_change(&table, column.as_ref(), def, existing) {
                warn!(table = %table, column = column.as_ref(), error = %err, "Rejected column change");
                return Err(err);
            }
        }

        let alter = &self.flags().alter_column;
        let sql = if alter.granular {
            self.granular_change(&table, changes)?
        } else if alter.modify {
            self.modify_change(&table, changes)?
        } else {
            return Err(self.unsupported(METHOD));
        };

        debug!(sql = %sql, table = %table, columns = changes.len(), "Generated column change");
        Ok(sql)
    }

    fn validate_change(
        &self,
        table: &TableName,
        column: &str,
        def: &ColumnDefinition,
        existing: &[ConstraintDescription],
    ) -> Result<()> {
        let names = || (table.to_string(), column.to_string());

        if def.drop_default_value && def.default_value.is_some() {
            let (table, column) = names();
            return Err(QueryGenerationError::ConflictingDefault { table, column });
        }

        if def.primary_key.is_some() {
            let (table, column) = names();
            return Err(QueryGenerationError::PrimaryKeyChange { table, column });
        }

        let already_unique = || {
            existing.iter().any(|c| {
                matches!(
                    c.constraint_type,
                    ConstraintType::Unique | ConstraintType::PrimaryKey
                ) && c.covers(column)
            })
        };
        match def.unique {
            Some(Unique::Flag(false) | Unique::Named(_)) => {
                let (table, column) = names();
                return Err(QueryGenerationError::UniqueChange { table, column });
            }
            Some(Unique::Flag(true)) if already_unique() => {
                let (table, column) = names();
                return Err(QueryGenerationError::UniqueChange { table, column });
            }
            _ => {}
        }

        if def.references.is_none() && (def.on_delete.is_some() || def.on_update.is_some()) {
            let (table, column) = names();
            return Err(QueryGenerationError::ReferentialActionWithoutReferences { table, column });
        }

        if def.references.is_some() {
            if let Some(fk) = existing
                .iter()
                .find(|c| c.constraint_type == ConstraintType::ForeignKey && c.covers(column))
            {
                let (table, column) = names();
                return Err(QueryGenerationError::ForeignKeyExists {
                    table,
                    column,
                    constraint: fk.constraint_name.clone(),
                });
            }
        }

        if def.auto_increment_identity.is_some() && !self.flags().auto_increment.identity {
            return Err(self.unsupported("auto_increment_identity"));
        }

        Ok(())
    }

    fn granular_change<K>(&self, table: &TableName, changes: &[(K, ColumnDefinition)]) -> Result<String>
    where
        K: AsRef<str>,
    {
        let named_enums = self.flags().data_types.named_enums;
        let mut pre = Vec::new();
        let mut clauses = Vec::new();
        let mut post = Vec::new();

        for (column, def) in changes {
            let column = column.as_ref();
            let quoted = self.quote_identifier(column);

            let enum_values = def.data_type.as_ref().and_then(DataType::enum_values);
            match (&def.data_type, enum_values) {
                (Some(data_type), Some(values)) if named_enums => {
                    let context = AttributeContext::change_column(table.clone(), column);
                    self.column_type_sql(data_type, &context, column)?;
                    // Enums cannot be cast to each other, so go through text.
                    let suffix = if matches!(data_type, DataType::Array(_)) { "[]" } else { "" };
                    let tmp = self.enum_type_name(table, column, true);
                    pre.push(self.enum_query(table, column, values, true)?);
                    clauses.push(format!(
                        "ALTER COLUMN {quoted} TYPE {tmp}{suffix} USING ({quoted}::text{suffix}::{tmp}{suffix})"
                    ));
                    post.push(format!(
                        "DROP TYPE IF EXISTS {};",
                        self.enum_type_name(table, column, false)
                    ));
                    post.push(format!(
                        "ALTER TYPE {tmp} RENAME TO {};",
                        self.quote_identifier(&format!("enum_{}_{column}", table.table_name))
                    ));
                }
                (Some(data_type), _) => {
                    let context = AttributeContext::change_column(table.clone(), column);
                    clauses.push(format!(
                        "ALTER COLUMN {quoted} TYPE {}",
                        self.column_type_sql(data_type, &context, column)?
                    ));
                }
                (None, _) => {}
            }

            match def.allow_null {
                Some(false) => clauses.push(format!("ALTER COLUMN {quoted} SET NOT NULL")),
                Some(true) => clauses.push(format!("ALTER COLUMN {quoted} DROP NOT NULL")),
                None => {}
            }

            if let Some(ref default) = def.default_value {
                clauses.push(format!(
                    "ALTER COLUMN {quoted} SET DEFAULT {}",
                    self.quoter().escape_default(default)?
                ));
            }
            if def.drop_default_value {
                clauses.push(format!("ALTER COLUMN {quoted} DROP DEFAULT"));
            }

            let identity = def.auto_increment_identity == Some(true);
            match def.auto_increment {
                Some(true) if !identity => {
                    let sequence = format!("{}_{column}_seq", table.table_name);
                    let sequence_table = TableName {
                        table_name: sequence.clone(),
                        schema: table.schema.clone(),
                    };
                    let literal = table
                        .schema
                        .as_ref()
                        .map_or_else(|| sequence.clone(), |s| format!("{s}.{sequence}"));
                    pre.push(format!(
                        "CREATE SEQUENCE IF NOT EXISTS {} OWNED BY {}.{quoted};",
                        self.quote_table(&sequence_table),
                        self.quote_table(table)
                    ));
                    clauses.push(format!(
                        "ALTER COLUMN {quoted} SET DEFAULT nextval({}::regclass)",
                        self.escape_string(&literal)
                    ));
                }
                Some(false) if def.default_value.is_none() && !def.drop_default_value => {
                    clauses.push(format!("ALTER COLUMN {quoted} DROP DEFAULT"));
                }
                _ => {}
            }

            match def.auto_increment_identity {
                Some(true) => clauses.push(format!(
                    "ALTER COLUMN {quoted} ADD GENERATED BY DEFAULT AS IDENTITY"
                )),
                Some(false) => clauses.push(format!("ALTER COLUMN {quoted} DROP IDENTITY")),
                None => {}
            }

            clauses.extend(self.constraint_clauses(table, column, def)?);

            if let Some(ref comment) = def.comment {
                post.push(self.comment_on_column(table, column, comment.as_deref()));
            }
        }

        let mut statements = pre;
        if !clauses.is_empty() {
            statements.push(format!(
                "ALTER TABLE {} {};",
                self.quote_table(table),
                clauses.join(", ")
            ));
        }
        statements.extend(post);
        Ok(statements.join(" "))
    }

    fn modify_change<K>(&self, table: &TableName, changes: &[(K, ColumnDefinition)]) -> Result<String>
    where
        K: AsRef<str>,
    {
        let quoted_table = self.quote_table(table);
        let mut clauses = Vec::new();

        for (column, def) in changes {
            let column = column.as_ref();
            let quoted = self.quote_identifier(column);

            let redefines = def.data_type.is_some()
                || def.allow_null.is_some()
                || def.auto_increment.is_some()
                || def.comment.is_some();

            if redefines {
                let complete = def.data_type.is_some()
                    && def.allow_null.is_some()
                    && def.auto_increment.is_some()
                    && def.comment.is_some()
                    && (def.default_value.is_some() || def.drop_default_value);
                if !complete {
                    return Err(QueryGenerationError::IncompleteColumnDefinition {
                        dialect: self.dialect().kind(),
                        table: quoted_table,
                        column: quoted,
                    });
                }

                let redefinition = ColumnDefinition {
                    data_type: def.data_type.clone(),
                    allow_null: def.allow_null,
                    default_value: if def.drop_default_value {
                        None
                    } else {
                        def.default_value.clone()
                    },
                    auto_increment: def.auto_increment,
                    comment: def.comment.clone(),
                    ..ColumnDefinition::default()
                };
                let context = AttributeContext::change_column(table.clone(), column);
                clauses.push(format!(
                    "MODIFY {quoted} {}",
                    self.attribute_to_sql(&redefinition, &context)?
                ));
            } else if let Some(ref default) = def.default_value {
                clauses.push(format!(
                    "ALTER COLUMN {quoted} SET DEFAULT {}",
                    self.quoter().escape_default(default)?
                ));
            } else if def.drop_default_value {
                clauses.push(format!("ALTER COLUMN {quoted} DROP DEFAULT"));
            }

            clauses.extend(self.constraint_clauses(table, column, def)?);
        }

        if clauses.is_empty() {
            return Ok(String::new());
        }
        Ok(format!("ALTER TABLE {quoted_table} {};", clauses.join(", ")))
    }

    /// `ADD CONSTRAINT ... UNIQUE` and `ADD FOREIGN KEY` sub-clauses.
    fn constraint_clauses(
        &self,
        table: &TableName,
        column: &str,
        def: &ColumnDefinition,
    ) -> Result<Vec<String>> {
        let mut clauses = Vec::new();
        if def.unique == Some(Unique::Flag(true)) {
            clauses.push(format!(
                "ADD CONSTRAINT {} UNIQUE ({})",
                self.quote_identifier(&format!("{}_{column}_unique", table.table_name)),
                self.quote_identifier(column)
            ));
        }
        if let Some(ref references) = def.references {
            clauses.push(self.add_foreign_key_clause(column, def, references)?);
        }
        Ok(clauses)
    }

    fn add_foreign_key_clause(
        &self,
        column: &str,
        def: &ColumnDefinition,
        references: &References,
    ) -> Result<String> {
        Ok(format!(
            "ADD FOREIGN KEY ({}) REFERENCES {}({}){}",
            self.quote_identifier(column),
            self.quote_table(&references.table),
            self.quote_identifier(references.key_or_id()),
            self.referential_actions_sql(METHOD, references, def.on_delete, def.on_update, true)?
        ))
    }
}
