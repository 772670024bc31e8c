//! DDL statement composition: CREATE TABLE, ADD/RENAME/DROP COLUMN, enum
//! types and the constraint catalog query.

use tracing::debug;

use crate::column::ColumnDefinition;
use crate::dialect::CatalogFilter;
use crate::error::{QueryGenerationError, Result};
use crate::generator::QueryGenerator;
use crate::table::TableName;
use crate::translator::AttributeContext;
use crate::types::DataType;

/// A named group of columns that must be unique together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniqueKey {
    /// Constraint name. Defaults to `{table}_{fields}_unique`.
    pub name: Option<String>,
    /// Columns in the group.
    pub fields: Vec<String>,
}

impl UniqueKey {
    /// Creates an unnamed unique key.
    #[must_use]
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: None,
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Names the unique key.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Options for `create_table_query`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateTableOptions {
    /// Storage engine (`ENGINE=`).
    pub engine: Option<String>,
    /// Default character set (`DEFAULT CHARSET=`).
    pub charset: Option<String>,
    /// Default collation (`COLLATE`).
    pub collate: Option<String>,
    /// Row format (`ROW_FORMAT=`).
    pub row_format: Option<String>,
    /// Table comment.
    pub comment: Option<String>,
    /// First auto-increment value (`AUTO_INCREMENT=`).
    pub initial_auto_increment: Option<u64>,
    /// Unique key groups.
    pub unique_keys: Vec<UniqueKey>,
}

/// Options for `add_column_query`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AddColumnOptions {
    /// Emit `IF NOT EXISTS`.
    pub if_not_exists: bool,
}

/// Options for `remove_column_query`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RemoveColumnOptions {
    /// Emit `IF EXISTS`.
    pub if_exists: bool,
    /// Emit `CASCADE`.
    pub cascade: bool,
}

impl QueryGenerator {
    /// Generates CREATE TABLE from already translated column fragments.
    ///
    /// Fragments are inspected as text: when more than one contains
    /// `PRIMARY KEY`, the key moves to a trailing `PRIMARY KEY (...)`
    /// clause; on dialects without inline `REFERENCES`, the reference moves
    /// to a trailing `FOREIGN KEY (...) REFERENCES ...` clause.
    ///
    /// # Errors
    ///
    /// Returns [`QueryGenerationError::UnsupportedOption`] for table options
    /// the dialect does not have.
    pub fn create_table_query<K, V>(
        &self,
        table: impl Into<TableName>,
        attributes: &[(K, V)],
        options: &CreateTableOptions,
    ) -> Result<String>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.check_create_table_options(options)?;
        let flags = self.flags();
        let table = table.into();
        let quoted_table = self.quote_table(&table);

        let primary_key_count = attributes
            .iter()
            .filter(|(_, fragment)| fragment.as_ref().contains("PRIMARY KEY"))
            .count();

        let mut columns = Vec::with_capacity(attributes.len());
        let mut primary_keys = Vec::new();
        let mut foreign_keys = Vec::new();

        for (name, fragment) in attributes {
            let quoted = self.quote_identifier(name.as_ref());
            let mut fragment = fragment.as_ref().to_string();

            if !flags.constraints.inline_references {
                if let Some(pos) = fragment.rfind(" REFERENCES") {
                    foreign_keys.push(format!("FOREIGN KEY ({quoted}) {}", &fragment[pos + 1..]));
                    fragment.truncate(pos);
                }
            }

            if primary_key_count > 1 && fragment.contains("PRIMARY KEY") {
                fragment = fragment.replacen(" PRIMARY KEY", "", 1);
                primary_keys.push(quoted.clone());
            }

            columns.push(format!("{quoted} {fragment}"));
        }

        for key in &options.unique_keys {
            let name = key.name.clone().unwrap_or_else(|| {
                format!("{}_{}_unique", table.table_name, key.fields.join("_"))
            });
            let fields: Vec<String> = key
                .fields
                .iter()
                .map(|f| self.quote_identifier(f))
                .collect();
            columns.push(format!(
                "CONSTRAINT {} UNIQUE ({})",
                self.quote_identifier(&name),
                fields.join(", ")
            ));
        }

        if !primary_keys.is_empty() {
            columns.push(format!("PRIMARY KEY ({})", primary_keys.join(", ")));
        }
        columns.extend(foreign_keys);

        let mut sql = format!(
            "CREATE TABLE IF NOT EXISTS {quoted_table} ({})",
            columns.join(", ")
        );

        if flags.table_options.engine {
            let engine = options
                .engine
                .as_deref()
                .or_else(|| self.dialect().default_engine());
            if let Some(engine) = engine {
                sql.push_str(&format!(" ENGINE={engine}"));
            }
        }
        if let Some(ref comment) = options.comment {
            if flags.inline_comments {
                sql.push_str(&format!(" COMMENT {}", self.escape_string(comment)));
            }
        }
        if let Some(ref charset) = options.charset {
            sql.push_str(&format!(" DEFAULT CHARSET={charset}"));
        }
        if let Some(ref collate) = options.collate {
            sql.push_str(&format!(" COLLATE {collate}"));
        }
        if let Some(start) = options.initial_auto_increment {
            sql.push_str(&format!(" AUTO_INCREMENT={start}"));
        }
        if let Some(ref row_format) = options.row_format {
            sql.push_str(&format!(" ROW_FORMAT={row_format}"));
        }
        sql.push(';');

        if let Some(ref comment) = options.comment {
            if !flags.inline_comments {
                sql.push_str(&format!(
                    " COMMENT ON TABLE {quoted_table} IS {};",
                    self.escape_string(comment)
                ));
            }
        }

        debug!(sql = %sql, table = %table, "Generated CREATE TABLE");
        Ok(sql)
    }

    /// Translates column definitions and generates CREATE TABLE.
    ///
    /// Comments that cannot be inlined become `COMMENT ON COLUMN`
    /// statements after the table. ENUM columns on dialects with named enum
    /// types get their `CREATE TYPE` statement before it.
    ///
    /// # Errors
    ///
    /// Propagates translation and option errors.
    pub fn create_table_from_definitions<K>(
        &self,
        table: impl Into<TableName>,
        definitions: &[(K, ColumnDefinition)],
        options: &CreateTableOptions,
    ) -> Result<String>
    where
        K: AsRef<str>,
    {
        let table = table.into();
        let flags = self.flags();
        let mut fragments = Vec::with_capacity(definitions.len());
        let mut before = Vec::new();
        let mut after = Vec::new();

        for (key, def) in definitions {
            let column = def.field.as_deref().unwrap_or_else(|| key.as_ref());
            let context = AttributeContext::create(table.clone(), column);
            fragments.push((column.to_string(), self.attribute_to_sql(def, &context)?));

            if let Some(values) = def.data_type.as_ref().and_then(DataType::enum_values) {
                if flags.data_types.named_enums {
                    before.push(self.create_enum_query(table.clone(), column, values)?);
                }
            }
            if let Some(Some(ref comment)) = def.comment {
                if !flags.inline_comments {
                    after.push(self.comment_on_column(&table, column, Some(comment)));
                }
            }
        }

        let create = self.create_table_query(table, &fragments, options)?;
        Ok(before
            .into_iter()
            .chain(std::iter::once(create))
            .chain(after)
            .collect::<Vec<_>>()
            .join(" "))
    }

    /// Generates ALTER TABLE ... ADD COLUMN.
    ///
    /// # Errors
    ///
    /// Propagates translation errors, and rejects `if_not_exists` where the
    /// dialect has no such clause.
    pub fn add_column_query(
        &self,
        table: impl Into<TableName>,
        key: &str,
        def: &ColumnDefinition,
        options: &AddColumnOptions,
    ) -> Result<String> {
        if options.if_not_exists && !self.flags().add_column.if_not_exists {
            return Err(self.unsupported_option("add_column_query", "if_not_exists"));
        }
        let table = table.into();
        let context = AttributeContext::add_column(table.clone(), key);
        let definition = self.attribute_to_sql(def, &context)?;

        let mut sql = format!(
            "ALTER TABLE {} ADD COLUMN {}{} {definition};",
            self.quote_table(&table),
            if options.if_not_exists {
                "IF NOT EXISTS "
            } else {
                ""
            },
            self.quote_identifier(key)
        );
        if let Some(Some(ref comment)) = def.comment {
            if !self.flags().inline_comments {
                sql.push(' ');
                sql.push_str(&self.comment_on_column(&table, key, Some(comment)));
            }
        }

        debug!(sql = %sql, table = %table, column = key, "Generated ADD COLUMN");
        Ok(sql)
    }

    /// Generates a column rename.
    ///
    /// Dialects that rename through `CHANGE` need the full column
    /// definition; the others ignore it.
    ///
    /// # Errors
    ///
    /// Returns [`QueryGenerationError::MissingColumnDefinition`] when the
    /// dialect needs a definition and none was given.
    pub fn rename_column_query(
        &self,
        table: impl Into<TableName>,
        before: &str,
        after: &str,
        definition: Option<&ColumnDefinition>,
    ) -> Result<String> {
        let table = table.into();
        let quoted_table = self.quote_table(&table);

        let sql = if self.flags().rename_column.requires_definition {
            let def = definition.ok_or_else(|| QueryGenerationError::MissingColumnDefinition {
                method: "rename_column_query",
                dialect: self.dialect().kind(),
                column: before.to_string(),
            })?;
            let context = AttributeContext::change_column(table.clone(), after);
            format!(
                "ALTER TABLE {quoted_table} CHANGE {} {} {};",
                self.quote_identifier(before),
                self.quote_identifier(after),
                self.attribute_to_sql(def, &context)?
            )
        } else {
            format!(
                "ALTER TABLE {quoted_table} RENAME COLUMN {} TO {};",
                self.quote_identifier(before),
                self.quote_identifier(after)
            )
        };

        debug!(sql = %sql, table = %table, before, after, "Generated RENAME COLUMN");
        Ok(sql)
    }

    /// Generates ALTER TABLE ... DROP COLUMN.
    ///
    /// # Errors
    ///
    /// Rejects `if_exists` / `cascade` where the dialect lacks them.
    pub fn remove_column_query(
        &self,
        table: impl Into<TableName>,
        column: &str,
        options: &RemoveColumnOptions,
    ) -> Result<String> {
        let flags = self.flags();
        if options.if_exists && !flags.remove_column.if_exists {
            return Err(self.unsupported_option("remove_column_query", "if_exists"));
        }
        if options.cascade && !flags.remove_column.cascade {
            return Err(self.unsupported_option("remove_column_query", "cascade"));
        }

        let mut sql = format!(
            "ALTER TABLE {} DROP COLUMN {}{}",
            self.quote_table(&table.into()),
            if options.if_exists { "IF EXISTS " } else { "" },
            self.quote_identifier(column)
        );
        if options.cascade {
            sql.push_str(" CASCADE");
        }
        sql.push(';');
        Ok(sql)
    }

    /// Generates ALTER TABLE ... DROP CONSTRAINT.
    #[must_use]
    pub fn drop_constraint_query(&self, table: impl Into<TableName>, name: &str) -> String {
        format!(
            "ALTER TABLE {} DROP CONSTRAINT {};",
            self.quote_table(&table.into()),
            self.quote_identifier(name)
        )
    }

    /// Generates `CREATE TYPE ... AS ENUM(...)` for a column.
    ///
    /// # Errors
    ///
    /// Fails on dialects without named enum types, or when `values` is
    /// empty.
    pub fn create_enum_query(
        &self,
        table: impl Into<TableName>,
        column: &str,
        values: &[String],
    ) -> Result<String> {
        self.enum_query(&table.into(), column, values, false)
    }

    pub(crate) fn enum_query(
        &self,
        table: &TableName,
        column: &str,
        values: &[String],
        temporary: bool,
    ) -> Result<String> {
        if !self.flags().data_types.named_enums {
            return Err(self.unsupported("named ENUM types"));
        }
        if values.is_empty() {
            return Err(QueryGenerationError::EmptyEnum {
                column: column.to_string(),
            });
        }
        Ok(format!(
            "CREATE TYPE {} AS ENUM({});",
            self.enum_type_name(table, column, temporary),
            self.enum_values_sql(values)
        ))
    }

    /// Generates `DROP TYPE IF EXISTS` for a column's enum type.
    ///
    /// # Errors
    ///
    /// Fails on dialects without named enum types.
    pub fn drop_enum_query(&self, table: impl Into<TableName>, column: &str) -> Result<String> {
        if !self.flags().data_types.named_enums {
            return Err(self.unsupported("named ENUM types"));
        }
        Ok(format!(
            "DROP TYPE IF EXISTS {};",
            self.enum_type_name(&table.into(), column, false)
        ))
    }

    /// Generates the catalog query listing a table's constraints, one row
    /// per constraint column. Feed the rows to
    /// [`ConstraintDescription::from_catalog_rows`](crate::ConstraintDescription::from_catalog_rows).
    ///
    /// # Errors
    ///
    /// Fails on dialects without a constraint catalog.
    pub fn show_constraints_query(
        &self,
        table: impl Into<TableName>,
        constraint_name: Option<&str>,
    ) -> Result<String> {
        let table = table.into();
        let schema = table
            .schema
            .as_deref()
            .or_else(|| self.dialect().default_schema());
        let filter = CatalogFilter {
            table: self.escape_string(&table.table_name),
            schema: schema.map(|s| self.escape_string(s)),
            constraint_name: constraint_name.map(|n| self.escape_string(n)),
        };
        self.dialect()
            .constraint_catalog_query(&filter)
            .ok_or_else(|| self.unsupported("show_constraints_query"))
    }

    fn check_create_table_options(&self, options: &CreateTableOptions) -> Result<()> {
        let supported = &self.flags().table_options;
        let checks = [
            (options.engine.is_some(), supported.engine, "engine"),
            (options.charset.is_some(), supported.charset, "charset"),
            (options.collate.is_some(), supported.collate, "collate"),
            (options.row_format.is_some(), supported.row_format, "row_format"),
            (options.comment.is_some(), supported.comment, "comment"),
            (
                options.initial_auto_increment.is_some(),
                supported.initial_auto_increment,
                "initial_auto_increment",
            ),
            (
                !options.unique_keys.is_empty(),
                supported.unique_keys,
                "unique_keys",
            ),
        ];
        for (given, allowed, option) in checks {
            if given && !allowed {
                return Err(self.unsupported_option("create_table_query", option));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::{integer, text, varchar, References};
    use crate::dialect::DialectKind;

    fn mysql() -> QueryGenerator {
        QueryGenerator::for_kind(DialectKind::Mysql)
    }

    fn postgres() -> QueryGenerator {
        QueryGenerator::for_kind(DialectKind::Postgres)
    }

    fn sqlite() -> QueryGenerator {
        QueryGenerator::for_kind(DialectKind::Sqlite)
    }

    #[test]
    fn test_create_table_inline_primary_key() {
        let sql = mysql()
            .create_table_query(
                "users",
                &[
                    ("id", "INTEGER PRIMARY KEY AUTO_INCREMENT"),
                    ("name", "VARCHAR(255)"),
                ],
                &CreateTableOptions::default(),
            )
            .unwrap();
        assert_eq!(
            sql,
            "CREATE TABLE IF NOT EXISTS `users` (`id` INTEGER PRIMARY KEY AUTO_INCREMENT, `name` VARCHAR(255)) ENGINE=InnoDB;"
        );
    }

    #[test]
    fn test_create_table_composite_primary_key() {
        let sql = postgres()
            .create_table_query(
                "memberships",
                &[
                    ("user_id", "INTEGER PRIMARY KEY"),
                    ("group_id", "INTEGER PRIMARY KEY"),
                ],
                &CreateTableOptions::default(),
            )
            .unwrap();
        assert_eq!(
            sql,
            "CREATE TABLE IF NOT EXISTS \"memberships\" (\"user_id\" INTEGER, \"group_id\" INTEGER, PRIMARY KEY (\"user_id\", \"group_id\"));"
        );
    }

    #[test]
    fn test_create_table_defers_references_in_mysql() {
        let sql = mysql()
            .create_table_query(
                "posts",
                &[
                    ("id", "INTEGER PRIMARY KEY"),
                    (
                        "author_id",
                        "INTEGER NOT NULL REFERENCES `users` (`id`) ON DELETE CASCADE",
                    ),
                ],
                &CreateTableOptions::default(),
            )
            .unwrap();
        assert_eq!(
            sql,
            "CREATE TABLE IF NOT EXISTS `posts` (`id` INTEGER PRIMARY KEY, `author_id` INTEGER NOT NULL, FOREIGN KEY (`author_id`) REFERENCES `users` (`id`) ON DELETE CASCADE) ENGINE=InnoDB;"
        );
    }

    #[test]
    fn test_create_table_keeps_inline_references_in_postgres() {
        let sql = postgres()
            .create_table_query(
                "posts",
                &[("author_id", "INTEGER REFERENCES \"users\" (\"id\")")],
                &CreateTableOptions::default(),
            )
            .unwrap();
        assert_eq!(
            sql,
            "CREATE TABLE IF NOT EXISTS \"posts\" (\"author_id\" INTEGER REFERENCES \"users\" (\"id\"));"
        );
    }

    #[test]
    fn test_create_table_mysql_options() {
        let options = CreateTableOptions {
            engine: Some("MyISAM".into()),
            charset: Some("utf8mb4".into()),
            collate: Some("utf8mb4_unicode_ci".into()),
            row_format: Some("COMPRESSED".into()),
            comment: Some("It's a table".into()),
            initial_auto_increment: Some(1000),
            unique_keys: vec![UniqueKey::new(["a", "b"])],
        };
        let sql = mysql()
            .create_table_query("t", &[("a", "INTEGER"), ("b", "INTEGER")], &options)
            .unwrap();
        assert_eq!(
            sql,
            "CREATE TABLE IF NOT EXISTS `t` (`a` INTEGER, `b` INTEGER, CONSTRAINT `t_a_b_unique` UNIQUE (`a`, `b`)) ENGINE=MyISAM COMMENT 'It\\'s a table' DEFAULT CHARSET=utf8mb4 COLLATE utf8mb4_unicode_ci AUTO_INCREMENT=1000 ROW_FORMAT=COMPRESSED;"
        );
    }

    #[test]
    fn test_create_table_postgres_table_comment() {
        let options = CreateTableOptions {
            comment: Some("users".into()),
            unique_keys: vec![UniqueKey::new(["email"]).named("users_email")],
            ..Default::default()
        };
        let sql = postgres()
            .create_table_query(
                ("app", "users"),
                &[("email", "VARCHAR(255)")],
                &options,
            )
            .unwrap();
        assert_eq!(
            sql,
            "CREATE TABLE IF NOT EXISTS \"app\".\"users\" (\"email\" VARCHAR(255), CONSTRAINT \"users_email\" UNIQUE (\"email\")); COMMENT ON TABLE \"app\".\"users\" IS 'users';"
        );
    }

    #[test]
    fn test_create_table_rejects_unsupported_options() {
        let options = CreateTableOptions {
            engine: Some("InnoDB".into()),
            ..Default::default()
        };
        let err = postgres()
            .create_table_query("t", &[("a", "INTEGER")], &options)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "create_table_query was passed the option engine, which is not supported by postgres"
        );

        let options = CreateTableOptions {
            unique_keys: vec![UniqueKey::new(["a"])],
            ..Default::default()
        };
        assert!(sqlite()
            .create_table_query("t", &[("a", "INTEGER")], &options)
            .is_err());
    }

    #[test]
    fn test_create_table_from_definitions_postgres() {
        let sql = postgres()
            .create_table_from_definitions(
                "users",
                &[
                    ("id", integer().auto_increment(true).primary_key()),
                    ("name", varchar(50).not_null().comment("Full name")),
                    ("status", crate::column::enumeration(["on", "off"])),
                ],
                &CreateTableOptions::default(),
            )
            .unwrap();
        assert_eq!(
            sql,
            "CREATE TYPE \"public\".\"enum_users_status\" AS ENUM('on', 'off'); CREATE TABLE IF NOT EXISTS \"users\" (\"id\" SERIAL PRIMARY KEY, \"name\" VARCHAR(50) NOT NULL, \"status\" \"public\".\"enum_users_status\"); COMMENT ON COLUMN \"users\".\"name\" IS 'Full name';"
        );
    }

    #[test]
    fn test_create_table_from_definitions_uses_field() {
        let sql = sqlite()
            .create_table_from_definitions(
                "users",
                &[
                    ("id", integer().auto_increment(true).primary_key()),
                    ("firstName", text().field("first_name")),
                    (
                        "teamId",
                        integer().field("team_id").references(References::to("teams")),
                    ),
                ],
                &CreateTableOptions::default(),
            )
            .unwrap();
        assert_eq!(
            sql,
            "CREATE TABLE IF NOT EXISTS `users` (`id` INTEGER PRIMARY KEY AUTOINCREMENT, `first_name` TEXT, `team_id` INTEGER REFERENCES `teams` (`id`));"
        );
    }

    #[test]
    fn test_add_column() {
        let def = varchar(255).not_null().comment("note");
        assert_eq!(
            mysql()
                .add_column_query("users", "note", &def, &AddColumnOptions::default())
                .unwrap(),
            "ALTER TABLE `users` ADD COLUMN `note` VARCHAR(255) NOT NULL COMMENT 'note';"
        );
        assert_eq!(
            postgres()
                .add_column_query(
                    "users",
                    "note",
                    &def,
                    &AddColumnOptions {
                        if_not_exists: true
                    }
                )
                .unwrap(),
            "ALTER TABLE \"users\" ADD COLUMN IF NOT EXISTS \"note\" VARCHAR(255) NOT NULL; COMMENT ON COLUMN \"users\".\"note\" IS 'note';"
        );
    }

    #[test]
    fn test_add_column_named_foreign_key() {
        let def = integer().references(References::to("myTable"));
        assert_eq!(
            mysql()
                .add_column_query("otherTable", "bar", &def, &AddColumnOptions::default())
                .unwrap(),
            "ALTER TABLE `otherTable` ADD COLUMN `bar` INTEGER, ADD CONSTRAINT `otherTable_bar_foreign_idx` FOREIGN KEY (`bar`) REFERENCES `myTable` (`id`);"
        );
    }

    #[test]
    fn test_add_column_rejects_if_not_exists() {
        let err = mysql()
            .add_column_query(
                "users",
                "note",
                &text(),
                &AddColumnOptions {
                    if_not_exists: true,
                },
            )
            .unwrap_err();
        assert!(matches!(
            err,
            QueryGenerationError::UnsupportedOption {
                option: "if_not_exists",
                ..
            }
        ));
    }

    #[test]
    fn test_rename_column() {
        assert_eq!(
            postgres()
                .rename_column_query("users", "name", "full_name", None)
                .unwrap(),
            "ALTER TABLE \"users\" RENAME COLUMN \"name\" TO \"full_name\";"
        );
        assert_eq!(
            mysql()
                .rename_column_query("users", "name", "full_name", Some(&varchar(100).not_null()))
                .unwrap(),
            "ALTER TABLE `users` CHANGE `name` `full_name` VARCHAR(100) NOT NULL;"
        );
        assert!(matches!(
            mysql()
                .rename_column_query("users", "name", "full_name", None)
                .unwrap_err(),
            QueryGenerationError::MissingColumnDefinition { .. }
        ));
    }

    #[test]
    fn test_remove_column() {
        assert_eq!(
            postgres()
                .remove_column_query(
                    "users",
                    "age",
                    &RemoveColumnOptions {
                        if_exists: true,
                        cascade: true
                    }
                )
                .unwrap(),
            "ALTER TABLE \"users\" DROP COLUMN IF EXISTS \"age\" CASCADE;"
        );
        assert!(mysql()
            .remove_column_query(
                "users",
                "age",
                &RemoveColumnOptions {
                    if_exists: true,
                    cascade: false
                }
            )
            .is_err());
    }

    #[test]
    fn test_drop_constraint() {
        assert_eq!(
            mysql().drop_constraint_query("users", "users_email_unique"),
            "ALTER TABLE `users` DROP CONSTRAINT `users_email_unique`;"
        );
    }

    #[test]
    fn test_enum_queries() {
        let values = vec!["A".to_string(), "B".to_string()];
        assert_eq!(
            postgres().create_enum_query("users", "role", &values).unwrap(),
            "CREATE TYPE \"public\".\"enum_users_role\" AS ENUM('A', 'B');"
        );
        assert_eq!(
            postgres().drop_enum_query("users", "role").unwrap(),
            "DROP TYPE IF EXISTS \"public\".\"enum_users_role\";"
        );
        assert!(mysql().create_enum_query("users", "role", &values).is_err());
    }

    #[test]
    fn test_show_constraints_query() {
        let sql = postgres()
            .show_constraints_query("users", Some("users_pkey"))
            .unwrap();
        assert!(sql.contains("WHERE c.table_name = 'users' AND c.table_schema = 'public'"));
        assert!(sql.contains("AND c.constraint_name = 'users_pkey'"));
        assert!(sqlite().show_constraints_query("users", None).is_err());
    }
}
