//! The query generator.

use crate::capabilities::Capabilities;
use crate::dialect::{Dialect, DialectKind};
use crate::error::QueryGenerationError;
use crate::quote::IdentifierQuoter;
use crate::table::TableName;

/// Generates SQL for one dialect.
///
/// There is a single generator type for every engine; all variance lives in
/// the [`Dialect`] it holds. Cloning is cheap and the generator can be shared
/// across threads.
#[derive(Debug, Clone)]
pub struct QueryGenerator {
    dialect: Dialect,
}

impl QueryGenerator {
    /// Creates a generator for a dialect profile.
    #[must_use]
    pub const fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    /// Creates a generator for a built-in profile.
    #[must_use]
    pub fn for_kind(kind: DialectKind) -> Self {
        Self::new(Dialect::new(kind))
    }

    /// The dialect profile.
    #[must_use]
    pub const fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    /// Quotes an identifier.
    #[must_use]
    pub fn quote_identifier(&self, name: &str) -> String {
        self.dialect.quoter().quote_identifier(name)
    }

    /// Quotes a table name.
    #[must_use]
    pub fn quote_table(&self, table: &TableName) -> String {
        self.dialect.quoter().quote_table(table)
    }

    /// Escapes a string literal.
    #[must_use]
    pub fn escape_string(&self, value: &str) -> String {
        self.dialect.quoter().escape_string(value)
    }

    pub(crate) fn flags(&self) -> &Capabilities {
        self.dialect.flags()
    }

    pub(crate) const fn quoter(&self) -> &IdentifierQuoter {
        self.dialect.quoter()
    }

    pub(crate) const fn unsupported(&self, feature: &'static str) -> QueryGenerationError {
        QueryGenerationError::Unsupported {
            dialect: self.dialect.kind(),
            feature,
        }
    }

    pub(crate) const fn unsupported_option(
        &self,
        method: &'static str,
        option: &'static str,
    ) -> QueryGenerationError {
        QueryGenerationError::UnsupportedOption {
            method,
            dialect: self.dialect.kind(),
            option,
        }
    }

    /// `"schema"."enum_table_column"`, or the `tmp_enum_` variant used while
    /// swapping an enum type.
    pub(crate) fn enum_type_name(&self, table: &TableName, column: &str, temporary: bool) -> String {
        let schema = table
            .schema
            .as_deref()
            .or_else(|| self.dialect.default_schema())
            .unwrap_or("public");
        let prefix = if temporary { "tmp_enum" } else { "enum" };
        format!(
            "{}.{}",
            self.quote_identifier(schema),
            self.quote_identifier(&format!("{prefix}_{}_{column}", table.table_name))
        )
    }

    /// `COMMENT ON COLUMN "t"."c" IS '...';`
    pub(crate) fn comment_on_column(
        &self,
        table: &TableName,
        column: &str,
        comment: Option<&str>,
    ) -> String {
        let value = comment.map_or_else(|| String::from("NULL"), |c| self.escape_string(c));
        format!(
            "COMMENT ON COLUMN {}.{} IS {value};",
            self.quote_table(table),
            self.quote_identifier(column)
        )
    }
}

impl From<Dialect> for QueryGenerator {
    fn from(dialect: Dialect) -> Self {
        Self::new(dialect)
    }
}
