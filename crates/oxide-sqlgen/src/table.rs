//! Table identifiers.

use core::fmt;

/// Trait for types that name a table, typically model structs.
///
/// ```
/// use oxide_sqlgen::{Table, TableName};
///
/// struct User;
///
/// impl Table for User {
///     const NAME: &'static str = "users";
///     const SCHEMA: Option<&'static str> = Some("auth");
/// }
///
/// assert_eq!(TableName::of::<User>(), TableName::with_schema("auth", "users"));
/// ```
pub trait Table {
    /// The SQL table name.
    const NAME: &'static str;

    /// The schema holding the table, if not the dialect default.
    const SCHEMA: Option<&'static str> = None;
}

/// Canonical table identifier: a table name with an optional schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableName {
    /// The table name.
    pub table_name: String,
    /// The schema, if any.
    pub schema: Option<String>,
}

impl TableName {
    /// Creates an unqualified table name.
    #[must_use]
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            schema: None,
        }
    }

    /// Creates a schema-qualified table name.
    #[must_use]
    pub fn with_schema(schema: impl Into<String>, table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            schema: Some(schema.into()),
        }
    }

    /// Creates the table name declared by a [`Table`] implementation.
    #[must_use]
    pub fn of<T: Table>() -> Self {
        Self {
            table_name: T::NAME.to_string(),
            schema: T::SCHEMA.map(str::to_string),
        }
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.schema {
            Some(schema) => write!(f, "{schema}.{}", self.table_name),
            None => f.write_str(&self.table_name),
        }
    }
}

impl From<&str> for TableName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for TableName {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl From<&String> for TableName {
    fn from(name: &String) -> Self {
        Self::new(name.as_str())
    }
}

impl From<&Self> for TableName {
    fn from(name: &Self) -> Self {
        name.clone()
    }
}

/// `(schema, table)` pairs.
impl From<(&str, &str)> for TableName {
    fn from((schema, table): (&str, &str)) -> Self {
        Self::with_schema(schema, table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Project;

    impl Table for Project {
        const NAME: &'static str = "projects";
    }

    #[test]
    fn test_normalizes_inputs() {
        assert_eq!(TableName::from("users"), TableName::new("users"));
        assert_eq!(TableName::from(String::from("users")), TableName::new("users"));
        assert_eq!(
            TableName::from(("archive", "users")),
            TableName::with_schema("archive", "users")
        );
        assert_eq!(TableName::of::<Project>(), TableName::new("projects"));
    }

    #[test]
    fn test_display() {
        assert_eq!(TableName::new("users").to_string(), "users");
        assert_eq!(
            TableName::with_schema("archive", "users").to_string(),
            "archive.users"
        );
    }
}
