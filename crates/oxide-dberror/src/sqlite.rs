//! SQLite result codes.

use std::sync::LazyLock;

use regex::Regex;

use crate::native::NativeError;
use crate::translator::{unique_violation, Context};
use crate::typed::TypedError;

const CONSTRAINT_CODES: [&str; 5] = [
    "SQLITE_CONSTRAINT",
    "SQLITE_CONSTRAINT_UNIQUE",
    "SQLITE_CONSTRAINT_PRIMARYKEY",
    "SQLITE_CONSTRAINT_TRIGGER",
    "SQLITE_CONSTRAINT_FOREIGNKEY",
];
const BUSY: &str = "SQLITE_BUSY";

/// Older releases: `columns x, y are not unique`.
static COLUMNS_NOT_UNIQUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"columns (.*?) are").expect("Invalid columns regex"));

/// Newer releases: `UNIQUE constraint failed: t.x, t.y`.
static UNIQUE_FAILED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"UNIQUE constraint failed: (.*)").expect("Invalid unique constraint regex")
});

pub(crate) fn translate(err: NativeError, ctx: &Context<'_>) -> TypedError {
    let code = err.code.as_text();
    if code == BUSY {
        return TypedError::Timeout { cause: err };
    }
    if !CONSTRAINT_CODES.contains(&code.as_str()) {
        return TypedError::Database { cause: err };
    }

    if err.message.contains("FOREIGN KEY constraint failed") {
        return TypedError::ForeignKeyConstraint {
            message: err.message.clone(),
            reltype: None,
            table: None,
            fields: Vec::new(),
            value: None,
            index: None,
            cause: err,
        };
    }

    let names = unique_columns(&err.message);
    let message = ctx.message_for_fields(&names).map(ToString::to_string);
    let fields = names
        .into_iter()
        .map(|name| {
            let value = ctx.instance_value(&name);
            (name, value)
        })
        .collect();
    unique_violation(message.as_deref(), fields, err)
}

/// Column names of a unique violation, without their table prefix.
fn unique_columns(message: &str) -> Vec<String> {
    if let Some(caps) = COLUMNS_NOT_UNIQUE.captures(message) {
        return caps[1].split(", ").map(ToString::to_string).collect();
    }
    UNIQUE_FAILED
        .captures(message)
        .map(|caps| {
            caps[1]
                .split(", ")
                .map(|column| {
                    column
                        .split_once('.')
                        .map_or(column, |(_, name)| name)
                        .to_string()
                })
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typed::ModelIndex;
    use serde_json::{json, Value};

    #[test]
    fn test_unique_constraint_failed() {
        let instance = json!({ "email": "a@b.c" }).as_object().unwrap().clone();
        let indexes = [ModelIndex::unique("users_email_org", ["email", "org"]).with_msg("taken")];
        let ctx = Context {
            indexes: &indexes,
            instance: Some(&instance),
        };
        let err = NativeError::new(
            "SQLITE_CONSTRAINT_UNIQUE",
            "SQLITE_CONSTRAINT: UNIQUE constraint failed: users.email, users.org",
        );
        let TypedError::UniqueConstraint {
            message, fields, ..
        } = translate(err, &ctx)
        else {
            panic!("expected unique violation");
        };
        assert_eq!(message, "taken");
        assert_eq!(
            fields,
            vec![
                ("email".to_string(), json!("a@b.c")),
                ("org".to_string(), Value::Null),
            ]
        );
    }

    #[test]
    fn test_legacy_columns_message() {
        assert_eq!(
            unique_columns("SQLITE_CONSTRAINT: columns a, b are not unique"),
            vec!["a".to_string(), "b".to_string()]
        );
        assert!(unique_columns("CHECK constraint failed: positive").is_empty());
    }

    #[test]
    fn test_foreign_key_and_busy() {
        let ctx = Context {
            indexes: &[],
            instance: None,
        };
        let err = NativeError::new(
            "SQLITE_CONSTRAINT_FOREIGNKEY",
            "SQLITE_CONSTRAINT: FOREIGN KEY constraint failed",
        );
        assert!(matches!(
            translate(err, &ctx),
            TypedError::ForeignKeyConstraint { .. }
        ));

        let err = NativeError::new("SQLITE_BUSY", "database is locked");
        assert!(translate(err, &ctx).is_transient());

        let err = NativeError::new("SQLITE_ERROR", "no such table: t");
        assert!(matches!(translate(err, &ctx), TypedError::Database { .. }));
    }
}
