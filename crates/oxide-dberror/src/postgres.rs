//! PostgreSQL SQLSTATE codes.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::native::NativeError;
use crate::translator::{unique_violation, Context};
use crate::typed::TypedError;

const FOREIGN_KEY_VIOLATION: &str = "23503";
const UNIQUE_VIOLATION: &str = "23505";
const EXCLUSION_VIOLATION: &str = "23P01";
const UNDEFINED_OBJECT: &str = "42704";
const QUERY_CANCELED: &str = "57014";
const LOCK_NOT_AVAILABLE: &str = "55P03";

static FOREIGN_KEY_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"violates foreign key constraint "(.+?)""#).expect("Invalid foreign key regex")
});

static ON_TABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"on table "(.+?)""#).expect("Invalid table name regex"));

static KEY_DETAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Key \((.*?)\)=\((.*?)\)").expect("Invalid key detail regex"));

static MENTIONS_CONSTRAINT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(constraint|index)").expect("Invalid constraint regex"));

static CONSTRAINT_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(?:constraint|index) "(.+?)""#).expect("Invalid constraint name regex")
});

static RELATION_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)relation "(.+?)""#).expect("Invalid relation name regex"));

pub(crate) fn translate(err: NativeError, ctx: &Context<'_>) -> TypedError {
    match err.code.as_text().as_str() {
        FOREIGN_KEY_VIOLATION => foreign_key(err),
        UNIQUE_VIOLATION => unique(err, ctx),
        EXCLUSION_VIOLATION => exclusion(err),
        UNDEFINED_OBJECT
            if err
                .sql
                .as_deref()
                .is_some_and(|sql| MENTIONS_CONSTRAINT.is_match(sql)) =>
        {
            unknown_constraint(err)
        }
        QUERY_CANCELED | LOCK_NOT_AVAILABLE => TypedError::Timeout { cause: err },
        _ => TypedError::Database { cause: err },
    }
}

fn capture(pattern: &Regex, text: &str) -> Option<String> {
    pattern.captures(text).map(|caps| caps[1].to_string())
}

/// Pairs the columns and values of a `Key (a, b)=(1, 2)` detail. Missing
/// values are `null`.
fn key_detail(detail: &str) -> Option<Vec<(String, Value)>> {
    let caps = KEY_DETAIL.captures(detail)?;
    let mut values = caps[2].split(", ");
    Some(
        caps[1]
            .split(", ")
            .map(|field| {
                let value = values
                    .next()
                    .map_or(Value::Null, |v| Value::String(v.to_string()));
                (field.to_string(), value)
            })
            .collect(),
    )
}

fn foreign_key(err: NativeError) -> TypedError {
    TypedError::ForeignKeyConstraint {
        message: err.message.clone(),
        reltype: None,
        table: capture(&ON_TABLE, &err.message),
        fields: Vec::new(),
        value: None,
        index: capture(&FOREIGN_KEY_NAME, &err.message),
        cause: err,
    }
}

fn unique(err: NativeError, ctx: &Context<'_>) -> TypedError {
    let fields = err
        .detail
        .as_deref()
        .and_then(|detail| key_detail(&detail.replace('"', "")));

    match fields {
        Some(fields) => {
            let names: Vec<String> = fields.iter().map(|(field, _)| field.clone()).collect();
            let message = ctx.message_for_fields(&names).map(ToString::to_string);
            unique_violation(message.as_deref(), fields, err)
        }
        None => TypedError::UniqueConstraint {
            message: err.message.clone(),
            errors: Vec::new(),
            fields: Vec::new(),
            table: err.table.clone(),
            constraint: err.constraint.clone(),
            cause: err,
        },
    }
}

fn exclusion(err: NativeError) -> TypedError {
    TypedError::ExclusionConstraint {
        message: String::from("Exclusion constraint error"),
        constraint: err.constraint.clone(),
        fields: err.detail.as_deref().and_then(key_detail).unwrap_or_default(),
        table: err.table.clone(),
        cause: err,
    }
}

fn unknown_constraint(err: NativeError) -> TypedError {
    TypedError::UnknownConstraint {
        message: String::from("Unknown constraint error"),
        constraint: capture(&CONSTRAINT_NAME, &err.message),
        table: capture(&RELATION_NAME, &err.message),
        cause: err,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typed::ModelIndex;
    use serde_json::json;

    const NO_MODEL: Context<'static> = Context {
        indexes: &[],
        instance: None,
    };

    #[test]
    fn test_unique_violation_with_detail() {
        let err = NativeError::new(
            "23505",
            r#"duplicate key value violates unique constraint "users_email_key""#,
        )
        .with_detail(r#"Key ("email")=(a@b.c) already exists."#)
        .with_constraint("users_email_key")
        .with_table("users");
        let TypedError::UniqueConstraint {
            message,
            fields,
            errors,
            table,
            constraint,
            ..
        } = translate(err, &NO_MODEL)
        else {
            panic!("expected unique violation");
        };
        assert_eq!(message, "Validation error");
        assert_eq!(fields, vec![("email".to_string(), json!("a@b.c"))]);
        assert_eq!(errors.len(), 1);
        assert_eq!(table.as_deref(), Some("users"));
        assert_eq!(constraint.as_deref(), Some("users_email_key"));
    }

    #[test]
    fn test_unique_violation_uses_index_message() {
        let indexes = [ModelIndex::unique("memberships_pk", ["user_id", "org_id"])
            .with_msg("already a member")];
        let ctx = Context {
            indexes: &indexes,
            instance: None,
        };
        let err = NativeError::new("23505", "duplicate key")
            .with_detail("Key (user_id, org_id)=(1, 2) already exists.");
        let TypedError::UniqueConstraint { message, fields, .. } = translate(err, &ctx) else {
            panic!("expected unique violation");
        };
        assert_eq!(message, "already a member");
        assert_eq!(fields[1], ("org_id".to_string(), json!("2")));
    }

    #[test]
    fn test_unique_violation_without_detail() {
        let err = NativeError::new("23505", "duplicate key value").with_table("users");
        let TypedError::UniqueConstraint {
            message,
            errors,
            table,
            constraint,
            ..
        } = translate(err, &NO_MODEL)
        else {
            panic!("expected unique violation");
        };
        assert_eq!(message, "duplicate key value");
        assert!(errors.is_empty());
        assert_eq!(table.as_deref(), Some("users"));
        assert_eq!(constraint, None);
    }

    #[test]
    fn test_foreign_key_violation() {
        let err = NativeError::new(
            "23503",
            r#"insert or update on table "posts" violates foreign key constraint "posts_author_id_fkey""#,
        );
        let TypedError::ForeignKeyConstraint {
            message,
            table,
            index,
            reltype,
            ..
        } = translate(err, &NO_MODEL)
        else {
            panic!("expected foreign key violation");
        };
        assert!(message.starts_with("insert or update"));
        assert_eq!(table.as_deref(), Some("posts"));
        assert_eq!(index.as_deref(), Some("posts_author_id_fkey"));
        assert_eq!(reltype, None);
    }

    #[test]
    fn test_exclusion_violation() {
        let err = NativeError::new("23P01", "conflicting key value violates exclusion constraint")
            .with_detail("Key (room, during)=(1, [10,20)) conflicts with existing key.")
            .with_constraint("no_overlap")
            .with_table("bookings");
        let TypedError::ExclusionConstraint {
            message,
            constraint,
            fields,
            table,
            ..
        } = translate(err, &NO_MODEL)
        else {
            panic!("expected exclusion violation");
        };
        assert_eq!(message, "Exclusion constraint error");
        assert_eq!(constraint.as_deref(), Some("no_overlap"));
        assert_eq!(table.as_deref(), Some("bookings"));
        assert_eq!(fields[0], ("room".to_string(), json!("1")));
    }

    #[test]
    fn test_undefined_object() {
        let err = NativeError::new(
            "42704",
            r#"constraint "nope" of relation "users" does not exist"#,
        )
        .with_sql(r#"ALTER TABLE "users" DROP CONSTRAINT "nope";"#);
        let TypedError::UnknownConstraint {
            constraint, table, ..
        } = translate(err, &NO_MODEL)
        else {
            panic!("expected unknown constraint");
        };
        assert_eq!(constraint.as_deref(), Some("nope"));
        assert_eq!(table.as_deref(), Some("users"));

        let err = NativeError::new("42704", r#"type "nope" does not exist"#)
            .with_sql("SELECT 'a'::nope");
        assert!(matches!(
            translate(err, &NO_MODEL),
            TypedError::Database { .. }
        ));
    }

    #[test]
    fn test_query_canceled() {
        let err = NativeError::new("57014", "canceling statement due to statement timeout");
        assert!(translate(err, &NO_MODEL).is_transient());
    }
}
