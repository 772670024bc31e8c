//! Translation of driver errors across dialects.

mod common;

use common::{init_tracing, object, translate, unique_fields};
use oxide_dberror::{ErrorTranslator, ModelIndex, NativeError, RelationType, TypedError};
use oxide_sqlgen::{Dialect, DialectKind};
use serde_json::{json, Value};
use std::error::Error;

#[test]
fn test_mysql_duplicate_entry_names_the_key() {
    let err = NativeError::new(1062, "Duplicate entry 'bob' for key 'users.username'")
        .with_sql("INSERT INTO `users` (`username`) VALUES (?);")
        .with_parameters(vec![json!("bob")]);

    let typed = translate(DialectKind::Mysql, err);
    assert_eq!(typed.to_string(), "Validation error");
    assert_eq!(typed.sql(), Some("INSERT INTO `users` (`username`) VALUES (?);"));
    assert_eq!(typed.parameters(), &[json!("bob")]);
    assert_eq!(
        unique_fields(typed),
        vec![("username".to_string(), json!("bob"))]
    );
}

#[test]
fn test_unique_violation_carries_index_message_on_every_engine() {
    init_tracing();
    let indexes = [ModelIndex::unique("users_email", ["email"]).with_msg("Email taken")];
    let instance = object(json!({ "email": "a@b.c" }));

    let cases = [
        (
            DialectKind::Mysql,
            NativeError::new(1062, "Duplicate entry 'a@b.c' for key 'users.users_email'"),
        ),
        (
            DialectKind::Mariadb,
            NativeError::new(
                1062,
                "Duplicate entry 'a@b.c' for key 'users_email' sql: INSERT INTO users",
            ),
        ),
        (
            DialectKind::Postgres,
            NativeError::new("23505", "duplicate key value")
                .with_detail("Key (email)=(a@b.c) already exists."),
        ),
        (
            DialectKind::Sqlite,
            NativeError::new(
                "SQLITE_CONSTRAINT_UNIQUE",
                "UNIQUE constraint failed: users.email",
            ),
        ),
    ];

    for (kind, err) in cases {
        let typed = ErrorTranslator::new(kind)
            .with_indexes(&indexes)
            .with_instance(instance.clone())
            .translate(err);
        assert_eq!(typed.to_string(), "Email taken", "{kind}");
        assert!(typed.is_constraint_violation());
        assert_eq!(
            unique_fields(typed),
            vec![("email".to_string(), json!("a@b.c"))],
            "{kind}"
        );
    }
}

#[test]
fn test_validation_items_describe_each_field() {
    let err = NativeError::new("23505", "duplicate key value")
        .with_detail(r#"Key ("org_id", "slug")=(3, intro) already exists."#);
    let TypedError::UniqueConstraint { errors, .. } = translate(DialectKind::Postgres, err) else {
        panic!("expected a unique violation");
    };

    let messages: Vec<&str> = errors.iter().map(|item| item.message.as_str()).collect();
    assert_eq!(messages, ["org_id must be unique", "slug must be unique"]);
    assert!(errors.iter().all(|item| item.validator_key == "not_unique"));
    assert_eq!(errors[1].value, json!("intro"));
}

#[test]
fn test_foreign_key_relation_side() {
    let message = "a foreign key constraint fails (`db`.`posts`, CONSTRAINT `posts_user_fk` FOREIGN KEY (`user_id`) REFERENCES `users` (`id`))";

    let parent = translate(DialectKind::Mysql, NativeError::new(1451, message));
    let child = translate(DialectKind::Mariadb, NativeError::new(1452, message));

    for (typed, side) in [(parent, RelationType::Parent), (child, RelationType::Child)] {
        let TypedError::ForeignKeyConstraint {
            reltype,
            table,
            index,
            message: text,
            ..
        } = typed
        else {
            panic!("expected a foreign key violation");
        };
        assert_eq!(reltype, Some(side));
        assert_eq!(table.as_deref(), Some("users"));
        assert_eq!(index.as_deref(), Some("posts_user_fk"));
        assert_eq!(text, message);
    }
}

#[test]
fn test_timeouts_are_transient() {
    let cases = [
        (DialectKind::Mysql, NativeError::new(1205, "Lock wait timeout exceeded")),
        (DialectKind::Postgres, NativeError::new("57014", "canceling statement")),
        (DialectKind::Sqlite, NativeError::new("SQLITE_BUSY", "database is locked")),
    ];
    for (kind, err) in cases {
        assert!(translate(kind, err).is_transient(), "{kind}");
    }
}

#[test]
fn test_unrecognised_errors_keep_their_cause() {
    let err = NativeError::new(1146, "Table 'db.nope' doesn't exist").with_sql("SELECT * FROM nope");
    let typed = translate(DialectKind::Mysql, err.clone());

    assert!(matches!(typed, TypedError::Database { .. }));
    assert_eq!(typed.to_string(), err.message);
    assert_eq!(typed.cause(), &err);
    assert_eq!(
        typed.source().map(ToString::to_string).as_deref(),
        Some("Table 'db.nope' doesn't exist")
    );
}

#[test]
fn test_translator_follows_generator_dialect() {
    let translator = ErrorTranslator::for_dialect(&Dialect::sqlite());
    assert_eq!(translator.kind(), DialectKind::Sqlite);

    let typed = translator.translate(NativeError::new(
        "SQLITE_CONSTRAINT",
        "SQLITE_CONSTRAINT: columns a, b are not unique",
    ));
    assert_eq!(
        unique_fields(typed),
        vec![("a".to_string(), Value::Null), ("b".to_string(), Value::Null)]
    );
}

#[test]
fn test_adapter_json_input() {
    let err: NativeError = serde_json::from_value(json!({
        "code": "23P01",
        "message": "conflicting key value violates exclusion constraint",
        "detail": "Key (room)=(4) conflicts with existing key (room)=(4).",
        "constraint": "bookings_no_overlap",
        "table": "bookings"
    }))
    .unwrap_or_else(|e| panic!("invalid native error: {e}"));

    let TypedError::ExclusionConstraint {
        constraint,
        fields,
        table,
        ..
    } = translate(DialectKind::Postgres, err)
    else {
        panic!("expected an exclusion violation");
    };
    assert_eq!(constraint.as_deref(), Some("bookings_no_overlap"));
    assert_eq!(table.as_deref(), Some("bookings"));
    assert_eq!(fields, vec![("room".to_string(), json!("4"))]);
}
