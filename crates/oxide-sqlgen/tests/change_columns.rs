//! Integration tests for column change requests.
//!
//! The catalog rows below are shaped like the output of
//! `show_constraints_query`, so the whole read-diff-alter loop is covered
//! without a live database.

mod common;

use common::{ALL_DIALECTS, generator, sql, sql_err};
use oxide_sqlgen::column::{char, varchar};
use oxide_sqlgen::{
    ColumnDefinition, ConstraintDescription, DataType, DialectKind, QueryGenerationError,
    References,
};
use serde_json::{Map, Value, json};

fn catalog_rows() -> Vec<Map<String, Value>> {
    json!([
        {
            "constraintName": "users_pkey",
            "constraintType": "PRIMARY KEY",
            "tableName": "users",
            "columnNames": "id"
        },
        {
            "constraintName": "users_team_id_fkey",
            "constraintType": "FOREIGN KEY",
            "tableName": "users",
            "columnNames": "team_id",
            "referencedTableName": "teams",
            "referencedColumnNames": "id",
            "deleteAction": "SET NULL",
            "updateAction": "CASCADE"
        }
    ])
    .as_array()
    .map(|rows| {
        rows.iter()
            .filter_map(|row| row.as_object().cloned())
            .collect()
    })
    .unwrap_or_default()
}

#[test]
fn test_empty_change_set_fails_everywhere() {
    let changes: Vec<(&str, ColumnDefinition)> = Vec::new();
    for kind in ALL_DIALECTS {
        let err = sql_err(kind, generator(kind).change_columns_query("users", &changes));
        assert!(matches!(err, QueryGenerationError::NoColumns));
    }
}

#[test]
fn test_primary_key_membership_is_never_changed() {
    let changes = [("id", ColumnDefinition::partial().primary_key())];
    for kind in ALL_DIALECTS {
        let err = sql_err(kind, generator(kind).change_columns_query("users", &changes));
        assert!(matches!(err, QueryGenerationError::PrimaryKeyChange { .. }));
    }
}

#[test]
fn test_whole_redefinition_companion_properties() {
    for kind in [DialectKind::Mysql, DialectKind::Mariadb] {
        let generator = generator(kind);

        let partial = [("name", ColumnDefinition::partial().allow_null(false))];
        let message = sql_err(kind, generator.change_columns_query("users", &partial)).to_string();
        assert!(message.contains("allow_null"));
        assert!(message.contains(
            "> data_type, allow_null, auto_increment, comment, default_value (or set drop_default_value to true)"
        ));

        let complete = [(
            "name",
            varchar(100)
                .allow_null(false)
                .auto_increment(false)
                .clear_comment()
                .drop_default(),
        )];
        assert_eq!(
            sql(kind, generator.change_columns_query("users", &complete)),
            "ALTER TABLE `users` MODIFY `name` VARCHAR(100) NOT NULL;"
        );
    }
}

#[test]
fn test_granular_changes_share_one_alter_table() {
    let kind = DialectKind::Postgres;
    let sql = sql(
        kind,
        generator(kind).change_columns_query(
            "users",
            &[
                ("name", char(100).allow_null(true)),
                ("bio", ColumnDefinition::partial().comment("About me")),
            ],
        ),
    );
    assert_eq!(
        sql,
        "ALTER TABLE \"users\" ALTER COLUMN \"name\" TYPE CHAR(100), ALTER COLUMN \"name\" DROP NOT NULL; \
         COMMENT ON COLUMN \"users\".\"bio\" IS 'About me';"
    );
    assert_eq!(sql.matches("ALTER TABLE").count(), 1);
}

#[test]
fn test_catalog_driven_checks() {
    let existing = ConstraintDescription::from_catalog_rows(&catalog_rows())
        .unwrap_or_else(|e| panic!("Failed to read catalog rows: {e}"));
    assert_eq!(existing.len(), 2);

    let kind = DialectKind::Postgres;
    let generator = generator(kind);

    let refk = [(
        "team_id",
        ColumnDefinition::partial().references(References::to("teams")),
    )];
    let err = sql_err(
        kind,
        generator.change_columns_query_with_constraints("users", &refk, &existing),
    );
    assert!(err.to_string().contains("users_team_id_fkey"));

    let unique_pk = [("id", ColumnDefinition::partial().unique())];
    let err = sql_err(
        kind,
        generator.change_columns_query_with_constraints("users", &unique_pk, &existing),
    );
    assert!(matches!(err, QueryGenerationError::UniqueChange { .. }));

    let new_fk = [(
        "org_id",
        ColumnDefinition::partial().references(References::to("orgs")),
    )];
    assert_eq!(
        sql(
            kind,
            generator.change_columns_query_with_constraints("users", &new_fk, &existing)
        ),
        "ALTER TABLE \"users\" ADD FOREIGN KEY (\"org_id\") REFERENCES \"orgs\"(\"id\");"
    );
}

#[test]
fn test_enum_array_change_swaps_the_type() {
    let kind = DialectKind::Postgres;
    let changes = [(
        "tags",
        ColumnDefinition::new(DataType::array(DataType::enumeration(["draft", "live"])))
            .not_null(),
    )];
    assert_eq!(
        sql(kind, generator(kind).change_columns_query(("app", "posts"), &changes)),
        "CREATE TYPE \"app\".\"tmp_enum_posts_tags\" AS ENUM('draft', 'live'); \
         ALTER TABLE \"app\".\"posts\" ALTER COLUMN \"tags\" TYPE \"app\".\"tmp_enum_posts_tags\"[] USING (\"tags\"::text[]::\"app\".\"tmp_enum_posts_tags\"[]), ALTER COLUMN \"tags\" SET NOT NULL; \
         DROP TYPE IF EXISTS \"app\".\"enum_posts_tags\"; \
         ALTER TYPE \"app\".\"tmp_enum_posts_tags\" RENAME TO \"enum_posts_tags\";"
    );
}
