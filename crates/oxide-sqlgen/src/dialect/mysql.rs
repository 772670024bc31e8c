//! MySQL profile.

use super::{AutoIncrementStyle, CatalogFilter, DialectKind, DialectParts};
use crate::capabilities::{
    AlterColumnCapabilities, Capabilities, ConstraintCapabilities, DataTypeCapabilities,
    IndexCapabilities, RenameColumnCapabilities, TableOptionCapabilities,
};
use crate::quote::{IdentifierQuoter, StringEscape};
use crate::types::{with_length, with_precision, DataType};

pub(super) fn parts() -> DialectParts {
    DialectParts {
        kind: DialectKind::Mysql,
        capabilities: capabilities(),
        quoter: IdentifierQuoter::new('`', '`').string_escape(StringEscape::Backslash),
        type_mapper: map_data_type,
        auto_increment: AutoIncrementStyle::Keyword("AUTO_INCREMENT"),
        constraint_catalog: Some(show_constraints),
        default_schema: None,
        default_engine: Some("InnoDB"),
    }
}

/// Shared by the MariaDB profile, which starts from these flags.
pub(super) fn capabilities() -> Capabilities {
    Capabilities {
        schemas: true,
        inline_comments: true,
        column_positioning: true,
        parenthesized_default_expressions: true,
        constraints: ConstraintCapabilities {
            foreign_key_checks_disableable: true,
            check: true,
            on_update: true,
            named_foreign_key_on_add_column: true,
            ..Default::default()
        },
        alter_column: AlterColumnCapabilities {
            modify: true,
            ..Default::default()
        },
        rename_column: RenameColumnCapabilities {
            requires_definition: true,
        },
        data_types: DataTypeCapabilities {
            json: true,
            enums: true,
            geometry: true,
            boolean: true,
            collate_binary: true,
            ..Default::default()
        },
        index: IndexCapabilities {
            collate: true,
            length: true,
            using: true,
            ..Default::default()
        },
        table_options: TableOptionCapabilities {
            engine: true,
            charset: true,
            collate: true,
            row_format: true,
            comment: true,
            initial_auto_increment: true,
            unique_keys: true,
        },
        ..Capabilities::default()
    }
}

/// Shared by the MariaDB profile for every type it spells the same way.
pub(super) fn map_data_type(dt: &DataType) -> Option<String> {
    let sql = match dt {
        DataType::Smallint => "SMALLINT".to_string(),
        DataType::Integer => "INTEGER".to_string(),
        DataType::Bigint => "BIGINT".to_string(),
        DataType::Real => "FLOAT".to_string(),
        DataType::Double => "DOUBLE PRECISION".to_string(),
        DataType::Decimal { precision, scale } => with_precision("DECIMAL", *precision, *scale),
        DataType::Numeric { precision, scale } => with_precision("NUMERIC", *precision, *scale),
        DataType::Char(len) => with_length("CHAR", *len),
        DataType::Varchar(len) => with_length("VARCHAR", Some(len.unwrap_or(255))),
        DataType::Text => "TEXT".to_string(),
        DataType::Blob => "BLOB".to_string(),
        DataType::Binary(len) => with_length("BINARY", *len),
        DataType::Varbinary(len) => with_length("VARBINARY", Some(len.unwrap_or(255))),
        DataType::Date => "DATE".to_string(),
        DataType::Time => "TIME".to_string(),
        DataType::Timestamp => "TIMESTAMP".to_string(),
        DataType::Datetime => "DATETIME".to_string(),
        DataType::Boolean => "TINYINT(1)".to_string(),
        DataType::Json => "JSON".to_string(),
        DataType::Uuid => "CHAR(36) BINARY".to_string(),
        DataType::Geometry => "GEOMETRY".to_string(),
        DataType::Custom(name) => name.clone(),
        DataType::Jsonb | DataType::Array(_) | DataType::Enum(_) => return None,
    };
    Some(sql)
}

pub(super) fn show_constraints(filter: &CatalogFilter) -> String {
    let mut sql = String::from(concat!(
        "SELECT c.CONSTRAINT_CATALOG AS constraintCatalog, ",
        "c.CONSTRAINT_SCHEMA AS constraintSchema, ",
        "c.CONSTRAINT_NAME AS constraintName, ",
        "c.CONSTRAINT_TYPE AS constraintType, ",
        "c.TABLE_SCHEMA AS tableSchema, ",
        "c.TABLE_NAME AS tableName, ",
        "kcu.COLUMN_NAME AS columnNames, ",
        "kcu.REFERENCED_TABLE_SCHEMA AS referencedTableSchema, ",
        "kcu.REFERENCED_TABLE_NAME AS referencedTableName, ",
        "kcu.REFERENCED_COLUMN_NAME AS referencedColumnNames, ",
        "r.DELETE_RULE AS deleteAction, ",
        "r.UPDATE_RULE AS updateAction ",
        "FROM INFORMATION_SCHEMA.TABLE_CONSTRAINTS c ",
        "LEFT JOIN INFORMATION_SCHEMA.REFERENTIAL_CONSTRAINTS r ",
        "ON c.CONSTRAINT_SCHEMA = r.CONSTRAINT_SCHEMA ",
        "AND c.CONSTRAINT_NAME = r.CONSTRAINT_NAME ",
        "AND c.TABLE_NAME = r.TABLE_NAME ",
        "LEFT JOIN INFORMATION_SCHEMA.KEY_COLUMN_USAGE kcu ",
        "ON c.CONSTRAINT_SCHEMA = kcu.CONSTRAINT_SCHEMA ",
        "AND c.CONSTRAINT_NAME = kcu.CONSTRAINT_NAME ",
        "AND c.TABLE_NAME = kcu.TABLE_NAME"
    ));
    sql.push_str(&format!(" WHERE c.TABLE_NAME = {}", filter.table));
    match filter.schema {
        Some(ref schema) => sql.push_str(&format!(" AND c.TABLE_SCHEMA = {schema}")),
        None => sql.push_str(" AND c.TABLE_SCHEMA = DATABASE()"),
    }
    if let Some(ref name) = filter.constraint_name {
        sql.push_str(&format!(" AND c.CONSTRAINT_NAME = {name}"));
    }
    sql.push_str(" ORDER BY c.CONSTRAINT_NAME, kcu.ORDINAL_POSITION;");
    sql
}
