//! PostgreSQL profile.

use super::{AutoIncrementStyle, CatalogFilter, DialectKind, DialectParts};
use crate::capabilities::{
    AddColumnCapabilities, AlterColumnCapabilities, AutoIncrementCapabilities, Capabilities,
    ConstraintCapabilities, DataTypeCapabilities, IndexCapabilities, RemoveColumnCapabilities,
    TableOptionCapabilities,
};
use crate::quote::{BlobLiteral, IdentifierQuoter};
use crate::types::{with_length, with_precision, DataType};

pub(super) fn parts() -> DialectParts {
    DialectParts {
        kind: DialectKind::Postgres,
        capabilities: capabilities(),
        quoter: IdentifierQuoter::new('"', '"').blob_literal(BlobLiteral::ByteaHex),
        type_mapper: map_data_type,
        auto_increment: AutoIncrementStyle::SerialType,
        constraint_catalog: Some(show_constraints),
        default_schema: Some("public"),
        default_engine: None,
    }
}

fn capabilities() -> Capabilities {
    Capabilities {
        schemas: true,
        return_values: true,
        large_object_defaults: true,
        auto_increment: AutoIncrementCapabilities {
            identity: true,
            ..Default::default()
        },
        constraints: ConstraintCapabilities {
            inline_references: true,
            deferrable: true,
            check: true,
            on_update: true,
            ..Default::default()
        },
        alter_column: AlterColumnCapabilities {
            granular: true,
            ..Default::default()
        },
        data_types: DataTypeCapabilities {
            json: true,
            jsonb: true,
            array: true,
            enums: true,
            named_enums: true,
            geometry: true,
            uuid: true,
            boolean: true,
            ..Default::default()
        },
        index: IndexCapabilities {
            collate: true,
            concurrently: true,
            using: true,
            where_clause: true,
            ..Default::default()
        },
        table_options: TableOptionCapabilities {
            comment: true,
            unique_keys: true,
            ..Default::default()
        },
        add_column: AddColumnCapabilities {
            if_not_exists: true,
        },
        remove_column: RemoveColumnCapabilities {
            if_exists: true,
            cascade: true,
        },
        ..Capabilities::default()
    }
}

fn map_data_type(dt: &DataType) -> Option<String> {
    let sql = match dt {
        DataType::Smallint => "SMALLINT".to_string(),
        DataType::Integer => "INTEGER".to_string(),
        DataType::Bigint => "BIGINT".to_string(),
        DataType::Real => "REAL".to_string(),
        DataType::Double => "DOUBLE PRECISION".to_string(),
        DataType::Decimal { precision, scale } => with_precision("DECIMAL", *precision, *scale),
        DataType::Numeric { precision, scale } => with_precision("NUMERIC", *precision, *scale),
        DataType::Char(len) => with_length("CHAR", *len),
        DataType::Varchar(len) => with_length("VARCHAR", Some(len.unwrap_or(255))),
        DataType::Text => "TEXT".to_string(),
        DataType::Blob | DataType::Binary(None) | DataType::Varbinary(None) => {
            "BYTEA".to_string()
        }
        DataType::Binary(Some(n)) => format!("BIT({n})"),
        DataType::Varbinary(Some(n)) => format!("VARBIT({n})"),
        DataType::Date => "DATE".to_string(),
        DataType::Time => "TIME".to_string(),
        DataType::Timestamp => "TIMESTAMP".to_string(),
        DataType::Datetime => "TIMESTAMP WITH TIME ZONE".to_string(),
        DataType::Boolean => "BOOLEAN".to_string(),
        DataType::Json => "JSON".to_string(),
        DataType::Jsonb => "JSONB".to_string(),
        DataType::Uuid => "UUID".to_string(),
        DataType::Geometry => "GEOMETRY".to_string(),
        DataType::Array(inner) => format!("{}[]", map_data_type(inner)?),
        DataType::Custom(name) => name.clone(),
        // Named types, rendered by the translator.
        DataType::Enum(_) => return None,
    };
    Some(sql)
}

fn show_constraints(filter: &CatalogFilter) -> String {
    let mut sql = String::from(concat!(
        "SELECT c.constraint_catalog AS \"constraintCatalog\", ",
        "c.constraint_schema AS \"constraintSchema\", ",
        "c.constraint_name AS \"constraintName\", ",
        "c.constraint_type AS \"constraintType\", ",
        "c.table_catalog AS \"tableCatalog\", ",
        "c.table_schema AS \"tableSchema\", ",
        "c.table_name AS \"tableName\", ",
        "kcu.column_name AS \"columnNames\", ",
        "ccu.table_schema AS \"referencedTableSchema\", ",
        "ccu.table_name AS \"referencedTableName\", ",
        "ccu.column_name AS \"referencedColumnNames\", ",
        "r.delete_rule AS \"deleteAction\", ",
        "r.update_rule AS \"updateAction\", ",
        "pg_get_expr(pgc.conbin, pgc.conrelid) AS \"definition\", ",
        "c.is_deferrable AS \"isDeferrable\", ",
        "c.initially_deferred AS \"initiallyDeferred\" ",
        "FROM INFORMATION_SCHEMA.table_constraints c ",
        "LEFT JOIN INFORMATION_SCHEMA.referential_constraints r ",
        "ON c.constraint_catalog = r.constraint_catalog ",
        "AND c.constraint_schema = r.constraint_schema ",
        "AND c.constraint_name = r.constraint_name ",
        "LEFT JOIN INFORMATION_SCHEMA.key_column_usage kcu ",
        "ON c.constraint_catalog = kcu.constraint_catalog ",
        "AND c.constraint_schema = kcu.constraint_schema ",
        "AND c.constraint_name = kcu.constraint_name ",
        "LEFT JOIN information_schema.constraint_column_usage AS ccu ",
        "ON r.constraint_catalog = ccu.constraint_catalog ",
        "AND r.constraint_schema = ccu.constraint_schema ",
        "AND r.constraint_name = ccu.constraint_name ",
        "LEFT JOIN pg_constraint pgc ON c.constraint_name = pgc.conname ",
        "AND c.table_schema = (SELECT nspname FROM pg_namespace WHERE oid = pgc.connamespace) ",
        "AND c.table_name = pgc.conrelid::regclass::text"
    ));
    sql.push_str(&format!(" WHERE c.table_name = {}", filter.table));
    if let Some(ref schema) = filter.schema {
        sql.push_str(&format!(" AND c.table_schema = {schema}"));
    }
    if let Some(ref name) = filter.constraint_name {
        sql.push_str(&format!(" AND c.constraint_name = {name}"));
    }
    sql.push_str(" ORDER BY c.constraint_name, kcu.ordinal_position;");
    sql
}
