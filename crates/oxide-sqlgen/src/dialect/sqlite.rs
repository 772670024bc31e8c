//! SQLite profile.

use super::{AutoIncrementStyle, DialectKind, DialectParts};
use crate::capabilities::{
    AutoIncrementCapabilities, Capabilities, ConstraintCapabilities, DataTypeCapabilities,
    IndexCapabilities,
};
use crate::quote::IdentifierQuoter;
use crate::types::DataType;

pub(super) fn parts() -> DialectParts {
    DialectParts {
        kind: DialectKind::Sqlite,
        capabilities: capabilities(),
        quoter: IdentifierQuoter::new('`', '`'),
        type_mapper: map_data_type,
        auto_increment: AutoIncrementStyle::PrimaryKeySuffix("AUTOINCREMENT"),
        constraint_catalog: None,
        default_schema: None,
        default_engine: None,
    }
}

fn capabilities() -> Capabilities {
    Capabilities {
        return_values: true,
        large_object_defaults: true,
        auto_increment: AutoIncrementCapabilities {
            requires_primary_key: true,
            ..Default::default()
        },
        constraints: ConstraintCapabilities {
            inline_references: true,
            foreign_key_checks_disableable: true,
            check: true,
            on_update: true,
            ..Default::default()
        },
        data_types: DataTypeCapabilities {
            json: true,
            ..Default::default()
        },
        index: IndexCapabilities {
            where_clause: true,
            ..Default::default()
        },
        ..Capabilities::default()
    }
}

fn map_data_type(dt: &DataType) -> Option<String> {
    // Type affinity: everything folds onto INTEGER, REAL, NUMERIC, TEXT or BLOB.
    let sql = match dt {
        DataType::Smallint | DataType::Integer | DataType::Bigint | DataType::Boolean => "INTEGER",
        DataType::Real | DataType::Double => "REAL",
        DataType::Decimal { .. } | DataType::Numeric { .. } => "NUMERIC",
        DataType::Char(_)
        | DataType::Varchar(_)
        | DataType::Text
        | DataType::Json
        | DataType::Uuid
        | DataType::Enum(_) => "TEXT",
        DataType::Date | DataType::Time | DataType::Timestamp | DataType::Datetime => "TEXT",
        DataType::Blob | DataType::Binary(_) | DataType::Varbinary(_) => "BLOB",
        DataType::Custom(name) => return Some(name.clone()),
        DataType::Jsonb | DataType::Geometry | DataType::Array(_) => return None,
    };
    Some(sql.to_string())
}
