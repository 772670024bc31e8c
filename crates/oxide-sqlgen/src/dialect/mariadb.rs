//! MariaDB profile: MySQL plus a few extensions.

use super::{mysql, AutoIncrementStyle, DialectKind, DialectParts};
use crate::capabilities::{
    AddColumnCapabilities, Capabilities, DataTypeCapabilities, RemoveColumnCapabilities,
};
use crate::quote::{IdentifierQuoter, StringEscape};
use crate::types::DataType;

pub(super) fn parts() -> DialectParts {
    DialectParts {
        kind: DialectKind::Mariadb,
        capabilities: capabilities(),
        quoter: IdentifierQuoter::new('`', '`').string_escape(StringEscape::Backslash),
        type_mapper: map_data_type,
        auto_increment: AutoIncrementStyle::Keyword("AUTO_INCREMENT"),
        constraint_catalog: Some(mysql::show_constraints),
        default_schema: None,
        default_engine: Some("InnoDB"),
    }
}

fn capabilities() -> Capabilities {
    let base = mysql::capabilities();
    Capabilities {
        data_types: DataTypeCapabilities {
            uuid: true,
            ..base.data_types.clone()
        },
        add_column: AddColumnCapabilities {
            if_not_exists: true,
        },
        remove_column: RemoveColumnCapabilities {
            if_exists: true,
            ..Default::default()
        },
        ..base
    }
}

fn map_data_type(dt: &DataType) -> Option<String> {
    match dt {
        DataType::Uuid => Some("UUID".to_string()),
        other => mysql::map_data_type(other),
    }
}
