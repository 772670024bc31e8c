//! MySQL and MariaDB error codes.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_json::Value;

use crate::native::NativeError;
use crate::translator::{unique_violation, Context};
use crate::typed::{RelationType, TypedError};

const ER_LOCK_WAIT_TIMEOUT: i64 = 1205;
const ER_LOCK_DEADLOCK: i64 = 1213;
const ER_DUP_ENTRY: i64 = 1062;
const ER_ROW_IS_REFERENCED: i64 = 1451;
const ER_NO_REFERENCED_ROW: i64 = 1452;
const ER_CANT_DROP_FIELD_OR_KEY: i64 = 1091;
const ER_CONSTRAINT_NOT_FOUND: i64 = 3940;

/// MySQL reports the key as `table.key`.
static MYSQL_DUPLICATE_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Duplicate entry '([\s\S]*)' for key '?([\s\S]*?)'?$")
        .expect("Invalid duplicate entry regex")
});

/// MariaDB reports the bare key followed by extra text.
static MARIADB_DUPLICATE_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Duplicate entry '([\s\S]*)' for key '?([^']*?)'?\s.*$")
        .expect("Invalid duplicate entry regex")
});

static FOREIGN_KEY_BACKTICK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"CONSTRAINT `(.*)` FOREIGN KEY \(`(.*)`\) REFERENCES `(.*)` \(`(.*)`\)")
        .expect("Invalid foreign key regex")
});

static FOREIGN_KEY_DOUBLE_QUOTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"CONSTRAINT "(.*)" FOREIGN KEY \("(.*)"\) REFERENCES "(.*)" \("(.*)"\)"#)
        .expect("Invalid foreign key regex")
});

static FIELDS_BACKTICK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`, *`").expect("Invalid field separator regex"));

static FIELDS_DOUBLE_QUOTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"", *""#).expect("Invalid field separator regex"));

static CONSTRAINT_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:constraint|index) `(.+?)`").expect("Invalid constraint name regex")
});

static TABLE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)table `(.+?)`").expect("Invalid table name regex"));

/// The two engines share codes but word some messages differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flavor {
    Mysql,
    Mariadb,
}

impl Flavor {
    const fn unknown_constraint_code(self) -> i64 {
        match self {
            Self::Mysql => ER_CONSTRAINT_NOT_FOUND,
            Self::Mariadb => ER_CANT_DROP_FIELD_OR_KEY,
        }
    }
}

pub(crate) fn translate(err: NativeError, ctx: &Context<'_>, flavor: Flavor) -> TypedError {
    let Some(code) = err.code.as_number() else {
        return TypedError::Database { cause: err };
    };

    match code {
        ER_DUP_ENTRY => duplicate_entry(err, ctx, flavor),
        ER_ROW_IS_REFERENCED => foreign_key(err, ctx, RelationType::Parent),
        ER_NO_REFERENCED_ROW => foreign_key(err, ctx, RelationType::Child),
        ER_LOCK_WAIT_TIMEOUT | ER_LOCK_DEADLOCK => TypedError::Timeout { cause: err },
        code if code == flavor.unknown_constraint_code() => unknown_constraint(err),
        _ => TypedError::Database { cause: err },
    }
}

fn duplicate_entry(err: NativeError, ctx: &Context<'_>, flavor: Flavor) -> TypedError {
    let pattern = match flavor {
        Flavor::Mysql => &MYSQL_DUPLICATE_ENTRY,
        Flavor::Mariadb => &MARIADB_DUPLICATE_ENTRY,
    };
    let Some((value, key)) = pattern.captures(&err.message).map(|caps| {
        let key = &caps[2];
        let key = match flavor {
            Flavor::Mysql => key.rsplit('.').next().unwrap_or(key),
            Flavor::Mariadb => key,
        };
        (caps[1].to_string(), key.to_string())
    }) else {
        return unique_violation(None, Vec::new(), err);
    };

    match ctx.unique_index(&key) {
        Some(index) => {
            let mut values = value.split('-');
            let fields = index
                .fields
                .iter()
                .map(|field| {
                    let value = values
                        .next()
                        .map_or(Value::Null, |v| Value::String(v.to_string()));
                    (field.clone(), value)
                })
                .collect();
            unique_violation(index.msg.as_deref(), fields, err)
        }
        None => unique_violation(None, vec![(key, Value::String(value))], err),
    }
}

fn foreign_key(err: NativeError, ctx: &Context<'_>, reltype: RelationType) -> TypedError {
    let (index, fields, table) = match FOREIGN_KEY_BACKTICK.captures(&err.message) {
        Some(caps) => foreign_key_parts(&caps, &FIELDS_BACKTICK),
        None => FOREIGN_KEY_DOUBLE_QUOTE
            .captures(&err.message)
            .map_or((None, Vec::new(), None), |caps| {
                foreign_key_parts(&caps, &FIELDS_DOUBLE_QUOTE)
            }),
    };
    let value = fields
        .first()
        .map(|field| ctx.instance_value(field))
        .filter(|value| !value.is_null());

    TypedError::ForeignKeyConstraint {
        message: err.message.clone(),
        reltype: Some(reltype),
        table,
        fields,
        value,
        index,
        cause: err,
    }
}

/// Constraint name, referencing columns and referenced table.
fn foreign_key_parts(
    caps: &Captures<'_>,
    separator: &Regex,
) -> (Option<String>, Vec<String>, Option<String>) {
    let fields = separator
        .split(&caps[2])
        .map(ToString::to_string)
        .collect();
    (Some(caps[1].to_string()), fields, Some(caps[3].to_string()))
}

fn unknown_constraint(err: NativeError) -> TypedError {
    let sql = err.sql.as_deref().unwrap_or_default();
    let constraint = CONSTRAINT_NAME.captures(sql).map(|caps| caps[1].to_string());
    let table = TABLE_NAME.captures(sql).map(|caps| caps[1].to_string());

    TypedError::UnknownConstraint {
        message: err.message.clone(),
        constraint,
        table,
        cause: err,
    }
}
