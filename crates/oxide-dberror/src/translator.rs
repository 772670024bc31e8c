//! Entry point for error translation.

use oxide_sqlgen::{Dialect, DialectKind};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::native::NativeError;
use crate::typed::{ModelIndex, TypedError, ValidationErrorItem, VALIDATION_ERROR};
use crate::{mysql, postgres, sqlite};

/// Model data available while translating one error.
pub(crate) struct Context<'a> {
    pub(crate) indexes: &'a [ModelIndex],
    pub(crate) instance: Option<&'a Map<String, Value>>,
}

impl Context<'_> {
    /// The unique index with the given name.
    pub(crate) fn unique_index(&self, name: &str) -> Option<&ModelIndex> {
        self.indexes
            .iter()
            .find(|index| index.unique && index.name == name)
    }

    /// The custom message of the unique index covering exactly `fields`.
    pub(crate) fn message_for_fields(&self, fields: &[String]) -> Option<&str> {
        self.indexes
            .iter()
            .filter(|index| index.unique && index.fields == fields)
            .find_map(|index| index.msg.as_deref())
    }

    /// The value the model instance holds for `field`, `null` when unknown.
    pub(crate) fn instance_value(&self, field: &str) -> Value {
        self.instance
            .and_then(|instance| instance.get(field))
            .cloned()
            .unwrap_or(Value::Null)
    }
}

/// Maps driver errors of one dialect onto [`TypedError`].
///
/// Index metadata and the model instance are optional. Without them unique
/// violations still carry the fields parsed from the driver message, only
/// with default messages and without values the driver does not report.
///
/// ```
/// use oxide_dberror::{ErrorTranslator, NativeError, TypedError};
/// use oxide_sqlgen::DialectKind;
///
/// let err = NativeError::new(1062, "Duplicate entry 'bob' for key 'users.username'");
/// match ErrorTranslator::new(DialectKind::Mysql).translate(err) {
///     TypedError::UniqueConstraint { fields, .. } => {
///         assert_eq!(fields, vec![("username".to_string(), "bob".into())]);
///     }
///     other => panic!("unexpected {other:?}"),
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ErrorTranslator {
    kind: DialectKind,
    indexes: Vec<ModelIndex>,
    instance: Option<Map<String, Value>>,
}

impl ErrorTranslator {
    #[must_use]
    pub const fn new(kind: DialectKind) -> Self {
        Self {
            kind,
            indexes: Vec::new(),
            instance: None,
        }
    }

    /// Translator for the engine a generator profile targets.
    #[must_use]
    pub const fn for_dialect(dialect: &Dialect) -> Self {
        Self::new(dialect.kind())
    }

    /// Index metadata of the target model.
    #[must_use]
    pub fn with_indexes(mut self, indexes: &[ModelIndex]) -> Self {
        self.indexes = indexes.to_vec();
        self
    }

    /// The values the failing statement tried to write.
    #[must_use]
    pub fn with_instance(mut self, instance: Map<String, Value>) -> Self {
        self.instance = Some(instance);
        self
    }

    #[must_use]
    pub const fn kind(&self) -> DialectKind {
        self.kind
    }

    /// Classifies a driver error. Unrecognised errors become
    /// [`TypedError::Database`].
    #[must_use]
    pub fn translate(&self, err: NativeError) -> TypedError {
        debug!(dialect = %self.kind, code = %err.code, "Translating driver error");

        let ctx = Context {
            indexes: &self.indexes,
            instance: self.instance.as_ref(),
        };
        let typed = match self.kind {
            DialectKind::Mysql => mysql::translate(err, &ctx, mysql::Flavor::Mysql),
            DialectKind::Mariadb => mysql::translate(err, &ctx, mysql::Flavor::Mariadb),
            DialectKind::Postgres => postgres::translate(err, &ctx),
            DialectKind::Sqlite => sqlite::translate(err, &ctx),
        };

        if let TypedError::Database { cause } = &typed {
            warn!(dialect = %self.kind, code = %cause.code, "Unrecognised driver error");
        }
        typed
    }
}

/// Builds a unique violation with one validation item per field.
pub(crate) fn unique_violation(
    message: Option<&str>,
    fields: Vec<(String, Value)>,
    cause: NativeError,
) -> TypedError {
    let errors = fields
        .iter()
        .map(|(field, value)| ValidationErrorItem::unique_violation(field, value.clone()))
        .collect();
    TypedError::UniqueConstraint {
        message: message.unwrap_or(VALIDATION_ERROR).to_string(),
        errors,
        fields,
        table: cause.table.clone(),
        constraint: cause.constraint.clone(),
        cause,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_context_lookups() {
        let indexes = [
            ModelIndex::unique("users_email", ["email"]).with_msg("email taken"),
            ModelIndex {
                name: "users_name".into(),
                fields: vec!["name".into()],
                unique: false,
                msg: Some("not unique".into()),
            },
        ];
        let instance = json!({ "email": "a@b.c" }).as_object().unwrap().clone();
        let ctx = Context {
            indexes: &indexes,
            instance: Some(&instance),
        };

        assert!(ctx.unique_index("users_email").is_some());
        assert!(ctx.unique_index("users_name").is_none());
        assert_eq!(ctx.message_for_fields(&["email".into()]), Some("email taken"));
        assert_eq!(ctx.message_for_fields(&["name".into()]), None);
        assert_eq!(ctx.instance_value("email"), json!("a@b.c"));
        assert_eq!(ctx.instance_value("missing"), Value::Null);
    }

    #[test]
    fn test_unique_violation_default_message() {
        let err = unique_violation(
            None,
            vec![("a".into(), json!(1))],
            NativeError::new(1, "dup"),
        );
        let TypedError::UniqueConstraint { message, errors, .. } = err else {
            panic!("expected unique violation");
        };
        assert_eq!(message, "Validation error");
        assert_eq!(errors[0].path, "a");
    }

    #[test]
    fn test_unknown_code_falls_through() {
        let err = ErrorTranslator::new(DialectKind::Postgres)
            .translate(NativeError::new("XX000", "internal error"));
        assert!(matches!(err, TypedError::Database { .. }));
    }
}
