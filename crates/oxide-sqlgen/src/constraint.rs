//! Existing constraints, as read back from the catalog.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::column::{Deferrable, ReferentialAction};
use crate::error::{QueryGenerationError, Result};

/// Kind of a table constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConstraintType {
    /// `PRIMARY KEY`
    #[serde(rename = "PRIMARY KEY")]
    PrimaryKey,
    /// `UNIQUE`
    #[serde(rename = "UNIQUE")]
    Unique,
    /// `FOREIGN KEY`
    #[serde(rename = "FOREIGN KEY")]
    ForeignKey,
    /// `CHECK`
    #[serde(rename = "CHECK")]
    Check,
}

/// One constraint of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintDescription {
    pub constraint_name: String,
    pub constraint_type: ConstraintType,
    pub table_name: Option<String>,
    pub table_schema: Option<String>,
    /// Constrained columns in key order.
    pub column_names: Vec<String>,
    pub referenced_table_name: Option<String>,
    pub referenced_column_names: Vec<String>,
    pub delete_action: Option<ReferentialAction>,
    pub update_action: Option<ReferentialAction>,
    /// CHECK expression.
    pub definition: Option<String>,
    pub deferrable: Option<Deferrable>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Names {
    One(String),
    Many(Vec<String>),
}

impl Names {
    fn into_vec(self) -> Vec<String> {
        match self {
            Self::One(name) => vec![name],
            Self::Many(names) => names,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogRow {
    constraint_name: String,
    constraint_type: ConstraintType,
    #[serde(default)]
    table_name: Option<String>,
    #[serde(default)]
    table_schema: Option<String>,
    #[serde(default)]
    column_names: Option<Names>,
    #[serde(default)]
    referenced_table_name: Option<String>,
    #[serde(default)]
    referenced_column_names: Option<Names>,
    #[serde(default)]
    delete_action: Option<String>,
    #[serde(default)]
    update_action: Option<String>,
    #[serde(default)]
    definition: Option<String>,
    #[serde(default)]
    is_deferrable: Option<String>,
    #[serde(default)]
    initially_deferred: Option<String>,
}

fn is_yes(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.eq_ignore_ascii_case("YES"))
}

fn parse_action(value: Option<&str>) -> Result<Option<ReferentialAction>> {
    value.map_or(Ok(None), ReferentialAction::parse_optional)
}

fn push_unique(target: &mut Vec<String>, names: Option<Names>) {
    for name in names.map(Names::into_vec).unwrap_or_default() {
        if !target.contains(&name) {
            target.push(name);
        }
    }
}

impl ConstraintDescription {
    /// Folds the rows produced by
    /// [`QueryGenerator::show_constraints_query`](crate::QueryGenerator::show_constraints_query)
    /// into one description per constraint.
    ///
    /// Rows are grouped by constraint name in first-seen order; column
    /// lists are concatenated without duplicates.
    ///
    /// # Errors
    ///
    /// Returns [`QueryGenerationError::InvalidCatalogRow`] for rows that
    /// lack a name or type, and
    /// [`QueryGenerationError::InvalidReferentialAction`] for unknown rules.
    pub fn from_catalog_rows(rows: &[Map<String, Value>]) -> Result<Vec<Self>> {
        let mut constraints: Vec<Self> = Vec::new();

        for row in rows {
            let row: CatalogRow = serde_json::from_value(Value::Object(row.clone()))
                .map_err(QueryGenerationError::InvalidCatalogRow)?;

            if let Some(existing) = constraints
                .iter_mut()
                .find(|c| c.constraint_name == row.constraint_name)
            {
                push_unique(&mut existing.column_names, row.column_names);
                push_unique(
                    &mut existing.referenced_column_names,
                    row.referenced_column_names,
                );
                continue;
            }

            let deferrable = row.is_deferrable.as_deref().map(|d| {
                if !is_yes(Some(d)) {
                    Deferrable::NotDeferrable
                } else if is_yes(row.initially_deferred.as_deref()) {
                    Deferrable::InitiallyDeferred
                } else {
                    Deferrable::InitiallyImmediate
                }
            });

            let mut description = Self {
                constraint_name: row.constraint_name,
                constraint_type: row.constraint_type,
                table_name: row.table_name,
                table_schema: row.table_schema,
                column_names: Vec::new(),
                referenced_table_name: row.referenced_table_name,
                referenced_column_names: Vec::new(),
                delete_action: parse_action(row.delete_action.as_deref())?,
                update_action: parse_action(row.update_action.as_deref())?,
                definition: row.definition,
                deferrable,
            };
            push_unique(&mut description.column_names, row.column_names);
            push_unique(
                &mut description.referenced_column_names,
                row.referenced_column_names,
            );
            constraints.push(description);
        }

        Ok(constraints)
    }

    /// Whether `column` is one of the constrained columns.
    #[must_use]
    pub fn covers(&self, column: &str) -> bool {
        self.column_names.iter().any(|c| c == column)
    }
}
