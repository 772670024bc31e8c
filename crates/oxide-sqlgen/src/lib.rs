//! # oxide-sqlgen
//!
//! Cross-dialect SQL generation and schema diffing.
//!
//! This crate provides:
//! - Per-dialect capability matrices that can be overridden from configuration
//! - Identifier quoting and literal escaping
//! - Column definition to SQL fragment translation
//! - DDL generation (CREATE TABLE, ADD/RENAME/DROP COLUMN, enum types)
//! - Safe `ALTER` generation for column changes
//!
//! ## Generating DDL
//!
//! ```rust
//! use oxide_sqlgen::column::{integer, varchar};
//! use oxide_sqlgen::{CreateTableOptions, DialectKind, QueryGenerator};
//!
//! let generator = QueryGenerator::for_kind(DialectKind::Mysql);
//! let sql = generator
//!     .create_table_from_definitions(
//!         "users",
//!         &[
//!             ("id", integer().primary_key().auto_increment(true)),
//!             ("name", varchar(255)),
//!         ],
//!         &CreateTableOptions::default(),
//!     )
//!     .unwrap();
//!
//! assert_eq!(
//!     sql,
//!     "CREATE TABLE IF NOT EXISTS `users` (`id` INTEGER AUTO_INCREMENT PRIMARY KEY, `name` VARCHAR(255)) ENGINE=InnoDB;"
//! );
//! ```
//!
//! ## Changing columns
//!
//! Change requests are partial column definitions. Requests that cannot be
//! applied safely are rejected with a [`QueryGenerationError`]:
//!
//! ```rust
//! use oxide_sqlgen::{ColumnDefinition, DialectKind, QueryGenerator};
//!
//! let generator = QueryGenerator::for_kind(DialectKind::Mysql);
//!
//! // MODIFY needs the whole definition.
//! let partial = ColumnDefinition::partial().not_null();
//! assert!(generator.change_columns_query("users", &[("name", partial)]).is_err());
//! ```

pub mod capabilities;
mod change;
pub mod column;
pub mod config;
pub mod constraint;
pub mod ddl;
pub mod dialect;
pub mod error;
pub mod generator;
pub mod quote;
pub mod table;
pub mod translator;
pub mod types;
pub mod value;

pub use capabilities::{Capabilities, CapabilityMatrix};
pub use column::{ColumnDefinition, Deferrable, ReferentialAction, References, Unique};
pub use config::DialectConfig;
pub use constraint::{ConstraintDescription, ConstraintType};
pub use ddl::{AddColumnOptions, CreateTableOptions, RemoveColumnOptions, UniqueKey};
pub use dialect::{Dialect, DialectKind};
pub use error::{QueryGenerationError, Result};
pub use generator::QueryGenerator;
pub use quote::IdentifierQuoter;
pub use table::{Table, TableName};
pub use translator::{AttributeAction, AttributeContext};
pub use types::DataType;
pub use value::DefaultValue;
