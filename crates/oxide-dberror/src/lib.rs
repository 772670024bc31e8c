//! # oxide-dberror
//!
//! Classifies the errors database drivers raise into one taxonomy shared by
//! every dialect, so callers can react to a duplicate key or a missing
//! referenced row without parsing engine-specific messages.
//!
//! Driver adapters describe a failure as a [`NativeError`] (code, message,
//! optional detail, statement and parameters). An [`ErrorTranslator`] for
//! the engine maps it to a [`TypedError`], optionally enriched with the
//! model's unique indexes and the values that were being written.
//!
//! ```rust
//! use oxide_dberror::{ErrorTranslator, ModelIndex, NativeError, TypedError};
//! use oxide_sqlgen::DialectKind;
//!
//! let translator = ErrorTranslator::new(DialectKind::Postgres)
//!     .with_indexes(&[ModelIndex::unique("users_email", ["email"]).with_msg("Email taken")]);
//!
//! let err = NativeError::new("23505", "duplicate key value violates unique constraint")
//!     .with_detail("Key (email)=(a@b.c) already exists.");
//!
//! let typed = translator.translate(err);
//! assert_eq!(typed.to_string(), "Email taken");
//! assert!(matches!(typed, TypedError::UniqueConstraint { .. }));
//! ```

mod mysql;
pub mod native;
mod postgres;
mod sqlite;
pub mod translator;
pub mod typed;

pub use native::{NativeCode, NativeError};
pub use translator::ErrorTranslator;
pub use typed::{ModelIndex, RelationType, TypedError, ValidationErrorItem, VALIDATION_ERROR};
