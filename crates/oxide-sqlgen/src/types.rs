//! Semantic column types.
//!
//! A [`DataType`] says what a column holds, not how a given engine spells
//! it. Each dialect module owns a mapper turning these into SQL text.

use core::fmt;

/// Semantic SQL data types.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataType {
    // Integer types
    /// Small integer (2 bytes).
    Smallint,
    /// Integer (4 bytes).
    Integer,
    /// Big integer (8 bytes).
    Bigint,

    // Floating point
    /// Real (4-byte float).
    Real,
    /// Double precision (8-byte float).
    Double,
    /// Decimal with precision and scale.
    Decimal {
        /// Total number of digits.
        precision: Option<u16>,
        /// Number of digits after decimal point.
        scale: Option<u16>,
    },
    /// Numeric (alias for Decimal).
    Numeric {
        /// Total number of digits.
        precision: Option<u16>,
        /// Number of digits after decimal point.
        scale: Option<u16>,
    },

    // String types
    /// Fixed-length character string.
    Char(Option<u32>),
    /// Variable-length character string.
    Varchar(Option<u32>),
    /// Text (variable length, no limit).
    Text,

    // Binary types
    /// Binary large object.
    Blob,
    /// Fixed-length binary string.
    Binary(Option<u32>),
    /// Variable-length binary string.
    Varbinary(Option<u32>),

    // Date/time types
    /// Date.
    Date,
    /// Time.
    Time,
    /// Timestamp.
    Timestamp,
    /// Date and time.
    Datetime,

    /// Boolean.
    Boolean,

    // Structured types
    /// JSON document.
    Json,
    /// Binary JSON document.
    Jsonb,
    /// UUID.
    Uuid,
    /// Spatial geometry.
    Geometry,
    /// Enumerated string values.
    Enum(Vec<String>),
    /// Array of another type.
    Array(Box<DataType>),

    /// Raw type text passed through verbatim.
    Custom(String),
}

impl DataType {
    /// Creates an ENUM type from its values.
    #[must_use]
    pub fn enumeration<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Enum(values.into_iter().map(Into::into).collect())
    }

    /// Creates an ARRAY type.
    #[must_use]
    pub fn array(inner: Self) -> Self {
        Self::Array(Box::new(inner))
    }

    /// Large-object types that some engines refuse a DEFAULT on.
    #[must_use]
    pub const fn is_large_object(&self) -> bool {
        matches!(self, Self::Blob | Self::Text | Self::Geometry | Self::Json)
    }

    /// Binary string types (`BINARY(n)`, `VARBINARY(n)`).
    #[must_use]
    pub const fn is_binary_string(&self) -> bool {
        matches!(self, Self::Binary(_) | Self::Varbinary(_))
    }

    /// Returns true for ENUM types.
    #[must_use]
    pub const fn is_enum(&self) -> bool {
        matches!(self, Self::Enum(_))
    }

    /// Values of an ENUM, or of the ENUM held by an ARRAY.
    #[must_use]
    pub fn enum_values(&self) -> Option<&[String]> {
        match self {
            Self::Enum(values) => Some(values),
            Self::Array(inner) => match inner.as_ref() {
                Self::Enum(values) => Some(values),
                _ => None,
            },
            _ => None,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Smallint => f.write_str("SMALLINT"),
            Self::Integer => f.write_str("INTEGER"),
            Self::Bigint => f.write_str("BIGINT"),
            Self::Real => f.write_str("REAL"),
            Self::Double => f.write_str("DOUBLE"),
            Self::Decimal { .. } => f.write_str("DECIMAL"),
            Self::Numeric { .. } => f.write_str("NUMERIC"),
            Self::Char(_) => f.write_str("CHAR"),
            Self::Varchar(_) => f.write_str("VARCHAR"),
            Self::Text => f.write_str("TEXT"),
            Self::Blob => f.write_str("BLOB"),
            Self::Binary(_) => f.write_str("BINARY"),
            Self::Varbinary(_) => f.write_str("VARBINARY"),
            Self::Date => f.write_str("DATE"),
            Self::Time => f.write_str("TIME"),
            Self::Timestamp => f.write_str("TIMESTAMP"),
            Self::Datetime => f.write_str("DATETIME"),
            Self::Boolean => f.write_str("BOOLEAN"),
            Self::Json => f.write_str("JSON"),
            Self::Jsonb => f.write_str("JSONB"),
            Self::Uuid => f.write_str("UUID"),
            Self::Geometry => f.write_str("GEOMETRY"),
            Self::Enum(_) => f.write_str("ENUM"),
            Self::Array(inner) => write!(f, "{inner}[]"),
            Self::Custom(name) => f.write_str(name),
        }
    }
}

/// Renders `NAME(p, s)` / `NAME(p)` / `NAME` for precision-scale types.
pub(crate) fn with_precision(name: &str, precision: Option<u16>, scale: Option<u16>) -> String {
    match (precision, scale) {
        (Some(p), Some(s)) => format!("{name}({p}, {s})"),
        (Some(p), None) => format!("{name}({p})"),
        _ => name.to_string(),
    }
}

/// Renders `NAME(n)` or `NAME` for length-bounded types.
pub(crate) fn with_length(name: &str, length: Option<u32>) -> String {
    match length {
        Some(n) => format!("{name}({n})"),
        None => name.to_string(),
    }
}
