//! Identifier quoting and literal escaping.

use core::fmt::Write as _;

use crate::error::{QueryGenerationError, Result};
use crate::table::TableName;
use crate::value::DefaultValue;

/// How single quotes and control characters inside string literals are
/// escaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringEscape {
    /// `'` becomes `''`; everything else is literal.
    DoubledQuote,
    /// MySQL-style backslash escapes (`\0 \n \r \b \t \Z \' \\`).
    Backslash,
}

/// How binary literals are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlobLiteral {
    /// `X'0a0b'`
    HexX,
    /// `'\x0a0b'`
    ByteaHex,
}

/// Quotes identifiers and escapes literal values for one dialect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierQuoter {
    open: char,
    close: char,
    string_escape: StringEscape,
    blob_literal: BlobLiteral,
    boolean_literals: bool,
    parenthesize_expressions: bool,
    schemas: bool,
}

impl IdentifierQuoter {
    /// Creates a quoter using `open`/`close` as identifier delimiters.
    #[must_use]
    pub const fn new(open: char, close: char) -> Self {
        Self {
            open,
            close,
            string_escape: StringEscape::DoubledQuote,
            blob_literal: BlobLiteral::HexX,
            boolean_literals: true,
            parenthesize_expressions: false,
            schemas: true,
        }
    }

    /// Sets the string escaping style.
    #[must_use]
    pub const fn string_escape(mut self, style: StringEscape) -> Self {
        self.string_escape = style;
        self
    }

    /// Sets the binary literal style.
    #[must_use]
    pub const fn blob_literal(mut self, style: BlobLiteral) -> Self {
        self.blob_literal = style;
        self
    }

    /// Whether `true`/`false` are native literals (otherwise `1`/`0`).
    #[must_use]
    pub const fn boolean_literals(mut self, native: bool) -> Self {
        self.boolean_literals = native;
        self
    }

    /// Whether expression defaults are wrapped in parentheses.
    #[must_use]
    pub const fn parenthesize_expressions(mut self, wrap: bool) -> Self {
        self.parenthesize_expressions = wrap;
        self
    }

    /// Whether schema-qualified names are rendered as `schema.table`.
    #[must_use]
    pub const fn schemas(mut self, supported: bool) -> Self {
        self.schemas = supported;
        self
    }

    /// Quotes an identifier, doubling any embedded closing delimiter.
    #[must_use]
    pub fn quote_identifier(&self, name: &str) -> String {
        let mut quoted = String::with_capacity(name.len() + 2);
        quoted.push(self.open);
        for c in name.chars() {
            if c == self.close {
                quoted.push(c);
            }
            quoted.push(c);
        }
        quoted.push(self.close);
        quoted
    }

    /// Quotes a possibly schema-qualified table name.
    ///
    /// Without schema support, `schema.table` is quoted as a single
    /// identifier.
    #[must_use]
    pub fn quote_table(&self, table: &TableName) -> String {
        match &table.schema {
            Some(schema) if self.schemas => format!(
                "{}.{}",
                self.quote_identifier(schema),
                self.quote_identifier(&table.table_name)
            ),
            Some(schema) => self.quote_identifier(&format!("{schema}.{}", table.table_name)),
            None => self.quote_identifier(&table.table_name),
        }
    }

    /// Escapes a string literal, quotes included.
    #[must_use]
    pub fn escape_string(&self, value: &str) -> String {
        let mut escaped = String::with_capacity(value.len() + 2);
        escaped.push('\'');
        match self.string_escape {
            StringEscape::DoubledQuote => {
                for c in value.chars() {
                    if c == '\'' {
                        escaped.push('\'');
                    }
                    escaped.push(c);
                }
            }
            StringEscape::Backslash => {
                for c in value.chars() {
                    match c {
                        '\0' => escaped.push_str("\\0"),
                        '\n' => escaped.push_str("\\n"),
                        '\r' => escaped.push_str("\\r"),
                        '\u{8}' => escaped.push_str("\\b"),
                        '\t' => escaped.push_str("\\t"),
                        '\u{1a}' => escaped.push_str("\\Z"),
                        '\'' | '\\' => {
                            escaped.push('\\');
                            escaped.push(c);
                        }
                        _ => escaped.push(c),
                    }
                }
            }
        }
        escaped.push('\'');
        escaped
    }

    /// Escapes a binary literal.
    #[must_use]
    pub fn escape_bytes(&self, bytes: &[u8]) -> String {
        let mut hex = String::with_capacity(bytes.len() * 2);
        for byte in bytes {
            let _ = write!(hex, "{byte:02x}");
        }
        match self.blob_literal {
            BlobLiteral::HexX => format!("X'{hex}'"),
            BlobLiteral::ByteaHex => format!("'\\x{hex}'"),
        }
    }

    /// Renders a boolean literal.
    #[must_use]
    pub const fn escape_bool(&self, value: bool) -> &'static str {
        match (self.boolean_literals, value) {
            (true, true) => "true",
            (true, false) => "false",
            (false, true) => "1",
            (false, false) => "0",
        }
    }

    /// Renders a column default.
    ///
    /// # Errors
    ///
    /// Returns [`QueryGenerationError::NonFiniteDefault`] for NaN and
    /// infinite floats, which have no SQL literal.
    pub fn escape_default(&self, value: &DefaultValue) -> Result<String> {
        let literal = match value {
            DefaultValue::Null => String::from("NULL"),
            DefaultValue::Boolean(b) => self.escape_bool(*b).to_string(),
            DefaultValue::Integer(i) => i.to_string(),
            DefaultValue::Float(f) if !f.is_finite() => {
                return Err(QueryGenerationError::NonFiniteDefault(*f));
            }
            DefaultValue::Float(f) => f.to_string(),
            DefaultValue::String(s) => self.escape_string(s),
            DefaultValue::Bytes(bytes) => self.escape_bytes(bytes),
            DefaultValue::Json(json) => self.escape_string(&json.to_string()),
            DefaultValue::Expression(expr) => {
                if self.parenthesize_expressions {
                    format!("({expr})")
                } else {
                    expr.clone()
                }
            }
        };
        Ok(literal)
    }
}
