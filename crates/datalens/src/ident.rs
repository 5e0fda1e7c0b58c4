//! Identifier sanitizing.
//!
//! Every table and column name that ends up inside generated SQL goes through
//! [`sanitize`] first and is then wrapped in backticks. Sanitizing keeps only
//! letters, digits and `_`, so the result can never close the backtick quote or
//! smuggle in SQL.
//!
//! # Example
//! ```ignore
//! use datalens::ident::{sanitize, Ident};
//!
//! assert_eq!(sanitize("user`s; DROP"), "usersDROP");
//! assert_eq!(Ident::new("order items").to_sql(), "`orderitems`");
//! ```

/// Strip every character that is not a letter, digit or underscore.
///
/// Order is preserved and the function is idempotent.
pub fn sanitize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect()
}

/// A sanitized SQL identifier (table, column or alias name).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Ident(String);

impl Ident {
    /// Sanitize `raw` into an identifier. The result may be empty.
    pub fn new(raw: &str) -> Self {
        Self(sanitize(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Render as a backtick-quoted identifier.
    pub fn to_sql(&self) -> String {
        let mut out = String::with_capacity(self.0.len() + 2);
        self.write_sql(&mut out);
        out
    }

    pub(crate) fn write_sql(&self, out: &mut String) {
        out.push('`');
        out.push_str(&self.0);
        out.push('`');
    }
}

impl std::fmt::Display for Ident {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
