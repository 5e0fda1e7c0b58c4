//! WHERE-clause condition types for the visual query builder.
//!
//! This module provides [`Op`] (a closed set of comparison operators) and
//! [`ConditionSpec`] (one `column OP value` row of the builder). Operator text
//! in generated SQL always comes from [`Op::as_sql`], never from user input.

use crate::builder::resolve::Resolver;
use crate::value::quote;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Comparison operator of a builder condition.
///
/// # Example
/// ```ignore
/// use datalens::Op;
///
/// assert_eq!(Op::parse("NOT LIKE"), Some(Op::NotLike));
/// assert_eq!(Op::NotLike.as_sql(), "NOT LIKE");
/// assert_eq!(Op::parse("; DROP"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Op {
    /// Equal: column = value
    #[default]
    Eq,
    /// Not equal: column != value
    Ne,
    /// Less than: column < value
    Lt,
    /// Greater than: column > value
    Gt,
    /// Less than or equal: column <= value
    Lte,
    /// Greater than or equal: column >= value
    Gte,
    /// LIKE pattern match
    Like,
    /// NOT LIKE pattern match
    NotLike,
    /// IN (comma separated list)
    In,
    /// IS NULL (value ignored)
    IsNull,
    /// IS NOT NULL (value ignored)
    IsNotNull,
}

impl Op {
    /// Every operator, in the order the builder offers them.
    pub const ALL: [Op; 11] = [
        Op::Eq,
        Op::Ne,
        Op::Lt,
        Op::Gt,
        Op::Lte,
        Op::Gte,
        Op::Like,
        Op::NotLike,
        Op::In,
        Op::IsNull,
        Op::IsNotNull,
    ];

    /// The SQL keyword for this operator.
    pub fn as_sql(self) -> &'static str {
        match self {
            Op::Eq => "=",
            Op::Ne => "!=",
            Op::Lt => "<",
            Op::Gt => ">",
            Op::Lte => "<=",
            Op::Gte => ">=",
            Op::Like => "LIKE",
            Op::NotLike => "NOT LIKE",
            Op::In => "IN",
            Op::IsNull => "IS NULL",
            Op::IsNotNull => "IS NOT NULL",
        }
    }

    /// Look up an operator by its exact SQL spelling.
    pub fn parse(s: &str) -> Option<Op> {
        Op::ALL.into_iter().find(|op| op.as_sql() == s)
    }

    /// Whether the operator ignores the condition value.
    pub fn is_unary(self) -> bool {
        matches!(self, Op::IsNull | Op::IsNotNull)
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl FromStr for Op {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Op::parse(s).ok_or_else(|| format!("unknown operator: {s:?}"))
    }
}

impl TryFrom<String> for Op {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Op> for String {
    fn from(op: Op) -> Self {
        op.as_sql().to_string()
    }
}

/// One condition row: `column OP value`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConditionSpec {
    /// Column of the main table.
    pub column: String,
    pub op: Op,
    /// Raw value text. Comma list for `IN`; ignored for the NULL checks.
    #[serde(default)]
    pub value: String,
}

impl ConditionSpec {
    pub fn new(column: impl Into<String>, op: Op, value: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            op,
            value: value.into(),
        }
    }

    /// Render the condition, or `None` if it contributes nothing.
    ///
    /// A condition is dropped when its column sanitizes to empty, or when an
    /// `IN` list has no non-blank items.
    pub(crate) fn render(&self, resolver: &Resolver<'_>) -> Option<String> {
        let column = resolver.bare(&self.column)?;
        match self.op {
            Op::IsNull | Op::IsNotNull => Some(format!("{} {}", column, self.op.as_sql())),
            Op::In => {
                let items: Vec<String> = self
                    .value
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(quote)
                    .collect();
                if items.is_empty() {
                    tracing::debug!(
                        target: "datalens.sql",
                        column = %self.column,
                        "dropping IN condition with an empty list"
                    );
                    return None;
                }
                Some(format!("{} IN ({})", column, items.join(", ")))
            }
            op => Some(format!("{} {} {}", column, op.as_sql(), quote(&self.value))),
        }
    }
}
