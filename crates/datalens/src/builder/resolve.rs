//! Table alias assignment and column qualification.
//!
//! Within one generated statement the main table is `t0` and the `i`-th join
//! is `t{i+1}`. The main table only carries its alias when at least one join
//! is declared; a single-table query stays unqualified.

use super::join::{JoinSpec, TableRef};
use crate::ident::{Ident, sanitize};

/// Resolves column references against a main table and its joins.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    main_table: &'a str,
    joins: &'a [JoinSpec],
}

impl<'a> Resolver<'a> {
    pub fn new(main_table: &'a str, joins: &'a [JoinSpec]) -> Self {
        Self { main_table, joins }
    }

    /// Declared joins count, including joins later skipped for a blank table.
    pub fn has_joins(&self) -> bool {
        !self.joins.is_empty()
    }

    /// Alias for a table reference, `None` for the main table of a single-table query.
    pub fn alias(&self, table: TableRef) -> Option<String> {
        match table {
            TableRef::Main if !self.has_joins() => None,
            other => Some(other.alias()),
        }
    }

    /// `` `alias`.`column` `` for a reference, or `None` if the column sanitizes to empty.
    pub fn column(&self, table: TableRef, column: &str) -> Option<String> {
        let column = Ident::new(column);
        if column.is_empty() {
            return None;
        }
        Some(qualify(self.alias(table).as_deref(), &column))
    }

    /// A bare main-table column, qualified with `t0` only when joins exist.
    pub fn bare(&self, column: &str) -> Option<String> {
        self.column(TableRef::Main, column)
    }

    /// Resolve a picker label: `column` or `table.column`.
    ///
    /// The table part is matched case-insensitively against the main table,
    /// then each join's related table in declaration order. When nothing
    /// matches, the sanitized table text itself is used as the qualifier,
    /// which may name an alias that does not exist in the statement.
    pub fn dotted(&self, label: &str) -> Option<String> {
        if label.trim().is_empty() {
            return None;
        }
        let parts: Vec<&str> = label.split('.').collect();
        match parts.as_slice() {
            [column] => self.bare(column),
            [table, column] => {
                let table = table.trim();
                let column = Ident::new(column);
                if column.is_empty() {
                    return None;
                }
                if eq_ignore_case(table, self.main_table) {
                    return Some(qualify(self.alias(TableRef::Main).as_deref(), &column));
                }
                if let Some(i) = self
                    .joins
                    .iter()
                    .position(|j| eq_ignore_case(table, &j.table))
                {
                    return Some(qualify(Some(&TableRef::Join(i).alias()), &column));
                }
                // Unmatched table text is used verbatim (sanitized) as the
                // alias; the statement has no such alias.
                tracing::debug!(
                    target: "datalens.sql",
                    label,
                    "no table matches qualifier; using it as an alias"
                );
                Some(qualify(Some(&sanitize(table)), &column))
            }
            _ => None,
        }
    }
}

fn qualify(alias: Option<&str>, column: &Ident) -> String {
    let mut out = String::new();
    if let Some(alias) = alias {
        out.push('`');
        out.push_str(alias);
        out.push_str("`.");
    }
    column.write_sql(&mut out);
    out
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}
