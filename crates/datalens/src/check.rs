//! Raw SQL statement splitting and read-only checks.
//!
//! Checks are purely syntactic: statements are split on `;` and a
//! statement counts as a SELECT when its first keyword (after leading
//! comments) is `SELECT`. Nothing here parses SQL.
//!
//! # Example
//!
//! ```ignore
//! use datalens::check::{is_select, split_and_validate};
//!
//! assert!(is_select("/* report */ select 1"));
//! assert_eq!(split_and_validate("SELECT 1;").unwrap(), vec!["SELECT 1"]);
//! assert!(split_and_validate("SELECT 1; DROP TABLE x").is_err());
//! ```

use crate::error::{LensResult, Rejection};
use std::sync::OnceLock;

/// Split raw text into trimmed, non-empty statements.
///
/// A `;` inside a string literal also splits. When every part is empty but
/// the text is not blank (e.g. `";;"`), the whole trimmed text is returned as
/// a single statement.
pub fn split_statements(sql: &str) -> Vec<String> {
    let statements: Vec<String> = sql
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    if statements.is_empty() {
        let trimmed = sql.trim();
        if !trimmed.is_empty() {
            return vec![trimmed.to_string()];
        }
    }
    statements
}

/// Skip leading whitespace, `-- line` comments and `/* block */` comments.
///
/// Block comments do not nest; an unterminated one swallows the rest.
pub fn strip_leading_comments(statement: &str) -> &str {
    let mut s = statement.trim_start();
    loop {
        if let Some(rest) = s.strip_prefix("--") {
            s = match rest.find('\n') {
                Some(nl) => rest[nl + 1..].trim_start(),
                None => "",
            };
        } else if let Some(rest) = s.strip_prefix("/*") {
            s = match rest.find("*/") {
                Some(end) => rest[end + 2..].trim_start(),
                None => "",
            };
        } else {
            return s;
        }
    }
}

/// The first word of a statement after leading comments, upper-cased.
pub fn leading_keyword(statement: &str) -> Option<String> {
    let body = strip_leading_comments(statement);
    let word: String = body
        .chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_')
        .collect();
    if word.is_empty() {
        None
    } else {
        Some(word.to_uppercase())
    }
}

/// Whether a statement starts with `SELECT` (any case) after leading comments.
///
/// This is a prefix test: `WITH ... SELECT` is not a SELECT.
pub fn is_select(statement: &str) -> bool {
    let body = strip_leading_comments(statement);
    body.get(..6)
        .is_some_and(|head| head.eq_ignore_ascii_case("SELECT"))
}

/// Accept a batch only if every statement is a SELECT.
///
/// Rejection is all-or-nothing and lists the offending 1-based positions.
pub fn validate_read_only<S: AsRef<str>>(statements: &[S]) -> LensResult<()> {
    if statements.is_empty() {
        return Err(Rejection::EmptyInput.into());
    }
    let positions: Vec<usize> = statements
        .iter()
        .enumerate()
        .filter(|(_, s)| !is_select(s.as_ref()))
        .map(|(i, _)| i + 1)
        .collect();
    if positions.is_empty() {
        Ok(())
    } else {
        Err(Rejection::NonSelect { positions }.into())
    }
}

/// Split raw text and validate it for the read-only query panel.
pub fn split_and_validate(sql: &str) -> LensResult<Vec<String>> {
    let statements = split_statements(sql);
    validate_read_only(&statements)?;
    Ok(statements)
}

/// Best-effort name of the table a raw query reads from.
///
/// Returns the first `FROM <name>` in the text, which is only meaningful for
/// simple single-table selects.
pub fn table_name_from_sql(sql: &str) -> Option<String> {
    static FROM_RE: OnceLock<regex::Regex> = OnceLock::new();
    FROM_RE
        .get_or_init(|| {
            regex::Regex::new(r"(?is)\bFROM\s+`?(\w+)`?(?:\s|;|$)")
                .expect("invalid built-in FROM regex")
        })
        .captures(sql)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
