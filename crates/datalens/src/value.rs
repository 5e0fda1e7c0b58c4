//! Literal quoting for values typed into the UI.
//!
//! The quoter is a text heuristic and knows nothing about column types:
//! anything that reads as a number is emitted bare, even when it is compared
//! against a text column.

/// Render a raw string as a SQL literal.
///
/// - `""` becomes the bare keyword `NULL`
/// - integers and floating-point numbers are emitted unquoted, as typed;
///   group separators (`1,000`), a trailing sign (`5-`), parentheses (`(5)`)
///   and `Infinity`/`NaN` all count as numbers
/// - everything else is single-quoted, with `\` and `'` doubled
pub fn quote(value: &str) -> String {
    if value.is_empty() {
        return "NULL".to_string();
    }
    if is_numeric(value) {
        return value.to_string();
    }
    let escaped = value.replace('\\', "\\\\").replace('\'', "''");
    let mut out = String::with_capacity(escaped.len() + 2);
    out.push('\'');
    out.push_str(&escaped);
    out.push('\'');
    out
}

/// [`quote`] for a value that may be absent; `None` is `NULL`.
pub fn quote_opt(value: Option<&str>) -> String {
    quote(value.unwrap_or(""))
}

fn is_numeric(value: &str) -> bool {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return false;
    }
    if trimmed.parse::<i64>().is_ok() {
        return true;
    }

    let unsigned = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
    if unsigned.eq_ignore_ascii_case("infinity") || unsigned.eq_ignore_ascii_case("nan") {
        return true;
    }

    // One sign, leading or trailing, or parentheses for a negative amount.
    if let Some(inner) = trimmed.strip_prefix('(').and_then(|s| s.strip_suffix(')')) {
        return decimal_body(inner);
    }
    let body = match trimmed.strip_prefix(['+', '-']) {
        Some(rest) => rest,
        None => trimmed.strip_suffix(['+', '-']).unwrap_or(trimmed),
    };
    decimal_body(body)
}

/// Unsigned decimal with optional `,` group separators, fraction and exponent.
fn decimal_body(body: &str) -> bool {
    let (mantissa, exponent) = match body.find(['e', 'E']) {
        Some(at) => (&body[..at], Some(&body[at + 1..])),
        None => (body, None),
    };
    let (integer, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));

    let integer_ok = integer.is_empty()
        || (integer.starts_with(|c: char| c.is_ascii_digit())
            && integer.chars().all(|c| c.is_ascii_digit() || c == ','));
    let fraction_ok = fraction.chars().all(|c| c.is_ascii_digit());
    let has_digit = integer.chars().any(|c| c.is_ascii_digit()) || !fraction.is_empty();
    let exponent_ok = exponent.is_none_or(|e| {
        let digits = e.strip_prefix(['+', '-']).unwrap_or(e);
        !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
    });

    integer_ok && fraction_ok && has_digit && exponent_ok
}
