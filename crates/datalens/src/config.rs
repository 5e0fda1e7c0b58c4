/// Settings for running raw SQL through [`run_sql`](crate::batch::run_sql).
///
/// By default the runner is read-only and truncates logged SQL to 200 bytes.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Refuse batches containing anything but SELECT statements.
    pub read_only: bool,
    /// Truncate SQL in log events. `None` means no truncation.
    pub max_sql_log_length: Option<usize>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            read_only: true,
            max_sql_log_length: Some(200),
        }
    }
}

impl RunConfig {
    /// Create a new configuration with defaults (read-only, 200-byte log SQL).
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow or refuse non-SELECT statements.
    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Set maximum SQL length to log.
    pub fn max_sql_log_length(mut self, len: usize) -> Self {
        self.max_sql_log_length = Some(len);
        self
    }

    /// Log SQL in full.
    pub fn no_truncate(mut self) -> Self {
        self.max_sql_log_length = None;
        self
    }

    /// SQL as it should appear in a log event.
    pub fn log_sql(&self, sql: &str) -> String {
        match self.max_sql_log_length {
            Some(max) if sql.len() > max => format!("{}...", truncate_sql_bytes(sql, max)),
            _ => sql.to_string(),
        }
    }
}

/// Cut `sql` to at most `max_bytes`, backing off to a char boundary.
fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}
