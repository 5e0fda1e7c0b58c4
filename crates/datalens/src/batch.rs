//! Sequential execution of statement batches.
//!
//! Statements run one at a time in input order; each is awaited before the
//! next starts. A failing statement is reported in its own
//! [`StatementOutcome`] and does not stop the rest of the batch.

use crate::check::{split_and_validate, split_statements};
use crate::client::{Connector, Execution};
use crate::config::RunConfig;
use crate::error::{LensError, LensResult, Rejection};

/// The result of one statement of a batch.
#[derive(Debug)]
pub struct StatementOutcome {
    /// 1-based position within the batch.
    pub index: usize,
    pub sql: String,
    pub result: LensResult<Execution>,
}

impl StatementOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    /// Status line shown under the statement's result tab.
    pub fn message(&self) -> String {
        match &self.result {
            Ok(Execution::Rows(rs)) => format!("Returned {} row(s).", rs.row_count()),
            Ok(Execution::Completed { .. }) => "Executed successfully.".to_string(),
            Err(LensError::Execution(msg)) => format!("Error: {msg}"),
            Err(err) => format!("Error: {err}"),
        }
    }
}

/// Run statements in order, logging with the default [`RunConfig`].
pub async fn run_batch<C, S>(connector: &C, statements: &[S]) -> Vec<StatementOutcome>
where
    C: Connector,
    S: AsRef<str>,
{
    execute_in_order(connector, statements, &RunConfig::default()).await
}

/// Split raw text and run it under `config`.
///
/// In read-only mode the whole batch is refused if any statement is not a
/// SELECT; nothing is executed in that case.
pub async fn run_sql<C: Connector>(
    connector: &C,
    raw: &str,
    config: &RunConfig,
) -> LensResult<Vec<StatementOutcome>> {
    let statements = if config.read_only {
        split_and_validate(raw)?
    } else {
        let statements = split_statements(raw);
        if statements.is_empty() {
            return Err(Rejection::EmptyInput.into());
        }
        statements
    };
    Ok(execute_in_order(connector, &statements, config).await)
}

async fn execute_in_order<C, S>(
    connector: &C,
    statements: &[S],
    config: &RunConfig,
) -> Vec<StatementOutcome>
where
    C: Connector,
    S: AsRef<str>,
{
    let mut outcomes = Vec::with_capacity(statements.len());
    for (i, statement) in statements.iter().enumerate() {
        let sql = statement.as_ref();
        let index = i + 1;
        let result = connector.execute(sql).await;
        match &result {
            Ok(Execution::Rows(rs)) => tracing::info!(
                target: "datalens.sql",
                index,
                sql = %config.log_sql(sql),
                rows = rs.row_count(),
                "statement returned rows"
            ),
            Ok(Execution::Completed { affected }) => tracing::info!(
                target: "datalens.sql",
                index,
                sql = %config.log_sql(sql),
                affected = ?affected,
                "statement executed"
            ),
            Err(err) => tracing::warn!(
                target: "datalens.sql",
                index,
                sql = %config.log_sql(sql),
                error = %err,
                "statement failed"
            ),
        }
        outcomes.push(StatementOutcome {
            index,
            sql: sql.to_string(),
            result,
        });
    }
    outcomes
}
