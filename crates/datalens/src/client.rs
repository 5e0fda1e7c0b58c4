//! Connector trait for the database the generated SQL runs against.
//!
//! datalens never opens connections itself. The surrounding application
//! implements [`Connector`] over whatever driver it uses and hands it to
//! [`run_batch`](crate::batch::run_batch) or
//! [`load_column_options`](crate::columns::load_column_options).

use crate::error::LensResult;
use crate::row::ResultSet;

/// What a single statement produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Execution {
    /// The statement returned a result set.
    Rows(ResultSet),
    /// The statement completed without a result set.
    Completed {
        /// Rows affected, when the driver reports it.
        affected: Option<u64>,
    },
}

impl Execution {
    /// The result set, if the statement returned one.
    pub fn rows(&self) -> Option<&ResultSet> {
        match self {
            Execution::Rows(rs) => Some(rs),
            Execution::Completed { .. } => None,
        }
    }
}

/// Schema lookup and statement execution.
///
/// Implementations own blocking, cancellation and timeouts. Errors should be
/// returned as [`LensError::Execution`](crate::error::LensError::Execution)
/// carrying the driver's message.
pub trait Connector: Send + Sync {
    /// Column names of `table`, in table order.
    fn columns_of(
        &self,
        table: &str,
    ) -> impl std::future::Future<Output = LensResult<Vec<String>>> + Send;

    /// Primary-key column names of `table`, in key order. Empty when the
    /// table has no primary key.
    fn primary_key_of(
        &self,
        table: &str,
    ) -> impl std::future::Future<Output = LensResult<Vec<String>>> + Send;

    /// Execute one statement.
    fn execute(
        &self,
        sql: &str,
    ) -> impl std::future::Future<Output = LensResult<Execution>> + Send;
}
