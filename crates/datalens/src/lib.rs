//! # datalens
//!
//! SQL generation and statement handling for a MySQL browsing tool.
//!
//! ## Features
//!
//! - **Visual query builder**: structured [`QuerySpec`] → `SELECT` text with sanitized identifiers
//! - **Positional aliases**: main table `t0`, joins `t1`, `t2`, ... whenever a join exists
//! - **Safe row edits**: [`EditRowSpec`] → single-row `UPDATE` keyed on pre-edit primary-key values
//! - **Read-only panel**: split raw input into statements and refuse anything that is not `SELECT`
//! - **Sequential batches**: run statements one at a time with a separate outcome each
//! - **Snapshots**: [`SavedQueryBuilder`] persists a builder as flat camelCase JSON
//!
//! ## Query builder
//!
//! ```ignore
//! use datalens::{JoinSpec, OrderDir, QuerySpec, TableRef, generate_select};
//!
//! let mut spec = QuerySpec::new("users");
//! spec.join(JoinSpec::left("orders").on(TableRef::Main, "id", "user_id"))?;
//! spec.select_column(TableRef::Main, "id")?
//!     .select_column(TableRef::Join(0), "total")?;
//! spec.order_by("orders.total", OrderDir::Desc).limit("100");
//!
//! assert_eq!(
//!     generate_select(&spec),
//!     "SELECT `t0`.`id`, `t1`.`total` FROM `users` t0 \
//!      LEFT JOIN `orders` t1 ON `t0`.`id` = `t1`.`user_id` \
//!      ORDER BY `t1`.`total` DESC LIMIT 100"
//! );
//! ```
//!
//! ## Raw SQL
//!
//! ```ignore
//! use datalens::{RunConfig, run_sql};
//!
//! let outcomes = run_sql(&connector, "SELECT 1; SELECT 2", &RunConfig::default()).await?;
//! for outcome in &outcomes {
//!     println!("#{} {}", outcome.index, outcome.message());
//! }
//! ```

pub mod batch;
pub mod builder;
pub mod check;
pub mod client;
pub mod columns;
pub mod condition;
pub mod config;
pub mod error;
pub mod ident;
pub mod row;
pub mod saved;
pub mod value;

pub mod prelude;

pub use batch::{StatementOutcome, run_batch, run_sql};
pub use builder::{
    EditCell, EditRowSpec, JoinKind, JoinSpec, MAX_LIMIT, OrderDir, QuerySpec, Resolver,
    SelectedColumn, TableRef, generate_select, generate_update,
};
pub use check::{
    is_select, split_and_validate, split_statements, table_name_from_sql, validate_read_only,
};
pub use client::{Connector, Execution};
pub use columns::{ColumnOption, column_options, load_column_options};
pub use condition::{ConditionSpec, Op};
pub use config::RunConfig;
pub use error::{LensError, LensResult, Rejection};
pub use ident::{Ident, sanitize};
pub use row::{ResultSet, Row};
pub use saved::{SavedCondition, SavedJoin, SavedQueryBuilder};
pub use value::quote;
