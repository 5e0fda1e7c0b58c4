//! Visual query builder SQL generation.
//!
//! Turns the builder's structured state into MySQL text with every identifier
//! sanitized and backtick-quoted and every value rendered by
//! [`quote`](crate::value::quote).
//!
//! ## Design
//!
//! - SELECT generation is total: bad input drops the clause it belongs to.
//! - UPDATE generation is refused unless something changed and the table has a
//!   primary key; the row is always addressed by its pre-edit key.
//! - Generators only produce text. Executing it is the caller's decision.

pub mod join;
pub mod resolve;
pub mod select;
pub mod update;

pub use join::{JoinKind, JoinSpec, OrderDir, SelectedColumn, TableRef};
pub use resolve::Resolver;
pub use select::{MAX_LIMIT, QuerySpec, generate_select};
pub use update::{EditCell, EditRowSpec, generate_update};

#[cfg(test)]
mod tests;
