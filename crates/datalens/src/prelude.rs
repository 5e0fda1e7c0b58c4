//! Convenient imports for typical `datalens` usage.
//!
//! ```ignore
//! use datalens::prelude::*;
//! ```

pub use crate::{
    Connector, EditRowSpec, Execution, JoinSpec, LensError, LensResult, Op, OrderDir, QuerySpec,
    ResultSet, RunConfig, TableRef, generate_select, generate_update, run_sql,
    split_and_validate,
};
