//! Column picker entries for projection, GROUP BY and ORDER BY.

use crate::builder::{QuerySpec, TableRef};
use crate::client::Connector;
use crate::error::LensResult;

/// One selectable column of the builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnOption {
    pub table_ref: TableRef,
    pub table_name: String,
    pub column: String,
    /// `column` for the main table, `table.column` for a join.
    pub label: String,
}

/// Enumerate picker entries: main-table columns first, then each join's.
///
/// `joins` pairs each declared join's related table with its columns, in
/// declaration order.
pub fn column_options(
    main_table: &str,
    main_columns: &[String],
    joins: &[(String, Vec<String>)],
) -> Vec<ColumnOption> {
    let main = main_columns.iter().map(|column| ColumnOption {
        table_ref: TableRef::Main,
        table_name: main_table.to_string(),
        column: column.clone(),
        label: column.clone(),
    });
    let joined = joins.iter().enumerate().flat_map(|(i, (table, columns))| {
        columns.iter().map(move |column| ColumnOption {
            table_ref: TableRef::Join(i),
            table_name: table.clone(),
            column: column.clone(),
            label: format!("{table}.{column}"),
        })
    });
    main.chain(joined).collect()
}

/// Fetch columns for the spec's tables and enumerate picker entries.
///
/// Lookups run one at a time. Joins with a blank table contribute no
/// columns but keep their position.
pub async fn load_column_options<C: Connector>(
    connector: &C,
    spec: &QuerySpec,
) -> LensResult<Vec<ColumnOption>> {
    let main_columns = if spec.table().trim().is_empty() {
        Vec::new()
    } else {
        connector.columns_of(spec.table()).await?
    };
    let mut joins = Vec::with_capacity(spec.joins().len());
    for join in spec.joins() {
        let columns = if join.table.trim().is_empty() {
            Vec::new()
        } else {
            connector.columns_of(&join.table).await?
        };
        joins.push((join.table.clone(), columns));
    }
    Ok(column_options(spec.table(), &main_columns, &joins))
}
