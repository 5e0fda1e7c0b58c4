use crate::error::{LensError, LensResult, Rejection};
use crate::ident::Ident;
use crate::row::ResultSet;
use crate::value::quote;
use serde::{Deserialize, Serialize};

/// One column of a row being edited.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EditCell {
    pub column: String,
    /// Value as read from the database; `None` is SQL NULL.
    #[serde(default)]
    pub original: Option<String>,
    /// Value as it was displayed (`""` for NULL).
    #[serde(default)]
    pub original_display: String,
    /// Value in the edit box.
    #[serde(default)]
    pub edited: String,
}

impl EditCell {
    /// A cell whose edit box starts out holding the original display value.
    pub fn new(column: impl Into<String>, original: Option<String>) -> Self {
        let display = original.clone().unwrap_or_default();
        Self {
            column: column.into(),
            original,
            original_display: display.clone(),
            edited: display,
        }
    }

    /// Whether the edit box differs from what was displayed (exact comparison).
    pub fn is_changed(&self) -> bool {
        self.original_display != self.edited
    }
}

/// An edited row plus what is needed to address it with a single UPDATE.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EditRowSpec {
    pub table: String,
    pub cells: Vec<EditCell>,
    /// Primary-key columns in key order.
    #[serde(default)]
    pub primary_key: Vec<String>,
    /// Columns that belong to `table`. When set, only these may appear in SET;
    /// cells from joined tables are display-only.
    #[serde(default)]
    pub table_columns: Option<Vec<String>>,
}

impl EditRowSpec {
    pub fn new(table: impl Into<String>, cells: Vec<EditCell>, primary_key: Vec<String>) -> Self {
        Self {
            table: table.into(),
            cells,
            primary_key,
            table_columns: None,
        }
    }

    /// Build cells from one row of a result set; every edit box starts unchanged.
    pub fn from_result_row(
        table: impl Into<String>,
        result: &ResultSet,
        row: usize,
        primary_key: Vec<String>,
    ) -> LensResult<Self> {
        let values = result.row(row).ok_or_else(|| {
            LensError::validation(format!(
                "row {row} out of range ({} row(s))",
                result.row_count()
            ))
        })?;
        let cells = result
            .columns
            .iter()
            .zip(values)
            .map(|(column, value)| EditCell::new(column.clone(), value.clone()))
            .collect();
        Ok(Self::new(table, cells, primary_key))
    }

    /// Restrict SET to the given columns.
    pub fn with_table_columns(mut self, columns: Vec<String>) -> Self {
        self.table_columns = Some(columns);
        self
    }

    /// Type a new value into a cell. Unknown columns are ignored.
    pub fn set(&mut self, column: &str, value: impl Into<String>) -> &mut Self {
        if let Some(cell) = self.cells.iter_mut().find(|c| c.column == column) {
            cell.edited = value.into();
        }
        self
    }

    fn is_writable(&self, column: &str) -> bool {
        match &self.table_columns {
            Some(cols) => cols.iter().any(|c| c == column),
            None => true,
        }
    }

    /// Cells that will be written.
    pub fn changed_cells(&self) -> impl Iterator<Item = &EditCell> {
        self.cells
            .iter()
            .filter(|c| c.is_changed() && self.is_writable(&c.column))
    }

    /// Generate the UPDATE statement.
    ///
    /// Rejected when nothing changed or the table has no primary key. The
    /// WHERE clause always uses the values the row had before editing, so a
    /// row whose key was edited is still found.
    pub fn to_sql(&self) -> LensResult<String> {
        let set_parts: Vec<String> = self
            .changed_cells()
            .map(|cell| format!("{} = {}", Ident::new(&cell.column).to_sql(), quote(&cell.edited)))
            .collect();
        if set_parts.is_empty() {
            return Err(Rejection::NoChanges.into());
        }
        if self.primary_key.is_empty() {
            return Err(Rejection::NoPrimaryKey.into());
        }

        let where_parts: Vec<String> = self
            .primary_key
            .iter()
            .map(|pk| {
                let col = Ident::new(pk).to_sql();
                match self.cells.iter().find(|c| c.column == *pk) {
                    Some(cell) if cell.original.is_some() => {
                        format!("{} = {}", col, quote(&cell.original_display))
                    }
                    _ => format!("{col} IS NULL"),
                }
            })
            .collect();

        let mut sql = String::from("UPDATE ");
        Ident::new(&self.table).write_sql(&mut sql);
        sql.push_str(" SET ");
        sql.push_str(&set_parts.join(", "));
        sql.push_str(" WHERE ");
        sql.push_str(&where_parts.join(" AND "));

        tracing::debug!(target: "datalens.sql", sql = %sql, "generated update");
        Ok(sql)
    }
}

/// Generate the UPDATE statement for an edited row.
pub fn generate_update(spec: &EditRowSpec) -> LensResult<String> {
    spec.to_sql()
}
