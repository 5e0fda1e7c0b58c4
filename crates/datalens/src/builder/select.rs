use super::join::{JoinSpec, OrderDir, SelectedColumn, TableRef};
use super::resolve::Resolver;
use crate::condition::{ConditionSpec, Op};
use crate::error::{LensError, LensResult};
use crate::ident::Ident;

/// Upper bound applied to any LIMIT the user types.
pub const MAX_LIMIT: i32 = 10_000;

/// Structured description of a SELECT built by the visual query builder.
///
/// Generation never fails: input that cannot be rendered drops the clause it
/// belongs to. Join references are validated when they are added, so every
/// [`TableRef::Join`] held by a spec points at a declared join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySpec {
    /// Main table
    table: String,
    /// Declared joins, aliased t1, t2, ... in this order
    joins: Vec<JoinSpec>,
    /// WHERE conditions, ANDed
    conditions: Vec<ConditionSpec>,
    /// `SELECT *` regardless of `columns`
    all_columns: bool,
    /// Explicit projection
    columns: Vec<SelectedColumn>,
    /// GROUP BY picker label
    group_by: Option<String>,
    /// Raw HAVING expression
    having: String,
    /// Raw text appended after HAVING (e.g. `UNION ALL SELECT ...`)
    union_tail: String,
    /// ORDER BY picker label and direction
    order_by: Option<(String, OrderDir)>,
    /// LIMIT as typed
    limit: Option<String>,
    distinct: bool,
}

impl QuerySpec {
    /// Create a spec selecting all columns of `table`.
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            joins: Vec::new(),
            conditions: Vec::new(),
            all_columns: true,
            columns: Vec::new(),
            group_by: None,
            having: String::new(),
            union_tail: String::new(),
            order_by: None,
            limit: None,
            distinct: false,
        }
    }

    // ==================== Joins & projection ====================

    /// Append a join.
    ///
    /// The ON clause may only reference the main table or a join declared
    /// before this one.
    pub fn join(&mut self, join: JoinSpec) -> LensResult<&mut Self> {
        self.check_ref(join.left)?;
        self.joins.push(join);
        Ok(self)
    }

    /// Add a column to the projection and switch off `SELECT *`.
    pub fn select_column(&mut self, table: TableRef, column: &str) -> LensResult<&mut Self> {
        self.check_ref(table)?;
        self.columns.push(SelectedColumn::new(table, column));
        self.all_columns = false;
        Ok(self)
    }

    /// Select all columns (`true`) or only the picked ones (`false`).
    pub fn all_columns(&mut self, all: bool) -> &mut Self {
        self.all_columns = all;
        self
    }

    pub fn distinct(&mut self, distinct: bool) -> &mut Self {
        self.distinct = distinct;
        self
    }

    fn check_ref(&self, table: TableRef) -> LensResult<()> {
        match table {
            TableRef::Join(i) if i >= self.joins.len() => Err(LensError::validation(format!(
                "reference to join #{} but only {} join(s) are declared before it",
                i + 1,
                self.joins.len()
            ))),
            _ => Ok(()),
        }
    }

    // ==================== Conditions ====================

    /// Add a condition row.
    pub fn condition(&mut self, condition: ConditionSpec) -> &mut Self {
        self.conditions.push(condition);
        self
    }

    /// Add `column OP value` on the main table.
    pub fn and(&mut self, column: &str, op: Op, value: &str) -> &mut Self {
        self.condition(ConditionSpec::new(column, op, value))
    }

    // ==================== Grouping, ordering & limit ====================

    /// GROUP BY a picker label (`column` or `table.column`).
    pub fn group_by(&mut self, label: &str) -> &mut Self {
        self.group_by = Some(label.to_string());
        self
    }

    /// Raw HAVING expression, passed through unsanitized.
    pub fn having(&mut self, expr: &str) -> &mut Self {
        self.having = expr.to_string();
        self
    }

    /// Raw text appended after HAVING, passed through unsanitized.
    pub fn union_tail(&mut self, tail: &str) -> &mut Self {
        self.union_tail = tail.to_string();
        self
    }

    /// ORDER BY a picker label (`column` or `table.column`).
    pub fn order_by(&mut self, label: &str, dir: OrderDir) -> &mut Self {
        self.order_by = Some((label.to_string(), dir));
        self
    }

    /// LIMIT as typed; parsed when SQL is generated.
    pub fn limit(&mut self, limit: &str) -> &mut Self {
        self.limit = Some(limit.to_string());
        self
    }

    // ==================== Accessors ====================

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn joins(&self) -> &[JoinSpec] {
        &self.joins
    }

    pub fn conditions(&self) -> &[ConditionSpec] {
        &self.conditions
    }

    pub fn is_all_columns(&self) -> bool {
        self.all_columns
    }

    pub fn selected_columns(&self) -> &[SelectedColumn] {
        &self.columns
    }

    pub fn group_by_label(&self) -> Option<&str> {
        self.group_by.as_deref()
    }

    pub fn having_expr(&self) -> &str {
        &self.having
    }

    pub fn union_tail_text(&self) -> &str {
        &self.union_tail
    }

    pub fn order_by_label(&self) -> Option<(&str, OrderDir)> {
        self.order_by.as_ref().map(|(l, d)| (l.as_str(), *d))
    }

    pub fn limit_text(&self) -> Option<&str> {
        self.limit.as_deref()
    }

    pub fn is_distinct(&self) -> bool {
        self.distinct
    }

    /// The LIMIT that will be emitted, if any.
    ///
    /// Unparsable and non-positive values yield `None`; the rest is clamped
    /// to [`MAX_LIMIT`].
    pub fn effective_limit(&self) -> Option<i32> {
        let raw = self.limit.as_deref()?.trim();
        match raw.parse::<i32>() {
            Ok(n) if n > 0 => Some(n.min(MAX_LIMIT)),
            _ => {
                if !raw.is_empty() {
                    tracing::debug!(target: "datalens.sql", limit = raw, "ignoring LIMIT");
                }
                None
            }
        }
    }

    /// Resolver over this spec's tables.
    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.table, &self.joins)
    }

    // ==================== SQL build ====================

    /// Generate the SELECT statement.
    pub fn to_sql(&self) -> String {
        let resolver = self.resolver();
        let mut sql = String::with_capacity(128);

        // 1. SELECT
        sql.push_str(if self.distinct {
            "SELECT DISTINCT "
        } else {
            "SELECT "
        });
        let projection = self.projection(&resolver);
        if projection.is_empty() {
            sql.push('*');
        } else {
            sql.push_str(&projection.join(", "));
        }

        // 2. FROM
        sql.push_str(" FROM ");
        Ident::new(&self.table).write_sql(&mut sql);
        if resolver.has_joins() {
            sql.push_str(" t0");
        }

        // 3. JOIN
        for (i, join) in self.joins.iter().enumerate() {
            self.write_join(&mut sql, &resolver, i, join);
        }

        // 4. WHERE
        let where_parts: Vec<String> = self
            .conditions
            .iter()
            .filter_map(|c| c.render(&resolver))
            .collect();
        if !where_parts.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&where_parts.join(" AND "));
        }

        // 5. GROUP BY
        if let Some(group) = self.group_by.as_deref().and_then(|l| resolver.dotted(l)) {
            sql.push_str(" GROUP BY ");
            sql.push_str(&group);
        }

        // 6. HAVING, union tail
        let having = self.having.trim();
        if !having.is_empty() {
            sql.push_str(" HAVING ");
            sql.push_str(having);
        }
        let tail = self.union_tail.trim();
        if !tail.is_empty() {
            sql.push(' ');
            sql.push_str(tail);
        }

        // 7. ORDER BY
        if let Some((label, dir)) = &self.order_by {
            if let Some(order) = resolver.dotted(label) {
                sql.push_str(" ORDER BY ");
                sql.push_str(&order);
                sql.push(' ');
                sql.push_str(dir.as_sql());
            }
        }

        // 8. LIMIT
        if let Some(limit) = self.effective_limit() {
            sql.push_str(&format!(" LIMIT {limit}"));
        }

        tracing::debug!(target: "datalens.sql", sql = %sql, "generated select");
        sql
    }

    /// Selected columns, main table first, then each join in order.
    fn projection(&self, resolver: &Resolver<'_>) -> Vec<String> {
        if self.all_columns {
            return Vec::new();
        }
        let mut ordered: Vec<&SelectedColumn> = self.columns.iter().collect();
        // Stable: picks within one table keep their order.
        ordered.sort_by_key(|c| c.table);
        ordered
            .into_iter()
            .filter_map(|c| resolver.column(c.table, &c.column))
            .collect()
    }

    fn write_join(&self, sql: &mut String, resolver: &Resolver<'_>, i: usize, join: &JoinSpec) {
        let related = Ident::new(&join.table);
        if related.is_empty() {
            tracing::debug!(target: "datalens.sql", index = i, "skipping join with blank table");
            return;
        }
        let alias = TableRef::Join(i).alias();
        sql.push(' ');
        sql.push_str(join.kind.as_sql());
        sql.push(' ');
        related.write_sql(sql);
        sql.push(' ');
        sql.push_str(&alias);

        let left = resolver.column(join.left, &join.left_column);
        let right = resolver.column(TableRef::Join(i), &join.right_column);
        if let (Some(left), Some(right)) = (left, right) {
            sql.push_str(" ON ");
            sql.push_str(&left);
            sql.push_str(" = ");
            sql.push_str(&right);
        }
    }
}

/// Generate the SELECT statement for a spec.
pub fn generate_select(spec: &QuerySpec) -> String {
    spec.to_sql()
}
