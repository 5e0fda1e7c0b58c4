//! Flat, serializable snapshot of a [`QuerySpec`].
//!
//! The snapshot is what a front end stores for "saved query builders". Join
//! references use the string form `""` (main table) and `jN` (N-th join,
//! 1-based); selected columns are stored as picker labels.

use crate::builder::{JoinKind, JoinSpec, OrderDir, QuerySpec, TableRef};
use crate::condition::{ConditionSpec, Op};
use crate::error::{LensError, LensResult};
use serde::{Deserialize, Serialize};

/// A saved query builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SavedQueryBuilder {
    pub id: String,
    pub name: String,
    pub table_name: String,
    pub conditions: Vec<SavedCondition>,
    pub joins: Vec<SavedJoin>,
    pub use_all_columns: bool,
    /// Picker labels: `column` for the main table, `table.column` for joins.
    pub selected_column_names: Vec<String>,
    pub order_by_column: String,
    pub order_by_direction: String,
    pub group_by_column: String,
    pub having: String,
    pub union_tail: String,
    pub limit: String,
    pub distinct: bool,
}

impl Default for SavedQueryBuilder {
    fn default() -> Self {
        Self {
            id: new_id(),
            name: String::new(),
            table_name: String::new(),
            conditions: Vec::new(),
            joins: Vec::new(),
            use_all_columns: true,
            selected_column_names: Vec::new(),
            order_by_column: String::new(),
            order_by_direction: OrderDir::Asc.as_sql().to_string(),
            group_by_column: String::new(),
            having: String::new(),
            union_tail: String::new(),
            limit: "100".to_string(),
            distinct: false,
        }
    }
}

/// A saved WHERE row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SavedCondition {
    pub column: String,
    /// Operator spelling as shown by the builder (`=`, `NOT LIKE`, ...).
    pub operator: String,
    pub value: String,
}

impl Default for SavedCondition {
    fn default() -> Self {
        Self {
            column: String::new(),
            operator: Op::Eq.as_sql().to_string(),
            value: String::new(),
        }
    }
}

/// A saved JOIN row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SavedJoin {
    pub join_type: String,
    pub related_table_name: String,
    /// `""` for the main table, `jN` for the N-th join.
    pub left_table_ref: String,
    pub left_column: String,
    pub right_column: String,
}

impl Default for SavedJoin {
    fn default() -> Self {
        Self {
            join_type: JoinKind::Left.as_sql().to_string(),
            related_table_name: String::new(),
            left_table_ref: String::new(),
            left_column: String::new(),
            right_column: String::new(),
        }
    }
}

fn new_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

impl SavedQueryBuilder {
    /// Capture a spec under `name` with a fresh id.
    ///
    /// Joins with a blank table and conditions with neither column nor value
    /// are not captured. References to a dropped join are renumbered; a
    /// reference to the dropped join itself falls back to the main table.
    pub fn from_spec(name: impl Into<String>, spec: &QuerySpec) -> Self {
        let joins = spec.joins();

        // Old join index -> new index, None for dropped joins.
        let mut kept = Vec::with_capacity(joins.len());
        let mut next = 0;
        for join in joins {
            if join.table.trim().is_empty() {
                kept.push(None);
            } else {
                kept.push(Some(next));
                next += 1;
            }
        }
        let remap = |r: TableRef| match r {
            TableRef::Main => Some(TableRef::Main),
            TableRef::Join(i) => kept.get(i).copied().flatten().map(TableRef::Join),
        };

        let saved_joins = joins
            .iter()
            .filter(|j| !j.table.trim().is_empty())
            .map(|j| SavedJoin {
                join_type: j.kind.as_sql().to_string(),
                related_table_name: j.table.clone(),
                left_table_ref: remap(j.left).unwrap_or(TableRef::Main).to_saved(),
                left_column: j.left_column.clone(),
                right_column: j.right_column.clone(),
            })
            .collect();

        let conditions = spec
            .conditions()
            .iter()
            .filter(|c| !c.column.trim().is_empty() || !c.value.trim().is_empty())
            .map(|c| SavedCondition {
                column: c.column.clone(),
                operator: c.op.as_sql().to_string(),
                value: c.value.clone(),
            })
            .collect();

        let selected_column_names = if spec.is_all_columns() {
            Vec::new()
        } else {
            spec.selected_columns()
                .iter()
                .filter_map(|c| match c.table {
                    TableRef::Main => Some(c.column.clone()),
                    TableRef::Join(i) => {
                        remap(c.table)?;
                        Some(format!("{}.{}", joins[i].table, c.column))
                    }
                })
                .collect()
        };

        let (order_by_column, order_by_direction) = match spec.order_by_label() {
            Some((label, dir)) => (label.to_string(), dir),
            None => (String::new(), OrderDir::Asc),
        };

        Self {
            id: new_id(),
            name: name.into(),
            table_name: spec.table().to_string(),
            conditions,
            joins: saved_joins,
            use_all_columns: spec.is_all_columns(),
            selected_column_names,
            order_by_column,
            order_by_direction: order_by_direction.as_sql().to_string(),
            group_by_column: spec.group_by_label().unwrap_or_default().to_string(),
            having: spec.having_expr().trim().to_string(),
            union_tail: spec.union_tail_text().trim().to_string(),
            limit: spec.limit_text().unwrap_or_default().trim().to_string(),
            distinct: spec.is_distinct(),
        }
    }

    /// Rebuild the spec.
    ///
    /// Unknown operators and join references that are malformed or point at
    /// a later join are errors. Unknown join types become LEFT JOIN. Selected
    /// labels that match no table are dropped.
    pub fn to_spec(&self) -> LensResult<QuerySpec> {
        let mut spec = QuerySpec::new(&self.table_name);

        for (i, saved) in self.joins.iter().enumerate() {
            let left = TableRef::from_saved(saved.left_table_ref.trim()).ok_or_else(|| {
                LensError::validation(format!(
                    "join #{} has an invalid table reference '{}'",
                    i + 1,
                    saved.left_table_ref
                ))
            })?;
            let join = JoinSpec::new(
                JoinKind::from_text(&saved.join_type),
                saved.related_table_name.clone(),
            )
            .on(left, saved.left_column.clone(), saved.right_column.clone());
            spec.join(join)?;
        }

        for saved in &self.conditions {
            if saved.column.trim().is_empty() && saved.value.trim().is_empty() {
                continue;
            }
            let operator = saved.operator.trim();
            let op = if operator.is_empty() {
                Op::Eq
            } else {
                Op::parse(operator).ok_or_else(|| {
                    LensError::validation(format!("unknown operator '{}'", saved.operator))
                })?
            };
            spec.condition(ConditionSpec::new(saved.column.clone(), op, saved.value.clone()));
        }

        if !self.use_all_columns {
            for label in &self.selected_column_names {
                match self.label_ref(label) {
                    Some((table, column)) => {
                        spec.select_column(table, column)?;
                    }
                    None => tracing::debug!(
                        target: "datalens.sql",
                        label = %label,
                        "dropping selected column with no matching table"
                    ),
                }
            }
        }
        spec.all_columns(self.use_all_columns);

        if !self.group_by_column.trim().is_empty() {
            spec.group_by(&self.group_by_column);
        }
        if !self.order_by_column.trim().is_empty() {
            spec.order_by(
                &self.order_by_column,
                OrderDir::from_text(&self.order_by_direction),
            );
        }
        spec.having(&self.having)
            .union_tail(&self.union_tail)
            .distinct(self.distinct);
        if !self.limit.trim().is_empty() {
            spec.limit(&self.limit);
        }
        Ok(spec)
    }

    /// Map a picker label to the table it belongs to.
    fn label_ref<'l>(&self, label: &'l str) -> Option<(TableRef, &'l str)> {
        let label = label.trim();
        if label.is_empty() {
            return None;
        }
        match label.split_once('.') {
            None => Some((TableRef::Main, label)),
            Some((table, column)) => self
                .joins
                .iter()
                .position(|j| j.related_table_name.to_lowercase() == table.to_lowercase())
                .map(|i| (TableRef::Join(i), column)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::SelectedColumn;

    fn sample_spec() -> QuerySpec {
        let mut spec = QuerySpec::new("users");
        spec.join(JoinSpec::left("orders").on(TableRef::Main, "id", "user_id"))
            .unwrap();
        spec.select_column(TableRef::Main, "id").unwrap();
        spec.select_column(TableRef::Join(0), "total").unwrap();
        spec.and("status", Op::Eq, "active")
            .order_by("orders.total", OrderDir::Desc)
            .limit("50");
        spec
    }

    #[test]
    fn defaults_match_a_fresh_builder() {
        let saved = SavedQueryBuilder::default();
        assert_eq!(saved.id.len(), 32);
        assert!(saved.use_all_columns);
        assert_eq!(saved.limit, "100");
        assert_eq!(saved.order_by_direction, "ASC");
        assert!(!saved.distinct);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let saved: SavedQueryBuilder =
            serde_json::from_str(r#"{"tableName":"users","joins":[{"relatedTableName":"orders"}]}"#)
                .unwrap();
        assert_eq!(saved.table_name, "users");
        assert_eq!(saved.limit, "100");
        assert_eq!(saved.joins[0].join_type, "LEFT JOIN");
        assert_eq!(saved.joins[0].left_table_ref, "");
    }

    #[test]
    fn serializes_camel_case() {
        let saved = SavedQueryBuilder::from_spec("report", &sample_spec());
        let json = serde_json::to_value(&saved).unwrap();
        assert_eq!(json["tableName"], "users");
        assert_eq!(json["useAllColumns"], false);
        assert_eq!(json["selectedColumnNames"][1], "orders.total");
        assert_eq!(json["joins"][0]["relatedTableName"], "orders");
        assert_eq!(json["joins"][0]["leftTableRef"], "");
        assert_eq!(json["joins"][0]["joinType"], "LEFT JOIN");
        assert_eq!(json["orderByDirection"], "DESC");
    }

    #[test]
    fn snapshot_restores_the_same_sql() {
        let spec = sample_spec();
        let restored = SavedQueryBuilder::from_spec("report", &spec)
            .to_spec()
            .unwrap();
        assert_eq!(restored.to_sql(), spec.to_sql());
    }

    #[test]
    fn blank_rows_are_not_captured() {
        let mut spec = QuerySpec::new("users");
        spec.join(JoinSpec::left("  ")).unwrap();
        spec.join(JoinSpec::inner("orders").on(TableRef::Join(0), "id", "user_id"))
            .unwrap();
        spec.join(JoinSpec::left("items").on(TableRef::Join(1), "id", "order_id"))
            .unwrap();
        spec.and("", Op::Eq, "").and("id", Op::Gt, "1");

        let saved = SavedQueryBuilder::from_spec("x", &spec);
        assert_eq!(saved.conditions.len(), 1);
        assert_eq!(saved.joins.len(), 2);
        // orders referenced the dropped join; items is renumbered to j1.
        assert_eq!(saved.joins[0].left_table_ref, "");
        assert_eq!(saved.joins[1].left_table_ref, "j1");
    }

    #[test]
    fn unknown_operator_is_an_error() {
        let saved = SavedQueryBuilder {
            table_name: "users".into(),
            conditions: vec![SavedCondition {
                column: "id".into(),
                operator: "BETWEEN".into(),
                value: "1".into(),
            }],
            ..Default::default()
        };
        assert!(matches!(saved.to_spec(), Err(LensError::Validation(_))));
    }

    #[test]
    fn forward_join_reference_is_an_error() {
        let saved = SavedQueryBuilder {
            table_name: "users".into(),
            joins: vec![SavedJoin {
                related_table_name: "orders".into(),
                left_table_ref: "j1".into(),
                ..Default::default()
            }],
            ..Default::default()
        };
        assert!(saved.to_spec().is_err());

        let saved = SavedQueryBuilder {
            joins: vec![SavedJoin {
                related_table_name: "orders".into(),
                left_table_ref: "x2".into(),
                ..Default::default()
            }],
            ..saved
        };
        assert!(saved.to_spec().is_err());
    }

    #[test]
    fn unknown_join_type_becomes_left() {
        let saved = SavedQueryBuilder {
            table_name: "users".into(),
            joins: vec![SavedJoin {
                join_type: "CROSS JOIN".into(),
                related_table_name: "orders".into(),
                left_column: "id".into(),
                right_column: "user_id".into(),
                ..Default::default()
            }],
            ..Default::default()
        };
        let spec = saved.to_spec().unwrap();
        assert_eq!(spec.joins()[0].kind, JoinKind::Left);
    }

    #[test]
    fn labels_map_to_tables() {
        let saved = SavedQueryBuilder {
            table_name: "users".into(),
            joins: vec![SavedJoin {
                related_table_name: "Orders".into(),
                ..Default::default()
            }],
            use_all_columns: false,
            selected_column_names: vec![
                "name".into(),
                "orders.total".into(),
                "payments.amount".into(),
            ],
            ..Default::default()
        };
        let spec = saved.to_spec().unwrap();
        assert_eq!(
            spec.selected_columns(),
            &[
                SelectedColumn::new(TableRef::Main, "name"),
                SelectedColumn::new(TableRef::Join(0), "total"),
            ]
        );
        assert!(!spec.is_all_columns());
    }
}
