use super::*;
use crate::condition::{ConditionSpec, Op};
use crate::error::Rejection;
use crate::row::ResultSet;

// ==================== SELECT ====================

#[test]
fn test_simple_select() {
    let spec = QuerySpec::new("users");
    assert_eq!(spec.to_sql(), "SELECT * FROM `users`");
}

#[test]
fn test_default_limit() {
    let mut spec = QuerySpec::new("users");
    spec.limit("100");
    assert_eq!(generate_select(&spec), "SELECT * FROM `users` LIMIT 100");
}

#[test]
fn test_table_name_is_sanitized() {
    let spec = QuerySpec::new("us`ers; DROP");
    assert_eq!(spec.to_sql(), "SELECT * FROM `usersDROP`");
}

#[test]
fn test_select_columns_without_joins_are_unqualified() {
    let mut spec = QuerySpec::new("users");
    spec.select_column(TableRef::Main, "id")
        .unwrap()
        .select_column(TableRef::Main, "name")
        .unwrap();
    assert_eq!(spec.to_sql(), "SELECT `id`, `name` FROM `users`");
}

#[test]
fn test_left_join_with_order() {
    let mut spec = QuerySpec::new("users");
    spec.join(JoinSpec::left("orders").on(TableRef::Main, "id", "user_id"))
        .unwrap();
    spec.select_column(TableRef::Main, "id")
        .unwrap()
        .select_column(TableRef::Join(0), "total")
        .unwrap();
    spec.order_by("orders.total", OrderDir::Desc).limit("100");

    let sql = spec.to_sql();
    assert!(sql.contains("LEFT JOIN `orders` t1"));
    assert!(sql.contains("ON `t0`.`id` = `t1`.`user_id`"));
    assert!(sql.contains("ORDER BY `t1`.`total` DESC"));
    assert_eq!(
        sql,
        "SELECT `t0`.`id`, `t1`.`total` FROM `users` t0 \
         LEFT JOIN `orders` t1 ON `t0`.`id` = `t1`.`user_id` \
         ORDER BY `t1`.`total` DESC LIMIT 100"
    );
}

#[test]
fn test_projection_lists_main_table_first() {
    let mut spec = QuerySpec::new("users");
    spec.join(JoinSpec::inner("orders").on(TableRef::Main, "id", "user_id"))
        .unwrap();
    spec.select_column(TableRef::Join(0), "total")
        .unwrap()
        .select_column(TableRef::Main, "name")
        .unwrap()
        .select_column(TableRef::Join(0), "placed_at")
        .unwrap()
        .select_column(TableRef::Main, "id")
        .unwrap();
    assert!(spec.to_sql().starts_with(
        "SELECT `t0`.`name`, `t0`.`id`, `t1`.`total`, `t1`.`placed_at` FROM"
    ));
}

#[test]
fn test_chained_joins() {
    let mut spec = QuerySpec::new("users");
    spec.join(JoinSpec::left("orders").on(TableRef::Main, "id", "user_id"))
        .unwrap()
        .join(JoinSpec::right("items").on(TableRef::Join(0), "id", "order_id"))
        .unwrap();
    assert_eq!(
        spec.to_sql(),
        "SELECT * FROM `users` t0 \
         LEFT JOIN `orders` t1 ON `t0`.`id` = `t1`.`user_id` \
         RIGHT JOIN `items` t2 ON `t1`.`id` = `t2`.`order_id`"
    );
}

#[test]
fn test_join_without_on_columns() {
    let mut spec = QuerySpec::new("users");
    spec.join(JoinSpec::inner("orders")).unwrap();
    assert_eq!(spec.to_sql(), "SELECT * FROM `users` t0 INNER JOIN `orders` t1");
}

#[test]
fn test_blank_join_keeps_alias_positions() {
    let mut spec = QuerySpec::new("users");
    spec.join(JoinSpec::left("  ")).unwrap();
    spec.join(JoinSpec::left("orders").on(TableRef::Main, "id", "user_id"))
        .unwrap();
    assert_eq!(
        spec.to_sql(),
        "SELECT * FROM `users` t0 LEFT JOIN `orders` t2 ON `t0`.`id` = `t2`.`user_id`"
    );
}

#[test]
fn test_forward_join_reference_is_rejected() {
    let mut spec = QuerySpec::new("users");
    let err = spec
        .join(JoinSpec::left("orders").on(TableRef::Join(0), "id", "user_id"))
        .unwrap_err();
    assert!(matches!(err, crate::error::LensError::Validation(_)));
    assert!(err.to_string().contains("join #1 but only 0 join(s)"));
    assert!(spec.joins().is_empty());
}

#[test]
fn test_select_column_on_undeclared_join_is_rejected() {
    let mut spec = QuerySpec::new("users");
    assert!(spec.select_column(TableRef::Join(0), "total").is_err());
    assert!(spec.is_all_columns());
}

#[test]
fn test_all_columns_wins_over_picks() {
    let mut spec = QuerySpec::new("users");
    spec.select_column(TableRef::Main, "id").unwrap();
    spec.all_columns(true);
    assert_eq!(spec.to_sql(), "SELECT * FROM `users`");
}

#[test]
fn test_unrenderable_projection_falls_back_to_star() {
    let mut spec = QuerySpec::new("users");
    spec.select_column(TableRef::Main, "--").unwrap();
    assert_eq!(spec.to_sql(), "SELECT * FROM `users`");
}

#[test]
fn test_distinct() {
    let mut spec = QuerySpec::new("users");
    spec.distinct(true);
    assert_eq!(spec.to_sql(), "SELECT DISTINCT * FROM `users`");
}

// ==================== WHERE ====================

#[test]
fn test_where_conditions() {
    let mut spec = QuerySpec::new("users");
    spec.and("status", Op::Eq, "active").and("age", Op::Gte, "18");
    assert_eq!(
        spec.to_sql(),
        "SELECT * FROM `users` WHERE `status` = 'active' AND `age` >= 18"
    );
}

#[test]
fn test_where_qualifies_main_table_when_joined() {
    let mut spec = QuerySpec::new("users");
    spec.join(JoinSpec::left("orders").on(TableRef::Main, "id", "user_id"))
        .unwrap();
    spec.and("status", Op::Ne, "banned");
    assert!(spec.to_sql().ends_with("WHERE `t0`.`status` != 'banned'"));
}

#[test]
fn test_and_in() {
    let mut spec = QuerySpec::new("users");
    spec.and("id", Op::In, "1, 2,3");
    assert_eq!(spec.to_sql(), "SELECT * FROM `users` WHERE `id` IN (1, 2, 3)");
}

#[test]
fn test_and_in_strings_and_blanks() {
    let mut spec = QuerySpec::new("users");
    spec.and("name", Op::In, " ann, ,bob ,");
    assert_eq!(
        spec.to_sql(),
        "SELECT * FROM `users` WHERE `name` IN ('ann', 'bob')"
    );
}

#[test]
fn test_and_in_empty_is_dropped() {
    let mut spec = QuerySpec::new("users");
    spec.and("id", Op::In, "").and("id", Op::In, " , ");
    assert_eq!(spec.to_sql(), "SELECT * FROM `users`");
}

#[test]
fn test_null_checks_ignore_value() {
    let mut spec = QuerySpec::new("users");
    spec.and("deleted_at", Op::IsNull, "whatever")
        .and("email", Op::IsNotNull, "");
    assert_eq!(
        spec.to_sql(),
        "SELECT * FROM `users` WHERE `deleted_at` IS NULL AND `email` IS NOT NULL"
    );
}

#[test]
fn test_like_value_is_escaped() {
    let mut spec = QuerySpec::new("users");
    spec.and("name", Op::NotLike, "%O'Br\\ien%");
    assert_eq!(
        spec.to_sql(),
        "SELECT * FROM `users` WHERE `name` NOT LIKE '%O''Br\\\\ien%'"
    );
}

#[test]
fn test_empty_value_compares_with_null() {
    let mut spec = QuerySpec::new("users");
    spec.and("nickname", Op::Eq, "");
    assert_eq!(spec.to_sql(), "SELECT * FROM `users` WHERE `nickname` = NULL");
}

#[test]
fn test_condition_with_blank_column_is_dropped() {
    let mut spec = QuerySpec::new("users");
    spec.condition(ConditionSpec::new("  ", Op::Eq, "1"))
        .condition(ConditionSpec::new("';", Op::Eq, "1"));
    assert_eq!(spec.to_sql(), "SELECT * FROM `users`");
}

// ==================== GROUP BY / HAVING / ORDER BY ====================

#[test]
fn test_group_by_having_and_union_tail() {
    let mut spec = QuerySpec::new("users");
    spec.select_column(TableRef::Main, "status").unwrap();
    spec.group_by("status")
        .having("  COUNT(*) > 1 ")
        .union_tail("UNION ALL SELECT `status` FROM `archived_users`")
        .order_by("status", OrderDir::Asc)
        .limit("10");
    assert_eq!(
        spec.to_sql(),
        "SELECT `status` FROM `users` GROUP BY `status` HAVING COUNT(*) > 1 \
         UNION ALL SELECT `status` FROM `archived_users` ORDER BY `status` ASC LIMIT 10"
    );
}

#[test]
fn test_blank_having_and_tail_are_omitted() {
    let mut spec = QuerySpec::new("users");
    spec.having("   ").union_tail("\n");
    assert_eq!(spec.to_sql(), "SELECT * FROM `users`");
}

#[test]
fn test_group_by_joined_table_label() {
    let mut spec = QuerySpec::new("users");
    spec.join(JoinSpec::left("orders").on(TableRef::Main, "id", "user_id"))
        .unwrap();
    spec.group_by("Orders.status");
    assert!(spec.to_sql().ends_with("GROUP BY `t1`.`status`"));
}

#[test]
fn test_order_by_unknown_table_uses_its_name_as_alias() {
    let mut spec = QuerySpec::new("users");
    spec.join(JoinSpec::left("orders").on(TableRef::Main, "id", "user_id"))
        .unwrap();
    spec.order_by("payments.amount", OrderDir::Asc);
    assert!(spec.to_sql().ends_with("ORDER BY `payments`.`amount` ASC"));
}

#[test]
fn test_order_by_unresolvable_label_is_dropped() {
    let mut spec = QuerySpec::new("users");
    spec.order_by("a.b.c", OrderDir::Desc).group_by("");
    assert_eq!(spec.to_sql(), "SELECT * FROM `users`");
}

// ==================== LIMIT ====================

#[test]
fn test_limit_parsing() {
    let cases = [
        ("abc", None),
        ("999999", Some(10_000)),
        ("10000", Some(10_000)),
        ("0", None),
        ("-5", None),
        (" 25 ", Some(25)),
        ("", None),
        ("2.5", None),
    ];
    for (raw, expected) in cases {
        let mut spec = QuerySpec::new("users");
        spec.limit(raw);
        assert_eq!(spec.effective_limit(), expected, "limit {raw:?}");
    }
}

#[test]
fn test_limit_clamped_in_sql() {
    let mut spec = QuerySpec::new("users");
    spec.limit("999999");
    assert_eq!(spec.to_sql(), "SELECT * FROM `users` LIMIT 10000");
    spec.limit("abc");
    assert_eq!(spec.to_sql(), "SELECT * FROM `users`");
}

// ==================== UPDATE ====================

fn cell(column: &str, original: Option<&str>) -> EditCell {
    EditCell::new(column, original.map(str::to_string))
}

fn user_row() -> EditRowSpec {
    EditRowSpec::new(
        "users",
        vec![cell("id", Some("7")), cell("name", Some("Ann")), cell("note", None)],
        vec!["id".to_string()],
    )
}

#[test]
fn test_update_changed_columns_only() {
    let mut row = user_row();
    row.set("name", "O'Brien");
    assert_eq!(
        generate_update(&row).unwrap(),
        "UPDATE `users` SET `name` = 'O''Brien' WHERE `id` = 7"
    );
}

#[test]
fn test_update_clearing_a_value_writes_null() {
    let mut row = user_row();
    row.set("name", "");
    assert_eq!(
        row.to_sql().unwrap(),
        "UPDATE `users` SET `name` = NULL WHERE `id` = 7"
    );
}

#[test]
fn test_update_null_cell_edited() {
    let mut row = user_row();
    row.set("note", "vip");
    assert_eq!(
        row.to_sql().unwrap(),
        "UPDATE `users` SET `note` = 'vip' WHERE `id` = 7"
    );
}

#[test]
fn test_update_edited_key_uses_original_value() {
    let mut row = user_row();
    row.set("id", "8");
    assert_eq!(
        row.to_sql().unwrap(),
        "UPDATE `users` SET `id` = 8 WHERE `id` = 7"
    );
}

#[test]
fn test_update_no_changes_rejected() {
    let err = user_row().to_sql().unwrap_err();
    assert_eq!(err.rejection(), Some(&Rejection::NoChanges));
}

#[test]
fn test_update_without_primary_key_rejected() {
    let mut row = user_row();
    row.primary_key.clear();
    row.set("name", "Bob");
    let err = generate_update(&row).unwrap_err();
    assert_eq!(err.rejection(), Some(&Rejection::NoPrimaryKey));
}

#[test]
fn test_update_no_changes_checked_before_primary_key() {
    let mut row = user_row();
    row.primary_key.clear();
    let err = row.to_sql().unwrap_err();
    assert_eq!(err.rejection(), Some(&Rejection::NoChanges));
}

#[test]
fn test_update_null_primary_key() {
    let mut row = EditRowSpec::new(
        "events",
        vec![cell("code", None), cell("label", Some("x"))],
        vec!["code".to_string(), "missing".to_string()],
    );
    row.set("label", "y");
    assert_eq!(
        row.to_sql().unwrap(),
        "UPDATE `events` SET `label` = 'y' WHERE `code` IS NULL AND `missing` IS NULL"
    );
}

#[test]
fn test_update_composite_key() {
    let mut row = EditRowSpec::new(
        "order_items",
        vec![
            cell("order_id", Some("10")),
            cell("sku", Some("AB-1")),
            cell("qty", Some("1")),
        ],
        vec!["order_id".to_string(), "sku".to_string()],
    );
    row.set("qty", "3");
    assert_eq!(
        row.to_sql().unwrap(),
        "UPDATE `order_items` SET `qty` = 3 WHERE `order_id` = 10 AND `sku` = 'AB-1'"
    );
}

#[test]
fn test_update_ignores_columns_outside_the_table() {
    let mut row = user_row()
        .with_table_columns(vec!["id".to_string(), "name".to_string()]);
    row.set("note", "joined value");
    assert_eq!(row.to_sql().unwrap_err().rejection(), Some(&Rejection::NoChanges));

    row.set("name", "Bea");
    assert_eq!(
        row.to_sql().unwrap(),
        "UPDATE `users` SET `name` = 'Bea' WHERE `id` = 7"
    );
}

#[test]
fn test_update_set_unknown_column_is_ignored() {
    let mut row = user_row();
    row.set("nope", "1");
    assert_eq!(row.changed_cells().count(), 0);
}

#[test]
fn test_update_from_result_row() {
    let rs = ResultSet::new(
        vec!["id".into(), "email".into()],
        vec![
            vec![Some("1".into()), None],
            vec![Some("2".into()), Some("b@x.io".into())],
        ],
    );
    let mut row = EditRowSpec::from_result_row("users", &rs, 0, vec!["id".into()]).unwrap();
    assert_eq!(row.cells[1].original_display, "");
    assert!(!row.cells[1].is_changed());
    row.set("email", "a@x.io");
    assert_eq!(
        row.to_sql().unwrap(),
        "UPDATE `users` SET `email` = 'a@x.io' WHERE `id` = 1"
    );

    assert!(EditRowSpec::from_result_row("users", &rs, 2, vec![]).is_err());
}

// ==================== Join kinds & references ====================

#[test]
fn test_join_kind_from_text() {
    assert_eq!(JoinKind::from_text("INNER JOIN"), JoinKind::Inner);
    assert_eq!(JoinKind::from_text(" right outer join "), JoinKind::Right);
    assert_eq!(JoinKind::from_text("left"), JoinKind::Left);
    assert_eq!(JoinKind::from_text("CROSS JOIN"), JoinKind::Left);
    assert_eq!(JoinKind::from_text("INNER JOIN x; --"), JoinKind::Left);
}

#[test]
fn test_table_ref_saved_form() {
    assert_eq!(TableRef::from_saved(""), Some(TableRef::Main));
    assert_eq!(TableRef::from_saved("j1"), Some(TableRef::Join(0)));
    assert_eq!(TableRef::from_saved("J3"), Some(TableRef::Join(2)));
    assert_eq!(TableRef::from_saved("j0"), None);
    assert_eq!(TableRef::from_saved("j"), None);
    assert_eq!(TableRef::from_saved("j+1"), None);
    assert_eq!(TableRef::Join(1).to_saved(), "j2");
    assert_eq!(TableRef::Main.to_saved(), "");
}
