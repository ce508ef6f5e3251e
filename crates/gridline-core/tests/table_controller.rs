//! Gesture-level behaviour of the table controller.

use gridline_core::{
    BulkToggle, CellValue, CheckState, Column, ColumnOption, ColumnType, EditKey, EditOutcome, FilterOp,
    GridRow, PageItem, PageSummary, Record, ReorderOutcome, RowAction, RowId, SearchInput,
    TableController, TableFeatures, TableOptions,
};
use gridline_test_support::fixtures::{
    ids, numbered_rows, records_from_json, user_columns, user_rows,
};
use gridline_test_support::logging::init_test_logging;
use gridline_test_support::mocks::{CallbackLog, CellChange};

fn table() -> TableController<Record> {
    init_test_logging();
    TableController::builder(user_rows(), user_columns()).build()
}

fn table_with(features: TableFeatures) -> TableController<Record> {
    init_test_logging();
    TableController::builder(user_rows(), user_columns())
        .options(TableOptions::default().with_features(features))
        .build()
}

fn editable_table(log: &CallbackLog) -> TableController<Record> {
    init_test_logging();
    TableController::builder(user_rows(), user_columns())
        .on_cell_value_change(log.cell_change_callback())
        .build()
}

fn id(value: u64) -> RowId {
    RowId::from(value)
}

fn column_order(table: &TableController<Record>) -> Vec<&str> {
    table.view().column_order().iter().map(String::as_str).collect()
}

#[test]
fn header_clicks_cycle_sort_direction() {
    let mut table = table();
    assert!(table.sort_by("age"));
    assert_eq!(table.visible_row_ids(), ids(&[2, 3, 1]));
    assert!(table.sort_by("age"));
    assert_eq!(table.visible_row_ids(), ids(&[1, 3, 2]));
    assert!(table.sort_by("name"));
    assert_eq!(table.visible_row_ids(), ids(&[2, 3, 1]));
}

#[test]
fn unsortable_and_unknown_columns_are_ignored() {
    let mut table = TableController::builder(
        user_rows(),
        vec![Column::new("name", "Name").unsortable()],
    )
    .build();
    assert!(!table.sort_by("name"));
    assert!(!table.sort_by("missing"));
    assert_eq!(table.view().sort().key, None);
    assert_eq!(table.visible_row_ids(), ids(&[1, 2, 3]));
}

#[test]
fn text_filter_narrows_and_resets_page() {
    let mut table = table();
    assert!(table.set_page_size(1));
    assert!(table.set_page(2));
    assert!(table.set_filter("name", "jo"));
    assert_eq!(table.view().page().page, 1);
    assert_eq!(table.page_summary().total, 2);
    assert_eq!(table.visible_row_ids(), ids(&[1]));
    assert!(table.set_page_size(10));
    assert_eq!(table.visible_row_ids(), ids(&[1, 3]));
}

#[test]
fn typed_filters_use_the_chosen_operator() {
    let mut table = table();
    assert!(table.set_filter_op("age", FilterOp::GreaterThan));
    assert!(!table.set_filter_op("age", FilterOp::Before));
    assert!(table.set_filter("age", "22"));
    assert_eq!(table.visible_row_ids(), ids(&[1, 3]));

    assert!(table.set_filter("age", ""));
    assert_eq!(table.visible_row_ids(), ids(&[1, 2, 3]));
    assert_eq!(
        table.view().filters().get("age").map(|filter| filter.op),
        Some(FilterOp::GreaterThan)
    );
    assert!(table.clear_filter("age"));
    assert!(!table.clear_filter("age"));
    assert!(!table.set_filter("missing", "x"));
}

#[test]
fn filters_on_dates_and_booleans() {
    let mut table = table();
    assert!(table.set_filter_op("joined", FilterOp::After));
    assert!(table.set_filter("joined", "2023-03-01"));
    assert_eq!(table.visible_row_ids(), ids(&[2, 3]));
    table.clear_filters();

    assert!(table.set_filter("active", "true"));
    assert_eq!(table.visible_row_ids(), ids(&[1, 3]));
}

#[test]
fn filtering_never_grows_the_result() {
    let mut table = table();
    let unfiltered = table.page_summary().total;
    for value in ["j", "jo", "joa", "joan"] {
        let before = table.page_summary().total;
        table.set_filter("name", value);
        let after = table.page_summary().total;
        assert!(after <= before && after <= unfiltered);
    }
}

#[test]
fn only_the_latest_search_ticket_applies() {
    let mut table = table();
    let SearchInput::Scheduled(stale) = table.search_input("b") else {
        panic!("live search should schedule a ticket");
    };
    let SearchInput::Scheduled(latest) = table.search_input("bo") else {
        panic!("live search should schedule a ticket");
    };
    assert_eq!(latest.delay_ms, 300);
    assert_eq!(table.visible_row_ids(), ids(&[1, 2, 3]));

    assert!(!table.search_timer_fired(stale));
    assert!(table.search_timer_fired(latest));
    assert_eq!(table.view().global_search(), "bo");
    assert_eq!(table.visible_row_ids(), ids(&[2]));
    assert_eq!(table.search().recent().to_vec(), vec!["bo"]);

    table.clear_search();
    assert_eq!(table.visible_row_ids(), ids(&[1, 2, 3]));
}

#[test]
fn search_skips_hidden_columns_and_applies_synchronously_without_live_search() {
    let mut table = table_with(TableFeatures {
        live_search: false,
        ..TableFeatures::default()
    });
    assert_eq!(
        table.search_input("EXAMPLE"),
        SearchInput::Applied("EXAMPLE".to_string())
    );
    assert_eq!(table.page_summary().total, 3);

    assert!(table.toggle_column_visibility("email"));
    assert!(!table.view().is_visible("email"));
    assert_eq!(table.page_summary().total, 0);
    assert!(!table.toggle_column_visibility("missing"));
}

#[test]
fn select_all_only_touches_visible_rows() {
    let mut table = table();
    assert!(table.toggle_row_selected(&id(1)));
    assert!(table.set_filter("role", "user"));
    assert_eq!(table.visible_row_ids(), ids(&[2, 3]));
    assert_eq!(table.select_all_state(), CheckState::Unchecked);

    assert_eq!(table.toggle_select_all(), BulkToggle::Selected);
    assert_eq!(table.view().selected_rows().to_vec(), ids(&[1, 2, 3]));
    assert_eq!(table.select_all_state(), CheckState::Checked);

    assert_eq!(table.toggle_select_all(), BulkToggle::Deselected);
    assert_eq!(table.view().selected_rows().to_vec(), ids(&[1]));
}

#[test]
fn select_all_twice_restores_selection() {
    let mut table = table();
    table.toggle_select_all();
    table.toggle_select_all();
    assert!(table.view().selected_rows().is_empty());

    table.toggle_row_selected(&id(1));
    table.set_filter("role", "user");
    let before = table.view().selected_rows().clone();
    table.toggle_select_all();
    table.toggle_select_all();
    assert_eq!(table.view().selected_rows(), &before);

    table.set_filter("name", "zzz");
    assert_eq!(table.toggle_select_all(), BulkToggle::Unchanged);
    assert_eq!(table.view().selected_rows(), &before);
}

#[test]
fn single_select_replaces_selection() {
    let mut table = table_with(TableFeatures {
        multi_select: false,
        ..TableFeatures::default()
    });
    assert!(table.toggle_row_selected(&id(1)));
    assert!(table.toggle_row_selected(&id(2)));
    assert_eq!(table.view().selected_rows().to_vec(), ids(&[2]));
    assert!(!table.toggle_row_selected(&id(2)));
    assert!(table.view().selected_rows().is_empty());
    assert_eq!(table.toggle_select_all(), BulkToggle::Unchanged);
}

#[test]
fn clear_selection_returns_previous_ids() {
    let mut table = table();
    table.toggle_row_selected(&id(3));
    table.toggle_row_selected(&id(1));
    assert_eq!(table.clear_selection(), ids(&[1, 3]));
    assert!(table.view().selected_rows().is_empty());
}

#[test]
fn expansion_toggles_and_respects_feature_flag() {
    let mut table = table();
    assert!(table.toggle_row_expanded(&id(2)));
    assert!(table.view().expanded_rows().contains(&id(2)));
    assert!(!table.toggle_row_expanded(&id(2)));

    let mut disabled = table_with(TableFeatures {
        row_expansion: false,
        ..TableFeatures::default()
    });
    assert!(!disabled.toggle_row_expanded(&id(2)));
    assert!(disabled.view().expanded_rows().is_empty());
}

#[test]
fn escape_discards_edit_without_callback() {
    let log = CallbackLog::new();
    let mut table = editable_table(&log);
    assert!(table.cell_double_click(&id(1), "name"));
    assert!(table.edit_input("Johnny"));
    assert_eq!(table.edit_key(EditKey::from_key("Escape")), EditOutcome::Discarded);
    assert!(log.cell_changes().is_empty());
    assert_eq!(table.rows()[0].field("name"), Some(CellValue::from("John")));
    assert!(table.editing_cell().is_none());
}

#[test]
fn enter_commits_and_updates_row_optimistically() {
    let log = CallbackLog::new();
    let mut table = editable_table(&log);
    assert!(table.sort_by("age"));
    assert_eq!(table.visible_row_ids(), ids(&[2, 3, 1]));

    assert!(table.cell_double_click(&id(2), "age"));
    assert_eq!(
        table.editing_cell().map(|cell| cell.draft.as_str()),
        Some("20")
    );
    assert!(table.edit_input("40"));
    assert_eq!(table.edit_key(EditKey::from_key("a")), EditOutcome::Editing);
    assert!(matches!(
        table.edit_key(EditKey::from_key("Enter")),
        EditOutcome::Committed(_)
    ));
    assert_eq!(
        log.cell_changes(),
        vec![CellChange {
            row_id: id(2),
            column_id: "age".to_string(),
            value: CellValue::Number(40.0),
        }]
    );
    assert_eq!(table.visible_row_ids(), ids(&[3, 1, 2]));
}

#[test]
fn blur_commits_and_unchanged_drafts_are_silent() {
    let log = CallbackLog::new();
    let mut table = editable_table(&log);
    table.cell_double_click(&id(3), "name");
    assert_eq!(table.edit_blur(), EditOutcome::Unchanged);

    table.cell_double_click(&id(3), "name");
    table.edit_input("Jo");
    assert!(matches!(table.edit_blur(), EditOutcome::Committed(_)));
    assert_eq!(log.cell_changes().len(), 1);
    assert_eq!(table.edit_blur(), EditOutcome::Idle);
}

#[test]
fn editing_requires_callback_flag_and_editable_column() {
    let mut no_callback = table();
    assert!(!no_callback.can_edit());
    assert!(!no_callback.cell_double_click(&id(1), "name"));

    let log = CallbackLog::new();
    let mut table = editable_table(&log);
    assert!(!table.cell_double_click(&id(1), "active"));
    assert!(!table.cell_double_click(&id(9), "name"));
    assert!(!table.cell_double_click(&id(1), "missing"));

    let mut disabled = TableController::builder(user_rows(), user_columns())
        .options(TableOptions::default().with_features(TableFeatures {
            inline_editing: false,
            ..TableFeatures::default()
        }))
        .on_cell_value_change(log.cell_change_callback())
        .build();
    assert!(!disabled.cell_double_click(&id(1), "name"));
}

#[test]
fn second_double_click_abandons_first_edit() {
    let log = CallbackLog::new();
    let mut table = editable_table(&log);
    table.cell_double_click(&id(1), "name");
    table.edit_input("Johnny");
    assert!(table.cell_double_click(&id(2), "name"));
    assert_eq!(table.edit_key(EditKey::Enter), EditOutcome::Unchanged);
    assert!(log.cell_changes().is_empty());
    assert_eq!(table.rows()[0].field("name"), Some(CellValue::from("John")));
}

#[test]
fn unparsable_numbers_are_dropped() {
    let log = CallbackLog::new();
    let mut table = editable_table(&log);
    table.cell_double_click(&id(1), "age");
    table.edit_input("thirty");
    assert!(matches!(
        table.edit_key(EditKey::Enter),
        EditOutcome::Rejected(_)
    ));
    assert!(log.cell_changes().is_empty());
    assert_eq!(table.rows()[0].field("age"), Some(CellValue::Number(30.0)));
}

#[test]
fn commit_against_deleted_row_still_reports_stale_id() {
    let log = CallbackLog::new();
    let mut table = editable_table(&log);
    table.cell_double_click(&id(2), "name");
    assert!(table.remove_row(&id(2)).is_some());
    table.edit_input("Robert");
    assert!(matches!(table.edit_blur(), EditOutcome::Committed(_)));
    assert_eq!(log.cell_changes()[0].row_id, id(2));
    assert_eq!(table.rows().len(), 2);
    assert_eq!(table.visible_row_ids(), ids(&[1, 3]));
}

#[test]
fn dragging_email_onto_name_reorders_columns() {
    let mut table = table();
    assert!(table.column_drag_start("email"));
    assert!(table.column_drag_over("role"));
    assert!(table.column_drag_over("name"));
    assert_eq!(table.column_drag_end(), ReorderOutcome::Moved { from: 1, to: 0 });
    assert_eq!(
        column_order(&table),
        vec!["email", "name", "role", "age", "joined", "active"]
    );
    assert_eq!(table.visible_columns()[0].id, "email");
    assert!(!table.column_drag().is_dragging());
}

#[test]
fn cancelled_or_disabled_column_drags_change_nothing() {
    let mut table = table();
    table.column_drag_start("active");
    table.column_drag_over("name");
    table.column_drag_cancel();
    assert_eq!(table.column_drag_end(), ReorderOutcome::Unchanged);
    assert_eq!(column_order(&table)[0], "name");

    let mut disabled = table_with(TableFeatures {
        draggable_columns: false,
        ..TableFeatures::default()
    });
    assert!(!disabled.column_drag_start("email"));
    assert!(!disabled.column_drag_over("name"));
    assert_eq!(disabled.column_drag_end(), ReorderOutcome::Unchanged);
}

#[test]
fn column_reorders_remain_permutations() {
    let mut table = table();
    let mut expected: Vec<String> = user_columns().into_iter().map(|column| column.id).collect();
    expected.sort();
    for (source, target) in [
        ("active", "name"),
        ("name", "joined"),
        ("age", "age"),
        ("email", "active"),
        ("role", "email"),
    ] {
        table.column_drag_start(source);
        table.column_drag_over(target);
        table.column_drag_end();
        let mut order = table.view().column_order().to_vec();
        order.sort();
        assert_eq!(order, expected);
    }
}

#[test]
fn row_drag_moves_source_rows_and_reports_order() {
    let log = CallbackLog::new();
    let mut table = TableController::builder(user_rows(), user_columns())
        .on_reorder(log.reorder_callback::<Record>())
        .build();
    assert!(table.row_drag_start(&id(3)));
    assert!(table.row_drag_over(&id(1)));
    assert_eq!(table.row_drag_end(), ReorderOutcome::Moved { from: 2, to: 0 });
    assert_eq!(table.visible_row_ids(), ids(&[3, 1, 2]));
    assert_eq!(log.reorders(), vec![ids(&[3, 1, 2])]);

    table.row_drag_start(&id(1));
    table.row_drag_cancel();
    assert_eq!(table.row_drag_end(), ReorderOutcome::Unchanged);
    assert_eq!(log.reorders().len(), 1);
}

#[test]
fn drag_end_commits_the_last_hovered_target_once() {
    let log = CallbackLog::new();
    let mut table = TableController::builder(user_rows(), user_columns())
        .on_reorder(log.reorder_callback::<Record>())
        .build();

    table.column_drag_start("role");
    table.column_drag_over("email");
    table.column_drag_over("name");
    assert_eq!(table.column_drag_end(), ReorderOutcome::Moved { from: 2, to: 0 });
    assert_eq!(table.column_drag_end(), ReorderOutcome::Unchanged);
    assert_eq!(column_order(&table)[..3], ["role", "name", "email"]);

    table.row_drag_start(&id(1));
    table.row_drag_over(&id(3));
    assert_eq!(table.row_drag_end(), ReorderOutcome::Moved { from: 0, to: 2 });
    assert_eq!(table.row_drag_end(), ReorderOutcome::Unchanged);
    assert_eq!(log.reorders(), vec![ids(&[2, 3, 1])]);
}

#[test]
fn row_drag_respects_feature_flag() {
    let mut table = table_with(TableFeatures {
        draggable_rows: false,
        ..TableFeatures::default()
    });
    assert!(!table.row_drag_start(&id(3)));
    assert!(!table.row_drag().is_dragging());
}

#[test]
fn pagination_navigation() {
    init_test_logging();
    let mut table = TableController::builder(numbered_rows(23), user_columns()).build();
    assert_eq!(table.page_count(), 3);
    assert!(table.set_page(3));
    assert_eq!(table.visible_row_ids(), ids(&[21, 22, 23]));
    assert_eq!(
        table.page_summary(),
        PageSummary {
            first: 21,
            last: 23,
            total: 23
        }
    );
    assert!(!table.set_page(4));
    assert!(!table.set_page(0));
    assert!(!table.next_page());
    assert!(table.prev_page());
    assert_eq!(table.view().page().page, 2);
    assert!(table.jump_to_page(" 1 "));
    assert!(!table.jump_to_page("nine"));
    assert!(!table.prev_page());

    assert!(table.set_page_size(5));
    assert!(!table.set_page_size(0));
    assert_eq!(table.page_count(), 5);
    assert_eq!(
        table.page_items(),
        (1..=5)
            .map(|number| PageItem::Page {
                number,
                current: number == 1
            })
            .collect::<Vec<_>>()
    );
}

#[test]
fn disabled_pagination_shows_every_row() {
    init_test_logging();
    let mut table = TableController::builder(numbered_rows(23), user_columns())
        .options(TableOptions::default().with_features(TableFeatures {
            pagination: false,
            ..TableFeatures::default()
        }))
        .build();
    assert_eq!(table.visible_rows().len(), 23);
    assert_eq!(
        table.page_summary(),
        PageSummary {
            first: 1,
            last: 23,
            total: 23
        }
    );
}

#[test]
fn replacing_rows_prunes_selection_and_expansion() {
    let mut table = table();
    table.toggle_row_selected(&id(1));
    table.toggle_row_selected(&id(2));
    table.toggle_row_expanded(&id(2));

    let remaining: Vec<Record> = user_rows()
        .into_iter()
        .filter(|row| row.row_id() != id(2))
        .collect();
    table.set_rows(remaining);
    assert_eq!(table.view().selected_rows().to_vec(), ids(&[1]));
    assert!(table.view().expanded_rows().is_empty());
    assert_eq!(table.visible_row_ids(), ids(&[1, 3]));
}

#[test]
fn selection_survives_filtering() {
    let mut table = table();
    table.toggle_row_selected(&id(2));
    table.set_filter("name", "jo");
    assert!(table.view().selected_rows().contains(&id(2)));
}

#[test]
fn row_actions_reach_the_callback() {
    let log = CallbackLog::new();
    let mut table = TableController::builder(user_rows(), user_columns())
        .on_row_action(log.row_action_callback::<Record>())
        .build();
    assert!(table.row_action(&id(1), &RowAction::Delete));
    assert!(table.row_action(&id(3), &RowAction::Custom("archive".into())));
    assert!(!table.row_action(&id(8), &RowAction::Edit));
    assert_eq!(
        log.row_actions(),
        vec![
            (id(1), RowAction::Delete),
            (id(3), RowAction::Custom("archive".into()))
        ]
    );
}

#[test]
fn derived_rows_are_memoized_on_pipeline_inputs() {
    let mut table = table();
    let first = table.visible_row_ids();
    table.toggle_row_selected(&id(1));
    table.toggle_row_expanded(&id(1));
    let second = table.visible_row_ids();
    assert_eq!(first, second);
    assert_eq!(table.computations(), 1);

    table.sort_by("name");
    let _ = table.visible_row_ids();
    assert_eq!(table.computations(), 2);
}

#[test]
fn filter_presets_save_apply_and_remove() {
    let mut table = table();
    table.set_filter("role", "user");
    assert!(table.save_filter_preset("Users"));
    assert!(!table.save_filter_preset("   "));
    table.clear_filters();
    assert_eq!(table.visible_row_ids(), ids(&[1, 2, 3]));

    assert!(table.apply_filter_preset("Users"));
    assert_eq!(table.visible_row_ids(), ids(&[2, 3]));
    assert!(!table.apply_filter_preset("Missing"));

    table.set_filter("role", "admin");
    assert!(table.save_filter_preset("Users"));
    assert_eq!(table.filter_presets().len(), 1);
    assert!(table.remove_filter_preset("Users"));
    assert!(!table.remove_filter_preset("Users"));
}

#[test]
fn distinct_values_feed_filter_dropdowns() {
    let table = table();
    assert_eq!(
        table.distinct_values("role"),
        vec![CellValue::from("admin"), CellValue::from("user")]
    );
    assert_eq!(
        table
            .columns()
            .iter()
            .find(|column| column.id == "age")
            .map(|column| column.kind),
        Some(ColumnType::Number)
    );
}

#[test]
fn filter_choices_prefer_declared_options_then_few_distinct_values() {
    let table = table();
    assert_eq!(
        table.filter_choices("role"),
        Some(vec![
            ColumnOption::new("admin", "Admin"),
            ColumnOption::new("user", "User"),
        ])
    );
    assert_eq!(
        table.filter_choices("active"),
        Some(vec![
            ColumnOption::new("true", "true"),
            ColumnOption::new("false", "false"),
        ])
    );
    assert_eq!(table.filter_choices("unknown"), None);

    let crowded = TableController::builder(numbered_rows(23), user_columns()).build();
    assert_eq!(crowded.filter_choices("name"), None);
}

#[test]
fn sorting_tolerates_nan_numbers() {
    init_test_logging();
    let rows: Vec<Record> = (0..64_u32)
        .map(|n| {
            let age = if n % 4 == 0 {
                f64::NAN
            } else {
                f64::from(n % 50)
            };
            Record::new(u64::from(n)).with("age", age)
        })
        .collect();
    let mut table = TableController::builder(rows, user_columns())
        .options(TableOptions::default().with_features(TableFeatures {
            pagination: false,
            ..TableFeatures::default()
        }))
        .build();
    assert!(table.sort_by("age"));

    let ages: Vec<f64> = table
        .visible_rows()
        .iter()
        .filter_map(|row| match row.field("age") {
            Some(CellValue::Number(age)) => Some(age),
            _ => None,
        })
        .collect();
    assert_eq!(ages.len(), 64);
    assert!(ages[..48].windows(2).all(|pair| pair[0] <= pair[1]));
    assert!(ages[48..].iter().all(|age| age.is_nan()));
}

#[test]
fn mixed_kind_cells_sort_nulls_first() -> anyhow::Result<()> {
    init_test_logging();
    let rows = records_from_json(
        r#"[
            {"id": "1", "age": "unknown"},
            {"id": "2", "age": 40},
            {"id": "3", "age": null},
            {"id": "4", "age": true},
            {"id": "5", "age": 18}
        ]"#,
    )?;
    let mut table = TableController::builder(rows, user_columns()).build();
    assert!(table.sort_by("age"));
    assert_eq!(
        table.visible_row_ids(),
        ["3", "4", "5", "2", "1"].map(RowId::from).to_vec()
    );
    Ok(())
}
