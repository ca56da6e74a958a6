use std::collections::BTreeMap;

use serde_json::Value;

use rowgrid::state::columns::{self, ColumnDef};
use rowgrid::state::data_model::{Row, RowId, RowIdError, RowSet};
use rowgrid::state::grid_state::{GridState, SortOrder, DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS};

fn employee(id: i64, name: &str, department: &str, salary: i64) -> Row {
    BTreeMap::from([
        ("id".to_string(), Value::Number(id.into())),
        ("name".to_string(), Value::String(name.to_string())),
        (
            "department".to_string(),
            Value::String(department.to_string()),
        ),
        ("salary".to_string(), Value::Number(salary.into())),
    ])
}

fn sample_rows() -> RowSet {
    vec![
        employee(1, "Alice", "Accounts", 45000),
        employee(2, "Bob", "Production", 30000),
        employee(3, "Carol", "Accounts", 52000),
        employee(4, "Dan", "Production", 28000),
        employee(5, "Eve", "Marketing", 38000),
    ]
}

fn numbered_rows(count: usize) -> RowSet {
    (1..=count as i64)
        .map(|id| employee(id, &format!("Employee {id}"), "Production", 1000 * id))
        .collect()
}

fn grid(rows: RowSet) -> GridState {
    GridState::new(rows).unwrap()
}

fn names(state: &GridState, indices: &[usize]) -> Vec<String> {
    indices
        .iter()
        .map(|&i| state.row(i).unwrap()["name"].as_str().unwrap().to_string())
        .collect()
}

// --- construction ---

#[test]
fn test_new_rejects_duplicate_ids() {
    let mut rows = sample_rows();
    rows.push(employee(3, "Imposter", "Admin", 1));
    assert_eq!(
        GridState::new(rows).unwrap_err(),
        RowIdError::Duplicate(RowId::Int(3))
    );
}

#[test]
fn test_new_rejects_missing_id() {
    let mut rows = sample_rows();
    rows.push(BTreeMap::from([(
        "name".to_string(),
        Value::String("Nobody".to_string()),
    )]));
    assert_eq!(GridState::new(rows).unwrap_err(), RowIdError::Missing(5));
}

#[test]
fn test_default_page_size_is_first_option() {
    let state = grid(sample_rows());
    assert_eq!(state.page_size(), DEFAULT_PAGE_SIZE);
    assert_eq!(PAGE_SIZE_OPTIONS[0], DEFAULT_PAGE_SIZE);
}

// --- pagination ---

#[test]
fn test_pagination_three_pages_of_25_rows() {
    let mut state = grid(numbered_rows(25));
    assert_eq!(state.page_count(), 3);
    assert_eq!(state.page_indices().len(), 10);

    state.set_page(1);
    assert_eq!(state.page_indices().len(), 10);

    state.set_page(2);
    assert_eq!(state.page_indices().len(), 5);
}

#[test]
fn test_set_page_clamps_to_last_page() {
    let mut state = grid(numbered_rows(25));
    state.set_page(99);
    assert_eq!(state.page_index(), 2);
}

#[test]
fn test_page_size_change_keeps_page_in_range() {
    let mut state = grid(numbered_rows(25));
    state.set_page(2);
    assert!(state.set_page_size(30));
    assert_eq!(state.page_count(), 1);
    assert_eq!(state.page_index(), 0);
}

#[test]
fn test_set_page_size_rejects_unknown_size() {
    let mut state = grid(numbered_rows(25));
    assert!(!state.set_page_size(15));
    assert_eq!(state.page_size(), DEFAULT_PAGE_SIZE);
}

#[test]
fn test_next_prev_page_bounds() {
    let mut state = grid(numbered_rows(25));
    assert!(!state.prev_page());
    assert!(state.next_page());
    assert!(state.next_page());
    assert!(!state.next_page());
    assert_eq!(state.page_index(), 2);
    assert!(state.prev_page());
    assert_eq!(state.page_index(), 1);
}

// --- filtering ---

#[test]
fn test_filter_matches_search_key_case_insensitively() {
    let mut state = grid(sample_rows()).with_search_key(Some("name".to_string()));
    assert_eq!(state.search_key(), Some("name"));
    state.set_filter_query("aLi".to_string());
    assert_eq!(names(&state, &state.visible_indices()), vec!["Alice"]);
}

#[test]
fn test_filter_without_search_key_matches_everything() {
    let mut state = grid(sample_rows());
    state.set_filter_query("zzz".to_string());
    assert_eq!(state.visible_indices().len(), 5);
}

#[test]
fn test_filter_edit_resets_page_index() {
    let mut state = grid(numbered_rows(25)).with_search_key(Some("name".to_string()));
    state.set_page(2);
    state.set_filter_query("Employee 1".to_string());
    assert_eq!(state.page_index(), 0);
}

#[test]
fn test_clearing_filter_restores_unfiltered_view() {
    let mut state = grid(sample_rows()).with_search_key(Some("name".to_string()));
    let before = state.visible_indices();

    state.set_filter_query("bob".to_string());
    assert_eq!(state.visible_indices().len(), 1);

    state.clear_filter();
    assert_eq!(state.visible_indices(), before);
}

#[test]
fn test_empty_filter_result_yields_no_indices() {
    let mut state = grid(sample_rows()).with_search_key(Some("name".to_string()));
    state.set_filter_query("nobody here".to_string());
    assert!(state.visible_indices().is_empty());
    assert_eq!(state.page_count(), 0);
    assert_eq!(state.page_index(), 0);
}

// --- sorting ---

#[test]
fn test_sort_is_a_view_and_never_reorders_working_copy() {
    let mut state = grid(sample_rows());
    state.toggle_sort("salary", false);

    assert_eq!(
        names(&state, &state.visible_indices()),
        vec!["Dan", "Bob", "Eve", "Alice", "Carol"]
    );
    // Working order untouched.
    assert_eq!(state.row(0).unwrap()["name"], Value::String("Alice".to_string()));
}

#[test]
fn test_sort_toggle_cycles_asc_desc_none() {
    let mut state = grid(sample_rows());

    state.toggle_sort("salary", false);
    assert_eq!(state.sort_order("salary"), Some(SortOrder::Asc));

    state.toggle_sort("salary", false);
    assert_eq!(state.sort_order("salary"), Some(SortOrder::Desc));
    assert_eq!(
        names(&state, &state.visible_indices()),
        vec!["Carol", "Alice", "Eve", "Bob", "Dan"]
    );

    state.toggle_sort("salary", false);
    assert_eq!(state.sort_order("salary"), None);
    assert_eq!(
        names(&state, &state.visible_indices()),
        vec!["Alice", "Bob", "Carol", "Dan", "Eve"]
    );
}

#[test]
fn test_additive_sort_applies_in_priority_order() {
    let mut state = grid(sample_rows());
    state.toggle_sort("department", false);
    state.toggle_sort("salary", true);

    assert_eq!(
        names(&state, &state.visible_indices()),
        vec!["Alice", "Carol", "Eve", "Dan", "Bob"]
    );
    assert_eq!(state.sort_specs().len(), 2);
}

#[test]
fn test_plain_toggle_replaces_multi_sort() {
    let mut state = grid(sample_rows());
    state.toggle_sort("department", false);
    state.toggle_sort("salary", true);
    state.toggle_sort("name", false);
    assert_eq!(state.sort_specs().len(), 1);
    assert_eq!(state.sort_order("name"), Some(SortOrder::Asc));
}

#[test]
fn test_sort_puts_missing_values_first() {
    let mut rows = sample_rows();
    rows[2].remove("salary");
    let mut state = grid(rows);
    state.toggle_sort("salary", false);
    assert_eq!(names(&state, &state.visible_indices())[0], "Carol");
}

// --- selection ---

#[test]
fn test_select_all_selects_only_current_page() {
    let mut state = grid(numbered_rows(25));
    state.set_page_selected(true);
    assert_eq!(state.selection_len(), 10);
    assert!(state.is_selected(&RowId::Int(1)));
    assert!(state.is_selected(&RowId::Int(10)));
    assert!(!state.is_selected(&RowId::Int(11)));
    assert!(state.page_fully_selected());

    state.set_page(1);
    assert!(!state.page_fully_selected());
}

#[test]
fn test_deselect_page_keeps_other_pages() {
    let mut state = grid(numbered_rows(25));
    state.set_page_selected(true);
    state.set_page(1);
    state.set_page_selected(true);
    assert_eq!(state.selection_len(), 20);

    state.set_page_selected(false);
    assert_eq!(state.selection_len(), 10);
    assert!(state.is_selected(&RowId::Int(5)));
    assert!(!state.is_selected(&RowId::Int(15)));
}

#[test]
fn test_toggle_selected_roundtrip() {
    let mut state = grid(sample_rows());
    let id = RowId::Int(2);
    state.toggle_selected(&id);
    assert!(state.is_selected(&id));
    state.toggle_selected(&id);
    assert!(!state.is_selected(&id));
}

#[test]
fn test_toggle_unknown_id_is_ignored() {
    let mut state = grid(sample_rows());
    state.toggle_selected(&RowId::Int(99));
    assert!(!state.has_selection());
}

#[test]
fn test_selected_rows_snapshot_and_clear() {
    let mut state = grid(sample_rows());
    state.toggle_selected(&RowId::Int(1));
    state.toggle_selected(&RowId::Int(3));

    let snapshot = state.selected_rows();
    let snapshot_names: Vec<&str> = snapshot
        .iter()
        .map(|row| row["name"].as_str().unwrap())
        .collect();
    assert_eq!(snapshot_names, vec!["Alice", "Carol"]);

    state.clear_selection();
    assert!(!state.has_selection());
    assert_eq!(state.len(), 5);
}

#[test]
fn test_page_fully_selected_is_false_for_empty_page() {
    let mut state = grid(sample_rows()).with_search_key(Some("name".to_string()));
    state.set_filter_query("nobody".to_string());
    assert!(!state.page_fully_selected());
}

// --- reorder ---

#[test]
fn test_move_row_preserves_relative_order_and_values() {
    let mut state = grid(sample_rows());
    let before: RowSet = state.rows().clone();

    assert!(state.move_row(1, 3));
    let order = names(&state, &state.visible_indices());
    assert_eq!(order, vec!["Alice", "Carol", "Dan", "Bob", "Eve"]);

    // Every row keeps its fields; only positions changed.
    let mut after: RowSet = state.rows().clone();
    after.sort_by_key(|row| row["id"].as_i64());
    assert_eq!(after, before);
}

#[test]
fn test_move_row_by_id() {
    let mut state = grid(sample_rows());
    assert!(state.move_row_by_id(&RowId::Int(5), &RowId::Int(1)));
    assert_eq!(
        names(&state, &state.visible_indices()),
        vec!["Eve", "Alice", "Bob", "Carol", "Dan"]
    );
    assert_eq!(state.row_id(0), Some(&RowId::Int(5)));
}

#[test]
fn test_move_row_rejects_bad_indices() {
    let mut state = grid(sample_rows());
    assert!(!state.move_row(0, 9));
    assert!(!state.move_row(9, 0));
    assert!(!state.move_row(2, 2));
    assert!(!state.move_row_by_id(&RowId::Int(1), &RowId::Int(42)));
}

#[test]
fn test_reorder_does_not_touch_selection() {
    let mut state = grid(sample_rows());
    state.toggle_selected(&RowId::Int(2));
    state.move_row(1, 4);
    assert!(state.is_selected(&RowId::Int(2)));
}

// --- replace ---

#[test]
fn test_replace_rows_prunes_dead_selection_entries() {
    let mut state = grid(sample_rows());
    state.toggle_selected(&RowId::Int(2));
    state.toggle_selected(&RowId::Int(4));

    let survivors: RowSet = sample_rows()
        .into_iter()
        .filter(|row| row["id"] != Value::Number(4.into()))
        .collect();
    state.replace_rows(survivors).unwrap();

    assert!(state.is_selected(&RowId::Int(2)));
    assert!(!state.is_selected(&RowId::Int(4)));
    assert_eq!(state.len(), 4);
}

#[test]
fn test_replace_rows_clamps_page() {
    let mut state = grid(numbered_rows(25));
    state.set_page(2);
    state.replace_rows(numbered_rows(5)).unwrap();
    assert_eq!(state.page_index(), 0);
}

#[test]
fn test_replace_rows_with_duplicates_leaves_state_unchanged() {
    let mut state = grid(sample_rows());
    state.toggle_selected(&RowId::Int(1));

    let bad = vec![employee(9, "X", "A", 1), employee(9, "Y", "B", 2)];
    assert!(state.replace_rows(bad).is_err());
    assert_eq!(state.len(), 5);
    assert!(state.is_selected(&RowId::Int(1)));
}

#[test]
fn test_replace_rows_keeps_sort_and_filter() {
    let mut state = grid(sample_rows()).with_search_key(Some("name".to_string()));
    state.toggle_sort("salary", false);
    state.set_filter_query("a".to_string());

    state.replace_rows(sample_rows()).unwrap();
    assert_eq!(state.sort_order("salary"), Some(SortOrder::Asc));
    assert_eq!(state.filter_query(), "a");
}

// --- column visibility ---

#[test]
fn test_hidden_columns_are_dropped_from_visible_set() {
    let mut state = grid(sample_rows());
    let augmented = columns::augment_columns(&[
        ColumnDef::new("name", "Name"),
        ColumnDef::new("salary", "Salary"),
    ]);

    state.set_column_visible("salary", false);
    let visible_cols = state.visible_columns(&augmented);
    let visible: Vec<&str> = visible_cols.iter().map(|col| col.key.as_str()).collect();
    assert_eq!(visible, vec!["drag", "select", "name", "actions"]);

    state.set_column_visible("salary", true);
    assert_eq!(state.visible_columns(&augmented).len(), 5);
}

#[test]
fn test_reserved_columns_survive_visibility_flags() {
    let mut state = grid(sample_rows());
    let augmented = columns::augment_columns(&[ColumnDef::new("name", "Name")]);
    state.set_column_visible("select", false);
    assert_eq!(state.visible_columns(&augmented).len(), augmented.len());
}
