use std::collections::BTreeMap;

use serde_json::Value;

use rowgrid::io::row_io;
use rowgrid::state::data_model::{self, Row, RowId, RowSet};
use rowgrid::state::grid_state::GridState;

fn load_fixture(name: &str) -> RowSet {
    let manifest_dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    let path = manifest_dir.join("tests").join("data").join(name);
    row_io::load_rows(&path).unwrap()
}

fn host_remove(host: &mut RowSet, removed: &[Row]) {
    let ids: Vec<Option<RowId>> = removed.iter().map(RowId::of).collect();
    host.retain(|row| !ids.contains(&RowId::of(row)));
}

#[test]
fn test_e2e_bulk_delete_flow() {
    // Host owns the data; the grid only holds a working copy.
    let mut host = load_fixture("employees.json");
    let mut state = GridState::new(host.clone()).unwrap();

    state.toggle_selected(&RowId::Int(2));
    state.toggle_selected(&RowId::Int(5));

    // Dialog opens on a snapshot of the selection.
    let snapshot = state.selected_rows();
    assert_eq!(snapshot.len(), 2);

    // Confirm: handler fires once with the snapshot, selection clears.
    host_remove(&mut host, &snapshot);
    state.clear_selection();
    assert!(!state.has_selection());

    // Host re-supplies the updated rows on the next render.
    state.replace_rows(host.clone()).unwrap();
    assert_eq!(state.len(), 4);
    assert!(state
        .rows()
        .iter()
        .all(|row| RowId::of(row) != Some(RowId::Int(2))));
}

#[test]
fn test_e2e_two_row_dataset_from_grid_contract() {
    let a = BTreeMap::from([
        ("id".to_string(), Value::Number(1.into())),
        ("name".to_string(), Value::String("A".to_string())),
    ]);
    let b = BTreeMap::from([
        ("id".to_string(), Value::Number(2.into())),
        ("name".to_string(), Value::String("B".to_string())),
    ]);
    let mut host = vec![a.clone(), b.clone()];
    let mut state = GridState::new(host.clone()).unwrap();

    state.toggle_selected(&RowId::Int(2));
    let snapshot = state.selected_rows();
    assert_eq!(snapshot, vec![b]);

    host_remove(&mut host, &snapshot);
    state.clear_selection();
    state.replace_rows(host).unwrap();

    assert!(!state.has_selection());
    assert_eq!(state.rows(), &vec![a]);
}

#[test]
fn test_e2e_filter_sort_select_paginate() {
    let mut state = GridState::new(load_fixture("employees.json"))
        .unwrap()
        .with_search_key(Some("name".to_string()));

    state.toggle_sort("salary", false);
    state.set_filter_query("an".to_string());

    // "an" matches Farzana Akter, Shahana Begum and Nusrat Jahan,
    // cheapest salary first.
    let visible = state.visible_indices();
    let names: Vec<&str> = visible
        .iter()
        .map(|&i| state.row(i).unwrap()["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Nusrat Jahan", "Shahana Begum", "Farzana Akter"]);

    state.set_page_selected(true);
    assert_eq!(state.selection_len(), 3);

    state.clear_filter();
    assert_eq!(state.visible_indices().len(), 6);
    // Selection made under the filter is still honoured afterwards.
    assert_eq!(state.selection_len(), 3);
}

#[test]
fn test_e2e_details_panel_fields_for_fixture_row() {
    let rows = load_fixture("employees.json");
    let fields = data_model::detail_fields(&rows[0]);

    assert_eq!(fields.len(), rows[0].len() - 1);
    assert!(fields.iter().all(|(label, _)| label != "id"));
    assert!(fields.contains(&("name".to_string(), "Arif Hossain".to_string())));
    assert!(fields.contains(&("salary".to_string(), "52000".to_string())));
}

#[test]
fn test_e2e_reorder_survives_filter_roundtrip() {
    let mut state = GridState::new(load_fixture("employees.json"))
        .unwrap()
        .with_search_key(Some("name".to_string()));

    assert!(state.move_row_by_id(&RowId::Int(6), &RowId::Int(1)));
    assert_eq!(state.row_id(0), Some(&RowId::Int(6)));

    state.set_filter_query("kamal".to_string());
    assert_eq!(state.visible_indices().len(), 1);
    state.clear_filter();

    // The manual order is still in effect after the filter round trip.
    assert_eq!(state.row_id(0), Some(&RowId::Int(6)));
    assert_eq!(state.visible_indices()[0], 0);
}
