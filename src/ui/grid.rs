use dioxus::html::input_data::keyboard_types::Modifiers;
use dioxus::prelude::*;

use crate::state::columns::{self, ColumnDef, ACTIONS_COLUMN, DRAG_COLUMN, SELECT_COLUMN};
use crate::state::data_model::{self, Row, RowId, RowSet};
use crate::state::grid_state::{GridState, SortOrder, PAGE_SIZE_OPTIONS};
use crate::state::i18n::{self, Language};
use crate::ui::dialogs::{ConfirmBulkDeleteDialog, ConfirmDeleteDialog, DetailsPanel};

/// Generic data grid: selection, sorting, one-key filtering, pagination,
/// drag reordering and row actions over caller-owned rows.
///
/// The grid never persists anything itself; add/edit/delete go through
/// the caller's handlers and the caller re-supplies `data` afterwards.
/// Drag reorder only changes the grid's working copy and is not
/// reported back to the caller.
#[component]
pub fn DataGrid(
    data: RowSet,
    columns: Vec<ColumnDef>,
    language: Signal<Language>,
    #[props(default = true)] show_toolbar: bool,
    #[props(default = true)] show_actions: bool,
    #[props(default = true)] show_column_customizer: bool,
    #[props(default)] add_label: String,
    #[props(default)] search_key: Option<String>,
    on_add_click: EventHandler<()>,
    on_edit_click: EventHandler<Row>,
    on_delete: EventHandler<Row>,
    on_delete_selected: EventHandler<RowSet>,
) -> Element {
    let mut grid = use_signal(GridState::default);
    let mut input_error = use_signal::<Option<String>>(|| None);
    let mut details_row = use_signal::<Option<Row>>(|| None);
    let mut pending_delete = use_signal::<Option<Row>>(|| None);
    let mut pending_bulk = use_signal::<Option<RowSet>>(|| None);
    let drag_source = use_signal::<Option<RowId>>(|| None);
    let mut toast = use_signal::<Option<String>>(|| None);
    let mut columns_menu_open = use_signal(|| false);

    // Re-seed the working copy whenever the host hands over new rows.
    use_effect(use_reactive(
        (&data, &search_key),
        move |(data, search_key)| {
            grid.with_mut(|state| {
                state.set_search_key(search_key);
                match state.replace_rows(data) {
                    Ok(()) => input_error.set(None),
                    Err(err) => input_error.set(Some(err.to_string())),
                }
            });
        },
    ));

    let lang = *language.read();
    let snapshot = grid.read().clone();

    if let Some(err) = input_error.read().as_ref() {
        return rsx! {
            p { class: "grid-error", id: "grid-error", "{err}" }
        };
    }

    let augmented = columns::augment_columns(&columns);
    let mut visible_cols = snapshot.visible_columns(&augmented);
    if !show_actions {
        visible_cols.retain(|col| col.key != ACTIONS_COLUMN);
    }

    let page = snapshot.page_indices();
    let page_count = snapshot.page_count();
    let selection_len = snapshot.selection_len();
    let filter_query = snapshot.filter_query().to_string();
    let customizable: Vec<ColumnDef> = augmented
        .iter()
        .filter(|col| !col.is_reserved())
        .cloned()
        .collect();

    let search_placeholder = i18n::tr(lang, "grid.search_placeholder");
    let delete_selected_label = i18n::tr(lang, "grid.delete_selected");
    let columns_label = i18n::tr(lang, "grid.columns");
    let no_results_label = i18n::tr(lang, "grid.no_results");
    let prev_label = i18n::tr(lang, "grid.prev_page");
    let next_label = i18n::tr(lang, "grid.next_page");
    let page_info = page_info_label(lang, snapshot.page_index(), page_count);
    let colspan = visible_cols.len().to_string();

    rsx! {
        div { class: "data-grid",
            if show_toolbar {
                div { class: "grid-toolbar",
                    button {
                        class: "toolbar-btn",
                        id: "btn-grid-add",
                        onclick: move |_| on_add_click.call(()),
                        "\u{2795} {add_label}"
                    }
                    if search_key.is_some() {
                        input {
                            class: "toolbar-input",
                            id: "input-grid-filter",
                            placeholder: "{search_placeholder}",
                            value: "{filter_query}",
                            oninput: move |evt| {
                                grid.with_mut(|state| state.set_filter_query(evt.value()));
                            }
                        }
                    }
                    if selection_len > 0 {
                        button {
                            class: "toolbar-btn toolbar-btn-danger",
                            id: "btn-grid-delete-selected",
                            onclick: move |_| {
                                // Snapshot the selection at dialog-open time.
                                let rows = grid.read().selected_rows();
                                pending_bulk.set(Some(rows));
                            },
                            "\u{1F5D1} {delete_selected_label} ({selection_len})"
                        }
                    }
                    if show_column_customizer {
                        div { class: "columns-menu",
                            button {
                                class: "toolbar-btn",
                                id: "btn-grid-columns",
                                onclick: move |_| {
                                    let open = *columns_menu_open.read();
                                    columns_menu_open.set(!open);
                                },
                                "\u{2699} {columns_label}"
                            }
                            if *columns_menu_open.read() {
                                div { class: "columns-menu-list", id: "columns-menu-list",
                                    for col in customizable {
                                        ColumnToggle { column: col, grid }
                                    }
                                }
                            }
                        }
                    }
                }
            }
            table { class: "grid-table",
                thead {
                    tr {
                        for col in &visible_cols {
                            GridHeaderCell {
                                column: col.clone(),
                                grid,
                                all_on_page: snapshot.page_fully_selected(),
                            }
                        }
                    }
                }
                tbody {
                    if page.is_empty() {
                        tr {
                            td {
                                class: "no-results",
                                id: "no-results",
                                colspan: "{colspan}",
                                "{no_results_label}"
                            }
                        }
                    }
                    for index in page {
                        if let Some((row, row_id)) = snapshot.row(index).zip(snapshot.row_id(index)) {
                            GridRow {
                                row: row.clone(),
                                row_id: row_id.clone(),
                                columns: visible_cols.clone(),
                                language,
                                selected: snapshot.is_selected(row_id),
                                grid,
                                drag_source,
                                on_view: move |row: Row| details_row.set(Some(row)),
                                on_edit: move |row: Row| on_edit_click.call(row),
                                on_delete_request: move |row: Row| pending_delete.set(Some(row)),
                            }
                        }
                    }
                }
            }
            div { class: "grid-pager",
                select {
                    class: "toolbar-select toolbar-select-sm",
                    id: "select-page-size",
                    value: "{snapshot.page_size()}",
                    onchange: move |evt| {
                        if let Ok(size) = evt.value().parse::<usize>() {
                            grid.with_mut(|state| {
                                state.set_page_size(size);
                            });
                        }
                    },
                    for size in PAGE_SIZE_OPTIONS {
                        option { value: "{size}", "{size}" }
                    }
                }
                button {
                    class: "toolbar-btn",
                    id: "btn-prev-page",
                    disabled: snapshot.page_index() == 0,
                    onclick: move |_| {
                        grid.with_mut(|state| {
                            state.prev_page();
                        });
                    },
                    "\u{2190} {prev_label}"
                }
                span { class: "page-info", id: "page-info", "{page_info}" }
                button {
                    class: "toolbar-btn",
                    id: "btn-next-page",
                    disabled: snapshot.page_index() + 1 >= page_count,
                    onclick: move |_| {
                        grid.with_mut(|state| {
                            state.next_page();
                        });
                    },
                    "{next_label} \u{2192}"
                }
            }

            if let Some(row) = details_row.read().clone() {
                DetailsPanel {
                    row,
                    language,
                    on_close: move |_| details_row.set(None),
                    on_edit: move |row: Row| {
                        details_row.set(None);
                        on_edit_click.call(row);
                    }
                }
            }
            if let Some(row) = pending_delete.read().clone() {
                ConfirmDeleteDialog {
                    row,
                    language,
                    on_confirm: move |row: Row| {
                        pending_delete.set(None);
                        on_delete.call(row);
                    },
                    on_cancel: move |_| pending_delete.set(None),
                }
            }
            if let Some(rows) = pending_bulk.read().clone() {
                ConfirmBulkDeleteDialog {
                    rows,
                    language,
                    on_confirm: move |rows: RowSet| {
                        pending_bulk.set(None);
                        on_delete_selected.call(rows);
                        grid.with_mut(|state| state.clear_selection());
                        // Optimistic: the handler's outcome is not awaited.
                        let message = i18n::tr(*language.read(), "toast.rows_deleted");
                        toast.set(Some(message.to_string()));
                        spawn(async move {
                            tokio::time::sleep(std::time::Duration::from_secs(2)).await;
                            toast.set(None);
                        });
                    },
                    on_cancel: move |_| pending_bulk.set(None),
                }
            }
            if let Some(message) = toast.read().as_ref() {
                div { class: "grid-toast", id: "grid-toast", "\u{2714} {message}" }
            }
        }
    }
}

#[component]
fn ColumnToggle(column: ColumnDef, grid: Signal<GridState>) -> Element {
    let visible = grid.read().is_column_visible(&column.key);

    rsx! {
        label { class: "columns-menu-item",
            input {
                r#type: "checkbox",
                id: format!("toggle-col-{}", sanitize_id(&column.key)),
                checked: visible,
                onchange: {
                    let key = column.key.clone();
                    let mut grid = grid;
                    move |evt: Event<FormData>| {
                        let checked = evt.value() == "true";
                        grid.with_mut(|state| state.set_column_visible(&key, checked));
                    }
                }
            }
            "{column.header}"
        }
    }
}

#[component]
fn GridHeaderCell(column: ColumnDef, grid: Signal<GridState>, all_on_page: bool) -> Element {
    match column.key.as_str() {
        DRAG_COLUMN => rsx! {
            th { class: "col-drag" }
        },
        SELECT_COLUMN => rsx! {
            th { class: "col-select",
                input {
                    r#type: "checkbox",
                    id: "select-all-page",
                    checked: all_on_page,
                    onchange: {
                        let mut grid = grid;
                        move |evt: Event<FormData>| {
                            let checked = evt.value() == "true";
                            grid.with_mut(|state| state.set_page_selected(checked));
                        }
                    }
                }
            }
        },
        ACTIONS_COLUMN => rsx! {
            th { class: "col-actions" }
        },
        _ => {
            let sort_marker = match grid.read().sort_order(&column.key) {
                Some(SortOrder::Asc) => " \u{25B2}",
                Some(SortOrder::Desc) => " \u{25BC}",
                None => "",
            };
            let sortable = column.sortable;
            rsx! {
                th {
                    class: if sortable { "sortable" } else { "" },
                    id: format!("col-{}", sanitize_id(&column.key)),
                    style: column.width.map(|w| format!("width:{w}px")),
                    onclick: {
                        let key = column.key.clone();
                        let mut grid = grid;
                        move |evt: Event<MouseData>| {
                            if sortable {
                                let additive = evt.modifiers().contains(Modifiers::SHIFT);
                                grid.with_mut(|state| state.toggle_sort(&key, additive));
                            }
                        }
                    },
                    "{column.header}{sort_marker}"
                }
            }
        }
    }
}

#[component]
#[allow(clippy::too_many_arguments)]
fn GridRow(
    row: Row,
    row_id: RowId,
    columns: Vec<ColumnDef>,
    language: Signal<Language>,
    selected: bool,
    grid: Signal<GridState>,
    drag_source: Signal<Option<RowId>>,
    on_view: EventHandler<Row>,
    on_edit: EventHandler<Row>,
    on_delete_request: EventHandler<Row>,
) -> Element {
    let lang = *language.read();
    let view_title = i18n::tr(lang, "actions.view");
    let edit_title = i18n::tr(lang, "actions.edit");
    let delete_title = i18n::tr(lang, "actions.delete");
    let row_class = if selected { "selected-row" } else { "" };
    let drop_id = row_id.clone();

    rsx! {
        tr {
            class: "{row_class}",
            id: format!("row-{row_id}"),
            ondragover: move |evt| evt.prevent_default(),
            ondrop: {
                let mut grid = grid;
                let mut drag_source = drag_source;
                move |_| {
                    let source = drag_source.read().clone();
                    if let Some(source) = source {
                        grid.with_mut(|state| {
                            state.move_row_by_id(&source, &drop_id);
                        });
                    }
                    drag_source.set(None);
                }
            },
            for col in &columns {
                match col.key.as_str() {
                    DRAG_COLUMN => rsx! {
                        td {
                            class: "drag-handle",
                            draggable: true,
                            ondragstart: {
                                let id = row_id.clone();
                                let mut drag_source = drag_source;
                                move |_| drag_source.set(Some(id.clone()))
                            },
                            ondragend: {
                                let mut drag_source = drag_source;
                                move |_| drag_source.set(None)
                            },
                            "\u{2630}"
                        }
                    },
                    SELECT_COLUMN => rsx! {
                        td { class: "col-select",
                            input {
                                r#type: "checkbox",
                                id: format!("select-row-{row_id}"),
                                checked: selected,
                                onchange: {
                                    let id = row_id.clone();
                                    let mut grid = grid;
                                    move |_| {
                                        grid.with_mut(|state| state.toggle_selected(&id));
                                    }
                                }
                            }
                        }
                    },
                    ACTIONS_COLUMN => rsx! {
                        td { class: "col-actions",
                            button {
                                class: "row-action-btn",
                                id: format!("btn-view-{row_id}"),
                                title: "{view_title}",
                                onclick: {
                                    let row = row.clone();
                                    move |_| on_view.call(row.clone())
                                },
                                "\u{1F441}"
                            }
                            button {
                                class: "row-action-btn",
                                id: format!("btn-edit-{row_id}"),
                                title: "{edit_title}",
                                onclick: {
                                    let row = row.clone();
                                    move |_| on_edit.call(row.clone())
                                },
                                "\u{270F}"
                            }
                            button {
                                class: "row-action-btn row-action-danger",
                                id: format!("btn-delete-{row_id}"),
                                title: "{delete_title}",
                                onclick: {
                                    let row = row.clone();
                                    move |_| on_delete_request.call(row.clone())
                                },
                                "\u{1F5D1}"
                            }
                        }
                    },
                    _ => rsx! {
                        td {
                            class: "cell",
                            id: format!("cell-{}-{}", row_id, sanitize_id(&col.key)),
                            "{cell_text(&row, col)}"
                        }
                    },
                }
            }
        }
    }
}

fn cell_text(row: &Row, column: &ColumnDef) -> String {
    let Some(value) = row.get(&column.key) else {
        return String::new();
    };
    match column.format {
        Some(format) => format(value),
        None => data_model::display_value(value),
    }
}

fn page_info_label(language: Language, page_index: usize, page_count: usize) -> String {
    i18n::tr(language, "grid.page_info")
        .replace("{page}", &(page_index + 1).min(page_count.max(1)).to_string())
        .replace("{pages}", &page_count.max(1).to_string())
}

fn sanitize_id(value: &str) -> String {
    value
        .chars()
        .map(|ch| if ch.is_ascii_alphanumeric() { ch } else { '_' })
        .collect()
}
