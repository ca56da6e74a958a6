use dioxus::prelude::*;

use crate::state::data_model::{self, Row, RowSet};
use crate::state::i18n::{self, Language};

/// Read-only side panel listing every field of a row except its id.
/// Closing it, with or without the edit shortcut, never mutates the row.
#[component]
pub fn DetailsPanel(
    row: Row,
    language: Signal<Language>,
    on_close: EventHandler<()>,
    on_edit: EventHandler<Row>,
) -> Element {
    let lang = *language.read();
    let title = i18n::tr(lang, "dialog.details_title");
    let edit_label = i18n::tr(lang, "actions.edit");
    let close_label = i18n::tr(lang, "dialog.close");
    let fields = data_model::detail_fields(&row);
    let row_for_edit = row.clone();

    rsx! {
        div { class: "panel-backdrop",
            div { class: "details-panel", id: "details-panel",
                h3 { class: "dialog-title", "{title}" }
                dl { class: "details-fields",
                    for (label, value) in fields {
                        dt { class: "details-label", "{label}" }
                        dd { class: "details-value", "{value}" }
                    }
                }
                div { class: "dialog-buttons",
                    button {
                        class: "toolbar-btn",
                        id: "btn-details-edit",
                        onclick: move |_| on_edit.call(row_for_edit.clone()),
                        "\u{270F} {edit_label}"
                    }
                    button {
                        class: "toolbar-btn",
                        id: "btn-details-close",
                        onclick: move |_| on_close.call(()),
                        "{close_label}"
                    }
                }
            }
        }
    }
}

/// Single-row delete gate. Only an explicit confirm reaches the caller's
/// delete handler; cancel has no side effect.
#[component]
pub fn ConfirmDeleteDialog(
    row: Row,
    language: Signal<Language>,
    on_confirm: EventHandler<Row>,
    on_cancel: EventHandler<()>,
) -> Element {
    let lang = *language.read();
    let title = i18n::tr(lang, "dialog.delete_title");
    let question = i18n::tr(lang, "dialog.delete_question");
    let confirm_label = i18n::tr(lang, "dialog.confirm");
    let cancel_label = i18n::tr(lang, "dialog.cancel");
    let row_for_confirm = row.clone();

    rsx! {
        div { class: "panel-backdrop",
            div { class: "confirm-dialog", id: "confirm-delete",
                h3 { class: "dialog-title", "{title}" }
                p { "{question}" }
                div { class: "dialog-buttons",
                    button {
                        class: "toolbar-btn toolbar-btn-danger",
                        id: "btn-confirm-delete",
                        onclick: move |_| on_confirm.call(row_for_confirm.clone()),
                        "{confirm_label}"
                    }
                    button {
                        class: "toolbar-btn",
                        id: "btn-cancel-delete",
                        onclick: move |_| on_cancel.call(()),
                        "{cancel_label}"
                    }
                }
            }
        }
    }
}

/// Bulk delete gate over the selection snapshot taken when the dialog
/// opened. The message states the exact row count.
#[component]
pub fn ConfirmBulkDeleteDialog(
    rows: RowSet,
    language: Signal<Language>,
    on_confirm: EventHandler<RowSet>,
    on_cancel: EventHandler<()>,
) -> Element {
    let lang = *language.read();
    let title = i18n::tr(lang, "dialog.bulk_delete_title");
    let confirm_label = i18n::tr(lang, "dialog.confirm");
    let cancel_label = i18n::tr(lang, "dialog.cancel");
    let question = i18n::tr_with(
        lang,
        "dialog.bulk_delete_question",
        "{count}",
        &rows.len().to_string(),
    );
    let rows_for_confirm = rows.clone();

    rsx! {
        div { class: "panel-backdrop",
            div { class: "confirm-dialog", id: "confirm-bulk-delete",
                h3 { class: "dialog-title", "{title}" }
                p { "{question}" }
                div { class: "dialog-buttons",
                    button {
                        class: "toolbar-btn toolbar-btn-danger",
                        id: "btn-confirm-bulk-delete",
                        onclick: move |_| on_confirm.call(rows_for_confirm.clone()),
                        "{confirm_label}"
                    }
                    button {
                        class: "toolbar-btn",
                        id: "btn-cancel-bulk-delete",
                        onclick: move |_| on_cancel.call(()),
                        "{cancel_label}"
                    }
                }
            }
        }
    }
}
