use dioxus::prelude::*;
use std::path::PathBuf;

use crate::io::row_io;
use crate::state::data_model::RowSet;
use crate::state::i18n::{self, Language};

/// Lets the host page swap its row set for the contents of a JSON file.
/// Loading validates the unique-id invariant before the rows reach the
/// grid; a bad file leaves the current rows in place.
pub async fn open_rows_file(
    mut data: Signal<RowSet>,
    language: Signal<Language>,
    mut file_path: Signal<Option<PathBuf>>,
    mut error_message: Signal<Option<String>>,
) {
    let task = rfd::AsyncFileDialog::new()
        .add_filter(i18n::tr(*language.read(), "dialog.json_filter"), &["json"])
        .pick_file()
        .await;

    if let Some(handle) = task {
        let path = handle.path().to_path_buf();
        match row_io::load_rows(&path) {
            Ok(rows) => {
                data.set(rows);
                file_path.set(Some(path));
                error_message.set(None);
            }
            Err(e) => {
                error_message.set(Some(e.to_string()));
            }
        }
    }
}
