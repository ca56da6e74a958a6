use dioxus::prelude::*;
use std::path::PathBuf;

use serde_json::Value;

use crate::io::row_io;
use crate::state::columns::ColumnDef;
use crate::state::data_model::{Row, RowId, RowSet};
use crate::state::i18n::{self, Language};
use crate::ui::actions;
use crate::ui::grid::DataGrid;

const STYLES: Asset = asset!("/assets/styles.css");

/// Demo host page: an employee-records view owning the authoritative
/// row set and wiring every grid callback. The grid never touches this
/// data directly; deletes come back here and the updated rows flow down
/// on the next render.
#[component]
pub fn App() -> Element {
    let language = use_signal(Language::default);
    let mut data = use_signal(sample_employees);
    let file_path = use_signal::<Option<PathBuf>>(|| None);
    let error_message = use_signal::<Option<String>>(|| None);
    let mut status = use_signal::<Option<String>>(|| None);

    use_effect({
        let mut data = data;
        let mut file_path = file_path;
        let mut error_message = error_message;
        move || {
            if let Ok(path) = std::env::var("ROWGRID_OPEN") {
                let path = PathBuf::from(path);
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
    });

    let current_language = *language.read();
    let title = i18n::tr(current_language, "app.title");
    let open_label = i18n::tr(current_language, "app.open");
    let add_label = i18n::tr(current_language, "app.add_employee").to_string();

    rsx! {
        document::Stylesheet { href: STYLES }
        div { class: "app",
            div { class: "app-header",
                h2 { class: "app-title", "{title}" }
                select {
                    class: "toolbar-select toolbar-select-sm",
                    id: "select-language",
                    value: "{current_language.code()}",
                    onchange: {
                        let mut language = language;
                        move |evt: Event<FormData>| {
                            if let Some(next_language) = Language::from_code(&evt.value()) {
                                language.set(next_language);
                            }
                        }
                    },
                    for lang in Language::all().iter().copied() {
                        option { value: "{lang.code()}", "{i18n::tr(current_language, lang.label_key())}" }
                    }
                }
                button {
                    class: "toolbar-btn",
                    id: "btn-open",
                    onclick: move |_| {
                        spawn(async move {
                            actions::open_rows_file(data, language, file_path, error_message)
                                .await;
                        });
                    },
                    "\u{1F4C2} {open_label}"
                }
                if let Some(path) = file_path.read().as_ref() {
                    span { class: "file-path", "{path.display()}" }
                }
                if let Some(err) = error_message.read().as_ref() {
                    span { class: "error-message", id: "app-error", "{err}" }
                }
                if let Some(message) = status.read().as_ref() {
                    span { class: "status-message", id: "app-status", "{message}" }
                }
            }
            DataGrid {
                data: data.read().clone(),
                columns: employee_columns(current_language),
                language,
                add_label,
                search_key: Some("name".to_string()),
                on_add_click: move |_| {
                    data.with_mut(|rows| {
                        let id = next_employee_id(rows);
                        rows.push(draft_employee(id));
                    });
                    status.set(None);
                },
                on_edit_click: move |row: Row| {
                    let name = row
                        .get("name")
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_string();
                    status.set(Some(i18n::tr_with(
                        *language.read(),
                        "app.status_edit",
                        "{name}",
                        &name,
                    )));
                },
                on_delete: move |row: Row| {
                    data.with_mut(|rows| remove_rows(rows, std::slice::from_ref(&row)));
                    status.set(None);
                },
                on_delete_selected: move |selected: RowSet| {
                    data.with_mut(|rows| remove_rows(rows, &selected));
                    status.set(None);
                },
            }
        }
    }
}

fn employee_columns(language: Language) -> Vec<ColumnDef> {
    vec![
        ColumnDef::new("name", i18n::tr(language, "column.name")),
        ColumnDef::new("designation", i18n::tr(language, "column.designation")),
        ColumnDef::new("department", i18n::tr(language, "column.department")),
        ColumnDef::new("status", i18n::tr(language, "column.status")),
        ColumnDef::new("joined", i18n::tr(language, "column.joined")),
        ColumnDef::new("salary", i18n::tr(language, "column.salary")).format(format_salary),
    ]
}

fn format_salary(value: &Value) -> String {
    match value.as_i64() {
        Some(amount) => format!("Tk {amount}"),
        None => crate::state::data_model::display_value(value),
    }
}

fn remove_rows(rows: &mut RowSet, removed: &[Row]) {
    let removed_ids: Vec<Option<RowId>> = removed.iter().map(RowId::of).collect();
    rows.retain(|row| {
        let id = RowId::of(row);
        id.is_none() || !removed_ids.contains(&id)
    });
}

fn next_employee_id(rows: &RowSet) -> i64 {
    rows.iter()
        .filter_map(|row| match RowId::of(row) {
            Some(RowId::Int(n)) => Some(n),
            _ => None,
        })
        .max()
        .unwrap_or(0)
        + 1
}

fn draft_employee(id: i64) -> Row {
    employee(id, "New Employee", "", "", "", 0, "draft")
}

fn employee(
    id: i64,
    name: &str,
    designation: &str,
    department: &str,
    joined: &str,
    salary: i64,
    status: &str,
) -> Row {
    Row::from([
        ("id".to_string(), Value::Number(id.into())),
        ("name".to_string(), Value::String(name.to_string())),
        (
            "designation".to_string(),
            Value::String(designation.to_string()),
        ),
        (
            "department".to_string(),
            Value::String(department.to_string()),
        ),
        ("joined".to_string(), Value::String(joined.to_string())),
        ("salary".to_string(), Value::Number(salary.into())),
        ("status".to_string(), Value::String(status.to_string())),
    ])
}

fn sample_employees() -> RowSet {
    vec![
        employee(1, "Arif Hossain", "Sr. Engineer", "Production", "2019-03-11", 52000, "active"),
        employee(2, "Farzana Akter", "HR Officer", "Human Resources", "2020-07-01", 38000, "active"),
        employee(3, "Kamal Uddin", "Accountant", "Accounts", "2017-01-25", 45000, "active"),
        employee(4, "Shahana Begum", "Line Supervisor", "Production", "2021-02-14", 30000, "active"),
        employee(5, "Rashed Karim", "Store Keeper", "Inventory", "2018-11-02", 27000, "on leave"),
        employee(6, "Nusrat Jahan", "Jr. Executive", "Marketing", "2022-05-19", 25000, "active"),
        employee(7, "Tanvir Ahmed", "Asst. Manager", "Accounts", "2016-09-08", 58000, "active"),
        employee(8, "Mitu Rani Das", "Quality Inspector", "Quality Control", "2020-10-30", 29000, "active"),
        employee(9, "Jahidul Islam", "Electrician", "Maintenance", "2015-04-21", 33000, "active"),
        employee(10, "Sabina Yasmin", "Welfare Officer", "Human Resources", "2019-12-12", 36000, "active"),
        employee(11, "Omar Faruk", "Security In-charge", "Admin", "2014-06-05", 31000, "active"),
        employee(12, "Rumana Haque", "Payroll Officer", "Accounts", "2021-08-23", 40000, "active"),
    ]
}
