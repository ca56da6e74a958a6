use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde_json::Value;

pub type Row = BTreeMap<String, Value>;
pub type RowSet = Vec<Row>;

pub const ID_FIELD: &str = "id";

/// Stable identity of a row, taken from its `id` field.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RowId {
    Int(i64),
    Text(String),
}

impl RowId {
    pub fn of(row: &Row) -> Option<RowId> {
        match row.get(ID_FIELD)? {
            Value::Number(n) => n.as_i64().map(RowId::Int),
            Value::String(s) => Some(RowId::Text(s.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowId::Int(n) => write!(f, "{n}"),
            RowId::Text(s) => write!(f, "{s}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RowIdError {
    Missing(usize),
    Duplicate(RowId),
}

impl fmt::Display for RowIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowIdError::Missing(index) => {
                write!(f, "row {index} has no usable 'id' field")
            }
            RowIdError::Duplicate(id) => write!(f, "duplicate row id '{id}'"),
        }
    }
}

impl std::error::Error for RowIdError {}

/// Extracts the id of every row, rejecting missing and repeated ids.
/// Selection and drag reorder correlate rows by id, so ids must be
/// unique before a grid is built over the rows.
pub fn validate_ids(rows: &[Row]) -> Result<Vec<RowId>, RowIdError> {
    let mut seen = BTreeSet::new();
    let mut ids = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        let Some(id) = RowId::of(row) else {
            return Err(RowIdError::Missing(index));
        };
        if !seen.insert(id.clone()) {
            return Err(RowIdError::Duplicate(id));
        }
        ids.push(id);
    }
    Ok(ids)
}

/// Formats a JSON value for display in a table cell.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Label/value pairs for the details panel. The `id` field is identity,
/// not data, and is omitted.
pub fn detail_fields(row: &Row) -> Vec<(String, String)> {
    row.iter()
        .filter(|(key, _)| key.as_str() != ID_FIELD)
        .map(|(key, value)| (key.clone(), display_value(value)))
        .collect()
}
