use std::fs;
use std::io;
use std::path::Path;

use serde_json::Value;

use crate::state::data_model::{self, RowIdError, RowSet};

#[derive(Debug)]
pub enum RowIoError {
    Io(io::Error),
    Parse(serde_json::Error),
    NotAnArray,
    NotArrayOfObjects,
    BadId(RowIdError),
}

impl std::fmt::Display for RowIoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowIoError::Io(e) => write!(f, "IO error: {e}"),
            RowIoError::Parse(e) => write!(f, "JSON parse error: {e}"),
            RowIoError::NotAnArray => write!(f, "JSON root is not an array"),
            RowIoError::NotArrayOfObjects => {
                write!(f, "JSON array contains non-object elements")
            }
            RowIoError::BadId(e) => write!(f, "invalid row ids: {e}"),
        }
    }
}

impl std::error::Error for RowIoError {}

impl From<io::Error> for RowIoError {
    fn from(e: io::Error) -> Self {
        RowIoError::Io(e)
    }
}

impl From<serde_json::Error> for RowIoError {
    fn from(e: serde_json::Error) -> Self {
        RowIoError::Parse(e)
    }
}

impl From<RowIdError> for RowIoError {
    fn from(e: RowIdError) -> Self {
        RowIoError::BadId(e)
    }
}

/// Loads a JSON array of objects as grid rows. The unique-id invariant
/// is enforced here, at the boundary, so a bad file never reaches the
/// grid.
pub fn load_rows(path: &Path) -> Result<RowSet, RowIoError> {
    let content = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&content)?;

    let rows = match value {
        Value::Array(arr) => {
            let mut rows = RowSet::with_capacity(arr.len());
            for item in arr {
                match item {
                    Value::Object(map) => {
                        rows.push(map.into_iter().collect());
                    }
                    _ => return Err(RowIoError::NotArrayOfObjects),
                }
            }
            rows
        }
        _ => return Err(RowIoError::NotAnArray),
    };

    data_model::validate_ids(&rows)?;
    Ok(rows)
}
