use serde_json::Value;

pub const DRAG_COLUMN: &str = "drag";
pub const SELECT_COLUMN: &str = "select";
pub const ACTIONS_COLUMN: &str = "actions";

/// Declarative descriptor mapping a row field to a table column.
#[derive(Clone, Debug, PartialEq)]
pub struct ColumnDef {
    pub key: String,
    pub header: String,
    pub sortable: bool,
    pub width: Option<u16>,
    pub format: Option<fn(&Value) -> String>,
}

impl ColumnDef {
    pub fn new(key: &str, header: &str) -> Self {
        Self {
            key: key.to_string(),
            header: header.to_string(),
            sortable: true,
            width: None,
            format: None,
        }
    }

    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    pub fn width(mut self, px: u16) -> Self {
        self.width = Some(px);
        self
    }

    pub fn format(mut self, format: fn(&Value) -> String) -> Self {
        self.format = Some(format);
        self
    }

    /// True for the grid-owned drag, select and actions columns.
    pub fn is_reserved(&self) -> bool {
        matches!(
            self.key.as_str(),
            DRAG_COLUMN | SELECT_COLUMN | ACTIONS_COLUMN
        )
    }
}

/// Returns a new column list with the drag-handle and selection columns
/// prepended and the actions column appended. A caller-supplied column
/// with one of the reserved keys wins over the injected default, and the
/// caller's list is never mutated.
pub fn augment_columns(columns: &[ColumnDef]) -> Vec<ColumnDef> {
    let has = |key: &str| columns.iter().any(|col| col.key == key);

    let mut augmented = Vec::with_capacity(columns.len() + 3);
    if !has(DRAG_COLUMN) {
        augmented.push(ColumnDef::new(DRAG_COLUMN, "").unsortable().width(32));
    }
    if !has(SELECT_COLUMN) {
        augmented.push(ColumnDef::new(SELECT_COLUMN, "").unsortable().width(36));
    }
    augmented.extend(columns.iter().cloned());
    if !has(ACTIONS_COLUMN) {
        augmented.push(ColumnDef::new(ACTIONS_COLUMN, "").unsortable().width(96));
    }
    augmented
}
