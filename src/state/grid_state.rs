use std::cmp::Ordering;
use std::collections::BTreeSet;

use serde_json::{Number, Value};

use crate::state::columns::ColumnDef;
use crate::state::data_model::{self, Row, RowId, RowIdError, RowSet};

pub const PAGE_SIZE_OPTIONS: [usize; 5] = [10, 20, 30, 40, 50];
pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortSpec {
    pub column: String,
    pub order: SortOrder,
}

/// View state of the grid over one row set.
///
/// The grid owns a working copy of the host's rows; the host stays the
/// source of truth and re-supplies rows after any persistence callback.
/// Sorting, filtering and pagination are derived views; only drag
/// reorder mutates the working order, and that order is never reported
/// back to the host.
#[derive(Clone, Debug, PartialEq)]
pub struct GridState {
    rows: RowSet,
    ids: Vec<RowId>,
    selection: BTreeSet<RowId>,
    sort_specs: Vec<SortSpec>,
    hidden_columns: BTreeSet<String>,
    search_key: Option<String>,
    filter_query: String,
    page_index: usize,
    page_size: usize,
}

impl Default for GridState {
    fn default() -> Self {
        Self {
            rows: RowSet::new(),
            ids: Vec::new(),
            selection: BTreeSet::new(),
            sort_specs: Vec::new(),
            hidden_columns: BTreeSet::new(),
            search_key: None,
            filter_query: String::new(),
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl GridState {
    /// Builds a grid over `rows`, rejecting duplicate or missing ids.
    pub fn new(rows: RowSet) -> Result<Self, RowIdError> {
        let ids = data_model::validate_ids(&rows)?;
        Ok(Self {
            rows,
            ids,
            ..Self::default()
        })
    }

    pub fn with_search_key(mut self, search_key: Option<String>) -> Self {
        self.search_key = search_key;
        self
    }

    /// Re-seeds the working copy from the host's rows. Selection entries
    /// whose id no longer exists are dropped; sort, filter and column
    /// visibility survive the reload. On error the state is unchanged.
    pub fn replace_rows(&mut self, rows: RowSet) -> Result<(), RowIdError> {
        let ids = data_model::validate_ids(&rows)?;
        let present: BTreeSet<&RowId> = ids.iter().collect();
        self.selection.retain(|id| present.contains(id));
        self.rows = rows;
        self.ids = ids;
        self.clamp_page();
        Ok(())
    }

    pub fn rows(&self) -> &RowSet {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn row_id(&self, index: usize) -> Option<&RowId> {
        self.ids.get(index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn search_key(&self) -> Option<&str> {
        self.search_key.as_deref()
    }

    pub fn set_search_key(&mut self, search_key: Option<String>) {
        if self.search_key != search_key {
            self.search_key = search_key;
            self.page_index = 0;
        }
    }

    // --- filtering ---

    pub fn filter_query(&self) -> &str {
        &self.filter_query
    }

    /// Filter edits always jump back to the first page so the user is
    /// never left staring at an empty page of a shrunken result set.
    pub fn set_filter_query(&mut self, query: String) {
        self.filter_query = query.trim().to_string();
        self.page_index = 0;
    }

    pub fn clear_filter(&mut self) {
        self.filter_query.clear();
        self.page_index = 0;
    }

    fn row_matches_filter(&self, row: &Row) -> bool {
        if self.filter_query.is_empty() {
            return true;
        }
        let Some(key) = self.search_key.as_ref() else {
            return true;
        };

        let needle = self.filter_query.to_ascii_lowercase();
        row.get(key)
            .map(data_model::display_value)
            .map(|value| value.to_ascii_lowercase().contains(&needle))
            .unwrap_or(false)
    }

    // --- sorting ---

    pub fn sort_specs(&self) -> &[SortSpec] {
        &self.sort_specs
    }

    pub fn sort_order(&self, column: &str) -> Option<SortOrder> {
        self.sort_specs
            .iter()
            .find(|spec| spec.column == column)
            .map(|spec| spec.order)
    }

    /// Cycles a column through ascending, descending and unsorted.
    /// Additive toggles keep the other sort columns and their priority;
    /// plain toggles make this column the only sort key.
    pub fn toggle_sort(&mut self, column: &str, additive: bool) {
        let position = self
            .sort_specs
            .iter()
            .position(|spec| spec.column == column);
        let next = match position.map(|i| self.sort_specs[i].order) {
            None => Some(SortOrder::Asc),
            Some(SortOrder::Asc) => Some(SortOrder::Desc),
            Some(SortOrder::Desc) => None,
        };

        if !additive {
            self.sort_specs.clear();
            if let Some(order) = next {
                self.sort_specs.push(SortSpec {
                    column: column.to_string(),
                    order,
                });
            }
            return;
        }

        match (position, next) {
            (Some(i), Some(order)) => self.sort_specs[i].order = order,
            (Some(i), None) => {
                self.sort_specs.remove(i);
            }
            (None, Some(order)) => self.sort_specs.push(SortSpec {
                column: column.to_string(),
                order,
            }),
            (None, None) => {}
        }
    }

    fn compare_rows(&self, a: &Row, b: &Row) -> Ordering {
        for spec in &self.sort_specs {
            let ordering = compare_values(a.get(&spec.column), b.get(&spec.column));
            let ordering = match spec.order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }

    // --- derived row views ---

    /// Indices of rows surviving the filter, in display order: active
    /// sort specs if any, else the current working order. The working
    /// order itself is never sorted destructively.
    pub fn visible_indices(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = self
            .rows
            .iter()
            .enumerate()
            .filter_map(|(idx, row)| self.row_matches_filter(row).then_some(idx))
            .collect();

        if !self.sort_specs.is_empty() {
            indices.sort_by(|&a, &b| self.compare_rows(&self.rows[a], &self.rows[b]));
        }
        indices
    }

    // --- pagination ---

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page_count(&self) -> usize {
        self.visible_indices().len().div_ceil(self.page_size)
    }

    /// Row indices of the current page, in display order.
    pub fn page_indices(&self) -> Vec<usize> {
        self.visible_indices()
            .into_iter()
            .skip(self.page_index * self.page_size)
            .take(self.page_size)
            .collect()
    }

    pub fn set_page(&mut self, page: usize) {
        self.page_index = page;
        self.clamp_page();
    }

    pub fn next_page(&mut self) -> bool {
        if self.page_index + 1 < self.page_count() {
            self.page_index += 1;
            true
        } else {
            false
        }
    }

    pub fn prev_page(&mut self) -> bool {
        if self.page_index > 0 {
            self.page_index -= 1;
            true
        } else {
            false
        }
    }

    /// Only the fixed option set is accepted. The page index is clamped
    /// so the grid never shows an empty page while earlier pages have
    /// rows.
    pub fn set_page_size(&mut self, size: usize) -> bool {
        if !PAGE_SIZE_OPTIONS.contains(&size) {
            return false;
        }
        self.page_size = size;
        self.clamp_page();
        true
    }

    fn clamp_page(&mut self) {
        let pages = self.page_count();
        if pages == 0 {
            self.page_index = 0;
        } else if self.page_index >= pages {
            self.page_index = pages - 1;
        }
    }

    // --- selection ---

    pub fn selection_len(&self) -> usize {
        self.selection.len()
    }

    pub fn has_selection(&self) -> bool {
        !self.selection.is_empty()
    }

    pub fn is_selected(&self, id: &RowId) -> bool {
        self.selection.contains(id)
    }

    pub fn toggle_selected(&mut self, id: &RowId) {
        if !self.selection.remove(id) && self.ids.contains(id) {
            self.selection.insert(id.clone());
        }
    }

    /// Selects or deselects exactly the rows visible on the current
    /// page, leaving rows on other pages untouched.
    pub fn set_page_selected(&mut self, selected: bool) {
        for index in self.page_indices() {
            let id = self.ids[index].clone();
            if selected {
                self.selection.insert(id);
            } else {
                self.selection.remove(&id);
            }
        }
    }

    pub fn page_fully_selected(&self) -> bool {
        let page = self.page_indices();
        !page.is_empty()
            && page
                .iter()
                .all(|&index| self.selection.contains(&self.ids[index]))
    }

    /// Selected rows in working order. Used as the bulk-delete snapshot
    /// taken when the confirmation dialog opens.
    pub fn selected_rows(&self) -> RowSet {
        self.rows
            .iter()
            .zip(&self.ids)
            .filter(|(_, id)| self.selection.contains(id))
            .map(|(row, _)| row.clone())
            .collect()
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // --- reorder ---

    /// Moves the row at `from` to position `to`, shifting the rows in
    /// between. Presentation order only: no field changes, no callback.
    pub fn move_row(&mut self, from: usize, to: usize) -> bool {
        if from >= self.rows.len() || to >= self.rows.len() || from == to {
            return false;
        }
        let row = self.rows.remove(from);
        self.rows.insert(to, row);
        let id = self.ids.remove(from);
        self.ids.insert(to, id);
        true
    }

    /// Drag events correlate rows by id; resolves both ends to working
    /// indices and moves the source to the target's position.
    pub fn move_row_by_id(&mut self, from: &RowId, to: &RowId) -> bool {
        let Some(from_index) = self.ids.iter().position(|id| id == from) else {
            return false;
        };
        let Some(to_index) = self.ids.iter().position(|id| id == to) else {
            return false;
        };
        self.move_row(from_index, to_index)
    }

    // --- column visibility ---

    pub fn is_column_visible(&self, key: &str) -> bool {
        !self.hidden_columns.contains(key)
    }

    pub fn set_column_visible(&mut self, key: &str, visible: bool) {
        if visible {
            self.hidden_columns.remove(key);
        } else {
            self.hidden_columns.insert(key.to_string());
        }
    }

    /// The augmented column list with hidden columns removed. Reserved
    /// columns are not offered in the customizer, so they pass through.
    pub fn visible_columns(&self, columns: &[ColumnDef]) -> Vec<ColumnDef> {
        columns
            .iter()
            .filter(|col| col.is_reserved() || self.is_column_visible(&col.key))
            .cloned()
            .collect()
    }
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(left), Some(right)) => compare_value_pair(left, right),
    }
}

fn compare_value_pair(left: &Value, right: &Value) -> Ordering {
    match (left, right) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Number(a), Value::Number(b)) => compare_numbers(a, b),
        (Value::String(a), Value::String(b)) => a.to_ascii_lowercase().cmp(&b.to_ascii_lowercase()),
        _ => type_rank(left)
            .cmp(&type_rank(right))
            .then_with(|| data_model::display_value(left).cmp(&data_model::display_value(right))),
    }
}

fn compare_numbers(left: &Number, right: &Number) -> Ordering {
    match (left.as_i64(), left.as_u64(), right.as_i64(), right.as_u64()) {
        (Some(a), _, Some(b), _) => a.cmp(&b),
        (Some(a), _, _, Some(b)) => {
            if a < 0 {
                Ordering::Less
            } else {
                (a as u64).cmp(&b)
            }
        }
        (_, Some(a), Some(b), _) => {
            if b < 0 {
                Ordering::Greater
            } else {
                a.cmp(&(b as u64))
            }
        }
        (_, Some(a), _, Some(b)) => a.cmp(&b),
        _ => {
            let left = left.as_f64().unwrap_or(f64::NAN);
            let right = right.as_f64().unwrap_or(f64::NAN);
            left.partial_cmp(&right).unwrap_or(Ordering::Equal)
        }
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}
