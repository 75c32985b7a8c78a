//! In-process grid store with the read/append behavior of the remote API.
use crate::client::AppendResponse;
use crate::client::GridClient;
use crate::client::GridError;
use crate::database::range::SheetRange;
use crate::spreadsheet::cell::CellValue;
use crate::spreadsheet::reference::index_to_reference;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::PoisonError;

/// Grid store kept in memory, one row list per tab.
#[derive(Debug, Default)]
pub struct MemoryGrid {
    tabs: Mutex<HashMap<String, Vec<Vec<CellValue>>>>,
}

/// Cells the remote store treats as unset.
fn is_unset(cell: &CellValue) -> bool {
    match cell {
        CellValue::Empty => true,
        CellValue::Text(value) => value.is_empty(),
        _ => false,
    }
}

/// Drops trailing unset cells of a row.
fn trim_row(mut row: Vec<CellValue>) -> Vec<CellValue> {
    while row.last().map(is_unset).unwrap_or(false) {
        row.pop();
    }
    row
}

impl MemoryGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a tab.
    pub fn with_tab(self, name: &str, rows: Vec<Vec<CellValue>>) -> Self {
        self.set_tab(name, rows);
        self
    }

    pub fn set_tab(&self, name: &str, rows: Vec<Vec<CellValue>>) {
        self.tabs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_owned(), rows);
    }

    /// Snapshot of a tab's rows.
    pub fn tab(&self, name: &str) -> Option<Vec<Vec<CellValue>>> {
        self.tabs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    fn unknown_tab(range: &SheetRange) -> GridError {
        GridError::Api {
            status: 400,
            message: format!("Unable to parse range: {range}"),
        }
    }
}

#[async_trait]
impl GridClient for MemoryGrid {
    async fn read_range(&self, range: &SheetRange) -> Result<Vec<Vec<CellValue>>, GridError> {
        let tabs = self.tabs.lock().unwrap_or_else(PoisonError::into_inner);
        let rows = tabs.get(&range.sheet).ok_or_else(|| Self::unknown_tab(range))?;

        let row_lower = range.range.row_lower_bound.unwrap_or(0);
        let col_lower = range.range.col_lower_bound.unwrap_or(0);
        let mut window: Vec<Vec<CellValue>> = rows
            .iter()
            .enumerate()
            .skip(row_lower)
            .take_while(|(index, _)| range.range.contains_row(*index))
            .map(|(_, row)| {
                let cells = row
                    .iter()
                    .enumerate()
                    .skip(col_lower)
                    .take_while(|(index, _)| range.range.contains_col(*index))
                    .map(|(_, cell)| cell.clone())
                    .collect();
                trim_row(cells)
            })
            .collect();
        while window.last().map(Vec::is_empty).unwrap_or(false) {
            window.pop();
        }
        Ok(window)
    }

    async fn append_row(&self, range: &SheetRange, values: &[CellValue]) -> Result<AppendResponse, GridError> {
        let mut tabs = self.tabs.lock().unwrap_or_else(PoisonError::into_inner);
        let rows = tabs.get_mut(&range.sheet).ok_or_else(|| Self::unknown_tab(range))?;
        if values.is_empty() {
            return Ok(AppendResponse::default());
        }

        // New row goes right below the last row holding any value.
        let target = rows
            .iter()
            .rposition(|row| !row.iter().all(is_unset))
            .map(|index| index + 1)
            .unwrap_or(0)
            .max(range.range.row_lower_bound.unwrap_or(0));
        let col_lower = range.range.col_lower_bound.unwrap_or(0);
        if rows.len() <= target {
            rows.resize_with(target + 1, Vec::new);
        } else {
            rows.insert(target, Vec::new());
        }
        let mut row = vec![CellValue::Empty; col_lower];
        row.extend(values.iter().cloned());
        rows[target] = row;

        let cells = format!(
            "{}:{}",
            index_to_reference(target, col_lower),
            index_to_reference(target, col_lower + values.len() - 1)
        );
        let updated = SheetRange::new(&range.sheet, &cells).map_err(|e| GridError::Api {
            status: 500,
            message: e.to_string(),
        })?;
        Ok(AppendResponse {
            updated_range: Some(updated.to_string()),
        })
    }
}
