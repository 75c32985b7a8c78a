use crate::database::range::SheetRange;
use crate::spreadsheet::cell::CellValue;

/// A bounded window of rows read from one tab.
///
/// Rows are ragged: the store omits trailing empty cells, so a row may be
/// shorter than the header or missing entirely.
#[derive(Clone, Debug, Default)]
pub struct Sheet {
    /// Tab name
    pub(crate) name: String,
    /// 0-based row index of the first window row
    pub(crate) row_offset: usize,
    /// Raw rows, top to bottom
    pub(crate) rows: Vec<Vec<CellValue>>,
}

impl Sheet {
    /// Creates a window whose first row sits at the given 0-based row index.
    pub fn new(name: &str, row_offset: usize, rows: Vec<Vec<CellValue>>) -> Self {
        Self {
            name: name.to_owned(),
            row_offset,
            rows,
        }
    }

    /// Creates a window for the rows returned by reading `range`.
    pub fn from_range(range: &SheetRange, rows: Vec<Vec<CellValue>>) -> Self {
        Self::new(&range.sheet, range.range.row_lower_bound.unwrap_or(0), rows)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true if the store sent no cells at all. Whitespace text counts as content.
    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(Vec::is_empty)
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// Physical 1-based row number of a window row index.
    pub fn row_number(&self, index: usize) -> usize {
        self.row_offset + index + 1
    }
}
