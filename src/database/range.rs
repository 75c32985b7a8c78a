use crate::spreadsheet::reference::col_to_index;
use crate::spreadsheet::reference::row_to_index;
use regex::Regex;
use std::fmt::Display;
use std::sync::LazyLock;
use thiserror::Error;

static RANGE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z]*)(\d*)(:([A-Z]*)(\d*))?$").expect("Hardcode regex pattern"));

/// Row number adjacent to the final column marker of an updated range, e.g. `!A12:`.
static UPDATED_ROW_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"![A-Z]+(\d+):").expect("Hardcode regex pattern"));

/// Errors related to spreadsheet-style range parsing.
#[derive(Error, Debug)]
pub enum RangeError {
    #[error("Invalid range format '{0}'")]
    FormatError(String),

    #[error("Cannot resolve the written row from updated range '{0}'")]
    PositionUnresolvable(String),
}

/// Represents a spreadsheet-style cell range with optional boundaries.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Range {
    /// Lower row bound (0-based index), None for unbounded
    pub row_lower_bound: Option<usize>,
    /// Upper row bound (0-based index), None for unbounded
    pub row_upper_bound: Option<usize>,
    /// Lower column bound (0-based index), None for unbounded
    pub col_lower_bound: Option<usize>,
    /// Upper column bound (0-based index), None for unbounded
    pub col_upper_bound: Option<usize>,
}

impl Range {
    /// Checks if a 0-based row index falls inside the range.
    pub fn contains_row(&self, row: usize) -> bool {
        self.row_lower_bound.map(|lower| lower <= row).unwrap_or(true)
            && self.row_upper_bound.map(|upper| row <= upper).unwrap_or(true)
    }

    /// Checks if a 0-based column index falls inside the range.
    pub fn contains_col(&self, col: usize) -> bool {
        self.col_lower_bound.map(|lower| lower <= col).unwrap_or(true)
            && self.col_upper_bound.map(|upper| col <= upper).unwrap_or(true)
    }
}

impl TryFrom<&str> for Range {
    type Error = RangeError;

    /// Parses a range string (e.g., "A1", "B2:C5", "A:Z", "1:10").
    /// Supports single cells, ranges, and partial ranges (columns or rows only).
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let value = value.trim().to_ascii_uppercase();
        let captures = RANGE_PATTERN
            .captures(value.as_str())
            .ok_or(RangeError::FormatError(value.to_owned()))?;
        Ok(Range {
            col_lower_bound: captures
                .get(1)
                .map(|matcher| matcher.as_str())
                .and_then(col_to_index),
            row_lower_bound: captures
                .get(2)
                .map(|matcher| matcher.as_str())
                .and_then(row_to_index),
            col_upper_bound: captures
                .get(4)
                .map(|matcher| matcher.as_str())
                .and_then(col_to_index),
            row_upper_bound: captures
                .get(5)
                .map(|matcher| matcher.as_str())
                .and_then(row_to_index),
        })
    }
}

/// A range qualified with the tab it lives in, e.g. `'Tabela Eventos'!A1:Z500`.
#[derive(Clone, Debug, PartialEq)]
pub struct SheetRange {
    pub sheet: String,
    pub range: Range,
    /// Range part as written, used when sending the range back to the store
    cells: String,
}

impl SheetRange {
    /// Builds a range expression for the given tab and cell range.
    pub fn new(sheet: &str, cells: &str) -> Result<Self, RangeError> {
        Ok(Self {
            sheet: sheet.to_owned(),
            range: Range::try_from(cells)?,
            cells: cells.trim().to_owned(),
        })
    }

    /// Parses `Tab!A1:Z500` or `'Tab''s name'!A:Z`. A missing tab part is an error.
    pub fn parse(value: &str) -> Result<Self, RangeError> {
        let (sheet, cells) = value
            .rsplit_once('!')
            .ok_or_else(|| RangeError::FormatError(value.to_owned()))?;
        let sheet = sheet.trim();
        let sheet = match sheet.strip_prefix('\'').and_then(|name| name.strip_suffix('\'')) {
            Some(quoted) => quoted.replace("''", "'"),
            None => sheet.to_owned(),
        };
        if sheet.is_empty() {
            Err(RangeError::FormatError(value.to_owned()))?;
        }
        Self::new(&sheet, cells)
    }
}

impl Display for SheetRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}'!{}", self.sheet.replace('\'', "''"), self.cells)
    }
}

/// Extracts the 1-based row number the store reported for an appended row.
///
/// The store answers with the exact range it wrote into (`'Tab'!A12:Z12`); the
/// row number next to the first column marker is the new row's position.
pub fn updated_row(descriptor: &str) -> Result<usize, RangeError> {
    UPDATED_ROW_PATTERN
        .captures(descriptor)
        .and_then(|captures| captures.get(1))
        .and_then(|matcher| matcher.as_str().parse::<usize>().ok())
        .filter(|row| *row > 0)
        .ok_or_else(|| RangeError::PositionUnresolvable(descriptor.to_owned()))
}
