//! Header row detection and column resolution.
//!
//! The header row is found by content, not by position: the first row of the
//! window holding the sentinel column name is authoritative. Column positions
//! are then resolved by name, so columns may be reordered, added or (for
//! optional and catalog fields) removed without breaking the mapping.

use crate::database::column::ColumnMap;
use crate::spreadsheet::cell::CellValue;
use crate::spreadsheet::sheet::Sheet;
use crate::spreadsheet::SpreadsheetError;

/// Declared header names for one tab.
#[derive(Clone, Copy, Debug)]
pub struct HeaderSchema<'a> {
    /// Column name identifying the header row (case-insensitive)
    pub sentinel: &'a str,
    /// Fields that must be present
    pub required: &'a [&'a str],
    /// Fields that resolve to None when absent
    pub optional: &'a [&'a str],
    /// Ordered catalog of optional columns, included only when present
    pub catalog: &'a [&'a str],
}

/// A resolved header row.
#[derive(Clone, Debug, PartialEq)]
pub struct Header {
    /// Physical row number of the header (1-based)
    pub row_number: usize,
    /// Number of cells in the header row
    pub width: usize,
    /// Field name to column index mapping
    pub columns: ColumnMap,
    /// Window row index of the header
    index: usize,
}

impl Header {
    /// Scans the window for the header row and resolves every declared field.
    ///
    /// # Errors
    ///
    /// - `HeaderNotFound` if no row holds the sentinel name
    /// - `ColumnNotFound` for the first required field missing from the header
    pub fn resolve(sheet: &Sheet, schema: &HeaderSchema) -> Result<Header, SpreadsheetError> {
        let sentinel = schema.sentinel.trim().to_lowercase();
        let index = sheet
            .rows()
            .iter()
            .position(|row| {
                row.iter()
                    .filter_map(CellValue::as_text)
                    .any(|value| value.trim().to_lowercase() == sentinel)
            })
            .ok_or_else(|| SpreadsheetError::HeaderNotFound {
                sheet: sheet.name().to_owned(),
                sentinel: schema.sentinel.to_owned(),
            })?;
        let cells = &sheet.rows()[index];

        let mut columns = ColumnMap::default();
        for name in schema.required {
            let position = find_column(cells, name).ok_or_else(|| SpreadsheetError::ColumnNotFound {
                sheet: sheet.name().to_owned(),
                column: (*name).to_owned(),
            })?;
            columns.insert_field(name, Some(position));
        }
        for name in schema.optional {
            columns.insert_field(name, find_column(cells, name));
        }
        for name in schema.catalog {
            if let Some(position) = find_column(cells, name) {
                columns.push_catalog(name, position);
            }
        }

        Ok(Header {
            row_number: sheet.row_number(index),
            width: cells.len(),
            columns,
            index,
        })
    }

    /// Rows below the header with their offset from the header (0 = first data row).
    pub fn data_rows<'s>(&self, sheet: &'s Sheet) -> impl Iterator<Item = (usize, &'s [CellValue])> + 's {
        sheet
            .rows()
            .iter()
            .skip(self.index + 1)
            .map(Vec::as_slice)
            .enumerate()
    }
}

/// Leftmost column whose trimmed text equals `name` exactly.
fn find_column(cells: &[CellValue], name: &str) -> Option<usize> {
    cells
        .iter()
        .position(|cell| cell.as_text().map(|value| value.trim() == name).unwrap_or(false))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA: HeaderSchema = HeaderSchema {
        sentinel: "Evento",
        required: &["Evento", "Data"],
        optional: &["Local"],
        catalog: &["MaracuJack", "Jack & Coke", "Jack Fire & Ginger"],
    };

    fn row(values: &[&str]) -> Vec<CellValue> {
        values.iter().map(|value| CellValue::text(*value)).collect()
    }

    #[test]
    fn header_found_below_title_rows() {
        let sheet = Sheet::new("Tab", 0, vec![
            row(&["Controle de eventos"]),
            vec![],
            row(&["", " Data ", "Jack & Coke", "Evento", "MaracuJack"]),
            row(&["10/10/2025", "Launch"]),
        ]);
        let header = Header::resolve(&sheet, &SCHEMA).unwrap();

        assert_eq!(header.row_number, 3);
        assert_eq!(header.width, 5);
        assert_eq!(header.columns.index("Evento"), Some(3));
        assert_eq!(header.columns.index("Data"), Some(1));
        assert_eq!(header.columns.index("Local"), None);
        let catalog: Vec<(&str, usize)> = header
            .columns
            .catalog()
            .iter()
            .map(|column| (column.name.as_str(), column.index))
            .collect();
        assert_eq!(catalog, vec![("MaracuJack", 4), ("Jack & Coke", 2)]);
        assert_eq!(header.data_rows(&sheet).count(), 1);
    }

    #[test]
    fn header_sentinel_is_case_insensitive() {
        let sheet = Sheet::new("Tab", 0, vec![row(&["EVENTO ", "Evento", "Data"])]);
        let header = Header::resolve(&sheet, &SCHEMA).unwrap();
        assert_eq!(header.row_number, 1);
        // required lookup stays exact
        assert_eq!(header.columns.index("Evento"), Some(1));
    }

    #[test]
    fn first_header_row_wins() {
        let sheet = Sheet::new("Tab", 0, vec![
            row(&["Evento", "Data", "Local"]),
            row(&["Party", "01/01/2025"]),
            row(&["Data", "Evento"]),
        ]);
        let header = Header::resolve(&sheet, &SCHEMA).unwrap();
        assert_eq!(header.row_number, 1);
        assert_eq!(header.columns.index("Local"), Some(2));
        let offsets: Vec<usize> = header.data_rows(&sheet).map(|(offset, _)| offset).collect();
        assert_eq!(offsets, vec![0, 1]);
    }

    #[test]
    fn header_not_found() {
        let sheet = Sheet::new("Tabela Eventos", 0, vec![
            row(&["Nome", "Data"]),
            vec![CellValue::Number(1.0)],
        ]);
        let err = Header::resolve(&sheet, &SCHEMA).unwrap_err();
        assert!(matches!(err, SpreadsheetError::HeaderNotFound { ref sheet, .. } if sheet == "Tabela Eventos"));
        assert!(err.to_string().contains("Tabela Eventos"));
    }

    #[test]
    fn required_column_missing() {
        let sheet = Sheet::new("Tab", 0, vec![row(&["Evento", "Local", "Jack & Coke"])]);
        let err = Header::resolve(&sheet, &SCHEMA).unwrap_err();
        match err {
            SpreadsheetError::ColumnNotFound { sheet, column } => {
                assert_eq!(sheet, "Tab");
                assert_eq!(column, "Data");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_text_cells_never_match() {
        let sheet = Sheet::new("Tab", 0, vec![vec![
            CellValue::text("Evento"),
            CellValue::Number(1.0),
            CellValue::text("Data"),
        ]]);
        let header = Header::resolve(&sheet, &SCHEMA).unwrap();
        assert_eq!(header.columns.index("Data"), Some(2));
        assert!(header.columns.catalog().is_empty());
    }

    #[test]
    fn header_row_number_respects_window_offset() {
        let sheet = Sheet::new("Tab", 4, vec![vec![], row(&["Evento", "Data"])]);
        let header = Header::resolve(&sheet, &SCHEMA).unwrap();
        assert_eq!(header.row_number, 6);
    }
}
