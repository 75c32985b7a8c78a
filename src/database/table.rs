use crate::database::column::ColumnMap;
use crate::spreadsheet::cell::CellValue;
use crate::spreadsheet::header::Header;
use crate::spreadsheet::header::HeaderSchema;
use crate::spreadsheet::sheet::Sheet;
use crate::spreadsheet::SpreadsheetError;

/// A window together with the header resolved from it.
///
/// Built once per operation and never cached, so every read sees the
/// header as it currently is in the store.
#[derive(Clone, Debug)]
pub struct Table {
    /// Raw window the header was resolved from
    pub(crate) sheet: Sheet,
    /// Resolved header row and column map
    pub(crate) header: Header,
}

impl Table {
    /// Resolves the header of a window. An entirely empty window yields None.
    pub fn resolve(sheet: Sheet, schema: &HeaderSchema) -> Result<Option<Table>, SpreadsheetError> {
        if sheet.is_empty() {
            return Ok(None);
        }
        let header = Header::resolve(&sheet, schema)?;
        Ok(Some(Table { sheet, header }))
    }

    pub fn name(&self) -> &str {
        self.sheet.name()
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn columns(&self) -> &ColumnMap {
        &self.header.columns
    }

    /// Data rows below the header with their offset from the header.
    pub fn data_rows(&self) -> impl Iterator<Item = (usize, &[CellValue])> + '_ {
        self.header.data_rows(&self.sheet)
    }
}
