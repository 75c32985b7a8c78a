//! # Spreadsheet Grid Module
//!
//! Raw grid model shared by the grid clients and the record mapper: cell
//! values, bounded windows of rows, A1 references and header resolution.
//! Nothing in here knows about events; the header names it resolves are
//! declared by the caller.
use thiserror::Error;

pub mod cell;
pub mod header;
pub mod reference;
pub mod sheet;

/// Schema drift errors raised while resolving a tab's header.
///
/// Retrying cannot fix these; the sheet itself has to be corrected.
#[derive(Error, Debug)]
pub enum SpreadsheetError {
    /// No row of the scanned window holds the sentinel column
    #[error("Header row not found in tab '{sheet}' (no '{sentinel}' column)")]
    HeaderNotFound { sheet: String, sentinel: String },

    /// The header row lacks a required column
    #[error("Column '{column}' not found in tab '{sheet}'")]
    ColumnNotFound { sheet: String, column: String },
}
