//! # Grid Client
//!
//! Thin operation set over the remote grid store: read a range of raw cell
//! values, append one row. Implementations own their connection and auth
//! lifecycle; timeouts belong to the transport and nothing here retries.
use crate::database::range::SheetRange;
use crate::spreadsheet::cell::CellValue;
use async_trait::async_trait;
use thiserror::Error;

pub mod auth;
pub mod memory;
pub mod sheets;

pub use memory::MemoryGrid;
pub use sheets::SheetsClient;

/// Transport-level failures talking to the grid store.
#[derive(Error, Debug)]
pub enum GridError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not the expected JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// API base URL could not be used to build request URLs
    #[error("Invalid URL '{url}': {message}")]
    Url { url: String, message: String },

    /// Service account key could not sign the token assertion
    #[error("Invalid service account key: {0}")]
    Key(#[from] jsonwebtoken::errors::Error),

    /// Token exchange rejected
    #[error("Token exchange failed ({status}): {message}")]
    Auth { status: u16, message: String },

    /// Store rejected the request
    #[error("Grid store error ({status}): {message}")]
    Api { status: u16, message: String },
}

/// What the store reports after appending a row.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AppendResponse {
    /// Exact range written into, e.g. `'Tabela Eventos'!A12:Z12`
    pub updated_range: Option<String>,
}

/// Operations the event store needs from a grid store.
#[async_trait]
pub trait GridClient: Send + Sync {
    /// Reads the rows of a range. Trailing empty cells and rows may be omitted.
    async fn read_range(&self, range: &SheetRange) -> Result<Vec<Vec<CellValue>>, GridError>;

    /// Appends one row after the last row of the table found in `range`.
    async fn append_row(&self, range: &SheetRange, values: &[CellValue]) -> Result<AppendResponse, GridError>;
}
