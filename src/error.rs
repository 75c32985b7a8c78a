use crate::client::GridError;
use crate::config::ConfigError;
use crate::database::range::RangeError;
use crate::events::EventError;
use crate::spreadsheet::SpreadsheetError;
use serde::Serialize;
use thiserror::Error;

/// Main error type of the event sheet crate.
/// Aggregates errors from the configuration, the grid client and the internal modules.
#[derive(Error, Debug)]
pub enum EventSheetError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    // Transport errors
    #[error("{0}")]
    Grid(#[from] GridError),

    // Spreadsheet module errors
    #[error("{0}")]
    Spreadsheet(#[from] SpreadsheetError),

    // Database module errors
    #[error("{0}")]
    Range(#[from] RangeError),

    // Events module errors
    #[error("{0}")]
    Event(#[from] EventError),
}

/// Coarse outcome class, for callers that map errors to responses or exit codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Required configuration absent; fatal
    ConfigurationMissing,
    /// The tab's header no longer matches the expected layout
    SchemaDrift,
    /// Caller input rejected before any I/O
    ValidationFailed,
    /// The store did not report where a row was written
    PositionUnresolvable,
    /// Network, auth or store-side failure
    Transport,
    Internal,
}

impl EventSheetError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(ConfigError::Missing { .. }) => ErrorKind::ConfigurationMissing,
            Self::Spreadsheet(_) => ErrorKind::SchemaDrift,
            Self::Event(EventError::ValidationFailed(_)) => ErrorKind::ValidationFailed,
            Self::Range(RangeError::PositionUnresolvable(_)) => ErrorKind::PositionUnresolvable,
            Self::Grid(_) => ErrorKind::Transport,
            Self::Range(RangeError::FormatError(_)) | Self::Event(EventError::NotReadBack { .. }) => {
                ErrorKind::Internal
            }
        }
    }
}
