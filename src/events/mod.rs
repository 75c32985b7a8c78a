//! # Event Records
//!
//! Typed view over the event tab: the drink catalog and header names, the
//! row mapper, the store facade and the derived report views.
use serde::Serialize;
use thiserror::Error;

pub mod mapper;
pub mod model;
pub mod report;
pub mod schema;
pub mod store;

pub use model::Drink;
pub use model::DrinkCount;
pub use model::Event;
pub use model::EventInput;
pub use model::NewEvent;
pub use store::EventStore;

/// One rejected input field.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

impl FieldIssue {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_owned(),
            message: message.to_owned(),
        }
    }
}

impl std::fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Errors raised by the event store itself.
#[derive(Error, Debug)]
pub enum EventError {
    #[error("Invalid event: {}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
    ValidationFailed(Vec<FieldIssue>),

    /// The append succeeded but no event was found at the reported row
    #[error("Event created at row {row} but could not be read back")]
    NotReadBack { row: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_display() {
        let err = EventError::ValidationFailed(vec![
            FieldIssue::new("name", "must not be empty"),
            FieldIssue::new("date", "must not be empty"),
        ]);
        assert_eq!(err.to_string(), "Invalid event: name: must not be empty; date: must not be empty");
        assert_eq!(
            EventError::NotReadBack { row: 12 }.to_string(),
            "Event created at row 12 but could not be read back"
        );
    }
}
