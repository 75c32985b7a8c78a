//! # Event Sheet
//!
//! Typed access to the promotional event records kept in a shared
//! spreadsheet tab. The tab is a loosely structured grid: free-form title
//! rows may sit above the header, columns may be reordered, and the drink
//! columns present vary from sheet to sheet. This crate treats it as a
//! schema-validated store.
//!
//! ## Features
//!
//! - **Header discovery**: the header row is located by content and every
//!   column is resolved by name on each operation
//! - **Lenient reads**: blank names skip a row, bad numbers fall back to
//!   defaults instead of failing the listing
//! - **Append and re-read**: new events are appended and then read back from
//!   the row the store reports, so the returned record is what the sheet holds
//! - **Reports**: per-event report, consumption dashboard and calendar views
//!
//! ## Operations
//!
//! - `EventStore::list`: every event in the scanned window, top to bottom
//! - `EventStore::get_by_position`: the event at a 1-based row number
//! - `EventStore::create`: validate, append and return the stored event
pub mod client;
pub mod config;
pub mod database;
pub mod error;
pub mod events;
pub mod logging;
pub mod spreadsheet;

pub use client::GridClient;
pub use config::Settings;
pub use error::ErrorKind;
pub use error::EventSheetError;
pub use events::Event;
pub use events::EventInput;
pub use events::EventStore;
