//! Event store over a grid client: list, point lookup by row, create.
//!
//! Every operation reads the window fresh and resolves the header again; the
//! column map is never cached across calls.

use crate::client::GridClient;
use crate::config::TableSettings;
use crate::database::range::updated_row;
use crate::database::range::RangeError;
use crate::database::range::SheetRange;
use crate::database::table::Table;
use crate::error::EventSheetError;
use crate::events::mapper::to_record;
use crate::events::mapper::to_row;
use crate::events::model::Event;
use crate::events::model::EventInput;
use crate::events::schema::EventColumns;
use crate::events::schema::APPEND_RANGE;
use crate::events::schema::EVENT_HEADER;
use crate::events::schema::WINDOW;
use crate::events::EventError;
use crate::spreadsheet::sheet::Sheet;
use crate::spreadsheet::SpreadsheetError;
use std::sync::Arc;
use tracing::debug;
use tracing::info;

pub struct EventStore {
    client: Arc<dyn GridClient>,
    tab: String,
}

impl EventStore {
    pub fn new(client: Arc<dyn GridClient>, settings: &TableSettings) -> Self {
        Self {
            client,
            tab: settings.tab.to_owned(),
        }
    }

    fn range(&self, cells: &str) -> Result<SheetRange, RangeError> {
        SheetRange::new(&self.tab, cells)
    }

    /// Reads the window and resolves its header. None for an entirely empty window.
    async fn load_table(&self) -> Result<Option<Table>, EventSheetError> {
        let range = self.range(WINDOW)?;
        let rows = self.client.read_range(&range).await?;
        debug!(range = %range, rows = rows.len(), "loaded event window");
        Ok(Table::resolve(Sheet::from_range(&range, rows), &EVENT_HEADER)?)
    }

    /// Lists every event in the window, top to bottom.
    #[tracing::instrument(skip_all, fields(tab = %self.tab))]
    pub async fn list(&self) -> Result<Vec<Event>, EventSheetError> {
        let Some(table) = self.load_table().await? else {
            return Ok(vec![]);
        };
        let columns = EventColumns::from(table.columns());
        let header_row = table.header().row_number;
        let events: Vec<Event> = table
            .data_rows()
            .filter_map(|(offset, row)| to_record(row, &columns, header_row, offset))
            .collect();
        debug!(tab = table.name(), events = events.len(), header_row, "listed events");
        Ok(events)
    }

    /// Looks up the event at a 1-based row number.
    pub async fn get_by_position(&self, row: usize) -> Result<Option<Event>, EventSheetError> {
        Ok(self.list().await?.into_iter().find(|event| event.row == row))
    }

    /// Validates and appends a new event, returning it as read back from the store.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` before any I/O when the input is rejected
    /// - `HeaderNotFound` / `ColumnNotFound` when the tab has no usable header
    /// - `PositionUnresolvable` when the store does not report where it wrote
    /// - `NotReadBack` when nothing is found at the reported row
    #[tracing::instrument(skip_all, fields(tab = %self.tab))]
    pub async fn create(&self, input: &EventInput) -> Result<Event, EventSheetError> {
        let event = input.validate()?;

        let table = self.load_table().await?.ok_or_else(|| SpreadsheetError::HeaderNotFound {
            sheet: self.tab.to_owned(),
            sentinel: EVENT_HEADER.sentinel.to_owned(),
        })?;
        let columns = EventColumns::from(table.columns());
        let values = to_row(&event, &columns, table.header().width);

        let range = self.range(APPEND_RANGE)?;
        let response = self.client.append_row(&range, &values).await?;
        let descriptor = response.updated_range.unwrap_or_default();
        let row = updated_row(&descriptor)?;
        info!(row, updated_range = %descriptor, "created event");

        self.get_by_position(row)
            .await?
            .ok_or_else(|| EventError::NotReadBack { row }.into())
    }
}
