//! Conversion between raw rows and event records.
//!
//! Reading is lenient: cells that fail coercion fall back to a default instead
//! of failing the whole row. Writing places every value by the resolved column
//! map, so the physical column order of the tab never matters.

use crate::events::model::DrinkCount;
use crate::events::model::Event;
use crate::events::model::NewEvent;
use crate::events::schema::EventColumns;
use crate::spreadsheet::cell::CellValue;

fn cell_at(row: &[CellValue], index: Option<usize>) -> Option<&CellValue> {
    index.and_then(|index| row.get(index))
}

/// Text of a cell, empty for blank or absent cells.
fn text_at(row: &[CellValue], index: Option<usize>) -> String {
    match cell_at(row, index) {
        Some(cell) if !cell.is_blank() => cell.to_string(),
        _ => String::new(),
    }
}

/// Whole non-negative count, None for anything else.
fn count_at(row: &[CellValue], index: Option<usize>) -> Option<u64> {
    cell_at(row, index)
        .and_then(CellValue::to_number)
        .filter(|number| *number >= 0.0 && number.fract() == 0.0 && *number <= u64::MAX as f64)
        .map(|number| number as u64)
}

/// Maps one data row to an event.
///
/// # Arguments
///
/// - `row`: raw cells, possibly shorter than the header
/// - `columns`: resolved event columns
/// - `header_row`: 1-based row number of the header
/// - `offset`: position of the row below the header (0 = first data row)
///
/// # Returns
///
/// None when the name cell is blank or absent; such rows are not events.
pub fn to_record(row: &[CellValue], columns: &EventColumns, header_row: usize, offset: usize) -> Option<Event> {
    let name = cell_at(row, columns.name).filter(|cell| !cell.is_blank())?;

    Some(Event {
        row: header_row + 1 + offset,
        name: name.to_string(),
        date: text_at(row, columns.date),
        location: text_at(row, columns.location),
        address: text_at(row, columns.address),
        time: text_at(row, columns.time),
        attendance: count_at(row, columns.attendance),
        drinks: columns
            .drinks
            .iter()
            .map(|(drink, index)| DrinkCount {
                drink: *drink,
                quantity: row.get(*index).and_then(CellValue::to_number).unwrap_or(0.0),
            })
            .collect(),
    })
}

/// Builds the row written for a new event.
///
/// The row spans the header width, or further if a resolved column lies
/// beyond it. Cells with no value are left empty.
pub fn to_row(event: &NewEvent, columns: &EventColumns, width: usize) -> Vec<CellValue> {
    let width = columns.last_index.map(|index| index + 1).unwrap_or(0).max(width);
    let mut row = vec![CellValue::Empty; width];
    let mut put = |index: Option<usize>, value: CellValue| {
        if let Some(index) = index {
            row[index] = value;
        }
    };

    put(columns.name, CellValue::from(event.name.as_str()));
    put(columns.date, CellValue::from(event.date.as_str()));
    put(columns.time, CellValue::from(event.time.as_str()));
    put(columns.location, CellValue::from(event.location.as_str()));
    put(columns.address, CellValue::from(event.address.as_str()));
    if let Some(attendance) = event.attendance {
        put(columns.attendance, CellValue::from(attendance as f64));
    }
    for (drink, index) in &columns.drinks {
        put(Some(*index), CellValue::from(event.quantity(*drink)));
    }
    row
}
