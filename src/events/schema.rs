use crate::database::column::ColumnMap;
use crate::events::model::Drink;
use crate::spreadsheet::header::HeaderSchema;

/// Window scanned for the header and the event rows.
pub const WINDOW: &str = "A1:Z500";
/// Range handed to the store when appending; the store finds the table end.
pub const APPEND_RANGE: &str = "A:Z";

pub const NAME: &str = "Evento";
pub const DATE: &str = "Data";
pub const ATTENDANCE: &str = "Pax";
pub const TIME: &str = "Horário";
pub const LOCATION: &str = "Local";
pub const ADDRESS: &str = "Endereço";

/// Header names of the event tab. Location and address are optional-if-absent.
pub const EVENT_HEADER: HeaderSchema<'static> = HeaderSchema {
    sentinel: NAME,
    required: &[NAME, DATE, ATTENDANCE, TIME],
    optional: &[LOCATION, ADDRESS],
    catalog: &Drink::HEADER_NAMES,
};

/// Column positions of one resolved event header.
#[derive(Clone, Debug, PartialEq)]
pub struct EventColumns {
    pub name: Option<usize>,
    pub date: Option<usize>,
    pub attendance: Option<usize>,
    pub time: Option<usize>,
    pub location: Option<usize>,
    pub address: Option<usize>,
    /// Drink columns present in the header, catalog order
    pub drinks: Vec<(Drink, usize)>,
    /// Highest resolved column index
    pub last_index: Option<usize>,
}

impl From<&ColumnMap> for EventColumns {
    fn from(columns: &ColumnMap) -> Self {
        Self {
            name: columns.index(NAME),
            date: columns.index(DATE),
            attendance: columns.index(ATTENDANCE),
            time: columns.index(TIME),
            location: columns.index(LOCATION),
            address: columns.index(ADDRESS),
            drinks: columns
                .catalog()
                .iter()
                .filter_map(|column| Drink::from_header_name(&column.name).map(|drink| (drink, column.index)))
                .collect(),
            last_index: columns.last_index(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spreadsheet::cell::CellValue;
    use crate::spreadsheet::header::Header;
    use crate::spreadsheet::sheet::Sheet;

    #[test]
    fn event_columns_from_header() {
        let cells = ["Evento", "Data", "Local", "Pax", "Horário", "Jack Fire & Ginger", "MaracuJack"]
            .iter()
            .map(|name| CellValue::text(*name))
            .collect();
        let sheet = Sheet::new("Tabela Eventos", 0, vec![cells]);
        let header = Header::resolve(&sheet, &EVENT_HEADER).unwrap();
        let columns = EventColumns::from(&header.columns);

        assert_eq!(columns.name, Some(0));
        assert_eq!(columns.location, Some(2));
        assert_eq!(columns.address, None);
        assert_eq!(columns.time, Some(4));
        assert_eq!(columns.drinks, vec![(Drink::MaracuJack, 6), (Drink::JackFireGinger, 5)]);
        assert_eq!(columns.last_index, Some(6));
    }
}
