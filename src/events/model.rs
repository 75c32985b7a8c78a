use crate::events::EventError;
use crate::events::FieldIssue;
use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Display;
use tracing::warn;

/// Drink types tracked per event, one column each.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Drink {
    #[serde(rename = "MaracuJack")]
    MaracuJack,
    #[serde(rename = "Jack & Coke")]
    JackCoke,
    #[serde(rename = "Jack Honey & Lemonade")]
    JackHoneyLemonade,
    #[serde(rename = "Jack Apple & Lemonade")]
    JackAppleLemonade,
    #[serde(rename = "Jack Apple & Tonic")]
    JackAppleTonic,
    #[serde(rename = "Jack Fire & Ginger")]
    JackFireGinger,
}

impl Drink {
    /// Catalog order.
    pub const ALL: [Drink; 6] = [
        Drink::MaracuJack,
        Drink::JackCoke,
        Drink::JackHoneyLemonade,
        Drink::JackAppleLemonade,
        Drink::JackAppleTonic,
        Drink::JackFireGinger,
    ];

    /// Header names, catalog order.
    pub const HEADER_NAMES: [&'static str; 6] = [
        "MaracuJack",
        "Jack & Coke",
        "Jack Honey & Lemonade",
        "Jack Apple & Lemonade",
        "Jack Apple & Tonic",
        "Jack Fire & Ginger",
    ];

    pub fn header_name(self) -> &'static str {
        Self::HEADER_NAMES[self as usize]
    }

    /// Looks up a drink by its exact header name.
    pub fn from_header_name(name: &str) -> Option<Drink> {
        Self::ALL.into_iter().find(|drink| drink.header_name() == name)
    }
}

impl Display for Drink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.header_name())
    }
}

/// Quantity served of one drink type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DrinkCount {
    pub drink: Drink,
    pub quantity: f64,
}

/// One event row, identified by its physical row number in the tab.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// 1-based row number, including the header and rows above it
    pub row: usize,
    pub name: String,
    /// Free-form, as typed in the sheet
    pub date: String,
    pub location: String,
    pub address: String,
    pub time: String,
    pub attendance: Option<u64>,
    /// Drink columns present in the header, catalog order
    pub drinks: Vec<DrinkCount>,
}

impl Event {
    /// Quantity of one drink, 0 when its column is absent.
    pub fn quantity(&self, drink: Drink) -> f64 {
        self.drinks
            .iter()
            .find(|count| count.drink == drink)
            .map(|count| count.quantity)
            .unwrap_or(0.0)
    }
}

/// Raw create request, as received from a caller.
///
/// Accepts the English field names as well as the sheet's own vocabulary
/// (`nome`, `data`, `local`, `endereco`, `horario`, `pax`).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventInput {
    #[serde(alias = "nome")]
    pub name: String,
    #[serde(alias = "data")]
    pub date: String,
    #[serde(alias = "local")]
    pub location: String,
    #[serde(alias = "endereco")]
    pub address: String,
    #[serde(alias = "horario")]
    pub time: String,
    #[serde(alias = "expectedAttendance", alias = "pax")]
    pub attendance: Option<f64>,
    #[serde(alias = "drinkQuantities")]
    pub drinks: BTreeMap<String, f64>,
}

/// A validated create request, ready to be written as a row.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NewEvent {
    pub name: String,
    pub date: String,
    pub location: String,
    pub address: String,
    pub time: String,
    pub attendance: Option<u64>,
    pub drinks: BTreeMap<Drink, f64>,
}

impl NewEvent {
    /// Input quantity of one drink, 0 when not given.
    pub fn quantity(&self, drink: Drink) -> f64 {
        self.drinks.get(&drink).copied().unwrap_or(0.0)
    }
}

impl EventInput {
    /// Checks the request before any I/O.
    ///
    /// Every offending field is reported, not just the first one. Drink names
    /// outside the catalog are dropped with a warning since no column can hold them.
    pub fn validate(&self) -> Result<NewEvent, EventError> {
        let mut issues = Vec::new();

        if self.name.trim().is_empty() {
            issues.push(FieldIssue::new("name", "must not be empty"));
        }
        if self.date.trim().is_empty() {
            issues.push(FieldIssue::new("date", "must not be empty"));
        }

        let attendance = match self.attendance {
            None => None,
            Some(value) if value.is_finite() && value >= 0.0 && value.fract() == 0.0 => Some(value as u64),
            Some(_) => {
                issues.push(FieldIssue::new("attendance", "must be a non-negative integer"));
                None
            }
        };

        let mut drinks = BTreeMap::new();
        for (name, quantity) in &self.drinks {
            let Some(drink) = Drink::from_header_name(name) else {
                warn!(drink = %name, "ignoring unknown drink");
                continue;
            };
            if !quantity.is_finite() || *quantity < 0.0 {
                issues.push(FieldIssue::new(&format!("drinks.{name}"), "must be a non-negative number"));
                continue;
            }
            drinks.insert(drink, *quantity);
        }

        if !issues.is_empty() {
            return Err(EventError::ValidationFailed(issues));
        }
        Ok(NewEvent {
            name: self.name.to_owned(),
            date: self.date.to_owned(),
            location: self.location.to_owned(),
            address: self.address.to_owned(),
            time: self.time.to_owned(),
            attendance,
            drinks,
        })
    }
}
