//! Views derived from event records: per-event report, consumption dashboard
//! and calendar grouping. Pure functions over already-loaded events.

use crate::events::model::Drink;
use crate::events::model::DrinkCount;
use crate::events::model::Event;
use chrono::Datelike;
use chrono::NaiveDate;
use serde::Serialize;

/// Millilitres poured per drink.
pub const DOSE_ML: f64 = 50.0;
/// Events listed in the dashboard's top ranking.
pub const TOP_EVENTS: usize = 5;

fn liters(drinks: f64) -> f64 {
    drinks * DOSE_ML / 1000.0
}

/// Sum of every drink quantity of an event.
pub fn total_drinks(event: &Event) -> f64 {
    event.drinks.iter().map(|count| count.quantity).sum()
}

/// Where and when the event took place.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub date: String,
    pub location: String,
    pub address: String,
    pub time: String,
    /// Bar the drinks were served at; the event location
    pub bar: String,
    pub attendance: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportConsumption {
    pub drinks: Vec<DrinkCount>,
    pub total_drinks: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPhoto {
    pub url: Option<String>,
}

/// Post-event report of one event.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventReport {
    pub row: usize,
    pub name: String,
    pub summary: ReportSummary,
    pub consumption: ReportConsumption,
    /// No photo column exists yet, so the URL is always empty
    pub photo: ReportPhoto,
}

impl EventReport {
    pub fn from_event(event: &Event) -> Self {
        Self {
            row: event.row,
            name: event.name.to_owned(),
            summary: ReportSummary {
                date: event.date.to_owned(),
                location: event.location.to_owned(),
                address: event.address.to_owned(),
                time: event.time.to_owned(),
                bar: event.location.to_owned(),
                attendance: event.attendance,
            },
            consumption: ReportConsumption {
                drinks: event.drinks.clone(),
                total_drinks: total_drinks(event),
            },
            photo: ReportPhoto::default(),
        }
    }
}

/// Consumption of one drink type across all events.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DrinkTotal {
    pub drink: Drink,
    pub quantity: f64,
    pub liters: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopEvent {
    pub row: usize,
    pub name: String,
    pub date: String,
    pub total_drinks: f64,
}

/// Totals over every event of the tab.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub event_count: usize,
    /// Sum of known attendance; unknown counts as 0
    pub total_attendance: u64,
    pub total_drinks: f64,
    pub total_liters: f64,
    /// Equivalent in 1 L bottles
    pub bottles: f64,
    /// Whole catalog, most served first
    pub ranking: Vec<DrinkTotal>,
    pub top_events: Vec<TopEvent>,
}

impl Dashboard {
    pub fn from_events(events: &[Event]) -> Self {
        let total_drinks: f64 = events.iter().map(total_drinks).sum();
        let total_liters = liters(total_drinks);

        let mut ranking: Vec<DrinkTotal> = Drink::ALL
            .into_iter()
            .map(|drink| {
                let quantity = events.iter().map(|event| event.quantity(drink)).sum();
                DrinkTotal {
                    drink,
                    quantity,
                    liters: liters(quantity),
                }
            })
            .collect();
        ranking.sort_by(|a, b| b.quantity.total_cmp(&a.quantity));

        let mut top_events: Vec<TopEvent> = events
            .iter()
            .map(|event| TopEvent {
                row: event.row,
                name: event.name.to_owned(),
                date: event.date.to_owned(),
                total_drinks: self::total_drinks(event),
            })
            .collect();
        top_events.sort_by(|a, b| b.total_drinks.total_cmp(&a.total_drinks));
        top_events.truncate(TOP_EVENTS);

        Self {
            event_count: events.len(),
            total_attendance: events.iter().filter_map(|event| event.attendance).sum(),
            total_drinks,
            total_liters,
            bottles: total_liters,
            ranking,
            top_events,
        }
    }
}

/// An event placed on the calendar.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CalendarEntry {
    pub day: NaiveDate,
    pub event: Event,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
    pub entries: Vec<CalendarEntry>,
}

/// Parses a `DD/MM/YYYY` date.
pub fn parse_event_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%d/%m/%Y").ok()
}

/// Groups events by month, oldest first. Events whose date is not
/// `DD/MM/YYYY` are left out.
pub fn calendar(events: &[Event]) -> Vec<CalendarMonth> {
    let mut entries: Vec<CalendarEntry> = events
        .iter()
        .filter_map(|event| {
            parse_event_date(&event.date).map(|day| CalendarEntry {
                day,
                event: event.clone(),
            })
        })
        .collect();
    entries.sort_by_key(|entry| entry.day);

    let mut months: Vec<CalendarMonth> = Vec::new();
    for entry in entries {
        let (year, month) = (entry.day.year(), entry.day.month());
        match months.last_mut() {
            Some(last) if last.year == year && last.month == month => last.entries.push(entry),
            _ => months.push(CalendarMonth {
                year,
                month,
                entries: vec![entry],
            }),
        }
    }
    months
}
