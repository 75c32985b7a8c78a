//! # event-sheet
//!
//! Command line access to the event tab. Results are printed as JSON on
//! stdout; diagnostics go to stderr.

use anyhow::Context;
use anyhow::Result;
use clap::Args;
use clap::Parser;
use clap::Subcommand;
use event_sheet::client::SheetsClient;
use event_sheet::events::report::calendar;
use event_sheet::events::report::Dashboard;
use event_sheet::events::report::EventReport;
use event_sheet::logging::init_tracing;
use event_sheet::EventInput;
use event_sheet::EventStore;
use event_sheet::Settings;
use serde::Serialize;
use std::collections::BTreeMap;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::io::AsyncReadExt;

/// Exit status when the requested row holds no event.
const NOT_FOUND_EXIT: u8 = 2;

/// Promotional event records kept in a spreadsheet tab.
#[derive(Parser, Debug)]
#[command(name = "event-sheet", about = "Promotional event records kept in a spreadsheet tab")]
struct Cli {
    /// Log level used when RUST_LOG is unset.
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every event.
    List,
    /// Show the event at a row number.
    Show { row: usize },
    /// Append a new event.
    Create(CreateArgs),
    /// Post-event report of the event at a row number.
    Report { row: usize },
    /// Consumption totals over all events.
    Dashboard,
    /// Events grouped by month.
    Calendar,
}

#[derive(Args, Debug)]
struct CreateArgs {
    /// Read the event as JSON from a file, or `-` for stdin.
    #[arg(long, conflicts_with_all = ["name", "date", "location", "address", "time", "attendance", "drinks"])]
    json: Option<String>,

    #[arg(long, required_unless_present = "json")]
    name: Option<String>,

    /// Event date, e.g. 10/10/2025.
    #[arg(long, required_unless_present = "json")]
    date: Option<String>,

    #[arg(long)]
    location: Option<String>,

    #[arg(long)]
    address: Option<String>,

    #[arg(long)]
    time: Option<String>,

    /// Expected attendance.
    #[arg(long)]
    attendance: Option<u64>,

    /// Drink quantity as `NAME=QUANTITY`, repeatable.
    #[arg(long = "drink", value_parser = parse_drink)]
    drinks: Vec<(String, f64)>,
}

fn parse_drink(value: &str) -> Result<(String, f64), String> {
    let (name, quantity) = value
        .rsplit_once('=')
        .ok_or_else(|| format!("expected NAME=QUANTITY, got '{value}'"))?;
    let quantity = quantity
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid quantity for '{}': {e}", name.trim()))?;
    Ok((name.trim().to_owned(), quantity))
}

impl CreateArgs {
    async fn into_input(self) -> Result<EventInput> {
        if let Some(source) = self.json {
            let text = if source == "-" {
                let mut text = String::new();
                tokio::io::stdin()
                    .read_to_string(&mut text)
                    .await
                    .context("Failed to read event JSON from stdin")?;
                text
            } else {
                tokio::fs::read_to_string(&source)
                    .await
                    .with_context(|| format!("Failed to read event JSON: {source}"))?
            };
            return serde_json::from_str(&text).context("Invalid event JSON");
        }

        Ok(EventInput {
            name: self.name.unwrap_or_default(),
            date: self.date.unwrap_or_default(),
            location: self.location.unwrap_or_default(),
            address: self.address.unwrap_or_default(),
            time: self.time.unwrap_or_default(),
            attendance: self.attendance.map(|value| value as f64),
            drinks: self.drinks.into_iter().collect::<BTreeMap<_, _>>(),
        })
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value).context("Failed to encode output")?);
    Ok(())
}

fn not_found(row: usize) -> ExitCode {
    eprintln!("No event found at row {row}");
    ExitCode::from(NOT_FOUND_EXIT)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let settings = Settings::from_env().context("Failed to load configuration")?;
    let client = Arc::new(SheetsClient::new(&settings));
    let store = EventStore::new(client, &settings.table);

    match cli.command {
        Command::List => print_json(&store.list().await.context("Failed to list events")?)?,
        Command::Show { row } => match store.get_by_position(row).await.context("Failed to read event")? {
            Some(event) => print_json(&event)?,
            None => return Ok(not_found(row)),
        },
        Command::Create(args) => {
            let input = args.into_input().await?;
            print_json(&store.create(&input).await.context("Failed to create event")?)?
        }
        Command::Report { row } => match store.get_by_position(row).await.context("Failed to read event")? {
            Some(event) => print_json(&EventReport::from_event(&event))?,
            None => return Ok(not_found(row)),
        },
        Command::Dashboard => {
            let events = store.list().await.context("Failed to list events")?;
            print_json(&Dashboard::from_events(&events))?
        }
        Command::Calendar => {
            let events = store.list().await.context("Failed to list events")?;
            print_json(&calendar(&events))?
        }
    }
    Ok(ExitCode::SUCCESS)
}
