//! Entries command: raw food log listing.

use std::fmt::Write;

use anyhow::Result;
use chrono::NaiveDate;
use chrono_tz::Tz;
use nd_core::{DateRange, Entry, NutrientKey, daily_totals};
use serde::Serialize;

use crate::cli::EntriesArgs;
use crate::commands::util;
use crate::config::Config;

/// Minimum width of the item name column.
const MIN_NAME_WIDTH: usize = 12;

/// Computed listing data.
#[derive(Debug)]
pub struct EntriesData {
    pub range: DateRange,
    /// Entries inside the range, ordered by timestamp then name.
    pub entries: Vec<Entry>,
}

/// Filters and orders entries for listing.
pub fn entries_data(entries: &[Entry], range: DateRange, zone: Tz) -> EntriesData {
    let mut entries: Vec<Entry> = entries
        .iter()
        .filter(|entry| range.contains(entry.date(zone)))
        .cloned()
        .collect();
    entries.sort_by(|a, b| {
        a.timestamp
            .cmp(&b.timestamp)
            .then_with(|| a.item_name.cmp(&b.item_name))
    });

    EntriesData { range, entries }
}

/// Formats the human-readable listing. Timestamps are shown in the
/// reference zone.
pub fn format_entries(data: &EntriesData, zone: Tz) -> String {
    let mut output = String::new();

    let entry_word = if data.entries.len() == 1 {
        "entry"
    } else {
        "entries"
    };
    let title = format!(
        "RAW DATA: {} to {} ({} {entry_word})",
        data.range.start(),
        data.range.end(),
        data.entries.len()
    );
    writeln!(output, "{title}").unwrap();
    writeln!(output, "{}", util::underline(&title)).unwrap();

    if data.entries.is_empty() {
        writeln!(output, "(no entries)").unwrap();
        return output;
    }

    let width = data
        .entries
        .iter()
        .map(|entry| entry.item_name.chars().count())
        .max()
        .unwrap_or(0)
        .max(MIN_NAME_WIDTH);

    for entry in &data.entries {
        let local = entry.timestamp.with_timezone(&zone).format("%Y-%m-%d %H:%M");
        let calories = entry.amount(NutrientKey::Calories).map_or_else(
            || "n/a".to_string(),
            |amount| util::format_amount(NutrientKey::Calories, amount),
        );
        writeln!(output, "{local}  {:<width$}  {calories:>10}", entry.item_name).unwrap();
    }

    output
}

/// JSON listing structure.
#[derive(Debug, Serialize)]
pub struct JsonEntries {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub entries: Vec<Entry>,
}

/// Formats listing data as JSON.
pub fn format_entries_json(data: &EntriesData) -> Result<String> {
    let report = JsonEntries {
        start: data.range.start(),
        end: data.range.end(),
        entries: data.entries.clone(),
    };

    Ok(serde_json::to_string_pretty(&report)?)
}

/// Runs the entries command.
pub fn run(args: &EntriesArgs, config: &Config) -> Result<()> {
    let zone = config.reference_zone()?;
    let entries = util::load_entries(config, zone)?;
    let daily = daily_totals(&entries, zone);

    let Some(range) = util::resolve_range(&args.range, &daily)? else {
        if args.json {
            println!("null");
        } else {
            println!("No entries recorded.");
        }
        return Ok(());
    };

    let data = entries_data(&entries, range, zone);

    if args.json {
        println!("{}", format_entries_json(&data)?);
    } else {
        print!("{}", format_entries(&data, zone));
    }

    Ok(())
}
