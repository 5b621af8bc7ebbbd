//! CSV export loader.
//!
//! Reads the grid-view CSV that Airtable exports for the food log and
//! turns each row into an [`Entry`]. Column positions are resolved from
//! the header row once; photo attachment columns and anything else the
//! dashboard does not chart are dropped up front.

use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

use chrono_tz::Tz;
use nd_core::{Entry, NutrientKey};

use crate::SourceError;
use crate::columns::{self, DATE_COLUMN, ITEM_COLUMN};

/// Column positions resolved from the header row.
struct Layout {
    item: usize,
    date: usize,
    nutrients: Vec<(usize, NutrientKey)>,
}

fn resolve_layout(headers: &csv::StringRecord) -> Result<Layout, SourceError> {
    let mut item = None;
    let mut date = None;
    let mut nutrients = Vec::new();

    for (index, name) in headers.iter().enumerate() {
        if name == ITEM_COLUMN {
            item = Some(index);
        } else if name == DATE_COLUMN {
            date = Some(index);
        } else if columns::is_photo_column(name) {
            tracing::debug!(column = name, "dropping photo column");
        } else if let Some(key) = NutrientKey::from_column_label(name) {
            nutrients.push((index, key));
        } else {
            tracing::debug!(column = name, "ignoring unrecognized column");
        }
    }

    let item = item.ok_or(SourceError::MissingColumn { name: ITEM_COLUMN })?;
    let date = date.ok_or(SourceError::MissingColumn { name: DATE_COLUMN })?;
    Ok(Layout {
        item,
        date,
        nutrients,
    })
}

/// Loads food log entries from the CSV export at `path`.
///
/// Rows without an item name or input date are skipped as drafts. Blank
/// nutrient cells stay unrecorded rather than becoming zeros, so missing
/// measurements never drag averages down.
///
/// # Errors
///
/// Returns an error if the file cannot be read, a required column is
/// missing, or a row carries an unparseable input date.
pub fn load_csv(path: &Path, zone: Tz) -> Result<Vec<Entry>, SourceError> {
    let file = File::open(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|source| SourceError::Csv {
            path: path.to_path_buf(),
            source,
        })?
        .clone();
    let layout = resolve_layout(&headers)?;

    let mut entries = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = result.map_err(|source| SourceError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        // Header row occupies line 1.
        let line = index + 2;

        let item_name = record.get(layout.item).unwrap_or("");
        if item_name.is_empty() {
            tracing::warn!(line, "skipping row without an item name");
            continue;
        }

        let raw_date = record.get(layout.date).unwrap_or("");
        if raw_date.is_empty() {
            tracing::warn!(line, item = item_name, "skipping row without an input date");
            continue;
        }
        let timestamp = columns::parse_input_date(raw_date, zone).map_err(|message| {
            SourceError::InvalidInputDate {
                item: item_name.to_string(),
                value: raw_date.to_string(),
                message,
            }
        })?;

        let mut nutrients = BTreeMap::new();
        for &(column, key) in &layout.nutrients {
            let raw = record.get(column).unwrap_or("");
            if raw.is_empty() {
                continue;
            }
            match columns::parse_amount(raw) {
                Some(amount) => {
                    nutrients.insert(key, amount);
                }
                None => tracing::debug!(
                    line,
                    column = key.column_label(),
                    value = raw,
                    "ignoring non-numeric nutrient cell"
                ),
            }
        }

        entries.push(Entry::new(timestamp, item_name, nutrients));
    }

    tracing::debug!(count = entries.len(), path = %path.display(), "loaded CSV export");
    Ok(entries)
}
