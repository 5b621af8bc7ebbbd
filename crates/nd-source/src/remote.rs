//! Airtable record mapping.
//!
//! Converts the raw field maps returned by the API into [`Entry`] values,
//! using the same column conventions as the CSV export.

use std::collections::BTreeMap;

use chrono_tz::Tz;
use nd_airtable::Record;
use nd_core::{Entry, NutrientKey};
use serde_json::Value;

use crate::SourceError;
use crate::columns::{self, DATE_COLUMN, ITEM_COLUMN};

/// Converts raw Airtable records into food log entries.
///
/// Records without an item name or input date are skipped as drafts.
/// Unset nutrient fields stay unrecorded rather than becoming zeros.
///
/// # Errors
///
/// Returns an error if a record carries an unparseable input date.
pub fn entries_from_records(records: &[Record], zone: Tz) -> Result<Vec<Entry>, SourceError> {
    let mut entries = Vec::with_capacity(records.len());

    for record in records {
        let Some(item_name) = string_field(record, ITEM_COLUMN) else {
            tracing::warn!(record_id = %record.id, "skipping record without an item name");
            continue;
        };
        let Some(raw_date) = string_field(record, DATE_COLUMN) else {
            tracing::warn!(
                record_id = %record.id,
                item = item_name,
                "skipping record without an input date"
            );
            continue;
        };
        let timestamp = columns::parse_input_date(raw_date, zone).map_err(|message| {
            SourceError::InvalidInputDate {
                item: item_name.to_string(),
                value: raw_date.to_string(),
                message,
            }
        })?;

        let mut nutrients = BTreeMap::new();
        for key in NutrientKey::ALL {
            let Some(value) = record.fields.get(key.column_label()) else {
                continue;
            };
            match value.as_f64() {
                Some(amount) => {
                    nutrients.insert(key, amount);
                }
                None => tracing::debug!(
                    record_id = %record.id,
                    column = key.column_label(),
                    "ignoring non-numeric nutrient field"
                ),
            }
        }

        entries.push(Entry::new(timestamp, item_name, nutrients));
    }

    tracing::debug!(count = entries.len(), "mapped remote records");
    Ok(entries)
}

fn string_field<'a>(record: &'a Record, name: &str) -> Option<&'a str> {
    record
        .fields
        .get(name)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())
}
