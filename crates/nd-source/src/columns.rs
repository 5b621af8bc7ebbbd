//! Shared column conventions for the Airtable food log.
//!
//! The CSV export and the API report the same schema, so both source
//! paths resolve columns and parse input dates through this module.

use chrono::{DateTime, LocalResult, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Column holding the free-text food label.
pub(crate) const ITEM_COLUMN: &str = "Item Name";

/// Column holding the consumption timestamp, in the log's local zone.
pub(crate) const DATE_COLUMN: &str = "Input Date";

/// How the log formats input dates, e.g. `13/01/2025 7:30AM`.
const INPUT_DATE_FORMAT: &str = "%d/%m/%Y %I:%M%p";

/// Attachment columns carry photos of the meal, never nutrient data.
pub(crate) fn is_photo_column(name: &str) -> bool {
    name.contains("Photo")
}

/// Parses a nutrient cell. Blank or non-numeric cells count as unrecorded.
pub(crate) fn parse_amount(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|amount| amount.is_finite())
}

/// Parses an input date into a UTC instant.
///
/// The log writes wall-clock times in `zone` (`13/01/2025 7:30AM`); the
/// API reports the same field in RFC 3339, so both forms are accepted.
/// An ambiguous wall-clock time resolves to its earlier instant.
pub(crate) fn parse_input_date(raw: &str, zone: Tz) -> Result<DateTime<Utc>, String> {
    let trimmed = raw.trim();
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, INPUT_DATE_FORMAT) {
        return match zone.from_local_datetime(&naive) {
            LocalResult::Single(local) => Ok(local.with_timezone(&Utc)),
            LocalResult::Ambiguous(earliest, _) => Ok(earliest.with_timezone(&Utc)),
            LocalResult::None => Err(format!("wall-clock time does not exist in {zone}")),
        };
    }
    if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(instant.with_timezone(&Utc));
    }
    Err(format!("expected `{INPUT_DATE_FORMAT}` or RFC 3339"))
}
