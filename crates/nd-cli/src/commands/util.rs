//! Shared helpers for CLI commands.

use anyhow::{Context, Result};
use chrono::Utc;
use chrono_tz::Tz;
use nd_core::{DailyTotals, DateRange, Entry, NutrientKey};
use nd_source::{Snapshot, SnapshotCache};

use crate::cli::RangeArgs;
use crate::config::Config;

/// Width of intake bars in characters.
const BAR_WIDTH: usize = 20;

/// Generates a fixed-width intake bar.
/// Values below 5% of max get a single block for visibility.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn intake_bar(value: f64, max: f64) -> String {
    if max <= 0.0 {
        return "░".repeat(BAR_WIDTH);
    }

    let ratio = (value / max).min(1.0);
    let filled = if ratio < 0.05 && value > 0.0 {
        1 // Minimum 1 block so small intakes stay visible
    } else {
        (ratio * BAR_WIDTH as f64).round().min(BAR_WIDTH as f64) as usize
    };

    let empty = BAR_WIDTH - filled;
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

/// Formats an amount with the nutrient's unit.
/// Calories get a space before the unit ("600 kcal"), gram and milligram
/// amounts do not ("82.5g", "250mg").
pub fn format_amount(key: NutrientKey, value: f64) -> String {
    let unit = key.unit();
    if unit == "kcal" {
        format!("{value:.0} kcal")
    } else {
        format!("{value:.precision$}{unit}", precision = key.precision())
    }
}

/// A `─` rule as wide as the title above it.
pub fn underline(title: &str) -> String {
    "─".repeat(title.chars().count())
}

/// Resolves the requested date range against the logged data.
///
/// Missing endpoints default to the span of logged days. Returns `None`
/// when nothing is logged and the flags do not pin both ends.
pub fn resolve_range(args: &RangeArgs, daily: &DailyTotals) -> Result<Option<DateRange>> {
    let span = daily.date_span();
    let start = args.start.or_else(|| span.map(|(first, _)| first));
    let end = args.end.or_else(|| span.map(|(_, last)| last));

    match (start, end) {
        (Some(start), Some(end)) => Ok(Some(DateRange::new(start, end)?)),
        _ => Ok(None),
    }
}

/// Loads food log entries from the configured source.
///
/// A configured CSV path takes priority. Otherwise a fresh snapshot is
/// served from the cache, falling back to a live Airtable fetch that
/// also refreshes the snapshot.
pub fn load_entries(config: &Config, zone: Tz) -> Result<Vec<Entry>> {
    if let Some(path) = &config.csv_path {
        let entries = nd_source::load_csv(path, zone)
            .with_context(|| format!("failed to load CSV from {}", path.display()))?;
        return Ok(entries);
    }

    let cache = SnapshotCache::new(&config.cache_path, config.cache_ttl());
    if let Some(snapshot) = cache
        .load_fresh(Utc::now())
        .context("failed to read snapshot cache")?
    {
        return Ok(snapshot.entries);
    }

    let entries = fetch_remote(config, zone)?;
    let snapshot = Snapshot {
        fetched_at: Utc::now(),
        entries,
    };
    cache
        .store(&snapshot)
        .context("failed to write snapshot cache")?;
    Ok(snapshot.entries)
}

/// Fetches the food log from Airtable and maps it to entries.
pub fn fetch_remote(config: &Config, zone: Tz) -> Result<Vec<Entry>> {
    let api_key = config
        .airtable_api_key
        .as_deref()
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .ok_or_else(|| {
            anyhow::anyhow!(
                "missing Airtable API key (set ND_AIRTABLE_API_KEY or configure csv_path)"
            )
        })?;
    let base_id = config
        .airtable_base_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| anyhow::anyhow!("missing Airtable base id (set ND_AIRTABLE_BASE_ID)"))?;

    let client = nd_airtable::Client::new(api_key).context("failed to create Airtable client")?;

    let runtime = tokio::runtime::Runtime::new().context("failed to create async runtime")?;
    let records = runtime
        .block_on(client.list_records(base_id, &config.airtable_table))
        .context("failed to fetch records from Airtable")?;
    tracing::debug!(count = records.len(), "fetched Airtable records");

    Ok(nd_source::entries_from_records(&records, zone)?)
}
