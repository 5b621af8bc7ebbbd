//! Daily nutrient totals.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::entry::Entry;
use crate::nutrient::NutrientKey;

/// Summed amounts per nutrient.
///
/// A key absent from the map had no contributing values ("unavailable"),
/// which is distinct from a present 0.0 (a computed zero). Downstream code
/// must not assume every key is present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NutrientTotals(BTreeMap<NutrientKey, f64>);

impl NutrientTotals {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Summed amount, or `None` when no entry carried the key.
    #[must_use]
    pub fn get(&self, key: NutrientKey) -> Option<f64> {
        self.0.get(&key).copied()
    }

    /// True when no nutrient has any contributing data.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Present keys and their sums, in presentation order.
    pub fn iter(&self) -> impl Iterator<Item = (NutrientKey, f64)> + '_ {
        self.0.iter().map(|(key, amount)| (*key, *amount))
    }

    pub(crate) fn add(&mut self, key: NutrientKey, amount: f64) {
        *self.0.entry(key).or_insert(0.0) += amount;
    }

    pub(crate) fn insert(&mut self, key: NutrientKey, amount: f64) {
        self.0.insert(key, amount);
    }
}

/// Per-day totals, keyed by calendar date in the reference zone.
///
/// Only dates with at least one entry appear; missing dates are never
/// zero-filled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DailyTotals(BTreeMap<NaiveDate, NutrientTotals>);

impl DailyTotals {
    /// Totals for one date, if any entry fell on it.
    #[must_use]
    pub fn get(&self, date: NaiveDate) -> Option<&NutrientTotals> {
        self.0.get(&date)
    }

    /// Dates with entries and their totals, in ascending date order.
    pub fn days(&self) -> impl Iterator<Item = (NaiveDate, &NutrientTotals)> {
        self.0.iter().map(|(date, totals)| (*date, totals))
    }

    /// Number of dates with at least one entry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Earliest and latest dates with entries.
    #[must_use]
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = *self.0.keys().next()?;
        let last = *self.0.keys().next_back()?;
        Some((first, last))
    }
}

/// Buckets entries by calendar date and sums each nutrient.
///
/// Missing values are skipped rather than treated as zero, so a day where
/// no entry carried a key reports that key unavailable instead of 0. The
/// result is deterministic for any input order (summation is commutative
/// up to standard floating-point tolerance).
pub fn daily_totals(entries: &[Entry], zone: Tz) -> DailyTotals {
    let mut days: BTreeMap<NaiveDate, NutrientTotals> = BTreeMap::new();

    for entry in entries {
        let totals = days.entry(entry.date(zone)).or_default();
        for (&key, &amount) in &entry.nutrients {
            totals.add(key, amount);
        }
    }

    DailyTotals(days)
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};
    use chrono_tz::Asia::Singapore;

    use super::*;

    /// Timestamp for `2025-01-13 hh:mm` local Singapore time.
    fn sg(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
        Singapore
            .with_ymd_and_hms(2025, 1, day, hour, minute, 0)
            .single()
            .expect("valid test timestamp")
            .with_timezone(&Utc)
    }

    fn entry(timestamp: DateTime<Utc>, item: &str, nutrients: &[(NutrientKey, f64)]) -> Entry {
        Entry::new(timestamp, item, nutrients.iter().copied().collect())
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, day).expect("valid test date")
    }

    #[test]
    fn sums_per_day_per_nutrient() {
        let entries = vec![
            entry(
                sg(13, 8, 0),
                "Oats",
                &[(NutrientKey::Calories, 300.0), (NutrientKey::Protein, 10.0)],
            ),
            entry(
                sg(13, 12, 30),
                "Chicken Rice",
                &[(NutrientKey::Calories, 600.0), (NutrientKey::Protein, 35.0)],
            ),
            entry(sg(14, 9, 0), "Toast", &[(NutrientKey::Calories, 250.0)]),
        ];

        let daily = daily_totals(&entries, Singapore);

        assert_eq!(daily.len(), 2);
        let day_13 = daily.get(date(13)).expect("day 13 present");
        assert_eq!(day_13.get(NutrientKey::Calories), Some(900.0));
        assert_eq!(day_13.get(NutrientKey::Protein), Some(45.0));
        let day_14 = daily.get(date(14)).expect("day 14 present");
        assert_eq!(day_14.get(NutrientKey::Calories), Some(250.0));
        assert_eq!(day_14.get(NutrientKey::Protein), None);
    }

    #[test]
    fn buckets_by_local_date_not_utc() {
        // 01:00 Singapore on the 14th is 17:00 UTC on the 13th.
        let entries = vec![entry(
            sg(14, 1, 0),
            "Supper",
            &[(NutrientKey::Calories, 400.0)],
        )];

        let daily = daily_totals(&entries, Singapore);

        assert!(daily.get(date(13)).is_none());
        assert!(daily.get(date(14)).is_some());
    }

    #[test]
    fn all_absent_reports_unavailable_not_zero() {
        // Neither entry logs fiber, one logs an explicit zero sugar.
        let entries = vec![
            entry(
                sg(13, 8, 0),
                "Black Coffee",
                &[(NutrientKey::Calories, 5.0), (NutrientKey::Sugar, 0.0)],
            ),
            entry(sg(13, 9, 0), "Espresso", &[(NutrientKey::Calories, 3.0)]),
        ];

        let daily = daily_totals(&entries, Singapore);
        let day = daily.get(date(13)).expect("day present");

        assert_eq!(day.get(NutrientKey::Fiber), None);
        assert_eq!(day.get(NutrientKey::Sugar), Some(0.0));
    }

    #[test]
    fn entry_with_no_nutrients_still_creates_the_day() {
        let entries = vec![entry(sg(13, 8, 0), "Water", &[])];

        let daily = daily_totals(&entries, Singapore);
        let day = daily.get(date(13)).expect("day present");

        assert!(day.is_empty());
    }

    #[test]
    fn dates_without_entries_are_absent() {
        let entries = vec![
            entry(sg(13, 8, 0), "Oats", &[(NutrientKey::Calories, 300.0)]),
            entry(sg(15, 8, 0), "Oats", &[(NutrientKey::Calories, 310.0)]),
        ];

        let daily = daily_totals(&entries, Singapore);

        assert!(daily.get(date(14)).is_none());
        assert_eq!(daily.date_span(), Some((date(13), date(15))));
    }

    #[test]
    fn order_independent() {
        let forward = vec![
            entry(sg(13, 8, 0), "Oats", &[(NutrientKey::Calories, 300.0)]),
            entry(sg(13, 12, 0), "Rice", &[(NutrientKey::Calories, 500.0)]),
            entry(sg(14, 8, 0), "Toast", &[(NutrientKey::Calories, 250.0)]),
        ];
        let mut reversed = forward.clone();
        reversed.reverse();

        assert_eq!(
            daily_totals(&forward, Singapore),
            daily_totals(&reversed, Singapore)
        );
    }

    #[test]
    fn recomputing_is_idempotent() {
        let entries = vec![
            entry(
                sg(13, 8, 0),
                "Oats",
                &[(NutrientKey::Calories, 300.0), (NutrientKey::Fiber, 8.0)],
            ),
            entry(sg(13, 12, 0), "Rice", &[(NutrientKey::Calories, 500.0)]),
        ];

        assert_eq!(
            daily_totals(&entries, Singapore),
            daily_totals(&entries, Singapore)
        );
    }

    #[test]
    fn empty_entries_produce_empty_totals() {
        let daily = daily_totals(&[], Singapore);
        assert!(daily.is_empty());
        assert_eq!(daily.date_span(), None);
    }

    #[test]
    fn serde_uses_dates_and_key_names() {
        let entries = vec![entry(
            sg(13, 8, 0),
            "Oats",
            &[(NutrientKey::Calories, 300.0)],
        )];
        let daily = daily_totals(&entries, Singapore);

        let json = serde_json::to_string(&daily).unwrap();
        assert_eq!(json, r#"{"2025-01-13":{"calories":300.0}}"#);
    }
}
