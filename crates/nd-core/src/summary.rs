//! Range summaries: today's intake against the range average.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::AggregateError;
use crate::nutrient::NutrientKey;
use crate::totals::{DailyTotals, NutrientTotals};

/// Inclusive calendar date range.
///
/// Construction rejects inverted ranges, so a held value is always valid
/// and range checks never need to re-validate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Creates an inclusive range. `start == end` covers exactly one day.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, AggregateError> {
        if start > end {
            return Err(AggregateError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// A range covering a single day.
    #[must_use]
    pub const fn single_day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    #[must_use]
    pub const fn start(self) -> NaiveDate {
        self.start
    }

    #[must_use]
    pub const fn end(self) -> NaiveDate {
        self.end
    }

    /// True when `date` falls inside the range, boundaries included.
    #[must_use]
    pub fn contains(self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Sums daily totals over an inclusive range into one totals record.
///
/// Useful as the input to a macro split over a whole period. Keys absent
/// from every day inside the range stay absent.
pub fn range_totals(daily: &DailyTotals, range: DateRange) -> NutrientTotals {
    let mut totals = NutrientTotals::new();
    for (date, day) in daily.days() {
        if !range.contains(date) {
            continue;
        }
        for (key, amount) in day.iter() {
            totals.add(key, amount);
        }
    }
    totals
}

/// Today's totals, the range average, and their delta.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeSummary {
    /// The selected window the average is computed over.
    pub range: DateRange,

    /// The reference date the "today" card reads.
    pub today: NaiveDate,

    /// Totals at `today` from the unfiltered daily totals. Empty when
    /// today has no entries.
    pub today_totals: NutrientTotals,

    /// Mean of per-day totals across range days where each key is
    /// present. A key no day carries is absent.
    pub average_totals: NutrientTotals,

    /// `today - average` per key, present only where both sides are.
    pub delta: NutrientTotals,

    /// Days inside the range with at least one entry.
    pub days_with_entries: usize,
}

/// Summarizes daily totals over an inclusive range against a reference date.
///
/// The average only sees days inside the range. The today card always reads
/// the unfiltered totals at `today`, even when the range excludes that date;
/// the two are computed independently on purpose so narrowing the window
/// never blanks out the current day.
pub fn range_summary(daily: &DailyTotals, range: DateRange, today: NaiveDate) -> RangeSummary {
    let mut sums: BTreeMap<NutrientKey, (f64, u32)> = BTreeMap::new();
    let mut days_with_entries = 0;

    for (date, totals) in daily.days() {
        if !range.contains(date) {
            continue;
        }
        days_with_entries += 1;
        for (key, amount) in totals.iter() {
            let (sum, days) = sums.entry(key).or_insert((0.0, 0));
            *sum += amount;
            *days += 1;
        }
    }

    let mut average_totals = NutrientTotals::new();
    for (key, (sum, days)) in sums {
        average_totals.insert(key, sum / f64::from(days));
    }

    let today_totals = daily.get(today).cloned().unwrap_or_default();

    let mut delta = NutrientTotals::new();
    for (key, today_amount) in today_totals.iter() {
        if let Some(average) = average_totals.get(key) {
            delta.insert(key, today_amount - average);
        }
    }

    RangeSummary {
        range,
        today,
        today_totals,
        average_totals,
        delta,
        days_with_entries,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};
    use chrono_tz::Asia::Singapore;

    use super::*;
    use crate::entry::Entry;
    use crate::totals::daily_totals;

    fn sg(day: u32, hour: u32) -> DateTime<Utc> {
        Singapore
            .with_ymd_and_hms(2025, 1, day, hour, 0, 0)
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

    fn range(start: u32, end: u32) -> DateRange {
        DateRange::new(date(start), date(end)).expect("valid test range")
    }

    fn fixture_daily() -> DailyTotals {
        // Day 13: 2000 kcal, 80g protein. Day 14: 1000 kcal, no protein.
        // Day 16: 1600 kcal, 40g protein. Day 15 has no entries.
        let entries = vec![
            entry(
                sg(13, 8),
                "Oats",
                &[(NutrientKey::Calories, 800.0), (NutrientKey::Protein, 30.0)],
            ),
            entry(
                sg(13, 19),
                "Chicken Rice",
                &[(NutrientKey::Calories, 1200.0), (NutrientKey::Protein, 50.0)],
            ),
            entry(sg(14, 12), "Laksa", &[(NutrientKey::Calories, 1000.0)]),
            entry(
                sg(16, 12),
                "Salmon Bowl",
                &[(NutrientKey::Calories, 1600.0), (NutrientKey::Protein, 40.0)],
            ),
        ];
        daily_totals(&entries, Singapore)
    }

    #[test]
    fn inverted_range_is_rejected() {
        let err = DateRange::new(date(20), date(13)).unwrap_err();
        assert_eq!(
            err,
            AggregateError::InvalidRange {
                start: date(20),
                end: date(13),
            }
        );
    }

    #[test]
    fn single_day_range_contains_only_that_day() {
        let range = DateRange::new(date(14), date(14)).expect("single-day range is valid");
        assert!(range.contains(date(14)));
        assert!(!range.contains(date(13)));
        assert!(!range.contains(date(15)));
    }

    #[test]
    fn average_over_single_day_equals_that_day() {
        let daily = fixture_daily();
        let summary = range_summary(&daily, range(13, 13), date(13));

        assert_eq!(summary.average_totals, *daily.get(date(13)).unwrap());
        assert_eq!(summary.days_with_entries, 1);
    }

    #[test]
    fn average_skips_days_without_entries() {
        let daily = fixture_daily();
        // Days 13, 14, 16 have entries; day 15 contributes nothing.
        let summary = range_summary(&daily, range(13, 16), date(16));

        assert_eq!(summary.days_with_entries, 3);
        let avg_calories = summary.average_totals.get(NutrientKey::Calories).unwrap();
        assert!((avg_calories - (2000.0 + 1000.0 + 1600.0) / 3.0).abs() < 1e-9);
    }

    #[test]
    fn average_denominator_is_per_key_presence() {
        let daily = fixture_daily();
        // Protein is present on days 13 and 16 only, so it averages over 2
        // days even though 3 days have entries.
        let summary = range_summary(&daily, range(13, 16), date(16));

        let avg_protein = summary.average_totals.get(NutrientKey::Protein).unwrap();
        assert!((avg_protein - (80.0 + 40.0) / 2.0).abs() < 1e-9);
    }

    #[test]
    fn key_absent_on_every_day_is_unavailable() {
        let daily = fixture_daily();
        let summary = range_summary(&daily, range(13, 16), date(16));

        assert_eq!(summary.average_totals.get(NutrientKey::Fiber), None);
    }

    #[test]
    fn today_without_entries_is_fully_unavailable() {
        let daily = fixture_daily();
        let summary = range_summary(&daily, range(13, 16), date(15));

        assert!(summary.today_totals.is_empty());
        assert!(summary.delta.is_empty());
        // The average is still well defined from the other days.
        assert!(summary.average_totals.get(NutrientKey::Calories).is_some());
    }

    #[test]
    fn today_card_ignores_the_range_filter() {
        let daily = fixture_daily();
        // Range covers days 13-14 but today is the 16th, outside it.
        let summary = range_summary(&daily, range(13, 14), date(16));

        assert_eq!(
            summary.today_totals.get(NutrientKey::Calories),
            Some(1600.0)
        );
        // The average still only sees the selected window.
        let avg_calories = summary.average_totals.get(NutrientKey::Calories).unwrap();
        assert!((avg_calories - 1500.0).abs() < 1e-9);
    }

    #[test]
    fn delta_is_today_minus_average() {
        let daily = fixture_daily();
        let summary = range_summary(&daily, range(13, 16), date(16));

        // Average calories: 4600 / 3. Today (16th): 1600.
        let expected = 1600.0 - 4600.0 / 3.0;
        let delta = summary.delta.get(NutrientKey::Calories).unwrap();
        assert!((delta - expected).abs() < 1e-9);
    }

    #[test]
    fn delta_requires_both_sides() {
        // Protein is logged today but on no other day in range.
        let entries = vec![
            entry(sg(13, 12), "Laksa", &[(NutrientKey::Calories, 1000.0)]),
            entry(
                sg(14, 12),
                "Steak",
                &[(NutrientKey::Calories, 900.0), (NutrientKey::Protein, 60.0)],
            ),
        ];
        let daily = daily_totals(&entries, Singapore);
        let summary = range_summary(&daily, range(13, 13), date(14));

        // Today has protein but the range average does not.
        assert_eq!(summary.today_totals.get(NutrientKey::Protein), Some(60.0));
        assert_eq!(summary.average_totals.get(NutrientKey::Protein), None);
        assert_eq!(summary.delta.get(NutrientKey::Protein), None);
        // Calories has both sides.
        assert_eq!(summary.delta.get(NutrientKey::Calories), Some(-100.0));
    }

    #[test]
    fn empty_daily_totals_yield_an_empty_summary() {
        let daily = DailyTotals::default();
        let summary = range_summary(&daily, range(13, 16), date(14));

        assert!(summary.today_totals.is_empty());
        assert!(summary.average_totals.is_empty());
        assert!(summary.delta.is_empty());
        assert_eq!(summary.days_with_entries, 0);
    }

    #[test]
    fn range_totals_sums_only_days_inside_the_range() {
        let daily = fixture_daily();
        let totals = range_totals(&daily, range(13, 14));

        assert_eq!(totals.get(NutrientKey::Calories), Some(3000.0));
        assert_eq!(totals.get(NutrientKey::Protein), Some(80.0));
    }

    #[test]
    fn range_totals_keeps_universally_absent_keys_absent() {
        let daily = fixture_daily();
        let totals = range_totals(&daily, range(13, 16));

        assert_eq!(totals.get(NutrientKey::Calories), Some(4600.0));
        assert_eq!(totals.get(NutrientKey::Fiber), None);
    }
}
