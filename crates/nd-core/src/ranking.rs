//! Per-food nutrient rankings.

use std::collections::HashMap;

use chrono_tz::Tz;
use serde::Serialize;

use crate::entry::Entry;
use crate::nutrient::NutrientKey;
use crate::summary::DateRange;

/// Number of foods reported when the caller does not ask otherwise.
pub const DEFAULT_RANKING_LIMIT: usize = 10;

/// One ranked food item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FoodTotal {
    /// The exact item label entries were grouped by.
    pub item_name: String,

    /// Summed amount of the selected nutrient over the range.
    pub total: f64,
}

/// Sums one nutrient per food item over a date range, ranked descending.
///
/// Unlike daily totals, missing values count as zero here: a food whose
/// entries never carry the key still appears, with a 0.0 total that is
/// indistinguishable from zero intake. Ties break by ascending item name
/// and the list is truncated to `limit`.
pub fn rank_foods(
    entries: &[Entry],
    key: NutrientKey,
    range: DateRange,
    zone: Tz,
    limit: usize,
) -> Vec<FoodTotal> {
    let mut totals: HashMap<String, f64> = HashMap::new();

    for entry in entries {
        if !range.contains(entry.date(zone)) {
            continue;
        }
        let total = totals.entry(entry.item_name.clone()).or_insert(0.0);
        if let Some(amount) = entry.amount(key) {
            *total += amount;
        }
    }

    let mut ranked: Vec<FoodTotal> = totals
        .into_iter()
        .map(|(item_name, total)| FoodTotal { item_name, total })
        .collect();
    ranked.sort_by(|a, b| {
        b.total
            .total_cmp(&a.total)
            .then_with(|| a.item_name.cmp(&b.item_name))
    });
    ranked.truncate(limit);
    ranked
}
