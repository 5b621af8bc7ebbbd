//! Food log entries.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::nutrient::NutrientKey;

/// One logged food consumption event.
///
/// Entries are immutable once constructed; every aggregate is recomputed
/// from the full entry snapshot, so nothing here ever changes in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// When the food was logged, as a UTC instant.
    pub timestamp: DateTime<Utc>,

    /// Free-text food label. Not unique across entries; rankings group by
    /// exact string.
    pub item_name: String,

    /// Recorded amounts. A key absent from the map was not logged, which
    /// is distinct from a recorded 0.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub nutrients: BTreeMap<NutrientKey, f64>,
}

impl Entry {
    pub fn new(
        timestamp: DateTime<Utc>,
        item_name: impl Into<String>,
        nutrients: BTreeMap<NutrientKey, f64>,
    ) -> Self {
        Self {
            timestamp,
            item_name: item_name.into(),
            nutrients,
        }
    }

    /// Calendar date of this entry in the reference zone.
    ///
    /// Day buckets and "today" must use the same zone or they will not
    /// line up across midnight.
    #[must_use]
    pub fn date(&self, zone: Tz) -> NaiveDate {
        self.timestamp.with_timezone(&zone).date_naive()
    }

    /// Recorded amount for one nutrient, if logged.
    #[must_use]
    pub fn amount(&self, key: NutrientKey) -> Option<f64> {
        self.nutrients.get(&key).copied()
    }
}
