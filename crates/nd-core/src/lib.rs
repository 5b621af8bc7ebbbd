//! Core aggregation logic for the nutrition dashboard.
//!
//! This crate turns an immutable snapshot of food-log entries into the
//! derived values the dashboard shows:
//! - Daily totals: per-day, per-nutrient sums in a fixed reference zone
//! - Range summaries: today's intake against the range average, with deltas
//! - Macro proportions: the protein/carb/fat share of caloric intake
//! - Food rankings: top items by a selected nutrient
//!
//! Everything here is a pure function over borrowed data. The crate holds
//! no state, performs no I/O, and never logs; unavailable data is an absent
//! map key, not an error. The reference "today" date is always injected so
//! results stay deterministic.

pub mod entry;
pub mod error;
pub mod macros;
pub mod nutrient;
pub mod ranking;
pub mod summary;
pub mod totals;

pub use entry::Entry;
pub use error::AggregateError;
pub use macros::{MacroProportions, macro_proportions};
pub use nutrient::NutrientKey;
pub use ranking::{DEFAULT_RANKING_LIMIT, FoodTotal, rank_foods};
pub use summary::{DateRange, RangeSummary, range_summary, range_totals};
pub use totals::{DailyTotals, NutrientTotals, daily_totals};
