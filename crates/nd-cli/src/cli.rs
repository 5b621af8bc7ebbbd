use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use nd_core::NutrientKey;

#[derive(Parser)]
#[command(name = "nd", version, about = "Personal nutrition dashboard", long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show today's intake against the daily average
    Summary(SummaryArgs),
    /// Show a per-day bar chart for one nutrient
    Trend(TrendArgs),
    /// Rank food items by their contribution to one nutrient
    Foods(FoodsArgs),
    /// Show the protein/carbs/fat energy split
    Macros(MacrosArgs),
    /// List raw food log entries
    Entries(EntriesArgs),
    /// Fetch the latest log from Airtable and refresh the snapshot
    Refresh,
}

/// Date range shared by the reporting commands.
#[derive(Clone, Copy, clap::Args)]
pub struct RangeArgs {
    /// First day of the range (defaults to the earliest logged day)
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// Last day of the range (defaults to the latest logged day)
    #[arg(long)]
    pub end: Option<NaiveDate>,
}

#[derive(clap::Args)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub range: RangeArgs,

    /// Day to report as "today" (defaults to the current date)
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(clap::Args)]
pub struct TrendArgs {
    #[command(flatten)]
    pub range: RangeArgs,

    /// Nutrient to chart
    #[arg(long, default_value = "calories")]
    pub nutrient: NutrientKey,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(clap::Args)]
pub struct FoodsArgs {
    #[command(flatten)]
    pub range: RangeArgs,

    /// Nutrient to rank by
    #[arg(long, default_value = "calories")]
    pub nutrient: NutrientKey,

    /// How many items to show
    #[arg(long, default_value_t = nd_core::DEFAULT_RANKING_LIMIT)]
    pub limit: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(clap::Args)]
pub struct MacrosArgs {
    #[command(flatten)]
    pub range: RangeArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(clap::Args)]
pub struct EntriesArgs {
    #[command(flatten)]
    pub range: RangeArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
