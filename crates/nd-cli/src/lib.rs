//! Command-line dashboard over the nutrition log.
//!
//! Loads entries from a CSV export or the Airtable API (with a local
//! snapshot cache), aggregates them with [`nd_core`], and renders
//! terminal reports or JSON.

mod cli;
pub mod commands;
mod config;

pub use cli::{
    Cli, Commands, EntriesArgs, FoodsArgs, MacrosArgs, RangeArgs, SummaryArgs, TrendArgs,
};
pub use config::Config;
