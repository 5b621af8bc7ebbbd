//! Trend command: per-day bars for a single nutrient.

use std::fmt::Write;

use anyhow::Result;
use chrono::NaiveDate;
use nd_core::{DailyTotals, DateRange, NutrientKey, daily_totals, range_summary};
use serde::Serialize;

use crate::cli::TrendArgs;
use crate::commands::util;
use crate::config::Config;

/// Computed trend data.
#[derive(Debug)]
pub struct TrendData {
    pub nutrient: NutrientKey,
    pub range: DateRange,
    /// One point per calendar day in the range, `None` on days without
    /// a recorded amount for the nutrient.
    pub days: Vec<(NaiveDate, Option<f64>)>,
    /// Mean over the days that carry the nutrient.
    pub average: Option<f64>,
}

/// Collects one data point per day of the range.
pub fn trend_data(daily: &DailyTotals, range: DateRange, nutrient: NutrientKey) -> TrendData {
    let days: Vec<(NaiveDate, Option<f64>)> = range
        .start()
        .iter_days()
        .take_while(|date| *date <= range.end())
        .map(|date| (date, daily.get(date).and_then(|totals| totals.get(nutrient))))
        .collect();

    let average = range_summary(daily, range, range.end())
        .average_totals
        .get(nutrient);

    TrendData {
        nutrient,
        range,
        days,
        average,
    }
}

/// Formats the human-readable trend chart. Bars scale to the largest
/// day in the range.
pub fn format_trend(data: &TrendData) -> String {
    let mut output = String::new();

    let title = format!("NUTRITIONAL TRENDS: {}", data.nutrient.label());
    writeln!(output, "{title}").unwrap();
    writeln!(output, "{}", util::underline(&title)).unwrap();

    let max = data
        .days
        .iter()
        .filter_map(|(_, value)| *value)
        .fold(0.0_f64, f64::max);

    for &(date, value) in &data.days {
        let bar = util::intake_bar(value.unwrap_or(0.0), max);
        let amount = value.map_or_else(
            || "n/a".to_string(),
            |amount| util::format_amount(data.nutrient, amount),
        );
        writeln!(output, "{date}  {bar}  {amount:>10}").unwrap();
    }

    writeln!(output).unwrap();
    let average = data.average.map_or_else(
        || "n/a".to_string(),
        |amount| util::format_amount(data.nutrient, amount),
    );
    writeln!(output, "Average: {average}").unwrap();

    output
}

/// JSON trend structure.
#[derive(Debug, Serialize)]
pub struct JsonTrend {
    pub nutrient: NutrientKey,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days: Vec<JsonTrendDay>,
    pub average: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct JsonTrendDay {
    pub date: NaiveDate,
    pub total: Option<f64>,
}

/// Formats trend data as JSON.
pub fn format_trend_json(data: &TrendData) -> Result<String> {
    let report = JsonTrend {
        nutrient: data.nutrient,
        start: data.range.start(),
        end: data.range.end(),
        days: data
            .days
            .iter()
            .map(|&(date, total)| JsonTrendDay { date, total })
            .collect(),
        average: data.average,
    };

    Ok(serde_json::to_string_pretty(&report)?)
}

/// Runs the trend command.
pub fn run(args: &TrendArgs, config: &Config) -> Result<()> {
    let zone = config.reference_zone()?;
    let entries = util::load_entries(config, zone)?;
    let daily = daily_totals(&entries, zone);

    let Some(range) = util::resolve_range(&args.range, &daily)? else {
        if args.json {
            println!("null");
        } else {
            println!("No entries recorded.");
        }
        return Ok(());
    };

    let data = trend_data(&daily, range, args.nutrient);

    if args.json {
        println!("{}", format_trend_json(&data)?);
    } else {
        print!("{}", format_trend(&data));
    }

    Ok(())
}
