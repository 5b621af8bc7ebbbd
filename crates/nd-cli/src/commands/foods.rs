//! Foods command: top food items by nutrient contribution.

use std::fmt::Write;

use anyhow::Result;
use chrono::NaiveDate;
use nd_core::{DateRange, FoodTotal, NutrientKey, daily_totals, rank_foods};
use serde::Serialize;

use crate::cli::FoodsArgs;
use crate::commands::util;
use crate::config::Config;

/// Minimum width of the item name column.
const MIN_NAME_WIDTH: usize = 12;

/// Computed ranking data.
#[derive(Debug)]
pub struct FoodsData {
    pub nutrient: NutrientKey,
    pub range: DateRange,
    pub limit: usize,
    pub items: Vec<FoodTotal>,
}

/// Formats the human-readable ranking. Bars scale to the top item.
pub fn format_foods(data: &FoodsData) -> String {
    let mut output = String::new();

    let title = format!(
        "Top {} Food Items by {}",
        data.limit,
        data.nutrient.column_label()
    );
    writeln!(output, "{title}").unwrap();
    writeln!(output, "{}", util::underline(&title)).unwrap();

    if data.items.is_empty() {
        writeln!(output, "(no food items)").unwrap();
        return output;
    }

    let width = data
        .items
        .iter()
        .map(|item| item.item_name.chars().count())
        .max()
        .unwrap_or(0)
        .max(MIN_NAME_WIDTH);
    let max = data.items.first().map_or(0.0, |item| item.total);

    for item in &data.items {
        let bar = util::intake_bar(item.total, max);
        let amount = util::format_amount(data.nutrient, item.total);
        writeln!(output, "{:<width$}  {bar}  {amount:>10}", item.item_name).unwrap();
    }

    output
}

/// JSON ranking structure.
#[derive(Debug, Serialize)]
pub struct JsonFoods {
    pub nutrient: NutrientKey,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub items: Vec<FoodTotal>,
}

/// Formats ranking data as JSON.
pub fn format_foods_json(data: &FoodsData) -> Result<String> {
    let report = JsonFoods {
        nutrient: data.nutrient,
        start: data.range.start(),
        end: data.range.end(),
        items: data.items.clone(),
    };

    Ok(serde_json::to_string_pretty(&report)?)
}

/// Runs the foods command.
pub fn run(args: &FoodsArgs, config: &Config) -> Result<()> {
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

    let items = rank_foods(&entries, args.nutrient, range, zone, args.limit);
    let data = FoodsData {
        nutrient: args.nutrient,
        range,
        limit: args.limit,
        items,
    };

    if args.json {
        println!("{}", format_foods_json(&data)?);
    } else {
        print!("{}", format_foods(&data));
    }

    Ok(())
}
