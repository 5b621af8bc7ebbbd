//! Macros command: the protein/carbs/fat energy split.

use std::fmt::Write;

use anyhow::Result;
use chrono::NaiveDate;
use nd_core::{
    AggregateError, DailyTotals, DateRange, MacroProportions, NutrientKey, daily_totals,
    macro_proportions, range_totals,
};
use serde::Serialize;

use crate::cli::MacrosArgs;
use crate::commands::util;
use crate::config::Config;

/// Computed split data.
#[derive(Debug)]
pub struct MacrosData {
    pub range: DateRange,
    /// Calorie total over the range, when any day recorded one.
    pub calories: Option<f64>,
    /// The split, or why it is undefined for this range.
    pub proportions: Result<MacroProportions, AggregateError>,
}

/// Computes the macro split over the summed range totals.
pub fn macros_data(daily: &DailyTotals, range: DateRange) -> MacrosData {
    let totals = range_totals(daily, range);
    MacrosData {
        range,
        calories: totals.get(NutrientKey::Calories),
        proportions: macro_proportions(&totals),
    }
}

/// Formats the human-readable split.
pub fn format_macros(data: &MacrosData) -> String {
    let mut output = String::new();

    let title = format!(
        "MACRONUTRIENT SPLIT: {} to {}",
        data.range.start(),
        data.range.end()
    );
    writeln!(output, "{title}").unwrap();
    writeln!(output, "{}", util::underline(&title)).unwrap();

    match &data.proportions {
        Ok(split) => {
            let rows = [
                (NutrientKey::Protein.label(), split.protein_pct),
                (NutrientKey::Carbohydrates.label(), split.carbohydrates_pct),
                (NutrientKey::Fat.label(), split.fat_pct),
            ];
            for (label, pct) in rows {
                let bar = util::intake_bar(pct, 100.0);
                writeln!(output, "{label:<10}{bar}{:>8}", format!("{pct:.1}%")).unwrap();
            }

            writeln!(output).unwrap();
            let total = data.calories.unwrap_or(0.0);
            writeln!(
                output,
                "Total energy: {}",
                util::format_amount(NutrientKey::Calories, total)
            )
            .unwrap();
        }
        Err(err) => {
            writeln!(output, "{err}").unwrap();
        }
    }

    output
}

/// JSON split structure.
#[derive(Debug, Serialize)]
pub struct JsonMacros {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub calories: Option<f64>,
    pub proportions: Option<MacroProportions>,
}

/// Formats split data as JSON. An undefined split serializes as null
/// proportions rather than an error.
pub fn format_macros_json(data: &MacrosData) -> Result<String> {
    let report = JsonMacros {
        start: data.range.start(),
        end: data.range.end(),
        calories: data.calories,
        proportions: data.proportions.as_ref().ok().copied(),
    };

    Ok(serde_json::to_string_pretty(&report)?)
}

/// Runs the macros command.
pub fn run(args: &MacrosArgs, config: &Config) -> Result<()> {
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

    let data = macros_data(&daily, range);

    if args.json {
        println!("{}", format_macros_json(&data)?);
    } else {
        print!("{}", format_macros(&data));
    }

    Ok(())
}
