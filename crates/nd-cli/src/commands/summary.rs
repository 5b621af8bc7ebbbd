//! Summary command: today's intake cards against the range average.

use std::fmt::Write;

use anyhow::Result;
use chrono::Utc;
use nd_core::{NutrientKey, RangeSummary, daily_totals, range_summary};

use crate::cli::SummaryArgs;
use crate::commands::util;
use crate::config::Config;

/// Nutrients shown on the text cards. JSON output carries every key.
const SUMMARY_KEYS: [NutrientKey; 4] = [
    NutrientKey::Calories,
    NutrientKey::Protein,
    NutrientKey::Carbohydrates,
    NutrientKey::Fat,
];

/// Formats the human-readable summary.
pub fn format_summary(summary: &RangeSummary) -> String {
    let mut output = String::new();

    writeln!(
        output,
        "DAILY NUTRITIONAL SUMMARY: {} to {}",
        summary.range.start(),
        summary.range.end()
    )
    .unwrap();

    // Today card: absent keys read as zero intake, the delta is shown
    // only when the range average has the key too.
    let today_title = format!("TODAY'S INTAKE ({})", summary.today);
    writeln!(output).unwrap();
    writeln!(output, "{today_title}").unwrap();
    writeln!(output, "{}", util::underline(&today_title)).unwrap();
    for key in SUMMARY_KEYS {
        let amount = summary.today_totals.get(key).unwrap_or(0.0);
        let value = util::format_amount(key, amount);
        let mut line = format!("{:<10}{value:>10}", key.label());
        if let Some(delta) = summary.delta.get(key) {
            write!(
                line,
                "  ({delta:+.precision$} vs avg)",
                precision = key.precision()
            )
            .unwrap();
        }
        writeln!(output, "{line}").unwrap();
    }

    // Average card: a key no logged day carries has no meaningful mean.
    let day_word = if summary.days_with_entries == 1 {
        "day"
    } else {
        "days"
    };
    let average_title = format!(
        "AVERAGE DAILY INTAKE ({} {day_word} logged)",
        summary.days_with_entries
    );
    writeln!(output).unwrap();
    writeln!(output, "{average_title}").unwrap();
    writeln!(output, "{}", util::underline(&average_title)).unwrap();
    for key in SUMMARY_KEYS {
        let value = summary.average_totals.get(key).map_or_else(
            || "n/a".to_string(),
            |amount| util::format_amount(key, amount),
        );
        writeln!(
            output,
            "{:<21}{value:>10}",
            format!("Avg. Daily {}", key.label())
        )
        .unwrap();
    }

    output
}

/// Runs the summary command.
pub fn run(args: &SummaryArgs, config: &Config) -> Result<()> {
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

    let today = args
        .date
        .unwrap_or_else(|| Utc::now().with_timezone(&zone).date_naive());
    let summary = range_summary(&daily, range, today);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", format_summary(&summary));
    }

    Ok(())
}
