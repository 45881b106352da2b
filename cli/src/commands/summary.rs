use anyhow::Result;
use std::process;

use daytrack_core::tracker::Tracker;

use super::helpers::{parse_date, print_entry_table};

pub(crate) fn cmd_summary(tracker: &Tracker, date: Option<String>, json: bool) -> Result<()> {
    let date = parse_date(date)?;
    let summary = tracker.day_summary(date)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    if summary.food.is_empty() && summary.workouts.is_empty() {
        let date = &summary.date;
        eprintln!("No entries for {date}");
        process::exit(2);
    }

    let date = &summary.date;
    println!("=== {date} ===\n");

    if !summary.food.is_empty() {
        let consumed = summary.consumed;
        println!("  FOOD ({consumed:.0} kcal)");
        print_entry_table(&summary.food);
        println!();
    }
    if !summary.workouts.is_empty() {
        let burned = summary.burned;
        println!("  WORKOUTS ({burned:.0} kcal)");
        print_entry_table(&summary.workouts);
        println!();
    }

    let net = summary.net;
    println!("  NET: {net:.0} kcal");
    if let Some(target) = summary.target {
        let remaining = summary.remaining;
        println!("  TARGET: {target} kcal/day");
        println!("  REMAINING: {remaining:.0} kcal");
    }

    Ok(())
}

pub(crate) fn cmd_stats(tracker: &Tracker, json: bool) -> Result<()> {
    let totals = tracker.lifetime_totals()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&totals)?);
    } else {
        let consumed = totals.consumed;
        let burned = totals.burned;
        let remaining = totals.remaining;
        println!("  Consumed: {consumed:.0} kcal");
        println!("  Burned:   {burned:.0} kcal");
        println!("  Remaining vs daily target: {remaining:.0} kcal");
    }
    Ok(())
}
