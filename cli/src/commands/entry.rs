use anyhow::Result;
use std::process;

use daytrack_core::models::EntryKind;
use daytrack_core::tracker::Tracker;

use super::helpers::{parse_date, print_entry_table};

pub(crate) fn cmd_entry_add(
    tracker: &Tracker,
    kind: EntryKind,
    name: &str,
    calories: f64,
    date: Option<String>,
    json: bool,
) -> Result<()> {
    let date = parse_date(date)?;
    let entry = tracker.add_entry(kind, date, name, calories)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entry)?);
    } else {
        let label = kind.label();
        let name = &entry.name;
        let cal = entry.calories;
        println!("Logged {label} '{name}' ({cal:.0} kcal) for {date}");
    }
    Ok(())
}

pub(crate) fn cmd_entry_delete(
    tracker: &Tracker,
    kind: EntryKind,
    index: usize,
    date: Option<String>,
    json: bool,
) -> Result<()> {
    let date = parse_date(date)?;
    let removed = tracker.remove_entry(kind, date, index)?;

    if json {
        println!("{}", serde_json::json!({ "removed": removed }));
    } else if removed {
        println!("Entry removed");
    } else {
        // Bad index or empty day is a no-op, not an error.
        eprintln!("Nothing to remove at index {index} for {date}");
    }
    Ok(())
}

pub(crate) fn cmd_entry_list(
    tracker: &Tracker,
    kind: EntryKind,
    date: Option<String>,
    json: bool,
) -> Result<()> {
    let date = parse_date(date)?;
    let entries = tracker.entries_for(kind, date)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        let label = kind.label();
        eprintln!("No {label} entries for {date}");
        process::exit(2);
    }

    let total = tracker.totals_for(kind, date)?;
    print_entry_table(&entries);
    println!("  Total: {total:.0} kcal");
    Ok(())
}
