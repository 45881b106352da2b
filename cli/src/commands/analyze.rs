use anyhow::{Result, bail};
use chrono::Local;
use serde::Serialize;
use std::path::Path;

use daytrack_core::models::EntryKind;
use daytrack_core::tracker::Tracker;

#[derive(Debug, Clone, Serialize)]
struct AnalyzedItem {
    name: &'static str,
    calories: f64,
}

#[derive(Debug, Serialize)]
struct Analysis {
    message: &'static str,
    items: Vec<AnalyzedItem>,
}

// Stand-in for server-side inference; returns the mock recognition result.
fn analyze_photo(_path: &Path) -> Analysis {
    Analysis {
        message: "Mock analysis: detected 2 items",
        items: vec![
            AnalyzedItem {
                name: "Chicken breast",
                calories: 220.0,
            },
            AnalyzedItem {
                name: "Brown rice",
                calories: 180.0,
            },
        ],
    }
}

pub(crate) fn cmd_analyze(tracker: &Tracker, image: &Path, add: bool, json: bool) -> Result<()> {
    if !image.exists() {
        bail!("Image not found: {}", image.display());
    }

    let analysis = analyze_photo(image);

    if add {
        let today = Local::now().date_naive();
        for item in &analysis.items {
            tracker.add_entry(EntryKind::Food, today, item.name, item.calories)?;
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        println!("{}", analysis.message);
        for item in &analysis.items {
            let name = item.name;
            let cal = item.calories;
            println!("  {name} ({cal:.0} kcal)");
        }
        if add {
            println!("Added to today's food log");
        } else {
            println!("Re-run with --add to log these items");
        }
    }
    Ok(())
}
