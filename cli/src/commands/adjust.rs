use anyhow::Result;

use daytrack_core::scheduler::{Clock, SystemClock, next_cutover};
use daytrack_core::tracker::Tracker;

use crate::notify::TerminalNotifier;

/// Run the weekly adjustment once, applying it only if this week's watermark
/// is not yet set. This is also the manual catch-up path after downtime.
pub(crate) fn cmd_adjust(tracker: &Tracker, json: bool) -> Result<()> {
    let clock = SystemClock;
    let notifier = TerminalNotifier;

    match tracker.try_weekly_adjustment(&clock, &notifier)? {
        Some(adjustment) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&adjustment)?);
            } else {
                let week = &adjustment.week_start;
                let target = adjustment.daily_target;
                println!("Weekly adjustment applied for week starting {week}: {target} kcal/day");
            }
        }
        None => {
            if json {
                println!("{}", serde_json::json!({ "applied": false }));
            } else {
                println!("Weekly adjustment already applied for this week");
            }
        }
    }
    Ok(())
}

/// Long-running scheduler loop: sleep until the next Sunday 23:00 cutover,
/// fire the adjustment, repeat. The deadline is re-derived from wall-clock
/// time on every wake, so a suspended or restarted process lands on the
/// correct cutover rather than trusting an in-memory countdown.
pub(crate) async fn cmd_watch(tracker: &Tracker) -> Result<()> {
    let clock = SystemClock;
    let notifier = TerminalNotifier;

    loop {
        let now = clock.now();
        let cutover = next_cutover(now);
        let wait = (cutover - now).num_milliseconds().max(0);
        if wait > 0 {
            eprintln!("Next weekly adjustment at {cutover}");
            tokio::time::sleep(std::time::Duration::from_millis(wait as u64)).await;
        }

        if let Some(adjustment) = tracker.try_weekly_adjustment(&clock, &notifier)? {
            let week = &adjustment.week_start;
            eprintln!("Applied weekly adjustment for week starting {week}");
        }

        // Step past the cutover instant so the next computed deadline is a
        // week out instead of re-hitting the same one.
        tokio::time::sleep(std::time::Duration::from_secs(1)).await;
    }
}
