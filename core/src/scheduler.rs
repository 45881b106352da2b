//! Weekly adjustment scheduling: cutover math plus the collaborator seams
//! (clock, notifier) the adjustment runs against.
//!
//! The cutover instant is the next local Sunday at 23:00. The adjustment for
//! a week is keyed by the Monday immediately following that Sunday; the key
//! is persisted as a watermark so the adjustment applies at most once per
//! week no matter how often the process restarts or re-enters the fire
//! routine. The recurring sleep loop itself lives in the presentation layer
//! and re-derives its deadline from wall-clock time on every wake.

use chrono::{Datelike, Duration, Local, NaiveDateTime};
use serde::Serialize;

use crate::models::date_key;

/// Local hour of the Sunday cutover.
pub const CUTOVER_HOUR: u32 = 23;

/// Wall-clock source, injectable for scheduler tests.
pub trait Clock {
    /// Current local wall-clock time.
    fn now(&self) -> NaiveDateTime;
}

/// The process-local clock.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Delivers a title/body message to the user. Must not fail the caller; an
/// implementation falls back to an in-process display channel when the
/// OS-level one is unavailable.
pub trait Notifier {
    fn notify(&self, title: &str, body: &str);
}

/// The next occurrence of Sunday 23:00 local time, seen from `now`.
///
/// Takes today-at-23:00 and adds `(7 - weekday_from_sunday) % 7` days; when
/// that lands on today but the hour already passed, the cutover moves a full
/// week out.
#[must_use]
pub fn next_cutover(now: NaiveDateTime) -> NaiveDateTime {
    let today_at_cutover = now
        .date()
        .and_hms_opt(CUTOVER_HOUR, 0, 0)
        .expect("cutover hour is a valid time of day");
    let weekday = i64::from(now.date().weekday().num_days_from_sunday());
    let mut delta = (7 - weekday) % 7;
    if delta == 0 && now > today_at_cutover {
        delta = 7;
    }
    today_at_cutover + Duration::days(delta)
}

/// Date-key of the Monday immediately following the cutover Sunday; the
/// watermark value for that week's adjustment.
#[must_use]
pub fn week_start_key(cutover: NaiveDateTime) -> String {
    date_key(cutover.date() + Duration::days(1))
}

/// A weekly adjustment that was actually applied.
#[derive(Debug, Clone, Serialize)]
pub struct WeeklyAdjustment {
    /// Monday date-key the adjustment covers.
    pub week_start: String,
    /// The recomputed daily calorie target.
    pub daily_target: i64,
    /// Local timestamp the adjustment ran at.
    pub applied_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    // 2024-06-16 is a Sunday.

    #[test]
    fn test_cutover_midweek() {
        // Wednesday -> the coming Sunday.
        let cutover = next_cutover(at(2024, 6, 12, 10, 0));
        assert_eq!(cutover, at(2024, 6, 16, 23, 0));
    }

    #[test]
    fn test_cutover_sunday_before_hour() {
        let cutover = next_cutover(at(2024, 6, 16, 12, 0));
        assert_eq!(cutover, at(2024, 6, 16, 23, 0));
    }

    #[test]
    fn test_cutover_sunday_after_hour_rolls_a_week() {
        let cutover = next_cutover(at(2024, 6, 16, 23, 30));
        assert_eq!(cutover, at(2024, 6, 23, 23, 0));
    }

    #[test]
    fn test_cutover_exactly_at_hour_is_now() {
        let now = at(2024, 6, 16, 23, 0);
        assert_eq!(next_cutover(now), now);
    }

    #[test]
    fn test_cutover_monday_is_six_days_out() {
        let cutover = next_cutover(at(2024, 6, 10, 8, 0));
        assert_eq!(cutover, at(2024, 6, 16, 23, 0));
    }

    #[test]
    fn test_week_start_key_is_following_monday() {
        let cutover = at(2024, 6, 16, 23, 0);
        assert_eq!(week_start_key(cutover), "2024-06-17");
    }

    #[test]
    fn test_week_start_key_crosses_month_boundary() {
        // 2024-06-30 is a Sunday; the following Monday is July 1st.
        let cutover = next_cutover(at(2024, 6, 28, 9, 0));
        assert_eq!(week_start_key(cutover), "2024-07-01");
    }
}
