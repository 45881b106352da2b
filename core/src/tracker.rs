//! Tracker service: the single mutation entry point per concern.
//!
//! Owns the store and enforces the recompute-after-edit invariant centrally
//! instead of trusting every call site: profile edits recompute derived
//! fields before persisting, entry mutations write their ledger before
//! returning, and KPI aggregates are plain reads rather than save hooks.

use anyhow::{Result, bail};
use chrono::{Local, NaiveDate};
use std::path::Path;

use crate::energy::{compute_stats, remaining};
use crate::models::{
    DaySummary, Entry, EntryKind, LifetimeTotals, Profile, ProfileUpdate, date_key,
};
use crate::scheduler::{Clock, Notifier, WeeklyAdjustment, next_cutover, week_start_key};
use crate::store::Store;

pub struct Tracker {
    store: Store,
}

impl Tracker {
    pub fn open(path: &Path) -> Result<Self> {
        let store = Store::open(path)?;
        Ok(Self { store })
    }

    pub fn open_in_memory() -> Result<Self> {
        let store = Store::open_in_memory()?;
        Ok(Self { store })
    }

    // --- Profile ---

    /// Current profile with derived fields refreshed against its inputs.
    /// Reads never persist; a stale stored snapshot is corrected in memory.
    pub fn profile(&self) -> Result<Profile> {
        let mut profile = self.store.load_profile()?;
        compute_stats(&mut profile, false);
        Ok(profile)
    }

    /// Apply a partial edit, recompute derived fields, persist, and return
    /// the updated profile. Invalid numeric inputs keep the prior values.
    pub fn update_profile(&self, update: &ProfileUpdate) -> Result<Profile> {
        let mut profile = self.store.load_profile()?;
        update.apply(&mut profile);
        compute_stats(&mut profile, true);
        self.store.save_profile(&profile)?;
        Ok(profile)
    }

    // --- Entries ---

    /// Prepend an entry to the date's bucket. The name must be non-empty;
    /// a non-finite calorie value is stored as 0.
    pub fn add_entry(
        &self,
        kind: EntryKind,
        date: NaiveDate,
        name: &str,
        calories: f64,
    ) -> Result<Entry> {
        let name = name.trim();
        if name.is_empty() {
            bail!("Entry name must not be empty");
        }
        let entry = Entry {
            name: name.to_string(),
            calories: if calories.is_finite() { calories } else { 0.0 },
            ts: Local::now().timestamp_millis(),
        };
        let mut ledger = self.store.load_ledger(kind)?;
        ledger.append(&date_key(date), entry.clone());
        self.store.save_ledger(kind, &ledger)?;
        Ok(entry)
    }

    /// Remove the entry at `index` in the date's bucket. Missing date or
    /// out-of-range index is a silent no-op; returns whether a removal
    /// happened.
    pub fn remove_entry(&self, kind: EntryKind, date: NaiveDate, index: usize) -> Result<bool> {
        let mut ledger = self.store.load_ledger(kind)?;
        let removed = ledger.remove(&date_key(date), index);
        if removed {
            self.store.save_ledger(kind, &ledger)?;
        }
        Ok(removed)
    }

    /// Entries for one date, newest first.
    pub fn entries_for(&self, kind: EntryKind, date: NaiveDate) -> Result<Vec<Entry>> {
        let ledger = self.store.load_ledger(kind)?;
        Ok(ledger.entries_for(&date_key(date)).to_vec())
    }

    /// Calorie total for one date and kind.
    pub fn totals_for(&self, kind: EntryKind, date: NaiveDate) -> Result<f64> {
        let ledger = self.store.load_ledger(kind)?;
        Ok(ledger.totals_for(&date_key(date)))
    }

    // --- Aggregates ---

    /// Consumed/burned/net/remaining plus the day's entry lists.
    pub fn day_summary(&self, date: NaiveDate) -> Result<DaySummary> {
        let profile = self.profile()?;
        let food = self.store.load_ledger(EntryKind::Food)?;
        let workouts = self.store.load_ledger(EntryKind::Workout)?;
        let key = date_key(date);
        let consumed = food.totals_for(&key);
        let burned = workouts.totals_for(&key);
        Ok(DaySummary {
            date: key.clone(),
            consumed,
            burned,
            net: consumed - burned,
            target: profile.daily_target,
            remaining: remaining(&profile, consumed, burned),
            food: food.entries_for(&key).to_vec(),
            workouts: workouts.entries_for(&key).to_vec(),
        })
    }

    /// Lifetime KPI tallies across every date bucket.
    pub fn lifetime_totals(&self) -> Result<LifetimeTotals> {
        let profile = self.profile()?;
        let consumed = self.store.load_ledger(EntryKind::Food)?.aggregate_all();
        let burned = self.store.load_ledger(EntryKind::Workout)?.aggregate_all();
        Ok(LifetimeTotals {
            consumed,
            burned,
            remaining: remaining(&profile, consumed, burned),
        })
    }

    // --- Lifecycle ---

    /// Drop everything and write back a freshly computed default profile.
    pub fn reset(&self) -> Result<Profile> {
        self.store.clear()?;
        let mut profile = Profile::default();
        compute_stats(&mut profile, true);
        self.store.save_profile(&profile)?;
        Ok(profile)
    }

    // --- Weekly adjustment ---

    /// Run the weekly adjustment transaction for the week whose cutover is
    /// next from `clock.now()`.
    ///
    /// If the persisted watermark already names that week's Monday the call
    /// is a no-op: no writes, no notification, `Ok(None)`. Otherwise the
    /// daily target is force-recomputed, the profile stamped and persisted,
    /// the watermark advanced, and the notifier told about the new target.
    pub fn try_weekly_adjustment(
        &self,
        clock: &dyn Clock,
        notifier: &dyn Notifier,
    ) -> Result<Option<WeeklyAdjustment>> {
        let now = clock.now();
        let week_start = week_start_key(next_cutover(now));

        let mut meta = self.store.load_meta()?;
        if meta.last_weekly_adjustment_iso.as_deref() == Some(week_start.as_str()) {
            return Ok(None);
        }

        let applied_at = now.format("%Y-%m-%dT%H:%M:%S%.3f").to_string();
        let mut profile = self.store.load_profile()?;
        compute_stats(&mut profile, true);
        profile.last_adjustment_iso = Some(applied_at.clone());
        self.store.save_profile(&profile)?;

        meta.last_weekly_adjustment_iso = Some(week_start.clone());
        self.store.save_meta(&meta)?;

        let daily_target = profile.daily_target.unwrap_or(0);
        notifier.notify(
            "Calorie targets updated",
            &format!(
                "Weekly calorie allocation updated for week starting {week_start}. \
                 Daily target: {daily_target} kcal/day"
            ),
        );

        Ok(Some(WeeklyAdjustment {
            week_start,
            daily_target,
            applied_at,
        }))
    }
}
