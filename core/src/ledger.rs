//! Date-keyed entry ledger: append, remove, and aggregate food or workout
//! entries per local calendar day.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::Entry;

/// Ordered map of date-key (`YYYY-MM-DD`) to entries, newest first.
///
/// Ordering within a bucket is insertion order, not timestamp order: a
/// backdated entry still lands at the front. Buckets that become empty are
/// pruned so the persisted record never carries dead keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    buckets: BTreeMap<String, Vec<Entry>>,
}

impl Ledger {
    /// Insert an entry at the front of the date's bucket, creating it if
    /// absent.
    pub fn append(&mut self, date_key: &str, entry: Entry) {
        self.buckets
            .entry(date_key.to_string())
            .or_default()
            .insert(0, entry);
    }

    /// Remove the entry at `index` within the date's bucket. A missing date
    /// or out-of-range index is a silent no-op; returns whether anything was
    /// removed.
    pub fn remove(&mut self, date_key: &str, index: usize) -> bool {
        let Some(bucket) = self.buckets.get_mut(date_key) else {
            return false;
        };
        if index >= bucket.len() {
            return false;
        }
        bucket.remove(index);
        if bucket.is_empty() {
            self.buckets.remove(date_key);
        }
        true
    }

    /// Entries for a date, newest first. Empty slice if the date has none.
    #[must_use]
    pub fn entries_for(&self, date_key: &str) -> &[Entry] {
        self.buckets.get(date_key).map_or(&[], Vec::as_slice)
    }

    /// Sum of calories for one date.
    #[must_use]
    pub fn totals_for(&self, date_key: &str) -> f64 {
        self.entries_for(date_key)
            .iter()
            .map(|e| e.calories)
            .sum()
    }

    /// Sum of calories across every date bucket (lifetime KPI tally).
    #[must_use]
    pub fn aggregate_all(&self) -> f64 {
        self.buckets
            .values()
            .flat_map(|entries| entries.iter())
            .map(|e| e.calories)
            .sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Dates that currently hold entries, ascending.
    pub fn dates(&self) -> impl Iterator<Item = &str> {
        self.buckets.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, calories: f64) -> Entry {
        Entry {
            name: name.to_string(),
            calories,
            ts: 0,
        }
    }

    const DATE: &str = "2024-06-15";

    #[test]
    fn test_append_newest_first() {
        let mut ledger = Ledger::default();
        ledger.append(DATE, entry("Apple", 95.0));
        ledger.append(DATE, entry("Toast", 150.0));

        let names: Vec<&str> = ledger
            .entries_for(DATE)
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, vec!["Toast", "Apple"]);
        assert!((ledger.totals_for(DATE) - 245.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_remove_reverse_order_prunes_bucket() {
        let mut ledger = Ledger::default();
        for i in 0..3 {
            ledger.append(DATE, entry("e", f64::from(i)));
        }
        // Remove in reverse insertion order: the oldest sits at the back.
        assert!(ledger.remove(DATE, 2));
        assert!(ledger.remove(DATE, 1));
        assert!(ledger.remove(DATE, 0));
        assert!(ledger.entries_for(DATE).is_empty());
        assert!((ledger.totals_for(DATE) - 0.0).abs() < f64::EPSILON);
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let mut ledger = Ledger::default();
        ledger.append(DATE, entry("Apple", 95.0));

        assert!(!ledger.remove(DATE, 5));
        assert!(!ledger.remove("2024-01-01", 0));
        assert_eq!(ledger.entries_for(DATE).len(), 1);
    }

    #[test]
    fn test_totals_for_missing_date() {
        let ledger = Ledger::default();
        assert!((ledger.totals_for("2024-01-01") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_aggregate_all_spans_dates() {
        let mut ledger = Ledger::default();
        ledger.append("2024-06-14", entry("Run", 300.0));
        ledger.append("2024-06-15", entry("Swim", 250.0));
        ledger.append("2024-06-15", entry("Walk", 50.0));
        assert!((ledger.aggregate_all() - 600.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_backdated_insert_goes_to_front() {
        let mut ledger = Ledger::default();
        ledger.append(DATE, entry("first", 1.0));
        let mut old = entry("backdated", 2.0);
        old.ts = -1;
        ledger.append(DATE, old);
        assert_eq!(ledger.entries_for(DATE)[0].name, "backdated");
    }

    #[test]
    fn test_serde_shape_is_plain_map() {
        let mut ledger = Ledger::default();
        ledger.append(DATE, entry("Apple", 95.0));
        let json = serde_json::to_value(&ledger).unwrap();
        assert!(json.is_object());
        assert!(json[DATE].is_array());
        assert_eq!(json[DATE][0]["name"], "Apple");
    }
}
