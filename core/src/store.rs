//! Key-value persistence for the four independent state records.
//!
//! Each record (profile, food ledger, workout ledger, meta) is one JSON blob
//! in a SQLite table. Records are independent: a malformed value falls back
//! to that record's default without touching the others and without failing
//! startup.

use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::{Connection, params};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::ledger::Ledger;
use crate::models::{EntryKind, Meta, Profile};

pub const PROFILE_KEY: &str = "dt_profile_v1";
pub const FOOD_KEY: &str = "dt_food_v1";
pub const WORKOUT_KEY: &str = "dt_workout_v1";
pub const META_KEY: &str = "dt_meta_v1";

pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open store: {}", path.display()))?;
        let store = Store { conn };
        store.migrate()?;
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Store { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<()> {
        let version: i64 = self
            .conn
            .pragma_query_value(None, "user_version", |row| row.get(0))?;

        if version < 1 {
            self.conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS records (
                    key TEXT PRIMARY KEY NOT NULL,
                    value TEXT NOT NULL
                );

                PRAGMA user_version = 1;",
            )?;
        }

        Ok(())
    }

    fn get_raw(&self, key: &str) -> Result<Option<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM records WHERE key = ?1")?;
        let mut rows = stmt.query(params![key])?;
        if let Some(row) = rows.next()? {
            Ok(Some(row.get(0)?))
        } else {
            Ok(None)
        }
    }

    fn put_raw(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO records (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    // Missing or unparsable records substitute the default for that record
    // only; I/O failures still propagate.
    fn load_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T> {
        match self.get_raw(key)? {
            Some(raw) => Ok(serde_json::from_str(&raw).unwrap_or_default()),
            None => Ok(T::default()),
        }
    }

    fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)
            .with_context(|| format!("Failed to serialize record '{key}'"))?;
        self.put_raw(key, &raw)
    }

    fn ledger_key(kind: EntryKind) -> &'static str {
        match kind {
            EntryKind::Food => FOOD_KEY,
            EntryKind::Workout => WORKOUT_KEY,
        }
    }

    pub fn load_profile(&self) -> Result<Profile> {
        self.load_or_default(PROFILE_KEY)
    }

    pub fn save_profile(&self, profile: &Profile) -> Result<()> {
        self.save(PROFILE_KEY, profile)
    }

    pub fn load_ledger(&self, kind: EntryKind) -> Result<Ledger> {
        self.load_or_default(Self::ledger_key(kind))
    }

    pub fn save_ledger(&self, kind: EntryKind, ledger: &Ledger) -> Result<()> {
        self.save(Self::ledger_key(kind), ledger)
    }

    pub fn load_meta(&self) -> Result<Meta> {
        self.load_or_default(META_KEY)
    }

    pub fn save_meta(&self, meta: &Meta) -> Result<()> {
        self.save(META_KEY, meta)
    }

    /// Drop every record. Reset-to-defaults is the caller's concern.
    pub fn clear(&self) -> Result<()> {
        self.conn.execute("DELETE FROM records", [])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Entry;

    #[test]
    fn test_missing_records_load_defaults() {
        let store = Store::open_in_memory().unwrap();
        assert_eq!(store.load_profile().unwrap(), Profile::default());
        assert!(store.load_ledger(EntryKind::Food).unwrap().is_empty());
        assert!(store.load_ledger(EntryKind::Workout).unwrap().is_empty());
        assert_eq!(store.load_meta().unwrap(), Meta::default());
    }

    #[test]
    fn test_profile_round_trip() {
        let store = Store::open_in_memory().unwrap();
        let mut profile = Profile::default();
        profile.current_weight = 82.5;
        profile.daily_target = Some(1900);
        store.save_profile(&profile).unwrap();
        assert_eq!(store.load_profile().unwrap(), profile);
    }

    #[test]
    fn test_ledger_round_trip_keeps_order() {
        let store = Store::open_in_memory().unwrap();
        let mut ledger = Ledger::default();
        ledger.append(
            "2024-06-15",
            Entry {
                name: "Apple".to_string(),
                calories: 95.0,
                ts: 1,
            },
        );
        ledger.append(
            "2024-06-15",
            Entry {
                name: "Toast".to_string(),
                calories: 150.0,
                ts: 2,
            },
        );
        store.save_ledger(EntryKind::Food, &ledger).unwrap();
        let loaded = store.load_ledger(EntryKind::Food).unwrap();
        assert_eq!(loaded, ledger);
        assert_eq!(loaded.entries_for("2024-06-15")[0].name, "Toast");
    }

    #[test]
    fn test_malformed_record_is_isolated() {
        let store = Store::open_in_memory().unwrap();
        let mut profile = Profile::default();
        profile.age = 42.0;
        store.save_profile(&profile).unwrap();

        // Corrupt only the food ledger record.
        store.put_raw(FOOD_KEY, "{not json").unwrap();

        assert!(store.load_ledger(EntryKind::Food).unwrap().is_empty());
        assert_eq!(store.load_profile().unwrap(), profile);
    }

    #[test]
    fn test_wrong_shape_record_loads_default() {
        let store = Store::open_in_memory().unwrap();
        store.put_raw(META_KEY, "[1,2,3]").unwrap();
        assert_eq!(store.load_meta().unwrap(), Meta::default());
    }

    #[test]
    fn test_clear_drops_all_records() {
        let store = Store::open_in_memory().unwrap();
        let mut profile = Profile::default();
        profile.age = 50.0;
        store.save_profile(&profile).unwrap();
        let meta = Meta {
            last_weekly_adjustment_iso: Some("2024-06-17".to_string()),
        };
        store.save_meta(&meta).unwrap();

        store.clear().unwrap();
        assert_eq!(store.load_profile().unwrap(), Profile::default());
        assert_eq!(store.load_meta().unwrap(), Meta::default());
    }
}
