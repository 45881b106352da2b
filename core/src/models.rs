use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Biological sex, as used by the Mifflin-St Jeor constant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    #[default]
    Male,
    Female,
}

/// User profile: raw inputs plus the derived metrics of the last recompute.
///
/// Derived fields (`bmr`, `tdee`, `daily_target`, `current_bmi`) are always a
/// pure function of the input fields; every mutation path recomputes them
/// before persisting. Serialized field names are camelCase so the persisted
/// record keeps the original layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    pub sex: Sex,
    pub age: f64,
    pub height: f64,
    pub current_weight: f64,
    pub target_weight: f64,
    pub activity: f64,
    pub deficit_percent: f64,
    #[serde(rename = "targetBMI")]
    pub target_bmi: Option<f64>,
    pub bmr: Option<i64>,
    pub tdee: Option<i64>,
    pub daily_target: Option<i64>,
    #[serde(rename = "currentBMI")]
    pub current_bmi: Option<f64>,
    #[serde(rename = "lastAdjustmentISO")]
    pub last_adjustment_iso: Option<String>,
}

impl Default for Profile {
    fn default() -> Self {
        Profile {
            sex: Sex::Male,
            age: 30.0,
            height: 175.0,
            current_weight: 75.0,
            target_weight: 70.0,
            activity: 1.375,
            deficit_percent: 20.0,
            target_bmi: None,
            bmr: None,
            tdee: None,
            daily_target: None,
            current_bmi: None,
            last_adjustment_iso: None,
        }
    }
}

/// Partial profile edit. `None` leaves the stored value untouched; numeric
/// fields that are zero, negative, or non-finite are also ignored in favor of
/// the prior value (invalid input never rejects the edit).
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub sex: Option<Sex>,
    pub age: Option<f64>,
    pub height: Option<f64>,
    pub current_weight: Option<f64>,
    pub target_weight: Option<f64>,
    pub activity: Option<f64>,
    pub deficit_percent: Option<f64>,
    pub target_bmi: Option<f64>,
}

impl ProfileUpdate {
    pub fn apply(&self, profile: &mut Profile) {
        fn set_positive(slot: &mut f64, value: Option<f64>) {
            if let Some(v) = value {
                if v.is_finite() && v > 0.0 {
                    *slot = v;
                }
            }
        }
        if let Some(sex) = self.sex {
            profile.sex = sex;
        }
        set_positive(&mut profile.age, self.age);
        set_positive(&mut profile.height, self.height);
        set_positive(&mut profile.current_weight, self.current_weight);
        set_positive(&mut profile.target_weight, self.target_weight);
        set_positive(&mut profile.activity, self.activity);
        set_positive(&mut profile.deficit_percent, self.deficit_percent);
        if let Some(v) = self.target_bmi {
            if v.is_finite() && v > 0.0 {
                profile.target_bmi = Some(v);
            }
        }
    }
}

/// Which ledger an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Food,
    Workout,
}

impl EntryKind {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            EntryKind::Food => "food",
            EntryKind::Workout => "workout",
        }
    }
}

/// A single food or workout entry within a date bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub name: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub calories: f64,
    /// Creation timestamp, epoch milliseconds.
    #[serde(default)]
    pub ts: i64,
}

// Older records may carry a string or null where calories should be a number;
// those load as 0 rather than poisoning the whole ledger record.
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_f64().unwrap_or(0.0))
}

/// Scheduling state: the Monday week-start key for which the weekly
/// adjustment has already been applied. The at-most-once watermark.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Meta {
    #[serde(rename = "lastWeeklyAdjustmentISO")]
    pub last_weekly_adjustment_iso: Option<String>,
}

/// One day's totals as consumed by the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct DaySummary {
    pub date: String,
    pub consumed: f64,
    pub burned: f64,
    pub net: f64,
    pub target: Option<i64>,
    pub remaining: f64,
    pub food: Vec<Entry>,
    pub workouts: Vec<Entry>,
}

/// Lifetime KPI tallies across every date bucket.
#[derive(Debug, Clone, Serialize)]
pub struct LifetimeTotals {
    pub consumed: f64,
    pub burned: f64,
    pub remaining: f64,
}

/// Format a local calendar date as a ledger date-key (`YYYY-MM-DD`).
#[must_use]
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile() {
        let p = Profile::default();
        assert_eq!(p.sex, Sex::Male);
        assert!((p.age - 30.0).abs() < f64::EPSILON);
        assert!((p.height - 175.0).abs() < f64::EPSILON);
        assert!((p.current_weight - 75.0).abs() < f64::EPSILON);
        assert!((p.target_weight - 70.0).abs() < f64::EPSILON);
        assert!((p.activity - 1.375).abs() < f64::EPSILON);
        assert!((p.deficit_percent - 20.0).abs() < f64::EPSILON);
        assert!(p.daily_target.is_none());
        assert!(p.last_adjustment_iso.is_none());
    }

    #[test]
    fn test_profile_serializes_camel_case() {
        let json = serde_json::to_value(Profile::default()).unwrap();
        assert_eq!(json["sex"], "male");
        assert!(json.get("currentWeight").is_some());
        assert!(json.get("targetWeight").is_some());
        assert!(json.get("deficitPercent").is_some());
        assert!(json.get("targetBMI").is_some());
        assert!(json.get("currentBMI").is_some());
        assert!(json.get("lastAdjustmentISO").is_some());
    }

    #[test]
    fn test_profile_deserializes_partial_record() {
        // Missing fields fall back to defaults instead of failing the load.
        let p: Profile = serde_json::from_str(r#"{"sex":"female","age":25}"#).unwrap();
        assert_eq!(p.sex, Sex::Female);
        assert!((p.age - 25.0).abs() < f64::EPSILON);
        assert!((p.height - 175.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_update_ignores_non_positive_numbers() {
        let mut p = Profile::default();
        let update = ProfileUpdate {
            age: Some(0.0),
            height: Some(-10.0),
            current_weight: Some(80.0),
            activity: Some(f64::NAN),
            ..ProfileUpdate::default()
        };
        update.apply(&mut p);
        assert!((p.age - 30.0).abs() < f64::EPSILON);
        assert!((p.height - 175.0).abs() < f64::EPSILON);
        assert!((p.current_weight - 80.0).abs() < f64::EPSILON);
        assert!((p.activity - 1.375).abs() < f64::EPSILON);
    }

    #[test]
    fn test_entry_lenient_calories() {
        let e: Entry = serde_json::from_str(r#"{"name":"Apple","calories":"oops"}"#).unwrap();
        assert!((e.calories - 0.0).abs() < f64::EPSILON);
        assert_eq!(e.ts, 0);

        let e: Entry = serde_json::from_str(r#"{"name":"Apple","calories":95,"ts":1}"#).unwrap();
        assert!((e.calories - 95.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_meta_field_name() {
        let meta = Meta {
            last_weekly_adjustment_iso: Some("2024-06-17".to_string()),
        };
        let json = serde_json::to_string(&meta).unwrap();
        assert!(json.contains("lastWeeklyAdjustmentISO"));
    }

    #[test]
    fn test_date_key_format() {
        let d = NaiveDate::from_ymd_opt(2024, 6, 5).unwrap();
        assert_eq!(date_key(d), "2024-06-05");
    }
}
