use anyhow::Result;

use daytrack_core::models::{Profile, ProfileUpdate, Sex};
use daytrack_core::tracker::Tracker;

#[allow(clippy::too_many_arguments)]
pub(crate) fn cmd_profile_set(
    tracker: &Tracker,
    sex: Option<Sex>,
    age: Option<f64>,
    height: Option<f64>,
    weight: Option<f64>,
    target_weight: Option<f64>,
    activity: Option<f64>,
    deficit: Option<f64>,
    target_bmi: Option<f64>,
    json: bool,
) -> Result<()> {
    let update = ProfileUpdate {
        sex,
        age,
        height,
        current_weight: weight,
        target_weight,
        activity,
        deficit_percent: deficit,
        target_bmi,
    };
    let profile = tracker.update_profile(&update)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&profile)?);
    } else {
        println!("Profile saved and daily target recalculated.");
        print_profile(&profile);
    }
    Ok(())
}

pub(crate) fn cmd_profile_show(tracker: &Tracker, json: bool) -> Result<()> {
    let profile = tracker.profile()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&profile)?);
    } else {
        print_profile(&profile);
    }
    Ok(())
}

fn print_profile(p: &Profile) {
    let sex = match p.sex {
        Sex::Male => "male",
        Sex::Female => "female",
    };
    let age = p.age;
    let height = p.height;
    let weight = p.current_weight;
    let target_weight = p.target_weight;
    let activity = p.activity;
    let deficit = p.deficit_percent;
    println!("  Sex: {sex}   Age: {age:.0}   Height: {height:.0} cm");
    println!("  Weight: {weight:.1} kg (target {target_weight:.1} kg)");
    println!("  Activity: {activity}   Deficit: {deficit:.0}%");

    let bmr = p.bmr.unwrap_or(0);
    let tdee = p.tdee.unwrap_or(0);
    let target = p.daily_target.unwrap_or(0);
    println!("  BMR: {bmr} kcal   TDEE: {tdee} kcal   Daily target: {target} kcal");

    let current_bmi = p.current_bmi.map_or("—".to_string(), |v| format!("{v:.2}"));
    let target_bmi = p.target_bmi.map_or("—".to_string(), |v| format!("{v:.2}"));
    println!("  BMI: {current_bmi} (target {target_bmi})");

    if let Some(last) = &p.last_adjustment_iso {
        println!("  Last weekly adjustment: {last}");
    }
}
