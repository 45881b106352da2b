//! Energy model: BMR, TDEE, daily target, and BMI derivation.
//!
//! All functions are pure over the profile snapshot and never fail; missing
//! or unset numeric inputs contribute 0 (or the documented default) instead
//! of erroring.

use crate::models::{Profile, Sex};

/// Activity multiplier used when the profile has none set.
pub const DEFAULT_ACTIVITY: f64 = 1.2;

/// Recompute every derived field on the profile from its current inputs.
///
/// BMR uses Mifflin-St Jeor: `10*kg + 6.25*cm - 5*years + s`, with
/// `s = -161` for female and `+5` for male, rounded to the nearest integer.
/// TDEE is `round(bmr * activity)` and the daily target
/// `round(tdee * (1 - deficit/100))`.
///
/// The force flag distinguishes explicit saves from field-level live edits
/// at call sites; the daily target is refreshed unconditionally either way
/// so it always reflects current inputs.
///
/// Target BMI is overwritten from `target_weight` whenever both it and
/// `height` are positive; a user-supplied target BMI does not survive once
/// both inputs exist. Deliberate policy, kept from the observed behavior.
pub fn compute_stats(profile: &mut Profile, _force_daily_target_recalc: bool) {
    let weight = profile.current_weight;
    let height = profile.height;
    let age = profile.age;
    let s = match profile.sex {
        Sex::Female => -161.0,
        Sex::Male => 5.0,
    };

    let bmr = (10.0 * weight + 6.25 * height - 5.0 * age + s).round() as i64;
    let activity = if profile.activity > 0.0 {
        profile.activity
    } else {
        DEFAULT_ACTIVITY
    };
    let tdee = (bmr as f64 * activity).round() as i64;
    let deficit = profile.deficit_percent / 100.0;
    let daily_target = (tdee as f64 * (1.0 - deficit)).round() as i64;

    profile.bmr = Some(bmr);
    profile.tdee = Some(tdee);
    profile.daily_target = Some(daily_target);

    let h_m = height / 100.0;
    profile.current_bmi = (h_m > 0.0).then(|| round2(weight / (h_m * h_m)));
    if profile.target_weight > 0.0 && h_m > 0.0 {
        profile.target_bmi = Some(round2(profile.target_weight / (h_m * h_m)));
    }
}

/// Calories left for the day: `daily_target - consumed + burned`.
/// An unset target counts as 0, matching the pre-first-recompute state.
#[must_use]
pub fn remaining(profile: &Profile, consumed: f64, burned: f64) -> f64 {
    profile.daily_target.unwrap_or(0) as f64 - consumed + burned
}

/// Round to two decimals.
#[must_use]
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
