use crate::profile::{BiologicalSex, Profile};

/// Basal metabolic rate in kcal/day, Mifflin-St Jeor form. The female
/// constant is also used for `Other`, matching the reference behavior.
pub fn basal_metabolic_rate(profile: &Profile) -> f64 {
    let base = 10.0 * profile.weight_kg + 6.25 * profile.height_cm - 5.0 * profile.age as f64;
    match profile.sex {
        BiologicalSex::Male => base + 5.0,
        BiologicalSex::Female | BiologicalSex::Other => base - 161.0,
    }
}

/// Daily calorie target for a profile: BMR scaled by the activity
/// multiplier, rounded, then adjusted for the goal and rounded again.
///
/// Pure and infallible for validated profiles; the parse boundary rejects
/// unknown activity levels and goals, so every case here is exhaustive.
pub fn estimate_daily_calories(profile: &Profile) -> u32 {
    let bmr = basal_metabolic_rate(profile);
    let tdee = (bmr * profile.activity_level.multiplier()).round();
    (tdee * profile.goal.calorie_factor()).round() as u32
}
