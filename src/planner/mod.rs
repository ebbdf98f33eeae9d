pub mod energy;
pub mod selector;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::{MealCatalog, MealItem, Slot};
use crate::error::PlanError;
use crate::profile::Profile;

/// How closely the selected meals approximate the calorie target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accuracy {
    Excellent,
    Good,
    Fair,
}

impl Accuracy {
    pub fn from_difference(difference: u32) -> Accuracy {
        if difference < 50 {
            Accuracy::Excellent
        } else if difference < 100 {
            Accuracy::Good
        } else {
            Accuracy::Fair
        }
    }
}

impl fmt::Display for Accuracy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Accuracy::Excellent => "Excellent",
            Accuracy::Good => "Good",
            Accuracy::Fair => "Fair",
        };
        f.write_str(label)
    }
}

/// A generated daily plan: one catalog item per slot, the summed calories,
/// the target they approximate, and the profile the plan was built for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealPlan {
    pub breakfast: MealItem,
    pub lunch: MealItem,
    pub dinner: MealItem,
    pub snack: MealItem,
    pub total_calories: u32,
    pub calorie_target: u32,
    pub profile: Profile,
}

impl MealPlan {
    pub fn meal(&self, slot: Slot) -> &MealItem {
        match slot {
            Slot::Breakfast => &self.breakfast,
            Slot::Lunch => &self.lunch,
            Slot::Dinner => &self.dinner,
            Slot::Snack => &self.snack,
        }
    }

    /// The four selections in slot order.
    pub fn meals(&self) -> [(Slot, &MealItem); 4] {
        [
            (Slot::Breakfast, &self.breakfast),
            (Slot::Lunch, &self.lunch),
            (Slot::Dinner, &self.dinner),
            (Slot::Snack, &self.snack),
        ]
    }

    pub fn difference(&self) -> u32 {
        self.total_calories.abs_diff(self.calorie_target)
    }

    pub fn accuracy(&self) -> Accuracy {
        Accuracy::from_difference(self.difference())
    }

    /// Structural checks applied when a plan is read back from storage:
    /// every item must sit under the key of its own slot, calories must be
    /// positive, and the stored total must equal the actual sum.
    pub fn validate(&self) -> Result<(), String> {
        let mut sum = 0u32;
        for (slot, item) in self.meals() {
            if item.slot != slot {
                return Err(format!(
                    "item '{}' is tagged '{}' but stored under '{}'",
                    item.id, item.slot, slot
                ));
            }
            if item.calories == 0 {
                return Err(format!("item '{}' has zero calories", item.id));
            }
            sum += item.calories;
        }
        if sum != self.total_calories {
            return Err(format!(
                "stored total {} does not match the item sum {}",
                self.total_calories, sum
            ));
        }
        Ok(())
    }
}

/// Full pipeline: validate the profile, estimate the calorie target, select
/// the meals. Either returns a complete plan or fails without side effects.
pub fn generate_plan(catalog: &MealCatalog, profile: &Profile) -> Result<MealPlan, PlanError> {
    profile.validate()?;
    let calorie_target = energy::estimate_daily_calories(profile);
    let selection = selector::select_plan(
        catalog,
        calorie_target,
        &profile.excluded_allergens,
        &profile.preferred_diet_tags,
    )?;

    Ok(MealPlan {
        breakfast: selection.breakfast,
        lunch: selection.lunch,
        dinner: selection.dinner,
        snack: selection.snack,
        total_calories: selection.total_calories,
        calorie_target,
        profile: profile.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{ActivityLevel, BiologicalSex, Goal};
    use std::collections::BTreeSet;

    fn reference_profile() -> Profile {
        Profile {
            age: 30,
            sex: BiologicalSex::Male,
            weight_kg: 70.0,
            height_cm: 175.0,
            activity_level: ActivityLevel::Moderate,
            goal: Goal::Maintain,
            excluded_allergens: BTreeSet::new(),
            preferred_diet_tags: BTreeSet::new(),
        }
    }

    #[test]
    fn test_accuracy_thresholds() {
        assert_eq!(Accuracy::from_difference(0), Accuracy::Excellent);
        assert_eq!(Accuracy::from_difference(49), Accuracy::Excellent);
        assert_eq!(Accuracy::from_difference(50), Accuracy::Good);
        assert_eq!(Accuracy::from_difference(99), Accuracy::Good);
        assert_eq!(Accuracy::from_difference(100), Accuracy::Fair);
        assert_eq!(Accuracy::from_difference(500), Accuracy::Fair);
    }

    #[test]
    fn test_generate_plan_for_reference_profile() {
        let catalog = MealCatalog::builtin();
        let plan = generate_plan(&catalog, &reference_profile()).unwrap();

        assert_eq!(plan.calorie_target, 2556);
        for (slot, item) in plan.meals() {
            assert_eq!(item.slot, slot);
        }
        assert!(plan.validate().is_ok());
    }

    #[test]
    fn test_generate_plan_rejects_invalid_profile() {
        let catalog = MealCatalog::builtin();
        let mut profile = reference_profile();
        profile.weight_kg = 0.0;
        assert!(generate_plan(&catalog, &profile).is_err());
    }

    #[test]
    fn test_validate_flags_slot_mismatch() {
        let catalog = MealCatalog::builtin();
        let mut plan = generate_plan(&catalog, &reference_profile()).unwrap();
        plan.breakfast.slot = Slot::Lunch;
        assert!(plan.validate().is_err());
    }

    #[test]
    fn test_validate_flags_total_mismatch() {
        let catalog = MealCatalog::builtin();
        let mut plan = generate_plan(&catalog, &reference_profile()).unwrap();
        plan.total_calories += 1;
        assert!(plan.validate().is_err());
    }
}
