use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::PlanError;
use crate::planner::MealPlan;

/// Default file the most recent plan is kept in.
pub const DEFAULT_STORE_FILE: &str = "meal_plan.json";

/// Durable single-slot storage for the most recently generated plan.
///
/// There is exactly one writer context at a time, so a save unconditionally
/// overwrites the previous plan. Reads validate the stored shape instead of
/// trusting it, since the recipe surface indexes into it by slot and id.
#[derive(Debug, Clone)]
pub struct PlanStore {
    path: PathBuf,
}

impl PlanStore {
    pub fn new(path: impl Into<PathBuf>) -> PlanStore {
        PlanStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serializes the plan over whatever was stored before.
    pub fn save(&self, plan: &MealPlan) -> Result<()> {
        let serialized = serde_json::to_string_pretty(plan)
            .context("Failed to serialize meal plan")?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write meal plan to {:?}", self.path))?;
        Ok(())
    }

    /// Reads the stored plan back. A missing file is `PlanNotFound`;
    /// unreadable, unparsable or structurally invalid content is
    /// `MalformedPlan`.
    pub fn load(&self) -> Result<MealPlan, PlanError> {
        if !self.path.exists() {
            return Err(PlanError::PlanNotFound(self.path.clone()));
        }

        let contents = fs::read_to_string(&self.path)
            .map_err(|e| PlanError::MalformedPlan(format!("could not read {:?}: {}", self.path, e)))?;
        let plan: MealPlan = serde_json::from_str(&contents)
            .map_err(|e| PlanError::MalformedPlan(e.to_string()))?;
        plan.validate().map_err(PlanError::MalformedPlan)?;
        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{MealCatalog, Slot};
    use crate::planner::generate_plan;
    use crate::profile::{ActivityLevel, BiologicalSex, Goal, Profile};
    use std::collections::BTreeSet;
    use tempfile::tempdir;

    fn sample_plan() -> MealPlan {
        let profile = Profile {
            age: 30,
            sex: BiologicalSex::Female,
            weight_kg: 62.0,
            height_cm: 168.0,
            activity_level: ActivityLevel::Light,
            goal: Goal::LoseWeight,
            excluded_allergens: BTreeSet::new(),
            preferred_diet_tags: BTreeSet::new(),
        };
        generate_plan(&MealCatalog::builtin(), &profile).unwrap()
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let store = PlanStore::new(dir.path().join("meal_plan.json"));

        let plan = sample_plan();
        store.save(&plan).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded, plan);
    }

    #[test]
    fn test_save_overwrites_previous_plan() {
        let dir = tempdir().unwrap();
        let store = PlanStore::new(dir.path().join("meal_plan.json"));

        let mut first = sample_plan();
        store.save(&first).unwrap();

        first.calorie_target += 100;
        store.save(&first).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.calorie_target, first.calorie_target);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let store = PlanStore::new(dir.path().join("nothing_here.json"));
        let err = store.load().unwrap_err();
        assert!(matches!(err, PlanError::PlanNotFound(_)));
    }

    #[test]
    fn test_load_rejects_unparsable_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("meal_plan.json");
        fs::write(&path, "{ not json").unwrap();

        let err = PlanStore::new(&path).load().unwrap_err();
        assert!(matches!(err, PlanError::MalformedPlan(_)));
    }

    #[test]
    fn test_load_rejects_slot_mismatch() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("meal_plan.json");

        // A plan whose breakfast key holds a lunch-tagged item must not load.
        let mut plan = sample_plan();
        plan.breakfast.slot = Slot::Lunch;
        fs::write(&path, serde_json::to_string(&plan).unwrap()).unwrap();

        let err = PlanStore::new(&path).load().unwrap_err();
        match err {
            PlanError::MalformedPlan(msg) => assert!(msg.contains("stored under")),
            other => panic!("expected MalformedPlan, got {:?}", other),
        }
    }
}
