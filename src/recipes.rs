use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::planner::MealPlan;

/// Richer recipe content for one catalog item. Consumed only by the
/// presentation side; selection never looks at it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeDetail {
    pub id: String,
    pub name: String,
    pub prep_time: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
}

/// Read-only recipe collection keyed by meal id.
#[derive(Debug, Clone)]
pub struct RecipeBook {
    recipes: BTreeMap<String, RecipeDetail>,
}

const BUILTIN_RECIPES_JSON: &str = include_str!("../data/recipes.json");

impl RecipeBook {
    fn from_details(details: Vec<RecipeDetail>) -> RecipeBook {
        let recipes = details
            .into_iter()
            .map(|detail| (detail.id.clone(), detail))
            .collect();
        RecipeBook { recipes }
    }

    /// Recipe details shipped with the crate, covering the builtin catalog.
    pub fn builtin() -> Result<RecipeBook> {
        let details: Vec<RecipeDetail> = serde_json::from_str(BUILTIN_RECIPES_JSON)
            .context("Failed to parse embedded recipe data")?;
        Ok(RecipeBook::from_details(details))
    }

    pub fn load_from_json(path: &Path) -> Result<RecipeBook> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read recipe file at {:?}", path))?;
        let details: Vec<RecipeDetail> = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse recipe file at {:?}", path))?;
        Ok(RecipeBook::from_details(details))
    }

    pub fn get(&self, id: &str) -> Option<&RecipeDetail> {
        self.recipes.get(id)
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

/// Collects the ingredients of the plan's four meals into one list,
/// de-duplicated in first-seen order. Meals without a recipe entry simply
/// contribute nothing.
pub fn shopping_list(plan: &MealPlan, book: &RecipeBook) -> Vec<String> {
    let mut seen = std::collections::BTreeSet::new();
    let mut list = Vec::new();
    for (_, item) in plan.meals() {
        if let Some(detail) = book.get(&item.id) {
            for ingredient in &detail.ingredients {
                if seen.insert(ingredient.clone()) {
                    list.push(ingredient.clone());
                }
            }
        }
    }
    list
}
