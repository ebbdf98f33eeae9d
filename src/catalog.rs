use anyhow::{Context, Result};
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::PlanError;
use crate::profile::{AllergenTag, DietTag};

/// The four meal slots of a daily plan, in presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl Slot {
    pub const ALL: [Slot; 4] = [Slot::Breakfast, Slot::Lunch, Slot::Dinner, Slot::Snack];

    pub fn as_str(&self) -> &'static str {
        match self {
            Slot::Breakfast => "breakfast",
            Slot::Lunch => "lunch",
            Slot::Dinner => "dinner",
            Slot::Snack => "snack",
        }
    }

    /// Fraction of the daily calorie target conventionally allocated to this
    /// slot, used by the greedy selection strategy.
    pub fn calorie_share(&self) -> f64 {
        match self {
            Slot::Breakfast => 0.25,
            Slot::Lunch => 0.35,
            Slot::Dinner => 0.30,
            Slot::Snack => 0.10,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Slot {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "breakfast" => Ok(Slot::Breakfast),
            "lunch" => Ok(Slot::Lunch),
            "dinner" => Ok(Slot::Dinner),
            "snack" => Ok(Slot::Snack),
            other => Err(PlanError::UnrecognizedTag {
                kind: "meal slot",
                value: other.to_string(),
            }),
        }
    }
}

/// One candidate meal from the catalog. The macro fields are display-only
/// strings ("15g"); only `calories` takes part in selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealItem {
    pub id: String,
    pub slot: Slot,
    pub name: String,
    pub calories: u32,
    pub protein: String,
    pub carbs: String,
    pub fat: String,
    pub allergens: BTreeSet<AllergenTag>,
    pub diet_tags: BTreeSet<DietTag>,
}

/// Read-only catalog of candidate meals, partitioned by slot. Never mutated
/// at runtime.
#[derive(Debug, Clone, Default)]
pub struct MealCatalog {
    breakfast: Vec<MealItem>,
    lunch: Vec<MealItem>,
    dinner: Vec<MealItem>,
    snack: Vec<MealItem>,
}

impl MealCatalog {
    pub fn slot_items(&self, slot: Slot) -> &[MealItem] {
        match slot {
            Slot::Breakfast => &self.breakfast,
            Slot::Lunch => &self.lunch,
            Slot::Dinner => &self.dinner,
            Slot::Snack => &self.snack,
        }
    }

    fn push(&mut self, item: MealItem) {
        match item.slot {
            Slot::Breakfast => self.breakfast.push(item),
            Slot::Lunch => self.lunch.push(item),
            Slot::Dinner => self.dinner.push(item),
            Slot::Snack => self.snack.push(item),
        }
    }

    /// Builds a catalog from a flat item list, routing each item to the slot
    /// it is tagged with.
    pub fn from_items(items: impl IntoIterator<Item = MealItem>) -> MealCatalog {
        let mut catalog = MealCatalog::default();
        for item in items {
            catalog.push(item);
        }
        catalog
    }

    /// The built-in catalog: five fixed items per slot.
    pub fn builtin() -> MealCatalog {
        use AllergenTag::*;
        use DietTag::*;

        let items = [
            item("greek-yogurt", Slot::Breakfast, "Greek Yogurt with Berries and Honey", 350, "15g", "45g", "10g", &[Dairy], &[Vegetarian]),
            item("avocado-toast", Slot::Breakfast, "Avocado Toast with Eggs", 400, "18g", "30g", "22g", &[Eggs, Gluten], &[Vegetarian]),
            item("oatmeal", Slot::Breakfast, "Oatmeal with Nuts and Fruit", 320, "10g", "50g", "8g", &[Nuts, Gluten], &[Vegan, Vegetarian]),
            item("smoothie-bowl", Slot::Breakfast, "Protein Smoothie Bowl", 380, "25g", "40g", "12g", &[Dairy], &[Vegetarian]),
            item("tofu-scramble", Slot::Breakfast, "Tofu Scramble with Vegetables", 300, "20g", "15g", "18g", &[Soy], &[Vegan, Vegetarian]),
            item("chicken-salad", Slot::Lunch, "Grilled Chicken Salad with Quinoa", 450, "35g", "30g", "15g", &[], &[Chicken]),
            item("tuna-wrap", Slot::Lunch, "Tuna and Avocado Wrap", 420, "28g", "35g", "18g", &[Gluten, Shellfish], &[Fish]),
            item("lentil-soup", Slot::Lunch, "Lentil Soup with Whole Grain Bread", 380, "18g", "60g", "6g", &[Gluten], &[Vegan, Vegetarian, Mediterranean]),
            item("beef-bowl", Slot::Lunch, "Beef and Vegetable Rice Bowl", 520, "30g", "55g", "20g", &[], &[Beef]),
            item("mediterranean-bowl", Slot::Lunch, "Mediterranean Chickpea Bowl", 400, "15g", "50g", "16g", &[], &[Vegan, Vegetarian, Mediterranean]),
            item("salmon", Slot::Dinner, "Baked Salmon with Sweet Potatoes and Broccoli", 520, "40g", "35g", "20g", &[], &[Fish, Mediterranean]),
            item("chicken-stir-fry", Slot::Dinner, "Chicken and Vegetable Stir Fry", 480, "35g", "40g", "15g", &[Soy], &[Chicken]),
            item("beef-steak", Slot::Dinner, "Grass-fed Beef Steak with Roasted Vegetables", 550, "45g", "25g", "25g", &[], &[Beef]),
            item("vegetable-curry", Slot::Dinner, "Vegetable Curry with Brown Rice", 420, "12g", "65g", "14g", &[Dairy], &[Vegan, Vegetarian]),
            item("mediterranean-fish", Slot::Dinner, "Mediterranean Fish with Olives and Tomatoes", 450, "35g", "20g", "25g", &[], &[Fish, Mediterranean]),
            item("apple-almond", Slot::Snack, "Apple with Almond Butter", 200, "5g", "25g", "10g", &[Nuts], &[Vegan, Vegetarian]),
            item("greek-yogurt-snack", Slot::Snack, "Greek Yogurt with Honey", 150, "12g", "15g", "5g", &[Dairy], &[Vegetarian]),
            item("hummus-veggies", Slot::Snack, "Hummus with Vegetable Sticks", 180, "6g", "20g", "8g", &[], &[Vegan, Vegetarian, Mediterranean]),
            item("protein-bar", Slot::Snack, "Homemade Protein Bar", 220, "15g", "22g", "8g", &[Nuts, Dairy], &[Vegetarian]),
            item("mixed-nuts", Slot::Snack, "Mixed Nuts and Dried Fruit", 210, "6g", "15g", "15g", &[Nuts], &[Vegan, Vegetarian, Mediterranean]),
        ];
        MealCatalog::from_items(items)
    }
}

fn item(
    id: &str,
    slot: Slot,
    name: &str,
    calories: u32,
    protein: &str,
    carbs: &str,
    fat: &str,
    allergens: &[AllergenTag],
    diet_tags: &[DietTag],
) -> MealItem {
    MealItem {
        id: id.to_string(),
        slot,
        name: name.to_string(),
        calories,
        protein: protein.to_string(),
        carbs: carbs.to_string(),
        fat: fat.to_string(),
        allergens: allergens.iter().copied().collect(),
        diet_tags: diet_tags.iter().copied().collect(),
    }
}

// Expected column headers for a user-supplied catalog CSV.
const ID_COL: &str = "id";
const SLOT_COL: &str = "slot";
const NAME_COL: &str = "name";
const CALORIES_COL: &str = "calories";
const PROTEIN_COL: &str = "protein";
const CARBS_COL: &str = "carbs";
const FAT_COL: &str = "fat";
const ALLERGENS_COL: &str = "allergens";
const DIET_TAGS_COL: &str = "diet_tags";

fn parse_tag_set<T>(raw: &str) -> Result<BTreeSet<T>>
where
    T: FromStr<Err = PlanError> + Ord,
{
    // Tag columns hold pipe-separated lists; an empty column is an empty set.
    raw.split('|')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<T>().map_err(anyhow::Error::from))
        .collect()
}

pub fn load_catalog_from_csv(csv_path: &Path) -> Result<MealCatalog> {
    if !csv_path.exists() {
        return Err(anyhow::anyhow!("Catalog CSV file not found at: {:?}", csv_path));
    }

    let file = std::fs::File::open(csv_path)
        .with_context(|| format!("Failed to open catalog CSV file at {:?}", csv_path))?;
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(file);

    let headers = rdr.headers()?.clone();
    let col = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| anyhow::anyhow!("Column '{}' not found", name))
    };

    let id_idx = col(ID_COL)?;
    let slot_idx = col(SLOT_COL)?;
    let name_idx = col(NAME_COL)?;
    let calories_idx = col(CALORIES_COL)?;
    let protein_idx = col(PROTEIN_COL)?;
    let carbs_idx = col(CARBS_COL)?;
    let fat_idx = col(FAT_COL)?;
    let allergens_idx = col(ALLERGENS_COL)?;
    let diet_tags_idx = col(DIET_TAGS_COL)?;

    let mut catalog = MealCatalog::default();
    let mut loaded = 0usize;
    for (row_index, result) in rdr.records().enumerate() {
        let record =
            result.with_context(|| format!("Failed to read record at row index {}", row_index))?;
        let field = |idx: usize| record.get(idx).unwrap_or("").trim();

        let id = field(id_idx).to_string();
        if id.is_empty() {
            // Rows without an id cannot be referenced by the recipe book.
            continue;
        }

        let slot: Slot = field(slot_idx)
            .parse()
            .with_context(|| format!("Invalid slot for item '{}' at row {}", id, row_index))?;
        let calories: u32 = field(calories_idx)
            .parse()
            .with_context(|| format!("Invalid calories for item '{}' at row {}", id, row_index))?;
        let allergens = parse_tag_set::<AllergenTag>(field(allergens_idx))
            .with_context(|| format!("Invalid allergen tag for item '{}' at row {}", id, row_index))?;
        let diet_tags = parse_tag_set::<DietTag>(field(diet_tags_idx))
            .with_context(|| format!("Invalid diet tag for item '{}' at row {}", id, row_index))?;

        catalog.push(MealItem {
            id,
            slot,
            name: field(name_idx).to_string(),
            calories,
            protein: field(protein_idx).to_string(),
            carbs: field(carbs_idx).to_string(),
            fat: field(fat_idx).to_string(),
            allergens,
            diet_tags,
        });
        loaded += 1;
    }

    if loaded == 0 {
        return Err(anyhow::anyhow!("No valid catalog data loaded from {:?}", csv_path));
    }

    Ok(catalog)
}
