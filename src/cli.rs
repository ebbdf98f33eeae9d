use clap::{Args, Parser, Subcommand};

use crate::plan_store::DEFAULT_STORE_FILE;
use crate::profile::{ActivityLevel, AllergenTag, BiologicalSex, DietTag, Goal, Profile};
use crate::testimonials::DEFAULT_TESTIMONIALS_FILE;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the stored meal plan file
    #[arg(long, default_value = DEFAULT_STORE_FILE)]
    pub store_file: String,

    /// CSV file overriding the built-in meal catalog
    #[arg(long)]
    pub catalog_file: Option<String>,

    /// JSON file overriding the built-in recipe details
    #[arg(long)]
    pub recipes_file: Option<String>,

    /// Path to the testimonial board file
    #[arg(long, default_value = DEFAULT_TESTIMONIALS_FILE)]
    pub testimonials_file: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a meal plan from a profile and store it
    Plan(PlanArgs),
    /// Show recipe details for the stored meal plan
    Recipes,
    /// Show the aggregated shopping list for the stored meal plan
    ShoppingList,
    /// Submit a review to the testimonial board
    Review(ReviewArgs),
}

#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Age in years
    #[arg(long)]
    pub age: u32,

    /// Biological sex: male, female or other
    #[arg(long)]
    pub sex: BiologicalSex,

    /// Body weight in kilograms
    #[arg(long)]
    pub weight_kg: f64,

    /// Height in centimeters
    #[arg(long)]
    pub height_cm: f64,

    /// Activity level: sedentary, light, moderate, active or very-active
    #[arg(long)]
    pub activity_level: ActivityLevel,

    /// Goal: lose-weight, gain-weight or maintain
    #[arg(long)]
    pub goal: Goal,

    /// Allergen to exclude (repeatable)
    #[arg(long = "exclude", value_name = "ALLERGEN")]
    pub excluded_allergens: Vec<AllergenTag>,

    /// Diet tag to prefer (repeatable)
    #[arg(long = "prefer", value_name = "DIET_TAG")]
    pub preferred_diet_tags: Vec<DietTag>,
}

impl PlanArgs {
    pub fn into_profile(self) -> Profile {
        Profile {
            age: self.age,
            sex: self.sex,
            weight_kg: self.weight_kg,
            height_cm: self.height_cm,
            activity_level: self.activity_level,
            goal: self.goal,
            excluded_allergens: self.excluded_allergens.into_iter().collect(),
            preferred_diet_tags: self.preferred_diet_tags.into_iter().collect(),
        }
    }
}

#[derive(Args, Debug)]
pub struct ReviewArgs {
    /// Reviewer name
    #[arg(long)]
    pub name: String,

    /// Short description shown with the review
    #[arg(long, default_value = "NutriPlan user")]
    pub role: String,

    /// The review text (at least 10 characters)
    #[arg(long)]
    pub comment: String,
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
