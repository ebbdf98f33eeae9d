use anyhow::{Context, Result};
use std::path::Path;

use nutriplan::catalog::{load_catalog_from_csv, MealCatalog};
use nutriplan::cli::{parse_args, Cli, Command};
use nutriplan::plan_store::PlanStore;
use nutriplan::planner::{generate_plan, MealPlan};
use nutriplan::recipes::{shopping_list, RecipeBook};
use nutriplan::testimonials::TestimonialBoard;

fn load_recipe_book(cli: &Cli) -> Result<RecipeBook> {
    match &cli.recipes_file {
        Some(path) => RecipeBook::load_from_json(Path::new(path))
            .with_context(|| format!("Failed to load recipe details from '{}'", path)),
        None => RecipeBook::builtin(),
    }
}

fn print_plan(plan: &MealPlan) {
    println!("\nDaily calorie target: {} calories", plan.calorie_target);
    for (slot, item) in plan.meals() {
        println!("\n{}: {} ({} calories)", slot, item.name, item.calories);
        println!(
            "  Protein: {}  Carbs: {}  Fat: {}",
            item.protein, item.carbs, item.fat
        );
    }

    let direction = if plan.total_calories > plan.calorie_target {
        "over"
    } else {
        "under"
    };
    println!("\nTotal daily calories: {}", plan.total_calories);
    println!("Target calories: {}", plan.calorie_target);
    println!(
        "Accuracy: {} ({} calories {})",
        plan.accuracy(),
        plan.difference(),
        direction
    );
}

fn main() -> Result<()> {
    let cli = parse_args();
    let store = PlanStore::new(&cli.store_file);

    match cli.command {
        Command::Plan(args) => {
            let catalog = match &cli.catalog_file {
                Some(path) => load_catalog_from_csv(Path::new(path))
                    .with_context(|| format!("Failed to load meal catalog from '{}'", path))?,
                None => MealCatalog::builtin(),
            };

            let profile = args.into_profile();
            println!("Generating a personalized meal plan...");
            let plan = generate_plan(&catalog, &profile)?;
            print_plan(&plan);

            store.save(&plan)?;
            println!("\nSaved meal plan to {:?}", store.path());
        }
        Command::Recipes => {
            let plan = store.load()?;
            let book = load_recipe_book(&cli)?;

            for (slot, item) in plan.meals() {
                println!("\n{}: {} ({} calories)", slot, item.name, item.calories);
                match book.get(&item.id) {
                    Some(detail) => {
                        println!("Prep time: {}", detail.prep_time);
                        println!("Ingredients:");
                        for ingredient in &detail.ingredients {
                            println!("  - {}", ingredient);
                        }
                        println!("Instructions:");
                        for (step, instruction) in detail.instructions.iter().enumerate() {
                            println!("  {}. {}", step + 1, instruction);
                        }
                    }
                    None => println!("No recipe details available for '{}'.", item.id),
                }
            }
        }
        Command::ShoppingList => {
            let plan = store.load()?;
            let book = load_recipe_book(&cli)?;

            let items = shopping_list(&plan, &book);
            if items.is_empty() {
                println!("No shopping list available for the stored plan.");
            } else {
                println!("Shopping list for your meal plan:");
                for item in items {
                    println!("  - {}", item);
                }
            }
        }
        Command::Review(args) => {
            let mut board = TestimonialBoard::open(&cli.testimonials_file)?;
            board.submit(&args.name, &args.role, &args.comment)?;
            println!("Thank you for sharing your experience with NutriPlan!");
            println!(
                "The board now holds {} testimonials ({:?})",
                board.entries().len(),
                board.path()
            );
        }
    }

    Ok(())
}
