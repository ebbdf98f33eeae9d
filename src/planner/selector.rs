use std::collections::BTreeSet;

use crate::catalog::{MealCatalog, MealItem, Slot};
use crate::error::PlanError;
use crate::profile::{AllergenTag, DietTag};

/// Largest product of eligible-set sizes for which every four-item
/// combination is enumerated. Above this the proportional greedy strategy is
/// used instead, keeping selection O(n log n) for large catalogs.
pub const ENUMERATION_CEILING: usize = 20_000;

/// One chosen item per slot plus the summed calories.
#[derive(Debug, Clone, PartialEq)]
pub struct MealSelection {
    pub breakfast: MealItem,
    pub lunch: MealItem,
    pub dinner: MealItem,
    pub snack: MealItem,
    pub total_calories: u32,
}

/// Filters one slot's items down to the eligible set.
///
/// Allergen exclusions are applied first; if they eliminate the whole slot,
/// the full slot is kept (exclusions are best-effort and never block plan
/// generation). The diet-tag narrowing is then applied on top and discarded
/// if it would empty the set. Returns an empty vec only for an empty slot.
pub fn eligible_items<'a>(
    items: &'a [MealItem],
    excluded_allergens: &BTreeSet<AllergenTag>,
    preferred_diet_tags: &BTreeSet<DietTag>,
) -> Vec<&'a MealItem> {
    let allergen_safe: Vec<&MealItem> = items
        .iter()
        .filter(|item| item.allergens.is_disjoint(excluded_allergens))
        .collect();

    if allergen_safe.is_empty() {
        return items.iter().collect();
    }

    if !preferred_diet_tags.is_empty() {
        let preferred: Vec<&MealItem> = allergen_safe
            .iter()
            .copied()
            .filter(|item| !item.diet_tags.is_disjoint(preferred_diet_tags))
            .collect();
        if !preferred.is_empty() {
            return preferred;
        }
    }

    allergen_safe
}

/// Picks the four-item combination whose summed calories best approximates
/// `target`.
///
/// Fails with `EmptyCatalog` if any slot has no items before filtering.
/// Deterministic for identical inputs.
pub fn select_plan(
    catalog: &MealCatalog,
    target: u32,
    excluded_allergens: &BTreeSet<AllergenTag>,
    preferred_diet_tags: &BTreeSet<DietTag>,
) -> Result<MealSelection, PlanError> {
    for slot in Slot::ALL {
        if catalog.slot_items(slot).is_empty() {
            return Err(PlanError::EmptyCatalog(slot));
        }
    }

    let breakfasts = eligible_items(
        catalog.slot_items(Slot::Breakfast),
        excluded_allergens,
        preferred_diet_tags,
    );
    let lunches = eligible_items(
        catalog.slot_items(Slot::Lunch),
        excluded_allergens,
        preferred_diet_tags,
    );
    let dinners = eligible_items(
        catalog.slot_items(Slot::Dinner),
        excluded_allergens,
        preferred_diet_tags,
    );
    let snacks = eligible_items(
        catalog.slot_items(Slot::Snack),
        excluded_allergens,
        preferred_diet_tags,
    );

    let combinations = breakfasts
        .len()
        .saturating_mul(lunches.len())
        .saturating_mul(dinners.len())
        .saturating_mul(snacks.len());

    let (breakfast, lunch, dinner, snack) = if combinations <= ENUMERATION_CEILING {
        best_combination(&breakfasts, &lunches, &dinners, &snacks, target)
    } else {
        (
            closest_to_share(&breakfasts, target, Slot::Breakfast),
            closest_to_share(&lunches, target, Slot::Lunch),
            closest_to_share(&dinners, target, Slot::Dinner),
            closest_to_share(&snacks, target, Slot::Snack),
        )
    };

    let total_calories =
        breakfast.calories + lunch.calories + dinner.calories + snack.calories;
    Ok(MealSelection {
        breakfast: breakfast.clone(),
        lunch: lunch.clone(),
        dinner: dinner.clone(),
        snack: snack.clone(),
        total_calories,
    })
}

/// Exhaustive search over every tuple. Ties keep the first-found tuple in
/// enumeration order; an exact match short-circuits.
fn best_combination<'a>(
    breakfasts: &[&'a MealItem],
    lunches: &[&'a MealItem],
    dinners: &[&'a MealItem],
    snacks: &[&'a MealItem],
    target: u32,
) -> (&'a MealItem, &'a MealItem, &'a MealItem, &'a MealItem) {
    // Eligible sets are never empty for non-empty slots, checked by the caller.
    let mut best = (breakfasts[0], lunches[0], dinners[0], snacks[0]);
    let mut best_diff = u32::MAX;

    'search: for &b in breakfasts {
        for &l in lunches {
            for &d in dinners {
                for &s in snacks {
                    let total = b.calories + l.calories + d.calories + s.calories;
                    let diff = total.abs_diff(target);
                    if diff < best_diff {
                        best = (b, l, d, s);
                        best_diff = diff;
                        if diff == 0 {
                            break 'search;
                        }
                    }
                }
            }
        }
    }

    best
}

/// Greedy fallback: the slot gets a fixed share of the daily target and the
/// calorie-closest item from its calorie-sorted eligible set. The first item
/// wins ties.
fn closest_to_share<'a>(eligible: &[&'a MealItem], target: u32, slot: Slot) -> &'a MealItem {
    let sub_target = (target as f64 * slot.calorie_share()).round() as u32;

    let mut sorted: Vec<&MealItem> = eligible.to_vec();
    sorted.sort_by_key(|item| item.calories);

    let mut best = sorted[0];
    for &item in &sorted[1..] {
        if item.calories.abs_diff(sub_target) < best.calories.abs_diff(sub_target) {
            best = item;
        }
    }
    best
}
