use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::PlanError;

// All profile enumerations share the same needs: a fixed kebab-case wire
// form, exhaustive matching, and a FromStr that rejects unknown values
// loudly instead of defaulting.
macro_rules! tag_enum {
    ($name:ident, $kind:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $text)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = PlanError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err(PlanError::UnrecognizedTag {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

tag_enum!(BiologicalSex, "biological sex", {
    Male => "male",
    Female => "female",
    Other => "other",
});

tag_enum!(ActivityLevel, "activity level", {
    Sedentary => "sedentary",
    Light => "light",
    Moderate => "moderate",
    Active => "active",
    VeryActive => "very-active",
});

tag_enum!(Goal, "goal", {
    LoseWeight => "lose-weight",
    GainWeight => "gain-weight",
    Maintain => "maintain",
});

tag_enum!(AllergenTag, "allergen", {
    Dairy => "dairy",
    Gluten => "gluten",
    Nuts => "nuts",
    Eggs => "eggs",
    Soy => "soy",
    Shellfish => "shellfish",
});

tag_enum!(DietTag, "diet tag", {
    Chicken => "chicken",
    Beef => "beef",
    Fish => "fish",
    Vegetarian => "vegetarian",
    Vegan => "vegan",
    Mediterranean => "mediterranean",
});

impl ActivityLevel {
    /// Standard TDEE multiplier for this activity level.
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }
}

impl Goal {
    /// Calorie adjustment applied on top of TDEE: a 15% deficit for weight
    /// loss, a 15% surplus for weight gain.
    pub fn calorie_factor(&self) -> f64 {
        match self {
            Goal::LoseWeight => 0.85,
            Goal::GainWeight => 1.15,
            Goal::Maintain => 1.0,
        }
    }
}

/// Biometric and preference data for one planning session. Built once from
/// validated form input and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub age: u32,
    pub sex: BiologicalSex,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub activity_level: ActivityLevel,
    pub goal: Goal,
    pub excluded_allergens: BTreeSet<AllergenTag>,
    pub preferred_diet_tags: BTreeSet<DietTag>,
}

impl Profile {
    /// Checks the numeric fields the energy estimator relies on. The
    /// estimator itself assumes these hold.
    pub fn validate(&self) -> Result<(), PlanError> {
        if self.age == 0 {
            return Err(PlanError::InvalidInput("age must be positive".to_string()));
        }
        if !(self.weight_kg.is_finite() && self.weight_kg > 0.0) {
            return Err(PlanError::InvalidInput(format!(
                "weight must be a positive number of kilograms, got {}",
                self.weight_kg
            )));
        }
        if !(self.height_cm.is_finite() && self.height_cm > 0.0) {
            return Err(PlanError::InvalidInput(format!(
                "height must be a positive number of centimeters, got {}",
                self.height_cm
            )));
        }
        Ok(())
    }
}
