use std::error::Error;
use std::fmt;
use std::path::PathBuf;

use crate::catalog::Slot;

/// Failures that can occur while building or reading back a meal plan.
#[derive(Debug)]
pub enum PlanError {
    /// A profile field failed validation (non-positive age, weight, ...).
    InvalidInput(String),
    /// An enumeration value was not recognized. These must fail fast at the
    /// parse boundary instead of propagating garbage through the arithmetic.
    UnrecognizedTag { kind: &'static str, value: String },
    /// A slot of the catalog has no items at all. This is a data error, not
    /// something filtering can cause.
    EmptyCatalog(Slot),
    /// No plan has been stored yet.
    PlanNotFound(PathBuf),
    /// The stored plan could not be read back as a valid `MealPlan`.
    MalformedPlan(String),
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanError::InvalidInput(msg) => write!(f, "Invalid profile input: {}", msg),
            PlanError::UnrecognizedTag { kind, value } => {
                write!(f, "Unrecognized {} value: '{}'", kind, value)
            }
            PlanError::EmptyCatalog(slot) => {
                write!(f, "Meal catalog has no items for slot '{}'", slot)
            }
            PlanError::PlanNotFound(path) => {
                write!(f, "No stored meal plan found at {:?}", path)
            }
            PlanError::MalformedPlan(msg) => write!(f, "Stored meal plan is invalid: {}", msg),
        }
    }
}

impl Error for PlanError {}
