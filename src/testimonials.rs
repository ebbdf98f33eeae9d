use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::PlanError;

/// Default file the testimonial board is kept in.
pub const DEFAULT_TESTIMONIALS_FILE: &str = "testimonials.json";

/// Minimum length the review form accepts for a comment.
const MIN_COMMENT_LEN: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Testimonial {
    pub name: String,
    pub role: String,
    pub content: String,
}

/// Shared store connecting the feedback form to the testimonial display.
///
/// Submissions go through this explicit interface rather than any globally
/// reachable state: the display side reads `entries()`, the form side calls
/// `submit()`, and the board persists itself between sessions.
#[derive(Debug, Clone)]
pub struct TestimonialBoard {
    path: PathBuf,
    entries: Vec<Testimonial>,
}

impl TestimonialBoard {
    /// Opens the board at `path`, seeding the default testimonials when no
    /// file exists yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<TestimonialBoard> {
        let path = path.into();
        let entries = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read testimonials from {:?}", path))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse testimonials from {:?}", path))?
        } else {
            seed_entries()
        };
        Ok(TestimonialBoard { path, entries })
    }

    pub fn entries(&self) -> &[Testimonial] {
        &self.entries
    }

    /// Validates and records one review, persisting the board.
    pub fn submit(&mut self, name: &str, role: &str, content: &str) -> Result<()> {
        let name = name.trim();
        let content = content.trim();
        if name.is_empty() {
            return Err(PlanError::InvalidInput("a reviewer name is required".to_string()).into());
        }
        if content.len() < MIN_COMMENT_LEN {
            return Err(PlanError::InvalidInput(format!(
                "comment must be at least {} characters",
                MIN_COMMENT_LEN
            ))
            .into());
        }

        self.entries.push(Testimonial {
            name: name.to_string(),
            role: role.trim().to_string(),
            content: content.to_string(),
        });
        self.persist()
    }

    fn persist(&self) -> Result<()> {
        let serialized = serde_json::to_string_pretty(&self.entries)
            .context("Failed to serialize testimonials")?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write testimonials to {:?}", self.path))?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn seed_entries() -> Vec<Testimonial> {
    let seed = [
        (
            "Sarah Johnson",
            "Lost 15kg in 6 months",
            "NutriPlan completely transformed my relationship with food. The personalized meal plans made it easy to stay on track with my weight loss goals without feeling deprived.",
        ),
        (
            "Michael Chen",
            "Fitness Enthusiast",
            "As someone who's serious about fitness, I needed a nutrition plan that could keep up with my training. NutriPlan delivered exactly what I needed to fuel my workouts and recovery.",
        ),
        (
            "Emily Rodriguez",
            "Busy Professional",
            "With my hectic schedule, meal planning was always a challenge. NutriPlan simplified everything with easy recipes and a shopping list. Now I eat healthier without the stress!",
        ),
        (
            "David Thompson",
            "Managing Diabetes",
            "Finding meals that help manage my diabetes used to be difficult. NutriPlan's customized approach takes my medical condition into account and provides delicious options.",
        ),
    ];
    seed.iter()
        .map(|(name, role, content)| Testimonial {
            name: name.to_string(),
            role: role.to_string(),
            content: content.to_string(),
        })
        .collect()
}
