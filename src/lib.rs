pub mod catalog;
pub mod cli;
pub mod error;
pub mod plan_store;
pub mod planner;
pub mod profile;
pub mod recipes;
pub mod testimonials;
