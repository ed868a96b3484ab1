#![forbid(unsafe_code)]

//! Workout adaptation and recommendation engine.
//!
//! This crate provides:
//! - Domain types (health snapshots, exercises, plans, adaptations)
//! - Readiness scoring and metric analysis
//! - Adaptation generation and application
//! - Injury-safe exercise substitution
//! - Plan generation from goals, equipment and time budget
//! - Recommendations with a chat-triggered scenario override

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod input;
pub mod readiness;
pub mod analysis;
pub mod adaptation;
pub mod applier;
pub mod substitution;
pub mod planner;
pub mod recommendation;
pub mod store;
pub mod coach;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{build_default_catalog, get_default_catalog, Catalog, ExerciseFilter};
pub use config::Config;
pub use input::{load_plan, load_snapshot, save_plan};
pub use readiness::readiness_score;
pub use analysis::{analyze, Finding, MetricsAnalysis};
pub use adaptation::{adaptation_for, generate_adaptations};
pub use applier::apply_adaptations;
pub use substitution::alternatives;
pub use planner::{generate_plan, PlanRequest};
pub use recommendation::{RecommendationPreferences, Scenario, ScenarioState};
pub use store::PlanStore;
pub use coach::Coach;
