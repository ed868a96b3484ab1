//! Workout recommendations and the chat-triggered scenario override.
//!
//! The override is a two-state machine owned by the caller:
//!
//! - `Default`: the priority-ordered default list is returned as-is
//! - `Active(scenario)`: the scenario's recommendation replaces the top
//!   default, the remaining defaults follow
//!
//! Chat text is matched against an ordered keyword table; unmatched text
//! never changes state.

use crate::{
    Catalog, DailyWorkout, Exercise, ExerciseCategory, Intensity, Priority, ProgressMetrics,
    WorkoutPlan, WorkoutRecommendation,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A canned situation recognised from chat text
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    BackPain,
    Fatigue,
    HighEnergy,
}

/// Recommendation override state, owned by the caller (one per session)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScenarioState {
    #[default]
    Default,
    Active(Scenario),
}

pub struct ScenarioRule {
    pub keywords: &'static [&'static str],
    pub scenario: Scenario,
}

/// Evaluated top to bottom; first match wins
pub const SCENARIO_RULES: [ScenarioRule; 3] = [
    ScenarioRule {
        keywords: &["sore", "back"],
        scenario: Scenario::BackPain,
    },
    ScenarioRule {
        keywords: &["tired", "exhausted"],
        scenario: Scenario::Fatigue,
    },
    ScenarioRule {
        keywords: &["amazing", "energetic"],
        scenario: Scenario::HighEnergy,
    },
];

/// Match chat text against `SCENARIO_RULES` (case-insensitive)
pub fn match_scenario(text: &str) -> Option<Scenario> {
    let lowered = text.to_lowercase();
    SCENARIO_RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|k| lowered.contains(k)))
        .map(|rule| rule.scenario)
}

impl ScenarioState {
    /// Scan a chat message; returns true if it activated a scenario
    pub fn process_message(&mut self, text: &str) -> bool {
        match match_scenario(text) {
            Some(scenario) => {
                tracing::info!("Chat message activated scenario {:?}", scenario);
                *self = ScenarioState::Active(scenario);
                true
            }
            None => false,
        }
    }

    pub fn reset(&mut self) {
        if *self != ScenarioState::Default {
            tracing::info!("Scenario override cleared");
        }
        *self = ScenarioState::Default;
    }

    pub fn active(&self) -> Option<Scenario> {
        match self {
            ScenarioState::Default => None,
            ScenarioState::Active(scenario) => Some(*scenario),
        }
    }
}

/// Optional filters over the assembled recommendation list
#[derive(Clone, Debug, Default)]
pub struct RecommendationPreferences {
    /// Keep plans containing at least one exercise from these categories
    pub categories: Vec<ExerciseCategory>,
    /// Keep plans whose first session fits in this many minutes
    pub max_minutes: Option<u32>,
    /// Current readiness; below the gate, high-intensity plans are dropped
    pub readiness: Option<u8>,
}

impl RecommendationPreferences {
    fn accepts(&self, rec: &WorkoutRecommendation, readiness_gate: u8) -> bool {
        let first = rec.plan.daily_workouts.first();

        let category_ok = self.categories.is_empty()
            || first.map_or(false, |d| {
                d.exercises
                    .iter()
                    .any(|e| self.categories.contains(&e.category))
            });

        let duration_ok = match (self.max_minutes, first) {
            (Some(max), Some(day)) => day.duration_minutes <= max,
            _ => true,
        };

        let readiness_ok = match self.readiness {
            Some(score) if score < readiness_gate => rec.intensity() != Some(Intensity::High),
            _ => true,
        };

        category_ok && duration_ok && readiness_ok
    }
}

struct FixedRecommendation {
    name: &'static str,
    description: &'static str,
    exercises: &'static [&'static str],
    intensity: Intensity,
    reason: &'static str,
    priority: Priority,
    based_on: &'static [&'static str],
}

const DEFAULT_RECOMMENDATIONS: [FixedRecommendation; 4] = [
    FixedRecommendation {
        name: "Morning Cardio Kickstart",
        description: "Short cardio and conditioning block to start the day",
        exercises: &["jumping_jacks", "burpee_intervals", "full_body_stretch"],
        intensity: Intensity::Moderate,
        reason: "Your recovery supports a moderate cardio session today",
        priority: Priority::High,
        based_on: &["recovery_score", "sleep_score"],
    },
    FixedRecommendation {
        name: "Strength Foundations",
        description: "Bodyweight and dumbbell basics",
        exercises: &["bodyweight_squats", "push_ups", "dumbbell_rows"],
        intensity: Intensity::High,
        reason: "Your activity level has room for a strength session",
        priority: Priority::Medium,
        based_on: &["activity_level"],
    },
    FixedRecommendation {
        name: "Evening Yoga Flow",
        description: "Slow flow to wind down",
        exercises: &["sun_salutation", "full_body_stretch"],
        intensity: Intensity::Low,
        reason: "A calming flow helps keep stress in check",
        priority: Priority::Low,
        based_on: &["stress_level"],
    },
    FixedRecommendation {
        name: "HIIT Power Session",
        description: "All-out intervals for experienced athletes",
        exercises: &["tabata_sprints", "mountain_climbers"],
        intensity: Intensity::High,
        reason: "Strong heart-rate variability suggests you can push hard",
        priority: Priority::Low,
        based_on: &["heart_rate_variability"],
    },
];

fn scenario_definition(scenario: Scenario) -> FixedRecommendation {
    match scenario {
        Scenario::BackPain => FixedRecommendation {
            name: "Back Relief Mobility",
            description: "Gentle spinal mobility and hip work",
            exercises: &["cat_cow_child_pose", "hip_mobility", "full_body_stretch"],
            intensity: Intensity::Low,
            reason: "You mentioned back soreness, so today focuses on gentle mobility",
            priority: Priority::High,
            based_on: &["user_feedback"],
        },
        Scenario::Fatigue => FixedRecommendation {
            name: "Gentle Recovery Flow",
            description: "Easy movement to restore energy without adding fatigue",
            exercises: &["sun_salutation", "full_body_stretch"],
            intensity: Intensity::Low,
            reason: "You're feeling tired, so a restorative session is the better choice",
            priority: Priority::High,
            based_on: &["user_feedback"],
        },
        Scenario::HighEnergy => FixedRecommendation {
            name: "High-Energy HIIT Challenge",
            description: "Make the most of a great day with intense intervals",
            exercises: &["burpee_intervals", "mountain_climbers", "jump_rope"],
            intensity: Intensity::High,
            reason: "You're feeling energetic, so let's put that energy to work",
            priority: Priority::High,
            based_on: &["user_feedback"],
        },
    }
}

fn build(catalog: &Catalog, def: &FixedRecommendation, now: DateTime<Utc>) -> WorkoutRecommendation {
    let exercises: Vec<Exercise> = catalog.pick(def.exercises);
    let duration_minutes: u32 = exercises.iter().map(|e| e.duration_minutes).sum();

    WorkoutRecommendation {
        plan: WorkoutPlan {
            id: Uuid::new_v4(),
            user_id: "demo".into(),
            name: def.name.into(),
            description: def.description.into(),
            weekly_goals: Vec::new(),
            daily_workouts: vec![DailyWorkout {
                date: now.date_naive(),
                exercises,
                duration_minutes,
                intensity: def.intensity,
                completed: false,
                adapted_for: None,
                notes: None,
            }],
            adaptations: Vec::new(),
            progress: ProgressMetrics::default(),
            created_at: now,
            updated_at: now,
            active: true,
        },
        reason: def.reason.into(),
        priority: def.priority,
        based_on: def.based_on.iter().map(|s| s.to_string()).collect(),
        scheduled_for: None,
    }
}

/// The default list, highest priority first
pub fn default_recommendations(catalog: &Catalog, now: DateTime<Utc>) -> Vec<WorkoutRecommendation> {
    DEFAULT_RECOMMENDATIONS
        .iter()
        .map(|def| build(catalog, def, now))
        .collect()
}

pub fn scenario_recommendation(
    catalog: &Catalog,
    scenario: Scenario,
    now: DateTime<Utc>,
) -> WorkoutRecommendation {
    build(catalog, &scenario_definition(scenario), now)
}

/// Assemble recommendations for the current state, then apply preferences
pub fn recommendations(
    catalog: &Catalog,
    state: &ScenarioState,
    preferences: Option<&RecommendationPreferences>,
    readiness_gate: u8,
    now: DateTime<Utc>,
) -> Vec<WorkoutRecommendation> {
    let defaults = default_recommendations(catalog, now);

    let assembled: Vec<_> = match state.active() {
        Some(scenario) => std::iter::once(scenario_recommendation(catalog, scenario, now))
            .chain(defaults.into_iter().skip(1))
            .collect(),
        None => defaults,
    };

    match preferences {
        Some(prefs) => assembled
            .into_iter()
            .filter(|rec| prefs.accepts(rec, readiness_gate))
            .collect(),
        None => assembled,
    }
}
