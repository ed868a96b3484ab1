//! Core domain types for the workout adaptation engine.
//!
//! This module defines the fundamental types used throughout the system:
//! - Health metric snapshots supplied by the device layer
//! - Adaptation reasons, severities and change records
//! - Exercises, daily workouts and workout plans
//! - Recommendations and in-memory workout sessions

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Health Metrics
// ============================================================================

/// Macronutrient breakdown in grams
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct MacroBreakdown {
    #[serde(default)]
    pub protein_g: f64,
    #[serde(default)]
    pub carbs_g: f64,
    #[serde(default)]
    pub fat_g: f64,
}

/// A point-in-time snapshot of the user's physiological signals
///
/// Produced externally once per evaluation and never mutated.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct HealthMetricSnapshot {
    /// Resting heart rate in bpm
    pub heart_rate: f64,
    /// Heart-rate variability in ms
    pub heart_rate_variability: f64,
    /// 0-100
    pub sleep_score: f64,
    /// 0-100
    pub recovery_score: f64,
    /// 1-10
    pub stress_level: f64,
    /// 0-100
    pub activity_level: f64,
    #[serde(default)]
    pub calories_consumed: f64,
    #[serde(default)]
    pub calories_burned: f64,
    #[serde(default)]
    pub water_intake_ml: f64,
    #[serde(default)]
    pub macros: MacroBreakdown,
    #[serde(default = "Utc::now")]
    pub captured_at: DateTime<Utc>,
}

// ============================================================================
// Adaptation Types
// ============================================================================

/// Why a workout plan had to change
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AdaptationReason {
    LowReadiness,
    PoorSleep,
    HighStress,
    Overtraining,
    Injury,
    Illness,
    EquipmentUnavailable,
    TimeConstraint,
}

impl AdaptationReason {
    pub const ALL: [AdaptationReason; 8] = [
        AdaptationReason::LowReadiness,
        AdaptationReason::PoorSleep,
        AdaptationReason::HighStress,
        AdaptationReason::Overtraining,
        AdaptationReason::Injury,
        AdaptationReason::Illness,
        AdaptationReason::EquipmentUnavailable,
        AdaptationReason::TimeConstraint,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AdaptationReason::LowReadiness => "low_readiness",
            AdaptationReason::PoorSleep => "poor_sleep",
            AdaptationReason::HighStress => "high_stress",
            AdaptationReason::Overtraining => "overtraining",
            AdaptationReason::Injury => "injury",
            AdaptationReason::Illness => "illness",
            AdaptationReason::EquipmentUnavailable => "equipment_unavailable",
            AdaptationReason::TimeConstraint => "time_constraint",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let wanted = s.trim().to_lowercase();
        Self::ALL.iter().copied().find(|r| r.as_str() == wanted)
    }
}

/// Escalation level; ordering is `Low < Moderate < High`
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    #[default]
    Low,
    Moderate,
    High,
}

/// Workout intensity level
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Intensity {
    Low,
    Moderate,
    High,
}

/// The typed mutation an adaptation change performs
///
/// Duration reductions carry their numeric target so the applier never has
/// to re-derive it from the human-readable text.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChangeKind {
    IntensityReduction { target: Intensity },
    DurationReduction { target_minutes: u32 },
    ExerciseSubstitution,
    RestDay,
}

impl ChangeKind {
    pub fn label(&self) -> &'static str {
        match self {
            ChangeKind::IntensityReduction { .. } => "intensity_reduction",
            ChangeKind::DurationReduction { .. } => "duration_reduction",
            ChangeKind::ExerciseSubstitution => "exercise_substitution",
            ChangeKind::RestDay => "rest_day",
        }
    }
}

/// A single mutation instruction within an adaptation
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdaptationChange {
    pub kind: ChangeKind,
    pub description: String,
    pub original_value: String,
    pub new_value: String,
}

/// A recorded decision to alter a workout plan
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Adaptation {
    pub id: Uuid,
    pub reason: AdaptationReason,
    /// Never empty
    pub changes: Vec<AdaptationChange>,
    pub applied_at: DateTime<Utc>,
    /// How long the adaptation stays in effect; `None` means one-shot
    pub duration_days: Option<u32>,
}

// ============================================================================
// Exercise Types
// ============================================================================

/// Category of exercise
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseCategory {
    Cardio,
    Hiit,
    Strength,
    Yoga,
    Flexibility,
}

impl ExerciseCategory {
    pub const ALL: [ExerciseCategory; 5] = [
        ExerciseCategory::Cardio,
        ExerciseCategory::Hiit,
        ExerciseCategory::Strength,
        ExerciseCategory::Yoga,
        ExerciseCategory::Flexibility,
    ];

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "cardio" => Some(ExerciseCategory::Cardio),
            "hiit" => Some(ExerciseCategory::Hiit),
            "strength" => Some(ExerciseCategory::Strength),
            "yoga" => Some(ExerciseCategory::Yoga),
            "flexibility" => Some(ExerciseCategory::Flexibility),
            _ => None,
        }
    }
}

/// Exercise difficulty, doubling as the user's fitness level
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Some(Difficulty::Beginner),
            "intermediate" => Some(Difficulty::Intermediate),
            "advanced" => Some(Difficulty::Advanced),
            _ => None,
        }
    }
}

/// Fitness level of the user, on the same scale as exercise difficulty
pub type FitnessLevel = Difficulty;

/// Kind of pre-authored exercise modification
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ModificationKind {
    Easier,
    Harder,
    InjuryAdaptation,
}

/// A pre-authored variation of an exercise
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ExerciseModification {
    pub kind: ModificationKind,
    pub description: String,
}

/// An exercise definition (e.g., "Bodyweight Squats")
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Exercise {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: ExerciseCategory,
    /// Required equipment; empty means bodyweight only
    pub equipment: Vec<String>,
    pub difficulty: Difficulty,
    pub duration_minutes: u32,
    pub calories_per_minute: f64,
    pub instructions: Vec<String>,
    pub muscle_groups: Vec<String>,
    pub modifications: Vec<ExerciseModification>,
}

impl Exercise {
    /// True if every piece of required equipment is in `available`
    pub fn fits_equipment(&self, available: &[String]) -> bool {
        self.equipment.iter().all(|e| available.contains(e))
    }

    pub fn estimated_calories(&self) -> f64 {
        self.calories_per_minute * f64::from(self.duration_minutes)
    }
}

// ============================================================================
// Plan Types
// ============================================================================

/// One scheduled day of a workout plan
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DailyWorkout {
    pub date: NaiveDate,
    pub exercises: Vec<Exercise>,
    pub duration_minutes: u32,
    pub intensity: Intensity,
    pub completed: bool,
    pub adapted_for: Option<AdaptationReason>,
    pub notes: Option<String>,
}

/// High-level training goal supplied by the user
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FitnessGoal {
    WeightLoss,
    MuscleGain,
    Flexibility,
    GeneralFitness,
    Endurance,
}

impl FitnessGoal {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "weight_loss" => Some(FitnessGoal::WeightLoss),
            "muscle_gain" => Some(FitnessGoal::MuscleGain),
            "flexibility" => Some(FitnessGoal::Flexibility),
            "general_fitness" => Some(FitnessGoal::GeneralFitness),
            "endurance" => Some(FitnessGoal::Endurance),
            _ => None,
        }
    }
}

/// Recommendation and goal priority
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// Measurable weekly target attached to a goal
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum GoalTarget {
    Calories(u32),
    Sessions(u32),
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct WeeklyGoal {
    pub goal: FitnessGoal,
    pub target: GoalTarget,
    pub deadline: NaiveDate,
    pub priority: Priority,
}

/// Accumulated progress against a plan
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ProgressMetrics {
    pub completed_workouts: u32,
    pub total_minutes: u32,
    pub calories_burned: f64,
    pub streak_days: u32,
    pub last_completed: Option<NaiveDate>,
}

/// A structured multi-day exercise schedule tied to weekly goals
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WorkoutPlan {
    pub id: Uuid,
    pub user_id: String,
    pub name: String,
    pub description: String,
    pub weekly_goals: Vec<WeeklyGoal>,
    pub daily_workouts: Vec<DailyWorkout>,
    /// Append-only
    pub adaptations: Vec<Adaptation>,
    pub progress: ProgressMetrics,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub active: bool,
}

/// Read-only projection of a plan offered to the user
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WorkoutRecommendation {
    pub plan: WorkoutPlan,
    pub reason: String,
    pub priority: Priority,
    /// Metric tags the recommendation is based on (e.g. "recovery_score")
    pub based_on: Vec<String>,
    pub scheduled_for: Option<DateTime<Utc>>,
}

impl WorkoutRecommendation {
    /// Intensity of the first scheduled day, if any
    pub fn intensity(&self) -> Option<Intensity> {
        self.plan.daily_workouts.first().map(|d| d.intensity)
    }
}

/// A workout session started against a stored plan
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WorkoutSession {
    pub id: Uuid,
    pub plan_id: Uuid,
    pub workout_date: Option<NaiveDate>,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub calories_burned: Option<f64>,
}
