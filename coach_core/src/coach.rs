//! The coaching façade consumed by UI and chat handling.
//!
//! `Coach` owns the exercise catalog, the in-memory plan store and the
//! configuration. Scenario state is not held here: each caller keeps its own
//! `ScenarioState` and passes it in.

use crate::adaptation::generate_adaptations;
use crate::applier::apply_adaptations;
use crate::planner::{generate_plan, PlanRequest};
use crate::readiness::readiness_score;
use crate::recommendation::{recommendations, RecommendationPreferences, ScenarioState};
use crate::substitution::alternatives;
use crate::{
    get_default_catalog, Catalog, Config, Error, Exercise, ExerciseFilter, FitnessGoal,
    HealthMetricSnapshot, PlanStore, Result, WorkoutPlan, WorkoutRecommendation, WorkoutSession,
};
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Clone, Debug)]
pub struct Coach {
    catalog: Catalog,
    store: PlanStore,
    config: Config,
}

impl Coach {
    pub fn new(catalog: Catalog, config: Config) -> Self {
        Self {
            catalog,
            store: PlanStore::new(),
            config,
        }
    }

    /// Coach over the built-in catalog with default configuration
    pub fn with_defaults() -> Self {
        Self::new(get_default_catalog().clone(), Config::default())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &PlanStore {
        &self.store
    }

    /// A plan request populated from the profile and planner config
    pub fn default_plan_request(&self) -> PlanRequest {
        PlanRequest {
            user_id: self.config.profile.user_id.clone(),
            goals: self.config.planner.goals.clone(),
            equipment: self.config.profile.equipment.clone(),
            fitness_level: self.config.profile.fitness_level,
            session_minutes: self.config.planner.session_minutes,
            sessions_per_week: self.config.planner.sessions_per_week,
        }
    }

    pub fn recommended_workouts(
        &self,
        state: &ScenarioState,
        preferences: Option<&RecommendationPreferences>,
        now: DateTime<Utc>,
    ) -> Vec<WorkoutRecommendation> {
        recommendations(
            &self.catalog,
            state,
            preferences,
            self.config.recommendations.readiness_gate,
            now,
        )
    }

    /// Generate a plan and keep it in the store
    pub fn generate_workout_plan(
        &mut self,
        request: &PlanRequest,
        now: DateTime<Utc>,
    ) -> Result<WorkoutPlan> {
        let plan = generate_plan(&self.catalog, request, now)?;
        self.store.insert(plan.clone());
        Ok(plan)
    }

    /// Shorthand for `generate_workout_plan` with explicit goals
    pub fn generate_for_goals(
        &mut self,
        goals: Vec<FitnessGoal>,
        now: DateTime<Utc>,
    ) -> Result<WorkoutPlan> {
        let request = PlanRequest {
            goals,
            ..self.default_plan_request()
        };
        self.generate_workout_plan(&request, now)
    }

    /// Analyse metrics and feedback, then apply the resulting adaptations
    ///
    /// If the plan is held in the store, the stored copy is adapted and
    /// replaced, so progress and earlier adaptations recorded there are kept
    /// even when `plan` is stale. The caller's plan is never modified.
    pub fn adapt_workout(
        &mut self,
        plan: &WorkoutPlan,
        metrics: &HealthMetricSnapshot,
        feedback: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<WorkoutPlan> {
        let stored = self.store.get(&plan.id).cloned();
        let base = stored.as_ref().unwrap_or(plan);

        let adaptations = generate_adaptations(base, metrics, feedback, now)?;
        let adapted = apply_adaptations(base, &adaptations, now);

        if stored.is_some() {
            self.store.insert(adapted.clone());
        }
        Ok(adapted)
    }

    /// Validated readiness score for a snapshot
    pub fn calculate_readiness_score(&self, metrics: &HealthMetricSnapshot) -> Result<u8> {
        metrics.validate()?;
        Ok(readiness_score(metrics))
    }

    /// Alternatives to an exercise
    ///
    /// With an injury category, the injury substitution table is used. Without
    /// one, other exercises from the same category that are no harder and need
    /// no extra equipment are returned.
    pub fn alternative_exercises(
        &self,
        exercise_id: &str,
        injury: Option<&str>,
    ) -> Result<Vec<Exercise>> {
        let exercise = self
            .catalog
            .get(exercise_id)
            .ok_or_else(|| Error::ExerciseNotFound(exercise_id.to_string()))?;

        let found = match injury {
            Some(category) => alternatives(exercise, category),
            None => self
                .catalog
                .by_category(exercise.category)
                .filter(|e| e.id != exercise.id)
                .filter(|e| e.difficulty <= exercise.difficulty)
                .filter(|e| e.fits_equipment(&exercise.equipment))
                .cloned()
                .collect(),
        };

        tracing::debug!("{} alternative(s) for {}", found.len(), exercise_id);
        Ok(found)
    }

    pub fn exercises_by_category(&self, filter: &ExerciseFilter) -> Vec<Exercise> {
        self.catalog.filter(filter)
    }

    pub fn process_chat_message(&self, state: &mut ScenarioState, text: &str) -> bool {
        state.process_message(text)
    }

    pub fn reset_demo_state(&self, state: &mut ScenarioState) {
        state.reset()
    }

    /// Start a session; fails with `PlanNotFound` for unknown plans
    pub fn start_session(&mut self, plan_id: Uuid, now: DateTime<Utc>) -> Result<WorkoutSession> {
        self.store.start_session(plan_id, now)
    }

    pub fn complete_session(
        &mut self,
        session_id: Uuid,
        calories: Option<f64>,
        now: DateTime<Utc>,
    ) -> Result<WorkoutPlan> {
        self.store.complete_session(session_id, calories, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{healthy_snapshot, snapshot};
    use crate::{AdaptationReason, ExerciseCategory, FitnessLevel, Intensity, Priority};

    fn coach() -> Coach {
        crate::logging::init_test();
        Coach::with_defaults()
    }

    #[test]
    fn test_generated_plan_is_stored_and_sessions_start() {
        let mut coach = coach();
        let now = Utc::now();
        let plan = coach
            .generate_for_goals(vec![FitnessGoal::GeneralFitness], now)
            .unwrap();

        assert!(coach.store().contains(&plan.id));
        let session = coach.start_session(plan.id, now).unwrap();
        assert_eq!(session.plan_id, plan.id);
    }

    #[test]
    fn test_start_session_for_unknown_plan() {
        let mut coach = coach();
        assert!(matches!(
            coach.start_session(Uuid::new_v4(), Utc::now()),
            Err(Error::PlanNotFound(_))
        ));
    }

    #[test]
    fn test_adapt_workout_updates_stored_copy() {
        let mut coach = coach();
        let now = Utc::now();
        let request = coach.default_plan_request();
        let plan = coach.generate_workout_plan(&request, now).unwrap();

        // Overtraining at high severity turns every day into rest
        let metrics = snapshot(80.0, 85.0, 3.0, 15.0);
        let adapted = coach.adapt_workout(&plan, &metrics, None, now).unwrap();

        assert_eq!(adapted.adaptations.len(), 1);
        assert_eq!(adapted.adaptations[0].reason, AdaptationReason::Overtraining);
        assert!(adapted.daily_workouts.iter().all(|d| d.duration_minutes == 0));
        assert_eq!(coach.store().get(&plan.id), Some(&adapted));
        // Caller's copy untouched
        assert!(plan.adaptations.is_empty());
    }

    #[test]
    fn test_adapt_keeps_stored_progress_and_history() {
        let mut coach = coach();
        let now = Utc::now();
        let request = coach.default_plan_request();
        let plan = coach.generate_workout_plan(&request, now).unwrap();

        let session = coach.start_session(plan.id, now).unwrap();
        coach.complete_session(session.id, None, now).unwrap();

        // `plan` predates the completed session
        let low_recovery = snapshot(35.0, 80.0, 3.0, 45.0);
        let adapted = coach.adapt_workout(&plan, &low_recovery, None, now).unwrap();
        assert_eq!(adapted.progress.completed_workouts, 1);
        assert!(adapted.daily_workouts[0].completed);

        let again = coach.adapt_workout(&plan, &low_recovery, None, now).unwrap();
        assert_eq!(again.adaptations.len(), 2);
        assert_eq!(again.adaptations[0].id, adapted.adaptations[0].id);

        let stored = coach.store().get(&plan.id).unwrap();
        assert_eq!(stored.progress.completed_workouts, 1);
        assert_eq!(stored.adaptations.len(), 2);
    }

    #[test]
    fn test_too_hard_feedback_does_not_raise_beginner_intensity() {
        let mut coach = coach();
        let now = Utc::now();
        let request = PlanRequest {
            fitness_level: FitnessLevel::Beginner,
            ..coach.default_plan_request()
        };
        let plan = coach.generate_workout_plan(&request, now).unwrap();
        assert!(plan.daily_workouts.iter().all(|d| d.intensity == Intensity::Low));

        let adapted = coach
            .adapt_workout(&plan, &healthy_snapshot(), Some("this was too hard"), now)
            .unwrap();
        assert_eq!(adapted.adaptations.len(), 1);
        assert!(adapted
            .daily_workouts
            .iter()
            .all(|d| d.intensity == Intensity::Low));
    }

    #[test]
    fn test_adapt_with_feedback_only() {
        let mut coach = coach();
        let now = Utc::now();
        let request = coach.default_plan_request();
        let plan = coach.generate_workout_plan(&request, now).unwrap();

        let adapted = coach
            .adapt_workout(&plan, &healthy_snapshot(), Some("The workout was too hard for me"), now)
            .unwrap();
        assert_eq!(adapted.adaptations.len(), 1);
        assert!(adapted
            .daily_workouts
            .iter()
            .all(|d| d.intensity == Intensity::Moderate));
    }

    #[test]
    fn test_readiness_rejects_invalid_metrics() {
        let coach = coach();
        let mut metrics = healthy_snapshot();
        assert!(coach.calculate_readiness_score(&metrics).unwrap() <= 100);

        metrics.activity_level = 140.0;
        assert!(matches!(
            coach.calculate_readiness_score(&metrics),
            Err(Error::InvalidMetric { field: "activity_level", .. })
        ));
    }

    #[test]
    fn test_alternatives_unknown_injury_is_empty() {
        let coach = coach();
        let alts = coach
            .alternative_exercises("bodyweight_squats", Some("unknown_injury"))
            .unwrap();
        assert!(alts.is_empty());
    }

    #[test]
    fn test_alternatives_without_injury_stay_in_category() {
        let coach = coach();
        let alts = coach.alternative_exercises("dumbbell_rows", None).unwrap();

        let ids: Vec<_> = alts.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["bodyweight_squats", "push_ups"]);
        assert!(alts.iter().all(|e| e.category == ExerciseCategory::Strength));
    }

    #[test]
    fn test_alternatives_unknown_exercise() {
        let coach = coach();
        assert!(matches!(
            coach.alternative_exercises("moon_walk", None),
            Err(Error::ExerciseNotFound(_))
        ));
    }

    #[test]
    fn test_chat_flow_through_coach() {
        let coach = coach();
        let mut state = ScenarioState::default();
        let now = Utc::now();

        assert!(coach.process_chat_message(&mut state, "My back feels sore today"));
        let recs = coach.recommended_workouts(&state, None, now);
        assert_eq!(recs[0].plan.name, "Back Relief Mobility");
        assert_eq!(recs[0].priority, Priority::High);

        coach.reset_demo_state(&mut state);
        let recs = coach.recommended_workouts(&state, None, now);
        assert_eq!(recs[0].plan.name, "Morning Cardio Kickstart");
    }

    #[test]
    fn test_default_request_follows_config() {
        let mut config = Config::default();
        config.profile.fitness_level = FitnessLevel::Beginner;
        config.planner.session_minutes = 45;
        let coach = Coach::new(crate::build_default_catalog(), config);

        let request = coach.default_plan_request();
        assert_eq!(request.fitness_level, FitnessLevel::Beginner);
        assert_eq!(request.session_minutes, 45);
    }
}
