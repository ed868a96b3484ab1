//! In-memory plan and session store.
//!
//! Holds generated plans and the workout sessions started against them.
//! Nothing here touches disk; callers own the store value and pass it
//! wherever it is needed.

use crate::{Error, Result, WorkoutPlan, WorkoutSession};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Clone, Debug, Default)]
pub struct PlanStore {
    plans: HashMap<Uuid, WorkoutPlan>,
    sessions: HashMap<Uuid, WorkoutSession>,
}

impl PlanStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a plan, returning its id
    pub fn insert(&mut self, plan: WorkoutPlan) -> Uuid {
        let id = plan.id;
        if self.plans.insert(id, plan).is_some() {
            tracing::debug!("Replaced stored plan {}", id);
        }
        id
    }

    pub fn get(&self, id: &Uuid) -> Option<&WorkoutPlan> {
        self.plans.get(id)
    }

    pub fn contains(&self, id: &Uuid) -> bool {
        self.plans.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }

    /// Sessions recorded against a plan, oldest first
    pub fn sessions_for(&self, plan_id: &Uuid) -> Vec<&WorkoutSession> {
        let mut sessions: Vec<_> = self
            .sessions
            .values()
            .filter(|s| &s.plan_id == plan_id)
            .collect();
        sessions.sort_by_key(|s| s.started_at);
        sessions
    }

    /// Start a session against the next uncompleted day of a stored plan
    pub fn start_session(&mut self, plan_id: Uuid, now: DateTime<Utc>) -> Result<WorkoutSession> {
        let plan = self.plans.get(&plan_id).ok_or(Error::PlanNotFound(plan_id))?;

        let workout_date = plan
            .daily_workouts
            .iter()
            .find(|d| !d.completed)
            .map(|d| d.date);

        let session = WorkoutSession {
            id: Uuid::new_v4(),
            plan_id,
            workout_date,
            started_at: now,
            completed_at: None,
            calories_burned: None,
        };

        tracing::info!("Started session {} for plan {}", session.id, plan_id);
        self.sessions.insert(session.id, session.clone());
        Ok(session)
    }

    /// Complete a session and fold it into the plan's progress
    ///
    /// When `calories` is not supplied the estimate from the day's exercises
    /// is used. Returns the updated plan.
    pub fn complete_session(
        &mut self,
        session_id: Uuid,
        calories: Option<f64>,
        now: DateTime<Utc>,
    ) -> Result<WorkoutPlan> {
        if let Some(value) = calories {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidInput(format!(
                    "calories burned must be a non-negative number, got {}",
                    value
                )));
            }
        }

        let session = self
            .sessions
            .get_mut(&session_id)
            .ok_or(Error::SessionNotFound(session_id))?;

        if session.completed_at.is_some() {
            return Err(Error::InvalidInput(format!(
                "session {} is already completed",
                session_id
            )));
        }

        let plan = self
            .plans
            .get_mut(&session.plan_id)
            .ok_or(Error::PlanNotFound(session.plan_id))?;

        let day = session
            .workout_date
            .and_then(|date| plan.daily_workouts.iter_mut().find(|d| d.date == date));

        let (minutes, estimate) = match day {
            Some(day) => {
                day.completed = true;
                let estimate: f64 = day.exercises.iter().map(|e| e.estimated_calories()).sum();
                (day.duration_minutes, estimate)
            }
            None => (0, 0.0),
        };
        let burned = calories.unwrap_or(estimate);

        let today = now.date_naive();
        let progress = &mut plan.progress;
        progress.completed_workouts += 1;
        progress.total_minutes += minutes;
        progress.calories_burned += burned;
        progress.streak_days = match progress.last_completed {
            Some(last) if last == today => progress.streak_days.max(1),
            Some(last) if last + Duration::days(1) == today => progress.streak_days + 1,
            _ => 1,
        };
        progress.last_completed = Some(today);
        plan.updated_at = now;

        session.completed_at = Some(now);
        session.calories_burned = Some(burned);

        tracing::info!(
            "Completed session {} ({} min, {:.0} kcal)",
            session_id,
            minutes,
            burned
        );
        Ok(plan.clone())
    }
}
