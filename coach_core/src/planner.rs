//! Workout plan generation.
//!
//! ## Selection rules
//!
//! 1. **Eligibility**: an exercise qualifies if the caller owns all of its
//!    equipment, its difficulty is allowed for the fitness level (advanced
//!    work only for advanced users) and it fits in one session.
//!
//! 2. **Goal order**: goals are visited in input order. Each goal lists its
//!    preferred categories; for every category the first unselected eligible
//!    exercise that still fits the remaining minutes is taken.
//!
//! 3. **No backtracking**: once picked, an exercise stays picked even if a
//!    later goal would have used the time better.

use crate::{
    Catalog, DailyWorkout, Difficulty, Error, Exercise, ExerciseCategory, FitnessGoal,
    FitnessLevel, GoalTarget, Intensity, Priority, ProgressMetrics, Result, WeeklyGoal,
    WorkoutPlan,
};
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

/// Everything needed to generate a plan
#[derive(Clone, Debug)]
pub struct PlanRequest {
    pub user_id: String,
    pub goals: Vec<FitnessGoal>,
    pub equipment: Vec<String>,
    pub fitness_level: FitnessLevel,
    pub session_minutes: u32,
    pub sessions_per_week: u32,
}

/// Preferred exercise categories per goal, highest priority first
pub fn preferred_categories(goal: FitnessGoal) -> &'static [ExerciseCategory] {
    use ExerciseCategory::*;
    match goal {
        FitnessGoal::WeightLoss => &[Cardio, Hiit],
        FitnessGoal::MuscleGain => &[Strength],
        FitnessGoal::Flexibility => &[Yoga, Flexibility],
        FitnessGoal::GeneralFitness => &[Cardio, Strength, Hiit],
        FitnessGoal::Endurance => &[Cardio],
    }
}

fn goal_label(goal: FitnessGoal) -> &'static str {
    match goal {
        FitnessGoal::WeightLoss => "Weight Loss",
        FitnessGoal::MuscleGain => "Muscle Gain",
        FitnessGoal::Flexibility => "Flexibility",
        FitnessGoal::GeneralFitness => "General Fitness",
        FitnessGoal::Endurance => "Endurance",
    }
}

fn intensity_for(level: FitnessLevel) -> Intensity {
    match level {
        Difficulty::Beginner => Intensity::Low,
        Difficulty::Intermediate => Intensity::Moderate,
        Difficulty::Advanced => Intensity::High,
    }
}

/// True if `exercise` may appear in a plan built for `request`
pub fn is_eligible(exercise: &Exercise, request: &PlanRequest) -> bool {
    let difficulty_ok = exercise.difficulty != Difficulty::Advanced
        || request.fitness_level == Difficulty::Advanced;

    exercise.fits_equipment(&request.equipment)
        && difficulty_ok
        && exercise.duration_minutes <= request.session_minutes
}

/// Pick one session's exercises, first-fit per goal and category
pub fn select_exercises(catalog: &Catalog, request: &PlanRequest) -> Vec<Exercise> {
    let eligible: Vec<&Exercise> = catalog
        .exercises
        .iter()
        .filter(|e| is_eligible(e, request))
        .collect();

    tracing::debug!("{} of {} exercises eligible", eligible.len(), catalog.exercises.len());

    let mut selected: Vec<Exercise> = Vec::new();
    let mut remaining = request.session_minutes;

    for goal in &request.goals {
        for category in preferred_categories(*goal) {
            let pick = eligible.iter().find(|e| {
                e.category == *category
                    && e.duration_minutes <= remaining
                    && !selected.iter().any(|s| s.id == e.id)
            });

            match pick {
                Some(exercise) => {
                    tracing::debug!(
                        "{:?}/{:?}: picked {} ({} min)",
                        goal,
                        category,
                        exercise.id,
                        exercise.duration_minutes
                    );
                    remaining -= exercise.duration_minutes;
                    selected.push((*exercise).clone());
                }
                None => tracing::debug!("{:?}/{:?}: nothing fits", goal, category),
            }
        }
    }

    selected
}

/// Generate a plan for the coming week
pub fn generate_plan(
    catalog: &Catalog,
    request: &PlanRequest,
    now: DateTime<Utc>,
) -> Result<WorkoutPlan> {
    if request.session_minutes == 0 {
        return Err(Error::InvalidInput(
            "session minutes must be greater than 0".into(),
        ));
    }
    if !(1..=7).contains(&request.sessions_per_week) {
        return Err(Error::InvalidInput(format!(
            "sessions per week must be between 1 and 7, got {}",
            request.sessions_per_week
        )));
    }

    let exercises = select_exercises(catalog, request);
    if exercises.is_empty() {
        tracing::warn!("No eligible exercises for goals {:?}", request.goals);
    }

    let session_minutes: u32 = exercises.iter().map(|e| e.duration_minutes).sum();
    let session_calories: f64 = exercises.iter().map(Exercise::estimated_calories).sum();
    let intensity = intensity_for(request.fitness_level);
    let start = now.date_naive();

    let daily_workouts = (0..request.sessions_per_week)
        .map(|i| DailyWorkout {
            date: start + Duration::days(i64::from(i * 7 / request.sessions_per_week)),
            exercises: exercises.clone(),
            duration_minutes: session_minutes,
            intensity,
            completed: false,
            adapted_for: None,
            notes: None,
        })
        .collect();

    let weekly_goals = request
        .goals
        .iter()
        .enumerate()
        .map(|(i, goal)| WeeklyGoal {
            goal: *goal,
            target: match goal {
                FitnessGoal::WeightLoss => GoalTarget::Calories(
                    (session_calories * f64::from(request.sessions_per_week)).round() as u32,
                ),
                _ => GoalTarget::Sessions(request.sessions_per_week),
            },
            deadline: start + Duration::days(7),
            priority: match i {
                0 => Priority::High,
                1 => Priority::Medium,
                _ => Priority::Low,
            },
        })
        .collect();

    let name = if request.goals.is_empty() {
        "Custom Plan".to_string()
    } else {
        let labels: Vec<_> = request.goals.iter().map(|g| goal_label(*g)).collect();
        format!("{} Plan", labels.join(" & "))
    };

    let plan = WorkoutPlan {
        id: Uuid::new_v4(),
        user_id: request.user_id.clone(),
        name,
        description: format!(
            "{} sessions per week, up to {} minutes each, {:?} level",
            request.sessions_per_week, request.session_minutes, request.fitness_level
        ),
        weekly_goals,
        daily_workouts,
        adaptations: Vec::new(),
        progress: ProgressMetrics::default(),
        created_at: now,
        updated_at: now,
        active: true,
    };

    tracing::info!(
        "Generated plan '{}' with {} exercise(s) per session",
        plan.name,
        exercises.len()
    );
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_default_catalog;

    fn request(goals: Vec<FitnessGoal>, equipment: &[&str], minutes: u32) -> PlanRequest {
        PlanRequest {
            user_id: "tester".into(),
            goals,
            equipment: equipment.iter().map(|s| s.to_string()).collect(),
            fitness_level: FitnessLevel::Intermediate,
            session_minutes: minutes,
            sessions_per_week: 3,
        }
    }

    #[test]
    fn test_weight_loss_bodyweight_twenty_minutes() {
        let catalog = build_default_catalog();
        let req = request(vec![FitnessGoal::WeightLoss], &["none"], 20);

        let plan = generate_plan(&catalog, &req, Utc::now()).unwrap();
        let day = &plan.daily_workouts[0];

        let ids: Vec<_> = day.exercises.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["jumping_jacks", "mountain_climbers"]);
        assert!(day.exercises.iter().all(|e| e.duration_minutes <= 20));
        assert!(day.exercises.iter().all(|e| e.equipment.is_empty()));
        assert_eq!(day.duration_minutes, 20);
    }

    #[test]
    fn test_every_exercise_respects_constraints() {
        let catalog = build_default_catalog();
        let all_goals = vec![
            FitnessGoal::GeneralFitness,
            FitnessGoal::MuscleGain,
            FitnessGoal::Flexibility,
            FitnessGoal::WeightLoss,
            FitnessGoal::Endurance,
        ];

        for equipment in [&["none"][..], &["dumbbells"], &["yoga_mat", "kettlebell"]] {
            for minutes in [5, 10, 20, 45, 90] {
                let req = request(all_goals.clone(), equipment, minutes);
                let plan = generate_plan(&catalog, &req, Utc::now()).unwrap();
                for day in &plan.daily_workouts {
                    assert!(day.duration_minutes <= minutes);
                    for e in &day.exercises {
                        assert!(e.fits_equipment(&req.equipment));
                        assert!(e.duration_minutes <= minutes);
                        assert_ne!(e.difficulty, Difficulty::Advanced);
                    }
                }
            }
        }
    }

    #[test]
    fn test_advanced_exercises_need_advanced_level() {
        let catalog = build_default_catalog();
        let mut req = request(vec![FitnessGoal::WeightLoss], &["kettlebell"], 60);
        let tabata = catalog.get("tabata_sprints").unwrap();

        assert!(!is_eligible(tabata, &req));
        req.fitness_level = FitnessLevel::Advanced;
        assert!(is_eligible(tabata, &req));
    }

    #[test]
    fn test_one_exercise_per_category_per_goal() {
        let catalog = build_default_catalog();
        let req = request(vec![FitnessGoal::MuscleGain], &["dumbbells"], 120);

        let picked = select_exercises(&catalog, &req);
        assert_eq!(picked.len(), 1);
        assert_eq!(picked[0].id, "bodyweight_squats");
    }

    #[test]
    fn test_repeated_goal_picks_next_exercise() {
        let catalog = build_default_catalog();
        let req = request(
            vec![FitnessGoal::MuscleGain, FitnessGoal::MuscleGain],
            &[],
            60,
        );

        let ids: Vec<_> = select_exercises(&catalog, &req)
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec!["bodyweight_squats", "push_ups"]);
    }

    #[test]
    fn test_weekly_goals_targets() {
        let catalog = build_default_catalog();
        let req = request(
            vec![FitnessGoal::WeightLoss, FitnessGoal::Flexibility],
            &["none"],
            20,
        );
        let plan = generate_plan(&catalog, &req, Utc::now()).unwrap();

        // (10 * 8.0 + 10 * 10.0) kcal per session, three sessions
        assert_eq!(plan.weekly_goals[0].target, GoalTarget::Calories(540));
        assert_eq!(plan.weekly_goals[0].priority, Priority::High);
        assert_eq!(plan.weekly_goals[1].target, GoalTarget::Sessions(3));
        assert_eq!(plan.weekly_goals[1].priority, Priority::Medium);
        assert_eq!(plan.name, "Weight Loss & Flexibility Plan");
    }

    #[test]
    fn test_sessions_spread_over_week() {
        let catalog = build_default_catalog();
        let now = Utc::now();
        let req = request(vec![FitnessGoal::Endurance], &[], 30);
        let plan = generate_plan(&catalog, &req, now).unwrap();

        let offsets: Vec<_> = plan
            .daily_workouts
            .iter()
            .map(|d| (d.date - now.date_naive()).num_days())
            .collect();
        assert_eq!(offsets, vec![0, 2, 4]);
    }

    #[test]
    fn test_no_eligible_exercises_gives_empty_sessions() {
        let catalog = build_default_catalog();
        let req = request(vec![FitnessGoal::Flexibility], &[], 5);

        let plan = generate_plan(&catalog, &req, Utc::now()).unwrap();
        assert!(plan.daily_workouts.iter().all(|d| d.exercises.is_empty()));
        assert!(plan.daily_workouts.iter().all(|d| d.duration_minutes == 0));
    }

    #[test]
    fn test_rejects_invalid_schedule() {
        let catalog = build_default_catalog();
        let mut req = request(vec![FitnessGoal::WeightLoss], &[], 0);
        assert!(matches!(
            generate_plan(&catalog, &req, Utc::now()),
            Err(Error::InvalidInput(_))
        ));

        req.session_minutes = 30;
        req.sessions_per_week = 9;
        assert!(matches!(
            generate_plan(&catalog, &req, Utc::now()),
            Err(Error::InvalidInput(_))
        ));
    }
}
