//! Fixtures shared by the unit tests.

use crate::{
    build_default_catalog, DailyWorkout, HealthMetricSnapshot, Intensity, MacroBreakdown,
    ProgressMetrics, WorkoutPlan,
};
use chrono::{Duration, TimeZone, Utc};
use uuid::Uuid;

/// Snapshot with the four analysed metrics set and neutral everything else
pub fn snapshot(recovery: f64, sleep: f64, stress: f64, hrv: f64) -> HealthMetricSnapshot {
    HealthMetricSnapshot {
        heart_rate: 60.0,
        heart_rate_variability: hrv,
        sleep_score: sleep,
        recovery_score: recovery,
        stress_level: stress,
        activity_level: 50.0,
        calories_consumed: 2100.0,
        calories_burned: 450.0,
        water_intake_ml: 2000.0,
        macros: MacroBreakdown {
            protein_g: 120.0,
            carbs_g: 230.0,
            fat_g: 70.0,
        },
        captured_at: Utc.with_ymd_and_hms(2024, 3, 4, 7, 0, 0).unwrap(),
    }
}

pub fn healthy_snapshot() -> HealthMetricSnapshot {
    snapshot(80.0, 85.0, 3.0, 50.0)
}

/// Two-day plan: 40 min then 25 min, both high intensity
pub fn sample_plan() -> WorkoutPlan {
    let catalog = build_default_catalog();
    let created = Utc.with_ymd_and_hms(2024, 3, 4, 6, 0, 0).unwrap();
    let start = created.date_naive();

    WorkoutPlan {
        id: Uuid::new_v4(),
        user_id: "tester".into(),
        name: "Sample Plan".into(),
        description: "Fixture plan".into(),
        weekly_goals: Vec::new(),
        daily_workouts: vec![
            DailyWorkout {
                date: start,
                exercises: catalog.pick(&["running_intervals", "bodyweight_squats"]),
                duration_minutes: 40,
                intensity: Intensity::High,
                completed: false,
                adapted_for: None,
                notes: None,
            },
            DailyWorkout {
                date: start + Duration::days(2),
                exercises: catalog.pick(&["burpee_intervals", "push_ups"]),
                duration_minutes: 25,
                intensity: Intensity::High,
                completed: false,
                adapted_for: None,
                notes: None,
            },
        ],
        adaptations: Vec::new(),
        progress: ProgressMetrics::default(),
        created_at: created,
        updated_at: created,
        active: true,
    }
}
