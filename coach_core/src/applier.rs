//! Applying adaptations to a workout plan.
//!
//! Changes are applied in list order, so a later change may overwrite an
//! earlier change's effect on the same field. The caller's plan is never
//! touched; a new plan value is returned.

use crate::adaptation::SHORT_SESSION_MINUTES;
use crate::{Adaptation, AdaptationChange, ChangeKind, DailyWorkout, Intensity, WorkoutPlan};
use chrono::{DateTime, Utc};

/// Scale applied when the duration target is a short session
pub const SHORT_SESSION_FACTOR: f64 = 0.5;
/// Scale applied for every other duration target
pub const REDUCED_SESSION_FACTOR: f64 = 0.75;

fn duration_factor(target_minutes: u32) -> f64 {
    if target_minutes <= SHORT_SESSION_MINUTES {
        SHORT_SESSION_FACTOR
    } else {
        REDUCED_SESSION_FACTOR
    }
}

fn apply_change(day: &mut DailyWorkout, adaptation: &Adaptation, change: &AdaptationChange) {
    match &change.kind {
        ChangeKind::IntensityReduction { target } => {
            // A reduction never raises a day above its current intensity
            day.intensity = day.intensity.min(*target);
        }
        ChangeKind::DurationReduction { target_minutes } => {
            let scaled = f64::from(day.duration_minutes) * duration_factor(*target_minutes);
            day.duration_minutes = scaled.round() as u32;
        }
        ChangeKind::ExerciseSubstitution => {
            // Picking the replacement exercises is left to the substitution resolver
            day.adapted_for = Some(adaptation.reason);
        }
        ChangeKind::RestDay => {
            day.exercises.clear();
            day.duration_minutes = 0;
            day.intensity = Intensity::Low;
            day.adapted_for = Some(adaptation.reason);
            day.notes = Some(format!("Rest day: {}", change.description));
        }
    }
}

/// Apply adaptations to a copy of `plan`
///
/// The adaptations are appended to the plan's history and `updated_at` is
/// set to `now`.
pub fn apply_adaptations(
    plan: &WorkoutPlan,
    adaptations: &[Adaptation],
    now: DateTime<Utc>,
) -> WorkoutPlan {
    let mut adapted = plan.clone();

    for adaptation in adaptations {
        for change in &adaptation.changes {
            tracing::debug!(
                "Applying {} for {}",
                change.kind.label(),
                adaptation.reason.as_str()
            );
            for day in &mut adapted.daily_workouts {
                apply_change(day, adaptation, change);
            }
        }
    }

    adapted.adaptations.extend_from_slice(adaptations);
    adapted.updated_at = now;
    adapted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adaptation::adaptation_for;
    use crate::test_support::sample_plan;
    use crate::{AdaptationReason, Severity};
    use chrono::Duration;

    #[test]
    fn test_empty_adaptations_only_touch_timestamp() {
        let plan = sample_plan();
        let later = plan.updated_at + Duration::minutes(5);

        let mut adapted = apply_adaptations(&plan, &[], later);
        assert_eq!(adapted.updated_at, later);

        adapted.updated_at = plan.updated_at;
        assert_eq!(adapted, plan);
    }

    #[test]
    fn test_original_plan_is_untouched() {
        let plan = sample_plan();
        let snapshot = plan.clone();
        let rest = adaptation_for(AdaptationReason::Overtraining, Severity::High, None, Utc::now());

        let adapted = apply_adaptations(&plan, &[rest], Utc::now());

        assert_eq!(plan, snapshot);
        assert_ne!(adapted.daily_workouts, plan.daily_workouts);
    }

    #[test]
    fn test_rest_day_clears_every_workout() {
        let plan = sample_plan();
        let rest = adaptation_for(AdaptationReason::Illness, Severity::Moderate, None, Utc::now());

        let adapted = apply_adaptations(&plan, &[rest], Utc::now());

        for day in &adapted.daily_workouts {
            assert!(day.exercises.is_empty());
            assert_eq!(day.duration_minutes, 0);
            assert_eq!(day.intensity, Intensity::Low);
            assert_eq!(day.adapted_for, Some(AdaptationReason::Illness));
            assert!(day.notes.as_deref().unwrap().starts_with("Rest day"));
        }
        assert_eq!(adapted.adaptations.len(), 1);
    }

    #[test]
    fn test_intensity_reduction_never_raises() {
        let mut plan = sample_plan();
        plan.daily_workouts[1].intensity = Intensity::Low;
        let reduce =
            adaptation_for(AdaptationReason::LowReadiness, Severity::Moderate, None, Utc::now());

        let adapted = apply_adaptations(&plan, &[reduce], Utc::now());

        assert_eq!(adapted.daily_workouts[0].intensity, Intensity::Moderate);
        assert_eq!(adapted.daily_workouts[1].intensity, Intensity::Low);
    }

    #[test]
    fn test_duration_reduction_factors() {
        let plan = sample_plan();

        let short = adaptation_for(AdaptationReason::PoorSleep, Severity::High, None, Utc::now());
        let adapted = apply_adaptations(&plan, &[short], Utc::now());
        assert_eq!(adapted.daily_workouts[0].duration_minutes, 20); // 40 * 0.5
        assert_eq!(adapted.daily_workouts[1].duration_minutes, 13); // 25 * 0.5 = 12.5

        let moderate =
            adaptation_for(AdaptationReason::PoorSleep, Severity::Moderate, None, Utc::now());
        let adapted = apply_adaptations(&plan, &[moderate], Utc::now());
        assert_eq!(adapted.daily_workouts[0].duration_minutes, 30); // 40 * 0.75
        assert_eq!(adapted.daily_workouts[1].duration_minutes, 19); // 25 * 0.75 = 18.75
    }

    #[test]
    fn test_intensity_reduction_sets_target() {
        let plan = sample_plan();
        let lower =
            adaptation_for(AdaptationReason::LowReadiness, Severity::Moderate, None, Utc::now());

        let adapted = apply_adaptations(&plan, &[lower], Utc::now());
        assert!(adapted
            .daily_workouts
            .iter()
            .all(|d| d.intensity == Intensity::Moderate));
    }

    #[test]
    fn test_substitution_only_tags_workouts() {
        let plan = sample_plan();
        let swap = adaptation_for(AdaptationReason::Injury, Severity::Moderate, None, Utc::now());

        let adapted = apply_adaptations(&plan, &[swap], Utc::now());
        for (before, after) in plan.daily_workouts.iter().zip(&adapted.daily_workouts) {
            assert_eq!(before.exercises, after.exercises);
            assert_eq!(after.adapted_for, Some(AdaptationReason::Injury));
        }
    }

    #[test]
    fn test_later_changes_win() {
        let plan = sample_plan();
        let now = Utc::now();
        let rest = adaptation_for(AdaptationReason::Overtraining, Severity::High, None, now);
        let swap = adaptation_for(AdaptationReason::Injury, Severity::Moderate, None, now);
        let lower = adaptation_for(AdaptationReason::LowReadiness, Severity::Moderate, None, now);

        let adapted = apply_adaptations(&plan, &[rest, swap, lower], now);
        let day = &adapted.daily_workouts[0];
        assert_eq!(day.duration_minutes, 0);
        assert_eq!(day.adapted_for, Some(AdaptationReason::Injury));
        // The moderate reduction does not lift the rest day back up
        assert_eq!(day.intensity, Intensity::Low);
        assert_eq!(adapted.adaptations.len(), 3);
    }
}
