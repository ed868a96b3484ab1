//! Adaptation generation.
//!
//! Turns analysed metrics and optional free-text feedback into adaptation
//! records. Metrics yield one adaptation per fired reason; feedback is
//! matched independently against an ordered rule table where only the first
//! matching rule fires.

use crate::analysis::analyze;
use crate::{
    Adaptation, AdaptationChange, AdaptationReason, ChangeKind, HealthMetricSnapshot, Intensity,
    Result, Severity, WorkoutPlan,
};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Illness adaptations stay in effect for a week
pub const ILLNESS_DURATION_DAYS: u32 = 7;

/// Session length targets for duration reductions
pub const SHORT_SESSION_MINUTES: u32 = 20;
pub const REDUCED_SESSION_MINUTES: u32 = 30;

/// Severity assumed for adaptations requested through feedback
const FEEDBACK_SEVERITY: Severity = Severity::Moderate;

/// A keyword rule mapping feedback text onto a reason
pub struct FeedbackRule {
    pub keywords: &'static [&'static str],
    pub reason: AdaptationReason,
}

impl FeedbackRule {
    fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| lowered.contains(k))
    }
}

/// Evaluated top to bottom; first match wins
pub const FEEDBACK_RULES: [FeedbackRule; 3] = [
    FeedbackRule {
        keywords: &["too hard", "difficult"],
        reason: AdaptationReason::LowReadiness,
    },
    FeedbackRule {
        keywords: &["too long", "no time", "enough time"],
        reason: AdaptationReason::TimeConstraint,
    },
    FeedbackRule {
        keywords: &["injury", "pain"],
        reason: AdaptationReason::Injury,
    },
];

/// Match feedback against `FEEDBACK_RULES` (case-insensitive)
pub fn match_feedback(feedback: &str) -> Option<AdaptationReason> {
    let lowered = feedback.to_lowercase();
    FEEDBACK_RULES
        .iter()
        .find(|rule| rule.matches(&lowered))
        .map(|rule| rule.reason)
}

fn current_intensity(plan: Option<&WorkoutPlan>) -> String {
    plan.and_then(|p| p.daily_workouts.first())
        .map(|d| format!("{:?}", d.intensity).to_lowercase())
        .unwrap_or_else(|| "planned".into())
}

fn current_duration(plan: Option<&WorkoutPlan>) -> String {
    plan.and_then(|p| p.daily_workouts.first())
        .map(|d| format!("{} min", d.duration_minutes))
        .unwrap_or_else(|| "planned".into())
}

/// The reason → change template table
///
/// Severity changes the target values but never the kind of change.
pub fn change_for(
    reason: AdaptationReason,
    severity: Severity,
    plan: Option<&WorkoutPlan>,
) -> AdaptationChange {
    let high = severity == Severity::High;
    let session_target = if high {
        SHORT_SESSION_MINUTES
    } else {
        REDUCED_SESSION_MINUTES
    };

    let (kind, description, original_value, new_value) = match reason {
        AdaptationReason::LowReadiness => {
            let target = if high {
                Intensity::Low
            } else {
                Intensity::Moderate
            };
            (
                ChangeKind::IntensityReduction { target },
                "Lower the intensity while recovery is low",
                current_intensity(plan),
                format!("{:?}", target).to_lowercase(),
            )
        }
        AdaptationReason::PoorSleep => (
            ChangeKind::DurationReduction {
                target_minutes: session_target,
            },
            "Shorten the session after poor sleep",
            current_duration(plan),
            format!("{} min", session_target),
        ),
        AdaptationReason::HighStress => (
            ChangeKind::ExerciseSubstitution,
            "Swap intense work for stress-relieving movement",
            "high-intensity exercises".into(),
            if high {
                "yoga and breathing work".into()
            } else {
                "low-impact cardio".into()
            },
        ),
        AdaptationReason::Overtraining => (
            ChangeKind::RestDay,
            "Take a recovery day to let heart-rate variability rebound",
            "scheduled workout".into(),
            if high {
                "complete rest".into()
            } else {
                "active recovery".into()
            },
        ),
        AdaptationReason::Injury => (
            ChangeKind::ExerciseSubstitution,
            "Replace exercises that load the injured area",
            "current exercises".into(),
            "injury-safe alternatives".into(),
        ),
        AdaptationReason::Illness => (
            ChangeKind::RestDay,
            "Rest until symptoms clear",
            "scheduled workout".into(),
            "rest".into(),
        ),
        AdaptationReason::EquipmentUnavailable => (
            ChangeKind::ExerciseSubstitution,
            "Use bodyweight alternatives for missing equipment",
            "equipment-based exercises".into(),
            "bodyweight exercises".into(),
        ),
        AdaptationReason::TimeConstraint => (
            ChangeKind::DurationReduction {
                target_minutes: session_target,
            },
            "Fit the session into the time available",
            current_duration(plan),
            format!("{} min", session_target),
        ),
    };

    AdaptationChange {
        kind,
        description: description.into(),
        original_value,
        new_value,
    }
}

/// Build a single adaptation for a reason using the template table
pub fn adaptation_for(
    reason: AdaptationReason,
    severity: Severity,
    plan: Option<&WorkoutPlan>,
    now: DateTime<Utc>,
) -> Adaptation {
    let duration_days = match reason {
        AdaptationReason::Illness => Some(ILLNESS_DURATION_DAYS),
        _ => None,
    };

    Adaptation {
        id: Uuid::new_v4(),
        reason,
        changes: vec![change_for(reason, severity, plan)],
        applied_at: now,
        duration_days,
    }
}

/// Generate adaptations for a plan from metrics and optional feedback
///
/// Metric-driven adaptations come first, in threshold-table order, followed
/// by at most one feedback-driven adaptation.
pub fn generate_adaptations(
    plan: &WorkoutPlan,
    metrics: &HealthMetricSnapshot,
    feedback: Option<&str>,
    now: DateTime<Utc>,
) -> Result<Vec<Adaptation>> {
    let analysis = analyze(metrics)?;

    let mut adaptations: Vec<Adaptation> = analysis
        .findings
        .iter()
        .map(|f| adaptation_for(f.reason, analysis.severity, Some(plan), now))
        .collect();

    if let Some(text) = feedback {
        match match_feedback(text) {
            Some(reason) => {
                tracing::info!("Feedback matched {}", reason.as_str());
                adaptations.push(adaptation_for(reason, FEEDBACK_SEVERITY, Some(plan), now));
            }
            None => tracing::debug!("Feedback matched no rule"),
        }
    }

    tracing::info!(
        "Generated {} adaptation(s) for plan {}",
        adaptations.len(),
        plan.id
    );
    Ok(adaptations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{healthy_snapshot, sample_plan, snapshot};

    #[test]
    fn test_too_hard_feedback_with_healthy_metrics() {
        let plan = sample_plan();
        let adaptations = generate_adaptations(
            &plan,
            &healthy_snapshot(),
            Some("The workout was too hard for me"),
            Utc::now(),
        )
        .unwrap();

        assert_eq!(adaptations.len(), 1);
        assert_eq!(adaptations[0].reason, AdaptationReason::LowReadiness);
        assert_eq!(adaptations[0].changes[0].kind.label(), "intensity_reduction");
    }

    #[test]
    fn test_feedback_precedence() {
        // Rule 1 beats rule 3
        assert_eq!(
            match_feedback("Too DIFFICULT and my knee is in pain"),
            Some(AdaptationReason::LowReadiness)
        );
        assert_eq!(
            match_feedback("I had no time today"),
            Some(AdaptationReason::TimeConstraint)
        );
        assert_eq!(
            match_feedback("didn't have enough time, also some pain"),
            Some(AdaptationReason::TimeConstraint)
        );
        assert_eq!(
            match_feedback("Old injury flared up"),
            Some(AdaptationReason::Injury)
        );
        assert_eq!(match_feedback("Felt great!"), None);
    }

    #[test]
    fn test_one_adaptation_per_fired_reason() {
        let plan = sample_plan();
        let metrics = snapshot(35.0, 45.0, 9.0, 15.0);
        let adaptations = generate_adaptations(&plan, &metrics, None, Utc::now()).unwrap();

        let reasons: Vec<_> = adaptations.iter().map(|a| a.reason).collect();
        assert_eq!(
            reasons,
            vec![
                AdaptationReason::LowReadiness,
                AdaptationReason::PoorSleep,
                AdaptationReason::HighStress,
                AdaptationReason::Overtraining,
            ]
        );
        assert!(adaptations.iter().all(|a| !a.changes.is_empty()));
    }

    #[test]
    fn test_severity_modulates_target_not_kind() {
        let high = change_for(AdaptationReason::PoorSleep, Severity::High, None);
        let moderate = change_for(AdaptationReason::PoorSleep, Severity::Moderate, None);

        assert_eq!(
            high.kind,
            ChangeKind::DurationReduction { target_minutes: 20 }
        );
        assert_eq!(
            moderate.kind,
            ChangeKind::DurationReduction { target_minutes: 30 }
        );
        assert_eq!(high.new_value, "20 min");
        assert_eq!(moderate.new_value, "30 min");
    }

    #[test]
    fn test_template_kinds() {
        let expected = [
            (AdaptationReason::LowReadiness, "intensity_reduction"),
            (AdaptationReason::PoorSleep, "duration_reduction"),
            (AdaptationReason::HighStress, "exercise_substitution"),
            (AdaptationReason::Overtraining, "rest_day"),
            (AdaptationReason::Injury, "exercise_substitution"),
            (AdaptationReason::Illness, "rest_day"),
            (AdaptationReason::EquipmentUnavailable, "exercise_substitution"),
            (AdaptationReason::TimeConstraint, "duration_reduction"),
        ];
        for (reason, kind) in expected {
            for severity in [Severity::Moderate, Severity::High] {
                assert_eq!(change_for(reason, severity, None).kind.label(), kind);
            }
        }
    }

    #[test]
    fn test_illness_persists_for_a_week() {
        let illness = adaptation_for(AdaptationReason::Illness, Severity::High, None, Utc::now());
        assert_eq!(illness.duration_days, Some(7));

        let sleep = adaptation_for(AdaptationReason::PoorSleep, Severity::High, None, Utc::now());
        assert_eq!(sleep.duration_days, None);
    }

    #[test]
    fn test_original_values_come_from_plan() {
        let plan = sample_plan();
        let change = change_for(AdaptationReason::TimeConstraint, Severity::High, Some(&plan));
        assert_eq!(change.original_value, "40 min");

        let change = change_for(AdaptationReason::LowReadiness, Severity::High, Some(&plan));
        assert_eq!(change.original_value, "high");
        assert_eq!(change.new_value, "low");
    }

    #[test]
    fn test_invalid_metrics_are_rejected() {
        let plan = sample_plan();
        let mut metrics = healthy_snapshot();
        metrics.sleep_score = 140.0;
        assert!(generate_adaptations(&plan, &metrics, None, Utc::now()).is_err());
    }
}
