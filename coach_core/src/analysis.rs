//! Metric analysis: which adaptation reasons a snapshot triggers.
//!
//! Threshold table:
//!
//! | Reason          | High            | Moderate              |
//! |-----------------|-----------------|-----------------------|
//! | low_readiness   | recovery < 40   | 40 <= recovery < 60   |
//! | poor_sleep      | sleep < 50      | 50 <= sleep < 70      |
//! | high_stress     | stress >= 8     | 6 <= stress < 8       |
//! | overtraining    | HRV < 20        | 20 <= HRV < 30        |
//!
//! Each metric can fire only its own reason. The overall severity is the
//! maximum over every fired reason and only ever escalates during a pass.

use crate::{AdaptationReason, Error, HealthMetricSnapshot, Result, Severity};
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Clone, Copy, Debug)]
enum MetricField {
    Recovery,
    Sleep,
    Stress,
    Hrv,
}

impl MetricField {
    fn value(self, m: &HealthMetricSnapshot) -> f64 {
        match self {
            MetricField::Recovery => m.recovery_score,
            MetricField::Sleep => m.sleep_score,
            MetricField::Stress => m.stress_level,
            MetricField::Hrv => m.heart_rate_variability,
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Trigger {
    /// Fires when the value drops below the bounds
    Below { high: f64, moderate: f64 },
    /// Fires when the value reaches the bounds
    AtLeast { high: f64, moderate: f64 },
}

impl Trigger {
    fn classify(self, value: f64) -> Option<Severity> {
        match self {
            Trigger::Below { high, moderate } => {
                if value < high {
                    Some(Severity::High)
                } else if value < moderate {
                    Some(Severity::Moderate)
                } else {
                    None
                }
            }
            Trigger::AtLeast { high, moderate } => {
                if value >= high {
                    Some(Severity::High)
                } else if value >= moderate {
                    Some(Severity::Moderate)
                } else {
                    None
                }
            }
        }
    }
}

struct ThresholdRule {
    reason: AdaptationReason,
    metric: MetricField,
    trigger: Trigger,
}

const THRESHOLDS: [ThresholdRule; 4] = [
    ThresholdRule {
        reason: AdaptationReason::LowReadiness,
        metric: MetricField::Recovery,
        trigger: Trigger::Below {
            high: 40.0,
            moderate: 60.0,
        },
    },
    ThresholdRule {
        reason: AdaptationReason::PoorSleep,
        metric: MetricField::Sleep,
        trigger: Trigger::Below {
            high: 50.0,
            moderate: 70.0,
        },
    },
    ThresholdRule {
        reason: AdaptationReason::HighStress,
        metric: MetricField::Stress,
        trigger: Trigger::AtLeast {
            high: 8.0,
            moderate: 6.0,
        },
    },
    ThresholdRule {
        reason: AdaptationReason::Overtraining,
        metric: MetricField::Hrv,
        trigger: Trigger::Below {
            high: 20.0,
            moderate: 30.0,
        },
    },
];

/// One fired reason with its own severity
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub reason: AdaptationReason,
    pub severity: Severity,
}

/// Result of analysing a snapshot
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MetricsAnalysis {
    pub needs_adaptation: bool,
    pub reasons: BTreeSet<AdaptationReason>,
    /// Fired reasons in threshold-table order
    pub findings: Vec<Finding>,
    /// Maximum severity across findings; `Low` when nothing fired
    pub severity: Severity,
}

impl HealthMetricSnapshot {
    /// Reject out-of-range or non-finite values
    pub fn validate(&self) -> Result<()> {
        let checks: [(&'static str, f64, f64, f64); 12] = [
            ("heart_rate", self.heart_rate, 0.0, 250.0),
            ("heart_rate_variability", self.heart_rate_variability, 0.0, 300.0),
            ("sleep_score", self.sleep_score, 0.0, 100.0),
            ("recovery_score", self.recovery_score, 0.0, 100.0),
            ("stress_level", self.stress_level, 1.0, 10.0),
            ("activity_level", self.activity_level, 0.0, 100.0),
            ("calories_consumed", self.calories_consumed, 0.0, f64::MAX),
            ("calories_burned", self.calories_burned, 0.0, f64::MAX),
            ("water_intake_ml", self.water_intake_ml, 0.0, f64::MAX),
            ("macros.protein_g", self.macros.protein_g, 0.0, f64::MAX),
            ("macros.carbs_g", self.macros.carbs_g, 0.0, f64::MAX),
            ("macros.fat_g", self.macros.fat_g, 0.0, f64::MAX),
        ];

        for (field, value, min, max) in checks {
            if !value.is_finite() || value < min || value > max {
                return Err(Error::InvalidMetric {
                    field,
                    value,
                    min,
                    max,
                });
            }
        }
        Ok(())
    }
}

/// Validate a snapshot and run it through the threshold table
pub fn analyze(metrics: &HealthMetricSnapshot) -> Result<MetricsAnalysis> {
    metrics.validate()?;

    let mut findings = Vec::new();
    let mut severity = Severity::Low;

    for rule in &THRESHOLDS {
        let value = rule.metric.value(metrics);
        if let Some(found) = rule.trigger.classify(value) {
            tracing::debug!(
                "{} fired at {:?} severity (value {})",
                rule.reason.as_str(),
                found,
                value
            );
            severity = severity.max(found);
            findings.push(Finding {
                reason: rule.reason,
                severity: found,
            });
        }
    }

    let reasons: BTreeSet<_> = findings.iter().map(|f| f.reason).collect();

    if !reasons.is_empty() {
        tracing::info!(
            "Metrics need adaptation: {:?} (severity {:?})",
            reasons,
            severity
        );
    }

    Ok(MetricsAnalysis {
        needs_adaptation: !reasons.is_empty(),
        reasons,
        findings,
        severity,
    })
}
