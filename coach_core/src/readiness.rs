//! Readiness scoring.
//!
//! Collapses a health-metric snapshot into a single 0-100 number:
//!
//! | Component        | Weight | Normalization                 |
//! |------------------|--------|-------------------------------|
//! | Recovery score   | 0.30   | as-is                         |
//! | Sleep score      | 0.25   | as-is                         |
//! | Stress (1-10)    | 0.20   | `100 - stress * 10`, inverted |
//! | HRV (ms)         | 0.15   | `hrv * 2`, capped at 100      |
//! | Activity level   | 0.10   | capped at 100                 |
//!
//! Every component is clamped into [0, 100] before weighting. The score is
//! recomputed on every call and never cached.

use crate::HealthMetricSnapshot;

pub const RECOVERY_WEIGHT: f64 = 0.30;
pub const SLEEP_WEIGHT: f64 = 0.25;
pub const STRESS_WEIGHT: f64 = 0.20;
pub const HRV_WEIGHT: f64 = 0.15;
pub const ACTIVITY_WEIGHT: f64 = 0.10;

fn unit(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}

/// Inverted stress on a 0-100 scale (stress 1 → 90, stress 10 → 0)
pub fn normalized_stress(stress_level: f64) -> f64 {
    unit(100.0 - stress_level * 10.0)
}

pub fn normalized_hrv(hrv: f64) -> f64 {
    unit(hrv * 2.0)
}

/// Compute the readiness score for a snapshot
///
/// Pure and deterministic; always returns a value in `0..=100`, even for
/// out-of-range inputs (validate snapshots first if that matters).
pub fn readiness_score(metrics: &HealthMetricSnapshot) -> u8 {
    let weighted = unit(metrics.recovery_score) * RECOVERY_WEIGHT
        + unit(metrics.sleep_score) * SLEEP_WEIGHT
        + normalized_stress(metrics.stress_level) * STRESS_WEIGHT
        + normalized_hrv(metrics.heart_rate_variability) * HRV_WEIGHT
        + unit(metrics.activity_level) * ACTIVITY_WEIGHT;

    // NaN inputs fall through the clamp and saturate to 0 on the cast
    let score = weighted.round().clamp(0.0, 100.0) as u8;
    tracing::debug!("Readiness score computed: {}", score);
    score
}
