//! JSON documents exchanged with external collaborators.
//!
//! Health snapshots come from the device integration and plans from whatever
//! stores them. Both are required inputs, so unlike optional signals a
//! missing or malformed file is an error.

use crate::{HealthMetricSnapshot, Result, WorkoutPlan};
use std::path::Path;

/// Load a health-metric snapshot from a JSON file
pub fn load_snapshot(path: &Path) -> Result<HealthMetricSnapshot> {
    let contents = std::fs::read_to_string(path)?;
    let snapshot: HealthMetricSnapshot = serde_json::from_str(&contents)?;
    tracing::debug!(
        "Loaded snapshot captured at {} from {:?}",
        snapshot.captured_at,
        path
    );
    Ok(snapshot)
}

/// Load a workout plan from a JSON file
pub fn load_plan(path: &Path) -> Result<WorkoutPlan> {
    let contents = std::fs::read_to_string(path)?;
    let plan: WorkoutPlan = serde_json::from_str(&contents)?;
    tracing::debug!("Loaded plan {} ('{}') from {:?}", plan.id, plan.name, path);
    Ok(plan)
}

/// Write a workout plan as pretty JSON
pub fn save_plan(plan: &WorkoutPlan, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let contents = serde_json::to_string_pretty(plan)?;
    std::fs::write(path, contents)?;
    tracing::info!("Wrote plan {} to {:?}", plan.id, path);
    Ok(())
}
