//! Configuration file support for the coach.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/coach/config.toml`.

use crate::{Error, FitnessGoal, FitnessLevel, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub profile: ProfileConfig,

    #[serde(default)]
    pub planner: PlannerConfig,

    #[serde(default)]
    pub recommendations: RecommendationConfig,
}

/// Who the plans are generated for and what they own
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProfileConfig {
    #[serde(default = "default_user_id")]
    pub user_id: String,

    #[serde(default = "default_fitness_level")]
    pub fitness_level: FitnessLevel,

    #[serde(default = "default_equipment")]
    pub equipment: Vec<String>,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            user_id: default_user_id(),
            fitness_level: default_fitness_level(),
            equipment: default_equipment(),
        }
    }
}

/// Defaults for plan generation when the caller does not override them
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlannerConfig {
    #[serde(default = "default_goals")]
    pub goals: Vec<FitnessGoal>,

    #[serde(default = "default_session_minutes")]
    pub session_minutes: u32,

    #[serde(default = "default_sessions_per_week")]
    pub sessions_per_week: u32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            goals: default_goals(),
            session_minutes: default_session_minutes(),
            sessions_per_week: default_sessions_per_week(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RecommendationConfig {
    /// Readiness below this drops high-intensity recommendations
    #[serde(default = "default_readiness_gate")]
    pub readiness_gate: u8,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            readiness_gate: default_readiness_gate(),
        }
    }
}

// Default value functions
fn default_user_id() -> String {
    "local".into()
}

fn default_fitness_level() -> FitnessLevel {
    FitnessLevel::Intermediate
}

fn default_equipment() -> Vec<String> {
    vec!["yoga_mat".into(), "dumbbells".into()]
}

fn default_goals() -> Vec<FitnessGoal> {
    vec![FitnessGoal::GeneralFitness]
}

fn default_session_minutes() -> u32 {
    30
}

fn default_sessions_per_week() -> u32 {
    3
}

fn default_readiness_gate() -> u8 {
    50
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load and validate configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> Result<PathBuf> {
        let base = dirs::config_dir()
            .ok_or_else(|| Error::Config("Unable to locate a config directory".into()))?;
        Ok(base.join("coach").join("config.toml"))
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.planner.session_minutes == 0 {
            return Err(Error::Config(
                "planner.session_minutes must be greater than 0".into(),
            ));
        }
        if !(1..=7).contains(&self.planner.sessions_per_week) {
            return Err(Error::Config(format!(
                "planner.sessions_per_week must be between 1 and 7, got {}",
                self.planner.sessions_per_week
            )));
        }
        if self.recommendations.readiness_gate > 100 {
            return Err(Error::Config(format!(
                "recommendations.readiness_gate must be at most 100, got {}",
                self.recommendations.readiness_gate
            )));
        }
        Ok(())
    }
}
