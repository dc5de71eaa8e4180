//! Quiz settings and preferences
//!
//! Persisted as JSON next to the game, separate from any save data.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_ANSWER_DEADLINE_SECS, MAX_GENERATION_ATTEMPTS, MAX_LIVES, MAX_WEAPON_LEVEL, SIM_HZ,
};
use crate::error::ConfigError;
use crate::quiz::{GradeLevel, ResourceCaps};

/// Quiz settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Difficulty tier for new questions
    pub grade: GradeLevel,

    // === Session ===
    /// Seconds before an unanswered question times out as incorrect
    pub answer_deadline_secs: u32,
    /// Redraws a constrained generator may make before falling back
    pub max_generation_attempts: u32,

    // === Reward caps ===
    pub max_weapon_level: u8,
    pub max_lives: u8,

    /// Fixed RNG seed (random per run when absent)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grade: GradeLevel::ONE,
            answer_deadline_secs: DEFAULT_ANSWER_DEADLINE_SECS,
            max_generation_attempts: MAX_GENERATION_ATTEMPTS,
            max_weapon_level: MAX_WEAPON_LEVEL,
            max_lives: MAX_LIVES,
            seed: None,
        }
    }
}

impl Settings {
    /// Parse settings; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Answer deadline in simulation ticks (at least one)
    pub fn deadline_ticks(&self) -> u32 {
        self.answer_deadline_secs.saturating_mul(SIM_HZ).max(1)
    }

    pub fn caps(&self) -> ResourceCaps {
        ResourceCaps {
            max_weapon_level: self.max_weapon_level,
            max_lives: self.max_lives,
        }
    }

    /// Load settings from disk, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::read(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(err) => {
                log::info!("Using default settings ({err})");
                Self::default()
            }
        }
    }

    /// Read settings from disk, reporting why it failed
    pub fn read(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        fs::write(path.as_ref(), self.to_json()?)?;
        log::info!("Settings saved");
        Ok(())
    }
}
