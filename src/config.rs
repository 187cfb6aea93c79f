use crate::constants::*;
use crate::error::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Tuning shared by every detector in a fleet.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    pub compatibility_tolerance: f64,
    pub impact_radius: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        DetectorConfig {
            compatibility_tolerance: COMPATIBILITY_TOLERANCE,
            impact_radius: IMPACT_RADIUS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub vehicles: usize,
    /// Side of the square area vehicles start in.
    pub arena_size: f64,
    pub max_speed: f64,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        SpawnConfig {
            vehicles: VEHICLE_COUNT,
            arena_size: ARENA_SIZE,
            max_speed: MAX_SPEED,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub detector: DetectorConfig,
    pub spawn: SpawnConfig,
    pub sensor_range: f64,
    pub ticks: u32,
    pub dt: f64,
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            detector: DetectorConfig::default(),
            spawn: SpawnConfig::default(),
            sensor_range: SENSOR_RANGE,
            ticks: TICKS,
            dt: TICK_DURATION,
            seed: DEFAULT_SEED,
        }
    }
}

impl SimulationConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values that would make spawning or sensing meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_negative = [
            ("spawn.arena_size", self.spawn.arena_size),
            ("spawn.max_speed", self.spawn.max_speed),
            ("sensor_range", self.sensor_range),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!("{} must be a finite non-negative number, got {}", name, value)));
            }
        }
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}
