//! Onboard vehicle detectors.
//!
//! Each [`Detector`] is mounted on one [`Vehicle`] and keeps the vehicles it has
//! seen. Raw sightings are merged into that set by projected position, and a step
//! orders the set by projected impact time with the mounted vehicle while telling
//! every detector it passes that this vehicle is around.

pub mod config;
pub mod constants;
pub mod core;
pub mod error;
pub mod geometry;
pub mod simulation;

pub use crate::config::{DetectorConfig, SimulationConfig, SpawnConfig};
pub use crate::core::{Detector, DetectorId, Observation, Vehicle};
pub use crate::error::{ConfigError, DetectorError};
pub use crate::geometry::{Position, TimedPosition};
pub use crate::simulation::Fleet;
