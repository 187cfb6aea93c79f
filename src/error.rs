use crate::core::DetectorId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DetectorError {
    /// A vehicle can carry a single detector.
    #[error("vehicle {vehicle} is already mounted on detector {detector}")]
    AlreadyMounted { vehicle: String, detector: DetectorId },
    #[error("unknown detector {0}")]
    UnknownDetector(DetectorId),
    /// The detector's mounted vehicle does not point back at it.
    #[error("detector {detector} is not linked back from its vehicle {vehicle}")]
    BrokenMount { detector: DetectorId, vehicle: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    /// Parsed fine but holds a value the simulation cannot run with.
    #[error("invalid config: {0}")]
    Invalid(String),
}
