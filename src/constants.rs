/// Prefix for identifiers minted by a detector for vehicles it only knows from raw observations.
pub const AUTO_ID_PREFIX: &str = "AUTO";

/// Maximum gap between a tracked vehicle's projected position and a new observation
/// for both to be considered the same physical object.
pub const COMPATIBILITY_TOLERANCE: f64 = 2.0;
/// Two vehicles closer than this are considered in contact.
pub const IMPACT_RADIUS: f64 = 1.0;

pub const SENSOR_RANGE: f64 = 40.0;
pub const ARENA_SIZE: f64 = 100.0;
pub const MAX_SPEED: f64 = 5.0;
pub const VEHICLE_COUNT: usize = 6;
pub const TICKS: u32 = 10;
pub const TICK_DURATION: f64 = 1.0;
pub const DEFAULT_SEED: u64 = 7;
