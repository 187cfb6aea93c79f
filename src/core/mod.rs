pub mod collision_order;
pub mod detector;
pub mod selector;
pub mod vehicle_data;

pub use collision_order::{impact_order, sort_by_impact, ImpactOrder};
pub use detector::{Detector, DetectorId, Observation};
pub use selector::{CompatibleSelector, VehicleSelector};
pub use vehicle_data::Vehicle;
