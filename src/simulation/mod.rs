pub mod fleet;
pub mod spawn;
pub mod statistics;

pub use fleet::Fleet;
pub use spawn::spawn_vehicles;
pub use statistics::Statistics;
