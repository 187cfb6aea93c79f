use crate::core::vehicle_data::Vehicle;
use crate::geometry::position::Position;

/// Filter over a detector's tracked vehicles. Implementations must be side-effect free.
pub trait VehicleSelector {
    fn select(&self, vehicle: &Vehicle) -> bool;
}

impl<F> VehicleSelector for F
where
    F: Fn(&Vehicle) -> bool,
{
    fn select(&self, vehicle: &Vehicle) -> bool {
        self(vehicle)
    }
}

/// Matches tracked vehicles that could plausibly be at `position` at `time`
/// given their last known trajectory.
#[derive(Debug, Clone, Copy)]
pub struct CompatibleSelector {
    pub position: Position,
    pub time: f64,
    pub tolerance: f64,
}

impl CompatibleSelector {
    pub fn new(position: Position, time: f64, tolerance: f64) -> Self {
        CompatibleSelector {
            position,
            time,
            tolerance,
        }
    }
}

impl VehicleSelector for CompatibleSelector {
    fn select(&self, vehicle: &Vehicle) -> bool {
        vehicle.position_at(self.time).distance_to(&self.position) <= self.tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::position::TimedPosition;

    #[test]
    fn compatible_uses_projected_position() {
        let v = Vehicle::with_samples(
            "a",
            TimedPosition::new(Position::new(0.0, 0.0), 0.0),
            TimedPosition::new(Position::new(1.0, 0.0), 1.0),
        );
        assert!(CompatibleSelector::new(Position::new(5.0, 0.0), 5.0, 0.5).select(&v));
        assert!(CompatibleSelector::new(Position::new(5.0, 1.5), 5.0, 2.0).select(&v));
        assert!(!CompatibleSelector::new(Position::new(1.0, 0.0), 5.0, 0.5).select(&v));
    }

    #[test]
    fn closures_are_selectors() {
        let v = Vehicle::new("AUTO3", Position::ORIGIN, 0.0);
        let auto = |v: &Vehicle| v.id.starts_with("AUTO");
        assert!(auto.select(&v));
    }
}
