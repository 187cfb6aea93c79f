use crate::config::DetectorConfig;
use crate::constants::AUTO_ID_PREFIX;
use crate::core::collision_order::sort_by_impact;
use crate::core::selector::{CompatibleSelector, VehicleSelector};
use crate::core::vehicle_data::Vehicle;
use crate::error::DetectorError;
use crate::geometry::position::Position;
use std::fmt;
use tracing::debug;

/// Non-owning handle to a detector, used as a vehicle's link back to its mount point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DetectorId(pub(crate) usize);

impl DetectorId {
    pub fn new(index: usize) -> Self {
        DetectorId(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for DetectorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "D{}", self.0)
    }
}

/// What a raw observation did to the tracked set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Observation {
    /// An already tracked vehicle was compatible and got the new sample.
    Updated(String),
    /// Nothing matched, a new vehicle was minted under this identifier.
    Registered(String),
}

impl Observation {
    pub fn id(&self) -> &str {
        match self {
            Observation::Updated(id) | Observation::Registered(id) => id,
        }
    }
}

/// Onboard detector of a single vehicle. Owns the list of vehicles that vehicle has seen.
#[derive(Debug)]
pub struct Detector {
    id: DetectorId,
    vehicle: Vehicle,
    detected: Vec<Vehicle>,
    next_auto: usize,
    config: DetectorConfig,
}

impl Detector {
    /// Mounts a new detector on `vehicle` and links the vehicle back to it.
    pub fn mount(id: DetectorId, mut vehicle: Vehicle, config: DetectorConfig) -> Result<Self, DetectorError> {
        if let Some(detector) = vehicle.detector {
            return Err(DetectorError::AlreadyMounted {
                vehicle: vehicle.id,
                detector,
            });
        }
        vehicle.detector = Some(id);

        Ok(Detector {
            id,
            vehicle,
            detected: Vec::new(),
            next_auto: 0,
            config,
        })
    }

    pub fn id(&self) -> DetectorId {
        self.id
    }

    /// The vehicle this detector is mounted on.
    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    pub(crate) fn vehicle_mut(&mut self) -> &mut Vehicle {
        &mut self.vehicle
    }

    pub fn detected(&self) -> &[Vehicle] {
        &self.detected
    }

    pub fn len(&self) -> usize {
        self.detected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.detected.is_empty()
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn ensure_mounted(&self) -> Result<(), DetectorError> {
        if self.vehicle.detector == Some(self.id) {
            Ok(())
        } else {
            Err(DetectorError::BrokenMount {
                detector: self.id,
                vehicle: self.vehicle.id.clone(),
            })
        }
    }

    /// Looks up a tracked vehicle by identifier.
    pub fn find(&self, candidate: &Vehicle) -> Option<&Vehicle> {
        self.detected.iter().find(|v| *v == candidate)
    }

    /// Appends without checking for duplicates.
    pub fn track(&mut self, vehicle: Vehicle) {
        self.detected.push(vehicle);
    }

    pub fn select<S>(&self, selector: &S) -> Vec<&Vehicle>
    where
        S: VehicleSelector + ?Sized,
    {
        self.detected.iter().filter(|v| selector.select(v)).collect()
    }

    /// Ingests a raw `(position, time)` sighting, matching it against tracked
    /// vehicles by projected position.
    pub fn observe(&mut self, position: Position, time: f64) -> Observation {
        let selector = CompatibleSelector::new(position, time, self.config.compatibility_tolerance);
        self.observe_with(position, time, &selector)
    }

    /// Like [`Detector::observe`] with a caller supplied compatibility rule.
    /// The first compatible vehicle in tracking order wins.
    pub fn observe_with<S>(&mut self, position: Position, time: f64, selector: &S) -> Observation
    where
        S: VehicleSelector + ?Sized,
    {
        match self.detected.iter().position(|v| selector.select(v)) {
            Some(index) => {
                let vehicle = &mut self.detected[index];
                vehicle.move_to(position, time);
                debug!(detector = %self.id, vehicle = %vehicle.id, %position, time, "updated tracked vehicle");
                Observation::Updated(vehicle.id.clone())
            }
            None => {
                let id = format!("{}{}", AUTO_ID_PREFIX, self.next_auto);
                self.next_auto += 1;
                debug!(detector = %self.id, vehicle = %id, %position, time, "registered new vehicle");
                self.track(Vehicle::new(id.clone(), position, time));
                Observation::Registered(id)
            }
        }
    }

    /// Notify path for a vehicle this detector does not know yet: stored as is,
    /// no identifier minted and no compatibility check.
    pub(crate) fn register_direct(&mut self, vehicle: Vehicle) {
        debug!(detector = %self.id, vehicle = %vehicle.id, "registered by notification");
        self.track(vehicle);
    }

    /// Notify path for a vehicle this detector already knows: goes through [`Detector::observe`].
    pub(crate) fn register_observed(&mut self, position: Position, time: f64) -> Observation {
        self.observe(position, time)
    }

    /// Copies of the tracked vehicles extrapolated to `time`. Copies keep the
    /// original's detector handle.
    pub fn estimate(&self, time: f64) -> Vec<Vehicle> {
        self.detected
            .iter()
            .map(|v| {
                let mut estimate = Vehicle::with_samples(v.id.clone(), v.origin, v.current);
                estimate.advance_to(time);
                estimate.detector = v.detector;
                estimate
            })
            .collect()
    }

    /// Tracked vehicles extrapolated to `time`, ordered by projected impact with
    /// the mounted vehicle. Leaves the tracked set untouched.
    pub fn forecast(&self, time: f64) -> Vec<Vehicle> {
        sort_by_impact(&self.vehicle, self.estimate(time), self.config.impact_radius)
    }
}

impl fmt::Display for Detector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} on {} [", self.id, self.vehicle)?;
        for (i, v) in self.detected.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", v)?;
        }
        write!(f, "]")
    }
}
