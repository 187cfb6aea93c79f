use crate::config::DetectorConfig;
use crate::core::{Detector, DetectorId, Observation, Vehicle};
use crate::error::DetectorError;
use crate::geometry::position::Position;
use crate::simulation::statistics::Statistics;
use tracing::{debug, info, warn};

/// Owns every mounted detector. Vehicles refer back to their detector through a
/// [`DetectorId`] indexing into this registry.
///
/// Every mutating call takes `&mut self`, so tracked sets are never modified by
/// two steps at once.
#[derive(Debug)]
pub struct Fleet {
    detectors: Vec<Detector>,
    config: DetectorConfig,
    statistics: Statistics,
}

impl Fleet {
    pub fn new(config: DetectorConfig) -> Self {
        Fleet {
            detectors: Vec::new(),
            config,
            statistics: Statistics::new(),
        }
    }

    pub fn mount(&mut self, vehicle: Vehicle) -> Result<DetectorId, DetectorError> {
        if let Some(existing) = self.detectors.iter().find(|d| *d.vehicle() == vehicle) {
            return Err(DetectorError::AlreadyMounted {
                vehicle: vehicle.id,
                detector: existing.id(),
            });
        }

        let id = DetectorId(self.detectors.len());
        let detector = Detector::mount(id, vehicle, self.config)?;
        debug!(detector = %id, vehicle = %detector.vehicle().id, "mounted detector");
        self.detectors.push(detector);
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.detectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.detectors.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = DetectorId> + '_ {
        self.detectors.iter().map(Detector::id)
    }

    pub fn detectors(&self) -> &[Detector] {
        &self.detectors
    }

    pub fn detector(&self, id: DetectorId) -> Result<&Detector, DetectorError> {
        self.detectors
            .get(id.index())
            .ok_or(DetectorError::UnknownDetector(id))
    }

    pub fn detector_mut(&mut self, id: DetectorId) -> Result<&mut Detector, DetectorError> {
        self.detectors
            .get_mut(id.index())
            .ok_or(DetectorError::UnknownDetector(id))
    }

    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    pub fn observe(&mut self, id: DetectorId, position: Position, time: f64) -> Result<Observation, DetectorError> {
        let observation = self.detector_mut(id)?.observe(position, time);
        self.statistics.record_observation(&observation);
        Ok(observation)
    }

    pub fn track(&mut self, id: DetectorId, vehicle: Vehicle) -> Result<(), DetectorError> {
        self.detector_mut(id)?.track(vehicle);
        Ok(())
    }

    /// `observer` starts tracking the vehicle `target` is mounted on.
    pub fn introduce(&mut self, observer: DetectorId, target: DetectorId) -> Result<(), DetectorError> {
        let vehicle = self.detector(target)?.vehicle().clone();
        self.track(observer, vehicle)
    }

    /// Introduces every pair of mounted vehicles closer than `range`, both ways.
    pub fn introduce_within(&mut self, range: f64) -> Result<usize, DetectorError> {
        let pairs = self.pairs_within(range);
        for &(observer, target) in &pairs {
            self.introduce(observer, target)?;
        }
        Ok(pairs.len())
    }

    /// Moves a mounted vehicle along its current velocity.
    pub fn advance(&mut self, id: DetectorId, time: f64) -> Result<(), DetectorError> {
        self.detector_mut(id)?.vehicle_mut().advance_to(time);
        Ok(())
    }

    /// Feeds every detector a raw sighting of each other mounted vehicle within `range`.
    pub fn sense(&mut self, time: f64, range: f64) -> usize {
        let sightings: Vec<(DetectorId, Position)> = self
            .pairs_within(range)
            .into_iter()
            .map(|(observer, target)| (observer, self.detectors[target.index()].vehicle().position()))
            .collect();

        for &(observer, position) in &sightings {
            let observation = self.detectors[observer.index()].observe(position, time);
            self.statistics.record_observation(&observation);
        }
        sightings.len()
    }

    /// One simulation tick for detector `id`: forecast its tracked vehicles at
    /// `time`, then make each of their detectors aware of this detector's vehicle.
    ///
    /// Detectors to notify are validated before anything is touched, so a broken
    /// link aborts the step without partial updates. The stepping detector's own
    /// tracked set is only modified if it tracks its own vehicle.
    pub fn step(&mut self, id: DetectorId, time: f64) -> Result<Vec<Vehicle>, DetectorError> {
        let detector = self.detector(id)?;
        let observer = detector.vehicle().clone();
        let forecast = detector.forecast(time);

        let mut targets = Vec::with_capacity(forecast.len());
        for estimate in &forecast {
            if let Some(target) = estimate.detector() {
                self.detector(target)?.ensure_mounted()?;
            }
            targets.push(estimate.detector());
        }

        for (estimate, target) in forecast.iter().zip(targets) {
            let Some(target) = target else {
                debug!(detector = %id, vehicle = %estimate.id, "no detector to notify");
                self.statistics.skipped_notifications += 1;
                continue;
            };
            if target == id {
                warn!(detector = %id, vehicle = %observer.id, "detector notifies itself");
                self.statistics.self_notifications += 1;
            }

            let detector = &mut self.detectors[target.index()];
            if detector.find(&observer).is_some() {
                let observation = detector.register_observed(observer.position(), time);
                self.statistics.observed_notifications += 1;
                self.statistics.record_observation(&observation);
            } else {
                detector.register_direct(observer.clone());
                self.statistics.direct_notifications += 1;
            }
        }

        self.statistics.steps += 1;
        Ok(forecast)
    }

    /// Advances every mounted vehicle to `time`, senses, then steps every detector
    /// in mount order. Returns each detector's collision order.
    pub fn tick(&mut self, time: f64, range: f64) -> Result<Vec<(DetectorId, Vec<Vehicle>)>, DetectorError> {
        for detector in &mut self.detectors {
            detector.vehicle_mut().advance_to(time);
        }
        let sightings = self.sense(time, range);

        let ids: Vec<DetectorId> = self.ids().collect();
        let mut orders = Vec::with_capacity(ids.len());
        for id in ids {
            orders.push((id, self.step(id, time)?));
        }

        info!(time, sightings, detectors = orders.len(), "tick complete");
        Ok(orders)
    }

    fn pairs_within(&self, range: f64) -> Vec<(DetectorId, DetectorId)> {
        let mut pairs = Vec::new();
        for observer in &self.detectors {
            for target in &self.detectors {
                if observer.id() == target.id() {
                    continue;
                }
                let distance = observer.vehicle().position().distance_to(&target.vehicle().position());
                if distance <= range {
                    pairs.push((observer.id(), target.id()));
                }
            }
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::position::TimedPosition;

    fn fleet_of_two() -> (Fleet, DetectorId, DetectorId) {
        let mut fleet = Fleet::new(DetectorConfig::default());
        let d1 = fleet.mount(Vehicle::new("V1", Position::ORIGIN, 0.0)).unwrap();
        let d2 = fleet.mount(Vehicle::new("V2", Position::new(10.0, 0.0), 0.0)).unwrap();
        (fleet, d1, d2)
    }

    #[test]
    fn mount_hands_out_sequential_ids() {
        let (fleet, d1, d2) = fleet_of_two();
        assert_eq!((d1.index(), d2.index()), (0, 1));
        assert_eq!(fleet.len(), 2);
        assert_eq!(fleet.detector(d2).unwrap().vehicle().detector(), Some(d2));
    }

    #[test]
    fn mounting_the_same_vehicle_twice_fails() {
        let (mut fleet, d1, _) = fleet_of_two();
        let err = fleet.mount(Vehicle::new("V1", Position::ORIGIN, 0.0)).unwrap_err();
        assert!(matches!(err, DetectorError::AlreadyMounted { detector, .. } if detector == d1));
    }

    #[test]
    fn unknown_detector() {
        let (mut fleet, _, _) = fleet_of_two();
        let missing = DetectorId(7);
        assert!(matches!(fleet.step(missing, 1.0), Err(DetectorError::UnknownDetector(id)) if id == missing));
        assert!(fleet.observe(missing, Position::ORIGIN, 0.0).is_err());
    }

    #[test]
    fn step_registers_directly_when_unknown() {
        let (mut fleet, d1, d2) = fleet_of_two();
        fleet.introduce(d1, d2).unwrap();

        let order = fleet.step(d1, 1.0).unwrap();
        assert_eq!(order.len(), 1);
        assert_eq!(order[0].id, "V2");

        let d2_view = fleet.detector(d2).unwrap();
        assert_eq!(d2_view.len(), 1);
        assert_eq!(d2_view.detected()[0].id, "V1");
        assert_eq!(d2_view.detected()[0].detector(), Some(d1));
        assert_eq!(fleet.statistics().direct_notifications, 1);
    }

    #[test]
    fn step_observes_when_already_known() {
        let (mut fleet, d1, d2) = fleet_of_two();
        fleet.introduce(d1, d2).unwrap();
        fleet.introduce(d2, d1).unwrap();
        fleet.advance(d1, 0.0).unwrap();

        fleet.step(d1, 1.0).unwrap();

        let d2_view = fleet.detector(d2).unwrap();
        assert_eq!(d2_view.len(), 1);
        assert_eq!(d2_view.detected()[0].current(), TimedPosition::new(Position::ORIGIN, 1.0));
        assert_eq!(fleet.statistics().observed_notifications, 1);
        assert_eq!(fleet.statistics().updates, 1);
    }

    #[test]
    fn step_leaves_own_tracked_set_alone() {
        let (mut fleet, d1, d2) = fleet_of_two();
        fleet.introduce(d1, d2).unwrap();
        fleet.observe(d1, Position::new(-20.0, 0.0), 0.0).unwrap();
        let before: Vec<TimedPosition> = fleet.detector(d1).unwrap().detected().iter().map(|v| v.current()).collect();

        let order = fleet.step(d1, 3.0).unwrap();

        let after: Vec<TimedPosition> = fleet.detector(d1).unwrap().detected().iter().map(|v| v.current()).collect();
        assert_eq!(before, after);
        assert_eq!(order.len(), 2);
        assert!(order.iter().all(|v| v.time() == 3.0));
        assert_eq!(fleet.statistics().skipped_notifications, 1);
    }

    #[test]
    fn broken_link_aborts_without_partial_commit() {
        let (mut fleet, d1, d2) = fleet_of_two();
        let d3 = fleet.mount(Vehicle::new("V3", Position::new(0.0, 10.0), 0.0)).unwrap();
        fleet.introduce(d1, d2).unwrap();
        fleet.introduce(d1, d3).unwrap();
        fleet.detector_mut(d3).unwrap().vehicle_mut().detector = None;

        let err = fleet.step(d1, 1.0).unwrap_err();
        assert!(matches!(err, DetectorError::BrokenMount { detector, .. } if detector == d3));
        assert!(fleet.detector(d2).unwrap().is_empty());
        assert_eq!(fleet.statistics().steps, 0);
    }

    #[test]
    fn self_notification_is_allowed() {
        let (mut fleet, d1, _) = fleet_of_two();
        fleet.introduce(d1, d1).unwrap();

        fleet.step(d1, 1.0).unwrap();

        // V1 was already tracked by its own detector, so the notification observed it
        let d1_view = fleet.detector(d1).unwrap();
        assert_eq!(d1_view.len(), 1);
        assert_eq!(d1_view.detected()[0].id, "V1");
        assert_eq!(fleet.statistics().self_notifications, 1);
    }

    #[test]
    fn sense_and_introduce_respect_range() {
        let (mut fleet, d1, d2) = fleet_of_two();
        fleet.mount(Vehicle::new("far", Position::new(500.0, 0.0), 0.0)).unwrap();

        assert_eq!(fleet.introduce_within(20.0).unwrap(), 2);
        assert_eq!(fleet.sense(0.0, 20.0), 2);

        // the sightings matched the introduced vehicles
        assert_eq!(fleet.detector(d1).unwrap().len(), 1);
        assert_eq!(fleet.detector(d2).unwrap().len(), 1);
        assert_eq!(fleet.statistics().updates, 2);
        assert_eq!(fleet.statistics().auto_registered, 0);
    }

    #[test]
    fn tick_moves_everything_forward() {
        let mut fleet = Fleet::new(DetectorConfig::default());
        let a = fleet
            .mount(Vehicle::with_samples(
                "A",
                TimedPosition::new(Position::new(-1.0, 0.0), -1.0),
                TimedPosition::new(Position::ORIGIN, 0.0),
            ))
            .unwrap();
        let b = fleet.mount(Vehicle::new("B", Position::new(10.0, 0.0), 0.0)).unwrap();
        fleet.introduce_within(50.0).unwrap();

        let orders = fleet.tick(2.0, 50.0).unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(fleet.detector(a).unwrap().vehicle().position(), Position::new(2.0, 0.0));
        assert_eq!(orders[1].0, b);
        assert_eq!(orders[1].1[0].id, "A");
        assert_eq!(fleet.statistics().steps, 2);
    }
}
