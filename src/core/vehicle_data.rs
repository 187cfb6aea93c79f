use crate::core::detector::DetectorId;
use crate::geometry::position::{Position, TimedPosition};
use std::fmt;

/// A point vehicle moving along a straight line implied by its last two samples.
///
/// Vehicles compare equal when their identifiers match, whatever their samples say.
#[derive(Debug, Clone)]
pub struct Vehicle {
    pub id: String,
    pub(crate) origin: TimedPosition,
    pub(crate) current: TimedPosition,
    pub(crate) detector: Option<DetectorId>,
}

impl Vehicle {
    pub fn new(id: impl Into<String>, position: Position, time: f64) -> Self {
        let sample = TimedPosition::new(position, time);
        Self::with_samples(id, sample, sample)
    }

    pub fn with_samples(id: impl Into<String>, origin: TimedPosition, current: TimedPosition) -> Self {
        Vehicle {
            id: id.into(),
            origin,
            current,
            detector: None,
        }
    }

    pub fn origin(&self) -> TimedPosition {
        self.origin
    }

    pub fn current(&self) -> TimedPosition {
        self.current
    }

    pub fn position(&self) -> Position {
        self.current.position
    }

    pub fn time(&self) -> f64 {
        self.current.time
    }

    /// Handle of the detector mounted on this vehicle, if any.
    pub fn detector(&self) -> Option<DetectorId> {
        self.detector
    }

    pub fn velocity(&self) -> Position {
        let elapsed = self.current.time - self.origin.time;
        if elapsed == 0.0 {
            return Position::ORIGIN;
        }
        (self.current.position - self.origin.position) * (1.0 / elapsed)
    }

    pub fn position_at(&self, time: f64) -> Position {
        self.current.position + self.velocity() * (time - self.current.time)
    }

    /// Records a new observed sample. The previous current sample becomes the
    /// reference one, so velocity follows the latest pair of observations.
    pub fn move_to(&mut self, position: Position, time: f64) {
        if time != self.current.time {
            self.origin = self.current;
        }
        self.current = TimedPosition::new(position, time);
    }

    /// Extrapolates along the current velocity. Both samples shift by the same
    /// amount so the velocity they imply is unchanged.
    pub fn advance_to(&mut self, time: f64) {
        let elapsed = time - self.current.time;
        let shift = self.velocity() * elapsed;
        self.origin = TimedPosition::new(self.origin.position + shift, self.origin.time + elapsed);
        self.current = TimedPosition::new(self.current.position + shift, time);
    }

    /// Time until `other` first comes within `radius` of this vehicle, measured from
    /// this vehicle's current sample time.
    ///
    /// `f64::INFINITY` when the trajectories never get that close, `0.0` while they
    /// overlap, and a negative value when the contact already happened and is over.
    pub fn impact(&self, other: &Vehicle, radius: f64) -> f64 {
        let offset = other.position_at(self.current.time) - self.current.position;
        let closing = other.velocity() - self.velocity();

        // |offset + closing * t| = radius
        let a = closing.dot(&closing);
        let b = 2.0 * offset.dot(&closing);
        let c = offset.dot(&offset) - radius * radius;

        let time = if a == 0.0 {
            if c <= 0.0 {
                0.0
            } else {
                f64::INFINITY
            }
        } else {
            let discriminant = b * b - 4.0 * a * c;
            if discriminant < 0.0 {
                f64::INFINITY
            } else {
                let root = discriminant.sqrt();
                let entry = (-b - root) / (2.0 * a);
                let exit = (-b + root) / (2.0 * a);
                if entry >= 0.0 {
                    entry
                } else if exit >= 0.0 {
                    0.0
                } else {
                    entry
                }
            }
        };

        if time.is_nan() {
            f64::INFINITY
        } else {
            time
        }
    }
}

impl PartialEq for Vehicle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Vehicle {}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{} -> {}]", self.id, self.origin, self.current)
    }
}
