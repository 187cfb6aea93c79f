use crate::core::Observation;
use tracing::info;

/// Running counters over a fleet's observations and notifications.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Statistics {
    pub steps: u64,
    pub updates: u64,
    pub auto_registered: u64,
    pub observed_notifications: u64,
    pub direct_notifications: u64,
    /// Tracked vehicles without a detector of their own.
    pub skipped_notifications: u64,
    pub self_notifications: u64,
}

impl Statistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_observation(&mut self, observation: &Observation) {
        match observation {
            Observation::Updated(_) => self.updates += 1,
            Observation::Registered(_) => self.auto_registered += 1,
        }
    }

    pub fn notifications(&self) -> u64 {
        self.observed_notifications + self.direct_notifications
    }

    pub fn log_summary(&self) {
        info!(
            steps = self.steps,
            updates = self.updates,
            auto_registered = self.auto_registered,
            notifications = self.notifications(),
            observed = self.observed_notifications,
            direct = self.direct_notifications,
            skipped = self.skipped_notifications,
            self_notified = self.self_notifications,
            "simulation statistics"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observations_are_split_by_outcome() {
        let mut stats = Statistics::new();
        stats.record_observation(&Observation::Registered("AUTO0".into()));
        stats.record_observation(&Observation::Updated("AUTO0".into()));
        stats.record_observation(&Observation::Updated("AUTO0".into()));
        stats.direct_notifications = 2;
        stats.observed_notifications = 1;
        assert_eq!(stats.auto_registered, 1);
        assert_eq!(stats.updates, 2);
        assert_eq!(stats.notifications(), 3);
    }
}
