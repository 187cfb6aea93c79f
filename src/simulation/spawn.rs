use crate::config::SpawnConfig;
use crate::core::Vehicle;
use crate::geometry::position::{Position, TimedPosition};
use rand::Rng;

/// Random vehicles `V0..Vn` inside the arena, each with a constant random velocity.
/// Their current sample is at time 0, the reference sample one unit earlier.
pub fn spawn_vehicles<R: Rng>(config: &SpawnConfig, rng: &mut R) -> Vec<Vehicle> {
    (0..config.vehicles)
        .map(|n| {
            let start = Position::new(
                rng.gen_range(0.0..=config.arena_size),
                rng.gen_range(0.0..=config.arena_size),
            );
            let velocity = Position::new(
                rng.gen_range(-config.max_speed..=config.max_speed),
                rng.gen_range(-config.max_speed..=config.max_speed),
            );
            Vehicle::with_samples(
                format!("V{}", n),
                TimedPosition::new(start - velocity, -1.0),
                TimedPosition::new(start, 0.0),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn spawns_inside_the_arena() {
        let config = SpawnConfig {
            vehicles: 20,
            arena_size: 50.0,
            max_speed: 2.0,
        };
        let vehicles = spawn_vehicles(&config, &mut StdRng::seed_from_u64(1));
        assert_eq!(vehicles.len(), 20);
        assert_eq!(vehicles[3].id, "V3");
        for v in &vehicles {
            let p = v.position();
            assert!((0.0..=50.0).contains(&p.x) && (0.0..=50.0).contains(&p.y));
            assert!(v.velocity().x.abs() <= 2.0 + 1e-9);
            assert!(v.velocity().y.abs() <= 2.0 + 1e-9);
            assert!(v.detector().is_none());
        }
    }

    #[test]
    fn same_seed_same_vehicles() {
        let config = SpawnConfig::default();
        let a = spawn_vehicles(&config, &mut StdRng::seed_from_u64(42));
        let b = spawn_vehicles(&config, &mut StdRng::seed_from_u64(42));
        let positions = |vs: &[Vehicle]| vs.iter().map(|v| v.current()).collect::<Vec<_>>();
        assert_eq!(positions(&a), positions(&b));
    }
}
