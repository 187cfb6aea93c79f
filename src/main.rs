use anyhow::Context;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use vehicle_detector::simulation::{spawn_vehicles, Fleet};
use vehicle_detector::SimulationConfig;

/// Headless run of a fleet of detector-equipped vehicles.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON simulation config, defaults are used for anything missing
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    vehicles: Option<usize>,
    #[arg(long)]
    ticks: Option<u32>,
    #[arg(long)]
    seed: Option<u64>,
    /// Simulated time between ticks
    #[arg(long)]
    dt: Option<f64>,
}

impl Args {
    fn into_config(self) -> anyhow::Result<SimulationConfig> {
        let mut config = match &self.config {
            Some(path) => SimulationConfig::load(path)
                .with_context(|| format!("loading config from {}", path.display()))?,
            None => SimulationConfig::default(),
        };
        if let Some(vehicles) = self.vehicles {
            config.spawn.vehicles = vehicles;
        }
        if let Some(ticks) = self.ticks {
            config.ticks = ticks;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(dt) = self.dt {
            config.dt = dt;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Args::parse().into_config()?;
    info!(?config, "starting simulation");

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut fleet = Fleet::new(config.detector);
    for vehicle in spawn_vehicles(&config.spawn, &mut rng) {
        fleet.mount(vehicle)?;
    }
    let introductions = fleet.introduce_within(config.sensor_range)?;
    info!(detectors = fleet.len(), introductions, "fleet ready");

    for tick in 1..=config.ticks {
        let time = f64::from(tick) * config.dt;
        for (id, order) in fleet.tick(time, config.sensor_range)? {
            let ids: Vec<&str> = order.iter().map(|v| v.id.as_str()).collect();
            info!(tick, detector = %id, order = ?ids, "collision order");
        }
    }

    fleet.statistics().log_summary();
    Ok(())
}
