//! Verlet particle box
//!
//! Headless runner: fills the demo box with the fountain spawner and logs a
//! summary of the render snapshot once per simulated second.

use glam::Vec2;
use particle_physics::overlap;
use particle_simulation::{
    FrameLimit, ParticleInstance, Simulation, SimulationParams, WallClock,
};

const TICK_RATE: u32 = 60;
const DIMENSIONS: Vec2 = Vec2::new(350.0, 1000.0);
const SUBSTEPS: u32 = 12;
const MAX_PARTICLES: usize = 345;
const GRAVITY: Vec2 = Vec2::new(0.0, 1500.0);
const RUN_SECONDS: u64 = 10;

/// Logs population and extent of the snapshot every `every` frames.
struct StatsSink {
    every: u64,
    frame: u64,
}

impl StatsSink {
    fn present(&mut self, instances: &[ParticleInstance]) {
        self.frame += 1;
        if self.frame % self.every != 0 {
            return;
        }

        let highest = instances
            .iter()
            .map(|i| i.position[1] - i.radius)
            .fold(f32::INFINITY, f32::min);
        log::info!(
            "frame {:>5}: {:>3} particles, highest edge at y={:.1}",
            self.frame,
            instances.len(),
            highest
        );
    }
}

fn run() -> particle_simulation::Result<()> {
    let params = SimulationParams::new(TICK_RATE, DIMENSIONS)
        .with_substeps(SUBSTEPS)
        .with_max_particles(MAX_PARTICLES)
        .with_gravity(GRAVITY);

    let mut simulation = Simulation::new(params)?;
    let mut stats = StatsSink {
        every: TICK_RATE as u64,
        frame: 0,
    };
    let mut sink = |instances: &[ParticleInstance]| stats.present(instances);
    let mut stop = FrameLimit::new(RUN_SECONDS * TICK_RATE as u64);
    let mut clock = WallClock::paced(params.frame_duration());

    let summary = simulation.run(&mut sink, &mut stop, &mut clock)?;

    let particles = simulation.particles();
    let mut deepest = 0.0_f32;
    for (i, a) in particles.iter().enumerate() {
        for b in &particles[i + 1..] {
            deepest = deepest.max(overlap(a, b));
        }
    }

    log::info!(
        "✓ Ran {} frames, {} particles, deepest remaining overlap {:.3}",
        summary.frames,
        summary.population,
        deepest
    );
    Ok(())
}

fn main() {
    // Initialize logger (RUST_LOG=debug for verbose output)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting Verlet particle box...");

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
