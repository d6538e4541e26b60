//! CPU particle simulation driver
//!
//! Each frame runs the spawn policy once, then `substep_count` sub-steps of
//! integrate -> constrain -> resolve, then refreshes the render snapshot.
//! Nothing is ever removed, so particle indices are stable for the lifetime
//! of the simulation.

use crate::error::{Error, Result};
use crate::frontend::{Clock, ParticleInstance, RenderSink, StopSignal};
use crate::params::SimulationParams;
use crate::spawn::{Fountain, SpawnPolicy, SpawnRequest, SpawnTimer};
use particle_physics::{integrate, Bounds, CollisionSolver, ContactStats, Particle};
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimulationState {
    Idle,
    Running,
    Stopped,
}

/// What happened during one frame
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub spawned: bool,
    /// Summed over all sub-steps
    pub contacts: ContactStats,
}

/// Returned by [`Simulation::run`] once the stop signal fires
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    pub population: usize,
}

pub struct Simulation {
    params: SimulationParams,
    bounds: Bounds,
    solver: CollisionSolver,

    particles: Vec<Particle>,
    colors: Vec<[u8; 4]>,
    instances: Vec<ParticleInstance>,

    spawner: Box<dyn SpawnPolicy>,
    spawn_timer: SpawnTimer,

    state: SimulationState,
    frame_count: u64,
    ceiling_reported: bool,
}

impl Simulation {
    /// Validate `params` and build an idle simulation with the fountain spawner.
    pub fn new(params: SimulationParams) -> Result<Self> {
        params.validate()?;

        log::info!(
            "Simulation {}x{} @ {} Hz, {} substeps, up to {} particles",
            params.dimensions.x,
            params.dimensions.y,
            params.tick_rate,
            params.substep_count,
            params.max_particles
        );

        Ok(Self {
            bounds: params.bounds(),
            solver: params.solver(),
            particles: Vec::with_capacity(params.max_particles),
            colors: Vec::with_capacity(params.max_particles),
            instances: Vec::with_capacity(params.max_particles),
            spawner: Box::new(Fountain::from_params(&params)),
            spawn_timer: SpawnTimer::new(params.spawn.interval),
            state: SimulationState::Idle,
            frame_count: 0,
            ceiling_reported: false,
            params,
        })
    }

    /// Replace the fountain with another growth policy.
    pub fn with_spawn_policy(mut self, policy: impl SpawnPolicy + 'static) -> Self {
        self.spawner = Box::new(policy);
        self
    }

    pub fn state(&self) -> SimulationState {
        self.state
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Snapshot from the end of the last frame (plus any particles spawned since).
    pub fn instances(&self) -> &[ParticleInstance] {
        &self.instances
    }

    pub fn population(&self) -> usize {
        self.particles.len()
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn start(&mut self) -> Result<()> {
        match self.state {
            SimulationState::Idle => {
                log::info!("Simulation running");
                self.state = SimulationState::Running;
                Ok(())
            }
            SimulationState::Running => Ok(()),
            SimulationState::Stopped => Err(Error::InvalidState {
                state: self.state,
                action: "start",
            }),
        }
    }

    /// Stop permanently. Stopping twice is a no-op.
    pub fn stop(&mut self) {
        if self.state != SimulationState::Stopped {
            log::info!(
                "Simulation stopped after {} frames with {} particles",
                self.frame_count,
                self.particles.len()
            );
            self.state = SimulationState::Stopped;
        }
    }

    /// Add a particle on request of the outside world.
    ///
    /// Returns the new particle's index.
    pub fn spawn(&mut self, request: SpawnRequest) -> Result<usize> {
        if self.state == SimulationState::Stopped {
            return Err(Error::InvalidState {
                state: self.state,
                action: "spawn",
            });
        }
        self.insert(request)
    }

    fn insert(&mut self, request: SpawnRequest) -> Result<usize> {
        if self.particles.len() >= self.params.max_particles {
            return Err(Error::PopulationFull {
                max: self.params.max_particles,
            });
        }
        if !request.radius.is_finite() || request.radius <= 0.0 {
            return Err(Error::InvalidParam(format!(
                "particle radius must be finite and > 0, got {}",
                request.radius
            )));
        }
        if !request.position.is_finite() || !request.velocity.is_finite() {
            return Err(Error::InvalidParam(
                "particle position and velocity must be finite".into(),
            ));
        }

        let mut particle =
            Particle::new(request.position, request.radius).with_acceleration(self.params.gravity);
        particle.set_velocity(request.velocity, self.params.substep_time());

        let index = self.particles.len();
        self.particles.push(particle);
        self.colors.push(request.color);
        self.instances.push(instance(&particle, request.color));

        log::trace!(
            "Spawned particle {} (r={}) at {:?}",
            index,
            request.radius,
            request.position
        );

        Ok(index)
    }

    /// Run one frame: spawn step, all sub-steps, snapshot refresh.
    ///
    /// `elapsed` is the wall time since the previous frame and only gates spawning.
    pub fn frame(&mut self, elapsed: Duration) -> Result<FrameStats> {
        if self.state != SimulationState::Running {
            return Err(Error::InvalidState {
                state: self.state,
                action: "step a frame",
            });
        }

        let mut stats = FrameStats {
            spawned: self.spawn_step(elapsed),
            ..FrameStats::default()
        };

        for _ in 0..self.params.substep_count {
            stats.contacts.merge(self.substep());
        }

        if stats.contacts.coincident > 0 {
            log::warn!(
                "Frame {}: {} pairs with coincident centres",
                self.frame_count,
                stats.contacts.coincident
            );
        }

        self.refresh_instances();
        self.frame_count += 1;

        Ok(stats)
    }

    fn spawn_step(&mut self, elapsed: Duration) -> bool {
        self.spawn_timer.advance(elapsed);

        if self.particles.len() >= self.params.max_particles {
            if !self.ceiling_reported {
                log::info!("Population ceiling of {} reached", self.params.max_particles);
                self.ceiling_reported = true;
            }
            return false;
        }
        if !self.spawn_timer.ready() {
            return false;
        }

        let Some(request) = self.spawner.next(self.particles.len(), &self.bounds) else {
            return false;
        };

        match self.insert(request) {
            Ok(_) => {
                self.spawn_timer.reset();
                true
            }
            Err(e) => {
                log::warn!("Spawn policy produced a rejected particle: {}", e);
                false
            }
        }
    }

    /// One physics sub-step over the whole population.
    pub fn substep(&mut self) -> ContactStats {
        integrate(&mut self.particles, self.params.substep_time());
        self.bounds.apply(&mut self.particles);
        self.solver.resolve(&mut self.particles)
    }

    fn refresh_instances(&mut self) {
        self.instances.clear();
        self.instances.extend(
            self.particles
                .iter()
                .zip(&self.colors)
                .map(|(p, &color)| instance(p, color)),
        );
    }

    /// Drive frames until `stop` fires, presenting each frame to `sink`.
    pub fn run(
        &mut self,
        sink: &mut impl RenderSink,
        stop: &mut impl StopSignal,
        clock: &mut impl Clock,
    ) -> Result<RunSummary> {
        self.start()?;
        let first_frame = self.frame_count;

        loop {
            if stop.stop_requested() {
                self.stop();
                break;
            }

            let elapsed = clock.tick();
            self.frame(elapsed)?;
            sink.present(&self.instances);
        }

        Ok(RunSummary {
            frames: self.frame_count - first_frame,
            population: self.particles.len(),
        })
    }
}

fn instance(particle: &Particle, color: [u8; 4]) -> ParticleInstance {
    ParticleInstance {
        position: particle.position_current.to_array(),
        radius: particle.radius(),
        color,
    }
}
