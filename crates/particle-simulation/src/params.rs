//! Simulation parameters, validated once before the run loop starts

use crate::error::{Error, Result};
use glam::Vec2;
use particle_physics::{
    Bounds, CoincidentPolicy, CollisionSolver, CORRECTION_FACTOR, DIMENSIONS, GRAVITY,
    LAUNCH_VELOCITY, MAX_PARTICLES, MIN_SPAWN_RADIUS, RADIUS_CYCLE, SPAWN_INTERVAL_MS, SUBSTEPS,
    TICK_RATE,
};
use std::time::Duration;

/// Fountain spawner settings
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnParams {
    /// Minimum wall-clock time between spawns
    pub interval: Duration,
    /// Spawn point; `None` means `(width / 2, height / 1.2)`
    pub point: Option<Vec2>,
    /// Initial velocity of every spawned particle (units/s)
    pub launch_velocity: Vec2,
    /// Radius of particle 0, 20, 40, ...
    pub min_radius: f32,
    /// Radius is `population % radius_cycle + min_radius`
    pub radius_cycle: usize,
    /// Seed for particle colours
    pub seed: u64,
}

impl Default for SpawnParams {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(SPAWN_INTERVAL_MS),
            point: None,
            launch_velocity: Vec2::from_array(LAUNCH_VELOCITY),
            min_radius: MIN_SPAWN_RADIUS,
            radius_cycle: RADIUS_CYCLE,
            seed: 0,
        }
    }
}

impl SpawnParams {
    /// Largest radius the fountain can hand out
    pub fn max_radius(&self) -> f32 {
        self.min_radius + self.radius_cycle.saturating_sub(1) as f32
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationParams {
    /// Frames per second
    pub tick_rate: u32,
    /// Box width and height
    pub dimensions: Vec2,
    /// Physics sub-steps per frame
    pub substep_count: u32,
    /// Constant acceleration given to every particle
    pub gravity: Vec2,
    /// Population ceiling
    pub max_particles: usize,
    /// Fraction of overlap removed per pair per sub-step, in `(0, 1]`
    pub correction_factor: f32,
    pub coincident: CoincidentPolicy,
    /// Clamp particles below `y = radius` as well
    pub closed_top: bool,
    pub spawn: SpawnParams,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            tick_rate: TICK_RATE,
            dimensions: Vec2::from_array(DIMENSIONS),
            substep_count: SUBSTEPS,
            gravity: Vec2::from_array(GRAVITY),
            max_particles: MAX_PARTICLES,
            correction_factor: CORRECTION_FACTOR,
            coincident: CoincidentPolicy::default(),
            closed_top: false,
            spawn: SpawnParams::default(),
        }
    }
}

impl SimulationParams {
    pub fn new(tick_rate: u32, dimensions: Vec2) -> Self {
        Self {
            tick_rate,
            dimensions,
            ..Self::default()
        }
    }

    pub fn with_substeps(mut self, substep_count: u32) -> Self {
        self.substep_count = substep_count;
        self
    }

    pub fn with_gravity(mut self, gravity: Vec2) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_max_particles(mut self, max_particles: usize) -> Self {
        self.max_particles = max_particles;
        self
    }

    pub fn with_correction_factor(mut self, correction_factor: f32) -> Self {
        self.correction_factor = correction_factor;
        self
    }

    pub fn with_coincident_policy(mut self, coincident: CoincidentPolicy) -> Self {
        self.coincident = coincident;
        self
    }

    pub fn with_closed_top(mut self, closed_top: bool) -> Self {
        self.closed_top = closed_top;
        self
    }

    pub fn with_spawn(mut self, spawn: SpawnParams) -> Self {
        self.spawn = spawn;
        self
    }

    /// Seconds per rendered frame
    pub fn frame_time(&self) -> f32 {
        1.0 / self.tick_rate as f32
    }

    /// Seconds per physics sub-step
    pub fn substep_time(&self) -> f32 {
        self.frame_time() / self.substep_count as f32
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f32(self.frame_time())
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.dimensions.x, self.dimensions.y).with_closed_top(self.closed_top)
    }

    pub fn solver(&self) -> CollisionSolver {
        CollisionSolver::new(self.correction_factor, self.coincident)
    }

    pub fn spawn_point(&self) -> Vec2 {
        self.spawn
            .point
            .unwrap_or_else(|| Vec2::new(self.dimensions.x / 2.0, self.dimensions.y / 1.2))
    }

    /// Reject parameters the kernel cannot step with.
    pub fn validate(&self) -> Result<()> {
        if self.tick_rate == 0 {
            return Err(Error::InvalidParam("tick_rate must be > 0".into()));
        }
        if self.substep_count == 0 {
            return Err(Error::InvalidParam("substep_count must be > 0".into()));
        }
        if !self.dimensions.is_finite() || self.dimensions.x <= 0.0 || self.dimensions.y <= 0.0 {
            return Err(Error::InvalidParam(format!(
                "dimensions must be finite and > 0, got {:?}",
                self.dimensions
            )));
        }
        if !self.gravity.is_finite() {
            return Err(Error::InvalidParam("gravity must be finite".into()));
        }
        if self.max_particles == 0 {
            return Err(Error::InvalidParam("max_particles must be > 0".into()));
        }
        if !(self.correction_factor > 0.0 && self.correction_factor <= 1.0) {
            return Err(Error::InvalidParam(format!(
                "correction_factor must be in (0, 1], got {}",
                self.correction_factor
            )));
        }

        let spawn = &self.spawn;
        if spawn.radius_cycle == 0 {
            return Err(Error::InvalidParam("spawn radius_cycle must be > 0".into()));
        }
        if !spawn.min_radius.is_finite() || spawn.min_radius <= 0.0 {
            return Err(Error::InvalidParam("spawn min_radius must be finite and > 0".into()));
        }
        if 2.0 * spawn.max_radius() > self.dimensions.x {
            return Err(Error::InvalidParam(format!(
                "spawn radius up to {} does not fit a box {} wide",
                spawn.max_radius(),
                self.dimensions.x
            )));
        }
        if !spawn.launch_velocity.is_finite() || !self.spawn_point().is_finite() {
            return Err(Error::InvalidParam("spawn point and velocity must be finite".into()));
        }

        Ok(())
    }
}
