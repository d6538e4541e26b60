//! Population growth policy
//!
//! Growth is append-only: a policy proposes at most one particle per frame and
//! the simulation decides whether the ceiling and timer allow it.

use crate::params::{SimulationParams, SpawnParams};
use glam::Vec2;
use particle_physics::Bounds;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

/// A particle the simulation is asked to create
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnRequest {
    pub position: Vec2,
    /// Initial velocity (units/s)
    pub velocity: Vec2,
    pub radius: f32,
    /// RGBA, cosmetic only
    pub color: [u8; 4],
}

impl SpawnRequest {
    pub fn new(position: Vec2, radius: f32) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            radius,
            color: [255, 255, 255, 255],
        }
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_color(mut self, color: [u8; 4]) -> Self {
        self.color = color;
        self
    }
}

/// Decides what the next spawned particle looks like.
pub trait SpawnPolicy {
    /// Propose a particle given the current population size.
    ///
    /// Returning `None` skips this spawn slot without resetting the timer.
    fn next(&mut self, population: usize, bounds: &Bounds) -> Option<SpawnRequest>;
}

impl<F> SpawnPolicy for F
where
    F: FnMut(usize, &Bounds) -> Option<SpawnRequest>,
{
    fn next(&mut self, population: usize, bounds: &Bounds) -> Option<SpawnRequest> {
        self(population, bounds)
    }
}

/// Launches particles from a fixed point with cycling radii and random blue-ish colours
pub struct Fountain {
    point: Vec2,
    velocity: Vec2,
    min_radius: f32,
    radius_cycle: usize,
    rng: StdRng,
}

impl Fountain {
    pub fn new(point: Vec2, spawn: &SpawnParams) -> Self {
        Self {
            point,
            velocity: spawn.launch_velocity,
            min_radius: spawn.min_radius,
            radius_cycle: spawn.radius_cycle.max(1),
            rng: StdRng::seed_from_u64(spawn.seed),
        }
    }

    pub fn from_params(params: &SimulationParams) -> Self {
        Self::new(params.spawn_point(), &params.spawn)
    }

    /// Radius handed to the particle created at `population`
    pub fn radius_for(&self, population: usize) -> f32 {
        (population % self.radius_cycle) as f32 + self.min_radius
    }
}

impl SpawnPolicy for Fountain {
    fn next(&mut self, population: usize, _bounds: &Bounds) -> Option<SpawnRequest> {
        let color: [u8; 4] = [
            self.rng.random_range(0..255),
            self.rng.random_range(50..100),
            200,
            255,
        ];
        Some(
            SpawnRequest::new(self.point, self.radius_for(population))
                .with_velocity(self.velocity)
                .with_color(color),
        )
    }
}

/// Accumulates frame time and fires once more than `interval` has passed.
#[derive(Clone, Copy, Debug)]
pub struct SpawnTimer {
    interval: Duration,
    elapsed: Duration,
}

impl SpawnTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            elapsed: Duration::ZERO,
        }
    }

    pub fn advance(&mut self, elapsed: Duration) {
        self.elapsed += elapsed;
    }

    pub fn ready(&self) -> bool {
        self.elapsed > self.interval
    }

    pub fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}
