//! Circular particle with Verlet position history

use glam::Vec2;

/// A circular body integrated with position Verlet.
///
/// Velocity is never stored; it is implied by the difference between the
/// current and previous positions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    /// Position at the previous sub-step
    pub position_previous: Vec2,
    /// Position at the current sub-step
    pub position_current: Vec2,
    /// Constant acceleration applied every update
    pub acceleration: Vec2,
    radius: f32,
}

impl Particle {
    /// Create a particle at rest at `position`.
    ///
    /// `radius` must be positive; callers validate it before construction.
    pub fn new(position: Vec2, radius: f32) -> Self {
        debug_assert!(radius > 0.0, "particle radius must be positive");
        Self {
            position_previous: position,
            position_current: position,
            acceleration: Vec2::ZERO,
            radius,
        }
    }

    /// Builder-style acceleration setter
    pub fn with_acceleration(mut self, acceleration: Vec2) -> Self {
        self.acceleration = acceleration;
        self
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn position(&self) -> Vec2 {
        self.position_current
    }

    /// Give the particle velocity `v`, assuming the next update uses step `dt`.
    ///
    /// Only meaningful before the first update.
    pub fn set_velocity(&mut self, v: Vec2, dt: f32) {
        self.position_previous = self.position_current - v * dt;
    }

    /// Velocity implied by the position history for step `dt`.
    pub fn velocity(&self, dt: f32) -> Vec2 {
        (self.position_current - self.position_previous) / dt
    }

    /// Advance one Verlet step.
    pub fn update(&mut self, dt: f32) {
        let displacement = self.position_current - self.position_previous;
        self.position_previous = self.position_current;
        self.position_current += displacement + self.acceleration * (dt * dt);
    }
}

/// Advance every particle by one sub-step.
pub fn integrate(particles: &mut [Particle], dt: f32) {
    for particle in particles.iter_mut() {
        particle.update(dt);
    }
}
