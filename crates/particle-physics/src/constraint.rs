//! Boundary constraint for the particle box

use crate::particle::Particle;
use glam::Vec2;

/// Rectangular region `[0, width] × [0, height]` with `y` growing downward.
///
/// The top edge is open unless `closed_top` is set, so particles may leave
/// through `y < 0` and fall back in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
    pub closed_top: bool,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            closed_top: false,
        }
    }

    pub fn with_closed_top(mut self, closed_top: bool) -> Self {
        self.closed_top = closed_top;
        self
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Clamp a single particle so its circle stays inside the walls and floor.
    ///
    /// Only `position_current` is overwritten, which drops the velocity
    /// component that carried the particle through the wall.
    pub fn constrain(&self, particle: &mut Particle) {
        let r = particle.radius();
        let p = &mut particle.position_current;

        if p.y > self.height - r {
            p.y = self.height - r;
        }
        if p.x > self.width - r {
            p.x = self.width - r;
        }
        if self.closed_top && p.y < r {
            p.y = r;
        }
        if p.x < r {
            p.x = r;
        }
    }

    /// Clamp every particle.
    pub fn apply(&self, particles: &mut [Particle]) {
        for particle in particles.iter_mut() {
            self.constrain(particle);
        }
    }

    /// Whether `particle` satisfies the constraint.
    pub fn contains(&self, particle: &Particle) -> bool {
        let r = particle.radius();
        let p = particle.position_current;
        let horizontal = p.x >= r && p.x <= self.width - r;
        let vertical = p.y <= self.height - r && (!self.closed_top || p.y >= r);
        horizontal && vertical
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: f32, y: f32, r: f32) -> Particle {
        Particle::new(Vec2::new(x, y), r)
    }

    #[test]
    fn clamps_walls_and_floor() {
        let bounds = Bounds::new(350.0, 1000.0);
        let mut particles = vec![at(-10.0, 500.0, 5.0), at(400.0, 500.0, 8.0), at(100.0, 2000.0, 6.0)];
        bounds.apply(&mut particles);

        assert_eq!(particles[0].position_current.x, 5.0);
        assert_eq!(particles[1].position_current.x, 342.0);
        assert_eq!(particles[2].position_current.y, 994.0);
        assert!(particles.iter().all(|p| bounds.contains(p)));
    }

    #[test]
    fn top_is_open_by_default() {
        let bounds = Bounds::new(350.0, 1000.0);
        let mut p = at(100.0, -250.0, 5.0);
        bounds.constrain(&mut p);
        assert_eq!(p.position_current.y, -250.0);
        assert!(bounds.contains(&p));
    }

    #[test]
    fn closed_top_clamps_ceiling() {
        let bounds = Bounds::new(350.0, 1000.0).with_closed_top(true);
        let mut p = at(100.0, -250.0, 5.0);
        bounds.constrain(&mut p);
        assert_eq!(p.position_current.y, 5.0);
    }

    #[test]
    fn clamp_removes_velocity_into_wall() {
        let bounds = Bounds::new(100.0, 100.0);
        let mut p = at(94.0, 50.0, 5.0);
        p.set_velocity(Vec2::new(600.0, 0.0), 0.01);
        p.update(0.01);
        bounds.constrain(&mut p);

        assert_eq!(p.position_current.x, 95.0);
        // Only one unit of rightward travel remains in the history.
        assert!(p.velocity(0.01).x <= 100.0 + 1e-3);
    }
}
