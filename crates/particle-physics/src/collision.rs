//! Pairwise overlap resolution
//!
//! Overlapping circles are pushed apart along the line between their centres.
//! Only a fraction of the overlap (the correction factor) is removed per
//! pass, and each body moves by `own_radius / (r_a + r_b)` of the
//! correction. This is position correction, not an impulse solver: momentum
//! and energy are not conserved.

use crate::constants::CORRECTION_FACTOR;
use crate::particle::Particle;
use glam::Vec2;

/// What to do with a pair whose centres coincide exactly.
///
/// The separation direction is undefined there, so the pair either keeps its
/// overlap for this pass or is pushed apart along the x axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CoincidentPolicy {
    /// Leave the pair untouched for this pass.
    Skip,
    /// Separate along +x: the lower-indexed particle moves right.
    #[default]
    Nudge,
}

/// Counters from one resolution pass
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ContactStats {
    /// Overlapping pairs that were corrected
    pub resolved: usize,
    /// Pairs whose centres coincided exactly
    pub coincident: usize,
}

impl ContactStats {
    pub fn merge(&mut self, other: ContactStats) {
        self.resolved += other.resolved;
        self.coincident += other.coincident;
    }
}

/// O(n²) position-correction solver
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CollisionSolver {
    pub correction_factor: f32,
    pub coincident: CoincidentPolicy,
}

impl Default for CollisionSolver {
    fn default() -> Self {
        Self {
            correction_factor: CORRECTION_FACTOR,
            coincident: CoincidentPolicy::default(),
        }
    }
}

/// Outcome of checking a single pair
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PairOutcome {
    Separate,
    Resolved,
    Coincident { nudged: bool },
}

impl CollisionSolver {
    pub fn new(correction_factor: f32, coincident: CoincidentPolicy) -> Self {
        Self {
            correction_factor,
            coincident,
        }
    }

    /// Correct one pair in place. `a` plays the role of the lower index.
    pub fn resolve_pair(&self, a: &mut Particle, b: &mut Particle) -> PairOutcome {
        let d = a.position_current - b.position_current;
        let dist_sq = d.length_squared();
        let min_dist = a.radius() + b.radius();

        if dist_sq >= min_dist * min_dist {
            return PairOutcome::Separate;
        }

        let (direction, dist) = if dist_sq > 0.0 {
            let dist = dist_sq.sqrt();
            (d / dist, dist)
        } else {
            match self.coincident {
                CoincidentPolicy::Skip => return PairOutcome::Coincident { nudged: false },
                // `normal` below is negative along the axis, so `a` ends up at +x.
                CoincidentPolicy::Nudge => (Vec2::X, 0.0),
            }
        };

        let normal = direction * (dist - min_dist) * self.correction_factor;
        let weight_a = a.radius() / min_dist;
        let weight_b = b.radius() / min_dist;

        a.position_current -= normal * weight_a;
        b.position_current += normal * weight_b;

        if dist_sq > 0.0 {
            PairOutcome::Resolved
        } else {
            PairOutcome::Coincident { nudged: true }
        }
    }

    /// One pass over every unordered pair `(i, j)`, `i < j`, in index order.
    ///
    /// Later pairs see the corrections made by earlier ones.
    pub fn resolve(&self, particles: &mut [Particle]) -> ContactStats {
        let mut stats = ContactStats::default();
        let count = particles.len();

        for i in 0..count {
            let (head, tail) = particles.split_at_mut(i + 1);
            let a = &mut head[i];
            for b in tail.iter_mut() {
                match self.resolve_pair(a, b) {
                    PairOutcome::Separate => {}
                    PairOutcome::Resolved => stats.resolved += 1,
                    PairOutcome::Coincident { nudged } => {
                        stats.coincident += 1;
                        if nudged {
                            stats.resolved += 1;
                        }
                    }
                }
            }
        }

        stats
    }
}

/// Overlap depth of a pair, zero when they do not touch.
pub fn overlap(a: &Particle, b: &Particle) -> f32 {
    let dist = a.position_current.distance(b.position_current);
    (a.radius() + b.radius() - dist).max(0.0)
}
