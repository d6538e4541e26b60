//! # Particle Physics Engine
//!
//! Core kernel for a 2D box of circular particles: Verlet integration,
//! boundary clamping and pairwise overlap resolution.

pub mod collision;
pub mod constants;
pub mod constraint;
pub mod particle;

pub use collision::*;
pub use constants::*;
pub use constraint::*;
pub use particle::*;
