//! # Particle Simulation Engine
//!
//! Frame/sub-step scheduler that drives the physics kernel: spawning,
//! integration, boundary clamping and collision resolution, plus the seams
//! a windowing frontend plugs into.

pub mod error;
pub mod frontend;
pub mod params;
pub mod simulation;
pub mod spawn;

pub use error::*;
pub use frontend::*;
pub use params::*;
pub use simulation::*;
pub use spawn::*;
