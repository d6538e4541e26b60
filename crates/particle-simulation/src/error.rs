//! Error types for the simulation driver

use crate::simulation::SimulationState;
use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Rejected configuration or spawn request.
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// Lifecycle call that the current state does not allow.
    #[error("cannot {action} while {state:?}")]
    InvalidState {
        state: SimulationState,
        action: &'static str,
    },

    /// Population ceiling reached; particles are never culled to make room.
    #[error("population is full ({max} particles)")]
    PopulationFull { max: usize },
}
