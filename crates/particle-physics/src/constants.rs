//! Default physical constants for the particle box
//!
//! Units are screen units (pixels) and seconds. Positive `y` points down.

/// Fraction of the overlap corrected per pair per sub-step
pub const CORRECTION_FACTOR: f32 = 0.1;

/// Downward gravity (px/s²)
pub const GRAVITY: [f32; 2] = [0.0, 1500.0];

/// Target frames per second
pub const TICK_RATE: u32 = 60;

/// Physics sub-steps per rendered frame
pub const SUBSTEPS: u32 = 12;

/// Box width and height
pub const DIMENSIONS: [f32; 2] = [350.0, 1000.0];

/// Population ceiling
pub const MAX_PARTICLES: usize = 345;

/// Smallest radius handed out by the fountain spawner
pub const MIN_SPAWN_RADIUS: f32 = 5.0;

/// Number of distinct radii the fountain cycles through
pub const RADIUS_CYCLE: usize = 20;

/// Fountain launch velocity (px/s)
pub const LAUNCH_VELOCITY: [f32; 2] = [300.0, -200.0];

/// Minimum time between two fountain spawns (milliseconds)
pub const SPAWN_INTERVAL_MS: u64 = 10;
