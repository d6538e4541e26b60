//! Seams between the simulation and whatever window/renderer drives it

use bytemuck::{Pod, Zeroable};
use std::time::{Duration, Instant};

/// Per-particle draw data, laid out for direct upload to an instance buffer
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct ParticleInstance {
    pub position: [f32; 2],
    pub radius: f32,
    pub color: [u8; 4],
}

/// Receives the read-only particle snapshot once per frame.
pub trait RenderSink {
    fn present(&mut self, instances: &[ParticleInstance]);
}

impl<F> RenderSink for F
where
    F: FnMut(&[ParticleInstance]),
{
    fn present(&mut self, instances: &[ParticleInstance]) {
        self(instances)
    }
}

/// Polled once per frame, before any physics runs.
pub trait StopSignal {
    fn stop_requested(&mut self) -> bool;
}

impl<F> StopSignal for F
where
    F: FnMut() -> bool,
{
    fn stop_requested(&mut self) -> bool {
        self()
    }
}

/// Requests a stop after a fixed number of frames.
#[derive(Clone, Copy, Debug)]
pub struct FrameLimit {
    remaining: u64,
}

impl FrameLimit {
    pub fn new(frames: u64) -> Self {
        Self { remaining: frames }
    }
}

impl StopSignal for FrameLimit {
    fn stop_requested(&mut self) -> bool {
        if self.remaining == 0 {
            return true;
        }
        self.remaining -= 1;
        false
    }
}

/// Source of elapsed wall time between frames (gates spawning).
pub trait Clock {
    /// Time since the previous tick.
    fn tick(&mut self) -> Duration;
}

/// Real time, optionally paced so frames are no shorter than `frame`.
#[derive(Clone, Copy, Debug)]
pub struct WallClock {
    last: Instant,
    pace: Option<Duration>,
}

impl WallClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
            pace: None,
        }
    }

    /// Sleep in `tick` until at least `frame` has passed since the last tick.
    pub fn paced(frame: Duration) -> Self {
        Self {
            last: Instant::now(),
            pace: Some(frame),
        }
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for WallClock {
    fn tick(&mut self) -> Duration {
        if let Some(frame) = self.pace {
            let since = self.last.elapsed();
            if since < frame {
                std::thread::sleep(frame - since);
            }
        }
        let now = Instant::now();
        let elapsed = now.duration_since(self.last);
        self.last = now;
        elapsed
    }
}

/// Deterministic clock advancing by `step` every tick.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock {
    step: Duration,
}

impl FixedClock {
    pub fn new(step: Duration) -> Self {
        Self { step }
    }
}

impl Clock for FixedClock {
    fn tick(&mut self) -> Duration {
        self.step
    }
}
