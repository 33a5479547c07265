//! Fixed-step simulation time
//!
//! The tick loop runs at a fixed 60Hz cadence with a caller-supplied `dt`
//! rather than measured wall-clock deltas.

use std::time::Duration;

/// Reference tick rate (60 Hz).
pub const TICK_RATE_HZ: u32 = 60;
/// Reference delta time per tick, in seconds.
pub const DEFAULT_TICK_DT: f64 = 0.016;
pub const TICK_DURATION: Duration = Duration::from_millis(16);

/// Simulated time tracker
#[derive(Debug, Clone, Default)]
pub struct SimulationClock {
    tick_count: u64,
    elapsed: f64,
}

impl SimulationClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Record one completed tick of `dt` simulated seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick_count += 1;
        self.elapsed += dt;
    }

    /// Total simulated seconds.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }
}
