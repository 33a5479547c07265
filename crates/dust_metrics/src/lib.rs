//! Dust Metrics - tick timing and per-system profiling
//!
//! Everything here compiles down to no-op stubs unless the `metrics`
//! feature is enabled, so the simulation can call into it unconditionally.
//!
//! # Usage
//!
//! ```ignore
//! use dust_metrics::TickTimer;
//!
//! let mut timer = TickTimer::new(120);
//! timer.begin();
//! // ... advance the simulation ...
//! timer.end();
//! println!("{:.1} ticks/s", timer.ticks_per_second());
//! ```

#[cfg(feature = "metrics")]
mod counter;
#[cfg(feature = "metrics")]
mod ring_buffer;
#[cfg(feature = "metrics")]
mod system_profiler;
#[cfg(feature = "metrics")]
mod tick_timer;

#[cfg(feature = "metrics")]
pub use counter::Counter;
#[cfg(feature = "metrics")]
pub use ring_buffer::{RingBuffer, Sample};
#[cfg(feature = "metrics")]
pub use system_profiler::SystemProfiler;
#[cfg(feature = "metrics")]
pub use tick_timer::TickTimer;

use std::time::Duration;

/// Accumulated cost of one system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemTiming {
    pub total: Duration,
    /// Cost of the most recent pass.
    pub last: Duration,
    pub calls: u64,
}

impl SystemTiming {
    /// Average cost per pass; zero before the first one.
    pub fn mean(&self) -> Duration {
        if self.calls == 0 {
            return Duration::ZERO;
        }
        self.total / u32::try_from(self.calls).unwrap_or(u32::MAX)
    }
}

/// Execute code only when metrics are enabled
#[macro_export]
macro_rules! metrics {
    ($($tt:tt)*) => {
        #[cfg(feature = "metrics")]
        {
            $($tt)*
        }
    };
}

/// Time a block under `name` with a `SystemProfiler`
#[macro_export]
macro_rules! time_scope {
    ($profiler:expr, $name:expr, $body:block) => {
        $profiler.time_system($name, || $body)
    };
}

// ============================================================================
// No-op stubs when metrics disabled
// ============================================================================

#[cfg(not(feature = "metrics"))]
mod stubs {
    use crate::SystemTiming;
    use std::marker::PhantomData;
    use std::time::Duration;

    #[derive(Default)]
    pub struct TickTimer;

    impl TickTimer {
        pub fn new(_window: usize) -> Self { Self }
        pub fn begin(&mut self) {}
        pub fn end(&mut self) {}
        pub fn record(&mut self, _cost: Duration) {}
        pub fn ticks_per_second(&self) -> f64 { 0.0 }
        pub fn realtime_factor(&self, _tick_dt: f64) -> f64 { 0.0 }
        pub fn tick_time_ms(&self) -> f64 { 0.0 }
        pub fn tick_time_range_ms(&self) -> (f64, f64) { (0.0, 0.0) }
        pub fn samples(&self) -> usize { 0 }
    }

    pub struct RingBuffer<T>(PhantomData<T>);

    impl<T> RingBuffer<T> {
        pub fn new(_capacity: usize) -> Self { Self(PhantomData) }
        pub fn push(&mut self, _sample: T) {}
        pub fn latest(&self) -> Option<T> { None }
        pub fn len(&self) -> usize { 0 }
        pub fn is_empty(&self) -> bool { true }
    }

    #[derive(Default)]
    pub struct Counter;

    impl Counter {
        pub fn new() -> Self { Self }
        pub fn increment(&mut self, _name: &str, _by: usize) {}
        pub fn set(&mut self, _name: &str, _value: usize) {}
        pub fn get(&self, _name: &str) -> usize { 0 }
        pub fn reset_all(&mut self) {}
    }

    #[derive(Default)]
    pub struct SystemProfiler;

    impl SystemProfiler {
        pub fn new() -> Self { Self }
        pub fn time_system<F, R>(&mut self, _name: &str, f: F) -> R where F: FnOnce() -> R { f() }
        pub fn get_timing(&self, _name: &str) -> SystemTiming { SystemTiming::default() }
        pub fn reset(&mut self) {}
        pub fn timings(&self) -> Vec<(String, SystemTiming)> { Vec::new() }
    }
}

#[cfg(not(feature = "metrics"))]
pub use stubs::{Counter, RingBuffer, SystemProfiler, TickTimer};
