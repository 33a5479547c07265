//! Per-system run time across ticks

use crate::SystemTiming;
use std::collections::HashMap;
use std::time::Instant;

#[derive(Debug, Default)]
pub struct SystemProfiler {
    timings: HashMap<String, SystemTiming>,
}

impl SystemProfiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run one pass of system `name`, charging its wall time to that system.
    pub fn time_system<F, R>(&mut self, name: &str, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let start = Instant::now();
        let result = f();
        let elapsed = start.elapsed();

        let timing = self.timings.entry(name.to_owned()).or_default();
        timing.total += elapsed;
        timing.last = elapsed;
        timing.calls += 1;
        result
    }

    /// Zeroed for systems never timed.
    pub fn get_timing(&self, name: &str) -> SystemTiming {
        self.timings.get(name).copied().unwrap_or_default()
    }

    pub fn reset(&mut self) {
        self.timings.clear();
    }

    /// Per-system timings, largest total first.
    pub fn timings(&self) -> Vec<(String, SystemTiming)> {
        let mut timings: Vec<_> = self
            .timings
            .iter()
            .map(|(name, &timing)| (name.clone(), timing))
            .collect();
        timings.sort_by(|a, b| b.1.total.cmp(&a.1.total).then_with(|| a.0.cmp(&b.0)));
        timings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn passes_accumulate_per_system() {
        let mut profiler = SystemProfiler::new();
        profiler.time_system("gravity", || {});
        for _ in 0..2 {
            profiler.time_system("collision", || std::thread::sleep(Duration::from_millis(2)));
        }

        let collision = profiler.get_timing("collision");
        assert_eq!(collision.calls, 2);
        assert!(collision.total >= Duration::from_millis(4));
        assert!(collision.mean() >= Duration::from_millis(2));
        assert_eq!(profiler.get_timing("flow"), SystemTiming::default());
        assert_eq!(profiler.timings()[0].0, "collision");

        profiler.reset();
        assert!(profiler.timings().is_empty());
    }
}
