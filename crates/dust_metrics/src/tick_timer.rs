//! Wall-clock cost of simulation ticks
//!
//! Ticks advance simulated time by a fixed `dt`; this measures how long the
//! host actually spends producing each one.

use super::ring_buffer::RingBuffer;
use std::time::{Duration, Instant};

pub struct TickTimer {
    started: Option<Instant>,
    costs: RingBuffer<Duration>,
}

impl TickTimer {
    /// Averages over the last `window` ticks.
    pub fn new(window: usize) -> Self {
        Self {
            started: None,
            costs: RingBuffer::new(window),
        }
    }

    pub fn begin(&mut self) {
        self.started = Some(Instant::now());
    }

    /// Close the tick opened by `begin`. Unpaired calls are ignored.
    pub fn end(&mut self) {
        if let Some(started) = self.started.take() {
            self.record(started.elapsed());
        }
    }

    /// Add an externally measured tick cost.
    pub fn record(&mut self, cost: Duration) {
        self.costs.push(cost);
    }

    /// Ticks the host could produce per wall-clock second at the average cost.
    pub fn ticks_per_second(&self) -> f64 {
        let avg = self.costs.average().as_secs_f64();
        if avg > 0.0 {
            1.0 / avg
        } else {
            0.0
        }
    }

    /// Simulated seconds produced per wall-clock second for ticks of `tick_dt`.
    ///
    /// Above 1.0 the simulation can keep up with real time.
    pub fn realtime_factor(&self, tick_dt: f64) -> f64 {
        self.ticks_per_second() * tick_dt
    }

    pub fn tick_time_ms(&self) -> f64 {
        self.costs.average().as_secs_f64() * 1000.0
    }

    pub fn tick_time_range_ms(&self) -> (f64, f64) {
        let (fastest, slowest) = self.costs.min_max();
        (fastest.as_secs_f64() * 1000.0, slowest.as_secs_f64() * 1000.0)
    }

    /// Ticks currently in the averaging window.
    pub fn samples(&self) -> usize {
        self.costs.len()
    }
}

impl Default for TickTimer {
    fn default() -> Self {
        Self::new(60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_timer_reports_zero() {
        let mut timer = TickTimer::new(10);
        timer.end();
        assert_eq!(timer.ticks_per_second(), 0.0);
        assert_eq!(timer.tick_time_ms(), 0.0);
        assert_eq!(timer.samples(), 0);
    }

    #[test]
    fn recorded_costs_drive_the_rates() {
        let mut timer = TickTimer::new(4);
        timer.record(Duration::from_millis(4));
        timer.record(Duration::from_millis(4));

        assert!((timer.ticks_per_second() - 250.0).abs() < 1e-9);
        assert!((timer.realtime_factor(0.016) - 4.0).abs() < 1e-9);
        let (fastest, slowest) = timer.tick_time_range_ms();
        assert!((fastest - 4.0).abs() < 1e-9 && (slowest - 4.0).abs() < 1e-9);
    }

    #[test]
    fn begin_end_measures_wall_time() {
        let mut timer = TickTimer::new(2);
        for _ in 0..3 {
            timer.begin();
            std::thread::sleep(Duration::from_millis(1));
            timer.end();
        }
        assert_eq!(timer.samples(), 2);
        assert!(timer.tick_time_ms() >= 1.0);
    }
}
