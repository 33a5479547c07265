//! Sliding window over the most recent measurements

use std::time::Duration;

/// A measurement that can be summed and averaged.
pub trait Sample: Copy + PartialOrd {
    const ZERO: Self;
    fn sum(self, other: Self) -> Self;
    fn mean(total: Self, count: usize) -> Self;
}

impl Sample for Duration {
    const ZERO: Self = Duration::ZERO;

    fn sum(self, other: Self) -> Self {
        self.saturating_add(other)
    }

    fn mean(total: Self, count: usize) -> Self {
        total / u32::try_from(count).unwrap_or(u32::MAX)
    }
}

impl Sample for f64 {
    const ZERO: Self = 0.0;

    fn sum(self, other: Self) -> Self {
        self + other
    }

    fn mean(total: Self, count: usize) -> Self {
        total / count as f64
    }
}

/// Keeps the last `capacity` samples; older ones are overwritten in place.
pub struct RingBuffer<T> {
    slots: Vec<T>,
    capacity: usize,
    head: usize,
}

impl<T: Sample> RingBuffer<T> {
    /// A zero capacity is bumped to one so `push` always has a slot.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            slots: Vec::with_capacity(capacity),
            capacity,
            head: 0,
        }
    }

    pub fn push(&mut self, sample: T) {
        if self.slots.len() < self.capacity {
            self.slots.push(sample);
        } else {
            self.slots[self.head] = sample;
        }
        self.head = (self.head + 1) % self.capacity;
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Most recently pushed sample.
    pub fn latest(&self) -> Option<T> {
        if self.slots.is_empty() {
            return None;
        }
        let index = (self.head + self.capacity - 1) % self.capacity;
        self.slots.get(index).copied()
    }

    /// Zero when empty.
    pub fn average(&self) -> T {
        if self.slots.is_empty() {
            return T::ZERO;
        }
        let total = self.slots.iter().fold(T::ZERO, |acc, &s| acc.sum(s));
        T::mean(total, self.slots.len())
    }

    /// `(ZERO, ZERO)` when empty.
    pub fn min_max(&self) -> (T, T) {
        let mut samples = self.slots.iter().copied();
        let Some(first) = samples.next() else {
            return (T::ZERO, T::ZERO);
        };
        samples.fold((first, first), |(lo, hi), s| {
            (if s < lo { s } else { lo }, if s > hi { s } else { hi })
        })
    }
}
