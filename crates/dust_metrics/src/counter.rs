//! Running totals of simulation events (ticks, pair checks, expiries)

use std::collections::BTreeMap;

#[derive(Debug, Default)]
pub struct Counter {
    totals: BTreeMap<String, usize>,
}

impl Counter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, name: &str, by: usize) {
        match self.totals.get_mut(name) {
            Some(total) => *total = total.saturating_add(by),
            None => {
                self.totals.insert(name.to_owned(), by);
            }
        }
    }

    /// Overwrite a total, for gauges such as the live particle count.
    pub fn set(&mut self, name: &str, value: usize) {
        self.totals.insert(name.to_owned(), value);
    }

    /// Zero for names never counted.
    pub fn get(&self, name: &str) -> usize {
        self.totals.get(name).copied().unwrap_or_default()
    }

    pub fn reset_all(&mut self) {
        self.totals.clear();
    }

    /// Totals in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.totals.iter().map(|(name, &total)| (name.as_str(), total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_accumulate_per_event() {
        let mut counter = Counter::new();
        counter.increment("ticks", 1);
        counter.increment("ticks", 1);
        counter.increment("pair_checks", 45);
        counter.set("alive", 9);

        assert_eq!(counter.get("ticks"), 2);
        assert_eq!(counter.get("separations"), 0);
        let names: Vec<_> = counter.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["alive", "pair_checks", "ticks"]);
    }

    #[test]
    fn totals_saturate_instead_of_wrapping() {
        let mut counter = Counter::new();
        counter.set("pair_checks", usize::MAX - 1);
        counter.increment("pair_checks", 5);
        assert_eq!(counter.get("pair_checks"), usize::MAX);
    }
}
