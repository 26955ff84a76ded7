// src/filter.rs

//! # Command Rate Filter
//!
//! Single-pole low-pass filter tracking how fast the heading command is
//! changing. Its output is the feed-forward base value of the heading pilot.

use crate::Number;

/// Exponential low-pass filter with an update timestamp used for
/// staleness checks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateFilter<T> {
    lowpass: T,
    output: T,
    last_update: Option<f64>,
}

impl<T: Number> RateFilter<T> {
    /// Creates a filter giving weight `lowpass` to each new sample.
    pub fn new(lowpass: T) -> Self {
        Self {
            lowpass,
            output: T::zero(),
            last_update: None,
        }
    }

    /// Feeds one heading command difference and stamps the update with `now`.
    /// Returns the new filter output.
    pub fn update(&mut self, diff: T, now: f64) -> T {
        self.output = (T::one() - self.lowpass) * self.output + self.lowpass * diff;
        self.last_update = Some(now);
        self.output
    }

    /// The current command rate estimate.
    pub fn value(&self) -> T {
        self.output
    }

    /// Time of the last update, if any.
    pub fn last_update(&self) -> Option<f64> {
        self.last_update
    }

    /// Returns `true` if the filter was never updated or its last update is
    /// more than `timeout` seconds before `now`.
    pub fn is_stale(&self, now: f64, timeout: f64) -> bool {
        match self.last_update {
            Some(last) => timeout < now - last,
            None => true,
        }
    }

    /// Zeroes the stored rate. The update timestamp is kept.
    pub fn reset(&mut self) {
        self.output = T::zero();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    /// A single sample moves the output by the low-pass weight.
    #[test]
    fn test_rate_filter_first_step() {
        let mut filter = RateFilter::new(0.1_f64);
        let output = filter.update(5.0, 0.0);
        assert!(value_close(0.5, output));
        assert!(value_close(0.5, filter.value()));
    }

    /// A constant input drives the output toward that input.
    #[test]
    fn test_rate_filter_converges() {
        let mut filter = RateFilter::new(0.1_f64);
        for step in 0..400 {
            filter.update(2.0, step as f64 * 0.1);
        }
        assert!((filter.value() - 2.0).abs() < 1e-6);
    }

    /// After a reset, a zero input yields zero on the first cycle.
    #[test]
    fn test_rate_filter_reset() {
        let mut filter = RateFilter::new(0.1_f64);
        for step in 0..20 {
            filter.update(3.0, step as f64);
        }
        assert!(value_not_close(0.0, filter.value()));

        filter.reset();
        assert!(value_close(0.0, filter.update(0.0, 20.0)));
    }

    /// Staleness follows the update timestamp.
    #[test]
    fn test_rate_filter_staleness() {
        let mut filter = RateFilter::new(0.1_f64);
        assert!(filter.is_stale(0.0, 1.0));

        filter.update(0.0, 10.0);
        assert_eq!(Some(10.0), filter.last_update());
        assert!(!filter.is_stale(10.5, 1.0));
        assert!(!filter.is_stale(11.0, 1.0));
        assert!(filter.is_stale(11.01, 1.0));

        filter.reset();
        assert_eq!(Some(10.0), filter.last_update());
    }
}
