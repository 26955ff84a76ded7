// src/history.rs

//! # Time-Windowed Command History
//!
//! A fixed-capacity, time-ordered queue of recent samples. The heading
//! pilot feeds it its own recent commands and reads back the command that
//! was issued a latency interval ago.
//!
//! Both operations evict. `push` drops samples older than the retention
//! window, and `take` drops every sample older than the requested cutoff
//! before answering. `take` is therefore not a read-only lookup: a later
//! `take` with an earlier cutoff cannot see samples discarded by a previous
//! call.

use heapless::Deque;
use num_traits::Zero;

/// A value stamped with the time, in seconds, at which it was stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimestampedSample<T> {
    /// The stored value.
    pub value: T,
    /// Time of insertion in seconds.
    pub timestamp: f64,
}

/// Time-ordered sample buffer with a fixed retention window and at most
/// `N` retained samples.
#[derive(Debug, Clone)]
pub struct TimedQueue<T, const N: usize> {
    samples: Deque<TimestampedSample<T>, N>,
    window: f64,
}

impl<T: Copy + Zero, const N: usize> TimedQueue<T, N> {
    /// Creates an empty queue retaining `window` seconds of samples.
    pub fn new(window: f64) -> Self {
        Self {
            samples: Deque::new(),
            window,
        }
    }

    /// The retention window in seconds.
    pub fn window(&self) -> f64 {
        self.window
    }

    /// Number of retained samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns `true` if no samples are retained.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Drops every sample.
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Appends `value` stamped with `now`.
    ///
    /// Samples older than `now - window` are evicted first. If the queue is
    /// still full, the oldest sample is dropped to make room.
    pub fn push(&mut self, value: T, now: f64) {
        self.evict_before(now - self.window);
        if self.samples.is_full() {
            log::warn!("command history full at {} samples, dropping oldest", N);
            self.samples.pop_front();
        }
        let sample = TimestampedSample {
            value,
            timestamp: now,
        };
        // Room was made above.
        let _ = self.samples.push_back(sample);
    }

    /// Returns the oldest value stamped at or after `cutoff`, or zero if
    /// there is none.
    ///
    /// Every sample stamped strictly before `cutoff` is discarded as a
    /// side effect.
    pub fn take(&mut self, cutoff: f64) -> T {
        self.evict_before(cutoff);
        self.samples
            .front()
            .map(|sample| sample.value)
            .unwrap_or_else(T::zero)
    }

    fn evict_before(&mut self, cutoff: f64) {
        while let Some(sample) = self.samples.front() {
            if cutoff <= sample.timestamp {
                break;
            }
            self.samples.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    /// An empty queue answers zero.
    #[test]
    fn test_take_empty_is_zero() {
        let mut queue: TimedQueue<f64, 8> = TimedQueue::new(10.0);
        assert!(value_close(0.0, queue.take(0.0)));
        assert!(queue.is_empty());
    }

    /// The oldest sample at or after the cutoff is returned.
    #[test]
    fn test_take_returns_oldest_qualifying_sample() {
        let mut queue: TimedQueue<f64, 8> = TimedQueue::new(10.0);
        queue.push(1.0, 0.0);
        queue.push(2.0, 1.0);
        queue.push(3.0, 2.0);

        assert!(value_close(2.0, queue.take(1.0)));
        assert!(value_close(3.0, queue.take(1.5)));
    }

    /// Taking evicts older samples, so an earlier cutoff cannot recover them.
    #[test]
    fn test_take_evicts_older_samples() {
        let mut queue: TimedQueue<f64, 8> = TimedQueue::new(10.0);
        queue.push(1.0, 0.0);
        queue.push(2.0, 1.0);
        queue.push(3.0, 2.0);

        assert!(value_close(3.0, queue.take(2.0)));
        assert_eq!(1, queue.len());
        assert!(value_close(3.0, queue.take(0.0)));
    }

    /// A cutoff newer than every sample empties the queue and answers zero.
    #[test]
    fn test_take_after_newest_is_zero() {
        let mut queue: TimedQueue<f64, 8> = TimedQueue::new(10.0);
        queue.push(5.0, 0.0);
        queue.push(6.0, 1.0);

        assert!(value_close(0.0, queue.take(1.5)));
        assert!(queue.is_empty());
    }

    /// Only samples from the last window survive a push.
    #[test]
    fn test_push_evicts_outside_window() {
        let mut queue: TimedQueue<f64, 64> = TimedQueue::new(10.0);
        for step in 0..=25 {
            queue.push(step as f64, step as f64);
        }

        // Samples 15..=25 are within [25 - 10, 25].
        assert_eq!(11, queue.len());
        assert!(value_close(15.0, queue.take(25.0 - queue.window())));
    }

    /// A full queue drops its oldest sample to make room.
    #[test]
    fn test_push_when_full_drops_oldest() {
        let mut queue: TimedQueue<f64, 3> = TimedQueue::new(100.0);
        queue.push(1.0, 0.0);
        queue.push(2.0, 0.1);
        queue.push(3.0, 0.2);
        queue.push(4.0, 0.3);

        assert_eq!(3, queue.len());
        assert!(value_close(2.0, queue.take(0.0)));
    }

    /// Clearing forgets everything.
    #[test]
    fn test_clear() {
        let mut queue: TimedQueue<f64, 4> = TimedQueue::new(10.0);
        queue.push(1.0, 0.0);
        queue.clear();
        assert!(queue.is_empty());
        assert!(value_close(0.0, queue.take(0.0)));
    }
}
