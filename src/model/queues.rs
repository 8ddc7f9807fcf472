// src/model/queues.rs

use std::collections::VecDeque;

/// A fixed-capacity FIFO pipe. Each slot is one week of transit or
/// production delay.
#[derive(Debug, Clone)]
pub struct DelayQueue {
    buffer: VecDeque<f64>,
    capacity: usize,

    // Running totals, for conservation checks
    units_pushed: f64,
    units_popped: f64,
}

impl DelayQueue {
    /// An empty queue that holds at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: VecDeque::with_capacity(capacity),
            capacity,
            units_pushed: 0.0,
            units_popped: 0.0,
        }
    }

    /// A queue pre-filled to capacity with `value`, so the first weeks of the
    /// run have something in the pipe.
    pub fn seeded(capacity: usize, value: f64) -> Self {
        let mut queue = Self::new(capacity);
        for _ in 0..capacity {
            queue.try_push(value);
        }
        queue
    }

    /// Items enter the pipeline at the back.
    ///
    /// Returns `false` and leaves the queue untouched when it is full.
    pub fn try_push(&mut self, quantity: f64) -> bool {
        if self.buffer.len() >= self.capacity {
            return false;
        }
        self.buffer.push_back(quantity);
        self.units_pushed += quantity;
        true
    }

    /// Items arrive at the destination from the front. An empty pipe yields 0.
    pub fn pop_front(&mut self) -> f64 {
        match self.buffer.pop_front() {
            Some(quantity) => {
                self.units_popped += quantity;
                quantity
            }
            None => 0.0,
        }
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.buffer.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest entry first.
    pub fn iter(&self) -> impl Iterator<Item = &f64> + '_ {
        self.buffer.iter()
    }

    /// Units currently sitting in the pipe.
    pub fn resident_units(&self) -> f64 {
        self.buffer.iter().sum()
    }

    /// Everything ever accepted by `try_push`, seed entries included.
    pub fn units_pushed(&self) -> f64 {
        self.units_pushed
    }

    pub fn units_popped(&self) -> f64 {
        self.units_popped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn pops_in_arrival_order_and_rejects_when_full() {
        let mut queue = DelayQueue::new(3);
        assert!(queue.try_push(4.0));
        assert!(queue.try_push(4.0));
        assert!(queue.try_push(5.0));

        assert!(!queue.try_push(7.0));
        assert_eq!(queue.iter().copied().collect::<Vec<_>>(), vec![4.0, 4.0, 5.0]);
        assert_eq!(queue.units_pushed(), 13.0);

        assert_eq!(queue.pop_front(), 4.0);
        assert_eq!(queue.pop_front(), 4.0);
        assert_eq!(queue.pop_front(), 5.0);
        assert!(queue.is_empty());
    }

    #[test]
    fn empty_queue_yields_zero() {
        let mut queue = DelayQueue::new(2);
        assert_eq!(queue.pop_front(), 0.0);
        assert_eq!(queue.units_popped(), 0.0);
    }

    #[test]
    fn seeded_queue_starts_full() {
        let queue = DelayQueue::seeded(2, 5.0);
        assert!(queue.is_full());
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.resident_units(), 10.0);
    }

    #[test]
    fn zero_capacity_queue_accepts_nothing() {
        let mut queue = DelayQueue::new(0);
        assert!(!queue.try_push(1.0));
        assert!(queue.is_full());
    }

    #[test]
    fn random_traffic_conserves_units_and_respects_capacity() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut queue = DelayQueue::seeded(3, 5.0);

        for _ in 0..500 {
            if rng.gen_bool(0.5) {
                let quantity = f64::from(rng.gen_range(0u32..40)) * 0.25;
                queue.try_push(quantity);
            } else {
                queue.pop_front();
            }
            assert!(queue.len() <= queue.capacity());
            assert_eq!(
                queue.units_pushed(),
                queue.units_popped() + queue.resident_units()
            );
        }
    }
}
