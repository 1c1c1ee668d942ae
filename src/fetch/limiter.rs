//! Bounded in-flight request queue.
//!
//! Caps how many requests of one batch are outstanding at a time. Items
//! beyond the cap wait in FIFO order and are released one per completion.
//! A cap of zero disables the limit and releases everything at once.

use std::collections::VecDeque;

/// FIFO queue admitting at most `max_in_flight` items at a time.
#[derive(Debug, Clone)]
pub struct FetchQueue<T> {
    max_in_flight: usize,
    in_flight: usize,
    pending: VecDeque<T>,
}

impl<T> FetchQueue<T> {
    /// Creates a queue; `max_in_flight == 0` means unbounded.
    #[must_use]
    pub fn new(max_in_flight: usize) -> Self {
        Self {
            max_in_flight,
            in_flight: 0,
            pending: VecDeque::new(),
        }
    }

    fn has_capacity(&self) -> bool {
        self.max_in_flight == 0 || self.in_flight < self.max_in_flight
    }

    /// Enqueues `items` and returns those that may start now, in order.
    pub fn admit(&mut self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        self.pending.extend(items);
        let mut started = Vec::new();
        while self.has_capacity() {
            let Some(item) = self.pending.pop_front() else {
                break;
            };
            self.in_flight += 1;
            started.push(item);
        }
        started
    }

    /// Marks one in-flight item finished and returns the next one to start.
    pub fn release(&mut self) -> Option<T> {
        self.in_flight = self.in_flight.saturating_sub(1);
        if !self.has_capacity() {
            return None;
        }
        let next = self.pending.pop_front()?;
        self.in_flight += 1;
        Some(next)
    }

    /// Drops everything still waiting and forgets in-flight items.
    pub fn clear(&mut self) {
        self.pending.clear();
        self.in_flight = 0;
    }

    /// Items started and not yet released.
    #[must_use]
    pub const fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Items waiting for capacity.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admits_up_to_cap_and_queues_the_rest() {
        let mut queue = FetchQueue::new(2);
        assert_eq!(queue.admit(1..=5), vec![1, 2]);
        assert_eq!(queue.in_flight(), 2);
        assert_eq!(queue.pending(), 3);
    }

    #[test]
    fn releases_in_fifo_order_one_per_completion() {
        let mut queue = FetchQueue::new(2);
        queue.admit(1..=5);
        assert_eq!(queue.release(), Some(3));
        assert_eq!(queue.release(), Some(4));
        assert_eq!(queue.release(), Some(5));
        assert_eq!(queue.in_flight(), 2);
        assert_eq!(queue.release(), None);
        assert_eq!(queue.release(), None);
        assert_eq!(queue.in_flight(), 0);
    }

    #[test]
    fn never_exceeds_cap() {
        let mut queue = FetchQueue::new(3);
        let mut started = queue.admit(0..10).len();
        assert!(queue.in_flight() <= 3);
        while queue.in_flight() > 0 {
            if queue.release().is_some() {
                started += 1;
            }
            assert!(queue.in_flight() <= 3);
        }
        assert_eq!(started, 10);
    }

    #[test]
    fn zero_cap_is_unbounded() {
        let mut queue = FetchQueue::new(0);
        assert_eq!(queue.admit(0..151).len(), 151);
        assert_eq!(queue.pending(), 0);
    }

    #[test]
    fn clear_drops_pending_items() {
        let mut queue = FetchQueue::new(1);
        queue.admit(["a", "b", "c"]);
        queue.clear();
        assert_eq!(queue.pending(), 0);
        assert_eq!(queue.in_flight(), 0);
        assert_eq!(queue.release(), None);
    }
}
