//! Min-priority queue with first-in/first-out tie-breaking.
//!
//! Lower numeric priorities are served first, matching the conventional
//! "priority 1 beats priority 2" reading. Elements sharing a priority leave
//! the queue in the order they entered it, which keeps searches built on top
//! of the queue deterministic.
//!
//! The backing store is a `Vec` kept sorted from the lowest-urgency entry at
//! the front to the most urgent entry at the back. Dequeue is a `pop`, and
//! enqueue shifts the tail to make room, so insertion is O(n). The frontier
//! of an interactive route query is bounded by the size of the map, which
//! keeps the linear insert cheap in practice.

use std::cmp::Ordering;

use crate::error::{Error, Result};

#[derive(Debug, Clone)]
struct Entry<T> {
    elem: T,
    priority: f64,
}

/// Priority queue serving the lowest priority value first.
#[derive(Debug, Clone)]
pub struct PriorityQueue<T> {
    entries: Vec<Entry<T>>,
}

impl<T> PriorityQueue<T> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Create an empty queue with room for `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Number of elements waiting in the queue.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the queue holds no elements.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove every element.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Add `elem` with the given priority.
    ///
    /// The element is placed behind every element already queued with the
    /// same priority. Priorities are ordered with [`f64::total_cmp`]: a
    /// positive NaN is served after every finite priority and a negative NaN
    /// before all of them.
    pub fn enqueue(&mut self, elem: T, priority: f64) {
        // Tail is served first: skip past everything strictly less urgent.
        let index = self
            .entries
            .partition_point(|entry| entry.priority.total_cmp(&priority) == Ordering::Greater);
        self.entries.insert(index, Entry { elem, priority });
    }

    /// Add `elem` at priority `0`.
    pub fn enqueue_default(&mut self, elem: T) {
        self.enqueue(elem, 0.0);
    }

    /// Remove and return the element with the lowest priority.
    pub fn dequeue(&mut self) -> Result<T> {
        self.entries
            .pop()
            .map(|entry| entry.elem)
            .ok_or(Error::EmptyQueue {
                operation: "dequeue",
            })
    }

    /// Remove and return the most urgent element together with its priority.
    pub fn dequeue_with_priority(&mut self) -> Result<(T, f64)> {
        self.entries
            .pop()
            .map(|entry| (entry.elem, entry.priority))
            .ok_or(Error::EmptyQueue {
                operation: "dequeue",
            })
    }

    /// Borrow the element `dequeue` would return next.
    pub fn peek(&self) -> Result<&T> {
        self.entries
            .last()
            .map(|entry| &entry.elem)
            .ok_or(Error::EmptyQueue { operation: "peek" })
    }

    /// Priority of the element `dequeue` would return next.
    pub fn peek_priority(&self) -> Result<f64> {
        self.entries
            .last()
            .map(|entry| entry.priority)
            .ok_or(Error::EmptyQueue { operation: "peek" })
    }

    /// Iterate over queued elements and priorities in service order.
    pub fn iter(&self) -> impl Iterator<Item = (&T, f64)> + '_ {
        self.entries
            .iter()
            .rev()
            .map(|entry| (&entry.elem, entry.priority))
    }
}

impl<T> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Extend<(T, f64)> for PriorityQueue<T> {
    fn extend<I: IntoIterator<Item = (T, f64)>>(&mut self, iter: I) {
        for (elem, priority) in iter {
            self.enqueue(elem, priority);
        }
    }
}

impl<T> FromIterator<(T, f64)> for PriorityQueue<T> {
    fn from_iter<I: IntoIterator<Item = (T, f64)>>(iter: I) -> Self {
        let mut queue = Self::new();
        queue.extend(iter);
        queue
    }
}
