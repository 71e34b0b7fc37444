//! FIFO work queue used as the traversal frontier

use crate::error::{Error, Result};
use std::collections::VecDeque;
use std::fmt;

/// First-in, first-out buffer
#[derive(Clone)]
pub struct WorkQueue<T> {
    items: VecDeque<T>,
}

impl<T> WorkQueue<T> {
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }

    /// Append one item at the tail
    pub fn enqueue(&mut self, item: T) {
        self.items.push_back(item);
    }

    /// Append every item at the tail, preserving their order
    pub fn enqueue_all(&mut self, items: impl IntoIterator<Item = T>) {
        self.items.extend(items);
    }

    /// Remove and return the oldest item
    pub fn dequeue(&mut self) -> Result<T> {
        self.items.pop_front().ok_or(Error::EmptyQueue)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Items from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}

impl<T> Default for WorkQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for WorkQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> fmt::Debug for WorkQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WorkQueue(len={})", self.items.len())
    }
}
