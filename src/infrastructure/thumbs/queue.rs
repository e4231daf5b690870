//! Shared FIFO of containers waiting for a load slot.

use std::collections::VecDeque;

use crate::domain::entities::NodeId;

/// Containers in the order they became eligible for loading.
#[derive(Debug, Default)]
pub struct ThumbQueue {
    items: VecDeque<NodeId>,
}

impl ThumbQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a container at the tail.
    pub fn push(&mut self, container: NodeId) {
        self.items.push_back(container);
    }

    /// Takes the head of the queue.
    pub fn pop(&mut self) -> Option<NodeId> {
        self.items.pop_front()
    }

    /// Returns the number of queued containers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drops every queued container.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}
