//! Owned loader state shared by the submission and completion paths.

use tracing::{debug, trace};

use crate::domain::entities::{ImageId, ListenerId, NodeId};
use crate::domain::ports::{THUMB_CLASS, ThumbDocument};

use super::loader::ThumbLoaderConfig;
use super::pool::WorkerPool;
use super::queue::ThumbQueue;
use super::visibility::{Routing, VisibilityQueue};

/// Point-in-time view of the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderSnapshot {
    /// Containers waiting for a free slot.
    pub queued: usize,
    /// Slots with an image in flight.
    pub active_workers: usize,
    /// Containers waiting to scroll into view.
    pub pending_registrations: usize,
    /// Whether `destroy` ran.
    pub destroyed: bool,
}

/// Queue, pool and scroll registrations for one listing view.
///
/// Every event handler takes `&mut self`, so a pop and the slot update that
/// follows it can never interleave with another handler.
#[derive(Debug)]
pub struct LoaderState {
    queue: ThumbQueue,
    pool: WorkerPool,
    visibility: VisibilityQueue,
    destroyed: bool,
}

impl Default for LoaderState {
    fn default() -> Self {
        Self::new(&ThumbLoaderConfig::default())
    }
}

impl LoaderState {
    /// Creates an empty loader.
    #[must_use]
    pub fn new(config: &ThumbLoaderConfig) -> Self {
        Self {
            queue: ThumbQueue::new(),
            pool: WorkerPool::new(config.worker_count),
            visibility: VisibilityQueue::new(config.prefetch_margin),
            destroyed: false,
        }
    }

    /// Submits every thumbnail placeholder found under `roots`.
    pub fn load<D>(&mut self, roots: &[NodeId], doc: &mut D)
    where
        D: ThumbDocument + ?Sized,
    {
        let thumbs: Vec<NodeId> = roots
            .iter()
            .flat_map(|root| doc.find_by_class(*root, THUMB_CLASS))
            .collect();
        self.submit_batch(thumbs, doc);
    }

    /// Enqueues visible containers now and defers the rest until scrolled
    /// into view.
    pub fn submit_batch<D, I>(&mut self, containers: I, doc: &mut D)
    where
        D: ThumbDocument + ?Sized,
        I: IntoIterator<Item = NodeId>,
    {
        if self.destroyed {
            debug!("Ignoring batch submitted after destroy");
            return;
        }

        let mut visible = 0usize;
        let mut deferred = 0usize;
        for container in containers {
            match self.visibility.route(container, doc) {
                Routing::Visible => {
                    visible += 1;
                    self.add_to_queue(container, doc);
                }
                Routing::Deferred(_) => deferred += 1,
                Routing::Dropped => {}
            }
        }
        debug!(visible, deferred, "Submitted thumbnail batch");
    }

    /// Handles a scroll event for a listener handed out during submission.
    ///
    /// Returns true if the container was promoted into the queue.
    pub fn handle_scroll<D>(&mut self, listener: ListenerId, doc: &mut D) -> bool
    where
        D: ThumbDocument + ?Sized,
    {
        if self.destroyed {
            return false;
        }
        match self.visibility.promote(listener, doc) {
            Some(container) => {
                trace!(%container, "Scrolled into view");
                self.add_to_queue(container, doc);
                true
            }
            None => false,
        }
    }

    /// Handles an image load or error event.
    pub fn image_settled<D>(&mut self, image: ImageId, doc: &mut D)
    where
        D: ThumbDocument + ?Sized,
    {
        if self.destroyed {
            return;
        }
        self.pool.image_settled(image, &mut self.queue, doc);
    }

    /// Pushes a container and wakes idle slots.
    pub fn add_to_queue<D>(&mut self, container: NodeId, doc: &mut D)
    where
        D: ThumbDocument + ?Sized,
    {
        if self.destroyed {
            return;
        }
        self.queue.push(container);
        self.pool.notify_idle_workers(&mut self.queue, doc);
    }

    /// Detaches pending scroll listeners and parks the pool.
    ///
    /// Images already inserted keep loading; their settle events are ignored.
    pub fn destroy<D>(&mut self, doc: &mut D)
    where
        D: ThumbDocument + ?Sized,
    {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.visibility.destroy(doc);
        self.pool.destroy();
        self.queue.clear();
        debug!("Thumbnail loader destroyed");
    }

    /// Returns current counters.
    #[must_use]
    pub fn snapshot(&self) -> LoaderSnapshot {
        LoaderSnapshot {
            queued: self.queue.len(),
            active_workers: self.pool.active_count(),
            pending_registrations: self.visibility.pending_count(),
            destroyed: self.destroyed,
        }
    }
}
