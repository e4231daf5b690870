//! Fixed-size pool of image load slots draining the shared queue.

use tracing::{debug, trace};

use crate::domain::entities::{ImageId, NodeId, ThumbImage, WorkerStatus};
use crate::domain::ports::{SIZES_ATTRIBUTE, SRCSET_ATTRIBUTE, ThumbDocument};

use super::queue::ThumbQueue;

/// Number of concurrent image loads.
pub const DEFAULT_WORKER_COUNT: usize = 3;

#[derive(Debug, Default)]
struct Worker {
    status: WorkerStatus,
    in_flight: Option<ImageId>,
}

/// Load slots. A slot only moves when it is notified while idle or when its
/// in-flight image settles; nothing polls.
#[derive(Debug)]
pub struct WorkerPool {
    workers: Vec<Worker>,
    destroyed: bool,
}

impl WorkerPool {
    /// Creates a pool with `count` slots (at least one).
    #[must_use]
    pub fn new(count: usize) -> Self {
        let workers = (0..count.max(1)).map(|_| Worker::default()).collect();
        Self {
            workers,
            destroyed: false,
        }
    }

    /// Number of slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.workers.len()
    }

    /// Always false; a pool has at least one slot.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }

    /// Status of one slot.
    #[must_use]
    pub fn status(&self, worker: usize) -> Option<WorkerStatus> {
        self.workers.get(worker).map(|w| w.status)
    }

    /// Number of slots waiting on an image.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.workers
            .iter()
            .filter(|w| w.status == WorkerStatus::Active)
            .count()
    }

    /// Advances one slot to the next container that still needs an image.
    ///
    /// Containers that already hold an image are dropped without yielding.
    pub fn load_next<D>(&mut self, worker: usize, queue: &mut ThumbQueue, doc: &mut D)
    where
        D: ThumbDocument + ?Sized,
    {
        if self.destroyed {
            return;
        }
        let Some(slot) = self.workers.get_mut(worker) else {
            return;
        };

        loop {
            let Some(container) = queue.pop() else {
                slot.status = WorkerStatus::Idle;
                slot.in_flight = None;
                trace!(worker, "Queue drained, worker idle");
                return;
            };

            slot.status = WorkerStatus::Active;

            if doc.has_image(container) {
                trace!(worker, %container, "Container already has an image, skipping");
                continue;
            }

            let image = thumb_image_for(container, &*doc);
            let id = doc.insert_image(container, image);
            slot.in_flight = Some(id);
            doc.resolve_responsive(id);

            trace!(worker, %container, image = %id, "Started thumbnail load");
            return;
        }
    }

    /// Wakes every idle slot. Called after each push onto the queue.
    pub fn notify_idle_workers<D>(&mut self, queue: &mut ThumbQueue, doc: &mut D)
    where
        D: ThumbDocument + ?Sized,
    {
        for worker in 0..self.workers.len() {
            if self.workers[worker].status == WorkerStatus::Idle {
                self.load_next(worker, queue, doc);
            }
        }
    }

    /// Releases the slot waiting on `image`, on load and on error alike.
    ///
    /// Returns false when no live slot owns the image.
    pub fn image_settled<D>(&mut self, image: ImageId, queue: &mut ThumbQueue, doc: &mut D) -> bool
    where
        D: ThumbDocument + ?Sized,
    {
        if self.destroyed {
            return false;
        }
        let Some(worker) = self
            .workers
            .iter()
            .position(|w| w.in_flight == Some(image))
        else {
            debug!(image = %image, "Ignoring settle for unknown image");
            return false;
        };

        self.workers[worker].in_flight = None;
        self.load_next(worker, queue, doc);
        true
    }

    /// Parks every slot. Later settles and notifications are ignored.
    pub fn destroy(&mut self) {
        self.destroyed = true;
        for worker in &mut self.workers {
            worker.status = WorkerStatus::Idle;
            worker.in_flight = None;
        }
    }
}

fn thumb_image_for<D>(container: NodeId, doc: &D) -> ThumbImage
where
    D: ThumbDocument + ?Sized,
{
    ThumbImage {
        sizes: doc.attribute(container, SIZES_ATTRIBUTE),
        srcset: doc.attribute(container, SRCSET_ATTRIBUTE),
        alt: String::new(),
    }
}
