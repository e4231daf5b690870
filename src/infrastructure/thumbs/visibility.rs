//! Viewport checks and scroll-gated deferral of containers.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::domain::entities::{ListenerId, NodeId, ScrollParent};
use crate::domain::ports::ThumbDocument;

/// Distance below the viewport within which thumbnails are prefetched.
pub const PREFETCH_MARGIN: f64 = 1000.0;

/// Returns whether a container lies inside its scroll parent's window,
/// extended downwards by `margin`.
///
/// A container the document no longer knows is never visible.
pub fn is_visible<D>(doc: &D, container: NodeId, parent: ScrollParent, margin: f64) -> bool
where
    D: ThumbDocument + ?Sized,
{
    match (doc.offset_top(container), doc.viewport(parent)) {
        (Some(top), Some(viewport)) => viewport.contains(top, margin),
        _ => false,
    }
}

/// Where a submitted container ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Routing {
    /// Visible now; the caller enqueues it.
    Visible,
    /// Waiting for a scroll event on its scroll parent.
    Deferred(ListenerId),
    /// No scroll parent; dropped.
    Dropped,
}

#[derive(Debug, Clone, Copy)]
struct Registration {
    container: NodeId,
    scroll_parent: ScrollParent,
}

/// Containers that are waiting to scroll into view.
#[derive(Debug)]
pub struct VisibilityQueue {
    registrations: HashMap<ListenerId, Registration>,
    margin: f64,
    destroyed: bool,
}

impl Default for VisibilityQueue {
    fn default() -> Self {
        Self::new(PREFETCH_MARGIN)
    }
}

impl VisibilityQueue {
    /// Creates a queue with the given prefetch margin.
    #[must_use]
    pub fn new(margin: f64) -> Self {
        Self {
            registrations: HashMap::new(),
            margin,
            destroyed: false,
        }
    }

    /// Prefetch margin in use.
    #[must_use]
    pub const fn margin(&self) -> f64 {
        self.margin
    }

    /// Number of containers waiting for a scroll event.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.registrations.len()
    }

    /// Classifies a container, subscribing to its scroll parent if it is not
    /// visible yet.
    pub fn route<D>(&mut self, container: NodeId, doc: &mut D) -> Routing
    where
        D: ThumbDocument + ?Sized,
    {
        if self.destroyed {
            return Routing::Dropped;
        }
        let Some(scroll_parent) = doc.scroll_parent(container) else {
            trace!(%container, "No scroll parent, dropping container");
            return Routing::Dropped;
        };

        if is_visible(&*doc, container, scroll_parent, self.margin) {
            return Routing::Visible;
        }

        let listener = doc.subscribe_scroll(scroll_parent);
        self.registrations.insert(
            listener,
            Registration {
                container,
                scroll_parent,
            },
        );
        trace!(%container, ?scroll_parent, "Deferred until scrolled into view");
        Routing::Deferred(listener)
    }

    /// Handles a scroll event delivered to `listener`.
    ///
    /// Returns the container once it became visible. Its listener is detached
    /// before it is returned, so a container is promoted at most once.
    pub fn promote<D>(&mut self, listener: ListenerId, doc: &mut D) -> Option<NodeId>
    where
        D: ThumbDocument + ?Sized,
    {
        if self.destroyed {
            return None;
        }
        let registration = *self.registrations.get(&listener)?;
        if !is_visible(
            &*doc,
            registration.container,
            registration.scroll_parent,
            self.margin,
        ) {
            return None;
        }

        doc.unsubscribe_scroll(listener);
        self.registrations.remove(&listener);
        Some(registration.container)
    }

    /// Detaches every outstanding listener. Nothing is promoted afterwards.
    pub fn destroy<D>(&mut self, doc: &mut D)
    where
        D: ThumbDocument + ?Sized,
    {
        self.destroyed = true;
        let count = self.registrations.len();
        for (listener, _) in self.registrations.drain() {
            doc.unsubscribe_scroll(listener);
        }
        if count > 0 {
            debug!(count, "Detached pending scroll listeners");
        }
    }
}
