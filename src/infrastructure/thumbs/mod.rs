//! Lazy thumbnail loading.
//!
//! This module provides:
//! - Viewport checks with a prefetch margin
//! - Scroll-gated deferral of off-screen containers
//! - A fixed pool of load slots draining one FIFO queue
//! - An async command loop owning the loader state

pub mod loader;
pub mod pool;
pub mod queue;
pub mod state;
pub mod visibility;

#[cfg(test)]
pub(crate) mod testing;

pub use loader::{ThumbLoader, ThumbLoaderConfig};
pub use pool::{DEFAULT_WORKER_COUNT, WorkerPool};
pub use queue::ThumbQueue;
pub use state::{LoaderSnapshot, LoaderState};
pub use visibility::{PREFETCH_MARGIN, Routing, VisibilityQueue, is_visible};
