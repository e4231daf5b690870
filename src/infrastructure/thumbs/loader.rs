//! Async thumbnail loading front-end.
//!
//! A single task owns the document and the [`LoaderState`]; everything else
//! talks to it through commands, so handlers still run one at a time.

use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

use crate::domain::entities::{ImageId, ListenerId, NodeId};
use crate::domain::ports::ThumbDocument;

use super::pool::DEFAULT_WORKER_COUNT;
use super::state::{LoaderSnapshot, LoaderState};
use super::visibility::PREFETCH_MARGIN;

/// Configuration for the thumbnail loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThumbLoaderConfig {
    /// Maximum concurrent image loads.
    #[serde(default = "default_worker_count")]
    pub worker_count: usize,
    /// Distance below the viewport that is loaded ahead of time.
    #[serde(default = "default_prefetch_margin")]
    pub prefetch_margin: f64,
}

fn default_worker_count() -> usize {
    DEFAULT_WORKER_COUNT
}

fn default_prefetch_margin() -> f64 {
    PREFETCH_MARGIN
}

impl Default for ThumbLoaderConfig {
    fn default() -> Self {
        Self {
            worker_count: DEFAULT_WORKER_COUNT,
            prefetch_margin: PREFETCH_MARGIN,
        }
    }
}

#[derive(Debug)]
enum ThumbCommand {
    Load(Vec<NodeId>),
    Submit(Vec<NodeId>),
    Scrolled(ListenerId),
    ImageSettled(ImageId),
    Snapshot(oneshot::Sender<LoaderSnapshot>),
    Destroy,
}

/// Handle to a running thumbnail loader task.
///
/// Dropping every handle tears the loader down like [`ThumbLoader::destroy`].
#[derive(Debug, Clone)]
pub struct ThumbLoader {
    command_tx: mpsc::UnboundedSender<ThumbCommand>,
}

impl ThumbLoader {
    /// Spawns the loader task on the current tokio runtime.
    pub fn spawn<D>(config: &ThumbLoaderConfig, document: D) -> Self
    where
        D: ThumbDocument + Send + 'static,
    {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let state = LoaderState::new(config);

        tokio::spawn(Self::run_command_loop(state, document, command_rx));

        Self { command_tx }
    }

    async fn run_command_loop<D>(
        mut state: LoaderState,
        mut document: D,
        mut command_rx: mpsc::UnboundedReceiver<ThumbCommand>,
    ) where
        D: ThumbDocument + Send + 'static,
    {
        info!("Thumbnail loader started");

        while let Some(command) = command_rx.recv().await {
            match command {
                ThumbCommand::Load(roots) => state.load(&roots, &mut document),
                ThumbCommand::Submit(containers) => state.submit_batch(containers, &mut document),
                ThumbCommand::Scrolled(listener) => {
                    state.handle_scroll(listener, &mut document);
                }
                ThumbCommand::ImageSettled(image) => state.image_settled(image, &mut document),
                ThumbCommand::Snapshot(reply) => {
                    let _ = reply.send(state.snapshot());
                }
                ThumbCommand::Destroy => break,
            }
        }

        state.destroy(&mut document);
        info!("Thumbnail loader stopped");
    }

    /// Submits every thumbnail placeholder found under `roots`.
    pub fn load(&self, roots: Vec<NodeId>) {
        self.send(ThumbCommand::Load(roots));
    }

    /// Submits a batch of containers.
    pub fn submit(&self, containers: Vec<NodeId>) {
        self.send(ThumbCommand::Submit(containers));
    }

    /// Forwards a scroll event for a listener handed out by the document.
    pub fn scrolled(&self, listener: ListenerId) {
        self.send(ThumbCommand::Scrolled(listener));
    }

    /// Forwards an image load or error event.
    pub fn image_settled(&self, image: ImageId) {
        self.send(ThumbCommand::ImageSettled(image));
    }

    /// Stops the loader and detaches its scroll listeners.
    pub fn destroy(&self) {
        self.send(ThumbCommand::Destroy);
    }

    /// Returns the loader counters, or `None` once it stopped.
    pub async fn snapshot(&self) -> Option<LoaderSnapshot> {
        let (reply_tx, reply_rx) = oneshot::channel();
        if self.command_tx.send(ThumbCommand::Snapshot(reply_tx)).is_err() {
            return None;
        }
        reply_rx.await.ok()
    }

    fn send(&self, command: ThumbCommand) {
        if let Err(e) = self.command_tx.send(command) {
            debug!(command = ?e.0, "Thumbnail loader already stopped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ScrollParent;
    use crate::infrastructure::thumbs::testing::{FakeDocument, SharedDocument};

    fn shared_with_thumbs(tops: &[f64]) -> (SharedDocument, Vec<NodeId>) {
        let mut doc = FakeDocument::new();
        let nodes = tops
            .iter()
            .zip(1u64..)
            .map(|(top, id)| doc.add_thumb(id, *top))
            .collect();
        (SharedDocument::new(doc), nodes)
    }

    #[test]
    fn test_config_from_toml_uses_defaults() {
        let config: ThumbLoaderConfig = toml::from_str("worker_count = 5").unwrap();
        assert_eq!(config.worker_count, 5);
        assert!((config.prefetch_margin - PREFETCH_MARGIN).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_loader_drains_through_commands() {
        let (doc, nodes) = shared_with_thumbs(&[10.0, 20.0, 30.0, 40.0]);
        let loader = ThumbLoader::spawn(&ThumbLoaderConfig::default(), doc.clone());

        loader.submit(nodes.clone());
        let snapshot = loader.snapshot().await.unwrap();
        assert_eq!(snapshot.active_workers, 3);
        assert_eq!(snapshot.queued, 1);

        let first = doc.0.lock().inserted[0].1;
        loader.image_settled(first);
        let snapshot = loader.snapshot().await.unwrap();
        assert_eq!(snapshot.queued, 0);
        assert_eq!(doc.0.lock().inserted_containers(), nodes);
    }

    #[tokio::test]
    async fn test_loader_promotes_on_scroll() {
        let (doc, nodes) = shared_with_thumbs(&[5000.0]);
        let loader = ThumbLoader::spawn(&ThumbLoaderConfig::default(), doc.clone());

        loader.submit(nodes.clone());
        assert_eq!(loader.snapshot().await.unwrap().pending_registrations, 1);

        let listeners = doc.0.lock().scroll_to(ScrollParent::Document, 4800.0);
        for listener in listeners {
            loader.scrolled(listener);
        }

        let snapshot = loader.snapshot().await.unwrap();
        assert_eq!(snapshot.pending_registrations, 0);
        assert_eq!(snapshot.active_workers, 1);
        assert_eq!(doc.0.lock().inserted_containers(), nodes);
    }

    #[tokio::test]
    async fn test_destroy_stops_task_and_detaches_listeners() {
        let (doc, nodes) = shared_with_thumbs(&[5000.0, 6000.0]);
        let loader = ThumbLoader::spawn(&ThumbLoaderConfig::default(), doc.clone());
        loader.submit(nodes);
        assert_eq!(loader.snapshot().await.unwrap().pending_registrations, 2);

        loader.destroy();

        assert!(loader.snapshot().await.is_none());
        assert_eq!(doc.0.lock().listener_count(), 0);
    }
}
