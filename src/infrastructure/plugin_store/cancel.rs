//! Rearmable cancellation shared by every request of a client.

use parking_lot::Mutex;
use tokio::sync::watch;

/// Issues tokens for new requests and cancels the current generation.
#[derive(Debug)]
pub struct CancelSource {
    current: Mutex<watch::Sender<bool>>,
}

impl Default for CancelSource {
    fn default() -> Self {
        Self::new()
    }
}

impl CancelSource {
    /// Creates a source with a live generation.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self {
            current: Mutex::new(tx),
        }
    }

    /// Returns a token bound to the current generation.
    #[must_use]
    pub fn token(&self) -> CancelToken {
        CancelToken {
            rx: self.current.lock().subscribe(),
        }
    }

    /// Cancels every token of the current generation and starts a new one.
    pub fn cancel_and_rearm(&self) {
        let (tx, _rx) = watch::channel(false);
        let previous = std::mem::replace(&mut *self.current.lock(), tx);
        previous.send_replace(true);
    }
}

/// Cancellation signal carried by one request.
#[derive(Debug, Clone)]
pub struct CancelToken {
    rx: watch::Receiver<bool>,
}

impl CancelToken {
    /// Returns whether the token's generation was cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Completes once the token's generation is cancelled.
    pub async fn cancelled(mut self) {
        if self.rx.wait_for(|cancelled| *cancelled).await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}
