//! Refresh-request plumbing for watch mode.
//!
//! Every trigger source (interval timer, post-edit delay, external callers)
//! funnels into one channel consumed by a single reconciliation loop, and
//! bursts are coalesced with a quiet period decided by [`debounce_elapsed`].

use std::time::{Duration, Instant};
use tokio::sync::mpsc::{self, Receiver, Sender};

/// One request to re-run the reconciliation pass.
#[derive(Debug, Clone, Copy)]
pub struct RefreshRequest {
    pub requested_at: Instant,
}

/// Receiving end, owned by the single watch loop.
pub struct RefreshQueue {
    rx: Receiver<RefreshRequest>,
    handle: RefreshHandle,
}

/// Cloneable sending end for trigger sources.
#[derive(Clone)]
pub struct RefreshHandle {
    tx: Sender<RefreshRequest>,
}

impl RefreshQueue {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(64);
        Self {
            rx,
            handle: RefreshHandle { tx },
        }
    }

    pub fn handle(&self) -> RefreshHandle {
        self.handle.clone()
    }

    pub async fn recv(&mut self) -> Option<RefreshRequest> {
        self.rx.recv().await
    }

    /// Non-blocking drain of one queued request, for burst coalescing.
    pub fn try_recv(&mut self) -> Option<RefreshRequest> {
        self.rx.try_recv().ok()
    }
}

impl Default for RefreshQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl RefreshHandle {
    /// Enqueue a refresh now. A full queue drops the request; a pass is
    /// already pending in that case.
    pub fn request(&self) {
        let _ = self.tx.try_send(RefreshRequest {
            requested_at: Instant::now(),
        });
    }

    /// Enqueue a refresh after `delay`. Scheduled, not awaited, so a caller
    /// (the post-edit path) returns before the re-scan fires.
    pub fn request_after(&self, delay: Duration) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.try_send(RefreshRequest {
                requested_at: Instant::now(),
            });
        });
    }
}

/// True once the quiet period has elapsed since the last request.
pub fn debounce_elapsed(last_request: Instant, now: Instant, quiet: Duration) -> bool {
    now.duration_since(last_request) >= quiet
}
