//! Background work launched from the UI loop.
//!
//! Every task resolves to exactly one [`AppEvent`], which is delivered over
//! the app channel. Cancelled tasks deliver nothing.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::events::AppEvent;

#[derive(Clone, Debug)]
pub struct BackgroundTasks {
    outstanding: Arc<AtomicUsize>,
    cancel_token: CancellationToken,
    event_tx: mpsc::UnboundedSender<AppEvent>,
}

impl BackgroundTasks {
    pub fn new(event_tx: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self {
            outstanding: Arc::new(AtomicUsize::new(0)),
            cancel_token: CancellationToken::new(),
            event_tx,
        }
    }

    /// Spawn `work` and forward its event to the UI loop.
    ///
    /// Returns a child token; cancelling it (or calling [`shutdown`]) drops
    /// the work without sending an event.
    ///
    /// [`shutdown`]: BackgroundTasks::shutdown
    pub fn spawn<F>(&self, name: &'static str, work: F) -> CancellationToken
    where
        F: Future<Output = AppEvent> + Send + 'static,
    {
        self.outstanding.fetch_add(1, Ordering::SeqCst);

        let cancel_token = self.cancel_token.child_token();
        let task_token = cancel_token.clone();
        let outstanding = self.outstanding.clone();
        let tx = self.event_tx.clone();

        tokio::spawn(async move {
            tokio::select! {
                biased;
                () = task_token.cancelled() => {
                    log::debug!("Background task {name} cancelled");
                }
                event = work => {
                    log::debug!("Background task {name} completed");
                    if tx.send(event).is_err() {
                        log::debug!("UI loop gone; dropping result of {name}");
                    }
                }
            }
            outstanding.fetch_sub(1, Ordering::SeqCst);
        });

        cancel_token
    }

    /// Number of tasks that have not yet finished.
    pub fn outstanding(&self) -> usize {
        self.outstanding.load(Ordering::Relaxed)
    }

    /// Cancel every running task.
    pub fn shutdown(&self) {
        let running = self.outstanding();
        if running > 0 {
            log::info!("Cancelling {running} background task(s)");
        }
        self.cancel_token.cancel();
    }
}
