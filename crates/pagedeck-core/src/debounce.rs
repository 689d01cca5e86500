//! Trailing-edge debouncer backed by a cancellable tokio task
//!
//! Each `signal()` aborts the pending task and schedules a new one, so only
//! the last signal of a burst is delivered, one quiescence window after it
//! arrived. Delivered values are collected with `try_recv()` from the event
//! loop; nothing runs on the caller's state from the timer task.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

#[derive(Debug)]
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<JoinHandle<()>>,
    tx: mpsc::UnboundedSender<T>,
    rx: mpsc::UnboundedReceiver<T>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            window,
            pending: None,
            tx,
            rx,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Restart the quiescence window with `value` as the payload.
    /// Must be called from within a tokio runtime.
    pub fn signal(&mut self, value: T) {
        self.cancel();

        let tx = self.tx.clone();
        let window = self.window;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(window).await;
            let _ = tx.send(value);
        }));
    }

    /// Drop the pending signal, if any
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Whether a signal is waiting for its window to elapse
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }

    /// Take the value of a window that has elapsed (non-blocking)
    pub fn try_recv(&mut self) -> Option<T> {
        let value = self.rx.try_recv().ok()?;
        self.pending = None;
        Some(value)
    }

    /// Wait for the next elapsed window
    pub async fn recv(&mut self) -> Option<T> {
        let value = self.rx.recv().await?;
        self.pending = None;
        Some(value)
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
