//! Debounced free-text search input.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Emits the search text only after input has been quiet for `delay`.
///
/// Each call to [`input`](Self::input) cancels the pending timer and starts a
/// new one, so a burst of keystrokes yields a single emission carrying the
/// last value. Must be used inside a tokio runtime.
#[derive(Debug)]
pub struct SearchDebouncer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
    tx: mpsc::UnboundedSender<String>,
}

impl SearchDebouncer {
    /// Create a debouncer and the receiver its settled values arrive on.
    pub fn new(delay: Duration) -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                delay,
                pending: None,
                tx,
            },
            rx,
        )
    }

    /// Create a debouncer from a millisecond delay.
    pub fn from_millis(delay_ms: u64) -> (Self, mpsc::UnboundedReceiver<String>) {
        Self::new(Duration::from_millis(delay_ms))
    }

    /// Register a keystroke; restarts the timer.
    pub fn input(&mut self, text: impl Into<String>) {
        self.cancel();
        let text = text.into();
        let delay = self.delay;
        let tx = self.tx.clone();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // receiver gone means the view was dropped
            let _ = tx.send(text);
        }));
    }

    /// Drop the pending emission, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Whether an emission is scheduled and has not fired yet.
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for SearchDebouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
