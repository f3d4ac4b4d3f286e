// src/ct_search/cancel.rs
use std::future::pending;
use tokio::sync::watch;
use tokio::time::{Instant, sleep_until};

/// Caller-supplied cancellation for a discovery run: a shutdown flag, a deadline, or both
#[derive(Debug, Clone, Default)]
pub struct Cancellation {
    shutdown_rx: Option<watch::Receiver<bool>>,
    deadline: Option<Instant>,
}

impl Cancellation {
    /// Never cancels
    pub fn none() -> Self {
        Self::default()
    }

    /// Cancel once `true` is sent on the shutdown channel
    pub fn with_shutdown(mut self, shutdown_rx: watch::Receiver<bool>) -> Self {
        self.shutdown_rx = Some(shutdown_rx);
        self
    }

    /// Cancel once the deadline passes
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn is_cancelled(&self) -> bool {
        let signalled = self.shutdown_rx.as_ref().is_some_and(|rx| *rx.borrow());
        let expired = self.deadline.is_some_and(|d| Instant::now() >= d);
        signalled || expired
    }

    /// Completes when the run should stop. Cancel-safe.
    pub async fn cancelled(&mut self) {
        let deadline = self.deadline;
        let shutdown_rx = self.shutdown_rx.as_mut();

        let shutdown = async move {
            match shutdown_rx {
                Some(rx) => loop {
                    if *rx.borrow_and_update() {
                        return;
                    }
                    if rx.changed().await.is_err() {
                        // Sender dropped without signalling
                        pending::<()>().await;
                    }
                },
                None => pending::<()>().await,
            }
        };

        let expired = async move {
            match deadline {
                Some(deadline) => sleep_until(deadline).await,
                None => pending::<()>().await,
            }
        };

        tokio::select! {
            _ = shutdown => {}
            _ = expired => {}
        }
    }
}
