//! Fire-and-forget notification dispatch.
//!
//! Submission and adjudication events must never block the request path:
//! messages go onto a channel and a worker owned by the application
//! lifecycle drains them into a delivery sink. Delivery failures are
//! logged, not propagated.

use crate::error::Result;
use crate::models::{CardId, CardStatus};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// One event the surrounding application wants delivered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Notification {
    CardSubmitted {
        card: CardId,
        executor_email: String,
    },
    CardReviewed {
        card: CardId,
        status: CardStatus,
        executor_email: String,
    },
}

/// Port for the delivery transport (email, etc.) — out of scope here
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn deliver(&self, notification: &Notification) -> Result<()>;
}

/// Handle for enqueueing notifications.
///
/// Cloneable and cheap; dropping every handle closes the channel, letting
/// the worker drain the backlog and stop.
#[derive(Clone)]
pub struct Notifier {
    tx: mpsc::UnboundedSender<Notification>,
}

impl Notifier {
    /// Spawn the dispatch worker on the current runtime.
    ///
    /// The returned join handle belongs to the application lifecycle: await
    /// it on shutdown to drain pending messages.
    pub fn spawn(sink: Arc<dyn NotificationSink>) -> (Self, JoinHandle<()>) {
        let (tx, mut rx) = mpsc::unbounded_channel::<Notification>();
        let handle = tokio::spawn(async move {
            while let Some(notification) = rx.recv().await {
                if let Err(err) = sink.deliver(&notification).await {
                    tracing::warn!(error = %err, "notification delivery failed");
                }
            }
        });
        (Self { tx }, handle)
    }

    /// Enqueue a notification without waiting for delivery
    pub fn notify(&self, notification: Notification) {
        if self.tx.send(notification).is_err() {
            tracing::warn!("notification worker has stopped; message dropped");
        }
    }
}
