// Publish/subscribe channel for "a shared storage key changed" notices.
//
// Purpose
// - Let same-origin contexts (several stores sharing one device storage) learn that another
//   context wrote a shared key, so they can reload instead of waiting for the next poll.
//
// Boundaries
// - Best effort and same-origin only. Not a replacement for the backend across devices.
// - Transports are interchangeable. The store only sees ChangeChannel and ChangeSubscription.

pub mod broadcast;

use tokio::sync::broadcast as tokio_broadcast;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeNotice {
    /// Storage key that was written.
    pub key: String,
    /// Identifier of the writing context.
    pub origin: String,
}

pub trait ChangeChannel: Send + Sync {
    fn publish(&self, notice: ChangeNotice);
    fn subscribe(&self) -> ChangeSubscription;
}

/// Receiving end of a change channel. Transports feed it through a tokio broadcast sender.
pub struct ChangeSubscription {
    receiver: tokio_broadcast::Receiver<ChangeNotice>,
}

impl ChangeSubscription {
    pub fn new(receiver: tokio_broadcast::Receiver<ChangeNotice>) -> Self {
        Self { receiver }
    }

    /// Next notice, or `None` once every publisher is gone. Notices missed by a slow
    /// subscriber are skipped.
    pub async fn recv(&mut self) -> Option<ChangeNotice> {
        loop {
            match self.receiver.recv().await {
                Ok(notice) => return Some(notice),
                Err(tokio_broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "change subscription lagged");
                }
                Err(tokio_broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}
