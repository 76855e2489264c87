use crate::shared::infrastructure::change_channel::{
    ChangeChannel, ChangeNotice, ChangeSubscription,
};
use tokio::sync::broadcast;

const DEFAULT_CAPACITY: usize = 64;

/// In-process change channel backed by a tokio broadcast channel.
#[derive(Clone)]
pub struct BroadcastChannel {
    sender: broadcast::Sender<ChangeNotice>,
}

impl Default for BroadcastChannel {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl BroadcastChannel {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }
}

impl ChangeChannel for BroadcastChannel {
    fn publish(&self, notice: ChangeNotice) {
        // No subscribers is not an error.
        let delivered = self.sender.send(notice).unwrap_or(0);
        tracing::trace!(delivered, "published change notice");
    }

    fn subscribe(&self) -> ChangeSubscription {
        ChangeSubscription::new(self.sender.subscribe())
    }
}
