//! Per-instance view of the state topic.

use tokio::sync::broadcast::{self, error::RecvError};

use game_core::InstanceId;

use super::bus::Event;
use super::types::ItemStateEvent;

/// Snapshots for one instance, in application order.
///
/// A subscriber that falls behind skips the snapshots it missed and carries
/// on with newer ones.
pub struct InstanceSubscription {
    instance: InstanceId,
    rx: broadcast::Receiver<Event>,
}

impl InstanceSubscription {
    pub(crate) fn new(instance: InstanceId, rx: broadcast::Receiver<Event>) -> Self {
        Self { instance, rx }
    }

    pub fn instance(&self) -> InstanceId {
        self.instance
    }

    /// Next snapshot for this instance, or `None` once the runtime is gone.
    pub async fn recv(&mut self) -> Option<ItemStateEvent> {
        loop {
            match self.rx.recv().await {
                Ok(Event::State(event)) if event.instance() == self.instance => return Some(event),
                Ok(_) => continue,
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(instance = %self.instance, skipped, "state subscriber lagged");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }
}
