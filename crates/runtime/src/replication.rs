//! Snapshot replication for observers outside the process.
//!
//! [`ReplicationFrame`] is the wire form of one state snapshot (bincode 1.x).
//! [`StateMirror`] is the observer side: it keeps the newest snapshot per
//! instance and ignores anything older than what it already applied.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use game_core::{InstanceId, ItemState};

use crate::api::Result;
use crate::events::ItemStateEvent;

/// Full snapshot of one instance at one revision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplicationFrame {
    pub instance: InstanceId,
    pub revision: u64,
    pub state: ItemState,
}

impl ReplicationFrame {
    pub fn encode(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}

impl From<&ItemStateEvent> for ReplicationFrame {
    fn from(event: &ItemStateEvent) -> Self {
        Self {
            instance: event.instance(),
            revision: event.revision(),
            state: *event.state(),
        }
    }
}

/// Observer-side copy of every replicated instance.
#[derive(Clone, Debug, Default)]
pub struct StateMirror {
    entries: BTreeMap<InstanceId, (u64, ItemState)>,
}

impl StateMirror {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies `frame` unless a snapshot at the same or a newer revision is
    /// already present. Returns whether the mirror changed.
    pub fn apply(&mut self, frame: ReplicationFrame) -> bool {
        match self.entries.get(&frame.instance) {
            Some((revision, _)) if *revision >= frame.revision => {
                tracing::trace!(
                    instance = %frame.instance,
                    stale = frame.revision,
                    current = *revision,
                    "discarding stale frame"
                );
                false
            }
            _ => {
                self.entries
                    .insert(frame.instance, (frame.revision, frame.state));
                true
            }
        }
    }

    pub fn apply_event(&mut self, event: &ItemStateEvent) -> bool {
        self.apply(ReplicationFrame::from(event))
    }

    pub fn apply_bytes(&mut self, bytes: &[u8]) -> Result<bool> {
        Ok(self.apply(ReplicationFrame::decode(bytes)?))
    }

    pub fn state(&self, instance: InstanceId) -> Option<&ItemState> {
        self.entries.get(&instance).map(|(_, state)| state)
    }

    pub fn revision(&self, instance: InstanceId) -> Option<u64> {
        self.entries.get(&instance).map(|(revision, _)| *revision)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{ActorId, MAX_HEALTH};

    fn frame(revision: u64, health: Option<u32>) -> ReplicationFrame {
        ReplicationFrame {
            instance: InstanceId(1),
            revision,
            state: ItemState {
                holder: health.map(|_| ActorId(4)),
                health,
                stance: None,
                dead_holder: None,
            },
        }
    }

    #[test]
    fn frame_survives_the_wire() {
        let original = frame(3, Some(MAX_HEALTH));
        let bytes = original.encode().unwrap();
        assert_eq!(ReplicationFrame::decode(&bytes).unwrap(), original);
    }

    #[test]
    fn garbage_bytes_are_a_codec_error() {
        assert!(matches!(
            ReplicationFrame::decode(&[0xff]),
            Err(crate::RuntimeError::Codec(_))
        ));
    }

    #[test]
    fn mirror_never_rolls_back() {
        let mut mirror = StateMirror::new();

        assert!(mirror.apply(frame(2, Some(60))));
        assert!(!mirror.apply(frame(1, Some(100))));
        assert!(!mirror.apply(frame(2, Some(100))));
        assert_eq!(mirror.state(InstanceId(1)).unwrap().health, Some(60));

        assert!(mirror.apply(frame(5, None)));
        assert_eq!(mirror.revision(InstanceId(1)), Some(5));
        assert_eq!(mirror.state(InstanceId(1)).unwrap().health, None);
    }
}
