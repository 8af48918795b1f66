use bitflags::bitflags;

bitflags! {
    /// Tracks which fields of an [`ItemState`](crate::ItemState) changed during a dispatch.
    ///
    /// Each bit represents a single field. An empty set means the dispatch was
    /// a no-op and produces no replication traffic.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ItemChanges: u8 {
        const HOLDER      = 1 << 0;
        const HEALTH      = 1 << 1;
        const STANCE      = 1 << 2;
        const DEAD_HOLDER = 1 << 3;
    }
}

impl ItemChanges {
    /// Field-by-field comparison of two states.
    pub fn from_states(before: &crate::ItemState, after: &crate::ItemState) -> Self {
        let mut changes = Self::empty();
        changes.set(Self::HOLDER, before.holder != after.holder);
        changes.set(Self::HEALTH, before.health != after.health);
        changes.set(Self::STANCE, before.stance != after.stance);
        changes.set(Self::DEAD_HOLDER, before.dead_holder != after.dead_holder);
        changes
    }
}
