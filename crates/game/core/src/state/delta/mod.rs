mod bitmask;

use crate::action::ItemAction;
use crate::state::{ActorId, ItemState};

pub use bitmask::ItemChanges;

/// Description of one dispatch's impact on an item record.
///
/// Carries the field bitmask plus the before/after values so reactive
/// handlers (death relay, timer bookkeeping) can act without re-reading the
/// record.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateDelta {
    /// The action that caused this transition.
    pub action: ItemAction,
    /// Which fields changed.
    pub changes: ItemChanges,
    pub before: ItemState,
    pub after: ItemState,
}

impl StateDelta {
    /// Creates a delta by comparing two states.
    pub fn from_states(action: ItemAction, before: &ItemState, after: &ItemState) -> Self {
        Self {
            action,
            changes: ItemChanges::from_states(before, after),
            before: *before,
            after: *after,
        }
    }

    /// Returns true if no field changed (no-op dispatch).
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// The actor whose death this transition recorded, if any.
    pub fn death(&self) -> Option<ActorId> {
        if self.changes.contains(ItemChanges::DEAD_HOLDER) {
            self.after.dead_holder
        } else {
            None
        }
    }

    /// True when the holder changed (equip, release, unequip or death).
    pub fn holder_changed(&self) -> bool {
        self.changes.contains(ItemChanges::HOLDER)
    }

    /// The holder after this transition when it was newly set.
    pub fn new_holder(&self) -> Option<ActorId> {
        if self.holder_changed() {
            self.after.holder
        } else {
            None
        }
    }
}
