//! Results reported back to the requester of a dispatch or attack.
use serde::{Deserialize, Serialize};

use game_core::{ActorId, AttackRejection, GuardRejection, InstanceId, ItemChanges, Strike};

/// What a dispatch did to its record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DispatchOutcome {
    /// State changed and was published at `revision`.
    Applied {
        revision: u64,
        changes: ItemChanges,
    },
    /// The handler ran but changed nothing; nothing was published.
    Unchanged,
    /// A guard refused the action; nothing was published.
    Rejected(GuardRejection),
}

impl DispatchOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, DispatchOutcome::Applied { .. })
    }
}

/// Damage dealt by a fired attack.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HitReport {
    pub target: ActorId,
    pub damage: u32,
    pub distance: f32,
}

/// An attack that passed the rate check.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttackReport {
    pub instance: InstanceId,
    pub attacker: ActorId,
    pub strike: Strike,
    /// `None` when the ray missed or the target was not admissible.
    pub hit: Option<HitReport>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum AttackOutcome {
    Fired(AttackReport),
    Rejected(AttackRejection),
}

impl AttackOutcome {
    pub fn is_fired(&self) -> bool {
        matches!(self, AttackOutcome::Fired(_))
    }

    pub fn hit(&self) -> Option<HitReport> {
        match self {
            AttackOutcome::Fired(report) => report.hit,
            AttackOutcome::Rejected(_) => None,
        }
    }
}
