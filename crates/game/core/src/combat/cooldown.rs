//! Per-holder attack rate limiting.
//!
//! An [`AttackSession`] exists from the moment an actor equips an instance
//! until the holder changes. It is owned by whoever serializes attack intents
//! for that instance and is never replicated.

use crate::config::{ArchetypeConfig, StrikeStyle};
use crate::state::{ActorId, InstanceId, ItemState, Stance, Tick};

/// Animation variant of a fired attack.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr, strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Strike {
    Shoot,
    OutwardSlash,
    InwardSlash,
}

impl Strike {
    /// Strike that follows `previous` for an alternating archetype.
    fn alternate(previous: Option<Strike>) -> Strike {
        match previous {
            Some(Strike::InwardSlash) => Strike::OutwardSlash,
            _ => Strike::InwardSlash,
        }
    }
}

/// Why an attack intent did not fire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackRejection {
    #[error("{actor} does not hold the item")]
    NotHolder { actor: ActorId },

    #[error("item is sheathed")]
    Sheathed,

    #[error("pickup grace period ends at {ready_at}")]
    PickupGrace { ready_at: Tick },

    #[error("cooling down until {ready_at}")]
    CoolingDown { ready_at: Tick },

    #[error("unknown instance {instance}")]
    UnknownInstance { instance: InstanceId },
}

/// Checks that `actor` may attack with an item in `state` at all.
///
/// Failing here never consumes the cooldown.
pub fn ensure_armed(
    state: &ItemState,
    actor: ActorId,
    config: &ArchetypeConfig,
) -> Result<(), AttackRejection> {
    if !state.is_held_by(actor) {
        return Err(AttackRejection::NotHolder { actor });
    }
    if config.has_stance && state.stance != Some(Stance::Active) {
        return Err(AttackRejection::Sheathed);
    }
    Ok(())
}

/// Cooldown bookkeeping for one holder of one instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttackSession {
    holder: ActorId,
    picked_up_at: Tick,
    next_allowed: Tick,
    last_strike: Option<Strike>,
}

impl AttackSession {
    /// Opens a session for `holder`, who equipped the item at `now`.
    pub fn start(holder: ActorId, now: Tick) -> Self {
        Self {
            holder,
            picked_up_at: now,
            next_allowed: Tick::ZERO,
            last_strike: None,
        }
    }

    pub fn holder(&self) -> ActorId {
        self.holder
    }

    pub fn picked_up_at(&self) -> Tick {
        self.picked_up_at
    }

    /// Earliest tick at which the next intent passes the cooldown.
    pub fn next_allowed(&self) -> Tick {
        self.next_allowed
    }

    /// Rate-checks an intent at `now`.
    ///
    /// On acceptance the cooldown restarts from `now` whether or not the
    /// attack goes on to hit anything.
    pub fn try_fire(
        &mut self,
        now: Tick,
        config: &ArchetypeConfig,
    ) -> Result<Strike, AttackRejection> {
        let grace_ends = self.picked_up_at.after(config.pickup_grace_ms);
        if now < grace_ends {
            return Err(AttackRejection::PickupGrace {
                ready_at: grace_ends,
            });
        }
        if now < self.next_allowed {
            return Err(AttackRejection::CoolingDown {
                ready_at: self.next_allowed,
            });
        }

        self.next_allowed = now.after(config.attack_speed_ms);
        let strike = match config.strike_style {
            StrikeStyle::Shoot => Strike::Shoot,
            StrikeStyle::Alternating => Strike::alternate(self.last_strike),
        };
        self.last_strike = Some(strike);
        Ok(strike)
    }
}
