//! Health arithmetic and damage rolls.

use crate::config::ArchetypeConfig;
use crate::env::RngOracle;
use crate::state::MAX_HEALTH;

/// Result of subtracting damage from a holder's health.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HealthOutcome {
    /// Holder survives with the given health (always > 0).
    Alive(u32),
    /// Health reached zero or below.
    Depleted,
}

/// Subtracts `amount` from `current`. Reaching zero counts as death.
pub fn apply_damage(current: u32, amount: u32) -> HealthOutcome {
    match current.saturating_sub(amount) {
        0 => HealthOutcome::Depleted,
        remaining => HealthOutcome::Alive(remaining),
    }
}

/// Adds `amount` to `current`, clamped to [`MAX_HEALTH`].
pub fn apply_heal(current: u32, amount: u32) -> u32 {
    current.saturating_add(amount).min(MAX_HEALTH)
}

/// Uniform integer roll in `[min_damage, max_damage]`.
pub fn roll_damage(rng: &(impl RngOracle + ?Sized), seed: u64, config: &ArchetypeConfig) -> u32 {
    rng.range(seed, config.min_damage, config.max_damage)
}
