//! Combat resolution.
//!
//! Pure functions and the per-holder attack session. Nothing here touches an
//! [`ItemState`](crate::ItemState) directly; the actions in
//! [`crate::action`] call into this module.
//!
//! - `damage`: health arithmetic and damage rolls
//! - `cooldown`: grace period, attack rate limiting, strike alternation

pub mod cooldown;
pub mod damage;

pub use cooldown::{AttackRejection, AttackSession, Strike, ensure_armed};
pub use damage::{HealthOutcome, apply_damage, apply_heal, roll_damage};
