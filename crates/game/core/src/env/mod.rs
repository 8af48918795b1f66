//! Read-only facts an action handler may consult.
//!
//! Handlers never see other instances or the clock; the [`ItemEnv`] gives
//! them exactly the identity and archetype parameters of the record they
//! are mutating.
mod rng;

pub use rng::{PcgRng, RngOracle, compute_seed};

use crate::config::ArchetypeConfig;
use crate::state::InstanceId;

/// Environment for one dispatch against one instance.
#[derive(Clone, Copy, Debug)]
pub struct ItemEnv<'a> {
    instance: InstanceId,
    config: &'a ArchetypeConfig,
}

impl<'a> ItemEnv<'a> {
    pub fn new(instance: InstanceId, config: &'a ArchetypeConfig) -> Self {
        Self { instance, config }
    }

    /// Identity of the instance being mutated.
    pub fn instance(&self) -> InstanceId {
        self.instance
    }

    pub fn has_stance(&self) -> bool {
        self.config.has_stance
    }
}
