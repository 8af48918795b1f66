//! Action execution pipeline.
//!
//! The [`ItemEngine`] is the authoritative reducer for one [`ItemRecord`]. It
//! drives an action through the transition phases on a working copy, commits
//! the copy only when every phase succeeds, and reports what changed.

mod errors;
mod transition;

pub use errors::{ExecuteError, TransitionPhase};

use crate::action::ItemAction;
use crate::config::ArchetypeConfig;
use crate::env::ItemEnv;
use crate::state::{ItemRecord, StateDelta};

/// Complete outcome of a successful dispatch.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExecutionOutcome {
    /// Which fields changed. Empty when the handler ran but changed nothing.
    pub delta: StateDelta,
    /// Record revision after the dispatch.
    pub revision: u64,
}

impl ExecutionOutcome {
    /// True when the dispatch changed at least one field and must be
    /// published to observers.
    pub fn is_effective(&self) -> bool {
        !self.delta.is_empty()
    }
}

/// Applies actions to one item record.
///
/// All mutations flow through the three-phase pipeline:
/// pre_validate → apply → post_validate
pub struct ItemEngine<'a> {
    record: &'a mut ItemRecord,
}

impl<'a> ItemEngine<'a> {
    pub fn new(record: &'a mut ItemRecord) -> Self {
        Self { record }
    }

    /// Executes `action` with the instance's archetype parameters.
    ///
    /// The revision is bumped only when the committed state differs from the
    /// previous one.
    pub fn execute(
        &mut self,
        config: &ArchetypeConfig,
        action: &ItemAction,
    ) -> Result<ExecutionOutcome, ExecuteError> {
        let env = ItemEnv::new(self.record.instance, config);
        let before = self.record.state;
        let mut working = before;

        transition::drive_transition(action, &mut working, &env)?;

        let delta = StateDelta::from_states(*action, &before, &working);
        if !delta.is_empty() {
            self.record.state = working;
            self.record.revision += 1;
        }

        Ok(ExecutionOutcome {
            delta,
            revision: self.record.revision,
        })
    }
}
