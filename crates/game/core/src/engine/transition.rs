//! Three-phase transition driver.

use crate::action::ItemAction;
use crate::env::ItemEnv;
use crate::state::ItemState;

use super::errors::ExecuteError;

/// Runs `action` against `state` through the transition pipeline.
///
/// Phases:
/// 1. `pre_validate` - guard checks against the current state
/// 2. `apply` - mutate the working copy
/// 3. `post_validate` - data-model invariants on the result
///
/// `state` is left half-applied when post-validation fails; callers must pass
/// a working copy.
pub(super) fn drive_transition(
    action: &ItemAction,
    state: &mut ItemState,
    env: &ItemEnv<'_>,
) -> Result<(), ExecuteError> {
    let transition = action.transition();
    let name = action.as_snake_case();

    transition
        .pre_validate(state, env)
        .map_err(|reason| ExecuteError::Rejected {
            action: name,
            reason,
        })?;

    transition.apply(state, env);

    transition
        .post_validate(state, env)
        .map_err(|violation| ExecuteError::Invariant {
            action: name,
            violation,
        })
}
