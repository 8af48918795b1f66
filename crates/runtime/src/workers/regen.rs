//! Per-instance regeneration timers.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use game_core::{ActorId, InstanceId};

use super::simulation::Command;

/// Starts a timer that asks the worker to heal `holder` once per `period`.
///
/// The first tick fires one full period after the start. The task only holds
/// a weak sender, so it ends on its own once the worker is gone; the worker
/// aborts it when the holder changes.
pub(crate) fn spawn_regen_timer(
    instance: InstanceId,
    holder: ActorId,
    period: Duration,
    command_tx: mpsc::WeakSender<Command>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            let Some(tx) = command_tx.upgrade() else {
                break;
            };
            if tx
                .send(Command::RegenTick { instance, holder })
                .await
                .is_err()
            {
                break;
            }
        }
        tracing::trace!(target: "runtime::regen", %instance, %holder, "regen timer stopped");
    })
}
