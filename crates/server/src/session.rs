//! Scripted arena session and the JSON event stream.
use std::time::Duration;

use anyhow::{Context, Result, bail};
use game_core::{ActorId, ArchetypeConfig, InstanceId};
use game_content::ArchetypeCatalog;
use runtime::{
    AttackOutcome, DispatchOutcome, Event, ReplicationFrame, RuntimeHandle, StateMirror, Topic,
};
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;

use crate::arena::Arena;

pub const ALICE: ActorId = ActorId(1);
pub const BOB: ActorId = ActorId(2);

const ALICE_START: [f32; 3] = [0.0, 0.0, 0.0];
const BOB_START: [f32; 3] = [1.8, 0.0, 0.0];

/// Spawned instance with the configuration it was built from.
#[derive(Clone, Debug)]
pub struct Spawned {
    pub instance: InstanceId,
    pub config: ArchetypeConfig,
}

/// Spawns every listed archetype. Unknown names are skipped with a warning.
pub async fn spawn_all(
    handle: &RuntimeHandle,
    catalog: &ArchetypeCatalog,
    names: &[String],
) -> Result<Vec<Spawned>> {
    let mut spawned = Vec::with_capacity(names.len());
    for name in names {
        let Some(config) = catalog.get(name) else {
            tracing::warn!(target: "server::session", name, "unknown archetype, skipping");
            continue;
        };
        let instance = handle
            .spawn(config.clone())
            .await
            .with_context(|| format!("failed to spawn {name}"))?;
        spawned.push(Spawned {
            instance,
            config: config.clone(),
        });
    }
    Ok(spawned)
}

/// Totals reported when the duel ends.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DuelSummary {
    pub fired: usize,
    pub hits: usize,
    pub rejected: usize,
    pub deaths: usize,
    pub released_on_leave: usize,
}

/// Two actors fighting over the first two spawned instances.
pub struct Duel<'a> {
    handle: &'a RuntimeHandle,
    arena: &'a Arena,
    items: &'a [Spawned],
}

impl<'a> Duel<'a> {
    pub fn new(handle: &'a RuntimeHandle, arena: &'a Arena, items: &'a [Spawned]) -> Self {
        Self {
            handle,
            arena,
            items,
        }
    }

    /// Runs `rounds` exchanges, then both actors leave.
    pub async fn run(&self, rounds: u32) -> Result<DuelSummary> {
        let [alice_item, bob_item, rest @ ..] = self.items else {
            bail!("a duel needs at least two spawned instances");
        };

        self.arena.place(ALICE, ALICE_START);
        self.arena.place(BOB, BOB_START);

        // Picking up a spare first shows the release reaction when the
        // duel weapon is equipped.
        if let Some(spare) = rest.first() {
            self.equip(ALICE, spare).await?;
        }
        self.equip(ALICE, alice_item).await?;
        self.equip(BOB, bob_item).await?;

        if bob_item.config.has_stance {
            self.handle.sheathe(bob_item.instance, BOB).await?;
            self.handle.activate(bob_item.instance, BOB).await?;
        }

        let grace = alice_item
            .config
            .pickup_grace_ms
            .max(bob_item.config.pickup_grace_ms);
        tokio::time::sleep(Duration::from_millis(grace)).await;

        let round_gap = alice_item
            .config
            .attack_speed_ms
            .max(bob_item.config.attack_speed_ms);

        let mut summary = DuelSummary::default();
        for round in 0..rounds {
            tracing::debug!(target: "server::session", round, "round");
            for (attacker, target, item, start) in [
                (ALICE, BOB, alice_item, ALICE_START),
                (BOB, ALICE, bob_item, BOB_START),
            ] {
                self.ensure_holding(attacker, item, start, &mut summary)
                    .await?;
                self.strike(attacker, target, item, &mut summary).await?;
            }
            tokio::time::sleep(Duration::from_millis(round_gap)).await;
        }

        for actor in [ALICE, BOB] {
            summary.released_on_leave += self.handle.leave(actor).await?;
            self.arena.remove(actor);
        }

        Ok(summary)
    }

    async fn equip(&self, actor: ActorId, item: &Spawned) -> Result<DispatchOutcome> {
        let outcome = self.handle.equip(item.instance, actor).await?;
        tracing::info!(
            target: "server::session",
            %actor,
            instance = %item.instance,
            archetype = %item.config.name,
            ?outcome,
            "equip"
        );
        Ok(outcome)
    }

    /// Re-equips after a death. The respawn moved the actor away, so they
    /// walk back to their start first.
    async fn ensure_holding(
        &self,
        actor: ActorId,
        item: &Spawned,
        start: [f32; 3],
        summary: &mut DuelSummary,
    ) -> Result<()> {
        let record = self.handle.query(item.instance).await?;
        if record.state.is_held_by(actor) {
            return Ok(());
        }
        summary.deaths += 1;
        tracing::debug!(
            target: "server::session",
            %actor,
            from = ?self.arena.position(actor),
            "returning to start"
        );
        self.arena.place(actor, start);
        self.equip(actor, item).await?;
        Ok(())
    }

    async fn strike(
        &self,
        attacker: ActorId,
        target: ActorId,
        item: &Spawned,
        summary: &mut DuelSummary,
    ) -> Result<()> {
        let Some(aim) = self.arena.aim(attacker, target) else {
            return Ok(());
        };
        match self.handle.attack(item.instance, attacker, aim).await? {
            AttackOutcome::Fired(report) => {
                summary.fired += 1;
                if let Some(hit) = report.hit {
                    summary.hits += 1;
                    tracing::info!(
                        target: "server::session",
                        %attacker,
                        target = %hit.target,
                        damage = hit.damage,
                        strike = %report.strike,
                        "hit"
                    );
                }
            }
            AttackOutcome::Rejected(reason) => {
                summary.rejected += 1;
                tracing::debug!(target: "server::session", %attacker, %reason, "attack rejected");
            }
        }
        Ok(())
    }
}

/// Prints bus events as JSON lines and feeds state snapshots through the
/// replication codec into a mirror, the way a remote observer would.
///
/// Both tasks end once every sender on the bus is gone.
pub struct EventStream {
    state_task: JoinHandle<StateMirror>,
    combat_task: JoinHandle<usize>,
}

impl EventStream {
    pub fn start(handle: &RuntimeHandle, print: bool) -> Self {
        let state_rx = handle.subscribe(Topic::State);
        let combat_rx = handle.subscribe(Topic::Combat);
        Self {
            state_task: tokio::spawn(mirror_states(state_rx, print)),
            combat_task: tokio::spawn(count_combat(combat_rx, print)),
        }
    }

    /// Waits for the bus to close. Returns the mirror and the number of
    /// combat events seen.
    pub async fn finish(self) -> Result<(StateMirror, usize)> {
        let mirror = self.state_task.await.context("state stream panicked")?;
        let combat = self.combat_task.await.context("combat stream panicked")?;
        Ok((mirror, combat))
    }
}

async fn mirror_states(mut rx: broadcast::Receiver<Event>, print: bool) -> StateMirror {
    let mut mirror = StateMirror::new();
    while let Some(event) = next_event(&mut rx).await {
        if print {
            print_event(&event);
        }
        let Event::State(state) = event else {
            continue;
        };
        let applied = ReplicationFrame::from(&state)
            .encode()
            .and_then(|bytes| mirror.apply_bytes(&bytes));
        if let Err(err) = applied {
            tracing::warn!(target: "server::stream", %err, "replication frame dropped");
        }
    }
    mirror
}

async fn count_combat(mut rx: broadcast::Receiver<Event>, print: bool) -> usize {
    let mut seen = 0;
    while let Some(event) = next_event(&mut rx).await {
        if print {
            print_event(&event);
        }
        seen += 1;
    }
    seen
}

async fn next_event(rx: &mut broadcast::Receiver<Event>) -> Option<Event> {
    loop {
        match rx.recv().await {
            Ok(event) => return Some(event),
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(target: "server::stream", skipped, "event stream lagged");
            }
            Err(RecvError::Closed) => return None,
        }
    }
}

fn print_event(event: &Event) {
    let line = serde_json::json!({
        "topic": event.topic(),
        "event": event,
    });
    println!("{line}");
}
