//! Simulation worker that owns every authoritative [`ItemRecord`].
//!
//! Receives commands from [`RuntimeHandle`](crate::RuntimeHandle), executes
//! actions via [`game_core::ItemEngine`], and publishes snapshots and combat
//! events to the [`EventBus`]. Reactions to combat events (release, damage
//! relay, death relay) run to completion before the next command is read.

use std::collections::{BTreeMap, VecDeque};
use std::ops::ControlFlow;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, error, info, trace, warn};

use game_core::{
    ActorId, ArchetypeConfig, AttackRejection, AttackSession, ExecuteError, HealAction,
    InstanceId, ItemAction, ItemEngine, ItemRecord, PcgRng, Tick, UnequipAction, compute_seed,
    ensure_armed, roll_damage,
};

use super::regen::spawn_regen_timer;
use crate::api::{
    AimRay, AttackOutcome, AttackReport, DispatchOutcome, HitReport, HitTest, Result,
    RuntimeError,
};
use crate::events::{CombatEvent, EventBus, ItemStateEvent};
use crate::handlers::{Dispatch, DispatchTarget, HandlerRegistry};

/// Commands that can be sent to the simulation worker
pub enum Command {
    /// Register a new instance with the given archetype parameters.
    Spawn {
        config: ArchetypeConfig,
        reply: oneshot::Sender<Result<InstanceId>>,
    },
    /// Apply one action to one instance.
    Dispatch {
        instance: InstanceId,
        action: ItemAction,
        reply: oneshot::Sender<Result<DispatchOutcome>>,
    },
    /// Attack intent from the current holder.
    Attack {
        instance: InstanceId,
        actor: ActorId,
        aim: AimRay,
        reply: oneshot::Sender<AttackOutcome>,
    },
    /// Actor disconnected; unequip everything they hold.
    /// Replies with the number of instances released.
    Leave {
        actor: ActorId,
        reply: oneshot::Sender<usize>,
    },
    /// Query one record (read-only).
    Query {
        instance: InstanceId,
        reply: oneshot::Sender<Option<ItemRecord>>,
    },
    /// Query every record, ordered by instance id.
    QueryAll {
        reply: oneshot::Sender<Vec<ItemRecord>>,
    },
    /// Sent by regeneration timers.
    RegenTick {
        instance: InstanceId,
        holder: ActorId,
    },
    Shutdown,
}

/// Everything the worker needs besides its own state.
pub(crate) struct WorkerSetup {
    pub command_rx: mpsc::Receiver<Command>,
    pub command_tx: mpsc::WeakSender<Command>,
    pub event_bus: EventBus,
    pub handlers: HandlerRegistry,
    pub hit_test: Arc<dyn HitTest>,
    pub regen_period: Duration,
    pub session_seed: u64,
}

/// One instance: its record plus worker-private bookkeeping.
struct Slot {
    record: ItemRecord,
    config: Arc<ArchetypeConfig>,
    session: Option<AttackSession>,
    regen: Option<JoinHandle<()>>,
}

impl Slot {
    fn stop_regen(&mut self) {
        if let Some(timer) = self.regen.take() {
            timer.abort();
        }
    }
}

/// Background task that processes item commands.
pub struct SimulationWorker {
    slots: BTreeMap<InstanceId, Slot>,
    /// `None` once every id has been handed out.
    next_instance: Option<u32>,
    command_rx: mpsc::Receiver<Command>,
    command_tx: mpsc::WeakSender<Command>,
    event_bus: EventBus,
    handlers: HandlerRegistry,
    hit_test: Arc<dyn HitTest>,
    regen_period: Duration,
    session_seed: u64,
    attack_nonce: u64,
    rng: PcgRng,
    epoch: Instant,
}

impl SimulationWorker {
    pub(crate) fn new(setup: WorkerSetup) -> Self {
        info!(
            target: "runtime::worker",
            handlers = ?setup.handlers.names(),
            regen_period_ms = setup.regen_period.as_millis() as u64,
            "SimulationWorker initialized"
        );

        Self {
            slots: BTreeMap::new(),
            next_instance: Some(1),
            command_rx: setup.command_rx,
            command_tx: setup.command_tx,
            event_bus: setup.event_bus,
            handlers: setup.handlers,
            hit_test: setup.hit_test,
            regen_period: setup.regen_period,
            session_seed: setup.session_seed,
            attack_nonce: 0,
            rng: PcgRng,
            epoch: Instant::now(),
        }
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        while let Some(cmd) = self.command_rx.recv().await {
            if self.handle_command(cmd).await.is_break() {
                break;
            }
        }

        for slot in self.slots.values_mut() {
            slot.stop_regen();
        }
        info!(target: "runtime::worker", "SimulationWorker stopped");
    }

    async fn handle_command(&mut self, cmd: Command) -> ControlFlow<()> {
        match cmd {
            Command::Spawn { config, reply } => {
                let result = self.spawn(config);
                send_reply(reply, result, "Spawn");
            }
            Command::Dispatch {
                instance,
                action,
                reply,
            } => {
                let result = self.dispatch(instance, action).await;
                send_reply(reply, result, "Dispatch");
            }
            Command::Attack {
                instance,
                actor,
                aim,
                reply,
            } => {
                let outcome = self.attack(instance, actor, aim).await;
                send_reply(reply, outcome, "Attack");
            }
            Command::Leave { actor, reply } => {
                let released = self.leave(actor).await;
                send_reply(reply, released, "Leave");
            }
            Command::Query { instance, reply } => {
                let record = self.slots.get(&instance).map(|slot| slot.record);
                send_reply(reply, record, "Query");
            }
            Command::QueryAll { reply } => {
                let records = self.slots.values().map(|slot| slot.record).collect();
                send_reply(reply, records, "QueryAll");
            }
            Command::RegenTick { instance, holder } => {
                self.regen_tick(instance, holder).await;
            }
            Command::Shutdown => return ControlFlow::Break(()),
        }
        ControlFlow::Continue(())
    }

    /// Milliseconds since the worker started, from the monotonic clock.
    fn now(&self) -> Tick {
        let elapsed = self.epoch.elapsed().as_millis();
        Tick::from_millis(u64::try_from(elapsed).unwrap_or(u64::MAX))
    }

    fn spawn(&mut self, config: ArchetypeConfig) -> Result<InstanceId> {
        config.validate()?;

        let id = self
            .next_instance
            .ok_or(RuntimeError::InstancesExhausted)?;
        let instance = InstanceId(id);
        self.next_instance = id.checked_add(1);

        let record = ItemRecord::new(instance);
        info!(
            target: "runtime::worker",
            %instance,
            archetype = %config.name,
            "instance spawned"
        );
        self.event_bus.publish(ItemStateEvent::Spawned {
            instance,
            archetype: config.name.clone(),
            state: record.state,
        });
        self.slots.insert(
            instance,
            Slot {
                record,
                config: Arc::new(config),
                session: None,
                regen: None,
            },
        );
        Ok(instance)
    }

    /// Applies one action and every reaction it triggers.
    async fn dispatch(
        &mut self,
        instance: InstanceId,
        action: ItemAction,
    ) -> Result<DispatchOutcome> {
        let mut pending = VecDeque::new();
        let outcome = self.apply(instance, &action, &mut pending);
        self.drain(pending).await;
        outcome
    }

    /// Runs `action` through the engine for one record.
    ///
    /// This is the ONLY method that calls `ItemEngine::execute()`, so every
    /// effective mutation publishes exactly one snapshot and keeps timers and
    /// attack sessions in step with the holder. Combat events raised by the
    /// mutation are queued on `pending`.
    fn apply(
        &mut self,
        instance: InstanceId,
        action: &ItemAction,
        pending: &mut VecDeque<CombatEvent>,
    ) -> Result<DispatchOutcome> {
        let now = self.now();
        let slot = self
            .slots
            .get_mut(&instance)
            .ok_or(RuntimeError::UnknownInstance(instance))?;

        let outcome = match ItemEngine::new(&mut slot.record).execute(&slot.config, action) {
            Ok(outcome) => outcome,
            Err(ExecuteError::Rejected { action, reason }) => {
                debug!(
                    target: "runtime::worker",
                    %instance,
                    action,
                    %reason,
                    "dispatch rejected"
                );
                return Ok(DispatchOutcome::Rejected(reason));
            }
            Err(error) => {
                error!(
                    target: "runtime::worker",
                    %instance,
                    phase = error.phase().as_str(),
                    %error,
                    "dispatch discarded"
                );
                return Err(RuntimeError::Execute(error));
            }
        };

        if !outcome.is_effective() {
            trace!(
                target: "runtime::worker",
                %instance,
                action = action.as_snake_case(),
                "dispatch changed nothing"
            );
            return Ok(DispatchOutcome::Unchanged);
        }

        let delta = &outcome.delta;
        if delta.holder_changed() {
            slot.stop_regen();
            slot.session = None;

            if let Some(holder) = delta.new_holder() {
                let session = AttackSession::start(holder, now);
                trace!(
                    target: "runtime::worker",
                    %instance,
                    %holder,
                    picked_up_at = session.picked_up_at().as_millis(),
                    "attack session started"
                );
                slot.session = Some(session);
                if slot.config.regen_rate > 0 {
                    slot.regen = Some(spawn_regen_timer(
                        instance,
                        holder,
                        self.regen_period,
                        self.command_tx.clone(),
                    ));
                }
            }
        }

        if let ItemAction::Equip(equip) = action {
            pending.push_back(CombatEvent::Held {
                instance,
                actor: equip.actor,
            });
        }
        if let Some(actor) = delta.death() {
            info!(target: "runtime::worker", %instance, %actor, "holder died");
            pending.push_back(CombatEvent::Death { instance, actor });
        }

        debug!(
            target: "runtime::worker",
            %instance,
            action = action.as_snake_case(),
            actor = ?action.actor(),
            revision = outcome.revision,
            changes = ?delta.changes,
            "dispatch applied"
        );
        self.event_bus.publish(ItemStateEvent::Updated {
            instance,
            revision: outcome.revision,
            state: slot.record.state,
            cause: *action,
        });

        Ok(DispatchOutcome::Applied {
            revision: outcome.revision,
            changes: delta.changes,
        })
    }

    /// Publishes queued combat events and applies every handler reaction,
    /// including events raised by those reactions.
    async fn drain(&mut self, mut pending: VecDeque<CombatEvent>) {
        while let Some(event) = pending.pop_front() {
            trace!(target: "runtime::worker", event = event.as_snake_case(), "relaying");
            self.event_bus.publish(event.clone());

            let handlers = self.handlers.clone();
            for handler in handlers.iter() {
                for dispatch in handler.react(&event).await {
                    self.apply_reaction(handler.name(), dispatch, &mut pending);
                }
            }
        }
    }

    fn apply_reaction(
        &mut self,
        handler: &'static str,
        dispatch: Dispatch,
        pending: &mut VecDeque<CombatEvent>,
    ) {
        let targets: Vec<InstanceId> = match dispatch.target {
            DispatchTarget::Instance(instance) => vec![instance],
            DispatchTarget::All => self.slots.keys().copied().collect(),
        };

        for instance in targets {
            if let Err(error) = self.apply(instance, &dispatch.action, pending) {
                warn!(
                    target: "runtime::handlers",
                    handler,
                    %instance,
                    %error,
                    "reaction dispatch failed"
                );
            }
        }
    }

    async fn attack(&mut self, instance: InstanceId, actor: ActorId, aim: AimRay) -> AttackOutcome {
        let now = self.now();
        match self.fire(instance, actor, &aim, now) {
            Ok((report, events)) => {
                self.drain(events).await;
                AttackOutcome::Fired(report)
            }
            Err(rejection) => {
                debug!(
                    target: "runtime::worker",
                    %instance,
                    %actor,
                    %rejection,
                    "attack rejected"
                );
                AttackOutcome::Rejected(rejection)
            }
        }
    }

    /// Rate check, hit test and damage roll for one intent.
    ///
    /// Holder and stance refusals come before the cooldown and do not
    /// consume it.
    fn fire(
        &mut self,
        instance: InstanceId,
        attacker: ActorId,
        aim: &AimRay,
        now: Tick,
    ) -> std::result::Result<(AttackReport, VecDeque<CombatEvent>), AttackRejection> {
        let slot = self
            .slots
            .get_mut(&instance)
            .ok_or(AttackRejection::UnknownInstance { instance })?;

        ensure_armed(&slot.record.state, attacker, &slot.config)?;
        let session = slot
            .session
            .as_mut()
            .filter(|session| session.holder() == attacker)
            .ok_or(AttackRejection::NotHolder { actor: attacker })?;
        let strike = session.try_fire(now, &slot.config)?;

        let nonce = self.attack_nonce;
        self.attack_nonce += 1;

        let config = &slot.config;
        let hit = self.hit_test.raycast(aim).and_then(|hit| {
            let target = hit.actor_id()?;
            if target == attacker || !config.in_range(hit.distance) {
                return None;
            }
            let seed = compute_seed(self.session_seed, nonce, attacker.seed_bits(), instance.0);
            Some(HitReport {
                target,
                damage: roll_damage(&self.rng, seed, config),
                distance: hit.distance,
            })
        });

        let mut events = VecDeque::from([CombatEvent::Fired {
            instance,
            attacker,
            strike,
        }]);
        if let Some(hit) = hit {
            info!(
                target: "runtime::worker",
                %instance,
                %attacker,
                target_actor = %hit.target,
                damage = hit.damage,
                "attack landed"
            );
            events.push_back(CombatEvent::Attack {
                instance,
                attacker,
                target: hit.target,
                damage: hit.damage,
            });
        }

        let report = AttackReport {
            instance,
            attacker,
            strike,
            hit,
        };
        Ok((report, events))
    }

    async fn leave(&mut self, actor: ActorId) -> usize {
        let unequip = ItemAction::from(UnequipAction::new(actor));
        let instances: Vec<InstanceId> = self.slots.keys().copied().collect();
        let mut pending = VecDeque::new();
        let mut released = 0;

        for instance in instances {
            match self.apply(instance, &unequip, &mut pending) {
                Ok(outcome) if outcome.is_applied() => released += 1,
                Ok(_) => {}
                Err(error) => {
                    warn!(target: "runtime::worker", %instance, %actor, %error, "unequip on leave failed");
                }
            }
        }
        self.drain(pending).await;

        info!(target: "runtime::worker", %actor, released, "actor left");
        released
    }

    async fn regen_tick(&mut self, instance: InstanceId, holder: ActorId) {
        let Some(slot) = self.slots.get(&instance) else {
            return;
        };
        let heal = HealAction::new(holder, slot.config.regen_rate);
        if let Err(error) = self.dispatch(instance, heal.into()).await {
            warn!(target: "runtime::regen", %instance, %holder, %error, "regen tick failed");
        }
    }
}

fn send_reply<T>(reply: oneshot::Sender<T>, value: T, command: &'static str) {
    if reply.send(value).is_err() {
        debug!(target: "runtime::worker", command, "reply channel closed (caller dropped)");
    }
}
