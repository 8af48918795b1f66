mod common;

use std::time::Duration;

use common::{ALICE, BOB, CAROL, StalledRespawn, aim, start, wait_ms};
use game_core::{
    ActorId, ArchetypeConfig, AttackRejection, DamageAction, HealAction, InstanceId, Strike, Tick,
};
use runtime::{
    AttackOutcome, CombatEvent, Event, ItemStateEvent, RayHit, Runtime, RuntimeConfig, Topic,
};

fn no_regen(config: ArchetypeConfig) -> ArchetypeConfig {
    ArchetypeConfig {
        regen_rate: 0,
        ..config
    }
}

fn drain_combat(rx: &mut tokio::sync::broadcast::Receiver<Event>) -> Vec<CombatEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        if let Event::Combat(event) = event {
            events.push(event);
        }
    }
    events
}

#[tokio::test(start_paused = true)]
async fn damage_heal_and_death_relay() {
    let h = start(5);
    let gun = h.handle.spawn(no_regen(ArchetypeConfig::gun())).await.unwrap();
    let mut snapshots = h.handle.subscribe_instance(gun);
    let mut combat_rx = h.handle.subscribe(Topic::Combat);

    h.handle.equip(gun, ALICE).await.unwrap();
    h.handle
        .dispatch(gun, DamageAction::new(ALICE, 40))
        .await
        .unwrap();
    assert_eq!(h.handle.query(gun).await.unwrap().state.health, Some(60));

    h.handle
        .dispatch(gun, HealAction::new(ALICE, 10))
        .await
        .unwrap();
    assert_eq!(h.handle.query(gun).await.unwrap().state.health, Some(70));

    h.handle
        .dispatch(gun, DamageAction::new(ALICE, 80))
        .await
        .unwrap();

    let mut states = Vec::new();
    for _ in 0..5 {
        states.push(snapshots.recv().await.unwrap());
    }
    let death = states[3].state();
    assert_eq!(death.holder, None);
    assert_eq!(death.health, None);
    assert_eq!(death.dead_holder, Some(ALICE));
    assert!(matches!(
        states[4],
        ItemStateEvent::Updated {
            cause: game_core::ItemAction::ResetDeath(_),
            ..
        }
    ));
    assert_eq!(states[4].state().dead_holder, None);

    let deaths = drain_combat(&mut combat_rx)
        .into_iter()
        .filter(|event| matches!(event, CombatEvent::Death { .. }))
        .count();
    assert_eq!(deaths, 1);
    assert_eq!(h.respawn.teleports(), [(ALICE, "graveyard".to_owned())]);

    // A new holder can pick the item up once the death has been relayed.
    assert!(h.handle.equip(gun, BOB).await.unwrap().is_applied());
}

#[tokio::test(start_paused = true)]
async fn stale_damage_for_previous_holder_is_ignored() {
    let h = start(5);
    let gun = h.handle.spawn(ArchetypeConfig::gun()).await.unwrap();
    h.handle.equip(gun, ALICE).await.unwrap();
    h.handle.unequip(gun, ALICE).await.unwrap();
    h.handle.equip(gun, BOB).await.unwrap();

    let outcome = h
        .handle
        .dispatch(gun, DamageAction::new(ALICE, 99))
        .await
        .unwrap();

    assert!(!outcome.is_applied());
    assert_eq!(h.handle.query(gun).await.unwrap().state.health, Some(100));
}

#[tokio::test(start_paused = true)]
async fn attack_relays_damage_to_the_targets_item() {
    let h = start(5);
    let x = h.handle.spawn(no_regen(ArchetypeConfig::gun())).await.unwrap();
    let y = h.handle.spawn(no_regen(ArchetypeConfig::gun())).await.unwrap();
    h.handle.equip(x, ALICE).await.unwrap();
    h.handle.equip(y, BOB).await.unwrap();
    let mut combat_rx = h.handle.subscribe(Topic::Combat);

    wait_ms(600).await;
    h.hits.aim_at(BOB, 1.0);
    let outcome = h.handle.attack(x, ALICE, aim()).await.unwrap();

    let hit = outcome.hit().expect("attack should land");
    assert_eq!(hit.target, BOB);
    assert!((33..=66).contains(&hit.damage));
    assert_eq!(
        h.handle.query(y).await.unwrap().state.health,
        Some(100 - hit.damage)
    );
    assert_eq!(h.handle.query(x).await.unwrap().state.health, Some(100));

    let events = drain_combat(&mut combat_rx);
    assert_eq!(
        events,
        [
            CombatEvent::Fired {
                instance: x,
                attacker: ALICE,
                strike: Strike::Shoot
            },
            CombatEvent::Attack {
                instance: x,
                attacker: ALICE,
                target: BOB,
                damage: hit.damage
            },
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn pickup_grace_blocks_immediate_attacks() {
    let h = start(5);
    let gun = h.handle.spawn(ArchetypeConfig::gun()).await.unwrap();
    h.handle.equip(gun, ALICE).await.unwrap();

    let outcome = h.handle.attack(gun, ALICE, aim()).await.unwrap();
    assert!(matches!(
        outcome,
        AttackOutcome::Rejected(AttackRejection::PickupGrace { .. })
    ));

    wait_ms(500).await;
    assert!(h.handle.attack(gun, ALICE, aim()).await.unwrap().is_fired());
}

#[tokio::test(start_paused = true)]
async fn intents_inside_cooldown_fire_once() {
    let h = start(5);
    let gun = h.handle.spawn(ArchetypeConfig::gun()).await.unwrap();
    h.handle.equip(gun, ALICE).await.unwrap();
    wait_ms(600).await;

    let first = h.handle.attack(gun, ALICE, aim()).await.unwrap();
    wait_ms(200).await;
    let second = h.handle.attack(gun, ALICE, aim()).await.unwrap();

    assert!(first.is_fired());
    match second {
        AttackOutcome::Rejected(AttackRejection::CoolingDown { ready_at }) => {
            assert_eq!(ready_at, Tick(1_100));
        }
        other => panic!("expected cooldown rejection, got {other:?}"),
    }

    wait_ms(300).await;
    assert!(h.handle.attack(gun, ALICE, aim()).await.unwrap().is_fired());
}

#[tokio::test(start_paused = true)]
async fn out_of_range_hits_fire_without_damage() {
    let h = start(5);
    let gun = h.handle.spawn(ArchetypeConfig::gun()).await.unwrap();
    let sword = h.handle.spawn(ArchetypeConfig::sword()).await.unwrap();
    let target = h.handle.spawn(ArchetypeConfig::katana()).await.unwrap();
    h.handle.equip(gun, ALICE).await.unwrap();
    h.handle.equip(sword, CAROL).await.unwrap();
    h.handle.equip(target, BOB).await.unwrap();
    wait_ms(600).await;

    h.hits.aim_at(BOB, 1.5);
    let outcome = h.handle.attack(gun, ALICE, aim()).await.unwrap();
    assert!(outcome.is_fired());
    assert_eq!(outcome.hit(), None);

    // Swords have no range limit.
    h.hits.aim_at(BOB, 40.0);
    let outcome = h.handle.attack(sword, CAROL, aim()).await.unwrap();
    assert!(outcome.hit().is_some());

    // Scenery never takes damage.
    wait_ms(500).await;
    h.hits.set(Some(RayHit {
        target: runtime::HitTarget::Scenery,
        distance: 0.5,
    }));
    assert_eq!(
        h.handle.attack(gun, ALICE, aim()).await.unwrap().hit(),
        None
    );
}

#[tokio::test(start_paused = true)]
async fn attacker_cannot_hit_themselves() {
    let h = start(5);
    let gun = h.handle.spawn(ArchetypeConfig::gun()).await.unwrap();
    h.handle.equip(gun, ALICE).await.unwrap();
    wait_ms(600).await;

    h.hits.aim_at(ALICE, 0.1);
    let outcome = h.handle.attack(gun, ALICE, aim()).await.unwrap();
    assert!(outcome.is_fired());
    assert_eq!(outcome.hit(), None);
    assert_eq!(h.handle.query(gun).await.unwrap().state.health, Some(100));
}

#[tokio::test(start_paused = true)]
async fn sheathed_sword_rejects_without_consuming_cooldown() {
    let h = start(5);
    let sword = h.handle.spawn(ArchetypeConfig::sword()).await.unwrap();
    h.handle.equip(sword, ALICE).await.unwrap();
    h.handle.sheathe(sword, ALICE).await.unwrap();

    assert_eq!(
        h.handle.attack(sword, ALICE, aim()).await.unwrap(),
        AttackOutcome::Rejected(AttackRejection::Sheathed)
    );

    h.handle.activate(sword, ALICE).await.unwrap();
    let strikes = [
        h.handle.attack(sword, ALICE, aim()).await.unwrap(),
        {
            wait_ms(500).await;
            h.handle.attack(sword, ALICE, aim()).await.unwrap()
        },
    ];

    let strikes: Vec<Strike> = strikes
        .iter()
        .map(|outcome| match outcome {
            AttackOutcome::Fired(report) => report.strike,
            other => panic!("expected a fired attack, got {other:?}"),
        })
        .collect();
    assert_eq!(strikes, [Strike::InwardSlash, Strike::OutwardSlash]);
}

#[tokio::test(start_paused = true)]
async fn only_the_holder_may_attack() {
    let h = start(5);
    let gun = h.handle.spawn(ArchetypeConfig::gun()).await.unwrap();
    h.handle.equip(gun, ALICE).await.unwrap();
    wait_ms(600).await;

    assert_eq!(
        h.handle.attack(gun, BOB, aim()).await.unwrap(),
        AttackOutcome::Rejected(AttackRejection::NotHolder { actor: BOB })
    );
    assert_eq!(
        h.handle.attack(InstanceId(42), ALICE, aim()).await.unwrap(),
        AttackOutcome::Rejected(AttackRejection::UnknownInstance {
            instance: InstanceId(42)
        })
    );
    // Neither rejection touched the holder's cooldown.
    assert!(h.handle.attack(gun, ALICE, aim()).await.unwrap().is_fired());
}

async fn roll_session(seed: u64) -> Vec<u32> {
    let h = start(seed);
    let gun = h.handle.spawn(ArchetypeConfig::gun()).await.unwrap();
    h.handle.equip(gun, ALICE).await.unwrap();
    h.hits.aim_at(ActorId(77), 1.0);

    let mut damages = Vec::new();
    for _ in 0..8 {
        wait_ms(500).await;
        let outcome = h.handle.attack(gun, ALICE, aim()).await.unwrap();
        damages.push(outcome.hit().expect("scripted hit").damage);
    }
    damages
}

#[tokio::test(start_paused = true)]
async fn damage_rolls_are_bounded_and_seeded() {
    let first = roll_session(1234).await;
    let replay = roll_session(1234).await;
    let other = roll_session(4321).await;

    assert_eq!(first, replay);
    assert_ne!(first, other);
    assert!(first.iter().all(|damage| (33..=66).contains(damage)));
}

#[tokio::test(start_paused = true)]
async fn stalled_respawn_does_not_freeze_other_instances() {
    let runtime = Runtime::builder()
        .config(RuntimeConfig {
            session_seed: Some(3),
            respawn_timeout: Duration::from_millis(500),
            ..RuntimeConfig::default()
        })
        .respawn(StalledRespawn)
        .build();
    let handle = runtime.handle();
    let sword = handle.spawn(no_regen(ArchetypeConfig::sword())).await.unwrap();
    let gun = handle.spawn(no_regen(ArchetypeConfig::gun())).await.unwrap();

    handle.equip(sword, ALICE).await.unwrap();
    tokio::time::timeout(
        Duration::from_secs(5),
        handle.dispatch(sword, DamageAction::new(ALICE, 200)),
    )
    .await
    .expect("lethal damage should return once the teleport times out")
    .unwrap();

    let equipped = tokio::time::timeout(Duration::from_secs(5), handle.equip(gun, BOB))
        .await
        .expect("unrelated instance should still be served")
        .unwrap();
    assert!(equipped.is_applied());

    let state = handle.query(sword).await.unwrap().state;
    assert_eq!(state.holder, None);
    assert_eq!(state.dead_holder, None);

    drop(handle);
    runtime.shutdown().await.unwrap();
}
