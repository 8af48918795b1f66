mod common;

use std::time::Duration;

use common::{ALICE, BOB, start, start_with, wait_ms};
use game_core::{ArchetypeConfig, DamageAction};
use runtime::{RuntimeConfig, Topic};

#[tokio::test(start_paused = true)]
async fn regeneration_heals_once_per_period_while_held() {
    let h = start(9);
    let gun = h.handle.spawn(ArchetypeConfig::gun()).await.unwrap();
    h.handle.equip(gun, ALICE).await.unwrap();
    h.handle
        .dispatch(gun, DamageAction::new(ALICE, 50))
        .await
        .unwrap();

    wait_ms(999).await;
    assert_eq!(h.handle.query(gun).await.unwrap().state.health, Some(50));

    wait_ms(51).await;
    assert_eq!(h.handle.query(gun).await.unwrap().state.health, Some(60));

    wait_ms(2_000).await;
    assert_eq!(h.handle.query(gun).await.unwrap().state.health, Some(80));
}

#[tokio::test(start_paused = true)]
async fn regeneration_stops_after_unequip() {
    let h = start(9);
    let gun = h.handle.spawn(ArchetypeConfig::gun()).await.unwrap();
    h.handle.equip(gun, ALICE).await.unwrap();
    h.handle
        .dispatch(gun, DamageAction::new(ALICE, 50))
        .await
        .unwrap();
    h.handle.unequip(gun, ALICE).await.unwrap();
    let revision = h.handle.query(gun).await.unwrap().revision;

    let mut state_rx = h.handle.subscribe(Topic::State);
    wait_ms(5_000).await;

    assert!(state_rx.try_recv().is_err());
    assert_eq!(h.handle.query(gun).await.unwrap().revision, revision);
}

#[tokio::test(start_paused = true)]
async fn new_holder_gets_a_fresh_timer() {
    let h = start(9);
    let gun = h.handle.spawn(ArchetypeConfig::gun()).await.unwrap();
    h.handle.equip(gun, ALICE).await.unwrap();

    wait_ms(700).await;
    h.handle.unequip(gun, ALICE).await.unwrap();
    h.handle.equip(gun, BOB).await.unwrap();
    h.handle
        .dispatch(gun, DamageAction::new(BOB, 50))
        .await
        .unwrap();

    // Alice's timer would have fired at 1000ms; Bob's fires at 1700ms.
    wait_ms(500).await;
    assert_eq!(h.handle.query(gun).await.unwrap().state.health, Some(50));
    wait_ms(550).await;
    assert_eq!(h.handle.query(gun).await.unwrap().state.health, Some(60));
}

#[tokio::test(start_paused = true)]
async fn zero_rate_archetypes_never_regenerate() {
    let h = start(9);
    let sword = h.handle.spawn(ArchetypeConfig::sword()).await.unwrap();
    h.handle.equip(sword, ALICE).await.unwrap();
    h.handle
        .dispatch(sword, DamageAction::new(ALICE, 40))
        .await
        .unwrap();

    wait_ms(10_000).await;
    assert_eq!(h.handle.query(sword).await.unwrap().state.health, Some(60));
}

#[tokio::test(start_paused = true)]
async fn heal_at_full_health_publishes_nothing() {
    let h = start(9);
    let gun = h.handle.spawn(ArchetypeConfig::gun()).await.unwrap();
    h.handle.equip(gun, ALICE).await.unwrap();
    let mut state_rx = h.handle.subscribe(Topic::State);

    wait_ms(3_500).await;

    assert!(state_rx.try_recv().is_err());
    assert_eq!(h.handle.query(gun).await.unwrap().revision, 1);
}

#[tokio::test(start_paused = true)]
async fn zero_regen_period_still_ticks() {
    let h = start_with(RuntimeConfig {
        session_seed: Some(9),
        regen_period: Duration::ZERO,
        ..RuntimeConfig::default()
    });
    let gun = h.handle.spawn(ArchetypeConfig::gun()).await.unwrap();
    h.handle.equip(gun, ALICE).await.unwrap();
    h.handle
        .dispatch(gun, DamageAction::new(ALICE, 50))
        .await
        .unwrap();

    wait_ms(20).await;
    assert_eq!(h.handle.query(gun).await.unwrap().state.health, Some(100));
}
