//! Shared fakes for runtime integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use game_core::ActorId;
use runtime::{
    AimRay, HitTest, RayHit, RespawnError, RespawnService, Runtime, RuntimeConfig, RuntimeHandle,
};

pub const ALICE: ActorId = ActorId(1);
pub const BOB: ActorId = ActorId(2);
pub const CAROL: ActorId = ActorId(3);

/// Hit test that returns whatever the test last scripted.
#[derive(Clone, Default)]
pub struct ScriptedHits(Arc<Mutex<Option<RayHit>>>);

impl ScriptedHits {
    pub fn aim_at(&self, actor: ActorId, distance: f32) {
        *self.0.lock().unwrap() = Some(RayHit::actor(actor, distance));
    }

    pub fn set(&self, hit: Option<RayHit>) {
        *self.0.lock().unwrap() = hit;
    }
}

impl HitTest for ScriptedHits {
    fn raycast(&self, _ray: &AimRay) -> Option<RayHit> {
        *self.0.lock().unwrap()
    }
}

/// Respawn service that records every teleport.
#[derive(Clone, Default)]
pub struct RecordingRespawn(Arc<Mutex<Vec<(ActorId, String)>>>);

impl RecordingRespawn {
    pub fn teleports(&self) -> Vec<(ActorId, String)> {
        self.0.lock().unwrap().clone()
    }
}

#[async_trait]
impl RespawnService for RecordingRespawn {
    async fn teleport(&self, actor: ActorId, destination: &str) -> Result<(), RespawnError> {
        self.0.lock().unwrap().push((actor, destination.to_owned()));
        Ok(())
    }
}

/// Respawn service whose teleport never completes.
#[derive(Clone, Copy, Default)]
pub struct StalledRespawn;

#[async_trait]
impl RespawnService for StalledRespawn {
    async fn teleport(&self, _actor: ActorId, _destination: &str) -> Result<(), RespawnError> {
        std::future::pending().await
    }
}

pub struct Harness {
    pub runtime: Runtime,
    pub handle: RuntimeHandle,
    pub hits: ScriptedHits,
    pub respawn: RecordingRespawn,
}

pub fn start(seed: u64) -> Harness {
    start_with(RuntimeConfig {
        session_seed: Some(seed),
        ..RuntimeConfig::default()
    })
}

pub fn start_with(config: RuntimeConfig) -> Harness {
    let hits = ScriptedHits::default();
    let respawn = RecordingRespawn::default();
    let runtime = Runtime::builder()
        .config(config)
        .hit_test(hits.clone())
        .respawn(respawn.clone())
        .build();
    let handle = runtime.handle();
    Harness {
        runtime,
        handle,
        hits,
        respawn,
    }
}

pub fn aim() -> AimRay {
    AimRay::new([0.0, 1.5, 0.0], [0.0, 0.0, -1.0])
}

pub async fn wait_ms(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}
