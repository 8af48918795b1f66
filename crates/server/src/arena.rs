//! A flat arena standing in for the scene: actors are spheres at fixed
//! points, raycasts hit the nearest sphere along the ray.
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use game_core::ActorId;
use runtime::{AimRay, HitTest, RayHit, RespawnError, RespawnService};

type Point = [f32; 3];

/// Radius of the sphere each actor occupies.
const ACTOR_RADIUS: f32 = 0.5;

/// Shared actor positions. Clones see the same arena.
#[derive(Clone, Default)]
pub struct Arena {
    positions: Arc<RwLock<BTreeMap<ActorId, Point>>>,
    destinations: Arc<BTreeMap<String, Point>>,
}

impl Arena {
    /// Arena with named respawn points.
    pub fn with_destinations(destinations: impl IntoIterator<Item = (String, Point)>) -> Self {
        Self {
            positions: Arc::default(),
            destinations: Arc::new(destinations.into_iter().collect()),
        }
    }

    pub fn place(&self, actor: ActorId, at: Point) {
        self.write().insert(actor, at);
    }

    pub fn remove(&self, actor: ActorId) {
        self.write().remove(&actor);
    }

    pub fn position(&self, actor: ActorId) -> Option<Point> {
        self.read().get(&actor).copied()
    }

    /// Ray from `from` towards the current position of `to`.
    pub fn aim(&self, from: ActorId, to: ActorId) -> Option<AimRay> {
        let positions = self.read();
        let origin = *positions.get(&from)?;
        let target = *positions.get(&to)?;
        let direction = normalize(sub(target, origin))?;
        Some(AimRay::new(origin, direction))
    }

    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<ActorId, Point>> {
        self.positions
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<ActorId, Point>> {
        self.positions
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl HitTest for Arena {
    fn raycast(&self, ray: &AimRay) -> Option<RayHit> {
        let direction = normalize(ray.direction)?;
        self.read()
            .iter()
            .filter_map(|(actor, center)| {
                intersect_sphere(ray.origin, direction, *center).map(|t| RayHit::actor(*actor, t))
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}

#[async_trait]
impl RespawnService for Arena {
    async fn teleport(&self, actor: ActorId, destination: &str) -> Result<(), RespawnError> {
        let point = *self
            .destinations
            .get(destination)
            .ok_or_else(|| RespawnError::Failed(format!("unknown destination {destination}")))?;

        let mut positions = self.write();
        let slot = positions
            .get_mut(&actor)
            .ok_or(RespawnError::ActorGone(actor))?;
        *slot = point;
        tracing::info!(target: "server::arena", %actor, destination, ?point, "teleported");
        Ok(())
    }
}

/// Distance along the ray to the first surface of the sphere, if any.
/// Rays that start inside a sphere do not hit it.
fn intersect_sphere(origin: Point, direction: Point, center: Point) -> Option<f32> {
    let to_center = sub(center, origin);
    let along = dot(to_center, direction);
    if along <= 0.0 {
        return None;
    }
    let closest_sq = dot(to_center, to_center) - along * along;
    let radius_sq = ACTOR_RADIUS * ACTOR_RADIUS;
    if closest_sq > radius_sq {
        return None;
    }
    let t = along - (radius_sq - closest_sq).sqrt();
    (t > 0.0).then_some(t)
}

fn sub(a: Point, b: Point) -> Point {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn dot(a: Point, b: Point) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn normalize(v: Point) -> Option<Point> {
    let len = dot(v, v).sqrt();
    (len > f32::EPSILON).then(|| [v[0] / len, v[1] / len, v[2] / len])
}
