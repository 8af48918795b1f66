pub mod common;
pub mod item;

pub use common::{ActorId, InstanceId, Tick};
pub use item::{ItemRecord, ItemState, MAX_HEALTH, Stance};
