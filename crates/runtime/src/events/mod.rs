//! Topic-based event bus for runtime events.
//!
//! State snapshots and combat notifications travel on separate topics, so
//! a replication layer never has to wade through combat chatter and a
//! combat log never sees snapshots.

mod bus;
mod subscription;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use subscription::InstanceSubscription;
pub use types::{CombatEvent, ItemStateEvent};
