//! Session-wide settings read from `config.toml`.

/// Settings shared by every instance in one authoritative session.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WorldConfig {
    /// Fixed damage seed. `None` draws a fresh seed per session.
    pub session_seed: Option<u64>,
    /// Regeneration tick period in milliseconds.
    pub regen_period_ms: u64,
    /// Destination handed to the respawn collaborator on death.
    pub respawn_destination: String,
    /// Longest wait on one respawn teleport, in milliseconds.
    pub respawn_timeout_ms: u64,
    pub command_buffer: usize,
    pub event_buffer: usize,
    /// Archetype names spawned when the session starts, in order.
    pub spawns: Vec<String>,
}

impl WorldConfig {
    pub const DEFAULT_REGEN_PERIOD_MS: u64 = 1_000;
    pub const DEFAULT_RESPAWN_DESTINATION: &'static str = "graveyard";
    pub const DEFAULT_RESPAWN_TIMEOUT_MS: u64 = 2_000;
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            session_seed: None,
            regen_period_ms: Self::DEFAULT_REGEN_PERIOD_MS,
            respawn_destination: Self::DEFAULT_RESPAWN_DESTINATION.to_owned(),
            respawn_timeout_ms: Self::DEFAULT_RESPAWN_TIMEOUT_MS,
            command_buffer: 64,
            event_buffer: 256,
            spawns: Vec::new(),
        }
    }
}
