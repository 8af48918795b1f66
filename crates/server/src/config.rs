//! Server configuration: environment first, then command-line overrides.
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;

/// Data directory shipped with `game-content`.
const BUNDLED_DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../game/content/data");

/// Everything the server needs before the runtime starts.
#[derive(Clone, Debug, PartialEq)]
pub struct ServerConfig {
    /// Directory holding `config.toml` and `archetypes.ron`.
    pub data_dir: PathBuf,
    pub session_id: Option<String>,
    /// Root for per-session log directories. Platform cache dir when unset.
    pub log_dir: Option<PathBuf>,
    /// Overrides the seed from `config.toml`.
    pub session_seed: Option<u64>,
    /// Attack attempts per combatant in the scripted arena.
    pub duel_rounds: u32,
    /// Print every bus event to stdout as one JSON object per line.
    pub stream_events: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(BUNDLED_DATA_DIR),
            session_id: None,
            log_dir: None,
            session_seed: None,
            duel_rounds: 8,
            stream_events: true,
        }
    }
}

impl ServerConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `HOLDABLE_DATA_DIR` - Content directory (default: bundled data)
    /// - `HOLDABLE_SESSION_ID` - Session identifier for logs (default: auto-generated)
    /// - `HOLDABLE_LOG_DIR` - Log root (default: platform cache dir)
    /// - `HOLDABLE_SESSION_SEED` - Damage seed override
    /// - `HOLDABLE_DUEL_ROUNDS` - Attack attempts per combatant (default: 8)
    /// - `HOLDABLE_STREAM_EVENTS` - JSON event stream on stdout (default: true)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("HOLDABLE_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        config.session_id = env::var("HOLDABLE_SESSION_ID").ok();
        config.log_dir = env::var("HOLDABLE_LOG_DIR").ok().map(PathBuf::from);
        config.session_seed = read_env::<u64>("HOLDABLE_SESSION_SEED");

        if let Some(rounds) = read_env::<u32>("HOLDABLE_DUEL_ROUNDS") {
            config.duel_rounds = rounds;
        }
        if let Some(stream) = read_env::<bool>("HOLDABLE_STREAM_EVENTS") {
            config.stream_events = stream;
        }

        config
    }

    /// Flags given on the command line win over the environment.
    pub fn apply(mut self, cli: Cli) -> Self {
        if let Some(dir) = cli.data_dir {
            self.data_dir = dir;
        }
        if cli.session_id.is_some() {
            self.session_id = cli.session_id;
        }
        if cli.log_dir.is_some() {
            self.log_dir = cli.log_dir;
        }
        if cli.seed.is_some() {
            self.session_seed = cli.seed;
        }
        if let Some(rounds) = cli.rounds {
            self.duel_rounds = rounds;
        }
        if cli.quiet {
            self.stream_events = false;
        }
        self
    }
}

/// Command-line flags for the authoritative server.
#[derive(Parser, Debug, Default)]
#[command(name = "holdable-server", version, about = "Authoritative holdable-item session")]
pub struct Cli {
    /// Content directory holding config.toml and archetypes.ron
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Session identifier used for the log directory
    #[arg(long)]
    pub session_id: Option<String>,

    /// Root directory for session logs
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// Fixed damage seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Attack attempts per combatant
    #[arg(long)]
    pub rounds: Option<u32>,

    /// Do not print events to stdout
    #[arg(long, short)]
    pub quiet: bool,
}

fn read_env<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|value| value.parse().ok())
}
