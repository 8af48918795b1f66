//! World configuration loader.

use std::path::Path;

use anyhow::Context;

use crate::WorldConfig;
use crate::loaders::{LoadResult, read_file};

/// Loader for world configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a [`WorldConfig`] from a TOML file. Missing keys take defaults.
    pub fn load(path: &Path) -> LoadResult<WorldConfig> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<WorldConfig> {
        let config: WorldConfig =
            toml::from_str(content).context("Failed to parse world config TOML")?;
        if config.regen_period_ms == 0 {
            anyhow::bail!("regen_period_ms must be greater than zero");
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        assert_eq!(ConfigLoader::parse("").unwrap(), WorldConfig::default());
    }

    #[test]
    fn overrides_are_applied() {
        let config = ConfigLoader::parse(
            r#"
            session_seed = 42
            regen_period_ms = 250
            respawn_destination = "spawn_room"
            spawns = ["gun", "sword"]
            "#,
        )
        .unwrap();

        assert_eq!(config.session_seed, Some(42));
        assert_eq!(config.regen_period_ms, 250);
        assert_eq!(config.respawn_destination, "spawn_room");
        assert_eq!(config.spawns, ["gun", "sword"]);
        assert_eq!(config.command_buffer, 64);
    }

    #[test]
    fn zero_regen_period_is_rejected() {
        assert!(ConfigLoader::parse("regen_period_ms = 0").is_err());
    }
}
