//! Content factory for loading everything a session needs from one directory.

use std::path::{Path, PathBuf};

use crate::loaders::{ArchetypeLoader, ConfigLoader, LoadResult};
use crate::{ArchetypeCatalog, WorldConfig};

/// Content factory that loads session content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// └── archetypes.ron
/// ```
///
/// Both files are optional: a missing `config.toml` yields
/// [`WorldConfig::default`] and a missing `archetypes.ron` leaves only the
/// built-in presets.
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub const CONFIG_FILE: &'static str = "config.toml";
    pub const ARCHETYPES_FILE: &'static str = "archetypes.ron";

    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load world configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<WorldConfig> {
        let path = self.data_dir.join(Self::CONFIG_FILE);
        if !path.exists() {
            tracing::info!(path = %path.display(), "no world config, using defaults");
            return Ok(WorldConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Built-in presets overlaid with `archetypes.ron`.
    pub fn load_catalog(&self) -> LoadResult<ArchetypeCatalog> {
        let mut catalog = ArchetypeCatalog::builtin();
        let path = self.data_dir.join(Self::ARCHETYPES_FILE);
        if path.exists() {
            catalog.merge(ArchetypeLoader::load(&path)?);
        } else {
            tracing::info!(path = %path.display(), "no archetype catalog, using presets");
        }
        Ok(catalog)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn empty_directory_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let factory = ContentFactory::new(dir.path());

        assert_eq!(factory.load_config().unwrap(), WorldConfig::default());
        assert_eq!(factory.load_catalog().unwrap(), ArchetypeCatalog::builtin());
    }

    #[test]
    fn loads_files_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(ContentFactory::CONFIG_FILE),
            "session_seed = 7\nspawns = [\"gun\", \"lance\"]\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join(ContentFactory::ARCHETYPES_FILE),
            r#"(archetypes: [(name: "lance", min_damage: 5, max_damage: 9, regen_rate: 2, attack_speed_ms: 700)])"#,
        )
        .unwrap();

        let factory = ContentFactory::new(dir.path());
        let config = factory.load_config().unwrap();
        let catalog = factory.load_catalog().unwrap();

        assert_eq!(config.session_seed, Some(7));
        assert!(config.spawns.iter().all(|name| catalog.contains(name)));
        assert_eq!(catalog.len(), 5);
    }

    #[test]
    fn malformed_catalog_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(ContentFactory::ARCHETYPES_FILE);
        std::fs::write(&path, "(archetypes: [oops])").unwrap();

        let err = ContentFactory::new(dir.path()).load_catalog().unwrap_err();
        assert!(format!("{err:#}").contains("archetypes.ron"));
    }

    #[test]
    fn bundled_data_directory_loads() {
        let factory = ContentFactory::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data"));
        let config = factory.load_config().unwrap();
        let catalog = factory.load_catalog().unwrap();

        assert!(!config.spawns.is_empty());
        for name in &config.spawns {
            assert!(catalog.contains(name), "{name} missing from catalog");
        }
    }
}
