//! Data-driven content definitions and loaders.
//!
//! This crate houses the static content an authoritative session is booted
//! with:
//! - Archetype catalogs (data-driven via RON)
//! - World configuration (data-driven via TOML)
//!
//! Content is read once at startup and never appears in replicated state.
//! Built-in presets from [`game_core::Archetype`] are always available, so a
//! missing catalog is not fatal.

pub mod catalog;
pub mod world;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::ArchetypeCatalog;
pub use world::WorldConfig;

#[cfg(feature = "loaders")]
pub use loaders::{ArchetypeLoader, ConfigLoader, ContentFactory, LoadResult};
