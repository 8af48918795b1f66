//! Per-archetype static parameters.
//!
//! Gun, sword, katana and the generic weapon share one rule set; they differ
//! only in the values below. A config is fixed when an instance is spawned and
//! never changes for that instance's lifetime.

use crate::error::ConfigError;

/// Built-in archetypes with preset parameters.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Archetype {
    Gun,
    Sword,
    Katana,
    Weapon,
}

impl Archetype {
    /// Preset configuration for this archetype.
    pub fn config(self) -> ArchetypeConfig {
        match self {
            Archetype::Gun => ArchetypeConfig::gun(),
            Archetype::Sword => ArchetypeConfig::sword(),
            Archetype::Katana => ArchetypeConfig::katana(),
            Archetype::Weapon => ArchetypeConfig::weapon(),
        }
    }
}

/// How successive fired attacks are tagged for animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StrikeStyle {
    /// Every attack is a `shoot`.
    #[default]
    Shoot,
    /// Attacks alternate between the inward and outward slash.
    Alternating,
}

/// Asset references forwarded to presentation collaborators.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AssetRefs {
    pub model: String,
    pub equip_audio: String,
    pub attack_audio: String,
}

impl AssetRefs {
    fn new(model: &str, equip_audio: &str, attack_audio: &str) -> Self {
        Self {
            model: model.to_owned(),
            equip_audio: equip_audio.to_owned(),
            attack_audio: attack_audio.to_owned(),
        }
    }
}

/// Static combat parameters for one archetype.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArchetypeConfig {
    /// Display name, also the catalog key in content files.
    pub name: String,
    /// Inclusive lower bound of a damage roll.
    pub min_damage: u32,
    /// Inclusive upper bound of a damage roll.
    pub max_damage: u32,
    /// Health restored per regeneration tick. Zero disables regeneration.
    pub regen_rate: u32,
    /// Cooldown between accepted attacks, in milliseconds.
    pub attack_speed_ms: u64,
    /// Maximum hit distance (exclusive). `None` accepts any distance.
    #[cfg_attr(feature = "serde", serde(default))]
    pub attack_range: Option<f32>,
    /// Time after equip during which attacks are ignored, in milliseconds.
    #[cfg_attr(feature = "serde", serde(default))]
    pub pickup_grace_ms: u64,
    /// Whether the item can be toggled between active and sheathed.
    #[cfg_attr(feature = "serde", serde(default))]
    pub has_stance: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub strike_style: StrikeStyle,
    #[cfg_attr(feature = "serde", serde(default))]
    pub assets: AssetRefs,
}

impl ArchetypeConfig {
    pub const DEFAULT_MIN_DAMAGE: u32 = 33;
    pub const DEFAULT_MAX_DAMAGE: u32 = 66;
    pub const DEFAULT_REGEN_RATE: u32 = 10;
    pub const DEFAULT_ATTACK_RANGE: f32 = 1.5;
    pub const DEFAULT_PICKUP_GRACE_MS: u64 = 500;

    pub fn gun() -> Self {
        Self {
            name: Archetype::Gun.to_string(),
            min_damage: Self::DEFAULT_MIN_DAMAGE,
            max_damage: Self::DEFAULT_MAX_DAMAGE,
            regen_rate: Self::DEFAULT_REGEN_RATE,
            attack_speed_ms: 500,
            attack_range: Some(Self::DEFAULT_ATTACK_RANGE),
            pickup_grace_ms: Self::DEFAULT_PICKUP_GRACE_MS,
            has_stance: false,
            strike_style: StrikeStyle::Shoot,
            assets: AssetRefs::new("gun.glb", "gun-equip.mp3", "gun.mp3"),
        }
    }

    /// Sheathable sword. Hits at any distance and does not regenerate.
    pub fn sword() -> Self {
        Self {
            name: Archetype::Sword.to_string(),
            min_damage: Self::DEFAULT_MIN_DAMAGE,
            max_damage: Self::DEFAULT_MAX_DAMAGE,
            regen_rate: 0,
            attack_speed_ms: 500,
            attack_range: None,
            pickup_grace_ms: 0,
            has_stance: true,
            strike_style: StrikeStyle::Alternating,
            assets: AssetRefs::new("sword.glb", "SwordEquip.mp3", "SwordSwing.mp3"),
        }
    }

    pub fn katana() -> Self {
        Self {
            name: Archetype::Katana.to_string(),
            min_damage: Self::DEFAULT_MIN_DAMAGE,
            max_damage: Self::DEFAULT_MAX_DAMAGE,
            regen_rate: Self::DEFAULT_REGEN_RATE,
            attack_speed_ms: 250,
            attack_range: Some(Self::DEFAULT_ATTACK_RANGE),
            pickup_grace_ms: Self::DEFAULT_PICKUP_GRACE_MS,
            has_stance: false,
            strike_style: StrikeStyle::Alternating,
            assets: AssetRefs::new("katana.glb", "sword-equip.mp3", "sword.mp3"),
        }
    }

    /// Generic ranged weapon: katana timings with a single `shoot` strike.
    pub fn weapon() -> Self {
        Self {
            name: Archetype::Weapon.to_string(),
            strike_style: StrikeStyle::Shoot,
            assets: AssetRefs::new("gun.glb", "gun-equip.mp3", "gun.mp3"),
            ..Self::katana()
        }
    }

    /// Rejects parameter combinations the combat rules cannot honor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::EmptyName);
        }
        if self.min_damage > self.max_damage {
            return Err(ConfigError::DamageRange {
                min: self.min_damage,
                max: self.max_damage,
            });
        }
        if let Some(range) = self.attack_range
            && !(range.is_finite() && range > 0.0)
        {
            return Err(ConfigError::AttackRange(range));
        }
        Ok(())
    }

    /// Admission predicate for a hit at `distance`.
    pub fn in_range(&self, distance: f32) -> bool {
        match self.attack_range {
            Some(range) => distance < range,
            None => true,
        }
    }
}

impl Default for ArchetypeConfig {
    fn default() -> Self {
        Self::weapon()
    }
}
