//! Simulation tunables, loadable from YAML or JSON.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tileworld_common::ItemKind;
use tileworld_stream::StreamConfig;

/// Errors from loading or validating a [`SimConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported config format: {0}")]
    UnsupportedFormat(String),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Every tunable of the simulation. Missing fields take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Seeds terrain generation and the simulation RNG.
    pub seed: u64,
    pub stream: StreamConfig,
    pub player: PlayerConfig,
    pub agents: AgentConfig,
    pub combat: CombatConfig,
    pub pickups: PickupConfig,
    pub day: DayConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Top-left corner of the player's box at startup, in tiles.
    pub spawn: Vec2,
    pub size: Vec2,
    /// Tiles moved per tick for each held direction.
    pub speed: f32,
    pub starting_inventory: BTreeMap<ItemKind, u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub size: Vec2,
    /// Tiles moved per tick toward the player.
    pub speed: f32,
    pub health: i32,
    /// Agents seeded at startup around the spawn tile.
    pub initial_count: usize,
    /// Half-width, in tiles, of the square initial agents are seeded in.
    pub initial_spread: i32,
    /// Night spawns are skipped once this many agents are alive.
    pub max_agents: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Margin added on every side of the player's box for melee reach.
    pub melee_margin: f32,
    pub melee_damage: i32,
    /// Melee damage while holding at least one sword.
    pub sword_damage: i32,
    pub projectile_speed: f32,
    pub projectile_size: Vec2,
    pub projectile_lifetime: u32,
    pub projectile_damage: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickupConfig {
    pub size: Vec2,
    pub initial_count: usize,
    pub initial_spread: i32,
    /// Ammunition granted with every gun picked up.
    pub ammo_per_gun: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DayConfig {
    /// Ticks in one full day. The clock advances by `1 / length_ticks`.
    pub length_ticks: u32,
    /// Spawning is active while daylight is below this value.
    pub night_threshold: f32,
    /// Per-tick probability of a night spawn.
    pub spawn_chance: f64,
    /// Half-width, in tiles, of the square around the player that night
    /// spawns land in.
    pub spawn_offset: i32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            spawn: Vec2::ZERO,
            size: Vec2::ONE,
            speed: 0.125,
            starting_inventory: BTreeMap::from([(ItemKind::Dirt, 10), (ItemKind::Stone, 5)]),
        }
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            size: Vec2::ONE,
            speed: 0.03125,
            health: 3,
            initial_count: 5,
            initial_spread: 10,
            max_agents: 64,
        }
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            melee_margin: 0.3125,
            melee_damage: 1,
            sword_damage: 2,
            projectile_speed: 0.3125,
            projectile_size: Vec2::splat(0.15625),
            projectile_lifetime: 120,
            projectile_damage: 3,
        }
    }
}

impl Default for PickupConfig {
    fn default() -> Self {
        Self {
            size: Vec2::splat(0.5),
            initial_count: 6,
            initial_spread: 5,
            ammo_per_gun: 5,
        }
    }
}

impl Default for DayConfig {
    fn default() -> Self {
        Self {
            length_ticks: 1000,
            night_threshold: 0.3,
            spawn_chance: 0.01,
            spawn_offset: 10,
        }
    }
}

impl SimConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Load from a `.yaml`/`.yml` or `.json` file and validate.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let config = match ext.as_str() {
            "yaml" | "yml" => Self::from_yaml_str(&text)?,
            "json" => Self::from_json_str(&text)?,
            other => return Err(ConfigError::UnsupportedFormat(other.to_string())),
        };
        tracing::info!(path = %path.display(), seed = config.seed, "loaded sim config");
        Ok(config)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| -> Result<(), ConfigError> { Err(ConfigError::Invalid(msg)) };
        if self.stream.unload_radius > StreamConfig::MAX_RADIUS {
            return invalid(format!(
                "stream.unload_radius ({}) must be at most {}",
                self.stream.unload_radius,
                StreamConfig::MAX_RADIUS
            ));
        }
        if !self.stream.is_valid() {
            return invalid(format!(
                "stream.unload_radius ({}) must be >= stream.load_radius ({})",
                self.stream.unload_radius, self.stream.load_radius
            ));
        }
        if self.combat.projectile_lifetime == 0 {
            return invalid("combat.projectile_lifetime must be positive".into());
        }
        if self.day.length_ticks == 0 {
            return invalid("day.length_ticks must be positive".into());
        }
        if !(0.0..=1.0).contains(&self.day.spawn_chance) {
            return invalid(format!(
                "day.spawn_chance ({}) must be within [0, 1]",
                self.day.spawn_chance
            ));
        }
        if self.agents.initial_spread < 0
            || self.pickups.initial_spread < 0
            || self.day.spawn_offset < 0
        {
            return invalid("spreads and offsets must be non-negative".into());
        }
        let sizes = [
            ("player.size", self.player.size),
            ("agents.size", self.agents.size),
            ("combat.projectile_size", self.combat.projectile_size),
            ("pickups.size", self.pickups.size),
        ];
        for (name, size) in sizes {
            if !(size.x > 0.0 && size.y > 0.0) {
                return invalid(format!("{name} must be positive"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = SimConfig::default();
        config.validate().unwrap();
        assert_eq!(config.player.starting_inventory[&ItemKind::Dirt], 10);
        assert_eq!(config.player.starting_inventory[&ItemKind::Stone], 5);
        assert_eq!(config.day.length_ticks, 1000);
    }

    #[test]
    fn yaml_overrides_merge_with_defaults() {
        let config = SimConfig::from_yaml_str(
            "seed: 7\nstream:\n  load_radius: 1\n  unload_radius: 4\nagents:\n  max_agents: 3\n",
        )
        .unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.stream.load_radius, 1);
        assert_eq!(config.stream.unload_radius, 4);
        assert_eq!(config.agents.max_agents, 3);
        assert_eq!(config.agents.health, 3);
    }

    #[test]
    fn inventory_keys_are_item_names() {
        let config = SimConfig::from_yaml_str(
            "player:\n  starting_inventory:\n    wood: 2\n    ammo: 9\n",
        )
        .unwrap();
        let inv = &config.player.starting_inventory;
        assert_eq!(inv.get(&ItemKind::Wood), Some(&2));
        assert_eq!(inv.get(&ItemKind::Ammo), Some(&9));
        assert_eq!(inv.get(&ItemKind::Dirt), None);
    }

    #[test]
    fn unknown_item_kind_is_rejected() {
        let err = SimConfig::from_yaml_str("player:\n  starting_inventory:\n    diamond: 1\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn unload_inside_load_is_rejected() {
        let err = SimConfig::from_json_str(r#"{"stream": {"load_radius": 3, "unload_radius": 1}}"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("unload_radius"));
    }

    #[test]
    fn zero_day_length_is_rejected() {
        let err = SimConfig::from_yaml_str("day:\n  length_ticks: 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn zero_projectile_lifetime_is_rejected() {
        let err = SimConfig::from_yaml_str("combat:\n  projectile_lifetime: 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("projectile_lifetime"));
    }

    #[test]
    fn oversized_stream_radius_is_rejected() {
        let err = SimConfig::from_yaml_str("stream:\n  load_radius: 100\n  unload_radius: 100\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("at most 64"));
        SimConfig::from_yaml_str("stream:\n  load_radius: 64\n  unload_radius: 64\n").unwrap();
    }

    #[test]
    fn spawn_chance_out_of_range_is_rejected() {
        let err = SimConfig::from_yaml_str("day:\n  spawn_chance: 1.5\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn load_picks_format_from_extension() {
        let dir = tempfile::tempdir().unwrap();

        let yaml = dir.path().join("sim.yaml");
        std::fs::File::create(&yaml)
            .unwrap()
            .write_all(b"seed: 11\n")
            .unwrap();
        assert_eq!(SimConfig::load(&yaml).unwrap().seed, 11);

        let json = dir.path().join("sim.json");
        std::fs::write(&json, r#"{"seed": 12}"#).unwrap();
        assert_eq!(SimConfig::load(&json).unwrap().seed, 12);

        let toml = dir.path().join("sim.toml");
        std::fs::write(&toml, "seed = 1").unwrap();
        assert!(matches!(
            SimConfig::load(&toml).unwrap_err(),
            ConfigError::UnsupportedFormat(_)
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = SimConfig::load("/nonexistent/tileworld.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn round_trips_through_json() {
        let config = SimConfig::with_seed(3);
        let text = serde_json::to_string(&config).unwrap();
        assert_eq!(SimConfig::from_json_str(&text).unwrap(), config);
    }
}
