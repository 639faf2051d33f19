//! Game configuration loaded from TOML.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use star_siege_core::{Arena, StageConfig};
use thiserror::Error;

const DEFAULT_SEED: u64 = 0x5eed_5747_a6e5_1e9e;

/// Tunables describing the arena, campaign and random seed of a game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Seed for every random decision made by the world.
    pub seed: u64,
    /// Playfield dimensions in world units.
    pub arena: Arena,
    /// Ordered list of stages forming the campaign.
    pub stages: Vec<StageConfig>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            arena: Arena::default(),
            stages: StageConfig::default_campaign(),
        }
    }
}

impl GameConfig {
    /// Parses and validates a configuration from TOML source.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates the configuration file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Replaces the seed, keeping every other setting.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Checks the invariants the world relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Arena { width, height } = self.arena;
        if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
            return Err(ConfigError::InvalidArena { width, height });
        }

        if self.stages.is_empty() {
            return Err(ConfigError::NoStages);
        }

        if let Some(index) = self
            .stages
            .iter()
            .position(|stage| stage.hostile_count() == 0)
        {
            return Err(ConfigError::EmptyWave { index });
        }

        Ok(())
    }
}

/// Errors raised while loading a [`GameConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration {path:?}")]
    Io {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The configuration is not valid TOML or has unknown fields.
    #[error("failed to parse configuration")]
    Parse(#[from] toml::de::Error),
    /// Arena dimensions must be positive and finite.
    #[error("arena must have positive dimensions, got {width}x{height}")]
    InvalidArena {
        /// Configured width.
        width: f32,
        /// Configured height.
        height: f32,
    },
    /// The campaign contains no stage.
    #[error("campaign must contain at least one stage")]
    NoStages,
    /// A wave stage would spawn no enemy.
    #[error("stage {index} is a wave without enemies")]
    EmptyWave {
        /// Zero-based index of the offending stage.
        index: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_source_yields_defaults() {
        let config = GameConfig::from_toml_str("").expect("empty config is valid");
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn overrides_arena_and_campaign() {
        let config = GameConfig::from_toml_str(
            r#"
            seed = 42

            [arena]
            width = 640.0
            height = 480.0

            [[stages]]
            kind = "wave"
            rows = 1
            columns = 2

            [[stages]]
            kind = "boss"
            "#,
        )
        .expect("config should parse");

        assert_eq!(config.seed, 42);
        assert_eq!(config.arena, Arena::new(640.0, 480.0));
        assert_eq!(config.stages.len(), 2);
        assert!(config.stages[1].is_boss());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let error = GameConfig::from_toml_str("lives = 9").expect_err("unknown field");
        assert!(matches!(error, ConfigError::Parse(_)));
    }

    #[test]
    fn validation_rejects_degenerate_setups() {
        let error = GameConfig::from_toml_str("stages = []").expect_err("no stages");
        assert!(matches!(error, ConfigError::NoStages));

        let error = GameConfig::from_toml_str(
            r#"
            [[stages]]
            kind = "boss"

            [[stages]]
            kind = "wave"
            rows = 0
            columns = 4
            "#,
        )
        .expect_err("empty wave");
        assert!(matches!(error, ConfigError::EmptyWave { index: 1 }));

        let error = GameConfig::from_toml_str("[arena]\nwidth = 0.0\nheight = 10.0")
            .expect_err("flat arena");
        assert!(matches!(error, ConfigError::InvalidArena { .. }));
    }

    #[test]
    fn missing_file_reports_path() {
        let error = GameConfig::load("/definitely/not/here.toml").expect_err("missing file");
        assert!(error.to_string().contains("here.toml"));
    }

    #[test]
    fn shipped_campaign_matches_defaults() {
        let config = GameConfig::from_toml_str(include_str!("../../assets/campaign.toml"))
            .expect("shipped campaign parses");
        assert_eq!(config, GameConfig::default());
    }
}
