use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SoundsmithConfig {
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub player: PlayerConfig,
    #[serde(default)]
    pub library: LibraryConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Timing of the simulated sound generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Delay before a pending generation completes
    #[serde(default = "default_generation_delay")]
    pub delay_ms: u64,
    /// Interval between progress ticks while generating
    #[serde(default = "default_progress_tick")]
    pub progress_tick_ms: u64,
}

const fn default_generation_delay() -> u64 {
    4000
}

const fn default_progress_tick() -> u64 {
    500
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_generation_delay(),
            progress_tick_ms: default_progress_tick(),
        }
    }
}

impl GenerationConfig {
    #[must_use]
    pub const fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    #[must_use]
    pub const fn progress_tick(&self) -> Duration {
        Duration::from_millis(self.progress_tick_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Playback driver tick interval
    #[serde(default = "default_player_tick")]
    pub tick_ms: u64,
    /// Lowest accepted playback rate; lower requests are clamped
    #[serde(default = "default_min_rate")]
    pub min_rate: f32,
    /// Highest accepted playback rate; higher requests are clamped
    #[serde(default = "default_max_rate")]
    pub max_rate: f32,
}

const fn default_player_tick() -> u64 {
    1000
}

const fn default_min_rate() -> f32 {
    0.5
}

const fn default_max_rate() -> f32 {
    2.0
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_player_tick(),
            min_rate: default_min_rate(),
            max_rate: default_max_rate(),
        }
    }
}

impl PlayerConfig {
    #[must_use]
    pub const fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryConfig {
    /// Seed demo sounds and playlists into an empty library
    #[serde(default = "default_true")]
    pub seed_samples: bool,
}

const fn default_true() -> bool {
    true
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            seed_samples: default_true(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Also write logs to ~/.config/soundsmith/soundsmith.log
    #[serde(default)]
    pub file_enabled: bool,
}

impl SoundsmithConfig {
    /// Get the configuration directory path (~/.config/soundsmith/)
    #[must_use]
    pub fn config_dir() -> PathBuf {
        crate::paths::config_dir()
    }

    /// Get the config file path (~/.config/soundsmith/config.toml)
    #[must_use]
    pub fn config_path() -> PathBuf {
        crate::paths::config_path()
    }

    /// Load config from the default location or create a template on first run
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ConfigNotFound`] after writing the template, or an error
    /// if the file cannot be read, parsed or validated.
    pub fn load_or_create() -> Result<Self> {
        Self::load_or_create_at(&Self::config_path())
    }

    /// Load config from `path`, writing the template there if it does not exist
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ConfigNotFound`] after writing the template, or an error
    /// if the file cannot be read, parsed or validated.
    pub fn load_or_create_at(path: &Path) -> Result<Self> {
        if !path.exists() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }

            fs::write(path, CONFIG_TEMPLATE)?;

            return Err(CoreError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate a TOML document
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid TOML or fails validation.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints that serde cannot express
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ConfigInvalid`] describing the first violated constraint.
    pub fn validate(&self) -> Result<()> {
        let player = &self.player;
        if !(player.min_rate.is_finite() && player.min_rate > 0.0) {
            return Err(CoreError::ConfigInvalid {
                message: format!("player.min_rate must be positive, got {}", player.min_rate),
            });
        }
        if !player.max_rate.is_finite() || player.max_rate < player.min_rate {
            return Err(CoreError::ConfigInvalid {
                message: format!(
                    "player.max_rate ({}) must be at least player.min_rate ({})",
                    player.max_rate, player.min_rate
                ),
            });
        }
        if player.tick_ms == 0 {
            return Err(CoreError::ConfigInvalid {
                message: "player.tick_ms must be greater than zero".to_string(),
            });
        }
        if self.generation.progress_tick_ms == 0 {
            return Err(CoreError::ConfigInvalid {
                message: "generation.progress_tick_ms must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

const CONFIG_TEMPLATE: &str = r"# Soundsmith Configuration
# ~/.config/soundsmith/config.toml

[generation]
# How long the simulated generation takes before the sound is ready
delay_ms = 4000
# Progress tick interval while generating
progress_tick_ms = 500

[player]
# Playback driver tick interval
tick_ms = 1000
# Playback rate requests are clamped to [min_rate, max_rate]
min_rate = 0.5
max_rate = 2.0

[library]
# Seed demo sounds and playlists when the library is empty
seed_samples = true

[logging]
# Also write logs to ~/.config/soundsmith/soundsmith.log
file_enabled = false
";
