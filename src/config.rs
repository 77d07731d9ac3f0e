//! Session configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Environment variable overriding the stepper tick in milliseconds.
pub const TICK_ENV: &str = "ROUNDABOUTS_TICK_MS";

/// How board-change events are written by the terminal front-end.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Display,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum EventFormat {
    /// One human readable line per event.
    #[default]
    #[display("text")]
    Text,
    /// One JSON object per line.
    #[display("json")]
    Json,
}

/// Timing and presentation settings for a game session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Delay between two long-move steps, in milliseconds.
    #[serde(default = "default_tick_interval_ms")]
    tick_interval_ms: u64,

    /// How long the terminal front-end pretends to animate a loop.
    #[serde(default = "default_animation_delay_ms")]
    animation_delay_ms: u64,

    /// Event output format.
    #[serde(default)]
    event_format: EventFormat,
}

fn default_tick_interval_ms() -> u64 {
    500
}

fn default_animation_delay_ms() -> u64 {
    300
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            animation_delay_ms: default_animation_delay_ms(),
            event_format: EventFormat::default(),
        }
    }
}

impl SessionConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        info!(tick_ms = config.tick_interval_ms, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise falls back to defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            debug!("No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Applies [`TICK_ENV`] from the process environment.
    pub fn with_env(self) -> Result<Self, ConfigError> {
        let tick = std::env::var(TICK_ENV).ok();
        self.with_tick_override(tick.as_deref())
    }

    /// Replaces the tick interval with `raw` when present.
    #[instrument(skip(self))]
    pub fn with_tick_override(mut self, raw: Option<&str>) -> Result<Self, ConfigError> {
        if let Some(raw) = raw {
            self.tick_interval_ms = raw.trim().parse().map_err(|e| {
                ConfigError::new(format!("Invalid {} value '{}': {}", TICK_ENV, raw, e))
            })?;
            self.validate()?;
        }
        Ok(self)
    }

    /// Replaces the tick interval.
    pub fn with_tick_interval_ms(mut self, tick_interval_ms: u64) -> Self {
        self.tick_interval_ms = tick_interval_ms;
        self
    }

    /// Replaces the event format.
    pub fn with_event_format(mut self, event_format: EventFormat) -> Self {
        self.event_format = event_format;
        self
    }

    /// Stepper tick as a [`Duration`].
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Loop animation delay as a [`Duration`].
    pub fn animation_delay(&self) -> Duration {
        Duration::from_millis(self.animation_delay_ms)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::new(
                "tick_interval_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
