use crate::session::Mode;
use anyhow::Context;
use camino::{
    Utf8Path,
    Utf8PathBuf,
};
use serde::Deserialize;
use std::{
    collections::HashMap,
    time::Duration,
};
use tic_tac_toe::Difficulty;
use tracing_subscriber::filter::LevelFilter;

/// Delays longer than this are probably a mistake
const MAX_REASONABLE_DELAY: Duration = Duration::from_secs(10);

fn default_computer_delay_ms() -> u64 {
    500
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// The game config
#[derive(Deserialize, Debug)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// The mode of the first game
    #[serde(default)]
    pub mode: ModeConfig,

    /// The computer difficulty
    #[serde(default)]
    pub difficulty: Difficulty,

    /// How long the computer waits before moving, in milliseconds
    #[serde(default = "default_computer_delay_ms")]
    pub computer_delay_ms: u64,

    /// A seed for the random number generator
    #[serde(default)]
    pub seed: Option<u64>,

    /// Logging
    #[serde(default)]
    pub log: LogConfig,

    #[serde(flatten)]
    extra: HashMap<String, toml::Value>,
}

/// The log config
#[derive(Deserialize, Debug)]
pub struct LogConfig {
    /// The default log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// A file to also log to
    #[serde(default)]
    pub file: Option<Utf8PathBuf>,

    #[serde(flatten)]
    extra: HashMap<String, toml::Value>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
            extra: HashMap::new(),
        }
    }
}

impl LogConfig {
    /// Get the default log level
    pub fn level_filter(&self) -> anyhow::Result<LevelFilter> {
        self.level
            .parse()
            .with_context(|| format!("invalid log level \"{}\"", self.level))
    }
}

/// Who the first game is played against
#[derive(Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ModeConfig {
    /// Another human
    #[default]
    Pvp,

    /// The computer
    Computer,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: ModeConfig::default(),
            difficulty: Difficulty::default(),
            computer_delay_ms: default_computer_delay_ms(),
            seed: None,
            log: LogConfig::default(),
            extra: HashMap::new(),
        }
    }
}

impl Config {
    /// Load a config from a path
    pub fn load_from_path(path: &Utf8Path) -> anyhow::Result<Self> {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config from `{path}`"))
            .and_then(|s| Self::load_from_str(&s))
    }

    /// Load a config from a str
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        toml::from_str(s).context("failed to parse config")
    }

    /// Get the mode of the first game
    pub fn mode(&self) -> Mode {
        match self.mode {
            ModeConfig::Pvp => Mode::PlayerVsPlayer,
            ModeConfig::Computer => Mode::PlayerVsComputer(self.difficulty),
        }
    }

    /// Get the computer move delay
    pub fn computer_delay(&self) -> Duration {
        Duration::from_millis(self.computer_delay_ms)
    }

    /// Validate a config
    pub fn validate(&self) -> Vec<ValidationMessage> {
        let mut errors = Vec::new();

        let unknown_keys = self
            .extra
            .keys()
            .cloned()
            .chain(self.log.extra.keys().map(|key| format!("log.{key}")));
        for key in unknown_keys {
            errors.push(ValidationMessage {
                severity: Severity::Warn,
                error: ValidationError::UnknownKey(key),
            });
        }

        if self.log.level_filter().is_err() {
            errors.push(ValidationMessage {
                severity: Severity::Error,
                error: ValidationError::InvalidLogLevel(self.log.level.clone()),
            });
        }

        if self.computer_delay() > MAX_REASONABLE_DELAY {
            errors.push(ValidationMessage {
                severity: Severity::Warn,
                error: ValidationError::LongComputerDelay(self.computer_delay()),
            });
        }

        errors
    }
}

#[derive(Debug)]
pub struct ValidationMessage {
    severity: Severity,
    error: ValidationError,
}

impl ValidationMessage {
    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn error(&self) -> &ValidationError {
        &self.error
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("unknown key `{0}`")]
    UnknownKey(String),

    #[error("invalid log level \"{0}\"")]
    InvalidLogLevel(String),

    #[error("the computer delay of {0:?} is very long")]
    LongComputerDelay(Duration),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Severity {
    Warn,
    Error,
}
