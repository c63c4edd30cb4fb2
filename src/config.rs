use crate::scramble::{DEFAULT_ALPHABET, ScrambleAlphabet};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Top level configuration file.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub scramble: ScrambleConfig,

    #[serde(default)]
    pub demo: DemoConfig,
}

impl Config {
    /// Load and validate the configuration at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::parse(&contents)
    }

    /// Load `path` if given, otherwise the default location if it exists, otherwise defaults.
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => {
                tracing::debug!(path = %path.display(), "loading default config file");
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// `<config dir>/textscramble/config.yaml` for the current platform.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "textscramble").map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scramble.validate()?;
        self.demo.validate()
    }
}

/// Settings for the scramble animator.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScrambleConfig {
    /// Candidate placeholder characters.
    #[serde(default = "default_alphabet")]
    pub alphabet: String,

    /// Spread of reveal start frames and of reveal durations.
    #[serde(default = "default_randomization_range")]
    pub randomization_range: u32,

    /// Chance a scrambling cell re-rolls its placeholder on a given frame.
    #[serde(default = "default_mutation_probability")]
    pub mutation_probability: f64,

    /// The class placeholders are tagged with in markup output.
    #[serde(default = "default_placeholder_class")]
    pub placeholder_class: String,
}

impl ScrambleConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.parsed_alphabet()?;
        if self.randomization_range == 0 {
            return Err(ConfigError::InvalidRange);
        }
        let p = self.mutation_probability;
        if !p.is_finite() || p <= 0.0 || p > 1.0 {
            return Err(ConfigError::InvalidProbability(p));
        }
        Ok(())
    }

    pub(crate) fn parsed_alphabet(&self) -> Result<ScrambleAlphabet, ConfigError> {
        ScrambleAlphabet::new(&self.alphabet).ok_or(ConfigError::EmptyAlphabet)
    }
}

impl Default for ScrambleConfig {
    fn default() -> Self {
        Self {
            alphabet: default_alphabet(),
            randomization_range: default_randomization_range(),
            mutation_probability: default_mutation_probability(),
            placeholder_class: default_placeholder_class(),
        }
    }
}

/// Settings for the demo binary's drivers.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DemoConfig {
    /// Shown at rest and restored when the pointer leaves.
    #[serde(default = "default_resting_phrase")]
    pub resting_phrase: String,

    /// Shown while the pointer hovers.
    #[serde(default = "default_hover_phrase")]
    pub hover_phrase: String,

    /// Phrases visited in order when cycling.
    #[serde(default = "default_phrases")]
    pub phrases: Vec<String>,

    /// Pause between one phrase settling and the next starting.
    #[serde(default = "default_cycle_delay_millis")]
    pub cycle_delay_millis: u64,

    #[serde(default = "default_frames_per_second")]
    pub frames_per_second: u32,

    /// Hue used to tint placeholders in the terminal.
    #[serde(default = "default_placeholder_hue")]
    pub placeholder_hue: f32,
}

impl DemoConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frames_per_second == 0 {
            return Err(ConfigError::InvalidFrameRate);
        }
        if self.phrases.is_empty() {
            return Err(ConfigError::NoPhrases);
        }
        Ok(())
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            resting_phrase: default_resting_phrase(),
            hover_phrase: default_hover_phrase(),
            phrases: default_phrases(),
            cycle_delay_millis: default_cycle_delay_millis(),
            frames_per_second: default_frames_per_second(),
            placeholder_hue: default_placeholder_hue(),
        }
    }
}

fn default_alphabet() -> String {
    DEFAULT_ALPHABET.to_string()
}

fn default_randomization_range() -> u32 {
    40
}

fn default_mutation_probability() -> f64 {
    0.28
}

fn default_placeholder_class() -> String {
    "dud".to_string()
}

fn default_resting_phrase() -> String {
    "HELLO_WORLD".to_string()
}

fn default_hover_phrase() -> String {
    "SYSTEM_BREACH".to_string()
}

fn default_phrases() -> Vec<String> {
    ["CREATIVE_DEV", "SYSTEM_READY", "HELLO_WORLD"].into_iter().map(String::from).collect()
}

fn default_cycle_delay_millis() -> u64 {
    2000
}

fn default_frames_per_second() -> u32 {
    60
}

fn default_placeholder_hue() -> f32 {
    200.0
}

/// An invalid or unreadable configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file '{0}': {1}")]
    Io(PathBuf, io::Error),

    #[error("invalid config file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("scramble alphabet must contain at least one character")]
    EmptyAlphabet,

    #[error("randomization range must be positive")]
    InvalidRange,

    #[error("mutation probability must be in (0, 1], got {0}")]
    InvalidProbability(f64),

    #[error("frames per second must be positive")]
    InvalidFrameRate,

    #[error("at least one phrase is needed to cycle")]
    NoPhrases,
}
