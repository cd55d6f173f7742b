use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr, time::Duration};

use crate::segment::PhraseExtraction;
use crate::variation::Seed;

pub const DEFAULT_FPS: u32 = 60;
/// Ceiling for [`FrameRate`]; `frames` emits one sample per tick.
pub const MAX_FPS: u32 = 1000;
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;
pub const ENV_TONE: &str = "SIGNFLOW_TONE";
pub const ENV_SPEED: &str = "SIGNFLOW_SPEED";
pub const ENV_SEED: &str = "SIGNFLOW_SEED";
pub const ENV_FPS: &str = "SIGNFLOW_FPS";
pub const ENV_DEBOUNCE_MS: &str = "SIGNFLOW_DEBOUNCE_MS";

/// Signing register. Scales every speed derived for a sequence.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Neutral,
    Casual,
    Formal,
}

impl Tone {
    /// Parses a tone, falling back to `Neutral` for anything unrecognized.
    ///
    /// `fast` and `slow` are accepted as aliases for `casual` and `formal`.
    pub fn parse_lossy(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "casual" | "fast" => Self::Casual,
            "formal" | "slow" => Self::Formal,
            _ => Self::Neutral,
        }
    }

    pub fn multiplier(self) -> f64 {
        match self {
            Self::Neutral => 1.0,
            Self::Casual => 1.2,
            Self::Formal => 0.8,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Casual => "casual",
            Self::Formal => "formal",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tone {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "neutral" => Ok(Self::Neutral),
            "casual" => Ok(Self::Casual),
            "formal" => Ok(Self::Formal),
            other => Err(ConfigError::UnknownTone(other.to_owned())),
        }
    }
}

/// Playback speed option chosen by the viewer.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Speed {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl Speed {
    pub fn parse_lossy(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }

    /// Base speed fed into variation derivation.
    pub fn multiplier(self) -> f64 {
        match self {
            Self::Slow => 0.8,
            Self::Normal => 1.0,
            Self::Fast => 1.2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Slow => "slow",
            Self::Normal => "normal",
            Self::Fast => "fast",
        }
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Speed {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "slow" => Ok(Self::Slow),
            "normal" => Ok(Self::Normal),
            "fast" => Ok(Self::Fast),
            other => Err(ConfigError::UnknownSpeed(other.to_owned())),
        }
    }
}

/// Per-call options for [`crate::sequence::build_sequence`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SequenceOptions {
    pub tone: Tone,
    pub speed: Speed,
    /// `None` draws a fresh seed on every call.
    pub seed: Option<Seed>,
    pub extraction: PhraseExtraction,
}

impl SequenceOptions {
    pub fn with_seed(mut self, seed: impl Into<Seed>) -> Self {
        self.seed = Some(seed.into());
        self
    }

    pub fn with_tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }

    pub fn with_speed(mut self, speed: Speed) -> Self {
        self.speed = speed;
        self
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FrameRate(u32);

impl FrameRate {
    pub fn new(fps: u32) -> Result<Self, ConfigError> {
        if fps == 0 {
            return Err(ConfigError::ZeroFrameRate);
        }
        if fps > MAX_FPS {
            return Err(ConfigError::FrameRateTooHigh { fps, max: MAX_FPS });
        }
        Ok(Self(fps))
    }

    pub fn fps(&self) -> u32 {
        self.0
    }

    pub fn frame_interval(&self) -> f64 {
        1.0 / f64::from(self.0)
    }
}

impl Default for FrameRate {
    fn default() -> Self {
        Self(DEFAULT_FPS)
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Debounce {
    pub window_ms: u64,
}

impl Debounce {
    pub fn new(window_ms: u64) -> Result<Self, ConfigError> {
        if window_ms == 0 {
            return Err(ConfigError::ZeroDebounce);
        }
        Ok(Self { window_ms })
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }
}

impl Default for Debounce {
    fn default() -> Self {
        Self {
            window_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct EngineConfig {
    pub options: SequenceOptions,
    pub frame_rate: FrameRate,
    pub debounce: Debounce,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown tone: {0:?} (expected neutral, casual or formal)")]
    UnknownTone(String),
    #[error("unknown speed: {0:?} (expected slow, normal or fast)")]
    UnknownSpeed(String),
    #[error("seed must be a finite number, got {0:?}")]
    InvalidSeed(String),
    #[error("frame rate must be > 0")]
    ZeroFrameRate,
    #[error("frame rate must be <= {max}, got {fps}")]
    FrameRateTooHigh { fps: u32, max: u32 },
    #[error("debounce window must be > 0 ms")]
    ZeroDebounce,
    #[error("{key} must be an unsigned integer, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },
}

pub trait Env {
    fn var(&self, key: &str) -> Option<String>;
}

#[derive(Clone, Debug, Default)]
pub struct StdEnv;

impl Env for StdEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

#[derive(Clone, Debug, Default)]
pub struct MapEnv {
    vars: std::collections::BTreeMap<String, String>,
}

impl MapEnv {
    pub fn with_var(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_owned(), value.to_owned());
        self
    }
}

impl Env for MapEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

pub fn resolve_optional_string(
    cli_value: Option<String>,
    env_key: &str,
    env: &impl Env,
) -> Option<String> {
    match cli_value {
        Some(v) => Some(v),
        None => env.var(env_key),
    }
}

/// Tone from flag or env. Unrecognized values degrade to neutral.
pub fn resolve_tone(cli_value: Option<String>, env: &impl Env) -> Tone {
    resolve_optional_string(cli_value, ENV_TONE, env)
        .map(|v| Tone::parse_lossy(&v))
        .unwrap_or_default()
}

pub fn resolve_speed(cli_value: Option<String>, env: &impl Env) -> Speed {
    resolve_optional_string(cli_value, ENV_SPEED, env)
        .map(|v| Speed::parse_lossy(&v))
        .unwrap_or_default()
}

/// Seed from flag or env. Unlike tone and speed a bad seed is an error,
/// since silently replacing it would defeat reproducible runs.
pub fn resolve_seed(
    cli_value: Option<String>,
    env: &impl Env,
) -> Result<Option<Seed>, ConfigError> {
    match resolve_optional_string(cli_value, ENV_SEED, env) {
        Some(v) => {
            let parsed: f64 = v
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidSeed(v.clone()))?;
            if !parsed.is_finite() {
                return Err(ConfigError::InvalidSeed(v));
            }
            Ok(Some(Seed::new(parsed)))
        }
        None => Ok(None),
    }
}

pub fn resolve_u64_with_default(
    cli_value: Option<u64>,
    env_key: &'static str,
    env: &impl Env,
    default: u64,
) -> Result<u64, ConfigError> {
    match cli_value {
        Some(v) => Ok(v),
        None => match env.var(env_key) {
            Some(v) => v.trim().parse().map_err(|_| ConfigError::InvalidNumber {
                key: env_key,
                value: v,
            }),
            None => Ok(default),
        },
    }
}
