//! Caller-facing wrapper: validates raw submissions and normalizes options
//! before they reach the sequence builder.

use crate::config::{SequenceOptions, Speed, Tone};
use crate::segment::PhraseExtraction;
use crate::sequence::{build_sequence, AnimationSequence};
use crate::variation::Seed;
use serde::{Deserialize, Serialize};

pub const MAX_TEXT_CHARS: usize = 500;
/// Playback estimates never go below this many seconds.
pub const MIN_PLAYBACK_SECONDS: f64 = 2.0;
const AVERAGE_CLIP_SECONDS: f64 = 0.8;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("text is required")]
    EmptyText,
    #[error("text is {len} characters, limit is {max}")]
    TooLong { len: usize, max: usize },
}

/// A translation submission as it arrives from a client. Option fields are
/// free-form strings; unknown values degrade to defaults.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TranslationRequest {
    pub text: String,
    #[serde(default)]
    pub tone: Option<String>,
    #[serde(default, alias = "playbackSpeed")]
    pub speed: Option<String>,
    #[serde(default)]
    pub seed: Option<f64>,
}

impl TranslationRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn validated_text(&self) -> Result<&str, RequestError> {
        validate_text(&self.text)
    }

    pub fn options(&self) -> SequenceOptions {
        SequenceOptions {
            tone: self.tone.as_deref().map(Tone::parse_lossy).unwrap_or_default(),
            speed: self
                .speed
                .as_deref()
                .map(Speed::parse_lossy)
                .unwrap_or_default(),
            seed: self.seed.map(Seed::new),
            extraction: PhraseExtraction::default(),
        }
    }

    pub fn translate(&self) -> Result<Translation, RequestError> {
        translate_text(&self.text, self.options())
    }
}

/// Trimmed text, if it is non-empty and within the length limit.
pub fn validate_text(text: &str) -> Result<&str, RequestError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(RequestError::EmptyText);
    }
    let len = text.chars().count();
    if len > MAX_TEXT_CHARS {
        return Err(RequestError::TooLong {
            len,
            max: MAX_TEXT_CHARS,
        });
    }
    Ok(text)
}

/// Validates `text` and builds its sequence with already-normalized options.
pub fn translate_text(text: &str, options: SequenceOptions) -> Result<Translation, RequestError> {
    let text = validate_text(text)?;
    let sequence = build_sequence(text, options);
    let playback_estimate = playback_estimate(sequence.len(), options.speed);
    tracing::info!(
        chars = text.chars().count(),
        clips = sequence.len(),
        playback_estimate,
        "translation created"
    );
    Ok(Translation {
        text: text.to_owned(),
        tone: options.tone,
        speed: options.speed,
        playback_estimate,
        sequence,
    })
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Translation {
    pub text: String,
    pub tone: Tone,
    pub speed: Speed,
    /// Coarse clip-count based estimate stored alongside history records.
    pub playback_estimate: f64,
    #[serde(rename = "animationSequence")]
    pub sequence: AnimationSequence,
}

/// Rough playback length used for history listings:
/// `max(2, clips * 0.8 * speed factor)` with fast = 0.8 and slow = 1.2.
pub fn playback_estimate(clip_count: usize, speed: Speed) -> f64 {
    let factor = match speed {
        Speed::Fast => 0.8,
        Speed::Slow => 1.2,
        Speed::Normal => 1.0,
    };
    (clip_count as f64 * AVERAGE_CLIP_SECONDS * factor).max(MIN_PLAYBACK_SECONDS)
}
