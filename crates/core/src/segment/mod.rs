//! Splits input text into phrase and word segments.

use crate::catalog::{phrase_patterns, PhrasePattern};
use serde::{Deserialize, Serialize};

/// How many catalog phrases a single input may yield.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum PhraseExtraction {
    /// First catalog hit only; text after it is left as plain words.
    #[default]
    Single,
    /// One walk over the catalog; each pattern may match the text remaining
    /// after the previous hit.
    CatalogPass,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Segment {
    Phrase {
        matched_text: String,
        animation: &'static str,
        base_duration: f64,
    },
    Words {
        text: String,
    },
}

impl Segment {
    fn phrase(pattern: &PhrasePattern, matched: &str) -> Self {
        Self::Phrase {
            matched_text: matched.to_owned(),
            animation: pattern.animation,
            base_duration: pattern.base_duration,
        }
    }

    fn words(text: &str) -> Option<Self> {
        let text = text.trim();
        (!text.is_empty()).then(|| Self::Words {
            text: text.to_owned(),
        })
    }
}

pub fn segment(text: &str) -> Vec<Segment> {
    segment_with(text, PhraseExtraction::Single)
}

pub fn segment_with(text: &str, mode: PhraseExtraction) -> Vec<Segment> {
    let mut remaining = text.trim();
    let mut segments = Vec::new();

    for pattern in phrase_patterns() {
        let Some(m) = pattern.regex().find(remaining) else {
            continue;
        };
        tracing::trace!(phrase = pattern.phrase, at = m.start(), "phrase matched");

        segments.extend(Segment::words(&remaining[..m.start()]));
        segments.push(Segment::phrase(pattern, m.as_str()));
        remaining = remaining[m.end()..].trim();

        if mode == PhraseExtraction::Single {
            break;
        }
    }

    segments.extend(Segment::words(remaining));
    segments
}
