//! Phrase suggestions drawn from what a user has already translated.

use rand::seq::IndexedRandom;
use rand::Rng;
use serde::Serialize;

pub const MAX_SUGGESTIONS: usize = 4;
const MAX_PER_KIND: usize = 2;
const TOP_WORDS: usize = 3;
/// Shorter words are ignored when ranking a user's vocabulary.
const MIN_WORD_UNITS: usize = 4;

pub const COMMON_PHRASES: &[&str] = &[
    "Hello, how are you?",
    "Thank you very much",
    "Please help me",
    "Where is the bathroom?",
    "I need water",
    "Good morning",
    "Nice to meet you",
    "What is your name?",
    "I am learning sign language",
    "Can you repeat that?",
    "I understand",
    "I do not understand",
    "Goodbye",
    "See you later",
    "Have a nice day",
];

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Common,
    Personalized,
    Discovery,
}

impl SuggestionKind {
    pub fn reason(self) -> &'static str {
        match self {
            Self::Common => "Popular phrase you might find useful",
            Self::Personalized => "Contains words you frequently use",
            Self::Discovery => "Try this phrase to expand your vocabulary",
        }
    }
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct Suggestion {
    pub text: &'static str,
    pub kind: SuggestionKind,
    pub reason: &'static str,
}

impl Suggestion {
    fn new(text: &'static str, kind: SuggestionKind) -> Self {
        Self {
            text,
            kind,
            reason: kind.reason(),
        }
    }
}

/// Most frequent lowercased history words longer than three UTF-16 units.
/// Ties keep first-seen order.
pub fn top_words(history: &[&str]) -> Vec<String> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for word in history
        .iter()
        .flat_map(|text| text.split_whitespace())
        .map(str::to_lowercase)
        .filter(|w| w.encode_utf16().count() >= MIN_WORD_UNITS)
    {
        match counts.iter_mut().find(|(seen, _)| *seen == word) {
            Some((_, n)) => *n += 1,
            None => counts.push((word, 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.into_iter().take(TOP_WORDS).map(|(w, _)| w).collect()
}

/// Up to [`MAX_SUGGESTIONS`] distinct phrases: common phrases missing from
/// the history, then phrases sharing the user's top words, then random picks.
pub fn suggest<R: Rng + ?Sized>(history: &[&str], rng: &mut R) -> Vec<Suggestion> {
    let lowered: Vec<String> = history.iter().map(|t| t.to_lowercase()).collect();
    let mut out: Vec<Suggestion> = COMMON_PHRASES
        .iter()
        .copied()
        .filter(|phrase| {
            let phrase = phrase.to_lowercase();
            !lowered.iter().any(|t| t.contains(&phrase))
        })
        .take(MAX_PER_KIND)
        .map(|phrase| Suggestion::new(phrase, SuggestionKind::Common))
        .collect();

    let words = top_words(history);
    let personalized: Vec<&'static str> = COMMON_PHRASES
        .iter()
        .copied()
        .filter(|phrase| {
            let phrase = phrase.to_lowercase();
            words.iter().any(|w| phrase.contains(w.as_str()))
        })
        .filter(|phrase| !out.iter().any(|s| s.text == *phrase))
        .take(MAX_PER_KIND)
        .collect();
    out.extend(
        personalized
            .into_iter()
            .map(|phrase| Suggestion::new(phrase, SuggestionKind::Personalized)),
    );

    while out.len() < MAX_SUGGESTIONS {
        let remaining: Vec<&'static str> = COMMON_PHRASES
            .iter()
            .copied()
            .filter(|phrase| !out.iter().any(|s| s.text == *phrase))
            .collect();
        let Some(&phrase) = remaining.choose(rng) else {
            break;
        };
        out.push(Suggestion::new(phrase, SuggestionKind::Discovery));
    }

    out.truncate(MAX_SUGGESTIONS);
    tracing::debug!(history = history.len(), top_words = ?words, "suggestions built");
    out
}
