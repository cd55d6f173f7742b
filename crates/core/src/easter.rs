//! Fun phrases that trigger a one-off special animation.

use regex::{Regex, RegexBuilder};
use serde::Serialize;
use std::sync::LazyLock;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EasterEgg {
    pub name: &'static str,
    pub description: &'static str,
    pub special_animation: &'static str,
    #[serde(skip)]
    patterns: Vec<Regex>,
}

impl EasterEgg {
    pub fn matches(&self, text: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(text))
    }
}

const EGGS: &[(&str, &str, &str, &[&str])] = &[
    (
        "wave",
        "Friendly wave animation",
        "easter_wave",
        &["hello world", "hi there", "hey"],
    ),
    (
        "heart",
        "Heart gesture animation",
        "easter_heart",
        &["i love you", "love", "heart"],
    ),
    (
        "dance",
        "Celebration dance",
        "easter_dance",
        &["dance", "party", "celebrate"],
    ),
    (
        "grateful",
        "Extra grateful gesture",
        "easter_grateful",
        &["thank you so much", "thanks a lot"],
    ),
    (
        "excited",
        "Excited reaction",
        "easter_excited",
        &["amazing", "awesome", "wow"],
    ),
    (
        "sleepy",
        "Sleepy gesture",
        "easter_sleepy",
        &["good night", "sleep well"],
    ),
];

static EASTER_EGGS: LazyLock<Vec<EasterEgg>> = LazyLock::new(|| {
    EGGS.iter()
        .map(|&(name, description, special_animation, phrases)| EasterEgg {
            name,
            description,
            special_animation,
            patterns: phrases
                .iter()
                .filter_map(|phrase| {
                    RegexBuilder::new(&regex::escape(phrase))
                        .case_insensitive(true)
                        .build()
                        .map_err(|e| {
                            tracing::error!(phrase, error = %e, "bad easter egg pattern")
                        })
                        .ok()
                })
                .collect(),
        })
        .collect()
});

pub fn easter_eggs() -> &'static [EasterEgg] {
    &EASTER_EGGS
}

/// First egg, in catalog order, with any pattern found in `text`.
pub fn detect(text: &str) -> Option<&'static EasterEgg> {
    easter_eggs().iter().find(|egg| egg.matches(text))
}
