use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;

/// A multi-word phrase signed as a single clip.
#[derive(Debug)]
pub struct PhrasePattern {
    pub phrase: &'static str,
    pub animation: &'static str,
    /// Seconds at speed 1.0.
    pub base_duration: f64,
    regex: Regex,
}

impl PhrasePattern {
    pub fn regex(&self) -> &Regex {
        &self.regex
    }
}

// Priority order: earlier rows win.
const PHRASES: &[(&str, &str, f64)] = &[
    ("how are you", "phrase_how_are_you", 2.5),
    ("thank you", "phrase_thank_you", 1.8),
    ("you're welcome", "phrase_welcome", 2.0),
    ("nice to meet you", "phrase_nice_to_meet", 2.5),
    ("good morning", "phrase_good_morning", 2.0),
    ("good afternoon", "phrase_good_afternoon", 2.2),
    ("good evening", "phrase_good_evening", 2.2),
    ("good night", "phrase_good_night", 2.0),
    ("see you later", "phrase_see_you_later", 2.0),
    ("have a nice day", "phrase_nice_day", 2.5),
    ("i love you", "phrase_i_love_you", 2.0),
    ("i'm sorry", "phrase_sorry", 2.0),
    ("excuse me", "phrase_excuse_me", 1.8),
    ("where is", "phrase_where_is", 2.0),
    ("what is", "phrase_what_is", 2.0),
    ("can you", "phrase_can_you", 2.0),
    ("i need", "phrase_i_need", 1.8),
    ("i want", "phrase_i_want", 1.8),
    ("please help", "phrase_please_help", 2.0),
    ("call 911", "phrase_emergency", 2.5),
];

static PHRASE_PATTERNS: LazyLock<Vec<PhrasePattern>> = LazyLock::new(|| {
    PHRASES
        .iter()
        .filter_map(|&(phrase, animation, base_duration)| {
            // Literal phrases escaped, so building cannot fail in practice.
            match RegexBuilder::new(&regex::escape(phrase))
                .case_insensitive(true)
                .build()
            {
                Ok(regex) => Some(PhrasePattern {
                    phrase,
                    animation,
                    base_duration,
                    regex,
                }),
                Err(e) => {
                    tracing::error!(phrase, error = %e, "dropping uncompilable phrase pattern");
                    None
                }
            }
        })
        .collect()
});

/// Phrase catalog in match-priority order.
pub fn phrase_patterns() -> &'static [PhrasePattern] {
    &PHRASE_PATTERNS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_phrase_compiles() {
        assert_eq!(phrase_patterns().len(), PHRASES.len());
    }

    #[test]
    fn patterns_match_case_insensitively() {
        let how = &phrase_patterns()[0];
        assert_eq!(how.animation, "phrase_how_are_you");
        assert!(how.regex().is_match("HOW ARE YOU?"));
        assert!(how.regex().is_match("hey, How are you"));
        assert!(!how.regex().is_match("how you are"));
    }

    #[test]
    fn apostrophe_and_digits_are_literal() {
        let sorry = phrase_patterns()
            .iter()
            .find(|p| p.animation == "phrase_sorry")
            .expect("sorry pattern");
        assert!(sorry.regex().is_match("I'm sorry"));
        assert!(!sorry.regex().is_match("Im sorry"));

        let emergency = phrase_patterns().last().expect("non-empty catalog");
        assert_eq!(emergency.base_duration, 2.5);
        assert!(emergency.regex().is_match("please CALL 911 now"));
    }

    #[test]
    fn good_morning_precedes_other_greetings() {
        let position = |anim: &str| {
            phrase_patterns()
                .iter()
                .position(|p| p.animation == anim)
                .expect("present")
        };
        assert!(position("phrase_how_are_you") < position("phrase_good_morning"));
        assert!(position("phrase_good_morning") < position("phrase_good_night"));
    }
}
