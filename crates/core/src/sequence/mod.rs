//! Builds the timed clip sequence for a piece of text.

use crate::catalog::{fallback_clip, pool_for};
use crate::config::SequenceOptions;
use crate::segment::{segment_with, Segment};
use crate::variation::{derive_variation, wrap, Seed, VariationParams};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

/// Seconds a word takes before speed scaling, plus this much per character.
const WORD_BASE_SECONDS: f64 = 0.8;
const WORD_SECONDS_PER_CHAR: f64 = 0.1;
/// Sub-seed stride between segments; words within a segment add their index.
const SEGMENT_SEED_STRIDE: f64 = 100.0;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Phrase,
    Word,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TimelineEntry {
    pub kind: EntryKind,
    pub animation: String,
    /// Source word or matched phrase, as typed.
    #[serde(rename = "word")]
    pub text: String,
    /// Seconds, already scaled by speed.
    pub duration: f64,
    pub seed: Seed,
    pub variation: VariationParams,
}

/// Ordered clips for one translation request. Immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationSequence {
    entries: Vec<TimelineEntry>,
    variation: VariationParams,
}

impl AnimationSequence {
    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Call-level baseline variation.
    pub fn variation(&self) -> &VariationParams {
        &self.variation
    }

    pub fn total_duration(&self) -> f64 {
        self.entries.iter().map(|e| e.duration).sum()
    }

    pub fn animations(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.animation.as_str())
    }
}

impl Serialize for AnimationSequence {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("AnimationSequence", 3)?;
        s.serialize_field("sequence", &self.entries)?;
        s.serialize_field("totalDuration", &self.total_duration())?;
        s.serialize_field("variationParams", &self.variation)?;
        s.end()
    }
}

/// Lowercases and strips trailing `. , ! ?` so `"Hello,"` and `"HELLO!"`
/// share the `hello` pool.
pub fn normalize_word(word: &str) -> String {
    word.to_lowercase()
        .trim_end_matches(['.', ',', '!', '?'])
        .to_owned()
}

/// Picks a clip from the word's pool at
/// `floor((seed + first UTF-16 unit) mod pool length)`.
pub fn select_clip(normalized: &str, seed: Seed) -> &'static str {
    let pool = pool_for(normalized);
    let code = normalized.encode_utf16().next().map_or(0.0, f64::from);
    let len = pool.len();
    let index = wrap(seed.value() + code, len as f64).floor() as usize;
    pool[index]
}

pub fn build_sequence(text: &str, options: SequenceOptions) -> AnimationSequence {
    let seed = options.seed.unwrap_or_else(Seed::random);
    let base_speed = options.speed.multiplier();
    let baseline = derive_variation(seed, base_speed, options.tone);

    let mut entries = Vec::new();
    for (index, segment) in segment_with(text, options.extraction).into_iter().enumerate() {
        match segment {
            Segment::Phrase {
                matched_text,
                animation,
                base_duration,
            } => entries.push(TimelineEntry {
                kind: EntryKind::Phrase,
                animation: animation.to_owned(),
                text: matched_text,
                duration: base_duration * baseline.speed,
                seed: seed.offset(index as f64),
                variation: baseline,
            }),
            Segment::Words { text } => {
                for (word_index, word) in text.split_whitespace().enumerate() {
                    let word_seed =
                        seed.offset(index as f64 * SEGMENT_SEED_STRIDE + word_index as f64);
                    let normalized = normalize_word(word);
                    let variation = derive_variation(word_seed, base_speed, options.tone);
                    // UTF-16 length, the same measure as the clip's char code.
                    let units = word.encode_utf16().count() as f64;
                    entries.push(TimelineEntry {
                        kind: EntryKind::Word,
                        animation: select_clip(&normalized, word_seed).to_owned(),
                        text: word.to_owned(),
                        duration: (WORD_BASE_SECONDS + WORD_SECONDS_PER_CHAR * units)
                            * variation.speed,
                        seed: word_seed,
                        variation,
                    });
                }
            }
        }
    }

    if entries.is_empty() {
        entries.push(TimelineEntry {
            kind: EntryKind::Word,
            animation: fallback_clip().to_owned(),
            text: String::new(),
            duration: WORD_BASE_SECONDS * baseline.speed,
            seed,
            variation: baseline,
        });
    }

    let sequence = AnimationSequence {
        entries,
        variation: baseline,
    };
    tracing::debug!(
        entries = sequence.len(),
        total_duration = sequence.total_duration(),
        tone = %options.tone,
        speed = %options.speed,
        seed = seed.value(),
        "animation sequence built"
    );
    sequence
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Speed, Tone};
    use crate::segment::PhraseExtraction;

    fn opts(seed: f64) -> SequenceOptions {
        SequenceOptions::default().with_seed(seed)
    }

    #[test]
    fn same_seed_same_sequence() {
        let text = "Hello there, how are you? I need water please";
        let o = opts(98_765.25).with_tone(Tone::Casual).with_speed(Speed::Fast);
        let a = build_sequence(text, o);
        let b = build_sequence(text, o);
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).expect("serialize"),
            serde_json::to_string(&b).expect("serialize")
        );
    }

    #[test]
    fn total_duration_is_sum_of_entries() {
        let seq = build_sequence("thank you so much for the food!", opts(7.0));
        let sum: f64 = seq.entries().iter().map(|e| e.duration).sum();
        assert_eq!(seq.total_duration(), sum);
        assert!(seq.entries().iter().all(|e| e.duration > 0.0));
    }

    #[test]
    fn blank_input_falls_back_to_default_clip() {
        for text in ["", "   "] {
            let seq = build_sequence(text, opts(3.0));
            assert_eq!(seq.len(), 1);
            assert_eq!(seq.entries()[0].animation, "sign_default_v1");
            assert!(seq.total_duration() > 0.0);
        }
    }

    #[test]
    fn lone_phrase_uses_catalog_duration() {
        let seq = build_sequence("good morning", opts(0.0));
        assert_eq!(seq.len(), 1);
        let entry = &seq.entries()[0];
        assert_eq!(entry.kind, EntryKind::Phrase);
        assert_eq!(entry.animation, "phrase_good_morning");
        // seed 0 -> speed factor 0.8
        assert!((entry.duration - 2.0 * 0.8).abs() < 1e-12);
        assert_eq!(entry.duration, 2.0 * seq.variation().speed);
    }

    #[test]
    fn earliest_catalog_phrase_wins() {
        let seq = build_sequence("good morning, how are you?", opts(11.0));
        let first_phrase = seq
            .entries()
            .iter()
            .find(|e| e.kind == EntryKind::Phrase)
            .expect("a phrase entry");
        assert_eq!(first_phrase.animation, "phrase_how_are_you");
        let words: Vec<&str> = seq.entries().iter().map(|e| e.text.as_str()).collect();
        assert_eq!(words, vec!["good", "morning,", "how are you", "?"]);
    }

    #[test]
    fn normalization_shares_pool_key() {
        assert_eq!(normalize_word("Hello,"), "hello");
        assert_eq!(normalize_word("hello"), "hello");
        assert_eq!(normalize_word("HELLO!"), "hello");
        assert_eq!(normalize_word("what?!"), "what");
        assert_eq!(normalize_word("e.g."), "e.g");

        for word in ["Hello,", "hello", "HELLO!"] {
            for seed in [0.0, 1.0, 2.5, 1_000.0] {
                let clip = select_clip(&normalize_word(word), Seed::new(seed));
                assert!(clip.starts_with("greet_hello_"), "{word} -> {clip}");
            }
        }
    }

    #[test]
    fn clip_index_follows_seed_plus_char_code() {
        // 'h' = 104; (0 + 104) mod 3 = 2
        assert_eq!(select_clip("hello", Seed::new(0.0)), "greet_hello_v3");
        // (1 + 104) mod 3 = 0
        assert_eq!(select_clip("hello", Seed::new(1.0)), "greet_hello_v1");
        // (-106 + 104) rem_euclid 3 = 1
        assert_eq!(select_clip("hello", Seed::new(-106.0)), "greet_hello_v2");
        // empty key uses default pool with code 0
        assert_eq!(select_clip("", Seed::new(6.0)), "sign_default_v3");
        assert_eq!(select_clip("zebra", Seed::new(-1e-300)), "sign_default_v3");
    }

    #[test]
    fn word_entries_use_segment_and_word_offsets() {
        let seq = build_sequence("I need water now", opts(1_000.0));
        // "I need" is the phrase at segment 0, "water now" is segment 1.
        let seeds: Vec<f64> = seq.entries().iter().map(|e| e.seed.value()).collect();
        assert_eq!(seeds, vec![1_000.0, 1_100.0, 1_101.0]);
        assert_eq!(seq.entries()[0].animation, "phrase_i_need");

        let water = &seq.entries()[1];
        let expected = derive_variation(Seed::new(1_100.0), 1.0, Tone::Neutral);
        assert_eq!(water.variation, expected);
        assert!((water.duration - (0.8 + 0.5) * expected.speed).abs() < 1e-12);
    }

    #[test]
    fn formal_to_casual_ratio_is_constant() {
        let text = "Hi, nice to meet you. Where is the bathroom?";
        for seed in [0.0, 13.0, 999.5, -42.0, 123_456.789] {
            let casual = build_sequence(text, opts(seed).with_tone(Tone::Casual));
            let formal = build_sequence(text, opts(seed).with_tone(Tone::Formal));
            let neutral = build_sequence(text, opts(seed));
            let ratio = formal.total_duration() / casual.total_duration();
            assert!((ratio - 0.8 / 1.2).abs() < 1e-9, "seed {seed}: {ratio}");
            let ratio = casual.total_duration() / neutral.total_duration();
            assert!((ratio - 1.2).abs() < 1e-9, "seed {seed}: {ratio}");
        }
    }

    #[test]
    fn word_length_counts_utf16_units() {
        let seq = build_sequence("\u{1F44B}", opts(0.0));
        let entry = &seq.entries()[0];
        // Two UTF-16 units: 0.8 + 0.2 seconds before speed scaling.
        assert!((entry.duration - 1.0 * entry.variation.speed).abs() < 1e-12);

        let seq = build_sequence("caf\u{e9}", opts(0.0));
        let entry = &seq.entries()[0];
        assert!((entry.duration - 1.2 * entry.variation.speed).abs() < 1e-12);
    }

    #[test]
    fn every_entry_has_a_clip() {
        let seq = build_sequence("?? !! xyz ... ,", opts(77.0));
        assert!(seq.animations().all(|a| !a.is_empty()));
        assert_eq!(seq.len(), 5);
    }

    #[test]
    fn unseeded_calls_still_well_formed() {
        let seq = build_sequence("hello", SequenceOptions::default());
        assert_eq!(seq.len(), 1);
        assert!(seq.entries()[0].animation.starts_with("greet_hello_"));
    }

    #[test]
    fn catalog_pass_option_is_threaded_through() {
        let mut o = opts(5.0);
        o.extraction = PhraseExtraction::CatalogPass;
        let seq = build_sequence("thank you, good night", o);
        let phrases: Vec<&str> = seq
            .entries()
            .iter()
            .filter(|e| e.kind == EntryKind::Phrase)
            .map(|e| e.animation.as_str())
            .collect();
        assert_eq!(phrases, vec!["phrase_thank_you", "phrase_good_night"]);
    }

    #[test]
    fn serialized_shape_is_camel_case() {
        let seq = build_sequence("hi", opts(2.0));
        let json = serde_json::to_value(&seq).expect("serialize");
        let entry = &json["sequence"][0];
        assert_eq!(entry["kind"], "word");
        assert_eq!(entry["word"], "hi");
        assert!(entry["variation"]["handPositionOffset"].is_number());
        assert!(json["variationParams"]["armSwingAmplitude"].is_number());
        assert_eq!(json["totalDuration"].as_f64(), Some(seq.total_duration()));
    }
}
