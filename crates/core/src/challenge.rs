//! Practice deck for the "guess the signed phrase" challenge.

use rand::seq::IndexedRandom;
use rand::Rng;

pub const CHALLENGE_PHRASES: &[&str] = &[
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
    "Emergency",
    "Call 911",
    "I am lost",
    "I need help",
    "Excuse me",
];

/// Draws a phrase uniformly from the deck.
pub fn draw<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    CHALLENGE_PHRASES
        .choose(rng)
        .copied()
        .unwrap_or(CHALLENGE_PHRASES[0])
}
