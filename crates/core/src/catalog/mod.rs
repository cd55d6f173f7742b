//! Static reference data: phrase patterns and per-word clip pools.
//!
//! Both tables are immutable for the life of the process. Phrase regexes are
//! compiled once on first use and shared without locking.

mod phrases;
mod pools;

pub use phrases::{phrase_patterns, PhrasePattern};
pub use pools::{pool_for, word_pools, DEFAULT_POOL, DEFAULT_POOL_KEY};

/// Clip played when nothing else resolves.
pub fn fallback_clip() -> &'static str {
    DEFAULT_POOL[0]
}
