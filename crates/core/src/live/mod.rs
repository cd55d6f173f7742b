//! Real-time mode: sign the last word typed once the user pauses.

use crate::config::{Debounce, SequenceOptions};
use crate::easter::{self, EasterEgg};
use crate::sequence::{build_sequence, AnimationSequence};
use serde::Serialize;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveUpdate {
    pub word: String,
    /// Position of `word` among the whitespace-separated words of the snapshot.
    pub word_index: usize,
    pub easter_egg: Option<&'static EasterEgg>,
    pub sequence: AnimationSequence,
}

/// Index and text of the final whitespace-separated word.
pub fn last_word(text: &str) -> Option<(usize, &str)> {
    text.split_whitespace().enumerate().last()
}

/// Builds the update for one settled snapshot, or `None` if it has no words.
pub fn live_update(snapshot: &str, options: SequenceOptions) -> Option<LiveUpdate> {
    let (word_index, word) = last_word(snapshot)?;
    Some(LiveUpdate {
        word: word.to_owned(),
        word_index,
        easter_egg: easter::detect(word),
        sequence: build_sequence(word, options),
    })
}

/// Debounced driver fed with full-text snapshots as the user types.
///
/// A snapshot is only signed once no newer snapshot arrives within the
/// debounce window; superseded snapshots are dropped unseen. When the input
/// channel closes, a still-pending snapshot is flushed.
#[derive(Clone, Debug)]
pub struct LiveTyping {
    pub debounce: Debounce,
    pub options: SequenceOptions,
}

impl LiveTyping {
    pub fn new(debounce: Debounce, options: SequenceOptions) -> Self {
        Self { debounce, options }
    }

    pub fn channel_capacity(&self) -> usize {
        let cap = (self.debounce.window_ms / 100).clamp(2, 32);
        usize::try_from(cap).unwrap_or(8)
    }

    pub fn spawn(
        self,
        mut snapshots: mpsc::Receiver<String>,
    ) -> (mpsc::Receiver<LiveUpdate>, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(self.channel_capacity());
        let window = self.debounce.duration();
        let options = self.options;

        let task = tokio::spawn(async move {
            let mut pending: Option<String> = None;
            loop {
                let Some(text) = pending.take() else {
                    match snapshots.recv().await {
                        Some(next) => {
                            pending = Some(next);
                            continue;
                        }
                        None => break,
                    }
                };

                let settled = tokio::select! {
                    next = snapshots.recv() => match next {
                        Some(next) => {
                            tracing::trace!("snapshot superseded");
                            pending = Some(next);
                            None
                        }
                        None => Some((text, true)),
                    },
                    _ = tokio::time::sleep(window) => Some((text, false)),
                };

                let Some((text, closing)) = settled else {
                    continue;
                };
                if let Some(update) = live_update(&text, options) {
                    tracing::debug!(
                        word = %update.word,
                        word_index = update.word_index,
                        easter_egg = update.easter_egg.map(|e| e.name),
                        "live word settled"
                    );
                    if tx.send(update).await.is_err() {
                        tracing::warn!("live update receiver dropped");
                        break;
                    }
                }
                if closing {
                    break;
                }
            }
        });

        (rx, task)
    }
}
