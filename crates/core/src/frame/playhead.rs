use super::{evaluate_frame, PoseParams};
use crate::config::FrameRate;
use crate::sequence::AnimationSequence;
use serde::Serialize;

/// Active entry and time spent in it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cursor {
    pub index: usize,
    pub elapsed: f64,
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FrameSample {
    pub time: f64,
    pub entry_index: usize,
    pub pose: PoseParams,
}

/// Finds the entry playing at `time` seconds from the start.
///
/// An entry hands over once its elapsed time reaches its duration. The last
/// entry holds its final pose past the end; negative times clamp to zero.
pub fn locate(sequence: &AnimationSequence, time: f64) -> Option<Cursor> {
    let entries = sequence.entries();
    let last = entries.len().checked_sub(1)?;
    let mut remaining = time.max(0.0);

    for (index, entry) in entries.iter().enumerate() {
        if remaining < entry.duration || index == last {
            return Some(Cursor {
                index,
                elapsed: remaining.min(entry.duration),
            });
        }
        remaining -= entry.duration;
    }
    None
}

pub fn sample(sequence: &AnimationSequence, time: f64) -> Option<FrameSample> {
    let cursor = locate(sequence, time)?;
    let entry = &sequence.entries()[cursor.index];
    Some(FrameSample {
        time,
        entry_index: cursor.index,
        pose: evaluate_frame(entry, cursor.elapsed),
    })
}

/// Samples the whole sequence at a fixed frame rate, ending on the final pose.
pub fn frames(sequence: &AnimationSequence, rate: FrameRate) -> Vec<FrameSample> {
    let total = sequence.total_duration();
    let fps = f64::from(rate.fps());
    let count = (total * fps).ceil() as usize;

    (0..=count)
        .filter_map(|k| {
            let time = if k == count {
                total
            } else {
                (k as f64 / fps).min(total)
            };
            sample(sequence, time)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SequenceOptions;
    use crate::sequence::build_sequence;

    fn three_words() -> AnimationSequence {
        build_sequence("yes no maybe", SequenceOptions::default().with_seed(10.0))
    }

    #[test]
    fn advances_when_elapsed_reaches_duration() {
        let seq = three_words();
        let d0 = seq.entries()[0].duration;
        let d1 = seq.entries()[1].duration;

        assert_eq!(locate(&seq, 0.0), Some(Cursor { index: 0, elapsed: 0.0 }));
        assert_eq!(locate(&seq, d0 * 0.5).map(|c| c.index), Some(0));
        assert_eq!(locate(&seq, d0).map(|c| c.index), Some(1));
        let c = locate(&seq, d0 + d1 * 0.25).expect("cursor");
        assert_eq!(c.index, 1);
        assert!((c.elapsed - d1 * 0.25).abs() < 1e-9);
    }

    #[test]
    fn last_entry_holds_past_the_end() {
        let seq = three_words();
        let last = seq.entries()[2].duration;
        let c = locate(&seq, seq.total_duration() + 10.0).expect("cursor");
        assert_eq!(c.index, 2);
        assert_eq!(c.elapsed, last);
    }

    #[test]
    fn negative_time_clamps_to_start() {
        let seq = three_words();
        assert_eq!(locate(&seq, -3.0), Some(Cursor { index: 0, elapsed: 0.0 }));
    }

    #[test]
    fn frames_cover_whole_sequence_in_order() {
        let seq = three_words();
        let rate = FrameRate::new(30).expect("nonzero");
        let samples = frames(&seq, rate);

        let expected = (seq.total_duration() * 30.0).ceil() as usize + 1;
        assert_eq!(samples.len(), expected);
        assert_eq!(samples[0].time, 0.0);
        assert_eq!(samples.last().map(|s| s.time), Some(seq.total_duration()));
        assert!(samples.windows(2).all(|w| w[0].entry_index <= w[1].entry_index));
        assert_eq!(samples.last().map(|s| s.entry_index), Some(2));
    }

    #[test]
    fn sample_matches_direct_evaluation() {
        let seq = three_words();
        let d0 = seq.entries()[0].duration;
        let s = sample(&seq, d0 + 0.1).expect("sample");
        assert_eq!(s.entry_index, 1);
        let direct = evaluate_frame(&seq.entries()[1], (d0 + 0.1) - d0);
        assert_eq!(s.pose, direct);
    }
}
