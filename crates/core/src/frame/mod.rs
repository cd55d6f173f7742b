mod playhead;

use crate::sequence::TimelineEntry;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

pub use playhead::{frames, locate, sample, Cursor, FrameSample};

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct HandPosition {
    pub left: f64,
    pub right: f64,
}

/// Joint and body values for one rendered frame.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PoseParams {
    pub left_arm_rotation: f64,
    pub right_arm_rotation: f64,
    pub body_rotation: f64,
    pub body_vertical: f64,
    pub hand_position: HandPosition,
    pub expression: f64,
    pub speed: f64,
}

/// Pose at `elapsed` seconds into `entry`.
///
/// Stateless, so any instant can be evaluated in any order. `elapsed` outside
/// `[0, duration]` extrapolates the same curves.
pub fn evaluate_frame(entry: &TimelineEntry, elapsed: f64) -> PoseParams {
    let v = &entry.variation;
    let t = if entry.duration > 0.0 {
        elapsed / entry.duration
    } else {
        0.0
    };
    let frequency = 2.0 + 2.0 * v.arm_swing_amplitude;
    let phase = t * TAU * frequency;
    let reach = 0.5 + v.hand_position_offset;

    PoseParams {
        left_arm_rotation: phase.sin() * reach,
        right_arm_rotation: -(phase + 0.3).sin() * reach,
        body_rotation: (phase * 0.5).sin() * 0.3 * v.body_movement,
        body_vertical: (phase * 2.0).sin() * 0.1 * v.body_movement,
        hand_position: HandPosition {
            left: v.hand_position_offset + phase.sin() * 0.1,
            right: -v.hand_position_offset + (phase + 0.5).sin() * 0.1,
        },
        expression: (phase * 0.8).sin() * v.expression_intensity,
        speed: v.speed,
    }
}
