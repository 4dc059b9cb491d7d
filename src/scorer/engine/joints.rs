use super::{deviation_to_score, weighted_mean, FrameEval};
use crate::config::ScoringParams;
use crate::joints::JointTable;
use crate::scorer::types::JointStat;
use rayon::prelude::*;

/// Running deviation sum and valid-frame count for one joint.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct JointAccum {
    pub deviation_sum: f64,
    pub valid_frames: usize,
}

impl JointAccum {
    fn merge(self, other: Self) -> Self {
        Self {
            deviation_sum: self.deviation_sum + other.deviation_sum,
            valid_frames: self.valid_frames + other.valid_frames,
        }
    }
}

fn add_frame(mut acc: Vec<JointAccum>, eval: &FrameEval) -> Vec<JointAccum> {
    for (slot, dev) in acc.iter_mut().zip(&eval.deviations) {
        if let Some(d) = dev {
            slot.deviation_sum += d;
            slot.valid_frames += 1;
        }
    }
    acc
}

/// Folds frame evaluations into per-joint totals. Frames are independent,
/// so partial folds are merged in any order.
pub fn accumulate(evals: &[FrameEval], joint_count: usize) -> Vec<JointAccum> {
    evals
        .par_iter()
        .fold(|| vec![JointAccum::default(); joint_count], add_frame)
        .reduce(
            || vec![JointAccum::default(); joint_count],
            |a, b| a.into_iter().zip(b).map(|(x, y)| x.merge(y)).collect(),
        )
}

pub fn joint_stats(accums: &[JointAccum], params: &ScoringParams) -> Vec<JointStat> {
    accums
        .iter()
        .map(|acc| {
            if acc.valid_frames == 0 {
                return JointStat {
                    valid_frames: 0,
                    avg_deviation: None,
                    score: params.never_valid_score,
                };
            }
            let avg = acc.deviation_sum / acc.valid_frames as f64;
            JointStat {
                valid_frames: acc.valid_frames,
                avg_deviation: Some(avg),
                score: deviation_to_score(avg, params.angle_penalty),
            }
        })
        .collect()
}

/// Weighted mean of all joint scores, or `0.0` when no joint ever validated.
pub fn weighted_total(stats: &[JointStat], table: &JointTable) -> f64 {
    if stats.iter().all(|s| s.valid_frames == 0) {
        return 0.0;
    }
    let weighted = stats
        .iter()
        .zip(table)
        .map(|(s, def)| (s.score, def.weight));
    weighted_mean(weighted).unwrap_or(0.0)
}

/// Result of the valid-ratio gate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GateOutcome {
    pub total: f64,
    pub valid_ratio: f64,
    pub capped: bool,
}

pub fn apply_valid_ratio_gate(
    total: f64,
    valid_frames: usize,
    aligned_frames: usize,
    params: &ScoringParams,
) -> GateOutcome {
    let valid_ratio = if aligned_frames > 0 {
        valid_frames as f64 / aligned_frames as f64
    } else {
        0.0
    };

    if valid_ratio < params.min_valid_ratio {
        GateOutcome {
            total: total.min(params.invalid_cap_score),
            valid_ratio,
            capped: true,
        }
    } else {
        GateOutcome {
            total,
            valid_ratio,
            capped: false,
        }
    }
}
