use super::{deviation_to_score, round_report, weighted_mean, FrameEval};
use crate::config::ScoringParams;
use crate::joints::JointTable;
use crate::scorer::types::FrameScore;
use rayon::prelude::*;

/// Weighted score of a single frame from the joints valid in that frame
/// alone. No valid joint scores `0.0`.
pub fn frame_score(eval: &FrameEval, table: &JointTable, penalty: f64) -> f64 {
    let valid = eval
        .deviations
        .iter()
        .zip(table)
        .filter_map(|(dev, def)| {
            let score = deviation_to_score((*dev)?, penalty);
            Some((score, def.weight))
        });
    weighted_mean(valid).unwrap_or(0.0)
}

/// Builds the score timeline in frame-index order.
pub fn timeline(
    evals: &[FrameEval],
    table: &JointTable,
    params: &ScoringParams,
) -> Vec<FrameScore> {
    evals
        .par_iter()
        .enumerate()
        .map(|(frame_index, eval)| FrameScore {
            frame_index,
            score: round_report(frame_score(eval, table, params.angle_penalty)),
            timestamp: round_report(params.timestamp_for(frame_index)),
        })
        .collect()
}
