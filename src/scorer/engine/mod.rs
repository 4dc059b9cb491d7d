pub mod frames;
pub mod joints;

use super::align::AlignedPair;
use super::angles::joint_angle;
use super::validator::resolve_pair;
use crate::consts::{MAX_SCORE, MIN_SCORE, REPORT_PRECISION};
use crate::joints::JointTable;
use crate::skeleton::Frame;
use rayon::prelude::*;

/// Angular deviation of every table joint in one frame pair, indexed like
/// the joint table. `None` marks a joint that failed validation here.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameEval {
    pub deviations: Vec<Option<f64>>,
}

impl FrameEval {
    pub fn any_valid(&self) -> bool {
        self.deviations.iter().any(Option::is_some)
    }
}

pub fn evaluate_frame(
    reference: &Frame,
    student: &Frame,
    table: &JointTable,
    confidence_threshold: f64,
) -> FrameEval {
    let deviations = table
        .iter()
        .map(|def| {
            let (r, s) = resolve_pair(reference, student, def.points, confidence_threshold)?;
            let ref_angle = joint_angle(r[0], r[1], r[2]);
            let stu_angle = joint_angle(s[0], s[1], s[2]);
            Some((ref_angle - stu_angle).abs())
        })
        .collect();
    FrameEval { deviations }
}

/// Evaluates every frame pair in parallel. Output keeps frame order.
pub fn evaluate_pair(
    pair: &AlignedPair<'_>,
    table: &JointTable,
    confidence_threshold: f64,
) -> Vec<FrameEval> {
    pair.reference
        .par_iter()
        .zip(pair.student.par_iter())
        .map(|(r, s)| evaluate_frame(r, s, table, confidence_threshold))
        .collect()
}

#[inline(always)]
pub fn deviation_to_score(deviation: f64, penalty: f64) -> f64 {
    (MAX_SCORE - deviation * penalty).clamp(MIN_SCORE, MAX_SCORE)
}

/// Weight-normalized mean over `(score, weight)` pairs; `None` if empty.
pub fn weighted_mean<I: IntoIterator<Item = (f64, f64)>>(items: I) -> Option<f64> {
    let (sum, weight) = items
        .into_iter()
        .fold((0.0, 0.0), |(s, w), (score, weight)| {
            (s + score * weight, w + weight)
        });
    if weight > 0.0 {
        Some(sum / weight)
    } else {
        None
    }
}

#[inline]
pub fn round_report(value: f64) -> f64 {
    let factor = 10f64.powi(REPORT_PRECISION);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deviation_to_score_clamps() {
        assert_eq!(deviation_to_score(0.0, 1.2), 100.0);
        assert!((deviation_to_score(10.0, 1.2) - 88.0).abs() < 1e-9);
        assert_eq!(deviation_to_score(500.0, 1.2), 0.0);
    }

    #[test]
    fn test_weighted_mean() {
        let m = weighted_mean(vec![(100.0, 1.0), (50.0, 3.0)]).unwrap();
        assert!((m - 62.5).abs() < 1e-9);
        assert_eq!(weighted_mean(Vec::new()), None);
    }

    #[test]
    fn test_round_report() {
        assert_eq!(round_report(87.99999999), 88.0);
        assert_eq!(round_report(0.166666), 0.17);
    }
}
