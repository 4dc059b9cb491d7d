use super::types::{DataQuality, JointStat};
use crate::config::ScoringParams;
use crate::consts::{BAND_EXCELLENT, BAND_FAIR, BAND_GOOD};
use crate::joints::JointTable;
use strum_macros::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Band {
    Excellent,
    Good,
    Fair,
    Poor,
    InsufficientData,
}

impl Band {
    /// Low per-joint coverage overrides the numeric band.
    pub fn classify(score: f64, valid_ratio: f64, low_data_ratio: f64) -> Self {
        if valid_ratio < low_data_ratio {
            Self::InsufficientData
        } else if score >= BAND_EXCELLENT {
            Self::Excellent
        } else if score >= BAND_GOOD {
            Self::Good
        } else if score >= BAND_FAIR {
            Self::Fair
        } else {
            Self::Poor
        }
    }

    fn summary_line(self, joints: &[String]) -> Option<String> {
        let (label, advice) = match self {
            Self::Excellent => ("Excellent", "matches the reference, keep it up"),
            Self::Good => ("Good", "mostly correct, room for refinement"),
            Self::Fair => ("Fair", "drifting from the reference, needs work"),
            Self::Poor => ("Poor", "clearly off the reference, focus practice here"),
            Self::InsufficientData => return None,
        };
        Some(format!("{}: {} - {}", label, joints.join(", "), advice))
    }
}

pub fn generate(
    table: &JointTable,
    stats: &[JointStat],
    quality: &DataQuality,
    params: &ScoringParams,
) -> Vec<String> {
    let mut feedback = Vec::new();

    if quality.aligned_frames == 0 {
        feedback.push(
            "No scorable data: the aligned sequences contain no frames. \
             Check both recordings and the start offset."
                .to_string(),
        );
        feedback.extend(parameter_block(table, params));
        return feedback;
    }

    let mut excellent = Vec::new();
    let mut good = Vec::new();
    let mut fair = Vec::new();
    let mut poor = Vec::new();
    let mut low_data = Vec::new();

    for (def, stat) in table.iter().zip(stats) {
        let name = def.display_name();
        let ratio = stat.valid_ratio(quality.aligned_frames);
        match Band::classify(stat.score, ratio, params.low_data_ratio) {
            Band::Excellent => excellent.push(name),
            Band::Good => good.push(name),
            Band::Fair => fair.push(name),
            Band::Poor => poor.push(name),
            Band::InsufficientData => low_data.push(format!(
                "Insufficient data for {} ({:.0}% of frames detected) - adjust the camera angle",
                name,
                ratio * 100.0
            )),
        }
    }

    for (band, joints) in [
        (Band::Excellent, &excellent),
        (Band::Good, &good),
        (Band::Fair, &fair),
        (Band::Poor, &poor),
    ] {
        if !joints.is_empty() {
            feedback.extend(band.summary_line(joints));
        }
    }
    feedback.extend(low_data);

    if quality.capped {
        feedback.push(format!(
            "Warning: only {:.0}% of frames had a scorable joint; total score capped at {:.0}",
            quality.valid_ratio * 100.0,
            params.invalid_cap_score
        ));
    }
    if quality.small_sample {
        feedback.push(format!(
            "Warning: only {} frames were compared (recommended at least {}); \
             the score may be unreliable",
            quality.aligned_frames, params.small_sample_frames
        ));
    }

    feedback.extend(parameter_block(table, params));
    feedback
}

fn parameter_block(table: &JointTable, params: &ScoringParams) -> Vec<String> {
    let ranges = table
        .weight_ranges()
        .iter()
        .map(|(region, lo, hi)| {
            if (hi - lo).abs() < f64::EPSILON {
                format!("{} {:.1}", region.label(), lo)
            } else {
                format!("{} {:.1}-{:.1}", region.label(), lo, hi)
            }
        })
        .collect::<Vec<_>>()
        .join(", ");

    vec![
        "Scoring parameters:".to_string(),
        format!(
            "  - Angle penalty: {} points per degree of average deviation",
            params.angle_penalty
        ),
        format!("  - Joint weights: {}", ranges),
        format!("  - Evaluated joints: {}", table.len()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(100.0, 1.0, Band::Excellent)]
    #[case(90.0, 1.0, Band::Excellent)]
    #[case(89.99, 1.0, Band::Good)]
    #[case(80.0, 0.5, Band::Good)]
    #[case(75.0, 0.9, Band::Fair)]
    #[case(69.9, 0.9, Band::Poor)]
    #[case(100.0, 0.49, Band::InsufficientData)]
    fn test_band_classification(#[case] score: f64, #[case] ratio: f64, #[case] expected: Band) {
        assert_eq!(Band::classify(score, ratio, 0.5), expected);
    }

    fn stat(valid_frames: usize, score: f64) -> JointStat {
        JointStat {
            valid_frames,
            avg_deviation: Some(0.0),
            score,
        }
    }

    #[test]
    fn test_groups_joints_per_band() {
        let table = JointTable::default();
        let mut stats = vec![stat(10, 95.0); 8];
        stats[4] = stat(10, 60.0); // left_elbow
        stats[5] = stat(2, 100.0); // right_elbow
        let quality = DataQuality {
            aligned_frames: 10,
            valid_frames: 10,
            valid_ratio: 1.0,
            small_sample: false,
            capped: false,
        };

        let fb = generate(&table, &stats, &quality, &ScoringParams::default());
        assert!(fb[0].starts_with("Excellent: Left Knee, Right Knee, Left Hip"));
        assert!(fb[1].starts_with("Poor: Left Elbow"));
        assert!(fb[2].contains("Right Elbow (20% of frames"));
        assert!(fb.iter().any(|l| l.contains("Evaluated joints: 8")));
        assert!(fb
            .iter()
            .any(|l| l.contains("lower body 1.3-1.5, upper body 1.0-1.2")));
    }

    #[test]
    fn test_empty_sequence_feedback() {
        let table = JointTable::default();
        let stats = vec![
            JointStat {
                valid_frames: 0,
                avg_deviation: None,
                score: 30.0
            };
            8
        ];
        let params = ScoringParams::default();
        let fb = generate(&table, &stats, &DataQuality::default(), &params);
        assert!(fb[0].starts_with("No scorable data"));
        assert_eq!(fb.len(), 5);
    }
}
