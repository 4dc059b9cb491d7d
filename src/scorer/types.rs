use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameScore {
    pub frame_index: usize,
    pub score: f64,
    pub timestamp: f64,
}

/// Per-joint outcome across the whole aligned pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JointStat {
    pub valid_frames: usize,
    /// `None` when the joint never validated.
    pub avg_deviation: Option<f64>,
    pub score: f64,
}

impl JointStat {
    pub fn valid_ratio(&self, aligned_frames: usize) -> f64 {
        if aligned_frames == 0 {
            0.0
        } else {
            self.valid_frames as f64 / aligned_frames as f64
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AlignmentReport {
    pub reference_dropped: usize,
    pub student_dropped: usize,
    /// How many copies of the reference were laid end to end, if looped.
    pub loop_repeats: Option<usize>,
    pub aligned_frames: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DataQuality {
    pub aligned_frames: usize,
    /// Frames in which at least one joint validated.
    pub valid_frames: usize,
    pub valid_ratio: f64,
    pub small_sample: bool,
    /// The valid-ratio gate fired and the total was held at the cap.
    pub capped: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreResult {
    pub total_score: f64,
    pub joint_scores: BTreeMap<String, f64>,
    pub frame_scores: Vec<FrameScore>,
    pub feedback: Vec<String>,
    pub quality: DataQuality,
    pub alignment: AlignmentReport,
    pub joint_stats: BTreeMap<String, JointStat>,
}
