use crate::error::KsResult;
use crate::scorer::{ScoreObserver, ScoreResult, Scorer};
use crate::skeleton::PoseTrack;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// A complete scoring job as exchanged with callers.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ScoreRequest {
    pub reference: PoseTrack,
    pub student: PoseTrack,
    /// Seconds the student recording started after the reference.
    #[serde(default)]
    pub student_delay: f64,
}

pub fn score_request(
    scorer: &Scorer,
    request: &ScoreRequest,
    observer: &dyn ScoreObserver,
) -> ScoreResult {
    scorer.score_observed(
        &request.reference.sequence,
        &request.student.sequence,
        request.student_delay,
        observer,
    )
}

/// Parses a `ScoreRequest` JSON document and scores it.
pub fn score_json(
    scorer: &Scorer,
    request_json: &str,
    observer: &dyn ScoreObserver,
) -> KsResult<ScoreResult> {
    let request: ScoreRequest = serde_json::from_str(request_json)?;
    Ok(score_request(scorer, &request, observer))
}

/// Loads both pose tracks from disk and scores them.
pub fn score_files<P1: AsRef<Path>, P2: AsRef<Path>>(
    scorer: &Scorer,
    reference_path: P1,
    student_path: P2,
    student_delay: f64,
    observer: &dyn ScoreObserver,
) -> KsResult<ScoreResult> {
    let reference = PoseTrack::load_from_file(&reference_path)?;
    info!(
        "Loaded reference: {} ({} frames)",
        reference_path.as_ref().display(),
        reference.len()
    );

    let student = PoseTrack::load_from_file(&student_path)?;
    info!(
        "Loaded student: {} ({} frames)",
        student_path.as_ref().display(),
        student.len()
    );

    let request = ScoreRequest {
        reference,
        student,
        student_delay,
    };
    Ok(score_request(scorer, &request, observer))
}

/// Writes the frame timeline as `frame_index,score,timestamp` rows.
pub fn write_timeline_csv<P: AsRef<Path>>(result: &ScoreResult, path: P) -> KsResult<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for frame in &result.frame_scores {
        wtr.serialize(frame)?;
    }
    wtr.flush()?;
    Ok(())
}
