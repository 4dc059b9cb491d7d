mod common;

use common::*;
use kinescore::api::{self, ScoreRequest};
use kinescore::scorer::{NoopObserver, Scorer};
use kinescore::skeleton::{Joint, PoseTrack};
use kinescore::KineScoreError;
use std::fs;

#[test]
fn test_score_json_request() {
    let track = PoseTrack::new(body_sequence(12, 0.9));
    let request = ScoreRequest {
        reference: track.clone(),
        student: track,
        student_delay: 0.0,
    };
    let json = serde_json::to_string(&request).unwrap();

    let result = api::score_json(&Scorer::default(), &json, &NoopObserver).unwrap();
    assert_eq!(result.total_score, 100.0);
    assert_eq!(result.frame_scores.len(), 12);
}

#[test]
fn test_request_delay_defaults_to_zero() {
    let json = r#"{"reference": {"sequence": []}, "student": {"sequence": []}}"#;
    let request: ScoreRequest = serde_json::from_str(json).unwrap();
    assert_eq!(request.student_delay, 0.0);
}

#[test]
fn test_score_json_rejects_garbage() {
    assert!(api::score_json(&Scorer::default(), "{not json", &NoopObserver).is_err());
}

#[test]
fn test_pose_track_tolerates_bad_entries() {
    let json = r#"{"sequence": [
        {"keypoints": {"left_knee": [0.5, 0.5, 0.9], "left_hip": [0.5, null, 0.9]}},
        {"keypoints": {"halo": [0.1, 0.1, 1.0]}},
        {}
    ]}"#;
    let track = PoseTrack::from_reader(json.as_bytes()).unwrap();

    assert_eq!(track.len(), 3);
    assert!(track.sequence[0].get(Joint::LeftKnee).is_some());
    assert!(track.sequence[0].get(Joint::LeftHip).is_none());
    assert!(track.sequence[1].is_empty());
    assert!(track.sequence[2].is_empty());
}

#[test]
fn test_pose_track_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("track.json");
    let track = PoseTrack::new(knee_sweep(5, 0.0, 0.8));
    fs::write(&path, serde_json::to_string(&track).unwrap()).unwrap();

    let loaded = PoseTrack::load_from_file(&path).unwrap();
    assert_eq!(loaded.len(), 5);
    let ankle = loaded.sequence[4].get(Joint::LeftAnkle).unwrap();
    let expected = track.sequence[4].get(Joint::LeftAnkle).unwrap();
    assert!((ankle.x - expected.x).abs() < 1e-9);
    assert_eq!(ankle.confidence, 0.8);
    assert_eq!(loaded.sequence[4].len(), 3);
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.json");
    let result = api::score_files(&Scorer::default(), &missing, &missing, 0.0, &NoopObserver);
    assert!(result.is_err());
}

#[test]
fn test_malformed_track_names_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken_track.json");
    fs::write(&path, r#"{"sequence": 5}"#).unwrap();

    let err = PoseTrack::load_from_file(&path).unwrap_err();
    assert!(err.to_string().contains("broken_track.json"));
    match err {
        KineScoreError::PoseTrack { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("unexpected error: {other}"),
    }

    let missing = dir.path().join("absent.json");
    assert!(matches!(
        PoseTrack::load_from_file(&missing),
        Err(KineScoreError::Io(_))
    ));
}

#[test]
fn test_score_files_and_timeline_csv() {
    let dir = tempfile::tempdir().unwrap();
    let ref_path = dir.path().join("reference.json");
    let stu_path = dir.path().join("student.json");
    let csv_path = dir.path().join("timeline.csv");

    let track = PoseTrack::new(body_sequence(6, 0.9));
    fs::write(&ref_path, serde_json::to_string(&track).unwrap()).unwrap();
    fs::write(&stu_path, serde_json::to_string(&track).unwrap()).unwrap();

    let result =
        api::score_files(&Scorer::default(), &ref_path, &stu_path, 0.0, &NoopObserver).unwrap();
    api::write_timeline_csv(&result, &csv_path).unwrap();

    let csv = fs::read_to_string(&csv_path).unwrap();
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("frame_index,score,timestamp"));
    assert_eq!(lines.count(), 6);
}
