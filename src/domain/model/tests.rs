// Unit tests for domain models

use crate::domain::errors::*;
use crate::domain::model::*;

#[test]
fn test_clip_new_valid() {
    let clip = Clip::new(10.0, 25.5).unwrap();
    assert_eq!(clip.duration(), 15.5);
    assert_eq!(clip.score, None);
    assert!(clip.transcript.is_none());
}

#[test]
fn test_clip_new_rejects_inverted_range() {
    assert!(matches!(Clip::new(20.0, 10.0), Err(DomainError::BadArgs(_))));
    assert!(matches!(Clip::new(5.0, 5.0), Err(DomainError::BadArgs(_))));
}

#[test]
fn test_clip_new_rejects_negative_and_nan() {
    assert!(Clip::new(-1.0, 4.0).is_err());
    assert!(Clip::new(f64::NAN, 4.0).is_err());
    assert!(Clip::new(0.0, f64::INFINITY).is_err());
}

#[test]
fn test_clip_rank_score_ignores_non_finite() {
    let clip = Clip::new(0.0, 1.0).unwrap().with_score(f64::NAN);
    assert_eq!(clip.rank_score(), None);

    let clip = Clip::new(0.0, 1.0).unwrap().with_score(0.75);
    assert_eq!(clip.rank_score(), Some(0.75));
}

#[test]
fn test_clip_deserializes_without_optional_fields() {
    let clip: Clip = serde_json::from_str(r#"{"start_time": 1.5, "end_time": 20.0}"#).unwrap();
    assert_eq!(clip.start_time, 1.5);
    assert_eq!(clip.score, None);
    assert!(clip.transcript.is_none());
}

#[test]
fn test_clip_deserializes_with_transcript() {
    let json = r#"{
        "start_time": 30.0,
        "end_time": 45.0,
        "score": 0.9,
        "transcript": {"segments": [{"text": "hello", "start_time": 31.0, "end_time": 33.0}]}
    }"#;
    let clip: Clip = serde_json::from_str(json).unwrap();
    assert_eq!(clip.score, Some(0.9));
    assert_eq!(clip.transcript.unwrap().segments[0].text, "hello");
}

#[test]
fn test_job_id_short_is_eight_hex_chars() {
    let id = JobId::new();
    let short = id.short();
    assert_eq!(short.len(), 8);
    assert!(short.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn test_job_status_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&JobStatus::Complete).unwrap(), "\"complete\"");
    assert_eq!(JobStatus::Error.to_string(), "error");
    assert!(JobStatus::Cancelled.is_terminal());
    assert!(!JobStatus::Processing.is_terminal());
}

#[test]
fn test_job_snapshot_started() {
    let id = JobId::new();
    let snapshot = JobSnapshot::started(id, "/tmp/out".into());
    assert_eq!(snapshot.status, JobStatus::Processing);
    assert_eq!(snapshot.progress, 0.0);
    assert_eq!(snapshot.message, "Starting...");
    assert!(snapshot.files.is_empty());
    assert_eq!(JobSnapshot::default().status, JobStatus::Idle);
}
