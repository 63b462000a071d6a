// Domain models - Core types and data structures

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::errors::DomainError;

/// One recognized speech segment, times in seconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub text: String,
    pub start_time: f64,
    pub end_time: f64,
}

impl Segment {
    pub fn new(text: impl Into<String>, start_time: f64, end_time: f64) -> Self {
        Self {
            text: text.into(),
            start_time,
            end_time,
        }
    }
}

/// Time-stamped transcript of a source video
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    pub segments: Vec<Segment>,
}

impl Transcript {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Candidate clip returned by the media collaborator.
///
/// Sub-transcript segment times are absolute positions in the source video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clip {
    pub start_time: f64,
    pub end_time: f64,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub transcript: Option<Transcript>,
}

impl Clip {
    /// Create new clip with validation
    pub fn new(start_time: f64, end_time: f64) -> Result<Self, DomainError> {
        let clip = Self {
            start_time,
            end_time,
            score: None,
            transcript: None,
        };
        clip.validate()?;
        Ok(clip)
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    pub fn with_transcript(mut self, transcript: Transcript) -> Self {
        self.transcript = Some(transcript);
        self
    }

    /// Check the time range
    pub fn validate(&self) -> Result<(), DomainError> {
        if !self.start_time.is_finite() || !self.end_time.is_finite() {
            return Err(DomainError::BadArgs(
                "Clip times must be finite".to_string(),
            ));
        }
        if self.start_time < 0.0 {
            return Err(DomainError::BadArgs(
                "Clip start cannot be negative".to_string(),
            ));
        }
        if self.start_time >= self.end_time {
            return Err(DomainError::BadArgs(format!(
                "Clip start ({:.3}s) must be before end ({:.3}s)",
                self.start_time, self.end_time
            )));
        }
        Ok(())
    }

    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }

    /// Score usable for ranking; NaN and infinities count as unscored
    pub fn rank_score(&self) -> Option<f64> {
        self.score.filter(|s| s.is_finite())
    }
}

/// Unique identifier of one processing run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(pub Uuid);

impl JobId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// First eight hex digits, used in directory names
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What the presentation layer submits
#[derive(Debug, Clone, PartialEq)]
pub struct JobRequest {
    pub video_path: Option<PathBuf>,
    pub clip_count: usize,
    pub add_subtitles: bool,
}

impl JobRequest {
    pub fn new(video_path: impl Into<PathBuf>, clip_count: usize, add_subtitles: bool) -> Self {
        Self {
            video_path: Some(video_path.into()),
            clip_count,
            add_subtitles,
        }
    }
}

/// Lifecycle of a job as seen by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Idle,
    Processing,
    Complete,
    Error,
    Cancelled,
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobStatus::Complete | JobStatus::Error | JobStatus::Cancelled
        )
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            JobStatus::Idle => "idle",
            JobStatus::Processing => "processing",
            JobStatus::Complete => "complete",
            JobStatus::Error => "error",
            JobStatus::Cancelled => "cancelled",
        };
        f.write_str(name)
    }
}

/// Latest known state of the current job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSnapshot {
    pub job_id: Option<JobId>,
    pub status: JobStatus,
    pub progress: f64,
    pub message: String,
    pub output_dir: Option<PathBuf>,
    pub files: Vec<PathBuf>,
}

impl JobSnapshot {
    pub fn idle() -> Self {
        Self {
            job_id: None,
            status: JobStatus::Idle,
            progress: 0.0,
            message: String::new(),
            output_dir: None,
            files: Vec::new(),
        }
    }

    pub fn started(job_id: JobId, output_dir: PathBuf) -> Self {
        Self {
            job_id: Some(job_id),
            status: JobStatus::Processing,
            progress: 0.0,
            message: "Starting...".to_string(),
            output_dir: Some(output_dir),
            files: Vec::new(),
        }
    }
}

impl Default for JobSnapshot {
    fn default() -> Self {
        Self::idle()
    }
}

/// One entry on the progress queue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressUpdate {
    pub fraction: f64,
    pub message: String,
}

#[cfg(test)]
mod tests;
