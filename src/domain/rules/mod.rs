// Domain rules - Business logic and policies

use std::cmp::Ordering;

use crate::domain::errors::*;
use crate::domain::model::*;

/// Shortest clip the collaborator is asked for (seconds)
pub const MIN_CLIP_DURATION: f64 = 15.0;
/// Longest clip the collaborator is asked for (seconds)
pub const MAX_CLIP_DURATION: f64 = 120.0;
/// Upper bound on the clip count a submission may request
pub const MAX_REQUESTABLE_CLIPS: usize = 10;

/// Business rules for clip ordering and selection
pub struct ClipRanker;

impl ClipRanker {
    /// Sort by score descending and keep the first `limit` clips.
    ///
    /// The sort is stable; unscored clips go after every scored clip.
    pub fn rank(mut clips: Vec<Clip>, limit: usize) -> Vec<Clip> {
        clips.sort_by(Self::compare);
        clips.truncate(limit);
        clips
    }

    fn compare(a: &Clip, b: &Clip) -> Ordering {
        match (a.rank_score(), b.rank_score()) {
            (Some(x), Some(y)) => y.total_cmp(&x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

/// Business rules for output file naming
pub struct OutputNaming;

impl OutputNaming {
    /// File name for the clip at zero-based rank `index`
    pub fn clip_file_name(index: usize) -> String {
        format!("clip_{:03}.mp4", index + 1)
    }

    /// Directory name for a job started at `started_at`
    pub fn job_dir_name(started_at: chrono::DateTime<chrono::Local>, job_id: &JobId) -> String {
        format!("{}_{}", started_at.format("%Y%m%d_%H%M%S"), job_id.short())
    }
}

/// Progress fractions reported at each pipeline stage
pub struct ProgressSchedule;

impl ProgressSchedule {
    pub const STARTED: f64 = 0.0;
    pub const TRANSCRIBING: f64 = 0.1;
    pub const FINDING_CLIPS: f64 = 0.4;
    pub const EXTRACTION_SPAN: f64 = 0.5;
    pub const COMPLETE: f64 = 1.0;

    /// Fraction reported before processing clip `index` of `total`
    pub fn clip_fraction(index: usize, total: usize) -> f64 {
        if total == 0 {
            return Self::FINDING_CLIPS;
        }
        Self::FINDING_CLIPS + Self::EXTRACTION_SPAN * (index as f64 / total as f64)
    }
}

/// Business rules for job submission
pub struct SubmissionValidator;

impl SubmissionValidator {
    /// Reject a request before any worker is spawned
    pub fn validate(request: &JobRequest, max_clip_count: usize) -> Result<(), DomainError> {
        let video_path = request.video_path.as_ref().ok_or(DomainError::NoInput)?;
        if video_path.as_os_str().is_empty() {
            return Err(DomainError::NoInput);
        }
        if !video_path.is_file() {
            return Err(DomainError::FileNotFound(
                video_path.display().to_string(),
            ));
        }

        let max = max_clip_count.clamp(1, MAX_REQUESTABLE_CLIPS);
        if request.clip_count == 0 || request.clip_count > max {
            return Err(DomainError::BadArgs(format!(
                "Clip count must be between 1 and {}, got {}",
                max, request.clip_count
            )));
        }

        Ok(())
    }
}
