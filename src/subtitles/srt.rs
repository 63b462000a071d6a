//! SRT rendering for extracted clips

use std::path::Path;

use tracing::debug;

use crate::domain::errors::DomainError;
use crate::domain::model::Clip;
use crate::subtitles::Cue;
use crate::utils::time::{format_srt_timestamp, seconds_to_millis};

/// Writes clip-relative SRT files
#[derive(Debug, Clone, Default)]
pub struct SubtitleWriter;

impl SubtitleWriter {
    pub fn new() -> Self {
        Self
    }

    /// Cues of `clip`'s sub-transcript shifted to clip-relative time.
    ///
    /// Times are clamped to `[0, clip duration]`; cues that collapse to an
    /// empty range or carry no text are dropped.
    pub fn cues(clip: &Clip) -> Vec<Cue> {
        let Some(transcript) = clip.transcript.as_ref() else {
            return Vec::new();
        };
        let duration = clip.duration().max(0.0);

        transcript
            .segments
            .iter()
            .filter_map(|segment| {
                let start = (segment.start_time - clip.start_time).clamp(0.0, duration);
                let end = (segment.end_time - clip.start_time).clamp(0.0, duration);
                let start_ms = seconds_to_millis(start);
                let end_ms = seconds_to_millis(end);
                let text = segment.text.trim();

                if start_ms >= end_ms || text.is_empty() {
                    return None;
                }
                Some(Cue {
                    start_ms,
                    end_ms,
                    text: text.to_string(),
                })
            })
            .collect()
    }

    /// Render cues as an SRT document
    pub fn render(cues: &[Cue]) -> String {
        let mut out = String::new();

        for (i, cue) in cues.iter().enumerate() {
            out.push_str(&(i + 1).to_string());
            out.push('\n');

            out.push_str(&format!(
                "{} --> {}\n",
                format_srt_timestamp(cue.start_ms),
                format_srt_timestamp(cue.end_ms)
            ));

            out.push_str(&cue.text);
            out.push_str("\n\n");
        }

        out
    }

    /// Write the clip's subtitles to `dest`, returning the cue count.
    ///
    /// Nothing is written when there are no cues.
    pub async fn write(&self, clip: &Clip, dest: &Path) -> Result<usize, DomainError> {
        let cues = Self::cues(clip);
        if cues.is_empty() {
            return Ok(0);
        }

        tokio::fs::write(dest, Self::render(&cues))
            .await
            .map_err(|e| {
                DomainError::SubtitleFailed(format!("Failed to write {}: {}", dest.display(), e))
            })?;

        debug!("Wrote {} cues to {}", cues.len(), dest.display());
        Ok(cues.len())
    }
}
