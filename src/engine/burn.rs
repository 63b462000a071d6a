//! Subtitle burn-in

use std::path::Path;
use std::sync::Arc;

use crate::domain::errors::DomainError;
use crate::engine::SubtitleStyle;
use crate::ports::{InvocationKind, MediaToolPort, ToolInvocation};
use crate::utils::path::escape_filter_path;

/// Renders an SRT file into a clip's pixels
pub struct SubtitleBurner {
    tool: Arc<dyn MediaToolPort>,
    style: SubtitleStyle,
}

impl SubtitleBurner {
    pub fn new(tool: Arc<dyn MediaToolPort>, style: SubtitleStyle) -> Self {
        Self { tool, style }
    }

    pub fn invocation(&self, video: &Path, subtitles: &Path, dest: &Path) -> ToolInvocation {
        let filter = format!(
            "subtitles='{}':force_style='{}'",
            escape_filter_path(subtitles),
            self.style.force_style()
        );

        ToolInvocation {
            kind: InvocationKind::BurnSubtitles,
            args: vec![
                "-y".to_string(),
                "-i".to_string(),
                video.to_string_lossy().into_owned(),
                "-vf".to_string(),
                filter,
                "-c:a".to_string(),
                "copy".to_string(),
                dest.to_string_lossy().into_owned(),
            ],
            output_path: dest.to_path_buf(),
        }
    }

    /// Burn `subtitles` into `video`, writing `dest`. The caller owns cleanup.
    pub async fn burn(&self, video: &Path, subtitles: &Path, dest: &Path) -> Result<(), DomainError> {
        self.tool
            .run(&self.invocation(video, subtitles, dest))
            .await
            .map_err(|e| DomainError::SubtitleFailed(format!("Burn-in failed: {}", e)))
    }
}
