//! Re-encoding clipping implementation used when stream copy fails

use std::path::Path;

use crate::engine::EncodingSettings;
use crate::ports::{InvocationKind, ToolInvocation};
use crate::utils::time::ffmpeg_seconds;

/// Re-encoding clipper
#[derive(Debug, Clone, Default)]
pub struct ReencodeClipper {
    settings: EncodingSettings,
}

impl ReencodeClipper {
    /// Create a new re-encoding clipper
    pub fn new(settings: EncodingSettings) -> Self {
        Self { settings }
    }

    /// Invocation cutting `[start, end)` out of `source` with re-encoding
    pub fn invocation(&self, source: &Path, start: f64, end: f64, dest: &Path) -> ToolInvocation {
        let s = &self.settings;
        let args = vec![
            "-y".to_string(),
            "-ss".to_string(),
            ffmpeg_seconds(start),
            "-i".to_string(),
            source.to_string_lossy().into_owned(),
            "-t".to_string(),
            ffmpeg_seconds(end - start),
            "-c:v".to_string(),
            s.video_codec.clone(),
            "-preset".to_string(),
            s.preset.clone(),
            "-crf".to_string(),
            s.crf.to_string(),
            "-c:a".to_string(),
            s.audio_codec.clone(),
            "-b:a".to_string(),
            s.audio_bitrate.clone(),
            dest.to_string_lossy().into_owned(),
        ];

        ToolInvocation {
            kind: InvocationKind::Reencode,
            args,
            output_path: dest.to_path_buf(),
        }
    }
}
