//! Stream copy implementation

use std::path::Path;

use crate::ports::{InvocationKind, ToolInvocation};
use crate::utils::time::ffmpeg_seconds;

/// Stream copy clipper for lossless operations
#[derive(Debug, Clone, Default)]
pub struct StreamCopyClipper;

impl StreamCopyClipper {
    /// Create a new stream copy clipper
    pub fn new() -> Self {
        Self
    }

    /// Invocation cutting `[start, end)` out of `source` without re-encoding.
    ///
    /// `-ss` goes before `-i` for a fast input seek; timestamps are shifted
    /// to start at zero.
    pub fn invocation(&self, source: &Path, start: f64, end: f64, dest: &Path) -> ToolInvocation {
        let args = vec![
            "-y".to_string(),
            "-ss".to_string(),
            ffmpeg_seconds(start),
            "-i".to_string(),
            source.to_string_lossy().into_owned(),
            "-t".to_string(),
            ffmpeg_seconds(end - start),
            "-c".to_string(),
            "copy".to_string(),
            "-avoid_negative_ts".to_string(),
            "make_zero".to_string(),
            dest.to_string_lossy().into_owned(),
        ];

        ToolInvocation {
            kind: InvocationKind::StreamCopy,
            args,
            output_path: dest.to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_copy_arguments() {
        let invocation = StreamCopyClipper::new().invocation(
            Path::new("/in/talk.mp4"),
            30.0,
            75.5,
            Path::new("/out/clip_001.mp4"),
        );

        assert_eq!(invocation.kind, InvocationKind::StreamCopy);
        assert_eq!(
            invocation.args,
            vec![
                "-y", "-ss", "30.000", "-i", "/in/talk.mp4", "-t", "45.500", "-c", "copy",
                "-avoid_negative_ts", "make_zero", "/out/clip_001.mp4",
            ]
        );
        assert_eq!(invocation.output_path, Path::new("/out/clip_001.mp4"));
    }
}
