//! Clip extraction with a single re-encode fallback

use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::errors::DomainError;
use crate::engine::copy::StreamCopyClipper;
use crate::engine::reencode::ReencodeClipper;
use crate::engine::{EncodingSettings, ExtractionMode};
use crate::ports::{FsPort, MediaToolPort};

/// Cuts one time range out of a source video
pub struct ClipExtractor {
    tool: Arc<dyn MediaToolPort>,
    fs: Arc<dyn FsPort>,
    copy: StreamCopyClipper,
    reencode: ReencodeClipper,
}

impl ClipExtractor {
    pub fn new(
        tool: Arc<dyn MediaToolPort>,
        fs: Arc<dyn FsPort>,
        settings: EncodingSettings,
    ) -> Self {
        Self {
            tool,
            fs,
            copy: StreamCopyClipper::new(),
            reencode: ReencodeClipper::new(settings),
        }
    }

    /// Write `[start, end)` of `source` to `dest`.
    ///
    /// Tries a stream copy, then exactly one re-encode. A partial `dest` is
    /// removed after each failed attempt.
    pub async fn extract(
        &self,
        source: &Path,
        start: f64,
        end: f64,
        dest: &Path,
    ) -> Result<ExtractionMode, DomainError> {
        if !(start.is_finite() && end.is_finite()) || start < 0.0 || start >= end {
            return Err(DomainError::BadArgs(format!(
                "Invalid clip range {:.3}s - {:.3}s",
                start, end
            )));
        }

        let copy_error = match self
            .tool
            .run(&self.copy.invocation(source, start, end, dest))
            .await
        {
            Ok(()) => return Ok(ExtractionMode::StreamCopy),
            Err(e) => e,
        };

        warn!(
            "Stream copy failed for {}, re-encoding: {}",
            dest.display(),
            copy_error
        );
        self.discard_partial(dest).await;

        match self
            .tool
            .run(&self.reencode.invocation(source, start, end, dest))
            .await
        {
            Ok(()) => {
                info!("Re-encoded {}", dest.display());
                Ok(ExtractionMode::Reencode)
            }
            Err(reencode_error) => {
                self.discard_partial(dest).await;
                Err(DomainError::ExtractionFailed {
                    output: dest.display().to_string(),
                    copy_error: copy_error.to_string(),
                    reencode_error: reencode_error.to_string(),
                })
            }
        }
    }

    /// Best-effort removal of a failed attempt's output
    async fn discard_partial(&self, dest: &Path) {
        if let Err(e) = self.fs.delete_file(dest).await {
            warn!("Could not remove partial output {}: {}", dest.display(), e);
        }
    }
}
