// Domain errors - Error types for the domain layer

use thiserror::Error;

/// Domain-specific error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Invalid arguments provided
    #[error("Bad arguments: {0}")]
    BadArgs(String),

    /// Submission without a video file
    #[error("Please upload a video file")]
    NoInput,

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Another job currently owns the runner
    #[error("A job is already in progress: {0}")]
    JobInProgress(String),

    /// Transcription call failed
    #[error("Transcription failed: {0}")]
    TranscriptionFailed(String),

    /// Clip-finding call failed
    #[error("Clip finding failed: {0}")]
    ClipFindingFailed(String),

    /// Stream copy and the re-encode fallback both failed
    #[error("Failed to extract {output}: stream copy: {copy_error}; re-encode: {reencode_error}")]
    ExtractionFailed {
        output: String,
        copy_error: String,
        reencode_error: String,
    },

    /// External media tool invocation failed
    #[error("Media tool failed: {0}")]
    ToolFailed(String),

    /// Subtitle writing or burn-in failed
    #[error("Subtitle error: {0}")]
    SubtitleFailed(String),

    /// File system operation failed
    #[error("File system error: {0}")]
    FsFail(String),

    /// Archive creation failed
    #[error("Bundling failed: {0}")]
    BundleFailed(String),

    /// Job stopped through its cancellation token
    #[error("Job cancelled")]
    Cancelled,

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

