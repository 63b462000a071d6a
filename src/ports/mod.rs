// Ports - Interface definitions (contracts)

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::errors::*;
use crate::domain::model::*;

/// Port for the external transcription and clip-finding library
#[async_trait]
pub trait MediaCollaboratorPort: Send + Sync {
    /// Transcribe the media file at `path`
    async fn transcribe(&self, path: &Path) -> Result<Transcript, DomainError>;

    /// Find candidate clips in a transcript within the given duration bounds
    async fn find_clips(
        &self,
        transcript: &Transcript,
        min_duration: f64,
        max_duration: f64,
    ) -> Result<Vec<Clip>, DomainError>;
}

/// Kind of media tool invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationKind {
    /// Cut without re-encoding
    StreamCopy,
    /// Cut with re-encoding
    Reencode,
    /// Render a subtitle file into the video pixels
    BurnSubtitles,
}

/// One command-line invocation of the media tool
#[derive(Debug, Clone, PartialEq)]
pub struct ToolInvocation {
    pub kind: InvocationKind,
    pub args: Vec<String>,
    pub output_path: PathBuf,
}

/// Port for the external media-processing command
#[async_trait]
pub trait MediaToolPort: Send + Sync {
    /// Run one invocation to completion
    async fn run(&self, invocation: &ToolInvocation) -> Result<(), DomainError>;
}

/// Port for file system operations
#[async_trait]
pub trait FsPort: Send + Sync {
    /// Check if a directory exists
    async fn dir_exists(&self, dir_path: &Path) -> Result<bool, DomainError>;

    /// Create directory (including parent directories)
    async fn create_directory(&self, dir_path: &Path) -> Result<(), DomainError>;

    /// Delete file; a missing file is not an error
    async fn delete_file(&self, file_path: &Path) -> Result<(), DomainError>;

    /// Move file atomically, replacing the destination
    async fn move_file(&self, from: &Path, to: &Path) -> Result<(), DomainError>;

    /// Resolve relative path to absolute path
    async fn resolve_path(&self, file_path: &Path) -> Result<PathBuf, DomainError>;

    /// Regular files under a directory, sorted by path
    async fn list_files(&self, dir_path: &Path) -> Result<Vec<PathBuf>, DomainError>;
}
