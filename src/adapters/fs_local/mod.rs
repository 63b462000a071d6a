// Local filesystem adapter - File system operations backed by tokio::fs

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use walkdir::WalkDir;

use crate::domain::errors::*;
use crate::ports::*;

/// Local filesystem adapter
pub struct FsLocalAdapter;

impl FsLocalAdapter {
    /// Create new local filesystem adapter
    pub fn new() -> Self {
        Self
    }
}

impl Default for FsLocalAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FsPort for FsLocalAdapter {
    async fn dir_exists(&self, dir_path: &Path) -> Result<bool, DomainError> {
        match tokio::fs::metadata(dir_path).await {
            Ok(metadata) => Ok(metadata.is_dir()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(DomainError::FsFail(format!(
                "Failed to stat {}: {}",
                dir_path.display(),
                e
            ))),
        }
    }

    async fn create_directory(&self, dir_path: &Path) -> Result<(), DomainError> {
        tokio::fs::create_dir_all(dir_path).await.map_err(|e| {
            DomainError::FsFail(format!(
                "Failed to create directory {}: {}",
                dir_path.display(),
                e
            ))
        })
    }

    async fn delete_file(&self, file_path: &Path) -> Result<(), DomainError> {
        match tokio::fs::remove_file(file_path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DomainError::FsFail(format!(
                "Failed to delete {}: {}",
                file_path.display(),
                e
            ))),
        }
    }

    async fn move_file(&self, from: &Path, to: &Path) -> Result<(), DomainError> {
        // Ensure destination directory exists
        if let Some(parent) = to.parent() {
            self.create_directory(parent).await?;
        }

        tokio::fs::rename(from, to).await.map_err(|e| {
            DomainError::FsFail(format!(
                "Failed to move {} to {}: {}",
                from.display(),
                to.display(),
                e
            ))
        })
    }

    async fn resolve_path(&self, file_path: &Path) -> Result<PathBuf, DomainError> {
        std::path::absolute(file_path).map_err(|e| {
            DomainError::FsFail(format!(
                "Failed to resolve {}: {}",
                file_path.display(),
                e
            ))
        })
    }

    async fn list_files(&self, dir_path: &Path) -> Result<Vec<PathBuf>, DomainError> {
        let root = dir_path.to_path_buf();
        let files = tokio::task::spawn_blocking(move || {
            let mut files = Vec::new();
            for entry in WalkDir::new(&root).sort_by_file_name() {
                let entry = entry.map_err(|e| {
                    DomainError::FsFail(format!("Failed to walk {}: {}", root.display(), e))
                })?;
                if entry.file_type().is_file() {
                    files.push(entry.into_path());
                }
            }
            Ok::<_, DomainError>(files)
        })
        .await
        .map_err(|e| DomainError::InternalError(format!("Directory walk panicked: {}", e)))??;

        Ok(files)
    }
}
