// Bundle interactor - Packs a job's output directory into a ZIP archive

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::domain::errors::*;
use crate::ports::*;
use crate::utils::path::archive_path_for;

/// Interactor for the download bundle use case
pub struct BundleInteractor {
    fs_port: Arc<dyn FsPort>,
}

impl BundleInteractor {
    pub fn new(fs_port: Arc<dyn FsPort>) -> Self {
        Self { fs_port }
    }

    /// Zip every file under `output_dir` into `<output_dir>.zip`.
    ///
    /// A missing, unset or empty directory yields `Ok(None)`.
    pub async fn bundle(&self, output_dir: Option<&Path>) -> Result<Option<PathBuf>, DomainError> {
        let Some(dir) = output_dir.filter(|d| !d.as_os_str().is_empty()) else {
            return Ok(None);
        };
        if !self.fs_port.dir_exists(dir).await? {
            debug!("Nothing to bundle at {}", dir.display());
            return Ok(None);
        }

        let dir = self.fs_port.resolve_path(dir).await?;
        let files = self.fs_port.list_files(&dir).await?;
        if files.is_empty() {
            debug!("Output directory {} is empty", dir.display());
            return Ok(None);
        }

        let archive = archive_path_for(&dir);
        let entries = files.len();
        let target = archive.clone();
        tokio::task::spawn_blocking(move || write_archive(&dir, &files, &target))
            .await
            .map_err(|e| DomainError::InternalError(format!("Bundling task failed: {}", e)))??;

        info!("Bundled {} files into {}", entries, archive.display());
        Ok(Some(archive))
    }
}

/// Name of `file` inside the archive: relative to `root`, `/`-separated
fn entry_name(root: &Path, file: &Path) -> Result<String, DomainError> {
    let relative = file.strip_prefix(root).map_err(|_| {
        DomainError::BundleFailed(format!(
            "{} is outside {}",
            file.display(),
            root.display()
        ))
    })?;
    Ok(relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/"))
}

fn write_archive(root: &Path, files: &[PathBuf], archive: &Path) -> Result<(), DomainError> {
    let fail = |what: &str, e: &dyn std::fmt::Display| {
        DomainError::BundleFailed(format!("{} for {}: {}", what, archive.display(), e))
    };

    let parent = archive
        .parent()
        .ok_or_else(|| DomainError::BundleFailed(format!("{} has no parent", archive.display())))?;
    let mut temp = tempfile::NamedTempFile::new_in(parent)
        .map_err(|e| fail("Failed to create temp file", &e))?;

    {
        let mut zip = ZipWriter::new(temp.as_file_mut());
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for file in files {
            let name = entry_name(root, file)?;
            zip.start_file(name.as_str(), options)
                .map_err(|e| fail(&format!("Failed to add {}", name), &e))?;
            let mut source = std::fs::File::open(file)
                .map_err(|e| fail(&format!("Failed to read {}", file.display()), &e))?;
            std::io::copy(&mut source, &mut zip)
                .map_err(|e| fail(&format!("Failed to write {}", name), &e))?;
        }

        let inner = zip.finish().map_err(|e| fail("Failed to finish archive", &e))?;
        inner.flush().map_err(|e| fail("Failed to flush archive", &e))?;
    }

    temp.persist(archive)
        .map_err(|e| fail("Failed to move archive into place", &e.error))?;
    Ok(())
}
