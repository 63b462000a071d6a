//! Command-line media collaborator adapter
//!
//! Bridges to the external transcription and clip-finding library through two
//! configured commands that exchange JSON over stdin/stdout.

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// Environment variable some collaborator models need for gated downloads
pub const HF_TOKEN_VAR: &str = "HUGGINGFACE_TOKEN";

/// Collaborator adapter that shells out to configured commands
pub struct CommandCollaboratorAdapter {
    transcribe_command: Vec<String>,
    find_clips_command: Vec<String>,
}

impl CommandCollaboratorAdapter {
    /// Create new adapter; both commands must name a program
    pub fn new(
        transcribe_command: Vec<String>,
        find_clips_command: Vec<String>,
    ) -> Result<Self, DomainError> {
        if transcribe_command.is_empty() || find_clips_command.is_empty() {
            return Err(DomainError::BadArgs(
                "Collaborator commands cannot be empty".to_string(),
            ));
        }

        if std::env::var_os(HF_TOKEN_VAR).is_some() {
            info!("HuggingFace token found");
        } else {
            warn!("No HuggingFace token found. Some features may be limited.");
        }

        Ok(Self {
            transcribe_command,
            find_clips_command,
        })
    }

    fn command(parts: &[String]) -> Command {
        let mut command = Command::new(&parts[0]);
        command
            .args(&parts[1..])
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        command
    }

    fn failure_text(program: &str, status: std::process::ExitStatus, stderr: &[u8]) -> String {
        let stderr = String::from_utf8_lossy(stderr);
        let last = stderr
            .lines()
            .rev()
            .find(|l| !l.trim().is_empty())
            .unwrap_or("no error output");
        format!("{} exited with {}: {}", program, status, last.trim())
    }

    /// Parse the clip list as returned; range checks happen in the pipeline
    fn parse_clips(stdout: &[u8]) -> Result<Vec<Clip>, DomainError> {
        serde_json::from_slice(stdout)
            .map_err(|e| DomainError::ClipFindingFailed(format!("Invalid clip list: {}", e)))
    }
}

#[async_trait]
impl MediaCollaboratorPort for CommandCollaboratorAdapter {
    async fn transcribe(&self, path: &Path) -> Result<Transcript, DomainError> {
        let program = &self.transcribe_command[0];
        debug!("Transcribing {} with {}", path.display(), program);

        let output = Self::command(&self.transcribe_command)
            .arg(path)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| {
                DomainError::TranscriptionFailed(format!("Failed to start {}: {}", program, e))
            })?;

        if !output.status.success() {
            return Err(DomainError::TranscriptionFailed(Self::failure_text(
                program,
                output.status,
                &output.stderr,
            )));
        }

        serde_json::from_slice(&output.stdout)
            .map_err(|e| DomainError::TranscriptionFailed(format!("Invalid transcript: {}", e)))
    }

    async fn find_clips(
        &self,
        transcript: &Transcript,
        min_duration: f64,
        max_duration: f64,
    ) -> Result<Vec<Clip>, DomainError> {
        let program = &self.find_clips_command[0];
        let payload = serde_json::to_vec(transcript)
            .map_err(|e| DomainError::InternalError(format!("Failed to encode transcript: {}", e)))?;

        let mut child = Self::command(&self.find_clips_command)
            .arg("--min-duration")
            .arg(min_duration.to_string())
            .arg("--max-duration")
            .arg(max_duration.to_string())
            .stdin(Stdio::piped())
            .spawn()
            .map_err(|e| {
                DomainError::ClipFindingFailed(format!("Failed to start {}: {}", program, e))
            })?;

        // Feed stdin from its own task so a collaborator that writes to
        // stderr before reading cannot fill both pipes
        let writer = child.stdin.take().map(|mut stdin| {
            tokio::spawn(async move {
                stdin.write_all(&payload).await?;
                stdin.shutdown().await
            })
        });

        let output = child.wait_with_output().await.map_err(|e| {
            DomainError::ClipFindingFailed(format!("Failed to wait for {}: {}", program, e))
        })?;

        if !output.status.success() {
            return Err(DomainError::ClipFindingFailed(Self::failure_text(
                program,
                output.status,
                &output.stderr,
            )));
        }

        if let Some(writer) = writer {
            writer
                .await
                .map_err(|e| DomainError::InternalError(format!("Transcript writer panicked: {}", e)))?
                .map_err(|e| {
                    DomainError::ClipFindingFailed(format!("Failed to send transcript: {}", e))
                })?;
        }

        Self::parse_clips(&output.stdout)
    }
}
