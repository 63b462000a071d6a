//! FFmpeg execution adapter
//!
//! Runs media tool invocations as `ffmpeg` subprocesses.

use std::process::Stdio;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

use crate::domain::errors::*;
use crate::ports::*;

/// Number of trailing stderr lines kept in error messages
const STDERR_TAIL_LINES: usize = 8;

/// FFmpeg-based execution adapter
pub struct FFmpegAdapter {
    binary: String,
    timeout: Option<Duration>,
}

impl FFmpegAdapter {
    /// Create new FFmpeg adapter
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            timeout: None,
        }
    }

    /// Kill invocations that run longer than `timeout`
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    fn stderr_tail(stderr: &[u8]) -> String {
        let text = String::from_utf8_lossy(stderr);
        let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
        let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
        lines[start..].join("\n")
    }
}

#[async_trait]
impl MediaToolPort for FFmpegAdapter {
    async fn run(&self, invocation: &ToolInvocation) -> Result<(), DomainError> {
        let started = Instant::now();
        debug!(
            "Running {} {:?} ({:?})",
            self.binary, invocation.args, invocation.kind
        );

        let child = Command::new(&self.binary)
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                DomainError::ToolFailed(format!("Failed to start {}: {}", self.binary, e))
            })?;

        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, child.wait_with_output())
                .await
                .map_err(|_| {
                    DomainError::ToolFailed(format!(
                        "{} timed out after {}s writing {}",
                        self.binary,
                        limit.as_secs(),
                        invocation.output_path.display()
                    ))
                })?,
            None => child.wait_with_output().await,
        }
        .map_err(|e| DomainError::ToolFailed(format!("Failed to wait for {}: {}", self.binary, e)))?;

        if !output.status.success() {
            return Err(DomainError::ToolFailed(format!(
                "{} exited with {}: {}",
                self.binary,
                output.status,
                Self::stderr_tail(&output.stderr)
            )));
        }

        info!(
            "{:?} wrote {} in {:.2}s",
            invocation.kind,
            invocation.output_path.display(),
            started.elapsed().as_secs_f64()
        );
        Ok(())
    }
}
