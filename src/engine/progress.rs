//! Progress relay from the job worker to its observers
//!
//! The worker owns a [`ProgressReporter`] and is the only producer on the
//! progress queue, the log queue and the status channel.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tracing::{error, info, warn};

use crate::domain::errors::DomainError;
use crate::domain::model::*;
use crate::domain::rules::ProgressSchedule;

/// Highest fraction reported before the job succeeds
const MAX_RUNNING_FRACTION: f64 = 0.99;

/// Cooperative cancellation flag shared between a job handle and its worker
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// `Err(Cancelled)` once cancellation was requested
    pub fn check(&self) -> Result<(), DomainError> {
        if self.is_cancelled() {
            Err(DomainError::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Worker side of a job's progress, log and status channels
#[derive(Clone)]
pub struct ProgressReporter {
    job_id: JobId,
    progress_tx: mpsc::UnboundedSender<ProgressUpdate>,
    log_tx: mpsc::UnboundedSender<String>,
    status: Arc<watch::Sender<JobSnapshot>>,
}

impl ProgressReporter {
    pub fn new(
        job_id: JobId,
        progress_tx: mpsc::UnboundedSender<ProgressUpdate>,
        log_tx: mpsc::UnboundedSender<String>,
        status: Arc<watch::Sender<JobSnapshot>>,
    ) -> Self {
        Self {
            job_id,
            progress_tx,
            log_tx,
            status,
        }
    }

    /// Report a running fraction.
    ///
    /// Fractions never go backwards and stay below 1.0; use
    /// [`complete_progress`](Self::complete_progress) for the final step.
    pub fn progress(&self, fraction: f64, message: impl Into<String>) {
        let requested = if fraction.is_finite() { fraction } else { 0.0 };
        self.emit(requested.clamp(0.0, MAX_RUNNING_FRACTION), message.into());
    }

    /// Report exactly 1.0; only the success path calls this
    pub fn complete_progress(&self, message: impl Into<String>) {
        self.emit(ProgressSchedule::COMPLETE, message.into());
    }

    fn emit(&self, requested: f64, message: String) {
        let mut fraction = requested;
        self.status.send_modify(|snapshot| {
            fraction = fraction.max(snapshot.progress);
            snapshot.progress = fraction;
            snapshot.message = message.clone();
        });

        let _ = self.progress_tx.send(ProgressUpdate { fraction, message });
    }

    /// Append a line to the job log
    pub fn log(&self, line: impl Into<String>) {
        let line = line.into();
        info!(job_id = %self.job_id, "{}", line);
        let _ = self.log_tx.send(line);
    }

    pub fn warn(&self, line: impl Into<String>) {
        let line = line.into();
        warn!(job_id = %self.job_id, "{}", line);
        let _ = self.log_tx.send(format!("WARNING: {}", line));
    }

    /// Publish the terminal snapshot for a finished worker and return it
    pub fn finish(&self, outcome: &Result<Vec<PathBuf>, DomainError>) -> JobSnapshot {
        match outcome {
            Ok(files) => {
                self.status.send_modify(|snapshot| {
                    snapshot.status = JobStatus::Complete;
                    snapshot.progress = ProgressSchedule::COMPLETE;
                    snapshot.message = "Processing complete!".to_string();
                    snapshot.files = files.clone();
                });
            }
            Err(DomainError::Cancelled) => {
                warn!(job_id = %self.job_id, "Job cancelled");
                let _ = self.log_tx.send("Job cancelled".to_string());
                self.status.send_modify(|snapshot| {
                    snapshot.status = JobStatus::Cancelled;
                    snapshot.message = "Cancelled".to_string();
                    snapshot.files.clear();
                });
            }
            Err(e) => {
                error!(job_id = %self.job_id, "Error processing video: {}", e);
                let _ = self.log_tx.send(format!("ERROR: {}", e));
                self.status.send_modify(|snapshot| {
                    snapshot.status = JobStatus::Error;
                    snapshot.message = format!("Error: {}", e);
                    snapshot.files.clear();
                });
            }
        }
        self.status.borrow().clone()
    }
}
