// Job service - Single-flight submission and background execution of jobs

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::app::process_interactor::ProcessInteractor;
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::*;
use crate::engine::{CancelToken, ProgressReporter};

/// Releases the job slot when the worker task ends, including by panic
struct SlotGuard(Arc<AtomicBool>);

impl Drop for SlotGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Caller side of a running job
pub struct JobHandle {
    pub id: JobId,
    pub output_dir: PathBuf,
    pub progress_rx: mpsc::UnboundedReceiver<ProgressUpdate>,
    pub log_rx: mpsc::UnboundedReceiver<String>,
    cancel: CancelToken,
    worker: JoinHandle<JobSnapshot>,
}

impl JobHandle {
    /// Ask the worker to stop at its next checkpoint
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Split into the pieces a monitor consumes
    pub(crate) fn into_parts(self) -> JobParts {
        JobParts {
            id: self.id,
            output_dir: self.output_dir,
            progress_rx: self.progress_rx,
            log_rx: self.log_rx,
            worker: self.worker,
        }
    }
}

pub(crate) struct JobParts {
    pub id: JobId,
    pub output_dir: PathBuf,
    pub progress_rx: mpsc::UnboundedReceiver<ProgressUpdate>,
    pub log_rx: mpsc::UnboundedReceiver<String>,
    pub worker: JoinHandle<JobSnapshot>,
}

pub(crate) async fn join_worker(
    worker: JoinHandle<JobSnapshot>,
    id: JobId,
    output_dir: PathBuf,
) -> JobSnapshot {
    match worker.await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            error!(job_id = %id, "Job supervisor failed: {}", e);
            JobSnapshot {
                job_id: Some(id),
                status: JobStatus::Error,
                progress: 0.0,
                message: format!("Error: {}", DomainError::InternalError(e.to_string())),
                output_dir: Some(output_dir),
                files: Vec::new(),
            }
        }
    }
}

/// Accepts jobs one at a time and runs them on spawned tasks
pub struct JobService {
    interactor: Arc<ProcessInteractor>,
    output_root: PathBuf,
    max_clip_count: usize,
    busy: Arc<AtomicBool>,
    status: Arc<watch::Sender<JobSnapshot>>,
}

impl JobService {
    pub fn new(
        interactor: Arc<ProcessInteractor>,
        output_root: impl Into<PathBuf>,
        max_clip_count: usize,
    ) -> Self {
        let (status, _) = watch::channel(JobSnapshot::idle());
        Self {
            interactor,
            output_root: output_root.into(),
            max_clip_count,
            busy: Arc::new(AtomicBool::new(false)),
            status: Arc::new(status),
        }
    }

    /// Latest snapshot of the current (or last) job
    pub fn snapshot(&self) -> JobSnapshot {
        self.status.borrow().clone()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Validate and start a job.
    ///
    /// Invalid requests are rejected before anything is spawned; a request
    /// arriving while another job runs gets `JobInProgress`.
    pub fn submit(&self, request: JobRequest) -> Result<JobHandle, DomainError> {
        SubmissionValidator::validate(&request, self.max_clip_count)?;

        if self
            .busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            let current = self
                .status
                .borrow()
                .job_id
                .map(|id| id.to_string())
                .unwrap_or_else(|| "unknown".to_string());
            return Err(DomainError::JobInProgress(current));
        }
        let slot = SlotGuard(Arc::clone(&self.busy));

        let id = JobId::new();
        let output_dir = self
            .output_root
            .join(OutputNaming::job_dir_name(chrono::Local::now(), &id));
        self.status
            .send_replace(JobSnapshot::started(id, output_dir.clone()));

        let (progress_tx, progress_rx) = mpsc::unbounded_channel();
        let (log_tx, log_rx) = mpsc::unbounded_channel();
        let reporter = ProgressReporter::new(id, progress_tx, log_tx, Arc::clone(&self.status));
        let cancel = CancelToken::new();

        info!(
            job_id = %id,
            "Submitting job for {:?} ({} clips, subtitles: {})",
            request.video_path, request.clip_count, request.add_subtitles
        );

        let interactor = Arc::clone(&self.interactor);
        let worker_cancel = cancel.clone();
        let worker_dir = output_dir.clone();
        let worker = tokio::spawn(async move {
            let _slot = slot;

            // The pipeline runs on its own task so a panic surfaces as a JoinError
            let pipeline_reporter = reporter.clone();
            let pipeline = tokio::spawn(async move {
                interactor
                    .run(&request, &worker_dir, &pipeline_reporter, &worker_cancel)
                    .await
            });

            let outcome = match pipeline.await {
                Ok(outcome) => outcome,
                Err(e) => Err(DomainError::InternalError(format!(
                    "Worker task failed: {}",
                    e
                ))),
            };
            reporter.finish(&outcome)
        });

        Ok(JobHandle {
            id,
            output_dir,
            progress_rx,
            log_rx,
            cancel,
            worker,
        })
    }
}
