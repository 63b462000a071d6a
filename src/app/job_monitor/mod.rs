// Job monitor - Drains a job's progress and log queues until the worker ends

use std::collections::VecDeque;
use std::path::PathBuf;

use serde::Serialize;

use crate::app::job_service::{join_worker, JobHandle};
use crate::domain::model::*;

/// Receives job events as the monitor drains them
pub trait JobObserver: Send + Sync {
    /// Called for every progress update, in order
    fn on_progress(&self, update: &ProgressUpdate);

    /// Called for every log line, already stamped `[HH:MM:SS]`
    fn on_log(&self, line: &str);

    /// Called once with the final report
    fn on_finish(&self, report: &JobReport);
}

/// Observer that ignores every event
pub struct NoOpObserver;

impl JobObserver for NoOpObserver {
    fn on_progress(&self, _update: &ProgressUpdate) {}
    fn on_log(&self, _line: &str) {}
    fn on_finish(&self, _report: &JobReport) {}
}

/// Everything the presentation layer needs once a job is over
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobReport {
    pub job_id: JobId,
    pub status: JobStatus,
    pub message: String,
    pub output_dir: PathBuf,
    pub files: Vec<PathBuf>,
    /// Most recent stamped log lines, oldest first
    pub logs: Vec<String>,
    /// Every fraction seen on the progress queue
    #[serde(skip)]
    pub progress_history: Vec<f64>,
}

impl JobReport {
    pub fn succeeded(&self) -> bool {
        self.status == JobStatus::Complete
    }
}

/// Event-driven consumer of a job's queues
pub struct JobMonitor {
    log_history: usize,
}

impl Default for JobMonitor {
    fn default() -> Self {
        Self::new(100)
    }
}

impl JobMonitor {
    /// Keep at most `log_history` stamped lines in the report
    pub fn new(log_history: usize) -> Self {
        Self {
            log_history: log_history.max(1),
        }
    }

    /// Forward events to `observer` until both queues close, then collect
    /// the worker's terminal snapshot.
    pub async fn watch(&self, handle: JobHandle, observer: &dyn JobObserver) -> JobReport {
        let mut parts = handle.into_parts();
        let mut logs: VecDeque<String> = VecDeque::with_capacity(self.log_history);
        let mut progress_history = Vec::new();
        let mut progress_open = true;
        let mut log_open = true;

        while progress_open || log_open {
            tokio::select! {
                update = parts.progress_rx.recv(), if progress_open => match update {
                    Some(update) => {
                        progress_history.push(update.fraction);
                        observer.on_progress(&update);
                    }
                    None => progress_open = false,
                },
                line = parts.log_rx.recv(), if log_open => match line {
                    Some(line) => {
                        let stamped = format!("[{}] {}", chrono::Local::now().format("%H:%M:%S"), line);
                        observer.on_log(&stamped);
                        if logs.len() == self.log_history {
                            logs.pop_front();
                        }
                        logs.push_back(stamped);
                    }
                    None => log_open = false,
                },
            }
        }

        let snapshot = join_worker(parts.worker, parts.id, parts.output_dir.clone()).await;
        let report = JobReport {
            job_id: parts.id,
            status: snapshot.status,
            message: snapshot.message,
            output_dir: snapshot.output_dir.unwrap_or(parts.output_dir),
            files: snapshot.files,
            logs: logs.into_iter().collect(),
            progress_history,
        };
        observer.on_finish(&report);
        report
    }
}
