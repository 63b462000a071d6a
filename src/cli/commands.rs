//! Command implementations

use std::io::Write;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::adapters::AppConfig;
use crate::app::container::{AppContainer, DefaultAppContainer};
use crate::app::{JobObserver, JobReport};
use crate::cli::args::{BundleArgs, ProcessArgs};
use crate::domain::model::*;

/// Width of the console progress bar in cells
const BAR_WIDTH: usize = 20;

/// Execute the process command; `Ok(false)` when the job did not complete
pub async fn process(
    container: &DefaultAppContainer,
    config: &AppConfig,
    args: ProcessArgs,
) -> Result<bool> {
    let clip_count = args
        .clips
        .map(|c| c as usize)
        .unwrap_or(config.jobs.default_clip_count);
    let add_subtitles = config.jobs.add_subtitles && !args.no_subtitles;

    info!("Starting process operation");
    info!("Input: {}", args.input.display());
    info!("Clips: {}, subtitles: {}", clip_count, add_subtitles);

    let request = JobRequest::new(args.input, clip_count, add_subtitles);
    let handle = container
        .job_service()
        .submit(request)
        .context("Failed to start job")?;

    let cancel = handle.cancel_token();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, cancelling job");
            cancel.cancel();
        }
    });

    let observer: Box<dyn JobObserver> = if args.json {
        Box::new(JsonObserver)
    } else {
        Box::new(ConsoleObserver)
    };
    let report = container.job_monitor().watch(handle, observer.as_ref()).await;
    interrupt.abort();

    if args.bundle && report.succeeded() {
        let archive = container
            .bundle_interactor()
            .bundle(Some(report.output_dir.as_path()))
            .await
            .context("Failed to bundle output directory")?;
        print_bundle_result(archive.as_deref(), args.json);
    }

    info!("Process operation finished with status {}", report.status);
    Ok(report.succeeded())
}

/// Execute the bundle command; `Ok(false)` when there was nothing to bundle
pub async fn bundle(container: &DefaultAppContainer, args: BundleArgs) -> Result<bool> {
    info!("Starting bundle operation");
    info!("Directory: {}", args.dir.display());

    let archive = container
        .bundle_interactor()
        .bundle(Some(args.dir.as_path()))
        .await
        .context("Failed to bundle output directory")?;

    print_bundle_result(archive.as_deref(), args.json);
    Ok(archive.is_some())
}

fn print_bundle_result(archive: Option<&std::path::Path>, json: bool) {
    if json {
        let event = serde_json::json!({
            "event": "bundle",
            "archive": archive,
            "timestamp": chrono::Utc::now().to_rfc3339()
        });
        println!("{}", event);
        return;
    }

    match archive {
        Some(path) => println!("Archive: {}", path.display()),
        None => println!("Nothing to bundle"),
    }
}

/// Human-readable progress for interactive use
pub struct ConsoleObserver;

impl ConsoleObserver {
    fn bar(fraction: f64) -> String {
        let filled = ((fraction.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
        "█".repeat(filled) + &"░".repeat(BAR_WIDTH - filled)
    }
}

impl JobObserver for ConsoleObserver {
    fn on_progress(&self, update: &ProgressUpdate) {
        println!(
            "[{}] {:>5.1}% {}",
            Self::bar(update.fraction),
            update.fraction * 100.0,
            update.message
        );
    }

    fn on_log(&self, line: &str) {
        println!("{}", line);
    }

    fn on_finish(&self, report: &JobReport) {
        match report.status {
            JobStatus::Complete => {
                println!("Processing complete!");
                println!("Output directory: {}", report.output_dir.display());
                for file in &report.files {
                    println!("  {}", file.display());
                }
            }
            _ => println!("{}", report.message),
        }
        let _ = std::io::stdout().flush();
    }
}

/// One JSON object per line for machine consumers
pub struct JsonObserver;

impl JobObserver for JsonObserver {
    fn on_progress(&self, update: &ProgressUpdate) {
        let event = serde_json::json!({
            "event": "progress",
            "fraction": update.fraction,
            "message": update.message,
            "timestamp": chrono::Utc::now().to_rfc3339()
        });
        println!("{}", event);
    }

    fn on_log(&self, line: &str) {
        let event = serde_json::json!({
            "event": "log",
            "line": line,
            "timestamp": chrono::Utc::now().to_rfc3339()
        });
        println!("{}", event);
    }

    fn on_finish(&self, report: &JobReport) {
        let event = serde_json::json!({
            "event": "finish",
            "report": report,
            "timestamp": chrono::Utc::now().to_rfc3339()
        });
        println!("{}", event);
    }
}
