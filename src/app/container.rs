use std::sync::Arc;

use crate::adapters::{AppConfig, CommandCollaboratorAdapter, FFmpegAdapter, FsLocalAdapter};
use crate::app::{
    bundle_interactor::BundleInteractor, job_monitor::JobMonitor, job_service::JobService,
    process_interactor::ProcessInteractor,
};
use crate::domain::errors::DomainError;
use crate::engine::{EncodingSettings, SubtitleStyle};
use crate::ports::{FsPort, MediaCollaboratorPort, MediaToolPort};

pub trait AppContainer: Send + Sync {
    fn job_service(&self) -> Arc<JobService>;
    fn bundle_interactor(&self) -> Arc<BundleInteractor>;
    fn job_monitor(&self) -> Arc<JobMonitor>;
}

pub struct DefaultAppContainer {
    job_service: Arc<JobService>,
    bundle_interactor: Arc<BundleInteractor>,
    job_monitor: Arc<JobMonitor>,
}

impl DefaultAppContainer {
    /// Wire the production adapters described by `config`
    pub fn new(config: &AppConfig) -> Result<Self, DomainError> {
        let collaborator_port = Arc::new(CommandCollaboratorAdapter::new(
            config.collaborator.transcribe_command.clone(),
            config.collaborator.find_clips_command.clone(),
        )?);
        let tool_port = Arc::new(
            FFmpegAdapter::new(config.ffmpeg.binary.clone()).with_timeout(config.ffmpeg.timeout()),
        );
        let fs_port = Arc::new(FsLocalAdapter::new());

        Ok(Self::with_ports(
            config,
            collaborator_port as Arc<dyn MediaCollaboratorPort>,
            tool_port as Arc<dyn MediaToolPort>,
            fs_port as Arc<dyn FsPort>,
        ))
    }

    /// Wire arbitrary port implementations
    pub fn with_ports(
        config: &AppConfig,
        collaborator_port: Arc<dyn MediaCollaboratorPort>,
        tool_port: Arc<dyn MediaToolPort>,
        fs_port: Arc<dyn FsPort>,
    ) -> Self {
        let process_interactor = Arc::new(ProcessInteractor::new(
            collaborator_port,
            tool_port,
            Arc::clone(&fs_port),
            EncodingSettings::from(&config.ffmpeg),
            SubtitleStyle::from(&config.ffmpeg),
        ));

        let job_service = Arc::new(JobService::new(
            process_interactor,
            config.paths.output_root.clone(),
            config.jobs.max_clip_count,
        ));

        Self {
            job_service,
            bundle_interactor: Arc::new(BundleInteractor::new(fs_port)),
            job_monitor: Arc::new(JobMonitor::new(config.jobs.log_history)),
        }
    }
}

impl AppContainer for DefaultAppContainer {
    fn job_service(&self) -> Arc<JobService> {
        Arc::clone(&self.job_service)
    }

    fn bundle_interactor(&self) -> Arc<BundleInteractor> {
        Arc::clone(&self.bundle_interactor)
    }

    fn job_monitor(&self) -> Arc<JobMonitor> {
        Arc::clone(&self.job_monitor)
    }
}
