// Application layer - Use case interactors

pub mod bundle_interactor;
pub mod container;
pub mod job_monitor;
pub mod job_service;
pub mod process_interactor;

// Re-export interactors
pub use bundle_interactor::BundleInteractor;
pub use job_monitor::{JobMonitor, JobObserver, JobReport, NoOpObserver};
pub use job_service::{JobHandle, JobService};
pub use process_interactor::ProcessInteractor;
