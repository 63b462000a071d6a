// Adapters - External system implementations

pub mod collaborator_cmd;
pub mod exec_ffmpeg;
pub mod fs_local;
pub mod toml_config;
pub mod tracing_log;

// Re-export adapters
pub use collaborator_cmd::CommandCollaboratorAdapter;
pub use exec_ffmpeg::FFmpegAdapter;
pub use fs_local::FsLocalAdapter;
pub use toml_config::AppConfig;
pub use tracing_log::init_tracing;
