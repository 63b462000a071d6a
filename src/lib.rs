//! clipforge library
//!
//! Background job runner that turns one long video into short clips. An
//! external collaborator transcribes the video and picks clip ranges; the
//! `ffmpeg` command-line tool cuts them (stream copy with a single re-encode
//! fallback) and optionally burns in subtitles generated from the transcript.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod engine;
pub mod error;
pub mod ports;
pub mod subtitles;
pub mod utils;

// Re-export commonly used types
pub use domain::errors::DomainError;
pub use domain::model::{
    Clip, JobId, JobRequest, JobSnapshot, JobStatus, ProgressUpdate, Segment, Transcript,
};
pub use error::{ClipforgeError, ClipforgeResult};
