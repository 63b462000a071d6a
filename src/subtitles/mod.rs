//! Subtitle generation for burned-in captions

pub mod srt;

pub use srt::SubtitleWriter;

/// One subtitle cue in clip-relative milliseconds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cue {
    pub start_ms: u64,
    pub end_ms: u64,
    pub text: String,
}
