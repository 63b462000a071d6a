//! Core clipping engine module
//!
//! Builds ffmpeg invocations for cutting and subtitling clips and runs them
//! through the [`MediaToolPort`](crate::ports::MediaToolPort).

use serde::{Deserialize, Serialize};

use crate::adapters::toml_config::FfmpegConfig;

pub mod burn;
pub mod copy;
pub mod extractor;
pub mod progress;
pub mod reencode;

pub use burn::SubtitleBurner;
pub use extractor::ClipExtractor;
pub use progress::{CancelToken, ProgressReporter};

/// Re-encode settings used by the fallback path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodingSettings {
    pub video_codec: String,
    pub preset: String,
    /// Constant rate factor (0-51, lower is higher quality)
    pub crf: u8,
    pub audio_codec: String,
    pub audio_bitrate: String,
}

impl Default for EncodingSettings {
    fn default() -> Self {
        Self {
            video_codec: "libx264".to_string(),
            preset: "medium".to_string(),
            crf: 23,
            audio_codec: "aac".to_string(),
            audio_bitrate: "128k".to_string(),
        }
    }
}

impl From<&FfmpegConfig> for EncodingSettings {
    fn from(config: &FfmpegConfig) -> Self {
        Self {
            preset: config.preset.clone(),
            crf: config.crf.min(51),
            audio_codec: config.audio_codec.clone(),
            audio_bitrate: config.audio_bitrate.clone(),
            ..Self::default()
        }
    }
}

/// Burned-in subtitle look
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtitleStyle {
    pub font_size: u32,
    pub outline: u32,
}

impl Default for SubtitleStyle {
    fn default() -> Self {
        Self {
            font_size: 24,
            outline: 2,
        }
    }
}

impl From<&FfmpegConfig> for SubtitleStyle {
    fn from(config: &FfmpegConfig) -> Self {
        Self {
            font_size: config.subtitle_font_size,
            outline: config.subtitle_outline,
        }
    }
}

impl SubtitleStyle {
    /// Value of the `force_style` filter option
    pub fn force_style(&self) -> String {
        format!("FontSize={},Outline={}", self.font_size, self.outline)
    }
}

/// How a clip ended up being produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtractionMode {
    /// Lossless cut
    StreamCopy,
    /// Fallback after the stream copy failed
    Reencode,
}
