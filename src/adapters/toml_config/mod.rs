// TOML config adapter - Typed configuration loaded from TOML files and the environment

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::rules::MAX_REQUESTABLE_CLIPS;
use crate::error::{ClipforgeError, ClipforgeResult};

/// Config files checked when no explicit path is given, first match wins
pub const DEFAULT_CONFIG_PATHS: &[&str] = &["clipforge.toml", "config/clipforge.toml"];

/// Root configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub paths: PathsConfig,
    pub ffmpeg: FfmpegConfig,
    pub collaborator: CollaboratorConfig,
    pub jobs: JobsConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Parent of every per-job output directory
    pub output_root: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            output_root: PathBuf::from("output/clips"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FfmpegConfig {
    pub binary: String,
    /// Per-invocation limit; unset means no limit
    pub timeout_secs: Option<u64>,
    pub preset: String,
    pub crf: u8,
    pub audio_codec: String,
    pub audio_bitrate: String,
    pub subtitle_font_size: u32,
    pub subtitle_outline: u32,
}

impl Default for FfmpegConfig {
    fn default() -> Self {
        Self {
            binary: "ffmpeg".to_string(),
            timeout_secs: None,
            preset: "medium".to_string(),
            crf: 23,
            audio_codec: "aac".to_string(),
            audio_bitrate: "128k".to_string(),
            subtitle_font_size: 24,
            subtitle_outline: 2,
        }
    }
}

impl FfmpegConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CollaboratorConfig {
    pub transcribe_command: Vec<String>,
    pub find_clips_command: Vec<String>,
}

impl Default for CollaboratorConfig {
    fn default() -> Self {
        Self {
            transcribe_command: vec!["clipforge-transcribe".to_string()],
            find_clips_command: vec!["clipforge-find-clips".to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JobsConfig {
    pub max_clip_count: usize,
    pub default_clip_count: usize,
    pub add_subtitles: bool,
    /// Timestamped log lines the monitor keeps for display
    pub log_history: usize,
}

impl Default for JobsConfig {
    fn default() -> Self {
        Self {
            max_clip_count: MAX_REQUESTABLE_CLIPS,
            default_clip_count: 3,
            add_subtitles: true,
            log_history: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml_str(content: &str, origin: &str) -> ClipforgeResult<Self> {
        toml::from_str(content).map_err(|source| ClipforgeError::ConfigParse {
            path: origin.to_string(),
            source,
        })
    }

    /// Load from `explicit`, else from the first default path that exists,
    /// else defaults. An explicit path that does not exist is an error.
    pub fn load(explicit: Option<&Path>) -> ClipforgeResult<Self> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => DEFAULT_CONFIG_PATHS
                .iter()
                .map(PathBuf::from)
                .find(|p| p.is_file()),
        };

        match path {
            Some(path) => {
                info!("Loading configuration from: {}", path.display());
                let content = std::fs::read_to_string(&path)?;
                Self::from_toml_str(&content, &path.display().to_string())
            }
            None => {
                debug!("No configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Apply `CLIPFORGE_*` overrides read through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> ClipforgeResult<usize>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut applied = 0;

        if let Some(value) = lookup("CLIPFORGE_OUTPUT_ROOT") {
            self.paths.output_root = PathBuf::from(value);
            applied += 1;
        }
        if let Some(value) = lookup("CLIPFORGE_FFMPEG") {
            self.ffmpeg.binary = value;
            applied += 1;
        }
        if let Some(value) = lookup("CLIPFORGE_FFMPEG_TIMEOUT_SECS") {
            let secs = value.trim().parse::<u64>().map_err(|_| ClipforgeError::InvalidEnv {
                var: "CLIPFORGE_FFMPEG_TIMEOUT_SECS".to_string(),
                value: value.clone(),
            })?;
            self.ffmpeg.timeout_secs = (secs > 0).then_some(secs);
            applied += 1;
        }
        if let Some(value) = lookup("CLIPFORGE_LOG_LEVEL") {
            self.logging.level = value;
            applied += 1;
        }
        if let Some(value) = lookup("CLIPFORGE_LOG_JSON") {
            self.logging.json = parse_flag(&value).ok_or_else(|| ClipforgeError::InvalidEnv {
                var: "CLIPFORGE_LOG_JSON".to_string(),
                value: value.clone(),
            })?;
            applied += 1;
        }

        Ok(applied)
    }

    /// Reject values the pipeline cannot work with
    pub fn validate(&self) -> ClipforgeResult<()> {
        let invalid = |message: String| Err(ClipforgeError::Config { message });

        if self.ffmpeg.binary.trim().is_empty() {
            return invalid("ffmpeg.binary cannot be empty".to_string());
        }
        if self.ffmpeg.crf > 51 {
            return invalid(format!("ffmpeg.crf cannot exceed 51, got {}", self.ffmpeg.crf));
        }
        if !(1..=200).contains(&self.ffmpeg.subtitle_font_size) {
            return invalid(format!(
                "ffmpeg.subtitle_font_size must be between 1 and 200, got {}",
                self.ffmpeg.subtitle_font_size
            ));
        }
        if self.ffmpeg.subtitle_outline > 20 {
            return invalid(format!(
                "ffmpeg.subtitle_outline cannot exceed 20, got {}",
                self.ffmpeg.subtitle_outline
            ));
        }
        if self.ffmpeg.timeout_secs == Some(0) {
            return invalid("ffmpeg.timeout_secs must be positive when set".to_string());
        }
        if !(1..=MAX_REQUESTABLE_CLIPS).contains(&self.jobs.max_clip_count) {
            return invalid(format!(
                "jobs.max_clip_count must be between 1 and {}, got {}",
                MAX_REQUESTABLE_CLIPS, self.jobs.max_clip_count
            ));
        }
        if self.jobs.default_clip_count == 0
            || self.jobs.default_clip_count > self.jobs.max_clip_count
        {
            return invalid(format!(
                "jobs.default_clip_count must be between 1 and {}, got {}",
                self.jobs.max_clip_count, self.jobs.default_clip_count
            ));
        }
        if self.collaborator.transcribe_command.is_empty()
            || self.collaborator.find_clips_command.is_empty()
        {
            return invalid("collaborator commands cannot be empty".to_string());
        }
        if self.paths.output_root.as_os_str().is_empty() {
            return invalid("paths.output_root cannot be empty".to_string());
        }

        Ok(())
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
