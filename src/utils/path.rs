//! Path utilities for output naming and ffmpeg filter arguments

use std::path::{Path, PathBuf};

/// `dir/clip_001.mp4` + (`_sub`, `mp4`) -> `dir/clip_001_sub.mp4`
pub fn sibling_with_suffix(path: &Path, suffix: &str, extension: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!("{}{}.{}", stem, suffix, extension))
}

/// `<dir>.zip` next to `dir`
pub fn archive_path_for(dir: &Path) -> PathBuf {
    let mut name = dir
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".zip");
    dir.with_file_name(name)
}

/// Quote a path for use inside an ffmpeg filter graph option value.
///
/// Backslashes, colons and single quotes are escaped so the filter parser
/// reads the path as one literal.
pub fn escape_filter_path(path: &Path) -> String {
    let raw = path.to_string_lossy();
    let mut escaped = String::with_capacity(raw.len() + 8);
    for ch in raw.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            ':' => escaped.push_str("\\:"),
            '\'' => escaped.push_str("\\'"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
