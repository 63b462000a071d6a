//! Integration tests for the ffmpeg-backed extraction and burn-in engines

mod common;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tempfile::TempDir;

use clipforge::adapters::{FFmpegAdapter, FsLocalAdapter};
use clipforge::engine::{
    ClipExtractor, EncodingSettings, ExtractionMode, SubtitleBurner, SubtitleStyle,
};
use clipforge::ports::*;
use clipforge::DomainError;

use common::MockTool;

// Test utilities

fn extractor(tool: Arc<MockTool>) -> ClipExtractor {
    ClipExtractor::new(
        tool as Arc<dyn MediaToolPort>,
        Arc::new(FsLocalAdapter::new()),
        EncodingSettings::default(),
    )
}

/// Local file system whose deletes always fail
struct UndeletableFs(FsLocalAdapter);

#[async_trait]
impl FsPort for UndeletableFs {
    async fn dir_exists(&self, dir_path: &Path) -> Result<bool, DomainError> {
        self.0.dir_exists(dir_path).await
    }

    async fn create_directory(&self, dir_path: &Path) -> Result<(), DomainError> {
        self.0.create_directory(dir_path).await
    }

    async fn delete_file(&self, file_path: &Path) -> Result<(), DomainError> {
        Err(DomainError::FsFail(format!(
            "Permission denied: {}",
            file_path.display()
        )))
    }

    async fn move_file(&self, from: &Path, to: &Path) -> Result<(), DomainError> {
        self.0.move_file(from, to).await
    }

    async fn resolve_path(&self, file_path: &Path) -> Result<PathBuf, DomainError> {
        self.0.resolve_path(file_path).await
    }

    async fn list_files(&self, dir_path: &Path) -> Result<Vec<PathBuf>, DomainError> {
        self.0.list_files(dir_path).await
    }
}

fn undeletable_extractor(tool: Arc<MockTool>) -> ClipExtractor {
    ClipExtractor::new(
        tool as Arc<dyn MediaToolPort>,
        Arc::new(UndeletableFs(FsLocalAdapter::new())),
        EncodingSettings::default(),
    )
}

fn workspace() -> (TempDir, std::path::PathBuf, std::path::PathBuf) {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("source.mp4");
    std::fs::write(&source, b"fake video data").unwrap();
    let dest = dir.path().join("clip_001.mp4");
    (dir, source, dest)
}

// Extraction

#[tokio::test]
async fn test_stream_copy_success_skips_reencode() {
    let (_dir, source, dest) = workspace();
    let tool = Arc::new(MockTool::succeeding());

    let mode = extractor(tool.clone())
        .extract(&source, 12.0, 42.0, &dest)
        .await
        .unwrap();

    assert_eq!(mode, ExtractionMode::StreamCopy);
    assert_eq!(tool.calls().len(), 1);
    assert_eq!(std::fs::read(&dest).unwrap(), b"copied clip");
}

#[tokio::test]
async fn test_copy_failure_retries_exactly_once_with_reencode() {
    let (_dir, source, dest) = workspace();
    let tool = Arc::new(MockTool::failing_when(|inv| {
        inv.kind == InvocationKind::StreamCopy
    }));

    let mode = extractor(tool.clone())
        .extract(&source, 12.0, 42.0, &dest)
        .await
        .unwrap();

    assert_eq!(mode, ExtractionMode::Reencode);
    let kinds: Vec<InvocationKind> = tool.calls().iter().map(|i| i.kind).collect();
    assert_eq!(kinds, vec![InvocationKind::StreamCopy, InvocationKind::Reencode]);
    assert_eq!(std::fs::read(&dest).unwrap(), b"reencoded clip");

    let reencode = &tool.calls()[1];
    for expected in ["libx264", "medium", "23", "aac", "128k"] {
        assert!(reencode.args.iter().any(|a| a == expected), "missing {}", expected);
    }
}

#[tokio::test]
async fn test_both_attempts_failing_reports_both_causes() {
    let (_dir, source, dest) = workspace();
    let tool = Arc::new(MockTool::failing_when(|_| true));

    let err = extractor(tool.clone())
        .extract(&source, 12.0, 42.0, &dest)
        .await
        .unwrap_err();

    match err {
        DomainError::ExtractionFailed {
            output,
            copy_error,
            reencode_error,
        } => {
            assert!(output.ends_with("clip_001.mp4"));
            assert!(copy_error.contains("StreamCopy"));
            assert!(reencode_error.contains("Reencode"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(tool.calls().len(), 2);
    assert!(!dest.exists(), "partial output must be removed");
}

#[tokio::test]
async fn test_invalid_range_never_invokes_tool() {
    let (_dir, source, dest) = workspace();
    let tool = Arc::new(MockTool::succeeding());

    let err = extractor(tool.clone())
        .extract(&source, 42.0, 12.0, &dest)
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::BadArgs(_)));
    assert!(tool.calls().is_empty());
}

#[tokio::test]
async fn test_cleanup_failure_still_falls_back_to_reencode() {
    let (_dir, source, dest) = workspace();
    let tool = Arc::new(MockTool::failing_when(|inv| {
        inv.kind == InvocationKind::StreamCopy
    }));

    let mode = undeletable_extractor(tool.clone())
        .extract(&source, 12.0, 42.0, &dest)
        .await
        .unwrap();

    assert_eq!(mode, ExtractionMode::Reencode);
    assert_eq!(tool.calls().len(), 2);
    assert_eq!(std::fs::read(&dest).unwrap(), b"reencoded clip");
}

#[tokio::test]
async fn test_cleanup_failure_keeps_both_extraction_causes() {
    let (_dir, source, dest) = workspace();
    let tool = Arc::new(MockTool::failing_when(|_| true));

    let err = undeletable_extractor(tool.clone())
        .extract(&source, 12.0, 42.0, &dest)
        .await
        .unwrap_err();

    match err {
        DomainError::ExtractionFailed {
            copy_error,
            reencode_error,
            ..
        } => {
            assert!(copy_error.contains("StreamCopy"));
            assert!(reencode_error.contains("Reencode"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(tool.calls().len(), 2);
}

// Burn-in

#[test]
fn test_burn_invocation_arguments() {
    let burner = SubtitleBurner::new(Arc::new(MockTool::succeeding()), SubtitleStyle::default());
    let invocation = burner.invocation(
        Path::new("/out/clip_001.mp4"),
        Path::new("/out/clip_001.srt"),
        Path::new("/out/clip_001_sub.mp4"),
    );

    assert_eq!(invocation.kind, InvocationKind::BurnSubtitles);
    assert_eq!(
        invocation.args,
        vec![
            "-y",
            "-i",
            "/out/clip_001.mp4",
            "-vf",
            "subtitles='/out/clip_001.srt':force_style='FontSize=24,Outline=2'",
            "-c:a",
            "copy",
            "/out/clip_001_sub.mp4",
        ]
    );
}

#[tokio::test]
async fn test_burn_failure_maps_to_subtitle_error() {
    let tool = Arc::new(MockTool::failing_when(|_| true));
    let burner = SubtitleBurner::new(tool, SubtitleStyle::default());
    let dir = TempDir::new().unwrap();

    let err = burner
        .burn(
            &dir.path().join("clip.mp4"),
            &dir.path().join("clip.srt"),
            &dir.path().join("clip_sub.mp4"),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::SubtitleFailed(_)));
}

// Real subprocess execution

#[cfg(unix)]
#[tokio::test]
async fn test_ffmpeg_adapter_reports_exit_status_and_stderr() {
    let adapter = FFmpegAdapter::new("sh");
    let invocation = ToolInvocation {
        kind: InvocationKind::StreamCopy,
        args: vec![
            "-c".to_string(),
            "echo 'Invalid data found when processing input' >&2; exit 1".to_string(),
        ],
        output_path: "clip_001.mp4".into(),
    };

    let err = adapter.run(&invocation).await.unwrap_err();
    match err {
        DomainError::ToolFailed(text) => assert!(text.contains("Invalid data found")),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[cfg(unix)]
#[tokio::test]
async fn test_ffmpeg_adapter_timeout_kills_process() {
    let adapter =
        FFmpegAdapter::new("sh").with_timeout(Some(std::time::Duration::from_millis(200)));
    let invocation = ToolInvocation {
        kind: InvocationKind::Reencode,
        args: vec!["-c".to_string(), "sleep 10".to_string()],
        output_path: "clip_001.mp4".into(),
    };

    let started = std::time::Instant::now();
    let err = adapter.run(&invocation).await.unwrap_err();
    assert!(matches!(err, DomainError::ToolFailed(ref t) if t.contains("timed out")));
    assert!(started.elapsed() < std::time::Duration::from_secs(5));
}

#[cfg(unix)]
#[tokio::test]
async fn test_ffmpeg_adapter_success() {
    let adapter = FFmpegAdapter::new("sh");
    let invocation = ToolInvocation {
        kind: InvocationKind::BurnSubtitles,
        args: vec!["-c".to_string(), "exit 0".to_string()],
        output_path: "clip_001_sub.mp4".into(),
    };

    assert!(adapter.run(&invocation).await.is_ok());
}
