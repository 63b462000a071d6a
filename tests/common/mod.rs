#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tempfile::TempDir;
use tokio::sync::Notify;

use clipforge::adapters::{AppConfig, FsLocalAdapter};
use clipforge::app::container::DefaultAppContainer;
use clipforge::ports::*;
use clipforge::*;

/// Collaborator returning canned results
pub struct MockCollaborator {
    pub transcript: Result<Transcript, DomainError>,
    pub clips: Result<Vec<Clip>, DomainError>,
    /// When set, `transcribe` waits for one notification before answering
    pub gate: Option<Arc<Notify>>,
    pub bounds: Mutex<Vec<(f64, f64)>>,
}

impl MockCollaborator {
    pub fn returning(clips: Vec<Clip>) -> Self {
        Self {
            transcript: Ok(Transcript::new(vec![
                Segment::new("first words", 0.0, 2.0),
                Segment::new("more words", 2.0, 4.0),
            ])),
            clips: Ok(clips),
            gate: None,
            bounds: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_transcription(message: &str) -> Self {
        Self {
            transcript: Err(DomainError::TranscriptionFailed(message.to_string())),
            ..Self::returning(Vec::new())
        }
    }

    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }
}

#[async_trait]
impl MediaCollaboratorPort for MockCollaborator {
    async fn transcribe(&self, _path: &Path) -> Result<Transcript, DomainError> {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.transcript.clone()
    }

    async fn find_clips(
        &self,
        _transcript: &Transcript,
        min_duration: f64,
        max_duration: f64,
    ) -> Result<Vec<Clip>, DomainError> {
        self.bounds.lock().unwrap().push((min_duration, max_duration));
        self.clips.clone()
    }
}

type FailWhen = Box<dyn Fn(&ToolInvocation) -> bool + Send + Sync>;

/// Media tool that writes marker files instead of running ffmpeg
pub struct MockTool {
    pub invocations: Mutex<Vec<ToolInvocation>>,
    fail_when: FailWhen,
}

impl MockTool {
    pub fn succeeding() -> Self {
        Self::failing_when(|_| false)
    }

    pub fn failing_when<F>(fail_when: F) -> Self
    where
        F: Fn(&ToolInvocation) -> bool + Send + Sync + 'static,
    {
        Self {
            invocations: Mutex::new(Vec::new()),
            fail_when: Box::new(fail_when),
        }
    }

    pub fn calls(&self) -> Vec<ToolInvocation> {
        self.invocations.lock().unwrap().clone()
    }

    pub fn calls_of(&self, kind: InvocationKind) -> Vec<ToolInvocation> {
        self.calls().into_iter().filter(|i| i.kind == kind).collect()
    }
}

#[async_trait]
impl MediaToolPort for MockTool {
    async fn run(&self, invocation: &ToolInvocation) -> Result<(), DomainError> {
        self.invocations.lock().unwrap().push(invocation.clone());

        if (self.fail_when)(invocation) {
            // Leave a partial output behind like a crashed encoder would
            std::fs::write(&invocation.output_path, b"partial").unwrap();
            return Err(DomainError::ToolFailed(format!(
                "{:?} failed for {}",
                invocation.kind,
                invocation.output_path.display()
            )));
        }

        let content: &[u8] = match invocation.kind {
            InvocationKind::StreamCopy => b"copied clip",
            InvocationKind::Reencode => b"reencoded clip",
            InvocationKind::BurnSubtitles => b"subtitled clip",
        };
        std::fs::write(&invocation.output_path, content).unwrap();
        Ok(())
    }
}

/// Workspace with a fake source video and a container wired to mocks
pub struct Harness {
    pub dir: TempDir,
    pub video: PathBuf,
    pub output_root: PathBuf,
    pub container: DefaultAppContainer,
}

pub fn harness(collaborator: Arc<MockCollaborator>, tool: Arc<MockTool>) -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let video = dir.path().join("talk.mp4");
    std::fs::write(&video, b"not really a video").unwrap();
    let output_root = dir.path().join("out");

    let mut config = AppConfig::default();
    config.paths.output_root = output_root.clone();

    let container = DefaultAppContainer::with_ports(
        &config,
        collaborator as Arc<dyn MediaCollaboratorPort>,
        tool as Arc<dyn MediaToolPort>,
        Arc::new(FsLocalAdapter::new()) as Arc<dyn FsPort>,
    );

    Harness {
        dir,
        video,
        output_root,
        container,
    }
}

/// Clip with a score and one subtitle segment inside its range
pub fn scored_clip(start: f64, score: f64) -> Clip {
    Clip::new(start, start + 30.0)
        .unwrap()
        .with_score(score)
        .with_transcript(Transcript::new(vec![Segment::new(
            format!("line at {}", start),
            start + 1.0,
            start + 4.0,
        )]))
}

/// File names directly inside `dir`, sorted
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// `-ss` value of an extraction invocation
pub fn seek_of(invocation: &ToolInvocation) -> String {
    let at = invocation.args.iter().position(|a| a == "-ss").unwrap();
    invocation.args[at + 1].clone()
}
