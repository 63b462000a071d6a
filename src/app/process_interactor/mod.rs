// Process interactor - Orchestrates the transcribe / find / extract / subtitle pipeline

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::*;
use crate::engine::{
    CancelToken, ClipExtractor, EncodingSettings, ProgressReporter, SubtitleBurner, SubtitleStyle,
};
use crate::ports::*;
use crate::subtitles::SubtitleWriter;
use crate::utils::path::sibling_with_suffix;
use crate::utils::time::format_seconds;

/// Interactor for the clip generation use case
pub struct ProcessInteractor {
    collaborator_port: Arc<dyn MediaCollaboratorPort>,
    fs_port: Arc<dyn FsPort>,
    extractor: ClipExtractor,
    burner: SubtitleBurner,
    subtitle_writer: SubtitleWriter,
}

impl ProcessInteractor {
    /// Create new process interactor with injected ports
    pub fn new(
        collaborator_port: Arc<dyn MediaCollaboratorPort>,
        tool_port: Arc<dyn MediaToolPort>,
        fs_port: Arc<dyn FsPort>,
        encoding: EncodingSettings,
        style: SubtitleStyle,
    ) -> Self {
        Self {
            collaborator_port,
            extractor: ClipExtractor::new(Arc::clone(&tool_port), Arc::clone(&fs_port), encoding),
            burner: SubtitleBurner::new(tool_port, style),
            fs_port,
            subtitle_writer: SubtitleWriter::new(),
        }
    }

    /// Run the whole pipeline for one job, returning the produced clips in rank order
    pub async fn run(
        &self,
        request: &JobRequest,
        output_dir: &Path,
        reporter: &ProgressReporter,
        cancel: &CancelToken,
    ) -> Result<Vec<PathBuf>, DomainError> {
        let video_path = request.video_path.as_deref().ok_or(DomainError::NoInput)?;
        let video_path = self.fs_port.resolve_path(video_path).await?;
        let output_dir = self.fs_port.resolve_path(output_dir).await?;
        self.fs_port.create_directory(&output_dir).await?;
        reporter.progress(ProgressSchedule::STARTED, "Starting...");

        // Step 1: transcribe
        reporter.progress(ProgressSchedule::TRANSCRIBING, "Transcribing video...");
        reporter.log("Starting transcription process...");
        let transcript = self.collaborator_port.transcribe(&video_path).await?;
        reporter.log(format!(
            "Transcription complete. Found {} segments",
            transcript.len()
        ));
        cancel.check()?;

        // Step 2: find and rank clips
        reporter.progress(ProgressSchedule::FINDING_CLIPS, "Finding best clips...");
        reporter.log(format!("Searching for {} best clips...", request.clip_count));
        let found = self
            .collaborator_port
            .find_clips(&transcript, MIN_CLIP_DURATION, MAX_CLIP_DURATION)
            .await?;
        reporter.log(format!("Found {} clips", found.len()));

        let clips: Vec<Clip> = found
            .into_iter()
            .filter(|clip| match clip.validate() {
                Ok(()) => true,
                Err(e) => {
                    reporter.warn(format!("Skipping clip: {}", e));
                    false
                }
            })
            .collect();
        let clips = ClipRanker::rank(clips, request.clip_count);
        cancel.check()?;

        // Step 3: extract, then optionally subtitle
        let total = clips.len();
        let mut output_files = Vec::with_capacity(total);
        for (index, clip) in clips.iter().enumerate() {
            cancel.check()?;
            let number = index + 1;
            reporter.progress(
                ProgressSchedule::clip_fraction(index, total),
                format!("Processing clip {}/{}", number, total),
            );
            reporter.log(format!(
                "Extracting clip {}: {} - {}",
                number,
                format_seconds(clip.start_time),
                format_seconds(clip.end_time)
            ));

            let file_name = OutputNaming::clip_file_name(index);
            let clip_path = output_dir.join(&file_name);
            self.extractor
                .extract(&video_path, clip.start_time, clip.end_time, &clip_path)
                .await?;

            if request.add_subtitles && clip.transcript.is_some() {
                reporter.log(format!("Adding subtitles to clip {}", number));
                self.add_subtitles(clip, &clip_path, number, reporter).await;
            }

            output_files.push(clip_path);
            reporter.log(format!("Clip {} saved to: {}", number, file_name));
        }

        reporter.complete_progress("Processing complete!");
        reporter.log(format!(
            "Successfully created {} clips",
            output_files.len()
        ));
        Ok(output_files)
    }

    /// Burn the clip's subtitles in place. Failures only cost the subtitles.
    async fn add_subtitles(
        &self,
        clip: &Clip,
        clip_path: &Path,
        number: usize,
        reporter: &ProgressReporter,
    ) {
        let srt_path = sibling_with_suffix(clip_path, "", "srt");
        let subtitled_path = sibling_with_suffix(clip_path, "_sub", "mp4");

        let result = self
            .burn_subtitles(clip, clip_path, &srt_path, &subtitled_path)
            .await;

        for scratch in [&srt_path, &subtitled_path] {
            if let Err(e) = self.fs_port.delete_file(scratch).await {
                reporter.warn(format!("Failed to remove {}: {}", scratch.display(), e));
            }
        }

        match result {
            Ok(true) => {}
            Ok(false) => reporter.log(format!(
                "No subtitle lines fall inside clip {}, skipping subtitles",
                number
            )),
            Err(e) => reporter.warn(format!(
                "Failed to add subtitles to clip {}: {}",
                number, e
            )),
        }
    }

    async fn burn_subtitles(
        &self,
        clip: &Clip,
        clip_path: &Path,
        srt_path: &Path,
        subtitled_path: &Path,
    ) -> Result<bool, DomainError> {
        let cues = self.subtitle_writer.write(clip, srt_path).await?;
        if cues == 0 {
            return Ok(false);
        }

        self.burner.burn(clip_path, srt_path, subtitled_path).await?;
        self.fs_port.move_file(subtitled_path, clip_path).await?;
        Ok(true)
    }
}
