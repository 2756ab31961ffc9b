use std::path::PathBuf;

use tokio::fs;
use tracing::{info, warn};

use crate::{
    assembler::{self, AssemblyReport},
    builder, catalog,
    error::Result,
    media::MediaEngine,
    segmenter,
    suggest::SuggestionClient,
    transcribe::SpeechToText,
    translate::Translator,
    types::Transcript,
    workdir,
};

/// Everything the driver needs to know about one run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub video_path: PathBuf,
    pub workdir: PathBuf,
    pub effects_file: PathBuf,
    pub transitions_file: PathBuf,
    pub target_language: String,
}

/// Terminal state of a run. The early exits are clean outcomes, not errors:
/// the run finished, there was just nothing to cut.
#[derive(Debug)]
pub enum PipelineOutcome {
    Completed(AssemblyReport),
    NoTranscript,
    NoSegments,
    NoArtifacts,
}

/// Sequences extraction, transcription, translation, segmentation, catalog
/// loading, building and assembly. Strictly linear; each stage only runs
/// when the previous one returned something usable.
pub struct Pipeline {
    engine: Box<dyn MediaEngine>,
    speech: Box<dyn SpeechToText>,
    translator: Box<dyn Translator>,
    client: SuggestionClient,
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(
        engine: Box<dyn MediaEngine>,
        speech: Box<dyn SpeechToText>,
        translator: Box<dyn Translator>,
        client: SuggestionClient,
        config: PipelineConfig,
    ) -> Self {
        Self {
            engine,
            speech,
            translator,
            client,
            config,
        }
    }

    pub async fn run(&mut self) -> Result<PipelineOutcome> {
        fs::create_dir_all(&self.config.workdir).await?;

        let audio = workdir::audio_path(&self.config.workdir);
        if let Err(e) = self
            .engine
            .extract_audio(&self.config.video_path, &audio)
            .await
        {
            warn!("audio extraction failed: {e}");
            return Ok(PipelineOutcome::NoTranscript);
        }
        info!("audio extracted to {}", audio.display());

        let transcript_path = workdir::transcript_path(&self.config.workdir);
        let transcript = match self.speech.transcribe(&audio, &transcript_path).await {
            Ok(transcript) => transcript,
            Err(e) => {
                warn!("transcription failed: {e}");
                return Ok(PipelineOutcome::NoTranscript);
            }
        };
        if transcript.text.trim().is_empty() {
            warn!("no transcript available, skipping video processing");
            return Ok(PipelineOutcome::NoTranscript);
        }
        info!("transcription completed, detected language: {}", transcript.language);

        let translated = self
            .translator
            .translate(&transcript.text, &self.config.target_language)
            .await;

        let Some(topics_text) = self.request_topics(&translated, &transcript).await else {
            warn!("no topic listing available, skipping video processing");
            return Ok(PipelineOutcome::NoSegments);
        };

        let segments = segmenter::parse_topics(&topics_text);
        if segments.is_empty() {
            warn!("no valid topics found, skipping video processing");
            return Ok(PipelineOutcome::NoSegments);
        }
        info!("parsed {} topic segments", segments.len());

        let effects = catalog::load_catalog(&self.config.effects_file).await;
        if effects.is_empty() {
            warn!("no effects loaded, proceeding without effects");
        }
        let transitions = catalog::load_catalog(&self.config.transitions_file).await;
        if transitions.is_empty() {
            warn!("no transitions loaded, proceeding without transitions");
        }

        let artifacts = builder::build_segments(
            self.engine.as_ref(),
            &mut self.client,
            &self.config.video_path,
            &segments,
            &effects,
            &self.config.workdir,
        )
        .await;
        if artifacts.is_empty() {
            warn!("no segment clips were built, skipping assembly");
            return Ok(PipelineOutcome::NoArtifacts);
        }

        let report = assembler::assemble(
            self.engine.as_ref(),
            &mut self.client,
            &artifacts,
            &transitions,
            &self.config.workdir,
        )
        .await?;
        info!("final video saved to {}", report.output.display());

        Ok(PipelineOutcome::Completed(report))
    }

    /// Ask for a topic listing over the translated transcript. The last
    /// transcript span doubles as a total-duration hint.
    async fn request_topics(
        &mut self,
        transcript_text: &str,
        transcript: &Transcript,
    ) -> Option<String> {
        let duration_seconds = transcript.segments.last().map(|s| s.end).unwrap_or(0.0);

        let prompt = format!(
            "You are given a transcription of a video of about {duration_seconds:.0} seconds. \
             Please divide the transcription into distinct topics or segments. \
             For each topic, provide the approximate start and end times in seconds. \
             Format the response as follows:\n\n\
             - Topic 1: Start Time - End Time\n\
             - Topic 2: Start Time - End Time\n\
             \nFor example:\n\
             - Introduction: 0.0 - 30.5\n\
             - Main Discussion: 30.5 - 120.0\n\
             - Conclusion: 120.0 - 150.0\n\n\
             Transcript follows:\n\n{transcript_text}"
        );

        self.client.ask(&prompt).await
    }
}
