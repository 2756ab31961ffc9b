use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NarezkaError {
    #[error("Audio extraction failed for {video_path}: {reason}")]
    AudioExtractionFailed { video_path: PathBuf, reason: String },

    #[error("Transcription failed for {audio_path}: {reason}")]
    TranscriptionFailed { audio_path: PathBuf, reason: String },

    #[error("Probe failed for {path}: {reason}")]
    ProbeFailed { path: PathBuf, reason: String },

    #[error("Cut failed for {output}: {reason}")]
    CutFailed { output: PathBuf, reason: String },

    #[error("Effect failed for {output}: {reason}")]
    EffectFailed { output: PathBuf, reason: String },

    #[error("Transition failed for {output}: {reason}")]
    TransitionFailed { output: PathBuf, reason: String },

    #[error("Concatenation failed for {output}: {reason}")]
    ConcatFailed { output: PathBuf, reason: String },

    #[error("Completion request failed: {reason}")]
    CompletionFailed { reason: String },

    #[error("No segment clips to assemble")]
    NothingToAssemble,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Missing API key: {env_var} environment variable is not set")]
    MissingApiKey { env_var: String },
}

pub type Result<T> = std::result::Result<T, NarezkaError>;
