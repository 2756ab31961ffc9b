//! Narezka Core Library
//!
//! Core functionality for cutting a video into topic segments with Whisper
//! and an AI provider, applying suggested effects and transitions, and
//! stitching the final cut with ffmpeg.

pub mod assembler;
pub mod builder;
pub mod catalog;
pub mod effects;
pub mod error;
pub mod media;
pub mod pipeline;
pub mod provider;
pub mod resolver;
pub mod segmenter;
pub mod suggest;
pub mod transcribe;
pub mod translate;
pub mod transitions;
pub mod types;
pub mod workdir;

// Re-export commonly used items at crate root
pub use assembler::{AssemblyReport, TransitionOutcome, assemble};
pub use builder::{EffectOutcome, SegmentArtifact, build_segments};
pub use catalog::{Catalog, CatalogEntry, load_catalog};
pub use effects::EffectOp;
pub use error::{NarezkaError, Result};
pub use media::{FfmpegEngine, MediaEngine};
pub use pipeline::{Pipeline, PipelineConfig, PipelineOutcome};
pub use provider::{Provider, ProviderConfig};
pub use resolver::{Resolution, SuggestionKind, resolve};
pub use segmenter::parse_topics;
pub use suggest::{ApiCompleter, ChatMessage, Completer, SuggestionClient};
pub use transcribe::{SpeechToText, WhisperCli, load_transcript};
pub use translate::{ApiTranslator, Translator};
pub use transitions::TransitionOp;
pub use types::{TopicSegment, Transcript, TranscriptSpan};
pub use workdir::{get_root_workdir, get_workdir};
