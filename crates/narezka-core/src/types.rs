use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    pub text: String,
    pub segments: Vec<TranscriptSpan>,
    pub language: String,
}

/// One timestamped span of recognized speech.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptSpan {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

/// A contiguous time range of the source video covering one topic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TopicSegment {
    pub start: f64,
    pub end: f64,
}
