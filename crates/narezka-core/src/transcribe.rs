use std::path::Path;

use async_trait::async_trait;
use tokio::{fs, process::Command};

use crate::{
    error::{NarezkaError, Result},
    types::Transcript,
};

/// Speech-to-text collaborator. The driver treats both failure and empty
/// text as "no transcript".
#[async_trait]
pub trait SpeechToText: Send + Sync {
    async fn transcribe(&self, audio: &Path, transcript_path: &Path) -> Result<Transcript>;
}

/// Transcribe audio by invoking the Whisper CLI with JSON output.
pub struct WhisperCli {
    pub model: String,
}

impl Default for WhisperCli {
    fn default() -> Self {
        Self {
            model: "base".to_string(),
        }
    }
}

#[async_trait]
impl SpeechToText for WhisperCli {
    async fn transcribe(&self, audio: &Path, transcript_path: &Path) -> Result<Transcript> {
        let output_dir = transcript_path.parent().unwrap_or(Path::new("."));

        let output = Command::new("whisper")
            .arg(audio)
            .arg("--model")
            .arg(&self.model)
            .arg("--output_format")
            .arg("json")
            .arg("--output_dir")
            .arg(output_dir)
            .output()
            .await?;

        if !output.status.success() {
            return Err(NarezkaError::TranscriptionFailed {
                audio_path: audio.to_path_buf(),
                reason: String::from_utf8_lossy(&output.stderr).to_string(),
            });
        }

        // Whisper names output based on input filename
        let stem = audio
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "audio".to_string());
        let whisper_output = output_dir.join(format!("{stem}.json"));

        // Rename to our expected path if different
        if whisper_output != transcript_path {
            fs::rename(&whisper_output, transcript_path).await?;
        }

        let json_content = fs::read_to_string(transcript_path).await?;
        let transcript: Transcript = serde_json::from_str(&json_content)?;

        Ok(transcript)
    }
}

/// Load a transcript persisted by an earlier run
pub async fn load_transcript(path: &Path) -> Result<Transcript> {
    let json_content = fs::read_to_string(path).await?;
    let transcript: Transcript = serde_json::from_str(&json_content)?;
    Ok(transcript)
}
