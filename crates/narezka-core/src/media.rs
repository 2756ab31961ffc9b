use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::{fs, process::Command};

use crate::error::{NarezkaError, Result};

/// Media operations the pipeline delegates to an external engine.
#[async_trait]
pub trait MediaEngine: Send + Sync {
    async fn extract_audio(&self, video: &Path, audio: &Path) -> Result<()>;
    async fn duration(&self, path: &Path) -> Result<f64>;
    async fn cut(&self, video: &Path, start: f64, end: f64, output: &Path) -> Result<()>;
    async fn apply_filter(&self, input: &Path, filter: &str, output: &Path) -> Result<()>;
    async fn transition(
        &self,
        first: &Path,
        second: &Path,
        transition: &str,
        duration: f64,
        output: &Path,
    ) -> Result<()>;
    async fn concat(&self, inputs: &[PathBuf], output: &Path) -> Result<()>;
}

const VIDEO_CODEC_ARGS: &[&str] = &[
    "-c:v", "libx264", "-preset", "medium", "-crf", "23", "-pix_fmt", "yuv420p",
];
const AUDIO_CODEC_ARGS: &[&str] = &["-c:a", "aac", "-b:a", "192k"];

/// Engine shelling out to `ffmpeg` and `ffprobe`.
pub struct FfmpegEngine;

#[async_trait]
impl MediaEngine for FfmpegEngine {
    /// Extract audio from video using ffmpeg
    async fn extract_audio(&self, video: &Path, audio: &Path) -> Result<()> {
        let output = Command::new("ffmpeg")
            .arg("-y")
            .arg("-i")
            .arg(video)
            .arg("-vn")
            .arg("-acodec")
            .arg("pcm_s16le")
            .arg("-ar")
            .arg("16000")
            .arg("-ac")
            .arg("1")
            .arg(audio)
            .output()
            .await?;

        if !output.status.success() {
            return Err(NarezkaError::AudioExtractionFailed {
                video_path: video.to_path_buf(),
                reason: String::from_utf8_lossy(&output.stderr).to_string(),
            });
        }

        Ok(())
    }

    async fn duration(&self, path: &Path) -> Result<f64> {
        let output = Command::new("ffprobe")
            .args([
                "-v",
                "error",
                "-show_entries",
                "format=duration",
                "-of",
                "default=noprint_wrappers=1:nokey=1",
            ])
            .arg(path)
            .output()
            .await?;

        if !output.status.success() {
            return Err(NarezkaError::ProbeFailed {
                path: path.to_path_buf(),
                reason: String::from_utf8_lossy(&output.stderr).to_string(),
            });
        }

        String::from_utf8_lossy(&output.stdout)
            .trim()
            .parse()
            .map_err(|e| NarezkaError::ProbeFailed {
                path: path.to_path_buf(),
                reason: format!("unparsable duration: {e}"),
            })
    }

    /// Cut `[start, end)` out of the source, re-encoding so effect filters
    /// apply cleanly afterwards.
    async fn cut(&self, video: &Path, start: f64, end: f64, output: &Path) -> Result<()> {
        let result = Command::new("ffmpeg")
            .arg("-y")
            .arg("-hide_banner")
            .arg("-loglevel")
            .arg("error")
            .arg("-i")
            .arg(video)
            .arg("-ss")
            .arg(start.to_string())
            .arg("-t")
            .arg((end - start).to_string())
            .args(VIDEO_CODEC_ARGS)
            .args(AUDIO_CODEC_ARGS)
            .arg("-avoid_negative_ts")
            .arg("make_zero")
            .arg(output)
            .output()
            .await?;

        if !result.status.success() {
            return Err(NarezkaError::CutFailed {
                output: output.to_path_buf(),
                reason: String::from_utf8_lossy(&result.stderr).to_string(),
            });
        }

        Ok(())
    }

    async fn apply_filter(&self, input: &Path, filter: &str, output: &Path) -> Result<()> {
        let result = Command::new("ffmpeg")
            .arg("-y")
            .arg("-hide_banner")
            .arg("-loglevel")
            .arg("error")
            .arg("-i")
            .arg(input)
            .arg("-vf")
            .arg(filter)
            .args(VIDEO_CODEC_ARGS)
            .arg("-c:a")
            .arg("copy")
            .arg(output)
            .output()
            .await?;

        if !result.status.success() {
            return Err(NarezkaError::EffectFailed {
                output: output.to_path_buf(),
                reason: String::from_utf8_lossy(&result.stderr).to_string(),
            });
        }

        Ok(())
    }

    async fn transition(
        &self,
        first: &Path,
        second: &Path,
        transition: &str,
        duration: f64,
        output: &Path,
    ) -> Result<()> {
        // xfade overlaps the tail of the first clip, so the offset is its
        // duration minus the transition length.
        let first_duration = self.duration(first).await?;
        let offset = (first_duration - duration).max(0.0);

        let filter = format!(
            "[0:v][1:v]xfade=transition={transition}:duration={duration:.3}:offset={offset:.6}[v];\
             [0:a][1:a]acrossfade=d={duration:.3}:c1=tri:c2=tri[a]"
        );

        let result = Command::new("ffmpeg")
            .arg("-y")
            .arg("-hide_banner")
            .arg("-loglevel")
            .arg("error")
            .arg("-i")
            .arg(first)
            .arg("-i")
            .arg(second)
            .arg("-filter_complex")
            .arg(&filter)
            .arg("-map")
            .arg("[v]")
            .arg("-map")
            .arg("[a]")
            .args(VIDEO_CODEC_ARGS)
            .args(AUDIO_CODEC_ARGS)
            .arg(output)
            .output()
            .await?;

        if !result.status.success() {
            return Err(NarezkaError::TransitionFailed {
                output: output.to_path_buf(),
                reason: String::from_utf8_lossy(&result.stderr).to_string(),
            });
        }

        Ok(())
    }

    /// Plain left-to-right concatenation via the concat demuxer, re-encoding
    /// so differently filtered clips still join.
    async fn concat(&self, inputs: &[PathBuf], output: &Path) -> Result<()> {
        let parent = output.parent().unwrap_or(Path::new("."));
        let manifest = parent.join("concat_list.txt");

        let mut listing = String::new();
        for input in inputs {
            listing.push_str(&format!("file '{}'\n", input.display()));
        }
        fs::write(&manifest, listing).await?;

        let result = Command::new("ffmpeg")
            .arg("-y")
            .arg("-hide_banner")
            .arg("-loglevel")
            .arg("error")
            .arg("-f")
            .arg("concat")
            .arg("-safe")
            .arg("0")
            .arg("-i")
            .arg(&manifest)
            .args(VIDEO_CODEC_ARGS)
            .args(AUDIO_CODEC_ARGS)
            .arg(output)
            .output()
            .await?;

        let _ = fs::remove_file(&manifest).await;

        if !result.status.success() {
            return Err(NarezkaError::ConcatFailed {
                output: output.to_path_buf(),
                reason: String::from_utf8_lossy(&result.stderr).to_string(),
            });
        }

        Ok(())
    }
}
