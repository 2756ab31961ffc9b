use std::{
    hash::{DefaultHasher, Hash, Hasher},
    path::{Path, PathBuf},
};

/// Get the working directory for a given input video
pub fn get_workdir(input: &Path) -> PathBuf {
    let mut hasher = DefaultHasher::new();
    input.hash(&mut hasher);
    let input_hash = hasher.finish();

    get_root_workdir().join(input_hash.to_string())
}

pub fn get_root_workdir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join("narezka")
}

/// Get the path for the extracted audio file
pub fn audio_path(workdir: &Path) -> PathBuf {
    workdir.join("audio.wav")
}

/// Get the path for the persisted transcript file
pub fn transcript_path(workdir: &Path) -> PathBuf {
    workdir.join("transcript.json")
}

/// Get the path for a per-segment clip. Deterministic by index, so re-runs
/// overwrite rather than accumulate.
pub fn segment_path(workdir: &Path, index: usize) -> PathBuf {
    workdir.join(format!("segment_{index}.mp4"))
}

/// Get the path for an intermediate accumulator produced while joining
pub fn join_path(workdir: &Path, index: usize) -> PathBuf {
    workdir.join(format!("join_{index}.mp4"))
}

/// Get the path for the final composed video
pub fn final_video_path(workdir: &Path) -> PathBuf {
    workdir.join("final_video.mp4")
}
