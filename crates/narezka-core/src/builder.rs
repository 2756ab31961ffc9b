use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{info, warn};

use crate::{
    catalog::Catalog,
    effects::EffectOp,
    error::Result,
    media::MediaEngine,
    resolver::{self, SuggestionKind},
    suggest::SuggestionClient,
    types::TopicSegment,
    workdir,
};

/// How a segment ended up looking relative to the raw cut.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EffectOutcome {
    Applied { name: String, fallback: bool },
    PassThrough { suggested: Option<String> },
}

/// A rendered per-segment clip. Ordering equals segment order and is
/// load-bearing for assembly.
#[derive(Debug, Clone)]
pub struct SegmentArtifact {
    pub index: usize,
    pub path: PathBuf,
    pub effect: EffectOutcome,
}

/// Cut each segment out of the source, apply a resolved effect where one is
/// available, and persist the clips under deterministic per-index names.
///
/// A segment whose media work fails is retried once and then skipped with a
/// warning; the suggestion cache makes the repeated prompt free.
pub async fn build_segments(
    engine: &dyn MediaEngine,
    client: &mut SuggestionClient,
    video: &Path,
    segments: &[TopicSegment],
    effects: &Catalog,
    workdir: &Path,
) -> Vec<SegmentArtifact> {
    let mut artifacts = Vec::with_capacity(segments.len());

    for (index, segment) in segments.iter().enumerate() {
        match build_one(engine, client, video, segment, index, effects, workdir).await {
            Ok(artifact) => artifacts.push(artifact),
            Err(e) => {
                warn!("building segment {index} failed ({e}), retrying once");
                match build_one(engine, client, video, segment, index, effects, workdir).await {
                    Ok(artifact) => artifacts.push(artifact),
                    Err(e) => warn!("building segment {index} failed again ({e}), skipping it"),
                }
            }
        }
    }

    artifacts
}

async fn build_one(
    engine: &dyn MediaEngine,
    client: &mut SuggestionClient,
    video: &Path,
    segment: &TopicSegment,
    index: usize,
    effects: &Catalog,
    workdir: &Path,
) -> Result<SegmentArtifact> {
    let path = workdir::segment_path(workdir, index);
    let context = format!("Topic {}", index + 1);

    let Some(resolution) =
        resolver::resolve(client, &context, effects, SuggestionKind::Effect).await
    else {
        engine.cut(video, segment.start, segment.end, &path).await?;
        return Ok(SegmentArtifact {
            index,
            path,
            effect: EffectOutcome::PassThrough { suggested: None },
        });
    };

    let entry = effects.get(resolution.name());
    let op = entry.and_then(|e| EffectOp::from_name(&e.name));

    match (entry, op) {
        (Some(entry), Some(op)) => {
            let raw = workdir.join(format!("segment_{index}_raw.mp4"));
            engine.cut(video, segment.start, segment.end, &raw).await?;

            info!("applying effect to segment {index}: {}", entry.description);
            let filter = op.filter(entry, segment.end - segment.start);
            engine.apply_filter(&raw, &filter, &path).await?;
            let _ = fs::remove_file(&raw).await;

            Ok(SegmentArtifact {
                index,
                path,
                effect: EffectOutcome::Applied {
                    name: resolution.name().to_string(),
                    fallback: resolution.is_fallback(),
                },
            })
        }
        _ => {
            warn!(
                "effect {:?} not found or not implemented, keeping segment {index} unmodified",
                resolution.name()
            );
            engine.cut(video, segment.start, segment.end, &path).await?;
            Ok(SegmentArtifact {
                index,
                path,
                effect: EffectOutcome::PassThrough {
                    suggested: Some(resolution.name().to_string()),
                },
            })
        }
    }
}
