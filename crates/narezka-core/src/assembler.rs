use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{error, info, warn};

use crate::{
    builder::SegmentArtifact,
    catalog::Catalog,
    error::{NarezkaError, Result},
    media::MediaEngine,
    resolver::{self, SuggestionKind},
    suggest::SuggestionClient,
    transitions::TransitionOp,
    workdir,
};

/// How one pairwise join was made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionOutcome {
    Applied { name: String, fallback: bool },
    PlainConcat { suggested: Option<String> },
}

#[derive(Debug)]
pub struct AssemblyReport {
    pub output: PathBuf,
    pub joins: Vec<TransitionOutcome>,
}

/// Join segment clips strictly left to right into the final video.
///
/// The accumulator starts as the first clip; each later clip is joined onto
/// it with a resolved transition, or plain concatenation when no catalog is
/// available or the pick is not implemented. Superseded intermediates are
/// deleted, so the working directory ends holding only the per-segment clips
/// and the final artifact.
pub async fn assemble(
    engine: &dyn MediaEngine,
    client: &mut SuggestionClient,
    artifacts: &[SegmentArtifact],
    transitions: &Catalog,
    workdir: &Path,
) -> Result<AssemblyReport> {
    let Some(first) = artifacts.first() else {
        return Err(NarezkaError::NothingToAssemble);
    };

    let final_path = workdir::final_video_path(workdir);
    if artifacts.len() == 1 {
        fs::copy(&first.path, &final_path).await?;
        return Ok(AssemblyReport {
            output: final_path,
            joins: Vec::new(),
        });
    }

    let mut joins = Vec::with_capacity(artifacts.len() - 1);
    let mut accumulator = first.path.clone();

    for (i, artifact) in artifacts.iter().enumerate().skip(1) {
        let output = if i == artifacts.len() - 1 {
            final_path.clone()
        } else {
            workdir::join_path(workdir, i)
        };

        let context = format!("1. Topic {}\n2. Topic {}", i, i + 1);
        let choice =
            resolver::resolve(client, &context, transitions, SuggestionKind::Transition).await;

        let outcome = match choice {
            Some(resolution) => {
                let entry = transitions.get(resolution.name());
                let op = entry.and_then(|e| TransitionOp::from_name(&e.name));

                match (entry, op) {
                    (Some(entry), Some(op)) => {
                        info!("applying transition: {}", entry.description);
                        let duration = entry.param_f64("duration", 1.0);
                        engine
                            .transition(
                                &accumulator,
                                &artifact.path,
                                op.xfade_name(),
                                duration,
                                &output,
                            )
                            .await
                            .inspect_err(|e| {
                                error!("transition failed while joining segment {i}: {e}");
                            })?;
                        TransitionOutcome::Applied {
                            name: resolution.name().to_string(),
                            fallback: resolution.is_fallback(),
                        }
                    }
                    _ => {
                        warn!(
                            "transition {:?} not found or not implemented, concatenating without transition",
                            resolution.name()
                        );
                        engine
                            .concat(&[accumulator.clone(), artifact.path.clone()], &output)
                            .await
                            .inspect_err(|e| {
                                error!("concatenation failed while joining segment {i}: {e}");
                            })?;
                        TransitionOutcome::PlainConcat {
                            suggested: Some(resolution.name().to_string()),
                        }
                    }
                }
            }
            None => {
                engine
                    .concat(&[accumulator.clone(), artifact.path.clone()], &output)
                    .await
                    .inspect_err(|e| {
                        error!("concatenation failed while joining segment {i}: {e}");
                    })?;
                TransitionOutcome::PlainConcat { suggested: None }
            }
        };
        joins.push(outcome);

        if accumulator != first.path {
            let _ = fs::remove_file(&accumulator).await;
        }
        accumulator = output;
    }

    Ok(AssemblyReport {
        output: accumulator,
        joins,
    })
}
