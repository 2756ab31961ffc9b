use rand::seq::IteratorRandom;
use tracing::warn;

use crate::{catalog::Catalog, suggest::SuggestionClient};

/// Which catalog a pick is being requested from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionKind {
    Effect,
    Transition,
}

impl SuggestionKind {
    fn label(&self) -> &'static str {
        match self {
            Self::Effect => "effect",
            Self::Transition => "transition",
        }
    }
}

/// How a catalog pick was arrived at. The name is always a catalog key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Suggested(String),
    FallbackRandom(String),
}

impl Resolution {
    pub fn name(&self) -> &str {
        match self {
            Self::Suggested(name) | Self::FallbackRandom(name) => name,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::FallbackRandom(_))
    }
}

/// Pick a catalog entry for the given context. One-shot: a single suggestion
/// request, validated against the catalog, with a uniform-random fallback on
/// any invalid or missing answer. Returns `None` only for an empty catalog.
pub async fn resolve(
    client: &mut SuggestionClient,
    context: &str,
    catalog: &Catalog,
    kind: SuggestionKind,
) -> Option<Resolution> {
    if catalog.is_empty() {
        return None;
    }

    let names = catalog.keys().cloned().collect::<Vec<_>>().join(", ");
    let prompt = match kind {
        SuggestionKind::Effect => format!(
            "Given a video segment with the following topic:\n\
             {context}\n\
             Suggest the most suitable video effect from the following list:\n\
             {names}\n\
             Respond with only the name of the effect."
        ),
        SuggestionKind::Transition => format!(
            "Given two consecutive video segments with the following topics:\n\
             {context}\n\
             Suggest the most suitable transition effect from the following list:\n\
             {names}\n\
             Respond with only the name of the transition effect."
        ),
    };

    match client.ask(&prompt).await {
        Some(answer) => {
            let answer = answer.trim();
            if catalog.contains_key(answer) {
                return Some(Resolution::Suggested(answer.to_string()));
            }
            warn!(
                "suggested {} {answer:?} is not in the catalog, picking at random",
                kind.label()
            );
        }
        None => warn!("no {} suggestion available, picking at random", kind.label()),
    }

    let mut rng = rand::rng();
    catalog
        .keys()
        .choose(&mut rng)
        .cloned()
        .map(Resolution::FallbackRandom)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::{
        catalog::CatalogEntry,
        error::{NarezkaError, Result},
        suggest::{ChatMessage, Completer},
    };

    struct FixedCompleter(Option<&'static str>);

    #[async_trait]
    impl Completer for FixedCompleter {
        async fn complete(&self, _history: &[ChatMessage]) -> Result<String> {
            match self.0 {
                Some(answer) => Ok(answer.to_string()),
                None => Err(NarezkaError::CompletionFailed {
                    reason: "down".to_string(),
                }),
            }
        }
    }

    fn client(answer: Option<&'static str>) -> SuggestionClient {
        SuggestionClient::new(Box::new(FixedCompleter(answer)), Duration::ZERO)
    }

    fn catalog(names: &[&str]) -> Catalog {
        names
            .iter()
            .map(|&name| {
                (
                    name.to_string(),
                    CatalogEntry {
                        name: name.to_string(),
                        description: String::new(),
                        parameters: Default::default(),
                        output_file: None,
                    },
                )
            })
            .collect()
    }

    #[tokio::test]
    async fn valid_answer_is_suggested() {
        let mut client = client(Some("grayscale"));
        let catalog = catalog(&["grayscale", "invert"]);
        let resolution = resolve(&mut client, "Topic 1", &catalog, SuggestionKind::Effect)
            .await
            .unwrap();
        assert_eq!(resolution, Resolution::Suggested("grayscale".to_string()));
    }

    #[tokio::test]
    async fn answer_is_trimmed_before_validation() {
        let mut client = client(Some("  invert \n"));
        let catalog = catalog(&["grayscale", "invert"]);
        let resolution = resolve(&mut client, "Topic 1", &catalog, SuggestionKind::Effect)
            .await
            .unwrap();
        assert_eq!(resolution, Resolution::Suggested("invert".to_string()));
    }

    #[tokio::test]
    async fn unknown_answer_falls_back_to_a_catalog_member() {
        let mut client = client(Some("sepia_dream"));
        let catalog = catalog(&["grayscale", "invert"]);
        let resolution = resolve(&mut client, "Topic 1", &catalog, SuggestionKind::Effect)
            .await
            .unwrap();
        assert!(resolution.is_fallback());
        assert!(catalog.contains_key(resolution.name()));
    }

    #[tokio::test]
    async fn collaborator_failure_falls_back_to_a_catalog_member() {
        let mut client = client(None);
        let catalog = catalog(&["crossfade"]);
        let resolution = resolve(&mut client, "Topic 1", &catalog, SuggestionKind::Transition)
            .await
            .unwrap();
        assert_eq!(
            resolution,
            Resolution::FallbackRandom("crossfade".to_string())
        );
    }

    #[tokio::test]
    async fn empty_catalog_yields_no_resolution() {
        let mut client = client(Some("anything"));
        let resolution = resolve(
            &mut client,
            "Topic 1",
            &Catalog::new(),
            SuggestionKind::Effect,
        )
        .await;
        assert!(resolution.is_none());
    }
}
