use std::{collections::HashMap, time::Duration};

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::{
    error::{NarezkaError, Result},
    provider::Provider,
};

const SYSTEM_PROMPT: &str = "You need to perform the task given by the user";

/// One turn of the conversation sent to the completion endpoint.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

/// Chat-completion collaborator behind the suggestion client.
#[async_trait]
pub trait Completer: Send + Sync {
    async fn complete(&self, history: &[ChatMessage]) -> Result<String>;
}

/// Completer backed by an OpenAI-style chat endpoint.
pub struct ApiCompleter {
    client: reqwest::Client,
    api_url: &'static str,
    model: &'static str,
    api_key: String,
}

impl ApiCompleter {
    pub fn new(provider: &Provider) -> Result<Self> {
        let config = provider.config();
        let api_key = provider.validate_api_key()?;
        Ok(Self {
            client: reqwest::Client::new(),
            api_url: config.api_url,
            model: config.model,
            api_key,
        })
    }
}

#[async_trait]
impl Completer for ApiCompleter {
    async fn complete(&self, history: &[ChatMessage]) -> Result<String> {
        let messages: Vec<serde_json::Value> = history
            .iter()
            .map(|m| serde_json::json!({ "role": m.role, "content": m.content }))
            .collect();

        let response = self
            .client
            .post(self.api_url)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&serde_json::json!({
                "model": self.model,
                "messages": messages,
                "temperature": 0.3,
            }))
            .send()
            .await?
            .json::<serde_json::Value>()
            .await?;

        let content = response["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| NarezkaError::CompletionFailed {
                reason: format!("Invalid API response: {:?}", response),
            })?;

        Ok(content.to_string())
    }
}

/// Session object for all language-model suggestions within one run.
///
/// Memoizes answers by exact prompt text and keeps the full conversation
/// history, resent as context on every uncached call. The history only
/// records successful exchanges. The cache key is the raw prompt text, so
/// two identical prompts issued in different conversational states share one
/// answer.
pub struct SuggestionClient {
    completer: Box<dyn Completer>,
    history: Vec<ChatMessage>,
    cache: HashMap<String, String>,
    min_delay: Duration,
}

impl SuggestionClient {
    pub fn new(completer: Box<dyn Completer>, min_delay: Duration) -> Self {
        Self {
            completer,
            history: vec![ChatMessage {
                role: "system",
                content: SYSTEM_PROMPT.to_string(),
            }],
            cache: HashMap::new(),
            min_delay,
        }
    }

    /// Ask the collaborator for a completion. Returns `None` when no answer
    /// is available; callers apply their own fallback.
    pub async fn ask(&mut self, prompt: &str) -> Option<String> {
        if let Some(answer) = self.cache.get(prompt) {
            debug!("suggestion cache hit");
            return Some(answer.clone());
        }

        // Rate-limit discipline: paid once per unique prompt.
        tokio::time::sleep(self.min_delay).await;

        self.history.push(ChatMessage {
            role: "user",
            content: prompt.to_string(),
        });

        match self.completer.complete(&self.history).await {
            Ok(answer) => {
                self.history.push(ChatMessage {
                    role: "assistant",
                    content: answer.clone(),
                });
                self.cache.insert(prompt.to_string(), answer.clone());
                Some(answer)
            }
            Err(e) => {
                self.history.pop();
                warn!("completion request failed: {e}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use super::*;

    struct CountingCompleter {
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    #[async_trait]
    impl Completer for CountingCompleter {
        async fn complete(&self, _history: &[ChatMessage]) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(NarezkaError::CompletionFailed {
                    reason: "down".to_string(),
                })
            } else {
                Ok("answer".to_string())
            }
        }
    }

    struct HistoryLenCompleter {
        lens: Arc<std::sync::Mutex<Vec<usize>>>,
        fail_first: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Completer for HistoryLenCompleter {
        async fn complete(&self, history: &[ChatMessage]) -> Result<String> {
            self.lens.lock().unwrap().push(history.len());
            if self.fail_first.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(NarezkaError::CompletionFailed {
                    reason: "down".to_string(),
                })
            } else {
                Ok("answer".to_string())
            }
        }
    }

    #[tokio::test]
    async fn repeated_prompt_issues_one_call() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut client = SuggestionClient::new(
            Box::new(CountingCompleter {
                calls: calls.clone(),
                fail: false,
            }),
            Duration::ZERO,
        );

        assert_eq!(client.ask("pick one").await.as_deref(), Some("answer"));
        assert_eq!(client.ask("pick one").await.as_deref(), Some("answer"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failure_returns_none_and_is_not_cached() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut client = SuggestionClient::new(
            Box::new(CountingCompleter {
                calls: calls.clone(),
                fail: true,
            }),
            Duration::ZERO,
        );

        assert!(client.ask("pick one").await.is_none());
        assert!(client.ask("pick one").await.is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failed_exchange_is_dropped_from_history() {
        let lens = Arc::new(std::sync::Mutex::new(Vec::new()));
        let mut client = SuggestionClient::new(
            Box::new(HistoryLenCompleter {
                lens: lens.clone(),
                fail_first: Arc::new(AtomicUsize::new(0)),
            }),
            Duration::ZERO,
        );

        assert!(client.ask("first").await.is_none());
        assert!(client.ask("second").await.is_some());

        // System message plus the one pending user message, both times: the
        // failed exchange must not linger in the resent context.
        assert_eq!(*lens.lock().unwrap(), vec![2, 2]);
    }
}
