use async_trait::async_trait;
use tracing::warn;

use crate::{
    error::{NarezkaError, Result},
    provider::Provider,
};

/// Translation collaborator. Failure degrades silently to the original text.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, target_lang: &str) -> String;
}

/// Translator backed by the provider's chat endpoint.
pub struct ApiTranslator {
    client: reqwest::Client,
    api_url: &'static str,
    model: &'static str,
    api_key: String,
}

impl ApiTranslator {
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

    async fn request(&self, text: &str, target_lang: &str) -> Result<String> {
        let response = self
            .client
            .post(self.api_url)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&serde_json::json!({
                "model": self.model,
                "messages": [
                    {
                        "role": "system",
                        "content": "You are a translator. Respond with only the translated text.",
                    },
                    {
                        "role": "user",
                        "content": format!("Translate the following text to {target_lang}:\n\n{text}"),
                    },
                ],
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

#[async_trait]
impl Translator for ApiTranslator {
    async fn translate(&self, text: &str, target_lang: &str) -> String {
        match self.request(text, target_lang).await {
            Ok(translated) => translated,
            Err(e) => {
                warn!("translation failed, keeping original text: {e}");
                text.to_string()
            }
        }
    }
}
