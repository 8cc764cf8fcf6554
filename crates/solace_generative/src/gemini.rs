use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use solace_core::config::GenerativeConfig;
use solace_core::TextGenerator;
use std::env;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Gemini generateContent client.
///
/// Construction is fallible-by-absence: without a `GEMINI_API_KEY` there is
/// no client, and the fallback layer never attempts the network.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Build a client from the environment and config. Returns None when no
    /// API key is set or the HTTP client cannot be constructed — callers
    /// treat that as "service unconfigured", never as an error.
    pub fn from_env(config: &GenerativeConfig) -> Option<Self> {
        let api_key = match env::var("GEMINI_API_KEY") {
            Ok(key) if !key.trim().is_empty() => key,
            _ => {
                tracing::info!("GEMINI_API_KEY not set; generative content will use fallbacks");
                return None;
            }
        };

        let client = match Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
        {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!("Failed to build HTTP client, generative disabled: {}", e);
                return None;
            }
        };

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Some(Self {
            client,
            api_key,
            model: config.model.clone(),
            base_url,
        })
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str, system: &str, temperature: f32) -> Result<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&json!({
                "system_instruction": {"parts": [{"text": system}]},
                "contents": [{"parts": [{"text": prompt}]}],
                "generationConfig": {"temperature": temperature}
            }))
            .send()
            .await
            .context("Failed to send request to Gemini")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Gemini API Error ({}): {}", status, error_text);
        }

        let body: serde_json::Value = response.json().await?;
        let text = body["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .context("Failed to parse Gemini response text")?
            .to_string();

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env_without_key_is_none() {
        // Scoped: only meaningful when the variable is absent in the test
        // environment, which is the default for CI.
        if env::var("GEMINI_API_KEY").is_err() {
            assert!(GeminiClient::from_env(&GenerativeConfig::default()).is_none());
        }
    }
}
