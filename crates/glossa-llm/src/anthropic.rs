//! Anthropic Messages API completion provider.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use glossa_core::errors::GatewayError;

use crate::provider::{CompletionOptions, CompletionProvider};

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const API_VERSION: &str = "2023-06-01";
const DEFAULT_MODEL: &str = "claude-sonnet-4-5";
const DEFAULT_MAX_TOKENS: u32 = 2048;
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Configuration for [`AnthropicProvider`].
#[derive(Clone, Debug)]
pub struct AnthropicConfig {
    pub api_key: SecretString,
    pub model: String,
    /// Overridable for tests.
    pub base_url: String,
    pub max_tokens: u32,
}

impl AnthropicConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            model: DEFAULT_MODEL.to_owned(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Non-streaming response body, reduced to what the pipeline consumes.
#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    text: Option<String>,
}

/// Anthropic completion provider.
pub struct AnthropicProvider {
    config: AnthropicConfig,
    client: Client,
}

impl AnthropicProvider {
    pub fn new(config: AnthropicConfig) -> Self {
        Self {
            config,
            client: Client::builder()
                .connect_timeout(CONNECT_TIMEOUT)
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("failed to build HTTP client"),
        }
    }

    /// Create a provider sharing an existing HTTP client.
    pub fn with_client(config: AnthropicConfig, client: Client) -> Self {
        Self { config, client }
    }

    fn build_body(&self, prompt: &str, options: &CompletionOptions) -> Value {
        let mut body = json!({
            "model": self.config.model,
            "max_tokens": options.max_tokens.unwrap_or(self.config.max_tokens),
            "messages": [{ "role": "user", "content": prompt }],
        });
        if let Some(system) = &options.system {
            body["system"] = json!(system);
        }
        if let Some(temperature) = options.temperature {
            body["temperature"] = json!(temperature);
        }
        if !options.stop_sequences.is_empty() {
            body["stop_sequences"] = json!(options.stop_sequences);
        }
        body
    }

    fn map_transport_error(e: &reqwest::Error) -> GatewayError {
        if e.is_timeout() {
            GatewayError::Timeout(REQUEST_TIMEOUT)
        } else {
            GatewayError::NetworkError(e.to_string())
        }
    }
}

#[async_trait]
impl CompletionProvider for AnthropicProvider {
    fn name(&self) -> &str {
        "anthropic"
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    async fn complete(
        &self,
        prompt: &str,
        options: &CompletionOptions,
    ) -> Result<String, GatewayError> {
        let url = format!("{}/v1/messages", self.config.base_url);
        let body = self.build_body(prompt, options);

        debug!(
            model = %self.config.model,
            prompt_bytes = prompt.len(),
            "sending completion request"
        );

        let response = self
            .client
            .post(&url)
            .header("x-api-key", self.config.api_key.expose_secret())
            .header("anthropic-version", API_VERSION)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| Self::map_transport_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::from_status(status.as_u16(), body));
        }

        let parsed: MessagesResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::NetworkError(format!("malformed response body: {e}")))?;

        let text = parsed
            .content
            .iter()
            .find(|block| block.kind == "text")
            .and_then(|block| block.text.as_deref())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(GatewayError::InvalidRequest(
                "completion contained no text content".into(),
            ));
        }

        Ok(text.to_owned())
    }
}
