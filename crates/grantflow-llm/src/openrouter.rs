//! OpenRouter provider implementation
//!
//! Issues one chat-completion request per call against an OpenAI-compatible
//! endpoint. OpenRouter is the default target; any compatible API works via
//! the base-URL override.
//!
//! # Environment
//!
//! - `OPENROUTER_API_KEY` — required credential
//! - `OPENROUTER_BASE_URL` — optional endpoint override
//! - `OPENROUTER_SITE_URL` / `OPENROUTER_APP_NAME` — optional
//!   site-identification headers OpenRouter recommends

use crate::{ChatOptions, ChatProvider, LlmError};
use async_trait::async_trait;
use grantflow_domain::ChatMessage;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default OpenAI-compatible endpoint
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Default timeout for a completion request (large PDFs plus long prompts
/// can keep a model busy for minutes)
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Environment variable holding the API credential
pub const API_KEY_VAR: &str = "OPENROUTER_API_KEY";

/// OpenAI-compatible chat-completion provider
pub struct OpenRouterProvider {
    base_url: String,
    api_key: String,
    site_url: Option<String>,
    app_name: Option<String>,
    client: reqwest::Client,
}

/// Request body for the chat-completion endpoint
#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

/// One message on the wire
#[derive(Serialize)]
struct WireMessage {
    role: &'static str,
    content: String,
}

impl From<&ChatMessage> for WireMessage {
    fn from(msg: &ChatMessage) -> Self {
        Self {
            role: msg.role.as_str(),
            content: msg.content.clone(),
        }
    }
}

/// Response body from the chat-completion endpoint
#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl OpenRouterProvider {
    /// Create a provider with an explicit base URL and credential
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self, LlmError> {
        Self::with_timeout(base_url, api_key, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a provider with an explicit request timeout
    pub fn with_timeout(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Communication(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            site_url: None,
            app_name: None,
            client,
        })
    }

    /// Create a provider from the process environment
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::MissingCredential`] when `OPENROUTER_API_KEY` is
    /// absent or empty.
    pub fn from_env() -> Result<Self, LlmError> {
        let api_key = std::env::var(API_KEY_VAR)
            .ok()
            .filter(|k| !k.is_empty())
            .ok_or(LlmError::MissingCredential(API_KEY_VAR))?;

        let base_url = std::env::var("OPENROUTER_BASE_URL")
            .ok()
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let mut provider = Self::new(base_url, api_key)?;
        provider.site_url = std::env::var("OPENROUTER_SITE_URL").ok();
        provider.app_name = std::env::var("OPENROUTER_APP_NAME").ok();
        Ok(provider)
    }

    /// Set the site-identification headers OpenRouter recommends
    pub fn with_site(
        mut self,
        site_url: impl Into<String>,
        app_name: impl Into<String>,
    ) -> Self {
        self.site_url = Some(site_url.into());
        self.app_name = Some(app_name.into());
        self
    }
}

#[async_trait]
impl ChatProvider for OpenRouterProvider {
    async fn chat(
        &self,
        messages: &[ChatMessage],
        options: &ChatOptions,
    ) -> Result<String, LlmError> {
        let url = format!("{}/chat/completions", self.base_url);

        let request_body = ChatCompletionRequest {
            model: options.model.clone(),
            messages: messages.iter().map(WireMessage::from).collect(),
            temperature: options.temperature,
        };

        let mut request = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request_body);

        if let Some(site_url) = &self.site_url {
            request = request.header("HTTP-Referer", site_url);
        }
        if let Some(app_name) = &self.app_name {
            request = request.header("X-Title", app_name);
        }

        // Single attempt; a failed task stays failed and the user re-uploads.
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                LlmError::Timeout
            } else {
                LlmError::Communication(format!("Request failed: {}", e))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| LlmError::InvalidResponse("Response carried no choices".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grantflow_domain::ChatMessage;

    #[test]
    fn test_provider_creation_trims_base_url() {
        let provider = OpenRouterProvider::new("https://example.com/v1/", "key").unwrap();
        assert_eq!(provider.base_url, "https://example.com/v1");
    }

    #[test]
    fn test_with_site_sets_headers() {
        let provider = OpenRouterProvider::new(DEFAULT_BASE_URL, "key")
            .unwrap()
            .with_site("https://grantflow.example", "GrantFlow");
        assert_eq!(
            provider.site_url.as_deref(),
            Some("https://grantflow.example")
        );
        assert_eq!(provider.app_name.as_deref(), Some("GrantFlow"));
    }

    #[test]
    fn test_temperature_omitted_when_none() {
        let body = ChatCompletionRequest {
            model: "openai/gpt-4o".to_string(),
            messages: vec![WireMessage::from(&ChatMessage::user("hi"))],
            temperature: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("temperature").is_none());
    }

    #[test]
    fn test_first_choice_extraction() {
        let raw = r#"{
            "choices": [
                {"message": {"role": "assistant", "content": "first"}},
                {"message": {"role": "assistant", "content": "second"}}
            ]
        }"#;
        let parsed: ChatCompletionResponse = serde_json::from_str(raw).unwrap();
        let first = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content);
        assert_eq!(first.as_deref(), Some("first"));
    }

    #[tokio::test]
    async fn test_connection_error_surfaces_as_communication() {
        let provider = OpenRouterProvider::with_timeout(
            "http://127.0.0.1:1",
            "key",
            Duration::from_secs(2),
        )
        .unwrap();

        let err = provider
            .chat(&[ChatMessage::user("hi")], &ChatOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            LlmError::Communication(_) | LlmError::Timeout
        ));
    }
}
