//! GrantFlow LLM Provider Layer
//!
//! Pluggable chat-completion providers behind the [`ChatProvider`] trait.
//!
//! # Providers
//!
//! - [`MockProvider`]: deterministic mock for testing
//! - [`OpenRouterProvider`]: OpenAI-compatible HTTP API (OpenRouter by
//!   default, any compatible endpoint via base-URL override)
//!
//! # Examples
//!
//! ```
//! use grantflow_llm::{ChatOptions, ChatProvider, MockProvider};
//! use grantflow_domain::ChatMessage;
//!
//! # async fn example() {
//! let provider = MockProvider::new("Hello from the model!");
//! let messages = vec![ChatMessage::user("ping")];
//! let reply = provider.chat(&messages, &ChatOptions::default()).await.unwrap();
//! assert_eq!(reply, "Hello from the model!");
//! # }
//! ```

#![warn(missing_docs)]

pub mod openrouter;

use async_trait::async_trait;
use grantflow_domain::ChatMessage;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use openrouter::OpenRouterProvider;

/// Default chat model when the caller does not name one
pub const DEFAULT_MODEL: &str = "openai/gpt-4o";

/// Errors that can occur during chat-completion calls
#[derive(Error, Debug)]
pub enum LlmError {
    /// Required credential is absent from the environment
    #[error("Missing credential: {0} is not set")]
    MissingCredential(&'static str),

    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// The request exceeded the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// Non-2xx response from the API
    #[error("API error (HTTP {status}): {body}")]
    Api {
        /// HTTP status code returned
        status: u16,
        /// Response body, as far as it could be read
        body: String,
    },

    /// Response did not carry a usable completion
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Per-call options for a chat completion
#[derive(Debug, Clone)]
pub struct ChatOptions {
    /// Model identifier (provider-specific)
    pub model: String,

    /// Sampling temperature; omitted from the request when `None` since
    /// some providers reject it outright
    pub temperature: Option<f32>,
}

impl Default for ChatOptions {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: Some(0.2),
        }
    }
}

/// Trait for chat-completion providers
///
/// One call issues one request; retry policy is deliberately the caller's
/// problem (a failed task stays failed).
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send a conversation and return the model's reply text
    async fn chat(&self, messages: &[ChatMessage], options: &ChatOptions)
        -> Result<String, LlmError>;
}

/// Mock chat provider for deterministic testing
///
/// Returns pre-configured responses without any network calls. Responses
/// can be keyed by the content of the final user message; unmatched
/// conversations get the default response.
///
/// # Examples
///
/// ```
/// use grantflow_llm::{ChatOptions, ChatProvider, MockProvider};
/// use grantflow_domain::ChatMessage;
///
/// # async fn example() {
/// let mut provider = MockProvider::default();
/// provider.add_response("Summarize", "A short summary.");
///
/// let messages = vec![ChatMessage::user("Summarize")];
/// assert_eq!(
///     provider.chat(&messages, &ChatOptions::default()).await.unwrap(),
///     "A short summary."
/// );
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    responses: Arc<Mutex<HashMap<String, String>>>,
    call_count: Arc<Mutex<usize>>,
    fail_all: Arc<Mutex<bool>>,
}

impl MockProvider {
    /// Create a MockProvider with a fixed response for all conversations
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            responses: Arc::new(Mutex::new(HashMap::new())),
            call_count: Arc::new(Mutex::new(0)),
            fail_all: Arc::new(Mutex::new(false)),
        }
    }

    /// Add a response keyed by the final user message's content
    pub fn add_response(&mut self, last_user_content: impl Into<String>, response: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .insert(last_user_content.into(), response.into());
    }

    /// Make every subsequent call fail with a communication error
    pub fn fail_all(&self) {
        *self.fail_all.lock().unwrap() = true;
    }

    /// Get the number of times chat was called
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

#[async_trait]
impl ChatProvider for MockProvider {
    async fn chat(
        &self,
        messages: &[ChatMessage],
        _options: &ChatOptions,
    ) -> Result<String, LlmError> {
        *self.call_count.lock().unwrap() += 1;

        if *self.fail_all.lock().unwrap() {
            return Err(LlmError::Communication("Mock failure".to_string()));
        }

        let last_user = messages
            .iter()
            .rev()
            .find(|m| m.role == grantflow_domain::ChatRole::User)
            .map(|m| m.content.clone())
            .unwrap_or_default();

        let responses = self.responses.lock().unwrap();
        if let Some(response) = responses.get(&last_user) {
            return Ok(response.clone());
        }

        Ok(self.default_response.clone())
    }
}
