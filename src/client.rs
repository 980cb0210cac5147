//! Messages API client
//!
//! The executor never talks to the network directly; it goes through the
//! [`CompletionClient`] trait so a deterministic double can stand in for the
//! real service in tests. [`AnthropicClient`] is the production
//! implementation over HTTP. The client is constructed explicitly and passed
//! into the executor - there is no process-wide singleton.

use crate::error::{AttemptError, Error, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

/// Default API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

/// API version header value required by the Messages API
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Environment variable holding the API key
const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

/// One remote call attempt against a completion service
///
/// Implementations perform exactly one invocation per call and classify the
/// result: a usable response yields the trimmed text, an overload/throttle
/// condition yields [`AttemptError::RateLimited`], anything else yields a
/// permanent error variant. Implementations must be stateless with respect
/// to the batch; the same client is shared read-only across all workers.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Perform one completion attempt for an already-rendered prompt
    async fn complete(
        &self,
        model: &str,
        max_tokens: u32,
        prompt: &str,
    ) -> std::result::Result<String, AttemptError>;
}

/// HTTP client for the Anthropic Messages API
#[derive(Clone)]
pub struct AnthropicClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

// Manual impl: the API key must never reach debug or log output
impl std::fmt::Debug for AnthropicClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnthropicClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl AnthropicClient {
    /// Create a client with an explicit API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Create a client from the `ANTHROPIC_API_KEY` environment variable
    pub fn from_env() -> Result<Self> {
        match std::env::var(API_KEY_ENV) {
            Ok(key) if !key.is_empty() => Ok(Self::new(key)),
            _ => Err(Error::MissingApiKey),
        }
    }

    /// Override the API base URL (tests point this at a local mock server)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

#[async_trait]
impl CompletionClient for AnthropicClient {
    async fn complete(
        &self,
        model: &str,
        max_tokens: u32,
        prompt: &str,
    ) -> std::result::Result<String, AttemptError> {
        let request = MessagesRequest {
            model,
            max_tokens,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .http
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await?;

        let status = response.status();

        // 429 is the documented throttle signal; 529 is the overloaded signal
        if status == StatusCode::TOO_MANY_REQUESTS || status.as_u16() == 529 {
            return Err(AttemptError::RateLimited(format!("HTTP {}", status.as_u16())));
        }

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(AttemptError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: MessagesResponse = response.json().await?;

        parsed
            .content
            .iter()
            .find(|block| block.kind == "text")
            .map(|block| block.text.trim().to_string())
            .ok_or_else(|| AttemptError::MalformedResponse("no text content block".to_string()))
    }
}
