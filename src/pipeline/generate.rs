//! Ollama HTTP client: model listing and single-shot generation.
//!
//! This is the only stage with network I/O. It is intentionally thin: prompt
//! text comes from [`crate::prompts`] and response parsing lives in
//! [`crate::pipeline::parse`], so this module only moves bytes and classifies
//! what went wrong.
//!
//! ## No retries
//!
//! One call, one classified outcome. A slow or overloaded backend surfaces
//! as [`TransportErrorKind::Timeout`] to each caller independently; whether
//! to try again is the caller's decision.
//!
//! ## No pooled connections
//!
//! The underlying `reqwest::Client` keeps no idle connections, so concurrent
//! callers sharing a [`OllamaClient`] never observe each other's connection
//! state.

use crate::error::{StudyError, TransportError, TransportErrorKind};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info};

const TAGS_PATH: &str = "/api/tags";
const GENERATE_PATH: &str = "/api/generate";

/// Sampling and resource bounds for one generation call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationOptions {
    pub temperature: f32,
    /// Sent as `num_predict`.
    pub max_output_tokens: u32,
    pub timeout_secs: u64,
}

// ── Wire types ───────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateBody<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: ModelOptions,
}

#[derive(Debug, Serialize)]
struct ModelOptions {
    temperature: f32,
    num_predict: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateReply {
    #[serde(default)]
    response: String,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TagsReply {
    #[serde(default)]
    models: Vec<ModelDescriptor>,
}

#[derive(Debug, Deserialize)]
struct ModelDescriptor {
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct ErrorReply {
    error: String,
}

// ── Client ───────────────────────────────────────────────────────────────────

/// Stateless handle on one Ollama server.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    http: reqwest::Client,
    base_url: String,
}

impl OllamaClient {
    /// Create a client for `base_url` (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Result<Self, StudyError> {
        let http = reqwest::Client::builder()
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| StudyError::Internal(format!("HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the identifiers of every model the backend can serve right now.
    pub async fn list_models(&self, timeout: Duration) -> Result<Vec<String>, TransportError> {
        let url = format!("{}{}", self.base_url, TAGS_PATH);
        let response = self
            .http
            .get(&url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| classify(&e, timeout.as_secs()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::new(
                TransportErrorKind::BackendError,
                format!("GET {TAGS_PATH} returned HTTP {status}"),
            ));
        }

        let tags: TagsReply = response
            .json()
            .await
            .map_err(|e| classify(&e, timeout.as_secs()))?;

        Ok(tags
            .models
            .into_iter()
            .map(|m| m.name)
            .filter(|name| !name.trim().is_empty())
            .collect())
    }

    /// Run one non-streaming generation and return the raw model text.
    ///
    /// Blank text is a failure ([`TransportErrorKind::EmptyOutput`]), never
    /// a valid empty result.
    pub async fn generate(
        &self,
        model: &str,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, TransportError> {
        let start = Instant::now();
        let url = format!("{}{}", self.base_url, GENERATE_PATH);
        let body = GenerateBody {
            model,
            prompt,
            stream: false,
            options: ModelOptions {
                temperature: options.temperature,
                num_predict: options.max_output_tokens,
            },
        };
        debug!(
            "POST {} model={} prompt={} chars temperature={} num_predict={}",
            GENERATE_PATH,
            model,
            prompt.chars().count(),
            options.temperature,
            options.max_output_tokens
        );

        let response = self
            .http
            .post(&url)
            .timeout(Duration::from_secs(options.timeout_secs))
            .json(&body)
            .send()
            .await
            .map_err(|e| classify(&e, options.timeout_secs))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| classify(&e, options.timeout_secs))?;

        if !status.is_success() {
            let detail = serde_json::from_str::<ErrorReply>(&text)
                .map(|r| r.error)
                .unwrap_or(text);
            return Err(TransportError::new(
                TransportErrorKind::BackendError,
                format!("HTTP {status}: {}", detail.trim()),
            ));
        }

        let reply: GenerateReply = serde_json::from_str(&text).map_err(|e| {
            TransportError::new(
                TransportErrorKind::BackendError,
                format!("unreadable response body: {e}"),
            )
        })?;

        if let Some(error) = reply.error {
            return Err(TransportError::new(TransportErrorKind::BackendError, error));
        }
        if reply.response.trim().is_empty() {
            return Err(TransportError::new(
                TransportErrorKind::EmptyOutput,
                format!("model '{model}' returned no text"),
            ));
        }

        info!(
            "Generation complete: {} chars in {}ms",
            reply.response.chars().count(),
            start.elapsed().as_millis()
        );
        Ok(reply.response)
    }
}

/// Map a reqwest failure onto a transport classification.
fn classify(e: &reqwest::Error, timeout_secs: u64) -> TransportError {
    if e.is_timeout() {
        TransportError::timeout(timeout_secs)
    } else if e.is_connect() {
        TransportError::new(TransportErrorKind::ConnectionFailed, e.to_string())
    } else {
        TransportError::new(TransportErrorKind::BackendError, e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_body_shape() {
        let body = GenerateBody {
            model: "llama3.2:1b",
            prompt: "hi",
            stream: false,
            options: ModelOptions {
                temperature: 0.5,
                num_predict: 2048,
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "llama3.2:1b");
        assert_eq!(json["stream"], false);
        assert_eq!(json["options"]["num_predict"], 2048);
        assert_eq!(json["options"]["temperature"], 0.5);
    }

    #[test]
    fn tags_reply_tolerates_missing_fields() {
        let reply: TagsReply =
            serde_json::from_str(r#"{"models": [{"name": "a"}, {"size": 1}]}"#).unwrap();
        assert_eq!(reply.models.len(), 2);
        assert_eq!(reply.models[1].name, "");

        let reply: TagsReply = serde_json::from_str("{}").unwrap();
        assert!(reply.models.is_empty());
    }

    #[test]
    fn trailing_slash_trimmed() {
        let client = OllamaClient::new("http://localhost:11434/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:11434");
    }
}
