//! Configuration for talking to the Ollama backend.
//!
//! All backend behaviour is controlled through [`StudyConfig`], built via its
//! [`StudyConfigBuilder`]. The config is read once at startup and injected
//! into [`crate::generator::StudyGenerator`]; nothing in the library reads
//! process-wide settings.

use crate::error::StudyError;
use serde::{Deserialize, Serialize};

/// Default Ollama endpoint.
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Default preferred model identifier.
pub const DEFAULT_MODEL: &str = "llava-llama3:8b";

/// Ceiling for model-listing queries, in seconds.
pub const MAX_AVAILABILITY_TIMEOUT_SECS: u64 = 10;

/// Configuration for summary, flashcard and quiz generation.
///
/// Built via [`StudyConfig::builder()`] or using [`StudyConfig::default()`].
///
/// # Example
/// ```rust
/// use pdf2study::StudyConfig;
///
/// let config = StudyConfig::builder()
///     .base_url("http://gpu-box:11434/")
///     .model("llama3.2:1b")
///     .generation_timeout_secs(120)
///     .build()
///     .unwrap();
/// assert_eq!(config.base_url, "http://gpu-box:11434");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyConfig {
    /// Base URL of the Ollama server, without a trailing slash.
    pub base_url: String,

    /// Preferred model identifier. Default: `llava-llama3:8b`.
    ///
    /// Only a preference: when the backend does not list it, the closest
    /// catalog entry (or the first one) is used instead.
    pub model: String,

    /// Per-generation-call timeout in seconds. Default: 300.
    ///
    /// Local models on CPU can take minutes for a long quiz. After this
    /// ceiling the call is abandoned and classified as a timeout.
    pub generation_timeout_secs: u64,

    /// Model-listing timeout in seconds. Default and maximum: 10.
    pub availability_timeout_secs: u64,

    /// Minimum character count of the trimmed source text. Default: 50.
    ///
    /// Anything shorter is almost always a scanned PDF with no text layer.
    pub min_text_chars: usize,
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            generation_timeout_secs: 300,
            availability_timeout_secs: MAX_AVAILABILITY_TIMEOUT_SECS,
            min_text_chars: 50,
        }
    }
}

impl StudyConfig {
    /// Create a new builder for `StudyConfig`.
    pub fn builder() -> StudyConfigBuilder {
        StudyConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`StudyConfig`].
#[derive(Debug)]
pub struct StudyConfigBuilder {
    config: StudyConfig,
}

impl StudyConfigBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into().trim().trim_end_matches('/').to_string();
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into().trim().to_string();
        self
    }

    pub fn generation_timeout_secs(mut self, secs: u64) -> Self {
        self.config.generation_timeout_secs = secs;
        self
    }

    pub fn availability_timeout_secs(mut self, secs: u64) -> Self {
        self.config.availability_timeout_secs = secs.clamp(1, MAX_AVAILABILITY_TIMEOUT_SECS);
        self
    }

    pub fn min_text_chars(mut self, n: usize) -> Self {
        self.config.min_text_chars = n;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<StudyConfig, StudyError> {
        let c = &self.config;
        if c.base_url.is_empty() {
            return Err(StudyError::InvalidConfig("base URL must not be empty".into()));
        }
        if !c.base_url.starts_with("http://") && !c.base_url.starts_with("https://") {
            return Err(StudyError::InvalidConfig(format!(
                "base URL must start with http:// or https://, got '{}'",
                c.base_url
            )));
        }
        if c.model.is_empty() {
            return Err(StudyError::InvalidConfig("model must not be empty".into()));
        }
        if c.generation_timeout_secs == 0 {
            return Err(StudyError::InvalidConfig(
                "generation timeout must be ≥ 1s".into(),
            ));
        }
        Ok(self.config)
    }
}
