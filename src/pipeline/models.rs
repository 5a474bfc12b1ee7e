//! Model availability: which model identifier will actually serve a call.
//!
//! Models can be pulled or unloaded behind our back at any time, so the
//! catalog is fetched fresh on every call and never cached. A listing failure
//! is not an error here: it simply yields an empty catalog, which the
//! orchestrator reports as "backend not available".

use crate::pipeline::generate::OllamaClient;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

/// How a [`ResolvedModel`] was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Resolution {
    /// The preferred identifier is in the catalog.
    Exact,
    /// A catalog entry contains the preferred identifier (e.g. a `:latest` or size suffix).
    Substring,
    /// Nothing matched; the first loaded model stands in.
    FirstAvailable,
    /// Empty catalog; the preferred identifier is sent as-is.
    Unresolved,
}

/// The identifier sent to the backend, and how it was picked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedModel {
    pub name: String,
    pub resolution: Resolution,
}

/// Model identifiers reported by the backend at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModelCatalog {
    models: Vec<String>,
}

impl ModelCatalog {
    pub fn new(models: Vec<String>) -> Self {
        Self { models }
    }

    pub fn models(&self) -> &[String] {
        &self.models
    }

    /// `true` when any model is loaded, preferred or not.
    pub fn is_available(&self) -> bool {
        !self.models.is_empty()
    }

    /// Pick the identifier to use for `preferred`.
    ///
    /// Order: exact match, then first entry containing `preferred`, then the
    /// first entry, then `preferred` itself so the backend can report its own
    /// not-found error.
    pub fn resolve(&self, preferred: &str) -> ResolvedModel {
        let pick = |name: &String, resolution| ResolvedModel {
            name: name.clone(),
            resolution,
        };

        if let Some(m) = self.models.iter().find(|m| m.as_str() == preferred) {
            return pick(m, Resolution::Exact);
        }
        if let Some(m) = self.models.iter().find(|m| m.contains(preferred)) {
            return pick(m, Resolution::Substring);
        }
        if let Some(m) = self.models.first() {
            return pick(m, Resolution::FirstAvailable);
        }
        ResolvedModel {
            name: preferred.to_string(),
            resolution: Resolution::Unresolved,
        }
    }
}

/// Live view of the backend's models for one preferred identifier.
#[derive(Debug, Clone)]
pub struct ModelResolver {
    client: OllamaClient,
    preferred: String,
    timeout: Duration,
}

impl ModelResolver {
    pub fn new(client: OllamaClient, preferred: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client,
            preferred: preferred.into(),
            timeout,
        }
    }

    pub fn preferred(&self) -> &str {
        &self.preferred
    }

    /// Query the backend. Never fails: errors yield an empty catalog.
    pub async fn list_models(&self) -> ModelCatalog {
        match self.client.list_models(self.timeout).await {
            Ok(models) => {
                debug!("Backend lists {} models: {:?}", models.len(), models);
                ModelCatalog::new(models)
            }
            Err(e) => {
                warn!(
                    "Could not list models at {}: {}",
                    self.client.base_url(),
                    e
                );
                ModelCatalog::default()
            }
        }
    }

    pub async fn is_available(&self) -> bool {
        self.list_models().await.is_available()
    }

    pub async fn resolve(&self) -> ResolvedModel {
        self.list_models().await.resolve(&self.preferred)
    }
}
