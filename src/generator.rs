//! The orchestrator: the only entry point the HTTP/CLI glue calls.
//!
//! One call runs the whole chain for one task:
//!
//! ```text
//! clamp quantity ─▶ check input ─▶ list models ─▶ resolve ─▶ prompt ─▶ generate ─▶ parse
//! ```
//!
//! The result is `Ok(content)` or `Err(GenerationFailure)`. Input,
//! availability and transport problems become failures; malformed model
//! output never does, because the parser resolves it to a fallback record.
//!
//! Every call is self-contained: the model catalog is re-fetched each time
//! and nothing is cached between calls, so one `StudyGenerator` can be shared
//! freely across concurrent requests.

use crate::config::StudyConfig;
use crate::error::{GenerationFailure, StudyError};
use crate::output::{Flashcard, GeneratedContent, QuizQuestion};
use crate::pipeline::extract::check_min_length;
use crate::pipeline::generate::{GenerationOptions, OllamaClient};
use crate::pipeline::models::{ModelCatalog, ModelResolver, Resolution};
use crate::pipeline::parse;
use crate::prompts::build_prompt;
use crate::task::{GenerationRequest, TaskKind};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Summary, flashcard and quiz generation against one Ollama backend.
///
/// # Example
/// ```rust,no_run
/// use pdf2study::{GenerationRequest, StudyConfig, StudyGenerator};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let generator = StudyGenerator::new(StudyConfig::default())?;
/// let text = std::fs::read_to_string("lecture.txt")?;
/// let cards = generator.flashcards(&text, 10).await?;
/// for card in cards {
///     println!("Q: {}\nA: {}\n", card.question, card.answer);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct StudyGenerator {
    config: StudyConfig,
    client: OllamaClient,
    resolver: ModelResolver,
}

impl StudyGenerator {
    pub fn new(config: StudyConfig) -> Result<Self, StudyError> {
        let client = OllamaClient::new(&config.base_url)?;
        let resolver = ModelResolver::new(
            client.clone(),
            config.model.clone(),
            Duration::from_secs(config.availability_timeout_secs),
        );
        Ok(Self {
            config,
            client,
            resolver,
        })
    }

    pub fn config(&self) -> &StudyConfig {
        &self.config
    }

    /// The live model catalog (empty when the backend is unreachable).
    pub async fn list_models(&self) -> ModelCatalog {
        self.resolver.list_models().await
    }

    /// Run one generation request end to end.
    pub async fn run(&self, request: &GenerationRequest) -> Result<GeneratedContent, GenerationFailure> {
        let start = Instant::now();
        let task = request.task;
        let quantity = request.clamped_quantity();
        if quantity != request.quantity && task.is_structured() {
            debug!(
                "Clamped {} quantity {:?} → {:?}",
                task, request.quantity, quantity
            );
        }

        check_min_length(&request.text, self.config.min_text_chars)?;

        let catalog = self.resolver.list_models().await;
        if !catalog.is_available() {
            warn!("No models available at {}", self.config.base_url);
            return Err(GenerationFailure::Unavailable {
                base_url: self.config.base_url.clone(),
                preferred: self.config.model.clone(),
            });
        }

        let model = catalog.resolve(&self.config.model);
        match model.resolution {
            Resolution::Exact => info!("Using model '{}'", model.name),
            _ => warn!(
                "Preferred model '{}' not loaded; using '{}' ({:?})",
                self.config.model, model.name, model.resolution
            ),
        }

        let prompt = build_prompt(task, &request.text, quantity);
        let options = GenerationOptions {
            temperature: request.temperature,
            max_output_tokens: task.max_output_tokens(),
            timeout_secs: self.config.generation_timeout_secs,
        };
        let raw = self.client.generate(&model.name, &prompt, &options).await?;

        let expected = quantity.unwrap_or(1) as usize;
        let content = match task {
            TaskKind::Summary => GeneratedContent::Summary(raw.trim().to_string()),
            TaskKind::Flashcards => GeneratedContent::Flashcards(parse::parse_flashcards(&raw, expected)),
            TaskKind::Quiz => GeneratedContent::Quiz(parse::parse_quiz(&raw, expected)),
        };

        info!(
            "{} ready: {} item(s) in {}ms",
            task,
            content.len(),
            start.elapsed().as_millis()
        );
        Ok(content)
    }

    /// Blocking wrapper around [`StudyGenerator::run`].
    ///
    /// Creates a temporary tokio runtime internally; do not call from inside
    /// an async context.
    pub fn run_blocking(&self, request: &GenerationRequest) -> Result<GeneratedContent, GenerationFailure> {
        tokio::runtime::Runtime::new()
            .map_err(|e| StudyError::Internal(format!("Failed to create tokio runtime: {}", e)))?
            .block_on(self.run(request))
    }

    /// Generate a structured summary of `text`.
    pub async fn summarize(&self, text: &str) -> Result<String, GenerationFailure> {
        match self.run(&GenerationRequest::summary(text)).await? {
            GeneratedContent::Summary(summary) => Ok(summary),
            other => Err(mismatch(TaskKind::Summary, &other)),
        }
    }

    /// Generate up to `count` flashcards (clamped to 1–20).
    pub async fn flashcards(&self, text: &str, count: u32) -> Result<Vec<Flashcard>, GenerationFailure> {
        match self.run(&GenerationRequest::flashcards(text, count)).await? {
            GeneratedContent::Flashcards(cards) => Ok(cards),
            other => Err(mismatch(TaskKind::Flashcards, &other)),
        }
    }

    /// Generate up to `count` quiz questions (clamped to 1–15).
    pub async fn quiz(&self, text: &str, count: u32) -> Result<Vec<QuizQuestion>, GenerationFailure> {
        match self.run(&GenerationRequest::quiz(text, count)).await? {
            GeneratedContent::Quiz(questions) => Ok(questions),
            other => Err(mismatch(TaskKind::Quiz, &other)),
        }
    }
}

fn mismatch(task: TaskKind, content: &GeneratedContent) -> GenerationFailure {
    StudyError::Internal(format!("{task} request produced {content:?}")).into()
}
