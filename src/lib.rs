//! # pdf2study
//!
//! Turn the text of a PDF into study material (a structured summary, a set
//! of flashcards, or a multiple-choice quiz) using a locally hosted Ollama
//! server.
//!
//! ## Why this crate?
//!
//! Small local models rarely answer in clean JSON. They wrap arrays in
//! Markdown fences, add prose before and after, leave trailing commas, emit
//! raw newlines inside strings and invent their own field types. This crate
//! treats all of that as routine: the parser repairs what it can, coerces
//! every record into a fixed shape, and falls back to a displayable
//! placeholder when nothing can be recovered. Only input, availability and
//! transport problems are reported as failures.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF
//!  │
//!  ├─ 1. Extract   text layer via pdfium (spawn_blocking), `--- Page N ---` markers
//!  ├─ 2. Models    live catalog from GET /api/tags, resolve preferred model
//!  ├─ 3. Prompt    task-specific instructions + truncated source text
//!  ├─ 4. Generate  one POST /api/generate, classified on failure
//!  └─ 5. Parse     locate → repair → coerce → bound (flashcards / quiz)
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdf2study::{extract_text, StudyConfig, StudyGenerator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = StudyConfig::default();
//!     let text = extract_text("lecture.pdf", config.min_text_chars).await?;
//!     let generator = StudyGenerator::new(config)?;
//!
//!     for q in generator.quiz(&text, 5).await? {
//!         println!("{} (answer {})", q.question, q.correct_letter());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdf2study` binary (clap + anyhow + indicatif + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! pdf2study = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod generator;
pub mod output;
pub mod pipeline;
pub mod prompts;
pub mod task;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{StudyConfig, StudyConfigBuilder};
pub use error::{GenerationFailure, StudyError, TransportError, TransportErrorKind};
pub use generator::StudyGenerator;
pub use output::{Flashcard, GeneratedContent, QuizQuestion};
pub use pipeline::extract::extract_text;
pub use pipeline::models::{ModelCatalog, Resolution, ResolvedModel};
pub use pipeline::parse::{parse_flashcards, parse_quiz, ParseDefect};
pub use task::{parse_quantity, GenerationRequest, TaskKind, DEFAULT_QUANTITY};
