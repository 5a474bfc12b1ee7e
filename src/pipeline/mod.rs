//! Pipeline stages for study-material generation.
//!
//! Each submodule implements exactly one step, so each is independently
//! testable and can change without touching the others.
//!
//! ## Data Flow
//!
//! ```text
//! extract ──▶ models ──▶ (prompts) ──▶ generate ──▶ parse
//!  (pdfium)   (catalog)               (Ollama)     (repair + coerce)
//! ```
//!
//! 1. [`extract`]  — pull the text layer out of a PDF; runs in
//!    `spawn_blocking` because pdfium is not async-safe
//! 2. [`models`]   — list the backend's loaded models and resolve the
//!    preferred identifier against them
//! 3. [`generate`] — one non-streaming generation call; the only stage with
//!    network I/O
//! 4. [`parse`]    — locate, repair and coerce the JSON array in the model's
//!    reply; never fails

pub mod extract;
pub mod generate;
pub mod models;
pub mod parse;
