//! Prompts for summary, flashcard and quiz generation.
//!
//! Centralising every prompt here serves two purposes:
//!
//! 1. **Single source of truth** — the output-format contract the parser in
//!    [`crate::pipeline::parse`] depends on is written in exactly one place.
//!
//! 2. **Testability** — unit tests can inspect rendered prompts directly
//!    without a running model, so prompt regressions are easy to catch.
//!
//! [`build_prompt`] is pure: the same task, text and quantity always render
//! the same prompt.

use crate::task::{TaskKind, DEFAULT_QUANTITY};
use tracing::debug;

/// Appended to source text that was cut to fit the task budget.
pub const TRUNCATION_MARKER: &str = "[content truncated]";

/// Cut `text` to at most `budget` characters.
///
/// A prefix cut on `char` boundaries; when anything was dropped the
/// [`TRUNCATION_MARKER`] is appended so the model knows the material continues.
pub fn truncate_input(text: &str, budget: usize) -> String {
    match text.char_indices().nth(budget) {
        Some((cut, _)) => {
            debug!("Source text truncated to {} of {} chars", budget, text.chars().count());
            format!("{}\n\n{}", &text[..cut], TRUNCATION_MARKER)
        }
        None => text.to_string(),
    }
}

/// Render the instruction prompt for `task`.
///
/// `quantity` is ignored for summaries; for flashcards and quizzes it should
/// already be clamped by the caller.
pub fn build_prompt(task: TaskKind, text: &str, quantity: Option<u32>) -> String {
    let content = truncate_input(text, task.input_budget());
    let n = quantity.unwrap_or(DEFAULT_QUANTITY);
    match task {
        TaskKind::Summary => summary_prompt(&content),
        TaskKind::Flashcards => flashcards_prompt(&content, n),
        TaskKind::Quiz => quiz_prompt(&content, n),
    }
}

fn summary_prompt(content: &str) -> String {
    format!(
        r#"You are an expert academic summarizer. Summarize the following lecture material or textbook content for a student preparing for an exam.

Structure the summary in exactly these four sections, each with a Markdown heading:

## Overview
A short paragraph describing what the material is about.

## Key Topics
Bullet points naming the main topics covered.

## Important Concepts
Definitions, formulas and relationships the student must know.

## Key Takeaways
The few points worth remembering above all else.

Preserve all mathematical notation using LaTeX: $...$ for inline math and $$...$$ for display equations.

Content:

{content}

Summary:"#
    )
}

fn flashcards_prompt(content: &str, n: u32) -> String {
    format!(
        r#"You are an expert educator creating study flashcards. Based on the content below, create exactly {n} flashcards.

Each flashcard must:
1. Have a clear, concise question
2. Have a focused, complete answer
3. Cover a key concept, definition or fact from the content
4. Use LaTeX for math (e.g. $x^2$)

Content:

{content}

Return ONLY a JSON array with exactly {n} objects in this format:
[
  {{"question": "What is ...?", "answer": "It is ..."}},
  {{"question": "Explain ...", "answer": "This means ..."}}
]

Do not add any text, explanation or Markdown before or after the JSON array."#
    )
}

fn quiz_prompt(content: &str, n: u32) -> String {
    format!(
        r#"You are an expert educator writing a multiple-choice quiz. Based on the content below, create exactly {n} questions.

Each question must:
1. Test understanding of a key concept
2. Have exactly 4 options
3. Have exactly one correct option
4. Include a one-sentence explanation of the correct option
5. Use LaTeX for math (e.g. $x^2$)

Content:

{content}

Return ONLY a JSON array with exactly {n} objects in this format:
[
  {{
    "question": "What is the main idea of ...?",
    "options": ["First option", "Second option", "Third option", "Fourth option"],
    "correct_answer": 0,
    "explanation": "The first option is correct because ..."
  }}
]

"correct_answer" is the 0-based index (0-3) of the correct option.
Do not add any text, explanation or Markdown before or after the JSON array."#
    )
}
