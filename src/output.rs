//! Typed records produced by a generation call.
//!
//! These are plain values handed to the persistence/HTTP glue. Every
//! constructor here upholds the display invariants: flashcard fields are
//! never empty, a quiz question always has exactly four options, and
//! `correct_answer` always indexes one of them.

use serde::{Deserialize, Serialize};

/// Number of options every quiz question carries.
pub const QUIZ_OPTION_COUNT: usize = 4;

/// Substituted for a missing or non-string flashcard question.
pub const DEFAULT_QUESTION: &str = "Question not available";

/// Substituted for a missing or non-string flashcard answer.
pub const DEFAULT_ANSWER: &str = "Answer not available";

/// Replaces an unusable options list wholesale.
pub const PLACEHOLDER_OPTIONS: [&str; QUIZ_OPTION_COUNT] =
    ["Option A", "Option B", "Option C", "Option D"];

pub const FALLBACK_FLASHCARD_QUESTION: &str = "Error generating flashcards. Please try again.";
pub const FALLBACK_FLASHCARD_ANSWER: &str = "Click 'Generate' to retry with the content.";
pub const FALLBACK_QUIZ_QUESTION: &str = "Error generating quiz. Please try again.";
pub const FALLBACK_QUIZ_EXPLANATION: &str =
    "The model's response could not be parsed into quiz questions.";

/// One question/answer card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub question: String,
    pub answer: String,
}

impl Flashcard {
    /// The placeholder card returned when the model output is unusable.
    pub fn fallback() -> Self {
        Self {
            question: FALLBACK_FLASHCARD_QUESTION.to_string(),
            answer: FALLBACK_FLASHCARD_ANSWER.to_string(),
        }
    }
}

/// One multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    /// Always exactly [`QUIZ_OPTION_COUNT`] entries.
    pub options: Vec<String>,
    /// Index into `options`.
    pub correct_answer: usize,
    /// May be empty.
    pub explanation: String,
}

impl QuizQuestion {
    /// The placeholder question returned when the model output is unusable.
    pub fn fallback() -> Self {
        Self {
            question: FALLBACK_QUIZ_QUESTION.to_string(),
            options: placeholder_options(),
            correct_answer: 0,
            explanation: FALLBACK_QUIZ_EXPLANATION.to_string(),
        }
    }

    /// The correct option as a letter, `A` through `D`.
    pub fn correct_letter(&self) -> char {
        (b'A' + self.correct_answer.min(QUIZ_OPTION_COUNT - 1) as u8) as char
    }

    /// Text of the correct option.
    pub fn correct_option(&self) -> &str {
        self.options
            .get(self.correct_answer)
            .map(String::as_str)
            .unwrap_or_default()
    }
}

/// `["Option A", .., "Option D"]` as owned strings.
pub fn placeholder_options() -> Vec<String> {
    PLACEHOLDER_OPTIONS.iter().map(|s| s.to_string()).collect()
}

/// Result of one [`crate::generator::StudyGenerator::run`] call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "content", rename_all = "lowercase")]
pub enum GeneratedContent {
    Summary(String),
    Flashcards(Vec<Flashcard>),
    Quiz(Vec<QuizQuestion>),
}

impl GeneratedContent {
    /// Number of items (1 for a summary).
    pub fn len(&self) -> usize {
        match self {
            GeneratedContent::Summary(_) => 1,
            GeneratedContent::Flashcards(cards) => cards.len(),
            GeneratedContent::Quiz(questions) => questions.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            GeneratedContent::Summary(s) => s.is_empty(),
            _ => self.len() == 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiz_fallback_upholds_invariants() {
        let q = QuizQuestion::fallback();
        assert_eq!(q.options.len(), QUIZ_OPTION_COUNT);
        assert_eq!(q.correct_answer, 0);
        assert_eq!(q.correct_letter(), 'A');
        assert_eq!(q.correct_option(), "Option A");
    }

    #[test]
    fn correct_letter_maps_index() {
        let mut q = QuizQuestion::fallback();
        q.correct_answer = 2;
        assert_eq!(q.correct_letter(), 'C');
    }

    #[test]
    fn content_serialises_with_kind_tag() {
        let content = GeneratedContent::Flashcards(vec![Flashcard::fallback()]);
        let json = serde_json::to_value(&content).unwrap();
        assert_eq!(json["kind"], "flashcards");
        assert_eq!(json["content"][0]["answer"], FALLBACK_FLASHCARD_ANSWER);
    }
}
