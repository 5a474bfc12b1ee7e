//! Task kinds and the per-call generation request.
//!
//! Each [`TaskKind`] carries its own resource bounds: how much source text
//! reaches the prompt, how many output tokens the model may spend, and how
//! many items may be requested. Keeping them on the enum means the prompt
//! builder, the client and the orchestrator all read the same numbers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

/// Items requested when the caller gives no (or an unparsable) count.
pub const DEFAULT_QUANTITY: u32 = 5;

/// What to generate from the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    Summary,
    Flashcards,
    Quiz,
}

impl TaskKind {
    /// Character budget for source text embedded in the prompt.
    pub fn input_budget(self) -> usize {
        match self {
            TaskKind::Summary => 4000,
            TaskKind::Flashcards => 3000,
            TaskKind::Quiz => 3000,
        }
    }

    /// Sampling temperature used unless the request overrides it.
    pub fn default_temperature(self) -> f32 {
        match self {
            TaskKind::Summary => 0.3,
            TaskKind::Flashcards => 0.5,
            TaskKind::Quiz => 0.4,
        }
    }

    /// Output-token bound sent as `num_predict`.
    pub fn max_output_tokens(self) -> u32 {
        match self {
            TaskKind::Summary => 1536,
            TaskKind::Flashcards => 2048,
            TaskKind::Quiz => 3072,
        }
    }

    /// Allowed item counts, or `None` for tasks without a quantity.
    pub fn quantity_bounds(self) -> Option<RangeInclusive<u32>> {
        match self {
            TaskKind::Summary => None,
            TaskKind::Flashcards => Some(1..=20),
            TaskKind::Quiz => Some(1..=15),
        }
    }

    /// Clamp a requested count into this task's bounds.
    pub fn clamp_quantity(self, requested: u32) -> Option<u32> {
        self.quantity_bounds()
            .map(|bounds| requested.clamp(*bounds.start(), *bounds.end()))
    }

    /// Whether the model must answer with a JSON array.
    pub fn is_structured(self) -> bool {
        !matches!(self, TaskKind::Summary)
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TaskKind::Summary => "summary",
            TaskKind::Flashcards => "flashcards",
            TaskKind::Quiz => "quiz",
        })
    }
}

/// Parse a user-supplied item count leniently.
///
/// Form fields and CLI flags arrive as strings; anything that is not a
/// number falls back to [`DEFAULT_QUANTITY`] before clamping. Returns `None`
/// for tasks without a quantity.
pub fn parse_quantity(raw: &str, task: TaskKind) -> Option<u32> {
    let requested = raw
        .trim()
        .parse::<i64>()
        .map(|n| n.clamp(0, u32::MAX as i64) as u32)
        .unwrap_or(DEFAULT_QUANTITY);
    task.clamp_quantity(requested)
}

/// One generation call, created fresh per request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub task: TaskKind,
    pub text: String,
    /// Requested item count; `None` for summaries.
    pub quantity: Option<u32>,
    pub temperature: f32,
}

impl GenerationRequest {
    pub fn summary(text: impl Into<String>) -> Self {
        Self::new(TaskKind::Summary, text, None)
    }

    pub fn flashcards(text: impl Into<String>, count: u32) -> Self {
        Self::new(TaskKind::Flashcards, text, Some(count))
    }

    pub fn quiz(text: impl Into<String>, count: u32) -> Self {
        Self::new(TaskKind::Quiz, text, Some(count))
    }

    fn new(task: TaskKind, text: impl Into<String>, quantity: Option<u32>) -> Self {
        Self {
            task,
            text: text.into(),
            quantity,
            temperature: task.default_temperature(),
        }
    }

    pub fn with_temperature(mut self, t: f32) -> Self {
        self.temperature = t.clamp(0.0, 2.0);
        self
    }

    /// The quantity after clamping; summaries stay `None`.
    pub fn clamped_quantity(&self) -> Option<u32> {
        self.task
            .clamp_quantity(self.quantity.unwrap_or(DEFAULT_QUANTITY))
    }
}
