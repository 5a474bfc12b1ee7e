//! Response parsing: turn raw model text into validated flashcards and quiz
//! questions.
//!
//! ## Why is this module so forgiving?
//!
//! The prompt asks for a bare JSON array, but local models routinely wrap it
//! in prose or ` ```json ` fences, leave trailing commas, emit raw control
//! characters, over-escape quotes, or put the wrong type in a field. Parsing
//! imperfect model output is a routine event here, not an exceptional one,
//! so the public entry points never fail: an unusable response becomes a
//! single fixed fallback record the UI can display.
//!
//! ## Stages
//!
//! 1. Locate the first `[` and the last `]`
//! 2. Parse the span as JSON; only when that fails, repair it (rules below,
//!    applied in order) and parse again
//! 3. The result must be a non-empty array
//! 4. Truncate to the expected count (never pad)
//! 5. Coerce every element field-by-field, substituting named defaults
//! 6. An empty result after coercion is treated like a parse failure
//!
//! The `try_parse_*` variants expose the [`ParseDefect`] for diagnostics;
//! [`parse_flashcards`] and [`parse_quiz`] absorb it into the fallback.

use crate::output::{
    placeholder_options, Flashcard, QuizQuestion, DEFAULT_ANSWER, DEFAULT_QUESTION,
    QUIZ_OPTION_COUNT,
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

/// Why a response could not be turned into records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseDefect {
    #[error("no '[' ... ']' span in response")]
    NoArray,

    #[error("repaired JSON still invalid: {0}")]
    InvalidJson(String),

    #[error("JSON value is not an array")]
    NotAnArray,

    #[error("JSON array is empty")]
    EmptyArray,

    #[error("no array element could be coerced into a record")]
    NoUsableElements,
}

/// Parse flashcards, falling back to [`Flashcard::fallback`] on any defect.
pub fn parse_flashcards(raw: &str, expected_count: usize) -> Vec<Flashcard> {
    try_parse_flashcards(raw, expected_count).unwrap_or_else(|defect| {
        warn!("Flashcard response unusable ({defect}); returning fallback card");
        debug!("Unusable flashcard response: {}", preview(raw));
        vec![Flashcard::fallback()]
    })
}

/// Parse quiz questions, falling back to [`QuizQuestion::fallback`] on any defect.
pub fn parse_quiz(raw: &str, expected_count: usize) -> Vec<QuizQuestion> {
    try_parse_quiz(raw, expected_count).unwrap_or_else(|defect| {
        warn!("Quiz response unusable ({defect}); returning fallback question");
        debug!("Unusable quiz response: {}", preview(raw));
        vec![QuizQuestion::fallback()]
    })
}

pub fn try_parse_flashcards(
    raw: &str,
    expected_count: usize,
) -> Result<Vec<Flashcard>, ParseDefect> {
    let cards: Vec<Flashcard> = extract_elements(raw, expected_count)?
        .into_iter()
        .filter_map(coerce_flashcard)
        .collect();
    if cards.is_empty() {
        return Err(ParseDefect::NoUsableElements);
    }
    debug!("Parsed {} flashcards", cards.len());
    Ok(cards)
}

pub fn try_parse_quiz(raw: &str, expected_count: usize) -> Result<Vec<QuizQuestion>, ParseDefect> {
    let questions: Vec<QuizQuestion> = extract_elements(raw, expected_count)?
        .into_iter()
        .filter_map(coerce_quiz_question)
        .collect();
    if questions.is_empty() {
        return Err(ParseDefect::NoUsableElements);
    }
    debug!("Parsed {} quiz questions", questions.len());
    Ok(questions)
}

/// Stages 1–4: locate, repair, parse and truncate.
fn extract_elements(raw: &str, expected_count: usize) -> Result<Vec<Value>, ParseDefect> {
    let (start, end) = match (raw.find('['), raw.rfind(']')) {
        (Some(start), Some(end)) if start < end => (start, end),
        _ => return Err(ParseDefect::NoArray),
    };

    let slice = &raw[start..=end];
    let value: Value = match serde_json::from_str(slice) {
        Ok(value) => value,
        Err(_) => {
            let candidate = repair(slice);
            serde_json::from_str(&candidate)
                .map_err(|e| ParseDefect::InvalidJson(e.to_string()))?
        }
    };

    let mut elements = match value {
        Value::Array(items) if items.is_empty() => return Err(ParseDefect::EmptyArray),
        Value::Array(items) => items,
        _ => return Err(ParseDefect::NotAnArray),
    };

    let limit = expected_count.max(1);
    if elements.len() > limit {
        debug!("Model returned {} items, keeping {}", elements.len(), limit);
        elements.truncate(limit);
    }
    Ok(elements)
}

// ── Repair rules ─────────────────────────────────────────────────────────────
//
// Only applied when the located span is not already valid JSON. Order
// matters: fences go first, quotes are normalised before any rule that
// tracks string literals, and line breaks inside strings are escaped last.

fn repair(candidate: &str) -> String {
    let s = strip_code_fences(candidate);
    let s = strip_control_chars(&s);
    let s = normalise_escaped_quotes(&s);
    let s = remove_trailing_commas(&s);
    escape_whitespace_in_strings(&s)
}

// ── Rule 1: Strip markdown code-fence markers ────────────────────────────────

static RE_FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"```[A-Za-z]*").unwrap());

fn strip_code_fences(input: &str) -> String {
    RE_FENCE.replace_all(input, "").to_string()
}

// ── Rule 2: Strip raw control characters (keep \n, \r, \t) ───────────────────

fn strip_control_chars(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_control() || matches!(c, '\n' | '\r' | '\t'))
        .collect()
}

// ── Rule 3: Normalise over-escaped quotes ────────────────────────────────────
//
// Two shapes show up in practice: `\\"` where `\"` was meant, and an entire
// payload escaped as if it were embedded in a string (`[{\"question\": ...}]`).
// The second is only unescaped when the candidate holds no bare quote at all.

fn normalise_escaped_quotes(input: &str) -> String {
    let s = input.replace(r#"\\""#, r#"\""#);
    if s.contains(r#"\""#) && !has_bare_quote(&s) {
        s.replace(r#"\""#, "\"")
    } else {
        s
    }
}

fn has_bare_quote(input: &str) -> bool {
    let mut prev = '\0';
    for c in input.chars() {
        if c == '"' && prev != '\\' {
            return true;
        }
        prev = c;
    }
    false
}

// ── Rule 4: Remove trailing commas before `]` / `}` ──────────────────────────

// Commas inside string literals are text, so this rule tracks string state
// instead of matching on the raw candidate.

fn remove_trailing_commas(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    let mut in_string = false;
    let mut escaped = false;

    for (i, &c) in chars.iter().enumerate() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
        } else if c == '"' {
            in_string = true;
        } else if c == ',' {
            let next = chars[i + 1..].iter().find(|n| !n.is_whitespace());
            if matches!(next, Some(']') | Some('}')) {
                continue;
            }
        }
        out.push(c);
    }
    out
}

// ── Rule 5: Escape raw line breaks and tabs inside string literals ───────────
//
// Models like to put multi-line answers inside JSON strings without escaping
// them, which serde_json rejects. Whitespace between tokens is left alone.

fn escape_whitespace_in_strings(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_string = false;
    let mut escaped = false;

    for c in input.chars() {
        if in_string {
            match c {
                _ if escaped => {
                    escaped = false;
                    out.push(c);
                }
                '\\' => {
                    escaped = true;
                    out.push(c);
                }
                '"' => {
                    in_string = false;
                    out.push(c);
                }
                '\n' => out.push_str("\\n"),
                '\r' => {}
                '\t' => out.push_str("\\t"),
                _ => out.push(c),
            }
        } else {
            if c == '"' {
                in_string = true;
            }
            out.push(c);
        }
    }
    out
}

// ── Element coercion ─────────────────────────────────────────────────────────

fn coerce_flashcard(value: Value) -> Option<Flashcard> {
    match value {
        Value::Object(obj) => Some(Flashcard {
            question: string_field(&obj, "question").unwrap_or_else(|| DEFAULT_QUESTION.into()),
            answer: string_field(&obj, "answer").unwrap_or_else(|| DEFAULT_ANSWER.into()),
        }),
        Value::String(text) if !text.trim().is_empty() => Some(Flashcard {
            question: text.trim().to_string(),
            answer: DEFAULT_ANSWER.to_string(),
        }),
        other => {
            debug!("Dropping flashcard element: {}", type_name(&other));
            None
        }
    }
}

fn coerce_quiz_question(value: Value) -> Option<QuizQuestion> {
    let obj = match value {
        Value::Object(obj) => obj,
        other => {
            debug!("Dropping quiz element: {}", type_name(&other));
            return None;
        }
    };

    let question = obj
        .get("question")
        .and_then(stringify)
        .unwrap_or_else(|| DEFAULT_QUESTION.to_string());
    let options = coerce_options(obj.get("options"));
    let last = options.len() as i64 - 1;
    let correct_answer = answer_index(obj.get("correct_answer")).clamp(0, last) as usize;
    let explanation = obj.get("explanation").and_then(stringify).unwrap_or_default();

    Some(QuizQuestion {
        question,
        options,
        correct_answer,
        explanation,
    })
}

/// A string field that is present, a string, and not blank.
fn string_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Render any non-null, non-blank value as text.
fn stringify(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

/// Exactly [`QUIZ_OPTION_COUNT`] options.
///
/// Fewer than two usable entries means the model ignored the format, so the
/// list is replaced wholesale; otherwise it is cut to four and padded with
/// numbered placeholders.
fn coerce_options(value: Option<&Value>) -> Vec<String> {
    let items = match value {
        Some(Value::Array(items)) if items.len() >= 2 => items,
        _ => return placeholder_options(),
    };

    let mut options: Vec<String> = items
        .iter()
        .take(QUIZ_OPTION_COUNT)
        .enumerate()
        .map(|(i, v)| stringify(v).unwrap_or_else(|| format!("Option {}", i + 1)))
        .collect();
    while options.len() < QUIZ_OPTION_COUNT {
        options.push(format!("Option {}", options.len() + 1));
    }
    options
}

/// Raw (unclamped) answer index: a letter A–D, an integer, or a numeric string.
fn answer_index(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .unwrap_or(0),
        Some(Value::String(s)) => {
            let s = s.trim();
            letter_index(s)
                .or_else(|| s.parse::<i64>().ok())
                .or_else(|| s.parse::<f64>().ok().map(|f| f.trunc() as i64))
                .unwrap_or(0)
        }
        _ => 0,
    }
}

fn letter_index(s: &str) -> Option<i64> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => match c.to_ascii_uppercase() {
            upper @ 'A'..='D' => Some((upper as u8 - b'A') as i64),
            _ => None,
        },
        _ => None,
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn preview(raw: &str) -> String {
    const MAX: usize = 200;
    match raw.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{:?}…", &raw[..cut]),
        None => format!("{raw:?}"),
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::{
        FALLBACK_FLASHCARD_ANSWER, FALLBACK_FLASHCARD_QUESTION, FALLBACK_QUIZ_QUESTION,
    };

    const TWO_CARDS: &str = r#"[
        {"question": "What is ATP?", "answer": "The cell's energy currency."},
        {"question": "Where is DNA stored?", "answer": "In the nucleus."}
    ]"#;

    fn quiz_with_answer(answer: &str) -> String {
        format!(
            r#"[{{"question": "Q?", "options": ["a", "b", "c", "d"], "correct_answer": {answer}, "explanation": "because"}}]"#
        )
    }

    fn single_answer(raw: &str) -> usize {
        let questions = try_parse_quiz(raw, 5).expect("should parse");
        assert_eq!(questions.len(), 1);
        questions[0].correct_answer
    }

    // ── Repair rules ─────────────────────────────────────────────────────

    #[test]
    fn test_strip_fences() {
        assert_eq!(strip_code_fences("```json\n[1]\n```"), "\n[1]\n");
    }

    #[test]
    fn test_remove_trailing_commas() {
        assert_eq!(remove_trailing_commas(r#"[{"a": 1,}, ]"#), r#"[{"a": 1} ]"#);
        assert_eq!(remove_trailing_commas("[1,\n  2,\n]"), "[1,\n  2\n]");
    }

    #[test]
    fn test_trailing_comma_rule_skips_string_literals() {
        let input = r#"[{"answer": "a, b, ]", "note": "x,}"},]"#;
        assert_eq!(
            remove_trailing_commas(input),
            r#"[{"answer": "a, b, ]", "note": "x,}"}]"#
        );
    }

    #[test]
    fn test_strip_control_chars_keeps_whitespace() {
        assert_eq!(strip_control_chars("a\u{0}b\u{7}c\n\td"), "abc\n\td");
    }

    #[test]
    fn test_normalise_double_escaped_quote() {
        assert_eq!(normalise_escaped_quotes(r#""say \\"hi\\"""#), r#""say \"hi\"""#);
    }

    #[test]
    fn test_normalise_fully_escaped_payload() {
        assert_eq!(
            normalise_escaped_quotes(r#"[{\"question\": \"Q\"}]"#),
            r#"[{"question": "Q"}]"#
        );
    }

    #[test]
    fn test_legit_escapes_untouched() {
        let input = r#"[{"question": "say \"hi\""}]"#;
        assert_eq!(normalise_escaped_quotes(input), input);
    }

    #[test]
    fn test_escape_whitespace_only_inside_strings() {
        let input = "[\n  {\"answer\": \"line one\nline two\"}\n]";
        assert_eq!(
            escape_whitespace_in_strings(input),
            "[\n  {\"answer\": \"line one\\nline two\"}\n]"
        );
    }

    // ── Flashcards ───────────────────────────────────────────────────────

    #[test]
    fn test_clean_flashcards() {
        let cards = parse_flashcards(TWO_CARDS, 5);
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].question, "What is ATP?");
        assert_eq!(cards[1].answer, "In the nucleus.");
    }

    #[test]
    fn test_flashcards_in_fenced_prose() {
        let raw = format!("Sure! Here are your flashcards:\n```json\n{TWO_CARDS}\n```\nGood luck!");
        assert_eq!(parse_flashcards(&raw, 5), parse_flashcards(TWO_CARDS, 5));
    }

    #[test]
    fn test_flashcards_with_trailing_commas() {
        let raw = r#"[{"question": "Q1", "answer": "A1",}, {"question": "Q2", "answer": "A2"},]"#;
        let cards = parse_flashcards(raw, 5);
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[1].question, "Q2");
    }

    #[test]
    fn test_valid_json_is_not_repaired() {
        let raw = r#"[{"question": "Windows dir?", "answer": "C:\\Windows\\"}]"#;
        let cards = try_parse_flashcards(raw, 5).unwrap();
        assert_eq!(cards[0].answer, "C:\\Windows\\");

        let raw = r#"[{"question": "LaTeX line break?", "answer": "a \\\\"}]"#;
        assert_eq!(try_parse_flashcards(raw, 5).unwrap()[0].answer, "a \\\\");

        let raw = r#"[{"question": "List", "answer": "a, b, ]"}]"#;
        assert_eq!(try_parse_flashcards(raw, 5).unwrap()[0].answer, "a, b, ]");
    }

    #[test]
    fn test_repair_keeps_commas_inside_strings() {
        let raw = "```json\n[{\"question\": \"List\", \"answer\": \"a, b, ]\"},]\n```";
        let cards = try_parse_flashcards(raw, 5).unwrap();
        assert_eq!(cards[0].answer, "a, b, ]");
    }

    #[test]
    fn test_flashcards_truncated_to_expected() {
        let cards = parse_flashcards(TWO_CARDS, 1);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].question, "What is ATP?");
    }

    #[test]
    fn test_fewer_flashcards_not_padded() {
        assert_eq!(parse_flashcards(TWO_CARDS, 10).len(), 2);
    }

    #[test]
    fn test_flashcard_multiline_answer() {
        let raw = "[{\"question\": \"List two organelles\", \"answer\": \"Nucleus\nMitochondria\"}]";
        let cards = parse_flashcards(raw, 5);
        assert_eq!(cards[0].answer, "Nucleus\nMitochondria");
    }

    #[test]
    fn test_flashcard_defaults_for_bad_fields() {
        let raw = r#"[{"question": 42}, {"answer": "only an answer"}, {"question": "  ", "answer": null}]"#;
        let cards = parse_flashcards(raw, 5);
        assert_eq!(cards.len(), 3);
        assert_eq!(cards[0].question, DEFAULT_QUESTION);
        assert_eq!(cards[0].answer, DEFAULT_ANSWER);
        assert_eq!(cards[1].question, DEFAULT_QUESTION);
        assert_eq!(cards[1].answer, "only an answer");
        assert_eq!(cards[2].question, DEFAULT_QUESTION);
        assert!(cards.iter().all(|c| !c.question.is_empty() && !c.answer.is_empty()));
    }

    #[test]
    fn test_bare_string_flashcard() {
        let cards = parse_flashcards(r#"["What is osmosis?"]"#, 5);
        assert_eq!(cards[0].question, "What is osmosis?");
        assert_eq!(cards[0].answer, DEFAULT_ANSWER);
    }

    #[test]
    fn test_flashcard_fallback_cases() {
        let fallback = vec![Flashcard::fallback()];
        for raw in [
            "",
            "I cannot help with that.",
            "] backwards [",
            r#"[{"question": "cut off", "answer"#,
            r#"[{"question": }]"#,
            "[]",
            "[1, null, true]",
        ] {
            assert_eq!(parse_flashcards(raw, 5), fallback, "input: {raw:?}");
        }
        assert_eq!(fallback[0].question, FALLBACK_FLASHCARD_QUESTION);
        assert_eq!(fallback[0].answer, FALLBACK_FLASHCARD_ANSWER);
    }

    #[test]
    fn test_defects_are_reported() {
        assert_eq!(try_parse_flashcards("no json", 5), Err(ParseDefect::NoArray));
        assert_eq!(try_parse_flashcards("[]", 5), Err(ParseDefect::EmptyArray));
        assert_eq!(
            try_parse_flashcards("[null]", 5),
            Err(ParseDefect::NoUsableElements)
        );
        assert!(matches!(
            try_parse_flashcards("[oops]", 5),
            Err(ParseDefect::InvalidJson(_))
        ));
    }

    #[test]
    fn test_parse_is_idempotent() {
        let raw = format!("```json\n{TWO_CARDS}\n```");
        assert_eq!(parse_flashcards(&raw, 3), parse_flashcards(&raw, 3));
        assert_eq!(parse_quiz("garbage", 3), parse_quiz("garbage", 3));
    }

    // ── Quiz ─────────────────────────────────────────────────────────────

    #[test]
    fn test_clean_quiz() {
        let questions = parse_quiz(&quiz_with_answer("1"), 5);
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].question, "Q?");
        assert_eq!(questions[0].options, vec!["a", "b", "c", "d"]);
        assert_eq!(questions[0].correct_answer, 1);
        assert_eq!(questions[0].explanation, "because");
    }

    #[test]
    fn test_letter_answers() {
        assert_eq!(single_answer(&quiz_with_answer(r#""C""#)), 2);
        assert_eq!(single_answer(&quiz_with_answer(r#""b""#)), 1);
        assert_eq!(single_answer(&quiz_with_answer(r#"" D ""#)), 3);
    }

    #[test]
    fn test_out_of_range_answers_clamped() {
        assert_eq!(single_answer(&quiz_with_answer(r#""7""#)), 3);
        assert_eq!(single_answer(&quiz_with_answer("12")), 3);
        assert_eq!(single_answer(&quiz_with_answer("-2")), 0);
        assert_eq!(single_answer(&quiz_with_answer("2.9")), 2);
        assert_eq!(single_answer(&quiz_with_answer(r#""E""#)), 0);
        assert_eq!(single_answer(&quiz_with_answer(r#""second""#)), 0);
        assert_eq!(single_answer(&quiz_with_answer("null")), 0);
        assert_eq!(single_answer(&quiz_with_answer("true")), 0);
    }

    #[test]
    fn test_every_answer_shape_stays_in_bounds() {
        let answers = [
            "0", "3", "4", "99", "-1", "1e9", "\"A\"", "\"d\"", "\"x\"", "\"\"", "\"-5\"",
            "\"3.5\"", "[1]", "{}", "null", "false",
        ];
        for answer in answers {
            let questions = parse_quiz(&quiz_with_answer(answer), 5);
            for q in &questions {
                assert_eq!(q.options.len(), QUIZ_OPTION_COUNT, "answer {answer}");
                assert!(q.correct_answer < QUIZ_OPTION_COUNT, "answer {answer}");
            }
        }
    }

    #[test]
    fn test_options_padded_and_truncated() {
        let raw = r#"[
            {"question": "Two", "options": ["yes", "no"], "correct_answer": 1},
            {"question": "Six", "options": ["1", "2", "3", "4", "5", "6"], "correct_answer": 5},
            {"question": "Mixed", "options": [1, true, null], "correct_answer": 0}
        ]"#;
        let q = parse_quiz(raw, 5);
        assert_eq!(q[0].options, vec!["yes", "no", "Option 3", "Option 4"]);
        assert_eq!(q[0].correct_answer, 1);
        assert_eq!(q[1].options, vec!["1", "2", "3", "4"]);
        assert_eq!(q[1].correct_answer, 3);
        assert_eq!(q[2].options, vec!["1", "true", "Option 3", "Option 4"]);
    }

    #[test]
    fn test_unusable_options_replaced() {
        let raw = r#"[
            {"question": "One", "options": ["only"]},
            {"question": "Text", "options": "A, B, C, D"},
            {"question": "Missing"}
        ]"#;
        for q in parse_quiz(raw, 5) {
            assert_eq!(q.options, placeholder_options());
            assert_eq!(q.correct_answer, 0);
            assert_eq!(q.explanation, "");
        }
    }

    #[test]
    fn test_quiz_question_stringified() {
        let raw = r#"[{"question": 1024, "options": ["a", "b", "c", "d"], "explanation": 7}]"#;
        let q = parse_quiz(raw, 5);
        assert_eq!(q[0].question, "1024");
        assert_eq!(q[0].explanation, "7");

        let q = parse_quiz(r#"[{"options": ["a", "b"]}]"#, 5);
        assert_eq!(q[0].question, DEFAULT_QUESTION);
    }

    #[test]
    fn test_quiz_fallback() {
        for raw in ["Here is your quiz!", "[]", r#"["just a string"]"#, "[{\"question\": "] {
            let q = parse_quiz(raw, 5);
            assert_eq!(q, vec![QuizQuestion::fallback()], "input: {raw:?}");
            assert_eq!(q[0].question, FALLBACK_QUIZ_QUESTION);
            assert_eq!(q[0].options, placeholder_options());
        }
    }

    #[test]
    fn test_quiz_truncated_to_expected() {
        let raw = format!(
            "[{}, {}, {}]",
            r#"{"question": "1", "options": ["a","b","c","d"], "correct_answer": 0}"#,
            r#"{"question": "2", "options": ["a","b","c","d"], "correct_answer": 1}"#,
            r#"{"question": "3", "options": ["a","b","c","d"], "correct_answer": 2}"#,
        );
        let q = parse_quiz(&raw, 2);
        assert_eq!(q.len(), 2);
        assert_eq!(q[1].question, "2");
    }

    #[test]
    fn test_quiz_escaped_payload_with_prose() {
        let raw = r#"Output: [{\"question\": \"Q\", \"options\": [\"w\", \"x\", \"y\", \"z\"], \"correct_answer\": \"B\"}]"#;
        let q = parse_quiz(raw, 5);
        assert_eq!(q[0].question, "Q");
        assert_eq!(q[0].correct_answer, 1);
    }
}
