use crate::rating::Ease;
use std::fmt;

pub const NO_FEEDBACK: &str = "No feedback returned.";
pub const NO_MNEMONIC: &str = "No mnemonic available.";

/// Everything the grading calls need to know about the answered card.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewContext {
    pub card_id: i64,
    pub expected: String,
    pub user_answer: String,
}

/// Result of the grading call. `score` is always within `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct GradeResult {
    pub score: f64,
    pub feedback: String,
}

impl GradeResult {
    /// A failed grading: zero score with the failure as feedback.
    pub fn failed(feedback: impl Into<String>) -> Self {
        Self {
            score: 0.0,
            feedback: feedback.into(),
        }
    }

    pub fn suggested_ease(&self) -> Ease {
        Ease::from_score(self.score)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Mnemonic {
    Generated(String),
    Failed(String),
}

impl Mnemonic {
    /// Text worth showing as a mnemonic, if the call produced any.
    pub fn text(&self) -> Option<&str> {
        match self {
            Mnemonic::Generated(text) if !text.trim().is_empty() => Some(text),
            _ => None,
        }
    }
}

/// Both remote results, handed from the worker to the UI thread in one piece.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub grade: GradeResult,
    pub mnemonic: Mnemonic,
}

/// Why the answered-card flow stopped before grading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    NoTypedAnswer,
    FieldMissing(String),
    EmptyExpected,
    Cloze,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoTypedAnswer => {
                write!(f, "No typed answer available; skipping AI evaluation.")
            }
            SkipReason::FieldMissing(name) => {
                write!(f, "Field '{}' not found, skipping grading", name)
            }
            SkipReason::EmptyExpected => write!(f, "Expected field is empty, skipping grading"),
            SkipReason::Cloze => write!(f, "Cloze card detected, skipping AI evaluation."),
        }
    }
}

/// What the answered-card handler did with one review.
#[derive(Debug, Clone, PartialEq)]
pub enum HookOutcome {
    Skipped(SkipReason),
    Recorded { suggested: Ease, chosen: Ease },
    Failed(String),
}
