use crate::ai::client::{call_completion, ChatMessage, CompletionBackend};
use crate::config::Config;
use crate::models::{Evaluation, GradeResult, Mnemonic, ReviewContext, NO_FEEDBACK};
use serde_json::Value;

const GRADING_PROMPT: &str = "You are grading a flashcard answer. \
Compare the user's answer with the expected answer and return strict JSON: \
{\"score\": <0-1 float>, \"feedback\": <short comment>} \
Only JSON, no extra text.";

const MNEMONIC_PROMPT: &str = "You are a helpful assistant that creates short, \
memorable mnemonics for learning. Return only the mnemonic, no extra text.";

pub const MNEMONIC_TEMPERATURE: f64 = 0.2;

pub fn grading_messages(expected: &str, user_answer: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(GRADING_PROMPT),
        ChatMessage::user(format!("Expected: {}\nUser: {}", expected, user_answer)),
    ]
}

pub fn mnemonic_messages(expected: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(MNEMONIC_PROMPT),
        ChatMessage::user(format!("Create a mnemonic to remember: {}", expected)),
    ]
}

fn clean_json_response(response: &str) -> String {
    let mut cleaned = response.trim().to_string();

    if cleaned.starts_with("```") {
        let lines: Vec<&str> = cleaned.lines().collect();
        if lines.len() > 2 {
            cleaned = lines[1..lines.len() - 1].join("\n");
        }
    }

    if let Some(start) = cleaned.find('{')
        && let Some(end) = cleaned.rfind('}')
        && end > start
    {
        cleaned = cleaned[start..=end].to_string();
    }

    cleaned.trim().to_string()
}

fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 1.0)
    }
}

/// Parses the grading reply into a [`GradeResult`].
///
/// A missing score counts as zero and a missing feedback gets a placeholder.
/// Scores outside `[0, 1]` are clamped.
pub fn parse_grade(response: &str) -> Result<GradeResult, String> {
    let cleaned = clean_json_response(response);
    let value: Value = serde_json::from_str(&cleaned).map_err(|e| e.to_string())?;
    let object = value
        .as_object()
        .ok_or_else(|| format!("expected a JSON object, got {}", value))?;

    let score = match object.get("score") {
        None | Some(Value::Null) => 0.0,
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("score {:?} is not a number: {}", s, e))?,
        Some(other) => return Err(format!("score {} is not a number", other)),
    };

    let feedback = match object.get("feedback") {
        None | Some(Value::Null) => NO_FEEDBACK.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };

    Ok(GradeResult {
        score: clamp_score(score),
        feedback,
    })
}

/// Grades `user_answer` against `expected`. Never fails: call and parse
/// errors come back as a zero-score result with the error as feedback.
pub async fn grade_answer(
    backend: &dyn CompletionBackend,
    config: &Config,
    expected: &str,
    user_answer: &str,
) -> GradeResult {
    let reply = call_completion(
        backend,
        grading_messages(expected, user_answer),
        config.api_key(),
        &config.model,
        config.temperature,
    )
    .await;

    match reply {
        Ok(text) => parse_grade(&text)
            .unwrap_or_else(|e| GradeResult::failed(format!("Invalid JSON from API: {}", e))),
        Err(e) => GradeResult::failed(e.to_string()),
    }
}

pub async fn generate_mnemonic(
    backend: &dyn CompletionBackend,
    config: &Config,
    expected: &str,
) -> Mnemonic {
    let reply = call_completion(
        backend,
        mnemonic_messages(expected),
        config.api_key(),
        &config.model,
        MNEMONIC_TEMPERATURE,
    )
    .await;

    match reply {
        Ok(text) => Mnemonic::Generated(text),
        Err(e) => Mnemonic::Failed(e.to_string()),
    }
}

/// Grading first, then the mnemonic, bundled together.
pub async fn evaluate_answer(
    backend: &dyn CompletionBackend,
    config: &Config,
    context: &ReviewContext,
) -> Evaluation {
    let grade = grade_answer(backend, config, &context.expected, &context.user_answer).await;
    let mnemonic = generate_mnemonic(backend, config, &context.expected).await;
    Evaluation { grade, mnemonic }
}
