pub mod client;
pub mod grader;
#[cfg(test)]
pub mod mock;

// Public API exports
pub use client::{
    call_completion, ChatMessage, ChatRequest, CompletionBackend, OpenAiClient, OPENAI_CHAT_URL,
};
pub use grader::{evaluate_answer, generate_mnemonic, grade_answer, parse_grade};
