pub mod ai;
pub mod ai_worker;
pub mod config;
pub mod deck;
pub mod error;
pub mod hook;
pub mod host;
pub mod logger;
pub mod models;
pub mod rating;
pub mod session;
pub mod ui;
pub mod utils;


// Re-exports for convenience
pub use ai::{call_completion, CompletionBackend, OpenAiClient};
pub use config::{default_config_path, Config};
pub use error::{CompletionError, ConfigError, EvalError};
pub use hook::AnswerEvaluator;
pub use host::{AnswerHook, Card, HookRegistry, NoteKind, Reviewer};
pub use logger::EvalLog;
pub use models::{Evaluation, GradeResult, HookOutcome, Mnemonic, ReviewContext, SkipReason};
pub use rating::Ease;
pub use session::{AppState, ReviewAction, ReviewSession};
pub use ui::{ReviewUi, TerminalUi};
