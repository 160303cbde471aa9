use crate::ai::CompletionBackend;
use crate::ai_worker::spawn_evaluation;
use crate::config::Config;
use crate::error::EvalError;
use crate::host::{AnswerHook, Card, NoteKind, Reviewer};
use crate::logger::EvalLog;
use crate::models::{HookOutcome, ReviewContext, SkipReason};
use crate::rating::Ease;
use crate::ui::{FeedbackDialog, ReviewUi};
use std::path::PathBuf;
use std::sync::Arc;

pub const WARNING_TITLE: &str = "AI Evaluation Error";
pub const WARNING_MESSAGE: &str =
    "An error occurred in the AI evaluation add-on. Please check the log for details.";

/// Builds the grading input from the host's view of the review, or says why
/// this review should not be graded.
pub fn review_context(
    config: &Config,
    typed_answer: Option<&str>,
    card: &dyn Card,
) -> Result<ReviewContext, SkipReason> {
    let typed_answer = typed_answer.ok_or(SkipReason::NoTypedAnswer)?;

    let expected = card
        .note_field(&config.field_name)
        .ok_or_else(|| SkipReason::FieldMissing(config.field_name.clone()))?
        .trim();
    if expected.is_empty() {
        return Err(SkipReason::EmptyExpected);
    }

    if card.note_kind() == NoteKind::Cloze {
        return Err(SkipReason::Cloze);
    }

    Ok(ReviewContext {
        card_id: card.id(),
        expected: expected.to_string(),
        user_answer: typed_answer.trim().to_string(),
    })
}

/// The answered-card handler: grades the typed answer, lets the user confirm
/// a rating, and writes that rating back to the host.
pub struct AnswerEvaluator {
    config_path: PathBuf,
    log: EvalLog,
    backend: Arc<dyn CompletionBackend>,
}

impl AnswerEvaluator {
    pub fn new(config_path: PathBuf, log: EvalLog, backend: Arc<dyn CompletionBackend>) -> Self {
        log.log("Add-on loaded");
        Self {
            config_path,
            log,
            backend,
        }
    }

    pub fn log(&self) -> &EvalLog {
        &self.log
    }

    /// Runs the whole flow for one answered card. `ease` is only touched when
    /// the user confirmed a rating in the dialog.
    pub fn handle_answer(
        &self,
        ui: &mut dyn ReviewUi,
        reviewer: &dyn Reviewer,
        card: &dyn Card,
        ease: &mut Ease,
    ) -> HookOutcome {
        match self.evaluate(ui, reviewer, card) {
            Ok(Ok((suggested, chosen))) => {
                *ease = chosen;
                HookOutcome::Recorded { suggested, chosen }
            }
            Ok(Err(reason)) => {
                self.log.log(&reason.to_string());
                HookOutcome::Skipped(reason)
            }
            Err(e) => {
                self.log.log(&format!("Exception in answer hook: {}", e));
                let _ = ui.show_warning(WARNING_TITLE, WARNING_MESSAGE);
                HookOutcome::Failed(e.to_string())
            }
        }
    }

    /// Returns `(suggested, chosen)` once the user confirmed a rating, or
    /// why the review was not graded.
    fn evaluate(
        &self,
        ui: &mut dyn ReviewUi,
        reviewer: &dyn Reviewer,
        card: &dyn Card,
    ) -> Result<Result<(Ease, Ease), SkipReason>, EvalError> {
        if reviewer.typed_answer().is_none() {
            return Ok(Err(SkipReason::NoTypedAnswer));
        }

        let config = Config::load(&self.config_path)?;
        let context = match review_context(&config, reviewer.typed_answer(), card) {
            Ok(context) => context,
            Err(reason) => return Ok(Err(reason)),
        };
        self.log.log(&format!(
            "Answer event: expected='{}', user='{}'",
            context.expected, context.user_answer
        ));

        ui.show_loading()?;
        let mut handle = spawn_evaluation(
            self.backend.clone(),
            config,
            context.clone(),
            self.log.clone(),
        )?;
        let evaluation = loop {
            if let Some(evaluation) = handle.try_take()? {
                break evaluation;
            }
            ui.pump_events()?;
        };
        ui.close_loading()?;

        let suggested = evaluation.grade.suggested_ease();
        self.log.log(&format!(
            "Grade for card {}: score={:.2}, suggested {}",
            context.card_id, evaluation.grade.score, suggested
        ));

        let mut dialog = FeedbackDialog::new(&context, &evaluation);
        let chosen = ui.run_feedback_dialog(&mut dialog)?;
        self.log.log(&format!(
            "User confirmed ease: {} (AI suggested {})",
            chosen.ordinal(),
            suggested.ordinal()
        ));

        Ok(Ok((suggested, chosen)))
    }
}

impl AnswerHook for AnswerEvaluator {
    fn reviewer_did_answer_card(
        &self,
        ui: &mut dyn ReviewUi,
        reviewer: &dyn Reviewer,
        card: &dyn Card,
        ease: &mut Ease,
    ) {
        let _ = self.handle_answer(ui, reviewer, card, ease);
    }
}
