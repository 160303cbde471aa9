use crate::ai::{evaluate_answer, CompletionBackend};
use crate::config::Config;
use crate::error::EvalError;
use crate::logger::EvalLog;
use crate::models::{Evaluation, GradeResult, Mnemonic, ReviewContext};
use std::io;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;

/// A running evaluation. The worker sends exactly one [`Evaluation`].
pub struct EvaluationHandle {
    rx: Receiver<Evaluation>,
    thread: Option<thread::JoinHandle<()>>,
}

impl EvaluationHandle {
    /// Non-blocking check for the worker's result.
    pub fn try_take(&mut self) -> Result<Option<Evaluation>, EvalError> {
        match self.rx.try_recv() {
            Ok(evaluation) => {
                if let Some(thread) = self.thread.take() {
                    let _ = thread.join();
                }
                Ok(Some(evaluation))
            }
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(EvalError::WorkerDisconnected),
        }
    }
}

pub fn spawn_evaluation(
    backend: Arc<dyn CompletionBackend>,
    config: Config,
    context: ReviewContext,
    log: EvalLog,
) -> io::Result<EvaluationHandle> {
    let (tx, rx) = mpsc::channel();

    let thread = thread::Builder::new()
        .name("answer-eval::ai_worker".to_string())
        .spawn(move || {
            log.log(&format!("Worker started for card {}", context.card_id));

            let evaluation = match tokio::runtime::Runtime::new() {
                Ok(rt) => rt.block_on(evaluate_answer(backend.as_ref(), &config, &context)),
                Err(e) => {
                    let error = format!("Failed to start AI runtime: {}", e);
                    Evaluation {
                        grade: GradeResult::failed(error.clone()),
                        mnemonic: Mnemonic::Failed(error),
                    }
                }
            };

            log.log("Worker sending evaluation");
            let _ = tx.send(evaluation);
        })?;

    Ok(EvaluationHandle {
        rx,
        thread: Some(thread),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::mock::ScriptedBackend;
    use std::time::{Duration, Instant};

    fn context() -> ReviewContext {
        ReviewContext {
            card_id: 1,
            expected: "Paris".to_string(),
            user_answer: "paris".to_string(),
        }
    }

    fn wait(handle: &mut EvaluationHandle) -> Evaluation {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(evaluation) = handle.try_take().unwrap() {
                return evaluation;
            }
            assert!(Instant::now() < deadline, "worker never reported");
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_worker_emits_bundled_result_once() {
        let dir = tempfile::tempdir().unwrap();
        let backend = Arc::new(
            ScriptedBackend::new(vec![
                Ok(r#"{"score": 0.92, "feedback": "Right."}"#.to_string()),
                Ok("Paris, the city of light".to_string()),
            ])
            .with_delay(Duration::from_millis(20)),
        );
        let config = Config {
            openai_api_key: "sk-test".to_string(),
            ..Config::default()
        };

        let mut handle = spawn_evaluation(
            backend.clone(),
            config,
            context(),
            EvalLog::new(dir.path().join("eval.log")),
        )
        .unwrap();

        let evaluation = wait(&mut handle);
        assert_eq!(evaluation.grade.score, 0.92);
        assert_eq!(
            evaluation.mnemonic,
            Mnemonic::Generated("Paris, the city of light".to_string())
        );
        assert_eq!(backend.call_count(), 2);

        // The channel is drained and the worker is gone.
        assert!(matches!(
            handle.try_take(),
            Err(EvalError::WorkerDisconnected)
        ));
    }

    #[test]
    fn test_worker_reports_errors_in_band() {
        let dir = tempfile::tempdir().unwrap();
        let backend = Arc::new(ScriptedBackend::new(vec![]));

        let mut handle = spawn_evaluation(
            backend.clone(),
            Config::default(),
            context(),
            EvalLog::new(dir.path().join("eval.log")),
        )
        .unwrap();

        let evaluation = wait(&mut handle);
        assert_eq!(evaluation.grade.score, 0.0);
        assert_eq!(evaluation.grade.feedback, "No OpenAI API key configured.");
        assert_eq!(
            evaluation.mnemonic,
            Mnemonic::Failed("No OpenAI API key configured.".to_string())
        );
        assert_eq!(backend.call_count(), 0);
    }
}
