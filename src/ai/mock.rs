use crate::ai::client::{ChatRequest, CompletionBackend};
use crate::error::CompletionError;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

/// Backend that replays canned replies in order and records what it was sent.
pub struct ScriptedBackend {
    replies: Mutex<VecDeque<Result<String, CompletionError>>>,
    requests: Mutex<Vec<ChatRequest>>,
    api_keys: Mutex<Vec<String>>,
    delay: Duration,
}

impl ScriptedBackend {
    pub fn new(replies: Vec<Result<String, CompletionError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
            api_keys: Mutex::new(Vec::new()),
            delay: Duration::ZERO,
        }
    }

    /// Simulate network latency on every call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn api_keys(&self) -> Vec<String> {
        self.api_keys.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionBackend for ScriptedBackend {
    async fn send(&self, request: &ChatRequest, api_key: &str) -> Result<String, CompletionError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.requests.lock().unwrap().push(request.clone());
        self.api_keys.lock().unwrap().push(api_key.to_string());
        let reply = self.replies.lock().unwrap().pop_front();
        reply.unwrap_or_else(|| Err(CompletionError::Request("no scripted reply left".to_string())))
    }
}
