//! Shared test utilities for integration tests

#![allow(dead_code)]

use react_runtime::error::LlmError;
use react_runtime::model::{Message, ModelClient};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Model stub that replays a fixed list of responses, then fails.
pub struct ScriptedModel {
    responses: Mutex<VecDeque<String>>,
    calls: AtomicUsize,
}

impl ScriptedModel {
    pub fn new(responses: &[&str]) -> Self {
        Self {
            responses: Mutex::new(responses.iter().map(|r| r.to_string()).collect()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ModelClient for ScriptedModel {
    fn think(&self, _messages: &[Message]) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or(LlmError::EmptyResponse)
    }
}

/// Model stub that always gives the same response.
pub struct RepeatingModel {
    response: String,
    calls: AtomicUsize,
}

impl RepeatingModel {
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ModelClient for RepeatingModel {
    fn think(&self, _messages: &[Message]) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.response.clone())
    }
}

/// Model stub that answers with whatever question appears in its prompt.
pub struct ParrotModel;

impl ModelClient for ParrotModel {
    fn think(&self, messages: &[Message]) -> Result<String, LlmError> {
        let prompt = &messages[0].content;
        let question = prompt
            .lines()
            .find_map(|line| line.strip_prefix("Question: "))
            .unwrap_or_default();
        Ok(format!("Thought: easy\nAction: Finish[{}]", question))
    }
}
