// src/model/mod.rs

use crate::error::LlmError;
use serde::{Deserialize, Serialize};

pub mod openai;
pub use openai::OpenAiClient;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: &str) -> Self {
        Self {
            role: Role::User,
            content: content.to_string(),
        }
    }
}

/// A language model the agent can think with.
///
/// Implementations return the complete generated text. Retries, if any,
/// happen inside the implementation.
pub trait ModelClient: Send + Sync {
    fn think(&self, messages: &[Message]) -> Result<String, LlmError>;
}

impl<M: ModelClient + ?Sized> ModelClient for Box<M> {
    fn think(&self, messages: &[Message]) -> Result<String, LlmError> {
        (**self).think(messages)
    }
}

impl<M: ModelClient + ?Sized> ModelClient for std::sync::Arc<M> {
    fn think(&self, messages: &[Message]) -> Result<String, LlmError> {
        (**self).think(messages)
    }
}
