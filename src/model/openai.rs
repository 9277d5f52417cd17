// src/model/openai.rs

use crate::config::LlmConfig;
use crate::error::LlmError;
use crate::model::{Message, ModelClient};
use serde::Deserialize;
use serde_json::json;
use std::io::{BufRead, BufReader};
use tracing::{debug, info};

/// Streaming client for an OpenAI-compatible `/chat/completions` endpoint.
pub struct OpenAiClient {
    config: LlmConfig,
    client: reqwest::blocking::Client,
}

impl OpenAiClient {
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        let mut builder = reqwest::blocking::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            config,
            client: builder.build()?,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }
}

impl ModelClient for OpenAiClient {
    fn think(&self, messages: &[Message]) -> Result<String, LlmError> {
        info!(model = %self.config.model, "calling model");

        let payload = json!({
            "model": self.config.model,
            "messages": messages,
            "temperature": self.config.temperature,
            "stream": true,
        });

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(LlmError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = collect_stream(BufReader::new(response))?;
        debug!(chars = text.len(), "model response complete");
        Ok(text)
    }
}

#[derive(Deserialize)]
struct ChunkResponse {
    #[serde(default)]
    choices: Vec<ChunkChoice>,
}

#[derive(Deserialize)]
struct ChunkChoice {
    #[serde(default)]
    delta: ChunkDelta,
}

#[derive(Default, Deserialize)]
struct ChunkDelta {
    #[serde(default)]
    content: Option<String>,
}

/// Reads a server-sent-events body to the end and concatenates every
/// content delta.
pub fn collect_stream<R: BufRead>(reader: R) -> Result<String, LlmError> {
    let mut text = String::new();

    for line in reader.lines() {
        let line = line.map_err(|e| LlmError::Decode(e.to_string()))?;
        let Some(data) = line.trim().strip_prefix("data:") else {
            continue;
        };
        let data = data.trim();
        if data == "[DONE]" {
            break;
        }
        if data.is_empty() {
            continue;
        }

        let chunk: ChunkResponse =
            serde_json::from_str(data).map_err(|e| LlmError::Decode(e.to_string()))?;
        if let Some(content) = chunk
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.delta.content)
        {
            text.push_str(&content);
        }
    }

    if text.trim().is_empty() {
        return Err(LlmError::EmptyResponse);
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_collect_stream_concatenates_all_chunks() {
        let body = "data: {\"choices\":[{\"delta\":{\"role\":\"assistant\"}}]}\n\n\
                    data: {\"choices\":[{\"delta\":{\"content\":\"Thought: \"}}]}\n\n\
                    : keep-alive\n\n\
                    data: {\"choices\":[{\"delta\":{\"content\":\"done\\nAction: Finish[1]\"}}]}\n\n\
                    data: [DONE]\n\n";
        let text = collect_stream(Cursor::new(body)).unwrap();
        assert_eq!(text, "Thought: done\nAction: Finish[1]");
    }

    #[test]
    fn test_collect_stream_stops_at_done() {
        let body = "data: {\"choices\":[{\"delta\":{\"content\":\"a\"}}]}\n\
                    data: [DONE]\n\
                    data: {\"choices\":[{\"delta\":{\"content\":\"b\"}}]}\n";
        assert_eq!(collect_stream(Cursor::new(body)).unwrap(), "a");
    }

    #[test]
    fn test_collect_stream_empty() {
        let body = "data: {\"choices\":[]}\n\ndata: [DONE]\n";
        assert!(matches!(
            collect_stream(Cursor::new(body)),
            Err(LlmError::EmptyResponse)
        ));
    }

    #[test]
    fn test_collect_stream_bad_json() {
        let body = "data: {not json}\n";
        assert!(matches!(
            collect_stream(Cursor::new(body)),
            Err(LlmError::Decode(_))
        ));
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let client = OpenAiClient::new(LlmConfig {
            model: "m".into(),
            api_key: "k".into(),
            base_url: "https://api.example.com/v1/".into(),
            timeout: None,
            temperature: 0.0,
        })
        .unwrap();
        assert_eq!(client.endpoint(), "https://api.example.com/v1/chat/completions");
    }
}
