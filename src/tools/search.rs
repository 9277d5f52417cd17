// src/tools/search.rs

use crate::tools::{Tool, ToolResult};
use serde_json::Value;
use std::time::Duration;
use tracing::info;

const SERPAPI_URL: &str = "https://serpapi.com/search.json";

pub const DEFAULT_SEARCH_TIMEOUT: Duration = Duration::from_secs(30);

pub const SEARCH_DESCRIPTION: &str = "A web search engine. Use it for current events, facts, \
     and anything you cannot answer from your own knowledge.";

/// Google search through SerpApi.
pub struct SearchTool {
    api_key: Option<String>,
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl SearchTool {
    /// Every request is bounded by `timeout`.
    pub fn new(api_key: Option<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            api_key,
            endpoint: SERPAPI_URL.to_string(),
            client,
        })
    }

    /// Reads `SERPAPI_API_KEY`. A missing key is reported per call.
    pub fn from_env() -> Result<Self, reqwest::Error> {
        Self::new(std::env::var("SERPAPI_API_KEY").ok(), DEFAULT_SEARCH_TIMEOUT)
    }

    /// Sends queries to a SerpApi-compatible endpoint other than the public one.
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    fn search(&self, api_key: &str, query: &str) -> Result<Value, reqwest::Error> {
        self.client
            .get(&self.endpoint)
            .query(&[
                ("engine", "google"),
                ("q", query),
                ("api_key", api_key),
                ("gl", "cn"),
                ("hl", "zh-cn"),
            ])
            .send()?
            .error_for_status()?
            .json::<Value>()
    }
}

impl Tool for SearchTool {
    fn execute(&self, input: &str) -> ToolResult {
        let Some(api_key) = self.api_key.as_deref() else {
            return ToolResult::failure("SERPAPI_API_KEY not set");
        };

        info!(query = input, "running web search");
        match self.search(api_key, input) {
            Ok(results) => ToolResult::success(&summarize_results(&results, input)),
            Err(e) => ToolResult::failure(&format!("search failed: {e}")),
        }
    }
}

/// Picks the most direct answer out of a SerpApi response.
pub fn summarize_results(results: &Value, query: &str) -> String {
    if let Some(list) = results.get("answer_box_list").and_then(Value::as_array) {
        return list
            .iter()
            .map(|item| item.as_str().map(str::to_string).unwrap_or_else(|| item.to_string()))
            .collect::<Vec<_>>()
            .join("\n");
    }

    if let Some(answer) = results
        .get("answer_box")
        .and_then(|b| b.get("answer"))
        .and_then(Value::as_str)
    {
        return answer.to_string();
    }

    if let Some(description) = results
        .get("knowledge_graph")
        .and_then(|k| k.get("description"))
        .and_then(Value::as_str)
    {
        return description.to_string();
    }

    let organic = results
        .get("organic_results")
        .and_then(Value::as_array)
        .filter(|r| !r.is_empty());

    match organic {
        Some(entries) => entries
            .iter()
            .take(3)
            .enumerate()
            .map(|(i, entry)| {
                let field = |key: &str| entry.get(key).and_then(Value::as_str).unwrap_or("");
                format!("[{}] {}\n{}", i + 1, field("title"), field("snippet"))
            })
            .collect::<Vec<_>>()
            .join("\n\n"),
        None => format!("no results found for '{}'", query),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::net::TcpListener;
    use std::thread;
    use std::time::Instant;

    #[test]
    fn test_answer_box_list_wins() {
        let results = json!({
            "answer_box_list": ["a", "b"],
            "answer_box": { "answer": "ignored" }
        });
        assert_eq!(summarize_results(&results, "q"), "a\nb");
    }

    #[test]
    fn test_answer_box_then_knowledge_graph() {
        let results = json!({ "answer_box": { "answer": "Paris" } });
        assert_eq!(summarize_results(&results, "q"), "Paris");

        let results = json!({ "knowledge_graph": { "description": "A city" } });
        assert_eq!(summarize_results(&results, "q"), "A city");
    }

    #[test]
    fn test_organic_results_top_three() {
        let results = json!({
            "organic_results": [
                { "title": "t1", "snippet": "s1" },
                { "title": "t2", "snippet": "s2" },
                { "title": "t3", "snippet": "s3" },
                { "title": "t4", "snippet": "s4" }
            ]
        });
        assert_eq!(
            summarize_results(&results, "q"),
            "[1] t1\ns1\n\n[2] t2\ns2\n\n[3] t3\ns3"
        );
    }

    #[test]
    fn test_no_results() {
        let results = json!({ "organic_results": [] });
        assert_eq!(
            summarize_results(&results, "nothing"),
            "no results found for 'nothing'"
        );
    }

    #[test]
    fn test_missing_key_is_failure() {
        let tool = SearchTool::new(None, DEFAULT_SEARCH_TIMEOUT).unwrap();
        let result = tool.execute("anything");
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("SERPAPI_API_KEY not set"));
    }

    #[test]
    fn test_unresponsive_endpoint_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        // Accept the connection and never answer.
        thread::spawn(move || {
            if let Ok((stream, _)) = listener.accept() {
                thread::sleep(Duration::from_secs(10));
                drop(stream);
            }
        });

        let tool = SearchTool::new(Some("key".into()), Duration::from_millis(300))
            .unwrap()
            .with_endpoint(&format!("http://{}/search.json", addr));

        let started = Instant::now();
        let result = tool.execute("capital of France");

        assert!(!result.success);
        assert!(result.error.unwrap().starts_with("search failed"));
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
