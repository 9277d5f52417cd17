// src/protocol/parser.rs

use crate::protocol::ParsedOutput;

const THOUGHT_LABEL: &str = "Thought:";
const ACTION_LABEL: &str = "Action:";

/// Splits model output into thought and action.
///
/// The thought runs from `Thought:` up to the next `Action:` (or the end of
/// the text); the action runs from `Action:` to the end. Both are trimmed.
/// A missing label yields `None` for that segment, never an error.
pub fn parse_output(text: &str) -> ParsedOutput {
    let thought = text.find(THOUGHT_LABEL).map(|start| {
        let body = &text[start + THOUGHT_LABEL.len()..];
        let end = body.find(ACTION_LABEL).unwrap_or(body.len());
        body[..end].trim().to_string()
    });

    let action = text
        .find(ACTION_LABEL)
        .map(|start| text[start + ACTION_LABEL.len()..].trim().to_string());

    ParsedOutput { thought, action }
}
