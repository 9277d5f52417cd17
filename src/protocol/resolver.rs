// src/protocol/resolver.rs

use crate::config::BracketMatching;
use crate::protocol::ActionDirective;
use regex::Regex;
use std::sync::OnceLock;

const FINISH_PREFIX: &str = "Finish[";

fn tool_call_regex() -> &'static Regex {
    static TOOL_CALL: OnceLock<Regex> = OnceLock::new();
    TOOL_CALL.get_or_init(|| Regex::new(r"^(\w+)\[").expect("tool call pattern is valid"))
}

/// Classifies an action segment.
///
/// `Finish[..]` is checked first, then `Name[..]` where the name is one or
/// more word characters. Text after the terminating `]` is dropped, which
/// includes the closing backtick when the model quotes the directive the way
/// the prompt shows it.
pub fn resolve_action(action: &str, matching: BracketMatching) -> ActionDirective {
    let action = strip_opening_backtick(action.trim());

    if let Some(rest) = action.strip_prefix(FINISH_PREFIX) {
        return match bracket_body(rest, matching) {
            Some(answer) => ActionDirective::Finish {
                answer: answer.to_string(),
            },
            None => ActionDirective::Malformed,
        };
    }

    let Some(caps) = tool_call_regex().captures(action) else {
        return ActionDirective::Malformed;
    };
    let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
        return ActionDirective::Malformed;
    };

    match bracket_body(&action[whole.end()..], matching) {
        Some(input) => ActionDirective::Invoke {
            tool_name: name.as_str().to_string(),
            tool_input: input.to_string(),
        },
        None => ActionDirective::Malformed,
    }
}

/// Body of a bracket pair whose `[` has already been consumed.
fn bracket_body(rest: &str, matching: BracketMatching) -> Option<&str> {
    match matching {
        BracketMatching::FirstClose => rest.find(']').map(|end| &rest[..end]),
        BracketMatching::Balanced => {
            let mut depth = 1usize;
            for (i, c) in rest.char_indices() {
                match c {
                    '[' => depth += 1,
                    ']' => {
                        depth -= 1;
                        if depth == 0 {
                            return Some(&rest[..i]);
                        }
                    }
                    _ => {}
                }
            }
            None
        }
    }
}

fn strip_opening_backtick(action: &str) -> &str {
    action
        .strip_prefix('`')
        .map(str::trim_start)
        .unwrap_or(action)
}
