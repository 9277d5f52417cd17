// src/protocol/mod.rs

pub mod parser;
pub mod resolver;

pub use parser::parse_output;
pub use resolver::resolve_action;

/// Raw model text split into its `Thought:` and `Action:` segments.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedOutput {
    pub thought: Option<String>,
    pub action: Option<String>,
}

/// What an action segment asks the loop to do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionDirective {
    Finish { answer: String },
    Invoke { tool_name: String, tool_input: String },
    Malformed,
}

/// Record of one loop iteration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepOutcome {
    pub step: usize,
    pub thought: Option<String>,
    pub action: ActionDirective,
    pub observation: Option<String>,
}
