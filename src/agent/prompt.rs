// src/agent/prompt.rs

/// Builds the prompt for one step from the tool listing, the question and
/// the history so far.
pub fn render_prompt(tools: &str, question: &str, history: &str) -> String {
    format!(
        r#"You are an intelligent assistant that can call external tools.

Available tools:
{tools}

Respond strictly in the following format:

Thought: your reasoning, used to analyse the problem, break it down and plan the next step.
Action: the action you decide to take. It must be exactly one of:
- `{{tool_name}}[{{tool_input}}]`: call one of the available tools.
- `Finish[final answer]`: give the final answer once you are confident you have it.
- When you have gathered enough information to answer the question, you must use Finish[final answer] after Action:.

Now solve the following problem:
Question: {question}
History: {history}
"#
    )
}
