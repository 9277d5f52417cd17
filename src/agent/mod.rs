// src/agent/mod.rs

//! The ReAct loop: think, parse, resolve, act, repeat until the model
//! finishes, breaks protocol, or the step budget runs out.

use crate::config::{MalformedPolicy, ReactConfig};
use crate::context::RunContext;
use crate::error::AgentError;
use crate::memory::Trajectory;
use crate::model::{Message, ModelClient};
use crate::protocol::{ActionDirective, ParsedOutput, StepOutcome, parse_output, resolve_action};
use crate::tools::{Tool, ToolRegistry};
use thiserror::Error;
use tracing::{debug, info, warn};

pub mod prompt;
pub use prompt::render_prompt;

pub const MALFORMED_OBSERVATION: &str = "could not parse action, please follow the format";

/// Why a run ended without an answer before its budget was spent.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AbortReason {
    #[error("model call failed: {0}")]
    ModelFailure(String),

    #[error("model returned an empty response")]
    EmptyResponse,

    #[error("model output had no action")]
    MissingAction,

    #[error("could not parse action: {0}")]
    MalformedAction(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    Done { answer: String },
    Aborted(AbortReason),
    Exhausted,
}

impl RunOutcome {
    pub fn answer(&self) -> Option<&str> {
        match self {
            RunOutcome::Done { answer } => Some(answer),
            _ => None,
        }
    }

    pub fn into_answer(self) -> Option<String> {
        match self {
            RunOutcome::Done { answer } => Some(answer),
            _ => None,
        }
    }
}

/// Everything a run produced.
#[derive(Debug)]
pub struct RunReport {
    pub outcome: RunOutcome,
    pub steps: Vec<StepOutcome>,
    pub trajectory: Trajectory,
}

/// ReAct agent over a model client and a tool registry.
///
/// The agent itself holds no per-run state, so `run` can be called
/// repeatedly, or from several threads at once when `M` is shared.
pub struct ReactAgent<M> {
    model: M,
    tools: ToolRegistry,
    config: ReactConfig,
}

impl<M: ModelClient> ReactAgent<M> {
    /// # Errors
    ///
    /// Returns `AgentError::InvalidConfig` if `config.max_steps` is zero.
    pub fn new(model: M, tools: ToolRegistry, config: ReactConfig) -> Result<Self, AgentError> {
        config.validate()?;
        Ok(Self {
            model,
            tools,
            config,
        })
    }

    /// Registration needs `&mut self`, so it cannot overlap a run.
    pub fn register_tool<T: Tool + 'static>(&mut self, name: &str, description: &str, handler: T) {
        self.tools.register(name, description, handler);
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    pub fn config(&self) -> &ReactConfig {
        &self.config
    }

    /// Answers `question`, or returns `None` if the run aborted or ran out
    /// of steps.
    pub fn run(&self, question: &str) -> Option<String> {
        self.run_detailed(question).outcome.into_answer()
    }

    pub fn run_detailed(&self, question: &str) -> RunReport {
        let mut ctx = RunContext::new();
        let outcome = self.drive(question, &mut ctx);
        let (steps, trajectory) = ctx.into_parts();
        RunReport {
            outcome,
            steps,
            trajectory,
        }
    }

    fn drive(&self, question: &str, ctx: &mut RunContext) -> RunOutcome {
        let max_steps = self.config.max_steps;
        let tools = self.tools.describe();

        while ctx.step() < max_steps {
            let step = ctx.next_step();
            info!(step, max_steps, "starting step");

            let prompt = render_prompt(&tools, question, &ctx.history());
            debug!(step, %prompt, "prompt built");

            let text = match self.model.think(&[Message::user(&prompt)]) {
                Ok(text) if !text.trim().is_empty() => text,
                Ok(_) => {
                    warn!(step, "model returned an empty response");
                    return RunOutcome::Aborted(AbortReason::EmptyResponse);
                }
                Err(e) => {
                    warn!(step, error = %e, "model call failed");
                    return RunOutcome::Aborted(AbortReason::ModelFailure(e.to_string()));
                }
            };

            let ParsedOutput { thought, action } = parse_output(&text);
            if let Some(thought) = &thought {
                info!(step, %thought, "thought");
            }

            let Some(action) = action.filter(|a| !a.is_empty()) else {
                warn!(step, "no action in model output, stopping");
                return RunOutcome::Aborted(AbortReason::MissingAction);
            };

            let directive = resolve_action(&action, self.config.bracket_matching);
            let (observation, terminal) = match &directive {
                ActionDirective::Finish { answer } => {
                    info!(step, %answer, "finished");
                    let done = RunOutcome::Done {
                        answer: answer.clone(),
                    };
                    (None, Some(done))
                }
                ActionDirective::Invoke {
                    tool_name,
                    tool_input,
                } if tool_input.trim().is_empty() => {
                    warn!(step, tool = %tool_name, "empty tool input, skipping step");
                    (None, None)
                }
                ActionDirective::Invoke {
                    tool_name,
                    tool_input,
                } => {
                    info!(step, tool = %tool_name, input = %tool_input, "action");
                    let observation = self.tools.execute(tool_name, tool_input);
                    info!(step, %observation, "observation");
                    ctx.record_exchange(&format!("{}[{}]", tool_name, tool_input), &observation);
                    (Some(observation), None)
                }
                ActionDirective::Malformed => match self.config.malformed_policy {
                    MalformedPolicy::Abort => {
                        warn!(step, %action, "malformed action, stopping");
                        let reason = AbortReason::MalformedAction(action.clone());
                        (None, Some(RunOutcome::Aborted(reason)))
                    }
                    MalformedPolicy::Observe => {
                        warn!(step, %action, "malformed action, asking model to retry");
                        ctx.record_exchange(&action, MALFORMED_OBSERVATION);
                        (Some(MALFORMED_OBSERVATION.to_string()), None)
                    }
                },
            };

            ctx.push_step(StepOutcome {
                step,
                thought,
                action: directive,
                observation,
            });

            if let Some(outcome) = terminal {
                return outcome;
            }
        }

        info!(max_steps, "step budget exhausted");
        RunOutcome::Exhausted
    }
}
