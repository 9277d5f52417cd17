pub mod agent;
pub mod config;
pub mod context;
pub mod error;
pub mod memory;
pub mod model;
pub mod protocol;
pub mod tools;

pub use agent::{AbortReason, ReactAgent, RunOutcome, RunReport};
pub use config::{BracketMatching, LlmConfig, MalformedPolicy, ReactConfig};
pub use error::{AgentError, ConfigError, LlmError};
pub use memory::{Memory, Record, RecordKind, Trajectory};
pub use model::{Message, ModelClient, Role};
pub use protocol::{ActionDirective, ParsedOutput, StepOutcome};
pub use tools::{Tool, ToolRegistry, ToolResult};
