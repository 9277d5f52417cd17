// src/tools/mod.rs

use std::any::Any;
use std::collections::HashMap;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use tracing::{debug, warn};

pub mod search;
pub use search::SearchTool;

/// The result of executing a tool.
#[derive(Debug, Clone)]
pub struct ToolResult {
    pub success: bool,
    pub output: Option<String>,
    pub error: Option<String>,
}

impl ToolResult {
    pub fn success(output: &str) -> Self {
        Self {
            success: true,
            output: Some(output.to_string()),
            error: None,
        }
    }

    pub fn failure(error: &str) -> Self {
        Self {
            success: false,
            output: None,
            error: Some(error.to_string()),
        }
    }
}

/// A capability the agent can invoke with a single line of text.
pub trait Tool: Send + Sync {
    fn execute(&self, input: &str) -> ToolResult;
}

impl<F> Tool for F
where
    F: Fn(&str) -> ToolResult + Send + Sync,
{
    fn execute(&self, input: &str) -> ToolResult {
        self(input)
    }
}

/// A registered tool: its unique name, the description shown to the model
/// and the handler.
#[derive(Clone)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub handler: Arc<dyn Tool>,
}

impl std::fmt::Debug for ToolSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolSpec")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Name-keyed tool registry. Keys are exact (case and whitespace sensitive);
/// listing order is the order names were first registered.
#[derive(Default, Debug, Clone)]
pub struct ToolRegistry {
    specs: Vec<ToolSpec>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a tool. Re-registering a name replaces its handler and
    /// description in place and logs a warning.
    pub fn register<T: Tool + 'static>(&mut self, name: &str, description: &str, handler: T) {
        let spec = ToolSpec {
            name: name.to_string(),
            description: description.to_string(),
            handler: Arc::new(handler),
        };

        match self.index.get(name) {
            Some(&slot) => {
                warn!(tool = name, "tool already registered, overwriting");
                self.specs[slot] = spec;
            }
            None => {
                self.index.insert(name.to_string(), self.specs.len());
                self.specs.push(spec);
                debug!(tool = name, "tool registered");
            }
        }
    }

    pub fn with_tool<T: Tool + 'static>(mut self, name: &str, description: &str, handler: T) -> Self {
        self.register(name, description, handler);
        self
    }

    pub fn lookup(&self, name: &str) -> Option<&dyn Tool> {
        self.index
            .get(name)
            .map(|&slot| self.specs[slot].handler.as_ref())
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn describe(&self) -> String {
        self.specs
            .iter()
            .map(|spec| format!("- {}: {}", spec.name, spec.description))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Runs a tool and always returns an observation. Unknown names, tool
    /// failures and handler panics all come back as text.
    pub fn execute(&self, name: &str, input: &str) -> String {
        let Some(tool) = self.lookup(name) else {
            return format!("no tool named '{}' found", name);
        };

        match catch_unwind(AssertUnwindSafe(|| tool.execute(input))) {
            Ok(result) if result.success => result.output.unwrap_or_default(),
            Ok(result) => format!(
                "error while executing tool: {}",
                result.error.unwrap_or_else(|| "unknown error".into())
            ),
            Err(payload) => {
                warn!(tool = name, "tool panicked");
                format!("error while executing tool: {}", panic_detail(payload.as_ref()))
            }
        }
    }
}

fn panic_detail(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "tool panicked".to_string()
    }
}
