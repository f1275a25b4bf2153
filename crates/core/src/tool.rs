//! Tool trait — the abstraction over assistant capabilities.
//!
//! Tools are what let the model act on the user's behalf: schedule and
//! cancel meetings, inspect the calendar, look up portfolio data, record
//! satisfaction feedback. Adding a capability means registering a new
//! handler, never editing a central conditional.

use crate::error::ToolError;
use crate::event::UserId;
use crate::model::ToolDefinition;
use async_trait::async_trait;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Per-turn context handed to every tool invocation.
#[derive(Debug, Clone, Default)]
pub struct ToolContext {
    /// Identity to key durable side-records by. When absent, tools still
    /// run but skip persistence.
    pub user_id: Option<UserId>,
}

impl ToolContext {
    pub fn for_user(user_id: UserId) -> Self {
        Self {
            user_id: Some(user_id),
        }
    }
}

/// The core Tool trait.
///
/// Each handler calls exactly one external collaborator operation and
/// formats a result string the model can read.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The unique name of this tool (e.g., "schedule_meeting").
    fn name(&self) -> &str;

    /// A description of what this tool does (sent to the model).
    fn description(&self) -> &str;

    /// JSON Schema describing this tool's parameters.
    fn parameters_schema(&self) -> serde_json::Value;

    /// Execute the tool with the given arguments.
    async fn invoke(
        &self,
        arguments: serde_json::Value,
        ctx: &ToolContext,
    ) -> std::result::Result<String, ToolError>;

    /// Convert this tool into a ToolDefinition for sending to the model.
    fn to_definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters_schema(),
        }
    }
}

/// A registry of available tools.
///
/// The agent loop uses this to:
/// 1. Get tool definitions to send to the model
/// 2. Dispatch tool calls when the model requests them
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool. Replaces any existing tool with the same name.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        let name = tool.name().to_string();
        self.tools.insert(name, tool);
    }

    /// Get a tool by name.
    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.get(name).map(|t| t.as_ref())
    }

    /// Get all tool definitions, sorted by name for a stable schema.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        let mut defs: Vec<ToolDefinition> = self.tools.values().map(|t| t.to_definition()).collect();
        defs.sort_by(|a, b| a.name.cmp(&b.name));
        defs
    }

    /// Dispatch a tool call. Never fails: unknown tools and handler
    /// errors come back as `ERROR:`-tagged result strings so the model
    /// can react instead of the turn dying.
    pub async fn dispatch(
        &self,
        name: &str,
        arguments: serde_json::Value,
        ctx: &ToolContext,
    ) -> String {
        let Some(tool) = self.tools.get(name) else {
            warn!(tool = name, "Unknown tool requested");
            return format!("ERROR: unknown tool '{name}'");
        };

        debug!(tool = name, "Dispatching tool call");
        match tool.invoke(arguments, ctx).await {
            Ok(output) => output,
            Err(e) => {
                warn!(tool = name, error = %e, "Tool execution failed");
                format!("ERROR: {e}")
            }
        }
    }

    /// List all registered tool names.
    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(|s| s.as_str()).collect()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
