use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Declared interface of a tool, sent to the LLM as a callable capability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    /// JSON Schema describing the tool's arguments.
    pub parameters: serde_json::Value,
}

/// Structured outcome of one tool execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    pub success: bool,
    pub output: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToolResult {
    pub fn ok(output: impl Into<String>) -> Self {
        Self {
            success: true,
            output: output.into(),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            output: String::new(),
            error: Some(message.into()),
        }
    }
}

/// An agent-callable capability.
///
/// Tools are registered with the primary agent invocation; the model decides
/// whether and in what order to call them.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Canonical tool name the LLM invokes.
    fn name(&self) -> &str;

    /// Human/model-readable description of what the tool does.
    fn description(&self) -> &str;

    /// JSON Schema for the tool's arguments.
    fn parameters_schema(&self) -> serde_json::Value;

    /// Full specification for provider wire formats.
    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters_schema(),
        }
    }

    /// Execute the tool with JSON arguments.
    async fn execute(&self, args: serde_json::Value) -> anyhow::Result<ToolResult>;
}
