use crate::tools::ToolSpec;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A single message in a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".into(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".into(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".into(),
            content: content.into(),
        }
    }

    /// Assistant turn that requested tool calls. The calls ride through the
    /// message content as JSON and are unpacked into wire shape by providers.
    pub fn assistant_tool_calls(text: Option<&str>, tool_calls: &[ToolCall]) -> Self {
        let content = serde_json::json!({
            "content": text,
            "tool_calls": tool_calls,
        });
        Self {
            role: "assistant".into(),
            content: content.to_string(),
        }
    }

    /// Result of one tool execution, fed back to the LLM.
    pub fn tool_result(tool_call_id: &str, content: &str) -> Self {
        let payload = serde_json::json!({
            "tool_call_id": tool_call_id,
            "content": content,
        });
        Self {
            role: "tool".into(),
            content: payload.to_string(),
        }
    }
}

/// A tool call requested by the LLM.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    /// JSON-encoded arguments, exactly as the provider returned them.
    pub arguments: String,
}

/// An LLM response that may contain text, tool calls, or both.
#[derive(Debug, Clone, Default)]
pub struct ChatResponse {
    /// Text content of the response (may be empty if only tool calls).
    pub text: Option<String>,
    /// Tool calls requested by the LLM.
    pub tool_calls: Vec<ToolCall>,
}

impl ChatResponse {
    /// True when the LLM wants to invoke at least one tool.
    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }

    /// Convenience: return text content or empty string.
    pub fn text_or_empty(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }
}

/// Model inference backend.
///
/// This is the injectable capability seam: the conversational loop and the
/// classifier tool only see this trait, so tests swap in deterministic stubs
/// while production wires the network-bound implementation.
#[async_trait]
pub trait Provider: Send + Sync {
    /// One-shot chat with optional system prompt.
    async fn chat_with_system(
        &self,
        system_prompt: Option<&str>,
        message: &str,
        model: &str,
        temperature: f64,
    ) -> anyhow::Result<String>;

    /// Structured chat carrying tool specifications. The response may request
    /// tool invocations; callers feed results back via [`ChatMessage::tool_result`].
    async fn chat_with_tools(
        &self,
        messages: &[ChatMessage],
        tools: &[ToolSpec],
        model: &str,
        temperature: f64,
    ) -> anyhow::Result<ChatResponse>;

    fn name(&self) -> &str;
}
